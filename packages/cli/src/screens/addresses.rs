//! Household information screen: address list, add form and check-in.

use dialoguer::{Input, Select};
use radon_canvas_cli_utils::with_spinner;
use radon_canvas_models::{Address, VisitStatus};
use radon_canvas_views::{AddressFilter, AddressesView, CheckIn};

use super::{CliResult, Context, settle, truncate, warn_load};

const ADDRESS_WIDTH: usize = 32;
const NEIGHBORHOOD_WIDTH: usize = 22;

enum Action {
    Add,
    Filter,
    CheckIn,
    Delete,
    Refresh,
    Back,
}

impl Action {
    const ALL: &[Self] = &[
        Self::Add,
        Self::Filter,
        Self::CheckIn,
        Self::Delete,
        Self::Refresh,
        Self::Back,
    ];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::Add => "Add address",
            Self::Filter => "Filter by neighborhood",
            Self::CheckIn => "Check in at an address",
            Self::Delete => "Delete an address",
            Self::Refresh => "Refresh",
            Self::Back => "Back to menu",
        }
    }
}

fn filter_label(view: &AddressesView) -> String {
    match view.filter() {
        AddressFilter::All => "All Addresses".to_string(),
        AddressFilter::Unassigned => "Unassigned".to_string(),
        AddressFilter::Neighborhood(id) => {
            view.neighborhood_name(Some(id.as_str())).to_string()
        }
    }
}

fn row(view: &AddressesView, address: &Address) -> String {
    let visited = address
        .visited_on()
        .map_or_else(|| "-".to_string(), |d| d.format("%-m/%-d/%Y").to_string());
    let mut line = format!(
        "{:<aw$} {:<nw$} {:<16} {:<10}",
        truncate(&address.address, ADDRESS_WIDTH),
        truncate(
            view.neighborhood_name(address.neighborhood_id.as_deref()),
            NEIGHBORHOOD_WIDTH
        ),
        address.status.label(),
        visited,
        aw = ADDRESS_WIDTH,
        nw = NEIGHBORHOOD_WIDTH,
    );
    if let Some(notes) = address.notes.as_deref().filter(|n| !n.is_empty()) {
        line.push(' ');
        line.push_str(&truncate(&notes.replace('\n', " "), 40));
    }
    line.trim_end().to_string()
}

/// The address table as shown under the heading.
#[must_use]
pub fn render(view: &AddressesView) -> String {
    let mut lines = vec![format!("Filter: {}", filter_label(view)), String::new()];

    if let Some((heading, hint)) = view.empty_message() {
        lines.push(heading.to_string());
        lines.push(hint.to_string());
        return lines.join("\n");
    }

    lines.push(format!(
        "{:<aw$} {:<nw$} {:<16} {:<10} NOTES",
        "ADDRESS",
        "NEIGHBORHOOD",
        "STATUS",
        "VISITED",
        aw = ADDRESS_WIDTH,
        nw = NEIGHBORHOOD_WIDTH,
    ));
    lines.push("-".repeat(100));
    for address in view.visible() {
        lines.push(row(view, address));
    }
    lines.push(String::new());
    lines.push(format!("{} address(es)", view.visible().len()));
    lines.join("\n")
}

/// The door script for an open check-in.
#[must_use]
pub fn render_check_in(check_in: &CheckIn) -> String {
    let mut lines = vec![format!("Check In: {}", check_in.address.address)];
    lines.push(String::new());
    if let Some(heading) = check_in.template_heading() {
        lines.push(heading);
    }
    lines.push(check_in.template().to_string());
    lines.join("\n")
}

async fn load(ctx: &Context, view: &mut AddressesView) {
    let result = with_spinner(&ctx.multi, "Loading addresses...", view.load(&ctx.api)).await;
    warn_load(result, "addresses");
}

/// Runs the addresses screen until the user goes back. The list starts
/// unfiltered; the filter action narrows it.
///
/// # Errors
///
/// Returns an error if a prompt fails.
pub async fn run(ctx: &Context) -> CliResult {
    let mut view = AddressesView::new();
    load(ctx, &mut view).await;

    let labels: Vec<&str> = Action::ALL.iter().map(Action::label).collect();

    loop {
        println!("{}", render(&view));
        println!();

        let idx = Select::new()
            .with_prompt("Household Information")
            .items(&labels)
            .default(0)
            .interact()?;

        match Action::ALL[idx] {
            Action::Add => {
                fill_form(&mut view)?;
                settle(view.add(&ctx.api, &ctx.ui).await);
            }
            Action::Filter => {
                let filter = pick_filter(&view)?;
                let result = with_spinner(
                    &ctx.multi,
                    "Loading addresses...",
                    view.set_filter(&ctx.api, filter),
                )
                .await;
                warn_load(result, "addresses");
            }
            Action::CheckIn => {
                let Some(id) = pick(&view, "Check in at which address?")? else {
                    continue;
                };
                if view.begin_check_in(&id) {
                    fill_check_in(&mut view)?;
                    if settle(view.save_check_in(&ctx.api, &ctx.ui).await).is_none() {
                        view.cancel_check_in();
                    }
                }
            }
            Action::Delete => {
                if let Some(id) = pick(&view, "Delete which address?")? {
                    settle(view.delete(&ctx.api, &ctx.ui, &id).await);
                }
            }
            Action::Refresh => load(ctx, &mut view).await,
            Action::Back => return Ok(()),
        }
    }
}

fn pick(view: &AddressesView, prompt: &str) -> Result<Option<String>, dialoguer::Error> {
    let visible = view.visible();
    if visible.is_empty() {
        println!("No addresses to choose from.");
        return Ok(None);
    }
    let names: Vec<&str> = visible.iter().map(|a| a.address.as_str()).collect();
    let choice = Select::new()
        .with_prompt(prompt)
        .items(&names)
        .default(0)
        .interact_opt()?;
    Ok(choice.map(|i| visible[i].id.clone()))
}

/// Every filter the menu offers, with its label.
fn filter_choices(view: &AddressesView) -> (Vec<AddressFilter>, Vec<String>) {
    let mut choices = vec![AddressFilter::All, AddressFilter::Unassigned];
    let mut names = vec!["All Addresses".to_string(), "Unassigned".to_string()];
    for neighborhood in view.neighborhoods() {
        choices.push(AddressFilter::Neighborhood(neighborhood.id.clone()));
        names.push(neighborhood.name.clone());
    }
    (choices, names)
}

fn pick_filter(view: &AddressesView) -> Result<AddressFilter, dialoguer::Error> {
    let (mut choices, names) = filter_choices(view);
    let current = choices.iter().position(|c| c == view.filter()).unwrap_or(0);
    let picked = Select::new()
        .with_prompt("Show addresses for")
        .items(&names)
        .default(current)
        .interact()?;
    Ok(choices.swap_remove(picked))
}

fn fill_form(view: &mut AddressesView) -> Result<(), dialoguer::Error> {
    let address: String = Input::new()
        .with_prompt("Address")
        .allow_empty(true)
        .interact_text()?;

    let mut ids = vec![String::new()];
    let mut names = vec!["No neighborhood".to_string()];
    for neighborhood in view.neighborhoods() {
        ids.push(neighborhood.id.clone());
        names.push(neighborhood.name.clone());
    }
    let picked = Select::new()
        .with_prompt("Neighborhood")
        .items(&names)
        .default(0)
        .interact()?;

    view.form.address = address;
    view.form.neighborhood_id = ids.swap_remove(picked);
    Ok(())
}

fn fill_check_in(view: &mut AddressesView) -> Result<(), dialoguer::Error> {
    let Some(check_in) = view.check_in_mut() else {
        return Ok(());
    };
    println!();
    println!("{}", render_check_in(check_in));
    println!();

    let statuses = VisitStatus::all();
    let names: Vec<&str> = statuses.iter().map(|s| s.label()).collect();
    let current = check_in
        .status
        .known()
        .and_then(|known| statuses.iter().position(|s| *s == known))
        .unwrap_or(0);
    let picked = Select::new()
        .with_prompt("Status")
        .items(&names)
        .default(current)
        .interact()?;
    check_in.status = statuses[picked].into();

    check_in.notes = Input::new()
        .with_prompt("Notes (blank keeps existing notes)")
        .allow_empty(true)
        .interact_text()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use radon_canvas_models::{
        AddressStatus, GENERIC_CHECK_IN_MESSAGE, Neighborhood, RiskLevel,
    };

    fn address(id: &str, street: &str, neighborhood_id: Option<&str>) -> Address {
        Address {
            id: id.to_string(),
            address: street.to_string(),
            neighborhood_id: neighborhood_id.map(str::to_string),
            status: AddressStatus::default(),
            notes: None,
            visited_at: None,
            created_at: String::new(),
        }
    }

    fn seeded(addresses: Vec<Address>) -> AddressesView {
        let mut view = AddressesView::new();
        let token = view.begin_load();
        view.finish_load(token, addresses);
        view
    }

    #[test]
    fn empty_list_hints_at_adding() {
        let text = render(&AddressesView::new());
        assert_eq!(
            text,
            "Filter: All Addresses\n\nNo addresses found\nAdd your first address to get started."
        );
    }

    #[test]
    fn rows_show_status_visit_date_and_notes() {
        let mut visited = address("2", "4510 Cote Brilliante Ave", Some("9"));
        visited.status = VisitStatus::Interested.into();
        visited.visited_at = Some("2024-05-20T14:03:11".to_string());
        visited.notes = Some("Call back\nafter 5pm".to_string());

        let text = render(&seeded(vec![address("1", "123 Main St", None), visited]));
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines[4].starts_with("123 Main St"));
        assert!(lines[4].contains("Unassigned"));
        assert!(lines[4].contains("Not Visited"));
        assert!(lines[4].ends_with('-'));

        assert!(lines[5].contains("Unknown"));
        assert!(lines[5].contains("Interested"));
        assert!(lines[5].contains("5/20/2024"));
        assert!(lines[5].ends_with("Call back after 5pm"));

        assert_eq!(lines.last(), Some(&"2 address(es)"));
    }

    #[test]
    fn filter_menu_offers_all_and_unassigned() {
        let (choices, names) = filter_choices(&AddressesView::new());
        assert_eq!(choices, [AddressFilter::All, AddressFilter::Unassigned]);
        assert_eq!(names, ["All Addresses", "Unassigned"]);
    }

    #[test]
    fn check_in_script_uses_neighborhood_template() {
        let neighborhood = Neighborhood {
            id: "9".to_string(),
            name: "The Ville".to_string(),
            description: None,
            risk_level: RiskLevel::High,
            messaging_template: "Knock twice".to_string(),
            created_at: String::new(),
        };
        let check_in = CheckIn::new(address("2", "1 Elm", Some("9")), Some(neighborhood));
        assert_eq!(
            render_check_in(&check_in),
            "Check In: 1 Elm\n\nThe Ville - Optimized Message Template:\nKnock twice"
        );

        let generic = CheckIn::new(address("1", "123 Main St", None), None);
        assert!(render_check_in(&generic).ends_with(GENERIC_CHECK_IN_MESSAGE));
    }
}
