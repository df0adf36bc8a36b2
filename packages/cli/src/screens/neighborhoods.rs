//! Neighborhoods screen: searchable list plus the add / edit form.

use dialoguer::{Confirm, Input, Select};
use radon_canvas_cli_utils::with_spinner;
use radon_canvas_models::{Neighborhood, RiskLevel};
use radon_canvas_views::{NeighborhoodForm, NeighborhoodsView, RiskFilter};

use super::{CliResult, Context, settle, truncate, warn_load};

const TEMPLATE_PREVIEW: usize = 80;

enum Action {
    Search,
    FilterRisk,
    Add,
    Edit,
    Delete,
    Refresh,
    Back,
}

impl Action {
    const ALL: &[Self] = &[
        Self::Search,
        Self::FilterRisk,
        Self::Add,
        Self::Edit,
        Self::Delete,
        Self::Refresh,
        Self::Back,
    ];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::Search => "Search",
            Self::FilterRisk => "Filter by risk level",
            Self::Add => "Add neighborhood",
            Self::Edit => "Edit a neighborhood",
            Self::Delete => "Delete a neighborhood",
            Self::Refresh => "Refresh",
            Self::Back => "Back to menu",
        }
    }
}

fn filter_label(filter: RiskFilter) -> String {
    match filter {
        RiskFilter::All => "All Risk Levels".to_string(),
        RiskFilter::Level(level) => format!("{} Risk", capitalize(level.as_ref())),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

fn card(neighborhood: &Neighborhood) -> Vec<String> {
    let mut lines = vec![format!(
        "{}  [{}]",
        neighborhood.name,
        neighborhood.risk_level.badge_label()
    )];
    if let Some(description) = neighborhood.description.as_deref() {
        lines.push(format!("    {description}"));
    }
    let template = neighborhood.effective_template().replace('\n', " ");
    lines.push(format!(
        "    Template: {}",
        truncate(template.trim(), TEMPLATE_PREVIEW)
    ));
    lines
}

/// The list as shown under the heading.
#[must_use]
pub fn render(view: &NeighborhoodsView) -> String {
    let mut lines = vec![format!(
        "{}  (filter: {})",
        view.showing_label(),
        filter_label(view.risk_filter)
    )];
    if !view.search.is_empty() {
        lines.push(format!("Search: \"{}\"", view.search));
    }
    lines.push(String::new());

    match view.empty_message() {
        Some(message) => lines.push(message.to_string()),
        None => {
            for neighborhood in view.visible() {
                lines.extend(card(neighborhood));
            }
        }
    }
    lines.join("\n")
}

async fn load(ctx: &Context, view: &mut NeighborhoodsView) {
    let result = with_spinner(&ctx.multi, "Loading neighborhoods...", view.load(&ctx.api)).await;
    warn_load(result, "neighborhoods");
}

/// Runs the neighborhoods screen until the user goes back.
///
/// # Errors
///
/// Returns an error if a prompt fails.
pub async fn run(ctx: &Context) -> CliResult {
    let mut view = NeighborhoodsView::new();
    load(ctx, &mut view).await;

    let labels: Vec<&str> = Action::ALL.iter().map(Action::label).collect();

    loop {
        println!("{}", render(&view));
        println!();

        let idx = Select::new()
            .with_prompt("Neighborhoods")
            .items(&labels)
            .default(0)
            .interact()?;

        match Action::ALL[idx] {
            Action::Search => {
                view.search = Input::new()
                    .with_prompt("Search neighborhoods")
                    .with_initial_text(view.search.clone())
                    .allow_empty(true)
                    .interact_text()?;
            }
            Action::FilterRisk => {
                let choices = RiskFilter::choices();
                let names: Vec<String> = choices.iter().copied().map(filter_label).collect();
                let current = choices
                    .iter()
                    .position(|c| *c == view.risk_filter)
                    .unwrap_or(0);
                let picked = Select::new()
                    .with_prompt("Risk level")
                    .items(&names)
                    .default(current)
                    .interact()?;
                view.risk_filter = choices[picked];
            }
            Action::Add => {
                view.cancel();
                fill_form(&mut view.form)?;
                settle(view.submit(&ctx.api, &ctx.ui).await);
            }
            Action::Edit => {
                let Some(id) = pick(&view, "Edit which neighborhood?")? else {
                    continue;
                };
                if view.edit(&id) {
                    fill_form(&mut view.form)?;
                    if settle(view.submit(&ctx.api, &ctx.ui).await).is_none() {
                        view.cancel();
                    }
                }
            }
            Action::Delete => {
                if let Some(id) = pick(&view, "Delete which neighborhood?")? {
                    settle(view.delete(&ctx.api, &ctx.ui, &id).await);
                }
            }
            Action::Refresh => load(ctx, &mut view).await,
            Action::Back => return Ok(()),
        }
    }
}

/// Prompts for one of the visible neighborhoods. Escape picks nothing.
fn pick(view: &NeighborhoodsView, prompt: &str) -> Result<Option<String>, dialoguer::Error> {
    let visible = view.visible();
    if visible.is_empty() {
        println!("No neighborhoods to choose from.");
        return Ok(None);
    }
    let names: Vec<&str> = visible.iter().map(|n| n.name.as_str()).collect();
    let choice = Select::new()
        .with_prompt(prompt)
        .items(&names)
        .default(0)
        .interact_opt()?;
    Ok(choice.map(|i| visible[i].id.clone()))
}

fn fill_form(form: &mut NeighborhoodForm) -> Result<(), dialoguer::Error> {
    form.name = Input::new()
        .with_prompt("Neighborhood Name")
        .with_initial_text(form.name.clone())
        .allow_empty(true)
        .interact_text()?;

    form.description = Input::new()
        .with_prompt("Description")
        .with_initial_text(form.description.clone())
        .allow_empty(true)
        .interact_text()?;

    let levels = RiskLevel::all();
    let names: Vec<String> = levels.iter().map(|l| capitalize(l.as_ref())).collect();
    let current = levels
        .iter()
        .position(|l| *l == form.risk_level)
        .unwrap_or(0);
    let picked = Select::new()
        .with_prompt("Risk Level")
        .items(&names)
        .default(current)
        .interact()?;
    form.risk_level = levels[picked];

    println!("Messaging Template:");
    println!("{}", form.displayed_template());
    let change = Confirm::new()
        .with_prompt("Change the messaging template?")
        .default(false)
        .interact()?;
    if change {
        form.messaging_template = Input::new()
            .with_prompt("New template (blank uses the default)")
            .allow_empty(true)
            .interact_text()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use radon_canvas_models::DEFAULT_MESSAGING_TEMPLATE;

    fn seeded() -> NeighborhoodsView {
        let mut view = NeighborhoodsView::new();
        let token = view.begin_load();
        view.finish_load(
            token,
            vec![
                Neighborhood {
                    id: "1".to_string(),
                    name: "The Ville".to_string(),
                    description: Some("North side".to_string()),
                    risk_level: RiskLevel::High,
                    messaging_template: "Short script".to_string(),
                    created_at: String::new(),
                },
                Neighborhood {
                    id: "2".to_string(),
                    name: "Shaw".to_string(),
                    description: None,
                    risk_level: RiskLevel::Low,
                    messaging_template: String::new(),
                    created_at: String::new(),
                },
            ],
        );
        view
    }

    #[test]
    fn renders_cards_with_badges() {
        let text = render(&seeded());
        assert!(text.starts_with("Showing 2 of 2 neighborhoods  (filter: All Risk Levels)"));
        assert!(text.contains("The Ville  [HIGH RISK]"));
        assert!(text.contains("    North side"));
        assert!(text.contains("    Template: Short script"));
    }

    #[test]
    fn blank_template_previews_the_default() {
        let text = render(&seeded());
        let preview: String = DEFAULT_MESSAGING_TEMPLATE.chars().take(20).collect();
        assert!(text.contains(&format!("    Template: {preview}")));
        assert!(text.lines().all(|l| l.chars().count() <= TEMPLATE_PREVIEW + 20));
    }

    #[test]
    fn renders_empty_states() {
        let mut view = seeded();
        view.risk_filter = RiskFilter::Level(RiskLevel::Medium);
        let text = render(&view);
        assert!(text.contains("Showing 0 of 2 neighborhoods  (filter: Medium Risk)"));
        assert!(text.ends_with("No neighborhoods found"));

        assert!(render(&NeighborhoodsView::new()).ends_with("No neighborhoods defined yet"));
    }

    #[test]
    fn search_is_echoed() {
        let mut view = seeded();
        view.search = "shaw".to_string();
        let text = render(&view);
        assert!(text.contains("Search: \"shaw\""));
        assert!(!text.contains("The Ville"));
    }
}
