//! Menu-driven shell over all routes.
//!
//! The navigation bar is presented as a `dialoguer` select. Choosing a
//! dropdown clicks it open and shows its links; escaping out of the links
//! is a click outside, which closes it again.

use dialoguer::Select;

use crate::nav::{APP_TITLE, MENU, MenuEntry, Navigation, Route};
use crate::screens::{self, CliResult, Context};

const QUIT: &str = "Quit";

fn entry_label(nav: &Navigation, index: usize, entry: &MenuEntry) -> String {
    match entry {
        MenuEntry::Link(link) if link.route == nav.route() => format!("{} *", link.label),
        MenuEntry::Link(link) => link.label.to_string(),
        MenuEntry::Dropdown { label, links } => {
            let marker = if nav.is_open(index) { '▴' } else { '▾' };
            if links.iter().any(|l| l.route == nav.route()) {
                format!("{label} {marker} *")
            } else {
                format!("{label} {marker}")
            }
        }
    }
}

/// Asks for the next route. `None` means quit.
fn choose_route(nav: &mut Navigation) -> Result<Option<Route>, dialoguer::Error> {
    loop {
        let mut labels: Vec<String> = MENU
            .iter()
            .enumerate()
            .map(|(i, entry)| entry_label(nav, i, entry))
            .collect();
        labels.push(QUIT.to_string());

        let idx = Select::new()
            .with_prompt(format!("{APP_TITLE}  [{}]", nav.route().path()))
            .items(&labels)
            .default(0)
            .interact()?;

        let Some(entry) = MENU.get(idx) else {
            return Ok(None);
        };
        nav.press(Some(idx));

        match entry {
            MenuEntry::Link(link) => return Ok(Some(link.route)),
            MenuEntry::Dropdown { label, links } => {
                if !nav.is_open(idx) {
                    continue;
                }
                let names: Vec<&str> = links.iter().map(|l| l.label).collect();
                let choice = Select::new()
                    .with_prompt(*label)
                    .items(&names)
                    .default(0)
                    .interact_opt()?;
                match choice {
                    Some(i) => return Ok(Some(links[i].route)),
                    None => nav.press(None),
                }
            }
        }
    }
}

/// Runs the interactive client starting at `start`.
///
/// # Errors
///
/// Returns an error if a prompt fails.
pub async fn run(ctx: &Context, start: Route) -> CliResult {
    println!("{}", console::style(APP_TITLE).bold());
    log::info!("Using API at {}", ctx.api.base_url());

    let mut nav = Navigation::new(start);
    loop {
        screens::show(nav.route(), ctx).await?;
        println!();

        let Some(route) = choose_route(&mut nav)? else {
            return Ok(());
        };
        if !nav.navigate(route) {
            // Same page again; nothing else closes the dropdown.
            nav.press(None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::DropdownEvent;

    #[test]
    fn labels_mark_current_route_and_open_dropdown() {
        let mut nav = Navigation::new(Route::Sources);
        assert_eq!(entry_label(&nav, 0, &MENU[0]), "Tornado Map");
        assert_eq!(entry_label(&nav, 3, &MENU[3]), "Information ▾ *");

        nav.pointer(1, DropdownEvent::Click);
        assert_eq!(entry_label(&nav, 1, &MENU[1]), "Organize ▴");

        nav.navigate(Route::TornadoMap);
        assert_eq!(entry_label(&nav, 0, &MENU[0]), "Tornado Map *");
        assert_eq!(entry_label(&nav, 1, &MENU[1]), "Organize ▾");
    }
}
