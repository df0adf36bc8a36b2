//! Neighborhood reference screen: the static St. Louis table.

use dialoguer::{Input, Select};
use radon_canvas_content::ReferenceNeighborhood;
use radon_canvas_views::{FilterCategory, ReferenceSort, ReferenceView, map_search_url};

use super::{CliResult, truncate};

const NAME_WIDTH: usize = 34;

enum Action {
    Search,
    FilterBy,
    SortBy,
    OpenMap,
    Back,
}

impl Action {
    const ALL: &[Self] = &[
        Self::Search,
        Self::FilterBy,
        Self::SortBy,
        Self::OpenMap,
        Self::Back,
    ];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::Search => "Search",
            Self::FilterBy => "Filter by ward or ZIP code",
            Self::SortBy => "Change sort order",
            Self::OpenMap => "View a neighborhood on the map",
            Self::Back => "Back to menu",
        }
    }
}

const fn category_label(category: FilterCategory) -> &'static str {
    match category {
        FilterCategory::All => "All",
        FilterCategory::Ward => "Ward",
        FilterCategory::Zip => "Zip Code",
    }
}

fn row(neighborhood: &ReferenceNeighborhood) -> String {
    let ward = format!("Ward {}", neighborhood.ward);
    format!(
        "{:<nw$} {ward:<8} {:<6} {:.4}, {:.4}",
        truncate(&neighborhood.name, NAME_WIDTH),
        neighborhood.zip_code,
        neighborhood.latitude,
        neighborhood.longitude,
        nw = NAME_WIDTH,
    )
}

/// The table as shown under the heading.
#[must_use]
pub fn render(view: &ReferenceView) -> String {
    let visible = view.visible();
    let mut lines = vec![format!(
        "Showing {} of {} neighborhoods   Sort By: {}",
        visible.len(),
        view.total(),
        view.sort_by.label()
    )];
    if view.category() != FilterCategory::All && !view.filter_value().is_empty() {
        lines.push(format!(
            "{}: {}",
            category_label(view.category()),
            view.filter_value()
        ));
    }
    if !view.search.is_empty() {
        lines.push(format!("Search: \"{}\"", view.search));
    }
    lines.push(String::new());

    if visible.is_empty() {
        lines.push("No neighborhoods found matching your criteria.".to_string());
        return lines.join("\n");
    }
    lines.push(format!(
        "{:<nw$} {:<8} {:<6} COORDINATES",
        "NEIGHBORHOOD",
        "WARD",
        "ZIP",
        nw = NAME_WIDTH
    ));
    lines.push("-".repeat(76));
    lines.extend(visible.into_iter().map(row));
    lines.join("\n")
}

/// Opens the map search for `neighborhood` in the system browser, or
/// prints the link when no browser can be launched.
pub fn open_on_map(neighborhood: &ReferenceNeighborhood) {
    let url = map_search_url(neighborhood.latitude, neighborhood.longitude);
    match open::that(&url) {
        Ok(()) => log::info!("Opened {} on the map", neighborhood.name),
        Err(e) => {
            log::warn!("Could not launch a browser: {e}");
            println!("{}: {url}", neighborhood.name);
        }
    }
}

/// Runs the reference screen until the user goes back.
///
/// # Errors
///
/// Returns an error if a prompt fails.
pub fn run() -> CliResult {
    let mut view = ReferenceView::default();
    let labels: Vec<&str> = Action::ALL.iter().map(Action::label).collect();

    loop {
        println!("{}", render(&view));
        println!();

        let idx = Select::new()
            .with_prompt("Neighborhood Reference")
            .items(&labels)
            .default(0)
            .interact()?;

        match Action::ALL[idx] {
            Action::Search => {
                view.search = Input::new()
                    .with_prompt("Search by name, ward, or zip code")
                    .with_initial_text(view.search.clone())
                    .allow_empty(true)
                    .interact_text()?;
            }
            Action::FilterBy => pick_filter(&mut view)?,
            Action::SortBy => {
                let sorts = ReferenceSort::all();
                let names: Vec<&str> = sorts.iter().map(|s| s.label()).collect();
                let current = sorts.iter().position(|s| *s == view.sort_by).unwrap_or(0);
                let picked = Select::new()
                    .with_prompt("Sort By")
                    .items(&names)
                    .default(current)
                    .interact()?;
                view.sort_by = sorts[picked];
            }
            Action::OpenMap => {
                let visible = view.visible();
                if visible.is_empty() {
                    println!("No neighborhoods to choose from.");
                    continue;
                }
                let names: Vec<&str> = visible.iter().map(|n| n.name.as_str()).collect();
                let choice = Select::new()
                    .with_prompt("Which neighborhood?")
                    .items(&names)
                    .default(0)
                    .interact_opt()?;
                if let Some(i) = choice {
                    open_on_map(visible[i]);
                }
            }
            Action::Back => return Ok(()),
        }
    }
}

fn pick_filter(view: &mut ReferenceView) -> Result<(), dialoguer::Error> {
    let categories = FilterCategory::all();
    let names: Vec<&str> = categories.iter().map(|c| category_label(*c)).collect();
    let current = categories
        .iter()
        .position(|c| *c == view.category())
        .unwrap_or(0);
    let picked = Select::new()
        .with_prompt("Filter By")
        .items(&names)
        .default(current)
        .interact()?;
    view.set_category(categories[picked]);

    let values = match view.category() {
        FilterCategory::All => return Ok(()),
        FilterCategory::Ward => view.wards(),
        FilterCategory::Zip => view.zip_codes(),
    };
    let mut names = vec!["All".to_string()];
    names.extend(values.iter().map(ToString::to_string));
    let picked = Select::new()
        .with_prompt(category_label(view.category()))
        .items(&names)
        .default(0)
        .interact()?;
    if picked > 0 {
        view.set_filter_value(names.swap_remove(picked));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_of(name: &str, ward: u32, zip_code: u32) -> ReferenceNeighborhood {
        ReferenceNeighborhood {
            name: name.to_string(),
            latitude: 38.61234,
            longitude: -90.21456,
            ward,
            zip_code,
        }
    }

    fn sample() -> ReferenceView {
        ReferenceView::new(vec![
            row_of("Soulard", 7, 63104),
            row_of("Baden", 2, 63147),
            row_of("Fox Park", 7, 63104),
        ])
    }

    #[test]
    fn table_rows_show_ward_zip_and_coordinates() {
        let text = render(&sample());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "Showing 3 of 3 neighborhoods   Sort By: Neighborhood Name"
        );
        assert!(lines[4].starts_with("Baden "));
        assert!(lines[4].ends_with("Ward 2   63147  38.6123, -90.2146"));
        assert!(lines[6].starts_with("Soulard"));
    }

    #[test]
    fn filter_and_search_are_echoed() {
        let mut view = sample();
        view.set_category(FilterCategory::Zip);
        view.set_filter_value("63104");
        view.search = "fox".to_string();
        let text = render(&view);
        assert!(text.starts_with("Showing 1 of 3 neighborhoods"));
        assert!(text.contains("Zip Code: 63104"));
        assert!(text.contains("Search: \"fox\""));
    }

    #[test]
    fn no_match_message() {
        let mut view = sample();
        view.search = "Carondelet".to_string();
        assert!(render(&view).ends_with("No neighborhoods found matching your criteria."));
    }

    #[test]
    fn embedded_table_renders_every_row() {
        let view = ReferenceView::default();
        assert_eq!(render(&view).lines().count(), 3 + view.total() + 1);
    }
}
