//! Solutions and sources pages.

use radon_canvas_content::{Solution, SourceLink};
use radon_canvas_views::{SolutionsView, SourcesView};

fn bullets(lines: &mut Vec<String>, heading: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    lines.push(format!("  {heading}:"));
    lines.extend(items.iter().map(|item| format!("    - {item}")));
}

fn solution(lines: &mut Vec<String>, solution: &Solution) {
    lines.push(solution.title.clone());
    lines.push(format!("  {}", solution.description));
    bullets(lines, "Details", &solution.details);
    bullets(lines, "Pros", &solution.pros);
    bullets(lines, "Cons", &solution.cons);
    lines.push(format!("  Cost: {}", solution.cost));
    if let Some(installation) = &solution.installation {
        lines.push(format!("  Installation: {installation}"));
    }
    lines.push(String::new());
}

/// Testing then remediation options.
#[must_use]
pub fn render_solutions(view: &SolutionsView) -> String {
    let mut lines = Vec::new();
    for (heading, solutions) in view.sections() {
        lines.push(heading.to_uppercase());
        lines.push(String::new());
        for s in solutions {
            solution(&mut lines, s);
        }
    }
    lines.join("\n")
}

fn source(lines: &mut Vec<String>, link: &SourceLink) {
    lines.push(format!("{} {}", link.icon, link.title));
    lines.push(format!("  {}", link.description));
    lines.push(format!("  {}", link.url));
}

/// Resource links grouped by category.
#[must_use]
pub fn render_sources(view: &SourcesView) -> String {
    let mut lines = Vec::new();
    for category in view.categories() {
        lines.push(category.name.to_uppercase());
        lines.push(String::new());
        for link in &category.sources {
            source(&mut lines, link);
            lines.push(String::new());
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solutions_page_lists_both_sections_in_order() {
        let text = render_solutions(&SolutionsView::default());
        let testing = text.find("TESTING SOLUTIONS").unwrap();
        let remediation = text.find("REMEDIATION SOLUTIONS").unwrap();
        assert!(testing < remediation);
        assert_eq!(text.matches("  Cost: ").count(), 12);
        assert_eq!(text.matches("  Installation: ").count(), 8);
    }

    #[test]
    fn sources_page_groups_by_category() {
        let view = SourcesView::default();
        let text = render_sources(&view);
        assert!(text.starts_with("DATA & MAPS\n"));
        assert_eq!(text.matches("  https://").count(), 9);
        for category in view.categories() {
            assert!(text.contains(&category.name.to_uppercase()));
        }
    }
}
