//! Read-only informational routes: solutions and sources.

use radon_canvas_content::{Solution, Solutions, SourceCategory};

/// Testing and remediation options.
#[derive(Debug, Clone)]
pub struct SolutionsView {
    solutions: Solutions,
}

impl Default for SolutionsView {
    fn default() -> Self {
        Self {
            solutions: radon_canvas_content::solutions(),
        }
    }
}

impl SolutionsView {
    #[must_use]
    pub fn testing(&self) -> &[Solution] {
        &self.solutions.testing
    }

    #[must_use]
    pub fn remediation(&self) -> &[Solution] {
        &self.solutions.remediation
    }

    /// Both sections with their headings, testing first.
    #[must_use]
    pub fn sections(&self) -> [(&'static str, &[Solution]); 2] {
        [
            ("Testing Solutions", self.testing()),
            ("Remediation Solutions", self.remediation()),
        ]
    }
}

/// External resource links grouped by category.
#[derive(Debug, Clone)]
pub struct SourcesView {
    categories: Vec<SourceCategory>,
}

impl Default for SourcesView {
    fn default() -> Self {
        Self {
            categories: radon_canvas_content::sources_by_category(),
        }
    }
}

impl SourcesView {
    #[must_use]
    pub fn categories(&self) -> &[SourceCategory] {
        &self.categories
    }
}
