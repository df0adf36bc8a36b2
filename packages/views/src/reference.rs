//! Static St. Louis neighborhood reference table.

use std::cmp::Ordering;

use radon_canvas_content::ReferenceNeighborhood;
use strum_macros::{AsRefStr, Display, EnumString};

/// Google Maps search URL for a coordinate.
#[must_use]
pub fn map_search_url(latitude: f64, longitude: f64) -> String {
    format!("https://www.google.com/maps?q={latitude},{longitude}")
}

/// Sort order of the table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum ReferenceSort {
    #[default]
    Name,
    /// By ward, then name.
    Ward,
    /// By ZIP code, then name.
    Zip,
}

impl ReferenceSort {
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Name, Self::Ward, Self::Zip]
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Neighborhood Name",
            Self::Ward => "Ward Number",
            Self::Zip => "Zip Code",
        }
    }
}

/// Which column the exact-match filter applies to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum FilterCategory {
    #[default]
    All,
    Ward,
    Zip,
}

impl FilterCategory {
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::All, Self::Ward, Self::Zip]
    }
}

fn by_name(a: &ReferenceNeighborhood, b: &ReferenceNeighborhood) -> Ordering {
    a.name
        .to_lowercase()
        .cmp(&b.name.to_lowercase())
        .then_with(|| a.name.cmp(&b.name))
}

/// State of the reference route.
#[derive(Debug, Clone)]
pub struct ReferenceView {
    rows: Vec<ReferenceNeighborhood>,
    /// Matches name (ignoring case), ward, or ZIP.
    pub search: String,
    category: FilterCategory,
    filter_value: String,
    pub sort_by: ReferenceSort,
}

impl Default for ReferenceView {
    fn default() -> Self {
        Self::new(radon_canvas_content::reference_neighborhoods())
    }
}

impl ReferenceView {
    #[must_use]
    pub fn new(rows: Vec<ReferenceNeighborhood>) -> Self {
        Self {
            rows,
            search: String::new(),
            category: FilterCategory::All,
            filter_value: String::new(),
            sort_by: ReferenceSort::Name,
        }
    }

    #[must_use]
    pub const fn category(&self) -> FilterCategory {
        self.category
    }

    #[must_use]
    pub fn filter_value(&self) -> &str {
        &self.filter_value
    }

    /// Switches the filter column and clears the filter value.
    pub fn set_category(&mut self, category: FilterCategory) {
        self.category = category;
        self.filter_value.clear();
    }

    /// Sets the exact value the filter column must equal. Empty matches
    /// everything.
    pub fn set_filter_value(&mut self, value: impl Into<String>) {
        self.filter_value = value.into();
    }

    /// Distinct wards, ascending.
    #[must_use]
    pub fn wards(&self) -> Vec<u32> {
        let mut wards: Vec<u32> = self.rows.iter().map(|r| r.ward).collect();
        wards.sort_unstable();
        wards.dedup();
        wards
    }

    /// Distinct ZIP codes, ascending.
    #[must_use]
    pub fn zip_codes(&self) -> Vec<u32> {
        let mut zips: Vec<u32> = self.rows.iter().map(|r| r.zip_code).collect();
        zips.sort_unstable();
        zips.dedup();
        zips
    }

    /// Total rows before filtering.
    #[must_use]
    pub fn total(&self) -> usize {
        self.rows.len()
    }

    fn matches_search(&self, row: &ReferenceNeighborhood) -> bool {
        row.name.to_lowercase().contains(&self.search.to_lowercase())
            || row.ward.to_string().contains(&self.search)
            || row.zip_code.to_string().contains(&self.search)
    }

    fn matches_filter(&self, row: &ReferenceNeighborhood) -> bool {
        if self.filter_value.is_empty() {
            return true;
        }
        match self.category {
            FilterCategory::All => true,
            FilterCategory::Ward => row.ward.to_string() == self.filter_value,
            FilterCategory::Zip => row.zip_code.to_string() == self.filter_value,
        }
    }

    /// Rows passing search and filter, in the selected order.
    #[must_use]
    pub fn visible(&self) -> Vec<&ReferenceNeighborhood> {
        let mut rows: Vec<&ReferenceNeighborhood> = self
            .rows
            .iter()
            .filter(|r| self.matches_search(r) && self.matches_filter(r))
            .collect();

        match self.sort_by {
            ReferenceSort::Name => rows.sort_by(|a, b| by_name(a, b)),
            ReferenceSort::Ward => {
                rows.sort_by(|a, b| a.ward.cmp(&b.ward).then_with(|| by_name(a, b)));
            }
            ReferenceSort::Zip => {
                rows.sort_by(|a, b| a.zip_code.cmp(&b.zip_code).then_with(|| by_name(a, b)));
            }
        }
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, ward: u32, zip_code: u32) -> ReferenceNeighborhood {
        ReferenceNeighborhood {
            name: name.to_string(),
            latitude: 38.6,
            longitude: -90.2,
            ward,
            zip_code,
        }
    }

    fn sample() -> ReferenceView {
        ReferenceView::new(vec![
            row("Soulard", 7, 63104),
            row("Baden", 2, 63147),
            row("Fox Park", 7, 63104),
            row("Downtown", 7, 63101),
            row("Shaw", 8, 63110),
        ])
    }

    fn names(view: &ReferenceView) -> Vec<&str> {
        view.visible().into_iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn sorts_by_name_by_default() {
        assert_eq!(
            names(&sample()),
            ["Baden", "Downtown", "Fox Park", "Shaw", "Soulard"]
        );
    }

    #[test]
    fn ward_and_zip_sorts_break_ties_by_name() {
        let mut view = sample();
        view.sort_by = ReferenceSort::Ward;
        assert_eq!(
            names(&view),
            ["Baden", "Downtown", "Fox Park", "Soulard", "Shaw"]
        );

        view.sort_by = ReferenceSort::Zip;
        assert_eq!(
            names(&view),
            ["Downtown", "Fox Park", "Soulard", "Shaw", "Baden"]
        );
    }

    #[test]
    fn search_matches_name_ward_or_zip() {
        let mut view = sample();
        view.search = "SOU".to_string();
        assert_eq!(names(&view), ["Soulard"]);

        view.search = "8".to_string();
        assert_eq!(names(&view), ["Shaw"]);

        view.search = "6310".to_string();
        assert_eq!(names(&view), ["Downtown", "Fox Park", "Shaw", "Soulard"]);
    }

    #[test]
    fn exact_filter_composes_with_search() {
        let mut view = sample();
        view.set_category(FilterCategory::Ward);
        assert_eq!(names(&view).len(), 5);

        view.set_filter_value("7");
        assert_eq!(names(&view), ["Downtown", "Fox Park", "Soulard"]);

        view.search = "park".to_string();
        assert_eq!(names(&view), ["Fox Park"]);

        view.search.clear();
        view.set_category(FilterCategory::Zip);
        assert_eq!(view.filter_value(), "");
        view.set_filter_value("63104");
        assert_eq!(names(&view), ["Fox Park", "Soulard"]);

        view.set_filter_value("6310");
        assert!(names(&view).is_empty());
    }

    #[test]
    fn distinct_sorted_choices() {
        let view = sample();
        assert_eq!(view.wards(), [2, 7, 8]);
        assert_eq!(view.zip_codes(), [63101, 63104, 63110, 63147]);
    }

    #[test]
    fn embedded_table_loads() {
        let view = ReferenceView::default();
        assert_eq!(view.total(), 62);
        assert!(view.wards().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn map_url() {
        assert_eq!(
            map_search_url(38.658, -90.231),
            "https://www.google.com/maps?q=38.658,-90.231"
        );
    }

    #[test]
    fn sort_parses_from_cli_values() {
        assert_eq!("ward".parse::<ReferenceSort>().unwrap(), ReferenceSort::Ward);
        assert_eq!(ReferenceSort::Zip.to_string(), "zip");
        assert!("population".parse::<ReferenceSort>().is_err());
    }
}
