//! Route table and top navigation menu.
//!
//! The menu holds one top-level link and three dropdowns. Each dropdown
//! is a small state machine driven by pointer events; the shell feeds it
//! the terminal equivalents (selecting a dropdown is a click, leaving its
//! submenu without choosing is a click outside).

/// A screen of the client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Route {
    #[default]
    Neighborhoods,
    Addresses,
    HotNeighborhoods,
    TornadoMap,
    Solutions,
    Sources,
    Reference,
}

impl Route {
    pub const ALL: &[Self] = &[
        Self::Neighborhoods,
        Self::Addresses,
        Self::HotNeighborhoods,
        Self::TornadoMap,
        Self::Solutions,
        Self::Sources,
        Self::Reference,
    ];

    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Neighborhoods => "/",
            Self::Addresses => "/addresses",
            Self::HotNeighborhoods => "/hot-neighborhoods",
            Self::TornadoMap => "/tornado-map",
            Self::Solutions => "/solutions",
            Self::Sources => "/sources",
            Self::Reference => "/reference",
        }
    }

    /// Resolves a path, ignoring a trailing slash.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        Self::ALL.iter().copied().find(|r| r.path() == path)
    }

    /// Page heading.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Neighborhoods => "Neighborhoods",
            Self::Addresses => "Household Information",
            Self::HotNeighborhoods => "Target Neighborhoods",
            Self::TornadoMap => "May 16 Tornado Path & Radon Test Results",
            Self::Solutions => "Testing & Remediation Solutions",
            Self::Sources => "Resources & Sources",
            Self::Reference => "Neighborhood Reference",
        }
    }
}

/// A labelled link to a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuLink {
    pub label: &'static str,
    pub route: Route,
}

const fn link(label: &'static str, route: Route) -> MenuLink {
    MenuLink { label, route }
}

/// An entry in the top navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEntry {
    Link(MenuLink),
    Dropdown {
        label: &'static str,
        links: &'static [MenuLink],
    },
}

impl MenuEntry {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Link(link) => link.label,
            Self::Dropdown { label, .. } => *label,
        }
    }
}

pub const APP_TITLE: &str = "Radon Canvas App";

/// The navigation bar, left to right.
pub const MENU: &[MenuEntry] = &[
    MenuEntry::Link(link("Tornado Map", Route::TornadoMap)),
    MenuEntry::Dropdown {
        label: "Organize",
        links: &[
            link("Target Neighborhoods", Route::HotNeighborhoods),
            link("Household Information", Route::Addresses),
            link("Neighborhoods", Route::Neighborhoods),
        ],
    },
    MenuEntry::Dropdown {
        label: "Remediation",
        links: &[link("Solutions", Route::Solutions)],
    },
    MenuEntry::Dropdown {
        label: "Information",
        links: &[
            link("Sources", Route::Sources),
            link("Reference", Route::Reference),
        ],
    },
];

/// Input to a dropdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropdownEvent {
    PointerEnter,
    PointerLeave,
    /// Click on the dropdown's own button.
    Click,
    /// Pointer pressed anywhere that is not inside the dropdown.
    ClickOutside,
    RouteChanged,
}

/// Open/closed state of one dropdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dropdown {
    open: bool,
}

impl Dropdown {
    #[must_use]
    pub const fn is_open(self) -> bool {
        self.open
    }

    pub const fn handle(&mut self, event: DropdownEvent) {
        self.open = match event {
            DropdownEvent::PointerEnter => true,
            DropdownEvent::Click => !self.open,
            DropdownEvent::PointerLeave
            | DropdownEvent::ClickOutside
            | DropdownEvent::RouteChanged => false,
        };
    }
}

/// Current route plus the state of every dropdown in [`MENU`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    route: Route,
    dropdowns: Vec<Dropdown>,
}

impl Default for Navigation {
    fn default() -> Self {
        Self::new(Route::default())
    }
}

impl Navigation {
    #[must_use]
    pub fn new(route: Route) -> Self {
        Self {
            route,
            dropdowns: vec![Dropdown::default(); MENU.len()],
        }
    }

    #[must_use]
    pub const fn route(&self) -> Route {
        self.route
    }

    /// Whether the menu entry at `index` is an open dropdown.
    #[must_use]
    pub fn is_open(&self, index: usize) -> bool {
        self.dropdowns.get(index).is_some_and(|d| d.is_open())
    }

    /// Index of the open dropdown, if any.
    #[must_use]
    pub fn open_dropdown(&self) -> Option<usize> {
        self.dropdowns.iter().position(|d| d.is_open())
    }

    /// Delivers a pointer event to the entry at `index`. Plain links have
    /// no dropdown state and ignore it.
    pub fn pointer(&mut self, index: usize, event: DropdownEvent) {
        if matches!(MENU.get(index), Some(MenuEntry::Dropdown { .. }))
            && let Some(dropdown) = self.dropdowns.get_mut(index)
        {
            dropdown.handle(event);
        }
    }

    /// A pointer press on entry `target` (or on nothing). Every other
    /// dropdown sees it as an outside click.
    pub fn press(&mut self, target: Option<usize>) {
        for (i, dropdown) in self.dropdowns.iter_mut().enumerate() {
            if Some(i) != target {
                dropdown.handle(DropdownEvent::ClickOutside);
            }
        }
        if let Some(index) = target {
            self.pointer(index, DropdownEvent::Click);
        }
    }

    /// Switches route. Returns `false` if already there. Any change
    /// closes every dropdown.
    pub fn navigate(&mut self, route: Route) -> bool {
        if route == self.route {
            return false;
        }
        log::debug!("Navigating {} -> {}", self.route.path(), route.path());
        self.route = route;
        for dropdown in &mut self.dropdowns {
            dropdown.handle(DropdownEvent::RouteChanged);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORGANIZE: usize = 1;
    const INFORMATION: usize = 3;

    #[test]
    fn every_route_is_reachable_from_the_menu() {
        let mut linked: Vec<Route> = MENU
            .iter()
            .flat_map(|entry| match entry {
                MenuEntry::Link(link) => std::slice::from_ref(link),
                MenuEntry::Dropdown { links, .. } => *links,
            })
            .map(|l| l.route)
            .collect();
        linked.sort_by_key(|r| r.path());
        let mut all = Route::ALL.to_vec();
        all.sort_by_key(|r| r.path());
        assert_eq!(linked, all);
    }

    #[test]
    fn paths_round_trip() {
        for route in Route::ALL {
            assert_eq!(Route::from_path(route.path()), Some(*route));
        }
        assert_eq!(Route::from_path("/addresses/"), Some(Route::Addresses));
        assert_eq!(Route::from_path(""), Some(Route::Neighborhoods));
        assert_eq!(Route::from_path("/health-provider"), None);
    }

    #[test]
    fn menu_layout() {
        let labels: Vec<&str> = MENU.iter().map(MenuEntry::label).collect();
        assert_eq!(labels, ["Tornado Map", "Organize", "Remediation", "Information"]);
        let MenuEntry::Dropdown { links, .. } = MENU[ORGANIZE] else {
            panic!("Organize is a dropdown");
        };
        assert_eq!(
            links,
            [
                link("Target Neighborhoods", Route::HotNeighborhoods),
                link("Household Information", Route::Addresses),
                link("Neighborhoods", Route::Neighborhoods),
            ]
        );
    }

    #[test]
    fn hover_opens_and_leave_closes() {
        let mut dropdown = Dropdown::default();
        dropdown.handle(DropdownEvent::PointerEnter);
        assert!(dropdown.is_open());
        dropdown.handle(DropdownEvent::PointerEnter);
        assert!(dropdown.is_open());
        dropdown.handle(DropdownEvent::PointerLeave);
        assert!(!dropdown.is_open());
    }

    #[test]
    fn click_toggles() {
        let mut dropdown = Dropdown::default();
        dropdown.handle(DropdownEvent::Click);
        assert!(dropdown.is_open());
        dropdown.handle(DropdownEvent::Click);
        assert!(!dropdown.is_open());
    }

    #[test]
    fn outside_click_closes_only_other_dropdowns() {
        let mut nav = Navigation::default();
        nav.press(Some(ORGANIZE));
        assert_eq!(nav.open_dropdown(), Some(ORGANIZE));

        nav.press(Some(INFORMATION));
        assert!(!nav.is_open(ORGANIZE));
        assert!(nav.is_open(INFORMATION));

        nav.press(None);
        assert_eq!(nav.open_dropdown(), None);
    }

    #[test]
    fn route_change_closes_dropdowns() {
        let mut nav = Navigation::default();
        nav.pointer(INFORMATION, DropdownEvent::PointerEnter);
        assert!(nav.is_open(INFORMATION));

        assert!(nav.navigate(Route::Reference));
        assert_eq!(nav.route(), Route::Reference);
        assert_eq!(nav.open_dropdown(), None);
    }

    #[test]
    fn same_route_keeps_dropdown_state() {
        let mut nav = Navigation::new(Route::Sources);
        nav.press(Some(INFORMATION));
        assert!(!nav.navigate(Route::Sources));
        assert!(nav.is_open(INFORMATION));
    }

    #[test]
    fn links_have_no_dropdown_state() {
        let mut nav = Navigation::default();
        nav.press(Some(0));
        assert_eq!(nav.open_dropdown(), None);
    }
}
