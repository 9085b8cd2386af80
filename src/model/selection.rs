//! Active tab tracking

use super::category::Category;

/// The currently selected report category. Starts on the first tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionState {
    active: Category,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            active: Category::all()[0],
        }
    }
}

impl SelectionState {
    pub fn active(&self) -> Category {
        self.active
    }

    pub fn select(&mut self, category: Category) {
        self.active = category;
    }

    pub fn next(&mut self) {
        let tabs = Category::all();
        self.active = tabs[(self.active.index() + 1) % tabs.len()];
    }

    pub fn previous(&mut self) {
        let tabs = Category::all();
        let current = self.active.index();
        let prev = if current == 0 { tabs.len() - 1 } else { current - 1 };
        self.active = tabs[prev];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::route::route_target;

    #[test]
    fn test_defaults_to_first_category() {
        assert_eq!(SelectionState::default().active(), Category::CompanyExposedPorts);
    }

    #[test]
    fn test_next_and_previous_wrap() {
        let mut selection = SelectionState::default();
        selection.previous();
        assert_eq!(selection.active(), Category::EmailWeaknesses);
        selection.next();
        assert_eq!(selection.active(), Category::CompanyExposedPorts);
        selection.next();
        assert_eq!(selection.active(), Category::SubDomainExploitableServices);
    }

    #[test]
    fn test_selected_category_drives_route() {
        let mut selection = SelectionState::default();
        selection.select(Category::DomainNameVariations);
        assert_eq!(
            route_target(selection.active()).resolve(None),
            "/current-risk/domain-name-variations"
        );
    }
}
