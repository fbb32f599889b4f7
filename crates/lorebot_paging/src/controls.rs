//! Navigation control identities and their enabled state.

use crate::PageView;
use derive_getters::Getters;

/// The two controls attached to a paged reply.
///
/// The string form is the control's custom id.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum NavigationAction {
    /// Go back one page.
    Previous,
    /// Advance one page.
    Next,
}

impl NavigationAction {
    /// Button label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Previous => "Previous",
            Self::Next => "Next",
        }
    }
}

/// Which controls may be clicked for the page being shown.
///
/// A control is disabled whenever the matching flag on the page is false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters)]
pub struct NavigationControls {
    previous_enabled: bool,
    next_enabled: bool,
}

impl NavigationControls {
    /// Controls for `view`.
    pub fn for_view(view: &PageView) -> Self {
        Self {
            previous_enabled: *view.has_previous(),
            next_enabled: *view.has_next(),
        }
    }

    /// Whether `action` may be clicked.
    pub fn is_enabled(&self, action: NavigationAction) -> bool {
        match action {
            NavigationAction::Previous => self.previous_enabled,
            NavigationAction::Next => self.next_enabled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_custom_ids() {
        assert_eq!(NavigationAction::Next.as_ref(), "next");
        assert_eq!(
            NavigationAction::from_str("previous").unwrap(),
            NavigationAction::Previous
        );
        assert!(NavigationAction::from_str("first").is_err());
    }

    #[test]
    fn test_controls_follow_view_flags() {
        let controls = NavigationControls::for_view(&PageView::new("", "Page 1", true, false));
        assert!(controls.is_enabled(NavigationAction::Next));
        assert!(!controls.is_enabled(NavigationAction::Previous));
    }

    #[test]
    fn test_single_page_disables_both_controls() {
        let controls = NavigationControls::for_view(&PageView::new("", "Page 1", false, false));
        assert!(!controls.is_enabled(NavigationAction::Previous));
        assert!(!controls.is_enabled(NavigationAction::Next));
    }
}
