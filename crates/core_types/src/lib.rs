pub type RequestId = u64;

/// The (address, label) pair a screen is initialized with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationTarget {
    pub address: String,
    pub label: String,
}

impl NavigationTarget {
    pub fn new(address: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            label: label.into(),
        }
    }
}

/// Which overlay the page area shows. `Loading` shows the progress indicator,
/// `Error` shows the tap-to-retry panel; the two are never visible together.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Error,
}

impl LoadState {
    pub fn is_loading(self) -> bool {
        self == LoadState::Loading
    }

    pub fn is_error(self) -> bool {
        self == LoadState::Error
    }
}

/// Coarse classification of a failed page load.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    HostLookup,
    Connect,
    Timeout,
    Tls,
    Io,
    TooManyRedirects,
    Unknown,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FooterButtonState {
    pub back_enabled: bool,
    pub forward_enabled: bool,
}

/// Entries of the footer menu chooser, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuItem {
    OpenExternally,
    CopyLink,
}

impl MenuItem {
    pub const ALL: [MenuItem; 2] = [MenuItem::OpenExternally, MenuItem::CopyLink];

    pub fn from_index(index: usize) -> Option<MenuItem> {
        Self::ALL.get(index).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuItem::OpenExternally => "Open in browser",
            MenuItem::CopyLink => "Copy link",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_indices_follow_display_order() {
        assert_eq!(MenuItem::from_index(0), Some(MenuItem::OpenExternally));
        assert_eq!(MenuItem::from_index(1), Some(MenuItem::CopyLink));
        assert_eq!(MenuItem::from_index(2), None);
    }

    #[test]
    fn load_state_starts_idle() {
        let state = LoadState::default();
        assert!(!state.is_loading());
        assert!(!state.is_error());
    }
}
