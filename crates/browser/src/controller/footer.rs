use super::PageController;
use app_api::{BrowserSurface, ChoiceDialog, HostServices};
use core_types::{FooterButtonState, MenuItem};
use log::{debug, warn};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FooterButton {
    pub enabled: bool,
}

/// The footer controls as currently displayed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FooterStrip {
    pub back: FooterButton,
    pub forward: FooterButton,
    pub refresh: FooterButton,
    pub menu: FooterButton,
}

impl FooterStrip {
    /// Fresh strip as bound at attach time: refresh and menu are always
    /// enabled, back/forward wait for the first history update.
    pub fn bind() -> Self {
        Self {
            back: FooterButton { enabled: false },
            forward: FooterButton { enabled: false },
            refresh: FooterButton { enabled: true },
            menu: FooterButton { enabled: true },
        }
    }

    pub(super) fn apply(&mut self, state: FooterButtonState) {
        self.back.enabled = state.back_enabled;
        self.forward.enabled = state.forward_enabled;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FooterAction {
    Back,
    Forward,
    Refresh,
    Menu,
}

impl<S: BrowserSurface, H: HostServices> PageController<S, H> {
    pub fn on_footer_action(&mut self, action: FooterAction) {
        debug!("footer action: {action:?}");
        match action {
            FooterAction::Back => self.go_back(),
            FooterAction::Forward => {
                if self.surface.can_step_forward() {
                    self.surface.step_forward();
                }
            }
            FooterAction::Refresh => self.surface.reload(),
            FooterAction::Menu => self.show_menu(),
        }
    }

    fn show_menu(&mut self) {
        let dialog = ChoiceDialog::new(MenuItem::ALL.iter().map(|item| item.label()));
        self.host.show_choice_dialog(dialog);
    }

    /// Selection from the footer menu chooser. Unknown indices are ignored.
    pub fn on_menu_item_selected(&mut self, index: usize) {
        let Some(item) = MenuItem::from_index(index) else {
            debug!("menu index {index} has no action");
            return;
        };
        debug!("menu item selected: {}", item.label());

        let Some(address) = self.surface.current_address() else {
            debug!("menu item {item:?} ignored: nothing loaded");
            return;
        };
        match item {
            MenuItem::OpenExternally => {
                if let Err(err) = self.host.open_address_externally(address) {
                    warn!("open in browser failed: {err}");
                }
            }
            MenuItem::CopyLink => self.host.write_clipboard_text("", address),
        }
    }
}
