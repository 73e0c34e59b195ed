use app_api::{ChoiceDialog, HostServices, LaunchError};
use log::debug;
use std::io;

type Launcher = Box<dyn FnMut(&str) -> io::Result<()>>;

/// Host services for the egui desktop shell. Requests are queued here and
/// picked up by the page view on its next frame.
pub struct EguiHost {
    launcher: Launcher,
    pending_clipboard: Option<String>,
    dialog: Option<ChoiceDialog>,
    close_requested: bool,
    back_handler_registered: bool,
}

impl EguiHost {
    /// Host that opens external addresses with the system handler.
    pub fn new() -> Self {
        Self::with_launcher(|address| open::that(address))
    }

    pub fn with_launcher(launcher: impl FnMut(&str) -> io::Result<()> + 'static) -> Self {
        Self {
            launcher: Box::new(launcher),
            pending_clipboard: None,
            dialog: None,
            close_requested: false,
            back_handler_registered: false,
        }
    }

    pub fn take_clipboard_text(&mut self) -> Option<String> {
        self.pending_clipboard.take()
    }

    pub fn dialog(&self) -> Option<&ChoiceDialog> {
        self.dialog.as_ref()
    }

    pub fn dismiss_dialog(&mut self) -> Option<ChoiceDialog> {
        self.dialog.take()
    }

    pub fn close_requested(&self) -> bool {
        self.close_requested
    }

    pub fn back_handler_registered(&self) -> bool {
        self.back_handler_registered
    }
}

impl Default for EguiHost {
    fn default() -> Self {
        Self::new()
    }
}

impl HostServices for EguiHost {
    fn open_address_externally(&mut self, address: &str) -> Result<(), LaunchError> {
        (self.launcher)(address).map_err(|source| LaunchError::NoHandler {
            address: address.to_string(),
            source,
        })
    }

    // The desktop clipboard has no notion of a label.
    fn write_clipboard_text(&mut self, _label: &str, text: &str) {
        self.pending_clipboard = Some(text.to_string());
    }

    fn show_choice_dialog(&mut self, dialog: ChoiceDialog) {
        self.dialog = Some(dialog);
    }

    fn request_screen_close(&mut self) {
        debug!("screen close requested");
        self.close_requested = true;
    }

    fn register_back_gesture_handler(&mut self) {
        self.back_handler_registered = true;
    }

    fn unregister_back_gesture_handler(&mut self) {
        self.back_handler_registered = false;
    }
}
