use thiserror::Error;

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("no handler could open `{address}`: {source}")]
    NoHandler {
        address: String,
        #[source]
        source: std::io::Error,
    },
    #[error("launching external handlers is not supported by this host")]
    Unsupported,
}

/// Modal list of choices. The host reports the picked index back to the
/// page controller; dismissing the dialog picks nothing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChoiceDialog {
    pub items: Vec<String>,
}

impl ChoiceDialog {
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            items: items.into_iter().map(Into::into).collect(),
        }
    }
}

/// Fire-and-forget requests to the hosting platform.
pub trait HostServices {
    /// Best effort; callers are free to ignore the error.
    fn open_address_externally(&mut self, address: &str) -> Result<(), LaunchError>;
    fn write_clipboard_text(&mut self, label: &str, text: &str);
    fn show_choice_dialog(&mut self, dialog: ChoiceDialog);
    fn request_screen_close(&mut self);

    /// Route the system back gesture to the page controller ahead of the
    /// host's default handling.
    fn register_back_gesture_handler(&mut self);
    fn unregister_back_gesture_handler(&mut self) {}
}
