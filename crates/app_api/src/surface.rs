use core_types::ErrorKind;

/// The embedded browser component. Its history is the only record of where
/// back/forward can go; callers query it instead of tracking their own.
pub trait BrowserSurface {
    fn load(&mut self, address: &str);
    fn reload(&mut self);
    fn step_back(&mut self);
    fn step_forward(&mut self);
    fn can_step_back(&self) -> bool;
    fn can_step_forward(&self) -> bool;
    fn current_address(&self) -> Option<&str>;

    /// Drop in-flight work and observers. Called once on screen teardown.
    fn release(&mut self) {}
}

/// Structured navigation request, as delivered by newer surfaces.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NavigationRequest {
    pub url: Option<String>,
    pub is_main_frame: bool,
    pub has_gesture: bool,
    pub is_redirect: bool,
}

impl NavigationRequest {
    pub fn main_frame(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            is_main_frame: true,
            has_gesture: false,
            is_redirect: false,
        }
    }

    /// A server redirect of the main frame to `url`.
    pub fn redirect(url: impl Into<String>) -> Self {
        Self {
            is_redirect: true,
            ..Self::main_frame(url)
        }
    }

    pub fn with_gesture(mut self) -> Self {
        self.has_gesture = true;
        self
    }
}

/// The request a failure belongs to.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestInfo {
    pub url: Option<String>,
    pub is_main_frame: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorInfo {
    pub kind: ErrorKind,
    pub description: String,
}

impl ErrorInfo {
    pub fn new(kind: ErrorKind, description: impl Into<String>) -> Self {
        Self {
            kind,
            description: description.into(),
        }
    }
}
