#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;

use app_api::{BrowserSurface, ChoiceDialog, HostServices, LaunchError};
use browser::PageController;
use core_types::NavigationTarget;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SurfaceCall {
    Load(String),
    Reload,
    StepBack,
    StepForward,
}

/// In-memory surface that records every call it receives.
#[derive(Default)]
pub struct FakeSurface {
    history: Vec<String>,
    index: usize,
    pub calls: Vec<SurfaceCall>,
    released: Rc<Cell<bool>>,
}

impl FakeSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Surface that already visited `entries`, positioned on the last one.
    pub fn with_history(entries: &[&str]) -> Self {
        let history: Vec<String> = entries.iter().map(|e| e.to_string()).collect();
        Self {
            index: history.len().saturating_sub(1),
            history,
            ..Self::default()
        }
    }

    pub fn release_flag(&self) -> Rc<Cell<bool>> {
        Rc::clone(&self.released)
    }

    pub fn count(&self, call: &SurfaceCall) -> usize {
        self.calls.iter().filter(|c| *c == call).count()
    }

    pub fn loads(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                SurfaceCall::Load(url) => Some(url.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl BrowserSurface for FakeSurface {
    fn load(&mut self, address: &str) {
        if !self.history.is_empty() {
            self.history.truncate(self.index + 1);
        }
        self.history.push(address.to_string());
        self.index = self.history.len() - 1;
        self.calls.push(SurfaceCall::Load(address.to_string()));
    }

    fn reload(&mut self) {
        self.calls.push(SurfaceCall::Reload);
    }

    fn step_back(&mut self) {
        if self.can_step_back() {
            self.index -= 1;
        }
        self.calls.push(SurfaceCall::StepBack);
    }

    fn step_forward(&mut self) {
        if self.can_step_forward() {
            self.index += 1;
        }
        self.calls.push(SurfaceCall::StepForward);
    }

    fn can_step_back(&self) -> bool {
        self.index > 0
    }

    fn can_step_forward(&self) -> bool {
        self.index + 1 < self.history.len()
    }

    fn current_address(&self) -> Option<&str> {
        self.history.get(self.index).map(String::as_str)
    }

    fn release(&mut self) {
        self.released.set(true);
    }
}

/// Host services that record requests instead of performing them.
#[derive(Default)]
pub struct FakeHost {
    pub opened: Vec<String>,
    pub clipboard: Vec<(String, String)>,
    pub dialogs: Vec<ChoiceDialog>,
    pub close_requests: usize,
    pub back_registrations: usize,
    pub back_unregistrations: usize,
    pub fail_launch: bool,
}

impl FakeHost {
    pub fn failing_launch() -> Self {
        Self {
            fail_launch: true,
            ..Self::default()
        }
    }
}

impl HostServices for FakeHost {
    fn open_address_externally(&mut self, address: &str) -> Result<(), LaunchError> {
        self.opened.push(address.to_string());
        if self.fail_launch {
            return Err(LaunchError::Unsupported);
        }
        Ok(())
    }

    fn write_clipboard_text(&mut self, label: &str, text: &str) {
        self.clipboard.push((label.to_string(), text.to_string()));
    }

    fn show_choice_dialog(&mut self, dialog: ChoiceDialog) {
        self.dialogs.push(dialog);
    }

    fn request_screen_close(&mut self) {
        self.close_requests += 1;
    }

    fn register_back_gesture_handler(&mut self) {
        self.back_registrations += 1;
    }

    fn unregister_back_gesture_handler(&mut self) {
        self.back_unregistrations += 1;
    }
}

pub type TestController = PageController<FakeSurface, FakeHost>;

pub fn controller_with(address: &str, surface: FakeSurface, host: FakeHost) -> TestController {
    let target = NavigationTarget::new(address, "title");
    let mut controller = PageController::new(target, surface, host);
    controller.attach();
    controller
}

pub fn attached(address: &str) -> TestController {
    controller_with(address, FakeSurface::new(), FakeHost::default())
}
