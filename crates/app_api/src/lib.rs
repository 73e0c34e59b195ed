//! Seams between the page screen and whatever hosts it.
//!
//! - [`BrowserSurface`]: the embedded browser the page controller drives.
//! - [`HostServices`]: one-shot requests to the hosting platform (external
//!   launch, clipboard, dialogs, closing the screen, back gesture routing).
//! - [`UiApp`]: what the platform event loop talks to.

use std::sync::mpsc;

use bus::{CoreCommand, CoreEvent};
use egui::Context;

mod host;
mod surface;

pub use core_types::ErrorKind;
pub use host::{ChoiceDialog, HostServices, LaunchError};
pub use surface::{BrowserSurface, ErrorInfo, NavigationRequest, RequestInfo};

pub trait UiApp {
    fn ui(&mut self, ctx: &Context);
    fn set_bus_sender(&mut self, tx: mpsc::Sender<CoreCommand>);
    fn on_core_event(&mut self, evt: CoreEvent);

    /// System-level back (Escape, browser-back key, mouse back button).
    fn on_back_gesture(&mut self);

    /// True once the screen asked to be finished; the platform exits its loop.
    fn close_requested(&self) -> bool;

    fn title(&self) -> String;
}
