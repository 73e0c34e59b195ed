//! Page-level orchestration for one embedded browser surface.
//!
//! Invariants:
//! - `load_state` is the only loading/error flag. The progress indicator is
//!   visible iff it is `Loading`, the error panel iff it is `Error`, so the two
//!   overlays can never show at once.
//! - Back/forward availability is always read from the surface. `FooterStrip`
//!   only mirrors what the footer currently displays and is refreshed on every
//!   lifecycle event.
//! - The controller exclusively owns its surface and host services. Teardown
//!   (`detach`, or drop) releases both exactly once.

use app_api::{BrowserSurface, ErrorInfo, HostServices, RequestInfo};
use core_types::{FooterButtonState, LoadState, NavigationTarget};
use log::{debug, trace};

mod events;
mod footer;
mod nav;
#[cfg(test)]
mod testing;
mod ui;

pub use footer::{FooterAction, FooterButton, FooterStrip};
pub use nav::is_web_address;

pub struct PageController<S: BrowserSurface, H: HostServices> {
    target: NavigationTarget,
    surface: S,
    host: H,

    load_state: LoadState,
    footer: FooterStrip,

    attached: bool,
    back_handler_registered: bool,
    released: bool,
}

impl<S: BrowserSurface, H: HostServices> PageController<S, H> {
    pub fn new(target: NavigationTarget, surface: S, host: H) -> Self {
        Self {
            target,
            surface,
            host,
            load_state: LoadState::Idle,
            footer: FooterStrip::default(),
            attached: false,
            back_handler_registered: false,
            released: false,
        }
    }

    // -- Setup Methods ---

    /// Bind the footer, take over the back gesture and issue the initial
    /// navigation. Repeated calls are ignored.
    pub fn attach(&mut self) {
        if self.attached {
            return;
        }
        self.attached = true;

        self.footer = FooterStrip::bind();
        if !self.back_handler_registered {
            self.host.register_back_gesture_handler();
            self.back_handler_registered = true;
        }

        let address = self.target.address.clone();
        debug!("attach: label={} url={address}", self.target.label);
        if !self.on_navigation_requested(Some(&address)) {
            self.surface.load(&address);
        }
        self.update_footer();
    }

    /// Release the surface and give the back gesture back to the host.
    pub fn detach(&mut self) {
        if self.released {
            return;
        }
        self.released = true;

        if self.back_handler_registered {
            self.host.unregister_back_gesture_handler();
            self.back_handler_registered = false;
        }
        self.surface.release();
        debug!("detach: url={}", self.target.address);
    }

    // -- Accessors ---
    pub fn target(&self) -> &NavigationTarget {
        &self.target
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    pub fn is_loading(&self) -> bool {
        self.load_state.is_loading()
    }

    pub fn is_error(&self) -> bool {
        self.load_state.is_error()
    }

    pub fn is_progress_visible(&self) -> bool {
        self.is_loading()
    }

    /// The error panel is visible and tappable exactly while in `Error`.
    pub fn is_error_panel_visible(&self) -> bool {
        self.is_error()
    }

    /// Button availability, read fresh from the surface history.
    pub fn footer_state(&self) -> FooterButtonState {
        FooterButtonState {
            back_enabled: self.surface.can_step_back(),
            forward_enabled: self.surface.can_step_forward(),
        }
    }

    pub fn footer(&self) -> &FooterStrip {
        &self.footer
    }

    pub fn handles_back_gesture(&self) -> bool {
        self.back_handler_registered
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    // -- Lifecycle Events ---
    pub fn on_navigation_started(&mut self, address: &str) {
        debug!("navigation started: url={address}");
        self.load_state = LoadState::Loading;
        self.update_footer();
    }

    pub fn on_navigation_failed(&mut self, request: &RequestInfo, error: &ErrorInfo) {
        debug!(
            "navigation failed: url={:?} main_frame={} kind={:?} error={}",
            request.url, request.is_main_frame, error.kind, error.description
        );
        self.load_state = LoadState::Error;
        self.update_footer();
    }

    /// Hides the progress indicator; an error panel stays up.
    pub fn on_navigation_finished(&mut self, address: &str) {
        debug!("navigation finished: url={address}");
        if self.load_state.is_loading() {
            self.load_state = LoadState::Idle;
        }
        self.update_footer();
    }

    /// Retry from the error panel. Does nothing unless the panel is showing.
    pub fn tap_error_panel(&mut self) {
        if !self.is_error_panel_visible() {
            return;
        }
        debug!("error panel tapped: reloading");
        self.surface.reload();
    }

    fn update_footer(&mut self) {
        let state = self.footer_state();
        self.footer.apply(state);
        trace!("footer: {state:?}");
    }
}

impl<S: BrowserSurface, H: HostServices> Drop for PageController<S, H> {
    fn drop(&mut self) {
        self.detach();
    }
}
