use super::PageController;
use app_api::{BrowserSurface, HostServices, NavigationRequest};
use log::{debug, warn};

impl<S: BrowserSurface, H: HostServices> PageController<S, H> {
    // -- Navigation Requests ---

    /// Legacy string-shaped request. Returns true when the surface must not
    /// load the address itself.
    pub fn on_navigation_requested(&mut self, address: Option<&str>) -> bool {
        let request = NavigationRequest {
            url: address.map(str::to_string),
            is_main_frame: true,
            ..NavigationRequest::default()
        };
        self.route_navigation(&request)
    }

    /// Structured request shape; same decision as the string form.
    pub fn on_navigation_request(&mut self, request: &NavigationRequest) -> bool {
        self.route_navigation(request)
    }

    fn route_navigation(&mut self, request: &NavigationRequest) -> bool {
        self.update_footer();

        let Some(address) = request.url.as_deref().filter(|a| !a.is_empty()) else {
            debug!("navigation request without address: not intercepted");
            return false;
        };
        debug!(
            "navigation request: url={address} redirect={} gesture={}",
            request.is_redirect, request.has_gesture
        );
        if is_web_address(address) {
            return false;
        }

        debug!("handing {address} to host");
        if let Err(err) = self.host.open_address_externally(address) {
            warn!("external open failed: {err}");
        }
        true
    }

    // -- Back Navigation ---

    /// Step back inside the surface, or finish the screen when there is no
    /// in-surface history left.
    pub fn go_back(&mut self) {
        if self.surface.can_step_back() {
            self.surface.step_back();
        } else {
            debug!("no back history: closing screen");
            self.host.request_screen_close();
        }
    }

    pub fn on_back_gesture(&mut self) {
        self.go_back();
    }
}

/// True for `http:` and `https:` addresses, compared case-insensitively.
pub fn is_web_address(address: &str) -> bool {
    scheme_of(address).is_some_and(|scheme| {
        scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https")
    })
}

fn scheme_of(address: &str) -> Option<&str> {
    let (scheme, _) = address.trim_start().split_once(':')?;
    let mut chars = scheme.chars();
    let first = chars.next()?;
    let valid = first.is_ascii_alphabetic()
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    valid.then_some(scheme)
}
