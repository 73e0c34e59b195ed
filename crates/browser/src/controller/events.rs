use super::PageController;
use crate::surface::HistorySurface;
use app_api::{ErrorInfo, ErrorKind, HostServices, NavigationRequest, RequestInfo};
use bus::CoreEvent;
use log::{debug, trace};

impl<H: HostServices> PageController<HistorySurface, H> {
    /// Feed a loader event into the state machine. Events from superseded
    /// fetches are dropped.
    pub fn on_core_event(&mut self, evt: CoreEvent) {
        if !self.surface.is_current(evt.request_id()) {
            trace!("dropping stale event: {evt:?}");
            return;
        }

        match evt {
            CoreEvent::NavigationStarted { url, .. } => {
                self.on_navigation_started(&url);
            }
            CoreEvent::NavigationFailed {
                url, kind, error, ..
            } => {
                let request = RequestInfo {
                    url: Some(url),
                    is_main_frame: true,
                };
                self.on_navigation_failed(&request, &ErrorInfo::new(kind, error));
            }
            CoreEvent::NavigationRedirected { url, location, .. } => {
                self.on_redirect(&url, &location);
            }
            CoreEvent::NavigationFinished {
                request_id,
                url,
                page,
            } => {
                if let Some(page) = page {
                    self.surface.on_page_loaded(request_id, page);
                }
                self.on_navigation_finished(&url);
            }
        }
    }

    /// A redirect is a navigation request of its own: it is either handed to
    /// the host, which ends this load, or followed inside the surface.
    fn on_redirect(&mut self, url: &str, location: &str) {
        if self.on_navigation_request(&NavigationRequest::redirect(location)) {
            debug!("redirect from {url} intercepted");
            self.on_navigation_finished(url);
            return;
        }
        if !self.surface.follow_redirect(location) {
            let request = RequestInfo {
                url: Some(url.to_string()),
                is_main_frame: true,
            };
            let error = ErrorInfo::new(ErrorKind::TooManyRedirects, "too many redirects");
            self.on_navigation_failed(&request, &error);
            self.on_navigation_finished(url);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::Screen;
    use app_api::BrowserSurface;
    use bus::CoreEvent;
    use core_types::RequestId;

    fn started(request_id: RequestId, url: &str) -> CoreEvent {
        CoreEvent::NavigationStarted {
            request_id,
            url: url.to_string(),
        }
    }

    fn redirected(request_id: RequestId, location: &str) -> CoreEvent {
        CoreEvent::NavigationRedirected {
            request_id,
            url: "https://example.com".to_string(),
            location: location.to_string(),
        }
    }

    #[test]
    fn redirect_to_deep_link_is_handed_to_host() {
        let mut screen = Screen::attached("https://example.com");
        let (id, url) = screen.fetches().remove(0);
        screen.controller.on_core_event(started(id, &url));

        screen
            .controller
            .on_core_event(redirected(id, "myapp://deep/link"));

        assert_eq!(screen.launched(), ["myapp://deep/link"]);
        assert!(screen.fetches().is_empty());
        assert!(!screen.controller.is_loading());
        assert!(!screen.controller.is_error());
        assert_eq!(
            screen.controller.surface().current_address(),
            Some("https://example.com")
        );
    }

    #[test]
    fn web_redirect_is_followed_in_place() {
        let mut screen = Screen::attached("https://example.com");
        let (id, url) = screen.fetches().remove(0);
        screen.controller.on_core_event(started(id, &url));

        screen
            .controller
            .on_core_event(redirected(id, "https://example.com/home"));

        assert!(screen.launched().is_empty());
        assert_eq!(
            screen.fetches(),
            [(id + 1, "https://example.com/home".to_string())]
        );
        assert_eq!(
            screen.controller.surface().current_address(),
            Some("https://example.com/home")
        );
        assert!(!screen.controller.surface().can_step_back());
        assert!(screen.controller.is_loading());

        // the superseded fetch no longer drives the screen
        screen.controller.on_core_event(CoreEvent::NavigationFinished {
            request_id: id,
            url,
            page: None,
        });
        assert!(screen.controller.is_loading());
    }

    #[test]
    fn endless_redirects_end_in_error() {
        let mut screen = Screen::attached("https://example.com");
        let mut id = screen.fetches()[0].0;
        for hop in 0..10 {
            screen
                .controller
                .on_core_event(redirected(id, &format!("https://example.com/{hop}")));
            id = screen.fetches()[0].0;
        }
        assert!(!screen.controller.is_error());

        screen
            .controller
            .on_core_event(redirected(id, "https://example.com/loop"));
        assert!(screen.controller.is_error());
        assert!(!screen.controller.is_loading());
        assert!(screen.fetches().is_empty());
    }
}
