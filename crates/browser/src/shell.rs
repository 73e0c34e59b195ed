use std::sync::mpsc;

use app_api::{HostServices, UiApp};
use bus::{CoreCommand, CoreEvent};
use core_types::NavigationTarget;
use egui::Context;
use log::debug;

use crate::controller::PageController;
use crate::host::EguiHost;
use crate::surface::HistorySurface;

pub type PageScreen = PageController<HistorySurface, EguiHost>;

/// Hosts exactly one page screen for a fixed navigation target.
pub struct ShellApp {
    target: NavigationTarget,
    screen: Option<PageScreen>,
    closed: bool,
}

impl ShellApp {
    pub fn new(target: NavigationTarget) -> Self {
        Self {
            target,
            screen: None,
            closed: false,
        }
    }

    /// Build a screen for `(address, label)` whose surface posts to `tx`.
    /// It still needs `attach` before it shows anything.
    pub fn build_screen(target: NavigationTarget, tx: mpsc::Sender<CoreCommand>) -> PageScreen {
        PageController::new(target, HistorySurface::with_bus_sender(tx), EguiHost::new())
    }

    pub fn screen(&self) -> Option<&PageScreen> {
        self.screen.as_ref()
    }
}

impl UiApp for ShellApp {
    fn ui(&mut self, ctx: &Context) {
        if let Some(screen) = self.screen.as_mut() {
            screen.ui(ctx);
        }
    }

    fn set_bus_sender(&mut self, tx: mpsc::Sender<CoreCommand>) {
        match self.screen.as_mut() {
            Some(screen) => screen.surface_mut().set_bus_sender(tx),
            None => {
                debug!("attaching page screen: {}", self.target.address);
                let mut screen = Self::build_screen(self.target.clone(), tx);
                screen.attach();
                self.screen = Some(screen);
            }
        }
    }

    fn on_core_event(&mut self, evt: CoreEvent) {
        if let Some(screen) = self.screen.as_mut() {
            screen.on_core_event(evt);
        }
    }

    fn on_back_gesture(&mut self) {
        match self.screen.as_mut() {
            Some(screen) if screen.host().back_handler_registered() => screen.on_back_gesture(),
            Some(screen) => screen.host_mut().request_screen_close(),
            None => self.closed = true,
        }
    }

    fn close_requested(&self) -> bool {
        self.closed
            || self
                .screen
                .as_ref()
                .is_some_and(|screen| screen.host().close_requested())
    }

    fn title(&self) -> String {
        self.target.label.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use app_api::BrowserSurface;
    use core_types::{ErrorKind, RequestId};

    fn started_app(address: &str) -> (ShellApp, mpsc::Receiver<CoreCommand>) {
        let (tx, rx) = mpsc::channel();
        let mut app = ShellApp::new(NavigationTarget::new(address, "title"));
        app.set_bus_sender(tx);
        (app, rx)
    }

    fn last_fetch(rx: &mpsc::Receiver<CoreCommand>) -> Option<(RequestId, String)> {
        rx.try_iter()
            .filter_map(|cmd| match cmd {
                CoreCommand::FetchPage { request_id, url } => Some((request_id, url)),
                CoreCommand::CancelRequest { .. } => None,
            })
            .last()
    }

    #[test]
    fn attaching_issues_initial_fetch() {
        let (app, rx) = started_app("https://example.com");
        assert_eq!(
            last_fetch(&rx).map(|(_, url)| url).as_deref(),
            Some("https://example.com")
        );
        let screen = app.screen().unwrap();
        assert!(screen.handles_back_gesture());
        assert_eq!(app.title(), "title");
    }

    #[test]
    fn loader_events_drive_the_screen() {
        let (mut app, rx) = started_app("https://example.com");
        let (request_id, url) = last_fetch(&rx).unwrap();

        app.on_core_event(CoreEvent::NavigationStarted {
            request_id,
            url: url.clone(),
        });
        assert!(app.screen().unwrap().is_loading());

        app.on_core_event(CoreEvent::NavigationFailed {
            request_id,
            url: url.clone(),
            kind: ErrorKind::HostLookup,
            error: "dns".into(),
        });
        app.on_core_event(CoreEvent::NavigationFinished {
            request_id,
            url,
            page: None,
        });
        let screen = app.screen().unwrap();
        assert!(screen.is_error());
        assert!(!screen.is_loading());
    }

    #[test]
    fn stale_events_are_ignored() {
        let (mut app, rx) = started_app("https://example.com");
        let (request_id, url) = last_fetch(&rx).unwrap();

        app.on_core_event(CoreEvent::NavigationStarted {
            request_id: request_id + 7,
            url,
        });
        assert!(!app.screen().unwrap().is_loading());
    }

    #[test]
    fn back_gesture_after_detach_still_closes() {
        let (mut app, _rx) = started_app("https://example.com");
        let screen = app.screen.as_mut().unwrap();
        screen.surface_mut().load("https://example.com/next");
        screen.detach();
        assert!(!screen.host().back_handler_registered());

        app.on_back_gesture();
        assert!(app.close_requested());
    }

    #[test]
    fn back_gesture_without_history_closes() {
        let (mut app, _rx) = started_app("https://example.com");
        assert!(!app.screen().unwrap().surface().can_step_back());

        app.on_back_gesture();
        assert!(app.close_requested());
    }
}
