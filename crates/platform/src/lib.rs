use std::sync::Arc;
use std::{thread, time::Duration};

use app_api::UiApp;
use bus::{Bus, CoreEvent};
use gfx::Renderer;
use log::{debug, error, info};
use net::FetchOptions;
use runtime_net::start_net_runtime;
use thiserror::Error;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{ElementState, KeyEvent, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop, EventLoopProxy},
    keyboard::{Key, NamedKey},
    window::{Window, WindowId},
};

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("event loop failed: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
}

#[derive(Clone, Debug)]
pub struct PlatformOptions {
    pub width: u32,
    pub height: u32,
    pub fetch: FetchOptions,
}

enum UserEvent {
    Tick,
    Core(CoreEvent),
}

/// Run `app` in a window until it asks to close or the window is closed.
/// The app is dropped before this returns on every exit path.
pub fn run(mut app: Box<dyn UiApp>, options: PlatformOptions) -> Result<(), PlatformError> {
    let event_loop = EventLoop::<UserEvent>::with_user_event().build()?;
    let proxy = event_loop.create_proxy();

    let Bus {
        cmd_tx,
        cmd_rx,
        evt_tx,
        evt_rx,
    } = Bus::new();
    start_net_runtime(cmd_rx, evt_tx, options.fetch.clone());

    // loader events -> UI thread
    let forward = proxy.clone();
    thread::spawn(move || {
        while let Ok(evt) = evt_rx.recv() {
            if forward.send_event(UserEvent::Core(evt)).is_err() {
                break;
            }
        }
    });

    app.set_bus_sender(cmd_tx);

    let mut platform = PlatformApp {
        app: Some(app),
        window: None,
        renderer: None,
        proxy: Some(proxy),
        ticker_started: false,
        options,
    };
    event_loop.run_app(&mut platform)?;
    Ok(())
}

struct PlatformApp {
    app: Option<Box<dyn UiApp>>,
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    proxy: Option<EventLoopProxy<UserEvent>>,
    ticker_started: bool,
    options: PlatformOptions,
}

impl PlatformApp {
    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if self.app.take().is_some() {
            info!("screen closed");
        }
        self.renderer = None;
        event_loop.exit();
    }

    fn close_if_requested(&mut self, event_loop: &ActiveEventLoop) {
        if self.app.as_ref().is_some_and(|app| app.close_requested()) {
            self.shutdown(event_loop);
        }
    }

    fn back_gesture(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(app) = self.app.as_mut() {
            app.on_back_gesture();
        }
        self.close_if_requested(event_loop);
        if let Some(window) = self.window.as_ref() {
            window.request_redraw();
        }
    }

    fn start_ticker(&mut self) {
        if self.ticker_started {
            return;
        }
        self.ticker_started = true;

        if let Some(proxy) = self.proxy.clone() {
            thread::spawn(move || {
                let frame = Duration::from_millis(16); // ~60Hz
                loop {
                    if proxy.send_event(UserEvent::Tick).is_err() {
                        break;
                    }
                    thread::sleep(frame);
                }
            });
        }
    }
}

fn is_back_key(event: &KeyEvent) -> bool {
    event.state == ElementState::Pressed
        && !event.repeat
        && matches!(
            event.logical_key,
            Key::Named(NamedKey::Escape) | Key::Named(NamedKey::BrowserBack)
        )
}

impl ApplicationHandler<UserEvent> for PlatformApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let title = self
                .app
                .as_ref()
                .map(|app| app.title())
                .unwrap_or_default();
            let attributes = Window::default_attributes()
                .with_title(title)
                .with_inner_size(LogicalSize::new(self.options.width, self.options.height));
            match event_loop.create_window(attributes) {
                Ok(window) => self.window = Some(Arc::new(window)),
                Err(err) => {
                    error!("failed to create window: {err}");
                    self.shutdown(event_loop);
                    return;
                }
            }
        }

        if self.renderer.is_none() {
            if let Some(window) = self.window.clone() {
                match Renderer::new(window) {
                    Ok(renderer) => self.renderer = Some(renderer),
                    Err(err) => {
                        error!("failed to initialise renderer: {err}");
                        self.shutdown(event_loop);
                        return;
                    }
                }
            }
        }

        self.start_ticker();
    }

    fn user_event(&mut self, event_loop: &ActiveEventLoop, event: UserEvent) {
        match event {
            UserEvent::Tick => {}
            UserEvent::Core(evt) => {
                if let Some(app) = self.app.as_mut() {
                    app.on_core_event(evt);
                }
                self.close_if_requested(event_loop);
            }
        }
        if let Some(window) = self.window.as_ref() {
            window.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let (Some(window), Some(renderer)) = (self.window.as_ref(), self.renderer.as_mut()) {
            let _consumed = renderer.on_window_event(window, &event);
        }

        match event {
            WindowEvent::CloseRequested => {
                debug!("window close requested");
                self.shutdown(event_loop);
            }
            WindowEvent::Resized(new_size) => {
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.resize(new_size);
                }
            }
            WindowEvent::KeyboardInput { event, .. } if is_back_key(&event) => {
                self.back_gesture(event_loop);
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Back,
                ..
            } => {
                self.back_gesture(event_loop);
            }
            WindowEvent::RedrawRequested => {
                if let (Some(window), Some(renderer), Some(app)) = (
                    self.window.as_ref(),
                    self.renderer.as_mut(),
                    self.app.as_mut(),
                ) {
                    renderer.render(window, |ctx| app.ui(ctx));
                }
                self.close_if_requested(event_loop);
            }
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        // forced exits still release the screen
        self.app = None;
        self.renderer = None;
    }
}
