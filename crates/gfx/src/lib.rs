use egui::{
    ClippedPrimitive, Color32, Context as EguiContext, TexturesDelta, viewport::ViewportId,
};
use egui_wgpu::{
    Renderer as EguiWgpuRenderer, ScreenDescriptor,
    wgpu::{
        self, Color, CommandEncoderDescriptor, Device, DeviceDescriptor, Features, Instance,
        InstanceDescriptor, Limits, LoadOp, MemoryHints, Operations, PowerPreference, PresentMode,
        Queue, RenderPassColorAttachment, RenderPassDescriptor, RequestAdapterOptions, StoreOp,
        Surface, SurfaceConfiguration, SurfaceError, SurfaceTexture, TextureUsages, TextureView,
        TextureViewDescriptor, Trace,
    },
};
use egui_winit::State as EguiWinitState;
use log::{trace, warn};
use std::sync::Arc;
use thiserror::Error;
use winit::{dpi::PhysicalSize, event::WindowEvent, window::Window};

#[derive(Debug, Error)]
pub enum RendererError {
    #[error("failed to create window surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("no suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),
    #[error("failed to open GPU device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("window surface reports no texture formats")]
    NoSurfaceFormat,
}

/// egui on wgpu for a single winit window.
pub struct Renderer {
    egui_context: EguiContext,
    egui_state: EguiWinitState,
    egui_renderer: EguiWgpuRenderer,
    surface: Surface<'static>,
    device: Device,
    queue: Queue,
    surface_config: SurfaceConfiguration,
}

impl Renderer {
    pub fn new(window: Arc<Window>) -> Result<Self, RendererError> {
        let egui_context = EguiContext::default();

        let egui_state = EguiWinitState::new(
            egui_context.clone(),
            ViewportId::ROOT,
            &*window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );

        let instance = Instance::new(&InstanceDescriptor::default());
        let size = window.inner_size();
        let surface = instance.create_surface(window)?;

        let adapter = pollster::block_on(instance.request_adapter(&RequestAdapterOptions {
            power_preference: PowerPreference::LowPower,
            force_fallback_adapter: false,
            compatible_surface: Some(&surface),
        }))?;

        let (device, queue) = pollster::block_on(adapter.request_device(&DeviceDescriptor {
            label: Some("device"),
            required_features: Features::empty(),
            required_limits: Limits::default(),
            memory_hints: MemoryHints::Performance,
            trace: Trace::default(),
        }))?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or(RendererError::NoSurfaceFormat)?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .ok_or(RendererError::NoSurfaceFormat)?;

        let config = SurfaceConfiguration {
            usage: TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let egui_renderer = EguiWgpuRenderer::new(&device, format, None, 1, true);

        Ok(Self {
            egui_context,
            egui_state,
            egui_renderer,
            surface,
            device,
            queue,
            surface_config: config,
        })
    }

    /// Returns true when egui consumed the event.
    pub fn on_window_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        self.egui_state.on_window_event(window, event).consumed
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        self.surface_config.width = new_size.width.max(1);
        self.surface_config.height = new_size.height.max(1);
        self.surface.configure(&self.device, &self.surface_config);
    }

    /// Run one egui pass of the page screen and present it. Frames are
    /// skipped while the surface is unavailable (minimized, lost).
    pub fn render<F: FnOnce(&EguiContext)>(&mut self, window: &Window, build_ui: F) {
        let Some(surface_texture) = self.acquire_frame() else {
            return;
        };
        let target = surface_texture
            .texture
            .create_view(&TextureViewDescriptor::default());

        let frame = self.run_ui(window, build_ui);
        self.paint(&target, frame);
        surface_texture.present();
    }

    fn acquire_frame(&mut self) -> Option<SurfaceTexture> {
        match self.surface.get_current_texture() {
            Ok(texture) => Some(texture),
            Err(SurfaceError::Lost) => {
                self.surface.configure(&self.device, &self.surface_config);
                None
            }
            Err(SurfaceError::Outdated) => None,
            Err(err) => {
                warn!("skipping frame: {err:?}");
                None
            }
        }
    }

    fn run_ui<F: FnOnce(&EguiContext)>(&mut self, window: &Window, build_ui: F) -> UiFrame {
        let raw_input = self.egui_state.take_egui_input(window);
        self.egui_context.begin_pass(raw_input);
        build_ui(&self.egui_context);
        let output = self.egui_context.end_pass();
        self.egui_state
            .handle_platform_output(window, output.platform_output);

        let pixels_per_point = output.pixels_per_point;
        UiFrame {
            primitives: self.egui_context.tessellate(output.shapes, pixels_per_point),
            textures: output.textures_delta,
            pixels_per_point,
            // the page background shows through while a resize is pending
            background: self.egui_context.style().visuals.panel_fill,
        }
    }

    fn paint(&mut self, target: &TextureView, frame: UiFrame) {
        trace!("frame: {} clipped primitives", frame.primitives.len());
        for (id, delta) in &frame.textures.set {
            self.egui_renderer
                .update_texture(&self.device, &self.queue, *id, delta);
        }

        let screen = ScreenDescriptor {
            size_in_pixels: [self.surface_config.width, self.surface_config.height],
            pixels_per_point: frame.pixels_per_point,
        };
        let mut encoder = self
            .device
            .create_command_encoder(&CommandEncoderDescriptor {
                label: Some("page screen encoder"),
            });
        self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            &mut encoder,
            &frame.primitives,
            &screen,
        );

        {
            let [r, g, b, a] = frame.background.to_normalized_gamma_f32();
            let pass = encoder.begin_render_pass(&RenderPassDescriptor {
                label: Some("page screen pass"),
                color_attachments: &[Some(RenderPassColorAttachment {
                    view: target,
                    resolve_target: None,
                    ops: Operations {
                        load: LoadOp::Clear(Color {
                            r: r.into(),
                            g: g.into(),
                            b: b.into(),
                            a: a.into(),
                        }),
                        store: StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.egui_renderer
                .render(&mut pass.forget_lifetime(), &frame.primitives, &screen);
        }

        for id in &frame.textures.free {
            self.egui_renderer.free_texture(id);
        }
        self.queue.submit(Some(encoder.finish()));
    }
}

/// Everything one egui pass hands to the GPU side.
struct UiFrame {
    primitives: Vec<ClippedPrimitive>,
    textures: TexturesDelta,
    pixels_per_point: f32,
    background: Color32,
}
