use std::time::Instant;

use wgpu::SurfaceError;
use winit::{
    dpi::PhysicalSize,
    event::*,
    event_loop::{ControlFlow, EventLoop, EventLoopWindowTarget},
    window::{CursorGrabMode, Window, WindowBuilder},
};

use crate::{
    config::EditorSettings,
    error::{EditorError, EditorResult},
};

/// Frame timing shared with the active layer.
#[derive(Debug)]
pub struct AppState {
    previous_frame: Instant,
    frame_time: f32,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            previous_frame: Instant::now(),
            frame_time: 0.0,
        }
    }

    pub fn update(&mut self) {
        let now = Instant::now();
        self.frame_time = now.duration_since(self.previous_frame).as_secs_f32();
        self.previous_frame = now;
    }

    /// Seconds spent on the previous frame.
    pub fn frame_time(&self) -> f32 {
        self.frame_time
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Application<L: Layer + 'static> {
    layer: Option<L>,
    screen: Screen,
    state: AppState,
    settings: EditorSettings,
}

impl<L: Layer + 'static> Application<L> {
    pub fn new(screen: Screen, settings: EditorSettings) -> Self {
        Self {
            screen,
            layer: None,
            state: AppState::new(),
            settings,
        }
    }

    fn run(
        &mut self,
        event: Event<()>,
        _event_loop: &EventLoopWindowTarget<()>,
        control_flow: &mut ControlFlow,
    ) {
        control_flow.set_poll();

        if let Event::NewEvents(StartCause::Init) = event {
            tracing::info!("starting layer");
            match L::start(&mut self.screen, &self.state, &self.settings) {
                Ok(layer) => self.layer = Some(layer),
                Err(e) => {
                    tracing::error!("failed to start: {e}");
                    control_flow.set_exit_with_code(1);
                }
            }
            return;
        }

        let Some(layer) = self.layer.as_mut() else {
            return;
        };

        layer.process_event(&event, &mut self.screen);

        match event {
            Event::WindowEvent {
                window_id,
                ref event,
            } if self.screen.window().id() == window_id => match event {
                event if is_exit_request(event) => {
                    control_flow.set_exit_with_code(0);
                    if let Err(e) = layer.shutdown(&self.state, &mut self.screen) {
                        tracing::error!("shutdown failed: {e}");
                        control_flow.set_exit_with_code(1);
                    }
                }
                WindowEvent::Resized(physical_size) => {
                    self.screen.resize(*physical_size);
                    layer.resize(*physical_size, &self.state, &mut self.screen);
                }
                WindowEvent::ScaleFactorChanged { new_inner_size, .. } => {
                    self.screen.resize(**new_inner_size);
                    layer.resize(**new_inner_size, &self.state, &mut self.screen);
                }
                _ => {}
            },
            Event::MainEventsCleared => {
                self.state.update();
                self.screen.window().request_redraw();
            }
            Event::RedrawRequested(window_id) if self.screen.window().id() == window_id => {
                layer.update(&self.state, &mut self.screen);

                match layer.render(&self.state, &mut self.screen) {
                    Ok(_) => {}
                    Err(SurfaceError::Lost) => self.screen.resize_to_current(),
                    Err(SurfaceError::OutOfMemory) => control_flow.set_exit_with_code(137),
                    Err(e) => tracing::error!("{}", EditorError::from(e)),
                }
            }
            _ => {}
        }
    }

    pub async fn init(settings: EditorSettings) -> EditorResult<()> {
        let event_loop = EventLoop::new();
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor::default());
        let screen = Screen::new(&event_loop, &instance, &settings).await?;
        let mut application = Self::new(screen, settings);
        event_loop.run(move |event, event_loop, control_flow| {
            application.run(event, event_loop, control_flow);
        });
    }
}

pub struct Screen {
    pub surface: wgpu::Surface,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    window: Window,
}

impl Screen {
    pub async fn new(
        event_loop: &EventLoopWindowTarget<()>,
        instance: &wgpu::Instance,
        settings: &EditorSettings,
    ) -> EditorResult<Self> {
        let window = WindowBuilder::new()
            .with_title("Scene Editor")
            .with_inner_size(PhysicalSize::new(
                settings.window_width,
                settings.window_height,
            ))
            .build(event_loop)?;

        // SAFETY: the window is owned by the returned Screen, so it outlives the surface.
        let surface = unsafe { instance.create_surface(&window) }?;
        let (adapter, device, queue) = open_device(instance, &surface).await?;

        let capabilities = surface.get_capabilities(&adapter);
        let config = surface_config(
            &capabilities.formats,
            &capabilities.alpha_modes,
            window.inner_size(),
            settings.vsync,
        )
        .ok_or_else(|| EditorError::Gpu("surface not supported by adapter".to_owned()))?;
        tracing::info!(
            "presenting {:?} with {:?}",
            config.format,
            config.present_mode
        );
        surface.configure(&device, &config);

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn size(&self) -> PhysicalSize<u32> {
        PhysicalSize::new(self.config.width, self.config.height)
    }

    /// Resize the screen to new window size.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Resize the screen to current window inner size.
    pub fn resize_to_current(&mut self) {
        self.resize(self.window.inner_size());
    }

    /// Grabs and hides the cursor, or releases it for `CursorGrabMode::None`.
    /// Platforms without confinement fall back to locking the cursor.
    pub fn set_cursor_grab(&self, mode: CursorGrabMode) {
        let grabbed = self.window.set_cursor_grab(mode).or_else(|e| match mode {
            CursorGrabMode::Confined => self.window.set_cursor_grab(CursorGrabMode::Locked),
            _ => Err(e),
        });
        if let Err(e) = grabbed {
            tracing::warn!("cursor grab {mode:?} unavailable: {e}");
        }
        self.window.set_cursor_visible(mode == CursorGrabMode::None);
    }
}

async fn open_device(
    instance: &wgpu::Instance,
    surface: &wgpu::Surface,
) -> EditorResult<(wgpu::Adapter, wgpu::Device, wgpu::Queue)> {
    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(surface),
            force_fallback_adapter: false,
        })
        .await
        .ok_or_else(|| EditorError::Gpu("no compatible adapter".to_owned()))?;
    tracing::info!("using adapter {:?}", adapter.get_info());

    let (device, queue) = adapter
        .request_device(
            &wgpu::DeviceDescriptor {
                features: wgpu::Features::empty(),
                limits: wgpu::Limits::default(),
                label: Some("Scene Editor Device"),
            },
            None,
        )
        .await?;
    Ok((adapter, device, queue))
}

/// Surface setup for the editor: an sRGB format when one is offered (the
/// shader writes linear color), the first alpha mode, and automatic
/// fallback between vsync modes. `None` when the surface offers nothing.
pub fn surface_config(
    formats: &[wgpu::TextureFormat],
    alpha_modes: &[wgpu::CompositeAlphaMode],
    size: PhysicalSize<u32>,
    vsync: bool,
) -> Option<wgpu::SurfaceConfiguration> {
    let format = formats
        .iter()
        .copied()
        .find(|format| format.is_srgb())
        .or_else(|| formats.first().copied())?;
    let alpha_mode = *alpha_modes.first()?;
    let present_mode = if vsync {
        wgpu::PresentMode::AutoVsync
    } else {
        wgpu::PresentMode::AutoNoVsync
    };

    Some(wgpu::SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format,
        width: size.width.max(1),
        height: size.height.max(1),
        present_mode,
        alpha_mode,
        view_formats: vec![],
    })
}

/// Close button or Escape.
pub fn is_exit_request(event: &WindowEvent) -> bool {
    matches!(
        event,
        WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                input: KeyboardInput {
                    state: ElementState::Pressed,
                    virtual_keycode: Some(VirtualKeyCode::Escape),
                    ..
                },
                ..
            }
    )
}

pub trait Layer: Sized {
    fn start(screen: &mut Screen, app: &AppState, settings: &EditorSettings) -> EditorResult<Self>;
    fn process_event(&mut self, event: &Event<()>, screen: &mut Screen);
    fn resize(&mut self, new_size: PhysicalSize<u32>, app: &AppState, screen: &mut Screen);
    fn update(&mut self, app: &AppState, screen: &mut Screen);
    fn render(&mut self, app: &AppState, screen: &mut Screen) -> Result<(), SurfaceError>;
    fn shutdown(&mut self, app: &AppState, screen: &mut Screen) -> EditorResult<()>;
}

#[cfg(test)]
mod tests {
    use wgpu::{CompositeAlphaMode, PresentMode, TextureFormat};

    use super::*;

    #[test]
    fn surface_config_prefers_srgb() {
        let formats = [TextureFormat::Bgra8Unorm, TextureFormat::Bgra8UnormSrgb];
        let alpha_modes = [CompositeAlphaMode::Opaque, CompositeAlphaMode::PreMultiplied];

        let config =
            surface_config(&formats, &alpha_modes, PhysicalSize::new(1920, 1080), true).unwrap();

        assert_eq!(config.format, TextureFormat::Bgra8UnormSrgb);
        assert_eq!(config.alpha_mode, CompositeAlphaMode::Opaque);
        assert_eq!(config.present_mode, PresentMode::AutoVsync);
        assert_eq!((config.width, config.height), (1920, 1080));
    }

    #[test]
    fn surface_config_falls_back_to_first_format() {
        let formats = [TextureFormat::Rgba16Float, TextureFormat::Bgra8Unorm];
        let config = surface_config(
            &formats,
            &[CompositeAlphaMode::Auto],
            PhysicalSize::new(0, 0),
            false,
        )
        .unwrap();

        assert_eq!(config.format, TextureFormat::Rgba16Float);
        assert_eq!(config.present_mode, PresentMode::AutoNoVsync);
        // minimized windows still get a valid surface size
        assert_eq!((config.width, config.height), (1, 1));
    }

    #[test]
    fn unsupported_surface_has_no_config() {
        let size = PhysicalSize::new(800, 600);
        assert!(surface_config(&[], &[CompositeAlphaMode::Opaque], size, true).is_none());
        assert!(surface_config(&[TextureFormat::Bgra8Unorm], &[], size, true).is_none());
    }

    #[test]
    #[allow(deprecated)]
    fn escape_and_close_request_exit() {
        let key = |state, virtual_keycode| WindowEvent::KeyboardInput {
            device_id: unsafe { DeviceId::dummy() },
            input: KeyboardInput {
                scancode: 0,
                state,
                virtual_keycode: Some(virtual_keycode),
                modifiers: ModifiersState::empty(),
            },
            is_synthetic: false,
        };

        assert!(is_exit_request(&WindowEvent::CloseRequested));
        assert!(is_exit_request(&key(ElementState::Pressed, VirtualKeyCode::Escape)));
        assert!(!is_exit_request(&key(ElementState::Released, VirtualKeyCode::Escape)));
        assert!(!is_exit_request(&key(ElementState::Pressed, VirtualKeyCode::W)));
    }
}
