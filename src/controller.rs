use winit::{
    dpi::{PhysicalPosition, PhysicalSize},
    event::{
        ElementState, KeyboardInput, MouseButton, MouseScrollDelta, VirtualKeyCode, WindowEvent,
    },
    window::CursorGrabMode,
};

use crate::{
    config::EditorSettings,
    scene::{Scene, SelectedMut},
};

const FOV_STEP_DEGREES: f32 = 5.0;
const SENSITIVITY_STEP: f32 = 0.5;
const BLUR_STRENGTH_STEP: f32 = 0.005;
/// Focus distance change per wheel line.
const BLUR_DISTANCE_PER_LINE: f32 = 0.5;
/// Touchpads report pixels; this many make up one wheel line.
const PIXELS_PER_LINE: f64 = 100.0;

#[derive(Debug, Default, Clone, Copy)]
struct HeldKeys {
    forward: bool,
    backward: bool,
    left: bool,
    right: bool,
    up: bool,
    down: bool,
}

/// Turns window input into camera motion, picking and edits on a [`Scene`].
///
/// Holding the right mouse button rotates the view from cursor deltas,
/// W/A/S/D/Space/LShift fly the camera, and releasing the left button picks
/// the primitive under the cursor. The wheel moves the focus distance and the
/// number row tunes samples, bounces and depth of field strength.
#[derive(Debug)]
pub struct CameraController {
    pub settings: EditorSettings,
    held: HeldKeys,
    look_mode: bool,
    cursor: PhysicalPosition<f64>,
    viewport: PhysicalSize<u32>,
}

impl CameraController {
    pub fn new(settings: EditorSettings) -> Self {
        let viewport = PhysicalSize::new(settings.window_width, settings.window_height);
        Self {
            settings,
            held: HeldKeys::default(),
            look_mode: false,
            cursor: PhysicalPosition::new(0.0, 0.0),
            viewport,
        }
    }

    pub fn is_looking(&self) -> bool {
        self.look_mode
    }

    pub fn viewport(&self) -> PhysicalSize<u32> {
        self.viewport
    }

    /// How the window should hold the cursor right now.
    pub fn cursor_grab(&self) -> CursorGrabMode {
        if self.look_mode {
            CursorGrabMode::Confined
        } else {
            CursorGrabMode::None
        }
    }

    /// Returns `true` when the event was consumed.
    pub fn process_events(&mut self, scene: &mut Scene, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_moved(scene, *position);
                self.look_mode
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.mouse_input(scene, *button, *state)
            }
            WindowEvent::MouseWheel { delta, .. } => {
                self.mouse_wheel(*delta);
                true
            }
            WindowEvent::KeyboardInput {
                input:
                    KeyboardInput {
                        state,
                        virtual_keycode: Some(keycode),
                        ..
                    },
                ..
            } => self.keyboard_input(scene, *keycode, *state),
            WindowEvent::Resized(size) => {
                self.resize(scene, *size);
                false
            }
            _ => false,
        }
    }

    pub fn cursor_moved(&mut self, scene: &mut Scene, position: PhysicalPosition<f64>) {
        if self.look_mode {
            let dx = (position.x - self.cursor.x) as f32;
            let dy = (position.y - self.cursor.y) as f32;
            let scale = self.settings.sensitivity / self.settings.rotation_divisor;

            scene.camera.rotate_x(scale * dy);
            scene.camera.rotate_y(scale * dx);
        }
        self.cursor = position;
    }

    pub fn mouse_input(
        &mut self,
        scene: &mut Scene,
        button: MouseButton,
        state: ElementState,
    ) -> bool {
        match (button, state) {
            (MouseButton::Right, _) => {
                self.look_mode = state == ElementState::Pressed;
                tracing::trace!("look mode {}", self.look_mode);
                true
            }
            (MouseButton::Left, ElementState::Released) => {
                let hit = scene.select(
                    self.viewport.width,
                    self.viewport.height,
                    self.cursor.x,
                    self.cursor.y,
                );
                if !hit.has_hit {
                    tracing::debug!("selection cleared");
                }
                true
            }
            _ => false,
        }
    }

    pub fn mouse_wheel(&mut self, delta: MouseScrollDelta) {
        let lines = match delta {
            MouseScrollDelta::LineDelta(_, y) => y,
            MouseScrollDelta::PixelDelta(position) => (position.y / PIXELS_PER_LINE) as f32,
        };
        let render = &mut self.settings.render;
        render.set_blur_distance(render.blur_distance + BLUR_DISTANCE_PER_LINE * lines);
        tracing::trace!("blur distance {}", render.blur_distance);
    }

    pub fn keyboard_input(
        &mut self,
        scene: &mut Scene,
        keycode: VirtualKeyCode,
        state: ElementState,
    ) -> bool {
        let is_pressed = state == ElementState::Pressed;
        match keycode {
            VirtualKeyCode::W => self.held.forward = is_pressed,
            VirtualKeyCode::S => self.held.backward = is_pressed,
            VirtualKeyCode::A => self.held.left = is_pressed,
            VirtualKeyCode::D => self.held.right = is_pressed,
            VirtualKeyCode::Space => self.held.up = is_pressed,
            VirtualKeyCode::LShift => self.held.down = is_pressed,
            VirtualKeyCode::Q if is_pressed => {
                let fov = self.settings.fov_degrees - FOV_STEP_DEGREES;
                self.settings.set_fov_degrees(fov);
            }
            VirtualKeyCode::E if is_pressed => {
                let fov = self.settings.fov_degrees + FOV_STEP_DEGREES;
                self.settings.set_fov_degrees(fov);
            }
            VirtualKeyCode::LBracket if is_pressed => {
                let sensitivity = self.settings.sensitivity - SENSITIVITY_STEP;
                self.settings.set_sensitivity(sensitivity);
            }
            VirtualKeyCode::RBracket if is_pressed => {
                let sensitivity = self.settings.sensitivity + SENSITIVITY_STEP;
                self.settings.set_sensitivity(sensitivity);
            }
            VirtualKeyCode::Key1 if is_pressed => {
                let render = &mut self.settings.render;
                render.set_num_samples(render.num_samples.saturating_sub(1));
            }
            VirtualKeyCode::Key2 if is_pressed => {
                let render = &mut self.settings.render;
                render.set_num_samples(render.num_samples + 1);
            }
            VirtualKeyCode::Key3 if is_pressed => {
                let render = &mut self.settings.render;
                render.set_num_bounces(render.num_bounces.saturating_sub(1));
            }
            VirtualKeyCode::Key4 if is_pressed => {
                let render = &mut self.settings.render;
                render.set_num_bounces(render.num_bounces + 1);
            }
            VirtualKeyCode::Key5 if is_pressed => {
                let render = &mut self.settings.render;
                render.set_blur_strength(render.blur_strength - BLUR_STRENGTH_STEP);
            }
            VirtualKeyCode::Key6 if is_pressed => {
                let render = &mut self.settings.render;
                render.set_blur_strength(render.blur_strength + BLUR_STRENGTH_STEP);
            }
            VirtualKeyCode::N if is_pressed => match scene.add_default_for_selection() {
                Ok(Some(index)) => tracing::info!("added {:?} {}", scene.selected_type(), index),
                Ok(None) => tracing::debug!("nothing selected to duplicate"),
                Err(e) => tracing::warn!("{e}"),
            },
            VirtualKeyCode::V if is_pressed => match scene.selected_mut() {
                Some(SelectedMut::Sphere(sphere)) => sphere.is_visible = !sphere.is_visible,
                Some(SelectedMut::Plane(plane)) => plane.is_visible = !plane.is_visible,
                None => tracing::debug!("nothing selected to hide"),
            },
            _ => return false,
        }
        true
    }

    pub fn resize(&mut self, scene: &mut Scene, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.viewport = new_size;
        self.settings.window_width = new_size.width;
        self.settings.window_height = new_size.height;
        scene
            .camera
            .set_fov_aspect_ratio(self.settings.fov_radians(), self.settings.aspect_ratio());
    }

    /// Applies held movement keys and the current projection. Call once per frame.
    pub fn update(&self, scene: &mut Scene) {
        let step = self.settings.sensitivity * self.settings.move_step;
        let camera = &mut scene.camera;

        if self.held.forward {
            camera.move_forward(step);
        }
        if self.held.backward {
            camera.move_forward(-step);
        }
        if self.held.right {
            camera.move_right(step);
        }
        if self.held.left {
            camera.move_right(-step);
        }
        if self.held.up {
            camera.move_up(step);
        }
        if self.held.down {
            camera.move_up(-step);
        }

        camera.set_fov_aspect_ratio(self.settings.fov_radians(), self.settings.aspect_ratio());
    }
}
