//! Application state: cells, camera, selection, radius and animation.
//!
//! Everything here is GPU-free. The frame builder produces a list of shape
//! draws that the renderer turns into mesh draws.

use glam::{DVec2, Mat4, Vec3};
use rand::{RngCore, SeedableRng};
use rand::rngs::StdRng;

use voronoi_engine::paint::Color;

use crate::camera::Camera;
use crate::cells::{random_color, random_position, CellRegistry};
use crate::config::ToolConfig;
use crate::event::{Button, Event};
use crate::growth::Growth;
use crate::picking::update_selection;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Mode {
    Idle,
    Dragging,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Shape {
    Disc,
    Cone,
}

/// One shape instance for the current frame.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ShapeDraw {
    pub shape: Shape,
    pub model: Mat4,
    pub color: Color,
}

pub struct AppState {
    config: ToolConfig,
    registry: CellRegistry,
    camera: Camera,
    mode: Mode,
    /// `None` until the first pointer event.
    mouse_world: Option<DVec2>,
    cone_radius: f32,
    growth: Growth,
    rng: StdRng,
    now_ms: f64,
    proj_view_dirty: bool,
}

impl AppState {
    pub fn new(config: ToolConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Starts with a single randomly colored cell at the origin.
    pub fn with_rng(config: ToolConfig, mut rng: StdRng) -> Self {
        let camera = Camera::new(
            config.ortho_scale,
            config.near,
            config.far,
            config.window_width,
            config.window_height,
        );

        let mut registry = CellRegistry::new();
        registry.add(glam::Vec2::ZERO, random_color(&mut rng));

        Self {
            cone_radius: config.cone_radius,
            growth: Growth::new(config.growth_duration),
            config,
            registry,
            camera,
            mode: Mode::Idle,
            mouse_world: None,
            rng,
            now_ms: 0.0,
            proj_view_dirty: true,
        }
    }

    pub fn registry(&self) -> &CellRegistry {
        &self.registry
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn cone_radius(&self) -> f32 {
        self.cone_radius
    }

    pub fn is_animating(&self) -> bool {
        self.growth.is_active()
    }

    /// Current frame-clock time in milliseconds, used by the growth animation.
    pub fn set_time(&mut self, now_ms: f64) {
        self.now_ms = now_ms;
    }

    /// Returns the projection-view matrix once after each camera change.
    pub fn take_proj_view(&mut self) -> Option<Mat4> {
        if !self.proj_view_dirty {
            return None;
        }
        self.proj_view_dirty = false;
        Some(self.camera.proj_view())
    }

    pub fn handle(&mut self, event: Event) {
        match event {
            Event::PointerDown { button: Button::Primary, x, y } => {
                if self.registry.selection().is_none() {
                    let world = self.camera.screen_to_world(x, y);
                    self.mouse_world = Some(world);
                    let color = random_color(&mut self.rng);
                    self.registry.add(world.as_vec2(), color);
                }
                self.mode = Mode::Dragging;
            }

            Event::PointerUp { button: Button::Primary, .. } => {
                self.mode = Mode::Idle;
            }

            Event::PointerDown { button: Button::Secondary, .. }
            | Event::PointerUp { button: Button::Secondary, .. } => {
                if let Some(index) = self.registry.selection() {
                    self.registry.remove_at(index);
                }
            }

            Event::PointerDown { .. } | Event::PointerUp { .. } => {}

            Event::PointerMove { x, y } => {
                let world = self.camera.screen_to_world(x, y);
                self.mouse_world = Some(world);
                if self.mode == Mode::Dragging {
                    if let Some(index) = self.registry.selection() {
                        self.registry.move_to(index, world.as_vec2());
                    }
                }
            }

            Event::Key(c) => self.handle_key(c),

            Event::Resize { width, height } => {
                self.camera.on_resize(width, height);
                self.proj_view_dirty = true;
            }
        }
    }

    fn handle_key(&mut self, c: char) {
        let c = c.to_ascii_lowercase();
        let keys = &self.config.keys;

        if c == keys.clear.to_ascii_lowercase() {
            self.registry.clear();
        } else if c == keys.randomize.to_ascii_lowercase() {
            let bounds = self.camera.bounds();
            let mut color_rng = StdRng::seed_from_u64(self.rng.next_u64());
            self.registry.randomize(
                self.config.random_count,
                || random_color(&mut color_rng),
                || random_position(&mut self.rng, &bounds),
            );
        } else if c == keys.grow.to_ascii_lowercase() {
            if self.config.enable_growth {
                self.growth.toggle(self.now_ms, self.cone_radius);
            }
        } else if c == keys.min_radius.to_ascii_lowercase() {
            self.growth.cancel();
            self.cone_radius = self.config.min_cone_radius;
        } else if c == keys.max_radius.to_ascii_lowercase() {
            self.growth.cancel();
            self.cone_radius = self.config.max_cone_radius;
        }
    }

    /// Advances animation, recomputes the selection and lists this frame's
    /// draws in painter's order.
    pub fn frame(&mut self) -> Vec<ShapeDraw> {
        if let Some(r) = self.growth.advance(self.now_ms, self.config.max_cone_radius) {
            self.cone_radius = r;
        }

        update_selection(
            &mut self.registry,
            self.mouse_world,
            self.config.hover_radius as f64,
            self.mode == Mode::Dragging,
            self.config.pin_selection_during_drag,
        );

        let selection = self.registry.selection();
        let hover = self.config.hover_radius;
        let base = self.config.base_radius;
        let cone = self.cone_radius;

        let mut draws = Vec::with_capacity(self.registry.len() * 2);
        for (i, cell) in self.registry.iter().enumerate() {
            let place = Mat4::from_translation(cell.position.extend(-1.0));

            let (disc_scale, disc_color) = if selection == Some(i) {
                (Vec3::new(hover, hover, 1.0), Color::WHITE)
            } else {
                (Vec3::splat(base), Color::BLACK)
            };
            draws.push(ShapeDraw {
                shape: Shape::Disc,
                model: place * Mat4::from_scale(disc_scale),
                color: disc_color,
            });

            draws.push(ShapeDraw {
                shape: Shape::Cone,
                model: place * Mat4::from_scale(Vec3::new(cone, cone, 1.0)),
                color: Color::opaque(cell.color.x, cell.color.y, cell.color.z),
            });
        }
        draws
    }
}
