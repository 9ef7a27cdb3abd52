//! Orthographic camera that keeps circles round at any aspect ratio.

use glam::{DMat4, DVec2, DVec3, DVec4, Mat4, Vec2};

/// World-space rectangle visible through the camera, in the cells' f32
/// precision so sampled positions and containment agree.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct WorldBounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl WorldBounds {
    pub fn contains(&self, p: Vec2) -> bool {
        (self.min.x..=self.max.x).contains(&p.x) && (self.min.y..=self.max.y).contains(&p.y)
    }

    pub fn half_extents(&self) -> Vec2 {
        (self.max - self.min) * 0.5
    }
}

/// Screen rectangle in logical pixels, origin top-left.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ScreenViewport {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone)]
pub struct Camera {
    ortho_scale: f64,
    near: f64,
    far: f64,

    proj: DMat4,
    view: DMat4,
    viewport: ScreenViewport,
    bounds: WorldBounds,
}

impl Camera {
    pub fn new(ortho_scale: f32, near: f32, far: f32, width: u32, height: u32) -> Self {
        let mut camera = Self {
            ortho_scale: ortho_scale as f64,
            near: near as f64,
            far: far as f64,
            proj: DMat4::IDENTITY,
            view: DMat4::look_at_rh(DVec3::ZERO, DVec3::NEG_Z, DVec3::Y),
            viewport: ScreenViewport { x: 0.0, y: 0.0, width: 1.0, height: 1.0 },
            bounds: WorldBounds { min: Vec2::ZERO, max: Vec2::ZERO },
        };
        camera.on_resize(width, height);
        camera
    }

    /// Rebuilds projection, viewport and world bounds for a new window size.
    ///
    /// The vertical half-extent is always `ortho_scale`; the horizontal one
    /// follows the aspect ratio. Zero dimensions are clamped to 1.
    pub fn on_resize(&mut self, width: u32, height: u32) {
        let (w, h) = (width.max(1) as f64, height.max(1) as f64);
        let s = self.ortho_scale;
        let (hx, hy) = (s * w / h, s);

        self.proj = DMat4::orthographic_rh(-hx, hx, -hy, hy, self.near, self.far);
        self.bounds = WorldBounds {
            min: Vec2::new(-hx as f32, -hy as f32),
            max: Vec2::new(hx as f32, hy as f32),
        };
        self.viewport = ScreenViewport { x: 0.0, y: 0.0, width: w, height: h };

        log::debug!("camera resized to {w}x{h}, half extents ({hx:.3}, {hy:.3})");
    }

    pub fn view(&self) -> DMat4 {
        self.view
    }

    /// Combined projection-view matrix for the shader uniform.
    pub fn proj_view(&self) -> Mat4 {
        (self.proj * self.view).as_mat4()
    }

    pub fn viewport(&self) -> ScreenViewport {
        self.viewport
    }

    pub fn bounds(&self) -> WorldBounds {
        self.bounds
    }

    /// Un-projects a window point through the projection with an identity
    /// model matrix. Screen y grows downward, world y upward.
    pub fn screen_to_world(&self, screen_x: f64, screen_y: f64) -> DVec2 {
        let vp = self.viewport;
        let win_y = vp.height - screen_y;

        let ndc = DVec4::new(
            2.0 * (screen_x - vp.x) / vp.width - 1.0,
            2.0 * (win_y - vp.y) / vp.height - 1.0,
            0.0,
            1.0,
        );

        let world = self.proj.inverse() * ndc;
        DVec2::new(world.x / world.w, world.y / world.w)
    }

    /// Forward mapping of a world point (z = 0) to window coordinates.
    pub fn world_to_screen(&self, world: DVec2) -> DVec2 {
        let vp = self.viewport;
        let clip = self.proj * DVec4::new(world.x, world.y, 0.0, 1.0);
        let ndc = clip.truncate() / clip.w;

        let win_x = vp.x + (ndc.x + 1.0) * 0.5 * vp.width;
        let win_y = vp.y + (ndc.y + 1.0) * 0.5 * vp.height;
        DVec2::new(win_x, vp.height - win_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;
    const EPS32: f32 = 1e-6;

    fn camera(w: u32, h: u32) -> Camera {
        Camera::new(1.0, 0.1, 100.0, w, h)
    }

    #[test]
    fn square_window_shows_unit_square() {
        let cam = camera(800, 800);
        let half = cam.bounds().half_extents();
        assert!((half.x - 1.0).abs() < EPS32);
        assert!((half.y - 1.0).abs() < EPS32);
    }

    #[test]
    fn portrait_resize_keeps_vertical_and_narrows_horizontal() {
        let mut cam = camera(800, 800);
        cam.on_resize(400, 800);
        let b = cam.bounds();
        assert!((b.max.y - 1.0).abs() < EPS32 && (b.min.y + 1.0).abs() < EPS32);
        assert!((b.max.x - 0.5).abs() < EPS32 && (b.min.x + 0.5).abs() < EPS32);

        // Circles stay round: world units per pixel match on both axes.
        let a = cam.screen_to_world(0.0, 0.0);
        let c = cam.screen_to_world(100.0, 100.0);
        assert!(((c.x - a.x) - (a.y - c.y)).abs() < EPS);
    }

    #[test]
    fn wide_window_widens_horizontal() {
        let cam = camera(1600, 800);
        let half = cam.bounds().half_extents();
        assert!((half.x - 2.0).abs() < EPS32);
        assert!((half.y - 1.0).abs() < EPS32);
    }

    #[test]
    fn zero_height_is_clamped() {
        let cam = camera(800, 0);
        let half = cam.bounds().half_extents();
        assert!(half.x.is_finite() && half.y.is_finite());
        assert_eq!(cam.viewport().height, 1.0);
    }

    #[test]
    fn screen_corners_map_to_world_corners() {
        let cam = camera(800, 800);
        let tl = cam.screen_to_world(0.0, 0.0);
        assert!((tl.x + 1.0).abs() < EPS && (tl.y - 1.0).abs() < EPS);

        let center = cam.screen_to_world(400.0, 400.0);
        assert!(center.length() < EPS);

        let br = cam.screen_to_world(800.0, 800.0);
        assert!((br.x - 1.0).abs() < EPS && (br.y + 1.0).abs() < EPS);
    }

    #[test]
    fn screen_world_round_trip() {
        let cam = camera(640, 480);
        for &(x, y) in &[(0.0, 0.0), (12.5, 400.0), (320.0, 240.0), (639.0, 1.0)] {
            let back = cam.world_to_screen(cam.screen_to_world(x, y));
            assert!((back.x - x).abs() < 1e-6, "x: {} vs {}", back.x, x);
            assert!((back.y - y).abs() < 1e-6, "y: {} vs {}", back.y, y);
        }
    }

    #[test]
    fn view_looks_down_negative_z() {
        let cam = camera(800, 800);
        assert!(cam.view().abs_diff_eq(DMat4::IDENTITY, EPS));
    }

    #[test]
    fn proj_view_keeps_cell_depths_inside_clip_range() {
        let cam = camera(800, 800);
        let pv = cam.proj_view();
        for z in [-2.0f32, -1.0] {
            let clip = pv * glam::Vec4::new(0.0, 0.0, z, 1.0);
            let depth = clip.z / clip.w;
            assert!((0.0..=1.0).contains(&depth), "depth {depth} for z {z}");
        }
    }
}
