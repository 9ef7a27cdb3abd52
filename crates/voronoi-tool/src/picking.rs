//! Hover hit-testing and the per-frame selection update.

use glam::DVec2;

use crate::cells::CellRegistry;

/// Boundary-inclusive point-in-circle test.
#[inline]
pub fn point_in_circle(center: DVec2, radius: f64, p: DVec2) -> bool {
    let d = p - center;
    d.x * d.x + d.y * d.y <= radius * radius
}

/// Index of the first cell, in registry order, whose hover circle contains `p`.
pub fn pick(registry: &CellRegistry, radius: f64, p: DVec2) -> Option<usize> {
    registry
        .iter()
        .position(|c| point_in_circle(c.position.as_dvec2(), radius, p))
}

/// Recomputes the selection for this frame.
///
/// With `pin_during_drag`, a selection held while dragging is kept even when
/// the pointer leaves its circle; otherwise the scan always runs. Nothing is
/// hovered before the first pointer event (`mouse` is `None`).
pub fn update_selection(
    registry: &mut CellRegistry,
    mouse: Option<DVec2>,
    hover_radius: f64,
    dragging: bool,
    pin_during_drag: bool,
) {
    if pin_during_drag && dragging && registry.selection().is_some() {
        return;
    }
    let hit = mouse.and_then(|p| pick(registry, hover_radius, p));
    registry.set_selection(hit);
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec2, Vec3};

    const R: f64 = 0.025;

    fn registry(points: &[(f32, f32)]) -> CellRegistry {
        let mut reg = CellRegistry::new();
        for &(x, y) in points {
            reg.add(Vec2::new(x, y), Vec3::ONE);
        }
        reg
    }

    #[test]
    fn circle_contains_center_and_boundary() {
        let c = DVec2::new(0.5, -0.5);
        assert!(point_in_circle(c, 0.1, c));
        assert!(point_in_circle(c, 0.5, c + DVec2::new(0.5, 0.0)));
        assert!(!point_in_circle(c, 0.1, c + DVec2::new(0.1, 0.001)));
    }

    #[test]
    fn zero_radius_only_hits_center() {
        let c = DVec2::ZERO;
        assert!(point_in_circle(c, 0.0, c));
        assert!(!point_in_circle(c, 0.0, DVec2::new(1e-9, 0.0)));
    }

    #[test]
    fn first_match_wins() {
        let reg = registry(&[(0.5, 0.5), (0.0, 0.0), (0.01, 0.0)]);
        assert_eq!(pick(&reg, R, DVec2::new(0.005, 0.0)), Some(1));
        assert_eq!(pick(&reg, R, DVec2::new(-0.9, 0.9)), None);
    }

    #[test]
    fn idle_scan_tracks_pointer() {
        let mut reg = registry(&[(0.0, 0.0), (0.5, 0.0)]);
        update_selection(&mut reg, Some(DVec2::new(0.5, 0.01)), R, false, true);
        assert_eq!(reg.selection(), Some(1));

        update_selection(&mut reg, Some(DVec2::new(0.9, 0.9)), R, false, true);
        assert_eq!(reg.selection(), None);
    }

    #[test]
    fn drag_pins_selection_when_enabled() {
        let mut reg = registry(&[(0.0, 0.0)]);
        update_selection(&mut reg, Some(DVec2::ZERO), R, true, true);
        assert_eq!(reg.selection(), Some(0));

        // Pointer far away, button still held.
        update_selection(&mut reg, Some(DVec2::new(0.8, 0.8)), R, true, true);
        assert_eq!(reg.selection(), Some(0));
    }

    #[test]
    fn drag_without_selection_can_acquire_one() {
        let mut reg = registry(&[(0.2, 0.2)]);
        update_selection(&mut reg, Some(DVec2::new(0.2, 0.2)), R, true, true);
        assert_eq!(reg.selection(), Some(0));
    }

    #[test]
    fn unknown_pointer_selects_nothing() {
        let mut reg = registry(&[(0.0, 0.0)]);
        update_selection(&mut reg, None, R, false, true);
        assert_eq!(reg.selection(), None);
    }

    #[test]
    fn unpinned_drag_rescans_every_frame() {
        let mut reg = registry(&[(0.0, 0.0)]);
        update_selection(&mut reg, Some(DVec2::ZERO), R, true, false);
        assert_eq!(reg.selection(), Some(0));

        update_selection(&mut reg, Some(DVec2::new(0.8, 0.8)), R, true, false);
        assert_eq!(reg.selection(), None);
    }
}
