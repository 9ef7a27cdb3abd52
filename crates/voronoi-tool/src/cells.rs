//! Ordered cell storage and the current selection.

use glam::{Vec2, Vec3};
use rand::Rng;

use crate::camera::WorldBounds;

/// One Voronoi site: a world position and an RGB color in `[0, 1]`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Cell {
    pub position: Vec2,
    pub color: Vec3,
}

impl Cell {
    pub fn new(position: Vec2, color: Vec3) -> Self {
        Self { position, color }
    }
}

/// Cells in insertion order plus an optional selected index.
///
/// A present selection always indexes an existing cell; every removal keeps
/// it pointing at the same cell or clears it.
#[derive(Debug, Default, Clone)]
pub struct CellRegistry {
    cells: Vec<Cell>,
    selection: Option<usize>,
}

impl CellRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn selection(&self) -> Option<usize> {
        self.selection
    }

    /// Sets the selection; an out-of-range index clears it.
    pub fn set_selection(&mut self, selection: Option<usize>) {
        self.selection = selection.filter(|&i| i < self.cells.len());
    }

    /// Appends a cell and returns its index.
    pub fn add(&mut self, position: Vec2, color: Vec3) -> usize {
        self.cells.push(Cell::new(position, color));
        log::debug!("cell added at ({:.3}, {:.3}), {} total", position.x, position.y, self.cells.len());
        self.cells.len() - 1
    }

    pub fn remove_at(&mut self, index: usize) -> Option<Cell> {
        if index >= self.cells.len() {
            log::warn!("remove_at({index}) ignored: only {} cells", self.cells.len());
            return None;
        }

        let removed = self.cells.remove(index);
        self.selection = match self.selection {
            Some(s) if s == index => None,
            Some(s) if s > index => Some(s - 1),
            other => other,
        };

        log::debug!("cell {index} removed, {} left", self.cells.len());
        Some(removed)
    }

    /// Moves a cell in place. Returns `false` for an out-of-range index.
    pub fn move_to(&mut self, index: usize, position: Vec2) -> bool {
        match self.cells.get_mut(index) {
            Some(cell) => {
                cell.position = position;
                true
            }
            None => {
                log::warn!("move_to({index}) ignored: only {} cells", self.cells.len());
                false
            }
        }
    }

    pub fn clear(&mut self) {
        self.cells.clear();
        self.selection = None;
        log::debug!("cells cleared");
    }

    /// Replaces every cell with `count` freshly sampled ones.
    pub fn randomize<C, P>(&mut self, count: usize, mut color: C, mut position: P)
    where
        C: FnMut() -> Vec3,
        P: FnMut() -> Vec2,
    {
        self.cells.clear();
        self.selection = None;
        self.cells.extend((0..count).map(|_| {
            let c = color();
            Cell::new(position(), c)
        }));
        log::debug!("cells randomized: {count}");
    }
}

/// Uniform RGB color with each channel in `[0, 1]`.
pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    Vec3::new(
        rng.gen_range(0.0..=1.0),
        rng.gen_range(0.0..=1.0),
        rng.gen_range(0.0..=1.0),
    )
}

/// Uniform position inside `bounds` (inclusive, so a collapsed range still works).
pub fn random_position<R: Rng + ?Sized>(rng: &mut R, bounds: &WorldBounds) -> Vec2 {
    let x = rng.gen_range(bounds.min.x..=bounds.max.x);
    let y = rng.gen_range(bounds.min.y..=bounds.max.y);
    Vec2::new(x, y).clamp(bounds.min, bounds.max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn registry_with(n: usize) -> CellRegistry {
        let mut reg = CellRegistry::new();
        for i in 0..n {
            reg.add(Vec2::new(i as f32, 0.0), Vec3::ONE);
        }
        reg
    }

    // ── add / remove ──────────────────────────────────────────────────────

    #[test]
    fn add_then_remove_drops_the_cell() {
        let mut reg = registry_with(3);
        let idx = reg.add(Vec2::new(9.0, 9.0), Vec3::ZERO);
        reg.set_selection(Some(idx));

        let removed = reg.remove_at(idx).unwrap();
        assert_eq!(removed.position, Vec2::new(9.0, 9.0));
        assert_eq!(reg.len(), 3);
        assert_eq!(reg.selection(), None);
        assert!(reg.iter().all(|c| c.position != Vec2::new(9.0, 9.0)));
    }

    #[test]
    fn removal_before_selection_shifts_it() {
        let mut reg = registry_with(4);
        reg.set_selection(Some(2));
        reg.remove_at(0);
        assert_eq!(reg.selection(), Some(1));
        assert_eq!(reg.get(1).unwrap().position, Vec2::new(2.0, 0.0));
    }

    #[test]
    fn removal_after_selection_keeps_it() {
        let mut reg = registry_with(4);
        reg.set_selection(Some(1));
        reg.remove_at(3);
        assert_eq!(reg.selection(), Some(1));
    }

    #[test]
    fn out_of_range_access_is_a_no_op() {
        let mut reg = registry_with(2);
        assert!(reg.remove_at(5).is_none());
        assert!(!reg.move_to(2, Vec2::ONE));
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn set_selection_rejects_stale_index() {
        let mut reg = registry_with(2);
        reg.set_selection(Some(2));
        assert_eq!(reg.selection(), None);
    }

    // ── move / clear / randomize ─────────────────────────────────────────

    #[test]
    fn move_to_updates_position_in_place() {
        let mut reg = registry_with(2);
        assert!(reg.move_to(1, Vec2::new(-0.5, 0.25)));
        assert_eq!(reg.get(1).unwrap().position, Vec2::new(-0.5, 0.25));
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn clear_empties_and_drops_selection() {
        let mut reg = registry_with(3);
        reg.set_selection(Some(0));
        reg.clear();
        assert!(reg.is_empty());
        assert_eq!(reg.selection(), None);
    }

    #[test]
    fn randomize_fills_bounds_with_valid_colors() {
        let bounds = WorldBounds {
            min: Vec2::new(-0.5, -1.0),
            max: Vec2::new(0.5, 1.0),
        };
        let mut rng = StdRng::seed_from_u64(7);
        let mut color_rng = StdRng::seed_from_u64(11);

        let mut reg = registry_with(5);
        reg.set_selection(Some(4));
        reg.randomize(
            40,
            || random_color(&mut color_rng),
            || random_position(&mut rng, &bounds),
        );

        assert_eq!(reg.len(), 40);
        assert_eq!(reg.selection(), None);
        for cell in reg.iter() {
            assert!(bounds.contains(cell.position));
            for ch in cell.color.to_array() {
                assert!((0.0..=1.0).contains(&ch));
            }
        }
    }

    #[test]
    fn random_position_handles_collapsed_bounds() {
        let bounds = WorldBounds { min: Vec2::ZERO, max: Vec2::ZERO };
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(random_position(&mut rng, &bounds), Vec2::ZERO);
    }

    #[test]
    fn positions_stay_inside_non_representable_bounds() {
        let camera = crate::camera::Camera::new(1.0, 0.1, 100.0, 640, 480);
        let bounds = camera.bounds();
        let mut rng = StdRng::seed_from_u64(640);
        for _ in 0..10_000 {
            assert!(bounds.contains(random_position(&mut rng, &bounds)));
        }
    }
}
