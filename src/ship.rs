//! Ships: a straight run of cells with hit-point accounting.

use alloc::vec::Vec;
use core::fmt;

use crate::common::{CellView, Coord, Visibility};
use crate::config::BOARD_SIZE;

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    pub fn flipped(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }
}

/// Class name for a ship of the given size.
pub fn class_name(size: usize) -> &'static str {
    match size {
        0 | 1 => "Patrol boat",
        2 => "Destroyer",
        3 => "Cruiser",
        _ => "Battleship",
    }
}

/// A ship of `size` cells, positioned by its anchor (top-left) cell.
#[derive(Clone, PartialEq, Eq)]
pub struct Ship {
    size: usize,
    orientation: Orientation,
    anchor: Option<Coord>,
    hit_points: usize,
    hits: Vec<Coord>,
}

impl Ship {
    /// Create an unpositioned ship. Sizes below 1 are clamped to 1.
    pub fn new(size: usize) -> Self {
        let size = size.max(1);
        Self {
            size,
            orientation: Orientation::Horizontal,
            anchor: None,
            hit_points: size,
            hits: Vec::new(),
        }
    }

    /// Move the ship to `anchor` facing `orientation`. May be called any number
    /// of times before the ship is committed to a board.
    pub fn position(&mut self, anchor: Coord, orientation: Orientation) {
        self.anchor = Some(anchor);
        self.orientation = orientation;
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn name(&self) -> &'static str {
        class_name(self.size)
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn anchor(&self) -> Option<Coord> {
        self.anchor
    }

    /// Last occupied cell, `size - 1` steps from the anchor.
    pub fn end(&self) -> Option<Coord> {
        self.anchor
            .map(|anchor| anchor.step(self.orientation, self.size - 1))
    }

    /// Occupied cells from anchor to end. Every call starts a fresh walk.
    pub fn cells(&self) -> impl Iterator<Item = Coord> + Clone {
        let orientation = self.orientation;
        let len = if self.anchor.is_some() { self.size } else { 0 };
        let anchor = self.anchor.unwrap_or_default();
        (0..len).map(move |k| anchor.step(orientation, k))
    }

    /// Whether the ship occupies `coord`.
    pub fn contains(&self, coord: Coord) -> bool {
        self.cells().any(|c| c == coord)
    }

    /// Cells of the clamped bounding box one cell wider than the ship on every
    /// side, including the ship's own cells.
    pub fn neighbourhood(&self) -> impl Iterator<Item = Coord> + Clone {
        let last = BOARD_SIZE - 1;
        let bounds = self.anchor.zip(self.end()).map(|(start, end)| {
            (
                start.x.saturating_sub(1),
                end.x.saturating_add(1).min(last),
                start.y.saturating_sub(1),
                end.y.saturating_add(1).min(last),
            )
        });
        bounds.into_iter().flat_map(|(left, right, top, bottom)| {
            (top..=bottom).flat_map(move |y| (left..=right).map(move |x| Coord::new(x, y)))
        })
    }

    /// Register a shot at `coord`. Returns `true` if the ship occupies the cell.
    /// A cell already recorded as hit does not cost another hit point.
    pub fn apply_shot(&mut self, coord: Coord) -> bool {
        if !self.contains(coord) {
            return false;
        }
        if !self.hits.contains(&coord) {
            self.hits.push(coord);
            self.hit_points = self.hit_points.saturating_sub(1);
        }
        true
    }

    pub fn is_destroyed(&self) -> bool {
        self.hit_points == 0
    }

    pub fn hit_points(&self) -> usize {
        self.hit_points
    }

    /// Cells hit so far, in the order they were hit.
    pub fn hits(&self) -> &[Coord] {
        &self.hits
    }

    pub fn is_hit_at(&self, coord: Coord) -> bool {
        self.hits.contains(&coord)
    }

    /// How the segment at `coord` should appear. Intact segments are concealed
    /// on the opponent board.
    pub fn render_hint(&self, coord: Coord, visibility: Visibility) -> CellView {
        if self.is_destroyed() {
            CellView::Destroyed
        } else if self.is_hit_at(coord) {
            CellView::Hit
        } else {
            match visibility {
                Visibility::Own => CellView::Ship,
                Visibility::Opponent => CellView::Water,
            }
        }
    }
}

impl fmt::Debug for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ship {{ size: {}, anchor: {:?}, orientation: {:?}, hp: {}, hits: {:?} }}",
            self.size, self.anchor, self.orientation, self.hit_points, self.hits,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_is_clamped_to_one() {
        let ship = Ship::new(0);
        assert_eq!(ship.size(), 1);
        assert_eq!(ship.hit_points(), 1);
    }

    #[test]
    fn unpositioned_ship_has_no_cells() {
        let ship = Ship::new(3);
        assert_eq!(ship.cells().count(), 0);
        assert_eq!(ship.neighbourhood().count(), 0);
        assert!(ship.end().is_none());
    }

    #[test]
    fn repositioning_moves_the_run() {
        let mut ship = Ship::new(3);
        ship.position(Coord::new(1, 1), Orientation::Horizontal);
        assert_eq!(ship.end(), Some(Coord::new(3, 1)));
        ship.position(Coord::new(4, 2), Orientation::Vertical);
        assert_eq!(ship.end(), Some(Coord::new(4, 4)));
        assert_eq!(ship.orientation(), Orientation::Vertical);
        let cells: Vec<_> = ship.cells().collect();
        assert_eq!(
            cells,
            [Coord::new(4, 2), Coord::new(4, 3), Coord::new(4, 4)]
        );
    }

    #[test]
    fn huge_ship_ends_out_of_bounds() {
        let mut ship = Ship::new(usize::MAX);
        ship.position(Coord::new(5, 5), Orientation::Horizontal);
        assert_eq!(ship.end(), Some(Coord::new(usize::MAX, 5)));
        assert!(!ship.end().unwrap().in_bounds());
        assert!(ship.neighbourhood().all(|c| c.in_bounds()));
    }

    #[test]
    fn neighbourhood_is_clamped_at_the_corner() {
        let mut ship = Ship::new(1);
        ship.position(Coord::new(0, 0), Orientation::Horizontal);
        let ring: Vec<_> = ship.neighbourhood().collect();
        assert_eq!(ring.len(), 4);
        assert!(ring.contains(&Coord::new(1, 1)));
    }

    #[test]
    fn repeated_shot_does_not_double_count() {
        let mut ship = Ship::new(2);
        ship.position(Coord::new(5, 5), Orientation::Vertical);
        assert!(ship.apply_shot(Coord::new(5, 6)));
        assert!(ship.apply_shot(Coord::new(5, 6)));
        assert_eq!(ship.hit_points(), 1);
        assert!(!ship.apply_shot(Coord::new(6, 6)));
        assert!(!ship.is_destroyed());
    }

    #[test]
    fn render_hint_conceals_intact_segments() {
        let mut ship = Ship::new(2);
        ship.position(Coord::new(0, 0), Orientation::Horizontal);
        let a = Coord::new(0, 0);
        let b = Coord::new(1, 0);
        assert_eq!(ship.render_hint(a, Visibility::Own), CellView::Ship);
        assert_eq!(ship.render_hint(a, Visibility::Opponent), CellView::Water);
        ship.apply_shot(a);
        assert_eq!(ship.render_hint(a, Visibility::Opponent), CellView::Hit);
        assert_eq!(ship.render_hint(b, Visibility::Opponent), CellView::Water);
        ship.apply_shot(b);
        assert_eq!(ship.render_hint(b, Visibility::Opponent), CellView::Destroyed);
    }
}
