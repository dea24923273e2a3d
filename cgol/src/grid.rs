// grid.rs - Toroidal grid coordinates and the sparse set of live cells

use std::collections::HashSet;
use std::collections::hash_set;

// Default playing area when no size is given on the command line
pub const DEFAULT_ROWS: u16 = 50;
pub const DEFAULT_COLS: u16 = 50;

/// Moore neighbourhood offsets, (0, 0) excluded.
pub const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1), (-1, 0), (-1, 1), (0, -1),
    ( 1, -1), ( 1, 0), ( 1, 1), (0,  1),
];

/// Wraps `value` into `[0, modulus)`.
#[inline]
pub fn wrap(value: i32, modulus: i32) -> i32 {
    value.rem_euclid(modulus)
}

/// Fixed dimensions of the torus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSize {
    rows: i32,
    cols: i32,
}

impl GridSize {
    /// Zero dimensions are raised to 1 so wrapping is always defined.
    pub fn new(rows: u16, cols: u16) -> Self {
        Self {
            rows: i32::from(rows.max(1)),
            cols: i32::from(cols.max(1)),
        }
    }

    pub fn rows(&self) -> i32 {
        self.rows
    }

    pub fn cols(&self) -> i32 {
        self.cols
    }

    pub fn area(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    pub fn center(&self) -> Coord {
        Coord { row: self.rows / 2, col: self.cols / 2 }
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self::new(DEFAULT_ROWS, DEFAULT_COLS)
    }
}

/// A cell position, normalized into the grid it was built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub row: i32,
    pub col: i32,
}

impl Coord {
    pub fn wrapped(row: i32, col: i32, size: GridSize) -> Self {
        Self {
            row: wrap(row, size.rows),
            col: wrap(col, size.cols),
        }
    }

    pub fn offset(self, dr: i32, dc: i32, size: GridSize) -> Self {
        Self::wrapped(self.row + dr, self.col + dc, size)
    }

    /// The 8 wrapped neighbours of this cell.
    pub fn neighbors(self, size: GridSize) -> impl Iterator<Item = Coord> {
        NEIGHBOR_OFFSETS
            .iter()
            .map(move |&(dr, dc)| self.offset(dr, dc, size))
    }
}

/// Deduplicated set of live cells. Every coordinate not in the set is dead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LiveSet {
    cells: HashSet<Coord>,
}

impl LiveSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, c: Coord) -> bool {
        self.cells.contains(&c)
    }

    /// Adds `c`; inserting an existing cell is a no-op.
    pub fn insert(&mut self, c: Coord) {
        self.cells.insert(c);
    }

    pub fn remove(&mut self, c: Coord) {
        self.cells.remove(&c);
    }

    /// Flips the state of `c`, returning whether it is now alive.
    pub fn toggle(&mut self, c: Coord) -> bool {
        if self.cells.remove(&c) {
            false
        } else {
            self.cells.insert(c);
            true
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> hash_set::Iter<'_, Coord> {
        self.cells.iter()
    }

    /// Number of live cells among the 8 wrapped neighbours of `c`.
    pub fn neighbor_count(&self, c: Coord, size: GridSize) -> u8 {
        c.neighbors(size).filter(|n| self.contains(*n)).count() as u8
    }

    /// Every live cell plus all of its wrapped neighbours; nothing outside
    /// this set can change state in the next generation.
    pub fn candidates(&self, size: GridSize) -> HashSet<Coord> {
        let mut out = HashSet::with_capacity(self.cells.len() * 9);
        for &c in &self.cells {
            out.insert(c);
            out.extend(c.neighbors(size));
        }
        out
    }
}

impl FromIterator<Coord> for LiveSet {
    fn from_iter<I: IntoIterator<Item = Coord>>(iter: I) -> Self {
        Self { cells: iter.into_iter().collect() }
    }
}

impl Extend<Coord> for LiveSet {
    fn extend<I: IntoIterator<Item = Coord>>(&mut self, iter: I) {
        self.cells.extend(iter);
    }
}

impl<'a> IntoIterator for &'a LiveSet {
    type Item = &'a Coord;
    type IntoIter = hash_set::Iter<'a, Coord>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(row: i32, col: i32) -> Coord {
        Coord { row, col }
    }

    #[test]
    fn test_wrap() {
        assert_eq!(wrap(-1, 10), 9);
        assert_eq!(wrap(10, 10), 0);
        assert_eq!(wrap(-21, 10), 9);
        assert_eq!(wrap(5, 10), 5);
    }

    #[test]
    fn test_zero_size_is_raised() {
        let size = GridSize::new(0, 0);
        assert_eq!(size.rows(), 1);
        assert_eq!(size.cols(), 1);
        assert_eq!(Coord::wrapped(7, -3, size), c(0, 0));
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut set = LiveSet::new();
        set.insert(c(3, 4));
        set.insert(c(3, 4));
        assert_eq!(set.len(), 1);
        assert!(set.contains(c(3, 4)));

        // Removing an absent cell does nothing
        set.remove(c(0, 0));
        assert_eq!(set.len(), 1);
        set.remove(c(3, 4));
        assert!(set.is_empty());
    }

    #[test]
    fn test_toggle() {
        let mut set = LiveSet::new();
        assert!(set.toggle(c(1, 1)));
        assert!(set.contains(c(1, 1)));
        assert!(!set.toggle(c(1, 1)));
        assert!(set.is_empty());
    }

    #[test]
    fn test_neighbor_count_wraps_corners() {
        let size = GridSize::new(10, 10);
        let set: LiveSet = [c(9, 9), c(9, 0), c(0, 9)].into_iter().collect();

        // (0,0) sees all three across both edges
        assert_eq!(set.neighbor_count(c(0, 0), size), 3);
        // A cell never counts itself
        assert_eq!(set.neighbor_count(c(9, 9), size), 2);
        assert_eq!(set.neighbor_count(c(5, 5), size), 0);
    }

    #[test]
    fn test_neighbor_count_full_ring() {
        let size = GridSize::new(5, 5);
        let center = c(2, 2);
        let set: LiveSet = center.neighbors(size).collect();
        assert_eq!(set.neighbor_count(center, size), 8);
    }

    #[test]
    fn test_candidates() {
        let size = GridSize::new(10, 10);
        let set: LiveSet = [c(0, 0)].into_iter().collect();
        let cands = set.candidates(size);
        assert_eq!(cands.len(), 9);
        assert!(cands.contains(&c(9, 9)));
        assert!(cands.contains(&c(1, 1)));
        assert!(cands.contains(&c(0, 0)));

        assert!(LiveSet::new().candidates(size).is_empty());
    }

    #[test]
    fn test_candidates_tiny_torus_collapse() {
        // On a 2x2 torus every neighbour offset lands on one of four cells
        let size = GridSize::new(2, 2);
        let set: LiveSet = [c(0, 0)].into_iter().collect();
        assert_eq!(set.candidates(size).len(), 4);
    }
}
