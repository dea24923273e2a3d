// patterns.rs - Random fills and a catalogue of named starting patterns

use rand::Rng;

use crate::grid::{Coord, GridSize, LiveSet};

/// A pattern as (row, col) offsets from its top-left corner.
pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(i32, i32)],
}

pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "Glider",
        cells: &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)],
    },
    Pattern {
        name: "Blinker",
        cells: &[(0, 0), (0, 1), (0, 2)],
    },
    Pattern {
        name: "Toad",
        cells: &[(0, 1), (0, 2), (0, 3), (1, 0), (1, 1), (1, 2)],
    },
    Pattern {
        name: "Beacon",
        cells: &[(0, 0), (0, 1), (1, 0), (1, 1), (2, 2), (2, 3), (3, 2), (3, 3)],
    },
    Pattern {
        name: "R-pentomino",
        cells: &[(0, 1), (0, 2), (1, 0), (1, 1), (2, 1)],
    },
    Pattern {
        name: "Gosper Glider Gun",
        cells: &[
            (0, 24),
            (1, 22), (1, 24),
            (2, 12), (2, 13), (2, 20), (2, 21), (2, 34), (2, 35),
            (3, 11), (3, 15), (3, 20), (3, 21), (3, 34), (3, 35),
            (4, 0), (4, 1), (4, 10), (4, 16), (4, 20), (4, 21),
            (5, 0), (5, 1), (5, 10), (5, 14), (5, 16), (5, 17), (5, 22), (5, 24),
            (6, 10), (6, 16), (6, 24),
            (7, 11), (7, 15),
            (8, 12), (8, 13),
        ],
    },
];

/// Inserts `pattern` with its corner at `origin`, wrapping around the edges.
/// Cells already alive stay alive.
pub fn stamp(set: &mut LiveSet, pattern: &Pattern, origin: Coord, size: GridSize) {
    set.extend(
        pattern
            .cells
            .iter()
            .map(|&(dr, dc)| origin.offset(dr, dc, size)),
    );
}

/// A fresh set where every cell is independently alive with probability `prob`.
pub fn randomize<R: Rng + ?Sized>(size: GridSize, prob: f64, rng: &mut R) -> LiveSet {
    let mut set = LiveSet::new();
    for row in 0..size.rows() {
        for col in 0..size.cols() {
            if rng.random::<f64>() < prob {
                set.insert(Coord { row, col });
            }
        }
    }
    set
}
