// stepping.rs - Next-generation transition, plus the row coroutine stepper

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::runtime::{Builder, Runtime};

use crate::error::LifeError;
use crate::grid::{Coord, GridSize, LiveSet};

/// Conway's rule for a single cell.
#[inline]
pub fn survives(alive: bool, neighbors: u8) -> bool {
    match (alive, neighbors) {
        (true, 2) | (true, 3) => true, // Survival
        (false, 3) => true,            // Birth
        _ => false,                    // Death or stays dead
    }
}

/// Computes the generation after `set` without touching it.
///
/// Only the candidate cells (live cells and their neighbours) are evaluated,
/// so the cost follows the population rather than the grid area.
pub fn next_generation(set: &LiveSet, size: GridSize) -> LiveSet {
    set.candidates(size)
        .into_iter()
        .filter(|&c| survives(set.contains(c), set.neighbor_count(c, size)))
        .collect()
}

/// Evaluates one row of candidates against a frozen generation.
async fn process_row(current: Arc<LiveSet>, size: GridSize, cells: Vec<Coord>) -> Vec<Coord> {
    let mut born = Vec::with_capacity(cells.len());
    for c in cells {
        if survives(current.contains(c), current.neighbor_count(c, size)) {
            born.push(c);
        }
        tokio::task::yield_now().await; // Cooperative yielding
    }
    born
}

/// Advances generations by spawning one coroutine per candidate row on a
/// single-threaded runtime. Produces the same set as [`next_generation`].
pub struct RowStepper {
    runtime: Runtime,
}

impl RowStepper {
    pub fn new() -> Result<Self, LifeError> {
        let runtime = Builder::new_current_thread()
            .build()
            .map_err(LifeError::Runtime)?;
        Ok(Self { runtime })
    }

    pub fn advance(&self, set: &LiveSet, size: GridSize) -> LiveSet {
        if set.is_empty() {
            return LiveSet::new();
        }

        let mut rows: BTreeMap<i32, Vec<Coord>> = BTreeMap::new();
        for c in set.candidates(size) {
            rows.entry(c.row).or_default().push(c);
        }

        let current = Arc::new(set.clone());
        self.runtime.block_on(async {
            let handles: Vec<_> = rows
                .into_values()
                .map(|cells| tokio::spawn(process_row(Arc::clone(&current), size, cells)))
                .collect();

            let mut next = LiveSet::new();
            for handle in handles {
                match handle.await {
                    Ok(row) => next.extend(row),
                    Err(e) => tracing::error!(error = %e, "row task failed"),
                }
            }
            next
        })
    }
}
