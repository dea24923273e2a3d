// persist.rs - Saving and loading live cells as "<row> <col>" lines

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::PathBuf;

use crate::error::LifeError;
use crate::grid::{Coord, GridSize, LiveSet};

/// Where a session saves to and loads from.
pub trait PatternStore: Send {
    /// Name shown in the status line.
    fn target(&self) -> String;
    fn save(&mut self, set: &LiveSet) -> Result<(), LifeError>;
    fn load(&mut self, size: GridSize) -> Result<LiveSet, LifeError>;
}

/// Writes one "<row> <col>" line per live cell.
pub fn write_cells<W: Write>(set: &LiveSet, mut out: W) -> io::Result<()> {
    for c in set {
        writeln!(out, "{} {}", c.row, c.col)?;
    }
    out.flush()
}

/// Reads whitespace separated integer pairs until the input ends or a token
/// fails to parse. Duplicates collapse and every cell is wrapped into `size`.
pub fn read_cells<R: BufRead>(mut input: R, size: GridSize) -> io::Result<LiveSet> {
    let mut text = String::new();
    input.read_to_string(&mut text)?;

    let mut set = LiveSet::new();
    let mut numbers = text.split_whitespace().map(str::parse::<i32>);
    loop {
        match (numbers.next(), numbers.next()) {
            (Some(Ok(row)), Some(Ok(col))) => set.insert(Coord::wrapped(row, col, size)),
            (None, _) => break,
            _ => {
                tracing::debug!(cells = set.len(), "stopped at malformed coordinate");
                break;
            }
        }
    }
    Ok(set)
}

/// Plain text file on disk.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PatternStore for FileStore {
    fn target(&self) -> String {
        self.path.display().to_string()
    }

    fn save(&mut self, set: &LiveSet) -> Result<(), LifeError> {
        let write_err = |source| LifeError::Write {
            path: self.path.clone(),
            source,
        };
        let file = File::create(&self.path).map_err(write_err)?;
        write_cells(set, BufWriter::new(file)).map_err(write_err)
    }

    fn load(&mut self, size: GridSize) -> Result<LiveSet, LifeError> {
        let read_err = |source| LifeError::Read {
            path: self.path.clone(),
            source,
        };
        let file = File::open(&self.path).map_err(read_err)?;
        read_cells(BufReader::new(file), size).map_err(read_err)
    }
}
