// session.rs - Session state machine: editing, stepping, speed and persistence

use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use crate::config::{INITIAL_TICK_US, MAX_TICK_US, MIN_TICK_US, Settings, TICK_STEP_US};
use crate::error::LifeError;
use crate::grid::{Coord, GridSize, LiveSet};
use crate::patterns::{self, PATTERNS};
use crate::persist::PatternStore;
use crate::stepping::RowStepper;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Edit,
    Running,
}

impl Mode {
    pub fn label(self) -> &'static str {
        match self {
            Mode::Edit => "Paused",
            Mode::Running => "Running",
        }
    }
}

/// Everything a user (or the renderer's input layer) can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Up,
    Down,
    Left,
    Right,
    Toggle,
    PlayPause,
    Step,
    Randomize,
    Save,
    Load,
    SpeedUp,
    SlowDown,
    /// Drop `PATTERNS[i]` at the cursor.
    Stamp(usize),
    Quit,
}

impl Command {
    /// Commands that only make sense while editing.
    pub fn needs_edit(self) -> bool {
        matches!(
            self,
            Command::Up
                | Command::Down
                | Command::Left
                | Command::Right
                | Command::Toggle
                | Command::Stamp(_)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Bounds a requested tick interval to `[MIN_TICK_US, MAX_TICK_US]`.
pub fn clamp_tick(us: i64) -> u32 {
    us.clamp(i64::from(MIN_TICK_US), i64::from(MAX_TICK_US)) as u32
}

#[derive(Debug, Clone, Copy)]
struct SessionState {
    mode: Mode,
    cursor: Coord,
    tick_us: u32,
}

/// Read-only view handed to the renderer after each cycle.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub live: &'a LiveSet,
    pub size: GridSize,
    pub cursor: Coord,
    pub mode: Mode,
    pub generation: u64,
    pub tick_us: u32,
    pub target: &'a str,
}

impl Snapshot<'_> {
    pub fn cursor_alive(&self) -> bool {
        self.live.contains(self.cursor)
    }

    /// Generations per second at the current tick interval.
    pub fn speed(&self) -> u32 {
        1_000_000 / self.tick_us.max(1)
    }

    pub fn status_line(&self) -> String {
        format!(
            "Gen {}  [{}]   p=play/pause  g=Next generation  space=Toggle  r=Random  S=Save  L=Load\n\
             (Filename={})  q=quit  speed={} gen/s",
            self.generation,
            self.mode.label(),
            self.target,
            self.speed()
        )
    }
}

/// Owns the live cells and the session state for the whole run. Nothing else
/// mutates them.
pub struct SessionController {
    live: LiveSet,
    size: GridSize,
    generation: u64,
    state: SessionState,
    rand_prob: f64,
    rng: StdRng,
    store: Box<dyn PatternStore>,
    target: String,
    stepper: RowStepper,
}

impl SessionController {
    pub fn new(settings: &Settings, store: Box<dyn PatternStore>) -> Result<Self, LifeError> {
        let target = store.target();
        let mut session = Self {
            live: LiveSet::new(),
            size: settings.size,
            generation: 0,
            state: SessionState {
                mode: Mode::Edit,
                cursor: settings.size.center(),
                tick_us: INITIAL_TICK_US,
            },
            rand_prob: settings.rand_prob,
            rng: StdRng::from_os_rng(),
            store,
            target,
            stepper: RowStepper::new()?,
        };

        if settings.load_on_start {
            session.load();
        }
        Ok(session)
    }

    /// Replaces the random source, for reproducible fills.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn live(&self) -> &LiveSet {
        &self.live
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    pub fn cursor(&self) -> Coord {
        self.state.cursor
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_micros(u64::from(self.state.tick_us))
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            live: &self.live,
            size: self.size,
            cursor: self.state.cursor,
            mode: self.state.mode,
            generation: self.generation,
            tick_us: self.state.tick_us,
            target: &self.target,
        }
    }

    /// One pass of the control cycle.
    ///
    /// The extinction check runs before the command, so a run that died out
    /// on the previous cycle is observed as paused here. In Running mode the
    /// cycle ends with exactly one generation advance.
    pub fn cycle(&mut self, command: Option<Command>) -> Flow {
        if self.state.mode == Mode::Running && self.live.is_empty() {
            debug!(generation = self.generation, "population died out, pausing");
            self.state.mode = Mode::Edit;
        }

        if let Some(command) = command {
            if self.apply(command) == Flow::Quit {
                return Flow::Quit;
            }
        }

        if self.state.mode == Mode::Running {
            self.step();
        }
        Flow::Continue
    }

    /// Applies a single command. Edit-only commands are dropped while running.
    pub fn apply(&mut self, command: Command) -> Flow {
        if command.needs_edit() && self.state.mode != Mode::Edit {
            debug!(?command, "ignored while running");
            return Flow::Continue;
        }

        match command {
            Command::Up => self.move_cursor(-1, 0),
            Command::Down => self.move_cursor(1, 0),
            Command::Left => self.move_cursor(0, -1),
            Command::Right => self.move_cursor(0, 1),
            Command::Toggle => {
                self.live.toggle(self.state.cursor);
            }
            Command::PlayPause => {
                self.state.mode = match self.state.mode {
                    Mode::Edit => Mode::Running,
                    Mode::Running => Mode::Edit,
                };
                debug!(mode = self.state.mode.label(), "mode changed");
            }
            Command::Step => self.step(),
            Command::Randomize => self.randomize(),
            Command::Save => self.save(),
            Command::Load => self.load(),
            Command::SpeedUp => self.set_tick_interval(i64::from(self.state.tick_us) - i64::from(TICK_STEP_US)),
            Command::SlowDown => self.set_tick_interval(i64::from(self.state.tick_us) + i64::from(TICK_STEP_US)),
            Command::Stamp(index) => self.stamp(index),
            Command::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    /// Advances one generation; the mode is left alone.
    pub fn step(&mut self) {
        self.live = self.stepper.advance(&self.live, self.size);
        self.generation += 1;
        debug!(generation = self.generation, population = self.live.len(), "step");
    }

    /// Sets the tick interval, clamped to the allowed range.
    pub fn set_tick_interval(&mut self, us: i64) {
        self.state.tick_us = clamp_tick(us);
    }

    fn move_cursor(&mut self, dr: i32, dc: i32) {
        self.state.cursor = self.state.cursor.offset(dr, dc, self.size);
    }

    fn stamp(&mut self, index: usize) {
        if let Some(pattern) = PATTERNS.get(index) {
            patterns::stamp(&mut self.live, pattern, self.state.cursor, self.size);
            debug!(pattern = pattern.name, "stamped");
        }
    }

    fn randomize(&mut self) {
        self.live = patterns::randomize(self.size, self.rand_prob, &mut self.rng);
        self.generation = 0;
        info!(population = self.live.len(), prob = self.rand_prob, "randomized");
    }

    fn save(&mut self) {
        match self.store.save(&self.live) {
            Ok(()) => info!(file = %self.target, cells = self.live.len(), "saved"),
            Err(e) => warn!(error = %e, "save skipped"),
        }
    }

    fn load(&mut self) {
        self.live = match self.store.load(self.size) {
            Ok(set) => {
                info!(file = %self.target, cells = set.len(), "loaded");
                set
            }
            Err(e) => {
                warn!(error = %e, "load failed, starting empty");
                LiveSet::new()
            }
        };
        self.generation = 0;
    }
}

/// Decides when the driver should run the next control cycle: every frame
/// while editing, once per tick interval while running.
#[derive(Debug, Default)]
pub struct Pacer {
    last_cycle: Option<Instant>,
}

impl Pacer {
    pub fn ready(&mut self, mode: Mode, tick: Duration, now: Instant) -> bool {
        let due = match (mode, self.last_cycle) {
            (Mode::Edit, _) | (Mode::Running, None) => true,
            (Mode::Running, Some(last)) => now.saturating_duration_since(last) >= tick,
        };
        if due {
            self.last_cycle = Some(now);
        }
        due
    }

    /// Time left until a running session is due again.
    pub fn remaining(&self, tick: Duration, now: Instant) -> Duration {
        self.last_cycle
            .map(|last| tick.saturating_sub(now.saturating_duration_since(last)))
            .unwrap_or_default()
    }
}
