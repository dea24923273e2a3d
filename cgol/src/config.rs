// config.rs - Command-line surface and runtime constants

use std::path::PathBuf;

use clap::Parser;

use crate::grid::{DEFAULT_COLS, DEFAULT_ROWS, GridSize};

// Simulation speed, in microseconds between generations
pub const INITIAL_TICK_US: u32 = 100_000;
pub const MIN_TICK_US: u32 = 1_000;
pub const MAX_TICK_US: u32 = 200_000;
pub const TICK_STEP_US: u32 = 10_000;

// Randomize density
pub const MAX_RAND_PROB: f64 = 0.1;
pub const FALLBACK_RAND_PROB: f64 = 0.09;

pub const DEFAULT_FILENAME: &str = "pattern.txt";
pub const DEFAULT_CELL_CHAR: char = 'O';

/// Simulate Conway's Game of Life
#[derive(Parser, Debug)]
#[command(
    name = "cgol",
    about = "Simulate Conway's Game of Life",
    after_help = "In-game controls\n  \
        arrow-keys, hjkl   navigate cursor across the grid\n  \
        space              toggle current cell state\n  \
        p                  play/pause simulation\n  \
        r                  randomize states\n  \
        g                  view next generation\n  \
        L                  load from specified file\n  \
        S                  save to specified file\n  \
        1-6                stamp a built-in pattern at the cursor\n  \
        +                  increase the speed of generation\n  \
        -                  decrease the speed of generation\n  \
        q                  quit"
)]
pub struct Cli {
    /// Filepath for the initial state, also used by save and load
    #[arg(short = 'f', long)]
    pub filename: Option<PathBuf>,

    /// Character to symbolize an alive cell
    #[arg(short = 'c', long, default_value_t = DEFAULT_CELL_CHAR)]
    pub character: char,

    /// Probability factor used when randomizing states
    #[arg(short = 'p', long = "rand-prob", allow_hyphen_values = true)]
    pub rand_prob: Option<String>,

    /// Number of grid rows
    #[arg(long, default_value_t = DEFAULT_ROWS, value_parser = clap::value_parser!(u16).range(1..))]
    pub rows: u16,

    /// Number of grid columns
    #[arg(long, default_value_t = DEFAULT_COLS, value_parser = clap::value_parser!(u16).range(1..))]
    pub cols: u16,
}

/// Everything the session and the renderer need, resolved from the CLI.
#[derive(Debug, Clone)]
pub struct Settings {
    pub filename: PathBuf,
    pub load_on_start: bool,
    pub cell_char: char,
    pub rand_prob: f64,
    pub size: GridSize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            filename: PathBuf::from(DEFAULT_FILENAME),
            load_on_start: false,
            cell_char: DEFAULT_CELL_CHAR,
            rand_prob: MAX_RAND_PROB,
            size: GridSize::default(),
        }
    }
}

impl From<Cli> for Settings {
    fn from(cli: Cli) -> Self {
        let load_on_start = cli.filename.is_some();
        Self {
            filename: cli
                .filename
                .unwrap_or_else(|| PathBuf::from(DEFAULT_FILENAME)),
            load_on_start,
            cell_char: cli.character,
            rand_prob: cli
                .rand_prob
                .as_deref()
                .map_or(MAX_RAND_PROB, sanitize_rand_prob),
            size: GridSize::new(cli.rows, cli.cols),
        }
    }
}

/// Falls back on unusable input and caps the density at [`MAX_RAND_PROB`].
pub fn sanitize_rand_prob(raw: &str) -> f64 {
    let prob = match raw.trim().parse::<f64>() {
        Ok(p) if p.is_finite() && p > 0.0 => p,
        _ => {
            tracing::warn!(value = raw, fallback = FALLBACK_RAND_PROB, "unusable random probability");
            return FALLBACK_RAND_PROB;
        }
    };

    if prob > MAX_RAND_PROB {
        tracing::warn!(
            requested = prob,
            max = MAX_RAND_PROB,
            "random probability too high, taking the max"
        );
        return MAX_RAND_PROB;
    }
    prob
}

/// What `main` should do after looking at the command line.
#[derive(Debug)]
pub enum Startup {
    Run(Settings),
    Exit(String),
}

/// Parses the arguments. Help and every parse error end the program with
/// status 0 and a message instead of starting a session.
pub fn parse_args<I, T>(args: I) -> Startup
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => Startup::Run(cli.into()),
        Err(e) => match e.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                Startup::Exit(e.render().to_string())
            }
            _ => Startup::Exit("Stop it, get some --help".to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(args: &[&str]) -> Settings {
        match parse_args(std::iter::once("cgol").chain(args.iter().copied())) {
            Startup::Run(settings) => settings,
            Startup::Exit(msg) => panic!("unexpected exit: {msg}"),
        }
    }

    #[test]
    fn test_defaults() {
        let settings = run(&[]);
        assert_eq!(settings.filename, PathBuf::from("pattern.txt"));
        assert!(!settings.load_on_start);
        assert_eq!(settings.cell_char, 'O');
        assert_eq!(settings.rand_prob, 0.1);
        assert_eq!(settings.size, GridSize::new(50, 50));
    }

    #[test]
    fn test_explicit_file_loads_on_start() {
        let settings = run(&["-f", "glider.txt", "-c", "#", "--rows", "12", "--cols", "30"]);
        assert_eq!(settings.filename, PathBuf::from("glider.txt"));
        assert!(settings.load_on_start);
        assert_eq!(settings.cell_char, '#');
        assert_eq!(settings.size, GridSize::new(12, 30));

        let settings = run(&["--filename", "other.txt"]);
        assert!(settings.load_on_start);
    }

    #[test]
    fn test_rand_prob_sanitizing() {
        assert_eq!(sanitize_rand_prob("0.05"), 0.05);
        assert_eq!(sanitize_rand_prob("0.1"), 0.1);
        assert_eq!(sanitize_rand_prob("0.5"), MAX_RAND_PROB);
        assert_eq!(sanitize_rand_prob("0"), FALLBACK_RAND_PROB);
        assert_eq!(sanitize_rand_prob("abc"), FALLBACK_RAND_PROB);
        assert_eq!(sanitize_rand_prob("-0.2"), FALLBACK_RAND_PROB);
        assert_eq!(sanitize_rand_prob("NaN"), FALLBACK_RAND_PROB);

        assert_eq!(run(&["-p", "7"]).rand_prob, MAX_RAND_PROB);
        assert_eq!(run(&["--rand-prob", "0.02"]).rand_prob, 0.02);
    }

    #[test]
    fn test_help_and_unknown_flags_exit() {
        match parse_args(["cgol", "--help"]) {
            Startup::Exit(msg) => assert!(msg.contains("Game of Life")),
            Startup::Run(_) => panic!("help should not start a session"),
        }
        match parse_args(["cgol", "--bogus"]) {
            Startup::Exit(msg) => assert_eq!(msg, "Stop it, get some --help"),
            Startup::Run(_) => panic!("unknown flag should not start a session"),
        }
        assert!(matches!(parse_args(["cgol", "--rows", "0"]), Startup::Exit(_)));
    }
}
