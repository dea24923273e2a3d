// main.rs - Interactive Conway's Game of Life

use eframe::egui;

use cgol::config::{self, Startup};
use cgol::persist::FileStore;
use cgol::session::SessionController;
use cgol::ui::LifeApp;

// Pixels per cell used to size the initial window
const CELL_PX: f32 = 14.0;
const STATUS_PX: f32 = 48.0;

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

fn main() -> Result<(), eframe::Error> {
    init_tracing();

    let settings = match config::parse_args(std::env::args_os()) {
        Startup::Run(settings) => settings,
        Startup::Exit(message) => {
            println!("{message}");
            return Ok(());
        }
    };

    let store = Box::new(FileStore::new(settings.filename.clone()));
    let session = match SessionController::new(&settings, store) {
        Ok(session) => session,
        Err(e) => {
            tracing::error!(error = %e, "failed to start session");
            std::process::exit(1);
        }
    };

    let size = settings.size;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([
            (size.cols() as f32 * CELL_PX).clamp(320.0, 1600.0),
            (size.rows() as f32 * CELL_PX).clamp(240.0, 1000.0) + STATUS_PX,
        ]),
        ..Default::default()
    };

    tracing::info!(rows = size.rows(), cols = size.cols(), file = %settings.filename.display(), "starting");

    let app = LifeApp::new(session, settings.cell_char);
    eframe::run_native(
        "Conway's Game of Life",
        options,
        Box::new(move |_cc| Box::new(app)),
    )
}
