//! Binary entry point: read the configuration, start file logging, build the
//! initial store and drive the Ratatui event loop until the user exits.
use events_manager::logging::init_logging;
use events_manager::{run_app, App, AppConfig};
use log::info;

fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env();

    // Logging is best effort; the TUI runs without it.
    let _logger = match &config.log_dir {
        Some(dir) => match init_logging(&config.log_level, dir) {
            Ok(handle) => Some(handle),
            Err(err) => {
                eprintln!("warning: logging disabled: {err:#}");
                None
            }
        },
        None => None,
    };

    info!(
        "event=app_start seed_demo_data={} platform={}",
        config.seed_demo_data,
        std::env::consts::OS
    );

    let mut app = App::new(config.build_store());
    run_app(&mut app)
}
