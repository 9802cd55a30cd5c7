mod annotation;
mod config;
mod constants;
mod editor;
mod export;
mod paths;
mod picker;
pub mod theme;
mod ui;

use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use constants::{DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH};

/// Name of the log file inside the logs directory
#[cfg(debug_assertions)]
const LOG_FILE: &str = "inkmark.log";

/// Marks where one run ends and the next begins in the shared log file
#[cfg(debug_assertions)]
fn write_session_banner(log_path: &std::path::Path) {
    use std::io::Write;

    let Ok(mut file) = std::fs::OpenOptions::new().append(true).open(log_path) else {
        return;
    };
    let rule = "=".repeat(80);
    let started = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
    let _ = writeln!(file, "\n\n{rule}\n=== Inkmark session {started} ===\n{rule}\n");
}

/// Debug builds log to stdout and to `logs/inkmark.log`.
///
/// `RUST_LOG` overrides the default filter. The returned guard flushes the
/// file writer when dropped.
#[cfg(debug_assertions)]
fn setup_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::{fmt, EnvFilter};

    let logs_dir = paths::logs_dir();
    if let Err(e) = std::fs::create_dir_all(&logs_dir) {
        eprintln!("Cannot create {}: {}", logs_dir.display(), e);
        return None;
    }
    write_session_banner(&logs_dir.join(LOG_FILE));

    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(&logs_dir, LOG_FILE));

    // Plain text in the file, colors on the terminal
    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true);
    let stdout_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_ansi(true)
        .with_target(true);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,inkmark=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stdout_layer)
        .init();

    Some(guard)
}

#[cfg(not(debug_assertions))]
fn setup_logging() -> Option<()> {
    None
}

fn main() {
    let _log_guard = setup_logging();
    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Inkmark".into(),
                        resolution: (DEFAULT_WINDOW_WIDTH as u32, DEFAULT_WINDOW_HEIGHT as u32)
                            .into(),
                        ..default()
                    }),
                    ..default()
                }),
        )
        .add_plugins(EguiPlugin::default())
        .add_plugins(config::ConfigPlugin)
        .add_plugins(editor::EditorPlugin)
        .add_plugins(picker::PickerPlugin)
        .add_plugins(export::ExportPlugin)
        .add_plugins(ui::UiPlugin)
        .run();
}
