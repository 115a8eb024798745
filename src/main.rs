use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use eframe::egui;

use nba_dashboard::app::NbaDashboardApp;
use nba_dashboard::config::{Config, HEAD_ROWS};
use nba_dashboard::data::{Dashboard, summary};

fn main() -> Result<()> {
    env_logger::init();

    let cfg = Config::from_env();
    let dashboard = match load_dashboard(&cfg) {
        Ok(d) => d,
        Err(e) => {
            log::error!("Failed to load dataset: {e:#}");
            return Err(e);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "NBA 2013 – Players & Teams",
        options,
        Box::new(|_cc| Ok(Box::new(NbaDashboardApp::new(dashboard)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}

/// One-time startup load. Nothing is shown until the whole season has been
/// read and validated.
fn load_dashboard(cfg: &Config) -> Result<Dashboard> {
    let path = resolve_data_path(cfg)?;
    let dashboard = Dashboard::load(&path)
        .with_context(|| format!("loading {}", path.display()))?;

    let ds = &dashboard.dataset;
    log::info!(
        "Loaded {} players, {} columns ({} numeric) from {}",
        ds.len(),
        ds.column_names.len(),
        ds.numeric_columns.len(),
        path.display()
    );

    if cfg.debug {
        for p in summary::head(ds, HEAD_ROWS) {
            log::info!("{:<24} {:<3} {:>3} {}", p.player, p.position, p.age, p.team);
        }
        log::info!("Numerical variables  : {}", ds.numeric_columns.join(","));
        log::info!("Categorical variables: {}", ds.categorical_columns.join(","));
    }

    Ok(dashboard)
}

/// The configured path, or a file picked by the user when it does not exist.
fn resolve_data_path(cfg: &Config) -> Result<PathBuf> {
    if cfg.data_path.exists() {
        return Ok(cfg.data_path.clone());
    }
    log::warn!("{} not found, asking for a season file", cfg.data_path.display());

    let picked = rfd::FileDialog::new()
        .set_title("Open NBA season data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    match picked {
        Some(path) => Ok(path),
        None => bail!("no dataset: {} does not exist", cfg.data_path.display()),
    }
}
