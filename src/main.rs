mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use anyhow::{Context, Result, anyhow};
use app::{DASHBOARD_TITLE, LaunchDashboardApp};
use clap::Parser;
use eframe::egui;

use config::Args;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let state = startup_state(&args)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([600.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        DASHBOARD_TITLE,
        options,
        Box::new(|_cc| Ok(Box::new(LaunchDashboardApp::new(state)))),
    )
    .map_err(|e| anyhow!("running dashboard window: {e}"))
}

/// Validate the flags and load the dataset. A bad file is fatal: the error
/// chain is returned to `main`, which prints it once and exits non-zero.
fn startup_state(args: &Args) -> Result<AppState> {
    let slider = args.slider().context("invalid slider configuration")?;
    let dataset = data::loader::load_file(&args.data)?;
    log::info!(
        "Loaded {} launches from {} (sites: {:?}, payload bounds: {:?})",
        dataset.len(),
        args.data.display(),
        dataset.sites,
        dataset.payload_bounds
    );

    if dataset.is_empty() {
        log::warn!("{} contains no launches", args.data.display());
    }

    let mut state = AppState::new(slider, args.initial_site());
    state.set_dataset(dataset);
    Ok(state)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn missing_data_file_is_fatal() {
        let args = Args::parse_from(["launch-dashboard", "--data", "/nonexistent/launches.csv"]);
        let err = startup_state(&args).err().unwrap();
        assert!(format!("{err:#}").contains("loading /nonexistent/launches.csv"));
    }

    #[test]
    fn bad_slider_is_reported_before_loading() {
        let args = Args::parse_from(["launch-dashboard", "--slider-step", "0"]);
        let err = startup_state(&args).err().unwrap();
        assert!(err.to_string().contains("invalid slider configuration"));
    }

    #[test]
    fn valid_file_builds_state() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(
            b"Launch Site,class,Payload Mass (kg),Booster Version Category\nA,1,600,FT\nB,0,9400,B4\n",
        )
        .unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let state = startup_state(&Args::parse_from(["launch-dashboard", "--data", path.as_str()])).unwrap();
        assert_eq!((state.payload_low, state.payload_high), (600.0, 9400.0));
        assert_eq!(state.visible_indices, vec![0, 1]);
    }
}
