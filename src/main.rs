#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use buildplan::app::BuildPlanApp;
use buildplan::config::{Settings, BACKEND_ENV};
use buildplan::logging;
use buildplan::model::Schedule;
use buildplan::store::{open_store, MemoryStore, TaskStore};

fn main() -> eframe::Result<()> {
    let settings_path = Settings::default_path();
    let mut problems = Vec::new();
    let settings = Settings::load_from(&settings_path).unwrap_or_else(|e| {
        problems.push(e);
        Settings::default()
    });
    let backend_override = std::env::var(BACKEND_ENV).ok();
    let settings = match settings.clone().with_env_override(backend_override.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            problems.push(e);
            settings
        }
    };

    logging::init(&settings.log_filter);
    for problem in &problems {
        tracing::warn!(error = %problem, "ignoring bad setting");
    }

    let store: Box<dyn TaskStore> = open_store(&settings).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "could not open schedule, using an in-memory copy of the demo data");
        Box::new(MemoryStore::new(Schedule::sample()))
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([800.0, 400.0])
            .with_title("BuildPlan"),
        ..Default::default()
    };

    eframe::run_native(
        "BuildPlan",
        options,
        Box::new(move |cc| Ok(Box::new(BuildPlanApp::new(cc, store, settings, settings_path)))),
    )
}
