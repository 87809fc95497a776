use std::path::PathBuf;
use std::time::Duration;

use uuid::Uuid;

use crate::config::{Settings, StoreBackend};
use crate::interaction::DragController;
use crate::layout::{build_rows, group_tasks};
use crate::model::dates::{date_range, format_date};
use crate::model::{Task, TimelineViewport};
use crate::store::{JsonFileStore, TaskStore};
use crate::ui;
use crate::ui::timeline::TimelineAction;

/// How often the store is asked about changes made by other processes.
const POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Main application state.
pub struct BuildPlanApp {
    pub store: Box<dyn TaskStore>,
    pub settings: Settings,
    settings_path: PathBuf,
    pub selected_project: Option<Uuid>,
    pub selected_task: Option<Uuid>,
    pub drag: DragController,
    pub status_message: String,
    pub show_about: bool,
}

impl BuildPlanApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        store: Box<dyn TaskStore>,
        settings: Settings,
        settings_path: PathBuf,
    ) -> Self {
        // Register Phosphor icon font as a fallback so icons render inline with text
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        Self::with_store(store, settings, settings_path)
    }

    /// State without a window, for the shell logic alone.
    pub fn with_store(store: Box<dyn TaskStore>, settings: Settings, settings_path: PathBuf) -> Self {
        let status_message = store.describe();
        let mut app = Self {
            store,
            settings,
            settings_path,
            selected_project: None,
            selected_task: None,
            drag: DragController::new(),
            status_message,
            show_about: false,
        };
        app.selected_project = app.initial_project();
        app
    }

    /// The project from the last run if it still exists, else the first one.
    fn initial_project(&self) -> Option<Uuid> {
        let schedule = self.store.schedule();
        self.settings
            .last_project
            .filter(|id| schedule.project(*id).is_some())
            .or_else(|| schedule.projects.first().map(|p| p.id))
    }

    pub fn select_project(&mut self, id: Uuid) {
        if self.selected_project == Some(id) {
            return;
        }
        self.drag.cancel_drag();
        self.selected_project = Some(id);
        self.selected_task = None;
        self.settings.last_project = Some(id);
        self.persist_settings();
        if let Some(project) = self.store.schedule().project(id) {
            self.status_message = format!("Showing '{}'", project.name);
        }
    }

    /// Write an accepted drag back to the store. On failure the store keeps
    /// its old record, so the bar is drawn at its old dates next frame.
    pub fn commit_task(&mut self, task: Task) {
        let (name, start, end) = (task.payload.name.clone(), task.start, task.end);
        match self.store.update_task(task) {
            Ok(()) => {
                self.status_message = format!(
                    "Updated '{}' ({} → {})",
                    name,
                    format_date(start),
                    format_date(end)
                );
            }
            Err(e) => {
                tracing::warn!(error = %e, task = %name, "could not save task, reverting");
                self.status_message = format!("Could not save '{name}': {e}");
            }
        }
    }

    pub fn delete_task(&mut self, id: Uuid) {
        if self.drag.dragged_task() == Some(id) {
            self.drag.cancel_drag();
        }
        match self.store.delete_task(id) {
            Ok(()) => {
                if self.selected_task == Some(id) {
                    self.selected_task = None;
                }
                self.status_message = "Task deleted".to_string();
            }
            Err(e) => {
                tracing::warn!(error = %e, task = %id, "could not delete task");
                self.status_message = format!("Could not delete task: {e}");
            }
        }
    }

    /// Pick up external edits to the schedule.
    pub fn poll_store(&mut self) {
        match self.store.poll_changes() {
            Ok(true) => {
                if self.selected_project.map_or(true, |id| self.store.schedule().project(id).is_none()) {
                    self.selected_project = self.initial_project();
                }
                if self.selected_task.is_some_and(|id| self.store.schedule().task(id).is_none()) {
                    self.selected_task = None;
                }
                self.status_message = "Schedule reloaded from disk".to_string();
            }
            Ok(false) => {}
            Err(e) => {
                tracing::warn!(error = %e, "could not reload schedule");
                self.status_message = format!("Could not reload schedule: {e}");
            }
        }
    }

    pub fn open_schedule_file(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("BuildPlan schedule", &["json"])
            .pick_file()
        else {
            return;
        };
        match JsonFileStore::open(&path) {
            Ok(store) => {
                self.drag.cancel_drag();
                self.status_message = store.describe();
                self.store = Box::new(store);
                self.settings.backend = StoreBackend::Json;
                self.settings.data_file = Some(path);
                self.selected_task = None;
                self.selected_project = self.initial_project();
                self.settings.last_project = self.selected_project;
                self.persist_settings();
            }
            Err(e) => {
                tracing::warn!(error = %e, "could not open schedule");
                self.status_message = format!("Error loading: {e}");
            }
        }
    }

    pub fn open_data_folder(&mut self) {
        let file = match &self.settings.data_file {
            Some(path) => Ok(path.clone()),
            None => JsonFileStore::default_path(),
        };
        let dir = file.map(|f| f.parent().map(PathBuf::from).unwrap_or(f));
        match dir {
            Ok(dir) => {
                if let Err(e) = open::that(&dir) {
                    tracing::warn!(error = %e, dir = %dir.display(), "could not open data folder");
                    self.status_message = format!("Could not open {}: {e}", dir.display());
                }
            }
            Err(e) => self.status_message = e.to_string(),
        }
    }

    fn persist_settings(&mut self) {
        if let Err(e) = self.settings.save_to(&self.settings_path) {
            tracing::warn!(error = %e, "could not save settings");
        }
    }

    /// Apply what the timeline reported this frame.
    pub fn handle_timeline_action(&mut self, action: TimelineAction) {
        match action {
            TimelineAction::Commit(task) => {
                self.selected_task = Some(task.id);
                self.commit_task(task);
            }
            TimelineAction::Clicked(id) => self.selected_task = Some(id),
            TimelineAction::Delete(id) => self.delete_task(id),
            TimelineAction::None => {}
        }
    }

    fn show_timeline_panel(&mut self, ui: &mut egui::Ui) -> TimelineAction {
        let schedule = self.store.schedule();
        let Some(project) = self.selected_project.and_then(|id| schedule.project(id)) else {
            ui.centered_and_justified(|ui| {
                ui.label(egui::RichText::new("No project selected").color(ui::theme::TEXT_DIM));
            });
            return TimelineAction::None;
        };

        let subcontractors = schedule.subcontractors_for(project.id);
        let keys: Vec<Uuid> = subcontractors.iter().map(|s| s.id).collect();
        let tasks = schedule.tasks_for(project.id);
        let viewport = TimelineViewport::new(date_range(project.planned_start, &tasks));
        let rows = build_rows(group_tasks(&keys, &tasks));

        ui::timeline::show_timeline(
            ui,
            &subcontractors,
            &rows,
            &viewport,
            &mut self.drag,
            self.selected_task,
        )
    }
}

impl eframe::App for BuildPlanApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ui::theme::apply_theme(ctx);

        if !self.drag.is_dragging() {
            self.poll_store();
        }
        ctx.request_repaint_after(POLL_INTERVAL);

        // Top panel: toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        // Bottom panel: status bar
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(ui::theme::STATUS_BAR_HEIGHT)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_HEADER)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .font(ui::theme::font_sub())
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let count = self
                            .selected_project
                            .map_or(0, |id| self.store.schedule().tasks_for(id).len());
                        ui.label(
                            egui::RichText::new(format!("Tasks: {count}"))
                                .size(10.5)
                                .color(ui::theme::TEXT_DIM),
                        );
                    });
                });
            });

        // Right panel: details of the clicked task
        let mut details_delete = None;
        let mut close_details = false;
        if let Some(task) = self.selected_task.and_then(|id| self.store.schedule().task(id)) {
            let schedule = self.store.schedule();
            let sub = schedule.subcontractors.iter().find(|s| s.id == task.group);
            egui::SidePanel::right("task_details")
                .default_width(260.0)
                .resizable(true)
                .frame(
                    egui::Frame::default()
                        .fill(ui::theme::BG_PANEL)
                        .inner_margin(egui::Margin::same(10.0))
                        .stroke(egui::Stroke::new(1.0, ui::theme::BORDER_SUBTLE)),
                )
                .show(ctx, |ui| {
                    ui.horizontal(|ui| {
                        ui.label(egui::RichText::new("Task").color(ui::theme::TEXT_DIM));
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.small_button(egui_phosphor::regular::X).clicked() {
                                close_details = true;
                            }
                        });
                    });
                    details_delete = ui::dialogs::show_task_details(ui, task, sub);
                });
        }
        if close_details {
            self.selected_task = None;
        }
        if let Some(id) = details_delete {
            self.delete_task(id);
        }

        // Central panel: timeline
        let chart_frame = egui::Frame::default()
            .fill(ui::theme::BG_DARK)
            .inner_margin(egui::Margin::ZERO);
        let action = egui::CentralPanel::default()
            .frame(chart_frame)
            .show(ctx, |ui| self.show_timeline_panel(ui))
            .inner;
        self.handle_timeline_action(action);

        if self.show_about {
            ui::dialogs::show_about_dialog(self, ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::dates::add_days;
    use crate::model::Schedule;
    use crate::store::{MemoryStore, StoreError};

    fn scratch_settings() -> PathBuf {
        std::env::temp_dir()
            .join(format!("buildplan-app-{}", Uuid::new_v4()))
            .join("settings.json")
    }

    fn app_with(store: Box<dyn TaskStore>) -> BuildPlanApp {
        BuildPlanApp::with_store(store, Settings::default(), scratch_settings())
    }

    /// Refuses every write.
    struct ReadOnlyStore(Schedule);

    impl TaskStore for ReadOnlyStore {
        fn schedule(&self) -> &Schedule {
            &self.0
        }
        fn create_task(&mut self, task: Task) -> Result<Uuid, StoreError> {
            Err(StoreError::NotFound(task.id))
        }
        fn update_task(&mut self, task: Task) -> Result<(), StoreError> {
            Err(StoreError::NotFound(task.id))
        }
        fn delete_task(&mut self, id: Uuid) -> Result<(), StoreError> {
            Err(StoreError::NotFound(id))
        }
        fn describe(&self) -> String {
            "read-only".into()
        }
    }

    #[test]
    fn starts_on_first_project() {
        let app = app_with(Box::new(MemoryStore::new(Schedule::sample())));
        let first = app.store.schedule().projects[0].id;
        assert_eq!(app.selected_project, Some(first));
    }

    #[test]
    fn remembers_last_project() {
        let schedule = Schedule::sample();
        let second = schedule.projects[1].id;
        let settings = Settings {
            last_project: Some(second),
            ..Settings::default()
        };
        let app = BuildPlanApp::with_store(
            Box::new(MemoryStore::new(schedule)),
            settings,
            scratch_settings(),
        );
        assert_eq!(app.selected_project, Some(second));
    }

    #[test]
    fn commit_reaches_the_store() {
        let mut app = app_with(Box::new(MemoryStore::new(Schedule::sample())));
        let task = app.store.schedule().tasks[0].clone();
        let moved = task.with_span(add_days(task.start, 3), add_days(task.end, 3));

        app.handle_timeline_action(TimelineAction::Commit(moved.clone()));
        assert_eq!(app.store.schedule().task(task.id), Some(&moved));
        assert_eq!(app.selected_task, Some(task.id));
        assert!(app.status_message.starts_with("Updated"));
    }

    #[test]
    fn failed_commit_keeps_old_dates() {
        let schedule = Schedule::sample();
        let task = schedule.tasks[0].clone();
        let mut app = app_with(Box::new(ReadOnlyStore(schedule)));

        app.commit_task(task.with_span(add_days(task.start, 1), add_days(task.end, 1)));
        assert_eq!(app.store.schedule().task(task.id), Some(&task));
        assert!(app.status_message.starts_with("Could not save"));
    }

    #[test]
    fn delete_clears_selection() {
        let mut app = app_with(Box::new(MemoryStore::new(Schedule::sample())));
        let id = app.store.schedule().tasks[1].id;
        app.handle_timeline_action(TimelineAction::Clicked(id));
        assert_eq!(app.selected_task, Some(id));

        app.handle_timeline_action(TimelineAction::Delete(id));
        assert_eq!(app.selected_task, None);
        assert!(app.store.schedule().task(id).is_none());
    }
}
