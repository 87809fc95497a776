use egui::{menu, RichText, Ui};

use crate::app::BuildPlanApp;

/// Render the top menu bar and the project picker.
pub fn show_toolbar(app: &mut BuildPlanApp, ui: &mut Ui) {
    menu::bar(ui, |ui| {
        ui.menu_button("  File  ", |ui| {
            if ui.button("  Open Schedule...").clicked() {
                app.open_schedule_file();
                ui.close_menu();
            }
            if ui.button("  Reload From Disk").clicked() {
                app.poll_store();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Open Data Folder").clicked() {
                app.open_data_folder();
                ui.close_menu();
            }
        });

        ui.menu_button("  Help  ", |ui| {
            if ui.button("About").clicked() {
                app.show_about = true;
                ui.close_menu();
            }
        });

        ui.separator();

        let projects: Vec<(uuid::Uuid, String)> = app
            .store
            .schedule()
            .projects
            .iter()
            .map(|p| (p.id, p.name.clone()))
            .collect();
        let current = app
            .selected_project
            .and_then(|id| projects.iter().find(|(pid, _)| *pid == id))
            .map_or_else(|| "No project".to_string(), |(_, name)| name.clone());

        let mut picked = None;
        egui::ComboBox::from_id_salt("project_picker")
            .selected_text(current)
            .width(260.0)
            .show_ui(ui, |ui| {
                for (id, name) in &projects {
                    if ui
                        .selectable_label(app.selected_project == Some(*id), name)
                        .clicked()
                    {
                        picked = Some(*id);
                    }
                }
            });
        if let Some(id) = picked {
            app.select_project(id);
        }

        // Right-aligned project address
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if let Some(project) = app
                .selected_project
                .and_then(|id| app.store.schedule().project(id))
            {
                ui.label(RichText::new(&project.address).size(11.0).weak());
            }
        });
    });
}
