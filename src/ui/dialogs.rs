use egui::{Context, RichText, Window};
use uuid::Uuid;

use crate::app::BuildPlanApp;
use crate::model::dates::format_date;
use crate::model::{Subcontractor, Task};
use crate::ui::theme;

/// Render the "About" dialog.
pub fn show_about_dialog(app: &mut BuildPlanApp, ctx: &Context) {
    let mut should_close = false;
    Window::new("About")
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([300.0, 170.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(12.0);
                ui.heading(RichText::new("BuildPlan").strong());
                ui.add_space(2.0);
                ui.label(
                    RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION")))
                        .color(theme::TEXT_SECONDARY),
                );
                ui.add_space(10.0);
                ui.label("Construction schedules by subcontractor,");
                ui.label("built with Rust and egui.");
                ui.add_space(14.0);
                if ui.add_sized([100.0, 28.0], egui::Button::new("Close")).clicked() {
                    should_close = true;
                }
            });
        });
    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_about = false;
    }
}

/// Read-only details of the clicked task. Returns an id when the user asks
/// to delete it.
pub fn show_task_details(
    ui: &mut egui::Ui,
    task: &Task,
    subcontractor: Option<&Subcontractor>,
) -> Option<Uuid> {
    let mut delete = None;
    ui.add_space(6.0);
    ui.label(
        RichText::new(&task.payload.name)
            .font(theme::font_row_title())
            .strong(),
    );
    if let Some(sub) = subcontractor {
        ui.horizontal(|ui| {
            let (dot, _) = ui.allocate_exact_size(egui::vec2(10.0, 10.0), egui::Sense::hover());
            ui.painter().circle_filled(dot.center(), 5.0, sub.color);
            ui.label(RichText::new(&sub.name).color(theme::TEXT_SECONDARY));
        });
    }
    ui.separator();

    egui::Grid::new("task_details")
        .num_columns(2)
        .spacing([12.0, 6.0])
        .show(ui, |ui| {
            ui.label(RichText::new("Start").color(theme::TEXT_DIM));
            ui.label(format_date(task.start));
            ui.end_row();

            ui.label(RichText::new("End").color(theme::TEXT_DIM));
            ui.label(format_date(task.end));
            ui.end_row();

            ui.label(RichText::new("Duration").color(theme::TEXT_DIM));
            let days = task.duration_days();
            ui.label(format!("{days} day{}", if days == 1 { "" } else { "s" }));
            ui.end_row();

            ui.label(RichText::new("Status").color(theme::TEXT_DIM));
            ui.label(task.payload.status.label());
            ui.end_row();

            ui.label(RichText::new("Cost").color(theme::TEXT_DIM));
            ui.label(format!("${:.2}", task.payload.estimated_cost));
            ui.end_row();
        });

    if !task.payload.description.is_empty() {
        ui.add_space(6.0);
        ui.label(RichText::new(&task.payload.description).color(theme::TEXT_SECONDARY));
    }

    ui.add_space(10.0);
    let button = egui::Button::new(
        RichText::new(format!("{} Delete task", egui_phosphor::regular::TRASH))
            .color(theme::DELETE_FG),
    );
    if ui.add(button).clicked() {
        delete = Some(task.id);
    }
    delete
}
