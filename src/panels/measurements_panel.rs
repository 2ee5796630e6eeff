use egui::Color32;

use crate::MeasureApp;

const SCALE_ROW_COLOR: Color32 = Color32::from_rgb(0x7c, 0xff, 0xb2);

pub fn measurements_panel(app: &mut MeasureApp, ctx: &egui::Context) {
    egui::SidePanel::right("measurements_panel")
        .resizable(true)
        .default_width(260.0)
        .show(ctx, |ui| {
            ui.heading("Measurements");

            let table = app.measurement_table();
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(!table.is_empty(), egui::Button::new("Copy CSV"))
                    .clicked()
                {
                    ctx.copy_text(table.to_csv());
                    log::info!("Copied {} measurements as CSV", table.rows.len());
                }
            });
            ui.separator();

            egui::ScrollArea::vertical().show(ui, |ui| {
                if table.is_empty() {
                    for line in table.summary_lines() {
                        ui.weak(line);
                    }
                    return;
                }
                for row in &table.rows {
                    let text = row.text(table.show_deltas);
                    if row.is_scale {
                        ui.colored_label(SCALE_ROW_COLOR, text);
                    } else {
                        ui.label(text);
                    }
                }
            });
        });
}
