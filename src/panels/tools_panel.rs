use crate::MeasureApp;
use crate::tools::ToolMode;

pub fn tools_panel(app: &mut MeasureApp, ctx: &egui::Context) {
    egui::TopBottomPanel::top("tools_panel").show(ctx, |ui| {
        ui.horizontal(|ui| {
            let current = app.session.tool_mode();
            for mode in ToolMode::ALL {
                if ui.selectable_label(current == mode, mode.name()).clicked() {
                    log::info!("Tool selected from UI: {}", mode);
                    app.session.set_tool_mode(mode);
                }
            }

            ui.separator();

            let mut snap = app.session.config().snap_to_angle;
            if ui
                .checkbox(&mut snap, "Snap to angle")
                .on_hover_text("Snap lines to multiples of 45° when close")
                .changed()
            {
                app.session.set_snap_to_angle(snap);
            }

            let mut show_deltas = app.session.config().show_deltas;
            if ui.checkbox(&mut show_deltas, "Show dx/dy").changed() {
                app.session.set_show_deltas(show_deltas);
                app.mark_table_dirty();
            }

            let mut show_angles = app.session.config().show_angles;
            if ui.checkbox(&mut show_angles, "Show angles").changed() {
                app.session.set_show_angles(show_angles);
            }

            let mut show_loupe = app.session.config().show_loupe;
            if ui
                .checkbox(&mut show_loupe, "Loupe")
                .on_hover_text("Magnify the pixels under the pointer")
                .changed()
            {
                app.session.set_show_loupe(show_loupe);
                if !show_loupe {
                    app.loupe = None;
                }
            }

            ui.separator();

            let scale = app.measurement_table().scale_text();
            ui.label(scale);

            if let Some(background) = &app.background {
                ui.separator();
                ui.weak(background.name());
            }
        });

        if let Some(error) = &app.load_error {
            ui.colored_label(ui.visuals().error_fg_color, error);
        }
    });
}
