use egui::{Align2, Key};

use crate::MeasureApp;
use crate::export::UNIT;

pub fn calibration_prompt(app: &mut MeasureApp, ctx: &egui::Context) {
    let Some(prompt) = app.calibration.as_mut() else {
        return;
    };

    let mut answer = None;
    egui::Window::new("Calibrate scale")
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(format!("Length of selected line ({UNIT})?"));
            let edit = ui.text_edit_singleline(&mut prompt.input);
            if !prompt.focused {
                edit.request_focus();
                prompt.focused = true;
            }
            if edit.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter)) {
                answer = Some(true);
            }
            ui.horizontal(|ui| {
                if ui.button("OK").clicked() {
                    answer = Some(true);
                }
                if ui.button("Cancel").clicked() {
                    answer = Some(false);
                }
            });
        });

    if ctx.input(|i| i.key_pressed(Key::Escape)) {
        answer = Some(false);
    }

    match answer {
        Some(true) => app.confirm_calibration(),
        Some(false) => app.cancel_calibration(),
        None => {}
    }
}
