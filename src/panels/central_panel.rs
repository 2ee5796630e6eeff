use crate::MeasureApp;
use crate::input::InputEvent;
use crate::loupe::loupe_rect;

const LOUPE_MARGIN: f32 = 8.0;

pub fn central_panel(app: &mut MeasureApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let Some(image_size) = app.background.as_ref().map(|background| background.size()) else {
            ui.centered_and_justified(|ui| {
                ui.label("Drop an image here to start measuring");
            });
            return;
        };

        egui::ScrollArea::both().show(ui, |ui| {
            let (response, painter) = ui.allocate_painter(image_size, egui::Sense::click_and_drag());
            let canvas_rect = response.rect;
            app.input.set_canvas_rect(canvas_rect);

            if response.contains_pointer() {
                ctx.set_cursor_icon(app.session.tool_mode().cursor_icon());
            }

            let now = ctx.input(|i| i.time);

            // The prompt window owns the keyboard and pointer while it is open.
            if app.calibration.is_none() {
                for event in app.input.process_input(ctx) {
                    if let InputEvent::PointerMove { location } = &event {
                        app.follow_pointer(location.position, now);
                    }
                    // Parts of the image scrolled out of view may lie under other panels.
                    let is_press = matches!(
                        event,
                        InputEvent::PointerDown { .. } | InputEvent::DoubleClick { .. }
                    );
                    if is_press && !response.contains_pointer() {
                        continue;
                    }
                    if let Some(request) = app.session.handle_event(&event) {
                        app.open_calibration(request);
                        break;
                    }
                }
            }

            app.renderer
                .render(&painter, canvas_rect, app.background.as_ref(), &app.session);

            if let (Some(background), Some(loupe)) = (&app.background, &app.loupe) {
                let opacity = loupe.opacity(now);
                if opacity > 0.0 {
                    let visible = ui.clip_rect();
                    app.renderer.render_loupe(
                        &ui.painter().with_clip_rect(visible),
                        loupe_rect(visible, LOUPE_MARGIN),
                        background,
                        loupe,
                        opacity,
                    );
                    // Keep frames coming until the fade is over
                    ctx.request_repaint();
                }
            }
        });
    });
}
