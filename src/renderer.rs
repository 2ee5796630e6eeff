use eframe::egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Stroke, Vec2, pos2};

use crate::background::BackgroundImage;
use crate::export::{PRECISION, UNIT, format_precision};
use crate::geometry::angle_deg;
use crate::line::Line;
use crate::loupe::{LOUPE_MAGNIFICATION, Loupe, uv_rect};
use crate::state::EditingSession;

/// Colours of one line: a thin foreground over a wide translucent halo.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub color: Color32,
    pub halo: Color32,
}

// Halo colours are premultiplied: yellow, green and cyan at 40%, 35% and 40% opacity.
pub const MEASURE_STYLE: LineStyle = LineStyle {
    color: Color32::from_rgb(0, 0, 255),
    halo: Color32::from_rgba_premultiplied(102, 102, 0, 102),
};

pub const SCALE_STYLE: LineStyle = LineStyle {
    color: Color32::from_rgb(0, 200, 83),
    halo: Color32::from_rgba_premultiplied(0, 70, 29, 89),
};

pub const HIGHLIGHT_STYLE: LineStyle = LineStyle {
    color: Color32::from_rgb(255, 0, 0),
    halo: Color32::from_rgba_premultiplied(0, 102, 102, 102),
};

/// Highlight wins over the scale colour.
pub fn line_style(is_scale: bool, highlighted: bool) -> LineStyle {
    if highlighted {
        HIGHLIGHT_STYLE
    } else if is_scale {
        SCALE_STYLE
    } else {
        MEASURE_STYLE
    }
}

/// Short bracket across the line at `at`, perpendicular to `direction`.
/// `None` for a zero-length line, which has no direction.
fn end_bracket(at: Pos2, direction: Vec2, half_len: f32) -> Option<[Pos2; 2]> {
    if direction.length_sq() == 0.0 {
        return None;
    }
    let normal = direction.normalized().rot90() * half_len;
    Some([at - normal, at + normal])
}

/// Angle of a line as it looks on screen (counter-clockwise, y up), e.g. `"45.0°"`.
/// `None` for a zero-length line.
pub fn angle_text(line: &Line) -> Option<String> {
    if line.length() == 0.0 {
        return None;
    }
    // Screen y points down; `0.0 -` also turns -0.0 into 0.0
    let mut degrees = 0.0 - angle_deg(line.p1, line.p2);
    if degrees <= -180.0 {
        degrees += 360.0;
    }
    Some(format!("{degrees:.1}°"))
}

/// Paints the background image and every line of a session onto the canvas.
#[derive(Debug, Clone)]
pub struct Renderer {
    line_width: f32,
    halo_width: f32,
    bracket_len: f32,
    label_font: FontId,
    angle_font: FontId,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            line_width: 1.0,
            halo_width: 7.0,
            bracket_len: 5.0,
            label_font: FontId::proportional(12.0),
            angle_font: FontId::proportional(10.0),
        }
    }

    /// Renders the current frame.
    ///
    /// `canvas_rect` is the screen rect of the image; line coordinates are image pixels
    /// relative to its top-left corner.
    pub fn render(
        &self,
        painter: &Painter,
        canvas_rect: Rect,
        background: Option<&BackgroundImage>,
        session: &EditingSession,
    ) {
        if let Some(background) = background {
            painter.image(
                background.texture_id(),
                canvas_rect,
                Rect::from_min_max(Pos2::ZERO, pos2(1.0, 1.0)),
                Color32::WHITE,
            );
        }

        let document = session.document();
        let highlighted = session.highlighted_line();
        let show_angles = session.config().show_angles;
        let to_screen = |p: Pos2| canvas_rect.min + p.to_vec2();

        // Halos first so no line is hidden under a neighbour's background.
        let lines: Vec<&Line> = document.lines().chain(document.edit_line()).collect();
        for line in &lines {
            let style = line_style(line.is_scale, highlighted == Some(line.id()));
            self.draw_halo(painter, line, style, to_screen);
        }
        for line in &lines {
            let style = line_style(line.is_scale, highlighted == Some(line.id()));
            self.draw_line(painter, line, style, to_screen);
            let length = document.calibrated_length(line);
            self.draw_label(painter, line, length, to_screen);
            if show_angles {
                self.draw_angle(painter, line, to_screen);
            }
        }
    }

    /// Draws `loupe` magnified into `target`, faded by `opacity`.
    pub fn render_loupe(
        &self,
        painter: &Painter,
        target: Rect,
        background: &BackgroundImage,
        loupe: &Loupe,
        opacity: f32,
    ) {
        let uv = uv_rect(loupe.source_rect(), background.size());
        painter.rect_filled(target, 0.0, Color32::BLACK.gamma_multiply(opacity));
        painter.image(
            background.texture_id(),
            target,
            uv,
            Color32::WHITE.gamma_multiply(opacity),
        );

        // Box around the pointer pixel with crosshair arms out to the border
        let stroke = Stroke::new(1.0, HIGHLIGHT_STYLE.color.gamma_multiply(opacity));
        let center = target.center();
        let pixel = Rect::from_center_size(center, Vec2::splat(LOUPE_MAGNIFICATION));
        painter.rect_stroke(pixel, 0.0, stroke);
        let arms = [
            [pos2(target.left(), center.y), pos2(pixel.left(), center.y)],
            [pos2(pixel.right(), center.y), pos2(target.right(), center.y)],
            [pos2(center.x, target.top()), pos2(center.x, pixel.top())],
            [pos2(center.x, pixel.bottom()), pos2(center.x, target.bottom())],
        ];
        for arm in arms {
            painter.line_segment(arm, stroke);
        }

        let border = Stroke::new(1.0, Color32::GRAY.gamma_multiply(opacity));
        painter.rect_stroke(target, 0.0, border);
    }

    fn draw_halo(
        &self,
        painter: &Painter,
        line: &Line,
        style: LineStyle,
        to_screen: impl Fn(Pos2) -> Pos2,
    ) {
        painter.line_segment(
            [to_screen(line.p1), to_screen(line.p2)],
            Stroke::new(self.halo_width, style.halo),
        );
    }

    fn draw_line(
        &self,
        painter: &Painter,
        line: &Line,
        style: LineStyle,
        to_screen: impl Fn(Pos2) -> Pos2,
    ) {
        let stroke = Stroke::new(self.line_width, style.color);
        let (p1, p2) = (to_screen(line.p1), to_screen(line.p2));
        painter.line_segment([p1, p2], stroke);

        let direction = p2 - p1;
        for at in [p1, p2] {
            if let Some(bracket) = end_bracket(at, direction, self.bracket_len) {
                painter.line_segment(bracket, stroke);
            }
        }
    }

    fn draw_label(
        &self,
        painter: &Painter,
        line: &Line,
        length: f32,
        to_screen: impl Fn(Pos2) -> Pos2,
    ) {
        if line.length() == 0.0 {
            return;
        }
        let text = format!("{} {UNIT}", format_precision(f64::from(length), PRECISION));
        let anchor = to_screen(line.midpoint()) + Vec2::new(self.bracket_len, -self.bracket_len);
        painter.text(
            anchor,
            Align2::LEFT_BOTTOM,
            text,
            self.label_font.clone(),
            Color32::BLACK,
        );
    }

    fn draw_angle(&self, painter: &Painter, line: &Line, to_screen: impl Fn(Pos2) -> Pos2) {
        let Some(text) = angle_text(line) else {
            return;
        };
        let anchor = to_screen(line.midpoint()) + Vec2::new(self.bracket_len, self.bracket_len);
        painter.text(
            anchor,
            Align2::LEFT_TOP,
            text,
            self.angle_font.clone(),
            Color32::DARK_GRAY,
        );
    }
}
