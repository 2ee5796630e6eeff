use egui::{Pos2, Rect, Vec2};

/// How many screen pixels one image pixel covers inside the loupe.
pub const LOUPE_MAGNIFICATION: f32 = 7.0;

/// Image pixels along one side of the loupe. Odd, so the pointer pixel sits in the middle.
pub const LOUPE_PIXELS: f32 = 21.0;

/// Side of the loupe on screen.
pub const LOUPE_SIZE: f32 = LOUPE_PIXELS * LOUPE_MAGNIFICATION;

/// Seconds the loupe stays fully visible after the pointer stopped.
pub const LOUPE_HOLD: f64 = 1.0;

/// Seconds the loupe takes to fade out after the hold.
pub const LOUPE_FADE: f64 = 0.5;

/// Magnified view of the pixels around the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Loupe {
    /// Pointer position in image pixels.
    pub center: Pos2,
    /// Input time of the last pointer move, in seconds.
    pub last_moved: f64,
}

impl Loupe {
    pub fn new(center: Pos2, now: f64) -> Self {
        Self {
            center,
            last_moved: now,
        }
    }

    pub fn follow(&mut self, center: Pos2, now: f64) {
        self.center = center;
        self.last_moved = now;
    }

    /// `1.0` while the pointer moves or just rested, then linearly down to `0.0`.
    pub fn opacity(&self, now: f64) -> f32 {
        let idle = now - self.last_moved;
        if idle <= LOUPE_HOLD {
            return 1.0;
        }
        (1.0 - (idle - LOUPE_HOLD) / LOUPE_FADE).clamp(0.0, 1.0) as f32
    }

    pub fn is_visible(&self, now: f64) -> bool {
        self.opacity(now) > 0.0
    }

    /// Image-space square shown in the loupe, aligned to the pixel grid.
    pub fn source_rect(&self) -> Rect {
        let pixel = Pos2::new(self.center.x.floor() + 0.5, self.center.y.floor() + 0.5);
        Rect::from_center_size(pixel, Vec2::splat(LOUPE_PIXELS))
    }
}

/// Maps an image-space rect to texture coordinates of an image of `image_size` pixels.
pub fn uv_rect(source: Rect, image_size: Vec2) -> Rect {
    if image_size.x <= 0.0 || image_size.y <= 0.0 {
        return Rect::ZERO;
    }
    Rect::from_min_max(
        (source.min.to_vec2() / image_size).to_pos2(),
        (source.max.to_vec2() / image_size).to_pos2(),
    )
}

/// Screen rect of the loupe in the top right corner of `visible`.
pub fn loupe_rect(visible: Rect, margin: f32) -> Rect {
    Rect::from_min_size(
        Pos2::new(visible.right() - margin - LOUPE_SIZE, visible.top() + margin),
        Vec2::splat(LOUPE_SIZE),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};

    #[test]
    fn test_opacity_holds_then_fades() {
        let loupe = Loupe::new(pos2(10.0, 10.0), 2.0);
        assert_eq!(loupe.opacity(2.0), 1.0);
        assert_eq!(loupe.opacity(3.0), 1.0);
        assert!((loupe.opacity(3.25) - 0.5).abs() < 1e-6);
        assert_eq!(loupe.opacity(3.5), 0.0);
        assert_eq!(loupe.opacity(10.0), 0.0);
        assert!(!loupe.is_visible(3.5));
    }

    #[test]
    fn test_follow_restarts_hold() {
        let mut loupe = Loupe::new(pos2(0.0, 0.0), 0.0);
        assert!(!loupe.is_visible(5.0));
        loupe.follow(pos2(3.0, 4.0), 5.0);
        assert_eq!(loupe.center, pos2(3.0, 4.0));
        assert_eq!(loupe.opacity(5.5), 1.0);
    }

    #[test]
    fn test_source_rect_is_pixel_aligned() {
        let loupe = Loupe::new(pos2(40.7, 12.2), 0.0);
        let source = loupe.source_rect();
        assert_eq!(source.min, pos2(30.0, 2.0));
        assert_eq!(source.max, pos2(51.0, 23.0));
        assert!(source.contains(loupe.center));
    }

    #[test]
    fn test_uv_rect() {
        let source = Rect::from_min_max(pos2(50.0, 25.0), pos2(100.0, 50.0));
        let uv = uv_rect(source, vec2(200.0, 100.0));
        assert_eq!(uv, Rect::from_min_max(pos2(0.25, 0.25), pos2(0.5, 0.5)));
        assert_eq!(uv_rect(source, Vec2::ZERO), Rect::ZERO);
    }

    #[test]
    fn test_loupe_rect_in_top_right_corner() {
        let visible = Rect::from_min_size(pos2(100.0, 50.0), vec2(800.0, 600.0));
        let rect = loupe_rect(visible, 8.0);
        assert_eq!(rect.right(), 892.0);
        assert_eq!(rect.top(), 58.0);
        assert_eq!(rect.width(), LOUPE_SIZE);
    }
}
