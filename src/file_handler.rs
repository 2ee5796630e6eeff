use eframe::egui;

use crate::background::BackgroundImage;
use crate::error::ImageLoadError;

/// Turns image files dropped onto the window into background images.
#[derive(Debug, Default)]
pub struct FileHandler;

impl FileHandler {
    pub fn new() -> Self {
        Self
    }

    /// Loads the first dropped image file of this frame, if any.
    pub fn take_dropped_image(
        &self,
        ctx: &egui::Context,
    ) -> Option<Result<BackgroundImage, ImageLoadError>> {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        let file = dropped.into_iter().find(is_image_file)?;

        let file_name = if let Some(path) = &file.path {
            path.display().to_string()
        } else if !file.name.is_empty() {
            file.name.clone()
        } else {
            "unknown".to_owned()
        };

        let result =
            read_bytes(&file).and_then(|bytes| BackgroundImage::load(ctx, &file_name, &bytes));
        match &result {
            Ok(_) => {
                log::info!("Loaded background image {}", file_name);
                ctx.request_repaint();
            }
            Err(err) => log::warn!("Could not load {}: {}", file_name, err),
        }
        Some(result)
    }

    /// Preview files being dragged over the application
    pub fn preview_files_being_dropped(&self, ctx: &egui::Context) {
        use egui::{Align2, Color32, FontId, Id, LayerId, Order};

        if ctx.input(|i| i.raw.hovered_files.is_empty()) {
            return;
        }

        let painter =
            ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("file_drop_target")));
        let screen_rect = ctx.screen_rect();
        painter.rect_filled(screen_rect, 0.0, Color32::from_black_alpha(192));
        painter.text(
            screen_rect.center(),
            Align2::CENTER_CENTER,
            "Drop an image to measure it",
            FontId::proportional(24.0),
            Color32::WHITE,
        );
    }
}

/// Check if a file is an image based on MIME type or extension
fn is_image_file(file: &egui::DroppedFile) -> bool {
    if !file.mime.is_empty() {
        return file.mime.starts_with("image/");
    }
    let name = file
        .path
        .as_ref()
        .and_then(|path| path.extension())
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .or_else(|| {
            file.name
                .rsplit_once('.')
                .map(|(_, ext)| ext.to_lowercase())
        });
    matches!(
        name.as_deref(),
        Some("png" | "jpg" | "jpeg" | "gif" | "webp" | "bmp" | "tif" | "tiff")
    )
}

fn read_bytes(file: &egui::DroppedFile) -> Result<Vec<u8>, ImageLoadError> {
    if let Some(bytes) = &file.bytes {
        return Ok(bytes.to_vec());
    }
    match &file.path {
        Some(path) => Ok(std::fs::read(path)?),
        None => Err(ImageLoadError::Empty),
    }
}
