use std::cell::Cell;
use std::rc::Rc;

use crate::background::BackgroundImage;
use crate::calibration::CalibrationRequest;
use crate::config::SessionConfig;
use crate::event::EditorEvent;
use crate::export::MeasurementTable;
use crate::file_handler::FileHandler;
use crate::input::InputHandler;
use crate::loupe::Loupe;
use crate::panels::{calibration_prompt, central_panel, measurements_panel, tools_panel};
use crate::renderer::Renderer;
use crate::state::EditingSession;

/// An open "how long is this line?" window.
#[derive(Debug, Clone)]
pub struct CalibrationPrompt {
    pub request: CalibrationRequest,
    /// Text being edited, starting from the line's current length.
    pub input: String,
    pub(crate) focused: bool,
}

impl CalibrationPrompt {
    pub fn new(request: CalibrationRequest) -> Self {
        Self {
            input: request.current_text.clone(),
            request,
            focused: false,
        }
    }
}

pub struct MeasureApp {
    pub(crate) session: EditingSession,
    pub(crate) renderer: Renderer,
    pub(crate) input: InputHandler,
    pub(crate) file_handler: FileHandler,
    pub(crate) background: Option<BackgroundImage>,
    pub(crate) calibration: Option<CalibrationPrompt>,
    pub(crate) load_error: Option<String>,
    pub(crate) loupe: Option<Loupe>,
    table: Option<MeasurementTable>,
    table_dirty: Rc<Cell<bool>>,
}

impl Default for MeasureApp {
    fn default() -> Self {
        Self::with_config(SessionConfig::default())
    }
}

impl MeasureApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let config = cc
            .storage
            .and_then(|storage| eframe::get_value::<SessionConfig>(storage, eframe::APP_KEY))
            .filter(|config| match config.validate() {
                Ok(()) => true,
                Err(err) => {
                    log::warn!("Ignoring stored settings: {}", err);
                    false
                }
            })
            .unwrap_or_default();
        log::info!("Starting with {:?}", config);
        Self::with_config(config)
    }

    pub fn with_config(config: SessionConfig) -> Self {
        let session = EditingSession::new(config);
        let table_dirty = Rc::new(Cell::new(true));

        let dirty = Rc::clone(&table_dirty);
        session
            .event_bus()
            .subscribe(Box::new(move |event: &EditorEvent| {
                if event.changes_measurements() {
                    dirty.set(true);
                }
            }));

        Self {
            session,
            renderer: Renderer::new(),
            input: InputHandler::new(egui::Rect::NOTHING),
            file_handler: FileHandler::new(),
            background: None,
            calibration: None,
            load_error: None,
            loupe: None,
            table: None,
            table_dirty,
        }
    }

    pub fn session(&self) -> &EditingSession {
        &self.session
    }

    pub fn calibration(&self) -> Option<&CalibrationPrompt> {
        self.calibration.as_ref()
    }

    /// The measurement table, rebuilt only after the measurements changed.
    pub fn measurement_table(&mut self) -> &MeasurementTable {
        if self.table_dirty.replace(false) {
            log::debug!("Rebuilding measurement table");
            self.table = None;
        }
        let session = &self.session;
        self.table.get_or_insert_with(|| {
            MeasurementTable::collect(session.document(), session.config().show_deltas)
        })
    }

    pub fn mark_table_dirty(&self) {
        self.table_dirty.set(true);
    }

    /// Replaces the background image and starts a fresh document.
    pub fn set_background(&mut self, background: BackgroundImage) {
        self.calibration = None;
        self.loupe = None;
        self.session.reset_for_image();
        self.background = Some(background);
    }

    /// Moves the loupe to the pointer, restarting its fade.
    pub fn follow_pointer(&mut self, position: egui::Pos2, now: f64) {
        if !self.session.config().show_loupe {
            self.loupe = None;
            return;
        }
        match &mut self.loupe {
            Some(loupe) => loupe.follow(position, now),
            None => self.loupe = Some(Loupe::new(position, now)),
        }
    }

    pub(crate) fn open_calibration(&mut self, request: CalibrationRequest) {
        self.calibration = Some(CalibrationPrompt::new(request));
    }

    /// Applies the text in the open prompt and closes it.
    pub fn confirm_calibration(&mut self) {
        if let Some(prompt) = self.calibration.take() {
            self.session.apply_calibration(&prompt.request, &prompt.input);
        }
    }

    /// Closes the open prompt without touching the scale.
    pub fn cancel_calibration(&mut self) {
        if self.calibration.take().is_some() {
            self.session.cancel_calibration();
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        match self.file_handler.take_dropped_image(ctx) {
            Some(Ok(background)) => {
                self.load_error = None;
                self.set_background(background);
            }
            Some(Err(err)) => self.load_error = Some(err.to_string()),
            None => {}
        }
    }
}

impl eframe::App for MeasureApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self.session.config());
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_dropped_files(ctx);

        tools_panel(self, ctx);
        measurements_panel(self, ctx);
        central_panel(self, ctx);
        calibration_prompt(self, ctx);

        self.file_handler.preview_files_being_dropped(ctx);
    }
}
