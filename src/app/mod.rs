mod state;
mod ui;

pub use state::{FormState, UploadPhase};

use std::sync::mpsc::{self, Receiver};

use eframe::{egui, App};
use rfd::FileDialog;

use crate::upload::{SelectedFile, UploadEvent, UploadJob};

// Offered by the picker dialog. Broader than the allowed upload types;
// the type rule is enforced by validation, not by the dialog.
const PICKER_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif", "bmp", "tiff", "svg"];

#[derive(Default)]
pub struct ImageUploader {
    state: FormState,
    events: Option<Receiver<UploadEvent>>,
}

impl ImageUploader {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        tracing::info!("starting image uploader");
        Self::default()
    }

    fn select_files(&mut self) {
        let Some(paths) = FileDialog::new()
            .add_filter("Images", PICKER_EXTENSIONS)
            .pick_files()
        else {
            // Dialog cancelled, selection unchanged.
            return;
        };

        let mut files = Vec::with_capacity(paths.len());
        for path in &paths {
            match SelectedFile::from_path(path) {
                Ok(file) => files.push(file),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "could not read picked file");
                    self.state.replace_selection(Vec::new());
                    return;
                }
            }
        }

        tracing::info!(count = files.len(), "selection changed");
        self.state.replace_selection(files);
    }

    fn start_upload(&mut self) {
        // One upload at a time. The button is disabled in these cases, but
        // the guard keeps a queued second click from double-dispatching.
        if !self.state.can_submit() || self.events.is_some() {
            return;
        }

        let files = self.state.begin_upload();
        let total: u64 = files.iter().map(|file| file.size).sum();
        tracing::info!(count = files.len(), bytes = total, "starting upload");

        let (sender, receiver) = mpsc::channel();
        self.events = Some(receiver);
        UploadJob::new(files).spawn(sender);
    }

    /// Drains worker events into the form state. The receiver is released
    /// once `Done` arrives so the next upload can start.
    fn update_state(&mut self, ctx: &egui::Context) {
        let Some(receiver) = &self.events else {
            return;
        };
        ctx.request_repaint();

        let mut finished = false;
        while let Ok(event) = receiver.try_recv() {
            if matches!(event, UploadEvent::Done(_)) {
                finished = true;
            }
            self.state.apply(event);
        }

        if finished {
            self.events = None;
        }
    }
}

impl App for ImageUploader {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_state(ctx);
        self.render(ctx);
    }
}
