use crate::upload::{self, SelectedFile, UploadEvent, UploadOutcome, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadPhase {
    #[default]
    Idle,
    Pending,
    Done(UploadOutcome),
}

/// View-model for the form. Rendering code only reads; every mutation goes
/// through the three methods below.
#[derive(Default)]
pub struct FormState {
    files: Vec<SelectedFile>,
    validation: Option<ValidationError>,
    phase: UploadPhase,
    transferred: Option<(u64, u64)>,
    uploaded_files: Vec<SelectedFile>,
}

impl FormState {
    /// Replaces the selection wholesale and revalidates it. Any outcome
    /// from an earlier upload is discarded.
    pub fn replace_selection(&mut self, files: Vec<SelectedFile>) {
        self.files = files;
        self.validation = upload::validate(&self.files).err();
        self.phase = UploadPhase::Idle;
        self.transferred = None;
        self.uploaded_files.clear();
    }

    /// Moves the form into the pending phase and returns the snapshot of
    /// files the worker should send.
    pub fn begin_upload(&mut self) -> Vec<SelectedFile> {
        self.phase = UploadPhase::Pending;
        self.transferred = None;
        self.files.clone()
    }

    /// Single entry point for worker notifications. Events that arrive
    /// outside the pending phase belong to a finished cycle and are
    /// dropped.
    pub fn apply(&mut self, event: UploadEvent) {
        if self.phase != UploadPhase::Pending {
            return;
        }
        match event {
            UploadEvent::Progress { sent, total } => {
                self.transferred = Some((sent, total));
            }
            UploadEvent::Done(outcome) => {
                if outcome == UploadOutcome::Success {
                    self.uploaded_files = self.files.clone();
                }
                self.phase = UploadPhase::Done(outcome);
                self.transferred = None;
            }
        }
    }

    /// Submit unlocks only for a non-empty selection that passed validation
    /// and has not been sent yet. After an upload finishes, it stays locked
    /// until the selection changes.
    pub fn can_submit(&self) -> bool {
        self.phase == UploadPhase::Idle && self.validation.is_none() && !self.files.is_empty()
    }

    /// The picker is blocked only while an upload is in flight.
    pub fn picker_enabled(&self) -> bool {
        self.phase != UploadPhase::Pending
    }

    pub fn phase(&self) -> UploadPhase {
        self.phase
    }

    pub fn files(&self) -> &[SelectedFile] {
        &self.files
    }

    pub fn uploaded_files(&self) -> &[SelectedFile] {
        &self.uploaded_files
    }

    pub fn validation_failed(&self) -> bool {
        self.validation.is_some()
    }

    /// 0 to 100, rounded half up. Outside an active transfer this is 0;
    /// the bar resets the moment the upload finishes either way.
    pub fn get_progress_percentage(&self) -> u8 {
        match (self.phase, self.transferred) {
            (UploadPhase::Pending, Some((_, 0))) => 0,
            (UploadPhase::Pending, Some((sent, total))) => {
                ((sent as f64 / total as f64) * 100.0).round() as u8
            }
            _ => 0,
        }
    }

    pub fn get_status_text(&self) -> String {
        if let Some(err) = &self.validation {
            return err.to_string();
        }
        match self.phase {
            UploadPhase::Idle => "🤷‍♂ Nothing's uploaded".to_string(),
            UploadPhase::Pending => match self.transferred {
                Some((sent, total)) => format!("⏳ Uploaded {sent} bytes of {total}"),
                None => "⏳ Pending...".to_string(),
            },
            UploadPhase::Done(UploadOutcome::Success) => "✅ Success".to_string(),
            UploadPhase::Done(UploadOutcome::Error) => "❌ Error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn image(name: &str, size: u64) -> SelectedFile {
        SelectedFile {
            name: name.to_string(),
            path: PathBuf::from(name),
            mime_type: "image/png".to_string(),
            size,
        }
    }

    #[test]
    fn fresh_form_is_locked_and_idle() {
        let state = FormState::default();
        assert!(!state.can_submit());
        assert!(state.picker_enabled());
        assert_eq!(state.get_status_text(), "🤷‍♂ Nothing's uploaded");
        assert_eq!(state.get_progress_percentage(), 0);
    }

    #[test]
    fn valid_selection_unlocks_submit() {
        let mut state = FormState::default();
        state.replace_selection(vec![image("a.png", 100)]);
        assert!(state.can_submit());
        assert_eq!(state.get_status_text(), "🤷‍♂ Nothing's uploaded");
    }

    #[test]
    fn invalid_selection_locks_submit_and_shows_the_reason() {
        let mut state = FormState::default();
        state.replace_selection(vec![SelectedFile {
            name: "anim.gif".to_string(),
            path: PathBuf::from("anim.gif"),
            mime_type: "image/gif".to_string(),
            size: 100,
        }]);
        assert!(!state.can_submit());
        assert!(state.validation_failed());
        let status = state.get_status_text();
        assert!(status.contains("anim.gif"));
        assert!(status.contains("WEBP, JPEG, PNG"));
    }

    #[test]
    fn clearing_the_selection_locks_submit() {
        let mut state = FormState::default();
        state.replace_selection(vec![image("a.png", 100)]);
        state.replace_selection(Vec::new());
        assert!(!state.can_submit());
    }

    #[test]
    fn begin_upload_enters_pending_and_snapshots_files() {
        let mut state = FormState::default();
        state.replace_selection(vec![image("a.png", 100), image("b.png", 200)]);

        let snapshot = state.begin_upload();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(state.phase(), UploadPhase::Pending);
        assert!(!state.can_submit());
        assert!(!state.picker_enabled());
        assert_eq!(state.get_status_text(), "⏳ Pending...");
        assert_eq!(state.get_progress_percentage(), 0);
    }

    #[test]
    fn progress_drives_percentage_and_status() {
        let mut state = FormState::default();
        state.replace_selection(vec![image("a.png", 200)]);
        state.begin_upload();

        state.apply(UploadEvent::Progress {
            sent: 50,
            total: 200,
        });
        assert_eq!(state.get_progress_percentage(), 25);
        assert_eq!(state.get_status_text(), "⏳ Uploaded 50 bytes of 200");
    }

    #[test]
    fn percentage_rounds_to_nearest() {
        let mut state = FormState::default();
        state.replace_selection(vec![image("a.png", 3)]);
        state.begin_upload();

        state.apply(UploadEvent::Progress { sent: 1, total: 3 });
        assert_eq!(state.get_progress_percentage(), 33);
        state.apply(UploadEvent::Progress { sent: 2, total: 3 });
        assert_eq!(state.get_progress_percentage(), 67);
    }

    #[test]
    fn zero_total_never_divides() {
        let mut state = FormState::default();
        state.begin_upload();
        state.apply(UploadEvent::Progress { sent: 0, total: 0 });
        assert_eq!(state.get_progress_percentage(), 0);
    }

    #[test]
    fn success_records_metadata_and_resets_progress() {
        let mut state = FormState::default();
        let files = vec![image("a.png", 100), image("b.png", 200)];
        state.replace_selection(files.clone());
        state.begin_upload();
        state.apply(UploadEvent::Progress {
            sent: 300,
            total: 300,
        });

        state.apply(UploadEvent::Done(UploadOutcome::Success));
        assert_eq!(state.get_status_text(), "✅ Success");
        assert_eq!(state.uploaded_files(), files.as_slice());
        assert_eq!(state.get_progress_percentage(), 0);
        // Stays locked until the user picks again.
        assert!(!state.can_submit());
        assert!(state.picker_enabled());
    }

    #[test]
    fn failure_reports_error_without_metadata() {
        let mut state = FormState::default();
        state.replace_selection(vec![image("a.png", 100)]);
        state.begin_upload();

        state.apply(UploadEvent::Done(UploadOutcome::Error));
        assert_eq!(state.get_status_text(), "❌ Error");
        assert!(state.uploaded_files().is_empty());
        assert_eq!(state.get_progress_percentage(), 0);
        assert!(!state.can_submit());
    }

    #[test]
    fn new_selection_discards_the_previous_outcome() {
        let mut state = FormState::default();
        state.replace_selection(vec![image("a.png", 100)]);
        state.begin_upload();
        state.apply(UploadEvent::Done(UploadOutcome::Success));

        state.replace_selection(vec![image("b.png", 100)]);
        assert_eq!(state.phase(), UploadPhase::Idle);
        assert!(state.uploaded_files().is_empty());
        assert!(state.can_submit());
        assert_eq!(state.get_status_text(), "🤷‍♂ Nothing's uploaded");
    }

    #[test]
    fn events_outside_pending_are_dropped() {
        let mut state = FormState::default();
        state.replace_selection(vec![image("a.png", 100)]);

        state.apply(UploadEvent::Progress {
            sent: 50,
            total: 100,
        });
        assert_eq!(state.get_progress_percentage(), 0);

        state.begin_upload();
        state.apply(UploadEvent::Done(UploadOutcome::Error));
        state.apply(UploadEvent::Progress {
            sent: 80,
            total: 100,
        });
        assert_eq!(state.phase(), UploadPhase::Done(UploadOutcome::Error));
        assert_eq!(state.get_progress_percentage(), 0);
    }
}
