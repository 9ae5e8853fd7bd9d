mod job;
mod types;
mod validate;

pub use job::{UploadJob, UPLOAD_ENDPOINT};
pub use types::{SelectedFile, UploadEvent, UploadOutcome};
pub use validate::{validate, ValidationError};
