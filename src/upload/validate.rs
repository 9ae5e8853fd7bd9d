//! Selection checks that run before the submit button unlocks: an
//! allow-list of image types and a per-file size cap.

use thiserror::Error;

use crate::upload::types::SelectedFile;

pub const ALLOWED_TYPES: [&str; 3] = ["image/webp", "image/jpeg", "image/png"];

/// 1 MiB per file.
pub const SIZE_LIMIT: u64 = 1024 * 1024;

/// What the status line shows when a selection is rejected. The message
/// names the offending file and the broken rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("❌ File \"{name}\" could not be uploaded. Only images with the following types are allowed: WEBP, JPEG, PNG.")]
    DisallowedType { name: String },
    #[error("❌ File \"{name}\" could not be uploaded. Only images up to 1 MB are allowed.")]
    TooLarge { name: String },
}

/// Checks every file against the allow-list and the size cap, stopping at
/// the first violation. Type is checked before size, so a file that breaks
/// both rules is reported as a type problem.
pub fn validate(files: &[SelectedFile]) -> Result<(), ValidationError> {
    for file in files {
        if !ALLOWED_TYPES.contains(&file.mime_type.as_str()) {
            return Err(ValidationError::DisallowedType {
                name: file.name.clone(),
            });
        }
        if file.size > SIZE_LIMIT {
            return Err(ValidationError::TooLarge {
                name: file.name.clone(),
            });
        }
    }
    Ok(())
}
