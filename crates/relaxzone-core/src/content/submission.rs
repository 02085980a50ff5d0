//! Simulated meme upload. Files are validated and acknowledged, never stored.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;
use crate::events::Event;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "bmp", "svg", "avif"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub file_name: String,
}

impl SelectedFile {
    /// `file://` URL for previewing the image, when the path is absolute.
    pub fn preview_url(&self) -> Option<url::Url> {
        url::Url::from_file_path(&self.path).ok()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub id: Uuid,
    pub file_name: String,
    pub submitted_at: DateTime<Utc>,
}

impl SubmissionReceipt {
    pub fn to_event(&self) -> Event {
        Event::MemeSubmitted {
            receipt_id: self.id.to_string(),
            file_name: self.file_name.clone(),
            at: self.submitted_at,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemeSubmissionForm {
    selected: Option<SelectedFile>,
}

impl MemeSubmissionForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    /// Select a file for submission, replacing any earlier selection.
    ///
    /// A rejected file leaves the form empty.
    pub fn select(&mut self, path: impl AsRef<Path>) -> Result<&SelectedFile, ValidationError> {
        self.selected = None;
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if !is_image(path) {
            return Err(ValidationError::UnsupportedFileType { file_name });
        }
        let selected = self.selected.insert(SelectedFile {
            path: path.to_path_buf(),
            file_name,
        });
        Ok(&*selected)
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// Acknowledge the selected file and reset the form.
    pub fn submit(&mut self) -> Result<SubmissionReceipt, ValidationError> {
        let file = self.selected.take().ok_or(ValidationError::NoFileSelected)?;
        tracing::info!(file = %file.file_name, "simulating meme submission");
        Ok(SubmissionReceipt {
            id: Uuid::new_v4(),
            file_name: file.file_name,
            submitted_at: Utc::now(),
        })
    }
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}
