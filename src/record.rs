//! Image records as returned by the backend's per-image endpoint.

use crate::annotation::Annotation;
use crate::errors::{Result, ViewerError};
use crate::viewer::ViewerInput;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRecord {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: String,
    pub original_s3_url: String,
    #[serde(default)]
    pub preview_s3_url: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub labeling: Vec<Annotation>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl ImageRecord {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let record = Self::from_json(&content).map_err(|e| ViewerError::InvalidRecord {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let outside = record.labeling.iter().filter(|a| !a.is_within_image()).count();
        if outside > 0 {
            log::warn!(
                "{}: {} of {} boxes extend past the image and will be drawn unclamped",
                path.display(),
                outside,
                record.labeling.len()
            );
        }
        Ok(record)
    }

    pub fn title(&self) -> String {
        match (self.id, self.name.is_empty()) {
            (Some(id), false) => format!("#{} {}", id, self.name),
            (Some(id), true) => format!("#{}", id),
            (None, _) => self.name.clone(),
        }
    }

    pub fn into_viewer_input(self) -> ViewerInput {
        ViewerInput {
            image_url: self.original_s3_url,
            preview_url: self.preview_s3_url.filter(|url| !url.is_empty()),
            annotations: self.labeling,
        }
    }
}

/// Read a bare annotation list (`[{...}, ...]`) from a JSON file.
pub fn load_annotations(path: &Path) -> Result<Vec<Annotation>> {
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| ViewerError::InvalidRecord {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
