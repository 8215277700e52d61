use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{ExtractedData, UploadFile};

/// Where a dropped file is in the upload pipeline.
///
/// `Uploading -> Analyzing -> Done`, or `Error` from either active state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum DocState {
    Uploading,
    Analyzing,
    Done { data: ExtractedData },
    Error,
}

impl DocState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done { .. } | Self::Error)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Uploading => "uploading",
            Self::Analyzing => "analyzing",
            Self::Done { .. } => "done",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for DocState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("cannot move document {id} from {from} to {to}")]
    Invalid {
        id: String,
        from: &'static str,
        to: &'static str,
    },
    #[error("no document with id {0}")]
    UnknownFile(String),
}

/// Upload session record for one dropped file
#[derive(Debug, Clone, Serialize)]
pub struct DocFile {
    pub id: String,
    #[serde(skip)]
    pub file: UploadFile,
    pub name: String,
    pub mime_type: String,
    pub preview: String,
    #[serde(flatten)]
    pub state: DocState,
    /// Public URL once uploaded to a configured backend, or the preview in demo mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub dropped_at: DateTime<Utc>,
}

impl DocFile {
    pub fn new(file: UploadFile, preview: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: file.name.clone(),
            mime_type: file.mime_type.clone(),
            file,
            preview,
            state: DocState::Uploading,
            url: None,
            dropped_at: Utc::now(),
        }
    }

    pub fn data(&self) -> Option<&ExtractedData> {
        match &self.state {
            DocState::Done { data } => Some(data),
            _ => None,
        }
    }

    /// `Uploading -> Analyzing`
    pub fn mark_uploaded(&mut self, url: String) -> Result<(), TransitionError> {
        match self.state {
            DocState::Uploading => {
                self.state = DocState::Analyzing;
                self.url = Some(url);
                Ok(())
            }
            _ => Err(self.invalid("analyzing")),
        }
    }

    /// `Analyzing -> Done`
    pub fn complete(&mut self, data: ExtractedData) -> Result<(), TransitionError> {
        match self.state {
            DocState::Analyzing => {
                self.state = DocState::Done { data };
                Ok(())
            }
            _ => Err(self.invalid("done")),
        }
    }

    /// Any active state -> `Error`
    pub fn fail(&mut self) -> Result<(), TransitionError> {
        if self.state.is_terminal() {
            return Err(self.invalid("error"));
        }
        self.state = DocState::Error;
        Ok(())
    }

    /// Archive name once extraction is done
    pub fn suggested_file_name(&self) -> Option<String> {
        self.data()
            .map(|data| data.suggested_file_name(&self.name, self.dropped_at))
    }

    fn invalid(&self, to: &'static str) -> TransitionError {
        TransitionError::Invalid {
            id: self.id.clone(),
            from: self.state.label(),
            to,
        }
    }
}

/// Files dropped during this dashboard session, in drop order
#[derive(Debug, Clone, Default, Serialize)]
pub struct DocumentSession {
    files: Vec<DocFile>,
}

impl DocumentSession {
    pub fn add(&mut self, doc: DocFile) {
        self.files.push(doc);
    }

    pub fn files(&self) -> &[DocFile] {
        &self.files
    }

    pub fn get(&self, id: &str) -> Option<&DocFile> {
        self.files.iter().find(|f| f.id == id)
    }

    /// Apply `change` to the file with this id
    pub fn update<F>(&mut self, id: &str, change: F) -> Result<(), TransitionError>
    where
        F: FnOnce(&mut DocFile) -> Result<(), TransitionError>,
    {
        let doc = self
            .files
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| TransitionError::UnknownFile(id.to_string()))?;
        change(doc)
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }
}
