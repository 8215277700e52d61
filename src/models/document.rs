use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of real-estate document recognised by the extraction prompt
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentType {
    /// Diagnostic de performance énergétique
    Dpe,
    TitrePropriete,
    /// Procès-verbal d'assemblée générale
    PvAg,
    TaxeFonciere,
    Facture,
    Plan,
    #[default]
    #[serde(other)]
    Autre,
}

impl DocumentType {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Dpe => "DPE",
            Self::TitrePropriete => "TITRE_PROPRIETE",
            Self::PvAg => "PV_AG",
            Self::TaxeFonciere => "TAXE_FONCIERE",
            Self::Facture => "FACTURE",
            Self::Plan => "PLAN",
            Self::Autre => "AUTRE",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Fields pulled out of an uploaded document.
///
/// The known fields are typed; anything else the model returns is kept
/// verbatim in `extra`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedData {
    #[serde(rename = "type", default)]
    pub document_type: DocumentType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surface: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ges_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl ExtractedData {
    /// Placeholder returned whenever extraction fails
    pub fn fallback() -> Self {
        Self::default()
    }

    /// Archive name for a processed document, e.g. `2024-05_DPE_appartement.pdf`
    pub fn suggested_file_name(&self, original_name: &str, uploaded_at: DateTime<Utc>) -> String {
        let path = Path::new(original_name);
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("document");
        let prefix = format!(
            "{}_{}_{}",
            uploaded_at.format("%Y-%m"),
            self.document_type.code(),
            stem
        );
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => format!("{}.{}", prefix, ext.to_lowercase()),
            None => prefix,
        }
    }
}

/// A file handed to the upload pipeline. Clones share the byte buffer.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Bytes,
    /// Where the file was read from, when it came from disk
    pub source_path: Option<PathBuf>,
}

impl UploadFile {
    pub fn from_bytes(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes: bytes.into(),
            source_path: None,
        }
    }

    /// Read a file from disk, guessing its MIME type from the extension
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("document")
            .to_string();
        let source_path = tokio::fs::canonicalize(path).await.ok();

        Ok(Self {
            mime_type: mime_from_extension(path).to_string(),
            name,
            bytes: Bytes::from(bytes),
            source_path,
        })
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }

    /// Only images and PDFs are accepted by the drop zone
    pub fn is_accepted(&self) -> bool {
        self.is_image() || self.mime_type == "application/pdf"
    }
}

pub fn mime_from_extension(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("pdf") => "application/pdf",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("heic") => "image/heic",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn unknown_document_type_falls_back_to_autre() {
        let data: ExtractedData = serde_json::from_str(r#"{"type": "BAIL"}"#).unwrap();
        assert_eq!(data.document_type, DocumentType::Autre);

        let data: ExtractedData = serde_json::from_str(r#"{"type": "TITRE_PROPRIETE"}"#).unwrap();
        assert_eq!(data.document_type, DocumentType::TitrePropriete);
    }

    #[test]
    fn unknown_fields_land_in_extra() {
        let json = r#"{
            "type": "DPE",
            "surface": 65,
            "energyClass": "D",
            "ownerName": null,
            "consommation": 245,
            "dateDiagnostic": "2024-03-01"
        }"#;
        let data: ExtractedData = serde_json::from_str(json).unwrap();

        assert_eq!(data.surface, Some(65.0));
        assert_eq!(data.energy_class.as_deref(), Some("D"));
        assert!(data.owner_name.is_none());
        assert_eq!(data.extra.len(), 2);
        assert_eq!(data.extra["consommation"], 245);
        assert!(!data.extra.contains_key("surface"));
    }

    #[test]
    fn fallback_is_autre_with_nothing_else() {
        let data = ExtractedData::fallback();
        assert_eq!(data.document_type, DocumentType::Autre);
        assert!(data.surface.is_none() && data.price.is_none() && data.address.is_none());
        assert!(data.extra.is_empty());
        assert_eq!(serde_json::to_string(&data).unwrap(), r#"{"type":"AUTRE"}"#);
    }

    #[test]
    fn suggested_file_name_uses_month_type_and_stem() {
        let data = ExtractedData {
            document_type: DocumentType::Dpe,
            ..Default::default()
        };
        let at = Utc.with_ymd_and_hms(2024, 5, 14, 9, 30, 0).unwrap();
        assert_eq!(
            data.suggested_file_name("Appartement.PDF", at),
            "2024-05_DPE_Appartement.pdf"
        );
        assert_eq!(data.suggested_file_name("scan", at), "2024-05_DPE_scan");
    }

    #[test]
    fn accept_filter_matches_images_and_pdf_only() {
        assert!(UploadFile::from_bytes("a.pdf", "application/pdf", Bytes::new()).is_accepted());
        assert!(UploadFile::from_bytes("a.png", "image/png", Bytes::new()).is_accepted());
        assert!(!UploadFile::from_bytes("a.txt", "text/plain", Bytes::new()).is_accepted());
        assert_eq!(mime_from_extension(Path::new("photo.JPG")), "image/jpeg");
    }

    #[test]
    fn cloned_file_shares_its_buffer() {
        let file = UploadFile::from_bytes("dpe.pdf", "application/pdf", b"%PDF-1.7".to_vec());
        let copy = file.clone();
        let slice = file.bytes.clone();
        assert_eq!(copy.bytes.as_ptr(), file.bytes.as_ptr());
        assert_eq!(slice.as_ptr(), file.bytes.as_ptr());
        assert_eq!(copy.size(), 8);
    }
}
