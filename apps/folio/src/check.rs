use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::models::CandidateRecord;
use crate::render;
use crate::store::Content;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case", tag = "status", content = "path")]
pub enum AssetStatus {
    /// Local file present under the asset root.
    Ready(String),
    /// Absolute, protocol-relative or `data:` URL; not checked.
    Remote(String),
    /// Local reference with no file behind it.
    MissingAsset(String),
    /// No download file registered for the record.
    Unregistered,
}

impl AssetStatus {
    pub fn is_problem(&self) -> bool {
        matches!(self, AssetStatus::MissingAsset(_))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordReport {
    pub id: String,
    pub name: String,
    pub sections: Vec<String>,
    pub markup_bytes: usize,
    pub image: AssetStatus,
    pub download: AssetStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentReport {
    pub records: Vec<RecordReport>,
    pub problems: Vec<String>,
}

impl ContentReport {
    pub fn is_clean(&self) -> bool {
        self.problems.is_empty()
    }
}

/// Renders every record and checks that the files it points at exist.
pub fn check_content(content: &Content, asset_root: &Path) -> ContentReport {
    let mut records = Vec::with_capacity(content.store.len());
    let mut problems = Vec::new();

    for record in content.store.iter() {
        let report = check_record(content, record, asset_root);
        if report.image.is_problem() {
            problems.push(format!("{}: image '{}' not found", report.id, record.image));
        }
        if let AssetStatus::MissingAsset(path) = &report.download {
            problems.push(format!("{}: download '{}' not found", report.id, path));
        }
        records.push(report);
    }

    ContentReport { records, problems }
}

fn check_record(content: &Content, record: &CandidateRecord, asset_root: &Path) -> RecordReport {
    let fragment = render::render(record);
    let download = match content.downloads.path_for(record.id.as_str()) {
        Some(path) => asset_status(path, asset_root),
        None => AssetStatus::Unregistered,
    };

    RecordReport {
        id: record.id.to_string(),
        name: record.name.clone(),
        sections: fragment.sections().into_iter().map(str::to_string).collect(),
        markup_bytes: fragment.to_html().len(),
        image: asset_status(&record.image, asset_root),
        download,
    }
}

fn asset_status(reference: &str, asset_root: &Path) -> AssetStatus {
    if reference.starts_with("//") || has_scheme(reference) {
        return AssetStatus::Remote(reference.to_string());
    }
    let local = asset_root.join(reference.trim_start_matches('/'));
    if local.is_file() {
        AssetStatus::Ready(reference.to_string())
    } else {
        AssetStatus::MissingAsset(reference.to_string())
    }
}

/// `scheme:` prefix as in RFC 3986: a letter, then letters, digits, `+`, `-` or `.`.
fn has_scheme(reference: &str) -> bool {
    let Some((scheme, _)) = reference.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}
