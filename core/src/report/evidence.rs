use crate::case::case_id::sha256_hex;
use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use ulid::Ulid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    Pending,
}

impl VerificationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            VerificationStatus::Pending => "pending",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileRecord {
    pub id: String,
    pub name: String,
    pub size_bytes: u64,
    pub mime_type: String,
    pub uploaded_at: String, // RFC3339 UTC
    pub status: VerificationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UrlRecord {
    pub id: String,
    pub url: String,
    pub description: String,
    pub added_at: String, // RFC3339 UTC
}

impl UrlRecord {
    /// Host of the link when it parses as an absolute URL. Raw text is kept either way.
    pub fn host(&self) -> Option<String> {
        url::Url::parse(&self.url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
    }
}

/// Provenance answers for the submitted evidence.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EvidenceQuestions {
    pub source: String,
    pub original_or_copy: String,
    pub modified: String,
    pub obtained_when: String,
    pub others_have_copies: String,
}

#[derive(Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EncryptionSettings {
    pub enabled: bool,
    password: String,
    pub notes: String,
}

impl EncryptionSettings {
    /// Disabling clears the password. Notes survive either way.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled && !enabled {
            self.password.clear();
        }
        self.enabled = enabled;
    }

    pub fn toggle(&mut self) -> bool {
        self.set_enabled(!self.enabled);
        self.enabled
    }

    pub fn set_password(&mut self, password: &str) -> CoreResult<()> {
        if !self.enabled {
            return Err(CoreError::InvalidInput(
                "enable encryption before setting a password".to_string(),
            ));
        }
        self.password = password.to_string();
        Ok(())
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn has_password(&self) -> bool {
        !self.password.is_empty()
    }
}

impl fmt::Debug for EncryptionSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncryptionSettings")
            .field("enabled", &self.enabled)
            .field("password", &if self.password.is_empty() { "" } else { "<redacted>" })
            .field("notes", &self.notes)
            .finish()
    }
}

/// A file offered for intake, before the size check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingFile {
    pub name: String,
    pub size_bytes: u64,
    pub mime_type: String,
    pub contents: Option<Vec<u8>>,
}

impl IncomingFile {
    pub fn metadata_only(name: &str, size_bytes: u64, mime_type: &str) -> Self {
        Self {
            name: name.to_string(),
            size_bytes,
            mime_type: mime_type.to_string(),
            contents: None,
        }
    }

    /// Reads a local file. Contents are only loaded when the file is within `max_bytes`,
    /// so oversize files can still be reported by name.
    pub fn from_path(path: impl AsRef<Path>, max_bytes: u64) -> CoreResult<Self> {
        let path = path.as_ref();
        let meta = std::fs::metadata(path)?;
        if !meta.is_file() {
            return Err(CoreError::InvalidInput(format!(
                "{} is not a regular file",
                path.display()
            )));
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| CoreError::InvalidInput("path has no file name".to_string()))?;
        let contents = if meta.len() <= max_bytes {
            Some(std::fs::read(path)?)
        } else {
            None
        };
        Ok(Self {
            mime_type: mime_type_for(&name).to_string(),
            name,
            size_bytes: meta.len(),
            contents,
        })
    }
}

pub fn mime_type_for(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, e)| e.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "pdf" => "application/pdf",
        "txt" | "log" => "text/plain",
        "csv" => "text/csv",
        "json" => "application/json",
        "html" | "htm" => "text/html",
        "eml" => "message/rfc822",
        "mp4" => "video/mp4",
        "mov" => "video/quicktime",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "ogg" | "opus" => "audio/ogg",
        "zip" => "application/zip",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => "application/octet-stream",
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredEvidence {
    pub id: String,
    pub sha256: Option<String>,
}

/// Where accepted evidence bytes go. Callers only rely on the returned id.
pub trait EvidenceStore {
    fn put(&mut self, file: &IncomingFile) -> CoreResult<StoredEvidence>;
    fn remove(&mut self, id: &str) -> CoreResult<()>;
    fn clear(&mut self);
}

/// Keeps accepted blobs in memory for the lifetime of the session.
#[derive(Debug, Default)]
pub struct MemoryEvidenceStore {
    blobs: BTreeMap<String, Option<Vec<u8>>>,
}

impl MemoryEvidenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&[u8]> {
        self.blobs.get(id).and_then(|b| b.as_deref())
    }
}

impl EvidenceStore for MemoryEvidenceStore {
    fn put(&mut self, file: &IncomingFile) -> CoreResult<StoredEvidence> {
        let id = new_record_id("f");
        let sha256 = file.contents.as_deref().map(sha256_hex);
        self.blobs.insert(id.clone(), file.contents.clone());
        Ok(StoredEvidence { id, sha256 })
    }

    fn remove(&mut self, id: &str) -> CoreResult<()> {
        self.blobs.remove(id);
        Ok(())
    }

    fn clear(&mut self) {
        self.blobs.clear();
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntakeOutcome {
    pub accepted_ids: Vec<String>,
    pub rejected_names: Vec<String>,
}

impl IntakeOutcome {
    /// One message naming every oversize file of the batch, if any.
    pub fn rejection_message(&self, max_bytes: u64) -> Option<String> {
        if self.rejected_names.is_empty() {
            return None;
        }
        Some(format!(
            "The following files exceed the {} limit and were not added:\n{}",
            format_bytes(max_bytes),
            self.rejected_names
                .iter()
                .map(|n| format!("- {}", n))
                .collect::<Vec<_>>()
                .join("\n")
        ))
    }
}

/// Section 6 of the draft.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EvidenceSection {
    pub files: Vec<FileRecord>,
    pub urls: Vec<UrlRecord>,
    pub questions: EvidenceQuestions,
    pub encryption: EncryptionSettings,
}

impl EvidenceSection {
    /// Accepts files up to and including `max_bytes`, appending them in batch order.
    /// Sizes are checked for the whole batch first. If the store fails, the files already
    /// stored from this batch are taken back out and the draft is left as it was.
    pub fn intake_files(
        &mut self,
        batch: Vec<IncomingFile>,
        max_bytes: u64,
        store: &mut dyn EvidenceStore,
    ) -> CoreResult<IntakeOutcome> {
        let (accepted, rejected): (Vec<_>, Vec<_>) =
            batch.into_iter().partition(|f| f.size_bytes <= max_bytes);
        let mut outcome = IntakeOutcome {
            accepted_ids: Vec::with_capacity(accepted.len()),
            rejected_names: rejected.into_iter().map(|f| f.name).collect(),
        };
        if !outcome.rejected_names.is_empty() {
            tracing::warn!(
                rejected = outcome.rejected_names.len(),
                max_bytes,
                "oversize evidence files rejected"
            );
        }

        let files_before = self.files.len();
        for file in accepted {
            let stored = match store.put(&file) {
                Ok(stored) => stored,
                Err(e) => {
                    for id in &outcome.accepted_ids {
                        let _ = store.remove(id);
                    }
                    self.files.truncate(files_before);
                    tracing::warn!(error = %e, "evidence intake rolled back");
                    return Err(e);
                }
            };
            outcome.accepted_ids.push(stored.id.clone());
            self.files.push(FileRecord {
                id: stored.id,
                name: file.name,
                size_bytes: file.size_bytes,
                mime_type: file.mime_type,
                uploaded_at: now_rfc3339_utc(),
                status: VerificationStatus::Pending,
                sha256: stored.sha256,
            });
        }
        tracing::info!(accepted = outcome.accepted_ids.len(), "evidence files added");
        Ok(outcome)
    }

    /// Removes the record with `id`. Returns whether one was removed.
    pub fn remove_file(&mut self, id: &str, store: &mut dyn EvidenceStore) -> CoreResult<bool> {
        let Some(pos) = self.files.iter().position(|f| f.id == id) else {
            return Ok(false);
        };
        self.files.remove(pos);
        store.remove(id)?;
        Ok(true)
    }

    /// Appends a link. Blank input is ignored without error and returns `None`.
    pub fn add_url(&mut self, raw: &str) -> Option<String> {
        let url = raw.trim();
        if url.is_empty() {
            return None;
        }
        let id = new_record_id("u");
        self.urls.push(UrlRecord {
            id: id.clone(),
            url: url.to_string(),
            description: String::new(),
            added_at: now_rfc3339_utc(),
        });
        Some(id)
    }

    pub fn add_url_from(&mut self, input: &mut dyn UrlInputProvider) -> Option<String> {
        let raw = input.request_url()?;
        self.add_url(&raw)
    }

    pub fn set_url_description(&mut self, id: &str, description: &str) -> bool {
        match self.urls.iter_mut().find(|u| u.id == id) {
            Some(u) => {
                u.description = description.to_string();
                true
            }
            None => false,
        }
    }
}

/// Source of a single URL entry, e.g. a modal prompt. `None` means the user cancelled.
pub trait UrlInputProvider {
    fn request_url(&mut self) -> Option<String>;
}

/// Hands out queued answers in order. Handy for scripted sessions.
#[derive(Debug, Default)]
pub struct ScriptedUrlInput {
    answers: std::collections::VecDeque<String>,
}

impl ScriptedUrlInput {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
        }
    }
}

impl UrlInputProvider for ScriptedUrlInput {
    fn request_url(&mut self) -> Option<String> {
        self.answers.pop_front()
    }
}

pub fn format_bytes(bytes: u64) -> String {
    const MB: u64 = 1024 * 1024;
    const KB: u64 = 1024;
    if bytes >= MB && bytes % MB == 0 {
        format!("{} MB", bytes / MB)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

fn new_record_id(kind: &str) -> String {
    format!("{}_{}", kind, Ulid::new())
}

pub(crate) fn now_rfc3339_utc() -> String {
    time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_default()
}
