use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a submission. No transition table is enforced: the
/// wizard creates resumes directly in `submitted`, and administrators may
/// assign any status at any time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResumeStatus {
    Draft,
    Submitted,
    Archived,
}

impl ResumeStatus {
    /// The wire spelling, for plain-text surfaces like the CSV export.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResumeStatus::Draft => "draft",
            ResumeStatus::Submitted => "submitted",
            ResumeStatus::Archived => "archived",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub linkedin: String,
    pub summary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    pub id: String,
    pub institution: String,
    pub degree: String,
    pub field: String,
    pub start_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gpa: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceEntry {
    pub id: String,
    pub company: String,
    pub position: String,
    pub description: String,
    pub start_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CertificationEntry {
    pub id: String,
    pub name: String,
    pub issuer: String,
    pub issue_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,
}

/// Embedded file attachment. `data` is the base64 payload exactly as the
/// browser produced it, either a `data:<mime>;base64,…` data URL or bare
/// base64; the blob lives inline in the resume record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub name: String,
    #[serde(rename = "type")]
    pub content_type: String,
    /// Declared size in bytes of the decoded file.
    pub size: u64,
    pub data: String,
}

/// A candidate's structured submission.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Resume {
    pub id: String,
    /// Owning account id.
    pub user_id: String,
    pub personal_info: PersonalInfo,
    pub education: Vec<EducationEntry>,
    pub experience: Vec<ExperienceEntry>,
    pub skills: Vec<String>,
    pub certifications: Vec<CertificationEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment: Option<Attachment>,
    pub status: ResumeStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for `Store::create_resume`. Omitted collections default to empty
/// and an omitted status defaults to `draft`; id and timestamps are always
/// server-assigned. An explicit `status` overrides the default — the
/// submission wizard creates resumes directly in `submitted`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewResume {
    /// Overwritten from the session by the HTTP layer; in-process callers
    /// set it directly.
    #[serde(default)]
    pub user_id: String,
    pub personal_info: PersonalInfo,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub certifications: Vec<CertificationEntry>,
    #[serde(default)]
    pub attachment: Option<Attachment>,
    #[serde(default)]
    pub status: Option<ResumeStatus>,
}

/// Partial update for `Store::update_resume`, enumerating the updatable
/// fields; id, owner, and `createdAt` cannot be patched, and `updatedAt` is
/// re-stamped by the store on every call. A `None` attachment leaves the
/// stored attachment unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ResumePatch {
    pub personal_info: Option<PersonalInfo>,
    pub education: Option<Vec<EducationEntry>>,
    pub experience: Option<Vec<ExperienceEntry>>,
    pub skills: Option<Vec<String>>,
    pub certifications: Option<Vec<CertificationEntry>>,
    pub attachment: Option<Attachment>,
    pub status: Option<ResumeStatus>,
}
