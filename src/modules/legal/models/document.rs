use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Printable legal documents prepared for a court case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Explanatory memorandum to the civil court
    ExplanatoryMemo,
    /// Statement of financial claims, one row per unpaid invoice
    ClaimsStatement,
    /// Complaint about a renter withholding the vehicle
    CriminalComplaint,
    /// Numbered list of attached documents
    DocumentsList,
    /// Request to move traffic violations to the renter's personal number
    ViolationsTransfer,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 5] = [
        Self::ExplanatoryMemo,
        Self::ClaimsStatement,
        Self::CriminalComplaint,
        Self::DocumentsList,
        Self::ViolationsTransfer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ExplanatoryMemo => "explanatory_memo",
            Self::ClaimsStatement => "claims_statement",
            Self::CriminalComplaint => "criminal_complaint",
            Self::DocumentsList => "documents_list",
            Self::ViolationsTransfer => "violations_transfer",
        }
    }

    /// Last segment of the document reference number
    pub fn code(&self) -> &'static str {
        match self {
            Self::ExplanatoryMemo => "MEMO",
            Self::ClaimsStatement => "CLM",
            Self::CriminalComplaint => "CMP",
            Self::DocumentsList => "DOCS",
            Self::ViolationsTransfer => "VIO",
        }
    }

    pub fn title_ar(&self) -> &'static str {
        match self {
            Self::ExplanatoryMemo => "مذكرة شارحة",
            Self::ClaimsStatement => "كشف المطالبات المالية",
            Self::CriminalComplaint => "بلاغ جنائي",
            Self::DocumentsList => "كشف المستندات",
            Self::ViolationsTransfer => "طلب تحويل المخالفات المرورية",
        }
    }

    pub(crate) fn template_name(&self) -> String {
        format!("{}.html", self.as_str())
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DocumentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("Invalid document kind: {}", s))
    }
}

impl TryFrom<String> for DocumentKind {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Rendered document
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedDocument {
    pub kind: DocumentKind,
    pub title: String,
    pub reference_number: String,
    pub html: String,
    /// Hex SHA-256 of `html`
    pub content_sha256: String,
}

/// Stored record of a generated document
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LegalDocumentRecord {
    pub id: String,
    pub contract_id: String,
    #[sqlx(try_from = "String")]
    pub kind: DocumentKind,
    pub reference_number: String,
    /// Object storage path; `None` when storage is not configured
    pub storage_path: Option<String>,
    pub content_sha256: String,
    pub created_at: NaiveDateTime,
}
