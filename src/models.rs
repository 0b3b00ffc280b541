//! Frontend Models
//!
//! Entities held by the session store. Field names serialize in camelCase so
//! persisted drafts keep the key layout of the form.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ========================
// Inspections
// ========================

/// Field values of the inspection form (everything except the id)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InspectionFields {
    pub fecha: String,
    pub area_proceso: String,
    pub op: String,
    pub diseno_referencia: String,
    pub estado: String,
    pub defecto: String,
    pub registro: String,
    pub responsable: String,
    pub observacion: String,
    /// Evidence photo as an embedded data URI
    pub photo: Option<String>,
}

impl Default for InspectionFields {
    fn default() -> Self {
        Self {
            fecha: String::new(),
            area_proceso: String::new(),
            op: String::new(),
            diseno_referencia: String::new(),
            estado: String::new(),
            defecto: "Ninguno".to_string(),
            registro: String::new(),
            responsable: String::new(),
            observacion: String::new(),
            photo: None,
        }
    }
}

/// A submitted inspection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InspectionRecord {
    pub id: u64,
    #[serde(flatten)]
    pub fields: InspectionFields,
}

// ========================
// Library
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentCategory {
    Manual,
    Instructivo,
    Norma,
    Ficha,
    Formato,
}

impl DocumentCategory {
    pub const ALL: [DocumentCategory; 5] = [
        DocumentCategory::Manual,
        DocumentCategory::Instructivo,
        DocumentCategory::Norma,
        DocumentCategory::Ficha,
        DocumentCategory::Formato,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentCategory::Manual => "Manual",
            DocumentCategory::Instructivo => "Instructivo",
            DocumentCategory::Norma => "Norma",
            DocumentCategory::Ficha => "Ficha",
            DocumentCategory::Formato => "Formato",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == value)
    }
}

/// Where the bytes of a document or attachment live
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "href")]
pub enum BinaryRef {
    /// Self-contained `data:` URI; survives serialization
    DataUri(String),
    /// `blob:` URL valid for this tab only; must be revoked on delete
    ObjectUrl(String),
}

impl BinaryRef {
    pub fn href(&self) -> &str {
        match self {
            BinaryRef::DataUri(href) | BinaryRef::ObjectUrl(href) => href,
        }
    }

    pub fn is_revocable(&self) -> bool {
        matches!(self, BinaryRef::ObjectUrl(_))
    }
}

/// What a view can show for a binary reference
#[derive(Debug, Clone, PartialEq)]
pub enum Preview {
    Image(String),
    Pdf(String),
    Unavailable,
}

impl Preview {
    /// Pick a preview from a file name / media type and an optional reference
    pub fn for_ref(name: &str, media_type: Option<&str>, binary: Option<&BinaryRef>) -> Self {
        let Some(binary) = binary else { return Preview::Unavailable };
        let lower = name.to_lowercase();
        let media_type = media_type.unwrap_or_default();
        let href = binary.href();
        if media_type.starts_with("image/") || href.starts_with("data:image/") {
            Preview::Image(href.to_string())
        } else if media_type == "application/pdf" || lower.ends_with(".pdf") {
            Preview::Pdf(href.to_string())
        } else {
            Preview::Unavailable
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: u64,
    pub name: String,
    pub category: DocumentCategory,
    pub date: NaiveDate,
    /// Display size, e.g. "780 KB"
    pub size: String,
    /// Absent for seed entries
    pub binary: Option<BinaryRef>,
}

impl Document {
    pub fn preview(&self) -> Preview {
        Preview::for_ref(&self.name, None, self.binary.as_ref())
    }

    pub fn is_pdf(&self) -> bool {
        self.name.to_lowercase().ends_with(".pdf")
    }
}

// ========================
// Kanban
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    Baja,
    Media,
    Alta,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Baja, Priority::Media, Priority::Alta];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Baja => "Baja",
            Priority::Media => "Media",
            Priority::Alta => "Alta",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_str() == value)
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            Priority::Baja => "priority-low",
            Priority::Media => "priority-medium",
            Priority::Alta => "priority-high",
        }
    }
}

/// Kanban stage. Declaration order is display order only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    Todo,
    InProgress,
    Review,
    Done,
}

impl Bucket {
    pub const ALL: [Bucket; 4] = [Bucket::Todo, Bucket::InProgress, Bucket::Review, Bucket::Done];

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn title(&self) -> &'static str {
        match self {
            Bucket::Todo => "Por Hacer",
            Bucket::InProgress => "En Progreso",
            Bucket::Review => "Revisión",
            Bucket::Done => "Completado",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelColor {
    Blue,
    Purple,
    Green,
    Yellow,
}

impl LabelColor {
    pub fn css_class(&self) -> &'static str {
        match self {
            LabelColor::Blue => "label-blue",
            LabelColor::Purple => "label-purple",
            LabelColor::Green => "label-green",
            LabelColor::Yellow => "label-yellow",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub id: String,
    pub name: String,
    pub color: LabelColor,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAvatar {
    pub id: String,
    pub initials: String,
}

/// Items of the task chip picker: either a label or an assignee
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BoardChip {
    Label(Label),
    User(UserAvatar),
}

impl BoardChip {
    pub fn id(&self) -> &str {
        match self {
            BoardChip::Label(label) => &label.id,
            BoardChip::User(user) => &user.id,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            BoardChip::Label(label) => &label.name,
            BoardChip::User(user) => &user.initials,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub id: u64,
    pub file_name: String,
    pub size: u64,
    pub media_type: String,
    /// Embedded `data:` URI
    pub data_uri: String,
}

impl Attachment {
    pub fn preview(&self) -> Preview {
        let binary = BinaryRef::DataUri(self.data_uri.clone());
        Preview::for_ref(&self.file_name, Some(&self.media_type), Some(&binary))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub due_date: NaiveDate,
    pub labels: Vec<Label>,
    pub assigned_users: Vec<UserAvatar>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

// ========================
// Session
// ========================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub username: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inspection_json_layout() {
        let record = InspectionRecord {
            id: 7,
            fields: InspectionFields {
                area_proceso: "Pintura".to_string(),
                ..Default::default()
            },
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["areaProceso"], "Pintura");
        assert_eq!(json["defecto"], "Ninguno");

        let back: InspectionRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_chip_is_tagged() {
        let chip = BoardChip::User(UserAvatar { id: "u1".to_string(), initials: "JD".to_string() });
        let json = serde_json::to_value(&chip).unwrap();
        assert_eq!(json["kind"], "user");
        assert_eq!(json["initials"], "JD");
    }

    #[test]
    fn test_preview_fallbacks() {
        assert_eq!(Preview::for_ref("a.pdf", None, None), Preview::Unavailable);
        assert_eq!(
            Preview::for_ref("a.pdf", None, Some(&BinaryRef::ObjectUrl("blob:x".to_string()))),
            Preview::Pdf("blob:x".to_string())
        );
        assert_eq!(
            Preview::for_ref("notes.docx", None, Some(&BinaryRef::ObjectUrl("blob:y".to_string()))),
            Preview::Unavailable
        );
        assert_eq!(
            Preview::for_ref("x", Some("image/png"), Some(&BinaryRef::DataUri("data:image/png;base64,AA==".to_string()))),
            Preview::Image("data:image/png;base64,AA==".to_string())
        );
    }

    #[test]
    fn test_priority_options_parse_back() {
        for priority in Priority::ALL {
            assert_eq!(Priority::parse(priority.as_str()), Some(priority));
        }
        assert_eq!(Priority::parse("Urgente"), None);
    }
}
