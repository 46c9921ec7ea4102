//! Core records exchanged with the backend: deadlines, users, and the
//! create/edit draft with its form-level validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lifecycle state of a deadline. Wire values are the backend's
/// Portuguese enum strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum DeadlineStatus {
    #[default]
    #[serde(rename = "pendente")]
    Pending,
    #[serde(rename = "concluido")]
    Completed,
    #[serde(rename = "cancelado")]
    Cancelled,
}

impl DeadlineStatus {
    /// Human label for display.
    pub fn label(self) -> &'static str {
        match self {
            DeadlineStatus::Pending => "Pendente",
            DeadlineStatus::Completed => "Concluído",
            DeadlineStatus::Cancelled => "Cancelado",
        }
    }

    pub fn wire_value(self) -> &'static str {
        match self {
            DeadlineStatus::Pending => "pendente",
            DeadlineStatus::Completed => "concluido",
            DeadlineStatus::Cancelled => "cancelado",
        }
    }
}

/// Stored editorial severity tag, set by a user at create/edit time.
///
/// Distinct from computed urgency: urgency is derived at render time from
/// the due date, status, and this tag, and is never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum Classification {
    #[default]
    #[serde(rename = "normal")]
    Normal,
    #[serde(rename = "critico")]
    Critical,
    #[serde(rename = "fatal")]
    Fatal,
}

impl Classification {
    pub fn label(self) -> &'static str {
        match self {
            Classification::Normal => "Normal",
            Classification::Critical => "Crítico",
            Classification::Fatal => "Fatal",
        }
    }

    pub fn wire_value(self) -> &'static str {
        match self {
            Classification::Normal => "normal",
            Classification::Critical => "critico",
            Classification::Fatal => "fatal",
        }
    }
}

/// One entry of a deadline's append-only change log. Populated by the
/// backend; read-only here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryItem {
    pub id: String,
    pub action_description: String,
    pub acting_user: ActingUser,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActingUser {
    pub name: String,
}

/// A tracked legal deadline (prazo).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deadline {
    pub id: String,
    pub task_description: String,
    pub due_date: DateTime<Utc>,
    pub process_number: Option<String>,
    /// Kind of procedural act ("Recurso", "Contestação", ...). Serialised
    /// as `type`, which is reserved in Rust.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub parties: Option<String>,
    pub status: DeadlineStatus,
    pub classification: Classification,
    pub responsible_user_id: Option<String>,
    #[serde(default)]
    pub history: Vec<HistoryItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Profile {
    #[serde(rename = "admin")]
    Admin,
    #[serde(rename = "advogado")]
    Lawyer,
    #[serde(rename = "estagiario")]
    Intern,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub profile: Profile,
    pub phone: Option<String>,
}

/// Whether `user` may edit or delete `deadline`: admins always, everyone
/// else only on deadlines assigned to them.
pub fn can_edit(user: &User, deadline: &Deadline) -> bool {
    user.profile == Profile::Admin || deadline.responsible_user_id.as_deref() == Some(&user.id)
}

/// Resolve a responsible user id to a display name.
pub fn responsible_name<'a>(users: &'a [User], user_id: Option<&str>) -> &'a str {
    match user_id {
        None => "Não atribuído",
        Some(id) => users
            .iter()
            .find(|u| u.id == id)
            .map(|u| u.name.as_str())
            .unwrap_or("Usuário não encontrado"),
    }
}

/// Form-level validation failures. Reported inline to the originating
/// form; never fatal.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("campo obrigatório: {0}")]
    MissingField(&'static str),
    #[error("data inválida: {0}")]
    MalformedDate(String),
}

/// Editable payload for creating or updating a deadline.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DeadlineDraft {
    pub task_description: String,
    /// Raw form input, validated into a timestamp by [`DeadlineDraft::validate`].
    pub due_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub process_number: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parties: Option<String>,
    pub status: DeadlineStatus,
    pub classification: Classification,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responsible_user_id: Option<String>,
}

impl DeadlineDraft {
    /// Check the draft before submission. Returns the parsed due date so
    /// callers do not re-parse.
    pub fn validate(&self) -> Result<DateTime<Utc>, ValidationError> {
        if self.task_description.trim().is_empty() {
            return Err(ValidationError::MissingField("task_description"));
        }
        if self.due_date.trim().is_empty() {
            return Err(ValidationError::MissingField("due_date"));
        }
        self.due_date
            .parse::<DateTime<Utc>>()
            .map_err(|_| ValidationError::MalformedDate(self.due_date.clone()))
    }
}
