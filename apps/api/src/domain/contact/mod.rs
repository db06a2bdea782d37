// Contact domain module
// Messages submitted through the public contact form

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::user::value_objects::Email;
use crate::domain::validation::{trim_optional, Validator};

/// Triage priority of a contact message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "contact_priority", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ContactPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl FromStr for ContactPriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(ContactPriority::Low),
            "medium" => Ok(ContactPriority::Medium),
            "high" => Ok(ContactPriority::High),
            _ => Err("Priority must be one of: low, medium, high".to_string()),
        }
    }
}

/// A message left by a site visitor
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: Uuid,
    pub name: String,
    pub email: Email,
    pub subject: String,
    pub message: String,
    pub is_read: bool,
    pub is_replied: bool,
    pub priority: ContactPriority,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Contact form submission as posted by the browser
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactSubmission {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

/// Where a submission came from
#[derive(Debug, Clone, Default)]
pub struct ClientInfo {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

impl ContactSubmission {
    /// Validates the submission and builds an unread message
    ///
    /// # Business Rules
    /// - Name is 2-100 characters of letters, spaces, hyphens, apostrophes and periods
    /// - Subject is 5-200 characters, message 10-2000
    /// - New messages start unread with medium priority
    pub fn into_message(self, client: ClientInfo) -> DomainResult<ContactMessage> {
        let mut v = Validator::default();
        let name = self.name.trim().to_string();
        let subject = self.subject.trim().to_string();
        let message = self.message.trim().to_string();

        v.length("name", &name, 2, 100, "Name must be between 2 and 100 characters");
        if !name.is_empty() {
            v.person_name("name", &name, "Name");
        }
        let email = Email::new(&self.email);
        if let Err(e) = &email {
            v.push("email", e.clone());
        }
        v.length("subject", &subject, 5, 200, "Subject must be between 5 and 200 characters");
        v.length(
            "message",
            &message,
            10,
            2000,
            "Message must be between 10 and 2000 characters",
        );
        v.finish()?;
        let email = email.map_err(|e| DomainError::invalid("email", e))?;

        let now = Utc::now();
        Ok(ContactMessage {
            id: Uuid::new_v4(),
            name,
            email,
            subject,
            message,
            is_read: false,
            is_replied: false,
            priority: ContactPriority::Medium,
            ip_address: trim_optional(client.ip_address),
            user_agent: trim_optional(client.user_agent),
            created_at: now,
            updated_at: now,
        })
    }
}

/// Filters for the admin inbox
#[derive(Debug, Clone, Default)]
pub struct ContactFilter {
    pub is_read: Option<bool>,
    pub priority: Option<ContactPriority>,
}
