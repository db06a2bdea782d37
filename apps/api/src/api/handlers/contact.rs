use axum::extract::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::parse_filter;
use crate::api::errors::ApiError;
use crate::api::extract::{ApiJson, ApiQuery, Client, PathId};
use crate::api::middleware::AdminUser;
use crate::api::response::{page_summary, Envelope};
use crate::domain::contact::{ContactFilter, ContactMessage, ContactSubmission};
use crate::domain::pagination::PageRequest;
use crate::state::AppState;

const DEFAULT_PAGE_SIZE: i64 = 20;

#[derive(Debug, Serialize)]
pub struct SubmissionReceipt {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
}

/// Query parameters for the admin inbox
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMessagesQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub is_read: Option<bool>,
    pub priority: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MessageList {
    pub messages: Vec<ContactMessage>,
    pub pagination: serde_json::Value,
}

/// Accept a contact form submission
///
/// POST /api/contact
pub async fn submit_message(
    State(state): State<AppState>,
    Client(client): Client,
    ApiJson(submission): ApiJson<ContactSubmission>,
) -> Result<Envelope<SubmissionReceipt>, ApiError> {
    let message = submission.into_message(client)?;
    state.contacts.create(&message).await?;

    // Email delivery is out of scope; the notification goes to the log
    tracing::info!(
        message_id = %message.id,
        from = %message.email,
        subject = %message.subject,
        notify = state.config.notification_email.as_deref().unwrap_or("-"),
        "new contact message"
    );

    Ok(Envelope::data(SubmissionReceipt {
        id: message.id,
        timestamp: message.created_at,
    })
    .with_message("Thank you for your message! I will get back to you soon.")
    .created())
}

/// List contact messages, newest first
///
/// GET /api/contact
pub async fn list_messages(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    ApiQuery(query): ApiQuery<ListMessagesQuery>,
) -> Result<Envelope<MessageList>, ApiError> {
    let filter = ContactFilter {
        is_read: query.is_read,
        priority: parse_filter("priority", query.priority.as_deref())?,
    };
    let page = PageRequest::new(query.page, query.limit, DEFAULT_PAGE_SIZE);

    let result = state.contacts.list(&filter, page).await?;

    Ok(Envelope::data(MessageList {
        messages: result.items,
        pagination: page_summary(page, result.total, "totalMessages"),
    }))
}

/// Mark a message as read
///
/// PUT /api/contact/:id/read
pub async fn mark_read(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    PathId(id): PathId,
) -> Result<Envelope<ContactMessage>, ApiError> {
    let message = state
        .contacts
        .mark_read(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Message not found"))?;

    Ok(Envelope::data(message).with_message("Message marked as read"))
}

/// Delete a message
///
/// DELETE /api/contact/:id
pub async fn delete_message(
    State(state): State<AppState>,
    AdminUser(_): AdminUser,
    PathId(id): PathId,
) -> Result<Envelope<()>, ApiError> {
    if !state.contacts.delete(id).await? {
        return Err(ApiError::not_found("Message not found"));
    }
    Ok(Envelope::message("Message deleted successfully"))
}
