//! Support ticket entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::Entity;
use crate::config::{COLLECTION_TICKETS, TICKET_NUMBER_PREFIX};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    #[default]
    Open,
    InProgress,
    Resolved,
    Closed,
    Escalated,
}

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Open => "open",
            TicketStatus::InProgress => "in_progress",
            TicketStatus::Resolved => "resolved",
            TicketStatus::Closed => "closed",
            TicketStatus::Escalated => "escalated",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TicketPriority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl TicketPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketPriority::Low => "low",
            TicketPriority::Medium => "medium",
            TicketPriority::High => "high",
            TicketPriority::Urgent => "urgent",
        }
    }
}

/// Contact channel a ticket came in through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Whatsapp,
    Email,
    Phone,
    Chat,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Whatsapp => "whatsapp",
            Channel::Email => "email",
            Channel::Phone => "phone",
            Channel::Chat => "chat",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Ticket {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[schema(example = "TK-1A2B3C4D")]
    pub ticket_number: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub status: TicketStatus,
    #[serde(default)]
    pub priority: TicketPriority,
    pub channel: Channel,
    pub customer_id: String,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub resolution: Option<String>,
    #[serde(default)]
    pub satisfaction_rating: Option<u8>,
    #[serde(default)]
    pub satisfaction_comment: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub attachments: Vec<String>,
    #[serde(default, with = "crate::utils::timestamp::option")]
    pub estimated_resolution: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::utils::timestamp::option")]
    pub resolved_at: Option<DateTime<Utc>>,
    #[serde(with = "crate::utils::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::utils::timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Entity for Ticket {
    const COLLECTION: &'static str = COLLECTION_TICKETS;
    const NAME: &'static str = "Ticket";
}

/// `TK-` followed by eight upper-case hex digits.
pub fn generate_ticket_number() -> String {
    let simple = Uuid::new_v4().simple().to_string();
    format!("{}{}", TICKET_NUMBER_PREFIX, simple[..8].to_uppercase())
}

impl Ticket {
    pub fn new(input: CreateTicket) -> Self {
        let now = Utc::now();
        Self {
            id: String::new(),
            ticket_number: generate_ticket_number(),
            title: input.title,
            description: input.description,
            status: TicketStatus::default(),
            priority: input.priority,
            channel: input.channel,
            customer_id: input.customer_id,
            assigned_to: input.assigned_to,
            resolution: None,
            satisfaction_rating: None,
            satisfaction_comment: None,
            tags: input.tags,
            attachments: Vec::new(),
            estimated_resolution: input.estimated_resolution,
            resolved_at: None,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateTicket {
    #[validate(length(min = 1, message = "Title is required"))]
    #[schema(example = "Printer not working")]
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub priority: TicketPriority,
    pub channel: Channel,
    #[validate(length(min = 1, message = "customer_id is required"))]
    pub customer_id: String,
    #[serde(default)]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, with = "crate::utils::timestamp::option")]
    pub estimated_resolution: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateTicket {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TicketStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TicketPriority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub satisfaction_rating: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub satisfaction_comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::utils::timestamp::option"
    )]
    pub estimated_resolution: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TicketFilter {
    pub status: Option<TicketStatus>,
    pub priority: Option<TicketPriority>,
    pub assigned_to: Option<String>,
    pub customer_id: Option<String>,
    pub channel: Option<Channel>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticket_number_format() {
        let number = generate_ticket_number();

        assert_eq!(number.len(), 11);
        assert!(number.starts_with("TK-"));
        assert!(number[3..]
            .chars()
            .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)));
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(
            serde_json::to_value(TicketStatus::InProgress).unwrap(),
            "in_progress"
        );
        assert_eq!(TicketStatus::InProgress.as_str(), "in_progress");
    }
}
