//! Customer entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::{default_true, Entity};
use crate::config::COLLECTION_CUSTOMERS;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Customer {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(with = "crate::utils::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::utils::timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Entity for Customer {
    const COLLECTION: &'static str = COLLECTION_CUSTOMERS;
    const NAME: &'static str = "Customer";
}

impl Customer {
    pub fn new(input: CreateCustomer) -> Self {
        let now = Utc::now();
        Self {
            id: String::new(),
            name: input.name,
            email: input.email,
            phone: input.phone,
            company: input.company,
            address: input.address,
            notes: input.notes,
            tags: input.tags,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCustomer {
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Maria Lima")]
    pub name: String,
    #[serde(default)]
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    #[serde(default)]
    #[schema(example = "+55 11 99999-0000")]
    pub phone: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateCustomer {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// List filters for customers. `search` matches name, email or company.
#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CustomerFilter {
    pub is_active: Option<bool>,
    pub search: Option<String>,
}
