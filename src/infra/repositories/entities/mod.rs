//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod document;

pub use document::{
    ActiveModel as DocumentActiveModel, Column as DocumentColumn, Entity as DocumentEntity,
    Model as DocumentModel,
};
