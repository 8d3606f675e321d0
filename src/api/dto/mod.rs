//! Data Transfer Objects for REST request/response serialization.
//!
//! Entity bodies are passed through as stored, so chain amounts stay
//! decimal strings end to end.

pub mod common_dto;
pub mod entity_dto;
pub mod event_dto;

pub use common_dto::*;
pub use entity_dto::*;
pub use event_dto::*;
