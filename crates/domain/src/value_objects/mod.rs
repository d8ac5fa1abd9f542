//! Value Objects - Immutable, identity-less domain primitives

mod conversation_id;
mod entity_id;

pub use conversation_id::ConversationId;
pub use entity_id::{EntityId, validate_entity_id};
