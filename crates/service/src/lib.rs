//! Service layer providing business-oriented operations on top of models.
//! - Separates validation and orchestration from data access.
//! - Repositories abstract the DynamoDB tables; an in-memory variant backs tests.
//! - Change events are published after every successful mutation.

pub mod categories;
pub mod errors;
pub mod events;
pub mod menu_items;
pub mod repositories;
pub mod security;
