//! Change-event publication.
//!
//! After every successful mutation the service layer hands a [`ChangeEvent`]
//! to an [`EventPublisher`]. The downstream bus is an external collaborator
//! with at-least-once delivery and no ordering guarantee, so the default
//! publisher only emits the event as a structured log record; swapping in a
//! real transport is a matter of implementing the trait.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use models::{Category, MenuItem};
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::info;

use crate::errors::ServiceError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeAction {
    Created,
    Updated,
    Deleted,
}

impl ChangeAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeAction::Created => "created",
            ChangeAction::Updated => "updated",
            ChangeAction::Deleted => "deleted",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    MenuItem,
    Category,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::MenuItem => "menu_item",
            EntityKind::Category => "category",
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct ChangeEvent {
    pub action: ChangeAction,
    pub entity: EntityKind,
    pub restaurant_id: String,
    pub entity_id: String,
    pub occurred_at: DateTime<Utc>,
}

impl ChangeEvent {
    pub fn menu_item(action: ChangeAction, item: &MenuItem) -> Self {
        Self {
            action,
            entity: EntityKind::MenuItem,
            restaurant_id: item.restaurant_id.clone(),
            entity_id: item.item_id.clone(),
            occurred_at: Utc::now(),
        }
    }

    pub fn category(action: ChangeAction, category: &Category) -> Self {
        Self {
            action,
            entity: EntityKind::Category,
            restaurant_id: category.restaurant_id.clone(),
            entity_id: category.category_id.clone(),
            occurred_at: Utc::now(),
        }
    }
}

#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, event: ChangeEvent) -> Result<(), ServiceError>;
}

/// Default publisher: structured log records via `tracing`.
pub struct LogEventPublisher;

#[async_trait]
impl EventPublisher for LogEventPublisher {
    async fn publish(&self, event: ChangeEvent) -> Result<(), ServiceError> {
        info!(
            action = event.action.as_str(),
            entity = event.entity.as_str(),
            restaurant_id = %event.restaurant_id,
            entity_id = %event.entity_id,
            occurred_at = %event.occurred_at.to_rfc3339(),
            "menu_changed"
        );
        Ok(())
    }
}

/// Publisher that records every event; used by tests to assert emission.
#[derive(Default)]
pub struct RecordingEventPublisher {
    events: Mutex<Vec<ChangeEvent>>,
}

impl RecordingEventPublisher {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub async fn recorded(&self) -> Vec<ChangeEvent> {
        self.events.lock().await.clone()
    }
}

#[async_trait]
impl EventPublisher for RecordingEventPublisher {
    async fn publish(&self, event: ChangeEvent) -> Result<(), ServiceError> {
        self.events.lock().await.push(event);
        Ok(())
    }
}
