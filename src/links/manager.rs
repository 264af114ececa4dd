//! Write path for link records
//!
//! [`LinkManager`] sits between the host and a [`LinkStore`]. Every write is
//! validated first, and a write that leaves the title empty is followed by
//! exactly one more write carrying a derived title.

use crate::core::error::{LinkableError, LinkableResult};
use crate::core::events::{EventBus, LinkEvent};
use crate::core::link::LinkRecord;
use crate::core::resolver::{LinkResolver, LinkSummary};
use crate::core::service::LinkStore;
use std::sync::Arc;

/// Validating, title-back-filling front for a [`LinkStore`]
#[derive(Clone)]
pub struct LinkManager {
    store: Arc<dyn LinkStore>,
    resolver: LinkResolver,
    events: Option<EventBus>,
}

impl LinkManager {
    pub fn new(store: Arc<dyn LinkStore>, resolver: LinkResolver) -> Self {
        Self {
            store,
            resolver,
            events: None,
        }
    }

    /// Publish lifecycle events on `bus`
    pub fn with_event_bus(mut self, bus: EventBus) -> Self {
        self.events = Some(bus);
        self
    }

    pub fn resolver(&self) -> &LinkResolver {
        &self.resolver
    }

    /// A fresh, unsaved record with empty fields
    pub fn create(&self) -> LinkRecord {
        LinkRecord::new()
    }

    /// Get a record by id, failing when it does not exist
    pub async fn load(&self, id: u64) -> LinkableResult<LinkRecord> {
        self.find(id)
            .await?
            .ok_or(LinkableError::NotFound { id })
    }

    /// Get a record by id
    pub async fn find(&self, id: u64) -> LinkableResult<Option<LinkRecord>> {
        self.store.load(id).await.map_err(LinkableError::Storage)
    }

    /// Validate and write a record
    ///
    /// Unsaved records (`id == 0`) are inserted and receive an id; others are
    /// updated in place. If the title is still empty afterwards it is derived
    /// and written once more. A failure of that second write is returned as
    /// is: the first write has already happened.
    pub async fn save(&self, mut record: LinkRecord) -> LinkableResult<LinkRecord> {
        let result = self.resolver.validate(&record);
        if !result.is_valid() {
            return Err(LinkableError::ConstraintViolation {
                id: record.id,
                message: result.message().unwrap_or_default().to_string(),
            });
        }

        let css_class = record.take_css_class();
        let is_new = !record.is_persisted();

        let mut stored = if is_new {
            self.store.insert(record).await
        } else {
            self.store.update(record).await
        }
        .map_err(LinkableError::Storage)?;

        let link_type = stored.type_key().map(str::to_string);
        tracing::debug!(
            link_id = stored.id,
            link_type = link_type.as_deref().unwrap_or(""),
            created = is_new,
            "Saved link"
        );
        self.publish(if is_new {
            LinkEvent::Created {
                link_id: stored.id,
                link_type,
            }
        } else {
            LinkEvent::Updated {
                link_id: stored.id,
                link_type,
            }
        });

        if stored.title.is_empty() {
            stored.title = self.resolver.resolve_title(&stored);
            stored = self
                .store
                .update(stored)
                .await
                .map_err(LinkableError::Storage)?;

            tracing::debug!(link_id = stored.id, title = %stored.title, "Back-filled link title");
            self.publish(LinkEvent::TitleBackfilled {
                link_id: stored.id,
                title: stored.title.clone(),
            });
        }

        if let Some(class) = css_class {
            stored.set_css_class(class);
        }
        Ok(stored)
    }

    /// Delete a record; no other records are touched
    pub async fn delete(&self, id: u64) -> LinkableResult<()> {
        self.store.delete(id).await.map_err(LinkableError::Storage)?;
        tracing::debug!(link_id = id, "Deleted link");
        self.publish(LinkEvent::Deleted { link_id: id });
        Ok(())
    }

    /// All stored records
    pub async fn list(&self) -> LinkableResult<Vec<LinkRecord>> {
        self.store.list().await.map_err(LinkableError::Storage)
    }

    /// Listing rows for all stored records
    pub async fn summaries(&self) -> LinkableResult<Vec<LinkSummary>> {
        Ok(self
            .list()
            .await?
            .iter()
            .map(|record| self.resolver.summary(record))
            .collect())
    }

    /// Render a stored record, or `None` when it has nothing to link to
    pub async fn render(&self, id: u64, css_class: Option<&str>) -> LinkableResult<Option<String>> {
        let mut record = self.load(id).await?;
        if let Some(class) = css_class {
            record.set_css_class(class);
        }
        Ok(self.resolver.render(&record))
    }

    fn publish(&self, event: LinkEvent) {
        if let Some(bus) = &self.events {
            bus.publish(event);
        }
    }
}
