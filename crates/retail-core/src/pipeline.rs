//! Batch cleaning across entities.
//!
//! Entities are cleaned dimensions first. Each dimension that cleans
//! successfully contributes its primary keys to the [`ReferenceKeys`] used to
//! filter orders, so orders never reference a row dropped during cleaning.

use std::collections::BTreeMap;

use polars::prelude::DataFrame;
use tracing::warn;

use retail_model::Entity;

use crate::cleaners::clean_entity;
use crate::error::Result;
use crate::frame::CleanedFrame;
use crate::references::ReferenceKeys;

/// Outcome of cleaning one entity within a batch.
#[derive(Debug)]
pub struct BatchEntry {
    pub entity: Entity,
    pub result: Result<CleanedFrame>,
}

/// Clean every supplied raw frame in load order.
pub fn clean_batch(raw: &BTreeMap<Entity, DataFrame>) -> Vec<BatchEntry> {
    let mut refs = ReferenceKeys::new();
    let entities: Vec<Entity> = raw.keys().copied().collect();
    let mut entries = Vec::with_capacity(entities.len());
    for entity in Entity::in_load_order(&entities) {
        let Some(frame) = raw.get(&entity) else {
            continue;
        };
        let result = clean_entity(entity, frame, &refs);
        match &result {
            Ok(cleaned) if entity.is_dimension() => refs.insert_frame(&cleaned.frame),
            Ok(_) => {}
            Err(error) => warn!(entity = %entity, %error, "cleaning failed"),
        }
        entries.push(BatchEntry { entity, result });
    }
    entries
}
