use std::collections::BTreeMap;

use serde_json::Value;
use ticketlog_core::{
    Activity, ActivityRecord, ActivityShape, Error as CoreError, Ticket, classify_record,
};

use crate::errors::LoadError;

/// Classifies raw activity records and decodes them into typed activities,
/// keeping a tally of the shapes seen.
#[derive(Debug, Default)]
pub struct ActivityClassifier {
    counts: BTreeMap<ActivityShape, u64>,
}

impl ActivityClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shape of a raw record, by key set alone.
    pub fn classify(&self, record: &ActivityRecord) -> ActivityShape {
        classify_record(record)
    }

    /// Decode the ticket at `index` of a document: ticket fields first, then
    /// the activity.
    pub fn decode_value(&mut self, index: usize, value: Value) -> Result<Ticket, LoadError> {
        let Some(ticket_id) = value.get("ticket_id").and_then(Value::as_i64) else {
            return Err(LoadError::InvalidRecord {
                index,
                reason: "ticket_id missing or not an integer".to_string(),
            });
        };
        let raw: Ticket<ActivityRecord> =
            serde_json::from_value(value).map_err(|err| LoadError::ShapeMismatch {
                ticket_id,
                reason: format!("invalid ticket: {err}"),
            })?;
        self.decode(raw)
    }

    pub fn decode(&mut self, ticket: Ticket<ActivityRecord>) -> Result<Ticket, LoadError> {
        let ticket_id = ticket.ticket_id;
        let activity = Activity::try_from(ticket.activity).map_err(|err| match err {
            CoreError::ShapeMismatch(reason) => LoadError::ShapeMismatch { ticket_id, reason },
            other => LoadError::ShapeMismatch {
                ticket_id,
                reason: other.to_string(),
            },
        })?;

        *self.counts.entry(activity.shape()).or_insert(0) += 1;

        Ok(Ticket {
            performed_at: ticket.performed_at,
            ticket_id,
            performer_type: ticket.performer_type,
            performer_id: ticket.performer_id,
            activity,
        })
    }

    pub fn into_counts(self) -> BTreeMap<ActivityShape, u64> {
        self.counts
    }
}
