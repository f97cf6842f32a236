use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::model::{Activity, ActivityRecord, Note, Task};

/// Key holding the nested note object.
pub const NOTE_KEY: &str = "note";

/// Keys that mark a task when present in an activity record.
pub const TASK_KEYS: &[&str] = &[
    "shipping_address",
    "shipment_date",
    "category",
    "contacted_customer",
    "issue_type",
    "source",
    "status",
    "priority",
    "group",
    "agent_id",
    "requester",
    "product",
];

/// Which sub-records an activity carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityShape {
    Empty,
    NoteOnly,
    TaskOnly,
    NoteAndTask,
}

impl ActivityShape {
    /// Shapes the generator draws from, uniformly.
    pub const GENERATED: [ActivityShape; 3] = [
        ActivityShape::TaskOnly,
        ActivityShape::NoteOnly,
        ActivityShape::NoteAndTask,
    ];

    pub fn from_presence(has_note: bool, has_task: bool) -> Self {
        match (has_note, has_task) {
            (false, false) => ActivityShape::Empty,
            (true, false) => ActivityShape::NoteOnly,
            (false, true) => ActivityShape::TaskOnly,
            (true, true) => ActivityShape::NoteAndTask,
        }
    }

    pub fn has_note(self) -> bool {
        matches!(self, ActivityShape::NoteOnly | ActivityShape::NoteAndTask)
    }

    pub fn has_task(self) -> bool {
        matches!(self, ActivityShape::TaskOnly | ActivityShape::NoteAndTask)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ActivityShape::Empty => "empty",
            ActivityShape::NoteOnly => "note_only",
            ActivityShape::TaskOnly => "task_only",
            ActivityShape::NoteAndTask => "note_and_task",
        }
    }
}

impl std::fmt::Display for ActivityShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a raw record by the set of keys it holds. Key order is irrelevant.
pub fn classify_record(record: &ActivityRecord) -> ActivityShape {
    let has_note = record.contains_key(NOTE_KEY);
    let has_task = TASK_KEYS.iter().any(|key| record.contains_key(*key));
    ActivityShape::from_presence(has_note, has_task)
}

/// Classify a record and decode the sub-records its shape requires.
///
/// A partially present task (any task key without the full attribute set)
/// is a mismatch, never a task with missing columns.
pub fn decode_record(record: &ActivityRecord) -> Result<Activity> {
    let shape = classify_record(record);

    let note = if shape.has_note() {
        Some(decode_note(record)?)
    } else {
        None
    };
    let task = if shape.has_task() {
        Some(decode_task(record)?)
    } else {
        None
    };

    Ok(Activity::from_parts(note, task))
}

fn decode_note(record: &ActivityRecord) -> Result<Note> {
    let value = record
        .get(NOTE_KEY)
        .ok_or_else(|| Error::ShapeMismatch("note key missing".to_string()))?;
    if !value.is_object() {
        return Err(Error::ShapeMismatch("note must be an object".to_string()));
    }
    serde_json::from_value(value.clone())
        .map_err(|err| Error::ShapeMismatch(format!("invalid note: {err}")))
}

fn decode_task(record: &ActivityRecord) -> Result<Task> {
    let mut fields = record.clone();
    fields.remove(NOTE_KEY);
    serde_json::from_value(Value::Object(fields))
        .map_err(|err| Error::ShapeMismatch(format!("invalid task: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> ActivityRecord {
        value.as_object().cloned().expect("object")
    }

    fn task_fields() -> Value {
        json!({
            "shipping_address": "N/A",
            "shipment_date": "17 Oct, 2026",
            "category": "Email",
            "contacted_customer": false,
            "issue_type": "Other",
            "source": 8,
            "status": "Pending",
            "priority": 4,
            "group": "refund",
            "agent_id": 145009,
            "requester": 268049,
            "product": "tablet"
        })
    }

    #[test]
    fn classifies_by_key_presence() {
        assert_eq!(classify_record(&record(json!({}))), ActivityShape::Empty);
        assert_eq!(
            classify_record(&record(json!({"note": {"id": 1, "type": 1}}))),
            ActivityShape::NoteOnly
        );
        assert_eq!(
            classify_record(&record(task_fields())),
            ActivityShape::TaskOnly
        );
    }

    #[test]
    fn classification_ignores_key_order() {
        let mut fields = record(task_fields());
        fields.insert("note".to_string(), json!({"id": 9, "type": 3}));
        assert_eq!(classify_record(&fields), ActivityShape::NoteAndTask);

        let mut reordered = ActivityRecord::new();
        reordered.insert("note".to_string(), json!({"id": 9, "type": 3}));
        for (key, value) in record(task_fields()) {
            reordered.insert(key, value);
        }
        assert_eq!(classify_record(&reordered), ActivityShape::NoteAndTask);
    }

    #[test]
    fn decodes_note_and_task() {
        let mut fields = record(task_fields());
        fields.insert("note".to_string(), json!({"id": 480700, "type": 2}));
        let activity = decode_record(&fields).expect("decode");
        assert_eq!(activity.shape(), ActivityShape::NoteAndTask);
        assert_eq!(activity.note().map(|note| note.note_id), Some(480_700));
        assert_eq!(activity.task().map(|task| task.task_group.as_str()), Some("refund"));
    }

    #[test]
    fn partial_task_is_a_mismatch() {
        let fields = record(json!({"status": "Open", "priority": 1}));
        let err = decode_record(&fields).expect_err("partial task must fail");
        assert!(matches!(err, Error::ShapeMismatch(_)));
        assert!(err.to_string().contains("invalid task"));
    }

    #[test]
    fn shipment_date_is_optional() {
        let mut fields = record(task_fields());
        fields.remove("shipment_date");
        let activity = decode_record(&fields).expect("decode");
        assert_eq!(activity.task().and_then(|task| task.shipment_date.clone()), None);
    }

    #[test]
    fn non_object_note_is_a_mismatch() {
        let fields = record(json!({"note": 12}));
        assert!(matches!(
            decode_record(&fields),
            Err(Error::ShapeMismatch(_))
        ));
    }

    #[test]
    fn shape_flags() {
        assert!(ActivityShape::NoteAndTask.has_note());
        assert!(ActivityShape::NoteAndTask.has_task());
        assert!(!ActivityShape::NoteOnly.has_task());
        assert!(!ActivityShape::Empty.has_note());
    }
}
