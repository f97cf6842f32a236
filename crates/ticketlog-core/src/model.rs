use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::Error;
use crate::shape::{ActivityShape, decode_record};

/// Undecoded activity payload as it appears in a document.
pub type ActivityRecord = Map<String, Value>;

/// Generator output: window metadata plus tickets in generation order.
///
/// The activity type is generic so the loader can read records verbatim and
/// decode each one with ticket context attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document<A = Activity> {
    pub metadata: Metadata,
    pub activities_data: Vec<Ticket<A>>,
}

/// Report-wide window and ticket count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Start of the generation window; copied onto every loaded ticket row.
    pub start_at: String,
    pub end_at: String,
    pub activities_count: u64,
}

/// One helpdesk activity event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket<A = Activity> {
    pub performed_at: String,
    pub ticket_id: i64,
    pub performer_type: PerformerType,
    /// Real-world actor id; shared between tickets.
    pub performer_id: i64,
    pub activity: A,
}

/// Who performed the activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformerType {
    User,
    Admin,
}

impl PerformerType {
    pub const ALL: [PerformerType; 2] = [PerformerType::User, PerformerType::Admin];

    pub fn as_str(self) -> &'static str {
        match self {
            PerformerType::User => "user",
            PerformerType::Admin => "admin",
        }
    }
}

impl std::fmt::Display for PerformerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Note attached to an activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    #[serde(rename = "id")]
    pub note_id: i64,
    /// Note category, 1 to 4.
    #[serde(rename = "type")]
    pub note_type: u8,
}

/// Task attributes carried inline in an activity record.
///
/// A task has no id in the document; the loader assigns one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub shipping_address: String,
    /// Display-only date (`DD Mon, YYYY`); not persisted by the loader.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipment_date: Option<String>,
    pub category: String,
    pub contacted_customer: bool,
    pub issue_type: String,
    pub source: u8,
    pub status: String,
    pub priority: u8,
    #[serde(rename = "group")]
    pub task_group: String,
    pub agent_id: i64,
    pub requester: i64,
    pub product: String,
}

/// Activity payload, tagged once when it is built or decoded.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "ActivityRecord")]
pub enum Activity {
    Empty,
    NoteOnly(Note),
    TaskOnly(Task),
    NoteAndTask(Note, Task),
}

impl Activity {
    pub fn from_parts(note: Option<Note>, task: Option<Task>) -> Self {
        match (note, task) {
            (None, None) => Activity::Empty,
            (Some(note), None) => Activity::NoteOnly(note),
            (None, Some(task)) => Activity::TaskOnly(task),
            (Some(note), Some(task)) => Activity::NoteAndTask(note, task),
        }
    }

    pub fn shape(&self) -> ActivityShape {
        match self {
            Activity::Empty => ActivityShape::Empty,
            Activity::NoteOnly(_) => ActivityShape::NoteOnly,
            Activity::TaskOnly(_) => ActivityShape::TaskOnly,
            Activity::NoteAndTask(_, _) => ActivityShape::NoteAndTask,
        }
    }

    pub fn note(&self) -> Option<&Note> {
        match self {
            Activity::NoteOnly(note) | Activity::NoteAndTask(note, _) => Some(note),
            Activity::Empty | Activity::TaskOnly(_) => None,
        }
    }

    pub fn task(&self) -> Option<&Task> {
        match self {
            Activity::TaskOnly(task) | Activity::NoteAndTask(_, task) => Some(task),
            Activity::Empty | Activity::NoteOnly(_) => None,
        }
    }
}

impl TryFrom<ActivityRecord> for Activity {
    type Error = Error;

    fn try_from(record: ActivityRecord) -> Result<Self, Self::Error> {
        decode_record(&record)
    }
}

/// Serializes back to the document layout: an optional `note` object followed
/// by the task attributes inlined at the same level.
impl Serialize for Activity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Inline<'a> {
            #[serde(skip_serializing_if = "Option::is_none")]
            note: Option<&'a Note>,
            #[serde(flatten)]
            task: Option<&'a Task>,
        }

        Inline {
            note: self.note(),
            task: self.task(),
        }
        .serialize(serializer)
    }
}
