//! Core contracts for ticketlog.
//!
//! This crate defines the activity document shared by the generator and the
//! loader: tickets, the note/task activity union, shape classification of raw
//! activity records, and the fixed timestamp formats.

pub mod error;
pub mod model;
pub mod shape;
pub mod time;

pub use error::{Error, Result};
pub use model::{Activity, ActivityRecord, Document, Metadata, Note, PerformerType, Task, Ticket};
pub use shape::{ActivityShape, TASK_KEYS, classify_record};
pub use time::{
    SHIPMENT_DATE_FORMAT, TIMESTAMP_FORMAT, format_shipment_date, format_timestamp,
    parse_timestamp,
};

/// Offset added to the 1-based ticket counter of a generation run.
pub const TICKET_ID_BASE: i64 = 675_210;

/// First note id handed out by a generation run.
pub const NOTE_ID_BASE: i64 = 480_652;

/// Seed of the loader's task id counter; the first task receives `base + 1`.
pub const TASK_ID_BASE: i64 = 50_000;
