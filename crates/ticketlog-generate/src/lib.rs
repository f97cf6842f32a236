//! Synthetic helpdesk activity generation.
//!
//! Draws random notes and tasks, wraps them in sequentially numbered tickets
//! spread over a time window, and assembles the activity document.

pub mod activity;
pub mod engine;
pub mod errors;
pub mod fields;
pub mod model;
pub mod output;
pub mod report;
pub mod ticket;

pub use activity::{ActivityBuilder, NoteSequence};
pub use engine::{GenerationEngine, validate_number};
pub use errors::GenerationError;
pub use fields::RandomFieldProvider;
pub use model::{DEFAULT_WINDOW_SECONDS, GenerateOptions};
pub use output::json::write_document;
pub use report::ReportAssembler;
pub use ticket::{TicketBuilder, TimeWindow};
