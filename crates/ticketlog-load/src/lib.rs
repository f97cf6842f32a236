//! Loads activity documents into a normalized SQLite store.
//!
//! Records are classified by shape, given synthetic task ids, mapped onto
//! the `Tickets`, `Performer`, `Note` and `Task` tables, and written under a
//! single commit.

pub mod allocator;
pub mod classifier;
pub mod engine;
pub mod errors;
pub mod mapper;
pub mod reader;
pub mod schema;
pub mod writer;

pub use allocator::TaskIdAllocator;
pub use classifier::ActivityClassifier;
pub use engine::{LoadOptions, LoadReport, load_document, load_file};
pub use errors::LoadError;
pub use sqlx::Error as StorageError;
pub use mapper::{
    MappedDocument, NoteRow, PerformerRow, RelationalMapper, RowInsert, TaskRow, TicketRow,
    map_document,
};
pub use reader::{RawDocument, parse_document, read_document};
pub use writer::{TableWriter, WriteSummary};
