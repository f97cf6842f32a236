use std::collections::BTreeMap;
use std::path::Path;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use ticketlog_core::{ActivityShape, TASK_ID_BASE};

use crate::allocator::TaskIdAllocator;
use crate::errors::LoadError;
use crate::mapper::{MappedDocument, map_document};
use crate::reader::{RawDocument, read_document};
use crate::writer::{TableWriter, WriteSummary};

/// Options for a load run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadOptions {
    /// Seed of the task id counter.
    pub task_id_base: i64,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            task_id_base: TASK_ID_BASE,
        }
    }
}

/// Outcome of a successful load.
#[derive(Debug, Clone)]
pub struct LoadReport {
    pub run_id: String,
    pub tickets: u64,
    pub shapes: BTreeMap<ActivityShape, u64>,
    pub written: WriteSummary,
    /// Last task id handed out, or the base when no ticket carried a task.
    pub last_task_id: i64,
    pub duration_ms: u64,
}

/// Load a document file into a new SQLite store at `output`.
///
/// The input is read and fully mapped before the store is opened.
pub async fn load_file(
    input: &Path,
    output: &Path,
    options: &LoadOptions,
) -> Result<LoadReport, LoadError> {
    let document = read_document(input)?;
    info!(
        input = %input.display(),
        tickets = document.activities_data.len(),
        "document read"
    );

    let start = Instant::now();
    let mapped = map_document(document, TaskIdAllocator::new(options.task_id_base))?;

    let mut writer = TableWriter::open(output).await?;
    let outcome = store(&mut writer, mapped, start).await;
    let closed = writer.close().await;
    settle(outcome, closed)
}

/// A load error outranks a failure to close the store afterwards.
fn settle(
    outcome: Result<LoadReport, LoadError>,
    closed: Result<(), LoadError>,
) -> Result<LoadReport, LoadError> {
    match (outcome, closed) {
        (outcome, Ok(())) => outcome,
        (Ok(_), Err(err)) => Err(err),
        (Err(err), Err(close_err)) => {
            warn!(error = %close_err, "store not closed after failed load");
            Err(err)
        }
    }
}

/// Load an in-memory document through an already open writer.
pub async fn load_document(
    writer: &mut TableWriter,
    document: RawDocument,
    options: &LoadOptions,
) -> Result<LoadReport, LoadError> {
    let start = Instant::now();
    let mapped = map_document(document, TaskIdAllocator::new(options.task_id_base))?;
    store(writer, mapped, start).await
}

async fn store(
    writer: &mut TableWriter,
    mapped: MappedDocument,
    start: Instant,
) -> Result<LoadReport, LoadError> {
    let run_id = uuid::Uuid::new_v4().to_string();
    info!(run_id = %run_id, store = %writer.target(), rows = mapped.rows.len(), "load started");

    if let Err(err) = writer.create_tables().await {
        warn!(run_id = %run_id, error = %err, "schema not created");
        return Err(err);
    }

    let written = match writer.apply(&mapped.rows).await {
        Ok(written) => written,
        Err(err) => {
            warn!(run_id = %run_id, error = %err, "row batch not committed");
            return Err(err);
        }
    };

    let report = LoadReport {
        run_id,
        tickets: mapped.tickets,
        shapes: mapped.shapes,
        written,
        last_task_id: mapped.last_task_id,
        duration_ms: start.elapsed().as_millis() as u64,
    };

    info!(
        run_id = %report.run_id,
        tickets = report.written.tickets,
        performers = report.written.performers,
        performers_ignored = report.written.performers_ignored,
        notes = report.written.notes,
        tasks = report.written.tasks,
        duration_ms = report.duration_ms,
        "load committed"
    );
    Ok(report)
}
