use std::collections::BTreeMap;
use std::time::Instant;

use rand::RngCore;
use tracing::{debug, info};

use ticketlog_core::{
    ActivityShape, Document, NOTE_ID_BASE, TICKET_ID_BASE, format_shipment_date,
};

use crate::activity::{ActivityBuilder, NoteSequence};
use crate::errors::GenerationError;
use crate::fields::RandomFieldProvider;
use crate::model::GenerateOptions;
use crate::report::ReportAssembler;
use crate::ticket::{TicketBuilder, TimeWindow};

/// Entry point for generating an activity document.
#[derive(Debug, Clone, Default)]
pub struct GenerationEngine {
    options: GenerateOptions,
}

impl GenerationEngine {
    pub fn new(options: GenerateOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &GenerateOptions {
        &self.options
    }

    /// Generate `number` tickets over a window ending now.
    pub fn run(&self, number: i64) -> Result<Document, GenerationError> {
        let total = validate_number(number)?;
        let window = TimeWindow::ending_now(self.options.window_seconds)?;
        match self.options.seed {
            Some(seed) => {
                let mut fields = RandomFieldProvider::seeded(seed);
                generate(total, window, &mut fields)
            }
            None => {
                let mut fields = RandomFieldProvider::from_entropy();
                generate(total, window, &mut fields)
            }
        }
    }

    /// Generate over a caller-provided window and random source.
    pub fn run_with<R: RngCore>(
        &self,
        number: i64,
        window: TimeWindow,
        fields: &mut RandomFieldProvider<R>,
    ) -> Result<Document, GenerationError> {
        let total = validate_number(number)?;
        generate(total, window, fields)
    }
}

/// Check a requested ticket count. The last ticket id must fit in `i64`.
pub fn validate_number(number: i64) -> Result<u64, GenerationError> {
    if number <= 0 {
        return Err(GenerationError::InvalidArgument(format!(
            "number of tickets must be 1 or greater, got {number}"
        )));
    }
    if TICKET_ID_BASE.checked_add(number).is_none() {
        return Err(GenerationError::InvalidArgument(format!(
            "number of tickets {number} overflows the ticket id range"
        )));
    }
    Ok(number as u64)
}

fn generate<R: RngCore>(
    total: u64,
    window: TimeWindow,
    fields: &mut RandomFieldProvider<R>,
) -> Result<Document, GenerationError> {
    let start = Instant::now();
    let run_id = uuid::Uuid::new_v4().to_string();
    info!(run_id = %run_id, tickets = total, "generation started");

    let tickets = TicketBuilder::new(window, total);
    let activities = ActivityBuilder;
    let mut notes = NoteSequence::new(NOTE_ID_BASE);
    let mut report = ReportAssembler::with_capacity(window, total.min(1 << 20) as usize);
    let mut shapes: BTreeMap<ActivityShape, u64> = BTreeMap::new();

    for k in 1..=total {
        let shape = fields.shape();
        let shipment_date = format_shipment_date(&tickets.performed_at(k));
        let activity = activities.build(shape, &mut notes, fields, &shipment_date);
        let ticket = tickets.build(k, activity, fields);
        debug!(ticket_id = ticket.ticket_id, shape = %shape, "ticket generated");
        *shapes.entry(shape).or_insert(0) += 1;
        report.add_ticket(ticket);
    }

    let document = report.finish();
    info!(
        run_id = %run_id,
        tickets = document.metadata.activities_count,
        notes = notes.issued(NOTE_ID_BASE),
        note_only = shapes.get(&ActivityShape::NoteOnly).copied().unwrap_or(0),
        task_only = shapes.get(&ActivityShape::TaskOnly).copied().unwrap_or(0),
        note_and_task = shapes.get(&ActivityShape::NoteAndTask).copied().unwrap_or(0),
        duration_ms = start.elapsed().as_millis() as u64,
        "generation completed"
    );
    Ok(document)
}
