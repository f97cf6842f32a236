use ticketlog_core::{Document, Metadata, Ticket, format_timestamp};

use crate::ticket::TimeWindow;

/// Collects tickets in generation order and emits the final document.
#[derive(Debug, Clone)]
pub struct ReportAssembler {
    window: TimeWindow,
    tickets: Vec<Ticket>,
}

impl ReportAssembler {
    pub fn with_capacity(window: TimeWindow, capacity: usize) -> Self {
        Self {
            window,
            tickets: Vec::with_capacity(capacity),
        }
    }

    pub fn add_ticket(&mut self, ticket: Ticket) {
        self.tickets.push(ticket);
    }

    pub fn finish(self) -> Document {
        let metadata = Metadata {
            start_at: format_timestamp(&self.window.start()),
            end_at: format_timestamp(&self.window.end()),
            activities_count: self.tickets.len() as u64,
        };
        Document {
            metadata,
            activities_data: self.tickets,
        }
    }
}
