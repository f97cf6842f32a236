use chrono::{DateTime, SubsecRound, TimeDelta, Utc};
use rand::RngCore;

use ticketlog_core::{Activity, TICKET_ID_BASE, Ticket, format_timestamp};

use crate::errors::GenerationError;
use crate::fields::RandomFieldProvider;

/// Closed interval the tickets of one run are spread over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, GenerationError> {
        if end < start {
            return Err(GenerationError::InvalidArgument(
                "time window ends before it starts".to_string(),
            ));
        }
        Ok(Self { start, end })
    }

    pub fn ending_at(end: DateTime<Utc>, seconds: i64) -> Result<Self, GenerationError> {
        if seconds < 0 {
            return Err(GenerationError::InvalidArgument(format!(
                "window length must be >= 0 seconds, got {seconds}"
            )));
        }
        let start = TimeDelta::try_seconds(seconds)
            .and_then(|span| end.checked_sub_signed(span))
            .ok_or_else(|| {
                GenerationError::InvalidArgument(format!(
                    "window length {seconds}s is out of range"
                ))
            })?;
        Self::new(start, end)
    }

    /// Window ending at the current second.
    pub fn ending_now(seconds: i64) -> Result<Self, GenerationError> {
        Self::ending_at(Utc::now().trunc_subsecs(0), seconds)
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Linear interpolation: point `k` of `n` lands at `start + span * k / n`.
    pub fn point(&self, k: u64, n: u64) -> DateTime<Utc> {
        if n == 0 {
            return self.start;
        }
        let span_ms = i128::from((self.end - self.start).num_milliseconds());
        let offset_ms = span_ms * i128::from(k) / i128::from(n);
        let offset = i64::try_from(offset_ms).unwrap_or(i64::MAX);
        self.start + TimeDelta::milliseconds(offset)
    }
}

/// Wraps activities with ticket-level fields for a run of `total` tickets.
#[derive(Debug, Clone)]
pub struct TicketBuilder {
    window: TimeWindow,
    total: u64,
}

impl TicketBuilder {
    pub fn new(window: TimeWindow, total: u64) -> Self {
        Self { window, total }
    }

    /// Id of the `k`-th ticket (1-based). Counts are range-checked by
    /// `validate_number`, so this saturates only for unchecked input.
    pub fn ticket_id(&self, k: u64) -> i64 {
        i64::try_from(k)
            .ok()
            .and_then(|k| TICKET_ID_BASE.checked_add(k))
            .unwrap_or(i64::MAX)
    }

    pub fn performed_at(&self, k: u64) -> DateTime<Utc> {
        self.window.point(k, self.total)
    }

    pub fn build<R: RngCore>(
        &self,
        k: u64,
        activity: Activity,
        fields: &mut RandomFieldProvider<R>,
    ) -> Ticket {
        Ticket {
            performed_at: format_timestamp(&self.performed_at(k)),
            ticket_id: self.ticket_id(k),
            performer_type: fields.performer_type(),
            performer_id: fields.performer_id(),
            activity,
        }
    }
}
