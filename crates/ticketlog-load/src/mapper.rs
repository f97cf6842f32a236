use std::collections::BTreeMap;

use ticketlog_core::{ActivityShape, PerformerType, Ticket};

use crate::allocator::TaskIdAllocator;
use crate::classifier::ActivityClassifier;
use crate::errors::LoadError;
use crate::reader::RawDocument;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketRow {
    pub ticket_id: i64,
    pub time_ticket_created: String,
    pub performed_at: String,
    pub performer_id: i64,
    pub note_id: Option<i64>,
    pub task_id: Option<i64>,
}

/// Inserted with first-write-wins semantics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PerformerRow {
    pub performer_id: i64,
    pub performer_type: PerformerType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteRow {
    pub note_id: i64,
    pub note_type: i64,
    pub ticket_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
    pub task_id: i64,
    pub shipping_address: String,
    pub category: String,
    pub contacted_customer: bool,
    pub issue_type: String,
    pub source: i64,
    pub status: String,
    pub priority: i64,
    pub task_group: String,
    pub agent_id: i64,
    pub requester: i64,
    pub product: String,
    pub ticket_id: i64,
}

/// One row-insert instruction for the table writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowInsert {
    Ticket(TicketRow),
    Performer(PerformerRow),
    Note(NoteRow),
    Task(TaskRow),
}

/// Maps decoded tickets onto relational rows, allocating task ids as it goes.
#[derive(Debug, Clone)]
pub struct RelationalMapper {
    time_ticket_created: String,
    allocator: TaskIdAllocator,
}

impl RelationalMapper {
    pub fn new(time_ticket_created: impl Into<String>, allocator: TaskIdAllocator) -> Self {
        Self {
            time_ticket_created: time_ticket_created.into(),
            allocator,
        }
    }

    pub fn map_ticket(&mut self, ticket: &Ticket) -> Vec<RowInsert> {
        let note = ticket.activity.note();
        let task = ticket.activity.task();
        let task_id = self.allocator.allocate(ticket.activity.shape());

        let mut rows = Vec::with_capacity(4);
        rows.push(RowInsert::Ticket(TicketRow {
            ticket_id: ticket.ticket_id,
            time_ticket_created: self.time_ticket_created.clone(),
            performed_at: ticket.performed_at.clone(),
            performer_id: ticket.performer_id,
            note_id: note.map(|note| note.note_id),
            task_id,
        }));
        rows.push(RowInsert::Performer(PerformerRow {
            performer_id: ticket.performer_id,
            performer_type: ticket.performer_type,
        }));

        if let Some(note) = note {
            rows.push(RowInsert::Note(NoteRow {
                note_id: note.note_id,
                note_type: i64::from(note.note_type),
                ticket_id: ticket.ticket_id,
            }));
        }

        if let (Some(task), Some(task_id)) = (task, task_id) {
            rows.push(RowInsert::Task(TaskRow {
                task_id,
                shipping_address: task.shipping_address.clone(),
                category: task.category.clone(),
                contacted_customer: task.contacted_customer,
                issue_type: task.issue_type.clone(),
                source: i64::from(task.source),
                status: task.status.clone(),
                priority: i64::from(task.priority),
                task_group: task.task_group.clone(),
                agent_id: task.agent_id,
                requester: task.requester,
                product: task.product.clone(),
                ticket_id: ticket.ticket_id,
            }));
        }

        rows
    }

    pub fn allocator(&self) -> &TaskIdAllocator {
        &self.allocator
    }
}

/// Every row of a document, in ticket order.
#[derive(Debug, Clone)]
pub struct MappedDocument {
    pub rows: Vec<RowInsert>,
    pub tickets: u64,
    pub shapes: BTreeMap<ActivityShape, u64>,
    pub last_task_id: i64,
}

/// Decode and map a whole document before anything touches storage, so a
/// malformed record aborts the load with no side effects.
pub fn map_document(
    document: RawDocument,
    allocator: TaskIdAllocator,
) -> Result<MappedDocument, LoadError> {
    let mut classifier = ActivityClassifier::new();
    let mut mapper = RelationalMapper::new(document.metadata.start_at, allocator);
    let mut rows = Vec::with_capacity(document.activities_data.len() * 3);
    let mut tickets = 0_u64;

    for (index, raw) in document.activities_data.into_iter().enumerate() {
        let ticket = classifier.decode_value(index, raw)?;
        rows.extend(mapper.map_ticket(&ticket));
        tickets += 1;
    }

    Ok(MappedDocument {
        rows,
        tickets,
        shapes: classifier.into_counts(),
        last_task_id: mapper.allocator().current(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::parse_document;

    const DOCUMENT: &str = r#"{
        "metadata": {"start_at": "30-11-2021 09:30:01 +0000", "end_at": "01-12-2021 09:30:00 +0000", "activities_count": 3},
        "activities_data": [
            {"performed_at": "30-11-2021 17:30:00 +0000", "ticket_id": 675211, "performer_type": "user", "performer_id": 104,
             "activity": {"note": {"id": 480652, "type": 2}}},
            {"performed_at": "01-12-2021 01:30:00 +0000", "ticket_id": 675212, "performer_type": "admin", "performer_id": 104,
             "activity": {"shipping_address": "N/A", "shipment_date": "01 Dec, 2021", "category": "Phone",
                          "contacted_customer": true, "issue_type": "Fault", "source": 2, "status": "Open",
                          "priority": 3, "group": "repair", "agent_id": 145001, "requester": 268001, "product": "mobile"}},
            {"performed_at": "01-12-2021 09:30:00 +0000", "ticket_id": 675213, "performer_type": "user", "performer_id": 119,
             "activity": {}}
        ]
    }"#;

    #[test]
    fn maps_rows_per_shape() {
        let document = parse_document(DOCUMENT).expect("parse");
        let mapped = map_document(document, TaskIdAllocator::default()).expect("map");

        assert_eq!(mapped.tickets, 3);
        assert_eq!(mapped.last_task_id, 50_001);
        assert_eq!(mapped.shapes.get(&ActivityShape::NoteOnly), Some(&1));
        assert_eq!(mapped.shapes.get(&ActivityShape::TaskOnly), Some(&1));
        assert_eq!(mapped.shapes.get(&ActivityShape::Empty), Some(&1));

        let tickets: Vec<&TicketRow> = mapped
            .rows
            .iter()
            .filter_map(|row| match row {
                RowInsert::Ticket(row) => Some(row),
                _ => None,
            })
            .collect();
        assert_eq!(tickets.len(), 3);
        assert_eq!((tickets[0].note_id, tickets[0].task_id), (Some(480_652), None));
        assert_eq!((tickets[1].note_id, tickets[1].task_id), (None, Some(50_001)));
        assert_eq!((tickets[2].note_id, tickets[2].task_id), (None, None));
        assert!(
            tickets
                .iter()
                .all(|row| row.time_ticket_created == "30-11-2021 09:30:01 +0000")
        );

        let notes = mapped
            .rows
            .iter()
            .filter(|row| matches!(row, RowInsert::Note(_)))
            .count();
        let tasks: Vec<&TaskRow> = mapped
            .rows
            .iter()
            .filter_map(|row| match row {
                RowInsert::Task(row) => Some(row),
                _ => None,
            })
            .collect();
        assert_eq!(notes, 1);
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].ticket_id, 675_212);
        assert_eq!(tasks[0].task_group, "repair");
    }

    #[test]
    fn missing_task_attribute_names_the_ticket() {
        let broken = DOCUMENT.replace(r#""status": "Open","#, "");
        let document = parse_document(&broken).expect("parse");
        let err = map_document(document, TaskIdAllocator::default()).expect_err("must fail");
        match err {
            LoadError::ShapeMismatch { ticket_id, reason } => {
                assert_eq!(ticket_id, 675_212);
                assert!(reason.contains("status"), "{reason}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unknown_performer_type_names_the_ticket() {
        let broken = DOCUMENT.replace(r#""performer_type": "admin""#, r#""performer_type": "agent""#);
        let document = parse_document(&broken).expect("parse");
        let err = map_document(document, TaskIdAllocator::default()).expect_err("must fail");
        assert!(
            matches!(err, LoadError::ShapeMismatch { ticket_id: 675_212, .. }),
            "{err}"
        );
    }
}
