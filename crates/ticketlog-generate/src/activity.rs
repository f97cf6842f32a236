use rand::RngCore;

use ticketlog_core::{Activity, ActivityShape, NOTE_ID_BASE, Note};

use crate::fields::RandomFieldProvider;

/// Run-wide note id counter. Advances once per note actually created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteSequence {
    next: i64,
}

impl NoteSequence {
    pub fn new(base: i64) -> Self {
        Self { next: base }
    }

    pub fn next_id(&mut self) -> i64 {
        let id = self.next;
        self.next += 1;
        id
    }

    /// Number of ids handed out since `base`.
    pub fn issued(&self, base: i64) -> i64 {
        self.next - base
    }
}

impl Default for NoteSequence {
    fn default() -> Self {
        Self::new(NOTE_ID_BASE)
    }
}

/// Builds an activity of a requested shape.
#[derive(Debug, Default)]
pub struct ActivityBuilder;

impl ActivityBuilder {
    pub fn build<R: RngCore>(
        &self,
        shape: ActivityShape,
        notes: &mut NoteSequence,
        fields: &mut RandomFieldProvider<R>,
        shipment_date: &str,
    ) -> Activity {
        let note = shape.has_note().then(|| Note {
            note_id: notes.next_id(),
            note_type: fields.note_type(),
        });
        let task = shape
            .has_task()
            .then(|| fields.task(shipment_date.to_string()));
        Activity::from_parts(note, task)
    }
}
