use ticketlog_core::{ActivityShape, TASK_ID_BASE};

/// Synthesizes `task_id` values. The counter moves only for shapes that
/// carry a task, so assignments depend on processing order alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskIdAllocator {
    task_value: i64,
}

impl TaskIdAllocator {
    pub fn new(base: i64) -> Self {
        Self { task_value: base }
    }

    pub fn allocate(&mut self, shape: ActivityShape) -> Option<i64> {
        if !shape.has_task() {
            return None;
        }
        self.task_value += 1;
        Some(self.task_value)
    }

    /// Last value handed out, or the base if none was.
    pub fn current(&self) -> i64 {
        self.task_value
    }
}

impl Default for TaskIdAllocator {
    fn default() -> Self {
        Self::new(TASK_ID_BASE)
    }
}
