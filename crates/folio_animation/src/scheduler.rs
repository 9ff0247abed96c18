//! Task scheduler
//!
//! Holds every pending continuation of the page: one-shot timeouts,
//! repeating intervals and animation-frame requests. Tasks carry an opaque
//! payload that tells the driver whom to wake and why.
//!
//! The scheduler owns no clock and no thread. The driver asks for due tasks
//! with [`pop_due`](TaskScheduler::pop_due) as time advances and collects
//! frame requests with [`take_frame_requests`](TaskScheduler::take_frame_requests)
//! once per frame. Frames requested while a frame is being processed run on
//! the following frame.
//!
//! ```
//! use folio_animation::TaskScheduler;
//!
//! let mut scheduler = TaskScheduler::new();
//! scheduler.set_timeout(0, 500, "skills");
//! scheduler.request_frame("parallax");
//!
//! assert_eq!(scheduler.pop_due(499), None);
//! assert_eq!(scheduler.pop_due(500).map(|(_, p)| p), Some("skills"));
//! assert_eq!(scheduler.take_frame_requests().len(), 1);
//! ```

use folio_core::Millis;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle to a scheduled task
    pub struct TaskId;
}

/// How a task fires
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskKind {
    /// Fires once at its due time
    Timeout,
    /// Fires every `period` ms until cancelled
    Interval { period: Millis },
    /// Fires on the next animation frame
    Frame,
}

#[derive(Clone, Debug)]
struct Task<T> {
    due: Millis,
    /// Insertion order, breaks ties between equal due times
    seq: u64,
    kind: TaskKind,
    payload: T,
}

/// Pending timeouts, intervals and frame requests
#[derive(Debug)]
pub struct TaskScheduler<T> {
    tasks: SlotMap<TaskId, Task<T>>,
    next_seq: u64,
}

impl<T> Default for TaskScheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TaskScheduler<T> {
    pub fn new() -> Self {
        Self {
            tasks: SlotMap::with_key(),
            next_seq: 0,
        }
    }

    fn insert(&mut self, due: Millis, kind: TaskKind, payload: T) -> TaskId {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.tasks.insert(Task {
            due,
            seq,
            kind,
            payload,
        })
    }

    /// Run `payload` once, `delay` ms after `now`
    pub fn set_timeout(&mut self, now: Millis, delay: Millis, payload: T) -> TaskId {
        self.insert(now.saturating_add(delay), TaskKind::Timeout, payload)
    }

    /// Run `payload` every `period` ms, first at `now + period`
    pub fn set_interval(&mut self, now: Millis, period: Millis, payload: T) -> TaskId {
        let period = period.max(1);
        self.insert(
            now.saturating_add(period),
            TaskKind::Interval { period },
            payload,
        )
    }

    /// Run `payload` on the next animation frame
    pub fn request_frame(&mut self, payload: T) -> TaskId {
        self.insert(0, TaskKind::Frame, payload)
    }

    /// Cancel a task; returns false if it already ran or was cancelled
    pub fn cancel(&mut self, id: TaskId) -> bool {
        self.tasks.remove(id).is_some()
    }

    /// Cancel every task whose payload matches
    pub fn cancel_where<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        let before = self.tasks.len();
        self.tasks.retain(|_, task| !predicate(&task.payload));
        before - self.tasks.len()
    }

    pub fn is_pending(&self, id: TaskId) -> bool {
        self.tasks.contains_key(id)
    }

    pub fn kind(&self, id: TaskId) -> Option<TaskKind> {
        self.tasks.get(id).map(|task| task.kind)
    }

    /// Due time of the earliest timeout or interval
    pub fn next_due(&self) -> Option<Millis> {
        self.tasks
            .values()
            .filter(|task| task.kind != TaskKind::Frame)
            .map(|task| task.due)
            .min()
    }

    pub fn has_frame_requests(&self) -> bool {
        self.tasks.values().any(|task| task.kind == TaskKind::Frame)
    }

    /// Remove and return every frame request, oldest first
    pub fn take_frame_requests(&mut self) -> Vec<(TaskId, T)> {
        let mut ids: Vec<(u64, TaskId)> = self
            .tasks
            .iter()
            .filter(|(_, task)| task.kind == TaskKind::Frame)
            .map(|(id, task)| (task.seq, id))
            .collect();
        ids.sort_unstable_by_key(|(seq, _)| *seq);

        ids.into_iter()
            .filter_map(|(_, id)| self.tasks.remove(id).map(|task| (id, task.payload)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Number of pending timeouts and intervals
    pub fn timer_count(&self) -> usize {
        self.tasks
            .values()
            .filter(|task| task.kind != TaskKind::Frame)
            .count()
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
    }
}

impl<T: Clone> TaskScheduler<T> {
    /// Pop the earliest timer due at or before `now`
    ///
    /// Timeouts are removed; intervals are re-armed one period later and keep
    /// their `TaskId`, so they can still be cancelled by the same handle.
    pub fn pop_due(&mut self, now: Millis) -> Option<(TaskId, T)> {
        let (id, _) = self
            .tasks
            .iter()
            .filter(|(_, task)| task.kind != TaskKind::Frame && task.due <= now)
            .min_by_key(|(_, task)| (task.due, task.seq))?;

        match self.tasks[id].kind {
            TaskKind::Interval { period } => {
                let seq = self.next_seq;
                self.next_seq += 1;
                let task = &mut self.tasks[id];
                task.due = task.due.saturating_add(period);
                task.seq = seq;
                Some((id, task.payload.clone()))
            }
            _ => self.tasks.remove(id).map(|task| (id, task.payload)),
        }
    }
}
