//! Explicit message passing between components
//!
//! Components never call each other. When one component's state matters to
//! another (the skills section was revealed, the page finished loading) it
//! publishes a message; the page drains the bus after every dispatch and
//! delivers each message to every attached component.

use std::collections::VecDeque;

/// A FIFO of messages awaiting delivery
#[derive(Debug)]
pub struct MessageBus<M> {
    queue: VecDeque<M>,
    published: u64,
}

impl<M> Default for MessageBus<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> MessageBus<M> {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
            published: 0,
        }
    }

    pub fn publish(&mut self, message: M) {
        self.published += 1;
        self.queue.push_back(message);
    }

    /// Pop the oldest undelivered message
    pub fn next(&mut self) -> Option<M> {
        self.queue.pop_front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Total messages ever published
    pub fn published(&self) -> u64 {
        self.published
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }
}
