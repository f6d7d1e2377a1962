// ABOUTME: Append-only message transcript for one chat session
// ABOUTME: Ordered storage with in-place field updates addressed by MessageId

use crate::message::{Message, MessageId};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Ordered transcript. Messages are never removed or reordered.
#[derive(Debug, Default)]
pub struct MessageStore {
    messages: RwLock<Vec<Message>>,
}

impl MessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    // A poisoned lock still holds a consistent Vec: every write is a single field assignment.
    fn read(&self) -> RwLockReadGuard<'_, Vec<Message>> {
        self.messages.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Message>> {
        self.messages.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Append a new message with all optional fields unset.
    pub fn append(&self, text: String) -> MessageId {
        let mut messages = self.write();
        let id = MessageId::from_index(messages.len());
        messages.push(Message::new(id, text));
        id
    }

    pub fn get(&self, id: MessageId) -> Option<Message> {
        self.read().get(id.index()).cloned()
    }

    /// Apply `f` to the message under the write lock.
    /// Returns None if no message has this id.
    pub fn update<R>(&self, id: MessageId, f: impl FnOnce(&mut Message) -> R) -> Option<R> {
        self.write().get_mut(id.index()).map(f)
    }

    /// Copy of the whole transcript for rendering.
    pub fn snapshot(&self) -> Vec<Message> {
        self.read().clone()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }
}
