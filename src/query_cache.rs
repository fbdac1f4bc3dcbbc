use crate::domain::todo::driven_ports::{TaskCache, TaskList};
use crate::domain::todo::{QueryKey, TodoTask};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Process-local query cache. Entries never expire; they are only replaced or invalidated.
#[derive(Default)]
pub struct InMemoryQueryCache {
    entries: RwLock<HashMap<QueryKey, TaskList>>,
}

impl InMemoryQueryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TaskCache for InMemoryQueryCache {
    fn read(&self, key: QueryKey) -> Option<TaskList> {
        self.entries.read().get(&key).cloned()
    }

    fn write(&self, key: QueryKey, tasks: TaskList) {
        debug!(%key, count = tasks.len(), "Writing cache entry");
        self.entries.write().insert(key, tasks);
    }

    fn patch<F>(&self, key: QueryKey, patch: F) -> bool
    where
        F: FnOnce(&[TodoTask]) -> Vec<TodoTask>,
    {
        // Held across the whole read-modify-write so concurrent patches apply one at a time
        let mut entries = self.entries.write();
        let Some(current) = entries.get(&key) else {
            debug!(%key, "No cache entry to patch");
            return false;
        };

        let patched = Arc::new(patch(current));
        entries.insert(key, patched);
        true
    }

    fn invalidate(&self, key: QueryKey) {
        debug!(%key, "Invalidating cache entry");
        self.entries.write().remove(&key);
    }
}
