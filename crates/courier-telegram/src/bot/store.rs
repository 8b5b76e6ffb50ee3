//! Holder for the current update and the last polled batch.

use courier_core::update::{Update, UpdateBatch};

#[derive(Debug, Default)]
pub struct UpdateStore {
    current: Option<Update>,
    batch: UpdateBatch,
}

impl UpdateStore {
    pub fn current(&self) -> Option<&Update> {
        self.current.as_ref()
    }

    pub fn set_current(&mut self, update: Update) -> &Update {
        self.current.insert(update)
    }

    pub fn batch(&self) -> &UpdateBatch {
        &self.batch
    }

    pub fn replace_batch(&mut self, batch: UpdateBatch) {
        self.batch = batch;
    }

    /// Copy `batch[index]` into the current slot.
    pub fn select(&mut self, index: usize) -> Option<&Update> {
        let update = self.batch.get(index)?.clone();
        Some(self.current.insert(update))
    }
}
