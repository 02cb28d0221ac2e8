use std::cell::Cell;
use std::rc::Rc;

use super::BestScoreStore;

/// In-memory store; clones share the same slot
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    best: Rc<Cell<u32>>,
    writes: Rc<Cell<u32>>,
}

impl MemoryStore {
    pub fn new(best: u32) -> Self {
        Self {
            best: Rc::new(Cell::new(best)),
            writes: Rc::new(Cell::new(0)),
        }
    }

    /// Number of saves so far
    pub fn writes(&self) -> u32 {
        self.writes.get()
    }
}

impl BestScoreStore for MemoryStore {
    fn load_best(&self) -> u32 {
        self.best.get()
    }

    fn save_best(&mut self, best: u32) {
        self.best.set(best);
        self.writes.set(self.writes.get() + 1);
    }
}
