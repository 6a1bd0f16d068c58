use std::collections::VecDeque;

use super::{RosterError, RosterStore};
use crate::config::GameConfig;
use crate::creature::Creature;

/// FIFO store; the head of the queue is retrieved first.
#[derive(Clone, Debug)]
pub struct QueueStore {
    items: VecDeque<Creature>,
}

impl QueueStore {
    pub fn new() -> Self {
        Self {
            items: VecDeque::with_capacity(GameConfig::ROSTER_CAPACITY),
        }
    }
}

impl Default for QueueStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RosterStore for QueueStore {
    fn insert(&mut self, creature: Creature) -> Result<(), RosterError> {
        if self.items.len() >= GameConfig::ROSTER_CAPACITY {
            return Err(RosterError::CapacityExceeded {
                capacity: GameConfig::ROSTER_CAPACITY,
            });
        }
        self.items.push_back(creature);
        Ok(())
    }

    fn remove(&mut self) -> Result<Creature, RosterError> {
        self.items.pop_front().ok_or(RosterError::EmptyRoster)
    }

    /// Moves the back half (the larger one for odd sizes) to the front,
    /// keeping the order inside each half.
    fn reorder(&mut self) {
        let half = self.items.len() / 2;
        self.items.rotate_left(half);
    }

    fn reset(&mut self) {
        self.items.clear();
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &Creature> + '_> {
        Box::new(self.items.iter())
    }
}
