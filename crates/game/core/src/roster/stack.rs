use arrayvec::ArrayVec;

use super::{RosterError, RosterStore};
use crate::config::GameConfig;
use crate::creature::Creature;

/// LIFO store; the top of the stack is the end of the vector.
#[derive(Clone, Debug, Default)]
pub struct StackStore {
    items: ArrayVec<Creature, { GameConfig::ROSTER_CAPACITY }>,
}

impl StackStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RosterStore for StackStore {
    fn insert(&mut self, creature: Creature) -> Result<(), RosterError> {
        self.items
            .try_push(creature)
            .map_err(|_| RosterError::CapacityExceeded {
                capacity: GameConfig::ROSTER_CAPACITY,
            })
    }

    fn remove(&mut self) -> Result<Creature, RosterError> {
        self.items.pop().ok_or(RosterError::EmptyRoster)
    }

    /// Reverses the topmost members, at most three of them.
    fn reorder(&mut self) {
        let len = self.items.len();
        let depth = len.min(GameConfig::STACK_REORDER_DEPTH);
        self.items[len - depth..].reverse();
    }

    fn reset(&mut self) {
        self.items.clear();
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &Creature> + '_> {
        Box::new(self.items.iter().rev())
    }
}
