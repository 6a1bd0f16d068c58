use std::cmp::Ordering;
use std::sync::Arc;

use arrayvec::ArrayVec;

use super::{PriorityKey, RosterError, RosterStore, SortOrder};
use crate::config::GameConfig;
use crate::creature::Creature;

/// Sorted store; the first entry has the highest (or lowest) key.
///
/// Entries carry an insertion sequence number so equal keys keep their
/// insertion order under either direction.
#[derive(Clone, Debug)]
pub struct PriorityStore {
    entries: ArrayVec<(u64, Creature), { GameConfig::ROSTER_CAPACITY }>,
    key: Arc<dyn PriorityKey>,
    order: SortOrder,
    initial_order: SortOrder,
    next_seq: u64,
}

impl PriorityStore {
    pub fn new(key: Arc<dyn PriorityKey>, order: SortOrder) -> Self {
        Self {
            entries: ArrayVec::new(),
            key,
            order,
            initial_order: order,
            next_seq: 0,
        }
    }

    /// Ordering of two keys under the current direction.
    fn compare(&self, a: i64, b: i64) -> Ordering {
        match self.order {
            SortOrder::Descending => b.cmp(&a),
            SortOrder::Ascending => a.cmp(&b),
        }
    }
}

impl RosterStore for PriorityStore {
    fn insert(&mut self, creature: Creature) -> Result<(), RosterError> {
        if self.entries.is_full() {
            return Err(RosterError::CapacityExceeded {
                capacity: GameConfig::ROSTER_CAPACITY,
            });
        }

        let key = self.key.key(&creature);
        // After every entry that sorts before or level with the new one.
        let position = self
            .entries
            .iter()
            .position(|(_, existing)| self.compare(self.key.key(existing), key).is_gt())
            .unwrap_or(self.entries.len());

        self.entries.insert(position, (self.next_seq, creature));
        self.next_seq += 1;
        Ok(())
    }

    fn remove(&mut self) -> Result<Creature, RosterError> {
        if self.entries.is_empty() {
            return Err(RosterError::EmptyRoster);
        }
        Ok(self.entries.remove(0).1)
    }

    /// Flips the sort direction and re-sorts every member.
    fn reorder(&mut self) {
        self.order = self.order.flip();

        let key = Arc::clone(&self.key);
        let order = self.order;
        self.entries.sort_by(|(seq_a, a), (seq_b, b)| {
            let (ka, kb) = (key.key(a), key.key(b));
            let by_key = match order {
                SortOrder::Descending => kb.cmp(&ka),
                SortOrder::Ascending => ka.cmp(&kb),
            };
            by_key.then(seq_a.cmp(seq_b))
        });
    }

    fn reset(&mut self) {
        self.entries.clear();
        self.order = self.initial_order;
        self.next_seq = 0;
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &Creature> + '_> {
        Box::new(self.entries.iter().map(|(_, creature)| creature))
    }
}
