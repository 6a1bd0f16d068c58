use crate::creature::Creature;

use super::RosterError;

/// Backing storage for one retrieval discipline.
///
/// Every implementation is bounded by the roster capacity and hands out
/// creatures in its own retrieval order. `iter` walks the store in that same
/// order, so the first item yielded is the next one `retrieve` returns.
pub trait RosterStore: core::fmt::Debug + Send + Sync {
    /// Inserts a creature, failing when the store is full.
    fn insert(&mut self, creature: Creature) -> Result<(), RosterError>;

    /// Removes the next creature in retrieval order.
    fn remove(&mut self) -> Result<Creature, RosterError>;

    /// Mode-specific shuffle triggered by a special action.
    fn reorder(&mut self);

    /// Drops every member and returns to the initial configuration.
    fn reset(&mut self);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Members in retrieval order.
    fn iter(&self) -> Box<dyn Iterator<Item = &Creature> + '_>;
}
