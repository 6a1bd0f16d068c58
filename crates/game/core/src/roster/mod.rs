//! Bounded creature rosters with three retrieval disciplines.
//!
//! ```text
//! Front    (LIFO)      add pushes on top, retrieve pops the top
//! Back     (FIFO)      add enqueues at the tail, retrieve takes the head
//! Optimise (priority)  kept sorted by a PriorityKey, retrieve takes the first
//! ```
//!
//! All three share the [`RosterStore`] contract. A [`Roster`] wraps one store
//! together with the record of every recruited creature (used by
//! [`Roster::regenerate`]) and the tower life counter.

mod priority;
mod queue;
mod stack;
mod store;

pub use priority::PriorityStore;
pub use queue::QueueStore;
pub use stack::StackStore;
pub use store::RosterStore;

use std::sync::Arc;

use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::creature::Creature;
use crate::element::Element;
use crate::error::{ErrorSeverity, GameError};
use crate::stats::StatKind;

// ============================================================================
// Errors
// ============================================================================

/// Roster operation failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RosterError {
    #[error("roster is full (capacity {capacity})")]
    CapacityExceeded { capacity: usize },

    #[error("roster is empty")]
    EmptyRoster,
}

impl GameError for RosterError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::CapacityExceeded { .. } => ErrorSeverity::Validation,
            Self::EmptyRoster => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::CapacityExceeded { .. } => "ROSTER_CAPACITY_EXCEEDED",
            Self::EmptyRoster => "ROSTER_EMPTY",
        }
    }
}

// ============================================================================
// Modes and priority keys
// ============================================================================

/// Retrieval discipline of a roster.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum RosterMode {
    /// Last in, first out.
    #[strum(to_string = "front", serialize = "lifo")]
    Front,
    /// First in, first out.
    #[default]
    #[strum(to_string = "back", serialize = "fifo")]
    Back,
    /// Sorted by a priority key.
    #[strum(to_string = "optimise", serialize = "optimize", serialize = "priority")]
    Optimise,
}

/// Direction of a priority ordering.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum SortOrder {
    /// Highest key first.
    #[default]
    Descending,
    /// Lowest key first.
    Ascending,
}

impl SortOrder {
    pub const fn flip(self) -> Self {
        match self {
            Self::Descending => Self::Ascending,
            Self::Ascending => Self::Descending,
        }
    }
}

/// Ordering strategy for priority rosters.
pub trait PriorityKey: core::fmt::Debug + Send + Sync {
    /// Sort key for `creature`; larger keys come first when descending.
    fn key(&self, creature: &Creature) -> i64;
}

impl PriorityKey for StatKind {
    fn key(&self, creature: &Creature) -> i64 {
        creature.stat(*self)
    }
}

// ============================================================================
// Roster
// ============================================================================

/// A team of creatures with a fixed retrieval discipline.
#[derive(Debug)]
pub struct Roster {
    mode: RosterMode,
    store: Box<dyn RosterStore>,
    record: ArrayVec<Creature, { GameConfig::ROSTER_CAPACITY }>,
    lives: u32,
}

impl Roster {
    /// Creates an empty roster. Priority rosters sort by current HP,
    /// highest first.
    pub fn new(mode: RosterMode) -> Self {
        let store: Box<dyn RosterStore> = match mode {
            RosterMode::Front => Box::new(StackStore::new()),
            RosterMode::Back => Box::new(QueueStore::new()),
            RosterMode::Optimise => Box::new(PriorityStore::new(
                Arc::new(StatKind::Hp),
                SortOrder::Descending,
            )),
        };
        Self::with_store(mode, store)
    }

    /// Creates an empty priority roster ordered by `key`.
    pub fn prioritised(key: impl PriorityKey + 'static, order: SortOrder) -> Self {
        Self::with_store(
            RosterMode::Optimise,
            Box::new(PriorityStore::new(Arc::new(key), order)),
        )
    }

    fn with_store(mode: RosterMode, store: Box<dyn RosterStore>) -> Self {
        Self {
            mode,
            store,
            record: ArrayVec::new(),
            lives: 0,
        }
    }

    /// Adds a team member at build time, recording it for regeneration.
    pub fn recruit(&mut self, creature: Creature) -> Result<(), RosterError> {
        if self.record.is_full() {
            return Err(RosterError::CapacityExceeded {
                capacity: GameConfig::ROSTER_CAPACITY,
            });
        }
        self.store.insert(creature.clone())?;
        self.record.push(creature);
        Ok(())
    }

    /// Returns a creature to the roster during battle.
    pub fn add(&mut self, creature: Creature) -> Result<(), RosterError> {
        self.store.insert(creature)
    }

    /// Removes the next active creature.
    pub fn retrieve(&mut self) -> Result<Creature, RosterError> {
        self.store.remove()
    }

    /// Applies the mode's special reorder.
    pub fn reorder(&mut self) {
        self.store.reorder();
    }

    /// Rebuilds the roster from the recruitment record at full HP.
    pub fn regenerate(&mut self) -> Result<(), RosterError> {
        self.store.reset();
        for creature in &self.record {
            let mut fresh = creature.clone();
            fresh.restore();
            self.store.insert(fresh)?;
        }
        Ok(())
    }

    pub fn mode(&self) -> RosterMode {
        self.mode
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub const fn capacity(&self) -> usize {
        GameConfig::ROSTER_CAPACITY
    }

    pub fn is_full(&self) -> bool {
        self.len() >= self.capacity()
    }

    /// Next creature `retrieve` would return.
    pub fn peek(&self) -> Option<&Creature> {
        self.store.iter().next()
    }

    /// Members in retrieval order.
    pub fn iter(&self) -> impl Iterator<Item = &Creature> + '_ {
        self.store.iter()
    }

    /// Creatures recorded at build time, in recruitment order.
    pub fn recruits(&self) -> &[Creature] {
        &self.record
    }

    /// Distinct elements of the recruited team, in element order.
    pub fn elements(&self) -> Vec<Element> {
        let mut elements: Vec<Element> = self.record.iter().map(Creature::element).collect();
        elements.sort();
        elements.dedup();
        elements
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn set_lives(&mut self, lives: u32) {
        self.lives = lives;
    }

    /// Removes one life and returns the remaining count.
    pub fn lose_life(&mut self) -> u32 {
        self.lives = self.lives.saturating_sub(1);
        self.lives
    }

    pub fn has_lives(&self) -> bool {
        self.lives > 0
    }
}

impl core::fmt::Display for Roster {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} [", self.mode)?;
        for (i, creature) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{creature}")?;
        }
        f.write_str("]")
    }
}
