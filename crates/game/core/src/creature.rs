//! Creatures: a species id plus mutable battle state.
//!
//! Stats are resolved from the species descriptor for the creature's level
//! and cached; they are recomputed on every level change or evolution.

use crate::combat::{apply_damage, elemental_damage};
use crate::element::Element;
use crate::env::{GameEnv, SpeciesDescriptor, SpeciesId, TablesOracle};
use crate::error::{ErrorSeverity, GameError};
use crate::formula::FormulaError;
use crate::stats::{StatBlock, StatKind};

/// Errors raised while spawning, leveling, or evolving a creature.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum CreatureError {
    #[error("unknown species {id}")]
    UnknownSpecies { id: SpeciesId },

    #[error("{name} has no evolution")]
    MissingEvolution { name: String },

    #[error("stat formula failed: {0}")]
    Formula(#[from] FormulaError),
}

impl GameError for CreatureError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownSpecies { .. } => ErrorSeverity::Validation,
            Self::MissingEvolution { .. } => ErrorSeverity::Internal,
            Self::Formula(_) => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownSpecies { .. } => "CREATURE_UNKNOWN_SPECIES",
            Self::MissingEvolution { .. } => "CREATURE_MISSING_EVOLUTION",
            Self::Formula(_) => "CREATURE_FORMULA",
        }
    }
}

/// A creature taking part in battles.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Creature {
    species: SpeciesId,
    name: String,
    element: Element,
    level: u32,
    /// Level at which the current form was obtained.
    start_level: u32,
    hp: i32,
    stats: StatBlock,
}

impl Creature {
    /// Spawns a creature of `species` at `level` with full HP.
    pub fn spawn(env: &GameEnv<'_>, species: SpeciesId, level: u32) -> Result<Self, CreatureError> {
        let descriptor = descriptor(env, species)?;
        let stats = descriptor.stats_at(env.config().stat_mode, level)?;

        Ok(Self {
            species,
            name: descriptor.name.clone(),
            element: descriptor.element,
            level,
            start_level: level,
            hp: stats.max_hp,
            stats,
        })
    }

    /// Spawns a creature at the configured starting level.
    pub fn spawn_default(env: &GameEnv<'_>, species: SpeciesId) -> Result<Self, CreatureError> {
        Self::spawn(env, species, env.config().starting_level)
    }

    /// Attacks `other`, returning the damage dealt.
    pub fn attack(&self, other: &mut Creature, tables: &(impl TablesOracle + ?Sized)) -> u32 {
        let damage = elemental_damage(
            self.stats.attack,
            other.stats.defense,
            self.element,
            other.element,
            tables,
        );
        other.take_damage(damage);
        damage
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.hp = apply_damage(self.hp, amount);
    }

    /// Raises the level by one.
    ///
    /// Current HP grows by exactly the max-HP delta, so damage taken so far
    /// is carried over rather than healed.
    pub fn level_up(&mut self, env: &GameEnv<'_>) -> Result<(), CreatureError> {
        let level = self.level.saturating_add(1);
        let stats = descriptor(env, self.species)?.stats_at(env.config().stat_mode, level)?;

        self.hp = self
            .hp
            .saturating_add(stats.max_hp.saturating_sub(self.stats.max_hp));
        self.level = level;
        self.stats = stats;
        Ok(())
    }

    /// True once the creature has gained a level in its current form and its
    /// species has an evolution.
    pub fn ready_to_evolve(&self, env: &GameEnv<'_>) -> bool {
        self.level > self.start_level && env.species().evolution_of(self.species).is_some()
    }

    /// Produces the evolved form at the same level with the same HP deficit.
    pub fn evolve(&self, env: &GameEnv<'_>) -> Result<Creature, CreatureError> {
        let target = env.species().evolution_of(self.species).ok_or_else(|| {
            CreatureError::MissingEvolution {
                name: self.name.clone(),
            }
        })?;

        let mut evolved = Self::spawn(env, target, self.level)?;
        evolved.hp = evolved.stats.max_hp.saturating_sub(self.hp_deficit());
        Ok(evolved)
    }

    /// Heals back to full HP.
    pub fn restore(&mut self) {
        self.hp = self.stats.max_hp;
    }

    // ===== queries =====

    pub fn species(&self) -> SpeciesId {
        self.species
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn element(&self) -> Element {
        self.element
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn start_level(&self) -> u32 {
        self.start_level
    }

    pub fn hp(&self) -> i32 {
        self.hp
    }

    pub fn max_hp(&self) -> i32 {
        self.stats.max_hp
    }

    pub fn attack_stat(&self) -> i32 {
        self.stats.attack
    }

    pub fn defense(&self) -> i32 {
        self.stats.defense
    }

    pub fn speed(&self) -> i32 {
        self.stats.speed
    }

    pub fn stats(&self) -> &StatBlock {
        &self.stats
    }

    /// Generic stat lookup; `StatKind::Hp` is the current HP.
    pub fn stat(&self, kind: StatKind) -> i64 {
        match kind {
            StatKind::Hp => self.hp.into(),
            StatKind::Attack => self.stats.attack.into(),
            StatKind::Defense => self.stats.defense.into(),
            StatKind::Speed => self.stats.speed.into(),
            StatKind::Level => self.level.into(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Damage taken: max HP minus current HP.
    pub fn hp_deficit(&self) -> i32 {
        self.stats.max_hp.saturating_sub(self.hp)
    }
}

impl core::fmt::Display for Creature {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "LV.{} {}, {}/{} HP",
            self.level, self.name, self.hp, self.stats.max_hp
        )
    }
}

fn descriptor<'a>(
    env: &GameEnv<'a>,
    species: SpeciesId,
) -> Result<&'a SpeciesDescriptor, CreatureError> {
    env.species()
        .descriptor(species)
        .ok_or(CreatureError::UnknownSpecies { id: species })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GameConfig, StatMode};
    use crate::env::{EffectivenessChart, SpeciesBook, SpeciesOracle};
    use crate::formula::Formula;
    use crate::stats::ComplexStats;

    fn formula(tokens: &[&str]) -> Formula {
        Formula::parse(tokens).unwrap()
    }

    fn book() -> SpeciesBook {
        let growing = ComplexStats::new(
            formula(&["5"]),
            formula(&["2"]),
            formula(&["3"]),
            formula(&["10", "level", "2", "*", "+"]),
        );
        SpeciesBook::new(vec![
            SpeciesDescriptor::new("Sproutling", Element::Grass, StatBlock::new(5, 2, 3, 10))
                .with_evolution("Bloomtree")
                .with_complex(growing),
            SpeciesDescriptor::new("Bloomtree", Element::Grass, StatBlock::new(9, 6, 4, 20))
                .with_spawnable(false),
            SpeciesDescriptor::new("Emberpup", Element::Fire, StatBlock::new(8, 3, 6, 12)),
        ])
        .unwrap()
    }

    #[test]
    fn spawns_at_full_hp() {
        let book = book();
        let chart = EffectivenessChart::default();
        let config = GameConfig::default();
        let env = GameEnv::new(&book, &chart, &config);

        let creature = Creature::spawn_default(&env, book.find("Sproutling").unwrap()).unwrap();
        assert_eq!(creature.level(), 1);
        assert_eq!(creature.hp(), 10);
        assert_eq!(creature.max_hp(), 10);
        assert!(creature.is_alive());
        assert_eq!(creature.to_string(), "LV.1 Sproutling, 10/10 HP");
    }

    #[test]
    fn unknown_species_is_rejected() {
        let book = book();
        let chart = EffectivenessChart::default();
        let config = GameConfig::default();
        let env = GameEnv::new(&book, &chart, &config);

        let err = Creature::spawn(&env, SpeciesId(99), 1).unwrap_err();
        assert_eq!(err, CreatureError::UnknownSpecies { id: SpeciesId(99) });
        assert_eq!(err.error_code(), "CREATURE_UNKNOWN_SPECIES");
    }

    #[test]
    fn attack_uses_effectiveness() {
        let book = book();
        let chart = EffectivenessChart::default().with(Element::Fire, Element::Grass, 2.0);
        let config = GameConfig::default();
        let env = GameEnv::new(&book, &chart, &config);

        let pup = Creature::spawn_default(&env, book.find("Emberpup").unwrap()).unwrap();
        let mut sprout = Creature::spawn_default(&env, book.find("Sproutling").unwrap()).unwrap();

        // 2 < 8 / 2 -> 2.0 * (8 - 2) = 12
        assert_eq!(pup.attack(&mut sprout, &chart), 12);
        assert_eq!(sprout.hp(), -2);
        assert!(!sprout.is_alive());
    }

    #[test]
    fn level_up_preserves_deficit() {
        let book = book();
        let chart = EffectivenessChart::default();
        let config = GameConfig::with_stat_mode(StatMode::Complex);
        let env = GameEnv::new(&book, &chart, &config);

        let mut creature = Creature::spawn_default(&env, book.find("Sproutling").unwrap()).unwrap();
        assert_eq!(creature.max_hp(), 12);
        creature.take_damage(5);
        let deficit = creature.hp_deficit();

        creature.level_up(&env).unwrap();
        assert_eq!(creature.level(), 2);
        assert_eq!(creature.max_hp(), 14);
        assert_eq!(creature.hp(), 9);
        assert_eq!(creature.hp_deficit(), deficit);
        assert!(creature.hp() <= creature.max_hp());
    }

    #[test]
    fn simple_mode_level_up_keeps_stats() {
        let book = book();
        let chart = EffectivenessChart::default();
        let config = GameConfig::default();
        let env = GameEnv::new(&book, &chart, &config);

        let mut creature = Creature::spawn_default(&env, book.find("Emberpup").unwrap()).unwrap();
        creature.take_damage(4);
        creature.level_up(&env).unwrap();
        assert_eq!(creature.level(), 2);
        assert_eq!(creature.hp(), 8);
        assert_eq!(creature.max_hp(), 12);
    }

    #[test]
    fn evolve_preserves_deficit() {
        let book = book();
        let chart = EffectivenessChart::default();
        let config = GameConfig::default();
        let env = GameEnv::new(&book, &chart, &config);

        let mut creature = Creature::spawn_default(&env, book.find("Sproutling").unwrap()).unwrap();
        assert!(!creature.ready_to_evolve(&env));

        creature.take_damage(7);
        creature.level_up(&env).unwrap();
        assert_eq!((creature.hp(), creature.max_hp()), (3, 10));
        assert!(creature.ready_to_evolve(&env));

        let evolved = creature.evolve(&env).unwrap();
        assert_eq!(evolved.name(), "Bloomtree");
        assert_eq!((evolved.hp(), evolved.max_hp()), (13, 20));
        assert_eq!(evolved.level(), 2);
        assert_eq!(evolved.start_level(), 2);
        assert!(!evolved.ready_to_evolve(&env));
    }

    #[test]
    fn evolving_without_target_fails() {
        let book = book();
        let chart = EffectivenessChart::default();
        let config = GameConfig::default();
        let env = GameEnv::new(&book, &chart, &config);

        let mut pup = Creature::spawn_default(&env, book.find("Emberpup").unwrap()).unwrap();
        pup.level_up(&env).unwrap();
        assert!(!pup.ready_to_evolve(&env));
        assert!(matches!(
            pup.evolve(&env),
            Err(CreatureError::MissingEvolution { .. })
        ));
    }

    #[test]
    fn stat_lookup_and_restore() {
        let book = book();
        let chart = EffectivenessChart::default();
        let config = GameConfig::default();
        let env = GameEnv::new(&book, &chart, &config);

        let mut pup = Creature::spawn_default(&env, book.find("Emberpup").unwrap()).unwrap();
        pup.take_damage(2);
        assert_eq!(pup.stat(StatKind::Hp), 10);
        assert_eq!(pup.stat(StatKind::Attack), 8);
        assert_eq!(pup.stat(StatKind::Speed), 6);
        assert_eq!(pup.stat(StatKind::Level), 1);
        pup.restore();
        assert_eq!(pup.hp(), 12);
    }
}
