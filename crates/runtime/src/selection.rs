//! Team construction from a selection mode.
//!
//! A team can be drawn at random from the spawnable species, named
//! explicitly, or picked by catalog index. Every path spawns creatures at the
//! configured starting level and recruits them into an empty [`Roster`].
use rand::Rng;
use rand::seq::SliceRandom;
use thiserror::Error;

use game_core::{
    Creature, ErrorSeverity, GameConfig, GameEnv, GameError, Roster, RosterMode, SortOrder,
    SpeciesId, StatKind,
};

use crate::api::Result;

/// How the members of a team are chosen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TeamSelection {
    /// Uniform team size in `1..=capacity`, each member uniform over the
    /// spawnable species.
    Random,
    /// Species names, case-insensitive, in recruitment order.
    Provided(Vec<String>),
    /// 1-based catalog indices, in recruitment order.
    Indexed(Vec<usize>),
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("team size {size} is outside 1..={max}")]
    InvalidTeamSize { size: usize, max: usize },

    #[error("species index {index} is out of range 1..={count}")]
    InvalidIndex { index: usize, count: usize },

    #[error("unknown species '{name}'")]
    UnknownSpecies { name: String },

    #[error("species '{name}' cannot be spawned onto a team")]
    NotSpawnable { name: String },

    #[error("catalog has no spawnable species")]
    NoSpawnableSpecies,
}

impl GameError for SelectionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NoSpawnableSpecies => ErrorSeverity::Fatal,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTeamSize { .. } => "SELECTION_INVALID_TEAM_SIZE",
            Self::InvalidIndex { .. } => "SELECTION_INVALID_INDEX",
            Self::UnknownSpecies { .. } => "SELECTION_UNKNOWN_SPECIES",
            Self::NotSpawnable { .. } => "SELECTION_NOT_SPAWNABLE",
            Self::NoSpawnableSpecies => "SELECTION_NO_SPAWNABLE_SPECIES",
        }
    }
}

/// Retrieval discipline of a team, plus the priority key for optimised
/// rosters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TeamSpec {
    pub mode: RosterMode,
    pub sort_key: StatKind,
    pub order: SortOrder,
}

impl TeamSpec {
    pub fn new(mode: RosterMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn sorted_by(mut self, key: StatKind, order: SortOrder) -> Self {
        self.sort_key = key;
        self.order = order;
        self
    }

    /// An empty roster with this spec's discipline.
    pub fn empty_roster(&self) -> Roster {
        match self.mode {
            RosterMode::Optimise => Roster::prioritised(self.sort_key, self.order),
            mode => Roster::new(mode),
        }
    }
}

impl Default for TeamSpec {
    fn default() -> Self {
        Self {
            mode: RosterMode::Back,
            sort_key: StatKind::Hp,
            order: SortOrder::Descending,
        }
    }
}

/// Resolves a selection to species ids without spawning anything.
pub fn resolve_species<R>(
    env: &GameEnv<'_>,
    selection: &TeamSelection,
    rng: &mut R,
) -> std::result::Result<Vec<SpeciesId>, SelectionError>
where
    R: Rng + ?Sized,
{
    let max = GameConfig::ROSTER_CAPACITY;
    let species = env.species();

    let ids = match selection {
        TeamSelection::Random => {
            let pool = species.spawnable();
            if pool.is_empty() {
                return Err(SelectionError::NoSpawnableSpecies);
            }
            let size = rng.gen_range(1..=max);
            (0..size)
                .filter_map(|_| pool.choose(rng).copied())
                .collect::<Vec<_>>()
        }
        TeamSelection::Provided(names) => names
            .iter()
            .map(|name| {
                species
                    .find(name.trim())
                    .ok_or_else(|| SelectionError::UnknownSpecies { name: name.clone() })
            })
            .collect::<std::result::Result<Vec<_>, _>>()?,
        TeamSelection::Indexed(indices) => {
            let count = species.count();
            indices
                .iter()
                .map(|&index| {
                    if (1..=count).contains(&index) {
                        Ok(SpeciesId((index - 1) as u16))
                    } else {
                        Err(SelectionError::InvalidIndex { index, count })
                    }
                })
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    if ids.is_empty() || ids.len() > max {
        return Err(SelectionError::InvalidTeamSize {
            size: ids.len(),
            max,
        });
    }

    let locked = ids
        .iter()
        .filter_map(|id| species.descriptor(*id))
        .find(|descriptor| !descriptor.spawnable);
    if let Some(descriptor) = locked {
        return Err(SelectionError::NotSpawnable {
            name: descriptor.name.clone(),
        });
    }

    Ok(ids)
}

/// Builds a fresh roster for `spec` from `selection`.
pub fn build_roster<R>(
    env: &GameEnv<'_>,
    spec: &TeamSpec,
    selection: &TeamSelection,
    rng: &mut R,
) -> Result<Roster>
where
    R: Rng + ?Sized,
{
    let ids = resolve_species(env, selection, rng)?;
    let mut roster = spec.empty_roster();
    for id in ids {
        roster.recruit(Creature::spawn_default(env, id)?)?;
    }
    Ok(roster)
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{EffectivenessChart, Element, SpeciesBook, SpeciesDescriptor, StatBlock};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn book() -> SpeciesBook {
        SpeciesBook::new(vec![
            SpeciesDescriptor::new("Sprout", Element::Grass, StatBlock::new(1, 1, 1, 4)),
            SpeciesDescriptor::new("Ember", Element::Fire, StatBlock::new(2, 1, 2, 3)),
            SpeciesDescriptor::new("Blaze", Element::Fire, StatBlock::new(4, 2, 3, 6))
                .with_spawnable(false),
        ])
        .unwrap()
    }

    fn with_env<T>(f: impl FnOnce(GameEnv<'_>) -> T) -> T {
        let species = book();
        let tables = EffectivenessChart::default();
        let config = GameConfig::default();
        f(GameEnv::new(&species, &tables, &config))
    }

    #[test]
    fn random_teams_use_spawnable_species_within_capacity() {
        with_env(|env| {
            let mut rng = StdRng::seed_from_u64(7);
            for _ in 0..50 {
                let ids = resolve_species(&env, &TeamSelection::Random, &mut rng).unwrap();
                assert!((1..=GameConfig::ROSTER_CAPACITY).contains(&ids.len()));
                assert!(ids.iter().all(|id| id.index() < 2));
            }
        });
    }

    #[test]
    fn provided_names_are_case_insensitive() {
        with_env(|env| {
            let mut rng = StdRng::seed_from_u64(0);
            let selection = TeamSelection::Provided(vec!["ember".into(), "SPROUT".into()]);
            let roster = build_roster(&env, &TeamSpec::default(), &selection, &mut rng).unwrap();
            let names: Vec<_> = roster.iter().map(|c| c.name().to_string()).collect();
            assert_eq!(names, ["Ember", "Sprout"]);
        });
    }

    #[test]
    fn invalid_selections_are_rejected() {
        with_env(|env| {
            let mut rng = StdRng::seed_from_u64(0);
            let check = |selection: TeamSelection, rng: &mut StdRng| {
                resolve_species(&env, &selection, rng).unwrap_err()
            };

            assert_eq!(
                check(TeamSelection::Provided(vec!["Nope".into()]), &mut rng),
                SelectionError::UnknownSpecies { name: "Nope".into() }
            );
            assert_eq!(
                check(TeamSelection::Indexed(vec![4]), &mut rng),
                SelectionError::InvalidIndex { index: 4, count: 3 }
            );
            assert_eq!(
                check(TeamSelection::Indexed(vec![0]), &mut rng),
                SelectionError::InvalidIndex { index: 0, count: 3 }
            );
            assert_eq!(
                check(TeamSelection::Indexed(vec![3]), &mut rng),
                SelectionError::NotSpawnable { name: "Blaze".into() }
            );
            assert_eq!(
                check(TeamSelection::Indexed(vec![]), &mut rng),
                SelectionError::InvalidTeamSize { size: 0, max: 6 }
            );
            assert_eq!(
                check(TeamSelection::Indexed(vec![1; 7]), &mut rng),
                SelectionError::InvalidTeamSize { size: 7, max: 6 }
            );
        });
    }

    #[test]
    fn optimised_spec_builds_prioritised_roster() {
        with_env(|env| {
            let mut rng = StdRng::seed_from_u64(0);
            let spec = TeamSpec::new(RosterMode::Optimise)
                .sorted_by(StatKind::Speed, SortOrder::Descending);
            let selection = TeamSelection::Indexed(vec![1, 2]);
            let mut roster = build_roster(&env, &spec, &selection, &mut rng).unwrap();
            assert_eq!(roster.retrieve().unwrap().name(), "Ember");
        });
    }
}
