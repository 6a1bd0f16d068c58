use core::cmp::Ordering;

use crate::creature::Creature;
use crate::roster::Roster;

use super::{
    BattleAction, BattleEngine, BattleError, BattleEvent, BattlePhase, BattleResult, BattleState,
    Side, TurnReport, draw_next,
};

/// Turn resolution methods for BattleEngine.
impl<'a> BattleEngine<'a> {
    /// Resolves one full turn.
    ///
    /// Returns the chosen actions and every event in resolution order. After
    /// the turn the state is either awaiting the next actions or terminal.
    pub fn process_turn(
        &mut self,
        state: &mut BattleState,
        team1: &mut Roster,
        team2: &mut Roster,
    ) -> Result<TurnReport, BattleError> {
        if state.is_terminal() {
            return Err(BattleError::AlreadyFinished);
        }

        state.phase = BattlePhase::Resolving;
        state.turn += 1;

        let teams = [team1, team2];
        let mut events = Vec::new();

        let mut actions = [BattleAction::Attack; 2];
        for side in Side::BOTH {
            let own = active(state, side)?;
            let enemy = active(state, side.opponent())?;
            let roster = &*teams[side.index()];
            let action = self.providers[side.index()].choose_action(own, enemy, roster);
            actions[side.index()] = action;
            events.push(BattleEvent::ActionChosen { side, action });
        }

        for side in Side::BOTH {
            let team = &mut *teams[side.index()];
            match actions[side.index()] {
                BattleAction::Attack => {}
                BattleAction::Special => {
                    team.reorder();
                    events.push(BattleEvent::Reordered { side });
                }
                BattleAction::Swap => swap(state, side, team, &mut events)?,
            }
        }

        self.resolve_attacks(state, actions, &mut events)?;

        if Side::BOTH
            .iter()
            .all(|&side| state.active[side.index()].as_ref().is_some_and(Creature::is_alive))
        {
            for side in Side::BOTH {
                let creature = active_mut(state, side)?;
                creature.take_damage(1);
                events.push(BattleEvent::Attrition {
                    side,
                    creature: creature.name().to_owned(),
                    remaining: creature.hp(),
                });
            }
        }

        let [team1, team2] = teams;
        let result = self.settle(state, team1, team2, &mut events)?;

        state.phase = match result {
            Some(result) => {
                events.push(BattleEvent::Finished { result });
                BattlePhase::Terminal(result)
            }
            None => BattlePhase::AwaitingActions,
        };

        Ok(TurnReport {
            turn: state.turn,
            actions,
            events,
            result,
        })
    }

    /// Resolves the attack step.
    ///
    /// When both sides attack the faster one strikes first and the other
    /// retaliates only if it is still standing. Equal speed trades blows
    /// simultaneously.
    fn resolve_attacks(
        &self,
        state: &mut BattleState,
        actions: [BattleAction; 2],
        events: &mut Vec<BattleEvent>,
    ) -> Result<(), BattleError> {
        let attacks = actions.map(|action| action == BattleAction::Attack);

        match attacks {
            [true, true] => {
                let speed_one = active(state, Side::One)?.speed();
                let speed_two = active(state, Side::Two)?.speed();
                match speed_one.cmp(&speed_two) {
                    Ordering::Equal => {
                        self.strike(state, Side::One, events)?;
                        self.strike(state, Side::Two, events)?;
                    }
                    ordering => {
                        let first = if ordering.is_gt() { Side::One } else { Side::Two };
                        self.strike(state, first, events)?;
                        if active(state, first.opponent())?.is_alive() {
                            self.strike(state, first.opponent(), events)?;
                        }
                    }
                }
            }
            [true, false] => self.strike(state, Side::One, events)?,
            [false, true] => self.strike(state, Side::Two, events)?,
            [false, false] => {}
        }
        Ok(())
    }

    /// Active creature of `attacker` hits the opposing one.
    fn strike(
        &self,
        state: &mut BattleState,
        attacker: Side,
        events: &mut Vec<BattleEvent>,
    ) -> Result<(), BattleError> {
        let [one, two] = &mut state.active;
        let (striker, target) = match attacker {
            Side::One => (one.as_ref(), two.as_mut()),
            Side::Two => (two.as_ref(), one.as_mut()),
        };
        let striker = striker.ok_or(BattleError::NoActiveCreature { side: attacker })?;
        let target = target.ok_or(BattleError::NoActiveCreature {
            side: attacker.opponent(),
        })?;

        let damage = striker.attack(target, self.env.tables());
        events.push(BattleEvent::Attacked {
            side: attacker,
            attacker: striker.name().to_owned(),
            defender: target.name().to_owned(),
            damage,
            remaining: target.hp(),
        });
        Ok(())
    }

    /// Replaces fainted creatures and rewards survivors.
    ///
    /// Returns the battle result once a fainted side has nothing left to send
    /// out. A creature levels up (and may evolve) only when its opponent
    /// fainted and it is itself still alive.
    fn settle(
        &self,
        state: &mut BattleState,
        team1: &mut Roster,
        team2: &mut Roster,
        events: &mut Vec<BattleEvent>,
    ) -> Result<Option<BattleResult>, BattleError> {
        let fainted = Side::BOTH.map(|side| {
            state.active[side.index()]
                .as_ref()
                .is_some_and(|creature| !creature.is_alive())
        });

        for side in Side::BOTH {
            if fainted[side.index()] {
                events.push(BattleEvent::Fainted {
                    side,
                    creature: active(state, side)?.name().to_owned(),
                });
            }
        }

        let teams = [team1, team2];
        let mut emptied = [false; 2];
        for side in Side::BOTH {
            if !fainted[side.index()] {
                continue;
            }
            match draw_next(&mut *teams[side.index()])? {
                Some(replacement) => {
                    events.push(BattleEvent::SentOut {
                        side,
                        creature: replacement.name().to_owned(),
                    });
                    state.active[side.index()] = Some(replacement);
                }
                None => emptied[side.index()] = true,
            }
        }

        match emptied {
            [true, true] => return Ok(Some(BattleResult::Draw)),
            [true, false] => return Ok(Some(BattleResult::Side2Wins)),
            [false, true] => return Ok(Some(BattleResult::Side1Wins)),
            [false, false] => {}
        }

        for side in Side::BOTH {
            let survivor_alive = !fainted[side.index()];
            if fainted[side.opponent().index()] && survivor_alive {
                self.reward(state, side, events)?;
            }
        }

        Ok(None)
    }

    /// Levels up the active creature of `side`, evolving it when ready.
    fn reward(
        &self,
        state: &mut BattleState,
        side: Side,
        events: &mut Vec<BattleEvent>,
    ) -> Result<(), BattleError> {
        let env = &self.env;
        let creature = active_mut(state, side)?;
        if !creature.is_alive() {
            return Ok(());
        }

        creature.level_up(env)?;
        events.push(BattleEvent::LeveledUp {
            side,
            creature: creature.name().to_owned(),
            level: creature.level(),
        });

        if creature.ready_to_evolve(env) {
            let evolved = creature.evolve(env)?;
            events.push(BattleEvent::Evolved {
                side,
                from: creature.name().to_owned(),
                into: evolved.name().to_owned(),
            });
            *creature = evolved;
        }
        Ok(())
    }
}

/// Swaps the active creature of `side` for the next one in its roster.
///
/// With nothing left to send out the current creature stays in.
fn swap(
    state: &mut BattleState,
    side: Side,
    team: &mut Roster,
    events: &mut Vec<BattleEvent>,
) -> Result<(), BattleError> {
    let Some(incoming) = draw_next(team)? else {
        return Ok(());
    };

    let sent = incoming.name().to_owned();
    let outgoing = state.active[side.index()]
        .replace(incoming)
        .ok_or(BattleError::NoActiveCreature { side })?;
    let out = outgoing.name().to_owned();
    team.add(outgoing)?;

    events.push(BattleEvent::Swapped { side, out, sent });
    Ok(())
}

fn active(state: &BattleState, side: Side) -> Result<&Creature, BattleError> {
    state.active[side.index()]
        .as_ref()
        .ok_or(BattleError::NoActiveCreature { side })
}

fn active_mut(state: &mut BattleState, side: Side) -> Result<&mut Creature, BattleError> {
    state.active[side.index()]
        .as_mut()
        .ok_or(BattleError::NoActiveCreature { side })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::element::Element;
    use crate::engine::{FixedAction, ScriptedActions};
    use crate::env::{EffectivenessChart, GameEnv, SpeciesBook, SpeciesDescriptor, SpeciesOracle};
    use crate::roster::RosterMode;
    use crate::stats::StatBlock;

    fn book() -> SpeciesBook {
        SpeciesBook::new(vec![
            // attack, defense, speed, max_hp
            SpeciesDescriptor::new("Quick", Element::Normal, StatBlock::new(10, 1, 9, 5))
                .with_evolution("Quicker"),
            SpeciesDescriptor::new("Quicker", Element::Normal, StatBlock::new(12, 2, 10, 9))
                .with_spawnable(false),
            SpeciesDescriptor::new("Sturdy", Element::Normal, StatBlock::new(2, 3, 1, 20)),
            SpeciesDescriptor::new("Frail", Element::Normal, StatBlock::new(3, 1, 2, 4)),
        ])
        .unwrap()
    }

    fn roster(env: &GameEnv<'_>, book: &SpeciesBook, names: &[&str]) -> Roster {
        let mut roster = Roster::new(RosterMode::Back);
        for name in names {
            let creature = Creature::spawn_default(env, book.find(name).unwrap()).unwrap();
            roster.recruit(creature).unwrap();
        }
        roster
    }

    #[test]
    fn faster_side_strikes_first_and_kill_skips_retaliation() {
        let book = book();
        let chart = EffectivenessChart::default();
        let config = GameConfig::default();
        let env = GameEnv::new(&book, &chart, &config);

        let mut team1 = roster(&env, &book, &["Quick"]);
        let mut team2 = roster(&env, &book, &["Frail", "Sturdy"]);
        let mut engine = BattleEngine::new(env)
            .with_provider(Side::One, FixedAction(BattleAction::Attack))
            .with_provider(Side::Two, FixedAction(BattleAction::Attack));

        let mut state = engine.begin(&mut team1, &mut team2).unwrap();
        let report = engine.process_turn(&mut state, &mut team1, &mut team2).unwrap();

        // 10 vs defense 1 -> 9 damage, Frail faints before it can answer
        assert_eq!(report.total_damage(Side::One), 9);
        assert_eq!(report.total_damage(Side::Two), 0);
        assert!(report.events.contains(&BattleEvent::Fainted {
            side: Side::Two,
            creature: "Frail".into(),
        }));
        assert_eq!(state.active(Side::Two).unwrap().name(), "Sturdy");

        // the survivor levels up and, having gained a level, evolves
        let evolved = state.active(Side::One).unwrap();
        assert_eq!(evolved.name(), "Quicker");
        assert_eq!(evolved.level(), 2);
        assert_eq!((evolved.hp(), evolved.max_hp()), (9, 9));
        assert!(report.result.is_none());
        assert_eq!(state.phase(), BattlePhase::AwaitingActions);
    }

    #[test]
    fn slower_side_retaliates_after_surviving() {
        let book = book();
        let chart = EffectivenessChart::default();
        let config = GameConfig::default();
        let env = GameEnv::new(&book, &chart, &config);

        let mut team1 = roster(&env, &book, &["Sturdy"]);
        let mut team2 = roster(&env, &book, &["Frail"]);
        let mut engine = BattleEngine::new(env)
            .with_provider(Side::One, FixedAction(BattleAction::Attack))
            .with_provider(Side::Two, FixedAction(BattleAction::Attack));

        let mut state = engine.begin(&mut team1, &mut team2).unwrap();
        let report = engine.process_turn(&mut state, &mut team1, &mut team2).unwrap();

        // Frail (speed 2) goes before Sturdy (speed 1)
        let strikers: Vec<Side> = report
            .events
            .iter()
            .filter_map(|event| match event {
                BattleEvent::Attacked { side, .. } => Some(*side),
                _ => None,
            })
            .collect();
        assert_eq!(strikers, [Side::Two, Side::One]);

        // 3 into defense 3 is blocked for 1, 2 into defense 1 glances for 1
        assert_eq!(report.total_damage(Side::Two), 1);
        assert_eq!(report.total_damage(Side::One), 1);

        // both still standing, so attrition takes one more each
        assert_eq!(state.active(Side::One).unwrap().hp(), 18);
        assert_eq!(state.active(Side::Two).unwrap().hp(), 2);
        assert!(report.result.is_none());
    }

    #[test]
    fn mutual_knockout_with_reserves_continues_without_rewards() {
        let book = book();
        let chart = EffectivenessChart::default();
        let config = GameConfig::default();
        let env = GameEnv::new(&book, &chart, &config);

        let mut team1 = roster(&env, &book, &["Quick", "Sturdy"]);
        let mut team2 = roster(&env, &book, &["Quick", "Sturdy"]);
        let mut engine = BattleEngine::new(env)
            .with_provider(Side::One, FixedAction(BattleAction::Attack))
            .with_provider(Side::Two, FixedAction(BattleAction::Attack));

        let mut state = engine.begin(&mut team1, &mut team2).unwrap();
        let report = engine.process_turn(&mut state, &mut team1, &mut team2).unwrap();

        for side in Side::BOTH {
            assert!(report.events.contains(&BattleEvent::Fainted {
                side,
                creature: "Quick".into(),
            }));
            let replacement = state.active(side).unwrap();
            assert_eq!(replacement.name(), "Sturdy");
            assert_eq!(replacement.level(), 1);
            assert_eq!(replacement.hp(), replacement.max_hp());
        }
        assert!(!report.events.iter().any(|event| matches!(
            event,
            BattleEvent::LeveledUp { .. } | BattleEvent::Evolved { .. }
        )));
        assert!(report.result.is_none());
        assert_eq!(state.phase(), BattlePhase::AwaitingActions);
        assert!(team1.is_empty() && team2.is_empty());
    }

    #[test]
    fn attrition_applies_when_nobody_faints() {
        let book = book();
        let chart = EffectivenessChart::default();
        let config = GameConfig::default();
        let env = GameEnv::new(&book, &chart, &config);

        let mut team1 = roster(&env, &book, &["Sturdy"]);
        let mut team2 = roster(&env, &book, &["Sturdy"]);
        let mut engine = BattleEngine::new(env)
            .with_provider(Side::One, FixedAction(BattleAction::Special))
            .with_provider(Side::Two, FixedAction(BattleAction::Special));

        let mut state = engine.begin(&mut team1, &mut team2).unwrap();
        let report = engine.process_turn(&mut state, &mut team1, &mut team2).unwrap();

        assert_eq!(state.active(Side::One).unwrap().hp(), 19);
        assert_eq!(state.active(Side::Two).unwrap().hp(), 19);
        assert!(report.events.contains(&BattleEvent::Reordered { side: Side::One }));
        assert!(matches!(
            report.events.last(),
            Some(BattleEvent::Attrition { side: Side::Two, remaining: 19, .. })
        ));
    }

    #[test]
    fn swap_returns_previous_creature_to_roster() {
        let book = book();
        let chart = EffectivenessChart::default();
        let config = GameConfig::default();
        let env = GameEnv::new(&book, &chart, &config);

        let mut team1 = roster(&env, &book, &["Frail", "Sturdy"]);
        let mut team2 = roster(&env, &book, &["Sturdy"]);
        let mut engine = BattleEngine::new(env)
            .with_provider(Side::One, ScriptedActions::new([BattleAction::Swap]))
            .with_provider(Side::Two, FixedAction(BattleAction::Special));

        let mut state = engine.begin(&mut team1, &mut team2).unwrap();
        let report = engine.process_turn(&mut state, &mut team1, &mut team2).unwrap();

        assert_eq!(state.active(Side::One).unwrap().name(), "Sturdy");
        assert_eq!(team1.peek().map(Creature::name), Some("Frail"));
        assert!(report.events.contains(&BattleEvent::Swapped {
            side: Side::One,
            out: "Frail".into(),
            sent: "Sturdy".into(),
        }));

        // nothing left to swap in: the active creature stays
        let mut lone = roster(&env, &book, &["Sturdy"]);
        let mut other = roster(&env, &book, &["Sturdy"]);
        let mut state = engine.begin(&mut lone, &mut other).unwrap();
        engine.process_turn(&mut state, &mut lone, &mut other).unwrap();
        assert_eq!(state.active(Side::One).unwrap().name(), "Sturdy");
        assert!(lone.is_empty());
    }

    #[test]
    fn simultaneous_knockout_is_a_draw() {
        let book = book();
        let chart = EffectivenessChart::default();
        let config = GameConfig::default();
        let env = GameEnv::new(&book, &chart, &config);

        let mut team1 = roster(&env, &book, &["Quick"]);
        let mut team2 = roster(&env, &book, &["Quick"]);
        let mut engine = BattleEngine::new(env);

        let outcome = engine.battle(&mut team1, &mut team2).unwrap();
        assert_eq!(outcome.result, BattleResult::Draw);
        assert_eq!(outcome.turns, 1);
        assert!(team1.is_empty() && team2.is_empty());
    }

    #[test]
    fn terminal_battle_rejects_more_turns() {
        let book = book();
        let chart = EffectivenessChart::default();
        let config = GameConfig::default();
        let env = GameEnv::new(&book, &chart, &config);

        let mut team1 = roster(&env, &book, &["Quick"]);
        let mut team2 = Roster::new(RosterMode::Back);
        let mut engine = BattleEngine::new(env);

        let mut state = engine.begin(&mut team1, &mut team2).unwrap();
        assert_eq!(state.result(), Some(BattleResult::Side1Wins));
        assert_eq!(
            engine.process_turn(&mut state, &mut team1, &mut team2),
            Err(BattleError::AlreadyFinished)
        );

        engine.conclude(state, &mut team1, &mut team2).unwrap();
        assert_eq!(team1.len(), 1);
    }
}
