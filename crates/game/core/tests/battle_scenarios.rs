//! End-to-end battles through the public game-core API.

use game_core::{
    BattleAction, BattleEngine, BattleEvent, BattleResult, Creature, EffectivenessChart, Element,
    FixedAction, GameConfig, GameEnv, Roster, RosterMode, Side, SpeciesBook, SpeciesDescriptor,
    SpeciesOracle, StatBlock,
};

fn catalog() -> SpeciesBook {
    SpeciesBook::new(vec![
        // attack, defense, speed, max_hp
        SpeciesDescriptor::new("Titan", Element::Rock, StatBlock::new(50, 50, 10, 50)),
        SpeciesDescriptor::new("Mite", Element::Bug, StatBlock::new(1, 1, 1, 5)),
        SpeciesDescriptor::new("Wall", Element::Steel, StatBlock::new(4, 8, 3, 10)),
        SpeciesDescriptor::new("Ghostling", Element::Ghost, StatBlock::new(6, 2, 5, 8)),
        SpeciesDescriptor::new("Brawler", Element::Normal, StatBlock::new(7, 2, 4, 9)),
    ])
    .expect("catalog is valid")
}

fn team(env: &GameEnv<'_>, book: &SpeciesBook, mode: RosterMode, names: &[&str]) -> Roster {
    let mut roster = Roster::new(mode);
    for name in names {
        let id = book.find(name).expect("species exists");
        roster
            .recruit(Creature::spawn_default(env, id).expect("spawn"))
            .expect("room in roster");
    }
    roster
}

#[test]
fn overwhelming_creature_wins_in_one_turn() {
    let book = catalog();
    let chart = EffectivenessChart::default();
    let config = GameConfig::default();
    let env = GameEnv::new(&book, &chart, &config);

    let mut team1 = team(&env, &book, RosterMode::Back, &["Titan"]);
    let mut team2 = team(&env, &book, RosterMode::Back, &["Mite"]);

    let outcome = BattleEngine::new(env).battle(&mut team1, &mut team2).unwrap();
    assert_eq!(outcome.result, BattleResult::Side1Wins);
    assert_eq!(outcome.turns, 1);

    // the winner goes back to its roster untouched
    assert_eq!(team1.len(), 1);
    assert_eq!(team1.peek().map(Creature::hp), Some(50));
    assert!(team2.is_empty());
}

#[test]
fn evenly_matched_creatures_terminate_deterministically() {
    let book = catalog();
    let chart = EffectivenessChart::default();
    let config = GameConfig::default();
    let env = GameEnv::new(&book, &chart, &config);

    let run = || {
        let mut team1 = team(&env, &book, RosterMode::Back, &["Wall"]);
        let mut team2 = team(&env, &book, RosterMode::Back, &["Wall"]);
        BattleEngine::new(env)
            .with_provider(Side::One, FixedAction(BattleAction::Attack))
            .with_provider(Side::Two, FixedAction(BattleAction::Attack))
            .battle(&mut team1, &mut team2)
            .unwrap()
    };

    // each blow deals ceil(4 / 4) = 1, plus 1 attrition per turn
    let first = run();
    assert_eq!(first.result, BattleResult::Draw);
    assert_eq!(first.turns, 5);
    assert_eq!(run(), first);
}

#[test]
fn immunity_falls_back_to_attrition() {
    let book = catalog();
    let chart = EffectivenessChart::default().with(Element::Normal, Element::Ghost, 0.0);
    let config = GameConfig::default();
    let env = GameEnv::new(&book, &chart, &config);

    let mut team1 = team(&env, &book, RosterMode::Back, &["Brawler"]);
    let mut team2 = team(&env, &book, RosterMode::Back, &["Ghostling"]);

    let mut zero_hits = 0;
    let outcome = BattleEngine::new(env)
        .with_provider(Side::One, FixedAction(BattleAction::Attack))
        .with_provider(Side::Two, FixedAction(BattleAction::Special))
        .battle_with(&mut team1, &mut team2, |report| {
            zero_hits += report
                .events
                .iter()
                .filter(|event| matches!(event, BattleEvent::Attacked { damage: 0, .. }))
                .count();
        })
        .unwrap();

    // the ghost never takes a hit and never attacks; both only tire out
    assert_eq!(zero_hits as u32, outcome.turns);
    assert_eq!(outcome.result, BattleResult::Side1Wins);
    assert_eq!(outcome.turns, 8);
}

#[test]
fn reports_follow_resolution_order() {
    let book = catalog();
    let chart = EffectivenessChart::default();
    let config = GameConfig::default();
    let env = GameEnv::new(&book, &chart, &config);

    let mut team1 = team(&env, &book, RosterMode::Front, &["Mite", "Titan"]);
    let mut team2 = team(&env, &book, RosterMode::Back, &["Brawler", "Mite"]);

    let mut engine = BattleEngine::new(env)
        .with_provider(Side::One, FixedAction(BattleAction::Attack))
        .with_provider(Side::Two, FixedAction(BattleAction::Attack));

    let mut state = engine.begin(&mut team1, &mut team2).unwrap();
    assert_eq!(state.active(Side::One).map(Creature::name), Some("Titan"));
    assert_eq!(state.active(Side::Two).map(Creature::name), Some("Brawler"));

    let mut reports = Vec::new();
    while !state.is_terminal() {
        reports.push(engine.process_turn(&mut state, &mut team1, &mut team2).unwrap());
    }
    let result = engine.conclude(state, &mut team1, &mut team2).unwrap();
    assert_eq!(result, BattleResult::Side1Wins);
    assert_eq!(reports.len(), 2);

    let first = &reports[0];
    assert!(matches!(
        first.events.as_slice(),
        [
            BattleEvent::ActionChosen { side: Side::One, .. },
            BattleEvent::ActionChosen { side: Side::Two, .. },
            BattleEvent::Attacked { side: Side::One, .. },
            BattleEvent::Fainted { side: Side::Two, .. },
            BattleEvent::SentOut { side: Side::Two, .. },
            BattleEvent::LeveledUp { side: Side::One, level: 2, .. },
        ]
    ));
    assert!(matches!(
        reports[1].events.last(),
        Some(BattleEvent::Finished { result: BattleResult::Side1Wins })
    ));

    // Titan went back on top of its stack, Mite never fought
    assert_eq!(team1.len(), 2);
    assert_eq!(team1.peek().map(Creature::name), Some("Titan"));
}
