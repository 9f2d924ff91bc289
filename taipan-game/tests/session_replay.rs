use taipan_game::{
    Animation, City, DebugOverrides, Event, Game, GameConfig, Merchandise, Phase, ScriptedRng,
    StartOption,
};

/// Answer every prompt with "no", fight every battle and let every report
/// run out, until the captain is free to trade again or the game is over.
fn settle(game: &mut Game) {
    for _ in 0..2_000 {
        let state = game.state();
        assert!(state.ship.damage <= state.ship.capacity);
        match state.phase {
            Phase::Trading | Phase::FinalStats => return,
            Phase::DebtOrGuns => game.send_event(Event::Debt),
            phase if phase.is_prompt() => game.send_event(Event::No),
            phase if phase.is_battle() => {
                if state.battle.as_ref().is_some_and(|b| b.order.is_none()) {
                    game.order_fight();
                }
                match game.state().pending_animation() {
                    Some(Animation::GunFire) => game.gun_did_fire(),
                    Some(Animation::Sinking) => game.targeted_ship_sunk(),
                    Some(Animation::ShipHit) => game.ship_did_get_hit(),
                    None => assert!(game.fire_next_timer(), "battle stalled"),
                }
            }
            _ => assert!(game.fire_next_timer(), "report without a timer"),
        }
    }
    panic!("session never settled");
}

fn play(seed: u64, voyages: usize) -> Game {
    let mut game = Game::from_seed(seed);
    settle(&mut game);
    for voyage in 0..voyages {
        if game.state().phase != Phase::Trading {
            break;
        }
        let here = game.state().current_city;
        let next = City::ALL
            .into_iter()
            .cycle()
            .skip(voyage % City::ALL.len())
            .find(|city| Some(*city) != here)
            .unwrap();
        game.depart_for(next);
        settle(&mut game);
        if game.state().phase == Phase::Trading {
            assert!(!game.state().at_sea());
            assert!(!game.state().prices.is_empty());
        }
    }
    game
}

#[test]
fn same_seed_replays_identically() {
    let first = play(1860, 8);
    let second = play(1860, 8);
    assert_eq!(first.snapshot(), second.snapshot());
    assert_eq!(first.digest(), second.digest());
    assert!(first.state().months_elapsed() >= 1);
}

#[test]
fn debt_start_applies_the_preset() {
    let mut game = Game::from_seed(7);
    assert_eq!(game.state().phase, Phase::DebtOrGuns);
    assert!(game.state().prices.is_empty());

    game.send_event(Event::Debt);
    let preset = game.config().starts.preset(StartOption::Debt).clone();
    let state = game.state();
    assert_eq!(state.ledger.debt, preset.debt);
    assert_eq!(state.ship.guns, 0);
    assert!(state.in_hong_kong());
    assert!(!state.prices.is_empty());
    assert_ne!(state.phase, Phase::DebtOrGuns);
}

#[test]
fn guns_start_arms_the_ship() {
    let mut game = Game::new(
        GameConfig::default(),
        Box::new(ScriptedRng::constant(1_000)),
        DebugOverrides::none(),
    );
    game.send_event(Event::Guns);
    let state = game.state();
    assert_eq!(state.ship.guns, 5);
    assert_eq!(state.ledger.cash, 0);
    assert_eq!(state.ledger.debt, 0);
    assert_eq!(state.pirate_odds, 7);
    assert_eq!(state.free_capacity(), 10);
    assert_eq!(state.phase, Phase::ElderBrotherWuBusiness);
}

#[test]
fn unmatched_events_leave_the_session_untouched() {
    let mut game = Game::from_seed(42);
    let fresh = game.digest();
    for event in [
        Event::Tap,
        Event::Timer,
        Event::Yes,
        Event::No,
        Event::Repaired,
        Event::BattleEnded,
        Event::LiYuen,
    ] {
        game.send_event(event);
        assert_eq!(game.digest(), fresh, "{event} changed the session");
    }

    settle(&mut game);
    if game.state().phase == Phase::Trading {
        let trading = game.digest();
        for event in [Event::Debt, Event::Guns, Event::Tap, Event::Yes, Event::LiYuen] {
            game.send_event(event);
        }
        game.transfer_to_ship(Merchandise::Opium, 1);
        if let Some(here) = game.state().current_city {
            game.depart_for(here);
        }
        assert_eq!(game.digest(), trading);
    }
}

#[test]
fn playing_again_starts_from_scratch() {
    let mut game = play(99, 3);
    game.transition_to(Phase::FinalStats);
    game.send_event(Event::Yes);
    assert_eq!(game.state().phase, Phase::DebtOrGuns);
    assert!(game.state().logs.is_empty());
    assert_eq!(game.state().months_elapsed(), 0);
    assert_eq!(game.next_timer_due_ms(), None);
    assert!(!game.is_session_over());
}

#[test]
fn snapshot_serializes_with_timers() {
    let mut game = Game::from_seed(3);
    game.send_event(Event::Debt);
    settle(&mut game);
    if game.state().phase == Phase::Trading {
        game.depart_for(City::Singapore);
    }
    let snapshot = game.snapshot();
    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["timers"]["now_ms"], snapshot.timers.now_ms);
    assert!(json["state"]["phase"].is_string());
    assert_eq!(snapshot.digest(), game.digest());
}
