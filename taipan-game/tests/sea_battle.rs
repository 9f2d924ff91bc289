use taipan_game::{
    Animation, BattleMessage, BattleStep, City, DebugOverrides, Event, ForcedOutcome, Game,
    GameConfig, GameState, HostileType, Ledger, Merchandise, Phase, PriceTable, ScriptedRng,
};

fn docked(cash: u64, guns: u64) -> GameState {
    let mut state = GameState::new(&GameConfig::default());
    state.phase = Phase::Trading;
    state.ledger = Ledger {
        cash,
        bank: 0,
        debt: 0,
    };
    state.ship.guns = guns;
    state.li_yuen_counter = 1;
    state.prices = PriceTable::generate(City::HongKong, &mut ScriptedRng::constant(0));
    state
}

fn session(state: GameState, rng: ScriptedRng, overrides: DebugOverrides) -> Game {
    Game::from_state(state, GameConfig::default(), Box::new(rng), overrides)
}

/// Play the presentation's part: fight, acknowledge animations, let timers run.
fn fight_it_out(game: &mut Game) {
    for _ in 0..500 {
        if !game.state().is_under_attack() {
            return;
        }
        if let Some(battle) = &game.state().battle {
            assert!(battle.visible_count() <= battle.hostiles);
            if battle.order.is_none() {
                game.order_fight();
            }
        }
        match game.state().pending_animation() {
            Some(Animation::GunFire) => game.gun_did_fire(),
            Some(Animation::Sinking) => game.targeted_ship_sunk(),
            Some(Animation::ShipHit) => game.ship_did_get_hit(),
            None => assert!(game.fire_next_timer(), "battle stalled"),
        }
    }
    panic!("battle never finished");
}

#[test]
fn five_guns_sink_three_pirates_in_one_volley() {
    // Pirate check misses, fleet roll, three hulls of 20, then aim/shot pairs
    // that sink each target, then the booty roll.
    let rng = ScriptedRng::with_ints([9, 0, 0, 0, 0, 0, 10, 0, 10, 0, 10, 0]).int_fallback(1_000);
    let overrides = DebugOverrides::none()
        .force(ForcedOutcome::HostileShips)
        .with_hostiles_count(3);
    let mut game = session(docked(1_000, 5), rng, overrides);

    game.depart_for(City::Shanghai);
    assert_eq!(game.state().phase, Phase::HostilesApproaching);
    assert_eq!(game.state().battle.as_ref().map(|b| b.hostiles), Some(3));
    assert!(game.overrides().is_empty());

    game.advance(3_000);
    assert_eq!(game.state().phase, Phase::SeaBattle);
    assert_eq!(game.pending_battle_step(), Some(BattleStep::CarryOutOrder));
    let battle = game.state().battle.as_ref().unwrap();
    assert_eq!(battle.visible_count(), 3);
    assert_eq!(&battle.slots[..3], &[20, 20, 20]);

    fight_it_out(&mut game);
    assert_eq!(game.state().phase, Phase::BattleSummary);
    let battle = game.state().battle.as_ref().unwrap();
    assert_eq!(battle.hostiles, 0);
    assert_eq!(battle.message, Some(BattleMessage::GotEmAll));
    assert_eq!(battle.booty, Some(1_000));
    assert_eq!(game.state().ledger.cash, 2_000);
    assert_eq!(game.state().ship.damage, 0);
    assert!(game.state().logs.iter().any(|key| key == "log.battle.booty"));

    game.advance(3_000);
    assert_eq!(game.state().phase, Phase::Arriving);
    assert!(game.state().battle.is_none());
}

/// Put to sea with a forced pirate attack of `hostiles` ships and reach the fight.
fn ambushed(guns: u64, hostiles: u64, rng: ScriptedRng, extra: DebugOverrides) -> Game {
    let overrides = extra
        .force(ForcedOutcome::HostileShips)
        .with_hostiles_count(hostiles);
    let mut game = session(docked(0, guns), rng, overrides);
    game.depart_for(City::Manila);
    assert!(game.fire_next_timer());
    assert_eq!(game.state().phase, Phase::SeaBattle);
    game
}

fn logged(game: &Game, key: &str) -> bool {
    game.state().logs.iter().any(|k| k == key)
}

#[test]
fn hostiles_can_flee_after_a_volley() {
    // Pirate check, fleet roll, three hulls, aim at slot 0, a 10 point shot,
    // a missed flee check (the override carries it) and a flight of one.
    let rng = ScriptedRng::with_ints([0, 0, 0, 0, 0, 0, 0, 2, 0]);
    let mut game = ambushed(1, 3, rng, DebugOverrides::none().force(ForcedOutcome::RanAway));

    game.order_fight();
    assert!(game.fire_next_timer());
    assert_eq!(game.pending_battle_step(), Some(BattleStep::OpenFire));
    assert!(game.fire_next_timer());
    assert!(game.fire_next_timer());
    assert_eq!(game.state().pending_animation(), Some(Animation::GunFire));

    game.gun_did_fire();
    assert_eq!(game.pending_battle_step(), Some(BattleStep::NextShot));
    assert!(game.fire_next_timer());
    let battle = game.state().battle.as_ref().unwrap();
    assert_eq!(battle.message, Some(BattleMessage::HitButDidntSink));
    assert_eq!(game.pending_battle_step(), Some(BattleStep::Flee(1)));
    assert!(game.overrides().is_empty());

    assert!(game.fire_next_timer());
    let battle = game.state().battle.as_ref().unwrap();
    assert_eq!(battle.hostiles, 2);
    assert_eq!(battle.visible_count(), 2);
    assert_eq!(&battle.slots[..3], &[10, 20, 0]);
    assert_eq!(battle.message, Some(BattleMessage::RanAway(1)));
    assert!(logged(&game, "log.battle.ran-away"));
    assert_eq!(game.state().phase, Phase::SeaBattle);
    assert_eq!(game.pending_battle_step(), Some(BattleStep::HostileFire));
}

#[test]
fn running_away_leaves_the_fleet_behind() {
    // Pirate check, fleet roll, three hulls; the first escape cannot beat
    // the pursuers, the shake-off misses, Li Yuen stays away, then the second
    // escape roll wins.
    let rng = ScriptedRng::with_ints([0, 0, 0, 0, 0, 0, 0, 4, 19, 2, 0]);
    let mut game = ambushed(0, 3, rng, DebugOverrides::none());

    game.order_run();
    assert!(game.fire_next_timer());
    assert_eq!(
        game.state().battle.as_ref().and_then(|b| b.message),
        Some(BattleMessage::WillRun)
    );
    assert!(game.fire_next_timer());
    assert_eq!(
        game.state().battle.as_ref().and_then(|b| b.message),
        Some(BattleMessage::CouldntLoseEm)
    );
    assert!(game.fire_next_timer());
    assert_eq!(game.pending_battle_step(), Some(BattleStep::IncomingShot));
    assert!(game.fire_next_timer());
    game.ship_did_get_hit();
    assert_eq!(game.state().ship.damage, 1);
    assert_eq!(game.pending_battle_step(), Some(BattleStep::CarryOutOrder));

    assert!(game.fire_next_timer());
    assert_eq!(game.pending_battle_step(), Some(BattleStep::RunAttempt));
    assert!(game.fire_next_timer());
    assert_eq!(
        game.state().battle.as_ref().and_then(|b| b.message),
        Some(BattleMessage::GotAway)
    );
    assert!(game.fire_next_timer());

    assert_eq!(game.state().phase, Phase::BattleSummary);
    let battle = game.state().battle.as_ref().unwrap();
    assert_eq!(battle.hostiles, 3);
    assert_eq!(battle.booty, None);
    assert_eq!(game.state().ledger.cash, 0);
    assert!(logged(&game, "log.battle.got-away"));
    assert!(!logged(&game, "log.battle.booty"));
    assert!(!logged(&game, "log.battle.shook-off"));
}

#[test]
fn a_failed_run_can_still_shake_off_pursuers() {
    // Pirate check, fleet roll, eight hulls, a hopeless escape, then a
    // shake-off that loses two ships.
    let mut ints = vec![0, 0];
    ints.extend([0; 8]);
    ints.extend([0, 0, 0, 1]);
    let mut game = ambushed(0, 8, ScriptedRng::with_ints(ints), DebugOverrides::none());
    assert_eq!(game.state().battle.as_ref().map(|b| b.visible_count()), Some(8));

    game.order_run();
    assert!(game.fire_next_timer());
    assert!(game.fire_next_timer());
    assert_eq!(game.pending_battle_step(), Some(BattleStep::ShakeOff));

    assert!(game.fire_next_timer());
    let battle = game.state().battle.as_ref().unwrap();
    assert_eq!(battle.hostiles, 6);
    assert_eq!(battle.visible_count(), 6);
    assert_eq!(&battle.slots[6..], &[0, 0, 0]);
    assert_eq!(battle.message, Some(BattleMessage::EscapedFrom(2)));
    assert!(logged(&game, "log.battle.shook-off"));
    assert!(!logged(&game, "log.battle.got-away"));
    assert_eq!(game.state().phase, Phase::SeaBattle);
    assert_eq!(game.pending_battle_step(), Some(BattleStep::HostileFire));
}

#[test]
fn a_wrecked_ship_ends_the_campaign() {
    let mut state = docked(500, 0);
    state.ship.damage = state.ship.capacity;
    let mut game = session(state, ScriptedRng::constant(0), DebugOverrides::none());

    game.depart_for(City::Manila);
    assert_eq!(game.state().phase, Phase::HostilesApproaching);
    assert!(game.fire_next_timer());
    assert_eq!(game.state().phase, Phase::BattleSummary);
    assert!(game.state().logs.iter().any(|key| key == "log.battle.ship-lost"));

    assert!(game.fire_next_timer());
    assert_eq!(game.state().phase, Phase::FinalStats);

    game.send_event(Event::No);
    assert!(game.is_session_over());
    assert_eq!(game.next_timer_due_ms(), None);

    let over = game.digest();
    game.send_event(Event::Yes);
    game.send_event(Event::Debt);
    assert_eq!(game.digest(), over);
}

#[test]
fn throwing_cargo_pauses_until_the_discard() {
    let mut state = docked(0, 0);
    state.hold.add(Merchandise::General, 20);
    let mut game = session(state, ScriptedRng::constant(0), DebugOverrides::none());

    game.depart_for(City::Nagasaki);
    assert!(game.fire_next_timer());
    assert_eq!(game.state().phase, Phase::SeaBattle);
    assert_eq!(game.state().battle.as_ref().map(|b| b.hostiles), Some(2));

    game.order_throw_cargo();
    assert_eq!(game.pending_battle_step(), None);

    game.discard(Merchandise::General, 25);
    assert_eq!(game.state().hold.quantity(Merchandise::General), 20);
    assert_eq!(game.pending_battle_step(), None);

    game.discard(Merchandise::General, 20);
    assert!(game.state().hold.is_empty());
    let battle = game.state().battle.as_ref().unwrap();
    assert_eq!(battle.escape_chance, 2);
    assert_eq!(battle.message, Some(BattleMessage::HopeWeLoseEm));
    assert_eq!(game.pending_battle_step(), Some(BattleStep::CarryOutOrder));

    assert!(game.fire_next_timer());
    assert_eq!(game.pending_battle_step(), Some(BattleStep::RunAttempt));
}

#[test]
fn tapping_hurries_the_next_step() {
    let mut game = session(docked(0, 0), ScriptedRng::constant(0), DebugOverrides::none());
    game.depart_for(City::Nagasaki);
    assert!(game.fire_next_timer());
    let now = game.now_ms();

    game.send_event(Event::Tap);
    assert_eq!(game.now_ms(), now);
    assert_eq!(
        game.state().battle.as_ref().and_then(|b| b.message),
        Some(BattleMessage::WhatShallWeDo)
    );
    assert_eq!(game.pending_battle_step(), Some(BattleStep::HostileFire));
}

#[test]
fn li_yuen_can_drive_the_pirates_off() {
    let mut game = session(docked(0, 0), ScriptedRng::constant(0), DebugOverrides::none());
    game.depart_for(City::Saigon);
    assert!(game.fire_next_timer());
    assert!(game.fire_next_timer());
    assert!(game.fire_next_timer());
    assert_eq!(game.pending_battle_step(), Some(BattleStep::IncomingShot));
    assert!(game.fire_next_timer());
    assert_eq!(game.state().pending_animation(), Some(Animation::ShipHit));

    game.ship_did_get_hit();
    assert_eq!(game.state().ship.damage, 1);
    assert_eq!(game.pending_battle_step(), Some(BattleStep::LiYuenArrives));

    assert!(game.fire_next_timer());
    assert_eq!(game.state().phase, Phase::LiYuenDroveThemOff);

    game.advance(3_000);
    assert_eq!(game.state().phase, Phase::LiYuenApproaching);
    assert_eq!(
        game.state().battle.as_ref().map(|b| b.hostile_type),
        Some(HostileType::LiYuen)
    );
}

#[test]
fn stray_callbacks_and_events_change_nothing() {
    let mut game = session(docked(0, 0), ScriptedRng::constant(0), DebugOverrides::none());
    game.depart_for(City::Nagasaki);
    assert!(game.fire_next_timer());
    assert_eq!(game.state().phase, Phase::SeaBattle);

    let before = game.digest();
    game.gun_did_fire();
    game.targeted_ship_sunk();
    game.ship_did_get_hit();
    game.send_event(Event::Yes);
    game.send_event(Event::Timer);
    assert_eq!(game.digest(), before);

    game.discard_cancelled();
    assert_eq!(game.pending_battle_step(), Some(BattleStep::ExecuteOrder));

    let mut idle = session(docked(0, 0), ScriptedRng::constant(0), DebugOverrides::none());
    let before = idle.digest();
    idle.order_fight();
    idle.gun_did_fire();
    idle.discard(Merchandise::Silk, 0);
    idle.send_event(Event::BattleEnded);
    idle.send_event(Event::Tap);
    assert_eq!(idle.digest(), before);
}
