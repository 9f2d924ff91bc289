use proptest::prelude::*;
use taipan_game::{
    City, DebugOverrides, Game, GameConfig, GameState, Ledger, Merchandise, Phase, PriceTable,
    Rejection, ScriptedRng,
};

/// Docked and trading with a price table rolled from the lowest draws.
fn docked(city: City, cash: u64) -> GameState {
    let mut state = GameState::new(&GameConfig::default());
    state.phase = Phase::Trading;
    state.current_city = Some(city);
    state.ledger = Ledger {
        cash,
        bank: 0,
        debt: 0,
    };
    state.li_yuen_counter = 1;
    state.prices = PriceTable::generate(city, &mut ScriptedRng::constant(0));
    state
}

fn session(state: GameState) -> Game {
    Game::from_state(
        state,
        GameConfig::default(),
        Box::new(ScriptedRng::constant(0)),
        DebugOverrides::none(),
    )
}

fn merchandise() -> impl Strategy<Value = Merchandise> {
    prop::sample::select(Merchandise::ALL.to_vec())
}

#[test]
fn hong_kong_floor_prices() {
    let game = session(docked(City::HongKong, 0));
    let prices = &game.state().prices;
    assert_eq!(prices.get(Merchandise::Opium), Some(5000));
    assert_eq!(prices.get(Merchandise::Silk), Some(500));
    assert_eq!(prices.get(Merchandise::Arms), Some(60));
    assert_eq!(prices.get(Merchandise::General), Some(5));
}

proptest! {
    #[test]
    fn buying_spends_exactly_the_total(
        cash in 0u64..200_000,
        quantity in 0u64..400,
        item in merchandise(),
    ) {
        let mut game = session(docked(City::HongKong, cash));
        let price = game.state().prices.get(item).unwrap();
        let before = game.digest();
        game.buy(item, quantity);
        if price * quantity <= cash {
            prop_assert_eq!(game.state().ledger.cash, cash - price * quantity);
            prop_assert_eq!(game.state().hold.quantity(item), quantity);
        } else {
            prop_assert_eq!(game.digest(), before);
        }
    }

    #[test]
    fn selling_back_restores_cash(cash in 0u64..200_000, item in merchandise()) {
        let mut game = session(docked(City::Shanghai, cash));
        let affordable = game.can_afford(item);
        game.buy(item, affordable);
        game.sell(item, affordable);
        prop_assert_eq!(game.state().ledger.cash, cash);
        prop_assert!(game.state().hold.is_empty());
    }

    #[test]
    fn bank_moves_preserve_cash_plus_savings(cash in 0u64..50_000, amount in 0u64..60_000) {
        let mut game = session(docked(City::HongKong, cash));
        game.deposit(amount);
        let ledger = &game.state().ledger;
        prop_assert_eq!(ledger.cash + ledger.bank, cash);
        prop_assert_eq!(ledger.bank, if amount <= cash { amount } else { 0 });

        let banked = game.state().ledger.bank;
        game.withdraw(amount);
        let ledger = &game.state().ledger;
        prop_assert_eq!(ledger.cash + ledger.bank, cash);
        if amount <= banked {
            prop_assert_eq!(ledger.cash, cash);
        }
    }

    #[test]
    fn loans_are_capped_at_twice_cash(cash in 0u64..50_000, amount in 0u64..150_000) {
        let mut game = session(docked(City::HongKong, cash));
        game.borrow(amount);
        let ledger = &game.state().ledger;
        if amount <= cash * 2 {
            prop_assert_eq!(ledger.debt, amount);
            prop_assert_eq!(ledger.cash, cash + amount);
        } else {
            prop_assert_eq!(ledger.debt, 0);
            prop_assert_eq!(ledger.cash, cash);
        }
    }

    #[test]
    fn repayment_never_overpays(
        cash in 0u64..20_000,
        debt in 0u64..20_000,
        amount in 0u64..40_000,
    ) {
        let mut state = docked(City::HongKong, cash);
        state.ledger.debt = debt;
        let mut game = session(state);
        game.repay(amount);
        let ledger = &game.state().ledger;
        let owed = amount.min(debt);
        if owed <= cash {
            prop_assert_eq!(ledger.debt, debt - owed);
            prop_assert_eq!(ledger.cash, cash - owed);
        } else {
            prop_assert_eq!(ledger.debt, debt);
            prop_assert_eq!(ledger.cash, cash);
        }
    }
}

#[test]
fn buying_ignores_hold_space_but_departure_does_not() {
    let mut game = session(docked(City::HongKong, 1_000));
    game.buy(Merchandise::General, 100);
    assert_eq!(game.state().hold.quantity(Merchandise::General), 100);
    assert_eq!(game.state().free_capacity(), -40);
    assert_eq!(
        game.check_depart(City::Manila),
        Err(Rejection::Overloaded { excess: 40 })
    );

    let before = game.digest();
    game.depart_for(City::Manila);
    assert_eq!(game.digest(), before);
}

#[test]
fn warehouse_is_hong_kong_only() {
    let mut state = docked(City::Saigon, 0);
    state.hold.add(Merchandise::Silk, 5);
    let mut game = session(state);
    assert_eq!(
        game.check_transfer_to_warehouse(Merchandise::Silk, 5),
        Err(Rejection::NotInHongKong)
    );
    game.transfer_to_warehouse(Merchandise::Silk, 5);
    assert_eq!(game.state().hold.quantity(Merchandise::Silk), 5);
    assert!(game.state().warehouse.is_empty());
}

#[test]
fn warehouse_transfers_respect_stock_and_room() {
    let mut state = docked(City::HongKong, 0);
    state.hold.add(Merchandise::Arms, 30);
    state.warehouse_capacity = 20;
    let mut game = session(state);

    assert_eq!(
        game.check_transfer_to_warehouse(Merchandise::Arms, 25),
        Err(Rejection::WarehouseFull {
            requested: 25,
            free: 20
        })
    );
    game.transfer_to_warehouse(Merchandise::Arms, 20);
    assert_eq!(game.state().warehouse.quantity(Merchandise::Arms), 20);
    assert_eq!(game.state().hold.quantity(Merchandise::Arms), 10);
    assert_eq!(game.state().warehouse_free(), 0);

    assert!(matches!(
        game.check_transfer_to_ship(Merchandise::Arms, 21),
        Err(Rejection::InsufficientCargo { available: 20, .. })
    ));
    game.transfer_to_ship(Merchandise::Arms, 20);
    assert_eq!(game.state().hold.quantity(Merchandise::Arms), 30);
    assert!(game.state().warehouse.is_empty());
}

#[test]
fn market_is_closed_at_sea() {
    let mut state = docked(City::HongKong, 10_000);
    state.current_city = None;
    let mut game = session(state);
    assert_eq!(game.check_buy(Merchandise::Silk, 1), Err(Rejection::NotDocked));
    assert_eq!(game.check_sell(Merchandise::Silk, 0), Err(Rejection::NotDocked));
    game.buy(Merchandise::Silk, 1);
    assert_eq!(game.state().ledger.cash, 10_000);
}

#[test]
fn repairs_need_mchenry_at_the_dock() {
    let mut state = docked(City::HongKong, 5_000);
    state.ship.damage = 30;
    let mut game = session(state);
    assert_eq!(
        game.check_repair(100),
        Err(Rejection::NoActiveOffer("repair offer"))
    );

    game.transition_to(Phase::McHenryOffer);
    assert_eq!(game.state().phase, Phase::McHenryOffer);
    assert_eq!(game.state().voyage.mchenry_rate, Some(21));
    assert_eq!(game.state().voyage.mchenry_offer, Some(631));

    game.repair(10_000);
    assert_eq!(game.state().ship.damage, 30);

    game.repair(210);
    assert_eq!(game.state().ship.damage, 20);
    assert_eq!(game.state().ledger.cash, 4_790);
    assert_eq!(game.state().phase, Phase::ElderBrotherWuBusiness);
    assert!(game
        .state()
        .logs
        .iter()
        .any(|key| key == "log.mchenry.repair"));
}

#[test]
fn retirement_needs_a_fortune_in_hong_kong() {
    let mut game = session(docked(City::HongKong, 999_999));
    assert!(matches!(
        game.check_retire(),
        Err(Rejection::NotRichEnough { .. })
    ));
    game.retire();
    assert_eq!(game.state().phase, Phase::Trading);

    game.borrow(1);
    game.retire();
    assert_eq!(game.state().phase, Phase::Retirement);
    assert!(game.fire_next_timer());
    assert_eq!(game.state().phase, Phase::FinalStats);

    let mut abroad = session(docked(City::Batavia, 2_000_000));
    assert_eq!(abroad.check_retire(), Err(Rejection::NotInHongKong));
    abroad.retire();
    assert_eq!(abroad.state().phase, Phase::Trading);
}
