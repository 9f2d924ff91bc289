//! Session phases and the events that move between them.
use serde::{Deserialize, Serialize};
use std::fmt;

/// Every state the session can be in.
///
/// Report phases carry a timer and advance on [`Event::Timer`] or
/// [`Event::Tap`]; prompt phases wait for [`Event::Yes`] / [`Event::No`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    DebtOrGuns,
    Arriving,
    LiYuenExtortion,
    NotEnoughCash,
    BorrowForLiYuen,
    BorrowedForLiYuen,
    ElderBrotherWuPirateWarning,
    McHenryOffer,
    ElderBrotherWuWarning1,
    ElderBrotherWuWarning2,
    ElderBrotherWuWarning3,
    ElderBrotherWuBusiness,
    ElderBrotherWuBailout,
    BailoutReaction,
    Bankruptcy,
    Cutthroats,
    NewShipOffer,
    NewGunOffer,
    OpiumSeized,
    WarehouseTheft,
    LiYuenMessage,
    GoodPrices,
    PriceDrop,
    PriceJump,
    Robbery,
    Trading,
    HostilesApproaching,
    SeaBattle,
    BattleSummary,
    LiYuenDroveThemOff,
    LiYuenApproaching,
    LiYuenLetUsBe,
    LiYuenAttacking,
    LiYuenBattle,
    LiYuenBattleSummary,
    Storm,
    Storm2,
    StormGoingDown,
    StormMadeIt,
    StormBlownOffCourse,
    Retirement,
    FinalStats,
}

/// How long a report phase stays on screen before its timer fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportLength {
    Short,
    Long,
}

impl Phase {
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::DebtOrGuns => "debt_or_guns",
            Self::Arriving => "arriving",
            Self::LiYuenExtortion => "li_yuen_extortion",
            Self::NotEnoughCash => "not_enough_cash",
            Self::BorrowForLiYuen => "borrow_for_li_yuen",
            Self::BorrowedForLiYuen => "borrowed_for_li_yuen",
            Self::ElderBrotherWuPirateWarning => "elder_brother_wu_pirate_warning",
            Self::McHenryOffer => "mc_henry_offer",
            Self::ElderBrotherWuWarning1 => "elder_brother_wu_warning1",
            Self::ElderBrotherWuWarning2 => "elder_brother_wu_warning2",
            Self::ElderBrotherWuWarning3 => "elder_brother_wu_warning3",
            Self::ElderBrotherWuBusiness => "elder_brother_wu_business",
            Self::ElderBrotherWuBailout => "elder_brother_wu_bailout",
            Self::BailoutReaction => "bailout_reaction",
            Self::Bankruptcy => "bankruptcy",
            Self::Cutthroats => "cutthroats",
            Self::NewShipOffer => "new_ship_offer",
            Self::NewGunOffer => "new_gun_offer",
            Self::OpiumSeized => "opium_seized",
            Self::WarehouseTheft => "warehouse_theft",
            Self::LiYuenMessage => "li_yuen_message",
            Self::GoodPrices => "good_prices",
            Self::PriceDrop => "price_drop",
            Self::PriceJump => "price_jump",
            Self::Robbery => "robbery",
            Self::Trading => "trading",
            Self::HostilesApproaching => "hostiles_approaching",
            Self::SeaBattle => "sea_battle",
            Self::BattleSummary => "battle_summary",
            Self::LiYuenDroveThemOff => "li_yuen_drove_them_off",
            Self::LiYuenApproaching => "li_yuen_approaching",
            Self::LiYuenLetUsBe => "li_yuen_let_us_be",
            Self::LiYuenAttacking => "li_yuen_attacking",
            Self::LiYuenBattle => "li_yuen_battle",
            Self::LiYuenBattleSummary => "li_yuen_battle_summary",
            Self::Storm => "storm",
            Self::Storm2 => "storm2",
            Self::StormGoingDown => "storm_going_down",
            Self::StormMadeIt => "storm_made_it",
            Self::StormBlownOffCourse => "storm_blown_off_course",
            Self::Retirement => "retirement",
            Self::FinalStats => "final_stats",
        }
    }

    /// Timer armed when a report phase is entered; `None` for prompts.
    #[must_use]
    pub const fn report_length(self) -> Option<ReportLength> {
        match self {
            Self::Arriving
            | Self::NotEnoughCash
            | Self::ElderBrotherWuWarning1
            | Self::ElderBrotherWuWarning2
            | Self::LiYuenMessage
            | Self::PriceDrop
            | Self::PriceJump
            | Self::HostilesApproaching
            | Self::BattleSummary
            | Self::LiYuenDroveThemOff
            | Self::LiYuenApproaching
            | Self::LiYuenLetUsBe
            | Self::LiYuenAttacking
            | Self::LiYuenBattleSummary
            | Self::Storm
            | Self::Storm2
            | Self::StormGoingDown
            | Self::StormMadeIt
            | Self::StormBlownOffCourse => Some(ReportLength::Short),
            Self::BorrowedForLiYuen
            | Self::ElderBrotherWuPirateWarning
            | Self::ElderBrotherWuWarning3
            | Self::BailoutReaction
            | Self::Bankruptcy
            | Self::Cutthroats
            | Self::OpiumSeized
            | Self::WarehouseTheft
            | Self::Robbery
            | Self::Retirement => Some(ReportLength::Long),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_battle(self) -> bool {
        matches!(self, Self::SeaBattle | Self::LiYuenBattle)
    }

    /// Phases that wait for a yes/no answer.
    #[must_use]
    pub const fn is_prompt(self) -> bool {
        matches!(
            self,
            Self::DebtOrGuns
                | Self::LiYuenExtortion
                | Self::BorrowForLiYuen
                | Self::McHenryOffer
                | Self::ElderBrotherWuBusiness
                | Self::ElderBrotherWuBailout
                | Self::NewShipOffer
                | Self::NewGunOffer
                | Self::FinalStats
        )
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Inputs delivered to [`crate::Game::send_event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Event {
    Debt,
    Guns,
    Tap,
    Timer,
    Yes,
    No,
    Repaired,
    BattleEnded,
    LiYuen,
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = match self {
            Self::Debt => "debt",
            Self::Guns => "guns",
            Self::Tap => "tap",
            Self::Timer => "timer",
            Self::Yes => "yes",
            Self::No => "no",
            Self::Repaired => "repaired",
            Self::BattleEnded => "battle_ended",
            Self::LiYuen => "li_yuen",
        };
        f.write_str(key)
    }
}
