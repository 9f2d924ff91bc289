//! Rejection reasons for player actions and configuration errors.
//!
//! Player actions never propagate these: the session logs the rejection and
//! leaves state untouched. The same checks are public so a caller can
//! pre-validate an action before offering it.
use thiserror::Error;

use crate::catalog::Merchandise;
use crate::phase::Phase;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("need {needed} cash but only {available} on hand")]
    InsufficientCash { needed: u64, available: u64 },
    #[error("only {available} {merchandise} available, {requested} requested")]
    InsufficientCargo {
        merchandise: Merchandise,
        requested: u64,
        available: u64,
    },
    #[error("bank holds {available}, {requested} requested")]
    InsufficientBank { requested: u64, available: u64 },
    #[error("warehouse has room for {free} units, {requested} requested")]
    WarehouseFull { requested: u64, free: u64 },
    #[error("Elder Brother Wu lends at most {limit}, {requested} requested")]
    LoanLimit { requested: u64, limit: u64 },
    #[error("no market while at sea")]
    NotDocked,
    #[error("only possible in Hong Kong")]
    NotInHongKong,
    #[error("no {0} on the table")]
    NoActiveOffer(&'static str),
    #[error("ship is overloaded by {excess} units")]
    Overloaded { excess: u64 },
    #[error("already docked at the destination")]
    SameCity,
    #[error("not possible during {0:?}")]
    WrongPhase(Phase),
    #[error("cash and bank total {available}, retirement needs {required}")]
    NotRichEnough { available: u64, required: u64 },
}

/// Failure loading a [`crate::config::GameConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid game configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid game configuration: {0}")]
    Invalid(String),
}
