//! Fixed catalogs: merchandise, ports of call and the calendar.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a catalog key cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} key: {value}")]
pub struct UnknownKey {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownKey {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Goods traded between ports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Merchandise {
    Opium,
    Silk,
    Arms,
    General,
}

impl Merchandise {
    pub const ALL: [Self; 4] = [Self::Opium, Self::Silk, Self::Arms, Self::General];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Opium => "opium",
            Self::Silk => "silk",
            Self::Arms => "arms",
            Self::General => "general",
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Opium => "Opium",
            Self::Silk => "Silk",
            Self::Arms => "Arms",
            Self::General => "General Cargo",
        }
    }

    /// Price of one unit before the port multiplier and the monthly roll.
    #[must_use]
    pub const fn base_price(self) -> u64 {
        match self {
            Self::Opium => 1000,
            Self::Silk => 100,
            Self::Arms => 10,
            Self::General => 1,
        }
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Merchandise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Merchandise {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownKey::new("merchandise", s))
    }
}

/// Ports of call. Hong Kong hosts the warehouse, the bank, Elder Brother Wu and McHenry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum City {
    HongKong,
    Shanghai,
    Nagasaki,
    Saigon,
    Manila,
    Singapore,
    Batavia,
}

impl City {
    pub const ALL: [Self; 7] = [
        Self::HongKong,
        Self::Shanghai,
        Self::Nagasaki,
        Self::Saigon,
        Self::Manila,
        Self::Singapore,
        Self::Batavia,
    ];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::HongKong => "hongkong",
            Self::Shanghai => "shanghai",
            Self::Nagasaki => "nagasaki",
            Self::Saigon => "saigon",
            Self::Manila => "manila",
            Self::Singapore => "singapore",
            Self::Batavia => "batavia",
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::HongKong => "Hong Kong",
            Self::Shanghai => "Shanghai",
            Self::Nagasaki => "Nagasaki",
            Self::Saigon => "Saigon",
            Self::Manila => "Manila",
            Self::Singapore => "Singapore",
            Self::Batavia => "Batavia",
        }
    }

    /// Port price multipliers, indexed by [`Merchandise::index`].
    #[must_use]
    pub const fn price_multipliers(self) -> [u64; 4] {
        match self {
            Self::HongKong => [11, 11, 12, 10],
            Self::Shanghai => [16, 14, 16, 11],
            Self::Nagasaki => [15, 15, 10, 12],
            Self::Saigon => [14, 16, 11, 13],
            Self::Manila => [12, 10, 13, 14],
            Self::Singapore => [10, 13, 14, 15],
            Self::Batavia => [13, 12, 15, 16],
        }
    }

    #[must_use]
    pub const fn price_multiplier(self, merchandise: Merchandise) -> u64 {
        self.price_multipliers()[merchandise.index()]
    }

    #[must_use]
    pub const fn is_hong_kong(self) -> bool {
        matches!(self, Self::HongKong)
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for City {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
            .collect();
        Self::ALL
            .into_iter()
            .find(|c| c.key().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| UnknownKey::new("city", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Month {
    #[default]
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    pub const ALL: [Self; 12] = [
        Self::January,
        Self::February,
        Self::March,
        Self::April,
        Self::May,
        Self::June,
        Self::July,
        Self::August,
        Self::September,
        Self::October,
        Self::November,
        Self::December,
    ];

    #[must_use]
    pub const fn index(self) -> u32 {
        self as u32
    }

    #[must_use]
    pub const fn abbreviation(self) -> &'static str {
        match self {
            Self::January => "Jan",
            Self::February => "Feb",
            Self::March => "Mar",
            Self::April => "Apr",
            Self::May => "May",
            Self::June => "Jun",
            Self::July => "Jul",
            Self::August => "Aug",
            Self::September => "Sep",
            Self::October => "Oct",
            Self::November => "Nov",
            Self::December => "Dec",
        }
    }

    /// The following month, wrapping December to January.
    #[must_use]
    pub const fn next(self) -> Self {
        Self::ALL[(self.index() as usize + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}
