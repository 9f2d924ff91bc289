use serde::{Deserialize, Serialize};

use crate::catalog::Month;
use crate::constants::START_YEAR;

/// Campaign calendar; one month passes per voyage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clock {
    pub month: Month,
    pub year: u32,
}

impl Default for Clock {
    fn default() -> Self {
        Self {
            month: Month::January,
            year: START_YEAR,
        }
    }
}

impl Clock {
    /// Advance one month, rolling the year after December.
    pub fn advance(&mut self) {
        if self.month == Month::December {
            self.year = self.year.saturating_add(1);
        }
        self.month = self.month.next();
    }

    #[must_use]
    pub fn years_elapsed(&self) -> u64 {
        u64::from(self.year.saturating_sub(START_YEAR))
    }

    /// `(year - 1860) * 12 + month index`; scales most random ranges.
    #[must_use]
    pub fn months_elapsed(&self) -> u64 {
        self.years_elapsed() * 12 + u64::from(self.month.index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn december_rolls_the_year() {
        let mut clock = Clock {
            month: Month::December,
            year: 1861,
        };
        assert_eq!(clock.months_elapsed(), 23);
        clock.advance();
        assert_eq!(clock.month, Month::January);
        assert_eq!(clock.year, 1862);
        assert_eq!(clock.months_elapsed(), 24);
    }

    #[test]
    fn fresh_clock_starts_at_zero() {
        let mut clock = Clock::default();
        assert_eq!(clock.months_elapsed(), 0);
        clock.advance();
        assert_eq!(clock.months_elapsed(), 1);
        assert_eq!(clock.years_elapsed(), 0);
    }
}
