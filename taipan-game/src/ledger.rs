//! Cash, bank deposits and the debt to Elder Brother Wu.
use serde::{Deserialize, Serialize};

use crate::constants::{INTEREST_BANK, INTEREST_DEBT, LOAN_MULTIPLIER};
use crate::error::Rejection;
use crate::numbers::{floor_f64_to_u64, u64_to_f64, u64_to_i64};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    pub cash: u64,
    pub bank: u64,
    pub debt: u64,
}

impl Ledger {
    /// `cash + bank - debt`.
    #[must_use]
    pub fn net_worth(&self) -> i64 {
        u64_to_i64(self.cash) + u64_to_i64(self.bank) - u64_to_i64(self.debt)
    }

    /// Largest loan Elder Brother Wu will make.
    #[must_use]
    pub const fn maximum_loan(&self) -> u64 {
        self.cash.saturating_mul(LOAN_MULTIPLIER)
    }

    /// Monthly compounding, truncated after the multiply.
    pub fn apply_interest(&mut self) {
        self.debt = floor_f64_to_u64(u64_to_f64(self.debt) * INTEREST_DEBT);
        self.bank = floor_f64_to_u64(u64_to_f64(self.bank) * INTEREST_BANK);
    }

    /// # Errors
    ///
    /// [`Rejection::InsufficientCash`] when `amount` exceeds cash.
    pub const fn check_spend(&self, amount: u64) -> Result<(), Rejection> {
        if amount > self.cash {
            return Err(Rejection::InsufficientCash {
                needed: amount,
                available: self.cash,
            });
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Same as [`Self::check_spend`].
    pub fn check_deposit(&self, amount: u64) -> Result<(), Rejection> {
        self.check_spend(amount)
    }

    /// # Errors
    ///
    /// [`Rejection::InsufficientBank`] when `amount` exceeds the balance.
    pub const fn check_withdraw(&self, amount: u64) -> Result<(), Rejection> {
        if amount > self.bank {
            return Err(Rejection::InsufficientBank {
                requested: amount,
                available: self.bank,
            });
        }
        Ok(())
    }

    /// # Errors
    ///
    /// [`Rejection::LoanLimit`] above [`Self::maximum_loan`].
    pub const fn check_borrow(&self, amount: u64) -> Result<(), Rejection> {
        let limit = self.maximum_loan();
        if amount > limit {
            return Err(Rejection::LoanLimit {
                requested: amount,
                limit,
            });
        }
        Ok(())
    }

    /// # Errors
    ///
    /// [`Rejection::InsufficientCash`] when the repayable part exceeds cash.
    pub fn check_repay(&self, amount: u64) -> Result<(), Rejection> {
        self.check_spend(amount.min(self.debt))
    }

    pub fn deposit(&mut self, amount: u64) -> Result<(), Rejection> {
        self.check_deposit(amount)?;
        self.cash -= amount;
        self.bank = self.bank.saturating_add(amount);
        Ok(())
    }

    pub fn withdraw(&mut self, amount: u64) -> Result<(), Rejection> {
        self.check_withdraw(amount)?;
        self.bank -= amount;
        self.cash = self.cash.saturating_add(amount);
        Ok(())
    }

    pub fn borrow(&mut self, amount: u64) -> Result<(), Rejection> {
        self.check_borrow(amount)?;
        self.debt = self.debt.saturating_add(amount);
        self.cash = self.cash.saturating_add(amount);
        Ok(())
    }

    /// Pay back at most the outstanding debt.
    pub fn repay(&mut self, amount: u64) -> Result<(), Rejection> {
        self.check_repay(amount)?;
        let paid = amount.min(self.debt);
        self.cash -= paid;
        self.debt -= paid;
        Ok(())
    }

    /// Deduct up to `amount`, stopping at zero cash. Returns what was taken.
    pub fn seize(&mut self, amount: u64) -> u64 {
        let taken = amount.min(self.cash);
        self.cash -= taken;
        taken
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger(cash: u64, bank: u64, debt: u64) -> Ledger {
        Ledger { cash, bank, debt }
    }

    #[test]
    fn interest_truncates_after_multiply() {
        let mut l = ledger(0, 1999, 5000);
        l.apply_interest();
        assert_eq!(l.debt, 5500);
        assert_eq!(l.bank, 2008);
        let mut l = ledger(0, 100, 7);
        l.apply_interest();
        assert_eq!(l.debt, 7);
        assert_eq!(l.bank, 100);
    }

    #[test]
    fn over_withdraw_and_over_deposit_change_nothing() {
        let mut l = ledger(100, 50, 0);
        assert!(l.withdraw(51).is_err());
        assert!(l.deposit(101).is_err());
        assert_eq!(l, ledger(100, 50, 0));
        l.deposit(100).unwrap();
        assert_eq!(l, ledger(0, 150, 0));
    }

    #[test]
    fn borrow_is_capped_at_twice_cash() {
        let mut l = ledger(400, 0, 5000);
        assert_eq!(l.maximum_loan(), 800);
        assert_eq!(
            l.borrow(801),
            Err(Rejection::LoanLimit {
                requested: 801,
                limit: 800
            })
        );
        l.borrow(800).unwrap();
        assert_eq!(l, ledger(1200, 0, 5800));
    }

    #[test]
    fn repay_pays_at_most_the_debt() {
        let mut l = ledger(1000, 0, 300);
        l.repay(5000).unwrap();
        assert_eq!(l, ledger(700, 0, 0));
        let mut short = ledger(100, 0, 300);
        assert!(short.repay(200).is_err());
        assert_eq!(short, ledger(100, 0, 300));
    }

    #[test]
    fn net_worth_can_be_negative() {
        assert_eq!(ledger(400, 0, 5000).net_worth(), -4600);
        let mut l = ledger(10, 0, 0);
        assert_eq!(l.seize(25), 10);
        assert_eq!(l.cash, 0);
    }
}
