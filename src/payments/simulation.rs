use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::decimal::{Money, Rate};
use crate::errors::{AmortizationError, Result};
use crate::loan::Loan;

/// one payment of a payoff simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledPayment {
    pub payment_number: u32,
    pub due_date: Option<NaiveDate>,
    pub beginning_balance: Money,
    pub payment_amount: Money,
    pub interest_portion: Money,
    pub principal_portion: Money,
    pub additional_principal: Money,
    pub ending_balance: Money,
    pub cumulative_interest: Money,
    pub is_final: bool,
}

impl ScheduledPayment {
    /// cash paid in this period, level payment plus any extra principal
    pub fn total_payment(&self) -> Money {
        self.payment_amount + self.additional_principal
    }
}

/// period-by-period replay of a loan until its balance is retired
///
/// Every period except the last charges interest on the opening balance at
/// the per-payment rate, rounded to cents, and reduces the balance by the
/// level payment net of that interest plus the extra principal. Once the
/// balance no longer exceeds the level payment a final payment is made; its
/// interest is booked as `payment - residual`, so a negative residual (an
/// overshoot caused by extra principal) increases the reported interest.
///
/// Iteration stops with [`AmortizationError::SimulationDidNotConverge`] when
/// the balance fails to shrink in some period or when `max_periods`
/// payments have been simulated without paying the loan off.
#[derive(Debug, Clone)]
pub struct PayoffSimulation {
    payment: Money,
    periodic_rate: Rate,
    additional_principal: Money,
    balance: Money,
    cumulative_interest: Money,
    periods: u32,
    max_periods: u32,
    finished: bool,
}

impl PayoffSimulation {
    /// start a simulation; the down payment is applied here, exactly once
    pub fn new(loan: &Loan, payment: Money, periodic_rate: Rate, max_periods: u32) -> Self {
        let balance = loan.principal.round_cents() - loan.down_payment;

        Self {
            payment,
            periodic_rate,
            additional_principal: loan.additional_principal,
            balance,
            cumulative_interest: Money::ZERO,
            periods: 0,
            max_periods,
            finished: false,
        }
    }

    pub fn payment_amount(&self) -> Money {
        self.payment
    }

    pub fn remaining_principal(&self) -> Money {
        self.balance
    }

    /// unrounded interest booked so far
    pub fn cumulative_interest(&self) -> Money {
        self.cumulative_interest
    }

    /// payments simulated so far
    pub fn periods(&self) -> u32 {
        self.periods
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn step(&mut self) -> Result<Option<ScheduledPayment>> {
        if self.finished {
            return Ok(None);
        }

        if self.periods >= self.max_periods {
            return Err(self.abandon(self.balance));
        }

        let beginning_balance = self.balance;
        self.periods += 1;

        if beginning_balance <= self.payment {
            let interest = self.payment - beginning_balance;
            self.cumulative_interest += interest;
            self.balance = Money::ZERO;
            self.finished = true;

            return Ok(Some(ScheduledPayment {
                payment_number: self.periods,
                due_date: None,
                beginning_balance,
                payment_amount: self.payment,
                interest_portion: interest,
                principal_portion: beginning_balance,
                additional_principal: Money::ZERO,
                ending_balance: Money::ZERO,
                cumulative_interest: self.cumulative_interest,
                is_final: true,
            }));
        }

        let interest = beginning_balance.apply_rate(self.periodic_rate).round_cents();
        let principal_portion = self.payment - interest;
        let ending_balance =
            (beginning_balance - (principal_portion + self.additional_principal)).round_cents();

        // the per-period map is monotone in the balance, so a balance that
        // does not shrink now never will
        if ending_balance >= beginning_balance {
            return Err(self.abandon(ending_balance));
        }

        self.cumulative_interest += interest;
        self.balance = ending_balance;

        Ok(Some(ScheduledPayment {
            payment_number: self.periods,
            due_date: None,
            beginning_balance,
            payment_amount: self.payment,
            interest_portion: interest,
            principal_portion,
            additional_principal: self.additional_principal,
            ending_balance,
            cumulative_interest: self.cumulative_interest,
            is_final: false,
        }))
    }

    fn abandon(&mut self, remaining_principal: Money) -> AmortizationError {
        self.finished = true;
        warn!(
            periods = self.periods,
            remaining_principal = %remaining_principal,
            payment = %self.payment,
            "payoff simulation abandoned"
        );
        AmortizationError::SimulationDidNotConverge {
            periods: self.periods,
            remaining_principal,
        }
    }
}

impl Iterator for PayoffSimulation {
    type Item = Result<ScheduledPayment>;

    fn next(&mut self) -> Option<Self::Item> {
        self.step().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn loan(principal: i64, additional: Money) -> Loan {
        Loan::new("Test", Money::from_major(principal), dec!(1), Rate::from_decimal(dec!(0.12)))
            .with_additional_principal(additional)
    }

    #[test]
    fn test_rows_chain_balances() {
        let loan = loan(10_000, Money::ZERO);
        let rate = Rate::from_decimal(dec!(0.01));
        let rows: Vec<_> = PayoffSimulation::new(&loan, Money::from(dec!(888.49)), rate, 1_000)
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(rows.len(), 12);
        assert_eq!(rows[0].beginning_balance, Money::from_major(10_000));
        assert_eq!(rows[0].interest_portion, Money::from_major(100));
        assert_eq!(rows[0].ending_balance, Money::from(dec!(9211.51)));
        for pair in rows.windows(2) {
            assert_eq!(pair[0].ending_balance, pair[1].beginning_balance);
        }

        let last = rows.last().unwrap();
        assert!(last.is_final);
        assert_eq!(last.ending_balance, Money::ZERO);
        assert_eq!(last.beginning_balance, Money::from(dec!(879.67)));
        assert_eq!(last.interest_portion, Money::from(dec!(8.82)));
        assert_eq!(last.cumulative_interest, Money::from(dec!(661.88)));
    }

    #[test]
    fn test_down_payment_applied_once() {
        let loan = loan(10_000, Money::ZERO).with_down_payment(Money::from_major(4_000));
        let simulation = PayoffSimulation::new(&loan, Money::from_major(500), Rate::ZERO, 100);
        assert_eq!(simulation.remaining_principal(), Money::from_major(6_000));

        let rows: Vec<_> = simulation.collect::<Result<_>>().unwrap();
        assert_eq!(rows.len(), 12);
        assert!(rows.iter().all(|row| row.interest_portion.is_zero()));
    }

    #[test]
    fn test_balance_at_or_below_payment_pays_off_at_once() {
        let loan = loan(500, Money::ZERO);
        let mut simulation = PayoffSimulation::new(&loan, Money::from_major(600), Rate::ZERO, 100);

        let only = simulation.next().unwrap().unwrap();
        assert!(only.is_final);
        assert_eq!(only.interest_portion, Money::from_major(100));
        assert!(simulation.next().is_none());
        assert!(simulation.is_finished());
    }

    #[test]
    fn test_stalled_balance_is_reported() {
        let loan = loan(10_000, Money::ZERO);
        // 5% per period on 10,000 is 500, the whole payment
        let rate = Rate::from_decimal(dec!(0.05));
        let mut simulation = PayoffSimulation::new(&loan, Money::from_major(500), rate, 1_000);

        let err = simulation.next().unwrap().unwrap_err();
        assert_eq!(
            err,
            AmortizationError::SimulationDidNotConverge {
                periods: 1,
                remaining_principal: Money::from_major(10_000),
            }
        );
        assert!(simulation.next().is_none());
    }

    #[test]
    fn test_period_cap_is_reported() {
        let loan = loan(10_000, Money::ZERO);
        let mut simulation = PayoffSimulation::new(&loan, Money::from_major(100), Rate::ZERO, 5);

        for _ in 0..5 {
            assert!(simulation.next().unwrap().is_ok());
        }
        let err = simulation.next().unwrap().unwrap_err();
        assert_eq!(
            err,
            AmortizationError::SimulationDidNotConverge {
                periods: 5,
                remaining_principal: Money::from_major(9_500),
            }
        );
    }
}
