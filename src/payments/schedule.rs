use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::engine::AmortizationEngine;
use crate::errors::{AmortizationError, Result};
use crate::loan::Loan;
use crate::types::{LifeOfLoanResult, PaymentInterval};

use super::ScheduledPayment;

/// full payoff schedule of a loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub loan: Loan,
    pub payment_amount: Money,
    pub payments: Vec<ScheduledPayment>,
    pub total_interest: Money,
    pub total_paid: Money,
}

impl AmortizationSchedule {
    /// run the payoff simulation to completion and keep every payment
    pub fn generate(engine: &AmortizationEngine, loan: &Loan) -> Result<Self> {
        let simulation = engine.simulate(loan)?;
        let payment_amount = simulation.payment_amount();
        let payments = simulation.collect::<Result<Vec<_>>>()?;

        let total_interest = payments
            .last()
            .map(|p| p.cumulative_interest)
            .unwrap_or(Money::ZERO)
            .round_cents();

        let total_paid = payments.iter().map(ScheduledPayment::total_payment).sum();

        Ok(Self {
            loan: loan.clone(),
            payment_amount,
            payments,
            total_interest,
            total_paid,
        })
    }

    pub fn number_of_payments(&self) -> u32 {
        // generation stops at `max_periods`, a u32
        u32::try_from(self.payments.len()).unwrap_or(u32::MAX)
    }

    /// same totals `life_of_loan_amounts` reports
    pub fn life_of_loan(&self) -> LifeOfLoanResult {
        LifeOfLoanResult {
            total_interest: self.total_interest,
            number_of_payments: self.number_of_payments(),
        }
    }

    /// get payment by its 1-based number
    pub fn get_payment(&self, payment_number: u32) -> Option<&ScheduledPayment> {
        let index = payment_number.checked_sub(1)?;
        self.payments.get(index as usize)
    }

    /// remaining balance after a payment; the opening balance for payment 0
    pub fn balance_after_payment(&self, payment_number: u32) -> Money {
        match self.get_payment(payment_number) {
            Some(payment) => payment.ending_balance,
            None if payment_number == 0 => self
                .payments
                .first()
                .map(|p| p.beginning_balance)
                .unwrap_or(Money::ZERO),
            None => Money::ZERO,
        }
    }

    /// principal retired across the whole schedule, including extra principal
    pub fn total_principal(&self) -> Money {
        self.payments
            .iter()
            .map(|p| p.principal_portion + p.additional_principal)
            .sum()
    }

    /// assign due dates, the first payment falling on `first_payment_date`
    pub fn with_dates(mut self, first_payment_date: NaiveDate) -> Result<Self> {
        let interval = PaymentInterval::from_payments_per_year(self.loan.payments_per_period)
            .ok_or_else(|| {
                AmortizationError::calculation(format!(
                    "no payment interval for {} payments per year",
                    self.loan.payments_per_period
                ))
            })?;

        for (offset, payment) in self.payments.iter_mut().enumerate() {
            let due = interval.advance(first_payment_date, offset as u32).ok_or_else(|| {
                AmortizationError::calculation(format!(
                    "due date of payment {} is out of range",
                    payment.payment_number
                ))
            })?;
            payment.due_date = Some(due);
        }

        Ok(self)
    }

    /// due date of the final payment, once dates are assigned
    pub fn payoff_date(&self) -> Option<NaiveDate> {
        self.payments.last().and_then(|p| p.due_date)
    }
}
