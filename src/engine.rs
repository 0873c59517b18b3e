use rust_decimal::{Decimal, MathematicalOps};
use tracing::debug;

use crate::config::EngineConfig;
use crate::decimal::{Money, Rate};
use crate::errors::{AmortizationError, Result};
use crate::loan::Loan;
use crate::payments::{AmortizationSchedule, PayoffSimulation};
use crate::types::{AdditionalPrincipalSavings, LifeOfLoanResult, RateConvention};

/// amortization engine
///
/// Every operation is a pure function of the loan it is given and the
/// engine configuration; engines hold no mutable state and can be shared
/// freely across threads.
#[derive(Debug, Clone, Default)]
pub struct AmortizationEngine {
    config: EngineConfig,
}

impl AmortizationEngine {
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// level payment that retires the financed principal over the term
    ///
    /// `payment = (principal - down_payment) / ((t - 1) / (t * i))` where
    /// `t = (1 + i)^n`, `n = payments_per_period * years` and `i` is the
    /// annual rate over the divisor chosen by the rate convention (12 by
    /// default, regardless of payment frequency). A zero rate degrades to a
    /// straight-line split of the financed principal. Rounded to cents.
    pub fn payment_amount(&self, loan: &Loan) -> Result<Money> {
        self.check(loan)?;

        let principal = loan.financed_principal();
        let periods = loan
            .payments_per_period
            .checked_mul(loan.years)
            .filter(|n| *n > Decimal::ZERO)
            .ok_or_else(|| {
                AmortizationError::calculation(format!(
                    "cannot schedule {} payments per year over {} years",
                    loan.payments_per_period, loan.years
                ))
            })?;

        let periodic_rate = match self.config.rate_convention {
            RateConvention::FixedMonthly => loan.rate.monthly_rate(),
            RateConvention::PaymentsPerYear => interest_rate_per_payment(loan)?,
        };

        if periodic_rate.is_zero() {
            return principal
                .checked_div(periods)
                .map(|p| p.round_cents())
                .ok_or_else(|| AmortizationError::calculation("straight-line payment overflowed"));
        }

        let i = periodic_rate.as_decimal();
        let growth = (Decimal::ONE + i)
            .checked_powd(periods)
            .and_then(|time_factor| time_factor.checked_mul(i).map(|denominator| (time_factor, denominator)));

        let payment = match growth {
            Some((time_factor, denominator)) => (time_factor - Decimal::ONE)
                .checked_div(denominator)
                .filter(|factor| !factor.is_zero())
                .and_then(|discount_factor| principal.checked_div(discount_factor)),
            // (t - 1) / (t * i) tends to 1 / i once t leaves the representable range
            None if i > Decimal::ZERO => {
                debug!(periodic_rate = %i, periods = %periods, "annuity factor saturated");
                Some(principal.apply_rate(periodic_rate))
            }
            None => None,
        };

        payment.map(|p| p.round_cents()).ok_or_else(|| {
            AmortizationError::calculation(format!(
                "payment is undefined for periodic rate {i} over {periods} payments"
            ))
        })
    }

    /// interest charged for one payment period on the loan's full principal
    ///
    /// Uses `rate / payments_per_period`, unlike [`Self::payment_amount`],
    /// and ignores the down payment. Rounded to cents.
    pub fn interest_amount_paid(&self, loan: &Loan) -> Result<Money> {
        self.check(loan)?;
        let rate = interest_rate_per_payment(loan)?;
        Ok(loan.principal.apply_rate(rate).round_cents())
    }

    /// principal retired by one payment at the loan's current principal,
    /// including the extra principal contribution
    pub fn principal_amount_paid(&self, loan: &Loan) -> Result<Money> {
        let payment = self.payment_amount(loan)?;
        let interest = self.interest_amount_paid(loan)?;
        Ok(payment - interest + loan.additional_principal)
    }

    /// lazy payoff simulation of the loan, one item per payment
    pub fn simulate(&self, loan: &Loan) -> Result<PayoffSimulation> {
        let payment = self.payment_amount(loan)?;
        let rate = interest_rate_per_payment(loan)?;

        debug!(
            loan_type = %loan.loan_type,
            principal = %loan.principal,
            payment = %payment,
            "starting payoff simulation"
        );

        Ok(PayoffSimulation::new(loan, payment, rate, self.config.max_periods))
    }

    /// cumulative interest and number of payments over the life of the loan
    pub fn life_of_loan_amounts(&self, loan: &Loan) -> Result<LifeOfLoanResult> {
        let mut simulation = self.simulate(loan)?;
        for payment in simulation.by_ref() {
            payment?;
        }

        let result = LifeOfLoanResult {
            total_interest: simulation.cumulative_interest().round_cents(),
            number_of_payments: simulation.periods(),
        };

        debug!(
            total_interest = %result.total_interest,
            number_of_payments = result.number_of_payments,
            "payoff simulation finished"
        );

        Ok(result)
    }

    /// every payment of the loan with running totals
    pub fn schedule(&self, loan: &Loan) -> Result<AmortizationSchedule> {
        AmortizationSchedule::generate(self, loan)
    }

    /// compare the loan as given against the same loan paying `extra` more
    /// principal every period
    pub fn savings_from_additional_principal(
        &self,
        loan: &Loan,
        extra: Money,
    ) -> Result<AdditionalPrincipalSavings> {
        if extra.is_negative() {
            return Err(AmortizationError::InvalidLoan {
                field: "additional_principal",
                reason: format!("extra contribution must not be negative, got {extra}"),
            });
        }

        let baseline = self.life_of_loan_amounts(loan)?;
        let accelerated_loan = loan
            .clone()
            .with_additional_principal(loan.additional_principal + extra);
        let accelerated = self.life_of_loan_amounts(&accelerated_loan)?;

        Ok(AdditionalPrincipalSavings {
            baseline,
            accelerated,
            interest_saved: baseline.total_interest - accelerated.total_interest,
            payments_saved: i64::from(baseline.number_of_payments)
                - i64::from(accelerated.number_of_payments),
        })
    }

    fn check(&self, loan: &Loan) -> Result<()> {
        if self.config.validate_loans {
            loan.validate()?;
        }
        Ok(())
    }
}

fn interest_rate_per_payment(loan: &Loan) -> Result<Rate> {
    loan.rate
        .per_period(loan.payments_per_period)
        .ok_or_else(|| AmortizationError::calculation("payments per period is zero"))
}
