use chrono::{Days, Months, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;

/// life-of-loan totals produced by one payoff simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifeOfLoanResult {
    pub total_interest: Money,
    pub number_of_payments: u32,
}

/// effect of adding a constant extra principal contribution to every payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalPrincipalSavings {
    pub baseline: LifeOfLoanResult,
    pub accelerated: LifeOfLoanResult,
    pub interest_saved: Money,
    pub payments_saved: i64,
}

/// divisor applied to the annual rate when deriving the level payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RateConvention {
    /// annual rate / 12, whatever the payment frequency
    #[default]
    FixedMonthly,
    /// annual rate / payments per year
    PaymentsPerYear,
}

/// calendar distance between two consecutive due dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentInterval {
    Months(u32),
    Days(u64),
}

impl PaymentInterval {
    /// whole months when the frequency divides a year evenly into months,
    /// otherwise the nearest whole number of days
    pub fn from_payments_per_year(payments_per_year: Decimal) -> Option<Self> {
        if payments_per_year <= Decimal::ZERO {
            return None;
        }

        if payments_per_year.fract().is_zero() {
            let per_year = payments_per_year.to_u32()?;
            if per_year <= 12 && 12 % per_year == 0 {
                return Some(PaymentInterval::Months(12 / per_year));
            }
        }

        let days = (Decimal::from(365) / payments_per_year).round().to_u64()?;
        Some(PaymentInterval::Days(days.max(1)))
    }

    /// due date of the `offset`-th payment after `first`
    pub fn advance(&self, first: NaiveDate, offset: u32) -> Option<NaiveDate> {
        match *self {
            PaymentInterval::Months(months) => {
                first.checked_add_months(Months::new(months.checked_mul(offset)?))
            }
            PaymentInterval::Days(days) => {
                first.checked_add_days(Days::new(days.checked_mul(offset as u64)?))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_interval_from_frequency() {
        assert_eq!(PaymentInterval::from_payments_per_year(dec!(12)), Some(PaymentInterval::Months(1)));
        assert_eq!(PaymentInterval::from_payments_per_year(dec!(4)), Some(PaymentInterval::Months(3)));
        assert_eq!(PaymentInterval::from_payments_per_year(dec!(1)), Some(PaymentInterval::Months(12)));
        assert_eq!(PaymentInterval::from_payments_per_year(dec!(26)), Some(PaymentInterval::Days(14)));
        assert_eq!(PaymentInterval::from_payments_per_year(dec!(52)), Some(PaymentInterval::Days(7)));
        assert_eq!(PaymentInterval::from_payments_per_year(dec!(5)), Some(PaymentInterval::Days(73)));
        assert_eq!(PaymentInterval::from_payments_per_year(Decimal::ZERO), None);
    }

    #[test]
    fn test_advance_clamps_month_end() {
        let first = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let monthly = PaymentInterval::Months(1);

        assert_eq!(monthly.advance(first, 0), Some(first));
        assert_eq!(monthly.advance(first, 1), NaiveDate::from_ymd_opt(2024, 2, 29));
        assert_eq!(monthly.advance(first, 12), NaiveDate::from_ymd_opt(2025, 1, 31));

        let biweekly = PaymentInterval::Days(14);
        assert_eq!(biweekly.advance(first, 2), NaiveDate::from_ymd_opt(2024, 2, 28));
    }
}
