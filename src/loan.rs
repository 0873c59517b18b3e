use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{AmortizationError, Result};

pub const DEFAULT_PAYMENTS_PER_PERIOD: Decimal = dec!(12);

/// terms of a fixed-rate installment loan at one point in time
///
/// The type performs no validation on construction; see [`Loan::validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    /// user-facing category label
    #[serde(rename = "type")]
    pub loan_type: String,
    /// balance outstanding at this snapshot
    pub principal: Money,
    /// term length in years
    pub years: Decimal,
    /// nominal annual rate as a fraction
    pub rate: Rate,
    /// one-time upfront reduction of the principal
    #[serde(default)]
    pub down_payment: Money,
    /// number of payments per year
    #[serde(default = "default_payments_per_period")]
    pub payments_per_period: Decimal,
    /// extra principal added to every payment
    #[serde(default)]
    pub additional_principal: Money,
}

fn default_payments_per_period() -> Decimal {
    DEFAULT_PAYMENTS_PER_PERIOD
}

impl Loan {
    /// create a loan with no down payment, monthly payments and no extra principal
    pub fn new(loan_type: impl Into<String>, principal: Money, years: Decimal, rate: Rate) -> Self {
        Self {
            loan_type: loan_type.into(),
            principal,
            years,
            rate,
            down_payment: Money::ZERO,
            payments_per_period: DEFAULT_PAYMENTS_PER_PERIOD,
            additional_principal: Money::ZERO,
        }
    }

    pub fn builder() -> LoanBuilder {
        LoanBuilder::new()
    }

    pub fn with_down_payment(mut self, down_payment: Money) -> Self {
        self.down_payment = down_payment;
        self
    }

    pub fn with_payments_per_period(mut self, payments_per_period: Decimal) -> Self {
        self.payments_per_period = payments_per_period;
        self
    }

    pub fn with_additional_principal(mut self, additional_principal: Money) -> Self {
        self.additional_principal = additional_principal;
        self
    }

    /// snapshot of these terms carrying a different outstanding principal
    pub fn with_principal(&self, principal: Money) -> Self {
        Self {
            principal,
            ..self.clone()
        }
    }

    /// amount actually borrowed once the down payment is applied
    pub fn financed_principal(&self) -> Money {
        self.principal - self.down_payment
    }

    /// total number of scheduled payments, `payments_per_period * years`
    pub fn scheduled_payments(&self) -> Decimal {
        self.payments_per_period * self.years
    }

    /// check the value invariants the engine relies on
    pub fn validate(&self) -> Result<()> {
        if !self.principal.is_positive() {
            return Err(invalid("principal", format!("must be positive, got {}", self.principal)));
        }
        if self.years <= Decimal::ZERO {
            return Err(invalid("years", format!("must be positive, got {}", self.years)));
        }
        if self.payments_per_period <= Decimal::ZERO {
            return Err(invalid(
                "payments_per_period",
                format!("must be positive, got {}", self.payments_per_period),
            ));
        }
        if self.rate < Rate::ZERO {
            return Err(invalid("rate", format!("must not be negative, got {}", self.rate)));
        }
        if self.down_payment.is_negative() {
            return Err(invalid("down_payment", format!("must not be negative, got {}", self.down_payment)));
        }
        if self.down_payment >= self.principal {
            return Err(invalid(
                "down_payment",
                format!("{} must be less than principal {}", self.down_payment, self.principal),
            ));
        }
        if self.additional_principal.is_negative() {
            return Err(invalid(
                "additional_principal",
                format!("must not be negative, got {}", self.additional_principal),
            ));
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

fn invalid(field: &'static str, reason: String) -> AmortizationError {
    AmortizationError::InvalidLoan { field, reason }
}

/// builder for loans; required fields are checked in [`LoanBuilder::build`]
#[derive(Debug, Default)]
pub struct LoanBuilder {
    loan_type: Option<String>,
    principal: Option<Money>,
    years: Option<Decimal>,
    rate: Option<Rate>,
    down_payment: Option<Money>,
    payments_per_period: Option<Decimal>,
    additional_principal: Option<Money>,
}

impl LoanBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn loan_type(mut self, loan_type: impl Into<String>) -> Self {
        self.loan_type = Some(loan_type.into());
        self
    }

    pub fn principal(mut self, principal: Money) -> Self {
        self.principal = Some(principal);
        self
    }

    pub fn years(mut self, years: Decimal) -> Self {
        self.years = Some(years);
        self
    }

    pub fn rate(mut self, rate: Rate) -> Self {
        self.rate = Some(rate);
        self
    }

    pub fn down_payment(mut self, down_payment: Money) -> Self {
        self.down_payment = Some(down_payment);
        self
    }

    pub fn payments_per_period(mut self, payments_per_period: Decimal) -> Self {
        self.payments_per_period = Some(payments_per_period);
        self
    }

    pub fn additional_principal(mut self, additional_principal: Money) -> Self {
        self.additional_principal = Some(additional_principal);
        self
    }

    pub fn build(self) -> Result<Loan> {
        let principal = self.principal.ok_or(AmortizationError::MissingField { field: "principal" })?;
        let years = self.years.ok_or(AmortizationError::MissingField { field: "years" })?;
        let rate = self.rate.ok_or(AmortizationError::MissingField { field: "rate" })?;

        Ok(Loan {
            loan_type: self.loan_type.unwrap_or_else(|| "Loan".to_string()),
            principal,
            years,
            rate,
            down_payment: self.down_payment.unwrap_or(Money::ZERO),
            payments_per_period: self.payments_per_period.unwrap_or(DEFAULT_PAYMENTS_PER_PERIOD),
            additional_principal: self.additional_principal.unwrap_or(Money::ZERO),
        })
    }
}
