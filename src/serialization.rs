//! serializable views handed to display collaborators
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::engine::AmortizationEngine;
use crate::errors::Result;
use crate::loan::Loan;

/// terms of a loan next to the figures the engine derives from them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanSummary {
    pub terms: TermsView,
    pub payment: PaymentView,
    pub life_of_loan: LifeOfLoanView,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermsView {
    pub loan_type: String,
    pub principal: Money,
    pub down_payment: Money,
    pub financed_principal: Money,
    pub years: Decimal,
    pub rate: Rate,
    pub payments_per_period: Decimal,
    pub additional_principal: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentView {
    pub payment_amount: Money,
    pub interest_amount: Money,
    pub principal_amount: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifeOfLoanView {
    pub total_interest: Money,
    pub number_of_payments: u32,
}

impl LoanSummary {
    pub fn from_loan(engine: &AmortizationEngine, loan: &Loan) -> Result<Self> {
        let life = engine.life_of_loan_amounts(loan)?;

        Ok(LoanSummary {
            terms: TermsView {
                loan_type: loan.loan_type.clone(),
                principal: loan.principal,
                down_payment: loan.down_payment,
                financed_principal: loan.financed_principal(),
                years: loan.years,
                rate: loan.rate,
                payments_per_period: loan.payments_per_period,
                additional_principal: loan.additional_principal,
            },
            payment: PaymentView {
                payment_amount: engine.payment_amount(loan)?,
                interest_amount: engine.interest_amount_paid(loan)?,
                principal_amount: engine.principal_amount_paid(loan)?,
            },
            life_of_loan: LifeOfLoanView {
                total_interest: life.total_interest,
                number_of_payments: life.number_of_payments,
            },
        })
    }

    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
