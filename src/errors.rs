use thiserror::Error;

use crate::decimal::Money;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AmortizationError {
    #[error("invalid loan: {field} {reason}")]
    InvalidLoan {
        field: &'static str,
        reason: String,
    },

    #[error("simulation did not converge: {remaining_principal} still outstanding after {periods} payments")]
    SimulationDidNotConverge {
        periods: u32,
        remaining_principal: Money,
    },

    #[error("calculation error: {message}")]
    CalculationError {
        message: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("missing required field: {field}")]
    MissingField {
        field: &'static str,
    },

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl AmortizationError {
    pub(crate) fn calculation(message: impl Into<String>) -> Self {
        AmortizationError::CalculationError {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for AmortizationError {
    fn from(e: serde_json::Error) -> Self {
        AmortizationError::Serialization(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AmortizationError>;
