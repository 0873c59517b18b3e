pub mod config;
pub mod decimal;
pub mod engine;
pub mod errors;
pub mod loan;
pub mod payments;
pub mod serialization;
pub mod types;

// re-export key types
pub use config::EngineConfig;
pub use decimal::{Money, Rate};
pub use engine::AmortizationEngine;
pub use errors::{AmortizationError, Result};
pub use loan::{Loan, LoanBuilder};
pub use payments::{AmortizationSchedule, PayoffSimulation, ScheduledPayment};
pub use serialization::LoanSummary;
pub use types::{AdditionalPrincipalSavings, LifeOfLoanResult, PaymentInterval, RateConvention};

// re-export external dependencies that users will need
pub use chrono;
pub use rust_decimal::Decimal;
