pub mod schedule;
pub mod simulation;

pub use schedule::AmortizationSchedule;
pub use simulation::{PayoffSimulation, ScheduledPayment};
