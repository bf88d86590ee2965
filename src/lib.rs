//! Subscription-line fund simulator
//!
//! This library provides:
//! - Deployment and realization pacing schedules
//! - Year-by-year credit facility mechanics (draw, interest, repayment) for
//!   levered vs. unlevered scenarios of a closed-end fund
//! - Newton-Raphson IRR over irregular annual cash-flow streams
//! - Comparative performance metrics (IRR boost, MOIC drag, J-curves,
//!   facility utilization)
//! - Share-link parameter serialization and CSV ledger export

pub mod error;
pub mod export;
pub mod format;
pub mod params;
pub mod scenario;
pub mod schedule;
pub mod simulation;

// Re-export commonly used types
pub use error::SimulationError;
pub use params::{
    DeploymentPacing, FacilityConfig, FeeBasis, FundParameters, RealizationPacing,
    RepaymentPolicy,
};
pub use scenario::ScenarioRunner;
pub use simulation::{simulate, CashFlowYear, SimulationEngine, SimulationResult};
