//! Simulation core: year loop, IRR solver, and metrics aggregation

mod engine;
mod irr;
mod ledger;
mod metrics;
mod state;

pub use engine::{simulate, SimulationEngine};
pub use irr::{solve_irr, IrrSolution};
pub use ledger::CashFlowYear;
pub use metrics::{ScenarioMetrics, SimulationResult};
pub use state::SimulationState;
