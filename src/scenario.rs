//! Batch and sweep execution over the simulation engine
//!
//! Each simulation is a pure function of its input, so batches parallelize
//! freely across a rayon pool with no shared state.

use rayon::prelude::*;

use crate::error::SimulationError;
use crate::params::FundParameters;
use crate::simulation::{simulate, SimulationResult};

/// Runs families of related simulations off one base parameter set.
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new(FundParameters::default_fund());
/// let results = runner.interest_rate_sweep(&[0.03, 0.045, 0.06]);
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    base: FundParameters,
}

impl ScenarioRunner {
    pub fn new(base: FundParameters) -> Self {
        Self { base }
    }

    /// Base parameters for inspection
    pub fn base(&self) -> &FundParameters {
        &self.base
    }

    /// Mutable base parameters for customization between runs
    pub fn base_mut(&mut self) -> &mut FundParameters {
        &mut self.base
    }

    /// Run the base parameter set once
    pub fn run(&self) -> Result<SimulationResult, SimulationError> {
        simulate(&self.base)
    }

    /// Run many independent parameter sets in parallel
    pub fn run_batch(
        params: &[FundParameters],
    ) -> Vec<Result<SimulationResult, SimulationError>> {
        params.par_iter().map(simulate).collect()
    }

    /// Sweep the facility interest rate, one result per candidate rate
    pub fn interest_rate_sweep(
        &self,
        rates: &[f64],
    ) -> Vec<Result<SimulationResult, SimulationError>> {
        let variants: Vec<FundParameters> = rates
            .iter()
            .map(|&rate| {
                let mut params = self.base.clone();
                params.facility.interest_rate = rate;
                params
            })
            .collect();
        Self::run_batch(&variants)
    }

    /// Sweep the facility size fraction, one result per candidate size
    pub fn facility_size_sweep(
        &self,
        sizes: &[f64],
    ) -> Vec<Result<SimulationResult, SimulationError>> {
        let variants: Vec<FundParameters> = sizes
            .iter()
            .map(|&size_pct| {
                let mut params = self.base.clone();
                params.facility.size_pct = size_pct;
                params
            })
            .collect();
        Self::run_batch(&variants)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::simulate;

    #[test]
    fn test_batch_matches_individual_runs() {
        let base = FundParameters::default_fund();
        let mut other = base.clone();
        other.facility.enabled = false;

        let batch = ScenarioRunner::run_batch(&[base.clone(), other.clone()]);
        assert_eq!(batch.len(), 2);

        let solo_base = simulate(&base).unwrap();
        let solo_other = simulate(&other).unwrap();
        assert_eq!(*batch[0].as_ref().unwrap(), solo_base);
        assert_eq!(*batch[1].as_ref().unwrap(), solo_other);
    }

    #[test]
    fn test_interest_rate_sweep_orders_interest_cost() {
        let runner = ScenarioRunner::new(FundParameters::default_fund());
        let results = runner.interest_rate_sweep(&[0.02, 0.05, 0.08]);

        let interest: Vec<f64> = results
            .iter()
            .map(|r| r.as_ref().unwrap().total_interest_paid)
            .collect();
        assert!(interest[0] < interest[1]);
        assert!(interest[1] < interest[2]);
    }

    #[test]
    fn test_sweep_surfaces_invalid_variants() {
        let runner = ScenarioRunner::new(FundParameters::default_fund());
        let results = runner.facility_size_sweep(&[0.1, 1.5]);
        assert!(results[0].is_ok());
        assert!(results[1].is_err());
    }
}
