//! Credit facility simulation engine
//!
//! A single forward pass over the fund term produces two parallel annual
//! ledgers: the unlevered scenario calls capital as it is needed, the levered
//! scenario pre-funds calls from the subscription line and repays it per the
//! configured trigger. The two net cash-flow streams then feed the IRR solver
//! and the metrics aggregator.

use crate::error::SimulationError;
use crate::params::{FeeBasis, FundParameters, RepaymentPolicy};
use crate::schedule::{deployment_schedule, realization_schedule};
use crate::simulation::irr::solve_irr;
use crate::simulation::ledger::CashFlowYear;
use crate::simulation::metrics::{self, SimulationResult};
use crate::simulation::state::SimulationState;

/// Engine for one validated parameter set.
///
/// Construction validates the input and materializes both weight schedules;
/// `run` is then infallible and has no suspension points or I/O.
pub struct SimulationEngine {
    params: FundParameters,
    deployment: Vec<f64>,
    realization: Vec<f64>,
}

impl SimulationEngine {
    pub fn new(params: FundParameters) -> Result<Self, SimulationError> {
        params.validate()?;
        let deployment = deployment_schedule(&params.deployment, params.investment_period_years);
        let realization = realization_schedule(
            &params.realization,
            params.total_term_years,
            params.investment_period_years,
        );
        Ok(Self {
            params,
            deployment,
            realization,
        })
    }

    /// Walk the fund term once and assemble the full result
    pub fn run(&self) -> SimulationResult {
        let term = self.params.total_term_years;
        let mut state = SimulationState::new();
        let mut years = Vec::with_capacity(term as usize);

        // Raw streams for the solver, year-0 entry first
        let mut flows_unlevered = Vec::with_capacity(term as usize + 1);
        let mut flows_levered = Vec::with_capacity(term as usize + 1);
        flows_unlevered.push(0.0);
        flows_levered.push(0.0);

        for year in 1..=term {
            let row = self.calculate_year(year, &mut state);
            flows_unlevered.push(row.net_cash_flow_unlevered);
            flows_levered.push(row.net_cash_flow_levered);
            years.push(row);
        }

        let irr_unlevered = solve_irr(&flows_unlevered);
        let irr_levered = solve_irr(&flows_levered);
        log::debug!(
            "simulated {} years: irr_unlevered={:.4} irr_levered={:.4} interest={:.0}",
            term,
            irr_unlevered.rate,
            irr_levered.rate,
            state.cumulative_interest
        );

        metrics::aggregate(&self.params, years, &state, irr_unlevered, irr_levered)
    }

    /// One fiscal year: calls, fee, draw/interest/repayment, both ledgers
    fn calculate_year(&self, year: u32, state: &mut SimulationState) -> CashFlowYear {
        let params = &self.params;
        let mut row = CashFlowYear::new(year);

        let idx = (year - 1) as usize;
        let investment = self
            .deployment
            .get(idx)
            .map_or(0.0, |w| params.fund_size * w);
        let distribution = self
            .realization
            .get(idx)
            .map_or(0.0, |w| params.gross_proceeds() * w);

        let fee = match params.fee_basis {
            FeeBasis::Commitments => params.fund_size * params.management_fee_rate,
            FeeBasis::InvestedCapital => {
                (state.cumulative_invested + investment) * params.management_fee_rate
            }
        };
        state.cumulative_invested += investment;
        state.cumulative_fees += fee;

        row.investment = investment;
        row.management_fee = fee;
        row.distribution_gross = distribution;

        // Unlevered ledger: call what the year needs, keep the distribution
        let funding_need = investment + fee;
        state.cumulative_called_unlevered += funding_need;
        state.cumulative_distributed_unlevered += distribution;
        state.capital_for_moic += funding_need;

        row.capital_call_unlevered = funding_need;
        row.distribution_unlevered = distribution;
        row.net_cash_flow_unlevered = distribution - funding_need;

        // Levered ledger
        let mut draw = 0.0;
        let mut interest = 0.0;
        let mut repayment = 0.0;
        let mut call_levered;

        if params.facility.enabled && year <= params.investment_period_years {
            // Draw as much of the year's need as the facility allows
            draw = funding_need.min((params.facility_size() - state.facility_balance).max(0.0));
            call_levered = funding_need - draw;
            state.facility_balance += draw;

            interest = self.accrue_interest(state.facility_balance, draw);
            state.cumulative_interest += interest;

            repayment = match params.facility.repayment {
                RepaymentPolicy::TimeBased => {
                    if distribution > 0.0 {
                        state.facility_balance.min(distribution)
                    } else {
                        // No distribution this year: the maximum-outstanding
                        // clock forces a scheduled repayment, funded by an
                        // additional capital call
                        let scheduled = state.facility_balance
                            * (365.0 / params.facility.max_days_outstanding as f64).min(1.0);
                        call_levered += scheduled;
                        scheduled
                    }
                }
                RepaymentPolicy::DistributionFunded => {
                    state.facility_balance.min(distribution)
                }
            };
            state.facility_balance -= repayment;

            call_levered += interest;
        } else {
            call_levered = funding_need;

            // Residual balance past the investment period keeps accruing
            // interest under the same day-proration as in-period draws
            if params.facility.enabled && state.facility_balance > 0.0 {
                interest = self.accrue_interest(state.facility_balance, 0.0);
                state.cumulative_interest += interest;

                repayment = if distribution > 0.0 {
                    state.facility_balance.min(distribution)
                } else if params.facility.repayment == RepaymentPolicy::TimeBased {
                    // Nothing to repay from: full repayment is forced via an
                    // additional capital call
                    let forced = state.facility_balance;
                    call_levered += forced;
                    forced
                } else {
                    0.0
                };
                state.facility_balance -= repayment;

                call_levered += interest;
            }
        }

        let net_distribution = (distribution - repayment).max(0.0);
        state.cumulative_called_levered += call_levered;
        state.cumulative_distributed_levered += net_distribution;

        row.capital_call_levered = call_levered;
        row.facility_draw = draw;
        row.facility_repayment = repayment;
        row.interest_paid = interest;
        row.facility_balance = state.facility_balance;
        row.distribution_levered = net_distribution;
        row.net_cash_flow_levered = net_distribution - call_levered;

        row.cumulative_called_unlevered = state.cumulative_called_unlevered;
        row.cumulative_distributed_unlevered = state.cumulative_distributed_unlevered;
        row.cumulative_called_levered = state.cumulative_called_levered;
        row.cumulative_distributed_levered = state.cumulative_distributed_levered;

        row
    }

    /// Simple interest on the average balance for the year, prorated to the
    /// lesser of the policy's maximum outstanding days or a full year
    fn accrue_interest(&self, balance: f64, draw: f64) -> f64 {
        let facility = &self.params.facility;
        let day_fraction = facility.max_days_outstanding.min(365) as f64 / 365.0;
        (balance - draw / 2.0) * facility.interest_rate * day_fraction
    }
}

/// Run one simulation: the engine's single entry point.
///
/// Pure and synchronous; identical input always produces identical output.
pub fn simulate(params: &FundParameters) -> Result<SimulationResult, SimulationError> {
    SimulationEngine::new(params.clone()).map(|engine| engine.run())
}
