//! Comparative performance metrics derived from the two ledgers
//!
//! All ratios are guarded: a zero denominator yields a defined 0.0 sentinel
//! so NaN can never reach formatting or export consumers.

use serde::{Deserialize, Serialize};

use crate::params::FundParameters;
use crate::simulation::irr::IrrSolution;
use crate::simulation::ledger::CashFlowYear;
use crate::simulation::state::SimulationState;

/// Performance metrics for one scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioMetrics {
    /// Annual IRR as a decimal
    pub irr: f64,
    /// Newton solver convergence diagnostic; the rate is best-effort either way
    pub irr_converged: bool,
    /// Distributions over invested capital + fees (financing costs excluded)
    pub moic: f64,
    /// Distributions over fund size
    pub tvpi: f64,
    /// Identical to TVPI in this model: no unrealized NAV is tracked
    pub dpi: f64,
}

/// Immutable output of one simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    /// Full year-by-year ledger
    pub years: Vec<CashFlowYear>,

    pub unlevered: ScenarioMetrics,
    pub levered: ScenarioMetrics,

    /// (levered IRR - unlevered IRR) in basis points
    pub irr_boost_bps: f64,
    /// MOIC given up to financing costs, as a percentage of unlevered MOIC
    pub moic_drag_pct: f64,

    pub total_interest_paid: f64,
    pub total_management_fees: f64,
    /// (fees + interest) over gross proceeds, percent
    pub fee_drag_pct: f64,

    /// Cumulative net cash flow per year, year-0 zero entry first
    pub j_curve_unlevered: Vec<f64>,
    pub j_curve_levered: Vec<f64>,

    /// Percent of unlevered capital calls avoided by the facility
    pub capital_efficiency_pct: f64,
    /// 365 x (levered calls / unlevered calls)
    pub avg_days_capital_outstanding: f64,
}

/// Fold the finished ledger and the two solver runs into the result record
pub(crate) fn aggregate(
    params: &FundParameters,
    years: Vec<CashFlowYear>,
    state: &SimulationState,
    irr_unlevered: IrrSolution,
    irr_levered: IrrSolution,
) -> SimulationResult {
    let moic_unlevered = safe_div(state.cumulative_distributed_unlevered, state.capital_for_moic);
    let moic_levered = safe_div(state.cumulative_distributed_levered, state.capital_for_moic);

    let unlevered = ScenarioMetrics {
        irr: irr_unlevered.rate,
        irr_converged: irr_unlevered.converged,
        moic: moic_unlevered,
        tvpi: safe_div(state.cumulative_distributed_unlevered, params.fund_size),
        dpi: safe_div(state.cumulative_distributed_unlevered, params.fund_size),
    };
    let levered = ScenarioMetrics {
        irr: irr_levered.rate,
        irr_converged: irr_levered.converged,
        moic: moic_levered,
        tvpi: safe_div(state.cumulative_distributed_levered, params.fund_size),
        dpi: safe_div(state.cumulative_distributed_levered, params.fund_size),
    };

    let moic_drag_pct = if moic_unlevered > 0.0 {
        (moic_unlevered - moic_levered) / moic_unlevered * 100.0
    } else {
        0.0
    };

    let called_unlevered = state.cumulative_called_unlevered;
    let called_levered = state.cumulative_called_levered;
    let capital_efficiency_pct = if called_unlevered > 0.0 {
        (1.0 - called_levered / called_unlevered) * 100.0
    } else {
        0.0
    };

    SimulationResult {
        irr_boost_bps: (irr_levered.rate - irr_unlevered.rate) * 10_000.0,
        moic_drag_pct,
        total_interest_paid: state.cumulative_interest,
        total_management_fees: state.cumulative_fees,
        fee_drag_pct: safe_div(
            state.cumulative_fees + state.cumulative_interest,
            params.gross_proceeds(),
        ) * 100.0,
        j_curve_unlevered: cumulative_series(&years, |y| y.net_cash_flow_unlevered),
        j_curve_levered: cumulative_series(&years, |y| y.net_cash_flow_levered),
        capital_efficiency_pct,
        avg_days_capital_outstanding: safe_div(called_levered, called_unlevered) * 365.0,
        unlevered,
        levered,
        years,
    }
}

/// Running cumulative series with a year-0 zero entry prefixed
fn cumulative_series(years: &[CashFlowYear], flow: impl Fn(&CashFlowYear) -> f64) -> Vec<f64> {
    let mut series = Vec::with_capacity(years.len() + 1);
    series.push(0.0);
    let mut running = 0.0;
    for year in years {
        running += flow(year);
        series.push(running);
    }
    series
}

fn safe_div(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_div_sentinel() {
        assert_eq!(safe_div(10.0, 0.0), 0.0);
        assert_eq!(safe_div(10.0, 4.0), 2.5);
    }

    #[test]
    fn test_cumulative_series_prefixes_year_zero() {
        let mut a = CashFlowYear::new(1);
        a.net_cash_flow_unlevered = -10.0;
        let mut b = CashFlowYear::new(2);
        b.net_cash_flow_unlevered = 25.0;

        let series = cumulative_series(&[a, b], |y| y.net_cash_flow_unlevered);
        assert_eq!(series, vec![0.0, -10.0, 15.0]);
    }
}
