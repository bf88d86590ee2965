//! Year-indexed cash-flow ledger records
//!
//! One `CashFlowYear` is appended per fiscal year of the fund term. Records
//! are never revised by later years; each year only reads the prior ending
//! facility balance.

use serde::{Deserialize, Serialize};

/// One fiscal year of the simulation, both scenarios side by side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashFlowYear {
    /// Fiscal year, 1-indexed
    pub year: u32,

    // Shared per-year amounts
    /// Capital deployed into investments this year
    pub investment: f64,
    /// Management fee accrued this year
    pub management_fee: f64,
    /// Gross realization proceeds this year
    pub distribution_gross: f64,

    // Unlevered scenario
    pub capital_call_unlevered: f64,
    pub distribution_unlevered: f64,
    pub net_cash_flow_unlevered: f64,
    pub cumulative_called_unlevered: f64,
    pub cumulative_distributed_unlevered: f64,

    // Levered scenario
    pub capital_call_levered: f64,
    pub facility_draw: f64,
    pub facility_repayment: f64,
    pub interest_paid: f64,
    /// Facility balance at year end, carried into the next year
    pub facility_balance: f64,
    /// Distribution net of facility repayment
    pub distribution_levered: f64,
    pub net_cash_flow_levered: f64,
    pub cumulative_called_levered: f64,
    pub cumulative_distributed_levered: f64,
}

impl CashFlowYear {
    /// Create an empty record for a year
    pub fn new(year: u32) -> Self {
        Self {
            year,
            investment: 0.0,
            management_fee: 0.0,
            distribution_gross: 0.0,
            capital_call_unlevered: 0.0,
            distribution_unlevered: 0.0,
            net_cash_flow_unlevered: 0.0,
            cumulative_called_unlevered: 0.0,
            cumulative_distributed_unlevered: 0.0,
            capital_call_levered: 0.0,
            facility_draw: 0.0,
            facility_repayment: 0.0,
            interest_paid: 0.0,
            facility_balance: 0.0,
            distribution_levered: 0.0,
            net_cash_flow_levered: 0.0,
            cumulative_called_levered: 0.0,
            cumulative_distributed_levered: 0.0,
        }
    }
}
