//! Fund and facility input parameters
//!
//! `FundParameters` is the single input record for a simulation run. Field
//! names and units (fractions for rates, absolute currency for sizes) are a
//! stable contract for UI, export, and share-link consumers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SimulationError;

/// Weight-vector sum tolerance for custom schedules
const CUSTOM_WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// How capital deployment is paced across the investment period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeploymentPacing {
    /// Uniform 1/n per year
    Linear,
    /// Heaviest deployment in the first years
    FrontLoaded,
    /// Heaviest deployment in the last years
    BackLoaded,
    /// Explicit per-year weights, used verbatim
    Custom(Vec<f64>),
}

impl DeploymentPacing {
    /// Wire spelling used by the query-string codec and CLI
    pub fn wire_name(&self) -> &'static str {
        match self {
            DeploymentPacing::Linear => "linear",
            DeploymentPacing::FrontLoaded => "front-loaded",
            DeploymentPacing::BackLoaded => "back-loaded",
            DeploymentPacing::Custom(_) => "custom",
        }
    }
}

impl fmt::Display for DeploymentPacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for DeploymentPacing {
    type Err = String;

    /// Parses the named policies only; custom vectors travel as a separate
    /// weight list on the wire
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linear" => Ok(DeploymentPacing::Linear),
            "front-loaded" => Ok(DeploymentPacing::FrontLoaded),
            "back-loaded" => Ok(DeploymentPacing::BackLoaded),
            other => Err(format!("unknown deployment pacing: {}", other)),
        }
    }
}

/// How realizations are paced across the fund term
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RealizationPacing {
    /// Uniform 1/n per year
    Linear,
    /// Nothing early, ramp through the middle years, tail off
    JCurve,
    /// Nothing until the deployment horizon ends, then increasing
    BackLoaded,
    /// Explicit per-year weights, used verbatim
    Custom(Vec<f64>),
}

impl RealizationPacing {
    /// Wire spelling used by the query-string codec and CLI
    pub fn wire_name(&self) -> &'static str {
        match self {
            RealizationPacing::Linear => "linear",
            RealizationPacing::JCurve => "j-curve",
            RealizationPacing::BackLoaded => "back-loaded",
            RealizationPacing::Custom(_) => "custom",
        }
    }
}

impl fmt::Display for RealizationPacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for RealizationPacing {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linear" => Ok(RealizationPacing::Linear),
            "j-curve" => Ok(RealizationPacing::JCurve),
            "back-loaded" => Ok(RealizationPacing::BackLoaded),
            other => Err(format!("unknown realization pacing: {}", other)),
        }
    }
}

/// Basis on which the management fee accrues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeeBasis {
    /// Fee on total commitments every year
    #[serde(rename = "on-commitments")]
    Commitments,
    /// Fee on cumulative invested capital (fees excluded from the base)
    #[serde(rename = "on-invested-capital")]
    InvestedCapital,
}

impl FeeBasis {
    pub fn wire_name(&self) -> &'static str {
        match self {
            FeeBasis::Commitments => "on-commitments",
            FeeBasis::InvestedCapital => "on-invested-capital",
        }
    }
}

impl FromStr for FeeBasis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "on-commitments" => Ok(FeeBasis::Commitments),
            "on-invested-capital" => Ok(FeeBasis::InvestedCapital),
            other => Err(format!("unknown fee basis: {}", other)),
        }
    }
}

/// What triggers repayment of the outstanding facility balance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RepaymentPolicy {
    /// Repay from distributions when available; otherwise a scheduled
    /// repayment is forced via an additional capital call once the maximum
    /// outstanding period lapses
    TimeBased,
    /// Repay only from distributions, never forcing a capital call
    DistributionFunded,
}

impl RepaymentPolicy {
    pub fn wire_name(&self) -> &'static str {
        match self {
            RepaymentPolicy::TimeBased => "time-based",
            RepaymentPolicy::DistributionFunded => "distribution-funded",
        }
    }
}

impl FromStr for RepaymentPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "time-based" => Ok(RepaymentPolicy::TimeBased),
            "distribution-funded" => Ok(RepaymentPolicy::DistributionFunded),
            other => Err(format!("unknown repayment policy: {}", other)),
        }
    }
}

/// Subscription-line configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacilityConfig {
    /// Whether the facility is used at all
    pub enabled: bool,

    /// Facility size as a fraction of fund size, in [0, 1]
    pub size_pct: f64,

    /// Annual simple interest rate on the outstanding balance
    pub interest_rate: f64,

    /// Maximum days a draw may remain outstanding
    pub max_days_outstanding: u32,

    /// Repayment trigger policy
    pub repayment: RepaymentPolicy,
}

/// Immutable input record for one simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundParameters {
    /// Committed capital in absolute currency units
    pub fund_size: f64,

    /// Years over which capital is deployed
    pub investment_period_years: u32,

    /// Total fund term in years (>= investment period)
    pub total_term_years: u32,

    /// Capital deployment pacing
    pub deployment: DeploymentPacing,

    /// Realization / distribution pacing
    pub realization: RealizationPacing,

    /// Annual management fee rate (fraction)
    pub management_fee_rate: f64,

    /// Basis on which the management fee accrues
    pub fee_basis: FeeBasis,

    /// Carried interest rate (fraction). Carried in the record for waterfall
    /// consumers; the deterministic ledger does not consume it
    pub carry_rate: f64,

    /// Preferred return rate (fraction), carried like `carry_rate`
    pub preferred_return: f64,

    /// Gross multiple-on-invested-capital assumption
    pub gross_moic: f64,

    /// Subscription-line configuration
    pub facility: FacilityConfig,
}

impl FundParameters {
    /// Baseline mid-market buyout fund used by the CLI and tests.
    ///
    /// An explicit factory rather than a shared default constant, so callers
    /// can never observe cross-run mutation of a module singleton.
    pub fn default_fund() -> Self {
        Self {
            fund_size: 100_000_000.0,
            investment_period_years: 5,
            total_term_years: 10,
            deployment: DeploymentPacing::FrontLoaded,
            realization: RealizationPacing::JCurve,
            management_fee_rate: 0.02,
            fee_basis: FeeBasis::Commitments,
            carry_rate: 0.20,
            preferred_return: 0.08,
            gross_moic: 2.5,
            facility: FacilityConfig {
                enabled: true,
                size_pct: 0.15,
                interest_rate: 0.045,
                max_days_outstanding: 180,
                repayment: RepaymentPolicy::TimeBased,
            },
        }
    }

    /// Total proceeds realized over the fund term
    pub fn gross_proceeds(&self) -> f64 {
        self.fund_size * self.gross_moic
    }

    /// Facility size in absolute currency units
    pub fn facility_size(&self) -> f64 {
        self.fund_size * self.facility.size_pct
    }

    /// Boundary validation for every field that feeds the ledger.
    ///
    /// Rejects here rather than letting NaN or Infinity surface in metrics.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if !self.fund_size.is_finite() || self.fund_size <= 0.0 {
            return Err(SimulationError::invalid(
                "fundSize",
                format!("must be a positive finite amount, got {}", self.fund_size),
            ));
        }
        if self.investment_period_years == 0 {
            return Err(SimulationError::invalid(
                "investmentPeriodYears",
                "must be at least 1",
            ));
        }
        if self.total_term_years < self.investment_period_years {
            return Err(SimulationError::invalid(
                "totalTermYears",
                format!(
                    "must be >= investment period ({} < {})",
                    self.total_term_years, self.investment_period_years
                ),
            ));
        }
        if !self.management_fee_rate.is_finite() || self.management_fee_rate < 0.0 {
            return Err(SimulationError::invalid(
                "managementFeeRate",
                "must be a non-negative finite rate",
            ));
        }
        if !self.carry_rate.is_finite() || !(0.0..=1.0).contains(&self.carry_rate) {
            return Err(SimulationError::invalid(
                "carryRate",
                "must be within [0, 1]",
            ));
        }
        if !self.preferred_return.is_finite() || self.preferred_return < 0.0 {
            return Err(SimulationError::invalid(
                "preferredReturn",
                "must be a non-negative finite rate",
            ));
        }
        if !self.gross_moic.is_finite() || self.gross_moic < 0.0 {
            return Err(SimulationError::invalid(
                "grossMoic",
                "must be a non-negative finite multiple",
            ));
        }

        let facility = &self.facility;
        if !facility.size_pct.is_finite() || !(0.0..=1.0).contains(&facility.size_pct) {
            return Err(SimulationError::invalid(
                "facilitySizePct",
                format!("must be within [0, 1], got {}", facility.size_pct),
            ));
        }
        if !facility.interest_rate.is_finite() || facility.interest_rate < 0.0 {
            return Err(SimulationError::invalid(
                "facilityInterestRate",
                "must be a non-negative finite rate",
            ));
        }
        if facility.max_days_outstanding == 0 {
            return Err(SimulationError::invalid(
                "facilityMaxDaysOutstanding",
                "must be at least 1 day",
            ));
        }

        if let DeploymentPacing::Custom(weights) = &self.deployment {
            validate_custom_weights(
                "customDeploymentWeights",
                weights,
                self.investment_period_years,
            )?;
        }
        if let RealizationPacing::Custom(weights) = &self.realization {
            validate_custom_weights("customRealizationWeights", weights, self.total_term_years)?;
        }

        Ok(())
    }
}

/// Custom vectors are used verbatim, so they must already satisfy the weight
/// invariants the generators guarantee: right length, non-negative, sum 1
fn validate_custom_weights(
    field: &'static str,
    weights: &[f64],
    horizon_years: u32,
) -> Result<(), SimulationError> {
    if weights.len() != horizon_years as usize {
        return Err(SimulationError::invalid(
            field,
            format!(
                "expected {} weights for the horizon, got {}",
                horizon_years,
                weights.len()
            ),
        ));
    }
    if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
        return Err(SimulationError::invalid(
            field,
            "weights must be non-negative and finite",
        ));
    }
    let sum: f64 = weights.iter().sum();
    if (sum - 1.0).abs() > CUSTOM_WEIGHT_SUM_TOLERANCE {
        return Err(SimulationError::invalid(
            field,
            format!("weights must sum to 1.0, got {}", sum),
        ));
    }
    Ok(())
}
