//! Query-string codec for `FundParameters`
//!
//! Shareable links and persisted UI state flatten the parameter record into
//! `key=value` pairs. Every simulation input field must round-trip exactly,
//! so floats are written with Rust's shortest round-trippable representation
//! and enums use their wire spellings.

use std::collections::HashMap;

use crate::error::SimulationError;
use crate::params::data::{DeploymentPacing, FacilityConfig, FundParameters, RealizationPacing};

/// Flatten parameters into a query string (no leading `?`).
///
/// The custom-weight keys are present only when the matching pacing is
/// `custom`; all other keys are always written.
pub fn to_query_string(params: &FundParameters) -> String {
    let mut pairs: Vec<(&str, String)> = vec![
        ("fundSize", params.fund_size.to_string()),
        (
            "investmentPeriodYears",
            params.investment_period_years.to_string(),
        ),
        ("totalTermYears", params.total_term_years.to_string()),
        ("deploymentPacing", params.deployment.wire_name().to_string()),
    ];
    if let DeploymentPacing::Custom(weights) = &params.deployment {
        pairs.push(("customDeploymentWeights", join_weights(weights)));
    }
    pairs.push((
        "realizationPacing",
        params.realization.wire_name().to_string(),
    ));
    if let RealizationPacing::Custom(weights) = &params.realization {
        pairs.push(("customRealizationWeights", join_weights(weights)));
    }
    pairs.extend([
        (
            "managementFeeRate",
            params.management_fee_rate.to_string(),
        ),
        ("feeBasis", params.fee_basis.wire_name().to_string()),
        ("carryRate", params.carry_rate.to_string()),
        ("preferredReturn", params.preferred_return.to_string()),
        ("grossMoic", params.gross_moic.to_string()),
        ("facilityEnabled", params.facility.enabled.to_string()),
        ("facilitySizePct", params.facility.size_pct.to_string()),
        (
            "facilityInterestRate",
            params.facility.interest_rate.to_string(),
        ),
        (
            "facilityMaxDaysOutstanding",
            params.facility.max_days_outstanding.to_string(),
        ),
        (
            "facilityRepayment",
            params.facility.repayment.wire_name().to_string(),
        ),
    ]);

    let encoded: Vec<String> = pairs
        .into_iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect();
    encoded.join("&")
}

/// Parse a query string (with or without a leading `?`) back into parameters.
///
/// Unknown keys are ignored so UI-only state can share the same string;
/// missing or untypeable simulation inputs are rejected with the offending
/// key named.
pub fn from_query_string(query: &str) -> Result<FundParameters, SimulationError> {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut map: HashMap<&str, &str> = HashMap::new();
    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').ok_or_else(|| {
            SimulationError::MalformedQuery {
                key: pair.to_string(),
                reason: "expected key=value".to_string(),
            }
        })?;
        map.insert(key, value);
    }

    let deployment = match require(&map, "deploymentPacing")? {
        "custom" => DeploymentPacing::Custom(parse_weights(&map, "customDeploymentWeights")?),
        named => named
            .parse::<DeploymentPacing>()
            .map_err(|reason| malformed("deploymentPacing", reason))?,
    };
    let realization = match require(&map, "realizationPacing")? {
        "custom" => RealizationPacing::Custom(parse_weights(&map, "customRealizationWeights")?),
        named => named
            .parse::<RealizationPacing>()
            .map_err(|reason| malformed("realizationPacing", reason))?,
    };

    Ok(FundParameters {
        fund_size: parse_f64(&map, "fundSize")?,
        investment_period_years: parse_u32(&map, "investmentPeriodYears")?,
        total_term_years: parse_u32(&map, "totalTermYears")?,
        deployment,
        realization,
        management_fee_rate: parse_f64(&map, "managementFeeRate")?,
        fee_basis: require(&map, "feeBasis")?
            .parse()
            .map_err(|reason| malformed("feeBasis", reason))?,
        carry_rate: parse_f64(&map, "carryRate")?,
        preferred_return: parse_f64(&map, "preferredReturn")?,
        gross_moic: parse_f64(&map, "grossMoic")?,
        facility: FacilityConfig {
            enabled: parse_bool(&map, "facilityEnabled")?,
            size_pct: parse_f64(&map, "facilitySizePct")?,
            interest_rate: parse_f64(&map, "facilityInterestRate")?,
            max_days_outstanding: parse_u32(&map, "facilityMaxDaysOutstanding")?,
            repayment: require(&map, "facilityRepayment")?
                .parse()
                .map_err(|reason| malformed("facilityRepayment", reason))?,
        },
    })
}

fn join_weights(weights: &[f64]) -> String {
    weights
        .iter()
        .map(|w| w.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

fn malformed(key: &str, reason: impl Into<String>) -> SimulationError {
    SimulationError::MalformedQuery {
        key: key.to_string(),
        reason: reason.into(),
    }
}

fn require<'a>(map: &HashMap<&str, &'a str>, key: &str) -> Result<&'a str, SimulationError> {
    map.get(key)
        .copied()
        .ok_or_else(|| malformed(key, "missing"))
}

fn parse_f64(map: &HashMap<&str, &str>, key: &str) -> Result<f64, SimulationError> {
    let raw = require(map, key)?;
    raw.parse::<f64>()
        .map_err(|e| malformed(key, format!("{}: {:?}", e, raw)))
}

fn parse_u32(map: &HashMap<&str, &str>, key: &str) -> Result<u32, SimulationError> {
    let raw = require(map, key)?;
    raw.parse::<u32>()
        .map_err(|e| malformed(key, format!("{}: {:?}", e, raw)))
}

fn parse_bool(map: &HashMap<&str, &str>, key: &str) -> Result<bool, SimulationError> {
    match require(map, key)? {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(malformed(key, format!("expected true/false, got {:?}", other))),
    }
}

fn parse_weights(map: &HashMap<&str, &str>, key: &str) -> Result<Vec<f64>, SimulationError> {
    let raw = require(map, key)?;
    raw.split(',')
        .map(|part| {
            part.parse::<f64>()
                .map_err(|e| malformed(key, format!("{}: {:?}", e, part)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::data::{FeeBasis, RepaymentPolicy};

    #[test]
    fn test_round_trip_default_fund() {
        let params = FundParameters::default_fund();
        let query = to_query_string(&params);
        let parsed = from_query_string(&query).unwrap();
        assert_eq!(parsed, params);
    }

    #[test]
    fn test_round_trip_every_enum_variant() {
        let mut params = FundParameters::default_fund();
        params.deployment = DeploymentPacing::BackLoaded;
        params.realization = RealizationPacing::Linear;
        params.fee_basis = FeeBasis::InvestedCapital;
        params.facility.repayment = RepaymentPolicy::DistributionFunded;
        params.facility.enabled = false;

        let parsed = from_query_string(&to_query_string(&params)).unwrap();
        assert_eq!(parsed, params);
    }

    #[test]
    fn test_round_trip_custom_weights() {
        let mut params = FundParameters::default_fund();
        params.deployment = DeploymentPacing::Custom(vec![0.4, 0.25, 0.2, 0.1, 0.05]);
        params.realization = RealizationPacing::Custom(vec![
            0.0, 0.0, 0.1, 0.1, 0.1, 0.15, 0.15, 0.15, 0.15, 0.1,
        ]);

        let query = to_query_string(&params);
        assert!(query.contains("deploymentPacing=custom"));
        assert!(query.contains("customDeploymentWeights=0.4,0.25,0.2,0.1,0.05"));

        let parsed = from_query_string(&query).unwrap();
        assert_eq!(parsed, params);
    }

    #[test]
    fn test_round_trip_awkward_floats() {
        let mut params = FundParameters::default_fund();
        params.fund_size = 123_456_789.01;
        params.management_fee_rate = 0.017_5;
        params.facility.interest_rate = 1.0 / 3.0;

        let parsed = from_query_string(&to_query_string(&params)).unwrap();
        assert_eq!(parsed, params);
    }

    #[test]
    fn test_leading_question_mark_and_unknown_keys_are_tolerated() {
        let params = FundParameters::default_fund();
        let query = format!("?{}&uiTab=results", to_query_string(&params));
        let parsed = from_query_string(&query).unwrap();
        assert_eq!(parsed, params);
    }

    #[test]
    fn test_missing_key_is_named() {
        let query = to_query_string(&FundParameters::default_fund());
        let without_moic = query
            .split('&')
            .filter(|pair| !pair.starts_with("grossMoic="))
            .collect::<Vec<_>>()
            .join("&");

        let err = from_query_string(&without_moic).unwrap_err();
        assert!(err.to_string().contains("grossMoic"));
    }

    #[test]
    fn test_untypeable_value_is_rejected() {
        let query = to_query_string(&FundParameters::default_fund());
        let broken = query.replace("facilityEnabled=true", "facilityEnabled=yes");
        assert!(from_query_string(&broken).is_err());
    }
}
