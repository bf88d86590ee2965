//! Facility sensitivity sweep
//!
//! Runs the engine across a grid of facility interest rates and size
//! fractions and prints a single JSON document for API/export consumers.
//! Accepts config via environment variables:
//!   SWEEP_RATES - comma-separated annual rates (default "0.03,0.045,0.06")
//!   SWEEP_SIZES - comma-separated size fractions (default "0.1,0.2,0.3")
//!   SWEEP_QUERY - base parameters as a share-link query string

use rayon::prelude::*;
use serde::Serialize;
use std::env;
use std::time::Instant;

use subline_sim::params::query;
use subline_sim::{simulate, FundParameters};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SweepResponse {
    base: FundParameters,
    cells: Vec<SweepCell>,
    execution_time_ms: u64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SweepCell {
    interest_rate: f64,
    size_pct: f64,
    irr_unlevered: f64,
    irr_levered: f64,
    irr_boost_bps: f64,
    moic_drag_pct: f64,
    total_interest_paid: f64,
    capital_efficiency_pct: f64,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let rates = parse_list(
        &env::var("SWEEP_RATES").unwrap_or_else(|_| "0.03,0.045,0.06".to_string()),
    )?;
    let sizes = parse_list(
        &env::var("SWEEP_SIZES").unwrap_or_else(|_| "0.1,0.2,0.3".to_string()),
    )?;
    let base = match env::var("SWEEP_QUERY") {
        Ok(q) => query::from_query_string(&q)?,
        Err(_) => FundParameters::default_fund(),
    };

    let mut variants = Vec::with_capacity(rates.len() * sizes.len());
    for &rate in &rates {
        for &size_pct in &sizes {
            let mut params = base.clone();
            params.facility.enabled = true;
            params.facility.interest_rate = rate;
            params.facility.size_pct = size_pct;
            variants.push(params);
        }
    }

    let start = Instant::now();
    let cells = variants
        .par_iter()
        .map(|params| {
            let result = simulate(params)?;
            Ok(SweepCell {
                interest_rate: params.facility.interest_rate,
                size_pct: params.facility.size_pct,
                irr_unlevered: result.unlevered.irr,
                irr_levered: result.levered.irr,
                irr_boost_bps: result.irr_boost_bps,
                moic_drag_pct: result.moic_drag_pct,
                total_interest_paid: result.total_interest_paid,
                capital_efficiency_pct: result.capital_efficiency_pct,
            })
        })
        .collect::<Result<Vec<_>, subline_sim::SimulationError>>()?;

    let response = SweepResponse {
        base,
        cells,
        execution_time_ms: start.elapsed().as_millis() as u64,
    };
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}

fn parse_list(raw: &str) -> anyhow::Result<Vec<f64>> {
    raw.split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .map_err(|e| anyhow::anyhow!("bad number {:?}: {}", part, e))
        })
        .collect()
}
