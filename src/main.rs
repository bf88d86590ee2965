//! Subscription-line simulator CLI
//!
//! Runs one simulation over the default fund plus any overrides, prints the
//! year ledger and comparative summary, and can emit the result as JSON or
//! the ledger as CSV for spreadsheet work.

use std::fs::File;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use subline_sim::params::query;
use subline_sim::{export, format, simulate, FundParameters};

#[derive(Parser, Debug)]
#[command(
    name = "subline-sim",
    version,
    about = "Simulate a closed-end fund with and without a subscription line"
)]
struct Cli {
    /// Load every parameter from a share-link query string before applying
    /// other flags
    #[arg(long)]
    query: Option<String>,

    /// Fund size in currency units
    #[arg(long)]
    fund_size: Option<f64>,

    /// Investment period in years
    #[arg(long)]
    investment_period: Option<u32>,

    /// Total fund term in years
    #[arg(long)]
    term: Option<u32>,

    /// Deployment pacing: linear | front-loaded | back-loaded
    #[arg(long)]
    deployment: Option<String>,

    /// Realization pacing: linear | j-curve | back-loaded
    #[arg(long)]
    realization: Option<String>,

    /// Annual management fee rate (fraction)
    #[arg(long)]
    fee_rate: Option<f64>,

    /// Gross multiple on invested capital
    #[arg(long)]
    gross_moic: Option<f64>,

    /// Disable the subscription line entirely
    #[arg(long)]
    no_facility: bool,

    /// Facility size as a fraction of fund size
    #[arg(long)]
    facility_size_pct: Option<f64>,

    /// Facility annual interest rate (fraction)
    #[arg(long)]
    facility_rate: Option<f64>,

    /// Maximum days a draw may remain outstanding
    #[arg(long)]
    max_days: Option<u32>,

    /// Print the full result as JSON instead of the table
    #[arg(long)]
    json: bool,

    /// Write the year ledger to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,
}

impl Cli {
    fn build_params(&self) -> anyhow::Result<FundParameters> {
        let mut params = match &self.query {
            Some(q) => query::from_query_string(q).context("parsing --query")?,
            None => FundParameters::default_fund(),
        };

        if let Some(fund_size) = self.fund_size {
            params.fund_size = fund_size;
        }
        if let Some(years) = self.investment_period {
            params.investment_period_years = years;
        }
        if let Some(years) = self.term {
            params.total_term_years = years;
        }
        if let Some(pacing) = &self.deployment {
            params.deployment = pacing.parse().map_err(anyhow::Error::msg)?;
        }
        if let Some(pacing) = &self.realization {
            params.realization = pacing.parse().map_err(anyhow::Error::msg)?;
        }
        if let Some(rate) = self.fee_rate {
            params.management_fee_rate = rate;
        }
        if let Some(moic) = self.gross_moic {
            params.gross_moic = moic;
        }
        if self.no_facility {
            params.facility.enabled = false;
        }
        if let Some(size_pct) = self.facility_size_pct {
            params.facility.size_pct = size_pct;
        }
        if let Some(rate) = self.facility_rate {
            params.facility.interest_rate = rate;
        }
        if let Some(days) = self.max_days {
            params.facility.max_days_outstanding = days;
        }

        Ok(params)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let params = cli.build_params()?;
    let result = simulate(&params).context("simulation rejected the input")?;

    if let Some(path) = &cli.csv {
        let file = File::create(path)
            .with_context(|| format!("creating {}", path.display()))?;
        export::write_ledger_csv(file, &result.years)?;
        eprintln!("Ledger written to {}", path.display());
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("Subscription Line Simulator");
    println!("===========================\n");
    println!(
        "Fund: {} over {}y (invest {}y), {} gross, fee {} {}",
        format::currency_compact(params.fund_size),
        params.total_term_years,
        params.investment_period_years,
        format::multiple(params.gross_moic),
        format::percent(params.management_fee_rate),
        params.fee_basis.wire_name(),
    );
    if params.facility.enabled {
        println!(
            "Facility: {} at {} / {} days max, {} repayment\n",
            format::currency_compact(params.facility_size()),
            format::percent(params.facility.interest_rate),
            params.facility.max_days_outstanding,
            params.facility.repayment.wire_name(),
        );
    } else {
        println!("Facility: disabled\n");
    }

    println!(
        "{:>4} {:>12} {:>12} {:>12} {:>12} {:>12} {:>11} {:>12} {:>12}",
        "Year", "Call (U)", "Dist (U)", "Call (L)", "Draw", "Repay", "Interest", "Balance", "Net (L)"
    );
    println!("{}", "-".repeat(106));
    for year in &result.years {
        println!(
            "{:>4} {:>12} {:>12} {:>12} {:>12} {:>12} {:>11} {:>12} {:>12}",
            year.year,
            format::currency_compact(year.capital_call_unlevered),
            format::currency_compact(year.distribution_unlevered),
            format::currency_compact(year.capital_call_levered),
            format::currency_compact(year.facility_draw),
            format::currency_compact(year.facility_repayment),
            format::currency_compact(year.interest_paid),
            format::currency_compact(year.facility_balance),
            format::currency_compact(year.net_cash_flow_levered),
        );
    }

    println!("\nPerformance:");
    println!(
        "  IRR:  {} unlevered, {} levered ({})",
        format::percent(result.unlevered.irr),
        format::percent(result.levered.irr),
        format::bps(result.irr_boost_bps),
    );
    println!(
        "  MOIC: {} unlevered, {} levered (drag {:.2}%)",
        format::multiple(result.unlevered.moic),
        format::multiple(result.levered.moic),
        result.moic_drag_pct,
    );
    println!(
        "  TVPI/DPI: {} unlevered, {} levered",
        format::multiple(result.unlevered.tvpi),
        format::multiple(result.levered.tvpi),
    );
    println!("\nCosts:");
    println!(
        "  Interest paid: {}",
        format::currency(result.total_interest_paid)
    );
    println!(
        "  Management fees: {}",
        format::currency(result.total_management_fees)
    );
    println!("  Fee drag: {:.2}% of gross proceeds", result.fee_drag_pct);
    println!("\nUtilization:");
    println!(
        "  Capital efficiency: {:.1}%",
        result.capital_efficiency_pct
    );
    println!(
        "  Avg days capital outstanding: {:.0}",
        result.avg_days_capital_outstanding
    );

    println!("\nShare link: ?{}", query::to_query_string(&params));

    Ok(())
}
