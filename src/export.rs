//! CSV export of the year ledger
//!
//! A read-only traversal for spreadsheet consumers; headers come from the
//! ledger's serialized field names, so the CSV contract follows the JSON one.

use std::io::Write;

use crate::simulation::CashFlowYear;

/// Write the ledger as CSV, one row per fiscal year, headers first
pub fn write_ledger_csv<W: Write>(writer: W, years: &[CashFlowYear]) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for year in years {
        csv_writer.serialize(year)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Ledger as an in-memory CSV string
pub fn ledger_to_csv_string(years: &[CashFlowYear]) -> Result<String, csv::Error> {
    let mut buffer = Vec::new();
    write_ledger_csv(&mut buffer, years)?;
    Ok(String::from_utf8(buffer).expect("CSV output is UTF-8"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::FundParameters;
    use crate::simulation::simulate;

    #[test]
    fn test_csv_has_header_and_one_row_per_year() {
        let result = simulate(&FundParameters::default_fund()).unwrap();
        let csv = ledger_to_csv_string(&result.years).unwrap();

        let lines: Vec<&str> = csv.trim_end().lines().collect();
        assert_eq!(lines.len(), result.years.len() + 1);
        assert!(lines[0].starts_with("year,investment,managementFee"));
    }

    #[test]
    fn test_csv_round_trips_first_row() {
        let result = simulate(&FundParameters::default_fund()).unwrap();
        let csv = ledger_to_csv_string(&result.years).unwrap();

        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let first: CashFlowYear = reader.deserialize().next().unwrap().unwrap();
        assert_eq!(first, result.years[0]);
    }
}
