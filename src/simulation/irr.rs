//! Internal Rate of Return via Newton-Raphson
//!
//! The solver is best-effort by contract: it returns its last estimate after
//! the iteration budget whether or not the step tolerance was met, and never
//! fails. Callers that care can inspect the `converged` flag; cash-flow
//! streams with multiple sign changes are the known risk case.

/// Initial annual-rate guess
const INITIAL_GUESS: f64 = 0.10;

/// Absolute step-size tolerance
const TOLERANCE: f64 = 1e-7;

/// Iteration budget
const MAX_ITERATIONS: u32 = 1000;

/// Result of one solver run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IrrSolution {
    /// Annual rate as a decimal (0.15 = 15%)
    pub rate: f64,
    /// Whether the step tolerance was met within the iteration budget
    pub converged: bool,
}

/// Solve for the rate making the net present value of `cash_flows` zero.
///
/// `cash_flows[0]` is the year-0 flow (typically zero here) and subsequent
/// entries are one per year. Scenario-agnostic: the engine calls this once
/// for the unlevered stream and once for the levered stream.
pub fn solve_irr(cash_flows: &[f64]) -> IrrSolution {
    // An all-zero stream discounts to zero at any rate
    if cash_flows.iter().all(|cf| cf.abs() < 1e-12) {
        return IrrSolution {
            rate: 0.0,
            converged: true,
        };
    }

    let mut rate = INITIAL_GUESS;
    for iteration in 0..MAX_ITERATIONS {
        let (npv, dnpv) = npv_and_derivative(cash_flows, rate);

        if dnpv.abs() < 1e-20 {
            log::debug!(
                "IRR derivative vanished at iteration {}, returning rate {:.6}",
                iteration,
                rate
            );
            return IrrSolution {
                rate,
                converged: false,
            };
        }

        // Bound each step to keep (1 + r) positive and the rate sane
        let next = (rate - npv / dnpv).max(-0.99).min(10.0);

        if (next - rate).abs() < TOLERANCE {
            return IrrSolution {
                rate: next,
                converged: true,
            };
        }
        rate = next;
    }

    log::debug!(
        "IRR did not converge within {} iterations, returning rate {:.6}",
        MAX_ITERATIONS,
        rate
    );
    IrrSolution {
        rate,
        converged: false,
    }
}

/// NPV and its analytic derivative with respect to the rate
fn npv_and_derivative(cash_flows: &[f64], rate: f64) -> (f64, f64) {
    let mut npv = 0.0;
    let mut dnpv = 0.0;

    for (t, &cf) in cash_flows.iter().enumerate() {
        npv += cf / (1.0 + rate).powi(t as i32);
        if t > 0 {
            dnpv -= t as f64 * cf / (1.0 + rate).powi(t as i32 + 1);
        }
    }

    (npv, dnpv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_single_period_ten_percent() {
        // -1000 now, 1100 in one year
        let solution = solve_irr(&[-1000.0, 1100.0]);
        assert!(solution.converged);
        assert_relative_eq!(solution.rate, 0.10, epsilon = 1e-6);
    }

    #[test]
    fn test_leading_zero_flow_shifts_nothing() {
        // The engine's streams always carry a year-0 zero entry; the root of
        // the shifted polynomial is the same rate
        let solution = solve_irr(&[0.0, -1000.0, 1100.0]);
        assert!(solution.converged);
        assert_relative_eq!(solution.rate, 0.10, epsilon = 1e-6);
    }

    #[test]
    fn test_multi_year_stream() {
        // -1000 then 400/yr for 3 years: IRR ~ 9.7%
        let solution = solve_irr(&[-1000.0, 400.0, 400.0, 400.0]);
        assert!(solution.converged);
        assert_relative_eq!(solution.rate, 0.0970, epsilon = 1e-3);
    }

    #[test]
    fn test_all_zero_stream_is_zero() {
        let solution = solve_irr(&[0.0, 0.0, 0.0]);
        assert!(solution.converged);
        assert_eq!(solution.rate, 0.0);
    }

    #[test]
    fn test_no_sign_change_never_panics() {
        // No root exists; the contract is best-effort, not failure
        let solution = solve_irr(&[100.0, 100.0, 100.0]);
        assert!(solution.rate.is_finite());
    }

    #[test]
    fn test_deterministic_across_calls() {
        let flows = [0.0, -37_000_000.0, -32_000_000.0, -9_500_000.0, 12_500_000.0, 150_000_000.0];
        let a = solve_irr(&flows);
        let b = solve_irr(&flows);
        assert_eq!(a, b);
    }

    #[test]
    fn test_npv_at_solution_is_zero() {
        let flows = [0.0, -500.0, -300.0, 200.0, 400.0, 600.0];
        let solution = solve_irr(&flows);
        assert!(solution.converged);
        let (npv, _) = npv_and_derivative(&flows, solution.rate);
        assert!(npv.abs() < 1e-4, "NPV at the solved rate was {}", npv);
    }
}
