//! Realization / distribution pacing schedules
//!
//! Produces a normalized weight vector over the full fund term. The ten-year
//! j-curve table is fixed for output compatibility with the published
//! calculator; other terms use the generic ramp and are not required to agree
//! with the table at the boundary.

use crate::params::RealizationPacing;

/// Fixed j-curve weights for the canonical ten-year term
const J_CURVE_10YR: [f64; 10] = [0.0, 0.0, 0.05, 0.05, 0.15, 0.20, 0.15, 0.15, 0.13, 0.12];

/// Generate per-year realization weights for the fund term.
///
/// `investment_period_years` anchors the back-loaded shape, which realizes
/// nothing until deployment is finished. Weights are non-negative and sum to
/// 1.0; custom vectors are returned verbatim and validated at the `simulate`
/// boundary.
pub fn realization_schedule(
    pacing: &RealizationPacing,
    total_term_years: u32,
    investment_period_years: u32,
) -> Vec<f64> {
    let term = total_term_years as usize;
    match pacing {
        RealizationPacing::Linear => vec![1.0 / term as f64; term],
        RealizationPacing::JCurve => {
            if term == J_CURVE_10YR.len() {
                J_CURVE_10YR.to_vec()
            } else {
                j_curve_ramp(total_term_years)
            }
        }
        RealizationPacing::BackLoaded => back_loaded(total_term_years, investment_period_years),
        RealizationPacing::Custom(weights) => weights.clone(),
    }
}

/// Piecewise ramp for non-canonical terms: zero before the start year, rising
/// linearly to a peak near 0.6 x term, then falling to the final year
fn j_curve_ramp(total_term_years: u32) -> Vec<f64> {
    let term = total_term_years as f64;
    let start = (total_term_years / 3).min(3).max(1) as f64;
    let peak = 0.6 * term;

    let mut weights: Vec<f64> = (1..=total_term_years)
        .map(|year| {
            let y = year as f64;
            if y < start {
                0.0
            } else if y <= peak {
                y - start + 1.0
            } else {
                // Scaled so the down-ramp meets the up-ramp at the peak
                (peak - start + 1.0) * (term - y + 1.0) / (term - peak + 1.0)
            }
        })
        .collect();
    normalize(&mut weights);
    weights
}

/// Zero weight through the deployment horizon, then linearly increasing
fn back_loaded(total_term_years: u32, investment_period_years: u32) -> Vec<f64> {
    // Degenerate horizon: no years remain after deployment, so everything
    // realizes in the final year
    if total_term_years <= investment_period_years {
        let mut weights = vec![0.0; total_term_years as usize];
        if let Some(last) = weights.last_mut() {
            *last = 1.0;
        }
        return weights;
    }

    let mut weights: Vec<f64> = (1..=total_term_years)
        .map(|year| {
            if year <= investment_period_years {
                0.0
            } else {
                (year - investment_period_years) as f64
            }
        })
        .collect();
    normalize(&mut weights);
    weights
}

fn normalize(weights: &mut [f64]) {
    let sum: f64 = weights.iter().sum();
    if sum > 0.0 {
        for w in weights.iter_mut() {
            *w /= sum;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linear_is_uniform() {
        let weights = realization_schedule(&RealizationPacing::Linear, 8, 4);
        assert_eq!(weights, vec![0.125; 8]);
    }

    #[test]
    fn test_j_curve_ten_year_table_is_exact() {
        let weights = realization_schedule(&RealizationPacing::JCurve, 10, 5);
        assert_eq!(
            weights,
            vec![0.0, 0.0, 0.05, 0.05, 0.15, 0.20, 0.15, 0.15, 0.13, 0.12]
        );
    }

    #[test]
    fn test_j_curve_other_terms_start_flat_and_sum_to_one() {
        let weights = realization_schedule(&RealizationPacing::JCurve, 12, 5);
        assert_eq!(weights.len(), 12);
        // Start year is min(3, 12/3) = 3, so years 1-2 carry nothing
        assert_eq!(weights[0], 0.0);
        assert_eq!(weights[1], 0.0);
        assert!(weights[2] > 0.0);
        assert_relative_eq!(weights.iter().sum::<f64>(), 1.0, epsilon = 1e-9);

        // Peak lands near 0.6 x term
        let peak_idx = weights
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
            .map(|(i, _)| i)
            .unwrap();
        assert!((6..=8).contains(&peak_idx));
    }

    #[test]
    fn test_j_curve_short_terms_stay_valid() {
        for term in 1..=9 {
            let weights = realization_schedule(&RealizationPacing::JCurve, term, 1);
            assert!(weights.iter().all(|w| *w >= 0.0));
            assert_relative_eq!(weights.iter().sum::<f64>(), 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_back_loaded_waits_for_deployment_to_finish() {
        let weights = realization_schedule(&RealizationPacing::BackLoaded, 10, 4);
        assert!(weights[..4].iter().all(|w| *w == 0.0));
        for pair in weights[4..].windows(2) {
            assert!(pair[0] < pair[1], "post-deployment weights must increase");
        }
        assert_relative_eq!(weights.iter().sum::<f64>(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_back_loaded_degenerate_horizon_uses_final_year() {
        let weights = realization_schedule(&RealizationPacing::BackLoaded, 6, 6);
        assert_eq!(weights[..5], [0.0; 5]);
        assert_eq!(weights[5], 1.0);
    }

    #[test]
    fn test_custom_passes_through_verbatim() {
        let custom = vec![0.1, 0.2, 0.3, 0.4];
        let weights = realization_schedule(&RealizationPacing::Custom(custom.clone()), 4, 2);
        assert_eq!(weights, custom);
    }
}
