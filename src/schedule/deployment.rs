//! Capital deployment pacing schedules
//!
//! Produces a normalized weight vector over the investment period. The
//! five-year front-loaded table is fixed for output compatibility with the
//! published calculator; other horizon lengths use the triangular formulas
//! and are not required to agree with the table at the boundary.

use crate::params::DeploymentPacing;

/// Fixed front-loaded weights for the canonical five-year investment period
const FRONT_LOADED_5YR: [f64; 5] = [0.35, 0.30, 0.20, 0.10, 0.05];

/// Generate per-year deployment weights for the investment period.
///
/// Weights are non-negative and sum to 1.0. Custom vectors are returned
/// verbatim; they are validated at the `simulate` boundary.
pub fn deployment_schedule(pacing: &DeploymentPacing, horizon_years: u32) -> Vec<f64> {
    let n = horizon_years as usize;
    match pacing {
        DeploymentPacing::Linear => vec![1.0 / n as f64; n],
        DeploymentPacing::FrontLoaded => {
            if n == FRONT_LOADED_5YR.len() {
                FRONT_LOADED_5YR.to_vec()
            } else {
                triangular_decreasing(n)
            }
        }
        DeploymentPacing::BackLoaded => triangular_increasing(n),
        DeploymentPacing::Custom(weights) => weights.clone(),
    }
}

/// Weights proportional to (n - i) for 0-based year index i
fn triangular_decreasing(n: usize) -> Vec<f64> {
    let total = (n * (n + 1) / 2) as f64;
    (0..n).map(|i| (n - i) as f64 / total).collect()
}

/// Mirror of the front-loaded decay
fn triangular_increasing(n: usize) -> Vec<f64> {
    let total = (n * (n + 1) / 2) as f64;
    (0..n).map(|i| (i + 1) as f64 / total).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linear_is_uniform() {
        let weights = deployment_schedule(&DeploymentPacing::Linear, 4);
        assert_eq!(weights, vec![0.25; 4]);
    }

    #[test]
    fn test_front_loaded_five_year_table_is_exact() {
        let weights = deployment_schedule(&DeploymentPacing::FrontLoaded, 5);
        assert_eq!(weights, vec![0.35, 0.30, 0.20, 0.10, 0.05]);
    }

    #[test]
    fn test_front_loaded_other_horizons_decay() {
        let weights = deployment_schedule(&DeploymentPacing::FrontLoaded, 7);
        for pair in weights.windows(2) {
            assert!(pair[0] > pair[1], "weights must strictly decrease");
        }
        assert_relative_eq!(weights.iter().sum::<f64>(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_back_loaded_mirrors_front_loaded() {
        let front = triangular_decreasing(6);
        let back = deployment_schedule(&DeploymentPacing::BackLoaded, 6);
        let mirrored: Vec<f64> = front.iter().rev().copied().collect();
        for (b, m) in back.iter().zip(&mirrored) {
            assert_relative_eq!(*b, *m, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_custom_passes_through_verbatim() {
        let custom = vec![0.5, 0.25, 0.25];
        let weights = deployment_schedule(&DeploymentPacing::Custom(custom.clone()), 3);
        assert_eq!(weights, custom);
    }

    #[test]
    fn test_all_policies_sum_to_one_across_horizons() {
        for n in 1..=30 {
            for pacing in [
                DeploymentPacing::Linear,
                DeploymentPacing::FrontLoaded,
                DeploymentPacing::BackLoaded,
            ] {
                let weights = deployment_schedule(&pacing, n);
                assert_eq!(weights.len(), n as usize);
                assert!(weights.iter().all(|w| *w >= 0.0));
                assert_relative_eq!(weights.iter().sum::<f64>(), 1.0, epsilon = 1e-9);
            }
        }
    }
}
