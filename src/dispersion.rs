//! Monte Carlo landing dispersion.
//!
//! Launch velocity and angle are drawn from normal distributions around the
//! nominal launch; each draw is solved independently on the rayon pool and the
//! landing data is reduced to summary statistics.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::analytic::solve_no_drag;
use crate::drag_integrator::solve_with_drag;
use crate::error::{BallisticsError, Result};
use crate::launch::LaunchParameters;
use crate::projectile::Projectile;
use crate::trajectory::Trajectory;

/// Spread applied to the nominal launch
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispersionParams {
    pub num_simulations: usize,
    pub velocity_std_dev: f64,      // m/s
    pub angle_std_dev_degrees: f64, // degrees
    pub seed: Option<u64>,          // fixed seed for reproducible runs
}

impl Default for DispersionParams {
    fn default() -> Self {
        Self {
            num_simulations: 1000,
            velocity_std_dev: 0.5,
            angle_std_dev_degrees: 0.5,
            seed: None,
        }
    }
}

/// Summary of one landing quantity across all successful runs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldStatistics {
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub percentiles: Vec<(f64, f64)>, // (percentile, value) pairs
}

/// Results from a dispersion run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DispersionResults {
    pub distance: FieldStatistics,
    pub air_time: FieldStatistics,
    pub impact_angle: FieldStatistics,
    pub valid_runs: usize,
    pub failed_runs: usize,
}

/// Dispersion of drag-free landings around `base`
pub fn run_dispersion_no_drag(
    base: &LaunchParameters,
    params: &DispersionParams,
) -> Result<DispersionResults> {
    let height = base.initial_height;
    let samples = base.sample_count;
    run(base, params, |velocity, angle| {
        solve_no_drag(velocity, angle, height, samples)
    })
}

/// Dispersion of drag-aware landings around `base`
pub fn run_dispersion_with_drag<P>(
    projectile: &P,
    base: &LaunchParameters,
    params: &DispersionParams,
) -> Result<DispersionResults>
where
    P: Projectile + Sync + ?Sized,
{
    projectile.validate()?;
    let height = base.initial_height;
    run(base, params, |velocity, angle| {
        solve_with_drag(projectile, velocity, angle, height)
    })
}

fn run<F>(base: &LaunchParameters, params: &DispersionParams, solve: F) -> Result<DispersionResults>
where
    F: Fn(f64, f64) -> Result<Trajectory> + Sync,
{
    if params.num_simulations == 0 {
        return Err(BallisticsError::invalid("num_simulations", "must be > 0"));
    }

    let velocity_dist = Normal::new(base.velocity, params.velocity_std_dev)
        .map_err(|e| BallisticsError::Distribution(format!("velocity: {e}")))?;
    let angle_dist = Normal::new(base.angle_degrees, params.angle_std_dev_degrees)
        .map_err(|e| BallisticsError::Distribution(format!("angle: {e}")))?;

    let mut rng = match params.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    // Draw sequentially so a seed fixes the whole run regardless of thread count
    let draws: Vec<(f64, f64)> = (0..params.num_simulations)
        .map(|_| (velocity_dist.sample(&mut rng), angle_dist.sample(&mut rng)))
        .collect();

    let outcomes: Vec<Option<(f64, f64, f64)>> = draws
        .par_iter()
        .map(|&(velocity, angle)| match solve(velocity, angle) {
            Ok(t) => Some((t.distance(), t.air_time(), t.impact_angle_degrees())),
            Err(e) => {
                debug!(velocity, angle, error = %e, "dispersion run rejected");
                None
            }
        })
        .collect();

    let landed: Vec<(f64, f64, f64)> = outcomes.into_iter().flatten().collect();
    let valid_runs = landed.len();
    let failed_runs = params.num_simulations - valid_runs;
    if valid_runs == 0 {
        return Err(BallisticsError::NoValidRuns {
            attempted: params.num_simulations,
        });
    }

    let distances: Vec<f64> = landed.iter().map(|r| r.0).collect();
    let air_times: Vec<f64> = landed.iter().map(|r| r.1).collect();
    let impact_angles: Vec<f64> = landed.iter().map(|r| r.2).collect();

    info!(valid_runs, failed_runs, "dispersion run finished");

    Ok(DispersionResults {
        distance: field_statistics(distances),
        air_time: field_statistics(air_times),
        impact_angle: field_statistics(impact_angles),
        valid_runs,
        failed_runs,
    })
}

fn field_statistics(mut values: Vec<f64>) -> FieldStatistics {
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = if values.len() > 1 {
        values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0)
    } else {
        0.0
    };

    let percentiles = [0.05, 0.25, 0.50, 0.75, 0.95]
        .iter()
        .map(|&p| (p, percentile(&values, p)))
        .collect();

    FieldStatistics {
        mean,
        std: variance.sqrt(),
        min: values.first().copied().unwrap_or(0.0),
        max: values.last().copied().unwrap_or(0.0),
        percentiles,
    }
}

/// Percentile of sorted values with linear interpolation
fn percentile(sorted_values: &[f64], p: f64) -> f64 {
    if sorted_values.is_empty() {
        return 0.0;
    }

    let n = sorted_values.len();
    if n == 1 {
        return sorted_values[0];
    }

    let index = p * (n - 1) as f64;
    let lower = index.floor() as usize;
    let upper = index.ceil() as usize;

    if lower == upper {
        sorted_values[lower]
    } else {
        let weight = index - lower as f64;
        sorted_values[lower] * (1.0 - weight) + sorted_values[upper] * weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projectile::Cannonball;

    fn seeded(num_simulations: usize) -> DispersionParams {
        DispersionParams {
            num_simulations,
            velocity_std_dev: 0.5,
            angle_std_dev_degrees: 1.0,
            seed: Some(42),
        }
    }

    #[test]
    fn test_percentile() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(percentile(&values, 0.0), 1.0);
        assert_eq!(percentile(&values, 0.5), 3.0);
        assert_eq!(percentile(&values, 1.0), 5.0);
        assert!((percentile(&values, 0.1) - 1.4).abs() < 1e-12);
        assert_eq!(percentile(&[7.0], 0.9), 7.0);
    }

    #[test]
    fn test_field_statistics() {
        let stats = field_statistics(vec![4.0, 2.0, 6.0]);
        assert_eq!(stats.mean, 4.0);
        assert_eq!(stats.std, 2.0);
        assert_eq!(stats.min, 2.0);
        assert_eq!(stats.max, 6.0);
        assert_eq!(stats.percentiles[2], (0.50, 4.0));
    }

    #[test]
    fn test_zero_spread_reproduces_nominal_launch() {
        let base = LaunchParameters::new(10.0, 45.0, 0.0, 20);
        let params = DispersionParams {
            num_simulations: 16,
            velocity_std_dev: 0.0,
            angle_std_dev_degrees: 0.0,
            seed: Some(1),
        };
        let results = run_dispersion_no_drag(&base, &params).unwrap();
        assert_eq!(results.valid_runs, 16);
        assert_eq!(results.failed_runs, 0);
        assert!((results.distance.mean - 10.1937).abs() < 1e-9);
        assert!(results.distance.std < 1e-12);
    }

    #[test]
    fn test_seed_makes_runs_reproducible() {
        let base = LaunchParameters::new(20.0, 40.0, 1.0, 20);
        let first = run_dispersion_no_drag(&base, &seeded(200)).unwrap();
        let second = run_dispersion_no_drag(&base, &seeded(200)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_drag_dispersion_centers_on_nominal() {
        let base = LaunchParameters::new(10.0, 45.0, 10.0, 20);
        let nominal = solve_with_drag(&Cannonball, 10.0, 45.0, 10.0).unwrap();
        let results = run_dispersion_with_drag(&Cannonball, &base, &seeded(200)).unwrap();

        assert_eq!(results.valid_runs, 200);
        assert!((results.distance.mean - nominal.distance()).abs() < 0.5);
        assert!(results.distance.std > 0.0);
        assert!(results.distance.min <= results.distance.percentiles[0].1);
        assert!(results.distance.max >= results.distance.percentiles[4].1);
    }

    #[test]
    fn test_out_of_range_draws_are_counted_as_failures() {
        // Nominal angle sits on the edge of the drag solver's open interval
        let base = LaunchParameters::new(10.0, 89.5, 0.0, 20);
        let params = DispersionParams {
            num_simulations: 100,
            velocity_std_dev: 0.0,
            angle_std_dev_degrees: 2.0,
            seed: Some(7),
        };
        let results = run_dispersion_with_drag(&Cannonball, &base, &params).unwrap();
        assert!(results.failed_runs > 0);
        assert_eq!(results.valid_runs + results.failed_runs, 100);
    }

    #[test]
    fn test_rejects_bad_params() {
        let base = LaunchParameters::default();
        let mut params = seeded(0);
        assert!(run_dispersion_no_drag(&base, &params).unwrap_err().is_invalid_input());

        params.num_simulations = 10;
        params.velocity_std_dev = -1.0;
        assert!(matches!(
            run_dispersion_no_drag(&base, &params),
            Err(BallisticsError::Distribution(_))
        ));
    }
}
