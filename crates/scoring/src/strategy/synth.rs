//! Sample generation: synthetic perturbation of per-strategy base profiles
//! and uniform resampling of caller-supplied observations.

use rand::Rng;

use upp_core::MetricSample;

/// Baseline (response time, cost) pair a strategy's synthetic samples
/// jitter around.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseProfile {
    pub response_time_ms: f64,
    pub energy_cost: f64,
}

/// Full width of the uniform response-time jitter (±20 ms).
const RESPONSE_TIME_JITTER_MS: f64 = 40.0;
/// Full width of the uniform cost jitter (±0.05).
const ENERGY_COST_JITTER: f64 = 0.1;
/// Floors keeping both observations strictly positive.
const MIN_RESPONSE_TIME_MS: f64 = 10.0;
const MIN_ENERGY_COST: f64 = 0.01;

/// Base profile for a strategy name. Names outside the known set borrow
/// the hybrid profile.
pub fn base_profile(strategy: &str) -> BaseProfile {
    match strategy {
        "cache-first" => BaseProfile {
            response_time_ms: 50.0,
            energy_cost: 0.1,
        },
        "db-priority" => BaseProfile {
            response_time_ms: 120.0,
            energy_cost: 0.3,
        },
        "edge-compute" => BaseProfile {
            response_time_ms: 80.0,
            energy_cost: 0.2,
        },
        _ => BaseProfile {
            response_time_ms: 70.0,
            energy_cost: 0.15,
        },
    }
}

/// One synthetic sample from centered noise values in [-0.5, 0.5].
pub fn perturb(strategy: &str, base: BaseProfile, noise_rt: f64, noise_cost: f64) -> MetricSample {
    let response_time = base.response_time_ms + noise_rt * RESPONSE_TIME_JITTER_MS;
    let energy_cost = base.energy_cost + noise_cost * ENERGY_COST_JITTER;
    MetricSample::new(
        strategy,
        response_time.max(MIN_RESPONSE_TIME_MS),
        energy_cost.max(MIN_ENERGY_COST),
    )
}

/// Synthesize `iterations` samples around the strategy's base profile.
pub fn synthesize<R: Rng + ?Sized>(
    rng: &mut R,
    strategy: &str,
    iterations: usize,
) -> Vec<MetricSample> {
    let base = base_profile(strategy);
    (0..iterations)
        .map(|_| {
            perturb(
                strategy,
                base,
                rng.gen::<f64>() - 0.5,
                rng.gen::<f64>() - 0.5,
            )
        })
        .collect()
}

/// Draw `iterations` samples uniformly with replacement from observed data.
/// `data` must be non-empty.
pub fn resample<R: Rng + ?Sized>(
    rng: &mut R,
    data: &[MetricSample],
    iterations: usize,
) -> Vec<MetricSample> {
    debug_assert!(!data.is_empty());
    (0..iterations)
        .map(|_| data[rng.gen_range(0..data.len())].clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn zero_noise_reproduces_base_exactly() {
        let s = perturb("cache-first", base_profile("cache-first"), 0.0, 0.0);
        assert_eq!(s.response_time_ms, 50.0);
        assert_eq!(s.energy_cost, 0.1);

        let s = perturb("db-priority", base_profile("db-priority"), 0.0, 0.0);
        assert_eq!((s.response_time_ms, s.energy_cost), (120.0, 0.3));
    }

    #[test]
    fn unknown_strategy_borrows_hybrid_profile() {
        assert_eq!(base_profile("quantum-first"), base_profile("hybrid"));
    }

    #[test]
    fn floors_keep_observations_positive() {
        let base = BaseProfile {
            response_time_ms: 15.0,
            energy_cost: 0.02,
        };
        let s = perturb("hybrid", base, -0.5, -0.5);
        assert_eq!(s.response_time_ms, MIN_RESPONSE_TIME_MS);
        assert_eq!(s.energy_cost, MIN_ENERGY_COST);
    }

    #[test]
    fn synthesis_stays_within_jitter_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for s in synthesize(&mut rng, "edge-compute", 500) {
            assert!(s.response_time_ms >= 60.0 && s.response_time_ms <= 100.0);
            assert!(s.energy_cost >= 0.15 && s.energy_cost <= 0.25);
            assert_eq!(s.strategy, "edge-compute");
        }
    }

    #[test]
    fn synthesis_is_deterministic_under_a_fixed_seed() {
        let a = synthesize(&mut StdRng::seed_from_u64(42), "cache-first", 20);
        let b = synthesize(&mut StdRng::seed_from_u64(42), "cache-first", 20);
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.response_time_ms, y.response_time_ms);
            assert_eq!(x.energy_cost, y.energy_cost);
        }
    }

    #[test]
    fn resample_only_draws_supplied_samples() {
        let data = vec![
            MetricSample::new("hybrid", 65.0, 0.12),
            MetricSample::new("hybrid", 75.0, 0.18),
        ];
        let mut rng = StdRng::seed_from_u64(3);
        let drawn = resample(&mut rng, &data, 100);
        assert_eq!(drawn.len(), 100);
        for s in drawn {
            assert!(s.response_time_ms == 65.0 || s.response_time_ms == 75.0);
        }
    }
}
