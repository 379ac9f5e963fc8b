//! Repeated-draw strategy comparison: per-strategy batches, descriptive
//! statistics, two reward/risk ratios, and a ranked recommendation.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use upp_core::config::ScoreWeights;
use upp_core::{MetricSample, Strategy, UppError};

use super::stats::{mean, std_dev};
use super::synth;

/// Inverse-latency reward scale: reward = REWARD_SCALE / response time.
const REWARD_SCALE: f64 = 1000.0;

/// Default draws per strategy.
pub const DEFAULT_ITERATIONS: usize = 1000;

/// Aggregate scores for one strategy over a batch of samples.
///
/// Serialized camelCase to match the evaluator wire format.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyResult {
    pub strategy: String,
    pub avg_response_time: f64,
    pub avg_energy_cost: f64,
    pub std_dev_response_time: f64,
    pub std_dev_energy_cost: f64,
    pub sharpe_ratio_reward: f64,
    pub sharpe_ratio_latency: f64,
    pub combined_score: f64,
}

/// Ranked outcome across all evaluated strategies.
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    pub recommendation: String,
    pub results: Vec<StrategyResult>,
}

impl Evaluation {
    /// The result backing the recommendation.
    pub fn best(&self) -> Option<&StrategyResult> {
        self.results
            .iter()
            .find(|r| r.strategy == self.recommendation)
    }
}

/// Score one strategy's batch. A zero standard deviation resolves each
/// dependent ratio to 0 instead of propagating a division by zero.
pub fn score_batch(strategy: &str, samples: &[MetricSample], weights: &ScoreWeights) -> StrategyResult {
    let response_times: Vec<f64> = samples.iter().map(|s| s.response_time_ms).collect();
    let energy_costs: Vec<f64> = samples.iter().map(|s| s.energy_cost).collect();
    let rewards: Vec<f64> = response_times.iter().map(|rt| REWARD_SCALE / rt).collect();

    let avg_response_time = mean(&response_times);
    let avg_energy_cost = mean(&energy_costs);
    let std_dev_response_time = std_dev(&response_times);
    let std_dev_energy_cost = std_dev(&energy_costs);
    let avg_reward = mean(&rewards);
    let std_dev_reward = std_dev(&rewards);

    let sharpe_ratio_reward = if std_dev_reward == 0.0 {
        0.0
    } else {
        avg_reward / std_dev_reward
    };
    let sharpe_ratio_latency = if std_dev_response_time == 0.0 {
        0.0
    } else {
        avg_reward / std_dev_response_time
    };

    let sustainability_factor = weights.sustainability / avg_energy_cost;
    let combined_score = (weights.reward * sharpe_ratio_reward
        + weights.latency * sharpe_ratio_latency)
        * sustainability_factor;

    StrategyResult {
        strategy: strategy.to_string(),
        avg_response_time,
        avg_energy_cost,
        std_dev_response_time,
        std_dev_energy_cost,
        sharpe_ratio_reward,
        sharpe_ratio_latency,
        combined_score,
    }
}

/// First maximum wins: a later strategy must strictly beat the incumbent.
fn pick_best(results: &[StrategyResult]) -> &StrategyResult {
    let mut best = &results[0];
    for r in &results[1..] {
        if r.combined_score > best.combined_score {
            best = r;
        }
    }
    best
}

/// Evaluate the given strategies over `iterations` draws each.
///
/// Strategies with caller-supplied samples resample those observations;
/// the rest run on synthetic data. All batches execute sequentially and
/// independently — nothing is shared between strategies.
pub fn evaluate<R: Rng + ?Sized>(
    rng: &mut R,
    strategies: &[Strategy],
    real_data: Option<&[MetricSample]>,
    iterations: usize,
    weights: &ScoreWeights,
) -> Result<Evaluation, UppError> {
    if strategies.is_empty() {
        return Err(UppError::Evaluation("no strategies to evaluate".into()));
    }
    if iterations == 0 {
        return Err(UppError::InvalidInput("iterations must be positive".into()));
    }

    info!("Running {} iterations per strategy", iterations);

    let mut results = Vec::with_capacity(strategies.len());
    for &strategy in strategies {
        let name = strategy.as_str();
        let observed: Vec<MetricSample> = real_data
            .unwrap_or(&[])
            .iter()
            .filter(|s| s.strategy == name && s.is_valid())
            .cloned()
            .collect();

        let samples = if observed.is_empty() {
            debug!("{}: synthesizing {} samples", name, iterations);
            synth::synthesize(rng, name, iterations)
        } else {
            debug!("{}: resampling {} observed data points", name, observed.len());
            synth::resample(rng, &observed, iterations)
        };

        let result = score_batch(name, &samples, weights);
        info!(
            "{}: avg_rt={:.2}ms avg_cost={:.4} sharpe_reward={:.4} sharpe_latency={:.4} combined={:.4}",
            name,
            result.avg_response_time,
            result.avg_energy_cost,
            result.sharpe_ratio_reward,
            result.sharpe_ratio_latency,
            result.combined_score,
        );
        results.push(result);
    }

    let best = pick_best(&results);
    info!(
        "Recommendation: {} (combined score {:.4})",
        best.strategy, best.combined_score
    );

    Ok(Evaluation {
        recommendation: best.strategy.clone(),
        results,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn result_with_score(strategy: &str, combined_score: f64) -> StrategyResult {
        StrategyResult {
            strategy: strategy.to_string(),
            avg_response_time: 0.0,
            avg_energy_cost: 0.0,
            std_dev_response_time: 0.0,
            std_dev_energy_cost: 0.0,
            sharpe_ratio_reward: 0.0,
            sharpe_ratio_latency: 0.0,
            combined_score,
        }
    }

    #[test]
    fn constant_batch_scores_zero() {
        let samples = vec![MetricSample::new("cache-first", 50.0, 0.1); 10];
        let r = score_batch("cache-first", &samples, &ScoreWeights::default());
        assert_eq!(r.std_dev_response_time, 0.0);
        assert_eq!(r.sharpe_ratio_reward, 0.0);
        assert_eq!(r.sharpe_ratio_latency, 0.0);
        assert_eq!(r.combined_score, 0.0);
        assert_eq!(r.avg_response_time, 50.0);
        assert_eq!(r.avg_energy_cost, 0.1);
    }

    #[test]
    fn lower_cost_scores_higher_all_else_equal() {
        let cheap: Vec<MetricSample> = [50.0, 100.0]
            .iter()
            .map(|&rt| MetricSample::new("a", rt, 0.1))
            .collect();
        let dear: Vec<MetricSample> = [50.0, 100.0]
            .iter()
            .map(|&rt| MetricSample::new("b", rt, 0.2))
            .collect();
        let w = ScoreWeights::default();
        let a = score_batch("a", &cheap, &w);
        let b = score_batch("b", &dear, &w);
        assert!(a.combined_score > b.combined_score);
        assert!((a.combined_score - 2.0 * b.combined_score).abs() < 1e-9);
    }

    #[test]
    fn weights_scale_the_ratio_terms() {
        let samples: Vec<MetricSample> = [50.0, 100.0]
            .iter()
            .map(|&rt| MetricSample::new("a", rt, 0.1))
            .collect();
        let unweighted = score_batch("a", &samples, &ScoreWeights::default());
        let reward_only = score_batch(
            "a",
            &samples,
            &ScoreWeights {
                reward: 1.0,
                latency: 0.0,
                sustainability: 1.0,
            },
        );
        let latency_only = score_batch(
            "a",
            &samples,
            &ScoreWeights {
                reward: 0.0,
                latency: 1.0,
                sustainability: 1.0,
            },
        );
        assert!(
            (reward_only.combined_score + latency_only.combined_score
                - unweighted.combined_score)
                .abs()
                < 1e-9
        );
    }

    #[test]
    fn pick_best_keeps_first_of_tied_maxima() {
        let results = vec![
            result_with_score("cache-first", 1.2),
            result_with_score("db-priority", 3.4),
            result_with_score("edge-compute", 3.4),
        ];
        assert_eq!(pick_best(&results).strategy, "db-priority");
    }

    #[test]
    fn all_tied_results_recommend_the_first_strategy() {
        // One constant sample per strategy: every combined score is 0.
        let data: Vec<MetricSample> = Strategy::ALL
            .iter()
            .map(|s| MetricSample::new(s.as_str(), 60.0, 0.2))
            .collect();
        let mut rng = StdRng::seed_from_u64(1);
        let eval = evaluate(
            &mut rng,
            &Strategy::ALL,
            Some(&data),
            100,
            &ScoreWeights::default(),
        )
        .unwrap();
        for r in &eval.results {
            assert_eq!(r.combined_score, 0.0);
        }
        assert_eq!(eval.recommendation, "cache-first");
    }

    #[test]
    fn partial_real_data_leaves_other_strategies_synthetic() {
        let data = vec![
            MetricSample::new("cache-first", 42.0, 0.09),
            MetricSample::new("cache-first", 58.0, 0.11),
        ];
        let mut rng = StdRng::seed_from_u64(9);
        let eval = evaluate(
            &mut rng,
            &Strategy::ALL,
            Some(&data),
            200,
            &ScoreWeights::default(),
        )
        .unwrap();

        assert_eq!(eval.results.len(), 4);
        let cache = &eval.results[0];
        assert_eq!(cache.strategy, "cache-first");
        // Resampled batches only ever contain the two observed values.
        assert!(cache.avg_response_time >= 42.0 && cache.avg_response_time <= 58.0);
        for r in &eval.results {
            assert!(r.combined_score.is_finite());
            assert!(r.avg_response_time > 0.0);
            assert!(r.avg_energy_cost > 0.0);
        }
        assert!(eval.best().is_some());
    }

    #[test]
    fn invalid_observations_are_ignored() {
        // Only the single valid sample should survive filtering, making the
        // batch constant and its score exactly 0.
        let data = vec![
            MetricSample::new("hybrid", -5.0, 0.1),
            MetricSample::new("hybrid", 70.0, f64::NAN),
            MetricSample::new("hybrid", 70.0, 0.15),
        ];
        let mut rng = StdRng::seed_from_u64(4);
        let eval = evaluate(
            &mut rng,
            &[Strategy::Hybrid],
            Some(&data),
            50,
            &ScoreWeights::default(),
        )
        .unwrap();
        assert_eq!(eval.results[0].avg_response_time, 70.0);
        assert_eq!(eval.results[0].combined_score, 0.0);
    }

    #[test]
    fn zero_iterations_is_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        let err = evaluate(&mut rng, &Strategy::ALL, None, 0, &ScoreWeights::default());
        assert!(matches!(err, Err(UppError::InvalidInput(_))));
    }

    #[test]
    fn seeded_synthetic_run_is_reproducible() {
        let w = ScoreWeights::default();
        let a = evaluate(&mut StdRng::seed_from_u64(11), &Strategy::ALL, None, 300, &w).unwrap();
        let b = evaluate(&mut StdRng::seed_from_u64(11), &Strategy::ALL, None, 300, &w).unwrap();
        assert_eq!(a.recommendation, b.recommendation);
        for (x, y) in a.results.iter().zip(&b.results) {
            assert_eq!(x.combined_score, y.combined_score);
        }
    }

    #[test]
    fn result_wire_names_are_camel_case() {
        let r = result_with_score("hybrid", 1.0);
        let json = serde_json::to_value(&r).unwrap();
        assert!(json.get("avgResponseTime").is_some());
        assert!(json.get("stdDevEnergyCost").is_some());
        assert!(json.get("sharpeRatioReward").is_some());
        assert!(json.get("combinedScore").is_some());
    }
}
