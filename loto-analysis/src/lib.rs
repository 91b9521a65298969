pub mod aggregate;
pub mod config;
pub mod error;
pub mod feature;
pub mod normalize;
pub mod passes;
pub mod report;
pub mod sampler;
pub mod tally;

#[cfg(test)]
pub(crate) mod testing;

use loto_db::models::Draw;
use rand::Rng;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::aggregate::{accumulate, apply_random_bonus, rank};
use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use crate::normalize::normalize;
use crate::passes::PassKind;
use crate::report::{PassResult, SuggestionReport};
use crate::sampler::weighted_random_numbers;

/// Exécute les 14 analyses en parallèle. Les résultats (et la première
/// erreur éventuelle) suivent l'ordre de `PassKind::ALL`.
pub fn run_all_passes(draws: &[Draw], config: &AnalysisConfig) -> Result<Vec<PassResult>, AnalysisError> {
    PassKind::ALL
        .par_iter()
        .map(|&kind| {
            kind.run(draws, config).map(|features| {
                debug!(pass = kind.name(), features = features.len(), "analyse terminée");
                PassResult { kind, features }
            })
        })
        .collect::<Vec<_>>()
        .into_iter()
        .collect()
}

/// Calcule les analyses, le tirage pondéré et les numéros suggérés.
///
/// `draws` doit être en ordre chronologique. Le générateur aléatoire n'est
/// utilisé que par le tirage pondéré : à historique et graine identiques, le
/// rapport est identique.
pub fn compute_suggestions<R: Rng>(
    draws: &[Draw],
    config: &AnalysisConfig,
    rng: &mut R,
) -> Result<SuggestionReport, AnalysisError> {
    config.validate()?;
    let passes = run_all_passes(draws, config)?;

    let frequencies = passes
        .iter()
        .find(|p| p.kind == PassKind::Frequency)
        .map(|p| p.features.as_slice())
        .unwrap_or_default();

    let weighted = weighted_random_numbers(frequencies, config.suggestion_count, rng)?;

    let normalized: Vec<_> = passes
        .iter()
        .map(|p| (p.kind, normalize(&p.features)))
        .collect();
    let mut aggregation = accumulate(&normalized, config);
    apply_random_bonus(&mut aggregation.scores, &weighted, config.random_bonus);
    let suggested = rank(&aggregation.scores, frequencies, config.suggestion_count);

    info!(draws = draws.len(), suggested = ?suggested, "suggestion calculée");

    Ok(SuggestionReport {
        passes,
        weighted_random_numbers: weighted,
        suggested_numbers: suggested,
        diagnostics: aggregation.diagnostics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{draw, make_test_draws, scenario_draws};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_empty_history_fails() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = compute_suggestions(&[], &AnalysisConfig::default(), &mut rng).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::InsufficientData { pass: PassKind::Frequency, available: 0, .. }
        ));
    }

    #[test]
    fn test_single_draw_fails_on_gaps() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = compute_suggestions(&make_test_draws(1), &AnalysisConfig::default(), &mut rng).unwrap_err();
        assert!(matches!(err, AnalysisError::InsufficientData { pass: PassKind::Gaps, .. }));
    }

    #[test]
    fn test_scenario_returns_six_numbers() {
        let mut rng = StdRng::seed_from_u64(42);
        let report = compute_suggestions(&scenario_draws(), &AnalysisConfig::default(), &mut rng).unwrap();
        assert_eq!(report.passes.len(), 14);
        assert_eq!(report.weighted_random_numbers.len(), 6);
        assert_eq!(report.suggested_numbers.len(), 6);
        assert!(report.diagnostics.is_empty());
    }

    #[test]
    fn test_rich_history_returns_six_distinct() {
        for seed in [1u64, 7, 99] {
            let mut rng = StdRng::seed_from_u64(seed);
            let report = compute_suggestions(&make_test_draws(80), &AnalysisConfig::default(), &mut rng).unwrap();
            let mut numbers = report.suggested_numbers.clone();
            numbers.sort();
            numbers.dedup();
            assert_eq!(numbers.len(), 6, "seed {}", seed);
        }
    }

    #[test]
    fn test_same_seed_same_report() {
        let draws = make_test_draws(50);
        let config = AnalysisConfig::default();
        let a = compute_suggestions(&draws, &config, &mut StdRng::seed_from_u64(5)).unwrap();
        let b = compute_suggestions(&draws, &config, &mut StdRng::seed_from_u64(5)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_score_sum_is_deterministic() {
        let draws = make_test_draws(50);
        let config = AnalysisConfig::default();
        let normalized = |passes: Vec<PassResult>| -> Vec<_> {
            passes.iter().map(|p| (p.kind, normalize(&p.features))).collect()
        };
        let first = accumulate(&normalized(run_all_passes(&draws, &config).unwrap()), &config);
        let second = accumulate(&normalized(run_all_passes(&draws, &config).unwrap()), &config);
        let a: Vec<(u32, f64)> = first.scores.iter().collect();
        let b: Vec<(u32, f64)> = second.scores.iter().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let draws = make_test_draws(30);
        let config = AnalysisConfig::default();
        let parallel = run_all_passes(&draws, &config).unwrap();
        for (result, kind) in parallel.iter().zip(PassKind::ALL) {
            assert_eq!(result.kind, kind);
            assert_eq!(result.features, kind.run(&draws, &config).unwrap());
        }
    }

    #[test]
    fn test_too_few_distinct_numbers() {
        let draws = vec![draw(0, [1, 2, 3, 4, 5], 1), draw(1, [1, 2, 3, 4, 5], 2)];
        let mut rng = StdRng::seed_from_u64(3);
        let err = compute_suggestions(&draws, &AnalysisConfig::default(), &mut rng).unwrap_err();
        assert_eq!(err, AnalysisError::DegenerateSampling { available: 5, required: 6 });
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = AnalysisConfig {
            top_features: 0,
            ..AnalysisConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(3);
        assert!(matches!(
            compute_suggestions(&scenario_draws(), &config, &mut rng),
            Err(AnalysisError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_history_is_not_modified() {
        let draws = scenario_draws();
        let before = draws.clone();
        let mut rng = StdRng::seed_from_u64(11);
        compute_suggestions(&draws, &AnalysisConfig::default(), &mut rng).unwrap();
        assert_eq!(draws, before);
    }
}
