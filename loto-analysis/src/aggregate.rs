use std::cmp::Ordering;
use std::collections::HashMap;

use tracing::{debug, warn};

use crate::config::AnalysisConfig;
use crate::error::InvalidFeatureValue;
use crate::feature::{NormalizedFeature, ScoredFeature};
use crate::passes::PassKind;
use crate::tally::Tally;

/// Score pondéré cumulé par numéro, dans l'ordre de première contribution.
pub type ScoreMap = Tally<u32, f64>;

#[derive(Debug, Clone)]
pub struct Aggregation {
    pub scores: ScoreMap,
    pub diagnostics: Vec<InvalidFeatureValue>,
}

/// Somme pondérée des `top_features` premières clés de chaque analyse.
///
/// Seules les clés numériques contribuent, sauf si `decompose_composite` est
/// activé : une paire ou un triplet répartit alors sa contribution à parts
/// égales sur ses numéros. Les répartitions de parité ne contribuent jamais.
pub fn accumulate(normalized: &[(PassKind, Vec<NormalizedFeature>)], config: &AnalysisConfig) -> Aggregation {
    let mut scores = ScoreMap::new();
    let mut diagnostics = Vec::new();

    for (pass, features) in normalized {
        let weight = pass.weight();
        for nf in features.iter().take(config.top_features) {
            if !nf.value.is_finite() {
                let invalid = InvalidFeatureValue {
                    pass: *pass,
                    feature: nf.feature,
                    value: nf.value,
                };
                warn!("{invalid}");
                diagnostics.push(invalid);
                continue;
            }

            if let Some(n) = nf.feature.as_number() {
                scores.add(n, nf.value * weight);
                continue;
            }

            match nf.feature.constituents() {
                Some(numbers) if config.decompose_composite => {
                    let share = nf.value * weight / numbers.len() as f64;
                    for n in numbers {
                        scores.add(n, share);
                    }
                }
                _ => debug!(pass = pass.name(), feature = %nf.feature, "clé non numérique ignorée"),
            }
        }
    }

    Aggregation { scores, diagnostics }
}

pub fn apply_random_bonus(scores: &mut ScoreMap, numbers: &[u32], bonus: f64) {
    for &n in numbers {
        scores.add(n, bonus);
    }
}

/// Les `count` meilleurs numéros. À score égal, la fréquence brute la plus
/// haute passe devant ; sinon l'ordre de première contribution est conservé.
pub fn rank(scores: &ScoreMap, frequencies: &[ScoredFeature], count: usize) -> Vec<u32> {
    let raw_frequency: HashMap<u32, u32> = frequencies
        .iter()
        .filter_map(|f| f.feature.as_number().map(|n| (n, f.score)))
        .collect();
    let frequency_of = |n: u32| raw_frequency.get(&n).copied().unwrap_or(0);

    let mut entries: Vec<(u32, f64)> = scores.iter().collect();
    entries.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| frequency_of(b.0).cmp(&frequency_of(a.0)))
    });

    entries.into_iter().take(count).map(|(n, _)| n).collect()
}
