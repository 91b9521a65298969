use rand::Rng;

use crate::error::AnalysisError;
use crate::feature::ScoredFeature;

/// Tirage pondéré sans remise de `count` numéros distincts.
///
/// Le poids d'un numéro est sa fréquence divisée par la masse totale. La
/// distribution cumulée est parcourue dans l'ordre de `frequencies` (fréquence
/// décroissante) ; un numéro déjà retenu provoque un nouveau tirage.
pub fn weighted_random_numbers<R: Rng>(
    frequencies: &[ScoredFeature],
    count: usize,
    rng: &mut R,
) -> Result<Vec<u32>, AnalysisError> {
    let weighted: Vec<(u32, u32)> = frequencies
        .iter()
        .filter(|f| f.score > 0)
        .filter_map(|f| f.feature.as_number().map(|n| (n, f.score)))
        .collect();

    if weighted.len() < count {
        return Err(AnalysisError::DegenerateSampling {
            available: weighted.len(),
            required: count,
        });
    }

    let total: f64 = weighted.iter().map(|&(_, w)| w as f64).sum();
    let probabilities: Vec<(u32, f64)> = weighted
        .iter()
        .map(|&(n, w)| (n, w as f64 / total))
        .collect();

    let mut selected: Vec<u32> = Vec::with_capacity(count);
    while selected.len() < count {
        let random: f64 = rng.random();
        let mut cumulative = 0.0;
        for &(n, p) in &probabilities {
            cumulative += p;
            if random < cumulative {
                if !selected.contains(&n) {
                    selected.push(n);
                }
                break;
            }
        }
    }

    Ok(selected)
}
