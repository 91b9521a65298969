use crate::feature::{NormalizedFeature, ScoredFeature};

/// Mise à l'échelle min-max dans [0, 1], en conservant l'ordre d'entrée.
///
/// Sans variance (tous les scores égaux) chaque valeur vaut 0 : l'analyse ne
/// distingue alors aucun numéro.
pub fn normalize(features: &[ScoredFeature]) -> Vec<NormalizedFeature> {
    let min = features.iter().map(|f| f.score).min().unwrap_or(0);
    let max = features.iter().map(|f| f.score).max().unwrap_or(0);
    let range = (max - min) as f64;

    features
        .iter()
        .map(|f| NormalizedFeature {
            feature: f.feature,
            value: if max == min { 0.0 } else { (f.score - min) as f64 / range },
        })
        .collect()
}
