//! Analyses qui dépendent de la position des tirages dans l'historique.
//!
//! L'historique est supposé chronologique : `draws[0]` est le plus ancien,
//! `draws[len - 1]` le plus récent.

use std::collections::HashMap;

use loto_db::models::Draw;

use super::{PassKind, ranked, require, require_positive};
use crate::error::AnalysisError;
use crate::feature::{Feature, ScoredFeature};
use crate::tally::Tally;

/// Écart (en nombre de tirages) entre les deux dernières apparitions de
/// chaque numéro. Un numéro vu une seule fois n'a pas d'entrée, et un numéro
/// répété dans le même tirage (chance = principal) ne compte qu'une fois.
pub fn gaps(draws: &[Draw]) -> Result<Vec<ScoredFeature>, AnalysisError> {
    require(PassKind::Gaps, draws)?;
    let mut last_seen: HashMap<u8, usize> = HashMap::new();
    let mut gaps = Tally::new();

    for (index, draw) in draws.iter().enumerate() {
        for n in draw.combined_numbers() {
            if let Some(&previous) = last_seen.get(&n).filter(|&&p| p < index) {
                gaps.set(Feature::Number(n as u32), (index - previous) as u32);
            }
            last_seen.insert(n, index);
        }
    }

    Ok(ranked(gaps))
}

/// Nombre de tirages depuis la dernière apparition de chaque numéro.
pub fn delays(draws: &[Draw]) -> Result<Vec<ScoredFeature>, AnalysisError> {
    require(PassKind::Delays, draws)?;
    let mut last_seen: Tally<u8> = Tally::new();
    for (index, draw) in draws.iter().enumerate() {
        for n in draw.combined_numbers() {
            last_seen.set(n, index as u32);
        }
    }

    let current = (draws.len() - 1) as u32;
    let mut delays = Tally::new();
    for (n, index) in last_seen.iter() {
        delays.set(Feature::Number(n as u32), current - index);
    }
    Ok(ranked(delays))
}

/// Transitions tirage `i-1` → tirage `i` cumulées sur tout l'historique, lues
/// depuis les numéros du dernier tirage.
pub fn markov(draws: &[Draw]) -> Result<Vec<ScoredFeature>, AnalysisError> {
    require(PassKind::Markov, draws)?;
    let mut transitions: HashMap<u8, Tally<u8>> = HashMap::new();

    for pair in draws.windows(2) {
        let previous = pair[0].combined_numbers();
        for n in pair[1].combined_numbers() {
            for &from in &previous {
                transitions.entry(from).or_default().add(n, 1);
            }
        }
    }

    let mut scores = Tally::new();
    let latest = draws[draws.len() - 1].combined_numbers();
    for from in latest {
        if let Some(next) = transitions.get(&from) {
            for (n, count) in next.iter() {
                scores.add(Feature::Number(n as u32), count);
            }
        }
    }

    Ok(ranked(scores))
}

/// Apparitions de chaque numéro aux positions `index % cycle_length` égales à
/// la position du prochain tirage.
pub fn cycles(draws: &[Draw], cycle_length: usize) -> Result<Vec<ScoredFeature>, AnalysisError> {
    require(PassKind::Cycle, draws)?;
    require_positive("cycle_length", cycle_length)?;

    let mut order: Vec<u8> = Vec::new();
    let mut buckets: HashMap<u8, Vec<u32>> = HashMap::new();
    for (index, draw) in draws.iter().enumerate() {
        let slot = index % cycle_length;
        for n in draw.combined_numbers() {
            let counts = buckets.entry(n).or_insert_with(|| {
                order.push(n);
                vec![0; cycle_length]
            });
            counts[slot] += 1;
        }
    }

    let current = draws.len() % cycle_length;
    let mut scores = Tally::new();
    for n in order {
        scores.set(Feature::Number(n as u32), buckets[&n][current]);
    }
    Ok(ranked(scores))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{draw, scenario_draws, score_of};

    #[test]
    fn test_gaps_scenario() {
        let result = gaps(&scenario_draws()).unwrap();
        assert_eq!(result[0], ScoredFeature { feature: Feature::Number(1), score: 2 });
        assert_eq!(score_of(&result, Feature::Number(2)), Some(1));
        assert_eq!(score_of(&result, Feature::Number(6)), Some(1));
        // 7 n'apparaît qu'une fois
        assert_eq!(score_of(&result, Feature::Number(7)), None);
    }

    #[test]
    fn test_gap_is_last_not_average() {
        let draws = vec![
            draw(1, [1, 10, 11, 12, 13], 2),
            draw(2, [1, 20, 21, 22, 23], 2),
            draw(3, [30, 31, 32, 33, 34], 3),
            draw(4, [30, 31, 32, 33, 34], 3),
            draw(5, [1, 40, 41, 42, 43], 4),
        ];
        let result = gaps(&draws).unwrap();
        assert_eq!(score_of(&result, Feature::Number(1)), Some(3));
        assert_eq!(score_of(&result, Feature::Number(2)), Some(1));
    }

    #[test]
    fn test_gap_ignores_repeat_inside_draw() {
        let draws = vec![
            draw(1, [3, 10, 11, 12, 13], 9),
            draw(2, [20, 21, 22, 23, 24], 8),
            draw(3, [3, 30, 31, 32, 33], 3),
        ];
        let result = gaps(&draws).unwrap();
        assert_eq!(score_of(&result, Feature::Number(3)), Some(2));
        assert!(result.iter().all(|f| f.score > 0));
    }

    #[test]
    fn test_delays_scenario() {
        let result = delays(&scenario_draws()).unwrap();
        assert_eq!(result[0], ScoredFeature { feature: Feature::Number(7), score: 1 });
        assert_eq!(score_of(&result, Feature::Number(1)), Some(0));
        assert_eq!(score_of(&result, Feature::Number(8)), None);
        assert_eq!(result.len(), 7);
    }

    #[test]
    fn test_markov_scenario() {
        let result = markov(&scenario_draws()).unwrap();
        assert_eq!(score_of(&result, Feature::Number(2)), Some(11));
        assert_eq!(score_of(&result, Feature::Number(7)), Some(6));
        assert_eq!(score_of(&result, Feature::Number(1)), Some(5));
    }

    #[test]
    fn test_markov_unseen_predecessors() {
        let draws = vec![
            draw(1, [1, 2, 3, 4, 5], 6),
            draw(2, [20, 21, 22, 23, 24], 9),
        ];
        // les numéros du dernier tirage n'ont jamais précédé un autre tirage
        assert!(markov(&draws).unwrap().is_empty());
    }

    #[test]
    fn test_cycles_current_slot() {
        let draws = scenario_draws();
        // 3 tirages, cycle 2 → position courante 1 → tirage d'indice 1
        let result = cycles(&draws, 2).unwrap();
        assert_eq!(score_of(&result, Feature::Number(7)), Some(1));
        assert_eq!(score_of(&result, Feature::Number(2)), Some(1));
        assert_eq!(score_of(&result, Feature::Number(1)), Some(0));
    }

    #[test]
    fn test_cycles_empty_slot_scores_zero() {
        let result = cycles(&scenario_draws(), 10).unwrap();
        assert_eq!(result.len(), 7);
        assert!(result.iter().all(|f| f.score == 0));
    }
}
