//! Co-occurrences à l'intérieur d'un même tirage.

use loto_db::models::Draw;

use super::{PassKind, ranked, require};
use crate::error::AnalysisError;
use crate::feature::{Feature, ScoredFeature};
use crate::tally::Tally;

/// Numéros combinés triés. Doublon possible si le numéro chance égale un
/// numéro principal : les paires `(n, n)` et triplets `(n, n, x)` sont alors
/// comptés comme les autres.
fn sorted_combined(draw: &Draw) -> [u8; 6] {
    let mut numbers = draw.combined_numbers();
    numbers.sort();
    numbers
}

pub fn pairs(draws: &[Draw]) -> Result<Vec<ScoredFeature>, AnalysisError> {
    require(PassKind::Pairs, draws)?;
    let mut tally = Tally::new();
    for draw in draws {
        let numbers = sorted_combined(draw);
        for i in 0..numbers.len() {
            for j in (i + 1)..numbers.len() {
                tally.add(Feature::pair(numbers[i], numbers[j]), 1);
            }
        }
    }
    Ok(ranked(tally))
}

pub fn clusters(draws: &[Draw]) -> Result<Vec<ScoredFeature>, AnalysisError> {
    require(PassKind::Clusters, draws)?;
    let mut tally = Tally::new();
    for draw in draws {
        let numbers = sorted_combined(draw);
        for i in 0..numbers.len() {
            for j in (i + 1)..numbers.len() {
                for k in (j + 1)..numbers.len() {
                    tally.add(Feature::triple(numbers[i], numbers[j], numbers[k]), 1);
                }
            }
        }
    }
    Ok(ranked(tally))
}

/// Suites `n, n+1` parmi les numéros principaux. Le numéro chance est exclu :
/// il vient d'une autre urne.
pub fn sequences(draws: &[Draw]) -> Result<Vec<ScoredFeature>, AnalysisError> {
    require(PassKind::Sequential, draws)?;
    let mut tally = Tally::new();
    for draw in draws {
        let sorted = draw.sorted_main_numbers();
        for w in sorted.windows(2) {
            if w[1] == w[0] + 1 {
                tally.add(Feature::Pair(w[0], w[1]), 1);
            }
        }
    }
    Ok(ranked(tally))
}
