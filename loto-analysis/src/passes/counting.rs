//! Analyses de comptage simple : chaque tirage incrémente une ou plusieurs clés.

use loto_db::models::Draw;

use super::{PassKind, ranked, require, require_positive};
use crate::error::AnalysisError;
use crate::feature::{Feature, ScoredFeature};
use crate::tally::Tally;

fn count_numbers<'a>(draws: impl Iterator<Item = &'a Draw>) -> Vec<ScoredFeature> {
    let mut tally = Tally::new();
    for draw in draws {
        for n in draw.combined_numbers() {
            tally.add(Feature::Number(n as u32), 1);
        }
    }
    ranked(tally)
}

fn count_by_draw<F>(draws: &[Draw], key: F) -> Vec<ScoredFeature>
where
    F: Fn(&[u8; 6]) -> Feature,
{
    let mut tally = Tally::new();
    for draw in draws {
        tally.add(key(&draw.combined_numbers()), 1);
    }
    ranked(tally)
}

fn count_by_number<F>(draws: &[Draw], key: F) -> Vec<ScoredFeature>
where
    F: Fn(u8) -> u32,
{
    let mut tally = Tally::new();
    for draw in draws {
        for n in draw.combined_numbers() {
            tally.add(Feature::Number(key(n)), 1);
        }
    }
    ranked(tally)
}

/// Nombre d'apparitions de chaque numéro (numéro chance compris).
pub fn frequencies(draws: &[Draw]) -> Result<Vec<ScoredFeature>, AnalysisError> {
    require(PassKind::Frequency, draws)?;
    Ok(count_numbers(draws.iter()))
}

/// Fréquences restreintes aux `window` tirages les plus récents, parcourus du
/// plus récent au plus ancien.
pub fn sliding_frequencies(draws: &[Draw], window: usize) -> Result<Vec<ScoredFeature>, AnalysisError> {
    require(PassKind::SlidingFrequency, draws)?;
    require_positive("sliding_window", window)?;
    Ok(count_numbers(draws.iter().rev().take(window)))
}

pub fn sums(draws: &[Draw]) -> Result<Vec<ScoredFeature>, AnalysisError> {
    require(PassKind::Sum, draws)?;
    Ok(count_by_draw(draws, |numbers| {
        Feature::Number(numbers.iter().map(|&n| n as u32).sum())
    }))
}

pub fn parity(draws: &[Draw]) -> Result<Vec<ScoredFeature>, AnalysisError> {
    require(PassKind::Parity, draws)?;
    Ok(count_by_draw(draws, |numbers| {
        let even = numbers.iter().filter(|&&n| n % 2 == 0).count() as u8;
        Feature::Parity {
            even,
            odd: numbers.len() as u8 - even,
        }
    }))
}

/// Écarts entre numéros consécutifs d'un même tirage, une fois trié.
pub fn spacing(draws: &[Draw]) -> Result<Vec<ScoredFeature>, AnalysisError> {
    require(PassKind::Spacing, draws)?;
    let mut tally = Tally::new();
    for draw in draws {
        let mut sorted = draw.combined_numbers();
        sorted.sort();
        for w in sorted.windows(2) {
            tally.add(Feature::Number((w[1] - w[0]) as u32), 1);
        }
    }
    Ok(ranked(tally))
}

pub fn endings(draws: &[Draw]) -> Result<Vec<ScoredFeature>, AnalysisError> {
    require(PassKind::Ending, draws)?;
    Ok(count_by_number(draws, |n| (n % 10) as u32))
}

/// Regroupement par tranches de `group_size` : 1-10 → 1, 11-20 → 2, ...
pub fn groups(draws: &[Draw], group_size: usize) -> Result<Vec<ScoredFeature>, AnalysisError> {
    require(PassKind::Group, draws)?;
    require_positive("group_size", group_size)?;
    Ok(count_by_number(draws, |n| {
        1 + (n.saturating_sub(1) as usize / group_size) as u32
    }))
}
