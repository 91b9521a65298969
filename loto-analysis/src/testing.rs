use chrono::{Days, NaiveDate};
use loto_db::models::Draw;

use crate::feature::{Feature, ScoredFeature};

pub(crate) fn draw(day: u64, main_numbers: [u8; 5], lucky_number: u8) -> Draw {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    Draw::new(start + Days::new(day), main_numbers, lucky_number)
}

/// Trois tirages dont le premier et le dernier sont identiques.
pub(crate) fn scenario_draws() -> Vec<Draw> {
    vec![
        draw(0, [1, 2, 3, 4, 5], 6),
        draw(1, [2, 3, 4, 5, 6], 7),
        draw(2, [1, 2, 3, 4, 5], 6),
    ]
}

/// Historique déterministe, chaque tirage contient une suite `n, n+1`.
pub(crate) fn make_test_draws(n: usize) -> Vec<Draw> {
    const OFFSETS: [usize; 5] = [0, 1, 9, 20, 33];
    (0..n)
        .map(|i| {
            let base = i * 7;
            let main = OFFSETS.map(|o| ((base + o) % 49 + 1) as u8);
            draw(i as u64, main, (i % 10 + 1) as u8)
        })
        .collect()
}

pub(crate) fn score_of(features: &[ScoredFeature], feature: Feature) -> Option<u32> {
    features.iter().find(|f| f.feature == feature).map(|f| f.score)
}
