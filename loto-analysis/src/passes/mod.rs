pub mod combinations;
pub mod counting;
pub mod temporal;

use std::fmt;

use loto_db::models::Draw;
use serde::{Serialize, Serializer};

use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use crate::feature::{Feature, ScoredFeature};
use crate::tally::Tally;

/// Les 14 analyses, dans l'ordre d'agrégation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PassKind {
    Frequency,
    Pairs,
    Gaps,
    Sequential,
    Clusters,
    Delays,
    SlidingFrequency,
    Markov,
    Cycle,
    Sum,
    Parity,
    Spacing,
    Ending,
    Group,
}

impl PassKind {
    pub const ALL: [PassKind; 14] = [
        PassKind::Frequency,
        PassKind::Pairs,
        PassKind::Gaps,
        PassKind::Sequential,
        PassKind::Clusters,
        PassKind::Delays,
        PassKind::SlidingFrequency,
        PassKind::Markov,
        PassKind::Cycle,
        PassKind::Sum,
        PassKind::Parity,
        PassKind::Spacing,
        PassKind::Ending,
        PassKind::Group,
    ];

    pub fn weight(self) -> f64 {
        match self {
            PassKind::Frequency => 0.30,
            PassKind::Pairs => 0.20,
            PassKind::Gaps => 0.15,
            PassKind::Sequential => 0.10,
            PassKind::Clusters => 0.10,
            PassKind::Delays => 0.05,
            PassKind::SlidingFrequency => 0.05,
            PassKind::Markov => 0.025,
            PassKind::Cycle => 0.025,
            PassKind::Sum => 0.10,
            PassKind::Parity => 0.10,
            PassKind::Spacing => 0.05,
            PassKind::Ending => 0.05,
            PassKind::Group => 0.05,
        }
    }

    /// Nom stable utilisé comme clé JSON.
    pub fn name(self) -> &'static str {
        match self {
            PassKind::Frequency => "frequencies",
            PassKind::Pairs => "pairs",
            PassKind::Gaps => "gaps",
            PassKind::Sequential => "sequences",
            PassKind::Clusters => "clusters",
            PassKind::Delays => "delays",
            PassKind::SlidingFrequency => "slidingFrequencies",
            PassKind::Markov => "markovChainAnalysis",
            PassKind::Cycle => "cycleAnalysis",
            PassKind::Sum => "sumAnalysis",
            PassKind::Parity => "parityAnalysis",
            PassKind::Spacing => "spacingAnalysis",
            PassKind::Ending => "endingAnalysis",
            PassKind::Group => "groupAnalysis",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PassKind::Frequency => "Fréquences",
            PassKind::Pairs => "Paires",
            PassKind::Gaps => "Écarts",
            PassKind::Sequential => "Suites",
            PassKind::Clusters => "Triplets",
            PassKind::Delays => "Retards",
            PassKind::SlidingFrequency => "Fréquences glissantes",
            PassKind::Markov => "Chaîne de Markov",
            PassKind::Cycle => "Cycles",
            PassKind::Sum => "Sommes",
            PassKind::Parity => "Parité",
            PassKind::Spacing => "Espacements",
            PassKind::Ending => "Finales",
            PassKind::Group => "Dizaines",
        }
    }

    /// Profondeur minimale d'historique. Écarts, retards et Markov comparent
    /// un tirage à un tirage antérieur.
    pub fn min_draws(self) -> usize {
        match self {
            PassKind::Gaps | PassKind::Delays | PassKind::Markov => 2,
            _ => 1,
        }
    }

    pub fn run(self, draws: &[Draw], config: &AnalysisConfig) -> Result<Vec<ScoredFeature>, AnalysisError> {
        match self {
            PassKind::Frequency => counting::frequencies(draws),
            PassKind::Pairs => combinations::pairs(draws),
            PassKind::Gaps => temporal::gaps(draws),
            PassKind::Sequential => combinations::sequences(draws),
            PassKind::Clusters => combinations::clusters(draws),
            PassKind::Delays => temporal::delays(draws),
            PassKind::SlidingFrequency => counting::sliding_frequencies(draws, config.sliding_window),
            PassKind::Markov => temporal::markov(draws),
            PassKind::Cycle => temporal::cycles(draws, config.cycle_length),
            PassKind::Sum => counting::sums(draws),
            PassKind::Parity => counting::parity(draws),
            PassKind::Spacing => counting::spacing(draws),
            PassKind::Ending => counting::endings(draws),
            PassKind::Group => counting::groups(draws, config.group_size),
        }
    }
}

impl fmt::Display for PassKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for PassKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

pub(crate) fn require(pass: PassKind, draws: &[Draw]) -> Result<(), AnalysisError> {
    let required = pass.min_draws();
    if draws.len() < required {
        return Err(AnalysisError::InsufficientData {
            pass,
            required,
            available: draws.len(),
        });
    }
    Ok(())
}

pub(crate) fn require_positive(name: &str, value: usize) -> Result<(), AnalysisError> {
    if value == 0 {
        return Err(AnalysisError::InvalidConfig(format!("{name} doit être > 0")));
    }
    Ok(())
}

pub(crate) fn ranked(tally: Tally<Feature>) -> Vec<ScoredFeature> {
    tally
        .into_ranked()
        .into_iter()
        .map(|(feature, score)| ScoredFeature { feature, score })
        .collect()
}
