use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Nombre de tirages récents pris en compte par la fréquence glissante.
    pub sliding_window: usize,
    pub cycle_length: usize,
    pub group_size: usize,
    /// Nombre de clés retenues par analyse lors de l'agrégation.
    pub top_features: usize,
    /// Bonus ajouté à chaque numéro du tirage pondéré.
    pub random_bonus: f64,
    pub suggestion_count: usize,
    /// Répartit le score des paires et triplets sur leurs numéros au lieu de l'ignorer.
    pub decompose_composite: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sliding_window: 10,
            cycle_length: 10,
            group_size: 10,
            top_features: 10,
            random_bonus: 0.1,
            suggestion_count: 6,
            decompose_composite: false,
        }
    }
}

impl AnalysisConfig {
    /// Charge la configuration JSON, ou la configuration par défaut sans fichier.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("Impossible de lire {:?}", path))?;
                serde_json::from_str::<AnalysisConfig>(&json)
                    .with_context(|| format!("Configuration illisible {:?}", path))?
            }
            None => AnalysisConfig::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AnalysisError> {
        let positive = [
            ("sliding_window", self.sliding_window),
            ("cycle_length", self.cycle_length),
            ("group_size", self.group_size),
            ("top_features", self.top_features),
            ("suggestion_count", self.suggestion_count),
        ];
        for (name, value) in positive {
            if value == 0 {
                return Err(AnalysisError::InvalidConfig(format!("{name} doit être > 0")));
            }
        }
        if !self.random_bonus.is_finite() || self.random_bonus < 0.0 {
            return Err(AnalysisError::InvalidConfig(format!(
                "random_bonus invalide : {}",
                self.random_bonus
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnalysisConfig::default();
        assert_eq!(config.sliding_window, 10);
        assert_eq!(config.cycle_length, 10);
        assert_eq!(config.group_size, 10);
        assert_eq!(config.top_features, 10);
        assert_eq!(config.suggestion_count, 6);
        assert!((config.random_bonus - 0.1).abs() < 1e-12);
        assert!(!config.decompose_composite);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: AnalysisConfig = serde_json::from_str(r#"{"sliding_window": 25}"#).unwrap();
        assert_eq!(config.sliding_window, 25);
        assert_eq!(config.cycle_length, 10);
    }

    #[test]
    fn test_validate_rejects_zero() {
        let config = AnalysisConfig {
            cycle_length: 0,
            ..AnalysisConfig::default()
        };
        assert!(matches!(config.validate(), Err(AnalysisError::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_rejects_bad_bonus() {
        let config = AnalysisConfig {
            random_bonus: f64::NAN,
            ..AnalysisConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_without_path() {
        assert_eq!(AnalysisConfig::load(None).unwrap(), AnalysisConfig::default());
    }
}
