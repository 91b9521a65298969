use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::InvalidFeatureValue;
use crate::feature::ScoredFeature;
use crate::passes::PassKind;

#[derive(Debug, Clone, PartialEq)]
pub struct PassResult {
    pub kind: PassKind,
    pub features: Vec<ScoredFeature>,
}

/// Résultat complet d'un calcul : les 14 analyses brutes, le tirage pondéré
/// et la suggestion finale.
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionReport {
    pub passes: Vec<PassResult>,
    pub weighted_random_numbers: Vec<u32>,
    pub suggested_numbers: Vec<u32>,
    pub diagnostics: Vec<InvalidFeatureValue>,
}

impl SuggestionReport {
    pub fn pass(&self, kind: PassKind) -> Option<&[ScoredFeature]> {
        self.passes
            .iter()
            .find(|p| p.kind == kind)
            .map(|p| p.features.as_slice())
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl Serialize for SuggestionReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for pass in &self.passes {
            map.serialize_entry(pass.kind.name(), &pass.features)?;
        }
        map.serialize_entry("weightedRandomNumbers", &self.weighted_random_numbers)?;
        map.serialize_entry("suggestedNumbers", &self.suggested_numbers)?;
        if !self.diagnostics.is_empty() {
            map.serialize_entry("diagnostics", &self.diagnostics)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::Feature;

    #[test]
    fn test_json_shape() {
        let report = SuggestionReport {
            passes: vec![
                PassResult {
                    kind: PassKind::Frequency,
                    features: vec![ScoredFeature { feature: Feature::Number(4), score: 3 }],
                },
                PassResult {
                    kind: PassKind::Pairs,
                    features: vec![ScoredFeature { feature: Feature::Pair(4, 9), score: 2 }],
                },
            ],
            weighted_random_numbers: vec![4, 9, 1, 2, 3, 5],
            suggested_numbers: vec![4, 9, 1, 2, 3, 5],
            diagnostics: vec![],
        };

        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(value["frequencies"][0]["feature"], 4);
        assert_eq!(value["frequencies"][0]["score"], 3);
        assert_eq!(value["pairs"][0]["feature"], "4,9");
        assert_eq!(value["suggestedNumbers"].as_array().map(|a| a.len()), Some(6));
        assert!(value.get("diagnostics").is_none());
    }

    #[test]
    fn test_pass_lookup() {
        let report = SuggestionReport {
            passes: vec![PassResult { kind: PassKind::Sum, features: vec![] }],
            weighted_random_numbers: vec![],
            suggested_numbers: vec![],
            diagnostics: vec![],
        };
        assert!(report.pass(PassKind::Sum).is_some());
        assert!(report.pass(PassKind::Markov).is_none());
    }
}
