use std::fmt;

use serde::{Serialize, Serializer};

/// Clé produite par une analyse : un numéro, une paire, un triplet ou une
/// répartition pair/impair.
///
/// `Number` couvre aussi les valeurs qui ne sont pas des numéros de grille
/// (somme d'un tirage, écart, chiffre final, groupe).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    Number(u32),
    Pair(u8, u8),
    Triple(u8, u8, u8),
    Parity { even: u8, odd: u8 },
}

impl Feature {
    pub fn pair(a: u8, b: u8) -> Self {
        if a <= b { Feature::Pair(a, b) } else { Feature::Pair(b, a) }
    }

    pub fn triple(a: u8, b: u8, c: u8) -> Self {
        let mut sorted = [a, b, c];
        sorted.sort();
        Feature::Triple(sorted[0], sorted[1], sorted[2])
    }

    pub fn as_number(&self) -> Option<u32> {
        match *self {
            Feature::Number(n) => Some(n),
            _ => None,
        }
    }

    /// Numéros qui composent la clé. `None` pour une répartition de parité,
    /// qui ne désigne aucun numéro.
    pub fn constituents(&self) -> Option<Vec<u32>> {
        match *self {
            Feature::Number(n) => Some(vec![n]),
            Feature::Pair(a, b) => Some(vec![a as u32, b as u32]),
            Feature::Triple(a, b, c) => Some(vec![a as u32, b as u32, c as u32]),
            Feature::Parity { .. } => None,
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feature::Number(n) => write!(f, "{n}"),
            Feature::Pair(a, b) => write!(f, "{a},{b}"),
            Feature::Triple(a, b, c) => write!(f, "{a},{b},{c}"),
            Feature::Parity { even, odd } => write!(f, "{even},{odd}"),
        }
    }
}

impl Serialize for Feature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Feature::Number(n) => serializer.serialize_u32(*n),
            other => serializer.collect_str(other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoredFeature {
    pub feature: Feature,
    pub score: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NormalizedFeature {
    pub feature: Feature,
    pub value: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_and_triple_are_sorted() {
        assert_eq!(Feature::pair(9, 2), Feature::Pair(2, 9));
        assert_eq!(Feature::triple(30, 4, 12), Feature::Triple(4, 12, 30));
    }

    #[test]
    fn test_display_keys() {
        assert_eq!(Feature::Number(17).to_string(), "17");
        assert_eq!(Feature::pair(10, 9).to_string(), "9,10");
        assert_eq!(Feature::Parity { even: 4, odd: 2 }.to_string(), "4,2");
    }

    #[test]
    fn test_constituents() {
        assert_eq!(Feature::Triple(1, 5, 9).constituents(), Some(vec![1, 5, 9]));
        assert_eq!(Feature::Parity { even: 3, odd: 3 }.constituents(), None);
        assert_eq!(Feature::Pair(2, 3).as_number(), None);
    }

    #[test]
    fn test_serialize_number_vs_key() {
        let json = serde_json::to_string(&[Feature::Number(12), Feature::Pair(1, 2)]).unwrap();
        assert_eq!(json, r#"[12,"1,2"]"#);
    }
}
