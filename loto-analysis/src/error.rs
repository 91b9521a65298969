use serde::Serialize;

use crate::feature::Feature;
use crate::passes::PassKind;

/// Erreurs fatales : le calcul des suggestions est interrompu.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnalysisError {
    #[error("historique insuffisant pour l'analyse « {pass} » : {required} tirage(s) requis, {available} disponible(s)")]
    InsufficientData {
        pass: PassKind,
        required: usize,
        available: usize,
    },

    #[error("tirage pondéré impossible : {available} numéro(s) distinct(s) pour {required} requis")]
    DegenerateSampling { available: usize, required: usize },

    #[error("configuration invalide : {0}")]
    InvalidConfig(String),
}

/// Contribution écartée pendant l'agrégation. Jamais retournée comme erreur :
/// elle est journalisée et conservée dans le rapport.
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[error("contribution ignorée ({pass}, {feature}) : valeur normalisée {value} invalide")]
pub struct InvalidFeatureValue {
    pub pass: PassKind,
    pub feature: Feature,
    pub value: f64,
}
