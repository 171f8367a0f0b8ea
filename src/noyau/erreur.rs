// src/noyau/erreur.rs
//
// Erreurs du noyau — un seul enum partagé par tout le pipeline.
//
// Règles:
// - Pas de String "fourre-tout" : chaque panne a sa variante.
// - Le message Display est celui montré tel quel dans l'UI.
// - Les erreurs d'aperçu (évaluation spéculative) sont avalées par le moteur,
//   celles de "=" sont terminales pour l'expression courante.

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ErreurCalc {
    #[error("division par zéro")]
    DivisionParZero,

    /// Argument hors du domaine d'une fonction (ex: sqrt(-1), arcsin(2)).
    #[error("{fonction}({argument}) hors domaine")]
    HorsDomaine {
        fonction: &'static str,
        argument: f64,
    },

    #[error("parenthèses non équilibrées")]
    ParenthesesDesequilibrees,

    /// Jeton inconnu, pile déséquilibrée, opérateur pendouillant, etc.
    #[error("expression mal formée")]
    ExpressionMalFormee,

    /// Résultat infini ou NaN après évaluation.
    #[error("résultat hors limites")]
    DebordementNumerique,

    #[error("factorielle: entier ≥ 0 requis")]
    FactorielleInvalide,
}
