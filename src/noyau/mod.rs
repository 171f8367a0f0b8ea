//! Noyau de calcul
//!
//! Organisation interne :
//! - erreur.rs    : ErreurCalc (enum fermé, messages d'affichage)
//! - jetons.rs    : tokenisation + opérateurs
//! - rpn.rs       : shunting-yard (infixe -> postfixe)
//! - fonctions.rs : registre des fonctions unaires + mode d'angle
//! - format.rs    : nombres -> texte d'affichage
//! - eval.rs      : pipeline complet (résolution des fonctions comprise)
//! - tampon.rs    : machine à états d'édition (sans évaluation)
//! - moteur.rs    : façade de commandes + aperçu spéculatif

pub mod erreur;
pub mod eval;
pub mod fonctions;
pub mod format;
pub mod jetons;
pub mod moteur;
pub mod rpn;
pub mod tampon;

#[cfg(test)]
mod tests_moteur;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use erreur::ErreurCalc;
pub use fonctions::{Fonction, ModeAngle};
pub use moteur::{Affichage, Constante, Moteur, Profil};
