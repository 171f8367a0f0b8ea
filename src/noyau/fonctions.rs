// src/noyau/fonctions.rs
//
// Registre des fonctions unaires (mode scientifique)
// --------------------------------------------------
// - Enum fermé + table statique de noms : l'exhaustivité est vérifiée
//   à la compilation, pas de dispatch sur chaîne au point d'appel.
// - Le mode d'angle (radians/degrés) n'affecte que la famille trig :
//   conversion degré->radian sur l'ARGUMENT pour sin/cos/tan,
//   radian->degré sur le RÉSULTAT pour arcsin/arccos/arctan.
// - Domaines vérifiés ici, jamais par exception.

use super::erreur::ErreurCalc;

/// Interprétation des angles pour la famille trig.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ModeAngle {
    #[default]
    Radians,
    Degres,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Sin,
    Cos,
    Tan,
    ArcSin,
    ArcCos,
    ArcTan,
    Log10,
    Ln,
    Racine,
    Abs,
}

/// Table des fonctions, triée des noms LONGS vers les courts : le scan
/// textuel de eval.rs doit voir "arcsin(" avant "sin(".
pub const TOUTES: [Fonction; 10] = [
    Fonction::ArcSin,
    Fonction::ArcCos,
    Fonction::ArcTan,
    Fonction::Log10,
    Fonction::Racine,
    Fonction::Sin,
    Fonction::Cos,
    Fonction::Tan,
    Fonction::Abs,
    Fonction::Ln,
];

impl Fonction {
    pub fn nom(self) -> &'static str {
        match self {
            Fonction::Sin => "sin",
            Fonction::Cos => "cos",
            Fonction::Tan => "tan",
            Fonction::ArcSin => "arcsin",
            Fonction::ArcCos => "arccos",
            Fonction::ArcTan => "arctan",
            Fonction::Log10 => "log10",
            Fonction::Ln => "ln",
            Fonction::Racine => "sqrt",
            Fonction::Abs => "abs",
        }
    }

    /// Applique la fonction à `x` sous le mode d'angle donné.
    pub fn appliquer(self, x: f64, mode: ModeAngle) -> Result<f64, ErreurCalc> {
        let hors_domaine = || ErreurCalc::HorsDomaine {
            fonction: self.nom(),
            argument: x,
        };

        // degré -> radian sur l'argument (trig directe seulement)
        let angle = match mode {
            ModeAngle::Radians => x,
            ModeAngle::Degres => x.to_radians(),
        };
        // radian -> degré sur le résultat (trig inverse seulement)
        let retour = |r: f64| match mode {
            ModeAngle::Radians => r,
            ModeAngle::Degres => r.to_degrees(),
        };

        match self {
            Fonction::Sin => Ok(angle.sin()),
            Fonction::Cos => Ok(angle.cos()),
            Fonction::Tan => Ok(angle.tan()),

            Fonction::ArcSin => {
                if !(-1.0..=1.0).contains(&x) {
                    return Err(hors_domaine());
                }
                Ok(retour(x.asin()))
            }
            Fonction::ArcCos => {
                if !(-1.0..=1.0).contains(&x) {
                    return Err(hors_domaine());
                }
                Ok(retour(x.acos()))
            }
            Fonction::ArcTan => Ok(retour(x.atan())),

            Fonction::Log10 => {
                if x <= 0.0 {
                    return Err(hors_domaine());
                }
                Ok(x.log10())
            }
            Fonction::Ln => {
                if x <= 0.0 {
                    return Err(hors_domaine());
                }
                Ok(x.ln())
            }
            Fonction::Racine => {
                if x < 0.0 {
                    return Err(hors_domaine());
                }
                Ok(x.sqrt())
            }
            Fonction::Abs => Ok(x.abs()),
        }
    }
}

/// Factorielle (commande "x!") : entier ≥ 0 requis.
/// Un produit qui sort du fini est un débordement, pas un argument invalide.
pub fn factorielle(x: f64) -> Result<f64, ErreurCalc> {
    if x < 0.0 || x.fract() != 0.0 {
        return Err(ErreurCalc::FactorielleInvalide);
    }

    let n = x as u64;
    let mut produit = 1.0_f64;
    for k in 2..=n {
        produit *= k as f64;
        if produit.is_infinite() {
            return Err(ErreurCalc::DebordementNumerique);
        }
    }
    Ok(produit)
}
