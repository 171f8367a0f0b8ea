//! Noyau — évaluation (pipeline réel)
//!
//! résolution des appels de fonctions -> jetons -> RPN -> pile f64 -> fini ?
//!
//! Les appels `nom(...)` sont résolus AVANT la jetonnisation : l'argument
//! repasse par le pipeline complet (récursif), le résultat numérique formaté
//! remplace l'appel dans le texte. Le jetonniseur ne voit donc jamais un nom
//! de fonction.

use super::erreur::ErreurCalc;
use super::fonctions::{Fonction, ModeAngle, TOUTES};
use super::format::format_nombre;
use super::jetons::{jetonniser, Jeton, Op};
use super::rpn::en_postfixe;

/// Évalue un texte d'expression complet (fonctions comprises).
/// Un résultat non fini est un débordement.
pub fn evaluer_texte(texte: &str, mode: ModeAngle) -> Result<f64, ErreurCalc> {
    let substitue = resoudre_fonctions(texte, mode)?;
    let jetons = jetonniser(&substitue)?;
    let postfixe = en_postfixe(&jetons)?;
    let valeur = evaluer_postfixe(&postfixe)?;

    if !valeur.is_finite() {
        return Err(ErreurCalc::DebordementNumerique);
    }
    Ok(valeur)
}

/// Machine à pile sur f64 : exécute une suite postfixe.
///
/// - Nombre => parse + push (le jetonniseur garantit un texte numérique sain)
/// - opérateur => dépile b puis a ; ÷ et % refusent b == 0 ; ^ = a.powf(b)
/// - à la fin, exactement UNE valeur doit rester
pub fn evaluer_postfixe(postfixe: &[Jeton]) -> Result<f64, ErreurCalc> {
    let mut pile: Vec<f64> = Vec::new();

    for jeton in postfixe {
        match jeton {
            Jeton::Nombre(texte) => {
                let v: f64 = texte.parse().map_err(|_| ErreurCalc::ExpressionMalFormee)?;
                pile.push(v);
            }

            Jeton::Operateur(op) => {
                let b = pile.pop().ok_or(ErreurCalc::ExpressionMalFormee)?;
                let a = pile.pop().ok_or(ErreurCalc::ExpressionMalFormee)?;

                let v = match op {
                    Op::Plus => a + b,
                    Op::Moins => a - b,
                    Op::Fois => a * b,
                    Op::Divise => {
                        if b == 0.0 {
                            return Err(ErreurCalc::DivisionParZero);
                        }
                        a / b
                    }
                    Op::Modulo => {
                        if b == 0.0 {
                            return Err(ErreurCalc::DivisionParZero);
                        }
                        a % b
                    }
                    Op::Puissance => a.powf(b),
                };
                pile.push(v);
            }

            // une parenthèse en postfixe trahit un bug de conversion
            Jeton::ParG | Jeton::ParD => return Err(ErreurCalc::ExpressionMalFormee),
        }
    }

    if pile.len() != 1 {
        return Err(ErreurCalc::ExpressionMalFormee);
    }
    Ok(pile[0])
}

/* ------------------------ Résolution des fonctions ------------------------ */

/// Remplace chaque appel `nom(argument)` par son résultat numérique formaté,
/// jusqu'à ce qu'il n'en reste plus. L'argument repasse par evaluer_texte,
/// les appels imbriqués sont donc résolus en profondeur d'abord.
fn resoudre_fonctions(texte: &str, mode: ModeAngle) -> Result<String, ErreurCalc> {
    let mut s = texte.to_string();

    while let Some((debut, fonction)) = chercher_appel(&s) {
        let ouvre = debut + fonction.nom().len(); // offset de '('
        let ferme = parenthese_fermante(&s, ouvre).ok_or(ErreurCalc::ParenthesesDesequilibrees)?;

        let argument = evaluer_texte(&s[ouvre + 1..ferme], mode)?;
        let resultat = fonction.appliquer(argument, mode)?;
        if !resultat.is_finite() {
            return Err(ErreurCalc::DebordementNumerique);
        }

        s.replace_range(debut..=ferme, &format_nombre(resultat));
    }

    Ok(s)
}

/// Cherche le premier appel `nom(` du texte. La table TOUTES est triée des
/// noms longs vers les courts, donc "arcsin(" gagne sur "sin(".
fn chercher_appel(s: &str) -> Option<(usize, Fonction)> {
    for (pos, _) in s.char_indices() {
        let reste = &s[pos..];
        for f in TOUTES {
            let nom = f.nom();
            if reste.len() > nom.len()
                && reste.starts_with(nom)
                && reste[nom.len()..].starts_with('(')
            {
                return Some((pos, f));
            }
        }
    }
    None
}

/// Offset (en octets) de la ')' appariée à la '(' située à `ouvre`.
fn parenthese_fermante(s: &str, ouvre: usize) -> Option<usize> {
    let mut profondeur = 0usize;
    for (pos, c) in s[ouvre..].char_indices() {
        match c {
            '(' => profondeur += 1,
            ')' => {
                profondeur -= 1;
                if profondeur == 0 {
                    return Some(ouvre + pos);
                }
            }
            _ => {}
        }
    }
    None
}
