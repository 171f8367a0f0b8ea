// src/noyau/rpn.rs
//
// Shunting-yard : infixe -> postfixe (RPN)
//
// Règles:
// - Nombre => sortie directe
// - '('    => empilé
// - ')'    => dépile jusqu'à la '(' correspondante (absente => erreur)
// - opérateur => dépile tant que le sommet est un opérateur de précédence
//   SUPÉRIEURE OU ÉGALE (associativité gauche stricte pour tous, ^ compris),
//   puis empile l'opérateur entrant
// - fin d'entrée => vide la pile ; '(' restante => erreur
//
// NOTE: les fonctions n'apparaissent jamais ici — leurs appels sont résolus
// textuellement avant la jetonnisation (voir eval.rs).

use super::erreur::ErreurCalc;
use super::jetons::Jeton;

/// Convertit une suite de jetons infixe en postfixe.
pub fn en_postfixe(jetons: &[Jeton]) -> Result<Vec<Jeton>, ErreurCalc> {
    let mut sortie: Vec<Jeton> = Vec::with_capacity(jetons.len());
    let mut pile: Vec<Jeton> = Vec::new();

    for jeton in jetons.iter().cloned() {
        match jeton {
            Jeton::Nombre(_) => sortie.push(jeton),

            Jeton::ParG => pile.push(jeton),

            Jeton::ParD => {
                // dépile jusqu'à '('
                loop {
                    match pile.pop() {
                        Some(Jeton::ParG) => break,
                        Some(haut) => sortie.push(haut),
                        None => return Err(ErreurCalc::ParenthesesDesequilibrees),
                    }
                }
            }

            Jeton::Operateur(op) => {
                while let Some(Jeton::Operateur(haut)) = pile.last() {
                    if haut.precedence() >= op.precedence() {
                        let haut = pile.pop().ok_or(ErreurCalc::ExpressionMalFormee)?;
                        sortie.push(haut);
                    } else {
                        break;
                    }
                }
                pile.push(jeton);
            }
        }
    }

    // vide la pile ; une '(' restante trahit un déséquilibre
    while let Some(haut) = pile.pop() {
        if matches!(haut, Jeton::ParG) {
            return Err(ErreurCalc::ParenthesesDesequilibrees);
        }
        sortie.push(haut);
    }

    Ok(sortie)
}
