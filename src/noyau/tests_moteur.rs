//! Tests moteur (campagne) : commandes, aperçu spéculatif, états, mémoire.
//!
//! But : vérifier le contrat de la façade, pas re-tester le pipeline
//! (eval.rs a ses propres tests).
//! - l'aperçu suit chaque édition et complète "0" / ")" sans toucher au tampon
//! - tout échec d'aperçu donne un résultat VIDE, jamais une erreur
//! - le "=" est le seul point où une erreur devient visible
//! - état Erreur : la commande suivante repart d'un tampon propre
//! - profil Standard : les commandes scientifiques sont ignorées en silence

use std::time::{Duration, Instant};

use super::fonctions::{Fonction, ModeAngle};
use super::jetons::Op;
use super::moteur::{Constante, Moteur, Profil};

/// Rejoue une suite de touches "texte" (chiffres, '.', parenthèses,
/// symboles d'opérateurs × ÷ % ^ + -).
fn taper(m: &mut Moteur, touches: &str) {
    for c in touches.chars() {
        match c {
            '0'..='9' => {
                m.saisir_chiffre(c);
            }
            '.' => {
                m.saisir_point();
            }
            '(' => {
                m.ouvrir_parenthese();
            }
            ')' => {
                m.fermer_parenthese();
            }
            _ => {
                let op = Op::depuis_symbole(c)
                    .unwrap_or_else(|| panic!("touche inconnue dans le test: {c:?}"));
                m.poser_operateur(op);
            }
        }
    }
}

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Aperçu spéculatif ------------------------ */

#[test]
fn apercu_suit_la_frappe() {
    let mut m = Moteur::default();

    taper(&mut m, "3");
    assert_eq!(m.affichage().resultat, "3");

    // opérateur traînant : complété par "0" dans la copie, jamais le tampon
    taper(&mut m, "+");
    let a = m.affichage();
    assert_eq!(a.expression, "3 +");
    assert_eq!(a.resultat, "3");

    taper(&mut m, "4");
    assert_eq!(m.affichage().resultat, "7");
}

#[test]
fn apercu_equilibre_les_parentheses() {
    let mut m = Moteur::default();
    taper(&mut m, "(((1");

    let a = m.affichage();
    assert_eq!(a.expression, "(((1");
    assert_eq!(a.resultat, "1");
    assert_eq!(a.erreur, "");
}

#[test]
fn apercu_avale_les_echecs() {
    let mut m = Moteur::default();
    taper(&mut m, "10÷0");

    let a = m.affichage();
    assert_eq!(a.expression, "10 ÷ 0");
    assert_eq!(a.resultat, "");
    assert_eq!(a.erreur, "");
}

#[test]
fn apercu_sur_tampon_vide() {
    let m = Moteur::default();
    assert_eq!(m.affichage().resultat, "0");
}

/* ------------------------ Validation ("=") ------------------------ */

#[test]
fn egal_calcule_et_journalise() {
    let mut m = Moteur::default();
    taper(&mut m, "3+4");

    let a = m.valider();
    assert_eq!(a.resultat, "7");
    assert_eq!(a.erreur, "");
    assert_eq!(m.historique(), ["3 + 4 = 7"]);
}

#[test]
fn egal_sur_tampon_vide_est_neutre() {
    let mut m = Moteur::default();
    let a = m.valider();
    assert_eq!(a.expression, "");
    assert_eq!(a.resultat, "0");
    assert_eq!(a.erreur, "");
    assert!(m.historique().is_empty());
}

#[test]
fn egal_refuse_parentheses_ouvertes() {
    let mut m = Moteur::default();
    taper(&mut m, "(1+2");

    let a = m.valider();
    assert_eq!(a.erreur, "parenthèses non équilibrées");
    assert_eq!(a.expression, "");
    assert_eq!(a.resultat, "");
    assert!(m.historique().is_empty());
}

#[test]
fn egal_refuse_operateur_trainant() {
    let mut m = Moteur::default();
    taper(&mut m, "7+");

    let a = m.valider();
    assert_eq!(a.erreur, "expression mal formée");
}

#[test]
fn division_par_zero_visible_au_egal_seulement() {
    let mut m = Moteur::default();
    taper(&mut m, "10÷0");

    let a = m.valider();
    assert_eq!(a.erreur, "division par zéro");
    assert_eq!(a.expression, "");
    assert_eq!(a.resultat, "");

    // la commande suivante repart d'un tampon propre
    let a = m.saisir_chiffre('5');
    assert_eq!(a.expression, "5");
    assert_eq!(a.resultat, "5");
    assert_eq!(a.erreur, "");
}

#[test]
fn resultat_puis_operateur_enchaine() {
    let mut m = Moteur::default();
    taper(&mut m, "3+4");
    m.valider();

    taper(&mut m, "+3");
    let a = m.valider();
    assert_eq!(a.resultat, "10");
    assert_eq!(m.historique(), ["3 + 4 = 7", "7 + 3 = 10"]);
}

#[test]
fn resultat_puis_chiffre_repart_de_zero() {
    let mut m = Moteur::default();
    taper(&mut m, "3+4");
    m.valider();

    taper(&mut m, "5");
    let a = m.affichage();
    assert_eq!(a.expression, "5");
    assert_eq!(a.resultat, "5");
}

#[test]
fn retour_arriere_sur_resultat_efface_tout() {
    let mut m = Moteur::default();
    taper(&mut m, "3+4");
    m.valider();

    let a = m.retour_arriere();
    assert_eq!(a.expression, "");
    assert_eq!(a.resultat, "0");
}

/* ------------------------ Édition via la façade ------------------------ */

#[test]
fn correction_d_operateur() {
    let mut m = Moteur::default();
    taper(&mut m, "7+-");
    let a = m.affichage();
    assert_eq!(a.expression, "7 -");
    assert_eq!(a.resultat, "7");
}

#[test]
fn erreur_puis_operateur_repart_proprement() {
    let mut m = Moteur::default();
    taper(&mut m, "10÷0");
    m.valider();

    let a = m.poser_operateur(Op::Plus);
    assert_eq!(a.erreur, "");
    assert_eq!(a.expression, "0 +");
}

/* ------------------------ Fonctions scientifiques ------------------------ */

#[test]
fn fonction_saisie_apercu_et_egal() {
    let mut m = Moteur::default();
    m.commencer_fonction(Fonction::Racine);
    taper(&mut m, "9");

    let a = m.fermer_parenthese();
    assert_eq!(a.expression, "sqrt(9)");
    assert_eq!(a.resultat, "3");

    let a = m.valider();
    assert_eq!(a.resultat, "3");
    assert_eq!(m.historique(), ["sqrt(9) = 3"]);
}

#[test]
fn egal_valide_la_fonction_ouverte() {
    let mut m = Moteur::default();
    m.commencer_fonction(Fonction::Abs);
    taper(&mut m, "5");
    m.basculer_signe();

    let a = m.valider();
    assert_eq!(a.resultat, "5");
    assert_eq!(m.historique(), ["abs(-5) = 5"]);
}

#[test]
fn hors_domaine_au_egal() {
    let mut m = Moteur::default();
    m.commencer_fonction(Fonction::Racine);
    taper(&mut m, "1");
    m.basculer_signe();

    let a = m.valider();
    assert_eq!(a.erreur, "sqrt(-1) hors domaine");
    assert_eq!(a.resultat, "");
}

#[test]
fn mode_degres() {
    let mut m = Moteur::default();
    m.regler_mode_angle(ModeAngle::Degres);
    assert_eq!(m.mode_angle(), ModeAngle::Degres);

    m.commencer_fonction(Fonction::Sin);
    taper(&mut m, "90");
    let a = m.valider();
    assert_eq!(a.resultat, "1");
}

#[test]
fn constantes_litterales_reparsent_exactement() {
    let relire = |c: Constante| -> f64 {
        c.texte()
            .parse()
            .unwrap_or_else(|e| panic!("constante {c:?} illisible: {e}"))
    };
    assert_eq!(relire(Constante::Pi), std::f64::consts::PI);
    assert_eq!(relire(Constante::E), std::f64::consts::E);
}

#[test]
fn constante_avec_multiplication_implicite() {
    let mut m = Moteur::default();
    taper(&mut m, "2");
    let a = m.inserer_constante(Constante::Pi);
    assert_eq!(a.expression, "2 × 3.141592653589793");
    assert_eq!(a.resultat, "6.283185307179586");
}

/* ------------------------ Commandes unaires ------------------------ */

#[test]
fn pourcent_divise_par_cent() {
    let mut m = Moteur::default();
    taper(&mut m, "50");
    let a = m.calculer_pourcent();
    assert_eq!(a.expression, "0.5");
}

#[test]
fn pourcent_edite_l_argument_en_place() {
    let mut m = Moteur::default();
    m.commencer_fonction(Fonction::Abs);
    taper(&mut m, "50");
    let a = m.calculer_pourcent();
    assert_eq!(a.expression, "abs(0.5");

    let a = m.valider();
    assert_eq!(a.resultat, "0.5");
}

#[test]
fn carre_et_inverse() {
    let mut m = Moteur::default();
    taper(&mut m, "4");
    assert_eq!(m.calculer_carre().expression, "16");
    assert_eq!(m.calculer_inverse().expression, "0.0625");
}

#[test]
fn inverse_de_zero_met_en_erreur() {
    let mut m = Moteur::default();
    taper(&mut m, "0");
    let a = m.calculer_inverse();
    assert_eq!(a.erreur, "division par zéro");
    assert_eq!(a.expression, "");
}

#[test]
fn factorielle_et_ses_refus() {
    let mut m = Moteur::default();
    taper(&mut m, "5");
    let a = m.calculer_factorielle();
    assert_eq!(a.expression, "120");
    assert_eq!(a.resultat, "120");

    let mut m = Moteur::default();
    taper(&mut m, "3");
    m.basculer_signe();
    let a = m.calculer_factorielle();
    assert_eq!(a.erreur, "factorielle: entier ≥ 0 requis");

    let mut m = Moteur::default();
    taper(&mut m, "2.5");
    let a = m.calculer_factorielle();
    assert_eq!(a.erreur, "factorielle: entier ≥ 0 requis");
}

#[test]
fn valeur_absolue_en_place() {
    let mut m = Moteur::default();
    taper(&mut m, "5");
    m.basculer_signe();
    let a = m.calculer_valeur_absolue();
    assert_eq!(a.expression, "5");
}

#[test]
fn notation_scientifique_relisible() {
    let mut m = Moteur::default();
    taper(&mut m, "1500");
    let a = m.notation_scientifique();
    // la forme "1.50e3" doit repasser telle quelle par le jetonniseur
    assert_eq!(a.expression, "1.50e3");
    assert_eq!(a.resultat, "1500");
}

#[test]
fn puissance_et_modulo() {
    let mut m = Moteur::default();
    taper(&mut m, "2^3^2");
    assert_eq!(m.valider().resultat, "64");

    let mut m = Moteur::default();
    taper(&mut m, "7%3");
    assert_eq!(m.valider().resultat, "1");
}

/* ------------------------ Profil Standard ------------------------ */

#[test]
fn profil_standard_ignore_le_scientifique() {
    let mut m = Moteur::new(Profil::Standard, ModeAngle::Radians);
    assert_eq!(m.profil(), Profil::Standard);

    m.commencer_fonction(Fonction::Sin);
    m.inserer_constante(Constante::E);
    m.poser_operateur(Op::Puissance);
    m.poser_operateur(Op::Modulo);
    m.notation_scientifique();
    taper(&mut m, "5");
    m.calculer_factorielle();

    let a = m.affichage();
    assert_eq!(a.expression, "5");
    assert_eq!(a.resultat, "5");
}

#[test]
fn profil_standard_garde_le_reste() {
    let mut m = Moteur::new(Profil::Standard, ModeAngle::Radians);
    taper(&mut m, "(3+4)×2");
    assert_eq!(m.valider().resultat, "14");

    taper(&mut m, "+2");
    m.valider();
    m.calculer_carre();
    assert_eq!(m.affichage().expression, "256");
}

#[test]
fn profil_standard_garde_les_unaires_de_base() {
    // pourcent, carré, inverse et valeur absolue existent dans les DEUX
    // profils (seul le pavé scientifique est réservé)
    let mut m = Moteur::new(Profil::Standard, ModeAngle::Radians);
    taper(&mut m, "50");
    assert_eq!(m.calculer_pourcent().expression, "0.5");

    let mut m = Moteur::new(Profil::Standard, ModeAngle::Radians);
    taper(&mut m, "4");
    assert_eq!(m.calculer_carre().expression, "16");
    assert_eq!(m.calculer_inverse().expression, "0.0625");

    let mut m = Moteur::new(Profil::Standard, ModeAngle::Radians);
    taper(&mut m, "5");
    m.basculer_signe();
    assert_eq!(m.calculer_valeur_absolue().expression, "5");
}

/* ------------------------ Mémoire ------------------------ */

#[test]
fn memoire_aller_retour() {
    let mut m = Moteur::default();
    taper(&mut m, "42");
    m.memoire_ranger();
    assert_eq!(m.memoire(), 42.0);

    m.tout_effacer();
    let a = m.memoire_rappeler();
    assert_eq!(a.expression, "42");
    assert_eq!(a.resultat, "42");

    m.memoire_ajouter(); // 42 + 42
    m.tout_effacer();
    assert_eq!(m.memoire_rappeler().expression, "84");

    m.memoire_soustraire(); // 84 - 84
    assert_eq!(m.memoire(), 0.0);
}

#[test]
fn memoire_ignore_un_resultat_illisible() {
    let mut m = Moteur::default();
    taper(&mut m, "42");
    m.memoire_ranger();

    // aperçu vide (échec spéculatif) : MS/M+/M- sans effet
    m.tout_effacer();
    taper(&mut m, "10÷0");
    m.memoire_ranger();
    m.memoire_ajouter();
    assert_eq!(m.memoire(), 42.0);

    m.memoire_effacer();
    assert_eq!(m.memoire(), 0.0);
}

#[test]
fn rappel_remplace_l_argument_actif() {
    let mut m = Moteur::default();
    taper(&mut m, "7");
    m.memoire_ranger();
    m.tout_effacer();

    m.commencer_fonction(Fonction::Racine);
    taper(&mut m, "3");
    let a = m.memoire_rappeler();
    assert_eq!(a.expression, "sqrt(7");
}

/* ------------------------ Historique + stress borné ------------------------ */

#[test]
fn historique_en_append_seulement() {
    let mut m = Moteur::default();
    taper(&mut m, "1+1");
    m.valider();
    taper(&mut m, "×3");
    m.valider();
    taper(&mut m, "10÷0");
    m.valider(); // erreur : pas d'entrée

    assert_eq!(m.historique(), ["1 + 1 = 2", "2 × 3 = 6"]);
}

#[test]
fn stress_editions_bornees() {
    let start = Instant::now();
    let max = Duration::from_secs(5);

    let mut m = Moteur::default();
    for i in 0..400u32 {
        taper(&mut m, "1+1");
        let a = m.valider();
        assert_eq!(a.resultat, "2", "itération {i}");
        m.tout_effacer();
        budget(start, max);
    }
    assert_eq!(m.historique().len(), 400);
}
