//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline et la façade sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur / longueur bornées
//! - budget temps global
//! - TOUTE erreur typée du pipeline est acceptable en fuzz ; ce qui ne l'est
//!   jamais : un panic, un Ok non fini, un aperçu illisible
//! - invariant clé de la façade : erreur affichée => expression vide,
//!   et l'aperçu est soit vide soit un f64 relisible

use std::time::{Duration, Instant};

use super::eval::evaluer_texte;
use super::fonctions::{Fonction, ModeAngle, TOUTES};
use super::jetons::Op;
use super::moteur::{Constante, Moteur, Profil};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération d'expressions (bornée) ------------------------ */

const OPS: [Op; 6] = [
    Op::Plus,
    Op::Moins,
    Op::Fois,
    Op::Divise,
    Op::Modulo,
    Op::Puissance,
];

fn gen_nombre(rng: &mut Rng) -> String {
    let entier = rng.pick(100);
    if rng.coin() {
        format!("{entier}")
    } else {
        format!("{entier}.{}", rng.pick(100))
    }
}

/// Expression bien formée, profondeur bornée. Les sous-arbres profonds
/// retombent sur un nombre simple.
fn gen_expr(rng: &mut Rng, profondeur: u32) -> String {
    if profondeur == 0 {
        return gen_nombre(rng);
    }

    match rng.pick(4) {
        0 => gen_nombre(rng),
        1 => {
            let op = OPS[rng.pick(OPS.len() as u32) as usize];
            format!(
                "{}{}{}",
                gen_expr(rng, profondeur - 1),
                op.symbole(),
                gen_expr(rng, profondeur - 1)
            )
        }
        2 => format!("({})", gen_expr(rng, profondeur - 1)),
        _ => {
            let f = TOUTES[rng.pick(TOUTES.len() as u32) as usize];
            format!("{}({})", f.nom(), gen_expr(rng, profondeur - 1))
        }
    }
}

/* ------------------------ Fuzz du pipeline ------------------------ */

#[test]
fn fuzz_pipeline_ne_panique_jamais() {
    let start = Instant::now();
    let max = Duration::from_secs(8);
    let mut rng = Rng::new(0xCA1C);

    for i in 0..600u32 {
        let expr = gen_expr(&mut rng, 4);
        let mode = if rng.coin() {
            ModeAngle::Radians
        } else {
            ModeAngle::Degres
        };

        // toute erreur typée est acceptable ; un Ok doit être fini
        if let Ok(v) = evaluer_texte(&expr, mode) {
            assert!(v.is_finite(), "itération {i}: Ok non fini pour {expr:?}");
        }

        budget(start, max);
    }
}

/* ------------------------ Fuzz de la façade ------------------------ */

fn commande_aleatoire(m: &mut Moteur, rng: &mut Rng) {
    match rng.pick(20) {
        0..=5 => {
            let c = char::from(b'0' + rng.pick(10) as u8);
            m.saisir_chiffre(c);
        }
        6 => {
            m.saisir_point();
        }
        7..=9 => {
            let op = OPS[rng.pick(OPS.len() as u32) as usize];
            m.poser_operateur(op);
        }
        10 => {
            m.ouvrir_parenthese();
        }
        11 => {
            m.fermer_parenthese();
        }
        12 => {
            let f = TOUTES[rng.pick(TOUTES.len() as u32) as usize];
            m.commencer_fonction(f);
        }
        13 => {
            m.basculer_signe();
        }
        14 => {
            m.retour_arriere();
        }
        15 => {
            m.effacer_saisie();
        }
        16 => {
            m.valider();
        }
        17 => {
            if rng.coin() {
                m.inserer_constante(Constante::Pi)
            } else {
                m.inserer_constante(Constante::E)
            };
        }
        18 => {
            m.calculer_pourcent();
        }
        _ => {
            if rng.coin() {
                m.memoire_ranger()
            } else {
                m.memoire_rappeler()
            };
        }
    }
}

fn verifier_affichage(m: &Moteur, pas: u32) {
    let a = m.affichage();

    // erreur visible => tampon vidé
    if !a.erreur.is_empty() {
        assert!(
            a.expression.is_empty(),
            "pas {pas}: erreur {:?} avec expression {:?}",
            a.erreur,
            a.expression
        );
    }

    // l'aperçu est soit vide, soit un f64 relisible et fini
    if !a.resultat.is_empty() {
        let v: f64 = a
            .resultat
            .parse()
            .unwrap_or_else(|e| panic!("pas {pas}: aperçu illisible {:?} ({e})", a.resultat));
        assert!(v.is_finite(), "pas {pas}: aperçu non fini {:?}", a.resultat);
    }
}

#[test]
fn fuzz_facade_invariants() {
    let start = Instant::now();
    let max = Duration::from_secs(8);
    let mut rng = Rng::new(0xB0B0);

    for graine in 0..24u64 {
        let mut rng_seq = Rng::new(rng.next_u32() as u64 ^ graine);
        let profil = if rng.coin() {
            Profil::Scientifique
        } else {
            Profil::Standard
        };
        let mut m = Moteur::new(profil, ModeAngle::Radians);

        for pas in 0..250u32 {
            commande_aleatoire(&mut m, &mut rng_seq);
            verifier_affichage(&m, pas);
            budget(start, max);
        }
    }
}

#[test]
fn fuzz_facade_deterministe() {
    // même graine => même trace (historique + affichage final)
    let rejouer = |seed: u64| {
        let mut rng = Rng::new(seed);
        let mut m = Moteur::default();
        for _ in 0..300u32 {
            commande_aleatoire(&mut m, &mut rng);
        }
        (m.historique().to_vec(), m.affichage())
    };

    let (h1, a1) = rejouer(0xDEDA);
    let (h2, a2) = rejouer(0xDEDA);
    assert_eq!(h1, h2);
    assert_eq!(a1, a2);
}

#[test]
fn fuzz_fonctions_imbriquees_bornees() {
    let start = Instant::now();
    let max = Duration::from_secs(5);
    let mut rng = Rng::new(0xF0F0);

    for _ in 0..80u32 {
        // abs(abs(...abs(n)...)) : la résolution textuelle doit rester linéaire
        let n = gen_nombre(&mut rng);
        let mut expr = n.clone();
        for _ in 0..12 {
            expr = format!("abs({expr})");
        }

        let attendu: f64 = match n.parse() {
            Ok(v) => v,
            Err(e) => panic!("nombre généré illisible {n:?}: {e}"),
        };
        match evaluer_texte(&expr, ModeAngle::Radians) {
            Ok(v) => assert!((v - attendu).abs() <= 1e-9 * attendu.abs().max(1.0)),
            Err(e) => panic!("expr {expr:?} erreur inattendue: {e}"),
        }

        budget(start, max);
    }

    // profondeur de parenthèses brutes, sans fonction
    let mut expr = String::new();
    for _ in 0..64 {
        expr.push('(');
    }
    expr.push('1');
    for _ in 0..64 {
        expr.push(')');
    }
    match evaluer_texte(&expr, ModeAngle::Radians) {
        Ok(v) => assert_eq!(v, 1.0),
        Err(e) => panic!("parenthèses profondes: erreur inattendue {e}"),
    }
}

#[test]
fn fuzz_egal_puis_reprise() {
    // enchaîner "=" et reprises sur résultat ne doit jamais casser l'invariant
    let start = Instant::now();
    let max = Duration::from_secs(5);
    let mut rng = Rng::new(0xA5A5);

    let mut m = Moteur::default();
    for pas in 0..120u32 {
        for _ in 0..rng.pick(8) + 1 {
            commande_aleatoire(&mut m, &mut rng);
        }
        m.valider();
        verifier_affichage(&m, pas);

        if rng.coin() {
            m.tout_effacer();
            assert_eq!(m.affichage().resultat, "0");
        }
        budget(start, max);
    }
}
