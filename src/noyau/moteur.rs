//! src/noyau/moteur.rs
//!
//! Moteur — façade de commandes.
//!
//! Rôle : router chaque commande externe vers le tampon, relancer
//! l'évaluation spéculative après chaque édition, composer le pipeline
//! complet au "=", et rendre à l'appelant un instantané d'affichage
//! {expression, résultat, erreur}. Le moteur possède aussi la configuration
//! explicite (mode d'angle, profil) et le registre mémoire — jamais de
//! singleton global.
//!
//! Aperçu (évaluation spéculative) : après chaque commande mutante hors
//! effacement total / entrée en erreur, on clone la vue texte, on complète
//! un "0" derrière un opérateur traînant, on équilibre les ')' manquantes,
//! et on évalue. TOUT échec donne un aperçu vide — jamais une erreur.

use super::erreur::ErreurCalc;
use super::eval::evaluer_texte;
use super::fonctions::{factorielle, Fonction, ModeAngle};
use super::format::format_nombre;
use super::jetons::Op;
use super::tampon::{Etat, Tampon};

/// Constantes nommées : insérées sous leur texte décimal littéral,
/// le jetonniseur ne voit jamais le glyphe.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Constante {
    Pi,
    E,
}

impl Constante {
    /// Texte décimal littéral (le Display le plus court de la constante f64) :
    /// re-parse exactement sur `std::f64::consts`.
    pub fn texte(self) -> &'static str {
        match self {
            Constante::Pi => "3.141592653589793",
            Constante::E => "2.718281828459045",
        }
    }
}

/// Un seul moteur pour les deux calculatrices : le profil remplace les
/// variantes dupliquées du modèle d'origine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Profil {
    Standard,
    #[default]
    Scientifique,
}

/// Instantané rendu après chaque commande.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Affichage {
    pub expression: String,
    pub resultat: String,
    pub erreur: String,
}

#[derive(Clone, Debug)]
pub struct Moteur {
    tampon: Tampon,
    memoire: f64,
    mode: ModeAngle,
    profil: Profil,
    historique: Vec<String>,
    /// Aperçu courant ou dernier résultat validé ("0" sur tampon vide).
    apercu: String,
    erreur: String,
}

impl Default for Moteur {
    fn default() -> Self {
        Self::new(Profil::default(), ModeAngle::default())
    }
}

impl Moteur {
    pub fn new(profil: Profil, mode: ModeAngle) -> Self {
        Self {
            tampon: Tampon::default(),
            memoire: 0.0,
            mode,
            profil,
            historique: Vec::new(),
            apercu: "0".to_string(),
            erreur: String::new(),
        }
    }

    /* ------------------------ Configuration ------------------------ */

    pub fn mode_angle(&self) -> ModeAngle {
        self.mode
    }

    pub fn regler_mode_angle(&mut self, mode: ModeAngle) -> Affichage {
        self.mode = mode;
        self.apres_edition()
    }

    pub fn profil(&self) -> Profil {
        self.profil
    }

    /// Journal "expression = résultat", en append seulement.
    pub fn historique(&self) -> &[String] {
        &self.historique
    }

    pub fn memoire(&self) -> f64 {
        self.memoire
    }

    fn scientifique(&self) -> bool {
        self.profil == Profil::Scientifique
    }

    /* ------------------------ Saisie ------------------------ */

    pub fn saisir_chiffre(&mut self, c: char) -> Affichage {
        if !c.is_ascii_digit() {
            return self.affichage();
        }
        self.tampon.saisir_chiffre(c);
        self.apres_edition()
    }

    pub fn saisir_point(&mut self) -> Affichage {
        self.tampon.saisir_point();
        self.apres_edition()
    }

    pub fn basculer_signe(&mut self) -> Affichage {
        self.tampon.basculer_signe();
        self.apres_edition()
    }

    pub fn poser_operateur(&mut self, op: Op) -> Affichage {
        // ^ et % sont du ressort du profil scientifique
        if !self.scientifique() && matches!(op, Op::Puissance | Op::Modulo) {
            return self.affichage();
        }
        self.tampon.poser_operateur(op);
        self.apres_edition()
    }

    pub fn ouvrir_parenthese(&mut self) -> Affichage {
        self.tampon.ouvrir_parenthese();
        self.apres_edition()
    }

    pub fn fermer_parenthese(&mut self) -> Affichage {
        self.tampon.fermer_parenthese();
        self.apres_edition()
    }

    pub fn commencer_fonction(&mut self, f: Fonction) -> Affichage {
        if !self.scientifique() {
            return self.affichage();
        }
        self.tampon.commencer_fonction(f);
        self.apres_edition()
    }

    pub fn inserer_constante(&mut self, c: Constante) -> Affichage {
        if !self.scientifique() {
            return self.affichage();
        }
        self.tampon.inserer_constante(c.texte());
        self.apres_edition()
    }

    /* ------------------------ Effacements ------------------------ */

    pub fn retour_arriere(&mut self) -> Affichage {
        self.tampon.retour_arriere();
        self.apres_edition()
    }

    pub fn effacer_saisie(&mut self) -> Affichage {
        self.tampon.effacer_saisie();
        self.apres_edition()
    }

    pub fn tout_effacer(&mut self) -> Affichage {
        self.tampon.tout_effacer();
        self.erreur.clear();
        self.apercu = "0".to_string();
        self.affichage()
    }

    /* ------------------------ Validation ("=") ------------------------ */

    pub fn valider(&mut self) -> Affichage {
        if self.tampon.etat() == Etat::Erreur {
            return self.tout_effacer();
        }

        self.tampon.terminer_fonction();

        if self.tampon.est_vide() {
            self.apercu = "0".to_string();
            return self.affichage();
        }

        let (g, d) = self.tampon.compte_parentheses();
        let verdict = if g != d {
            Err(ErreurCalc::ParenthesesDesequilibrees)
        } else if self.tampon.finit_sur_operateur() {
            Err(ErreurCalc::ExpressionMalFormee)
        } else {
            evaluer_texte(&self.tampon.texte_calcul(), self.mode)
        };

        match verdict {
            Ok(v) => {
                let texte = format_nombre(v);
                self.historique
                    .push(format!("{} = {}", self.tampon.texte_affichage(), texte));
                self.tampon.poser_resultat(texte.clone());
                self.apercu = texte;
                self.erreur.clear();
            }
            Err(e) => self.passer_en_erreur(e),
        }

        self.affichage()
    }

    /* ------------------------ Commandes unaires ------------------------ */

    /// x ÷ 100 (commande distincte de l'opérateur % qui, lui, est un modulo).
    /// Seule commande unaire qui édite l'argument de fonction EN PLACE.
    pub fn calculer_pourcent(&mut self) -> Affichage {
        self.transformer_valeur(true, |v| Ok(v / 100.0))
    }

    pub fn calculer_carre(&mut self) -> Affichage {
        self.transformer_valeur(false, |v| {
            let r = v * v;
            if r.is_finite() {
                Ok(r)
            } else {
                Err(ErreurCalc::DebordementNumerique)
            }
        })
    }

    pub fn calculer_inverse(&mut self) -> Affichage {
        self.transformer_valeur(false, |v| {
            if v == 0.0 {
                return Err(ErreurCalc::DivisionParZero);
            }
            let r = 1.0 / v;
            if r.is_finite() {
                Ok(r)
            } else {
                Err(ErreurCalc::DebordementNumerique)
            }
        })
    }

    pub fn calculer_factorielle(&mut self) -> Affichage {
        if !self.scientifique() {
            return self.affichage();
        }
        self.transformer_valeur(false, factorielle)
    }

    pub fn calculer_valeur_absolue(&mut self) -> Affichage {
        self.transformer_valeur(false, |v| Ok(v.abs()))
    }

    /// Réécrit la dernière valeur en notation scientifique ("1.23e4") ;
    /// le jetonniseur sait relire cette forme (règle de l'exposant).
    pub fn notation_scientifique(&mut self) -> Affichage {
        if !self.scientifique() {
            return self.affichage();
        }
        if self.tampon.etat() == Etat::Erreur {
            return self.tout_effacer();
        }
        self.tampon.reprendre_saisie();
        self.tampon.terminer_fonction();

        let valeur = match self.tampon.dernier_nombre_mut() {
            Some(n) => n.parse::<f64>().ok(),
            None => None,
        };
        if let Some(v) = valeur {
            if let Some(n) = self.tampon.dernier_nombre_mut() {
                *n = format!("{v:.2e}");
            }
        }
        self.apres_edition()
    }

    /// Tronc commun des commandes unaires : parse la cible (argument actif si
    /// `en_argument`, sinon le dernier nombre après validation de la fonction
    /// active), applique `f`, remplace la cible par le résultat formaté.
    /// Cible absente ou vide => commande ignorée ; échec de `f` => état Erreur.
    fn transformer_valeur<F>(&mut self, en_argument: bool, f: F) -> Affichage
    where
        F: FnOnce(f64) -> Result<f64, ErreurCalc>,
    {
        if self.tampon.etat() == Etat::Erreur {
            return self.tout_effacer();
        }
        self.tampon.reprendre_saisie();

        if en_argument && self.tampon.argument_actif_mut().is_some() {
            let valeur = self
                .tampon
                .argument_actif_mut()
                .and_then(|arg| arg.parse::<f64>().ok());
            let Some(v) = valeur else {
                return self.apres_edition();
            };
            return match f(v) {
                Ok(r) => {
                    if let Some(arg) = self.tampon.argument_actif_mut() {
                        *arg = format_nombre(r);
                    }
                    self.apres_edition()
                }
                Err(e) => {
                    self.passer_en_erreur(e);
                    self.affichage()
                }
            };
        }

        self.tampon.terminer_fonction();

        let valeur = match self.tampon.dernier_nombre_mut() {
            Some(n) => n.parse::<f64>().ok(),
            None => None,
        };
        let Some(v) = valeur else {
            return self.apres_edition();
        };

        match f(v) {
            Ok(r) => {
                if let Some(n) = self.tampon.dernier_nombre_mut() {
                    *n = format_nombre(r);
                }
                self.apres_edition()
            }
            Err(e) => {
                self.passer_en_erreur(e);
                self.affichage()
            }
        }
    }

    /* ------------------------ Mémoire ------------------------ */
    // Lecture/écriture sur le texte du résultat courant ; un texte non
    // numérique est ignoré en silence (seule récupération non fatale du
    // moteur).

    pub fn memoire_ranger(&mut self) -> Affichage {
        if let Ok(v) = self.apercu.parse::<f64>() {
            self.memoire = v;
        }
        self.affichage()
    }

    pub fn memoire_ajouter(&mut self) -> Affichage {
        if let Ok(v) = self.apercu.parse::<f64>() {
            // le registre reste fini : un cumul qui déborde est ignoré
            let somme = self.memoire + v;
            if somme.is_finite() {
                self.memoire = somme;
            }
        }
        self.affichage()
    }

    pub fn memoire_soustraire(&mut self) -> Affichage {
        if let Ok(v) = self.apercu.parse::<f64>() {
            let reste = self.memoire - v;
            if reste.is_finite() {
                self.memoire = reste;
            }
        }
        self.affichage()
    }

    /// Insère la valeur mémorisée comme une constante (× implicite, remplace
    /// l'argument de fonction actif le cas échéant).
    pub fn memoire_rappeler(&mut self) -> Affichage {
        let texte = format_nombre(self.memoire);
        self.tampon.inserer_constante(&texte);
        self.apres_edition()
    }

    pub fn memoire_effacer(&mut self) -> Affichage {
        self.memoire = 0.0;
        self.affichage()
    }

    /* ------------------------ Aperçu + instantané ------------------------ */

    fn apres_edition(&mut self) -> Affichage {
        self.rafraichir_apercu();
        self.affichage()
    }

    fn rafraichir_apercu(&mut self) {
        if self.tampon.etat() == Etat::Erreur {
            self.apercu.clear();
            return;
        }
        if self.tampon.est_vide() {
            self.apercu = "0".to_string();
            return;
        }

        // vue clonée + complétions : jamais de mutation du tampon
        let mut texte = self.tampon.texte_calcul();
        if self.tampon.finit_sur_operateur() {
            texte.push('0');
        }
        let (g, d) = self.tampon.compte_parentheses();
        for _ in d..g {
            texte.push(')');
        }

        match evaluer_texte(&texte, self.mode) {
            Ok(v) => self.apercu = format_nombre(v),
            // tout échec d'aperçu est avalé : aperçu vide, jamais d'erreur
            Err(_) => self.apercu.clear(),
        }
    }

    pub fn affichage(&self) -> Affichage {
        let en_erreur = self.tampon.etat() == Etat::Erreur;
        Affichage {
            expression: self.tampon.texte_affichage(),
            resultat: self.apercu.clone(),
            erreur: if en_erreur {
                self.erreur.clone()
            } else {
                String::new()
            },
        }
    }

    fn passer_en_erreur(&mut self, e: ErreurCalc) {
        self.tampon.marquer_erreur();
        self.erreur = e.to_string();
        self.apercu.clear();
    }
}
