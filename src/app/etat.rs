//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : posséder le moteur de calcul et le dernier instantané d'affichage,
//! et router les commandes des boutons vers la façade. Aucune logique
//! d'affichage ici, aucune évaluation directe : tout passe par le moteur.

use crate::noyau::jetons::Op;
use crate::noyau::{Affichage, Constante, Fonction, ModeAngle, Moteur, Profil};

/// Commande déclenchée par un bouton (ou un raccourci clavier).
/// La vue ne parle au moteur qu'à travers cet enum.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Commande {
    Chiffre(char),
    Point,
    Signe,
    Operateur(Op),
    ParentheseOuvrante,
    ParentheseFermante,
    Fonction(Fonction),
    Constante(Constante),
    Egal,
    RetourArriere,
    EffacerSaisie,
    ToutEffacer,
    Pourcent,
    Carre,
    Inverse,
    Factorielle,
    ValeurAbsolue,
    NotationScientifique,
    MemoireRanger,
    MemoireRappeler,
    MemoireAjouter,
    MemoireSoustraire,
    MemoireEffacer,
}

#[derive(Clone, Debug)]
pub struct AppCalc {
    moteur: Moteur,

    /// Dernier instantané rendu par le moteur (expression, résultat, erreur).
    pub affichage: Affichage,
}

impl Default for AppCalc {
    fn default() -> Self {
        let moteur = Moteur::default();
        let affichage = moteur.affichage();
        Self { moteur, affichage }
    }
}

impl AppCalc {
    pub fn nouveau(profil: Profil) -> Self {
        let moteur = Moteur::new(profil, ModeAngle::default());
        let affichage = moteur.affichage();
        Self { moteur, affichage }
    }

    pub fn appliquer(&mut self, commande: Commande) {
        self.affichage = match commande {
            Commande::Chiffre(c) => self.moteur.saisir_chiffre(c),
            Commande::Point => self.moteur.saisir_point(),
            Commande::Signe => self.moteur.basculer_signe(),
            Commande::Operateur(op) => self.moteur.poser_operateur(op),
            Commande::ParentheseOuvrante => self.moteur.ouvrir_parenthese(),
            Commande::ParentheseFermante => self.moteur.fermer_parenthese(),
            Commande::Fonction(f) => self.moteur.commencer_fonction(f),
            Commande::Constante(c) => self.moteur.inserer_constante(c),
            Commande::Egal => self.moteur.valider(),
            Commande::RetourArriere => self.moteur.retour_arriere(),
            Commande::EffacerSaisie => self.moteur.effacer_saisie(),
            Commande::ToutEffacer => self.moteur.tout_effacer(),
            Commande::Pourcent => self.moteur.calculer_pourcent(),
            Commande::Carre => self.moteur.calculer_carre(),
            Commande::Inverse => self.moteur.calculer_inverse(),
            Commande::Factorielle => self.moteur.calculer_factorielle(),
            Commande::ValeurAbsolue => self.moteur.calculer_valeur_absolue(),
            Commande::NotationScientifique => self.moteur.notation_scientifique(),
            Commande::MemoireRanger => self.moteur.memoire_ranger(),
            Commande::MemoireRappeler => self.moteur.memoire_rappeler(),
            Commande::MemoireAjouter => self.moteur.memoire_ajouter(),
            Commande::MemoireSoustraire => self.moteur.memoire_soustraire(),
            Commande::MemoireEffacer => self.moteur.memoire_effacer(),
        };
    }

    /* ------------------------ Lectures pour la vue ------------------------ */

    pub fn scientifique(&self) -> bool {
        self.moteur.profil() == Profil::Scientifique
    }

    pub fn mode_angle(&self) -> ModeAngle {
        self.moteur.mode_angle()
    }

    pub fn regler_mode_angle(&mut self, mode: ModeAngle) {
        self.affichage = self.moteur.regler_mode_angle(mode);
    }

    pub fn memoire_occupee(&self) -> bool {
        self.moteur.memoire() != 0.0
    }

    pub fn historique(&self) -> &[String] {
        self.moteur.historique()
    }
}
