//! src/noyau/tampon.rs
//!
//! Tampon d'expression — la machine à états d'édition.
//!
//! Rôle : posséder la suite d'éléments validés, le littéral numérique en cours
//! de frappe et le sous-contexte d'argument de fonction ; offrir les
//! opérations d'édition SANS jamais évaluer (l'évaluation, spéculative ou
//! finale, est du ressort du moteur).
//!
//! Contrats :
//! - À tout instant : nb('(') ≥ nb(')'). L'égalité n'est exigée qu'au "=".
//! - Au plus UN contexte de fonction actif ; en ouvrir un second valide
//!   d'abord le premier (argument vide => 0).
//! - État Erreur : toute édition suivante commence par un effacement complet.
//! - État ResultatAffiche : un chiffre/point/constante efface tout avant la
//!   saisie ; un opérateur ou une parenthèse enchaîne sur le résultat.

use super::fonctions::Fonction;
use super::jetons::Op;

/// Élément validé du tampon. Un appel de fonction validé s'écrit
/// [Fonction(f), ParG, Nombre(arg), ParD] et se reconstruit en texte
/// pour le pipeline (qui résout les appels avant jetonnisation).
#[derive(Clone, Debug, PartialEq)]
pub enum Element {
    Nombre(String),
    Operateur(Op),
    ParG,
    ParD,
    Fonction(Fonction),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Etat {
    #[default]
    Saisie,
    ArgumentFonction,
    ResultatAffiche,
    Erreur,
}

/// Sous-édition d'un argument de fonction : le texte tapé vit ici tant que
/// la fonction n'est pas validée.
#[derive(Clone, Debug)]
struct ContexteFonction {
    argument: String,
}

#[derive(Clone, Debug, Default)]
pub struct Tampon {
    elements: Vec<Element>,
    contexte: Option<ContexteFonction>,
    etat: Etat,
}

impl Tampon {
    pub fn etat(&self) -> Etat {
        self.etat
    }

    pub fn est_vide(&self) -> bool {
        self.elements.is_empty() && self.contexte.is_none()
    }

    /* ------------------------ Routage erreur / résultat ------------------------ */

    /// Erreur => effacement complet avant toute édition.
    fn sortir_erreur(&mut self) {
        if self.etat == Etat::Erreur {
            self.tout_effacer();
        }
    }

    /// ResultatAffiche : une saisie "valeur" (chiffre/point/constante) repart
    /// de zéro ; le reste enchaîne sur le résultat affiché.
    fn sortir_resultat(&mut self, saisie_valeur: bool) {
        if self.etat == Etat::ResultatAffiche {
            if saisie_valeur {
                self.tout_effacer();
            } else {
                self.etat = Etat::Saisie;
            }
        }
    }

    /// Après un résultat, une commande unaire du moteur enchaîne sur
    /// celui-ci au lieu de repartir de zéro.
    pub fn reprendre_saisie(&mut self) {
        self.sortir_resultat(false);
    }

    /* ------------------------ Saisies "valeur" ------------------------ */

    pub fn saisir_chiffre(&mut self, c: char) {
        debug_assert!(c.is_ascii_digit());
        self.sortir_erreur();
        self.sortir_resultat(true);

        if let Some(ctx) = &mut self.contexte {
            if ctx.argument == "0" {
                ctx.argument.clear();
            }
            ctx.argument.push(c);
            return;
        }

        match self.elements.last_mut() {
            Some(Element::Nombre(n)) => {
                // "0" seul est remplacé, pas préfixé
                if n == "0" {
                    n.clear();
                }
                n.push(c);
            }
            _ => self.elements.push(Element::Nombre(c.to_string())),
        }
    }

    pub fn saisir_point(&mut self) {
        self.sortir_erreur();
        self.sortir_resultat(true);

        if let Some(ctx) = &mut self.contexte {
            if ctx.argument.contains('.') {
                return;
            }
            if ctx.argument.is_empty() {
                ctx.argument.push_str("0.");
            } else {
                ctx.argument.push('.');
            }
            return;
        }

        match self.elements.last_mut() {
            Some(Element::Nombre(n)) => {
                if !n.contains('.') {
                    n.push('.');
                }
            }
            // expression vide, ou finissant sur opérateur / parenthèse
            _ => self.elements.push(Element::Nombre("0.".to_string())),
        }
    }

    /// Bascule le signe du dernier nombre (ou de l'argument actif) par
    /// manipulation de chaîne ; "0" reste non signé.
    pub fn basculer_signe(&mut self) {
        self.sortir_erreur();
        self.sortir_resultat(false);

        let cible = match &mut self.contexte {
            Some(ctx) => Some(&mut ctx.argument),
            None => match self.elements.last_mut() {
                Some(Element::Nombre(n)) => Some(n),
                _ => None,
            },
        };

        if let Some(n) = cible {
            if n.starts_with('-') {
                n.remove(0);
            } else if !n.is_empty() && n != "0" {
                n.insert(0, '-');
            }
        }
    }

    pub fn inserer_constante(&mut self, texte: &str) {
        self.sortir_erreur();
        self.sortir_resultat(true);

        // dans un argument de fonction : la constante REMPLACE l'argument
        if let Some(ctx) = &mut self.contexte {
            ctx.argument = texte.to_string();
            return;
        }

        self.multiplication_implicite();
        self.elements.push(Element::Nombre(texte.to_string()));
    }

    /// Un '(' , une fonction ou une constante qui suit une valeur fermée
    /// (nombre ou ')') sous-entend une multiplication.
    fn multiplication_implicite(&mut self) {
        if matches!(
            self.elements.last(),
            Some(Element::Nombre(_)) | Some(Element::ParD)
        ) {
            self.elements.push(Element::Operateur(Op::Fois));
        }
    }

    /* ------------------------ Opérateurs et parenthèses ------------------------ */

    pub fn poser_operateur(&mut self, op: Op) {
        self.sortir_erreur();
        self.sortir_resultat(false);
        self.terminer_fonction();

        match self.elements.last_mut() {
            None => {
                // expression vide : 0<op>
                self.elements.push(Element::Nombre("0".to_string()));
                self.elements.push(Element::Operateur(op));
            }
            // correction d'opérateur : le dernier tapé remplace le précédent
            Some(Element::Operateur(dernier)) => *dernier = op,
            Some(Element::ParG) => {
                self.elements.push(Element::Nombre("0".to_string()));
                self.elements.push(Element::Operateur(op));
            }
            Some(_) => self.elements.push(Element::Operateur(op)),
        }
    }

    pub fn ouvrir_parenthese(&mut self) {
        self.sortir_erreur();
        self.sortir_resultat(false);
        self.terminer_fonction();

        self.multiplication_implicite();
        self.elements.push(Element::ParG);
    }

    /// Permise seulement tant qu'il reste des '(' non appariées.
    /// Avec un contexte de fonction actif, ')' vaut validation de la fonction.
    pub fn fermer_parenthese(&mut self) {
        self.sortir_erreur();
        self.sortir_resultat(false);

        if self.contexte.is_some() {
            self.terminer_fonction();
            return;
        }

        let (g, d) = self.compte_parentheses();
        if g <= d {
            return;
        }

        if matches!(self.elements.last(), Some(Element::Operateur(_))) {
            self.elements.push(Element::Nombre("0".to_string()));
        }
        self.elements.push(Element::ParD);
    }

    /* ------------------------ Fonctions ------------------------ */

    pub fn commencer_fonction(&mut self, f: Fonction) {
        self.sortir_erreur();
        self.sortir_resultat(false);
        self.terminer_fonction();

        self.multiplication_implicite();
        self.elements.push(Element::Fonction(f));
        self.elements.push(Element::ParG);
        self.contexte = Some(ContexteFonction {
            argument: String::new(),
        });
        self.etat = Etat::ArgumentFonction;
    }

    /// Valide le contexte actif : argument vide => 0, puis ')'.
    /// Aucune évaluation ici — le pipeline s'en charge plus tard.
    pub fn terminer_fonction(&mut self) {
        if let Some(ctx) = self.contexte.take() {
            let argument = if ctx.argument.is_empty() {
                "0".to_string()
            } else {
                ctx.argument
            };
            self.elements.push(Element::Nombre(argument));
            self.elements.push(Element::ParD);
            self.etat = Etat::Saisie;
        }
    }

    /// Accès au texte de l'argument actif (commandes unaires du moteur).
    pub fn argument_actif_mut(&mut self) -> Option<&mut String> {
        self.contexte.as_mut().map(|ctx| &mut ctx.argument)
    }

    /// Accès au dernier nombre validé (commandes unaires du moteur).
    pub fn dernier_nombre_mut(&mut self) -> Option<&mut String> {
        match self.elements.last_mut() {
            Some(Element::Nombre(n)) => Some(n),
            _ => None,
        }
    }

    /* ------------------------ Effacements ------------------------ */

    pub fn retour_arriere(&mut self) {
        self.sortir_erreur();

        // sur un résultat : retour arrière = effacement complet
        if self.etat == Etat::ResultatAffiche {
            self.tout_effacer();
            return;
        }

        if let Some(ctx) = &mut self.contexte {
            if ctx.argument.is_empty() {
                // sortie du mode fonction : on retire "nom(" du tampon
                self.elements.pop(); // ParG
                self.elements.pop(); // Fonction
                self.contexte = None;
                self.etat = Etat::Saisie;
            } else {
                ctx.argument.pop();
            }
            return;
        }

        match self.elements.last_mut() {
            Some(Element::Nombre(n)) => {
                n.pop();
                if n.is_empty() {
                    self.elements.pop();
                    if self.elements.is_empty() {
                        self.elements.push(Element::Nombre("0".to_string()));
                    }
                }
            }
            Some(_) => {
                self.elements.pop();
            }
            None => {}
        }
    }

    /// CE : vide l'argument actif, sinon retire le dernier élément tapé
    /// (nombre, opérateur ou parenthèse) en laissant le reste intact.
    pub fn effacer_saisie(&mut self) {
        self.sortir_erreur();

        if self.etat == Etat::ResultatAffiche {
            self.tout_effacer();
            return;
        }

        if let Some(ctx) = &mut self.contexte {
            ctx.argument.clear();
            return;
        }

        self.elements.pop();
    }

    pub fn tout_effacer(&mut self) {
        self.elements.clear();
        self.contexte = None;
        self.etat = Etat::Saisie;
    }

    /* ------------------------ Vues pour le moteur ------------------------ */

    /// Texte compact pour le pipeline d'évaluation (sans espaces).
    /// Le contexte actif est inclus tel quel (argument encore ouvert).
    pub fn texte_calcul(&self) -> String {
        let mut s = String::new();
        for e in &self.elements {
            match e {
                Element::Nombre(n) => s.push_str(n),
                Element::Operateur(op) => s.push(op.symbole()),
                Element::ParG => s.push('('),
                Element::ParD => s.push(')'),
                Element::Fonction(f) => s.push_str(f.nom()),
            }
        }
        if let Some(ctx) = &self.contexte {
            s.push_str(&ctx.argument);
        }
        s
    }

    /// Texte lisible pour l'affichage (opérateurs entourés d'espaces).
    pub fn texte_affichage(&self) -> String {
        let mut s = String::new();
        for e in &self.elements {
            match e {
                Element::Nombre(n) => s.push_str(n),
                Element::Operateur(op) => {
                    s.push(' ');
                    s.push(op.symbole());
                    s.push(' ');
                }
                Element::ParG => s.push('('),
                Element::ParD => s.push(')'),
                Element::Fonction(f) => s.push_str(f.nom()),
            }
        }
        if let Some(ctx) = &self.contexte {
            s.push_str(&ctx.argument);
        }
        // un opérateur traînant ne laisse pas d'espace pendouillant à l'écran
        while s.ends_with(' ') {
            s.pop();
        }
        s
    }

    /// Invariant '(' ≥ ')' — l'égalité est exigée au "=".
    pub fn compte_parentheses(&self) -> (usize, usize) {
        let mut g = 0usize;
        let mut d = 0usize;
        for e in &self.elements {
            match e {
                Element::ParG => g += 1,
                Element::ParD => d += 1,
                _ => {}
            }
        }
        (g, d)
    }

    /// Le tampon finit-il sur un opérateur ? (complétion "0" de l'aperçu,
    /// refus du "=").
    pub fn finit_sur_operateur(&self) -> bool {
        self.contexte.is_none() && matches!(self.elements.last(), Some(Element::Operateur(_)))
    }

    /// Remplace tout le tampon par un résultat validé.
    pub fn poser_resultat(&mut self, texte: String) {
        self.elements.clear();
        self.elements.push(Element::Nombre(texte));
        self.contexte = None;
        self.etat = Etat::ResultatAffiche;
    }

    pub fn marquer_erreur(&mut self) {
        self.elements.clear();
        self.contexte = None;
        self.etat = Etat::Erreur;
    }
}
