// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Écran : expression en cours + aperçu (ou résultat) + erreur éventuelle
// - Tactile : gros boutons, grille fixe
// - Clavier : chiffres/opérateurs via Event::Text, Enter = "=",
//   Backspace = retour arrière (pas de TextEdit ici, donc pas de
//   double déclenchement possible)
//
// Note :
// - PAS de Key::NumEnter (n'existe pas dans egui 0.33.x)

use eframe::egui;

use super::etat::{AppCalc, Commande};
use crate::noyau::jetons::Op;
use crate::noyau::{Constante, Fonction, ModeAngle};

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        // Densité “calc”
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        self.clavier(ui);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                self.ui_ecran(ui);

                ui.add_space(6.0);

                self.ui_barre_etat(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                if self.scientifique() {
                    self.ui_pave_scientifique(ui);
                    ui.add_space(6.0);
                }

                self.ui_pave_principal(ui);

                ui.add_space(8.0);
                ui.separator();

                self.ui_historique(ui);
            });
    }

    /* ------------------------ Écran ------------------------ */

    fn ui_ecran(&mut self, ui: &mut egui::Ui) {
        // ligne d'expression (peut être vide)
        Self::champ_monospace(ui, "ecran_expression", &self.affichage.expression, 1);

        // aperçu / résultat : gros, aligné à droite
        let resultat = if self.affichage.resultat.is_empty() {
            " "
        } else {
            self.affichage.resultat.as_str()
        };
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.heading(egui::RichText::new(resultat).monospace().size(28.0));
                });
            });

        if !self.affichage.erreur.is_empty() {
            ui.colored_label(ui.visuals().error_fg_color, &self.affichage.erreur);
        }
    }

    fn ui_barre_etat(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            // mémoire
            self.bouton_etroit(ui, "MC", "Efface la mémoire", Commande::MemoireEffacer);
            self.bouton_etroit(ui, "MR", "Rappelle la mémoire", Commande::MemoireRappeler);
            self.bouton_etroit(ui, "M+", "Ajoute le résultat à la mémoire", Commande::MemoireAjouter);
            self.bouton_etroit(ui, "M-", "Retire le résultat de la mémoire", Commande::MemoireSoustraire);
            self.bouton_etroit(ui, "MS", "Range le résultat en mémoire", Commande::MemoireRanger);
            if self.memoire_occupee() {
                ui.label("M");
            }

            if self.scientifique() {
                ui.separator();

                // mode d'angle (trig seulement)
                let mut mode = self.mode_angle();
                let avant = mode;
                ui.selectable_value(&mut mode, ModeAngle::Radians, "Rad");
                ui.selectable_value(&mut mode, ModeAngle::Degres, "Deg");
                if mode != avant {
                    self.regler_mode_angle(mode);
                }
            }
        });
    }

    /* ------------------------ Pavés ------------------------ */

    fn ui_pave_scientifique(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_scientifique")
            .num_columns(6)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                self.bouton(ui, "sin", Commande::Fonction(Fonction::Sin));
                self.bouton(ui, "cos", Commande::Fonction(Fonction::Cos));
                self.bouton(ui, "tan", Commande::Fonction(Fonction::Tan));
                self.bouton(ui, "ln", Commande::Fonction(Fonction::Ln));
                self.bouton(ui, "log", Commande::Fonction(Fonction::Log10));
                self.bouton(ui, "√", Commande::Fonction(Fonction::Racine));
                ui.end_row();

                self.bouton(ui, "asin", Commande::Fonction(Fonction::ArcSin));
                self.bouton(ui, "acos", Commande::Fonction(Fonction::ArcCos));
                self.bouton(ui, "atan", Commande::Fonction(Fonction::ArcTan));
                self.bouton(ui, "|x|", Commande::ValeurAbsolue);
                self.bouton(ui, "n!", Commande::Factorielle);
                self.bouton(ui, "EXP", Commande::NotationScientifique);
                ui.end_row();

                self.bouton(ui, "π", Commande::Constante(Constante::Pi));
                self.bouton(ui, "e", Commande::Constante(Constante::E));
                self.bouton(ui, "x^y", Commande::Operateur(Op::Puissance));
                self.bouton(ui, "mod", Commande::Operateur(Op::Modulo));
                self.bouton(ui, "x²", Commande::Carre);
                self.bouton(ui, "1/x", Commande::Inverse);
                ui.end_row();
            });
    }

    fn ui_pave_principal(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_principal")
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                self.bouton(ui, "C", Commande::ToutEffacer);
                self.bouton(ui, "CE", Commande::EffacerSaisie);
                self.bouton(ui, "⌫", Commande::RetourArriere);
                self.bouton(ui, "÷", Commande::Operateur(Op::Divise));
                ui.end_row();

                self.bouton(ui, "7", Commande::Chiffre('7'));
                self.bouton(ui, "8", Commande::Chiffre('8'));
                self.bouton(ui, "9", Commande::Chiffre('9'));
                self.bouton(ui, "×", Commande::Operateur(Op::Fois));
                ui.end_row();

                self.bouton(ui, "4", Commande::Chiffre('4'));
                self.bouton(ui, "5", Commande::Chiffre('5'));
                self.bouton(ui, "6", Commande::Chiffre('6'));
                self.bouton(ui, "-", Commande::Operateur(Op::Moins));
                ui.end_row();

                self.bouton(ui, "1", Commande::Chiffre('1'));
                self.bouton(ui, "2", Commande::Chiffre('2'));
                self.bouton(ui, "3", Commande::Chiffre('3'));
                self.bouton(ui, "+", Commande::Operateur(Op::Plus));
                ui.end_row();

                self.bouton(ui, "±", Commande::Signe);
                self.bouton(ui, "0", Commande::Chiffre('0'));
                self.bouton(ui, ".", Commande::Point);
                self.bouton(ui, "=", Commande::Egal);
                ui.end_row();

                self.bouton(ui, "(", Commande::ParentheseOuvrante);
                self.bouton(ui, ")", Commande::ParentheseFermante);
                self.bouton(ui, "%", Commande::Pourcent);
                if !self.scientifique() {
                    self.bouton(ui, "x²", Commande::Carre);
                } else {
                    ui.label("");
                }
                ui.end_row();
            });
    }

    /* ------------------------ Historique ------------------------ */

    fn ui_historique(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Historique")
            .default_open(false)
            .show(ui, |ui| {
                if self.historique().is_empty() {
                    ui.monospace("(vide)");
                    return;
                }
                // du plus récent au plus ancien
                for ligne in self.historique().iter().rev() {
                    ui.monospace(ligne);
                }
            });
    }

    /* ------------------------ Clavier ------------------------ */

    /// Clavier physique : chiffres + opérateurs via Event::Text,
    /// Enter = "=", Backspace = retour arrière, Delete = CE.
    fn clavier(&mut self, ui: &mut egui::Ui) {
        let mut commandes: Vec<Commande> = Vec::new();

        ui.input(|i| {
            for ev in &i.events {
                match ev {
                    egui::Event::Text(texte) => {
                        for c in texte.chars() {
                            if let Some(cmd) = Self::commande_du_caractere(c) {
                                commandes.push(cmd);
                            }
                        }
                    }
                    egui::Event::Key {
                        key, pressed: true, ..
                    } => match key {
                        egui::Key::Enter => commandes.push(Commande::Egal),
                        egui::Key::Backspace => commandes.push(Commande::RetourArriere),
                        egui::Key::Delete => commandes.push(Commande::EffacerSaisie),
                        _ => {}
                    },
                    _ => {}
                }
            }
        });

        for cmd in commandes {
            self.appliquer(cmd);
        }
    }

    fn commande_du_caractere(c: char) -> Option<Commande> {
        match c {
            '0'..='9' => Some(Commande::Chiffre(c)),
            '.' | ',' => Some(Commande::Point),
            '+' => Some(Commande::Operateur(Op::Plus)),
            '-' => Some(Commande::Operateur(Op::Moins)),
            '*' | '×' => Some(Commande::Operateur(Op::Fois)),
            '/' | '÷' => Some(Commande::Operateur(Op::Divise)),
            '^' => Some(Commande::Operateur(Op::Puissance)),
            '(' => Some(Commande::ParentheseOuvrante),
            ')' => Some(Commande::ParentheseFermante),
            '=' => Some(Commande::Egal),
            _ => None,
        }
    }

    /* ------------------------ Helpers boutons ------------------------ */

    fn bouton(&mut self, ui: &mut egui::Ui, label: &str, commande: Commande) {
        let resp = ui.add_sized([56.0, 34.0], egui::Button::new(label));
        if resp.clicked() {
            self.appliquer(commande);
        }
    }

    fn bouton_etroit(&mut self, ui: &mut egui::Ui, label: &str, tip: &str, commande: Commande) {
        let resp = ui
            .add_sized([40.0, 26.0], egui::Button::new(label))
            .on_hover_text(tip);
        if resp.clicked() {
            self.appliquer(commande);
        }
    }

    fn champ_monospace(ui: &mut egui::Ui, id: &str, contenu: &str, rows: usize) {
        // Affichage lecture seule “stable”, sans TextEdit interactif.
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.push_id(id, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.set_min_height(
                        rows as f32 * ui.text_style_height(&egui::TextStyle::Monospace),
                    );
                    ui.monospace(contenu);
                });
            });
    }
}
