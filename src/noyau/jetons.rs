// src/noyau/jetons.rs

use super::erreur::ErreurCalc;

/// Opérateurs binaires reconnus, avec leur glyphe d'affichage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Plus,
    Moins,
    Fois,
    Divise,
    Modulo,
    Puissance,
}

impl Op {
    pub fn symbole(self) -> char {
        match self {
            Op::Plus => '+',
            Op::Moins => '-',
            Op::Fois => '×',
            Op::Divise => '÷',
            Op::Modulo => '%',
            Op::Puissance => '^',
        }
    }

    pub fn depuis_symbole(c: char) -> Option<Op> {
        match c {
            '+' => Some(Op::Plus),
            '-' => Some(Op::Moins),
            '×' => Some(Op::Fois),
            '÷' => Some(Op::Divise),
            '%' => Some(Op::Modulo),
            '^' => Some(Op::Puissance),
            _ => None,
        }
    }

    /// Paliers: +,- = 1 ; ×,÷,% = 2 ; ^ = 3.
    /// Tous les opérateurs sont associatifs à GAUCHE, ^ compris
    /// (choix normatif: 2^3^2 = (2^3)^2 = 64).
    pub fn precedence(self) -> u8 {
        match self {
            Op::Plus | Op::Moins => 1,
            Op::Fois | Op::Divise | Op::Modulo => 2,
            Op::Puissance => 3,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Jeton {
    Nombre(String),
    Operateur(Op),
    ParG,
    ParD,
}

/// Tokenize une chaîne entièrement substituée (constantes déjà remplacées
/// par leur texte décimal, appels de fonctions déjà résolus en amont).
///
/// Règles:
/// - chiffres et '.' s'accumulent dans un jeton Nombre
/// - 'e'/'E' est absorbé dans le nombre courant seulement si un chiffre a déjà
///   été accumulé ET que le caractère suivant est un chiffre ou un signe +/-
///   explicite (notation scientifique)
/// - '-' est un signe (partie du nombre) en début de chaîne, après '(' ou
///   après un opérateur ; ailleurs c'est une soustraction binaire
/// - + - × ÷ % ^ ( ) sont émis tels quels, après flush du nombre en cours
/// - tout autre caractère => ExpressionMalFormee
pub fn jetonniser(s: &str) -> Result<Vec<Jeton>, ErreurCalc> {
    let chars: Vec<char> = s.chars().collect();
    let mut out: Vec<Jeton> = Vec::new();
    let mut nombre = String::new();

    let mut i: usize = 0;
    while i < chars.len() {
        let c = chars[i];

        // Chiffres et point: accumulation
        if c.is_ascii_digit() || c == '.' {
            nombre.push(c);
            i += 1;
            continue;
        }

        // Notation scientifique: e/E absorbé si nombre commencé + suite valide
        if (c == 'e' || c == 'E') && nombre.chars().any(|d| d.is_ascii_digit()) {
            let suivant = chars.get(i + 1).copied();
            if matches!(suivant, Some(d) if d.is_ascii_digit() || d == '+' || d == '-') {
                nombre.push(c);
                i += 1;

                // signe explicite de l'exposant
                if matches!(chars.get(i), Some('+') | Some('-')) {
                    nombre.push(chars[i]);
                    i += 1;
                }

                // chiffres de l'exposant
                while i < chars.len() && chars[i].is_ascii_digit() {
                    nombre.push(chars[i]);
                    i += 1;
                }
                continue;
            }
            // e/E hors contexte d'exposant: rejeté à cette couche
            return Err(ErreurCalc::ExpressionMalFormee);
        }

        // Moins unaire: début de chaîne, après '(' ou après un opérateur
        if c == '-' && nombre.is_empty() {
            let precedent = if i == 0 { None } else { Some(chars[i - 1]) };
            let signe = match precedent {
                None => true,
                Some('(') => true,
                Some(p) => Op::depuis_symbole(p).is_some(),
            };
            if signe {
                nombre.push(c);
                i += 1;
                continue;
            }
        }

        // Fin du nombre en cours
        if !nombre.is_empty() {
            out.push(Jeton::Nombre(std::mem::take(&mut nombre)));
        }

        if c == '(' {
            out.push(Jeton::ParG);
            i += 1;
            continue;
        }
        if c == ')' {
            out.push(Jeton::ParD);
            i += 1;
            continue;
        }

        if let Some(op) = Op::depuis_symbole(c) {
            out.push(Jeton::Operateur(op));
            i += 1;
            continue;
        }

        return Err(ErreurCalc::ExpressionMalFormee);
    }

    if !nombre.is_empty() {
        out.push(Jeton::Nombre(nombre));
    }

    Ok(out)
}
