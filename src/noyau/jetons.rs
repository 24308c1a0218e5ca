// src/noyau/jetons.rs

use lazy_static::lazy_static;
use regex::Regex;

use super::erreur::ErreurCalc;

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(f64),
    Pi,
    E,

    // Fonctions (tout identifiant qui n’est ni pi ni e)
    // NOTE: le parse (RPN->Expr) décidera si le nom est connu.
    Ident(String),

    Plus,
    Minus,
    Star,
    Slash,
    Caret,   // ^
    Percent, // % (reste flottant)
    Bang,    // ! (factorielle postfixée)

    LPar,
    RPar,
}

impl Tok {
    /// Opérateur binaire (ou signe, pour + et -).
    pub fn est_operateur(&self) -> bool {
        matches!(
            self,
            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret | Tok::Percent
        )
    }
}

lazy_static! {
    /// Littéral décimal : 12, 12.5, 12., .5 (pas de notation scientifique : `e` reste la constante).
    static ref NOMBRE: Regex = Regex::new(r"^(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)").unwrap();

    /// Identifiant ASCII : [a-zA-Z_][a-zA-Z0-9_]*
    static ref IDENT: Regex = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*").unwrap();
}

/// Remplace les glyphes d’affichage par leur forme ASCII.
/// (× -> *, ÷ -> /, − -> -)
pub fn normaliser(s: &str) -> String {
    s.replace('×', "*").replace('÷', "/").replace('−', "-")
}

/// Vrai si un '+'/'-' arrivant maintenant est un SIGNE (début, après '(' ou après un opérateur).
fn position_de_signe(out: &[Tok]) -> bool {
    match out.last() {
        None => true,
        Some(t) => matches!(t, Tok::LPar) || t.est_operateur(),
    }
}

/// Tokenize une chaîne (déjà normalisée ou non) en jetons.
/// Supporte:
/// - décimaux (ex: 12, 3.25, .5)
/// - signe collé à un littéral en position de signe : "-1!" => Num(-1), Bang
/// - opérateurs + - * / ^ % et factorielle postfixée !
/// - parenthèses ( )
/// - π / pi / PI, e / E
/// - √ (équivaut à ident("sqrt"))
/// - identifiants [a-zA-Z_][a-zA-Z0-9_]* (normalisés en minuscules)
pub fn tokenize(s: &str) -> Result<Vec<Tok>, ErreurCalc> {
    let s = normaliser(s);
    let mut out: Vec<Tok> = Vec::new();
    let mut i: usize = 0;

    while i < s.len() {
        let reste = &s[i..];
        let Some(c) = reste.chars().next() else {
            break;
        };

        if c.is_whitespace() {
            i += c.len_utf8();
            continue;
        }

        // Signe collé à un littéral : il fait partie de l’opérande
        if (c == '-' || c == '+') && position_de_signe(&out) {
            if let Some(m) = NOMBRE.find(&reste[1..]) {
                let txt = &reste[1..1 + m.end()];
                let v = lire_nombre(txt)?;
                out.push(Tok::Num(if c == '-' { -v } else { v }));
                i += 1 + m.end();
                continue;
            }
        }

        let simple = match c {
            '(' => Some(Tok::LPar),
            ')' => Some(Tok::RPar),
            '+' => Some(Tok::Plus),
            '-' => Some(Tok::Minus),
            '*' => Some(Tok::Star),
            '/' => Some(Tok::Slash),
            '^' => Some(Tok::Caret),
            '%' => Some(Tok::Percent),
            '!' => Some(Tok::Bang),
            'π' => Some(Tok::Pi),
            '√' => Some(Tok::Ident("sqrt".to_string())),
            _ => None,
        };
        if let Some(t) = simple {
            out.push(t);
            i += c.len_utf8();
            continue;
        }

        if let Some(m) = NOMBRE.find(reste) {
            out.push(Tok::Num(lire_nombre(m.as_str())?));
            i += m.end();
            continue;
        }

        if let Some(m) = IDENT.find(reste) {
            let w = m.as_str().to_lowercase();
            out.push(match w.as_str() {
                "pi" => Tok::Pi,
                "e" => Tok::E,
                _ => Tok::Ident(w),
            });
            i += m.end();
            continue;
        }

        return Err(ErreurCalc::Malforme(format!(
            "caractère inattendu '{c}' en position {i}"
        )));
    }

    Ok(out)
}

fn lire_nombre(txt: &str) -> Result<f64, ErreurCalc> {
    txt.parse::<f64>()
        .map_err(|_| ErreurCalc::Malforme(format!("nombre invalide : {txt}")))
}

/// Format utilitaire (démarche) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    let mut out = Vec::with_capacity(tokens.len());
    for t in tokens {
        let s = match t {
            Tok::Num(v) => format!("{v}"),
            Tok::Pi => "π".to_string(),
            Tok::E => "e".to_string(),
            Tok::Ident(name) => name.clone(),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::Caret => "^".to_string(),
            Tok::Percent => "%".to_string(),
            Tok::Bang => "!".to_string(),

            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
