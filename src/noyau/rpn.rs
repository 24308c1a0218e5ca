// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> AST
// Objectif:
// - Convertir une suite de Tok en RPN (postfix)
// - Puis reconstruire Expr (une seule fois, évaluée ensuite par Expr::eval)
//
// Règles:
// - deux étages de précédence : {* / ^ %} au-dessus de {+ -}, tout associatif à gauche
//   (2^3^2 = 64, 2*3^2 = 36)
// - Ident(name): fonction connue, OBLIGATOIREMENT suivie de '(' ; sinon erreur
// - Moins unaire (début, après '(' ou après un opérateur) : opérateur préfixe qui lie
//   plus fort que tout binaire (le signe fait partie de l’opérande)
// - '!' postfixé : lie le plus fort, sort directement en RPN
// - pas de multiplication implicite : "2(3)", "2pi", "2 3" sont refusés
//
// NOTE:
// - Les fonctions restent sur la pile jusqu’à la parenthèse fermante de leur argument.

use super::appels::Fonction;
use super::erreur::ErreurCalc;
use super::expr::{Expr, OpBinaire, OpUnaire};
use super::jetons::Tok;

/// Garde-fou : profondeur de parenthèses (évite une pile d’appels énorme à l’évaluation).
pub const PROFONDEUR_MAX: usize = 256;

/// Élément de sortie RPN.
#[derive(Clone, Debug, PartialEq)]
pub enum ElemRpn {
    Nombre(f64),
    Pi,
    E,
    Binaire(OpBinaire),
    Neg,
    Fact,
    Appel(Fonction),
}

/// Élément de la pile d’opérateurs.
#[derive(Clone, Copy, Debug)]
enum Pile {
    LPar,
    Neg,
    Appel(Fonction),
    Binaire(OpBinaire),
}

fn op_binaire(t: &Tok) -> Option<OpBinaire> {
    match t {
        Tok::Plus => Some(OpBinaire::Add),
        Tok::Minus => Some(OpBinaire::Sub),
        Tok::Star => Some(OpBinaire::Mul),
        Tok::Slash => Some(OpBinaire::Div),
        Tok::Caret => Some(OpBinaire::Pow),
        Tok::Percent => Some(OpBinaire::Rem),
        _ => None,
    }
}

fn malforme(msg: impl Into<String>) -> ErreurCalc {
    ErreurCalc::Malforme(msg.into())
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Ident("sin"), LPar, Pi, Slash, Num(2), RPar]
///   rpn:    [Pi, Nombre(2), Binaire(Div), Appel(Sin)]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<ElemRpn>, ErreurCalc> {
    let mut out: Vec<ElemRpn> = Vec::with_capacity(tokens.len());
    let mut ops: Vec<Pile> = Vec::new();

    // “valeur” = un atome ou une expression fermée.
    // Sert à distinguer signe / opérateur binaire, et à refuser la juxtaposition.
    let mut prev_was_value = false;
    let mut profondeur: usize = 0;

    for (i, tok) in tokens.iter().enumerate() {
        match tok {
            Tok::Num(_) | Tok::Pi | Tok::E => {
                if prev_was_value {
                    return Err(malforme(format!("opérande inattendu en position {i}")));
                }
                out.push(match tok {
                    Tok::Num(v) => ElemRpn::Nombre(*v),
                    Tok::Pi => ElemRpn::Pi,
                    _ => ElemRpn::E,
                });
            }

            Tok::Ident(name) => {
                let f = Fonction::depuis_nom(name)
                    .ok_or_else(|| ErreurCalc::FonctionInconnue(name.clone()))?;
                if prev_was_value {
                    return Err(malforme(format!("{name} sans opérateur devant")));
                }
                if !matches!(tokens.get(i + 1), Some(Tok::LPar)) {
                    return Err(malforme(format!("{name} attend une parenthèse")));
                }
                // fonction : on la garde sur la pile (elle sortira après son argument)
                ops.push(Pile::Appel(f));
            }

            Tok::LPar => {
                if prev_was_value {
                    return Err(malforme(format!("'(' sans opérateur devant (position {i})")));
                }
                profondeur += 1;
                if profondeur > PROFONDEUR_MAX {
                    return Err(malforme("parenthèses trop imbriquées"));
                }
                ops.push(Pile::LPar);
            }

            Tok::RPar => {
                if !prev_was_value {
                    return Err(malforme(format!("opérande manquant avant ')' (position {i})")));
                }

                // dépile jusqu’à '('
                let mut fermee = false;
                while let Some(top) = ops.pop() {
                    match top {
                        Pile::LPar => {
                            fermee = true;
                            break;
                        }
                        Pile::Neg => out.push(ElemRpn::Neg),
                        Pile::Binaire(op) => out.push(ElemRpn::Binaire(op)),
                        Pile::Appel(f) => out.push(ElemRpn::Appel(f)),
                    }
                }
                if !fermee {
                    return Err(malforme(format!("')' sans '(' (position {i})")));
                }
                profondeur -= 1;

                // si une fonction est au sommet, on la sort aussi
                if let Some(Pile::Appel(f)) = ops.last().copied() {
                    ops.pop();
                    out.push(ElemRpn::Appel(f));
                }
            }

            Tok::Bang => {
                if !prev_was_value {
                    return Err(malforme(format!("'!' sans opérande (position {i})")));
                }
                out.push(ElemRpn::Fact);
            }

            // signe
            Tok::Plus | Tok::Minus if !prev_was_value => {
                if matches!(tok, Tok::Minus) {
                    ops.push(Pile::Neg);
                }
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret | Tok::Percent => {
                if !prev_was_value {
                    return Err(malforme(format!(
                        "opérande gauche manquant (position {i})"
                    )));
                }
                let Some(op) = op_binaire(tok) else {
                    return Err(malforme(format!("opérateur inconnu (position {i})")));
                };

                // dépile tant que:
                // - on n'est pas bloqué par '(' ou une fonction
                // - le sommet est un signe (lie plus fort)
                // - ou un binaire de précédence >= (associativité gauche)
                while let Some(top) = ops.last().copied() {
                    match top {
                        Pile::Neg => out.push(ElemRpn::Neg),
                        Pile::Binaire(o) if o.precedence() >= op.precedence() => {
                            out.push(ElemRpn::Binaire(o))
                        }
                        _ => break,
                    }
                    ops.pop();
                }

                ops.push(Pile::Binaire(op));
            }
        }

        // Mise à jour commune de prev_was_value
        prev_was_value = matches!(
            tok,
            Tok::Num(_) | Tok::Pi | Tok::E | Tok::RPar | Tok::Bang
        );
    }

    if !tokens.is_empty() && !prev_was_value {
        return Err(malforme("opérande manquant en fin d’expression"));
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        match op {
            Pile::LPar => return Err(malforme("parenthèses non fermées")),
            Pile::Neg => out.push(ElemRpn::Neg),
            Pile::Binaire(o) => out.push(ElemRpn::Binaire(o)),
            Pile::Appel(f) => out.push(ElemRpn::Appel(f)),
        }
    }

    Ok(out)
}

/// Construit une Expr à partir d’une RPN.
pub fn from_rpn(rpn: &[ElemRpn]) -> Result<Expr, ErreurCalc> {
    let mut st: Vec<Expr> = Vec::with_capacity(rpn.len());

    for elem in rpn {
        match elem {
            ElemRpn::Nombre(v) => st.push(Expr::Nombre(*v)),
            ElemRpn::Pi => st.push(Expr::Pi),
            ElemRpn::E => st.push(Expr::E),

            ElemRpn::Binaire(op) => {
                let b = st.pop().ok_or_else(|| malforme("expression invalide"))?;
                let a = st.pop().ok_or_else(|| malforme("expression invalide"))?;
                st.push(Expr::binaire(*op, a, b));
            }

            ElemRpn::Neg | ElemRpn::Fact => {
                let x = st.pop().ok_or_else(|| malforme("opérateur sans opérande"))?;
                let op = if matches!(elem, ElemRpn::Neg) {
                    OpUnaire::Neg
                } else {
                    OpUnaire::Factorielle
                };
                st.push(Expr::unaire(op, x));
            }

            ElemRpn::Appel(f) => {
                let x = st.pop().ok_or_else(|| malforme("fonction sans argument"))?;
                st.push(Expr::appel(*f, x));
            }
        }
    }

    if st.len() != 1 {
        return Err(malforme("expression invalide"));
    }
    st.pop().ok_or_else(|| malforme("expression vide"))
}

/// Format utilitaire (démarche) : RPN en texte.
pub fn format_rpn(rpn: &[ElemRpn]) -> String {
    rpn.iter()
        .map(|e| match e {
            ElemRpn::Nombre(v) => format!("{v}"),
            ElemRpn::Pi => "π".to_string(),
            ElemRpn::E => "e".to_string(),
            ElemRpn::Binaire(op) => op.symbole().to_string(),
            ElemRpn::Neg => "neg".to_string(),
            ElemRpn::Fact => "!".to_string(),
            ElemRpn::Appel(f) => f.nom().to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
