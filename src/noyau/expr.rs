// src/noyau/expr.rs
//
// AST flottant (f64), construit une fois par rpn.rs puis évalué une fois.
// - Nombre : littéral décimal (signe éventuel déjà inclus)
// - Pi / E : constantes
// - Unaire : moins préfixe, factorielle postfixée
// - Binaire : + - * / ^ %
// - Appel : fonction scientifique (liste fermée)
//
// IMPORTANT:
// - eval() ne rend JAMAIS ∞ ni NaN : ∞ => Debordement, NaN => Domaine.
// - le contexte d’erreur est le sous-arbre fautif, réécrit en texte.

use std::f64::consts::PI;
use std::fmt;

use num_traits::ToPrimitive;
use tracing::trace;

use super::appels::{Fonction, ModeAngle};
use super::erreur::ErreurCalc;
use super::fonctions::{factorielle, gamma};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpBinaire {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    Rem,
}

impl OpBinaire {
    /// Deux étages seulement : {* / ^ %} au-dessus de {+ -}.
    pub fn precedence(self) -> u8 {
        match self {
            OpBinaire::Add | OpBinaire::Sub => 1,
            OpBinaire::Mul | OpBinaire::Div | OpBinaire::Pow | OpBinaire::Rem => 2,
        }
    }

    pub fn symbole(self) -> char {
        match self {
            OpBinaire::Add => '+',
            OpBinaire::Sub => '-',
            OpBinaire::Mul => '*',
            OpBinaire::Div => '/',
            OpBinaire::Pow => '^',
            OpBinaire::Rem => '%',
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpUnaire {
    Neg,
    Factorielle,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Nombre(f64),
    Pi,
    E,

    Unaire(OpUnaire, Box<Expr>),
    Binaire(OpBinaire, Box<Expr>, Box<Expr>),
    Appel(Fonction, Box<Expr>),
}

impl Expr {
    pub fn binaire(op: OpBinaire, g: Expr, d: Expr) -> Expr {
        Expr::Binaire(op, Box::new(g), Box::new(d))
    }

    pub fn unaire(op: OpUnaire, x: Expr) -> Expr {
        Expr::Unaire(op, Box::new(x))
    }

    pub fn appel(f: Fonction, x: Expr) -> Expr {
        Expr::Appel(f, Box::new(x))
    }

    fn est_atome(&self) -> bool {
        matches!(self, Expr::Nombre(v) if *v >= 0.0) || matches!(self, Expr::Pi | Expr::E)
    }

    /// Évaluation post-ordre (arguments d’abord, donc appels les plus internes d’abord).
    pub fn eval(&self, mode: ModeAngle) -> Result<f64, ErreurCalc> {
        use Expr::*;

        let v = match self {
            Nombre(v) => *v,
            Pi => PI,
            E => std::f64::consts::E,

            Unaire(OpUnaire::Neg, x) => -x.eval(mode)?,

            Unaire(OpUnaire::Factorielle, x) => {
                let n = x.eval(mode)?;
                if n.fract() == 0.0 {
                    // hors i64 : saturation, factorielle tranche (négatif / trop grand)
                    let k = n.to_i64().unwrap_or(if n < 0.0 { i64::MIN } else { i64::MAX });
                    factorielle(k)?
                } else {
                    // n! = Γ(n+1) hors des entiers
                    gamma(n + 1.0)?
                }
            }

            Binaire(op, g, d) => {
                let a = g.eval(mode)?;
                let b = d.eval(mode)?;
                match op {
                    OpBinaire::Add => a + b,
                    OpBinaire::Sub => a - b,
                    OpBinaire::Mul => a * b,
                    OpBinaire::Div => {
                        if b == 0.0 {
                            return Err(ErreurCalc::DivisionParZero(self.to_string()));
                        }
                        a / b
                    }
                    OpBinaire::Rem => {
                        if b == 0.0 {
                            return Err(ErreurCalc::DivisionParZero(self.to_string()));
                        }
                        a % b
                    }
                    OpBinaire::Pow => {
                        // 0^(-n) = 1/0
                        if a == 0.0 && b < 0.0 {
                            return Err(ErreurCalc::DivisionParZero(self.to_string()));
                        }
                        a.powf(b)
                    }
                }
            }

            Appel(f, x) => f.appliquer(x.eval(mode)?, mode)?,
        };

        if v.is_nan() {
            return Err(ErreurCalc::Domaine(self.to_string()));
        }
        if v.is_infinite() {
            return Err(ErreurCalc::Debordement(self.to_string()));
        }

        trace!(noeud = %self, valeur = v, "eval");
        Ok(v)
    }
}

/// Écriture compacte, parenthèses seulement autour des sous-expressions composées.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn sous(f: &mut fmt::Formatter<'_>, e: &Expr) -> fmt::Result {
            if e.est_atome() || matches!(e, Expr::Appel(_, _)) {
                write!(f, "{e}")
            } else {
                write!(f, "({e})")
            }
        }

        match self {
            Expr::Nombre(v) => write!(f, "{v}"),
            Expr::Pi => write!(f, "π"),
            Expr::E => write!(f, "e"),
            Expr::Unaire(OpUnaire::Neg, x) => {
                write!(f, "-")?;
                sous(f, x)
            }
            Expr::Unaire(OpUnaire::Factorielle, x) => {
                sous(f, x)?;
                write!(f, "!")
            }
            Expr::Binaire(op, g, d) => {
                sous(f, g)?;
                write!(f, " {} ", op.symbole())?;
                sous(f, d)
            }
            Expr::Appel(fun, x) => write!(f, "{}({x})", fun.nom()),
        }
    }
}
