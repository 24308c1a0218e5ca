//! Noyau — évaluation (pipeline réel)
//!
//! normaliser -> jetons -> RPN -> Expr -> eval (post-ordre, une seule passe)
//!
//! Sans état : même entrée + même mode => même résultat ou même erreur.
//! Aucune erreur ne remonte autrement que par `ErreurCalc`.

use tracing::debug;

use super::appels::ModeAngle;
use super::erreur::ErreurCalc;
use super::expr::Expr;
use super::jetons::{format_tokens, tokenize};
use super::rpn::{format_rpn, from_rpn, to_rpn};

/// Garde-fou : nombre de jetons (une chaîne tapée à la main reste loin de cette borne).
pub const JETONS_MAX: usize = 1024;

#[derive(Default, Clone, Debug, PartialEq)]
pub struct DemarcheNoyau {
    pub jetons: String,
    pub rpn: String,
    pub arbre: String,
}

/// API publique : évalue une expression.
///
/// - entrée vide (ou blanche) => 0
/// - sinon un f64 FINI, ou la première erreur rencontrée
pub fn evaluer(expr_str: &str, mode: ModeAngle) -> Result<f64, ErreurCalc> {
    evaluer_avec_demarche(expr_str, mode).map(|(v, _d)| v)
}

/// Comme `evaluer`, mais rend aussi la démarche (jetons, RPN, arbre).
pub fn evaluer_avec_demarche(
    expr_str: &str,
    mode: ModeAngle,
) -> Result<(f64, DemarcheNoyau), ErreurCalc> {
    let s = expr_str.trim();
    if s.is_empty() {
        return Ok((0.0, DemarcheNoyau::default()));
    }

    let (expr, d) = analyser(s).inspect_err(|e| debug!(entree = s, erreur = %e, "analyse refusée"))?;

    let v = expr
        .eval(mode)
        .inspect_err(|e| debug!(entree = s, erreur = %e, "évaluation refusée"))?;

    debug!(entree = s, mode = mode.libelle(), valeur = v, "évalué");
    Ok((v, d))
}

/// Analyse seule (sans évaluer) : chaîne -> AST.
pub fn analyser(s: &str) -> Result<(Expr, DemarcheNoyau), ErreurCalc> {
    // 1) Jetons
    let jetons = tokenize(s)?;
    if jetons.len() > JETONS_MAX {
        return Err(ErreurCalc::Malforme(format!(
            "expression trop longue ({} jetons, max {JETONS_MAX})",
            jetons.len()
        )));
    }
    let jetons_txt = format_tokens(&jetons);
    debug!(jetons = %jetons_txt);

    // 2) RPN
    let rpn = to_rpn(&jetons)?;
    let rpn_txt = format_rpn(&rpn);
    debug!(rpn = %rpn_txt);

    // 3) AST
    let expr = from_rpn(&rpn)?;

    let d = DemarcheNoyau {
        jetons: jetons_txt,
        rpn: rpn_txt,
        arbre: expr.to_string(),
    };
    Ok((expr, d))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(s: &str, mode: ModeAngle) -> f64 {
        evaluer(s, mode).unwrap_or_else(|e| panic!("evaluer({s:?}) erreur: {e}"))
    }

    fn rad(s: &str) -> f64 {
        ok(s, ModeAngle::Radians)
    }

    fn proche(a: f64, b: f64) {
        if (a - b).abs() > 1e-9 {
            panic!("attendu {b}, obtenu {a}");
        }
    }

    #[test]
    fn vide_vaut_zero() {
        assert_eq!(rad(""), 0.0);
        assert_eq!(rad("   "), 0.0);
    }

    #[test]
    fn arithmetique() {
        assert_eq!(rad("2+3*4"), 14.0);
        assert_eq!(rad("(2+3)*4"), 20.0);
        assert_eq!(rad("10-4-3"), 3.0);
        assert_eq!(rad("2^10"), 1024.0);
        assert_eq!(rad("2^3^2"), 64.0);
        assert_eq!(rad("10%4"), 2.0);
        assert_eq!(rad("1.5*4"), 6.0);
        assert_eq!(rad(" 7 / 2 "), 3.5);
    }

    #[test]
    fn signes() {
        assert_eq!(rad("-3+5"), 2.0);
        assert_eq!(rad("5--3"), 8.0);
        assert_eq!(rad("2*-3"), -6.0);
        assert_eq!(rad("-(2+3)"), -5.0);
        assert_eq!(rad("-2^2"), 4.0);
        assert_eq!(rad("(-4)*(-2)"), 8.0);
    }

    #[test]
    fn glyphes() {
        assert_eq!(rad("6×7"), 42.0);
        assert_eq!(rad("9÷3"), 3.0);
        assert_eq!(rad("√(16)"), 4.0);
        proche(rad("π"), std::f64::consts::PI);
        proche(rad("ln(e)"), 1.0);
    }

    #[test]
    fn trig_et_mode() {
        proche(ok("sin(90)", ModeAngle::Degres), 1.0);
        proche(ok("sin(PI/2)", ModeAngle::Radians), 1.0);
        proche(ok("cos(180)", ModeAngle::Degres), -1.0);
        proche(ok("tan(45)", ModeAngle::Degres), 1.0);
        // hyperboliques : mode sans effet
        assert_eq!(
            ok("sinh(1)", ModeAngle::Degres),
            ok("sinh(1)", ModeAngle::Radians)
        );
    }

    #[test]
    fn fonctions_imbriquees() {
        proche(rad("sqrt(sqrt(16))"), 2.0);
        proche(rad("log(10^3)+ln(1)"), 3.0);
        proche(ok("sin(30)*2+sqrt(9)", ModeAngle::Degres), 4.0);
    }

    #[test]
    fn factorielles() {
        assert_eq!(rad("3!"), 6.0);
        assert_eq!(rad("3!!"), 720.0);
        assert_eq!(rad("0!"), 1.0);
        assert_eq!(rad("2+3!*2"), 14.0);
        assert!(matches!(
            evaluer("-1!", ModeAngle::Radians),
            Err(ErreurCalc::Domaine(_))
        ));
        assert!(matches!(
            evaluer("171!", ModeAngle::Radians),
            Err(ErreurCalc::Debordement(_))
        ));
    }

    #[test]
    fn erreurs_classees() {
        let m = ModeAngle::Radians;
        assert!(matches!(evaluer("5/0", m), Err(ErreurCalc::DivisionParZero(_))));
        assert!(matches!(evaluer("5%0", m), Err(ErreurCalc::DivisionParZero(_))));
        assert!(matches!(evaluer("ln(0)", m), Err(ErreurCalc::Domaine(_))));
        assert!(matches!(evaluer("sqrt(-1)", m), Err(ErreurCalc::Domaine(_))));
        assert!(matches!(evaluer("foo(1)", m), Err(ErreurCalc::FonctionInconnue(_))));
        assert!(matches!(evaluer("(1+2", m), Err(ErreurCalc::Malforme(_))));
        assert!(matches!(evaluer("1+", m), Err(ErreurCalc::Malforme(_))));
    }

    #[test]
    fn contexte_de_l_erreur() {
        let e = evaluer("1 + 8/(2-2)", ModeAngle::Radians).unwrap_err();
        assert_eq!(e, ErreurCalc::DivisionParZero("8 / (2 - 2)".to_string()));
    }

    #[test]
    fn demarche_remplie() {
        let (v, d) = evaluer_avec_demarche("2+sin(0)", ModeAngle::Radians).unwrap();
        assert_eq!(v, 2.0);
        assert_eq!(d.jetons, "2 + sin ( 0 )");
        assert_eq!(d.rpn, "2 0 sin +");
        assert_eq!(d.arbre, "2 + sin(0)");
    }

    #[test]
    fn trop_de_jetons() {
        let s = vec!["1"; JETONS_MAX].join("+");
        assert!(matches!(
            evaluer(&s, ModeAngle::Radians),
            Err(ErreurCalc::Malforme(_))
        ));
    }
}
