//! Tests scientifiques (campagne) : propriétés du noyau, de bout en bout.
//!
//! - factorielle / Γ : récurrence, bornes, √π
//! - précédence, parenthèses, mode d’angle
//! - classement des erreurs
//! - idempotence : relire le texte d’un résultat redonne la même valeur

use std::f64::consts::PI;
use std::time::{Duration, Instant};

use super::erreur::ErreurCalc;
use super::fonctions::{combinaison, factorielle, gamma, pgcd, permutation, ppcm};
use super::format::formater_nombre;
use super::{evaluer, ModeAngle};

fn eval_ok(expr: &str, mode: ModeAngle) -> f64 {
    evaluer(expr, mode).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

fn assert_proche(expr: &str, mode: ModeAngle, attendu: f64, tol: f64) {
    let v = eval_ok(expr, mode);
    assert!(
        (v - attendu).abs() <= tol,
        "expr={expr:?} attendu={attendu} obtenu={v}"
    );
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Bibliothèque numérique ------------------------ */

#[test]
fn sci_factorielle_recurrence_complete() {
    assert_eq!(factorielle(0).unwrap(), 1.0);
    for n in 1..=170 {
        assert_eq!(
            factorielle(n).unwrap(),
            n as f64 * factorielle(n - 1).unwrap(),
            "n={n}"
        );
    }
    assert!(matches!(factorielle(171), Err(ErreurCalc::Debordement(_))));
}

#[test]
fn sci_gamma_prolonge_factorielle() {
    for x in 1..=171_i64 {
        let g = gamma(x as f64).unwrap();
        let f = factorielle(x - 1).unwrap();
        assert!((g - f).abs() <= 1e-9 * f, "x={x}");
    }
    assert!((gamma(0.5).unwrap() - PI.sqrt()).abs() < 1e-6);
}

#[test]
fn sci_combinatoire_et_arithmetique() {
    assert_eq!(combinaison(5, 2).unwrap(), 10.0);
    assert_eq!(permutation(5, 2).unwrap(), 20.0);
    assert!(matches!(combinaison(5, 7), Err(ErreurCalc::Domaine(_))));
    assert_eq!(pgcd(12, 18), 6);
    assert_eq!(ppcm(4, 6).unwrap(), 12);
    assert_eq!(ppcm(0, 5).unwrap(), 0);
}

/* ------------------------ Moteur ------------------------ */

#[test]
fn sci_precedence_et_parentheses() {
    let m = ModeAngle::Radians;
    assert_eq!(eval_ok("2+3*4", m), 14.0);
    assert_eq!(eval_ok("(2+3)*4", m), 20.0);
    // ^ et % partagent l’étage de * et / (gauche à droite)
    assert_eq!(eval_ok("2*3^2", m), 36.0);
    assert_eq!(eval_ok("17%5*2", m), 4.0);
    assert_eq!(eval_ok("((1+2)*(3+4))-(5)", m), 16.0);
}

#[test]
fn sci_trig_selon_mode() {
    assert_proche("sin(90)", ModeAngle::Degres, 1.0, 1e-12);
    assert_proche("sin(PI/2)", ModeAngle::Radians, 1.0, 1e-12);
    assert_proche("cos(0)+cos(360)", ModeAngle::Degres, 2.0, 1e-12);
    assert_proche("tan(π/4)", ModeAngle::Radians, 1.0, 1e-12);
}

#[test]
fn sci_factorielle_dans_expression() {
    let m = ModeAngle::Radians;
    assert_eq!(eval_ok("3!", m), 6.0);
    assert_eq!(eval_ok("5!/3!", m), 20.0);
    assert!(matches!(evaluer("-1!", m), Err(ErreurCalc::Domaine(_))));
    // hors des entiers : Γ(n+1)
    assert_proche("0.5!", m, PI.sqrt() / 2.0, 1e-9);
    // Γ(−150.5) : réflexion au-delà de f64, résultat fini quasi nul
    assert_proche("(-151.5)!", m, 0.0, 1e-200);
}

#[test]
fn sci_erreurs_classees() {
    let m = ModeAngle::Radians;
    assert!(matches!(evaluer("5/0", m), Err(ErreurCalc::DivisionParZero(_))));
    assert!(matches!(evaluer("log(0)", m), Err(ErreurCalc::Domaine(_))));
    assert!(matches!(evaluer("ln(-1)", m), Err(ErreurCalc::Domaine(_))));
    assert!(matches!(evaluer("10^400", m), Err(ErreurCalc::Debordement(_))));
    assert!(matches!(evaluer("cosh(1000)", m), Err(ErreurCalc::Debordement(_))));
    assert!(matches!(evaluer("atan(1)", m), Err(ErreurCalc::FonctionInconnue(_))));
    assert!(matches!(evaluer("2*(3+", m), Err(ErreurCalc::Malforme(_))));
    assert!(matches!(evaluer("4 4", m), Err(ErreurCalc::Malforme(_))));
}

#[test]
fn sci_determinisme() {
    for s in ["sin(30)+2!", "1/7", "5/0", "foo(2)", "sqrt(2)^2"] {
        for mode in [ModeAngle::Degres, ModeAngle::Radians] {
            assert_eq!(evaluer(s, mode), evaluer(s, mode), "expr={s:?}");
        }
    }
}

#[test]
fn sci_idempotence_du_texte() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let cas = [
        "2+3*4",
        "1/3",
        "-7/9",
        "sin(1)",
        "PI*e",
        "sqrt(2)",
        "ln(10)/log(2)",
        "0.1+0.2",
        "2^0.5*-3",
        "1/3000000",
        "170!",
        "1/170!",
    ];

    for s in cas {
        let v = eval_ok(s, ModeAngle::Radians);
        let txt = formater_nombre(v, None);
        let relu = eval_ok(&txt, ModeAngle::Radians);
        assert_eq!(relu, v, "expr={s:?} txt={txt:?}");
        budget(t0, max);
    }
}
