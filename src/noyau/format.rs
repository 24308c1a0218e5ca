// src/noyau/format.rs
//
// Affichage d’un résultat (frontière de présentation, hors évaluateur).
// - entier “visible” => pas de point décimal
// - décimales coupées puis zéros de fin retirés
// - fraction approchée par fractions continues (ε = 1e-10, 100 tours, dénominateur < 10000)

use num_rational::Rational64;
use num_traits::One;

const FRACTION_EPSILON: f64 = 1e-10;
const FRACTION_TOURS_MAX: usize = 100;
const FRACTION_DENOM_MAX: i64 = 10_000;

/// Au-delà, `v as i64` perdrait le sens : on laisse l’affichage flottant.
const ENTIER_AFFICHABLE_MAX: f64 = 1e15;

/// Texte d’un résultat.
///
/// - `decimales = None` : écriture exacte la plus courte (relue à l’identique par `evaluer`)
/// - `decimales = Some(n)` : arrondi à n décimales, zéros de fin retirés
pub fn formater_nombre(v: f64, decimales: Option<usize>) -> String {
    if v.fract() == 0.0 && v.abs() < ENTIER_AFFICHABLE_MAX {
        // -0 => "0"
        return format!("{}", v as i64);
    }

    let brut = match decimales {
        None => format!("{v}"),
        Some(n) => format!("{v:.n$}"),
    };

    let txt = if brut.contains('.') {
        brut.trim_end_matches('0').trim_end_matches('.')
    } else {
        brut.as_str()
    };

    match txt {
        "-0" | "" => "0".to_string(),
        t => t.to_string(),
    }
}

/// Fraction p/q approchant v (fractions continues).
/// None si aucune réduite de dénominateur < 10000 n’approche v à ε près.
pub fn approx_fraction(v: f64) -> Option<Rational64> {
    if !v.is_finite() || v.abs() >= ENTIER_AFFICHABLE_MAX {
        return None;
    }

    let signe: i64 = if v < 0.0 { -1 } else { 1 };
    let cible = v.abs();

    // réduites h/k : (h_{-2}, h_{-1}) = (0, 1), (k_{-2}, k_{-1}) = (1, 0)
    let (mut h0, mut h1): (i64, i64) = (0, 1);
    let (mut k0, mut k1): (i64, i64) = (1, 0);
    let mut x = cible;

    for _ in 0..FRACTION_TOURS_MAX {
        let a_f = x.floor();
        if a_f >= i64::MAX as f64 {
            return None;
        }
        let a = a_f as i64;

        let k2 = a.checked_mul(k1)?.checked_add(k0)?;
        if k2 >= FRACTION_DENOM_MAX {
            return None;
        }
        let h2 = a.checked_mul(h1)?.checked_add(h0)?;

        if (cible - h2 as f64 / k2 as f64).abs() < FRACTION_EPSILON {
            return Some(Rational64::new(signe * h2, k2));
        }

        let reste = x - a_f;
        if reste == 0.0 {
            return None;
        }
        x = 1.0 / reste;

        (h0, h1) = (h1, h2);
        (k0, k1) = (k1, k2);
    }

    None
}

/// "p/q", ou "p" si q = 1.
pub fn format_fraction(r: &Rational64) -> String {
    // le signe est toujours porté par le numérateur
    if r.denom().is_one() {
        format!("{}", r.numer())
    } else {
        format!("{}/{}", r.numer(), r.denom())
    }
}
