// src/noyau/fonctions.rs
//
// Bibliothèque numérique (fonctions pures, sans état)
// ---------------------------------------------------
// - factorielle (produit itératif, bornée à 170!)
// - gamma (Lanczos g=7, 8 coefficients + réflexion pour x < 0.5)
// - nPr / nCr (composés depuis factorielle)
// - pgcd / ppcm (Euclide sur valeurs absolues)
// - conversion de base 2..=36

use std::f64::consts::PI;

use num_bigint::BigInt;
use num_traits::ToPrimitive;

use super::erreur::ErreurCalc;

/// Plus grand n tel que n! tienne dans un f64.
pub const FACTORIELLE_MAX: i64 = 170;

/// Coefficients de Lanczos (table fixe, ordre significatif).
#[allow(clippy::excessive_precision)]
const LANCZOS_G: [f64; 8] = [
    676.5203681218851,
    -1259.1392167224028,
    771.32342877765313,
    -176.61502916214059,
    12.507343278686905,
    -0.13857109526572012,
    9.9843695780195716e-6,
    1.5056327351493116e-7,
];

/// Terme constant de la série de Lanczos.
#[allow(clippy::excessive_precision)]
const LANCZOS_C0: f64 = 0.99999999999980993;

const BASE_MIN: u32 = 2;
const BASE_MAX: u32 = 36;

/* ------------------------ Factorielle / Gamma ------------------------ */

/// n! en flottant.
pub fn factorielle(n: i64) -> Result<f64, ErreurCalc> {
    if n < 0 {
        return Err(ErreurCalc::Domaine(format!("{n}!")));
    }
    if n > FACTORIELLE_MAX {
        return Err(ErreurCalc::Debordement(format!("{n}!")));
    }

    let mut acc = 1.0_f64;
    for k in 2..=n {
        acc *= k as f64;
    }
    Ok(acc)
}

/// Γ(x).
///
/// - entier positif : factorielle(x-1) exacte
/// - x < 0.5 : réflexion Γ(x) = π / (sin(πx)·Γ(1−x))
/// - sinon : approximation de Lanczos
///
/// Les pôles (0, -1, -2, ...) sont refusés.
pub fn gamma(x: f64) -> Result<f64, ErreurCalc> {
    if !x.is_finite() {
        return Err(ErreurCalc::Domaine(format!("Γ({x})")));
    }

    if x.fract() == 0.0 {
        if x > 0.0 {
            // au-delà de i64, factorielle refusera de toute façon
            let n = x.to_i64().unwrap_or(i64::MAX);
            return factorielle(n - 1);
        }
        return Err(ErreurCalc::Domaine(format!("Γ({x}) (pôle)")));
    }

    if x < 0.5 {
        let sin_pi_x = (PI * x).sin();
        return match gamma(1.0 - x) {
            // Γ(1−x) hors f64 : Γ(x) est un zéro signé, pas un débordement
            Err(ErreurCalc::Debordement(_)) => Ok(0.0_f64.copysign(sin_pi_x)),
            Err(_) => Err(ErreurCalc::Domaine(format!("Γ({x})"))),
            Ok(g) => fini(PI / (sin_pi_x * g), || format!("Γ({x})")),
        };
    }

    let y = x - 1.0;
    let mut somme = LANCZOS_C0;
    for (i, g) in LANCZOS_G.iter().enumerate() {
        somme += g / (y + (i + 1) as f64);
    }

    let t = y + LANCZOS_G.len() as f64 - 0.5;

    // ordre des produits conservé : √(2π) · (t^(y+½) · (e^(−t) · somme))
    let sqrt_2pi = (2.0 * PI).sqrt();
    let t_puissance = t.powf(y + 0.5);
    let exp_moins_t = (-t).exp();

    fini(sqrt_2pi * (t_puissance * (exp_moins_t * somme)), || {
        format!("Γ({x})")
    })
}

fn fini(v: f64, ctx: impl FnOnce() -> String) -> Result<f64, ErreurCalc> {
    if v.is_nan() {
        Err(ErreurCalc::Domaine(ctx()))
    } else if v.is_infinite() {
        Err(ErreurCalc::Debordement(ctx()))
    } else {
        Ok(v)
    }
}

/* ------------------------ Combinatoire ------------------------ */

fn verifie_nr(n: i64, r: i64, nom: &str) -> Result<(), ErreurCalc> {
    if n < 0 || r < 0 || r > n {
        return Err(ErreurCalc::Domaine(format!("{nom}({n}, {r})")));
    }
    Ok(())
}

/// nPr = n! / (n−r)!
pub fn permutation(n: i64, r: i64) -> Result<f64, ErreurCalc> {
    verifie_nr(n, r, "nPr")?;
    Ok(factorielle(n)? / factorielle(n - r)?)
}

/// nCr = n! / (r!·(n−r)!)
pub fn combinaison(n: i64, r: i64) -> Result<f64, ErreurCalc> {
    verifie_nr(n, r, "nCr")?;
    Ok(factorielle(n)? / (factorielle(r)? * factorielle(n - r)?))
}

/* ------------------------ PGCD / PPCM ------------------------ */

/// PGCD (Euclide) sur |a|, |b|. pgcd(0, 0) = 0.
pub fn pgcd(a: i64, b: i64) -> u64 {
    let mut x = a.unsigned_abs();
    let mut y = b.unsigned_abs();

    while y != 0 {
        let r = x % y;
        x = y;
        y = r;
    }
    x
}

/// PPCM. Vaut 0 dès qu’un des deux est nul.
pub fn ppcm(a: i64, b: i64) -> Result<u64, ErreurCalc> {
    if a == 0 || b == 0 {
        return Ok(0);
    }
    let g = pgcd(a, b);
    (a.unsigned_abs() / g)
        .checked_mul(b.unsigned_abs())
        .ok_or_else(|| ErreurCalc::Debordement(format!("ppcm({a}, {b})")))
}

/* ------------------------ Bases ------------------------ */

fn verifie_base(base: u32) -> Result<(), ErreurCalc> {
    if !(BASE_MIN..=BASE_MAX).contains(&base) {
        return Err(ErreurCalc::Domaine(format!(
            "base {base} (attendu {BASE_MIN}..={BASE_MAX})"
        )));
    }
    Ok(())
}

/// n écrit en base `base` (chiffres majuscules, signe '-' si négatif).
pub fn vers_base(n: i64, base: u32) -> Result<String, ErreurCalc> {
    verifie_base(base)?;
    Ok(BigInt::from(n).to_str_radix(base).to_uppercase())
}

/// Lit `s` écrit en base `base` (signe optionnel).
pub fn depuis_base(s: &str, base: u32) -> Result<i64, ErreurCalc> {
    verifie_base(base)?;

    let t = s.trim();
    let corps = t.strip_prefix(['-', '+']).unwrap_or(t);

    // parse_bytes tolère '_' : on reste strict
    if corps.is_empty() || !corps.chars().all(|c| c.is_digit(base)) {
        return Err(ErreurCalc::Malforme(format!("{s:?} en base {base}")));
    }

    let n = BigInt::parse_bytes(t.as_bytes(), base)
        .ok_or_else(|| ErreurCalc::Malforme(format!("{s:?} en base {base}")))?;

    n.to_i64()
        .ok_or_else(|| ErreurCalc::Debordement(format!("{s:?} en base {base}")))
}
