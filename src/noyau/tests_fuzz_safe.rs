//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - toute erreur est acceptée TANT QU’ELLE est classée (pas de panique)
//! - invariant clé : un succès est toujours un f64 fini, relu à l’identique

use std::time::{Duration, Instant};

use super::format::formater_nombre;
use super::{evaluer, ModeAngle};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_atome(rng: &mut Rng) -> String {
    match rng.pick(8) {
        0 => "pi".to_string(),
        1 => "e".to_string(),
        2 => format!("{}.{}", rng.pick(10), rng.pick(100)),
        3 => format!("{}!", rng.pick(8)),
        _ => format!("{}", rng.pick(20)),
    }
}

fn gen_expr(rng: &mut Rng, profondeur: u32) -> String {
    if profondeur == 0 {
        return gen_atome(rng);
    }

    match rng.pick(6) {
        0 => gen_atome(rng),
        1 => {
            let f = ["sin", "cos", "tan", "sinh", "cosh", "tanh", "ln", "log", "sqrt", "√"]
                [rng.pick(10) as usize];
            format!("{f}({})", gen_expr(rng, profondeur - 1))
        }
        2 => format!("({})", gen_expr(rng, profondeur - 1)),
        3 => format!("-{}", gen_expr(rng, profondeur - 1)),
        _ => {
            let op = ["+", "-", "*", "/", "^", "%", "×", "÷"][rng.pick(8) as usize];
            let a = gen_expr(rng, profondeur - 1);
            let b = gen_expr(rng, profondeur - 1);
            if rng.coin() {
                format!("{a}{op}{b}")
            } else {
                format!("{a} {op} {b}")
            }
        }
    }
}

/// Mutation brute : supprime / duplique un caractère (pour produire des entrées invalides).
fn muter(rng: &mut Rng, s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.is_empty() {
        return String::new();
    }
    let i = rng.pick(chars.len() as u32) as usize;
    let mut out: Vec<char> = chars.clone();
    if rng.coin() {
        out.remove(i);
    } else {
        out.insert(i, chars[i]);
    }
    out.into_iter().collect()
}

fn verifier(s: &str, mode: ModeAngle) {
    let r1 = evaluer(s, mode);
    let r2 = evaluer(s, mode);
    assert_eq!(r1, r2, "non déterministe: {s:?}");

    match r1 {
        Ok(v) => {
            assert!(v.is_finite(), "succès non fini pour {s:?}: {v}");
            let txt = formater_nombre(v, None);
            let relu = evaluer(&txt, mode)
                .unwrap_or_else(|e| panic!("relecture de {txt:?} (depuis {s:?}) : {e}"));
            assert_eq!(relu, v, "relecture différente pour {s:?}");
        }
        Err(e) => {
            // erreur classée, toujours avec son morceau fautif
            assert!(!e.contexte().is_empty(), "{} sans contexte pour {s:?}", e.genre());
        }
    }
}

/* ------------------------ Campagnes ------------------------ */

#[test]
fn fuzz_expressions_valides() {
    let t0 = Instant::now();
    let max = Duration::from_millis(2000);
    let mut rng = Rng::new(0x5eed_cafe);

    for _ in 0..2000 {
        let s = gen_expr(&mut rng, 4);
        let mode = if rng.coin() {
            ModeAngle::Degres
        } else {
            ModeAngle::Radians
        };
        verifier(&s, mode);
        budget(t0, max);
    }
}

#[test]
fn fuzz_expressions_mutees() {
    let t0 = Instant::now();
    let max = Duration::from_millis(2000);
    let mut rng = Rng::new(42);

    for _ in 0..2000 {
        let s = gen_expr(&mut rng, 3);
        let m = muter(&mut rng, &s);
        verifier(&m, ModeAngle::Radians);
        budget(t0, max);
    }
}

#[test]
fn fuzz_entrees_pathologiques() {
    let cas = [
        "".to_string(),
        "(".repeat(1000),
        ")".repeat(1000),
        "-".repeat(500) + "1",
        "1".repeat(400),
        "9".repeat(400) + "!",
        "0.".to_string() + &"0".repeat(400) + "1",
        "√√√".to_string(),
        "!!!".to_string(),
        "sin(".repeat(300) + "1" + &")".repeat(300),
        "π".repeat(10),
        "e^e^e^e^e".to_string(),
    ];
    for s in &cas {
        verifier(s, ModeAngle::Degres);
    }
}
