//! Noyau de calcul scientifique (f64)
//!
//! Organisation interne :
//! - erreur.rs     : ErreurCalc (liste fermée des échecs)
//! - fonctions.rs  : factorielle, Γ (Lanczos), nPr/nCr, PGCD/PPCM, bases
//! - constantes.rs : bibliothèque de constantes (table statique)
//! - jetons.rs     : normalisation des glyphes + tokenisation
//! - appels.rs     : fonctions scientifiques (liste fermée) + mode DEG/RAD
//! - rpn.rs        : shunting-yard + construction Expr
//! - expr.rs       : AST + évaluation post-ordre
//! - format.rs     : affichage (entier sans point, fraction approchée)
//! - eval.rs       : pipeline complet

pub mod appels;
pub mod constantes;
pub mod erreur;
pub mod eval;
pub mod expr;
pub mod fonctions;
pub mod format;
pub mod jetons;
pub mod rpn;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use appels::ModeAngle;
pub use erreur::ErreurCalc;
pub use eval::{evaluer, evaluer_avec_demarche};
