// src/noyau/erreur.rs
//
// Erreurs du noyau (liste fermée).
// Chaque variante garde le morceau d’entrée fautif pour que la façade
// puisse afficher un message sans deviner.

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ErreurCalc {
    /// Argument hors du domaine mathématique (factorielle négative, r > n, ln(0), base 40...).
    #[error("hors domaine : {0}")]
    Domaine(String),

    /// Valeur trop grande pour un f64 (ex: 171!).
    #[error("dépassement : {0}")]
    Debordement(String),

    /// Division ou modulo par zéro.
    #[error("division par zéro : {0}")]
    DivisionParZero(String),

    /// Identifiant qui n’est ni une fonction ni une constante connue.
    #[error("fonction inconnue : {0}")]
    FonctionInconnue(String),

    /// Entrée impossible à réduire à un scalaire (parenthèses, opérande manquant...).
    #[error("expression invalide : {0}")]
    Malforme(String),
}

impl ErreurCalc {
    /// Libellé court du type d’erreur (sans le contexte).
    pub fn genre(&self) -> &'static str {
        match self {
            ErreurCalc::Domaine(_) => "Hors domaine",
            ErreurCalc::Debordement(_) => "Dépassement",
            ErreurCalc::DivisionParZero(_) => "Division par zéro",
            ErreurCalc::FonctionInconnue(_) => "Fonction inconnue",
            ErreurCalc::Malforme(_) => "Expression invalide",
        }
    }

    /// Morceau d’entrée fautif.
    pub fn contexte(&self) -> &str {
        match self {
            ErreurCalc::Domaine(c)
            | ErreurCalc::Debordement(c)
            | ErreurCalc::DivisionParZero(c)
            | ErreurCalc::FonctionInconnue(c)
            | ErreurCalc::Malforme(c) => c,
        }
    }
}
