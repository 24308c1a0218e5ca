//! src/app/etat.rs
//!
//! État de session (sans rendu).
//!
//! Rôle : contenir l’état de la calculatrice (entrée, dernier résultat, erreur, mode, démarche)
//! et offrir des actions simples ("=", bascules, remises à zéro).
//!
//! Contrats :
//! - Une évaluation = un appel au noyau, au moment du "=" seulement.
//! - Une erreur n’est jamais remplacée par un nombre : le dernier résultat reste affiché.
//! - Défense en profondeur : bornes sur les décimales.

use crate::noyau::eval::DemarcheNoyau;
use crate::noyau::format::formater_nombre;
use crate::noyau::{evaluer, evaluer_avec_demarche, ErreurCalc, ModeAngle};

/// Garde-fou : au-delà, `{:.n$}` n’apporte que du bruit.
const DECIMALES_MAX: usize = 17;

#[derive(Clone, Debug, Default)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub entree: String,
    pub saisie_ouverte: bool, // entree en construction (constante insérée, pas encore évaluée)

    // --- sorties ---
    pub valeur: Option<f64>, // dernier succès (brut)
    pub resultat: String,    // dernier succès (texte)
    pub erreur: String,      // message d’erreur (si l’évaluation échoue)

    // --- démarche (jetons / RPN / arbre) ---
    pub demarche: DemarcheNoyau,

    // --- paramètres ---
    pub mode: ModeAngle,
    pub fraction: bool,
    pub decimales: Option<usize>,
    pub avec_demarche: bool,
}

impl AppCalc {
    pub fn new(mode: ModeAngle, fraction: bool, decimales: Option<usize>) -> Self {
        Self {
            mode,
            fraction,
            decimales: decimales.map(|d| d.min(DECIMALES_MAX)),
            ..Default::default()
        }
    }

    /* ------------------------ Actions ------------------------ */

    /// AC : remise à zéro (entrée + résultats), paramètres conservés.
    pub fn reset_total(&mut self) {
        self.entree.clear();
        self.saisie_ouverte = false;
        self.clear_resultats();
    }

    /// CLR : effacer résultat + erreur + démarche (sans toucher à l’entrée).
    pub fn clear_resultats(&mut self) {
        self.valeur = None;
        self.resultat.clear();
        self.erreur.clear();
        self.demarche = DemarcheNoyau::default();
    }

    pub fn basculer_mode(&mut self) {
        self.mode = self.mode.bascule();
    }

    pub fn basculer_fraction(&mut self) {
        self.fraction = !self.fraction;
    }

    /// "=" : évalue `entree` une seule fois et dépose le résultat ou l’erreur.
    ///
    /// Entrée vide : aucune action (l’affichage ne change pas).
    pub fn evaluer_entree(&mut self) {
        if self.entree.trim().is_empty() {
            return;
        }

        let r = if self.avec_demarche {
            evaluer_avec_demarche(&self.entree, self.mode)
        } else {
            evaluer(&self.entree, self.mode).map(|v| (v, DemarcheNoyau::default()))
        };

        match r {
            Ok((v, d)) => self.set_resultat(v, d),
            Err(e) => self.set_erreur(&e),
        }
    }

    /// Remplace l’entrée (ou complète la saisie ouverte) puis évalue.
    pub fn saisir(&mut self, expr: &str) {
        if self.saisie_ouverte {
            self.entree.push_str(expr);
        } else {
            self.entree = expr.to_string();
        }
        self.saisie_ouverte = false;
        self.evaluer_entree();
    }

    /// Ajoute un morceau de texte (valeur d’une constante) à l’entrée en construction.
    pub fn inserer(&mut self, morceau: &str) {
        if !self.saisie_ouverte {
            self.entree.clear();
            self.saisie_ouverte = true;
        }
        self.entree.push_str(morceau);
    }

    pub fn set_resultat(&mut self, v: f64, demarche: DemarcheNoyau) {
        self.erreur.clear();
        self.valeur = Some(v);
        self.resultat = formater_nombre(v, self.decimales);
        self.demarche = demarche;
    }

    /// On CONSERVE le dernier résultat ; la démarche n’est plus fiable.
    pub fn set_erreur(&mut self, e: &ErreurCalc) {
        self.erreur = e.to_string();
        self.demarche = DemarcheNoyau::default();
    }

    pub fn en_erreur(&self) -> bool {
        !self.erreur.is_empty()
    }
}
