// src/app.rs
//
// Calculatrice scientifique — module App (racine)
// -----------------------------------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs + vue.rs)
// - Décrire la ligne de commande (clap)
// - Aiguiller : expression isolée, bibliothèque numérique, ou session stdin
//
// Important:
// - Les erreurs du noyau s’affichent `Erreur : ...` et donnent un code de sortie 1.
// - anyhow ne sert qu’aux erreurs d’E/S (terminal fermé, etc.).

pub mod etat;
pub mod vue;

use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

pub use etat::AppCalc;

use crate::noyau::constantes::chercher_constantes;
use crate::noyau::fonctions::{
    combinaison, depuis_base, gamma, permutation, pgcd, ppcm, vers_base,
};
use crate::noyau::format::formater_nombre;
use crate::noyau::{ErreurCalc, ModeAngle};
use vue::{rendu_constantes, texte_erreur};

#[derive(Parser, Debug)]
#[command(name = "calculatrice_sci")]
#[command(about = "Calculatrice scientifique (f64) : expressions, Γ, combinatoire, bases")]
pub struct Cli {
    /// Angles en radians (par défaut : degrés)
    #[arg(long, global = true)]
    pub radians: bool,

    /// Affiche aussi une fraction approchée (dénominateur < 10000)
    #[arg(long, global = true)]
    pub fraction: bool,

    /// Affiche la démarche (jetons, RPN, arbre)
    #[arg(long, global = true)]
    pub demarche: bool,

    /// Arrondi d’affichage (zéros de fin retirés)
    #[arg(long, value_name = "N", global = true)]
    pub decimales: Option<usize>,

    /// Journal détaillé (équivaut à RUST_LOG=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub commande: Option<Commande>,
}

#[derive(Subcommand, Debug)]
pub enum Commande {
    /// Évalue une expression
    Eval {
        #[arg(allow_hyphen_values = true)]
        expression: String,
    },
    /// Γ(x)
    Gamma {
        #[arg(allow_hyphen_values = true)]
        x: f64,
    },
    /// Arrangements nPr
    Npr {
        #[arg(allow_hyphen_values = true)]
        n: i64,
        #[arg(allow_hyphen_values = true)]
        r: i64,
    },
    /// Combinaisons nCr
    Ncr {
        #[arg(allow_hyphen_values = true)]
        n: i64,
        #[arg(allow_hyphen_values = true)]
        r: i64,
    },
    /// Plus grand commun diviseur
    Pgcd {
        #[arg(allow_hyphen_values = true)]
        a: i64,
        #[arg(allow_hyphen_values = true)]
        b: i64,
    },
    /// Plus petit commun multiple
    Ppcm {
        #[arg(allow_hyphen_values = true)]
        a: i64,
        #[arg(allow_hyphen_values = true)]
        b: i64,
    },
    /// Conversion de base (2..=36)
    Base {
        #[arg(allow_hyphen_values = true)]
        valeur: String,
        #[arg(long, default_value_t = 10)]
        depuis: u32,
        #[arg(long, default_value_t = 16)]
        vers: u32,
    },
    /// Bibliothèque de constantes (filtre sur le nom ou le symbole)
    Constantes {
        #[arg(default_value = "")]
        requete: String,
    },
}

impl Cli {
    pub fn mode(&self) -> ModeAngle {
        if self.radians {
            ModeAngle::Radians
        } else {
            ModeAngle::Degres
        }
    }
}

/// Point d’aiguillage unique (appelé par main).
pub fn lancer(cli: Cli) -> Result<ExitCode> {
    let mut app = AppCalc::new(cli.mode(), cli.fraction, cli.decimales);
    app.avec_demarche = cli.demarche;

    let Some(commande) = cli.commande else {
        info!(mode = app.mode.libelle(), "session");
        app.session(io::stdin().lock(), io::stdout().lock())
            .context("session interrompue")?;
        return Ok(ExitCode::SUCCESS);
    };

    let lignes = match commande {
        Commande::Eval { expression } => {
            app.saisir(&expression);
            let lignes = app.rendu();
            if app.en_erreur() {
                afficher(&lignes);
                return Ok(ExitCode::FAILURE);
            }
            Ok(lignes)
        }
        Commande::Constantes { requete } => {
            let table = chercher_constantes(&requete);
            if table.is_empty() {
                warn!(requete = %requete, "aucune constante");
            }
            Ok(rendu_constantes(&table))
        }
        autre => bibliotheque(autre, cli.decimales).map(|l| vec![l]),
    };

    match lignes {
        Ok(l) => {
            afficher(&l);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            info!(genre = e.genre(), contexte = e.contexte(), "refus");
            afficher(&[texte_erreur(&e)]);
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Sous-commandes de la bibliothèque numérique : une ligne de résultat.
fn bibliotheque(commande: Commande, decimales: Option<usize>) -> Result<String, ErreurCalc> {
    let nombre = |v: f64| formater_nombre(v, decimales);

    match commande {
        Commande::Gamma { x } => gamma(x).map(nombre),
        Commande::Npr { n, r } => permutation(n, r).map(nombre),
        Commande::Ncr { n, r } => combinaison(n, r).map(nombre),
        Commande::Pgcd { a, b } => Ok(pgcd(a, b).to_string()),
        Commande::Ppcm { a, b } => ppcm(a, b).map(|m| m.to_string()),
        Commande::Base {
            valeur,
            depuis,
            vers,
        } => vers_base(depuis_base(&valeur, depuis)?, vers),
        Commande::Eval { .. } | Commande::Constantes { .. } => Err(ErreurCalc::Malforme(
            "sous-commande hors bibliothèque".to_string(),
        )),
    }
}

fn afficher(lignes: &[String]) {
    for l in lignes {
        println!("{l}");
    }
}
