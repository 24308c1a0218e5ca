// src/main.rs
//
// Calculatrice scientifique — point d’entrée terminal
// ---------------------------------------------------
// But:
// - Lire la ligne de commande (clap, voir app.rs)
// - Installer le journal (tracing) : RUST_LOG, sinon `warn` (`debug` avec --verbose)
// - Aiguiller vers une sous-commande ou la session stdin
//
// IMPORTANT (structure projet):
// - Le noyau (src/noyau) ne connaît ni clap ni le terminal
// - Ici: point d’entrée seulement

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod app;
mod noyau;

use app::Cli;

fn installer_journal(verbeux: bool) {
    let filtre = if verbeux {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    // stderr : stdout reste réservé aux résultats
    tracing_subscriber::fmt()
        .with_env_filter(filtre)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    installer_journal(cli.verbose);
    app::lancer(cli)
}
