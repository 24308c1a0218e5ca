// src/app/vue.rs
//
// Vue (texte brut, terminal)
// --------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour une expression isolée ou une session
// - Glyphes d’affichage : * -> ×, / -> ÷ (l’entrée accepte les deux)
// - Session : une ligne = un "=" ; `:deg`, `:rad`, `:mode`, `:frac`, `:ac`, `:q` pilotent l’état
// - `:const <requête>` ouvre une saisie avec la valeur d’une constante ; la ligne suivante la complète
//
// Note :
// - Tout passe par `Write` : les tests lisent la sortie dans un Vec<u8>.

use std::io::{self, BufRead, Write};

use crate::noyau::constantes::{constante_unique, Constante};
use crate::noyau::format::{approx_fraction, format_fraction, formater_nombre};
use crate::noyau::{ErreurCalc, ModeAngle};

use super::etat::AppCalc;

/// Texte d’une erreur tel qu’affiché (jamais un nombre de remplacement).
pub fn texte_erreur(e: &ErreurCalc) -> String {
    format!("Erreur : {e}")
}

/// Substitution inverse pour l’affichage : `*` -> `×`, `/` -> `÷`.
pub fn glyphes_affichage(s: &str) -> String {
    s.replace('*', "×").replace('/', "÷")
}

impl AppCalc {
    /// Lignes à afficher après un "=".
    ///
    /// - erreur : une seule ligne `Erreur : ...`
    /// - succès : le résultat, puis la fraction (si demandée et trouvée),
    ///   puis la démarche (si demandée)
    pub fn rendu(&self) -> Vec<String> {
        if self.en_erreur() {
            return vec![format!("Erreur : {}", self.erreur)];
        }

        let mut lignes = vec![self.resultat.clone()];

        if self.fraction {
            if let Some(r) = self.valeur.and_then(approx_fraction) {
                if !r.is_integer() {
                    lignes.push(format!("≈ {}", format_fraction(&r)));
                }
            }
        }

        if self.avec_demarche && !self.demarche.jetons.is_empty() {
            lignes.push(format!("  jetons : {}", self.demarche.jetons));
            lignes.push(format!("  RPN    : {}", self.demarche.rpn));
            lignes.push(format!("  arbre  : {}", glyphes_affichage(&self.demarche.arbre)));
        }

        lignes
    }

    fn invite(&self) -> String {
        let frac = if self.fraction { " frac" } else { "" };
        format!("[{}{frac}] > ", self.mode.libelle())
    }

    /// Session interactive : lit des lignes jusqu’à `:q` ou fin de flux.
    ///
    /// Une ligne illisible (UTF-8 invalide) donne une ligne `Erreur : ...` ; la session continue.
    pub fn session<R: BufRead, W: Write>(&mut self, mut entree: R, mut sortie: W) -> io::Result<()> {
        write!(sortie, "{}", self.invite())?;
        sortie.flush()?;

        let mut brut = Vec::new();
        loop {
            brut.clear();
            if entree.read_until(b'\n', &mut brut)? == 0 {
                break;
            }

            let Ok(ligne) = std::str::from_utf8(&brut) else {
                writeln!(sortie, "Erreur : ligne illisible (UTF-8 invalide)")?;
                write!(sortie, "{}", self.invite())?;
                sortie.flush()?;
                continue;
            };

            match ligne.trim() {
                ":q" => break,
                ":deg" => self.mode = ModeAngle::Degres,
                ":rad" => self.mode = ModeAngle::Radians,
                ":mode" => self.basculer_mode(),
                ":frac" => self.basculer_fraction(),
                ":ac" => self.reset_total(),
                cmd if cmd.starts_with(":const") => {
                    let requete = &cmd[":const".len()..];
                    match constante_unique(requete) {
                        Some(c) => {
                            self.inserer(&formater_nombre(c.valeur, None));
                            writeln!(sortie, "{} : {}", c.symbole, self.entree)?;
                        }
                        None => writeln!(
                            sortie,
                            "Erreur : constante introuvable ou ambiguë : {}",
                            requete.trim()
                        )?,
                    }
                }
                // ligne vide : "=" sur la saisie ouverte, sinon rien
                "" if self.saisie_ouverte => {
                    self.saisir("");
                    self.ecrire_rendu(&mut sortie)?;
                }
                "" => {}
                expr => {
                    self.saisir(expr);
                    self.ecrire_rendu(&mut sortie)?;
                }
            }
            write!(sortie, "{}", self.invite())?;
            sortie.flush()?;
        }

        writeln!(sortie)?;
        Ok(())
    }

    fn ecrire_rendu<W: Write>(&self, sortie: &mut W) -> io::Result<()> {
        for l in self.rendu() {
            writeln!(sortie, "{l}")?;
        }
        Ok(())
    }
}

/// Tableau des constantes (nom, symbole, valeur, unité).
pub fn rendu_constantes(table: &[&Constante]) -> Vec<String> {
    let largeur = table.iter().map(|c| c.nom.chars().count()).max().unwrap_or(0);

    table
        .iter()
        .map(|c| {
            let pad = largeur - c.nom.chars().count();
            let valeur = formater_nombre(c.valeur, None);
            let ligne = format!("{}{} {:<3} = {valeur} {}", c.nom, " ".repeat(pad), c.symbole, c.unite);
            ligne.trim_end().to_string()
        })
        .collect()
}
