// src/noyau/appels.rs
//
// Fonctions scientifiques appelables depuis une expression : sin(…), ln(…), √(…)...
// -------------------------------------------------------------------------------
// - liste FERMÉE (pas de dispatch par chaîne à l’évaluation)
// - sin/cos/tan seules sensibles au mode d’angle
// - domaine vérifié ici (ln/log/√), le reste (∞, NaN) est vérifié par l’évaluateur
//
// Pas de trig inverse : jamais exposée par la calculatrice d’origine.

use super::erreur::ErreurCalc;

/// Interprétation des angles pour sin/cos/tan (fixe pendant une évaluation).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ModeAngle {
    #[default]
    Degres,
    Radians,
}

impl ModeAngle {
    pub fn libelle(self) -> &'static str {
        match self {
            ModeAngle::Degres => "DEG",
            ModeAngle::Radians => "RAD",
        }
    }

    pub fn bascule(self) -> ModeAngle {
        match self {
            ModeAngle::Degres => ModeAngle::Radians,
            ModeAngle::Radians => ModeAngle::Degres,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Sin,
    Cos,
    Tan,
    Sinh,
    Cosh,
    Tanh,
    Ln,
    Log,
    Sqrt,
}

impl Fonction {
    pub const TOUTES: [Fonction; 9] = [
        Fonction::Sin,
        Fonction::Cos,
        Fonction::Tan,
        Fonction::Sinh,
        Fonction::Cosh,
        Fonction::Tanh,
        Fonction::Ln,
        Fonction::Log,
        Fonction::Sqrt,
    ];

    /// Nom (déjà en minuscules) -> fonction.
    pub fn depuis_nom(nom: &str) -> Option<Fonction> {
        Fonction::TOUTES.into_iter().find(|f| f.nom() == nom)
    }

    pub fn nom(self) -> &'static str {
        match self {
            Fonction::Sin => "sin",
            Fonction::Cos => "cos",
            Fonction::Tan => "tan",
            Fonction::Sinh => "sinh",
            Fonction::Cosh => "cosh",
            Fonction::Tanh => "tanh",
            Fonction::Ln => "ln",
            Fonction::Log => "log",
            Fonction::Sqrt => "sqrt",
        }
    }

    /// Vrai pour sin/cos/tan : l’argument dépend du mode DEG/RAD.
    pub fn sensible_au_mode(self) -> bool {
        matches!(self, Fonction::Sin | Fonction::Cos | Fonction::Tan)
    }

    /// Applique la fonction à un scalaire.
    pub fn appliquer(self, x: f64, mode: ModeAngle) -> Result<f64, ErreurCalc> {
        let a = if self.sensible_au_mode() && mode == ModeAngle::Degres {
            x.to_radians()
        } else {
            x
        };

        let v = match self {
            Fonction::Sin => a.sin(),
            Fonction::Cos => a.cos(),
            Fonction::Tan => a.tan(),
            Fonction::Sinh => a.sinh(),
            Fonction::Cosh => a.cosh(),
            Fonction::Tanh => a.tanh(),

            // ln(0) / log(0) donneraient -∞ : refusé explicitement
            Fonction::Ln | Fonction::Log if a <= 0.0 => {
                return Err(ErreurCalc::Domaine(format!("{}({x})", self.nom())));
            }
            Fonction::Ln => a.ln(),
            Fonction::Log => a.log10(),

            Fonction::Sqrt if a < 0.0 => {
                return Err(ErreurCalc::Domaine(format!("sqrt({x})")));
            }
            Fonction::Sqrt => a.sqrt(),
        };

        Ok(v)
    }
}
