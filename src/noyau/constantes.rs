// src/noyau/constantes.rs
//
// Bibliothèque de constantes (table statique, lecture seule).

use std::f64::consts::{E, PI, SQRT_2};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Constante {
    pub nom: &'static str,
    pub symbole: &'static str,
    pub valeur: f64,
    pub unite: &'static str,
    pub description: &'static str,
}

pub const NOMBRE_OR: f64 = 1.618033988749895;
pub const EULER_MASCHERONI: f64 = 0.577_215_664_901_532_9;

pub static CONSTANTES: [Constante; 10] = [
    Constante {
        nom: "Pi",
        symbole: "π",
        valeur: PI,
        unite: "",
        description: "Rapport circonférence / diamètre",
    },
    Constante {
        nom: "Nombre d’Euler",
        symbole: "e",
        valeur: E,
        unite: "",
        description: "Base du logarithme naturel",
    },
    Constante {
        nom: "Nombre d’or",
        symbole: "φ",
        valeur: NOMBRE_OR,
        unite: "",
        description: "Environ 1.618...",
    },
    Constante {
        nom: "Euler-Mascheroni",
        symbole: "γ",
        valeur: EULER_MASCHERONI,
        unite: "",
        description: "Environ 0.577...",
    },
    Constante {
        nom: "Racine de 2",
        symbole: "√2",
        valeur: SQRT_2,
        unite: "",
        description: "Environ 1.414...",
    },
    Constante {
        nom: "Constante de Planck",
        symbole: "h",
        valeur: 6.62607015e-34,
        unite: "J⋅s",
        description: "Quantum d’action",
    },
    Constante {
        nom: "Nombre d’Avogadro",
        symbole: "N_A",
        valeur: 6.02214076e23,
        unite: "mol⁻¹",
        description: "Particules par mole",
    },
    Constante {
        nom: "Vitesse de la lumière",
        symbole: "c",
        valeur: 2.99792458e8,
        unite: "m/s",
        description: "Dans le vide",
    },
    Constante {
        nom: "Constante gravitationnelle",
        symbole: "G",
        valeur: 6.67430e-11,
        unite: "N⋅m²/kg²",
        description: "Constante de Newton",
    },
    Constante {
        nom: "Constante de Boltzmann",
        symbole: "k_B",
        valeur: 1.380649e-23,
        unite: "J/K",
        description: "Relie température et énergie",
    },
];

/// Filtre la table sur le nom OU le symbole (insensible à la casse).
/// Requête vide => toute la table.
pub fn chercher_constantes(requete: &str) -> Vec<&'static Constante> {
    let q = requete.trim().to_lowercase();
    CONSTANTES
        .iter()
        .filter(|c| {
            q.is_empty() || c.nom.to_lowercase().contains(&q) || c.symbole.to_lowercase().contains(&q)
        })
        .collect()
}

/// Une seule constante pour une requête : correspondance exacte (nom ou symbole) d’abord,
/// sinon l’unique résultat du filtre. None si introuvable ou ambiguë.
pub fn constante_unique(requete: &str) -> Option<&'static Constante> {
    let q = requete.trim().to_lowercase();
    if q.is_empty() {
        return None;
    }

    let exacte = CONSTANTES
        .iter()
        .find(|c| c.nom.to_lowercase() == q || c.symbole.to_lowercase() == q);
    if exacte.is_some() {
        return exacte;
    }

    match chercher_constantes(&q).as_slice() {
        [seule] => Some(*seule),
        _ => None,
    }
}
