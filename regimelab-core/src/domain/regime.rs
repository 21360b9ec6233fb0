//! Regime — the latent conduct state of a market.

use serde::{Deserialize, Serialize};

/// Latent conduct regime governing price formation.
///
/// The integer encoding (0/1/2) is the wire format used in panel and
/// window tables; the single-letter label (C/T/K) names per-regime
/// columns such as `share_C`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Regime {
    Competitive,
    Tacit,
    Cartel,
}

impl Regime {
    /// All regimes in index order.
    pub const ALL: [Regime; 3] = [Regime::Competitive, Regime::Tacit, Regime::Cartel];

    /// Integer encoding: 0 = Competitive, 1 = Tacit, 2 = Cartel.
    pub fn index(self) -> usize {
        match self {
            Regime::Competitive => 0,
            Regime::Tacit => 1,
            Regime::Cartel => 2,
        }
    }

    /// Decode an integer regime value. Out-of-domain values yield `None`.
    pub fn from_index(idx: i64) -> Option<Regime> {
        match idx {
            0 => Some(Regime::Competitive),
            1 => Some(Regime::Tacit),
            2 => Some(Regime::Cartel),
            _ => None,
        }
    }

    /// Single-letter label used in column names: C, T, K.
    pub fn letter(self) -> char {
        match self {
            Regime::Competitive => 'C',
            Regime::Tacit => 'T',
            Regime::Cartel => 'K',
        }
    }
}

/// One value per regime.
///
/// Used for pass-through (`beta`), adjustment speed (`kappa`), stay
/// probabilities, and their sampling bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerRegime<T> {
    pub competitive: T,
    pub tacit: T,
    pub cartel: T,
}

impl<T> PerRegime<T> {
    pub fn new(competitive: T, tacit: T, cartel: T) -> Self {
        Self {
            competitive,
            tacit,
            cartel,
        }
    }

    pub fn get(&self, regime: Regime) -> &T {
        match regime {
            Regime::Competitive => &self.competitive,
            Regime::Tacit => &self.tacit,
            Regime::Cartel => &self.cartel,
        }
    }

    /// Iterate values in index order, paired with their regime.
    pub fn iter(&self) -> impl Iterator<Item = (Regime, &T)> {
        Regime::ALL.iter().map(move |&r| (r, self.get(r)))
    }
}

impl<T: Copy> PerRegime<T> {
    /// Fill all three regimes with one value (ablation collapse).
    pub fn uniform(value: T) -> Self {
        Self::new(value, value, value)
    }
}
