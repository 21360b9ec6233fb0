//! Simulation configuration: sampling ranges, Markov persistence, horizon.
//!
//! `SimulationConfig` is an immutable bundle of numeric ranges; one
//! market's concrete parameters are drawn from it by the sampler. The
//! defaults reproduce the Tier-0 generator: isolate the core conduct
//! mechanism (regime-dependent pass-through and adjustment speed) and
//! defer trend, seasonality, and missingness to later tiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::PerRegime;

/// Configuration validation errors. Surfaced at the parameter sampler;
/// never retried.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown stress-test mode: {0:?} (expected baseline, kappa_only, or beta_only)")]
    UnknownMode(String),

    #[error("malformed bounds for {name}: low {low} > high {high}")]
    MalformedBounds { name: String, low: f64, high: f64 },

    #[error("bounds for {name} must be finite, got [{low}, {high}]")]
    NonFiniteBounds { name: String, low: f64, high: f64 },

    #[error("scale bounds for {name} must be non-negative, got low {low}")]
    NegativeScale { name: String, low: f64 },

    #[error("stay probability for {name} must lie in (0, 1), got {value}")]
    StayProbabilityOutOfRange { name: String, value: f64 },
}

/// A closed-open sampling interval `[low, high)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub low: f64,
    pub high: f64,
}

impl Bounds {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Check the interval is finite and non-empty.
    pub fn validate(&self, name: &str) -> Result<(), ConfigError> {
        if !self.low.is_finite() || !self.high.is_finite() {
            return Err(ConfigError::NonFiniteBounds {
                name: name.to_string(),
                low: self.low,
                high: self.high,
            });
        }
        if self.low > self.high {
            return Err(ConfigError::MalformedBounds {
                name: name.to_string(),
                low: self.low,
                high: self.high,
            });
        }
        Ok(())
    }
}

/// Stress-test ablation mode.
///
/// The ablations collapse heterogeneity in one dimension so a detector
/// can be evaluated on adjustment-speed or pass-through signal alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Full heterogeneity: beta and kappa both differ by regime.
    #[default]
    Baseline,
    /// All regimes share the Competitive beta draw; only kappa differs.
    KappaOnly,
    /// All regimes share the Competitive kappa draw; only beta differs.
    BetaOnly,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Baseline => "baseline",
            Mode::KappaOnly => "kappa_only",
            Mode::BetaOnly => "beta_only",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "baseline" => Ok(Mode::Baseline),
            "kappa_only" => Ok(Mode::KappaOnly),
            "beta_only" => Ok(Mode::BetaOnly),
            other => Err(ConfigError::UnknownMode(other.to_string())),
        }
    }
}

/// Immutable bundle of sampling ranges and chain persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of months kept per market (post burn-in).
    pub t: usize,
    /// Simulated months dropped to remove initialization artifacts.
    pub burn_in: usize,

    /// AR(1) persistence of the latent cost process.
    pub rho_c: Bounds,
    /// Std dev of the regular cost innovation.
    pub sigma_c: Bounds,
    /// Per-step jump probability in the cost process (rare large shocks).
    pub jump_prob: Bounds,
    /// Std dev of the jump shock.
    pub sigma_jump: Bounds,
    /// Idiosyncratic price noise around the structural relation.
    pub sigma_p: Bounds,

    /// Regime-dependent pass-through ranges.
    pub beta: PerRegime<Bounds>,
    /// Regime-dependent adjustment-speed ranges (stickiness).
    pub kappa: PerRegime<Bounds>,

    /// Probability of staying in the same regime. Higher means longer
    /// episodes.
    pub stay: PerRegime<f64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            t: 180,
            burn_in: 24,
            rho_c: Bounds::new(0.6, 0.95),
            sigma_c: Bounds::new(0.01, 0.08),
            jump_prob: Bounds::new(0.01, 0.05),
            sigma_jump: Bounds::new(0.05, 0.20),
            sigma_p: Bounds::new(0.001, 0.02),
            beta: PerRegime::new(
                Bounds::new(0.8, 1.2),
                Bounds::new(0.5, 0.9),
                Bounds::new(0.2, 0.6),
            ),
            kappa: PerRegime::new(
                Bounds::new(0.4, 0.9),
                Bounds::new(0.2, 0.6),
                Bounds::new(0.05, 0.35),
            ),
            stay: PerRegime::new(0.97, 0.97, 0.985),
        }
    }
}

impl SimulationConfig {
    /// Total simulated horizon including the discarded burn-in prefix.
    pub fn total_steps(&self) -> usize {
        self.burn_in + self.t
    }

    /// Validate every range and stay probability.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.rho_c.validate("rho_c")?;
        self.sigma_c.validate("sigma_c")?;
        self.jump_prob.validate("jump_prob")?;
        self.sigma_jump.validate("sigma_jump")?;
        self.sigma_p.validate("sigma_p")?;

        for (name, bounds) in [
            ("sigma_c", &self.sigma_c),
            ("sigma_jump", &self.sigma_jump),
            ("sigma_p", &self.sigma_p),
        ] {
            if bounds.low < 0.0 {
                return Err(ConfigError::NegativeScale {
                    name: name.to_string(),
                    low: bounds.low,
                });
            }
        }

        for (regime, bounds) in self.beta.iter() {
            bounds.validate(&format!("beta_{}", regime.letter()))?;
        }
        for (regime, bounds) in self.kappa.iter() {
            bounds.validate(&format!("kappa_{}", regime.letter()))?;
        }

        for (regime, &stay) in self.stay.iter() {
            if !(stay > 0.0 && stay < 1.0) {
                return Err(ConfigError::StayProbabilityOutOfRange {
                    name: format!("stay_{}", regime.letter()),
                    value: stay,
                });
            }
        }

        Ok(())
    }
}
