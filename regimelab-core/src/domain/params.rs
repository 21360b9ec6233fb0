//! MarketParams — one market's realized structural parameter draw.

use serde::{Deserialize, Serialize};

use super::regime::PerRegime;

/// Structural parameters for a single simulated market.
///
/// Drawn once per market by the parameter sampler and immutable
/// thereafter. Markets are heterogeneous: each gets its own draw so a
/// downstream detector cannot latch onto a single narrow signature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketParams {
    /// AR(1) persistence of the latent cost process.
    pub rho_c: f64,
    /// Std dev of the regular cost innovation.
    pub sigma_c: f64,
    /// Per-step probability of a jump shock in the cost process.
    pub jump_prob: f64,
    /// Std dev of the jump shock when it fires.
    pub sigma_jump: f64,
    /// Std dev of idiosyncratic price noise.
    pub sigma_p: f64,
    /// Regime-dependent pass-through of cost into the price target.
    pub beta: PerRegime<f64>,
    /// Regime-dependent fraction of the gap to target closed per step.
    pub kappa: PerRegime<f64>,
}
