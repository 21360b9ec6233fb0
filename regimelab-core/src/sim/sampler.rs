//! Parameter sampler — one market's structural draw.

use rand::Rng;

use crate::config::{Bounds, ConfigError, Mode, SimulationConfig};
use crate::domain::{MarketParams, PerRegime, Regime};

/// Draw uniformly from `[low, high)`. A degenerate interval (low == high)
/// returns `low` rather than panicking on an empty range.
fn sample_uniform<R: Rng>(rng: &mut R, bounds: Bounds) -> f64 {
    if bounds.low == bounds.high {
        bounds.low
    } else {
        rng.gen_range(bounds.low..bounds.high)
    }
}

fn sample_per_regime<R: Rng>(rng: &mut R, bounds: &PerRegime<Bounds>) -> PerRegime<f64> {
    PerRegime::new(
        sample_uniform(rng, bounds.competitive),
        sample_uniform(rng, bounds.tacit),
        sample_uniform(rng, bounds.cartel),
    )
}

/// Sample one market's structural parameters.
///
/// Every scalar is drawn independently and uniformly from its configured
/// range, in a fixed order so the consumed random stream is reproducible:
/// rho_c, sigma_c, jump_prob, sigma_jump, sigma_p, then beta and kappa
/// regime-by-regime (C, T, K).
///
/// Ablation modes collapse heterogeneity after drawing: `KappaOnly`
/// forces all betas to the Competitive draw, `BetaOnly` does the same to
/// kappa. The draw itself is unchanged, so switching modes does not shift
/// the random stream consumed per market.
///
/// Fails fast on a malformed configuration; nothing is drawn in that case.
pub fn sample_market_params<R: Rng>(
    rng: &mut R,
    config: &SimulationConfig,
    mode: Mode,
) -> Result<MarketParams, ConfigError> {
    config.validate()?;

    let rho_c = sample_uniform(rng, config.rho_c);
    let sigma_c = sample_uniform(rng, config.sigma_c);
    let jump_prob = sample_uniform(rng, config.jump_prob);
    let sigma_jump = sample_uniform(rng, config.sigma_jump);
    let sigma_p = sample_uniform(rng, config.sigma_p);

    let mut beta = sample_per_regime(rng, &config.beta);
    let mut kappa = sample_per_regime(rng, &config.kappa);

    match mode {
        Mode::Baseline => {}
        Mode::KappaOnly => beta = PerRegime::uniform(*beta.get(Regime::Competitive)),
        Mode::BetaOnly => kappa = PerRegime::uniform(*kappa.get(Regime::Competitive)),
    }

    Ok(MarketParams {
        rho_c,
        sigma_c,
        jump_prob,
        sigma_jump,
        sigma_p,
        beta,
        kappa,
    })
}
