//! Market series simulator — latent cost and observed log price for one
//! market, driven by a regime path.

use rand::Rng;
use rand_distr::StandardNormal;

use crate::config::SimulationConfig;
use crate::domain::{MarketParams, MarketSeries, Regime};

fn normal<R: Rng>(rng: &mut R, sigma: f64) -> f64 {
    let z: f64 = rng.sample(StandardNormal);
    z * sigma
}

/// Simulate one market's monthly history and trim the burn-in prefix.
///
/// The regime path must cover the full horizon (`burn_in + T` steps).
///
/// Cost is AR(1) with i.i.d. Gaussian innovations plus a Bernoulli-gated
/// jump shock, starting from zero:
///
/// ```text
/// c[t] = rho_c * c[t-1] + N(0, sigma_c) + jump
/// ```
///
/// The jump gate is drawn before the jump size; the size is drawn only
/// when the gate fires, so the consumed random stream matches the
/// conditional form of the process.
///
/// Price partially adjusts toward a regime-dependent target:
///
/// ```text
/// p[t] = (1 - kappa[s]) * p[t-1] + kappa[s] * beta[s] * c[t] + N(0, sigma_p)
/// ```
///
/// where `s` is the regime at step `t`. Both series start at zero, which
/// is not the stationary distribution; dropping the first `burn_in` steps
/// removes that transient. No clipping is applied: extreme draws may
/// produce unbounded paths, which is accepted simulator behavior.
pub fn simulate_market_series<R: Rng>(
    rng: &mut R,
    config: &SimulationConfig,
    params: &MarketParams,
    regime_path: &[Regime],
    market_id: u64,
) -> MarketSeries {
    let total = config.total_steps();
    debug_assert_eq!(regime_path.len(), total, "regime path must cover burn-in + T");

    let mut cost = vec![0.0f64; total];
    for t in 1..total {
        let innovation = normal(rng, params.sigma_c);
        let jump = if rng.gen::<f64>() < params.jump_prob {
            normal(rng, params.sigma_jump)
        } else {
            0.0
        };
        cost[t] = params.rho_c * cost[t - 1] + innovation + jump;
    }

    let mut price = vec![0.0f64; total];
    for t in 1..total {
        let s = regime_path[t];
        let kappa = *params.kappa.get(s);
        let beta = *params.beta.get(s);
        let noise = normal(rng, params.sigma_p);
        price[t] = (1.0 - kappa) * price[t - 1] + kappa * (beta * cost[t]) + noise;
    }

    MarketSeries {
        market_id,
        regime: regime_path[config.burn_in..].to_vec(),
        cost: cost.split_off(config.burn_in),
        price: price.split_off(config.burn_in),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Mode;
    use crate::sim::regime_path::simulate_regime_path;
    use crate::sim::sampler::sample_market_params;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn simulate(seed: u64, config: &SimulationConfig) -> MarketSeries {
        let mut rng = StdRng::seed_from_u64(seed);
        let params = sample_market_params(&mut rng, config, Mode::Baseline).unwrap();
        let path = simulate_regime_path(&mut rng, config, config.total_steps());
        simulate_market_series(&mut rng, config, &params, &path, 0)
    }

    #[test]
    fn series_has_length_t_after_burn_in() {
        let config = SimulationConfig::default();
        let series = simulate(0, &config);
        assert_eq!(series.len(), 180);
        assert_eq!(series.regime.len(), 180);
        assert_eq!(series.cost.len(), 180);
    }

    #[test]
    fn burn_in_removes_the_initial_zero() {
        let config = SimulationConfig::default();
        let series = simulate(0, &config);
        // Step 0 of the kept series is burn-in step 24, not the zero start.
        assert_ne!(series.cost[0], 0.0);
        assert_ne!(series.price[0], 0.0);
    }

    #[test]
    fn zero_burn_in_keeps_the_zero_start() {
        let mut config = SimulationConfig::default();
        config.burn_in = 0;
        let series = simulate(0, &config);
        assert_eq!(series.len(), 180);
        assert_eq!(series.cost[0], 0.0);
        assert_eq!(series.price[0], 0.0);
    }

    #[test]
    fn noiseless_sticky_price_stays_between_previous_and_target() {
        let mut config = SimulationConfig::default();
        config.sigma_p = crate::config::Bounds::new(0.0, 0.0);
        config.burn_in = 0;

        let mut rng = StdRng::seed_from_u64(21);
        let params = sample_market_params(&mut rng, &config, Mode::Baseline).unwrap();
        let path = simulate_regime_path(&mut rng, &config, config.total_steps());
        let series = simulate_market_series(&mut rng, &config, &params, &path, 0);

        for t in 1..series.len() {
            let s = series.regime[t];
            let target = params.beta.get(s) * series.cost[t];
            let prev = series.price[t - 1];
            let p = series.price[t];
            let (lo, hi) = if prev <= target { (prev, target) } else { (target, prev) };
            assert!(p >= lo - 1e-12 && p <= hi + 1e-12, "p[{t}] escaped the adjustment interval");
        }
    }

    #[test]
    fn identical_seed_reproduces_the_series() {
        let config = SimulationConfig::default();
        let a = simulate(123, &config);
        let b = simulate(123, &config);
        assert_eq!(a, b);
    }
}
