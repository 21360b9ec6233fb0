//! Regime path generator — 3-state Markov chain over conduct regimes.

use rand::Rng;

use crate::config::SimulationConfig;
use crate::domain::Regime;

/// Starting distribution over {C, T, K}: mostly competitive, some tacit,
/// very rare cartel start. Independent of configuration.
pub const INITIAL_DISTRIBUTION: [f64; 3] = [0.75, 0.20, 0.05];

/// How each row's off-diagonal mass splits toward the other two states,
/// in regime index order of the destination:
/// - from C: mostly to T, occasionally straight to K
/// - from T: equal drift back to C or escalation to K
/// - from K: breakdown to C slightly more likely than softening to T
///
/// Fixed ratios, deliberately not configurable.
const OFF_DIAGONAL_SPLITS: [(f64, f64); 3] = [(0.70, 0.30), (0.50, 0.50), (0.60, 0.40)];

/// Row-stochastic transition matrix `P[i][j] = P(S_t = j | S_{t-1} = i)`
/// derived from the three stay probabilities.
pub fn transition_matrix(config: &SimulationConfig) -> [[f64; 3]; 3] {
    let mut matrix = [[0.0; 3]; 3];
    for from in Regime::ALL {
        let i = from.index();
        let stay = *config.stay.get(from);
        let (first, second) = OFF_DIAGONAL_SPLITS[i];
        let leave = 1.0 - stay;

        let mut others = Regime::ALL.iter().filter(|r| r.index() != i);
        let a = others.next().map(|r| r.index()).unwrap_or(0);
        let b = others.next().map(|r| r.index()).unwrap_or(0);

        matrix[i][i] = stay;
        matrix[i][a] = leave * first;
        matrix[i][b] = leave * second;
    }
    matrix
}

/// Draw one state from a categorical distribution over the three regimes.
fn draw_state<R: Rng>(rng: &mut R, probs: &[f64; 3]) -> Regime {
    let u: f64 = rng.gen();
    let mut cumulative = 0.0;
    for regime in Regime::ALL {
        cumulative += probs[regime.index()];
        if u < cumulative {
            return regime;
        }
    }
    // Rounding can leave the cumulative sum a hair below 1.0.
    Regime::Cartel
}

/// Simulate the conduct regime path for `len` steps.
///
/// Order-1 Markov: each state depends only on its predecessor via the
/// transition row. High stay probabilities make regimes occur in
/// persistent episodes rather than rapid flicker.
pub fn simulate_regime_path<R: Rng>(
    rng: &mut R,
    config: &SimulationConfig,
    len: usize,
) -> Vec<Regime> {
    let matrix = transition_matrix(config);
    let mut path = Vec::with_capacity(len);
    if len == 0 {
        return path;
    }

    path.push(draw_state(rng, &INITIAL_DISTRIBUTION));
    for t in 1..len {
        let previous = path[t - 1];
        path.push(draw_state(rng, &matrix[previous.index()]));
    }
    path
}
