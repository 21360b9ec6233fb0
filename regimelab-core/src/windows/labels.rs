//! Regime-composition diagnostics for a window.

use serde::{Deserialize, Serialize};

use crate::domain::Regime;

/// Mode share at or above this marks a window as pure.
pub const PURITY_THRESHOLD: f64 = 0.80;

/// Sentinel mode for an empty window.
pub const MODE_UNDEFINED: i64 = -1;

/// Per-window regime occupancy summary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowLabels {
    pub share_c: f64,
    pub share_t: f64,
    pub share_k: f64,
    /// Most frequent regime index; ties break to the lowest index.
    /// -1 when the window is empty.
    pub state_mode: i64,
    /// 1.0 when the mode regime occupies at least 80% of the window.
    pub is_pure_80: f64,
}

/// Summarize the regime composition of one window.
///
/// Shares are counts over the window length; the mode is the regime with
/// the highest count, ties resolved toward the lowest index (Competitive
/// wins over Tacit wins over Cartel). An empty slice is a defensive case
/// the engine's length invariant rules out: shares 0, mode -1, purity 0.
pub fn summarize_window_states(states: &[Regime]) -> WindowLabels {
    if states.is_empty() {
        return WindowLabels {
            share_c: 0.0,
            share_t: 0.0,
            share_k: 0.0,
            state_mode: MODE_UNDEFINED,
            is_pure_80: 0.0,
        };
    }

    let mut counts = [0usize; 3];
    for &s in states {
        counts[s.index()] += 1;
    }

    let total = states.len() as f64;
    let shares = [
        counts[0] as f64 / total,
        counts[1] as f64 / total,
        counts[2] as f64 / total,
    ];

    // max_by_key on the negated index would be clever; a plain scan keeps
    // the lowest-index tie-break obvious.
    let mut mode = 0usize;
    for i in 1..3 {
        if counts[i] > counts[mode] {
            mode = i;
        }
    }

    WindowLabels {
        share_c: shares[0],
        share_t: shares[1],
        share_k: shares[2],
        state_mode: mode as i64,
        is_pure_80: if shares[mode] >= PURITY_THRESHOLD { 1.0 } else { 0.0 },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Regime::{Cartel, Competitive, Tacit};

    #[test]
    fn shares_sum_to_one() {
        let labels = summarize_window_states(&[Competitive, Tacit, Tacit, Cartel]);
        let sum = labels.share_c + labels.share_t + labels.share_k;
        assert!((sum - 1.0).abs() < 1e-12);
        assert_eq!(labels.share_t, 0.5);
    }

    #[test]
    fn mode_is_most_frequent_regime() {
        let labels = summarize_window_states(&[Cartel, Cartel, Cartel, Tacit]);
        assert_eq!(labels.state_mode, 2);
    }

    #[test]
    fn ties_break_to_lowest_index() {
        let labels = summarize_window_states(&[Tacit, Competitive, Competitive, Tacit]);
        assert_eq!(labels.state_mode, 0);

        let labels = summarize_window_states(&[Cartel, Tacit, Tacit, Cartel]);
        assert_eq!(labels.state_mode, 1);
    }

    #[test]
    fn purity_flag_uses_80_percent_threshold() {
        let pure = summarize_window_states(&[Competitive; 5]);
        assert_eq!(pure.is_pure_80, 1.0);

        // 4 of 5 = exactly 0.80: inclusive threshold
        let boundary = summarize_window_states(&[
            Competitive,
            Competitive,
            Competitive,
            Competitive,
            Tacit,
        ]);
        assert_eq!(boundary.is_pure_80, 1.0);

        // 3 of 5 = 0.60
        let mixed = summarize_window_states(&[
            Competitive,
            Competitive,
            Competitive,
            Tacit,
            Cartel,
        ]);
        assert_eq!(mixed.is_pure_80, 0.0);
    }

    #[test]
    fn empty_window_yields_sentinels() {
        let labels = summarize_window_states(&[]);
        assert_eq!(labels.state_mode, MODE_UNDEFINED);
        assert_eq!(labels.is_pure_80, 0.0);
        assert_eq!(labels.share_c + labels.share_t + labels.share_k, 0.0);
    }
}
