//! RegimeLab Core — synthetic conduct-regime market panels.
//!
//! A regime-switching market simulator and windowing/feature pipeline:
//! - Domain types (regimes, market parameters, series, panel)
//! - Parameter sampler with stress-test ablation modes
//! - 3-state Markov conduct-regime path generator
//! - Market series simulator (AR(1) cost with jumps, partial-adjustment
//!   log price) and multi-market panel orchestration
//! - Windowing engine with regime-composition labels
//! - Fixed-shape statistical feature engineering per window
//!
//! The pipeline is deterministic given a seed: panel → windows →
//! features is a pure function of (config, n_markets, seed, mode).

pub mod config;
pub mod domain;
pub mod features;
pub mod sim;
pub mod windows;

pub use config::{Bounds, ConfigError, Mode, SimulationConfig};
pub use domain::{MarketParams, MarketSeries, Panel, PerRegime, Regime};
pub use features::{compute_features, engineer_features, ChangeKind, FeatureConfig, FeatureSet, FeatureVector};
pub use sim::{simulate_panel, PanelRequest};
pub use windows::{make_windows, make_windows_multi, WindowColumns, WindowError, WindowSet};
