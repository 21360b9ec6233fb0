//! The regime-switching market simulator.
//!
//! Per market: sample structural parameters, draw a conduct-regime path,
//! then simulate latent cost and observed log price. The panel simulator
//! orchestrates all markets against one shared seeded random stream.

pub mod market;
pub mod panel;
pub mod regime_path;
pub mod sampler;

pub use market::simulate_market_series;
pub use panel::{simulate_panel, PanelRequest};
pub use regime_path::{simulate_regime_path, transition_matrix, INITIAL_DISTRIBUTION};
pub use sampler::sample_market_params;
