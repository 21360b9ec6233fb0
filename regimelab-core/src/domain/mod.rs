//! Domain types for the conduct-regime simulator.

pub mod params;
pub mod regime;
pub mod series;

pub use params::MarketParams;
pub use regime::{PerRegime, Regime};
pub use series::{MarketSeries, Panel};
