//! Analytical intra-beam scattering engines.
//!
//! Nagaitsev and Bjorken-Mtingwa growth rates, the Coulomb logarithm and
//! the cache-aware emittance evolution shared by both formalisms.

pub mod analytical;
pub mod bjorken_mtingwa;
pub mod coulomb;
pub mod evolution;
pub mod formalism;
pub mod nagaitsev;

pub use analytical::{AnalyticalIbs, EvolutionOptions, GrowthRateOptions, IbsState};
pub use bjorken_mtingwa::BjorkenMtingwaIbs;
pub use formalism::{growth_rates_from_config, Formalism, IbsRun};
pub use nagaitsev::NagaitsevIbs;
