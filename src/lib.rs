//! Five-role team assignment: role suitability, pair synergy, Hungarian
//! matching, ranked alternatives and explanations.

pub mod error;
pub mod input;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod report;

pub use error::{EngineError, EngineResult};
pub use model::assignment::{Assignment, OptimizationResult};
pub use model::player::PlayerCandidate;
pub use model::roles::Role;
pub use model::weights::EngineConfig;
pub use pipeline::optimize;
pub use pipeline::stage2_pair_synergy::{HistoryLookup, NoHistory, PairHistory, SynergySource};

#[cfg(test)]
#[path = "../tests/src_inline/fixtures.rs"]
pub(crate) mod fixtures;
