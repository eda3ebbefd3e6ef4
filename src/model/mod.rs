pub mod assignment;
pub mod compat;
pub mod flags;
pub mod player;
pub mod roles;
pub mod scores;
pub mod weights;

#[cfg(test)]
#[path = "../../tests/src_inline/model/tests.rs"]
mod tests;
