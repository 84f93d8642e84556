//! Common, shared types.

pub mod invariant;
pub mod pool;
pub mod rng;
pub mod state;
pub mod tunables;

#[cfg(test)]
pub mod test_utils;
