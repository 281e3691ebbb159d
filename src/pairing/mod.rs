//! Pair balancing for full matches

pub mod balancer;

pub use balancer::{balance_pairs, level_gap, pair_level};
