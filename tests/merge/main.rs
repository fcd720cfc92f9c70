#[path = "../common/mod.rs"]
mod common;

mod merge_conflict;
mod merge_fast_forward;
mod merge_simple_divergence;
