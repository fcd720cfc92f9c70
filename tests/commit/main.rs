#[path = "../common/mod.rs"]
mod common;

mod commit_and_log;
mod global_log_and_find;
