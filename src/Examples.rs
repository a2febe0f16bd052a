//! Runnable demonstrations, selected by number from `main.rs`.
pub mod gg_examples;
pub mod reactor_examples;
