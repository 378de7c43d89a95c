//! Integration tests for pixelgraph crates.
//!
//! This crate contains end-to-end tests that verify the interaction between
//! the graph, evaluation strategies, and the output driver.
