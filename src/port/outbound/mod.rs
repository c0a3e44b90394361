//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe the pipeline's infrastructure dependencies:
//! the relational store, the run lock, and the analytics cache.

pub mod cache;
pub mod lock;
pub mod sales;
