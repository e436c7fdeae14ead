//! Graph shape tests
//!
//! Diamonds, chains, fan-out/fan-in and reduction trees.

mod chain;
