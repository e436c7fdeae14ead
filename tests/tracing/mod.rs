//! Tests for tracing functionality
//!
//! These tests verify that the tracing feature works correctly when enabled
//! and that the library works the same without it.

#[cfg(feature = "tracing")]
mod with_tracing;
