//! Execution tests
//!
//! Bulk execution, on-demand execution and result caching.
