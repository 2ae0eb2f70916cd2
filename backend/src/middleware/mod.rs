//! Request middleware.
//!
//! Purpose: request lifecycle concerns that wrap the whole service, currently
//! trace identifier propagation.

pub mod trace;

pub use trace::Trace;
