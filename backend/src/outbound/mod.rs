//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **memory**: in-process `UserStore` for local runs and tests
//! - **persistence**: PostgreSQL `UserStore` using Diesel
//! - **templates**: HTML templates embedded at compile time
//!
//! Adapters are thin translators between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod memory;
pub mod persistence;
pub mod templates;
