//! HTTP inbound adapter.
//!
//! Requests are routed by an explicit ordered [`router::Router`] rather than
//! Actix's own routing; handlers return [`reply::Reply`] descriptors.

pub mod health;
pub mod pages;
pub mod path;
pub mod reply;
pub mod router;
pub mod routes;
pub mod service;
pub mod state;
pub mod users;
