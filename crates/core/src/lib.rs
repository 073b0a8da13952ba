//! # GroomRoute Core
//!
//! Domain models and scheduling logic for the GroomRoute mobile pet-grooming
//! service. This crate is pure computation: it owns the interval overlap and
//! slot generation rules, service-area matching, route re-sequencing, break
//! suggestions, and waitlist ranking, while all I/O (storage, HTTP) lives in
//! the sibling `db` and `api` crates.
//!
//! Every function here is synchronous and side-effect free so the scheduling
//! rules can be tested against in-memory fixtures without a database.

pub mod areas;
pub mod clock;
pub mod errors;
pub mod geo;
pub mod models;
pub mod scheduling;
pub mod watchlist;
