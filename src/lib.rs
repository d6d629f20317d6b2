//! `Flamore` - session and data-sync core of the club member app.
//!
//! This crate talks to the club backend, keeps the logged-in session, loads
//! trainings, rosters, news, profile and club data, and derives the view
//! models the screens render.

// Re-export public modules for use in integration tests and as a library
pub mod api;
pub mod app;
pub mod auth;
pub mod config;
pub mod constants;
pub mod dates;
pub mod error;
pub mod fetch;
pub mod session;
pub mod types;
pub mod views;

#[cfg(test)]
pub(crate) mod testing;
