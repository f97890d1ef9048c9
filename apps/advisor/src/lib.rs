//! Client for the student potential and personal-brand analysis service.
//!
//! The form draft is validated locally ([`form`]), submitted through the
//! three-call workflow ([`analysis_client`]) under the control of a small
//! state machine ([`session`]), and rendered as text ([`render`]). A
//! development stand-in for the service lives in [`stub`].

pub mod analysis_client;
pub mod commands;
pub mod config;
pub mod errors;
pub mod form;
pub mod models;
pub mod render;
pub mod routes;
pub mod session;
pub mod state;
pub mod stub;

#[cfg(test)]
mod test_support;
