//! Property-listing management client.
//!
//! The edit screen fetches one listing and hands it to the form; the form
//! owns a local draft and writes it back to the REST backend.

pub mod api;
pub mod cli;
pub mod config;
pub mod form;
pub mod models;
pub mod mvi;
pub mod screens;
