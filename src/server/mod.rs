//! Listening socket and connection acceptance.

pub mod listener;
