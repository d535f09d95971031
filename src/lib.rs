//! Skiff - Minimal HTTP/1.1 File and Echo Server
//!
//! Core library for parsing requests off raw TCP, routing them to a fixed
//! handler table, and writing hand-assembled responses.

pub mod config;
pub mod http;
pub mod routing;
pub mod server;
