//! Mediaforge - On-demand image and video transformation service
//!
//! This library crate exposes the server and configuration for integration testing.

pub mod config;
pub mod server;
