//! Application core — hardware-agnostic command execution and events.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
