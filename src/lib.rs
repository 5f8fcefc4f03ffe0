//! Focus Timer - Pomodoro-style focus cycles
//!
//! Users start a named task with a fixed duration, watch a live
//! countdown, and either interrupt it or let it finish. Every cycle is
//! kept in an append-only history that survives restarts.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
