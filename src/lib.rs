//! # healthpath
//!
//! Process bootstrap for HealthPath: configuration loading, tracing setup and
//! dependency wiring. Domain logic lives in the `hp-*` crates.

pub mod bootstrap;
