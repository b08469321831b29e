//! PF-WENSLO-ARLON - Picture-Fuzzy Decision Support
//!
//! This crate derives criterion weights from picture-fuzzy judgments (WENSLO)
//! and ranks candidate interventions by their weighted scores (ARLON).

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
