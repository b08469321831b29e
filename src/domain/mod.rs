//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors)
//! - `fuzzy` - Picture-fuzzy values, the score function, and the lexicon
//! - `analysis` - Pure domain services for WENSLO weighting and ARLON ranking

pub mod analysis;
pub mod foundation;
pub mod fuzzy;
