//! Picture-fuzzy primitives.
//!
//! - `PictureFuzzyValue` - the `(μ, ν, π)` judgment and its `μ − π` score
//! - `Lexicon` - linguistic labels mapped to canonical values

mod lexicon;
mod picture_fuzzy;

pub use lexicon::{normalize_label, Lexicon};
pub use picture_fuzzy::PictureFuzzyValue;
