//! Bracket micro-markup decoding.

mod classifier;
mod decoder;
pub mod grammar;
mod options;

pub use classifier::classify_fragment;
pub use decoder::{decode, decode_all, decode_paragraph, decode_with_options};
pub use options::DecodeOptions;
