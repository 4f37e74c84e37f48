//! Shared foundational types used across the hwif interface resolver.
//!
//! This crate provides the raw descriptor value type, bit-width arithmetic,
//! clock frequencies, content hashing of resolved models, and the
//! depth-tracking writer used by every diagnostic dump.

#![warn(missing_docs)]

pub mod dump;
pub mod frequency;
pub mod hash;
pub mod value;
pub mod width;

pub use dump::{Dump, Dumper};
pub use frequency::{Frequency, ParseFrequencyError};
pub use hash::{ContentHash, HashError};
pub use value::RawValue;
pub use width::{bits_for_count, bits_for_value, is_digit_string};
