//! Versioned wire schema for the store boundary
//!
//! Records crossing the store boundary have a fixed, versioned shape.
//! Numeric macro fields are coerced, not trusted: numbers, numeric strings,
//! null, or absent values all become non-negative integers (anything invalid
//! becomes 0), so a malformed macro never fails an entry. Structurally
//! unusable records (wrong schema tag, empty meal name) are rejected here
//! instead of leaking into the aggregation code.

mod insight;
mod record;

pub use insight::*;
pub use record::*;
