//! iCalendar serialization (RFC 5545).
//!
//! This module provides serializers for iCalendar content:
//! - Escape: TEXT escaping and RFC 6868 parameter encoding
//! - Fold: Content line folding at 75 octets
//! - Serializer: Document serialization with configurable parameter order

mod escape;
mod fold;
mod serializer;

pub use escape::{escape_param_value, escape_text};
pub use fold::fold_line;
pub use serializer::{
    SerializeOptions, serialize, serialize_component, serialize_property, serialize_with,
};
