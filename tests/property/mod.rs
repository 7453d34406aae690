//! Property-based tests for target parsing and request combining

mod combine_properties;
mod parse_properties;
