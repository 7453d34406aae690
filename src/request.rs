//! Graph request data model, path-expression parsing and request combining.
//!
//! Requests are plain values: parsing builds them, combining builds new ones
//! from old ones, and nothing mutates a request after it is submitted.

pub mod combine;
pub mod kind;
pub mod parse;
pub mod types;

pub use combine::combine;
pub use kind::OperationKind;
pub use parse::{parse, parse_all};
pub use types::{
    ChildOption, CompositeRequest, GraphRequest, ObjectId, Request, SkipHeadRequest,
    TargetObjects, TypeName,
};
