//! Path-expression parser: `Type[/Type...]:id[,id...]`.
//!
//! A single-segment path targets that type directly. A longer path becomes a
//! skip-head request anchored at the first segment and applied to the last.

use crate::error::ParseError;
use crate::request::kind::OperationKind;
use crate::request::types::{GraphRequest, ObjectId, Request, SkipHeadRequest};
use std::collections::BTreeSet;

/// Parse one target token into a request of the given kind.
///
/// Pure: no I/O, no logging.
pub fn parse(token: &str, kind: OperationKind) -> Result<Request, ParseError> {
    let token = token.trim();
    let (path, id_list) = token
        .split_once(':')
        .ok_or_else(|| ParseError::MissingSeparator(token.to_string()))?;

    let segments = parse_path(path, token)?;
    let ids = parse_ids(id_list, token)?;

    let anchor = segments[0];
    let request = GraphRequest::for_type(kind, anchor, ids);

    if segments.len() == 1 {
        return Ok(Request::Graph(request));
    }

    let start_from = segments[segments.len() - 1];
    Ok(Request::SkipHead(SkipHeadRequest::new(
        anchor, start_from, request,
    )))
}

/// Parse every token, stopping at the first malformed one.
pub fn parse_all<S: AsRef<str>>(
    tokens: &[S],
    kind: &OperationKind,
) -> Result<Vec<Request>, ParseError> {
    tokens
        .iter()
        .map(|token| parse(token.as_ref(), kind.clone()))
        .collect()
}

fn parse_path<'a>(path: &'a str, token: &str) -> Result<Vec<&'a str>, ParseError> {
    if path.is_empty() {
        return Err(ParseError::EmptyPath(token.to_string()));
    }
    if path.starts_with('/') {
        return Err(ParseError::LeadingSlash(token.to_string()));
    }

    let mut segments = Vec::new();
    for segment in path.split('/') {
        if segment.is_empty() {
            return Err(ParseError::EmptySegment(path.to_string()));
        }
        if segment.contains('+') {
            return Err(ParseError::PlusInSegment(segment.to_string()));
        }
        if segment.chars().any(char::is_whitespace) {
            return Err(ParseError::WhitespaceInSegment(segment.to_string()));
        }
        segments.push(segment);
    }
    Ok(segments)
}

fn parse_ids(id_list: &str, token: &str) -> Result<BTreeSet<ObjectId>, ParseError> {
    id_list
        .split(',')
        .map(|id| {
            let invalid = || ParseError::InvalidId {
                id: id.to_string(),
                token: token.to_string(),
            };
            // u64::from_str also takes a leading '+'
            if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            id.parse::<ObjectId>().map_err(|_| invalid())
        })
        .collect()
}
