//! graphbatch: batching and completion tracking for bulk graph operations
//!
//! Parses object references into graph requests, merges them into as few
//! requests as possible, submits them to a graph service as one unit, tracks
//! the returned handle to completion, and renders the outcome.

pub mod cli;
pub mod command;
pub mod config;
pub mod error;
pub mod logging;
pub mod report;
pub mod request;
pub mod service;
pub mod tracker;
