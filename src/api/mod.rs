//! Tabular API Server module
//!
//! HTTP endpoints for file export (records → download) and import (upload → rows).
//! Run with `tabular-server`.

pub mod handlers;
pub mod server;
pub mod sink;

pub use server::{build_router, run_api_server};
pub use sink::HttpResponseSink;
