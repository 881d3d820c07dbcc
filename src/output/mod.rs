//! Output module
//!
//! Rendering and integration sinks for cursor state:
//! - Browser overlay (HTTP/SSE) with a rendered cursor dot
//! - Raw gesture event stream for integrating applications

pub mod browser;
pub mod sse;
