// src/fetch/mod.rs
// =============================================================================
// This module performs the HTTP GETs of a run.
//
// Submodules:
// - http: the Fetcher, a thin wrapper around a shared reqwest client
//
// Two kinds of fetch exist:
// - fetch_text: listing page and detail pages (HTML)
// - fetch_bytes: images (raw bytes written straight to disk)
// =============================================================================

mod http;

pub use http::Fetcher;
