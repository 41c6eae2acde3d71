//! # notegraph-core
//!
//! A Rust library for extracting a navigable knowledge graph from a corpus of
//! interlinked markdown documents.
//!
//! ## Overview
//!
//! notegraph-core scans a document corpus for structural facts (headings,
//! wiki-style links, relative markdown links, tags) and resolves
//! cross-document references into a typed graph. Files, headings, and tags
//! become nodes; containment, heading hierarchy, references, and tag usage
//! become weighted, typed edges. The resulting snapshot is immutable and is
//! intended to feed independent layout/rendering code.
//!
//! ### Key Features
//!
//! - **Two-pass compilation**: link resolution is deferred until every
//!   document's nodes are registered, so forward references resolve
//!   regardless of ingestion order
//! - **Heuristic reference resolution**: raw link text is matched against
//!   known files by basename, path suffix, and direct id probe, in that order
//! - **Error tolerance**: read and parse failures degrade to diagnostics;
//!   a single malformed document never blanks out the whole graph
//! - **Immutable snapshots**: each refresh publishes a complete graph
//!   atomically; consumers never observe a half-built graph
//!
//! ## Architecture
//!
//! The library is organized around several key components:
//!
//! - **[`codec`]**: structural fact extraction ([`codec::md`]), pass-1 graph
//!   building ([`codec::builder::GraphBuilder`]), and pass-2 link resolution
//!   ([`codec::resolver`])
//! - **[`model`]**: the immutable [`model::GraphSnapshot`] handed to
//!   external consumers
//! - **[`stats`]**: corpus-level metrics derived from a snapshot
//! - **[`provider`]**: the [`provider::CorpusProvider`] boundary and a
//!   filesystem implementation
//! - **[`engine`]**: the [`engine::GraphEngine`] refresh pipeline and its
//!   `Idle -> Building -> Resolving -> Ready` lifecycle
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use notegraph_core::{
//!     config::GraphConfig,
//!     engine::GraphEngine,
//!     provider::FsCorpusProvider,
//! };
//! use std::sync::Arc;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = Arc::new(FsCorpusProvider::new("./notes"));
//!     let engine = GraphEngine::new(provider, GraphConfig::default());
//!
//!     let report = engine.refresh().await?;
//!     println!(
//!         "{} files, {} edges, {} unresolved links",
//!         report.stats.file_count,
//!         report.stats.edge_count,
//!         report.unresolved.len()
//!     );
//!
//!     let snapshot = engine.snapshot().expect("refresh succeeded");
//!     for node in snapshot.nodes() {
//!         println!("{} ({:?})", node.label, node.kind);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Diagnostics, Not Exceptions
//!
//! Per-document read failures, parse failures, and unresolved links are all
//! surfaced as [`codec::BuildDiagnostic`] values in the build report. Only a
//! corpus enumeration failure ([`NotegraphError::Provider`]) aborts a
//! refresh, and in that case the previously published snapshot is left
//! untouched.

pub mod codec;
pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod properties;
pub mod provider;
pub mod stats;
#[cfg(test)]
mod tests;

pub use error::*;
