//! Two-pass graph compilation from a markdown corpus.
//!
//! [`md`] extracts structural facts from raw document text. [`builder`]
//! (Pass 1) turns those facts into nodes, document-local edges, and deferred
//! link intents. [`resolver`] (Pass 2) matches the intents against the
//! completed node registry, which is what makes ingestion order irrelevant.
//! [`diagnostic`] carries the non-fatal issues both passes surface as data.

pub mod builder;
pub mod diagnostic;
pub mod md;
pub mod resolver;

pub use builder::{GraphBuilder, LinkIntent, NodeRegistry, Pass1Output};
pub use diagnostic::{BuildDiagnostic, UnresolvedLink};
pub use md::{extract_facts, DocumentFacts, Heading};
pub use resolver::{resolve_intents, Resolution};
