//! The refresh pipeline: corpus in, published snapshot out.
//!
//! [`GraphEngine`] owns the currently published [`GraphSnapshot`] and drives
//! full rebuilds. Refreshes are serialized through an async mutex: a refresh
//! requested while one is running waits for it and then runs against the
//! then-current corpus, so the last requester always observes a snapshot at
//! least as fresh as its request. Readers are never blocked; they keep the
//! `Arc` they cloned until they drop it.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::{
    codec::{resolve_intents, BuildDiagnostic, GraphBuilder, UnresolvedLink},
    config::GraphConfig,
    error::NotegraphError,
    model::GraphSnapshot,
    provider::CorpusProvider,
    stats::GraphStats,
};

/// Where the engine currently is in its lifecycle.
///
/// The phase describes the most recent refresh, not snapshot availability:
/// a failed refresh returns to `Idle` while an earlier snapshot stays
/// published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildPhase {
    /// No refresh has run, or the last one failed.
    Idle,
    /// Pass 1 is running: documents are being read and registered.
    Building,
    /// Pass 2 is running: link intents are being matched.
    Resolving,
    /// A snapshot is published and current.
    Ready,
}

/// Outcome of one successful refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildReport {
    pub stats: GraphStats,
    /// References that matched no File node. Duplicated into `diagnostics`
    /// for uniform reporting; kept separate here because callers routinely
    /// want just this list.
    pub unresolved: Vec<UnresolvedLink>,
    pub diagnostics: Vec<BuildDiagnostic>,
}

/// Builds and publishes graph snapshots from a corpus provider.
pub struct GraphEngine {
    provider: Arc<dyn CorpusProvider>,
    config: GraphConfig,
    snapshot: RwLock<Option<Arc<GraphSnapshot>>>,
    phase: RwLock<BuildPhase>,
    refresh_lock: Mutex<()>,
}

impl GraphEngine {
    pub fn new(provider: Arc<dyn CorpusProvider>, config: GraphConfig) -> Self {
        GraphEngine {
            provider,
            config,
            snapshot: RwLock::new(None),
            phase: RwLock::new(BuildPhase::Idle),
            refresh_lock: Mutex::new(()),
        }
    }

    /// The currently published snapshot, if any refresh has succeeded.
    pub fn snapshot(&self) -> Option<Arc<GraphSnapshot>> {
        self.snapshot.read().clone()
    }

    pub fn phase(&self) -> BuildPhase {
        *self.phase.read()
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    fn set_phase(&self, phase: BuildPhase) {
        *self.phase.write() = phase;
    }

    /// Rebuild the graph from the current corpus and publish the result
    /// atomically.
    ///
    /// Per-document read failures and parse failures degrade to diagnostics
    /// and the build continues. Only corpus enumeration failure is fatal: it
    /// returns [`NotegraphError::Provider`], the engine returns to `Idle`,
    /// and the previously published snapshot is left untouched.
    pub async fn refresh(&self) -> Result<BuildReport, NotegraphError> {
        let _serialized = self.refresh_lock.lock().await;
        self.set_phase(BuildPhase::Building);

        let entries = match self.provider.list_documents().await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::error!("Refresh aborted, corpus enumeration failed: {e}");
                self.set_phase(BuildPhase::Idle);
                return Err(match e {
                    NotegraphError::Provider(_) => e,
                    other => NotegraphError::Provider(other.to_string()),
                });
            }
        };

        let mut builder = GraphBuilder::new(self.config);
        let mut diagnostics = Vec::new();
        for entry in entries.iter().filter(|e| e.kind.is_markdown()) {
            match self.provider.read_document(&entry.path).await {
                Ok(content) => builder.add_document(&entry.path, &content),
                Err(e) => {
                    tracing::warn!("Cannot read {}: {e}", entry.path);
                    diagnostics.push(BuildDiagnostic::read_error(&entry.path, e.to_string()));
                    builder.add_unreadable_document(&entry.path);
                }
            }
        }

        self.set_phase(BuildPhase::Resolving);
        let pass1 = builder.finish();
        diagnostics.extend(pass1.diagnostics);
        let resolution = resolve_intents(&pass1.registry, pass1.intents);
        diagnostics.extend(
            resolution
                .unresolved
                .iter()
                .cloned()
                .map(BuildDiagnostic::UnresolvedLink),
        );

        let mut edges = pass1.local_edges;
        edges.extend(resolution.edges);
        let snapshot = GraphSnapshot::new(pass1.registry.into_nodes(), edges);
        let stats = GraphStats::from_snapshot(&snapshot);

        *self.snapshot.write() = Some(Arc::new(snapshot));
        self.set_phase(BuildPhase::Ready);

        let summary = format!(
            "Refresh complete: {} files, {} headings, {} edges, {} unresolved, avg degree {}",
            stats.file_count,
            stats.heading_count,
            stats.edge_count,
            resolution.unresolved.len(),
            stats.average_degree
        );
        tracing::info!("{summary}");
        diagnostics.push(BuildDiagnostic::info(summary));

        Ok(BuildReport {
            stats,
            unresolved: resolution.unresolved,
            diagnostics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::helpers::MemoryCorpus;

    #[tokio::test]
    async fn test_phase_starts_idle_and_ends_ready() {
        let corpus = MemoryCorpus::new().with_doc("a.md", "hello");
        let engine = GraphEngine::new(Arc::new(corpus), GraphConfig::default());

        assert_eq!(engine.phase(), BuildPhase::Idle);
        assert!(engine.snapshot().is_none());

        engine.refresh().await.expect("refresh succeeds");
        assert_eq!(engine.phase(), BuildPhase::Ready);
        assert!(engine.snapshot().is_some());
    }

    #[tokio::test]
    async fn test_report_carries_build_summary() {
        let corpus = MemoryCorpus::new().with_doc("a.md", "# A\n[[b]]");
        let engine = GraphEngine::new(Arc::new(corpus), GraphConfig::default());

        let report = engine.refresh().await.expect("refresh succeeds");
        let summaries: Vec<&str> = report
            .diagnostics
            .iter()
            .filter_map(|d| match d {
                BuildDiagnostic::Info(msg) => Some(msg.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(summaries.len(), 1);
        assert!(summaries[0].contains("1 files"));
        assert!(summaries[0].contains("1 unresolved"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_refreshes_serialize() {
        let corpus = MemoryCorpus::new()
            .with_doc("a.md", "# A\nsee [[b]] #t")
            .with_doc("b.md", "# B\nback to [a](a.md)");
        let engine = Arc::new(GraphEngine::new(
            Arc::new(corpus),
            GraphConfig {
                include_headings: true,
                include_subheadings: true,
            },
        ));

        let first = tokio::spawn({
            let engine = Arc::clone(&engine);
            async move { engine.refresh().await }
        });
        let second = tokio::spawn({
            let engine = Arc::clone(&engine);
            async move { engine.refresh().await }
        });
        let (first, second) = tokio::join!(first, second);
        let first = first.expect("task completes").expect("refresh succeeds");
        let second = second.expect("task completes").expect("refresh succeeds");

        // Both builds ran against the same corpus, so they agree.
        assert_eq!(first.stats, second.stats);
        assert_eq!(engine.phase(), BuildPhase::Ready);

        // The published snapshot is a complete, consistent build.
        let snapshot = engine.snapshot().expect("snapshot published");
        let ids: std::collections::HashSet<_> =
            snapshot.nodes().iter().map(|n| &n.id).collect();
        for edge in snapshot.edges() {
            assert!(ids.contains(&edge.source));
            assert!(ids.contains(&edge.target));
        }
        assert_eq!(
            crate::stats::GraphStats::from_snapshot(&snapshot),
            first.stats
        );
    }

    #[tokio::test]
    async fn test_non_markdown_documents_are_ignored() {
        let corpus = MemoryCorpus::new()
            .with_doc("a.md", "[[b]]")
            .with_doc("image.png", "binary")
            .with_doc("b.md", "");
        let engine = GraphEngine::new(Arc::new(corpus), GraphConfig::default());

        let report = engine.refresh().await.expect("refresh succeeds");
        assert_eq!(report.stats.file_count, 2);
    }

    #[tokio::test]
    async fn test_provider_failure_keeps_previous_snapshot() {
        let corpus = MemoryCorpus::new().with_doc("a.md", "# A");
        let engine = GraphEngine::new(Arc::new(corpus.clone()), GraphConfig::default());
        engine.refresh().await.expect("first refresh succeeds");
        let published = engine.snapshot().expect("snapshot published");

        corpus.fail_listing(true);
        let err = engine.refresh().await.expect_err("enumeration fails");
        assert!(matches!(err, NotegraphError::Provider(_)));
        assert_eq!(engine.phase(), BuildPhase::Idle);

        let still_published = engine.snapshot().expect("snapshot retained");
        assert!(Arc::ptr_eq(&published, &still_published));

        // A later successful refresh recovers.
        corpus.fail_listing(false);
        engine.refresh().await.expect("recovery succeeds");
        assert_eq!(engine.phase(), BuildPhase::Ready);
    }

    #[tokio::test]
    async fn test_unreadable_document_degrades_not_fails() {
        let corpus = MemoryCorpus::new()
            .with_doc("good.md", "[[broken]]")
            .with_unreadable_doc("broken.md");
        let engine = GraphEngine::new(Arc::new(corpus), GraphConfig::default());

        let report = engine.refresh().await.expect("refresh succeeds");
        assert_eq!(report.stats.file_count, 2);
        assert!(report
            .diagnostics
            .iter()
            .any(|d| matches!(d, BuildDiagnostic::ReadError { path, .. } if path == "broken.md")));
        // The degraded file is still a reference target.
        assert!(report.unresolved.is_empty());
        assert_eq!(report.stats.reference_count, 1);
    }
}
