//! Shared fixtures for crate-internal tests.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::{
    error::NotegraphError,
    provider::{CorpusProvider, DocumentEntry},
};

#[derive(Debug, Default)]
struct MemoryCorpusState {
    /// `(path, content)`; `None` content simulates an unreadable document.
    docs: Vec<(String, Option<String>)>,
    fail_listing: bool,
}

/// In-memory corpus provider.
///
/// Documents are enumerated in insertion order, which lets tests pin down
/// order-dependent behavior (resolution tie-breaking, forward references).
/// Clones share state, so a test can keep a handle while the engine owns
/// another.
#[derive(Debug, Clone, Default)]
pub struct MemoryCorpus {
    state: Arc<Mutex<MemoryCorpusState>>,
}

impl MemoryCorpus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_doc(self, path: &str, content: &str) -> Self {
        self.state
            .lock()
            .docs
            .push((path.to_string(), Some(content.to_string())));
        self
    }

    pub fn with_unreadable_doc(self, path: &str) -> Self {
        self.state.lock().docs.push((path.to_string(), None));
        self
    }

    pub fn fail_listing(&self, fail: bool) {
        self.state.lock().fail_listing = fail;
    }

    pub fn replace_doc(&self, path: &str, content: &str) {
        let mut state = self.state.lock();
        for (p, c) in state.docs.iter_mut() {
            if p == path {
                *c = Some(content.to_string());
                return;
            }
        }
        state.docs.push((path.to_string(), Some(content.to_string())));
    }
}

#[async_trait]
impl CorpusProvider for MemoryCorpus {
    async fn list_documents(&self) -> Result<Vec<DocumentEntry>, NotegraphError> {
        let state = self.state.lock();
        if state.fail_listing {
            return Err(NotegraphError::Provider(
                "Simulated enumeration failure".to_string(),
            ));
        }
        Ok(state
            .docs
            .iter()
            .map(|(path, _)| DocumentEntry::new(path.clone()))
            .collect())
    }

    async fn read_document(&self, path: &str) -> Result<String, NotegraphError> {
        let state = self.state.lock();
        match state.docs.iter().find(|(p, _)| p == path) {
            Some((_, Some(content))) => Ok(content.clone()),
            Some((_, None)) => Err(NotegraphError::Io(format!("Simulated read failure: {path}"))),
            None => Err(NotegraphError::NotFound(path.to_string())),
        }
    }
}
