//! Thread-level orchestration.
//!
//! ```text
//! Corpus ──utterance_threads──▶ Thread ──▶ full graph ──▶ degree + motif feats
//!                                     └──▶ mid graph  ──▶ degree + motif feats (suffixed)
//!                                                       ▼
//!                                          one FeatureMap per thread root
//! ```
//!
//! Every thread builds its own graphs, so threads are independent. With the
//! `parallel` feature they run on rayon's pool; output order is unchanged.

use std::collections::BTreeMap;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::builder::HypergraphBuilder;
use crate::config::HyperConvoConfig;
use crate::corpus::{Corpus, Thread};
use crate::model::{Message, Value};
use crate::stats::{FeatureMap, ThreadVariant, degree_feats, motif_feats};
use crate::{Error, Result};

/// Meta key under which `transform` stores features on conversations.
pub const META_KEY: &str = "hyperconvo";

/// Features of one qualifying thread.
#[derive(Debug, Clone, PartialEq)]
pub struct ThreadRecord {
    pub root: String,
    pub conversation: String,
    pub features: FeatureMap,
}

/// Hypergraph feature extractor.
#[derive(Debug, Clone, Default)]
pub struct HyperConvo {
    config: HyperConvoConfig,
}

impl HyperConvo {
    pub fn new(config: HyperConvoConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &HyperConvoConfig {
        &self.config
    }

    /// Degree and motif features of one thread, for the full thread and for
    /// the thread without `root`.
    pub fn thread_features(root: &str, messages: &[Message]) -> Result<FeatureMap> {
        let full = HypergraphBuilder::new().messages(messages).build()?;
        let mid = HypergraphBuilder::new().messages(messages).exclude(root).build()?;

        let mut stats = FeatureMap::new();
        stats.extend(degree_feats(&full, ThreadVariant::Full.degree_suffix()));
        stats.extend(motif_feats(&full, ThreadVariant::Full.motif_suffix()));
        stats.extend(degree_feats(&mid, ThreadVariant::Mid.degree_suffix()));
        stats.extend(motif_feats(&mid, ThreadVariant::Mid.motif_suffix()));
        Ok(stats)
    }

    fn record(thread: &Thread) -> Result<ThreadRecord> {
        let features = Self::thread_features(&thread.root, &thread.messages)
            .map_err(|e| Error::Thread { root: thread.root.clone(), source: Box::new(e) })?;
        Ok(ThreadRecord {
            root: thread.root.clone(),
            conversation: thread.conversation.clone(),
            features,
        })
    }

    /// Features of every qualifying thread, in thread order.
    pub fn thread_records(&self, corpus: &Corpus) -> Result<Vec<ThreadRecord>> {
        let threads: Vec<Thread> = corpus
            .utterance_threads(Some(self.config.prefix_len), self.config.include_root)
            .into_iter()
            .filter(|t| {
                let keep = t.len() >= self.config.min_thread_len;
                if !keep {
                    tracing::debug!(root = %t.root, len = t.len(), "thread below min_thread_len; skipped");
                }
                keep
            })
            .collect();

        #[cfg(feature = "parallel")]
        let results: Vec<Result<ThreadRecord>> = threads.par_iter().map(Self::record).collect();
        #[cfg(not(feature = "parallel"))]
        let results: Vec<Result<ThreadRecord>> = threads.iter().map(Self::record).collect();

        let mut records = Vec::with_capacity(results.len());
        for result in results {
            match result {
                Ok(record) => records.push(record),
                Err(e) if self.config.continue_on_error => {
                    tracing::warn!(error = %e, "thread feature extraction failed; continuing");
                }
                Err(e) => return Err(e),
            }
        }

        tracing::debug!(threads = records.len(), "extracted hypergraph features");
        Ok(records)
    }

    /// Thread root id → features.
    pub fn retrieve_feats(&self, corpus: &Corpus) -> Result<BTreeMap<String, FeatureMap>> {
        Ok(self.thread_records(corpus)?
            .into_iter()
            .map(|r| (r.root, r.features))
            .collect())
    }

    /// Compute features and store them on each conversation under
    /// [`META_KEY`], as a map from thread root id to that thread's features.
    /// With `include_root` the only key is the conversation root; otherwise
    /// there is one key per qualifying top-level reply.
    pub fn transform(&self, corpus: &mut Corpus) -> Result<()> {
        let records = self.thread_records(corpus)?;

        let mut per_conversation: BTreeMap<String, Vec<ThreadRecord>> = BTreeMap::new();
        for record in records {
            per_conversation.entry(record.conversation.clone()).or_default().push(record);
        }

        for (conversation, records) in per_conversation {
            let convo = corpus
                .get_conversation_mut(&conversation)
                .ok_or_else(|| Error::NotFound(format!("Conversation {conversation}")))?;
            let threads: std::collections::HashMap<String, Value> = records
                .into_iter()
                .map(|r| (r.root, Value::Map(r.features.into_iter().collect())))
                .collect();
            convo.add_meta(META_KEY, Value::Map(threads));
        }
        Ok(())
    }
}
