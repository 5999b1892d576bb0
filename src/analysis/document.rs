//! Multi-page document analysis.
//!
//! Pages are independent: each one goes through [`FormAnalyzer::analyze_page`] on its
//! own, and the per-page results are assembled in caller order. Documents above the
//! configured page threshold run on the rayon pool.
//!
//! [`DocumentAnalyzer::spawn`] runs the same work in the background and hands back a
//! [`DocumentJob`] whose result is delivered over a bounded channel.

use super::analyzer::{FormAnalyzer, PageInput};
use super::result::{DocumentResult, PageResult};
use crate::core::config::ParallelPolicy;
use crate::core::errors::{FormError, FormResult, ProcessingStage};
use crossbeam_channel::{Receiver, TryRecvError, bounded};
use rayon::prelude::*;
use std::sync::Arc;
use std::time::Instant;

/// Analyzes every page of a document.
#[derive(Debug, Clone)]
pub struct DocumentAnalyzer {
    analyzer: Arc<FormAnalyzer>,
    policy: ParallelPolicy,
}

impl DocumentAnalyzer {
    pub fn new(analyzer: FormAnalyzer) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
            policy: ParallelPolicy::default(),
        }
    }

    /// Sets the parallel processing policy.
    pub fn with_policy(mut self, policy: ParallelPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The page analyzer shared by all pages.
    pub fn analyzer(&self) -> &FormAnalyzer {
        &self.analyzer
    }

    /// Analyzes all pages, preserving their order.
    ///
    /// The first failing page aborts the document; the error names the page index.
    pub fn analyze(&self, pages: &[PageInput]) -> FormResult<DocumentResult> {
        let start = Instant::now();
        let use_parallel = self.policy.should_parallelize(pages.len());
        tracing::debug!(
            "Analyzing {} pages {}",
            pages.len(),
            if use_parallel { "in parallel" } else { "sequentially" }
        );

        let analyze_one = |(index, page): (usize, &PageInput)| -> FormResult<PageResult> {
            self.analyzer
                .analyze_page(page)
                .map_err(|err| FormError::page_error(index, err))
        };

        // Indexed collection keeps caller order in both branches.
        let results: Vec<PageResult> = if use_parallel {
            pages
                .par_iter()
                .enumerate()
                .map(analyze_one)
                .collect::<FormResult<_>>()?
        } else {
            pages
                .iter()
                .enumerate()
                .map(analyze_one)
                .collect::<FormResult<_>>()?
        };

        let document = DocumentResult::from_pages(results);
        tracing::info!(
            "Analyzed {} pages in {:.2}ms: {} fields",
            document.meta.pages,
            start.elapsed().as_secs_f64() * 1000.0,
            document.field_count()
        );
        Ok(document)
    }

    /// Starts analyzing `pages` on the rayon pool and returns immediately.
    pub fn spawn(&self, pages: Vec<PageInput>) -> DocumentJob {
        let (result_tx, result_rx) = bounded(1);
        let worker = self.clone();
        let page_count = pages.len();

        rayon::spawn(move || {
            let result = worker.analyze(&pages);
            // The receiver may already be gone if the job handle was dropped.
            if result_tx.send(result).is_err() {
                tracing::debug!("Document job result discarded: handle dropped");
            }
        });

        DocumentJob {
            page_count,
            result_rx,
        }
    }
}

impl Default for DocumentAnalyzer {
    fn default() -> Self {
        Self::new(FormAnalyzer::default())
    }
}

/// Handle to a document analysis running in the background.
#[derive(Debug)]
pub struct DocumentJob {
    page_count: usize,
    result_rx: Receiver<FormResult<DocumentResult>>,
}

impl DocumentJob {
    /// Number of pages submitted with this job.
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Blocks until the document result is available.
    pub fn wait(self) -> FormResult<DocumentResult> {
        self.result_rx.recv().map_err(|err| worker_lost(err.to_string()))?
    }

    /// Returns the result if the job has finished, without blocking.
    ///
    /// Returns `None` while the job is still running. Once a result has been returned
    /// the job is spent, and later calls report a lost worker.
    pub fn try_wait(&self) -> Option<FormResult<DocumentResult>> {
        match self.result_rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(err @ TryRecvError::Disconnected) => Some(Err(worker_lost(err.to_string()))),
        }
    }
}

fn worker_lost(reason: String) -> FormError {
    FormError::Processing {
        kind: ProcessingStage::DocumentAnalysis,
        context: "document worker exited without a result".to_string(),
        source: reason.into(),
    }
}
