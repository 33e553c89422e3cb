//! Pipeline orchestrator: discover → merge → filter → enrich → score → rank.

use std::sync::Arc;

use crate::enrich::{Enricher, StubEnricher};
use crate::filter::filter_candidates;
use crate::merge::merge_all;
use crate::providers::VenueProvider;
use crate::scoring::{score, CapacityTarget};
use crate::types::{Candidate, QuerySpec};

/// The canonical discovery pipeline.
///
/// Providers run independently and their failures stay isolated: an adapter
/// that can't reach its service (or has no credential) simply contributes
/// nothing. An empty ranked list is therefore a legitimate outcome, not an
/// error - callers render it as "no venues found".
pub struct Pipeline {
    providers: Vec<Arc<dyn VenueProvider>>,
    enricher: Arc<dyn Enricher>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Pipeline {
    /// Create an empty pipeline with the stub enricher.
    pub fn new() -> Self {
        Self {
            providers: vec![],
            enricher: Arc::new(StubEnricher::new()),
        }
    }

    /// Add a discovery provider.
    pub fn with_provider(mut self, provider: impl VenueProvider + 'static) -> Self {
        self.providers.push(Arc::new(provider));
        self
    }

    /// Replace the enricher.
    pub fn with_enricher(mut self, enricher: impl Enricher + 'static) -> Self {
        self.enricher = Arc::new(enricher);
        self
    }

    /// Run the full pipeline for one query.
    ///
    /// Returns the complete ranked list, best first. Truncation and
    /// pagination are caller concerns.
    pub async fn run(&self, query: &QuerySpec) -> Vec<Candidate> {
        // Providers are independent reads; run them concurrently. A provider
        // that fails internally just contributes an empty list.
        let per_provider = futures::future::join_all(
            self.providers.iter().map(|provider| provider.discover(query)),
        )
        .await;
        for (provider, found) in self.providers.iter().zip(&per_provider) {
            tracing::info!(provider = provider.name(), count = found.len(), "discovery done");
        }

        let merged = merge_all(per_provider);
        tracing::debug!(count = merged.len(), "merged candidates");

        let relevant = filter_candidates(merged, query);
        tracing::debug!(count = relevant.len(), "relevant candidates");

        let mut enriched = Vec::with_capacity(relevant.len());
        for candidate in relevant {
            enriched.push(self.enricher.enrich(candidate).await);
        }

        let target = CapacityTarget::for_attendees(query.attendees);
        for candidate in &mut enriched {
            let result = score(candidate, target);
            candidate.score_total = result.total;
            candidate.reason_text = Some(result.reason);
            candidate.score_components = Some(result.components);
        }

        // Stable sort: equal scores keep their first-seen merge order
        enriched.sort_by(|a, b| {
            b.score_total
                .partial_cmp(&a.score_total)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        for (index, candidate) in enriched.iter_mut().enumerate() {
            candidate.rank = Some(index as u32 + 1);
        }

        tracing::info!(count = enriched.len(), "ranked candidates");
        enriched
    }
}
