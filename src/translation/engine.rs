/*!
 * Batch translation orchestration.
 *
 * This module contains the core engine that converts a catalog's ordered unit
 * sequence into translations: it selects the pending subsequence, partitions
 * it into batches, drives the backend and the response decoder under a
 * bounded retry policy, and maps each batch result back onto the originating
 * units by position.
 */

use std::sync::Arc;
use anyhow::{Result, anyhow};
use log::{debug, error, info, warn};

use crate::errors::TranslationError;
use crate::providers::{BatchItem, Provider};
use crate::ts_catalog::{TranslationStatus, TranslationUnit};
use super::decode::decode_batch_response;

/// Summary of one translation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunReport {
    /// Total units in the catalog, pending or not
    pub total_units: usize,

    /// Pending units that received a translation
    pub translated: usize,

    /// Pending units left unprocessed by a fatal abort; 0 on success
    pub skipped: usize,

    /// Number of fatal batch failures; 0 on success
    pub errors: usize,
}

/// A pending unit with its position in the full ordered sequence
///
/// Positions are captured once, up front, so that reassembly never has to
/// recover a unit's place by value lookup — two units with identical text
/// stay distinct.
struct PendingUnit {
    position: usize,
    item: BatchItem,
}

/// Batch translation engine
///
/// One engine drives one run at a time. Batches are dispatched strictly
/// sequentially and in order; a batch only mutates units after its response
/// decoded and validated cleanly.
pub struct BatchEngine {
    /// Backend the batches are dispatched to
    provider: Arc<dyn Provider>,

    /// Source locale code
    source_language: String,

    /// Target locale code
    target_language: String,

    /// Units per batch; the last batch of a run may be smaller
    batch_size: usize,

    /// Total attempts allowed per batch before the run aborts
    max_retries: u32,
}

impl BatchEngine {
    /// Create a new engine
    ///
    /// Fails when `batch_size` or `max_retries` is zero.
    pub fn new(
        provider: Arc<dyn Provider>,
        source_language: impl Into<String>,
        target_language: impl Into<String>,
        batch_size: usize,
        max_retries: u32,
    ) -> Result<Self> {
        if batch_size == 0 {
            return Err(anyhow!("batch_size must be at least 1"));
        }
        if max_retries == 0 {
            return Err(anyhow!("max_retries must be at least 1"));
        }

        Ok(Self {
            provider,
            source_language: source_language.into(),
            target_language: target_language.into(),
            batch_size,
            max_retries,
        })
    }

    /// Translate all pending units in place
    pub async fn run(&self, units: &mut [TranslationUnit]) -> Result<RunReport, TranslationError> {
        self.run_with_progress(units, |_, _| {}).await
    }

    /// Translate all pending units in place, reporting progress
    ///
    /// The callback receives (translated so far, total pending) after every
    /// completed batch. On success the report satisfies
    /// `translated == pending count` and `skipped == errors == 0`; when a
    /// batch exhausts its retries the run aborts with
    /// `TranslationError::RetriesExhausted` carrying a progress snapshot.
    /// Completed batches keep their in-memory mutations either way.
    pub async fn run_with_progress(
        &self,
        units: &mut [TranslationUnit],
        progress: impl Fn(usize, usize),
    ) -> Result<RunReport, TranslationError> {
        let total_units = units.len();
        let pending = Self::collect_pending(units);
        let pending_count = pending.len();

        if pending_count == 0 {
            info!("No translations needed, catalog is already fully translated");
            return Ok(RunReport { total_units, ..RunReport::default() });
        }

        let batch_count = pending_count.div_ceil(self.batch_size);
        info!("Translating {} of {} units in {} batch(es) of up to {} via {}",
              pending_count, total_units, batch_count, self.batch_size, self.provider.name());

        let mut translated = 0usize;

        for (batch_index, batch) in pending.chunks(self.batch_size).enumerate() {
            debug!("Processing batch {}/{} ({} units)", batch_index + 1, batch_count, batch.len());

            let items: Vec<BatchItem> = batch.iter().map(|p| p.item.clone()).collect();
            let translations = self.translate_batch(&items, batch_index, || RunReport {
                total_units,
                translated,
                skipped: pending_count - translated,
                errors: 1,
            }).await?;

            // Positional correspondence: result[i] belongs to batch[i]
            for (i, text) in translations.into_iter().enumerate() {
                let unit = &mut units[batch[i].position];
                unit.translation = Some(text);
                unit.status = TranslationStatus::Finished;
            }

            translated += batch.len();
            progress(translated, pending_count);
            debug!("Completed batch {}/{}", batch_index + 1, batch_count);
        }

        info!("Translated {} unit(s)", translated);
        Ok(RunReport {
            total_units,
            translated,
            skipped: 0,
            errors: 0,
        })
    }

    /// Translate one batch under the bounded retry policy
    ///
    /// Backend failures and decode failures are indistinguishable here: both
    /// consume one of the `max_retries` total attempts. The batch is retried
    /// whole or not at all.
    async fn translate_batch(
        &self,
        items: &[BatchItem],
        batch_index: usize,
        report_on_abort: impl Fn() -> RunReport,
    ) -> Result<Vec<String>, TranslationError> {
        let mut attempt = 0u32;

        loop {
            attempt += 1;
            debug!("Batch {} attempt {}/{}", batch_index + 1, attempt, self.max_retries);

            let outcome = match self.provider
                .translate_batch(items, &self.source_language, &self.target_language)
                .await
            {
                Ok(raw) => decode_batch_response(&raw, items.len()).map_err(TranslationError::from),
                Err(e) => Err(TranslationError::from(e)),
            };

            match outcome {
                Ok(translations) => return Ok(translations),
                Err(e) => {
                    warn!("Batch {} attempt {}/{} failed: {}",
                          batch_index + 1, attempt, self.max_retries, e);
                }
            }

            if attempt >= self.max_retries {
                error!("Batch {} failed after {} attempts, aborting run", batch_index + 1, attempt);
                return Err(TranslationError::RetriesExhausted {
                    attempts: attempt,
                    batch_index,
                    report: report_on_abort(),
                });
            }
        }
    }

    /// Capture the pending subsequence as a position-index arena
    fn collect_pending(units: &[TranslationUnit]) -> Vec<PendingUnit> {
        units.iter()
            .enumerate()
            .filter(|(_, unit)| unit.needs_translation())
            .map(|(position, unit)| PendingUnit {
                position,
                item: BatchItem {
                    text: unit.source_text.clone(),
                    context: build_unit_context(unit),
                },
            })
            .collect()
    }
}

/// Build the context string sent alongside a unit's source text
///
/// Joins the present fields among component label, comment and location with
/// a fixed "; " delimiter; empty fields contribute no segment.
pub fn build_unit_context(unit: &TranslationUnit) -> String {
    let mut parts = Vec::new();

    if !unit.context_name.is_empty() {
        parts.push(format!("UI component: {}", unit.context_name));
    }

    if let Some(comment) = unit.comment.as_deref().filter(|c| !c.is_empty()) {
        parts.push(format!("Description: {}", comment));
    }

    if let Some(location) = unit.location.as_deref().filter(|l| !l.is_empty()) {
        parts.push(format!("Location: {}", location));
    }

    parts.join("; ")
}
