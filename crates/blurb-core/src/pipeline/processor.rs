//! Pipeline orchestration - wires together all processing stages.

use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::batch::into_batches;
use crate::config::Config;
use crate::error::PipelineResult;
use crate::input::RecordLoader;
use crate::llm::{CompletionClient, CompletionProvider, GenerationParams, RetryPolicy};
use crate::merge::merge;
use crate::query::{build_queries, ApiStyle};
use crate::report::ReportWriter;
use crate::text::Postprocessor;
use crate::types::{Record, ResultRow, RunStats};

/// Rows produced by a run together with its counters.
#[derive(Debug, Clone, Default)]
pub struct ProcessOutput {
    pub rows: Vec<ResultRow>,
    pub stats: RunStats,
}

/// Outcome of a full run, including where the report landed.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub rows: Vec<ResultRow>,
    pub stats: RunStats,
    pub report: PathBuf,
}

/// Runs records through query building, completion, merging and
/// postprocessing.
pub struct ProductProcessor {
    loader: RecordLoader,
    instruction: String,
    style: ApiStyle,
    chunk_size: usize,
    client: CompletionClient,
    postprocessor: Postprocessor,
    report: ReportWriter,
}

impl ProductProcessor {
    /// Create a processor that sends requests through `provider`.
    pub fn new(config: &Config, provider: Box<dyn CompletionProvider>) -> Self {
        Self {
            loader: RecordLoader::new(&config.input),
            instruction: config.prompt.instruction.clone(),
            style: config.generation.api,
            chunk_size: config.batch.chunk_size,
            client: CompletionClient::new(
                provider,
                GenerationParams::from_config(&config.generation),
                RetryPolicy::from(&config.retry),
            ),
            postprocessor: Postprocessor::new(&config.postprocess),
            report: ReportWriter::new(&config.output, config.output_dir()),
        }
    }

    /// Read records from the input workbook.
    pub fn load(&self, input: &Path) -> PipelineResult<Vec<Record>> {
        self.loader.load(input)
    }

    /// Generate rows for `records`.
    ///
    /// `on_batch(done, total)` is called after every completed batch. Any
    /// error other than a retried rate limit aborts the run and nothing is
    /// returned.
    pub async fn process<F>(
        &self,
        records: Vec<Record>,
        on_batch: F,
    ) -> PipelineResult<ProcessOutput>
    where
        F: FnMut(usize, usize),
    {
        let start = Instant::now();
        let mut stats = RunStats {
            records: records.len(),
            ..RunStats::default()
        };

        let queries = build_queries(&records, &self.instruction, self.style);
        let batches = into_batches(queries.payloads, self.chunk_size);
        tracing::debug!(
            "Built {} {} payload(s) in {} batch(es)",
            queries.ids.len(),
            self.style,
            batches.len()
        );

        let report = self.client.complete_all(&batches, on_batch).await?;
        stats.batches = report.batches;
        stats.completions = report.completions.len();
        stats.rate_limited = report.rate_limited;
        stats.backoff_ms = report.backoff.as_millis() as u64;

        let rows: Vec<ResultRow> = merge(queries.ids, report.completions)
            .iter()
            .map(|m| self.postprocessor.process(&m.identifier, &m.text))
            .collect();
        stats.described = rows
            .iter()
            .filter(|row| self.postprocessor.is_described(row))
            .count();

        tracing::info!(
            "Processed {} record(s) in {:?}: {} described, {} rate-limited retr(ies)",
            stats.records,
            start.elapsed(),
            stats.described,
            stats.rate_limited
        );

        Ok(ProcessOutput { rows, stats })
    }

    /// Load, process and write the report for `input`.
    pub async fn run<F>(&self, input: &Path, on_batch: F) -> PipelineResult<RunOutput>
    where
        F: FnMut(usize, usize),
    {
        let records = self.load(input)?;
        let ProcessOutput { rows, stats } = self.process(records, on_batch).await?;
        let report = self.report.write(&rows, self.postprocessor.bullet_slots())?;
        Ok(RunOutput {
            rows,
            stats,
            report,
        })
    }
}
