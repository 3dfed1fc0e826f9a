//! Horoscope spread generation.
//!
//! Fans one request per sign out through a [`BatchExecutor`]. A failed sign
//! degrades to the fallback text without touching its siblings. Results are
//! committed to the run's board only after the whole batch has settled.

use portal_core::error::CoreError;
use portal_core::horoscope::{BoardEvent, EntryValue, HoroscopeParams, HoroscopeRun, ZodiacSign};

use crate::api::HoroscopeGenerator;
use crate::batch::{BatchExecutor, TaskOutcome};

/// Generate horoscopes for `signs` and return the settled run.
///
/// Signs the executor cancelled before they settled stay pending, so they
/// are left out of any export.
pub async fn run_horoscopes<G>(
    generator: &G,
    params: HoroscopeParams,
    signs: &[ZodiacSign],
    executor: &BatchExecutor,
) -> Result<HoroscopeRun, CoreError>
where
    G: HoroscopeGenerator + ?Sized,
{
    params.validate()?;
    for (idx, sign) in signs.iter().enumerate() {
        if signs[..idx].contains(sign) {
            return Err(CoreError::Validation(format!("{sign} is listed more than once")));
        }
    }

    let mut run = HoroscopeRun::new(params);
    run.board.apply(BoardEvent::RunStarted)?;

    tracing::info!(
        magazine = %run.params.magazine,
        horoscope_type = %run.params.horoscope_type,
        signs = signs.len(),
        concurrency = executor.concurrency(),
        "Generating horoscopes",
    );

    let params = &run.params;
    let outcomes = executor
        .run(signs.iter().copied(), |sign| {
            let request = params.request_for(sign);
            async move {
                match generator.generate(&request).await {
                    Ok(text) => match EntryValue::from_raw(text) {
                        EntryValue::Pending => {
                            tracing::warn!(sign = %sign, "Backend answered with the pending marker");
                            EntryValue::fallback()
                        }
                        value => {
                            tracing::debug!(sign = %sign, failed = !value.is_exportable(), "Horoscope generated");
                            value
                        }
                    },
                    Err(e) => {
                        tracing::warn!(sign = %sign, error = %e, "Horoscope generation failed");
                        EntryValue::fallback()
                    }
                }
            }
        })
        .await;

    let mut cancelled = 0usize;
    for (sign, outcome) in outcomes {
        match outcome {
            TaskOutcome::Completed(value) => run.board.apply(BoardEvent::Settled { sign, value })?,
            TaskOutcome::Cancelled => cancelled += 1,
        }
    }

    tracing::info!(
        exported = run.board.exportable().count(),
        failed = run.board.failed_count(),
        cancelled,
        "Horoscope run settled",
    );

    Ok(run)
}
