//! Signal job handler

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::indicators::{complete_rows, compute_indicators};
use crate::indicators::structure::detect_levels;
use crate::jobs::context::JobContext;
use crate::models::indicators::{Candle, FeatureVector};
use crate::signals::labels::generate_labels;
use crate::signals::report::{format_signal_message, signal_title};

/// Fetch, analyze, chart and push the signal for one instrument.
///
/// Only rows where every indicator is defined take part in labelling,
/// classification, level detection and charting.
pub async fn process_symbol(ctx: &JobContext, symbol: &str) -> Result<()> {
    let candles = ctx
        .data_provider
        .get_candles(symbol, &ctx.interval, ctx.limit)
        .await?;
    debug!(
        symbol = %symbol,
        count = candles.len(),
        "Fetched {} candles for {}",
        candles.len(),
        symbol
    );

    let rows = complete_rows(&compute_indicators(&candles));
    let latest = rows.last().ok_or_else(|| {
        Error::InsufficientData(format!(
            "{} candles for {} leave no complete indicator rows",
            candles.len(),
            symbol
        ))
    })?;

    let closes: Vec<f64> = rows.iter().map(|r| r.candle.close).collect();
    let labels = generate_labels(&closes);
    let features: Vec<FeatureVector> = rows.iter().map(|r| r.features).collect();
    let prediction = ctx.classifier.predict_latest(symbol, &features, &labels)?;

    let row_candles: Vec<Candle> = rows.iter().map(|r| r.candle.clone()).collect();
    let levels = detect_levels(&row_candles, &ctx.levels);

    let chart = ctx.renderer.render(symbol, &rows, &levels)?;
    let message = format_signal_message(symbol, latest, &levels, prediction);
    ctx.notifier
        .notify(&signal_title(symbol), &message, Some(chart.as_path()), Some(symbol))
        .await?;

    info!(
        symbol = %symbol,
        prediction = ?prediction,
        label = prediction.value(),
        supports = levels.supports.len(),
        resistances = levels.resistances.len(),
        "Signal sent for {}",
        symbol
    );
    Ok(())
}
