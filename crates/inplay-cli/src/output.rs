use inplay_core::Envelope;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::error::CliError;

pub fn render(
    envelope: &Envelope<Value>,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(envelope)?
            } else {
                serde_json::to_string(envelope)?
            };
            println!("{payload}");
        }
        OutputFormat::Ndjson => {
            let payload = serde_json::to_string(envelope)?;
            println!("{payload}");
        }
        OutputFormat::Table => print!("{}", render_table(envelope)?),
    }

    Ok(())
}

fn render_table(envelope: &Envelope<Value>) -> Result<String, CliError> {
    let mut out = String::new();
    out.push_str(&format!("request_id  : {}\n", envelope.meta.request_id));
    out.push_str(&format!("trace_id    : {}\n", envelope.meta.trace_id));
    out.push_str(&format!("schema      : {}\n", envelope.meta.schema_version));
    out.push_str(&format!("generated_at: {}\n", envelope.meta.generated_at));
    out.push_str(&format!("latency_ms  : {}\n", envelope.meta.latency_ms));

    if !envelope.meta.warnings.is_empty() {
        out.push_str("warnings:\n");
        for warning in &envelope.meta.warnings {
            out.push_str(&format!("  - {warning}\n"));
        }
    }

    match signal_rows(&envelope.data) {
        Some(rows) => out.push_str(&signal_table(&rows)),
        None => {
            out.push_str("data:\n");
            let pretty_data = serde_json::to_string_pretty(&envelope.data)?;
            for line in pretty_data.lines() {
                out.push_str(&format!("  {line}\n"));
            }
        }
    }

    if !envelope.errors.is_empty() {
        out.push_str("errors:\n");
        for error in &envelope.errors {
            out.push_str(&format!("  - {}\n", error.message));
        }
    }

    Ok(out)
}

/// Signal records from a `rank` (`ranked` list) or `signals` (`signals` map) payload.
fn signal_rows(data: &Value) -> Option<Vec<&Value>> {
    if let Some(ranked) = data.get("ranked").and_then(Value::as_array) {
        return Some(ranked.iter().collect());
    }
    data.get("signals")
        .and_then(Value::as_object)
        .map(|signals| signals.values().collect())
}

const COLUMNS: [(&str, &str); 6] = [
    ("close_return_1d", "RET_1D"),
    ("gap_pct", "GAP"),
    ("day_range_pct", "RANGE"),
    ("volume_ratio", "VOL_RATIO"),
    ("vol_10d", "VOL_10D"),
    ("in_play_score", "SCORE"),
];

fn signal_table(rows: &[&Value]) -> String {
    let mut out = format!("{:<4} {:<10}", "#", "SYMBOL");
    for (_, header) in COLUMNS {
        out.push_str(&format!(" {header:>10}"));
    }
    out.push('\n');

    for (index, row) in rows.iter().enumerate() {
        let rank = row
            .get("rank")
            .and_then(Value::as_u64)
            .unwrap_or(index as u64 + 1);
        let symbol = row.get("symbol").and_then(Value::as_str).unwrap_or("?");
        out.push_str(&format!("{rank:<4} {symbol:<10}"));
        for (field, _) in COLUMNS {
            let cell = row
                .get(field)
                .and_then(Value::as_f64)
                .map_or_else(|| String::from("-"), |value| format!("{value:.4}"));
            out.push_str(&format!(" {cell:>10}"));
        }
        out.push('\n');
    }

    out
}
