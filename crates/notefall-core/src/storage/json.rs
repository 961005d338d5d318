use serde_json::{Value as JsonValue, json};

use super::{ExportFormat, PlayRecord};

/// One JSON object per line (NDJSON)
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonExporter;

impl ExportFormat for JsonExporter {
    fn extension(&self) -> &'static str {
        "json"
    }

    fn header(&self) -> Option<String> {
        None
    }

    fn format_row(&self, record: &PlayRecord) -> String {
        format_json_entry(record).to_string()
    }
}

pub fn format_json_entry(record: &PlayRecord) -> JsonValue {
    json!({
        "timestamp": record.timestamp.to_rfc3339(),
        "music_file": record.music_file,
        "source": record.source.map(|s| -> &'static str { s.into() }),
        "score": record.score,
        "max_combo": record.max_combo,
        "judgments": {
            "perfect": record.counts.perfect,
            "great": record.counts.great,
            "good": record.counts.good,
            "bad": record.counts.bad,
            "miss": record.counts.miss
        },
        "total_notes": record.total_notes,
        "accuracy": record.accuracy,
        "rank": record.rank.short_name(),
        "full_combo": record.full_combo
    })
}
