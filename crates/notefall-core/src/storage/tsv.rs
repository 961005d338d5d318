use super::{ExportFormat, PlayRecord};

#[derive(Debug, Clone, Copy, Default)]
pub struct TsvExporter;

impl ExportFormat for TsvExporter {
    fn extension(&self) -> &'static str {
        "tsv"
    }

    fn header(&self) -> Option<String> {
        Some(format_tsv_header())
    }

    fn format_row(&self, record: &PlayRecord) -> String {
        format_tsv_row(record)
    }
}

pub fn format_tsv_header() -> String {
    [
        "Timestamp",
        "Music",
        "Source",
        "Score",
        "MaxCombo",
        "Perfect",
        "Great",
        "Good",
        "Bad",
        "Miss",
        "Notes",
        "Accuracy",
        "Rank",
    ]
    .join("\t")
}

pub fn format_tsv_row(record: &PlayRecord) -> String {
    let source: &'static str = record.source.map(|s| s.into()).unwrap_or("");
    let accuracy = record
        .accuracy
        .map(|a| format!("{:.2}", a * 100.0))
        .unwrap_or_default();

    [
        record.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
        record.music_file.clone().unwrap_or_default(),
        source.to_string(),
        record.score.to_string(),
        record.max_combo.to_string(),
        record.counts.perfect.to_string(),
        record.counts.great.to_string(),
        record.counts.good.to_string(),
        record.counts.bad.to_string(),
        record.counts.miss.to_string(),
        record.total_notes.to_string(),
        accuracy,
        record.rank.short_name().to_string(),
    ]
    .join("\t")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{JudgmentCounts, Rank};

    #[test]
    fn test_row_matches_header_columns() {
        let record = PlayRecord {
            timestamp: chrono::Local::now(),
            music_file: None,
            source: None,
            score: 1950,
            max_combo: 20,
            counts: JudgmentCounts {
                perfect: 19,
                good: 1,
                ..Default::default()
            },
            total_notes: 20,
            accuracy: Some(0.975),
            rank: Rank::S,
            full_combo: true,
        };
        let row = format_tsv_row(&record);
        let columns: Vec<&str> = row.split('\t').collect();
        assert_eq!(columns.len(), format_tsv_header().split('\t').count());
        assert_eq!(columns[3], "1950");
        assert_eq!(columns[11], "97.50");
        assert_eq!(columns[12], "S");
    }

    #[test]
    fn test_rows_start_with_header() {
        let output = TsvExporter.format_rows(&[]);
        assert_eq!(output, format!("{}\n", format_tsv_header()));
    }
}
