use super::PlayRecord;

/// Common interface for result log formats
pub trait ExportFormat {
    /// File extension for session files, without the dot
    fn extension(&self) -> &'static str;

    /// Header line, if the format has one
    fn header(&self) -> Option<String>;

    fn format_row(&self, record: &PlayRecord) -> String;

    fn format_rows(&self, records: &[PlayRecord]) -> String {
        let mut output = String::new();
        if let Some(header) = self.header() {
            output.push_str(&header);
            output.push('\n');
        }
        for record in records {
            output.push_str(&self.format_row(record));
            output.push('\n');
        }
        output
    }
}
