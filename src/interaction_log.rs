use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_LOG_PATH: &str = "assistant_logs.csv";

/// Append-only CSV log of `(question, answer)` rows. No header row is written.
#[derive(Debug, Clone)]
pub struct InteractionLog {
    path: PathBuf,
}

impl Default for InteractionLog {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_PATH)
    }
}

impl InteractionLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Opens the file for this one record and closes it again before returning.
    pub fn append(&self, question: &str, answer: &str) -> Result<()> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open log file '{}'", self.path.display()))?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::CRLF)
            .from_writer(file);
        writer
            .write_record([question, answer])
            .with_context(|| format!("Failed to write log file '{}'", self.path.display()))?;
        writer
            .flush()
            .with_context(|| format!("Failed to flush log file '{}'", self.path.display()))?;

        debug!(
            path = %self.path.display(),
            question_len = question.len(),
            answer_len = answer.len(),
            "appended interaction"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::InteractionLog;
    use std::fs;
    use std::path::Path;

    fn read_rows(path: &Path) -> Vec<(String, String)> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(path)
            .expect("log file should open");
        reader
            .records()
            .map(|record| {
                let record = record.expect("row should parse");
                assert_eq!(record.len(), 2, "row should have two fields");
                (record[0].to_string(), record[1].to_string())
            })
            .collect()
    }

    #[test]
    fn creates_file_on_first_append() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let path = dir.path().join("assistant_logs.csv");
        let log = InteractionLog::new(&path);

        log.append("hello", "Hi!").expect("append should succeed");

        assert_eq!(fs::read_to_string(&path).unwrap(), "hello,Hi!\r\n");
    }

    #[test]
    fn appends_rows_in_call_order_without_header() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let path = dir.path().join("assistant_logs.csv");
        let log = InteractionLog::new(&path);

        log.append("first question", "first answer")
            .expect("append should succeed");
        log.append("second question", "second answer")
            .expect("append should succeed");

        assert_eq!(
            read_rows(&path),
            vec![
                ("first question".to_string(), "first answer".to_string()),
                ("second question".to_string(), "second answer".to_string()),
            ]
        );
    }

    #[test]
    fn keeps_existing_rows() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let path = dir.path().join("assistant_logs.csv");
        fs::write(&path, "old,row\r\n").unwrap();

        InteractionLog::new(&path)
            .append("new", "row")
            .expect("append should succeed");

        assert_eq!(fs::read_to_string(&path).unwrap(), "old,row\r\nnew,row\r\n");
    }

    #[test]
    fn quotes_delimiters_quotes_and_newlines() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let path = dir.path().join("assistant_logs.csv");
        let log = InteractionLog::new(&path);
        let question = "a, b and \"c\"?";
        let answer = "line one\nline two";

        log.append(question, answer).expect("append should succeed");

        assert_eq!(
            read_rows(&path),
            vec![(question.to_string(), answer.to_string())]
        );
    }

    #[test]
    fn write_failure_is_reported_with_path() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let path = dir.path().join("missing-dir").join("assistant_logs.csv");

        let err = InteractionLog::new(&path)
            .append("q", "a")
            .expect_err("append into a missing directory should fail");

        let msg = format!("{err:#}");
        assert!(msg.contains("Failed to open log file"), "unexpected: {msg}");
        assert!(msg.contains("missing-dir"), "unexpected: {msg}");
    }

    #[test]
    fn default_destination_is_assistant_logs_csv() {
        assert_eq!(
            InteractionLog::default().path(),
            Path::new("assistant_logs.csv")
        );
    }
}
