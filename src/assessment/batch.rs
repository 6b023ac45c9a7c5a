use std::io::Read;

use super::{assess, TalentAssessment, TalentTestRequest};
use crate::scoring::TalentEngine;

/// Outcome of one CSV data row
#[derive(Debug)]
pub struct BatchRow {
    /// 1-based line number in the source, header included
    pub line: u64,
    pub outcome: Result<TalentAssessment, Vec<String>>,
}

/// Score every row of a CSV file whose header names `TalentTestRequest`
/// fields. Empty cells are "not measured".
///
/// Rows that fail to parse or validate are reported in place; they never
/// stop the rest of the batch.
pub fn read_batch<R: Read>(engine: &TalentEngine, reader: R) -> Vec<BatchRow> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = match csv_reader.headers() {
        Ok(headers) => headers.clone(),
        Err(e) => {
            tracing::warn!(error = %e, "unreadable header row");
            return vec![BatchRow {
                line: 1,
                outcome: Err(vec![format!("unreadable header: {}", e)]),
            }];
        }
    };

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let (line, outcome) = match record {
            Ok(record) => {
                let line = record.position().map(|p| p.line()).unwrap_or_default();
                let outcome = match record.deserialize::<TalentTestRequest>(Some(&headers)) {
                    Ok(request) => assess(engine, &request),
                    Err(e) => Err(vec![format!("unreadable row: {}", e)]),
                };
                (line, outcome)
            }
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or_default();
                (line, Err(vec![format!("unreadable row: {}", e)]))
            }
        };

        if let Err(ref errors) = outcome {
            tracing::warn!(line, errors = errors.len(), "skipping invalid row");
        }
        rows.push(BatchRow { line, outcome });
    }

    tracing::info!(rows = rows.len(), "batch scored");
    rows
}
