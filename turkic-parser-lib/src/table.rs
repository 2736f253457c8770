// CSV input and output: frequency tables in, analysis tables out.

use std::io;

use serde::Serialize;

use crate::corpus::{normalize_token, FrequencyTable, WordEntry};
use crate::error::TableError;
use crate::output::Row;

/// Read a frequency table.
///
/// A `word` column is required. The occurrence column is the first header
/// mentioning `occurrence`, `count` or `frequency`, the lines column the
/// first mentioning `line`. Missing columns default to one occurrence on
/// line 1, as does an occurrence cell that is not a number. Word cells are
/// cleaned like transcription tokens.
pub fn read_frequency_table<R: io::Read>(reader: R) -> Result<FrequencyTable, TableError> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_lowercase).collect();
    let word_col = headers
        .iter()
        .position(|h| h == "word")
        .ok_or(TableError::MissingWordColumn)?;
    let count_col = headers.iter().position(|h| {
        h.contains("occurrence") || h.contains("count") || h.contains("frequency")
    });
    let line_col = headers.iter().position(|h| h.contains("line"));

    let mut table = FrequencyTable::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record?;
        let row = i + 1;

        let cell = record.get(word_col).unwrap_or_default();
        let Some(word) = normalize_token(cell) else {
            log::warn!("row {row}: {cell:?} is not a word, skipped");
            continue;
        };

        let occurrences = match count_col.and_then(|c| record.get(c)).filter(|s| !s.is_empty()) {
            Some(s) => s.parse::<u32>().unwrap_or_else(|_| {
                log::warn!("row {row}: occurrence count {s:?} is not a number, using 1");
                1
            }),
            None => 1,
        };

        let mut lines = line_col
            .and_then(|c| record.get(c))
            .map(parse_lines)
            .unwrap_or_default();
        if lines.is_empty() {
            lines.push(1);
        }

        table.insert(WordEntry {
            word,
            occurrences,
            lines,
        });
    }
    Ok(table)
}

/// Every run of ASCII digits in a cell such as `"[1, 5, 12]"`.
fn parse_lines(cell: &str) -> Vec<u32> {
    cell.split(|c: char| !c.is_ascii_digit())
        .filter_map(|run| run.parse().ok())
        .collect()
}

/// Write the analysis table with its header row.
pub fn write_analysis<W: io::Write>(writer: W, rows: &[Row]) -> Result<(), TableError> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

#[derive(Serialize)]
struct UnknownRow<'a> {
    word: &'a str,
    #[serde(rename = "number of occurrences")]
    occurrences: u32,
    lines: &'a str,
}

/// Write the words left unanalysed, for extending the affix inventory.
pub fn write_unknown<'a, W, I>(writer: W, rows: I) -> Result<(), TableError>
where
    W: io::Write,
    I: IntoIterator<Item = &'a Row>,
{
    let mut wtr = csv::Writer::from_writer(writer);
    for row in rows {
        wtr.serialize(UnknownRow {
            word: &row.word,
            occurrences: row.occurrences,
            lines: &row.lines,
        })?;
    }
    wtr.flush()?;
    Ok(())
}
