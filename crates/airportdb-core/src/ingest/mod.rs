// crates/airportdb-core/src/ingest/mod.rs

//! # Bulk ingestion
//!
//! Turns header-less delimited text into airports. Parsing is lenient: a bad
//! line becomes a [`RowFailure`] and the rest of the input carries on.
//!
//! Two kinds of lines are dropped here, before any storage work:
//! - *malformed* lines, whose field count differs from the dominant field
//!   count of the input (or that the CSV reader cannot decode);
//! - lines whose required columns do not coerce (see [`record::to_airport`]).

use crate::model::Airport;
use csv::{Position, ReaderBuilder, StringRecord, Trim};
use serde::Serialize;
use std::collections::BTreeMap;

pub mod record;
mod sniff;

pub use sniff::{sniff_delimiter, CANDIDATES};

/// A line that did not make it into the store.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RowFailure {
    /// 1-based line number in the input.
    pub line: usize,
    /// The offending line, verbatim.
    pub raw: String,
    pub reason: String,
}

/// Outcome of a bulk insert: successes counted, failures kept.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct BulkReport {
    pub inserted: usize,
    pub failures: Vec<RowFailure>,
}

impl BulkReport {
    #[inline]
    pub fn skipped(&self) -> usize {
        self.failures.len()
    }

    /// Lines seen, inserted or not.
    #[inline]
    pub fn total(&self) -> usize {
        self.inserted + self.failures.len()
    }
}

/// A successfully coerced line, waiting to be stored.
#[derive(Clone, Debug)]
pub struct ParsedRow {
    pub line: usize,
    pub raw: String,
    pub airport: Airport,
}

/// Parser output: rows ready for the store, and lines already rejected.
#[derive(Clone, Debug, Default)]
pub struct ParsedBatch {
    pub delimiter: u8,
    pub rows: Vec<ParsedRow>,
    pub failures: Vec<RowFailure>,
}

impl ParsedBatch {
    pub fn airports(&self) -> Vec<Airport> {
        self.rows.iter().map(|r| r.airport.clone()).collect()
    }
}

/// Parses the whole input. Never fails: every problem is per line.
pub fn parse(text: &str) -> ParsedBatch {
    let delimiter = sniff_delimiter(text);
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(delimiter)
        .quote(b'"')
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    // 1. Read every record with its starting line and full text
    let mut records: Vec<(usize, String, StringRecord)> = Vec::new();
    let mut batch = ParsedBatch {
        delimiter,
        ..ParsedBatch::default()
    };
    let mut rec = StringRecord::new();
    loop {
        let start = reader.position().clone();
        let read = reader.read_record(&mut rec);
        let (line, raw) = span(text, &start, reader.position().byte());
        match read {
            Ok(false) => break,
            Ok(true) => records.push((line, raw, rec.clone())),
            Err(e) => {
                batch.failures.push(RowFailure {
                    line,
                    raw,
                    reason: format!("unreadable record: {e}"),
                });
                if reader.is_done() {
                    break;
                }
            }
        }
    }

    // 2. Drop malformed records (wrong width)
    let width = dominant_width(records.iter().map(|(_, _, rec)| rec.len()));

    // 3. Coerce the rest
    for (line, raw, rec) in records {
        if rec.len() != width {
            batch.failures.push(RowFailure {
                line,
                raw,
                reason: format!("malformed line: {} fields, expected {width}", rec.len()),
            });
            continue;
        }
        match record::to_airport(&rec) {
            Ok(airport) => batch.rows.push(ParsedRow { line, raw, airport }),
            Err(reason) => batch.failures.push(RowFailure { line, raw, reason }),
        }
    }

    batch.failures.sort_by_key(|f| f.line);
    batch
}

/// Text the reader consumed between `start` and byte `end`, minus the empty
/// lines it skipped first and the record terminator. Also returns the 1-based
/// line the record itself starts on.
fn span(text: &str, start: &Position, end: u64) -> (usize, String) {
    let consumed = text
        .get(start.byte() as usize..end as usize)
        .unwrap_or_default();
    let body = consumed.trim_start_matches(['\r', '\n']);
    let skipped = consumed[..consumed.len() - body.len()].matches('\n').count();
    let raw = body.trim_end_matches(['\r', '\n']);
    (start.line() as usize + skipped, raw.to_string())
}

/// Most common field count; ties go to the width seen first.
fn dominant_width(widths: impl IntoIterator<Item = usize>) -> usize {
    let mut counts: BTreeMap<usize, (usize, usize)> = BTreeMap::new(); // width -> (count, first index)
    for (i, width) in widths.into_iter().enumerate() {
        counts.entry(width).or_insert((0, i)).0 += 1;
    }
    counts
        .into_iter()
        .max_by(|(_, (ca, fa)), (_, (cb, fb))| ca.cmp(cb).then(fb.cmp(fa)))
        .map(|(width, _)| width)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD: &str = concat!(
        "1,\"Goroka Airport\",\"Goroka\",\"Papua New Guinea\",\"GKA\",\"AYGA\",-6.081689834590001,145.391998291,5282,10,\"U\",\"Pacific/Port_Moresby\",\"airport\",\"OurAirports\"\n",
        "2,\"Madang Airport\",\"Madang\",\"Papua New Guinea\",\"MAG\",\"AYMD\",-5.20707988739,145.789001465,20,10,\"U\",\"Pacific/Port_Moresby\",\"airport\",\"OurAirports\"\n",
        "3,\"Mount Hagen Kagamuga Airport\",\"Mount Hagen\",\"Papua New Guinea\",\"HGU\",\"AYMH\",-5.826789855957031,144.29600524902344,5388,10,\"U\",\"Pacific/Port_Moresby\",\"airport\",\"OurAirports\"\n",
    );

    #[test]
    fn clean_input_parses_every_line() {
        let batch = parse(GOOD);
        assert_eq!(batch.delimiter, b',');
        assert_eq!(batch.rows.len(), 3);
        assert!(batch.failures.is_empty());
        assert_eq!(batch.rows[1].line, 2);
        assert_eq!(batch.rows[1].airport.name, "Madang Airport");
        assert!(batch.rows[1].raw.starts_with("2,\"Madang"));
    }

    #[test]
    fn non_numeric_latitude_is_reported_not_fatal() {
        let text = GOOD.replace("-5.20707988739", "\"somewhere\"");
        let batch = parse(&text);
        assert_eq!(batch.rows.len(), 2);
        assert_eq!(batch.failures.len(), 1);
        assert_eq!(batch.failures[0].line, 2);
        assert!(batch.failures[0].reason.contains("latitude"));
    }

    #[test]
    fn wrong_width_lines_are_malformed() {
        let text = format!("{GOOD}4,\"Truncated\",\"X\"\n");
        let batch = parse(&text);
        assert_eq!(batch.rows.len(), 3);
        assert_eq!(batch.failures.len(), 1);
        assert_eq!(batch.failures[0].line, 4);
        assert!(batch.failures[0].reason.starts_with("malformed"));
    }

    #[test]
    fn blank_lines_are_ignored() {
        let text = GOOD.replace('\n', "\n\n");
        let batch = parse(&text);
        assert_eq!(batch.rows.len(), 3);
        assert!(batch.failures.is_empty());
    }

    #[test]
    fn blank_lines_keep_line_numbers_true() {
        let text = "\n\n1,A,X,Y,,,1.0,1.0\n\n2,B,X,Y,,,2.0,2.0\n";
        let batch = parse(text);
        let lines: Vec<usize> = batch.rows.iter().map(|r| r.line).collect();
        assert_eq!(lines, [3, 5]);
        assert_eq!(batch.rows[1].raw, "2,B,X,Y,,,2.0,2.0");
    }

    #[test]
    fn quoted_newline_keeps_the_whole_record() {
        let text = "1,\"Two\nLines\",X,Y,,,north,1.0\n2,B,X,Y,,,2.0,2.0\n";
        let batch = parse(text);
        assert_eq!(batch.failures.len(), 1);
        assert_eq!(batch.failures[0].line, 1);
        assert_eq!(batch.failures[0].raw, "1,\"Two\nLines\",X,Y,,,north,1.0");
        assert_eq!(batch.rows.len(), 1);
        assert_eq!(batch.rows[0].line, 3);
        assert_eq!(batch.rows[0].raw, "2,B,X,Y,,,2.0,2.0");
    }

    #[test]
    fn tab_separated_minimal_columns() {
        let text = "10\tAlpha\tA-town\tLand\t\\N\t\\N\t1.0\t2.0\n11\tBeta\tB-town\tLand\t\\N\t\\N\t3.0\t4.0\n";
        let batch = parse(text);
        assert_eq!(batch.delimiter, b'\t');
        assert_eq!(batch.rows.len(), 2);
        assert_eq!(batch.rows[0].airport.iata, None);
    }

    #[test]
    fn dominant_width_prefers_majority_then_first() {
        assert_eq!(dominant_width([3, 8, 8]), 8);
        assert_eq!(dominant_width([3, 8]), 3);
        assert_eq!(dominant_width([]), 0);
    }

    #[test]
    fn report_counts() {
        let report = BulkReport {
            inserted: 4,
            failures: vec![RowFailure {
                line: 2,
                raw: "bad".into(),
                reason: "nope".into(),
            }],
        };
        assert_eq!(report.skipped(), 1);
        assert_eq!(report.total(), 5);
    }
}
