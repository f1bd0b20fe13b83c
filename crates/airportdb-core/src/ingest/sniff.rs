// crates/airportdb-core/src/ingest/sniff.rs

/// Delimiters we try, in tie-break order.
pub const CANDIDATES: [u8; 4] = [b',', b'\t', b';', b'|'];

/// How many leading non-empty lines are sampled.
const SAMPLE_LINES: usize = 20;

/// Guesses the field delimiter of `text`.
///
/// A candidate wins when it occurs (outside double quotes) the same, non-zero
/// number of times on every sampled line. If no candidate is that consistent,
/// the one with the most occurrences overall wins; an input without any
/// candidate falls back to `,`.
pub fn sniff_delimiter(text: &str) -> u8 {
    let sample: Vec<&str> = text
        .lines()
        .filter(|l| !l.trim().is_empty())
        .take(SAMPLE_LINES)
        .collect();

    let mut best_total = (b',', 0usize);
    for &delim in &CANDIDATES {
        let counts: Vec<usize> = sample.iter().map(|l| count_unquoted(l, delim)).collect();
        let first = counts.first().copied().unwrap_or(0);
        if first > 0 && counts.iter().all(|&c| c == first) {
            return delim;
        }
        let total: usize = counts.iter().sum();
        if total > best_total.1 {
            best_total = (delim, total);
        }
    }
    best_total.0
}

/// Occurrences of `delim` on `line` that are not inside a `"..."` field.
fn count_unquoted(line: &str, delim: u8) -> usize {
    let mut quoted = false;
    let mut n = 0;
    for &b in line.as_bytes() {
        if b == b'"' {
            // "" inside a quoted field toggles twice, which is a no-op
            quoted = !quoted;
        } else if b == delim && !quoted {
            n += 1;
        }
    }
    n
}
