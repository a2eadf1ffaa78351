//! Field-delimiter inference over a decoded text sample.
//!
//! Candidates are tried in a fixed priority order; the source system
//! predominantly emits semicolon-delimited files, so `';'` doubles as the
//! fallback whenever sniffing yields no confident signal. The result is a
//! heuristic only: the parser ladder re-validates it against the full text.

use log::debug;

pub const CANDIDATES: [u8; 4] = [b';', b',', b'\t', b'|'];
pub const DEFAULT_DELIMITER: u8 = b';';

/// Number of characters inspected when sniffing.
const SAMPLE_CHARS: usize = 2048;
/// Number of sample lines scored per candidate.
const SAMPLE_LINES: usize = 10;

/// Scores each candidate by how consistently it splits the sample lines and
/// returns the best one, or [`DEFAULT_DELIMITER`] when nothing scores.
pub fn sniff_delimiter(text: &str) -> u8 {
    let sample: String = text.chars().take(SAMPLE_CHARS).collect();
    let lines: Vec<&str> = sample
        .lines()
        .filter(|line| !line.trim().is_empty())
        .take(SAMPLE_LINES)
        .collect();
    if lines.is_empty() {
        return DEFAULT_DELIMITER;
    }

    let mut best = None;
    for &candidate in &CANDIDATES {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| line.bytes().filter(|&b| b == candidate).count())
            .collect();
        let mean = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
        if mean == 0.0 {
            continue;
        }
        let variance = counts
            .iter()
            .map(|&count| (count as f64 - mean).powi(2))
            .sum::<f64>()
            / counts.len() as f64;
        // Consistent per-line occurrence beats raw frequency.
        let score = mean / (1.0 + variance.sqrt());
        let improved = match best {
            Some((_, best_score)) => score > best_score,
            None => true,
        };
        if improved {
            best = Some((candidate, score));
        }
    }

    match best {
        Some((delimiter, score)) => {
            debug!(
                "sniffed delimiter {:?} (score {score:.2})",
                delimiter as char
            );
            delimiter
        }
        None => DEFAULT_DELIMITER,
    }
}

pub fn printable(delimiter: u8) -> String {
    match delimiter {
        b'\t' => "\\t".to_string(),
        other => (other as char).to_string(),
    }
}
