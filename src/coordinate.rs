//! Coordinate-format sparse matrix files
//!
//! The accepted layout is the Matrix Market coordinate body:
//!
//! ```text
//! %%MatrixMarket matrix coordinate real general
//! % any number of comment lines
//! M N L
//! row col value
//! ...
//! ```
//!
//! Indices in the file are 1-based. Records are read as a whitespace
//! separated token stream, so a record may span lines. Entries outside the
//! declared `M × N` shape are dropped and counted instead of aborting the
//! load, and the declared count `L` is only a sizing hint.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use tracing::{debug, info, warn};

use crate::constants::{
    COMMENT_MARKER, COORDINATE_BANNER, MAX_COORDINATE_DIMENSION, MAX_TRIPLET_PREALLOCATION,
};
use crate::error::{BenchError, Result};
use crate::matrix::{build_csr, SparseMatrixCSR, Triplet};

/// Triplets read from a coordinate file, before CSR conversion
#[derive(Debug, Clone)]
pub struct CoordinateMatrix {
    pub n_rows: usize,
    pub n_cols: usize,
    /// Nonzero count claimed by the header
    pub declared_nnz: usize,
    /// Accepted entries, 0-based, in file order
    pub triplets: Vec<Triplet<f64>>,
    /// Entries discarded for lying outside the declared shape
    pub dropped: usize,
    /// Line of the first unparsable record, if reading stopped early
    pub stopped_at_line: Option<usize>,
}

impl CoordinateMatrix {
    /// Number of entries that survived bounds filtering
    pub fn accepted(&self) -> usize {
        self.triplets.len()
    }

    /// Sorts the accepted entries into a CSR matrix
    pub fn into_csr(self) -> SparseMatrixCSR<f64> {
        build_csr(self.n_rows, self.n_cols, self.triplets)
    }
}

/// Opens and parses a coordinate file
pub fn parse_coordinate_file<P: AsRef<Path>>(path: P) -> Result<CoordinateMatrix> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|cause| {
        if cause.kind() == std::io::ErrorKind::NotFound {
            BenchError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            BenchError::FileUnreadable {
                origin: path.display().to_string(),
                cause,
            }
        }
    })?;

    parse_coordinate(BufReader::new(file), &path.display().to_string())
}

/// Parses coordinate data from any buffered reader
///
/// `origin` names the source in diagnostics.
pub fn parse_coordinate<R: BufRead>(reader: R, origin: &str) -> Result<CoordinateMatrix> {
    let unreadable = |cause| BenchError::FileUnreadable {
        origin: origin.to_string(),
        cause,
    };

    let mut lines = reader.lines().enumerate();

    // Skip comments and blank lines up to the header
    let (header_line_no, header) = loop {
        match lines.next() {
            Some((idx, line)) => {
                let line = line.map_err(unreadable)?;
                let trimmed = line.trim();
                if trimmed.is_empty() || trimmed.starts_with(COMMENT_MARKER) {
                    continue;
                }
                break (idx + 1, line);
            }
            None => {
                return Err(BenchError::MalformedHeader {
                    origin: origin.to_string(),
                    line: 0,
                    detail: "input ended before a header line".to_string(),
                })
            }
        }
    };

    let (n_rows, n_cols, declared_nnz) =
        parse_header(&header).map_err(|detail| BenchError::MalformedHeader {
            origin: origin.to_string(),
            line: header_line_no,
            detail,
        })?;
    debug!(origin, n_rows, n_cols, declared_nnz, "parsed coordinate header");

    let mut triplets = Vec::with_capacity(declared_nnz.min(MAX_TRIPLET_PREALLOCATION));
    let mut dropped = 0usize;
    let mut stopped_at_line = None;

    let mut record = RecordAssembler::default();

    'lines: for (idx, line) in lines {
        let line = line.map_err(unreadable)?;
        for token in line.split_whitespace() {
            match record.push(token) {
                Ok(None) => {}
                Ok(Some((row, col, value))) => match to_zero_based(row, col, n_rows, n_cols) {
                    Some((r, c)) => triplets.push(Triplet::new(r, c, value)),
                    None => dropped += 1,
                },
                Err(detail) => {
                    warn!(origin, line = idx + 1, %detail, "stopped reading at malformed record");
                    stopped_at_line = Some(idx + 1);
                    break 'lines;
                }
            }
        }
    }

    if stopped_at_line.is_none() && record.is_partial() {
        warn!(origin, "ignored incomplete trailing record");
    }
    if dropped > 0 {
        warn!(origin, dropped, "skipped entries outside the declared dimensions");
    }
    info!(
        origin,
        n_rows,
        n_cols,
        accepted = triplets.len(),
        dropped,
        "loaded coordinate matrix"
    );

    Ok(CoordinateMatrix {
        n_rows,
        n_cols,
        declared_nnz,
        triplets,
        dropped,
        stopped_at_line,
    })
}

/// Parses a coordinate file straight into CSR
pub fn load_csr<P: AsRef<Path>>(path: P) -> Result<SparseMatrixCSR<f64>> {
    Ok(parse_coordinate_file(path)?.into_csr())
}

/// Writes a CSR matrix as a coordinate file with 1-based indices
pub fn write_coordinate_file<P: AsRef<Path>>(path: P, matrix: &SparseMatrixCSR<f64>) -> Result<()> {
    let mut out = BufWriter::new(File::create(path)?);

    writeln!(out, "{}", COORDINATE_BANNER)?;
    writeln!(out, "{} {} {}", matrix.n_rows, matrix.n_cols, matrix.nnz())?;

    for i in 0..matrix.n_rows {
        for (j, value) in matrix.row_iter(i) {
            writeln!(out, "{} {} {}", i + 1, j + 1, value)?;
        }
    }

    out.flush()?;
    Ok(())
}

fn parse_header(line: &str) -> std::result::Result<(usize, usize, usize), String> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() != 3 {
        return Err(format!(
            "expected `rows cols nnz`, found {} fields in {:?}",
            parts.len(),
            line.trim()
        ));
    }

    let field = |name: &str, s: &str| {
        s.parse::<usize>()
            .map_err(|_| format!("{} is not a non-negative integer: {:?}", name, s))
    };

    let dimension = |name: &str, s: &str| {
        let n = field(name, s)?;
        if n > MAX_COORDINATE_DIMENSION {
            return Err(format!(
                "{} {} exceeds the supported maximum {}",
                name, n, MAX_COORDINATE_DIMENSION
            ));
        }
        Ok(n)
    };

    Ok((
        dimension("row count", parts[0])?,
        dimension("column count", parts[1])?,
        field("nonzero count", parts[2])?,
    ))
}

/// 1-based file indices to 0-based, or `None` when outside the shape
fn to_zero_based(row: i64, col: i64, n_rows: usize, n_cols: usize) -> Option<(usize, usize)> {
    let r = usize::try_from(row.checked_sub(1)?).ok()?;
    let c = usize::try_from(col.checked_sub(1)?).ok()?;
    (r < n_rows && c < n_cols).then_some((r, c))
}

/// Collects `row col value` tokens into complete records
#[derive(Default)]
struct RecordAssembler {
    row: Option<i64>,
    col: Option<i64>,
}

impl RecordAssembler {
    fn push(&mut self, token: &str) -> std::result::Result<Option<(i64, i64, f64)>, String> {
        match (self.row, self.col) {
            (None, _) => {
                self.row = Some(parse_index("row", token)?);
                Ok(None)
            }
            (Some(_), None) => {
                self.col = Some(parse_index("column", token)?);
                Ok(None)
            }
            (Some(row), Some(col)) => {
                let value = token
                    .parse::<f64>()
                    .map_err(|_| format!("value is not a number: {:?}", token))?;
                self.row = None;
                self.col = None;
                Ok(Some((row, col, value)))
            }
        }
    }

    fn is_partial(&self) -> bool {
        self.row.is_some()
    }
}

fn parse_index(name: &str, token: &str) -> std::result::Result<i64, String> {
    token
        .parse::<i64>()
        .map_err(|_| format!("{} index is not an integer: {:?}", name, token))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<CoordinateMatrix> {
        parse_coordinate(text.as_bytes(), "<test>")
    }

    #[test]
    fn test_comments_and_header() {
        let m = parse("%%MatrixMarket matrix coordinate real general\n% note\n\n3 4 2\n1 1 1.5\n3 4 -2e1\n")
            .unwrap();

        assert_eq!((m.n_rows, m.n_cols, m.declared_nnz), (3, 4, 2));
        assert_eq!(m.triplets, vec![Triplet::new(0, 0, 1.5), Triplet::new(2, 3, -20.0)]);
        assert_eq!(m.dropped, 0);
        assert_eq!(m.stopped_at_line, None);
    }

    #[test]
    fn test_declared_count_is_advisory() {
        let m = parse("2 2 10\n1 1 1.0\n2 2 2.0\n").unwrap();
        assert_eq!(m.declared_nnz, 10);
        assert_eq!(m.accepted(), 2);

        let m = parse("2 2 1\n1 1 1.0\n1 2 2.0\n2 1 3.0\n").unwrap();
        assert_eq!(m.accepted(), 3);
    }

    #[test]
    fn test_out_of_range_entries_dropped() {
        let m = parse("2 2 4\n3 1 1.0\n1 3 1.0\n0 1 1.0\n-4 1 1.0\n2 2 5.0\n").unwrap();
        assert_eq!(m.dropped, 4);
        assert_eq!(m.triplets, vec![Triplet::new(1, 1, 5.0)]);
    }

    #[test]
    fn test_records_may_span_lines() {
        let m = parse("2 2 2\n1 2\n3.0 2\n1 4.0\n").unwrap();
        assert_eq!(m.triplets, vec![Triplet::new(0, 1, 3.0), Triplet::new(1, 0, 4.0)]);
    }

    #[test]
    fn test_malformed_record_stops_reading() {
        let m = parse("2 2 3\n1 1 1.0\n2 x 2.0\n2 2 3.0\n").unwrap();
        assert_eq!(m.accepted(), 1);
        assert_eq!(m.stopped_at_line, Some(3));
    }

    #[test]
    fn test_malformed_headers() {
        for bad in ["", "% only comments\n", "3 3\n", "3 three 4\n", "3 3 -1\n", "1.5 2 2\n", "3 3 3 3\n"] {
            match parse(bad) {
                Err(BenchError::MalformedHeader { .. }) => {}
                other => panic!("{:?} should be a malformed header, got {:?}", bad, other),
            }
        }
    }

    #[test]
    fn test_header_line_number_reported() {
        match parse("% c\n% c\n4 x 1\n") {
            Err(BenchError::MalformedHeader { line, .. }) => assert_eq!(line, 3),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_oversized_dimensions_rejected() {
        let too_big = MAX_COORDINATE_DIMENSION + 1;
        for bad in [
            format!("{} 1 0\n", usize::MAX),
            "1000000000000 1 0\n".to_string(),
            format!("1 {} 0\n", usize::MAX),
            format!("{} 4 0\n", too_big),
            format!("4 {} 0\n", too_big),
        ] {
            match parse(&bad) {
                Err(BenchError::MalformedHeader { line, detail, .. }) => {
                    assert_eq!(line, 1);
                    assert!(detail.contains("exceeds"), "{}", detail);
                }
                other => panic!("{:?} should be rejected, got {:?}", bad, other),
            }
        }
    }

    #[test]
    fn test_largest_dimension_accepted() {
        let m = parse(&format!("{} 1 0\n", MAX_COORDINATE_DIMENSION)).unwrap();
        assert_eq!(m.n_rows, MAX_COORDINATE_DIMENSION);
        assert!(m.triplets.is_empty());
    }

    #[test]
    fn test_into_csr() {
        let m = parse("3 3 4\n3 3 4.0\n1 1 2.0\n3 1 1.0\n2 2 3.0\n").unwrap();
        let csr = m.into_csr();
        assert_eq!(csr.row_ptr, vec![0, 1, 2, 4]);
        assert_eq!(csr.col_idx, vec![0, 1, 0, 2]);
        assert_eq!(csr.values, vec![2.0, 3.0, 1.0, 4.0]);
    }

    #[test]
    fn test_zero_dimension_header() {
        let m = parse("0 0 0\n").unwrap();
        let csr = m.into_csr();
        assert_eq!(csr.row_ptr, vec![0]);
    }
}
