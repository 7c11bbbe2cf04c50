//! Parsers for the helix parameter files.
//!
//! IMPORTANT: both stacking files are position ordered grids. The row is
//! the pair `i·j`, the column is the pair `k·l`, and both run through
//! [`PARAM_FILE_PAIR_ORDER`]. A cell holds a decimal value in kcal/mol
//! (`stack.dh`) or cal/(mol K) (`stack.ds`), or `.`/`INF` where the
//! stack does not exist. Values are stored in tenths, rounded the same
//! way the reference loader rounds them: `floor(10 * x + 0.5)`.
//!
//! `helix.dat` is a plain value stream in the fixed order of
//! [`HELIX_FILE_ORDER`].
//!
//! Lines are trimmed, blank lines skipped, and `#` starts a comment. The
//! comment lines in front of the first record form the file header.
//! Nothing is defaulted: a file that ends early is `IncompleteTable`.

use std::io::{self, BufRead};
use std::path::Path;

use crate::Nucleotide;
use crate::NCOUNT;
use crate::ThermoError;

pub type QuartetTable<T> = [[[[T; NCOUNT]; NCOUNT]; NCOUNT]; NCOUNT];

/// 16 ordered (5', 3') pairs over A, C, G, U.
pub const PAIR_COUNT: usize = 16;

pub const PARAM_FILE_PAIR_ORDER: [(Nucleotide, Nucleotide); PAIR_COUNT] = {
    use Nucleotide::*;
    [
        (A, A), (A, C), (A, G), (A, U),
        (C, A), (C, C), (C, G), (C, U),
        (G, A), (G, C), (G, G), (G, U),
        (U, A), (U, C), (U, G), (U, U),
    ]
};

pub const HELIX_FILE_ORDER: [&str; 5] = ["dhi", "dsi", "dss", "dha", "dsa"];

pub trait RecordParser {
    type Output;

    /// File name used in format errors.
    fn file(&self) -> &str;

    /// Consume the whitespace separated fields of one line.
    fn parse_record(&mut self, fields: &[&str], line: usize) -> Result<(), ThermoError>;

    /// Check that every required value was seen.
    fn finish(self) -> Result<Self::Output, ThermoError>;
}

/// Run `parser` over all lines of `reader`, returns the header text and
/// the parser output. `source` is reported with I/O errors.
pub fn parse_records<R: BufRead, P: RecordParser>(
    reader: R,
    source: &Path,
    mut parser: P,
) -> Result<(String, P::Output), ThermoError> {
    let mut header: Vec<String> = Vec::new();
    let mut in_header = true;

    for (idx, line) in reader.lines().enumerate() {
        let line = match line {
            Ok(line) => line,
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                return Err(ThermoError::format(parser.file(), idx + 1, "line is not valid UTF-8"));
            }
            Err(e) => return Err(ThermoError::from_io(source, e)),
        };
        let line = line.trim();

        if line.is_empty() {
            continue;
        }

        if let Some(comment) = line.strip_prefix('#') {
            if in_header {
                let comment = comment.trim();
                if !comment.is_empty() {
                    header.push(comment.to_string());
                }
            }
            continue;
        }

        in_header = false;
        let content = line.split('#').next().unwrap_or("");
        let fields: Vec<&str> = content.split_whitespace().collect();
        parser.parse_record(&fields, idx + 1)?;
    }

    let output = parser.finish()?;
    Ok((header.join(" "), output))
}

fn is_missing(token: &str) -> bool {
    token == "." || token == "INF"
}

/// Decimal value to tenths.
fn parse_value(file: &str, line: usize, token: &str) -> Result<i16, ThermoError> {
    let invalid = || ThermoError::format(file, line, format!("'{}' is not a number", token));
    let x = token.parse::<f64>().map_err(|_| invalid())?;
    if !x.is_finite() {
        return Err(invalid());
    }
    let tenths = (x * 10.0 + 0.5).floor();
    if tenths < i16::MIN as f64 || tenths > i16::MAX as f64 {
        return Err(ThermoError::format(file, line, format!("'{}' is out of range", token)));
    }
    Ok(tenths as i16)
}

/// Parsed content of `stack.dh` or `stack.ds`.
#[derive(Debug)]
pub struct StackRecords {
    /// `None` where the grid holds the missing marker. Sentinel quartets
    /// are not part of the grid and stay `None`.
    pub values: Box<QuartetTable<Option<i16>>>,
}

impl StackRecords {
    pub fn count(&self) -> usize {
        self.values.iter().flatten().flatten().flatten().filter(|v| v.is_some()).count()
    }
}

/// Parser for a 16 x 16 stacking grid.
#[derive(Debug)]
pub struct StackParser {
    file: String,
    values: Box<QuartetTable<Option<i16>>>,
    rows: usize,
}

impl StackParser {
    pub fn new(file: &str) -> Self {
        StackParser {
            file: file.to_string(),
            values: Box::new([[[[None; NCOUNT]; NCOUNT]; NCOUNT]; NCOUNT]),
            rows: 0,
        }
    }
}

impl RecordParser for StackParser {
    type Output = StackRecords;

    fn file(&self) -> &str {
        &self.file
    }

    fn parse_record(&mut self, fields: &[&str], line: usize) -> Result<(), ThermoError> {
        if self.rows == PAIR_COUNT {
            return Err(ThermoError::format(&self.file, line,
                format!("grid already has {} rows", PAIR_COUNT)));
        }
        if fields.len() != PAIR_COUNT {
            return Err(ThermoError::format(&self.file, line, format!(
                "expected {} values per row, found {}", PAIR_COUNT, fields.len())));
        }

        let (i, j) = PARAM_FILE_PAIR_ORDER[self.rows];
        for (col, token) in fields.iter().enumerate() {
            let (k, l) = PARAM_FILE_PAIR_ORDER[col];
            let value = if is_missing(token) {
                None
            } else {
                Some(parse_value(&self.file, line, token)?)
            };
            self.values[i.index()][j.index()][k.index()][l.index()] = value;
        }
        self.rows += 1;
        Ok(())
    }

    fn finish(self) -> Result<StackRecords, ThermoError> {
        if self.rows < PAIR_COUNT {
            return Err(ThermoError::incomplete(&self.file, format!(
                "grid ended after {} of {} rows", self.rows, PAIR_COUNT)));
        }
        Ok(StackRecords { values: self.values })
    }
}

/// Parsed content of `helix.dat`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HelixRecords {
    pub dhi: i16,
    pub dsi: i16,
    pub dss: i16,
    pub dha: i16,
    pub dsa: i16,
}

/// Parser for the five helix terms.
#[derive(Debug)]
pub struct HelixParser {
    file: String,
    values: Vec<i16>,
}

impl HelixParser {
    pub fn new(file: &str) -> Self {
        HelixParser {
            file: file.to_string(),
            values: Vec::with_capacity(HELIX_FILE_ORDER.len()),
        }
    }
}

impl RecordParser for HelixParser {
    type Output = HelixRecords;

    fn file(&self) -> &str {
        &self.file
    }

    fn parse_record(&mut self, fields: &[&str], line: usize) -> Result<(), ThermoError> {
        for token in fields {
            if self.values.len() == HELIX_FILE_ORDER.len() {
                return Err(ThermoError::format(&self.file, line, format!(
                    "unexpected value '{}' after {} helix terms", token, HELIX_FILE_ORDER.len())));
            }
            self.values.push(parse_value(&self.file, line, token)?);
        }
        Ok(())
    }

    fn finish(self) -> Result<HelixRecords, ThermoError> {
        match self.values[..] {
            [dhi, dsi, dss, dha, dsa] => Ok(HelixRecords { dhi, dsi, dss, dha, dsa }),
            _ => Err(ThermoError::incomplete(&self.file, format!(
                "missing '{}'", HELIX_FILE_ORDER[self.values.len()]))),
        }
    }
}
