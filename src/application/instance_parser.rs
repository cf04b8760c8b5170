// Instance parser: fixed seven-line text format into a ProblemInstance
//
//   1: num_customers num_facilities
//   2: allocation cost, customer-major (num_customers * num_facilities values)
//   3: demand per customer
//   4: opening cost per facility
//   5: capacity per facility
//   6: truck_distance_limit truck_usage_cost
//   7: round-trip distance, customer-major (num_customers * num_facilities values)

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::num::{ParseFloatError, ParseIntError};
use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::domain::instance::{InstanceData, InstanceError, ProblemInstance};

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("could not open instance file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("line {line}: read failed: {source}")]
    Read {
        line: usize,
        #[source]
        source: io::Error,
    },

    #[error("line {line}: missing {field}, the file ends early")]
    MissingLine { line: usize, field: &'static str },

    #[error("line {line}: {field} needs {expected} values, found {found}")]
    TokenCount {
        line: usize,
        field: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: {field} token '{token}' is not a number: {source}")]
    InvalidNumber {
        line: usize,
        field: &'static str,
        token: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("line {line}: {field} token '{token}' is not a non-negative integer: {source}")]
    InvalidInteger {
        line: usize,
        field: &'static str,
        token: String,
        #[source]
        source: ParseIntError,
    },

    #[error("line {line}: unexpected content after the distance matrix")]
    TrailingContent { line: usize },

    #[error("instance is too large: {num_customers} customers x {num_facilities} facilities")]
    TooLarge {
        num_customers: usize,
        num_facilities: usize,
    },

    #[error("invalid instance: {0}")]
    Instance(#[from] InstanceError),
}

pub type Result<T> = std::result::Result<T, ParseError>;

/// Read an instance file
///
/// The handle is dropped on every return path. Nothing partial is ever
/// returned: any malformed line fails the whole parse.
pub fn parse_instance(path: impl AsRef<Path>) -> Result<ProblemInstance> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ParseError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let instance = read_instance(BufReader::new(file))?;
    debug!(
        path = %path.display(),
        customers = instance.num_customers(),
        facilities = instance.num_facilities(),
        "parsed instance"
    );
    Ok(instance)
}

/// Parse instance text already held in memory
pub fn parse_instance_str(contents: &str) -> Result<ProblemInstance> {
    read_instance(contents.as_bytes())
}

fn read_instance<R: BufRead>(reader: R) -> Result<ProblemInstance> {
    let mut records = Records::new(reader);

    let header = records.next_record("dimensions")?;
    let dims = header.integers(2)?;
    let (num_customers, num_facilities) = (dims[0], dims[1]);
    if num_customers == 0 {
        return Err(InstanceError::EmptyDimension("num_customers").into());
    }
    if num_facilities == 0 {
        return Err(InstanceError::EmptyDimension("num_facilities").into());
    }
    let cells = num_customers
        .checked_mul(num_facilities)
        .ok_or(ParseError::TooLarge {
            num_customers,
            num_facilities,
        })?;

    let allocation_cost = records.next_record("allocation cost")?.floats(cells)?;
    let demand = records.next_record("demand")?.floats(num_customers)?;
    let opening_cost = records.next_record("opening cost")?.floats(num_facilities)?;
    let capacity = records.next_record("capacity")?.floats(num_facilities)?;
    let truck = records.next_record("truck parameters")?.floats(2)?;
    let distance = records.next_record("distance")?.floats(cells)?;
    records.expect_end()?;

    let instance = ProblemInstance::new(InstanceData {
        num_customers,
        num_facilities,
        allocation_cost,
        demand,
        opening_cost,
        capacity,
        truck_distance_limit: truck[0],
        truck_usage_cost: truck[1],
        distance,
    })?;
    Ok(instance)
}

/// Line source that remembers the 1-based line number
struct Records<R> {
    lines: io::Lines<R>,
    line: usize,
}

impl<R: BufRead> Records<R> {
    fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line: 0,
        }
    }

    fn next_record(&mut self, field: &'static str) -> Result<Record> {
        self.line += 1;
        match self.lines.next() {
            Some(Ok(text)) => Ok(Record {
                line: self.line,
                field,
                text,
            }),
            Some(Err(source)) => Err(ParseError::Read {
                line: self.line,
                source,
            }),
            None => Err(ParseError::MissingLine {
                line: self.line,
                field,
            }),
        }
    }

    /// Only blank lines may follow the last record
    fn expect_end(&mut self) -> Result<()> {
        for next in self.lines.by_ref() {
            self.line += 1;
            let text = next.map_err(|source| ParseError::Read {
                line: self.line,
                source,
            })?;
            if !text.trim().is_empty() {
                return Err(ParseError::TrailingContent { line: self.line });
            }
        }
        Ok(())
    }
}

struct Record {
    line: usize,
    field: &'static str,
    text: String,
}

impl Record {
    fn tokens(&self, expected: usize) -> Result<Vec<&str>> {
        let tokens: Vec<&str> = self.text.split_ascii_whitespace().collect();
        if tokens.len() != expected {
            return Err(ParseError::TokenCount {
                line: self.line,
                field: self.field,
                expected,
                found: tokens.len(),
            });
        }
        Ok(tokens)
    }

    fn floats(&self, expected: usize) -> Result<Vec<f64>> {
        self.tokens(expected)?
            .into_iter()
            .map(|token| {
                token.parse::<f64>().map_err(|source| ParseError::InvalidNumber {
                    line: self.line,
                    field: self.field,
                    token: token.to_string(),
                    source,
                })
            })
            .collect()
    }

    fn integers(&self, expected: usize) -> Result<Vec<usize>> {
        self.tokens(expected)?
            .into_iter()
            .map(|token| {
                token.parse::<usize>().map_err(|source| ParseError::InvalidInteger {
                    line: self.line,
                    field: self.field,
                    token: token.to_string(),
                    source,
                })
            })
            .collect()
    }
}
