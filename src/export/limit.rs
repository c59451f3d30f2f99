//! # Row Window
//!
//! Parses the `limit` argument. On the wire it is an SQL `LIMIT`
//! clause body (`"offset, count"` or just `"count"`). It ends up inside
//! SQL text, so only two non-negative integers are accepted.

use std::fmt;
use std::str::FromStr;

use super::errors::ExportError;

/// Default window when the request has no `limit`
pub const DEFAULT_LIMIT: &str = "0, 100";

/// A validated `LIMIT offset, count` window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limit {
    pub offset: u64,
    pub count: u64,
}

impl Limit {
    pub fn new(offset: u64, count: u64) -> Self {
        Self { offset, count }
    }

    /// Windows of `chunk` rows covering `total` rows
    pub fn pages(total: u64, chunk: u64) -> Vec<Limit> {
        if chunk == 0 {
            return Vec::new();
        }
        (0..total)
            .step_by(chunk as usize)
            .map(|offset| Limit::new(offset, chunk))
            .collect()
    }
}

impl Default for Limit {
    fn default() -> Self {
        Self::new(0, 100)
    }
}

impl FromStr for Limit {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ExportError::InvalidArgument(format!("limit '{}'", s));
        let parse = |part: &str| part.trim().parse::<u64>().map_err(|_| invalid());

        match s.split_once(',') {
            Some((offset, count)) => Ok(Limit::new(parse(offset)?, parse(count)?)),
            None => Ok(Limit::new(0, parse(s)?)),
        }
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.offset, self.count)
    }
}
