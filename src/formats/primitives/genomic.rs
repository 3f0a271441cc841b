//! Strand orientation of annotated features

use super::{FormatError, Result};
use std::fmt;
use std::str::FromStr;

/// DNA strand orientation
///
/// - `Forward`: Plus strand (+)
/// - `Reverse`: Minus strand (-)
/// - `Unknown`: Strand not specified or unknown (.)
///
/// # Examples
///
/// ```
/// use contig_sensors::formats::primitives::Strand;
/// use std::str::FromStr;
///
/// assert_eq!(Strand::from_str("+")?, Strand::Forward);
/// assert_eq!(Strand::from_str("-")?, Strand::Reverse);
/// assert_eq!(Strand::from_str(".")?, Strand::Unknown);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strand {
    /// Plus strand (+)
    Forward,

    /// Minus strand (-)
    Reverse,

    /// Unknown or unspecified strand (.)
    Unknown,
}

impl FromStr for Strand {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "+" => Ok(Strand::Forward),
            "-" => Ok(Strand::Reverse),
            "." => Ok(Strand::Unknown),
            _ => Err(FormatError::InvalidStrand(s.to_string())),
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strand::Forward => write!(f, "+"),
            Strand::Reverse => write!(f, "-"),
            Strand::Unknown => write!(f, "."),
        }
    }
}
