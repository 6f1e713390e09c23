use crate::{Candidate, Pattern};

/// Format used to render output-only values such as today's date
pub const DEFAULT_FORMAT: Pattern = Pattern::from_static("%Y%m%d");

/// Formats tried during detection, in order
pub const DEFAULT_CANDIDATES: &[Candidate] = &[
    Candidate::from_static("%Y%m%d", 8),
    Candidate::from_static("%Y%m", 6),
    Candidate::from_static("%Y%m%d%H%M%S", 14),
    Candidate::from_static("%Y%m%d %H%M%S", 15),
];

/// Months per year, used to fold years into a single month shift
pub const MONTHS_PER_YEAR: i64 = 12;

/// Fallback for fields a pattern does not carry (month, day)
pub(crate) const FIRST: i64 = 1;
/// Fallback for time fields a pattern does not carry
pub(crate) const MIDNIGHT: i64 = 0;

