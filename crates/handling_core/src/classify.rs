//! Line classification
//!
//! Every input line is trimmed and sorted into one of three buckets before
//! any parsing happens.

/// Prefixes that mark a comment line.
pub const COMMENT_PREFIXES: [char; 2] = ['#', ';'];

/// Prefixes that mark another record family (boats, bikes, planes, ...).
/// Those lines are carried through verbatim.
pub const OPAQUE_PREFIXES: [char; 4] = ['%', '!', '$', '^'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Blank or comment, dropped from the output
    Empty,
    /// Different record family, emitted after all records
    Opaque,
    /// Possibly a vehicle record, handed to the parser
    Candidate,
}

/// Classify an already trimmed line.
pub fn classify(line: &str) -> LineKind {
    match line.chars().next() {
        None => LineKind::Empty,
        Some(c) if COMMENT_PREFIXES.contains(&c) => LineKind::Empty,
        Some(c) if OPAQUE_PREFIXES.contains(&c) => LineKind::Opaque,
        Some(_) => LineKind::Candidate,
    }
}
