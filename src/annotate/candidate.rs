/// Clue metadata is packed after the place name behind a run of at least this many spaces.
const CLUE_SEPARATOR: &str = "    ";

/// One candidate line from the extraction output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    line: String,
}

impl Candidate {
    pub fn new(line: impl Into<String>) -> Self {
        Self { line: line.into() }
    }

    /// The trimmed line as it appeared in the content
    pub fn line(&self) -> &str {
        &self.line
    }

    /// Text before the first run of four or more spaces.
    ///
    /// Used both to deduplicate candidates within an element and as the literal text to find.
    pub fn matching_key(&self) -> &str {
        match self.line.find(CLUE_SEPARATOR) {
            Some(end) => &self.line[..end],
            None => &self.line,
        }
    }
}

/// Split newline-delimited content into trimmed, non-empty candidates, keeping their order.
///
/// Repeated lines are kept; deduplication happens per element on the matching key.
pub fn parse_candidates(content: &str) -> Vec<Candidate> {
    content
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(Candidate::new)
        .collect()
}
