// Section headers and the line dispatcher state machine.

use std::fmt;

use crate::FstError;

/// Delimiter surrounding a section header payload, e.g. `##sigma##`.
pub const HEADER_DELIMITER: &str = "##";

/// Parser mode selected by the most recent section header.
///
/// The text format is a flat sequence of sections. Only `Sigma` and `Arcs`
/// carry data this crate needs; the rest are consumed and ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    /// Before any header, or after `##foma-net 1.0##`.
    Initial,
    /// `##props##`: compiler metadata (arity, counts, net name).
    Props,
    /// `##sigma##`: one `<id> <symbol>` entry per line.
    Sigma,
    /// `##states##`: transition records.
    Arcs,
    /// `##end##`: the only mode in which input may legally end.
    End,
}

impl Section {
    /// All sections, in the order they appear in a well-formed net.
    pub const ALL: [Section; 5] = [
        Section::Initial,
        Section::Props,
        Section::Sigma,
        Section::Arcs,
        Section::End,
    ];

    /// Map a header payload (the text between the `##` delimiters) to its section.
    pub fn from_header(payload: &str) -> Option<Self> {
        match payload {
            "foma-net 1.0" => Some(Section::Initial),
            "props" => Some(Section::Props),
            "sigma" => Some(Section::Sigma),
            "states" => Some(Section::Arcs),
            "end" => Some(Section::End),
            _ => None,
        }
    }

    /// The header payload that selects this section.
    pub fn header(self) -> &'static str {
        match self {
            Section::Initial => "foma-net 1.0",
            Section::Props => "props",
            Section::Sigma => "sigma",
            Section::Arcs => "states",
            Section::End => "end",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{HEADER_DELIMITER}{}{HEADER_DELIMITER}", self.header())
    }
}

/// Return the payload of a header line, or `None` for an ordinary line.
///
/// A header starts and ends with `##`. Trailing whitespace is ignored so that
/// `##end##  ` is still recognised.
pub fn header_payload(line: &str) -> Option<&str> {
    let line = line.trim_end();
    let min_len = 2 * HEADER_DELIMITER.len();
    if line.len() >= min_len
        && line.starts_with(HEADER_DELIMITER)
        && line.ends_with(HEADER_DELIMITER)
    {
        Some(&line[HEADER_DELIMITER.len()..line.len() - HEADER_DELIMITER.len()])
    } else {
        None
    }
}

/// Where a single input line should go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Routed<'a> {
    /// A header line; the dispatcher has switched to this section.
    Header(Section),
    /// A sigma entry for the symbol table.
    Sigma(&'a str),
    /// A transition record for the decoder.
    Arcs(&'a str),
    /// Blank line, or a line in a section without payload.
    Skip,
}

/// Line-oriented state machine over section headers.
#[derive(Debug, Clone)]
pub struct SectionDispatcher {
    current: Section,
}

impl Default for SectionDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl SectionDispatcher {
    pub fn new() -> Self {
        Self {
            current: Section::Initial,
        }
    }

    /// The section currently receiving lines.
    pub fn current(&self) -> Section {
        self.current
    }

    /// Route one line, switching sections on header lines.
    ///
    /// `line_no` is only used for error reporting.
    pub fn route<'a>(&mut self, line_no: usize, line: &'a str) -> Result<Routed<'a>, FstError> {
        if let Some(payload) = header_payload(line) {
            let section = Section::from_header(payload).ok_or_else(|| FstError::UnknownSection {
                line: line_no,
                header: payload.to_string(),
            })?;
            log::debug!("line {line_no}: entering section {section}");
            self.current = section;
            return Ok(Routed::Header(section));
        }

        if line.trim().is_empty() {
            return Ok(Routed::Skip);
        }

        Ok(match self.current {
            Section::Sigma => Routed::Sigma(line),
            Section::Arcs => Routed::Arcs(line),
            Section::Initial | Section::Props | Section::End => Routed::Skip,
        })
    }

    /// Check that input ended inside the `##end##` section.
    pub fn finish(&self) -> Result<(), FstError> {
        match self.current {
            Section::End => Ok(()),
            section => Err(FstError::TruncatedInput { section }),
        }
    }
}
