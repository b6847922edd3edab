//! Text FST loader for foma / AT&T style transducer dumps.
//!
//! This crate reads the plain-text `##foma-net 1.0##` serialization of a
//! finite state transducer and builds an immutable transition graph that a
//! lookup engine can walk. No traversal happens here: flag diacritics are
//! recognised as alphabet tokens but never evaluated.
//!
//! # Architecture
//!
//! - [`section`] -- Section headers and the line dispatcher state machine
//! - [`symbols`] -- Sigma accumulation and the multichar/grapheme partition
//! - [`flags`] -- Flag diacritic token recognition (`@U.CASE.NOM@`)
//! - [`transition`] -- Arc type and the variable-arity record decoder
//! - [`graph`] -- Graph assembly and the read-only [`ParseResult`]
//! - [`options`] -- Parse configuration
//! - [`parser`] -- The parse driver tying the above together

use std::path::PathBuf;

pub mod flags;
pub mod graph;
pub mod options;
pub mod parser;
pub mod section;
pub mod symbols;
pub mod transition;

pub use graph::ParseResult;
pub use options::ParseOptions;
pub use parser::{parse, parse_file, parse_file_with_options, parse_with_options};
pub use section::Section;
pub use transition::Arc;

/// Numeric state identifier as written in the `##states##` section.
pub type StateId = u32;

/// Numeric symbol identifier as written in the `##sigma##` section.
pub type SymbolId = u32;

/// The reserved epsilon symbol id. Never exposed in the parsed alphabet.
pub const EPSILON: SymbolId = 0;

/// Error type for text FST parsing.
///
/// Line numbers are 1-based and refer to the input text.
#[derive(Debug, thiserror::Error)]
pub enum FstError {
    #[error("line {line}: unknown section header {header:?}")]
    UnknownSection { line: usize, header: String },
    #[error("input ended in section {section} before the end header")]
    TruncatedInput { section: Section },
    #[error("line {line}: malformed sigma entry {text:?}")]
    MalformedSymbol { line: usize, text: String },
    #[error("line {line}: malformed transition {text:?}: {reason}")]
    MalformedTransition {
        line: usize,
        text: String,
        reason: String,
    },
    #[error("line {line}: abbreviated transition before any source state")]
    NoImpliedState { line: usize },
    #[error("sigma does not define the epsilon symbol (id 0)")]
    MissingEpsilon,
    #[error("line {line}: transition label {symbol} is not defined in sigma")]
    UndefinedSymbol { line: usize, symbol: SymbolId },
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
