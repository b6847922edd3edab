// Parse driver: lines -> sections -> sigma / transition records -> graph.

use std::path::Path;

use crate::graph::{GraphAssembler, ParseResult};
use crate::options::ParseOptions;
use crate::section::{Routed, SectionDispatcher};
use crate::symbols::SymbolTableBuilder;
use crate::transition::{self, ImpliedState};
use crate::FstError;

/// Parse a text FST with default options.
pub fn parse(text: &str) -> Result<ParseResult, FstError> {
    parse_with_options(text, &ParseOptions::default())
}

/// Parse a text FST.
///
/// All state lives in this call, so independent inputs may be parsed
/// concurrently. Nothing is returned unless the whole input parses.
pub fn parse_with_options(text: &str, options: &ParseOptions) -> Result<ParseResult, FstError> {
    let mut dispatcher = SectionDispatcher::new();
    let mut sigma = SymbolTableBuilder::new();
    let mut assembler = GraphAssembler::new();
    let mut implied = ImpliedState::NONE;

    for (index, line) in text.lines().enumerate() {
        let line_no = index + 1;
        match dispatcher.route(line_no, line)? {
            Routed::Sigma(line) => sigma.push_line(line_no, line)?,
            Routed::Arcs(line) => {
                let (effect, next) = transition::decode_line(line_no, line, implied)?;
                implied = next;
                assembler.push(line_no, effect);
            }
            Routed::Header(_) | Routed::Skip => {}
        }
    }
    dispatcher.finish()?;

    let symbols = sigma.finish(options)?;
    assembler.finish(symbols, options)
}

/// Read and parse a text FST file with default options.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<ParseResult, FstError> {
    parse_file_with_options(path, &ParseOptions::default())
}

/// Read and parse a text FST file.
pub fn parse_file_with_options<P: AsRef<Path>>(
    path: P,
    options: &ParseOptions,
) -> Result<ParseResult, FstError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| FstError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("read {} bytes from {}", text.len(), path.display());
    parse_with_options(&text, options)
}
