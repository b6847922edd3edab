// Symbol table: sigma accumulation, epsilon removal, grapheme/multichar split.

use hashbrown::HashMap;

use crate::flags::FlagDiacritic;
use crate::options::ParseOptions;
use crate::{EPSILON, FstError, SymbolId};

/// How a symbol is treated by tokenizers.
///
/// Derived from the symbol text: exactly one character is a grapheme,
/// anything longer is a multi-character symbol (tags, flag diacritics).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SymbolKind {
    Grapheme,
    MultiChar,
}

impl SymbolKind {
    pub fn of(text: &str) -> Self {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(_), None) => SymbolKind::Grapheme,
            _ => SymbolKind::MultiChar,
        }
    }
}

/// A borrowed view of one alphabet entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Symbol<'a> {
    pub id: SymbolId,
    pub text: &'a str,
}

impl<'a> Symbol<'a> {
    #[inline]
    pub fn kind(&self) -> SymbolKind {
        SymbolKind::of(self.text)
    }

    #[inline]
    pub fn is_grapheme(&self) -> bool {
        self.kind() == SymbolKind::Grapheme
    }

    #[inline]
    pub fn is_multichar(&self) -> bool {
        self.kind() == SymbolKind::MultiChar
    }

    /// The flag diacritic this symbol encodes, if it is one.
    pub fn flag_diacritic(&self) -> Option<FlagDiacritic<'a>> {
        FlagDiacritic::parse(self.text)
    }
}

/// Accumulates `##sigma##` entries.
///
/// A repeated id silently replaces the earlier entry.
#[derive(Debug, Default)]
pub struct SymbolTableBuilder {
    entries: HashMap<SymbolId, String>,
}

impl SymbolTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse one `<id> <text>` line and record it.
    pub fn push_line(&mut self, line_no: usize, line: &str) -> Result<(), FstError> {
        let malformed = || FstError::MalformedSymbol {
            line: line_no,
            text: line.to_string(),
        };

        let mut tokens = line.split_whitespace();
        let (Some(id), Some(text), None) = (tokens.next(), tokens.next(), tokens.next()) else {
            return Err(malformed());
        };
        let id: SymbolId = id.parse().map_err(|_| malformed())?;

        self.insert(id, text);
        Ok(())
    }

    pub fn insert(&mut self, id: SymbolId, text: &str) {
        if let Some(previous) = self.entries.insert(id, text.to_string()) {
            log::trace!("sigma id {id} redefined: {previous:?} -> {text:?}");
        }
    }

    /// Drop epsilon and freeze the table.
    pub fn finish(mut self, options: &ParseOptions) -> Result<SymbolTable, FstError> {
        if self.entries.remove(&EPSILON).is_none() && options.require_epsilon {
            return Err(FstError::MissingEpsilon);
        }
        Ok(SymbolTable::from_entries(self.entries))
    }
}

/// The parsed alphabet, epsilon excluded.
///
/// Entries are kept in ascending id order. The grapheme and multichar views
/// are filters over the same storage, so they are always disjoint and
/// together cover the whole table.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    ids: Vec<SymbolId>,
    strings: HashMap<SymbolId, String>,
    by_text: HashMap<String, SymbolId>,
}

impl SymbolTable {
    fn from_entries(strings: HashMap<SymbolId, String>) -> Self {
        let mut ids: Vec<SymbolId> = strings.keys().copied().collect();
        ids.sort_unstable();

        let mut by_text = HashMap::with_capacity(ids.len());
        for &id in &ids {
            // Lowest id wins when several ids share one text.
            by_text.entry(strings[&id].clone()).or_insert(id);
        }

        Self {
            ids,
            strings,
            by_text,
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: SymbolId) -> bool {
        self.strings.contains_key(&id)
    }

    /// Text of the symbol with the given id.
    pub fn get(&self, id: SymbolId) -> Option<&str> {
        self.strings.get(&id).map(String::as_str)
    }

    /// Id of the symbol with the given text.
    pub fn id_of(&self, text: &str) -> Option<SymbolId> {
        self.by_text.get(text).copied()
    }

    pub fn kind(&self, id: SymbolId) -> Option<SymbolKind> {
        self.get(id).map(SymbolKind::of)
    }

    /// All symbols in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = Symbol<'_>> {
        self.ids.iter().map(|&id| Symbol {
            id,
            text: &self.strings[&id],
        })
    }

    /// Single-character symbols.
    pub fn graphemes(&self) -> impl Iterator<Item = Symbol<'_>> {
        self.iter().filter(Symbol::is_grapheme)
    }

    /// Symbols longer than one character.
    pub fn multichar_symbols(&self) -> impl Iterator<Item = Symbol<'_>> {
        self.iter().filter(Symbol::is_multichar)
    }

    /// Multichar symbols that are flag diacritic tokens.
    pub fn flag_diacritics(&self) -> impl Iterator<Item = (SymbolId, FlagDiacritic<'_>)> {
        self.multichar_symbols()
            .filter_map(|sym| sym.flag_diacritic().map(|flag| (sym.id, flag)))
    }
}
