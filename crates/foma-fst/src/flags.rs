// Flag diacritic token recognition: @P.FEAT.VAL@, @C.FEAT@, ...
//
// Only the token structure is recognised here. Evaluating the operations
// against a feature register is left to the lookup engine.

/// The flag diacritic operations understood by foma.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum FlagOp {
    /// Positive set: set feature to value.
    P,
    /// Negative set: set feature to the complement of value.
    N,
    /// Require: feature must be set (to value, if given).
    R,
    /// Disallow: feature must not be set (to value, if given).
    D,
    /// Clear: reset feature to neutral.
    C,
    /// Unification: set if neutral, otherwise must match.
    U,
    /// Equal: feature must equal another feature.
    E,
}

impl FlagOp {
    /// Map the operation letter of a flag token to its operation.
    pub fn from_letter(letter: u8) -> Option<Self> {
        Some(match letter {
            b'P' => FlagOp::P,
            b'N' => FlagOp::N,
            b'R' => FlagOp::R,
            b'D' => FlagOp::D,
            b'C' => FlagOp::C,
            b'U' => FlagOp::U,
            b'E' => FlagOp::E,
            _ => return None,
        })
    }

    pub fn letter(self) -> char {
        match self {
            FlagOp::P => 'P',
            FlagOp::N => 'N',
            FlagOp::R => 'R',
            FlagOp::D => 'D',
            FlagOp::C => 'C',
            FlagOp::U => 'U',
            FlagOp::E => 'E',
        }
    }
}

/// A flag diacritic token split into its parts, borrowing from the symbol text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FlagDiacritic<'a> {
    pub op: FlagOp,
    pub feature: &'a str,
    /// `None` for the two-part form `@OP.FEATURE@`.
    pub value: Option<&'a str>,
}

impl<'a> FlagDiacritic<'a> {
    /// Recognise `@OP.FEATURE.VALUE@` or `@OP.FEATURE@`.
    ///
    /// Returns `None` for anything else, including the compiler's reserved
    /// `@_EPSILON_SYMBOL_@`-style symbols.
    pub fn parse(symbol: &'a str) -> Option<Self> {
        let bytes = symbol.as_bytes();
        // Shortest form is "@C.x@".
        if bytes.len() < 5 || bytes[0] != b'@' || bytes[2] != b'.' || bytes[bytes.len() - 1] != b'@'
        {
            return None;
        }
        let op = FlagOp::from_letter(bytes[1])?;

        let inner = &symbol[3..symbol.len() - 1];
        let (feature, value) = match inner.split_once('.') {
            Some((feature, value)) => (feature, Some(value)),
            None => (inner, None),
        };
        if feature.is_empty() || value.is_some_and(str::is_empty) {
            return None;
        }

        Some(Self { op, feature, value })
    }
}

/// Whether `symbol` is a flag diacritic token.
#[inline]
pub fn is_flag_diacritic(symbol: &str) -> bool {
    FlagDiacritic::parse(symbol).is_some()
}
