// Parse configuration.

/// Options controlling how strictly a text FST is checked while parsing.
///
/// The defaults only reject input the graph cannot be built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Fail with [`FstError::MissingEpsilon`](crate::FstError::MissingEpsilon)
    /// when sigma does not define id 0. Default: false.
    pub require_epsilon: bool,
    /// Fail with [`FstError::UndefinedSymbol`](crate::FstError::UndefinedSymbol)
    /// when a transition uses a non-epsilon label missing from sigma. Default: false.
    pub check_labels: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            require_epsilon: false,
            check_labels: false,
        }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_require_epsilon(mut self, require_epsilon: bool) -> Self {
        self.require_epsilon = require_epsilon;
        self
    }

    pub fn with_check_labels(mut self, check_labels: bool) -> Self {
        self.check_labels = check_labels;
        self
    }
}
