// Transition records of the ##states## section and their decoder.
//
// foma elides the source state on consecutive lines leaving the same state,
// and elides the output label on identity arcs. That gives five record
// shapes, distinguished only by how many integers are on the line:
//
//   -1 -1 -1 -1 -1         sentinel
//   label dest             identity arc from the implied state
//   in out dest            arc from the implied state
//   src label dest w       identity arc, or accepting marker if label/dest is -1
//   src in out dest w      full arc
//
// The trailing field of the 4- and 5-field shapes is accepted and ignored.

use std::fmt;

use crate::{FstError, StateId, SymbolId};

/// A directed, labelled edge of the transducer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Arc {
    /// Source state.
    pub state: StateId,
    pub in_label: SymbolId,
    pub out_label: SymbolId,
    /// Target state.
    pub destination: StateId,
}

impl Arc {
    pub fn new(
        state: StateId,
        in_label: SymbolId,
        out_label: SymbolId,
        destination: StateId,
    ) -> Self {
        Self {
            state,
            in_label,
            out_label,
            destination,
        }
    }

    /// Arc that reads and writes the same label.
    pub fn identity(state: StateId, label: SymbolId, destination: StateId) -> Self {
        Self::new(state, label, label, destination)
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        self.in_label == self.out_label
    }
}

impl fmt::Display for Arc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -{}:{}→ {}",
            self.state, self.in_label, self.out_label, self.destination
        )
    }
}

/// The source state abbreviated records attach to.
///
/// Threaded through [`decode_line`] by value: each call takes the cursor
/// left by the previous record and returns the cursor for the next one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImpliedState(Option<StateId>);

impl ImpliedState {
    /// No source state established yet.
    pub const NONE: Self = Self(None);

    pub fn get(self) -> Option<StateId> {
        self.0
    }
}

impl From<StateId> for ImpliedState {
    fn from(state: StateId) -> Self {
        Self(Some(state))
    }
}

/// One line of the `##states##` section, classified by arity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArcRecord {
    /// `-1 -1 -1 -1 -1`
    Sentinel,
    /// `label dest`
    Identity { label: SymbolId, destination: StateId },
    /// `in out dest`
    Pair {
        in_label: SymbolId,
        out_label: SymbolId,
        destination: StateId,
    },
    /// `src label dest weight`. A `-1` label or destination is kept as `None`
    /// and turns the record into an accepting-state marker.
    Short {
        state: StateId,
        label: Option<SymbolId>,
        destination: Option<StateId>,
    },
    /// `src in out dest weight`
    Full {
        state: StateId,
        in_label: SymbolId,
        out_label: SymbolId,
        destination: StateId,
    },
}

/// What a decoded record contributes to the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArcEffect {
    Arc(Arc),
    Accepting(StateId),
    /// Sentinel: nothing to record.
    None,
}

const MAX_FIELDS: usize = 5;

impl ArcRecord {
    /// Classify one transition line.
    pub fn parse(line_no: usize, line: &str) -> Result<Self, FstError> {
        let malformed = |reason: String| FstError::MalformedTransition {
            line: line_no,
            text: line.to_string(),
            reason,
        };

        let mut fields = [0i64; MAX_FIELDS];
        let mut arity = 0;
        for token in line.split_whitespace() {
            let value: i64 = token
                .parse()
                .map_err(|_| malformed(format!("{token:?} is not an integer")))?;
            if arity < MAX_FIELDS {
                fields[arity] = value;
            }
            arity += 1;
        }

        let id = |value: i64, what: &str| -> Result<u32, FstError> {
            u32::try_from(value).map_err(|_| malformed(format!("{what} {value} out of range")))
        };
        let optional = |value: i64, what: &str| -> Result<Option<u32>, FstError> {
            if value == -1 {
                Ok(None)
            } else {
                id(value, what).map(Some)
            }
        };

        match arity {
            2 => Ok(ArcRecord::Identity {
                label: id(fields[0], "label")?,
                destination: id(fields[1], "destination")?,
            }),
            3 => Ok(ArcRecord::Pair {
                in_label: id(fields[0], "input label")?,
                out_label: id(fields[1], "output label")?,
                destination: id(fields[2], "destination")?,
            }),
            4 => Ok(ArcRecord::Short {
                state: id(fields[0], "state")?,
                label: optional(fields[1], "label")?,
                destination: optional(fields[2], "destination")?,
            }),
            5 if fields == [-1; MAX_FIELDS] => Ok(ArcRecord::Sentinel),
            5 => Ok(ArcRecord::Full {
                state: id(fields[0], "state")?,
                in_label: id(fields[1], "input label")?,
                out_label: id(fields[2], "output label")?,
                destination: id(fields[3], "destination")?,
            }),
            n => Err(malformed(format!("expected 2 to 5 fields, found {n}"))),
        }
    }

    /// Resolve the record against the implied state.
    ///
    /// Returns the record's contribution and the implied state for the next
    /// record. Only arc-creating 4- and 5-field records move the cursor.
    pub fn apply(
        self,
        line_no: usize,
        implied: ImpliedState,
    ) -> Result<(ArcEffect, ImpliedState), FstError> {
        let implied_source = || implied.get().ok_or(FstError::NoImpliedState { line: line_no });

        match self {
            ArcRecord::Sentinel => Ok((ArcEffect::None, implied)),
            ArcRecord::Identity { label, destination } => {
                let arc = Arc::identity(implied_source()?, label, destination);
                Ok((ArcEffect::Arc(arc), implied))
            }
            ArcRecord::Pair {
                in_label,
                out_label,
                destination,
            } => {
                let arc = Arc::new(implied_source()?, in_label, out_label, destination);
                Ok((ArcEffect::Arc(arc), implied))
            }
            ArcRecord::Short {
                state,
                label: Some(label),
                destination: Some(destination),
            } => Ok((
                ArcEffect::Arc(Arc::identity(state, label, destination)),
                state.into(),
            )),
            ArcRecord::Short { state, .. } => Ok((ArcEffect::Accepting(state), implied)),
            ArcRecord::Full {
                state,
                in_label,
                out_label,
                destination,
            } => Ok((
                ArcEffect::Arc(Arc::new(state, in_label, out_label, destination)),
                state.into(),
            )),
        }
    }
}

/// Decode one `##states##` line given the implied state left by the previous line.
pub fn decode_line(
    line_no: usize,
    line: &str,
    implied: ImpliedState,
) -> Result<(ArcEffect, ImpliedState), FstError> {
    let record = ArcRecord::parse(line_no, line)?;
    log::trace!("line {line_no}: {record:?}");
    record.apply(line_no, implied)
}
