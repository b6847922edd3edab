// Graph assembly and the immutable parse result.

use crate::options::ParseOptions;
use crate::symbols::{Symbol, SymbolTable};
use crate::transition::{Arc, ArcEffect};
use crate::{EPSILON, FstError, StateId, SymbolId};

/// Collects decoded records until the input is exhausted.
#[derive(Debug, Default)]
pub struct GraphAssembler {
    /// Arcs with the line they were decoded from, for error reporting.
    arcs: Vec<(Arc, usize)>,
    accepting: Vec<StateId>,
}

impl GraphAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line_no: usize, effect: ArcEffect) {
        match effect {
            ArcEffect::Arc(arc) => self.arcs.push((arc, line_no)),
            ArcEffect::Accepting(state) => self.accepting.push(state),
            ArcEffect::None => {}
        }
    }

    /// Build the final graph.
    pub fn finish(
        self,
        symbols: SymbolTable,
        options: &ParseOptions,
    ) -> Result<ParseResult, FstError> {
        if options.check_labels {
            for (arc, line) in &self.arcs {
                for symbol in [arc.in_label, arc.out_label] {
                    if symbol != EPSILON && !symbols.contains(symbol) {
                        return Err(FstError::UndefinedSymbol {
                            line: *line,
                            symbol,
                        });
                    }
                }
            }
        }

        let mut arcs: Vec<Arc> = self.arcs.into_iter().map(|(arc, _)| arc).collect();
        arcs.sort_unstable();
        arcs.dedup();

        let mut accepting = self.accepting;
        accepting.sort_unstable();
        accepting.dedup();

        let mut states: Vec<StateId> = arcs.iter().map(|arc| arc.state).collect();
        states.extend_from_slice(&accepting);
        states.sort_unstable();
        states.dedup();

        log::debug!(
            "parsed net: {} symbols, {} arcs, {} states, {} accepting",
            symbols.len(),
            arcs.len(),
            states.len(),
            accepting.len()
        );

        Ok(ParseResult {
            symbols,
            arcs,
            states,
            accepting,
        })
    }
}

/// A parsed transducer.
///
/// Never mutated after construction. States are the sources of all arcs plus
/// all accepting states; arcs are stored sorted by `(state, in, out, dest)`
/// with duplicates removed, so arcs leaving one state are contiguous.
#[derive(Debug, Clone)]
pub struct ParseResult {
    symbols: SymbolTable,
    arcs: Vec<Arc>,
    states: Vec<StateId>,
    accepting: Vec<StateId>,
}

impl ParseResult {
    /// The full alphabet, epsilon excluded.
    pub fn sigma(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn graphemes(&self) -> impl Iterator<Item = Symbol<'_>> {
        self.symbols.graphemes()
    }

    pub fn multichar_symbols(&self) -> impl Iterator<Item = Symbol<'_>> {
        self.symbols.multichar_symbols()
    }

    /// Text of a symbol id.
    pub fn symbol(&self, id: SymbolId) -> Option<&str> {
        self.symbols.get(id)
    }

    /// Id of a symbol text.
    pub fn symbol_id(&self, text: &str) -> Option<SymbolId> {
        self.symbols.id_of(text)
    }

    /// Every arc, grouped by source state.
    pub fn arcs(&self) -> &[Arc] {
        &self.arcs
    }

    /// Arcs leaving `state`. Empty for unknown and arc-less states.
    pub fn arcs_from(&self, state: StateId) -> &[Arc] {
        let start = self.arcs.partition_point(|arc| arc.state < state);
        let end = start + self.arcs[start..].partition_point(|arc| arc.state == state);
        &self.arcs[start..end]
    }

    /// `(state, outgoing arcs)` for every state with at least one arc, ascending.
    pub fn arcs_by_state(&self) -> impl Iterator<Item = (StateId, &[Arc])> {
        self.arcs
            .chunk_by(|a, b| a.state == b.state)
            .map(|group| (group[0].state, group))
    }

    /// All states, ascending.
    pub fn states(&self) -> &[StateId] {
        &self.states
    }

    pub fn contains_state(&self, state: StateId) -> bool {
        self.states.binary_search(&state).is_ok()
    }

    /// Accepting states, ascending.
    pub fn accepting_states(&self) -> &[StateId] {
        &self.accepting
    }

    pub fn is_accepting(&self, state: StateId) -> bool {
        self.accepting.binary_search(&state).is_ok()
    }

    /// Render an arc with symbol text instead of ids.
    ///
    /// Epsilon prints as `ε`; ids missing from sigma print as `#<id>`.
    pub fn display_arc(&self, arc: &Arc) -> String {
        format!(
            "{} -{}:{}→ {}",
            arc.state,
            self.label_text(arc.in_label),
            self.label_text(arc.out_label),
            arc.destination
        )
    }

    fn label_text(&self, id: SymbolId) -> String {
        if id == EPSILON {
            return "ε".to_string();
        }
        match self.symbols.get(id) {
            Some(text) => text.to_string(),
            None => format!("#{id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::SymbolTableBuilder;

    fn sigma(entries: &[(SymbolId, &str)]) -> SymbolTable {
        let mut builder = SymbolTableBuilder::new();
        for &(id, text) in entries {
            builder.insert(id, text);
        }
        builder.finish(&ParseOptions::default()).unwrap()
    }

    fn assemble(effects: &[ArcEffect]) -> ParseResult {
        let mut assembler = GraphAssembler::new();
        for (i, effect) in effects.iter().enumerate() {
            assembler.push(i + 1, *effect);
        }
        assembler
            .finish(
                sigma(&[(0, "@_EPSILON_SYMBOL_@"), (97, "a"), (98, "b")]),
                &ParseOptions::default(),
            )
            .unwrap()
    }

    #[test]
    fn states_are_sources_and_accepting() {
        let result = assemble(&[
            ArcEffect::Arc(Arc::identity(0, 97, 1)),
            ArcEffect::Arc(Arc::identity(1, 98, 2)),
            ArcEffect::Accepting(2),
            ArcEffect::Accepting(7),
        ]);
        // 2 and 7 have no outgoing arcs but are accepting.
        assert_eq!(result.states(), &[0, 1, 2, 7]);
        assert_eq!(result.accepting_states(), &[2, 7]);
        assert!(result.is_accepting(7));
        assert!(!result.is_accepting(1));
        assert!(result.contains_state(7));
    }

    #[test]
    fn destination_only_states_are_not_members() {
        let result = assemble(&[ArcEffect::Arc(Arc::identity(0, 97, 5))]);
        assert_eq!(result.states(), &[0]);
        assert!(!result.contains_state(5));
    }

    #[test]
    fn duplicates_collapse() {
        let result = assemble(&[
            ArcEffect::Arc(Arc::identity(0, 97, 1)),
            ArcEffect::Arc(Arc::identity(0, 97, 1)),
            ArcEffect::Accepting(1),
            ArcEffect::Accepting(1),
        ]);
        assert_eq!(result.arcs().len(), 1);
        assert_eq!(result.accepting_states(), &[1]);
    }

    #[test]
    fn sentinel_effect_changes_nothing() {
        let plain = assemble(&[ArcEffect::Arc(Arc::identity(0, 97, 1)), ArcEffect::Accepting(1)]);
        let noisy = assemble(&[
            ArcEffect::None,
            ArcEffect::Arc(Arc::identity(0, 97, 1)),
            ArcEffect::None,
            ArcEffect::Accepting(1),
            ArcEffect::None,
        ]);
        assert_eq!(plain.arcs(), noisy.arcs());
        assert_eq!(plain.states(), noisy.states());
        assert_eq!(plain.accepting_states(), noisy.accepting_states());
    }

    #[test]
    fn arcs_grouped_by_source() {
        let result = assemble(&[
            ArcEffect::Arc(Arc::identity(3, 98, 0)),
            ArcEffect::Arc(Arc::identity(0, 98, 2)),
            ArcEffect::Arc(Arc::identity(0, 97, 1)),
            ArcEffect::Arc(Arc::new(3, 97, 0, 1)),
        ]);
        assert_eq!(
            result.arcs_from(0),
            &[Arc::identity(0, 97, 1), Arc::identity(0, 98, 2)]
        );
        assert_eq!(
            result.arcs_from(3),
            &[Arc::new(3, 97, 0, 1), Arc::identity(3, 98, 0)]
        );
        assert!(result.arcs_from(1).is_empty());
        assert!(result.arcs_from(99).is_empty());

        let groups: Vec<(StateId, usize)> = result
            .arcs_by_state()
            .map(|(state, arcs)| (state, arcs.len()))
            .collect();
        assert_eq!(groups, vec![(0, 2), (3, 2)]);
    }

    #[test]
    fn undefined_label_is_reported_with_line() {
        let mut assembler = GraphAssembler::new();
        assembler.push(4, ArcEffect::Arc(Arc::identity(0, 97, 1)));
        assembler.push(5, ArcEffect::Arc(Arc::new(1, 0, 120, 2)));
        let options = ParseOptions::default().with_check_labels(true);
        let err = assembler
            .finish(sigma(&[(0, "@_EPSILON_SYMBOL_@"), (97, "a")]), &options)
            .unwrap_err();
        assert!(matches!(
            err,
            FstError::UndefinedSymbol {
                line: 5,
                symbol: 120
            }
        ));
    }

    #[test]
    fn undefined_labels_pass_by_default() {
        let mut assembler = GraphAssembler::new();
        assembler.push(1, ArcEffect::Arc(Arc::identity(0, 120, 1)));
        let result = assembler
            .finish(sigma(&[(97, "a")]), &ParseOptions::default())
            .unwrap();
        assert_eq!(result.arcs().len(), 1);
        assert_eq!(result.display_arc(&result.arcs()[0]), "0 -#120:#120→ 1");
    }

    #[test]
    fn display_arc_uses_symbol_text() {
        let result = assemble(&[ArcEffect::Arc(Arc::new(0, 97, 0, 1))]);
        assert_eq!(result.display_arc(&result.arcs()[0]), "0 -a:ε→ 1");
    }

    #[test]
    fn parse_result_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ParseResult>();
    }
}
