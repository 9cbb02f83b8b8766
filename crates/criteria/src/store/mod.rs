//! # Clause Store
//!
//! The store holds the ordered clause list being edited and exposes the three
//! mutation primitives the editing surface needs: update a clause by field,
//! append an empty clause, remove a clause.
//!
//! ## Controlled vs Uncontrolled
//!
//! A store runs in one of two modes, chosen once at construction:
//!
//! - **Controlled** ([`ClauseSource::Controlled`]): the host owns the list. A
//!   mutation computes the next list and hands it to the change sink, but the
//!   store keeps showing the host's value until the host feeds the new one back
//!   through [`ClauseStore::set_value`]. Ids of a proposed list are only
//!   remembered once the host accepts it.
//! - **Uncontrolled** ([`ClauseSource::Uncontrolled`]): the store owns the list,
//!   seeded from a default (one empty clause unless given). A mutation replaces
//!   the list and then notifies the sink.
//!
//! Either way, [`ClauseStore::read`] is the single read path and every
//! mutation ends in [`OnChange::on_change`] with the complete new list. There is
//! no separate save step: persistence is the host's business.
//!
//! ## Identity
//!
//! Every clause in [`ClauseStore::read`] carries a [`ClauseId`]. Ids are random
//! per clause instance and scoped to nothing global; see `ids.rs` for how they
//! are kept stable across controlled updates.
//!
//! ## Attribute changes
//!
//! Changing a clause's attribute invalidates an operator the new attribute does
//! not offer. [`ClauseStore::update_clause`] checks the merged operator against
//! the catalog and, when it no longer applies, clears both operator and value.
//!
//! A clause without an attribute never keeps an operator or a value, whatever
//! the patch asks for.
//!
//! ## Bad indices
//!
//! Updating or removing an index past the end of the list does nothing: no
//! change, no callback.

mod ids;

use crate::catalog::{resolve_input_kind, Catalog};
use crate::clause::{ClauseId, ClausePatch, LogicClause};
use ids::IdSlots;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Receives the full clause list after every mutation.
pub trait OnChange {
    fn on_change(&mut self, clauses: &[LogicClause]);
}

impl<F> OnChange for F
where
    F: FnMut(&[LogicClause]),
{
    fn on_change(&mut self, clauses: &[LogicClause]) {
        self(clauses)
    }
}

/// Who owns the clause list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClauseSource {
    Controlled(Vec<LogicClause>),
    Uncontrolled(Vec<LogicClause>),
}

impl ClauseSource {
    fn clauses(&self) -> &[LogicClause] {
        match self {
            ClauseSource::Controlled(clauses) | ClauseSource::Uncontrolled(clauses) => clauses,
        }
    }

    fn clauses_mut(&mut self) -> &mut Vec<LogicClause> {
        match self {
            ClauseSource::Controlled(clauses) | ClauseSource::Uncontrolled(clauses) => clauses,
        }
    }
}

pub struct ClauseStore {
    catalog: Arc<Catalog>,
    source: ClauseSource,
    ids: IdSlots,
    on_change: Option<Box<dyn OnChange>>,
}

impl fmt::Debug for ClauseStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClauseStore")
            .field("source", &self.source)
            .field("has_on_change", &self.on_change.is_some())
            .finish_non_exhaustive()
    }
}

impl ClauseStore {
    pub fn new(catalog: Arc<Catalog>, source: ClauseSource) -> Self {
        let mut store = Self {
            catalog,
            source,
            ids: IdSlots::default(),
            on_change: None,
        };
        store.ids.assign(store.source.clauses_mut());
        store
    }

    /// Controlled when `value` is given, otherwise uncontrolled and seeded
    /// from `default_value` (one empty clause when that is absent too).
    pub fn initialize(
        catalog: Arc<Catalog>,
        value: Option<Vec<LogicClause>>,
        default_value: Option<Vec<LogicClause>>,
    ) -> Self {
        let source = match value {
            Some(value) => ClauseSource::Controlled(value),
            None => ClauseSource::Uncontrolled(
                default_value.unwrap_or_else(|| vec![LogicClause::empty()]),
            ),
        };
        Self::new(catalog, source)
    }

    pub fn controlled(catalog: Arc<Catalog>, value: Vec<LogicClause>) -> Self {
        Self::new(catalog, ClauseSource::Controlled(value))
    }

    pub fn uncontrolled(catalog: Arc<Catalog>) -> Self {
        Self::initialize(catalog, None, None)
    }

    pub fn with_on_change(mut self, on_change: impl OnChange + 'static) -> Self {
        self.set_on_change(on_change);
        self
    }

    pub fn set_on_change(&mut self, on_change: impl OnChange + 'static) {
        self.on_change = Some(Box::new(on_change));
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn is_controlled(&self) -> bool {
        matches!(self.source, ClauseSource::Controlled(_))
    }

    pub fn read(&self) -> &[LogicClause] {
        self.source.clauses()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// The list as the host persists it, without ids.
    pub fn persisted(&self) -> Vec<LogicClause> {
        self.read().iter().map(LogicClause::persisted).collect()
    }

    /// Feed a new external value into a controlled store.
    pub fn set_value(&mut self, mut value: Vec<LogicClause>) {
        match &mut self.source {
            ClauseSource::Controlled(current) => {
                self.ids.assign(&mut value);
                *current = value;
            }
            ClauseSource::Uncontrolled(_) => {
                warn!("Ignoring external value for an uncontrolled clause store");
            }
        }
    }

    /// Merge `patch` into the clause at `index`.
    pub fn update_clause(&mut self, index: usize, patch: ClausePatch) {
        let mut next = self.read().to_vec();
        let Some(current) = next.get(index) else {
            debug!(index, len = next.len(), "Ignoring update of out-of-range clause");
            return;
        };

        let mut clause = patch.merge_into(current);
        if clause.attribute().is_none() {
            clause.operator = None;
            clause.value.clear();
        } else if patch.touches_attribute() {
            let operators = self.catalog.operators_for_attribute(clause.attribute());
            let operator_applies = clause
                .operator()
                .is_some_and(|op| operators.iter().any(|candidate| candidate.value == op));
            if !operator_applies {
                clause.operator = None;
                clause.value.clear();
            }
        }

        if let Some(kind) = resolve_input_kind(&self.catalog, clause.attribute(), clause.operator()) {
            if !kind.is_multi() && clause.value.len() > 1 {
                clause.value.truncate(1);
            }
        }

        debug!(index, ?clause, "Updating clause");
        next[index] = clause;
        self.commit(next);
    }

    /// Append an empty clause with a fresh id.
    pub fn add_clause(&mut self) {
        let mut next = self.read().to_vec();
        next.push(LogicClause {
            id: Some(ClauseId::new()),
            ..LogicClause::empty()
        });
        debug!(len = next.len(), "Appending clause");
        self.commit(next);
    }

    pub fn remove_clause(&mut self, index: usize) {
        let mut next = self.read().to_vec();
        if index >= next.len() {
            debug!(index, len = next.len(), "Ignoring removal of out-of-range clause");
            return;
        }
        next.remove(index);
        debug!(index, len = next.len(), "Removing clause");
        self.commit(next);
    }

    fn commit(&mut self, next: Vec<LogicClause>) {
        match &mut self.source {
            ClauseSource::Uncontrolled(clauses) => {
                self.ids.remember(&next);
                *clauses = next;
                if let Some(sink) = self.on_change.as_mut() {
                    sink.on_change(clauses);
                }
            }
            ClauseSource::Controlled(_) => {
                self.ids.propose(&next);
                match self.on_change.as_mut() {
                    Some(sink) => sink.on_change(&next),
                    None => debug!("Controlled clause store has no change sink; change dropped"),
                }
            }
        }
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::catalog::builtin::participation_catalog;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Collects every list the store commits.
    #[derive(Debug, Clone, Default)]
    pub struct ChangeLog {
        changes: Rc<RefCell<Vec<Vec<LogicClause>>>>,
    }

    impl ChangeLog {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn count(&self) -> usize {
            self.changes.borrow().len()
        }

        pub fn last(&self) -> Option<Vec<LogicClause>> {
            self.changes.borrow().last().cloned()
        }
    }

    impl OnChange for ChangeLog {
        fn on_change(&mut self, clauses: &[LogicClause]) {
            self.changes.borrow_mut().push(clauses.to_vec());
        }
    }

    pub struct StoreFixture {
        catalog: Arc<Catalog>,
        clauses: Vec<LogicClause>,
        controlled: bool,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                catalog: participation_catalog(),
                clauses: Vec::new(),
                controlled: false,
            }
        }

        pub fn with_catalog(mut self, catalog: Arc<Catalog>) -> Self {
            self.catalog = catalog;
            self
        }

        pub fn with_clause<const N: usize>(
            mut self,
            attribute: &str,
            operator: &str,
            value: [&str; N],
        ) -> Self {
            self.clauses.push(LogicClause::new(attribute, operator, value));
            self
        }

        pub fn with_empty_clause(mut self) -> Self {
            self.clauses.push(LogicClause::empty());
            self
        }

        pub fn controlled(mut self) -> Self {
            self.controlled = true;
            self
        }

        /// Build the store with a [`ChangeLog`] attached.
        pub fn build(self) -> (ClauseStore, ChangeLog) {
            let log = ChangeLog::new();
            let source = if self.controlled {
                ClauseSource::Controlled(self.clauses)
            } else if self.clauses.is_empty() {
                ClauseSource::Uncontrolled(vec![LogicClause::empty()])
            } else {
                ClauseSource::Uncontrolled(self.clauses)
            };
            let store = ClauseStore::new(self.catalog, source).with_on_change(log.clone());
            (store, log)
        }
    }
}
