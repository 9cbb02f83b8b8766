//! Clause id assignment.
//!
//! Ids are remembered by position. When the host hands back a list whose
//! clauses lost their ids (for example after a round trip through the
//! persisted shape), each clause takes over the id last seen at its index, so
//! rendering identity survives. Positions never seen before get a fresh id.
//!
//! A controlled store only *proposes* a list; its ids become the remembered
//! ones once the host accepts it through `set_value`. A proposed id is reused
//! for an id-less clause only when the clause at that index is the proposed
//! one, so a host that rejects a change and feeds back the old list keeps the
//! old ids.

use crate::clause::{ClauseId, LogicClause};
use std::collections::HashSet;

#[derive(Debug, Clone, Default)]
pub(crate) struct IdSlots {
    slots: Vec<ClauseId>,
    proposed: Vec<LogicClause>,
}

fn same_fields(a: &LogicClause, b: &LogicClause) -> bool {
    a.attribute == b.attribute && a.operator == b.operator && a.value == b.value
}

impl IdSlots {
    /// Fill in missing ids in place, then remember the list's ids.
    /// An id already carried by another clause is not reused.
    pub(crate) fn assign(&mut self, clauses: &mut [LogicClause]) {
        let mut taken: HashSet<ClauseId> = clauses.iter().filter_map(|clause| clause.id).collect();
        for (index, clause) in clauses.iter_mut().enumerate() {
            if clause.id.is_some() {
                continue;
            }
            let proposed = self
                .proposed
                .get(index)
                .filter(|proposed| same_fields(proposed, clause))
                .and_then(|proposed| proposed.id);
            let id = match proposed.or_else(|| self.slots.get(index).copied()) {
                Some(id) if !taken.contains(&id) => id,
                _ => ClauseId::new(),
            };
            taken.insert(id);
            clause.id = Some(id);
        }
        self.remember(clauses);
    }

    /// Accept `clauses` as the current list.
    pub(crate) fn remember(&mut self, clauses: &[LogicClause]) {
        self.slots = clauses.iter().filter_map(|clause| clause.id).collect();
        self.proposed.clear();
    }

    /// Note a list handed to the host but not yet accepted.
    pub(crate) fn propose(&mut self, clauses: &[LogicClause]) {
        self.proposed = clauses.to_vec();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assigns_fresh_ids() {
        let mut slots = IdSlots::default();
        let mut clauses = vec![LogicClause::empty(), LogicClause::empty()];
        slots.assign(&mut clauses);
        assert!(clauses.iter().all(|c| c.id.is_some()));
        assert_ne!(clauses[0].id, clauses[1].id);
    }

    #[test]
    fn test_keeps_existing_ids() {
        let mut slots = IdSlots::default();
        let id = ClauseId::new();
        let mut clauses = vec![LogicClause {
            id: Some(id),
            ..LogicClause::empty()
        }];
        slots.assign(&mut clauses);
        assert_eq!(clauses[0].id, Some(id));
    }

    #[test]
    fn test_reuses_ids_by_position() {
        let mut slots = IdSlots::default();
        let mut first = vec![LogicClause::empty(), LogicClause::empty()];
        slots.assign(&mut first);

        let mut second = vec![
            LogicClause::new("age", ">", ["18"]),
            LogicClause::empty(),
            LogicClause::empty(),
        ];
        slots.assign(&mut second);
        assert_eq!(second[0].id, first[0].id);
        assert_eq!(second[1].id, first[1].id);
        assert!(second[2].id.is_some());
        assert_ne!(second[2].id, first[0].id);
    }

    #[test]
    fn test_does_not_duplicate_a_carried_id() {
        let mut slots = IdSlots::default();
        let mut first = vec![LogicClause::empty(), LogicClause::empty()];
        slots.assign(&mut first);

        // The second clause moved to the front and a new one follows it.
        let mut second = vec![first[1].clone(), LogicClause::empty()];
        slots.assign(&mut second);
        assert_eq!(second[0].id, first[1].id);
        assert_ne!(second[1].id, second[0].id);
    }

    #[test]
    fn test_rejected_proposal_keeps_accepted_ids() {
        let mut slots = IdSlots::default();
        let mut accepted = vec![
            LogicClause::new("age", ">", ["18"]),
            LogicClause::new("gender", "=", ["female"]),
        ];
        slots.assign(&mut accepted);

        // The host is offered the list without its first clause, then
        // answers with the old list, ids stripped.
        slots.propose(&accepted[1..]);
        let mut answer: Vec<_> = accepted.iter().map(LogicClause::persisted).collect();
        slots.assign(&mut answer);

        assert_eq!(answer[0].id, accepted[0].id);
        assert_eq!(answer[1].id, accepted[1].id);
    }

    #[test]
    fn test_accepted_proposal_keeps_proposed_ids() {
        let mut slots = IdSlots::default();
        let mut accepted = vec![LogicClause::new("age", ">", ["18"])];
        slots.assign(&mut accepted);

        let mut proposal = accepted.clone();
        proposal.push(LogicClause {
            id: Some(ClauseId::new()),
            ..LogicClause::empty()
        });
        slots.propose(&proposal);

        let mut answer: Vec<_> = proposal.iter().map(LogicClause::persisted).collect();
        slots.assign(&mut answer);
        assert_eq!(answer[0].id, proposal[0].id);
        assert_eq!(answer[1].id, proposal[1].id);
    }
}
