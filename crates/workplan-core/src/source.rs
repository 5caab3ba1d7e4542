//! Upstream scheduler seam.
//!
//! The scheduling engine (EDF, FED, or anything else) is a collaborator
//! outside this crate. It only has to turn a [`Problem`] into allocation facts.

use std::collections::HashSet;

use tracing::warn;

use crate::error::{AllocationError, CoreError};
use crate::model::{AllocationFact, Problem};

/// Every scheduling engine implements this trait.
pub trait AllocationSource {
    /// Short identifier (e.g. "edf", "fed").
    fn name(&self) -> &str;

    /// Produce the settled allocation facts for `problem`.
    fn allocations(&self, problem: &Problem) -> Result<Vec<AllocationFact>, CoreError>;
}

/// Facts computed ahead of time and replayed as-is.
#[derive(Debug, Clone)]
pub struct PrecomputedAllocations {
    name: String,
    facts: Vec<AllocationFact>,
}

impl PrecomputedAllocations {
    pub fn new(name: impl Into<String>, facts: Vec<AllocationFact>) -> Self {
        Self {
            name: name.into(),
            facts,
        }
    }
}

impl AllocationSource for PrecomputedAllocations {
    fn name(&self) -> &str {
        &self.name
    }

    fn allocations(&self, _problem: &Problem) -> Result<Vec<AllocationFact>, CoreError> {
        Ok(self.facts.clone())
    }
}

/// Check scheduler output against the problem it was generated for.
///
/// Every fact must name a known assertion, carry that assertion's person,
/// stay within the daily capacity and not repeat a day for its assertion.
pub fn validate_facts(problem: &Problem, facts: &[AllocationFact]) -> Result<(), AllocationError> {
    let mut seen = HashSet::new();

    for fact in facts {
        let assertion = problem
            .assertion(&fact.assertion)
            .ok_or_else(|| AllocationError::UnknownAssertion(fact.assertion.clone()))?;

        if assertion.person != fact.person {
            return Err(AllocationError::PersonMismatch {
                assertion: assertion.id.clone(),
                expected: assertion.person.clone(),
                found: fact.person.clone(),
            });
        }

        if fact.hours > problem.daily_capacity {
            return Err(AllocationError::ExceedsCapacity {
                assertion: assertion.id.clone(),
                day: fact.day,
                hours: fact.hours,
                capacity: problem.daily_capacity,
            });
        }

        if !seen.insert((fact.assertion.as_str(), fact.day)) {
            return Err(AllocationError::DuplicateDay {
                assertion: fact.assertion.clone(),
                day: fact.day,
            });
        }
    }

    Ok(())
}

/// Fetch facts from `source` and validate them.
pub fn fetch_validated(
    source: &dyn AllocationSource,
    problem: &Problem,
) -> Result<Vec<AllocationFact>, CoreError> {
    let facts = source.allocations(problem)?;
    if let Err(e) = validate_facts(problem, &facts) {
        warn!(source = source.name(), error = %e, "allocation source returned invalid facts");
        return Err(e.into());
    }
    Ok(facts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Person, Requirement};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn problem() -> Problem {
        let alice = Person::new("alice");
        let req = Requirement::new("proj1", 40, date(2018, 1, 1), date(2018, 2, 1), vec![alice.clone()])
            .unwrap()
            .with_assertion(&alice, 40, date(2018, 1, 1), date(2018, 2, 1))
            .unwrap();
        Problem::new(vec![req], 8)
    }

    fn fact(assertion: &str, person: &str, day: NaiveDate, hours: u32) -> AllocationFact {
        AllocationFact {
            person: person.to_string(),
            requirement: "proj1".to_string(),
            assertion: assertion.to_string(),
            day,
            hours,
        }
    }

    #[test]
    fn test_precomputed_source_replays_facts() {
        let facts = vec![fact("proj1/alice", "alice", date(2018, 1, 1), 8)];
        let source = PrecomputedAllocations::new("edf", facts.clone());
        assert_eq!(source.name(), "edf");
        assert_eq!(source.allocations(&problem()).unwrap(), facts);
    }

    #[test]
    fn test_validate_accepts_well_formed_facts() {
        let facts = vec![
            fact("proj1/alice", "alice", date(2018, 1, 1), 8),
            fact("proj1/alice", "alice", date(2018, 1, 3), 4),
        ];
        assert!(validate_facts(&problem(), &facts).is_ok());
    }

    #[test]
    fn test_validate_rejects_unknown_assertion() {
        let facts = vec![fact("proj9/alice", "alice", date(2018, 1, 1), 8)];
        assert_eq!(
            validate_facts(&problem(), &facts),
            Err(AllocationError::UnknownAssertion("proj9/alice".to_string()))
        );
    }

    #[test]
    fn test_validate_rejects_person_mismatch() {
        let facts = vec![fact("proj1/alice", "bob", date(2018, 1, 1), 8)];
        assert!(matches!(
            validate_facts(&problem(), &facts),
            Err(AllocationError::PersonMismatch { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_over_capacity() {
        let facts = vec![fact("proj1/alice", "alice", date(2018, 1, 1), 9)];
        assert!(matches!(
            validate_facts(&problem(), &facts),
            Err(AllocationError::ExceedsCapacity { hours: 9, capacity: 8, .. })
        ));
    }

    #[test]
    fn test_validate_rejects_duplicate_day() {
        let facts = vec![
            fact("proj1/alice", "alice", date(2018, 1, 1), 4),
            fact("proj1/alice", "alice", date(2018, 1, 1), 4),
        ];
        assert!(matches!(
            validate_facts(&problem(), &facts),
            Err(AllocationError::DuplicateDay { .. })
        ));
    }

    #[test]
    fn test_fetch_validated_surfaces_allocation_error() {
        let source = PrecomputedAllocations::new(
            "fed",
            vec![fact("proj1/alice", "alice", date(2018, 1, 1), 12)],
        );
        let result = fetch_validated(&source, &problem());
        assert!(matches!(result, Err(CoreError::Allocation(_))));
    }
}
