//! Shared fixtures for integration tests.

#![allow(dead_code)]

use chrono::NaiveDate;
use workplan_core::calendar::{is_working_day, nth_working_day_from};
use workplan_core::{AllocationFact, AllocationSource, CoreError, Person, Problem, Requirement};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Three researchers and four overlapping projects from 2017.
pub fn research_problem() -> Problem {
    let r1 = Person::new("researcher1");
    let r2 = Person::new("researcher2");

    let proj1 = Requirement::new("proj1", 986, date(2017, 3, 1), date(2017, 11, 23), vec![r1.clone(), r2.clone()])
        .unwrap()
        .with_assertion(&r1, 800, date(2017, 4, 3), date(2017, 11, 15))
        .unwrap()
        .with_assertion(&r2, 186, date(2017, 3, 31), date(2017, 5, 25))
        .unwrap();

    let proj2 = Requirement::new("proj2", 403, date(2017, 4, 1), date(2017, 8, 31), vec![r1.clone()])
        .unwrap()
        .with_assertion(&r1, 403, date(2017, 4, 24), date(2017, 8, 2))
        .unwrap();

    let proj5 = Requirement::new("proj5", 264, date(2017, 10, 1), date(2017, 12, 31), vec![r1.clone()])
        .unwrap()
        .with_assertion(&r1, 264, date(2017, 10, 19), date(2017, 12, 28))
        .unwrap();

    let proj12 = Requirement::new("proj12", 282, date(2017, 3, 1), date(2017, 8, 31), vec![r2.clone()])
        .unwrap()
        .with_assertion(&r2, 282, date(2017, 3, 2), date(2017, 8, 17))
        .unwrap();

    Problem::new(vec![proj1, proj2, proj5, proj12], 8)
}

/// Test scheduler: works each assertion every other working day from its
/// release at full capacity until the hours run out or the deadline passes.
pub struct EveryOtherDaySource;

impl AllocationSource for EveryOtherDaySource {
    fn name(&self) -> &str {
        "every-other-day"
    }

    fn allocations(&self, problem: &Problem) -> Result<Vec<AllocationFact>, CoreError> {
        let mut facts = Vec::new();
        for assertion in problem.assertions() {
            let mut remaining = assertion.hours;
            let mut day = assertion.release();
            if !is_working_day(day) {
                day = nth_working_day_from(1, day)?;
            }
            while remaining > 0 && assertion.window.contains(day) {
                let hours = remaining.min(problem.daily_capacity);
                facts.push(AllocationFact::for_assertion(assertion, day, hours));
                remaining -= hours;
                day = nth_working_day_from(2, day)?;
            }
        }
        Ok(facts)
    }
}

/// A source that always fails, standing in for an infeasible schedule.
pub struct InfeasibleSource;

impl AllocationSource for InfeasibleSource {
    fn name(&self) -> &str {
        "infeasible"
    }

    fn allocations(&self, _problem: &Problem) -> Result<Vec<AllocationFact>, CoreError> {
        Err(CoreError::Source {
            source_name: self.name().to_string(),
            message: "deadline analysis failed".to_string(),
        })
    }
}
