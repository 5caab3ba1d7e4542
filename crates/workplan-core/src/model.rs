//! Scheduling problem vocabulary.
//!
//! A [`Requirement`] is a time-boxed project needing a fixed number of hours.
//! Each [`Assertion`] commits one person to part of that work inside a
//! sub-window of the requirement. The external scheduler turns a [`Problem`]
//! into [`AllocationFact`]s, one per person per day per assertion.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::AnalysisError;
use crate::interval::TimeInterval;

/// Anything that can be named in a report.
pub trait Identified {
    fn identifier(&self) -> &str;
}

/// A staff member who can be assigned to requirements.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
}

impl Person {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Identified for Person {
    fn identifier(&self) -> &str {
        &self.name
    }
}

/// One person's commitment toward a requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assertion {
    /// Unique within a problem; `"{requirement}/{person}"` by default
    pub id: String,
    pub requirement: String,
    pub person: String,
    /// Hours this person supplies within `window`
    pub hours: u32,
    /// Release date (inclusive) to deadline (exclusive)
    pub window: TimeInterval,
}

impl Assertion {
    /// Create an assertion of `hours` work by `person` between `release` and `deadline`.
    ///
    /// # Errors
    /// Returns [`AnalysisError::InvalidInterval`] if `deadline <= release`.
    pub fn new(
        requirement: impl Into<String>,
        person: impl Into<String>,
        hours: u32,
        release: NaiveDate,
        deadline: NaiveDate,
    ) -> Result<Self, AnalysisError> {
        let requirement = requirement.into();
        let person = person.into();
        Ok(Self {
            id: format!("{requirement}/{person}"),
            requirement,
            person,
            hours,
            window: TimeInterval::new(release, deadline)?,
        })
    }

    /// Override the generated identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn release(&self) -> NaiveDate {
        self.window.start_inclusive()
    }

    pub fn deadline(&self) -> NaiveDate {
        self.window.end_exclusive()
    }
}

impl Identified for Assertion {
    fn identifier(&self) -> &str {
        &self.id
    }
}

/// A time-boxed project requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    pub name: String,
    pub total_hours: u32,
    pub window: TimeInterval,
    pub people: Vec<Person>,
    #[serde(default)]
    pub assertions: Vec<Assertion>,
}

impl Requirement {
    /// Create a requirement with no assertions yet.
    ///
    /// # Errors
    /// Returns [`AnalysisError::InvalidInterval`] if `deadline <= release`.
    pub fn new(
        name: impl Into<String>,
        total_hours: u32,
        release: NaiveDate,
        deadline: NaiveDate,
        people: Vec<Person>,
    ) -> Result<Self, AnalysisError> {
        Ok(Self {
            name: name.into(),
            total_hours,
            window: TimeInterval::new(release, deadline)?,
            people,
            assertions: Vec::new(),
        })
    }

    /// Attach an assertion of `hours` by `person` within `[release, deadline)`.
    pub fn with_assertion(
        mut self,
        person: &Person,
        hours: u32,
        release: NaiveDate,
        deadline: NaiveDate,
    ) -> Result<Self, AnalysisError> {
        let assertion = Assertion::new(&self.name, person.identifier(), hours, release, deadline)?;
        self.assertions.push(assertion);
        Ok(self)
    }

    /// Hours promised by all assertions together.
    pub fn asserted_hours(&self) -> u32 {
        self.assertions.iter().map(|a| a.hours).sum()
    }
}

impl Identified for Requirement {
    fn identifier(&self) -> &str {
        &self.name
    }
}

/// One day's worth of hours a person spends on one assertion.
///
/// Produced by the external scheduler; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationFact {
    pub person: String,
    pub requirement: String,
    pub assertion: String,
    pub day: NaiveDate,
    pub hours: u32,
}

impl AllocationFact {
    /// Fact for `assertion` on `day`, copying the assertion's person and requirement.
    pub fn for_assertion(assertion: &Assertion, day: NaiveDate, hours: u32) -> Self {
        Self {
            person: assertion.person.clone(),
            requirement: assertion.requirement.clone(),
            assertion: assertion.id.clone(),
            day,
            hours,
        }
    }
}

/// The input handed to a scheduling engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Problem {
    pub requirements: Vec<Requirement>,
    /// Maximum hours one person works per day
    pub daily_capacity: u32,
}

impl Problem {
    pub fn new(requirements: Vec<Requirement>, daily_capacity: u32) -> Self {
        Self {
            requirements,
            daily_capacity,
        }
    }

    pub fn requirement(&self, name: &str) -> Option<&Requirement> {
        self.requirements.iter().find(|r| r.name == name)
    }

    /// Every assertion across all requirements.
    pub fn assertions(&self) -> impl Iterator<Item = &Assertion> {
        self.requirements.iter().flat_map(|r| r.assertions.iter())
    }

    pub fn assertion(&self, id: &str) -> Option<&Assertion> {
        self.assertions().find(|a| a.id == id)
    }

    /// Assertions owned by `person`, in requirement order.
    pub fn assertions_for(&self, person: &str) -> Vec<&Assertion> {
        self.assertions().filter(|a| a.person == person).collect()
    }

    /// Distinct people named by any assertion, sorted by identifier.
    pub fn people(&self) -> Vec<String> {
        self.assertions()
            .map(|a| a.person.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
