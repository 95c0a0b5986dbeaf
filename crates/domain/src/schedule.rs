//! Schedule — one configured {targets, timing, actions} unit.
//!
//! The target list is set at creation and immutable thereafter; changing
//! targets means creating a new schedule.

use serde::{Deserialize, Serialize};

use crate::error::{DayWindowError, ValidationError};
use crate::id::ScheduleId;
use crate::options::ScheduleOptions;

/// A configured schedule: identity, targets, and persisted options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub id: ScheduleId,
    pub name: String,
    /// Target device references of the form `family.identifier`.
    pub targets: Vec<String>,
    pub options: ScheduleOptions,
}

impl Schedule {
    /// Create a builder for constructing a [`Schedule`].
    #[must_use]
    pub fn builder() -> ScheduleBuilder {
        ScheduleBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`DayWindowError::Validation`] when:
    /// - `name` is empty ([`ValidationError::EmptyName`])
    /// - `targets` is empty ([`ValidationError::NoTargets`])
    /// - a target is not of the form `family.identifier`
    ///   ([`ValidationError::InvalidTarget`])
    pub fn validate(&self) -> Result<(), DayWindowError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        if self.targets.is_empty() {
            return Err(ValidationError::NoTargets.into());
        }
        for target in &self.targets {
            match target.split_once('.') {
                Some((family, id)) if !family.is_empty() && !id.is_empty() => {}
                _ => return Err(ValidationError::InvalidTarget(target.clone()).into()),
            }
        }
        Ok(())
    }
}

/// Step-by-step builder for [`Schedule`].
#[derive(Debug, Default)]
pub struct ScheduleBuilder {
    id: Option<ScheduleId>,
    name: Option<String>,
    targets: Vec<String>,
    options: Option<ScheduleOptions>,
}

impl ScheduleBuilder {
    #[must_use]
    pub fn id(mut self, id: ScheduleId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.targets.push(target.into());
        self
    }

    #[must_use]
    pub fn targets<I, S>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.targets.extend(targets.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn options(mut self, options: ScheduleOptions) -> Self {
        self.options = Some(options);
        self
    }

    /// Consume the builder, validate, and return a [`Schedule`].
    ///
    /// # Errors
    ///
    /// Returns [`DayWindowError::Validation`] if required fields are missing
    /// or malformed.
    pub fn build(self) -> Result<Schedule, DayWindowError> {
        let schedule = Schedule {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            targets: self.targets,
            options: self.options.unwrap_or_default(),
        };
        schedule.validate()?;
        Ok(schedule)
    }
}
