//! Rule engine

use super::{catalog, Stage};
use crate::error::{Result, TypusError};
use crate::locale::LocaleProfile;
use std::borrow::Cow;
use std::fmt;

/// Ordered list of stages; each runs over the whole text before the next
pub struct RuleEngine {
    stages: Vec<Box<dyn Stage>>,
}

impl RuleEngine {
    /// Build the stages of every group in the profile's rule order
    pub fn new(profile: &LocaleProfile) -> Result<Self> {
        let mut stages = Vec::new();

        for name in profile.rule_order() {
            let factory =
                catalog::factory(name).ok_or_else(|| TypusError::UnknownRule(name.clone()))?;
            stages.extend(factory(profile)?);
        }

        log::debug!(
            "built rule engine for '{}' with {} stages",
            profile.code(),
            stages.len()
        );

        Ok(Self { stages })
    }

    /// Engine over an explicit stage list
    pub fn from_stages(stages: Vec<Box<dyn Stage>>) -> Self {
        Self { stages }
    }

    pub fn apply(&self, text: &str) -> String {
        let mut current = text.to_string();

        for stage in &self.stages {
            if let Cow::Owned(next) = stage.apply(&current) {
                log::trace!("stage '{}' rewrote text", stage.name());
                current = next;
            }
        }

        current
    }

    /// Stage names in application order
    pub fn stage_names(&self) -> impl Iterator<Item = &str> {
        self.stages.iter().map(|stage| stage.name())
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleEngine")
            .field("stages", &self.stage_names().collect::<Vec<_>>())
            .finish()
    }
}
