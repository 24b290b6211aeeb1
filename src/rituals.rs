//! Daily ritual checklist and gratitude triad.

use crate::error::{CosmosError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of gratitude slots per day.
pub const GRATITUDE_SLOTS: usize = 3;

/// The fixed ritual catalog. Presentation (glyphs, colors) lives in the UI layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RitualTask {
    Hydration,
    Silence,
    Nature,
    Kindness,
}

impl RitualTask {
    pub fn all() -> &'static [RitualTask] {
        &[
            RitualTask::Hydration,
            RitualTask::Silence,
            RitualTask::Nature,
            RitualTask::Kindness,
        ]
    }

    pub fn id(&self) -> &'static str {
        match self {
            RitualTask::Hydration => "hydration",
            RitualTask::Silence => "silence",
            RitualTask::Nature => "nature",
            RitualTask::Kindness => "kindness",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RitualTask::Hydration => "Hidratação Consciente",
            RitualTask::Silence => "Momento de Silêncio",
            RitualTask::Nature => "Conexão com a Natureza",
            RitualTask::Kindness => "Ato de Gentileza",
        }
    }

    pub fn from_id(id: &str) -> Option<RitualTask> {
        Self::all().iter().copied().find(|t| t.id() == id)
    }
}

impl fmt::Display for RitualTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for RitualTask {
    type Err = CosmosError;

    fn from_str(s: &str) -> Result<Self> {
        RitualTask::from_id(s.trim()).ok_or_else(|| CosmosError::InvalidTask(s.to_string()))
    }
}

/// One day's ritual progress.
///
/// Serialises to exactly `{gratitudeList, completedTasks}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RitualState {
    pub gratitude_list: [String; GRATITUDE_SLOTS],
    pub completed_tasks: Vec<RitualTask>,
}

impl Default for RitualState {
    fn default() -> Self {
        Self {
            gratitude_list: Default::default(),
            completed_tasks: Vec::new(),
        }
    }
}

impl RitualState {
    pub fn is_completed(&self, task: RitualTask) -> bool {
        self.completed_tasks.contains(&task)
    }

    /// Flip a task. Newly completed tasks are appended, keeping completion order.
    pub fn toggle_task(&mut self, task: RitualTask) {
        if let Some(pos) = self.completed_tasks.iter().position(|t| *t == task) {
            self.completed_tasks.remove(pos);
        } else {
            self.completed_tasks.push(task);
        }
    }

    /// Replace a gratitude entry. Out-of-range slots are rejected.
    pub fn set_gratitude(&mut self, slot: usize, text: impl Into<String>) -> Result<()> {
        let entry = self.gratitude_list.get_mut(slot).ok_or_else(|| {
            CosmosError::InvalidInput(format!(
                "gratitude slot must be between 1 and {}",
                GRATITUDE_SLOTS
            ))
        })?;
        *entry = text.into();
        Ok(())
    }

    pub fn filled_gratitude_count(&self) -> usize {
        self.gratitude_list
            .iter()
            .filter(|g| !g.trim().is_empty())
            .count()
    }

    /// Percentage of today's items done, rounded to the nearest integer.
    pub fn progress(&self) -> u8 {
        let total = RitualTask::all().len() + GRATITUDE_SLOTS;
        let done = self.completed_tasks.len() + self.filled_gratitude_count();
        ((done as f64 / total as f64) * 100.0).round() as u8
    }

    pub fn is_complete(&self) -> bool {
        self.progress() == 100
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(gratitude: [&str; 3], tasks: &[RitualTask]) -> RitualState {
        RitualState {
            gratitude_list: gratitude.map(String::from),
            completed_tasks: tasks.to_vec(),
        }
    }

    #[test]
    fn test_catalog_has_four_tasks_in_order() {
        let ids: Vec<_> = RitualTask::all().iter().map(|t| t.id()).collect();
        assert_eq!(ids, vec!["hydration", "silence", "nature", "kindness"]);
    }

    #[test]
    fn test_from_id_roundtrip() {
        for task in RitualTask::all() {
            assert_eq!(RitualTask::from_id(task.id()), Some(*task));
        }
        assert_eq!(RitualTask::from_id("yoga"), None);
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        assert!("nature".parse::<RitualTask>().is_ok());
        let err = "yoga".parse::<RitualTask>().unwrap_err();
        assert!(matches!(err, CosmosError::InvalidTask(_)));
    }

    #[test]
    fn test_progress_empty_is_zero() {
        assert_eq!(RitualState::default().progress(), 0);
    }

    #[test]
    fn test_progress_complete_is_hundred() {
        let s = state(["a", "b", "c"], RitualTask::all());
        assert_eq!(s.progress(), 100);
        assert!(s.is_complete());
    }

    #[test]
    fn test_progress_rounds() {
        let s = state(
            ["grato", "", ""],
            &[RitualTask::Hydration, RitualTask::Nature],
        );
        assert_eq!(s.progress(), 43);
    }

    #[test]
    fn test_whitespace_gratitude_does_not_count() {
        let s = state(["   ", "", "\t"], &[]);
        assert_eq!(s.filled_gratitude_count(), 0);
        assert_eq!(s.progress(), 0);
    }

    #[test]
    fn test_toggle_task() {
        let mut s = RitualState::default();
        s.toggle_task(RitualTask::Silence);
        s.toggle_task(RitualTask::Hydration);
        assert_eq!(
            s.completed_tasks,
            vec![RitualTask::Silence, RitualTask::Hydration]
        );
        s.toggle_task(RitualTask::Silence);
        assert_eq!(s.completed_tasks, vec![RitualTask::Hydration]);
        assert!(!s.is_completed(RitualTask::Silence));
    }

    #[test]
    fn test_set_gratitude_bounds() {
        let mut s = RitualState::default();
        s.set_gratitude(2, "céu limpo").unwrap();
        assert_eq!(s.gratitude_list[2], "céu limpo");
        assert!(s.set_gratitude(3, "x").is_err());
    }

    #[test]
    fn test_serializes_exactly_two_fields() {
        let s = state(["a", "b", "c"], &[RitualTask::Hydration]);
        let value = serde_json::to_value(&s).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 2);
        assert_eq!(obj["gratitudeList"], serde_json::json!(["a", "b", "c"]));
        assert_eq!(obj["completedTasks"], serde_json::json!(["hydration"]));
    }
}
