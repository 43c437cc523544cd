use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::TaskId;

/// How hard a task is expected to be.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    /// Single-letter badge text.
    #[must_use]
    pub fn letter(self) -> &'static str {
        match self {
            Difficulty::Easy => "E",
            Difficulty::Medium => "M",
            Difficulty::Hard => "H",
        }
    }
}

/// Which shelf a task lives on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[default]
    #[serde(rename = "practice")]
    Practice,
    #[serde(rename = "pet-projects")]
    PetProjects,
}

impl Category {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Category::Practice => "Practice",
            Category::PetProjects => "Pet Projects",
        }
    }
}

/// Errors produced while validating a task draft.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum TaskError {
    #[error("task id must not be empty")]
    EmptyId,

    #[error("task {id} has an empty title")]
    EmptyTitle { id: TaskId },

    #[error("task {id} has a non-positive time estimate ({minutes})")]
    InvalidTimeEstimate { id: TaskId, minutes: i64 },
}

/// Unvalidated task metadata as it arrives from a content file.
///
/// Field names follow the content schema (`timeEstimate`, `learningGoals`,
/// `starterCode`); optional collections default to empty and `category`
/// defaults to `practice`.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub category: Category,
    pub time_estimate: i64,
    #[serde(default)]
    pub learning_goals: Vec<String>,
    #[serde(default)]
    pub hints: Vec<String>,
    #[serde(default)]
    pub starter_code: String,
}

impl TaskDraft {
    /// Validate the draft into a `Task`.
    ///
    /// # Errors
    ///
    /// Returns `TaskError` if the id or title is empty, or the time
    /// estimate is not positive.
    pub fn validate(self) -> Result<Task, TaskError> {
        if self.id.trim().is_empty() {
            return Err(TaskError::EmptyId);
        }
        let id = TaskId::new(self.id);
        if self.title.trim().is_empty() {
            return Err(TaskError::EmptyTitle { id });
        }
        if self.time_estimate <= 0 {
            return Err(TaskError::InvalidTimeEstimate {
                minutes: self.time_estimate,
                id,
            });
        }
        Ok(Task {
            id,
            title: self.title,
            description: self.description,
            tags: self.tags,
            difficulty: self.difficulty,
            category: self.category,
            time_estimate: self.time_estimate,
            learning_goals: self.learning_goals,
            hints: self.hints,
            starter_code: self.starter_code,
        })
    }
}

/// A validated coding exercise.
#[derive(Clone, Debug, PartialEq)]
pub struct Task {
    id: TaskId,
    title: String,
    description: String,
    tags: Vec<String>,
    difficulty: Difficulty,
    category: Category,
    time_estimate: i64,
    learning_goals: Vec<String>,
    hints: Vec<String>,
    starter_code: String,
}

impl Task {
    #[must_use]
    pub fn id(&self) -> &TaskId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    /// Estimated time to finish, in minutes.
    #[must_use]
    pub fn time_estimate(&self) -> i64 {
        self.time_estimate
    }

    #[must_use]
    pub fn learning_goals(&self) -> &[String] {
        &self.learning_goals
    }

    #[must_use]
    pub fn hints(&self) -> &[String] {
        &self.hints
    }

    #[must_use]
    pub fn starter_code(&self) -> &str {
        &self.starter_code
    }

    /// The slice of metadata the sidebar list consumes.
    #[must_use]
    pub fn summary(&self) -> TaskSummary {
        TaskSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            difficulty: self.difficulty,
            category: self.category,
        }
    }
}

/// The per-task row rendered in the sidebar list.
#[derive(Clone, Debug, PartialEq)]
pub struct TaskSummary {
    pub id: TaskId,
    pub title: String,
    pub difficulty: Difficulty,
    pub category: Category,
}
