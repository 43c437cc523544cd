mod completed;
mod ids;
mod task;

pub use completed::CompletedTasks;
pub use ids::TaskId;
pub use task::{Category, Difficulty, Task, TaskDraft, TaskError, TaskSummary};
