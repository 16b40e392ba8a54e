use crate::tasks::types::{COMPLEXITY_MAX, COMPLEXITY_MIN, Task};

// Stable filter; an out-of-range ceiling is clamped, never an error.
pub fn visible_tasks(tasks: &[Task], ceiling: u8, include_completed: bool) -> Vec<Task> {
    let ceiling = ceiling.clamp(COMPLEXITY_MIN, COMPLEXITY_MAX);
    tasks
        .iter()
        .filter(|task| task.complexity <= ceiling)
        .filter(|task| include_completed || !task.completed)
        .cloned()
        .collect()
}
