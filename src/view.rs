// Display ordering for a single day

use crate::models::Task;

/// Order a day's tasks by time of day
///
/// Tasks without a time sort as `00:00`. `HH:MM` strings compare
/// lexicographically in chronological order, and the sort is stable, so tasks
/// sharing a time keep their storage order.
pub fn sorted_for_display<'a>(mut tasks: Vec<&'a Task>) -> Vec<&'a Task> {
    tasks.sort_by(|a, b| a.sort_time().cmp(b.sort_time()));
    tasks
}

/// Completed vs. total, for a day header
pub fn progress(tasks: &[&Task]) -> (usize, usize) {
    let done = tasks.iter().filter(|t| t.completed).count();
    (done, tasks.len())
}
