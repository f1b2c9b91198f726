use super::model::{Priority, Status, Task};
use std::fmt;

/// Priority side of the task filter.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PriorityFilter {
    #[default]
    All,
    Only(Priority),
}

impl PriorityFilter {
    /// Cycle All -> High -> Medium -> Low -> All.
    ///
    pub fn next(&self) -> PriorityFilter {
        match self {
            PriorityFilter::All => PriorityFilter::Only(Priority::High),
            PriorityFilter::Only(Priority::High) => PriorityFilter::Only(Priority::Medium),
            PriorityFilter::Only(Priority::Medium) => PriorityFilter::Only(Priority::Low),
            PriorityFilter::Only(Priority::Low) => PriorityFilter::All,
        }
    }

    pub fn matches(&self, priority: Priority) -> bool {
        match self {
            PriorityFilter::All => true,
            PriorityFilter::Only(wanted) => *wanted == priority,
        }
    }
}

impl fmt::Display for PriorityFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriorityFilter::All => f.write_str("All"),
            PriorityFilter::Only(priority) => write!(f, "{}", priority),
        }
    }
}

/// Status side of the task filter.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(Status),
}

impl StatusFilter {
    /// Cycle All -> Pending -> Completed -> All.
    ///
    pub fn next(&self) -> StatusFilter {
        match self {
            StatusFilter::All => StatusFilter::Only(Status::Pending),
            StatusFilter::Only(Status::Pending) => StatusFilter::Only(Status::Completed),
            StatusFilter::Only(Status::Completed) => StatusFilter::All,
        }
    }

    pub fn matches(&self, status: Status) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str("All"),
            StatusFilter::Only(status) => write!(f, "{}", status),
        }
    }
}

/// Pair of predicates restricting which tasks are shown.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Filter {
    pub priority: PriorityFilter,
    pub status: StatusFilter,
}

impl Filter {
    pub fn new(priority: PriorityFilter, status: StatusFilter) -> Self {
        Filter { priority, status }
    }

    pub fn matches(&self, task: &Task) -> bool {
        self.priority.matches(task.priority) && self.status.matches(task.status)
    }

    pub fn is_all(&self) -> bool {
        *self == Filter::default()
    }
}

/// Project the tasks matching the filter, keeping their original order.
///
pub fn visible_tasks<'a>(
    tasks: &'a [Task],
    filter: &'a Filter,
) -> impl Iterator<Item = &'a Task> + 'a {
    tasks.iter().filter(move |task| filter.matches(task))
}
