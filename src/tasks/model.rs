use fake::{Dummy, Faker};
use rand::Rng;
use std::fmt;

/// Three-level task priority.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    /// Return the canonical label.
    ///
    pub fn label(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }

    /// Parse a priority label, accepting the historical vocabularies
    /// (Urgent/Alta/Urgente, Media, Baja) besides the canonical one.
    ///
    pub fn parse(value: &str) -> Option<Priority> {
        match value.trim().to_lowercase().as_str() {
            "high" | "urgent" | "alta" | "urgente" => Some(Priority::High),
            "medium" | "media" => Some(Priority::Medium),
            "low" | "baja" => Some(Priority::Low),
            _ => None,
        }
    }

    /// Return the following priority, wrapping around.
    ///
    pub fn next(&self) -> Priority {
        match self {
            Priority::High => Priority::Medium,
            Priority::Medium => Priority::Low,
            Priority::Low => Priority::High,
        }
    }

    /// Return the preceding priority, wrapping around.
    ///
    pub fn previous(&self) -> Priority {
        match self {
            Priority::High => Priority::Low,
            Priority::Medium => Priority::High,
            Priority::Low => Priority::Medium,
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Dummy<Faker> for Priority {
    fn dummy_with_rng<R: Rng + ?Sized>(_: &Faker, rng: &mut R) -> Self {
        Priority::ALL[rng.gen_range(0..Priority::ALL.len())]
    }
}

/// Completion status of a task.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Status {
    Pending,
    Completed,
}

impl Status {
    pub const ALL: [Status; 2] = [Status::Pending, Status::Completed];

    pub fn label(&self) -> &'static str {
        match self {
            Status::Pending => "Pending",
            Status::Completed => "Completed",
        }
    }

    /// Parse a status label (English or Spanish).
    ///
    pub fn parse(value: &str) -> Option<Status> {
        match value.trim().to_lowercase().as_str() {
            "pending" | "pendiente" => Some(Status::Pending),
            "completed" | "completada" => Some(Status::Completed),
            _ => None,
        }
    }

    /// Return the opposite status.
    ///
    pub fn toggled(&self) -> Status {
        match self {
            Status::Pending => Status::Completed,
            Status::Completed => Status::Pending,
        }
    }
}

impl Default for Status {
    fn default() -> Self {
        Status::Pending
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Dummy<Faker> for Status {
    fn dummy_with_rng<R: Rng + ?Sized>(_: &Faker, rng: &mut R) -> Self {
        if rng.gen_bool(0.5) {
            Status::Pending
        } else {
            Status::Completed
        }
    }
}

/// Defines task data structure.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub status: Status,
}

impl Task {
    pub fn is_completed(&self) -> bool {
        self.status == Status::Completed
    }
}
