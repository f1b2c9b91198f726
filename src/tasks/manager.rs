use super::draft::{parse_draft, Draft, ValidationErrors};
use super::filter::{visible_tasks, Filter, PriorityFilter, StatusFilter};
use super::model::{Priority, Status, Task};
use log::*;
use uuid::Uuid;

/// Result of a successful draft submission.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Submitted {
    Created { id: String },
    Updated { id: String },
}

impl Submitted {
    pub fn id(&self) -> &str {
        match self {
            Submitted::Created { id } | Submitted::Updated { id } => id,
        }
    }
}

/// Holds the in-memory task collection together with the active filter and
/// the draft being edited.
///
#[derive(Clone, Debug, Default)]
pub struct TaskList {
    tasks: Vec<Task>,
    filter: Filter,
    draft: Draft,
    editing: Option<String>,
}

impl TaskList {
    /// Return a list seeded with the example tasks.
    ///
    pub fn seeded() -> Self {
        let mut list = TaskList::default();
        list.initialize();
        list
    }

    /// Replace all content with the example tasks and reset filter and draft.
    ///
    pub fn initialize(&mut self) -> &mut Self {
        self.tasks = example_tasks();
        self.filter = Filter::default();
        self.draft = Draft::default();
        self.editing = None;
        debug!("Seeded task list with {} example tasks.", self.tasks.len());
        self
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Return the number of pending and completed tasks.
    ///
    pub fn counts(&self) -> (usize, usize) {
        let completed = self.tasks.iter().filter(|t| t.is_completed()).count();
        (self.tasks.len() - completed, completed)
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: Filter) -> &mut Self {
        self.filter = filter;
        self
    }

    pub fn set_priority_filter(&mut self, priority: PriorityFilter) -> &mut Self {
        self.filter.priority = priority;
        self
    }

    pub fn set_status_filter(&mut self, status: StatusFilter) -> &mut Self {
        self.filter.status = status;
        self
    }

    pub fn cycle_priority_filter(&mut self) -> &mut Self {
        self.filter.priority = self.filter.priority.next();
        debug!("Priority filter set to {}.", self.filter.priority);
        self
    }

    pub fn cycle_status_filter(&mut self) -> &mut Self {
        self.filter.status = self.filter.status.next();
        debug!("Status filter set to {}.", self.filter.status);
        self
    }

    /// Tasks matching the current filter, in insertion order.
    ///
    pub fn visible_tasks(&self) -> impl Iterator<Item = &Task> + '_ {
        visible_tasks(&self.tasks, &self.filter)
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut Draft {
        &mut self.draft
    }

    pub fn editing_target(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Load a task into the draft and mark it as the editing target. The task
    /// itself is not changed. Returns false if the id is unknown.
    ///
    pub fn begin_edit(&mut self, id: &str) -> bool {
        match self.get(id) {
            Some(task) => {
                self.draft = Draft::from_task(task);
                self.editing = Some(id.to_string());
                true
            }
            None => {
                debug!("Ignoring edit request for unknown task {}.", id);
                false
            }
        }
    }

    /// Drop the draft and return to the idle state.
    ///
    pub fn cancel_edit(&mut self) -> &mut Self {
        self.draft = Draft::default();
        self.editing = None;
        self
    }

    /// Validate the current draft and commit it. On failure the draft is left
    /// as is so it can be corrected.
    ///
    pub fn submit_draft(&mut self) -> Result<Submitted, ValidationErrors> {
        let valid = parse_draft(&self.draft)?;

        let position = self
            .editing
            .as_deref()
            .and_then(|id| self.tasks.iter().position(|task| task.id == id));

        let submitted = match position {
            Some(index) => {
                let task = &mut self.tasks[index];
                task.title = valid.title;
                task.description = valid.description;
                task.priority = valid.priority;
                if let Some(status) = valid.status {
                    task.status = status;
                }
                info!("Updated task {}.", task.id);
                Submitted::Updated {
                    id: task.id.clone(),
                }
            }
            None => {
                let id = self.generate_id();
                self.tasks.push(Task {
                    id: id.clone(),
                    title: valid.title,
                    description: valid.description,
                    priority: valid.priority,
                    status: Status::Pending,
                });
                info!("Created task {}.", id);
                Submitted::Created { id }
            }
        };

        self.cancel_edit();
        Ok(submitted)
    }

    /// Flip a task between pending and completed. Unknown ids are ignored.
    ///
    pub fn toggle_status(&mut self, id: &str) -> Option<Status> {
        let task = self.tasks.iter_mut().find(|task| task.id == id)?;
        task.status = task.status.toggled();
        debug!("Task {} is now {}.", task.id, task.status);
        Some(task.status)
    }

    /// Remove a task. Removing an unknown id does nothing.
    ///
    pub fn delete_task(&mut self, id: &str) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        let removed = self.tasks.len() != before;
        if removed {
            info!("Deleted task {}.", id);
            if self.editing.as_deref() == Some(id) {
                // The draft stays and will create a new task on submit.
                self.editing = None;
                self.draft.status = None;
            }
        }
        removed
    }

    fn generate_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }
}

fn example_tasks() -> Vec<Task> {
    vec![
        Task {
            id: "1".to_string(),
            title: "Example task 1".to_string(),
            description: "Description of task 1".to_string(),
            priority: Priority::High,
            status: Status::Pending,
        },
        Task {
            id: "2".to_string(),
            title: "Example task 2".to_string(),
            description: "Description of task 2".to_string(),
            priority: Priority::Medium,
            status: Status::Completed,
        },
        Task {
            id: "3".to_string(),
            title: "Example task 3".to_string(),
            description: "Description of task 3".to_string(),
            priority: Priority::Low,
            status: Status::Pending,
        },
    ]
}
