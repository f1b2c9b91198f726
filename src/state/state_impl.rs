use super::error::StateError;
use super::form::{step_priority, step_status, validation_field, FormState};
use super::navigation::{FormField, View};
use crate::auth::{Authenticator, LoginError, LoginForm, StaticCredentials};
use crate::config::{Config, ViewHotkeys};
use crate::logger::LogBuffer;
use crate::preferences::{PreferenceWriter, Preferences};
use crate::tasks::{Status, Submitted, Task, TaskList, ValidationErrors};
use crate::ui::Theme;
use log::*;
use ratatui::layout::Rect;
use ratatui::widgets::ListState;
use std::sync::Arc;
use tui_textarea::CursorMove;

/// Houses data representative of application state.
///
pub struct State {
    view_stack: Vec<View>,
    authenticator: Arc<dyn Authenticator>,
    login: LoginForm,
    logged_in: bool,
    tasks: TaskList,
    list_state: ListState,
    form: FormState,
    detail: Option<Task>,                // Snapshot shown by the detail view
    delete_confirmation: Option<String>, // Id of task pending deletion confirmation
    preferences: Preferences,
    preference_writer: Option<PreferenceWriter>,
    theme: Theme,
    hotkeys: ViewHotkeys,
    log_buffer: LogBuffer,
    terminal_size: Rect,
}

/// Defines default application state.
///
impl Default for State {
    fn default() -> State {
        let config = Config::default();
        State {
            view_stack: vec![View::Login],
            authenticator: Arc::new(StaticCredentials::new(config.username, config.password)),
            login: LoginForm::default(),
            logged_in: false,
            tasks: TaskList::default(),
            list_state: ListState::default(),
            form: FormState::default(),
            detail: None,
            delete_confirmation: None,
            preferences: Preferences::default(),
            preference_writer: None,
            theme: Theme::default(),
            hotkeys: ViewHotkeys::default(),
            log_buffer: LogBuffer::default(),
            terminal_size: Rect::default(),
        }
    }
}

impl State {
    pub fn new(
        authenticator: Arc<dyn Authenticator>,
        preferences: Preferences,
        preference_writer: PreferenceWriter,
        hotkeys: ViewHotkeys,
        log_buffer: LogBuffer,
    ) -> Self {
        State {
            authenticator,
            theme: Theme::for_mode(preferences.dark_mode()),
            preferences,
            preference_writer: Some(preference_writer),
            hotkeys,
            log_buffer,
            ..State::default()
        }
    }

    /// Get the current theme.
    ///
    pub fn get_theme(&self) -> &Theme {
        &self.theme
    }

    pub fn get_hotkeys(&self) -> &ViewHotkeys {
        &self.hotkeys
    }

    pub fn get_log_buffer(&self) -> &LogBuffer {
        &self.log_buffer
    }

    pub fn get_preferences(&self) -> &Preferences {
        &self.preferences
    }

    /// Sets the terminal size.
    ///
    pub fn set_terminal_size(&mut self, size: Rect) -> &mut Self {
        self.terminal_size = size;
        self
    }

    pub fn get_terminal_size(&self) -> Rect {
        self.terminal_size
    }

    /// Return the current view.
    ///
    pub fn current_view(&self) -> &View {
        self.view_stack.last().unwrap_or(&View::Login)
    }

    /// Push a view on top of the stack.
    ///
    pub fn push_view(&mut self, view: View) -> &mut Self {
        self.view_stack.push(view);
        self
    }

    /// Return to the previous view. The base view is never removed.
    ///
    pub fn pop_view(&mut self) -> &mut Self {
        if self.view_stack.len() > 1 {
            self.view_stack.pop();
        }
        self
    }

    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    // Login

    pub fn get_login_form(&self) -> &LoginForm {
        &self.login
    }

    pub fn login_push_char(&mut self, c: char) -> &mut Self {
        self.login.push_char(c);
        self
    }

    pub fn login_backspace(&mut self) -> &mut Self {
        self.login.backspace();
        self
    }

    pub fn switch_login_field(&mut self) -> &mut Self {
        self.login.toggle_focus();
        self
    }

    /// Submit the login inputs. On success the task list becomes the base
    /// view and is seeded with the example tasks.
    ///
    pub fn submit_login(&mut self) -> Result<(), LoginError> {
        self.login.submit(self.authenticator.as_ref())?;
        self.logged_in = true;
        self.view_stack = vec![View::TaskList];
        self.tasks.initialize();
        self.list_state = ListState::default();
        self.clamp_selection();
        Ok(())
    }

    // Task list

    pub fn get_tasks(&self) -> &TaskList {
        &self.tasks
    }

    /// Return the tasks passing the active filter, in list order.
    ///
    pub fn visible_tasks(&self) -> Vec<&Task> {
        self.tasks.visible_tasks().collect()
    }

    pub fn get_list_state(&mut self) -> &mut ListState {
        &mut self.list_state
    }

    /// Return the selected task among the visible ones.
    ///
    pub fn selected_task(&self) -> Option<&Task> {
        let index = self.list_state.selected()?;
        self.tasks.visible_tasks().nth(index)
    }

    pub fn selected_task_id(&self) -> Option<String> {
        self.selected_task().map(|task| task.id.clone())
    }

    /// Activate the next visible task, wrapping around.
    ///
    pub fn next_task(&mut self) -> &mut Self {
        let count = self.tasks.visible_tasks().count();
        if count == 0 {
            self.list_state.select(None);
            return self;
        }
        let next = match self.list_state.selected() {
            Some(current) if current + 1 < count => current + 1,
            _ => 0,
        };
        self.list_state.select(Some(next));
        self
    }

    /// Activate the previous visible task, wrapping around.
    ///
    pub fn previous_task(&mut self) -> &mut Self {
        let count = self.tasks.visible_tasks().count();
        if count == 0 {
            self.list_state.select(None);
            return self;
        }
        let previous = match self.list_state.selected() {
            Some(current) if current > 0 && current <= count => current - 1,
            _ => count - 1,
        };
        self.list_state.select(Some(previous));
        self
    }

    /// Select the given task if it is visible, otherwise keep the selection
    /// in range.
    ///
    pub fn select_task(&mut self, id: &str) -> &mut Self {
        let position = self.tasks.visible_tasks().position(|task| task.id == id);
        match position {
            Some(index) => self.list_state.select(Some(index)),
            None => self.clamp_selection(),
        }
        self
    }

    fn clamp_selection(&mut self) {
        let count = self.tasks.visible_tasks().count();
        if count == 0 {
            self.list_state.select(None);
        } else {
            let index = self.list_state.selected().unwrap_or(0).min(count - 1);
            self.list_state.select(Some(index));
        }
    }

    /// Run a mutation and keep the previously selected task selected when it
    /// is still visible.
    ///
    fn keeping_selection(&mut self, mutate: impl FnOnce(&mut TaskList)) {
        let selected = self.selected_task_id();
        mutate(&mut self.tasks);
        match selected {
            Some(id) => {
                self.select_task(&id);
            }
            None => self.clamp_selection(),
        }
    }

    pub fn cycle_status_filter(&mut self) -> &mut Self {
        self.keeping_selection(|tasks| {
            tasks.cycle_status_filter();
        });
        self
    }

    pub fn cycle_priority_filter(&mut self) -> &mut Self {
        self.keeping_selection(|tasks| {
            tasks.cycle_priority_filter();
        });
        self
    }

    /// Flip the status of the selected task.
    ///
    pub fn toggle_selected_status(&mut self) -> Result<Status, StateError> {
        let id = self.require_selection()?;
        self.toggle_status(&id)
    }

    fn toggle_status(&mut self, id: &str) -> Result<Status, StateError> {
        let selected = self.selected_task_id();
        let status = self
            .tasks
            .toggle_status(id)
            .ok_or_else(|| StateError::TaskNotFound { id: id.to_string() })?;
        match selected {
            Some(selected) => {
                self.select_task(&selected);
            }
            None => self.clamp_selection(),
        }
        self.refresh_detail();
        Ok(status)
    }

    fn require_selection(&self) -> Result<String, StateError> {
        if !self.logged_in {
            return Err(StateError::NotLoggedIn);
        }
        self.selected_task_id().ok_or(StateError::NoSelection)
    }

    // Delete confirmation

    pub fn has_delete_confirmation(&self) -> bool {
        self.delete_confirmation.is_some()
    }

    /// Return the task waiting for delete confirmation.
    ///
    pub fn get_delete_confirmation(&self) -> Option<&Task> {
        self.delete_confirmation
            .as_deref()
            .and_then(|id| self.tasks.get(id))
    }

    pub fn request_delete_selected(&mut self) -> Result<&mut Self, StateError> {
        let id = self.require_selection()?;
        self.delete_confirmation = Some(id);
        Ok(self)
    }

    pub fn request_delete_detail(&mut self) -> Result<&mut Self, StateError> {
        let id = self.require_detail()?;
        self.delete_confirmation = Some(id);
        Ok(self)
    }

    pub fn cancel_delete(&mut self) -> &mut Self {
        self.delete_confirmation = None;
        self
    }

    /// Delete the task awaiting confirmation. A detail view showing it is
    /// closed.
    ///
    pub fn confirm_delete(&mut self) -> &mut Self {
        let Some(id) = self.delete_confirmation.take() else {
            return self;
        };
        let selected = self.selected_task_id();
        self.tasks.delete_task(&id);
        if self.detail.as_ref().is_some_and(|task| task.id == id) {
            self.detail = None;
            if *self.current_view() == View::TaskDetail {
                self.pop_view();
            }
        }
        match selected.filter(|selected| *selected != id) {
            Some(selected) => {
                self.select_task(&selected);
            }
            None => self.clamp_selection(),
        }
        self
    }

    // Task form

    pub fn get_form(&self) -> &FormState {
        &self.form
    }

    pub fn get_form_mut(&mut self) -> &mut FormState {
        &mut self.form
    }

    /// Whether the form edits an existing task.
    ///
    pub fn is_editing(&self) -> bool {
        self.tasks.is_editing()
    }

    /// Open an empty form for a new task.
    ///
    pub fn open_create_form(&mut self) -> Result<&mut Self, StateError> {
        if !self.logged_in {
            return Err(StateError::NotLoggedIn);
        }
        self.tasks.cancel_edit();
        self.form.load(self.tasks.draft());
        self.push_view(View::TaskForm);
        Ok(self)
    }

    /// Open the form pre-filled with an existing task.
    ///
    pub fn open_edit_form(&mut self, id: &str) -> Result<&mut Self, StateError> {
        if !self.logged_in {
            return Err(StateError::NotLoggedIn);
        }
        if !self.tasks.begin_edit(id) {
            return Err(StateError::TaskNotFound { id: id.to_string() });
        }
        self.form.load(self.tasks.draft());
        self.push_view(View::TaskForm);
        Ok(self)
    }

    pub fn open_edit_selected(&mut self) -> Result<&mut Self, StateError> {
        let id = self.require_selection()?;
        self.open_edit_form(&id)
    }

    pub fn open_edit_detail(&mut self) -> Result<&mut Self, StateError> {
        let id = self.require_detail()?;
        self.open_edit_form(&id)
    }

    /// Return the text of the focused form field. The description is read
    /// from its editor.
    ///
    pub fn form_field_value(&self, field: FormField) -> String {
        let draft = self.tasks.draft();
        match field {
            FormField::Title => draft.title.clone(),
            FormField::Description => self.form.description_text(),
            FormField::Priority => draft.priority.clone(),
            FormField::Status => draft.status.clone().unwrap_or_default(),
        }
    }

    /// Type a character into the focused field.
    ///
    pub fn form_push_char(&mut self, c: char) -> &mut Self {
        let focus = self.form.focus();
        match focus {
            FormField::Title => self.tasks.draft_mut().title.push(c),
            FormField::Description => {
                self.form.description_editor().insert_char(c);
                self.sync_description();
            }
            FormField::Priority => self.tasks.draft_mut().priority.push(c),
            FormField::Status => {
                if let Some(status) = self.tasks.draft_mut().status.as_mut() {
                    status.push(c);
                }
            }
        }
        self.form.clear_error(focus);
        self
    }

    /// Remove the character before the cursor of the focused field.
    ///
    pub fn form_backspace(&mut self) -> &mut Self {
        match self.form.focus() {
            FormField::Title => {
                self.tasks.draft_mut().title.pop();
            }
            FormField::Description => {
                self.form.description_editor().delete_char();
                self.sync_description();
            }
            FormField::Priority => {
                self.tasks.draft_mut().priority.pop();
            }
            FormField::Status => {
                if let Some(status) = self.tasks.draft_mut().status.as_mut() {
                    status.pop();
                }
            }
        }
        self
    }

    /// Enter starts a new line in the description and moves on elsewhere.
    ///
    pub fn form_enter(&mut self) -> &mut Self {
        if self.form.focus() == FormField::Description {
            self.form.description_editor().insert_newline();
            self.sync_description();
            self
        } else {
            self.next_form_field()
        }
    }

    pub fn next_form_field(&mut self) -> &mut Self {
        let with_status = self.tasks.draft().status.is_some();
        let next = self.form.focus().next(with_status);
        self.form.set_focus(next);
        self
    }

    pub fn previous_form_field(&mut self) -> &mut Self {
        let with_status = self.tasks.draft().status.is_some();
        let previous = self.form.focus().previous(with_status);
        self.form.set_focus(previous);
        self
    }

    /// Cycle the value of the priority or status field.
    ///
    pub fn step_form_option(&mut self, forward: bool) -> &mut Self {
        let focus = self.form.focus();
        let draft = self.tasks.draft_mut();
        match focus {
            FormField::Priority => draft.priority = step_priority(&draft.priority, forward),
            FormField::Status => {
                if let Some(status) = draft.status.as_mut() {
                    *status = step_status(status);
                }
            }
            FormField::Description => {
                let movement = if forward {
                    CursorMove::Forward
                } else {
                    CursorMove::Back
                };
                return self.move_description_cursor(movement);
            }
            FormField::Title => return self,
        }
        self.form.clear_error(focus);
        self
    }

    /// Move the description cursor while the description has focus.
    ///
    pub fn move_description_cursor(&mut self, movement: CursorMove) -> &mut Self {
        if self.form.focus() == FormField::Description {
            self.form.description_editor().move_cursor(movement);
        }
        self
    }

    fn sync_description(&mut self) {
        let text = self.form.description_text();
        self.tasks.draft_mut().description = text;
    }

    /// Validate and commit the form. On success the form closes and the
    /// submitted task is selected; on failure the errors are kept for display
    /// and focus moves to the first invalid field.
    ///
    pub fn submit_form(&mut self) -> Result<Submitted, ValidationErrors> {
        self.sync_description();
        match self.tasks.submit_draft() {
            Ok(submitted) => {
                self.form.set_errors(ValidationErrors::default());
                self.pop_view();
                self.refresh_detail();
                self.select_task(submitted.id());
                Ok(submitted)
            }
            Err(errors) => {
                debug!("{}", errors);
                let first_invalid = [
                    FormField::Title,
                    FormField::Description,
                    FormField::Priority,
                    FormField::Status,
                ]
                .into_iter()
                .find(|field| errors.for_field(validation_field(*field)).is_some());
                if let Some(field) = first_invalid {
                    self.form.set_focus(field);
                }
                self.form.set_errors(errors.clone());
                Err(errors)
            }
        }
    }

    /// Leave the form without changing any task.
    ///
    pub fn cancel_form(&mut self) -> &mut Self {
        self.tasks.cancel_edit();
        self.form.load(self.tasks.draft());
        self.pop_view();
        self
    }

    // Task detail

    /// Return the task shown by the detail view.
    ///
    pub fn get_task_detail(&self) -> Option<&Task> {
        self.detail.as_ref()
    }

    pub fn open_detail_selected(&mut self) -> Result<&mut Self, StateError> {
        self.require_selection()?;
        self.detail = self.selected_task().cloned();
        self.push_view(View::TaskDetail);
        Ok(self)
    }

    pub fn toggle_detail_status(&mut self) -> Result<Status, StateError> {
        let id = self.require_detail()?;
        self.toggle_status(&id)
    }

    pub fn close_detail(&mut self) -> &mut Self {
        self.detail = None;
        self.pop_view();
        self
    }

    fn require_detail(&self) -> Result<String, StateError> {
        self.detail
            .as_ref()
            .map(|task| task.id.clone())
            .ok_or(StateError::NoSelection)
    }

    fn refresh_detail(&mut self) {
        if let Some(id) = self.detail.as_ref().map(|task| task.id.clone()) {
            self.detail = self.tasks.get(&id).cloned();
        }
    }

    // Preferences

    /// Flip dark mode and persist it in the background.
    ///
    pub fn toggle_dark_mode(&mut self) -> &mut Self {
        // Completion of the write is not awaited; failures are logged by the writer.
        let _ = self
            .preferences
            .toggle_dark_mode(self.preference_writer.as_ref());
        self.theme = Theme::for_mode(self.preferences.dark_mode());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preferences::{MemoryPreferenceStore, PreferenceStore, DARK_MODE_KEY};
    use crate::tasks::{FieldError, Priority, PriorityFilter, StatusFilter};
    use fake::{Fake, Faker};

    fn logged_in() -> State {
        let mut state = State::default();
        state.login.username = "prueba".to_string();
        state.login.password = "prueba".to_string();
        state.submit_login().unwrap();
        state
    }

    fn type_text(state: &mut State, text: &str) {
        for c in text.chars() {
            state.form_push_char(c);
        }
    }

    #[test]
    fn default_starts_at_login() {
        let state = State::default();
        assert_eq!(*state.current_view(), View::Login);
        assert!(!state.is_logged_in());
        assert!(state.get_tasks().is_empty());
    }

    #[test]
    fn submit_login_seeds_tasks() {
        let state = logged_in();
        assert_eq!(*state.current_view(), View::TaskList);
        assert_eq!(state.get_tasks().len(), 3);
        assert_eq!(state.list_state.selected(), Some(0));
        assert!(state.login.password.is_empty());
    }

    #[test]
    fn submit_login_rejects_bad_credentials() {
        let mut state = State::default();
        for c in "prueba".chars() {
            state.login_push_char(c);
        }
        state.switch_login_field();
        state.login_push_char('x');
        assert_eq!(state.submit_login(), Err(LoginError::InvalidCredentials));
        assert_eq!(*state.current_view(), View::Login);
        assert!(state.get_tasks().is_empty());
    }

    #[test]
    fn actions_require_login() {
        let mut state = State::default();
        assert_eq!(state.toggle_selected_status(), Err(StateError::NotLoggedIn));
        assert!(matches!(
            state.open_create_form(),
            Err(StateError::NotLoggedIn)
        ));
    }

    #[test]
    fn pop_view_keeps_base() {
        let mut state = logged_in();
        state.pop_view().pop_view();
        assert_eq!(*state.current_view(), View::TaskList);
    }

    #[test]
    fn next_and_previous_task_wrap() {
        let mut state = logged_in();
        state.previous_task();
        assert_eq!(state.list_state.selected(), Some(2));
        state.next_task();
        assert_eq!(state.list_state.selected(), Some(0));
        state.next_task();
        assert_eq!(state.selected_task_id().as_deref(), Some("2"));
    }

    #[test]
    fn filter_keeps_selected_task_when_visible() {
        let mut state = logged_in();
        state.select_task("3");
        // Pending tasks are "1" and "3"
        state.cycle_status_filter();
        assert_eq!(
            state.get_tasks().filter().status,
            StatusFilter::Only(Status::Pending)
        );
        assert_eq!(state.selected_task_id().as_deref(), Some("3"));
        assert_eq!(state.visible_tasks().len(), 2);
    }

    #[test]
    fn filter_clamps_selection_when_hidden() {
        let mut state = logged_in();
        state.select_task("3");
        // Only "1" is High
        state.cycle_priority_filter();
        assert_eq!(
            state.get_tasks().filter().priority,
            PriorityFilter::Only(Priority::High)
        );
        assert_eq!(state.selected_task_id().as_deref(), Some("1"));
    }

    #[test]
    fn empty_filter_result_clears_selection() {
        let mut state = logged_in();
        state.tasks.set_status_filter(StatusFilter::Only(Status::Completed));
        state.tasks.set_priority_filter(PriorityFilter::Only(Priority::Low));
        state.clamp_selection();
        assert!(state.selected_task().is_none());
        assert_eq!(state.toggle_selected_status(), Err(StateError::NoSelection));
        state.next_task();
        assert_eq!(state.list_state.selected(), None);
    }

    #[test]
    fn toggle_under_filter_moves_selection() {
        let mut state = logged_in();
        state.tasks.set_status_filter(StatusFilter::Only(Status::Pending));
        state.select_task("1");
        assert_eq!(state.toggle_selected_status(), Ok(Status::Completed));
        assert_eq!(state.visible_tasks().len(), 1);
        assert_eq!(state.selected_task_id().as_deref(), Some("3"));
    }

    #[test]
    fn delete_requires_confirmation() {
        let mut state = logged_in();
        state.select_task("2");
        state.request_delete_selected().unwrap();
        assert!(state.has_delete_confirmation());
        assert_eq!(state.get_delete_confirmation().map(|t| t.id.as_str()), Some("2"));

        state.cancel_delete();
        assert_eq!(state.get_tasks().len(), 3);

        state.request_delete_selected().unwrap();
        state.confirm_delete();
        assert_eq!(state.get_tasks().len(), 2);
        assert!(state.get_tasks().get("2").is_none());
        assert!(state.selected_task().is_some());
        assert!(!state.has_delete_confirmation());
    }

    #[test]
    fn deleting_last_task_clears_selection() {
        let mut state = logged_in();
        for _ in 0..3 {
            state.request_delete_selected().unwrap();
            state.confirm_delete();
        }
        assert!(state.get_tasks().is_empty());
        assert_eq!(state.list_state.selected(), None);
    }

    #[test]
    fn delete_from_detail_closes_it() {
        let mut state = logged_in();
        state.open_detail_selected().unwrap();
        assert_eq!(*state.current_view(), View::TaskDetail);
        state.request_delete_detail().unwrap();
        state.confirm_delete();
        assert_eq!(*state.current_view(), View::TaskList);
        assert!(state.get_task_detail().is_none());
        assert!(state.get_tasks().get("1").is_none());
    }

    #[test]
    fn create_task_through_form() {
        let mut state = logged_in();
        state.open_create_form().unwrap();
        assert_eq!(*state.current_view(), View::TaskForm);
        assert!(!state.is_editing());

        type_text(&mut state, "Buy milk");
        state.next_form_field();
        type_text(&mut state, "2% milk");
        state.next_form_field();
        assert_eq!(state.form.focus(), FormField::Priority);
        state.step_form_option(false);
        assert_eq!(state.form_field_value(FormField::Priority), "High");
        // No status field while creating
        state.next_form_field();
        assert_eq!(state.form.focus(), FormField::Title);

        let submitted = state.submit_form().unwrap();
        assert!(matches!(submitted, Submitted::Created { .. }));
        assert_eq!(*state.current_view(), View::TaskList);
        let task = state.get_tasks().get(submitted.id()).unwrap();
        assert_eq!(task.title, "Buy milk");
        assert_eq!(task.description, "2% milk");
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.status, Status::Pending);
        assert_eq!(state.selected_task_id().as_deref(), Some(submitted.id()));
    }

    #[test]
    fn invalid_form_keeps_errors_and_focus() {
        let mut state = logged_in();
        state.open_create_form().unwrap();
        type_text(&mut state, "Hi");
        state.next_form_field();
        type_text(&mut state, "hello");

        let errors = state.submit_form().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.contains(&FieldError::TitleTooShort));
        assert_eq!(*state.current_view(), View::TaskForm);
        assert_eq!(state.form.focus(), FormField::Title);
        assert_eq!(state.get_tasks().len(), 3);

        // Typing into the field clears its error
        state.form_push_char('!');
        assert!(state.get_form().errors().is_empty());
        assert!(state.submit_form().is_ok());
        assert_eq!(state.get_tasks().len(), 4);
    }

    #[test]
    fn description_editor_supports_newlines() {
        let mut state = logged_in();
        state.open_create_form().unwrap();
        type_text(&mut state, "Plan trip");
        state.form_enter();
        assert_eq!(state.form.focus(), FormField::Description);
        type_text(&mut state, "Book");
        state.form_enter();
        type_text(&mut state, "hotels");
        state.form_backspace();
        assert_eq!(state.tasks.draft().description, "Book\nhotel");
    }

    #[test]
    fn edit_task_through_form() {
        let mut state = logged_in();
        state.select_task("2");
        state.open_edit_selected().unwrap();
        assert!(state.is_editing());
        assert_eq!(state.form_field_value(FormField::Title), "Example task 2");
        assert_eq!(state.form_field_value(FormField::Status), "Completed");

        state.form_push_char('!');
        state.previous_form_field();
        assert_eq!(state.form.focus(), FormField::Status);
        state.step_form_option(true);

        let submitted = state.submit_form().unwrap();
        assert_eq!(submitted, Submitted::Updated { id: "2".to_string() });
        let task = state.get_tasks().get("2").unwrap();
        assert_eq!(task.title, "Example task 2!");
        assert_eq!(task.status, Status::Pending);
        assert_eq!(state.get_tasks().tasks()[1].id, "2");
    }

    #[test]
    fn invalid_status_is_reported() {
        let mut state = logged_in();
        state.open_edit_form("1").unwrap();
        state.form.set_focus(FormField::Status);
        state.form_push_char('?');
        let errors = state.submit_form().unwrap_err();
        assert!(errors.contains(&FieldError::InvalidStatus));
        assert_eq!(state.form.focus(), FormField::Status);
    }

    #[test]
    fn cancel_form_changes_nothing() {
        let mut state = logged_in();
        let before = state.get_tasks().tasks().to_vec();
        state.open_edit_form("1").unwrap();
        type_text(&mut state, " changed");
        state.cancel_form();
        assert_eq!(*state.current_view(), View::TaskList);
        assert_eq!(state.get_tasks().tasks(), before.as_slice());
        assert!(!state.is_editing());
    }

    #[test]
    fn edit_replaces_description() {
        let mut state = logged_in();
        state.open_edit_form("1").unwrap();
        state.form.set_focus(FormField::Description);
        for _ in 0..30 {
            state.form_backspace();
        }
        type_text(&mut state, "Fresh text");
        assert_eq!(state.get_tasks().draft().description, "Fresh text");
        state.submit_form().unwrap();
        assert_eq!(state.get_tasks().get("1").unwrap().description, "Fresh text");
    }

    #[test]
    fn arrows_move_description_cursor() {
        let mut state = logged_in();
        state.open_edit_form("1").unwrap();
        state.form.set_focus(FormField::Description);
        for _ in 0.."task 1".len() {
            state.step_form_option(false);
        }
        type_text(&mut state, "my ");
        state.step_form_option(true);
        state.form_push_char('!');
        assert_eq!(
            state.get_tasks().draft().description,
            "Description of my t!ask 1"
        );
    }

    #[test]
    fn edit_unknown_task_is_an_error() {
        let mut state = logged_in();
        let id: String = Faker.fake();
        assert!(matches!(
            state.open_edit_form(&id),
            Err(StateError::TaskNotFound { .. })
        ));
        assert_eq!(*state.current_view(), View::TaskList);
    }

    #[test]
    fn detail_snapshot_follows_changes() {
        let mut state = logged_in();
        state.open_detail_selected().unwrap();
        assert_eq!(state.toggle_detail_status(), Ok(Status::Completed));
        assert_eq!(state.get_task_detail().unwrap().status, Status::Completed);

        state.open_edit_detail().unwrap();
        state.form_push_char('?');
        state.submit_form().unwrap();
        assert_eq!(*state.current_view(), View::TaskDetail);
        assert_eq!(state.get_task_detail().unwrap().title, "Example task 1?");

        state.close_detail();
        assert_eq!(*state.current_view(), View::TaskList);
        assert!(state.get_task_detail().is_none());
    }

    #[tokio::test]
    async fn toggle_dark_mode_switches_theme_and_persists() {
        let store = Arc::new(MemoryPreferenceStore::new());
        let writer = PreferenceWriter::spawn(store.clone());
        let mut state = State::new(
            Arc::new(StaticCredentials::new("a", "b")),
            Preferences::new(false),
            writer,
            ViewHotkeys::default(),
            LogBuffer::new(),
        );
        assert!(!state.get_theme().is_dark());

        state.toggle_dark_mode();
        assert!(state.get_preferences().dark_mode());
        assert!(state.get_theme().is_dark());

        // Completions are dropped, so wait for the background write
        for _ in 0..50 {
            if store.get(DARK_MODE_KEY).unwrap().is_some() {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        assert_eq!(store.get(DARK_MODE_KEY).unwrap().as_deref(), Some("true"));
    }

    #[test]
    fn set_terminal_size() {
        let mut state = State::default();
        let size = Rect::new(Faker.fake(), Faker.fake(), Faker.fake(), Faker.fake());
        state.set_terminal_size(size);
        assert_eq!(size, state.get_terminal_size());
    }
}
