//! Process-wide UI state shared by every service: the edited task, the current view,
//! and the last error the user was shown.

use crate::domain::ui::driven_ports::{EditState, ErrorReporter, Navigator};
use crate::domain::ui::{EditedTask, ROOT_PATH};
use parking_lot::RwLock;
use tracing::{info, warn};

pub struct UiStore {
    edited_task: RwLock<EditedTask>,
    current_path: RwLock<String>,
    last_error: RwLock<Option<String>>,
}

impl UiStore {
    pub fn new() -> Self {
        Self {
            edited_task: RwLock::new(EditedTask::default()),
            current_path: RwLock::new(ROOT_PATH.to_owned()),
            last_error: RwLock::new(None),
        }
    }

    /// The most recent message passed to [ErrorReporter::report], if any
    pub fn last_error(&self) -> Option<String> {
        self.last_error.read().clone()
    }
}

impl Default for UiStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorReporter for UiStore {
    fn report(&self, message: &str) {
        warn!("Showing error to user: {message}");
        *self.last_error.write() = Some(message.to_owned());
    }
}

impl EditState for UiStore {
    fn set_edited_task(&self, task: EditedTask) {
        *self.edited_task.write() = task;
    }

    fn edited_task(&self) -> EditedTask {
        self.edited_task.read().clone()
    }

    fn reset_edited_task(&self) {
        *self.edited_task.write() = EditedTask::default();
    }
}

impl Navigator for UiStore {
    fn go_to(&self, path: &str) {
        info!("Navigating to {path}");
        *self.current_path.write() = path.to_owned();
    }

    fn current_path(&self) -> String {
        self.current_path.read().clone()
    }
}
