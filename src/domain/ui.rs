/// The task currently open for editing
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EditedTask {
    pub id: u32,
    pub title: String,
}

/// View the user lands on after logging in
pub const TASKS_PATH: &str = "/todo";
/// View the user lands on after logging out
pub const ROOT_PATH: &str = "/";

pub mod driven_ports {
    use super::*;

    #[cfg(test)]
    use mockall::automock;

    /// Makes a failure message visible to the user
    #[cfg_attr(test, automock)]
    pub trait ErrorReporter {
        fn report(&self, message: &str);
    }

    /// Holds the "currently edited task" reference
    #[cfg_attr(test, automock)]
    pub trait EditState {
        fn set_edited_task(&self, task: EditedTask);
        fn edited_task(&self) -> EditedTask;
        fn reset_edited_task(&self);
    }

    /// Moves the user between views
    #[cfg_attr(test, automock)]
    pub trait Navigator {
        fn go_to(&self, path: &str);
        fn current_path(&self) -> String;
    }
}
