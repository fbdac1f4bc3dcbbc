use crate::domain::todo::driven_ports::{TaskApi, TaskCache, TaskList};
use crate::domain::ui::driven_ports::{EditState, ErrorReporter};
use crate::domain::{self, MutationOutcome, RequestError};
use crate::external_connections::ExternalConnectivity;
use chrono::{DateTime, Utc};
use derive_more::Display;
use std::sync::Arc;
use tracing::{debug, error, info};

/// A task as the server last described it
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct TodoTask {
    pub id: u32,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTask {
    pub id: u32,
    pub title: String,
}

/// Logical identity of a cached query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum QueryKey {
    #[display("tasks")]
    Tasks,
}

pub mod driven_ports {
    use super::*;

    /// A cached task list. Entries are shared and never mutated; a change means a new list.
    pub type TaskList = Arc<Vec<TodoTask>>;

    /// Task endpoints of the task API
    pub trait TaskApi {
        async fn list_tasks(
            &self,
            ext_cxn: &impl ExternalConnectivity,
        ) -> Result<Vec<TodoTask>, RequestError>;
        async fn create_task(
            &self,
            task: &NewTask,
            ext_cxn: &impl ExternalConnectivity,
        ) -> Result<TodoTask, RequestError>;
        async fn update_task(
            &self,
            task: &UpdateTask,
            ext_cxn: &impl ExternalConnectivity,
        ) -> Result<TodoTask, RequestError>;
        async fn delete_task(
            &self,
            task_id: u32,
            ext_cxn: &impl ExternalConnectivity,
        ) -> Result<(), RequestError>;
    }

    /// Keyed store of query results with wholesale replacement of entries
    pub trait TaskCache {
        fn read(&self, key: QueryKey) -> Option<TaskList>;
        fn write(&self, key: QueryKey, tasks: TaskList);
        /// Replaces the entry under [key] with whatever [patch] builds from it. The read and
        /// the write happen without any other patch running in between. If nothing is cached
        /// under [key], [patch] is not called and false is returned.
        fn patch<F>(&self, key: QueryKey, patch: F) -> bool
        where
            F: FnOnce(&[TodoTask]) -> Vec<TodoTask>;
        fn invalidate(&self, key: QueryKey);
    }
}

pub mod driving_ports {
    use super::*;

    /// Mutations which keep the cached task list in step with the server
    pub trait TaskPort {
        async fn create_task(
            &self,
            task: &NewTask,
            ext_cxn: &impl ExternalConnectivity,
            task_api: &impl TaskApi,
            cache: &impl TaskCache,
            edit_state: &impl EditState,
            errors: &impl ErrorReporter,
        ) -> MutationOutcome<TodoTask>;
        async fn update_task(
            &self,
            task: &UpdateTask,
            ext_cxn: &impl ExternalConnectivity,
            task_api: &impl TaskApi,
            cache: &impl TaskCache,
            edit_state: &impl EditState,
            errors: &impl ErrorReporter,
        ) -> MutationOutcome<TodoTask>;
        async fn delete_task(
            &self,
            task_id: u32,
            ext_cxn: &impl ExternalConnectivity,
            task_api: &impl TaskApi,
            cache: &impl TaskCache,
            edit_state: &impl EditState,
            errors: &impl ErrorReporter,
        ) -> MutationOutcome<()>;
    }

    /// Read side of the task list. Results stay fresh until replaced or invalidated.
    pub trait TaskQueryPort {
        async fn fetch_tasks(
            &self,
            ext_cxn: &impl ExternalConnectivity,
            task_api: &impl TaskApi,
            cache: &impl TaskCache,
            errors: &impl ErrorReporter,
        ) -> Result<TaskList, RequestError>;
        async fn refetch_tasks(
            &self,
            ext_cxn: &impl ExternalConnectivity,
            task_api: &impl TaskApi,
            cache: &impl TaskCache,
            errors: &impl ErrorReporter,
        ) -> Result<TaskList, RequestError>;
    }
}

fn with_appended(tasks: &[TodoTask], created: TodoTask) -> Vec<TodoTask> {
    let mut patched = tasks.to_vec();
    patched.push(created);
    patched
}

fn with_replaced(tasks: &[TodoTask], task_id: u32, updated: TodoTask) -> Vec<TodoTask> {
    tasks
        .iter()
        .map(|task| {
            if task.id == task_id {
                updated.clone()
            } else {
                task.clone()
            }
        })
        .collect()
}

fn without(tasks: &[TodoTask], task_id: u32) -> Vec<TodoTask> {
    tasks
        .iter()
        .filter(|task| task.id != task_id)
        .cloned()
        .collect()
}

pub struct TaskService;

impl driving_ports::TaskPort for TaskService {
    async fn create_task(
        &self,
        task: &NewTask,
        ext_cxn: &impl ExternalConnectivity,
        task_api: &impl TaskApi,
        cache: &impl TaskCache,
        edit_state: &impl EditState,
        errors: &impl ErrorReporter,
    ) -> MutationOutcome<TodoTask> {
        info!("Creating task");
        let created = match task_api.create_task(task, ext_cxn).await {
            Ok(created) => created,
            Err(err) => {
                error!("Create task failure: {err}");
                return domain::report_failure(err, errors);
            }
        };

        edit_state.reset_edited_task();
        let patched = cache.patch(QueryKey::Tasks, |tasks| {
            with_appended(tasks, created.clone())
        });
        if patched {
            debug!("Appended task {} to the cached list", created.id);
        }

        MutationOutcome::Succeeded(created)
    }

    async fn update_task(
        &self,
        task: &UpdateTask,
        ext_cxn: &impl ExternalConnectivity,
        task_api: &impl TaskApi,
        cache: &impl TaskCache,
        edit_state: &impl EditState,
        errors: &impl ErrorReporter,
    ) -> MutationOutcome<TodoTask> {
        info!("Updating task {}", task.id);
        let updated = match task_api.update_task(task, ext_cxn).await {
            Ok(updated) => updated,
            Err(err) => {
                error!("Update task failure: {err}");
                return domain::report_failure(err, errors);
            }
        };

        edit_state.reset_edited_task();
        let patched = cache.patch(QueryKey::Tasks, |tasks| {
            with_replaced(tasks, task.id, updated.clone())
        });
        if patched {
            debug!("Replaced task {} in the cached list", task.id);
        }

        MutationOutcome::Succeeded(updated)
    }

    async fn delete_task(
        &self,
        task_id: u32,
        ext_cxn: &impl ExternalConnectivity,
        task_api: &impl TaskApi,
        cache: &impl TaskCache,
        edit_state: &impl EditState,
        errors: &impl ErrorReporter,
    ) -> MutationOutcome<()> {
        info!("Deleting task {task_id}");
        if let Err(err) = task_api.delete_task(task_id, ext_cxn).await {
            error!("Failed to delete task: {err}");
            return domain::report_failure(err, errors);
        }

        // Unlike create and update, the edit state is reset after the cache is patched
        if cache.patch(QueryKey::Tasks, |tasks| without(tasks, task_id)) {
            debug!("Removed task {task_id} from the cached list");
        }
        edit_state.reset_edited_task();

        MutationOutcome::Succeeded(())
    }
}

impl driving_ports::TaskQueryPort for TaskService {
    async fn fetch_tasks(
        &self,
        ext_cxn: &impl ExternalConnectivity,
        task_api: &impl TaskApi,
        cache: &impl TaskCache,
        errors: &impl ErrorReporter,
    ) -> Result<TaskList, RequestError> {
        if let Some(cached) = cache.read(QueryKey::Tasks) {
            debug!("Serving {} tasks from the cache", cached.len());
            return Ok(cached);
        }

        info!("Fetching tasks");
        match task_api.list_tasks(ext_cxn).await {
            Ok(tasks) => {
                let tasks: TaskList = Arc::new(tasks);
                cache.write(QueryKey::Tasks, Arc::clone(&tasks));
                Ok(tasks)
            }
            Err(err) => {
                error!("Failed to fetch tasks: {err}");
                errors.report(&err.user_message());
                Err(err)
            }
        }
    }

    async fn refetch_tasks(
        &self,
        ext_cxn: &impl ExternalConnectivity,
        task_api: &impl TaskApi,
        cache: &impl TaskCache,
        errors: &impl ErrorReporter,
    ) -> Result<TaskList, RequestError> {
        cache.invalidate(QueryKey::Tasks);
        self.fetch_tasks(ext_cxn, task_api, cache, errors).await
    }
}
