use crate::domain;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// DTO for creating a new task via the API
#[derive(Serialize)]
#[cfg_attr(test, derive(Deserialize, Debug))]
pub struct NewTask {
    pub title: String,
}

impl From<&domain::todo::NewTask> for NewTask {
    fn from(value: &domain::todo::NewTask) -> Self {
        NewTask {
            title: value.title.clone(),
        }
    }
}

/// DTO for updating a task's content via the API. The ID is repeated in the body.
#[derive(Serialize)]
#[cfg_attr(test, derive(Deserialize, Debug))]
pub struct UpdateTask {
    pub id: u32,
    pub title: String,
}

impl From<&domain::todo::UpdateTask> for UpdateTask {
    fn from(value: &domain::todo::UpdateTask) -> Self {
        UpdateTask {
            id: value.id,
            title: value.title.clone(),
        }
    }
}

/// DTO for a task returned by the API
#[derive(Deserialize)]
#[cfg_attr(test, derive(Serialize, Debug))]
pub struct TodoTask {
    pub id: u32,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TodoTask> for domain::todo::TodoTask {
    fn from(value: TodoTask) -> Self {
        domain::todo::TodoTask {
            id: value.id,
            title: value.title,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}
