use crate::domain;
use crate::domain::RequestError;
use crate::domain::todo::driven_ports::TaskApi;
use crate::domain::todo::{NewTask, TodoTask, UpdateTask};
use crate::dto;
use crate::external_connections::ExternalConnectivity;
use anyhow::Context;

pub struct HttpTaskApi;

impl TaskApi for HttpTaskApi {
    async fn list_tasks(
        &self,
        ext_cxn: &impl ExternalConnectivity,
    ) -> Result<Vec<TodoTask>, RequestError> {
        let request = ext_cxn.http_client().get(ext_cxn.api_url("/tasks"));
        let response = super::send(request, "fetch the task list").await?;

        let tasks: Vec<TodoTask> = response
            .json::<Vec<dto::TodoTask>>()
            .await
            .context("trying to decode the task list")?
            .into_iter()
            .map(domain::todo::TodoTask::from)
            .collect();

        Ok(tasks)
    }

    async fn create_task(
        &self,
        task: &NewTask,
        ext_cxn: &impl ExternalConnectivity,
    ) -> Result<TodoTask, RequestError> {
        let request = ext_cxn
            .http_client()
            .post(ext_cxn.api_url("/tasks"))
            .json(&dto::NewTask::from(task));
        let response = super::send(request, "create a task").await?;

        let created = response
            .json::<dto::TodoTask>()
            .await
            .context("trying to decode the created task")?;

        Ok(created.into())
    }

    async fn update_task(
        &self,
        task: &UpdateTask,
        ext_cxn: &impl ExternalConnectivity,
    ) -> Result<TodoTask, RequestError> {
        let request = ext_cxn
            .http_client()
            .put(ext_cxn.api_url(&format!("/tasks/{}", task.id)))
            .json(&dto::UpdateTask::from(task));
        let response = super::send(request, "update a task").await?;

        let updated = response
            .json::<dto::TodoTask>()
            .await
            .context("trying to decode the updated task")?;

        Ok(updated.into())
    }

    async fn delete_task(
        &self,
        task_id: u32,
        ext_cxn: &impl ExternalConnectivity,
    ) -> Result<(), RequestError> {
        let request = ext_cxn
            .http_client()
            .delete(ext_cxn.api_url(&format!("/tasks/{task_id}")));
        super::send(request, "delete a task").await?;

        Ok(())
    }
}
