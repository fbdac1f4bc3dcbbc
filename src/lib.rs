//! Client for the task API: session handling, task mutations that keep a locally cached
//! task list in step with the server, and the read query that fills that cache.

pub mod app_env;
pub mod domain;
pub mod dto;
pub mod external_connections;
pub mod http_api;
pub mod logging;
pub mod query_cache;
pub mod ui_state;
