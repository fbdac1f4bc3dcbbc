use crate::domain::ui::driven_ports::{EditState, ErrorReporter, Navigator};
use crate::domain::{self, MutationOutcome, ui};
use crate::external_connections::ExternalConnectivity;
use derive_more::Display;
use std::fmt;
use tracing::{error, info};

/// Email/password pair submitted once for authentication and never stored
#[derive(Clone, PartialEq, Eq, Display)]
#[display("{email}")]
pub struct Credential {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

pub mod driven_ports {
    use super::*;
    use crate::domain::RequestError;

    /// Session endpoints of the task API
    pub trait AuthApi {
        async fn login(
            &self,
            credential: &Credential,
            ext_cxn: &impl ExternalConnectivity,
        ) -> Result<(), RequestError>;
        async fn signup(
            &self,
            credential: &Credential,
            ext_cxn: &impl ExternalConnectivity,
        ) -> Result<(), RequestError>;
        async fn logout(&self, ext_cxn: &impl ExternalConnectivity) -> Result<(), RequestError>;
    }
}

pub mod driving_ports {
    use super::*;

    pub trait AuthPort {
        /// Starts a session, then sends the user to the task view
        async fn login(
            &self,
            credential: &Credential,
            ext_cxn: &impl ExternalConnectivity,
            auth_api: &impl driven_ports::AuthApi,
            navigator: &impl Navigator,
            errors: &impl ErrorReporter,
        ) -> MutationOutcome<()>;
        /// Creates an account. Where the user goes next is up to the caller.
        async fn register(
            &self,
            credential: &Credential,
            ext_cxn: &impl ExternalConnectivity,
            auth_api: &impl driven_ports::AuthApi,
            errors: &impl ErrorReporter,
        ) -> MutationOutcome<()>;
        /// Ends the session, drops any in-progress edit, then returns to the root view
        async fn logout(
            &self,
            ext_cxn: &impl ExternalConnectivity,
            auth_api: &impl driven_ports::AuthApi,
            edit_state: &impl EditState,
            navigator: &impl Navigator,
            errors: &impl ErrorReporter,
        ) -> MutationOutcome<()>;
    }
}

pub struct AuthService;

impl driving_ports::AuthPort for AuthService {
    async fn login(
        &self,
        credential: &Credential,
        ext_cxn: &impl ExternalConnectivity,
        auth_api: &impl driven_ports::AuthApi,
        navigator: &impl Navigator,
        errors: &impl ErrorReporter,
    ) -> MutationOutcome<()> {
        info!("Logging in as {credential}");
        match auth_api.login(credential, ext_cxn).await {
            Ok(()) => {
                navigator.go_to(ui::TASKS_PATH);
                MutationOutcome::Succeeded(())
            }
            Err(err) => {
                error!("Login failed: {err}");
                domain::report_failure(err, errors)
            }
        }
    }

    async fn register(
        &self,
        credential: &Credential,
        ext_cxn: &impl ExternalConnectivity,
        auth_api: &impl driven_ports::AuthApi,
        errors: &impl ErrorReporter,
    ) -> MutationOutcome<()> {
        info!("Registering account for {credential}");
        match auth_api.signup(credential, ext_cxn).await {
            Ok(()) => MutationOutcome::Succeeded(()),
            Err(err) => {
                error!("Signup failed: {err}");
                domain::report_failure(err, errors)
            }
        }
    }

    async fn logout(
        &self,
        ext_cxn: &impl ExternalConnectivity,
        auth_api: &impl driven_ports::AuthApi,
        edit_state: &impl EditState,
        navigator: &impl Navigator,
        errors: &impl ErrorReporter,
    ) -> MutationOutcome<()> {
        info!("Logging out");
        match auth_api.logout(ext_cxn).await {
            Ok(()) => {
                edit_state.reset_edited_task();
                navigator.go_to(ui::ROOT_PATH);
                MutationOutcome::Succeeded(())
            }
            Err(err) => {
                error!("Logout failed: {err}");
                domain::report_failure(err, errors)
            }
        }
    }
}
