use crate::domain;
use serde::Serialize;

/// DTO for the body of login and signup requests
#[derive(Serialize)]
#[cfg_attr(test, derive(serde::Deserialize, Debug))]
pub struct Credential {
    pub email: String,
    pub password: String,
}

impl From<&domain::auth::Credential> for Credential {
    fn from(value: &domain::auth::Credential) -> Self {
        Credential {
            email: value.email.clone(),
            password: value.password.clone(),
        }
    }
}
