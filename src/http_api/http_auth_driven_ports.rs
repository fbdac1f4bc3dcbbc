use crate::domain::RequestError;
use crate::domain::auth::Credential;
use crate::domain::auth::driven_ports::AuthApi;
use crate::dto;
use crate::external_connections::ExternalConnectivity;

pub struct HttpAuthApi;

impl AuthApi for HttpAuthApi {
    async fn login(
        &self,
        credential: &Credential,
        ext_cxn: &impl ExternalConnectivity,
    ) -> Result<(), RequestError> {
        let request = ext_cxn
            .http_client()
            .post(ext_cxn.api_url("/login"))
            .json(&dto::Credential::from(credential));
        super::send(request, "log in").await?;

        Ok(())
    }

    async fn signup(
        &self,
        credential: &Credential,
        ext_cxn: &impl ExternalConnectivity,
    ) -> Result<(), RequestError> {
        let request = ext_cxn
            .http_client()
            .post(ext_cxn.api_url("/signup"))
            .json(&dto::Credential::from(credential));
        super::send(request, "sign up").await?;

        Ok(())
    }

    async fn logout(&self, ext_cxn: &impl ExternalConnectivity) -> Result<(), RequestError> {
        let request = ext_cxn.http_client().post(ext_cxn.api_url("/logout"));
        super::send(request, "log out").await?;

        Ok(())
    }
}
