/// Gives API adapters access to the HTTP client and the location of the task API, so
/// business logic never needs to know how requests leave the process
pub trait ExternalConnectivity {
    fn http_client(&self) -> &reqwest_middleware::ClientWithMiddleware;

    /// Builds the absolute URL for [path] on the task API
    fn api_url(&self, path: &str) -> String;
}
