use futures::future::{self, Either, LocalBoxFuture};
use status_schema::RemoteConfig;
use std::future::Future;

pub const CONFIG_PATH: &str = "/api/v1/config";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// The request never produced a response (DNS, CORS, connection reset...).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(pub String);

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("config request failed: {0}")]
    Transport(#[from] TransportError),
    #[error("config request timed out")]
    Timeout,
    #[error("config response is not valid JSON: {0}")]
    Decode(String),
}

/// Issues the config request. Implementations must send cookies with it.
pub trait ConfigTransport {
    fn get<'a>(&'a self, url: &'a str) -> LocalBoxFuture<'a, Result<HttpResponse, TransportError>>;
}

pub fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

pub fn config_url(base_url: &str) -> String {
    join_url(base_url, CONFIG_PATH)
}

/// Any non-200 status means "use defaults"; only a 200 body is parsed.
pub fn interpret_response(response: &HttpResponse) -> Result<RemoteConfig, FetchError> {
    if response.status != 200 {
        tracing::debug!(
            status = response.status,
            "config endpoint answered non-200, using defaults"
        );
        return Ok(RemoteConfig::default());
    }
    serde_json::from_str(&response.body).map_err(|e| FetchError::Decode(e.to_string()))
}

/// Performs the single config request, racing it against `deadline`.
///
/// Pass `future::pending()` as the deadline to wait forever.
pub async fn fetch_config<T, D>(
    transport: &T,
    base_url: &str,
    deadline: D,
) -> Result<RemoteConfig, FetchError>
where
    T: ConfigTransport + ?Sized,
    D: Future<Output = ()>,
{
    let url = config_url(base_url);
    tracing::debug!(%url, "fetching remote config");

    let request = transport.get(&url);
    futures::pin_mut!(deadline);

    let outcome = match future::select(request, deadline).await {
        Either::Left((response, _)) => interpret_response(&response?),
        Either::Right(((), _)) => Err(FetchError::Timeout),
    };
    outcome
}
