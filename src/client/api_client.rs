use std::error::Error as StdError;
use std::future::Future;
use std::time::Duration;
use log::{debug, info, warn};
use reqwest::header::ACCEPT;
use reqwest::{Method, StatusCode, Url};
use serde::Serialize;
use crate::client::error::ApiClientError;
use crate::client::handler::{Discard, FnHandler, Json, JsonList, OptionalJson, RawResponse, ResponseHandler};
use crate::model::{Cashier, DatabaseStatus, HealthStatus, LoginRequest, Menu, MenuItem, NewUser, User};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const APPLICATION_JSON: &str = "application/json";

/// Talks to the POS server and turns every failure into an [`ApiClientError`].
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
}

impl ApiClient {
    /// `base_url` is the server root, e.g. `http://localhost:8080`. A trailing slash is ignored.
    pub fn new(base_url: &str) -> Result<Self, ApiClientError> {
        let base = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| ApiClientError::with_cause(format!("invalid server url {base_url}"), e))?;
        if base.cannot_be_a_base() {
            return Err(ApiClientError::new(format!("{base_url} cannot be used as server url")));
        }
        let http = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| ApiClientError::with_cause("failed to build http client", e))?;
        Ok(Self { http, base })
    }

    pub fn base_url(&self) -> &str {
        self.base.as_str().trim_end_matches('/')
    }

    /// Absolute url of `segments` under the base, each segment percent-encoded.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiClientError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ApiClientError::new(format!("{} cannot be used as server url", self.base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Run one I/O step, any failure becomes an [`ApiClientError`] labelled with `context`.
    pub async fn execute<T, E, F, Fut>(&self, context: &str, call: F) -> Result<T, ApiClientError>
    where
        F: FnOnce(reqwest::Client) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Into<Box<dyn StdError + Send + Sync + 'static>>,
    {
        call(self.http.clone()).await.map_err(|e| {
            let err = ApiClientError::with_cause(format!("I/O error during {context}"), e);
            warn!("{}", err);
            err
        })
    }

    /// Issue one request and let `handler` interpret the answer.
    pub async fn send<B, H>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&B>,
        handler: H,
    ) -> Result<H::Output, ApiClientError>
    where
        B: Serialize + ?Sized,
        H: ResponseHandler,
    {
        let url = self.endpoint(segments)?;
        let path = url.path().to_string();
        let context = format!("{} {}", method, path);
        let request_method = method.clone();
        let (status, text) = self
            .execute(&context, |http| async move {
                let mut req = http.request(request_method, url).header(ACCEPT, APPLICATION_JSON);
                if let Some(body) = body {
                    req = req.json(body);
                }
                let res = req.send().await?;
                let status = res.status();
                Ok::<_, reqwest::Error>((status, res.text().await?))
            })
            .await?;
        info!("{} -> HTTP {}", context, status.as_u16());
        debug!("response body: '{}'", text);
        handler.handle(RawResponse { method, path, status, body: text })
    }

    async fn get<H: ResponseHandler>(&self, segments: &[&str], handler: H) -> Result<H::Output, ApiClientError> {
        self.send(Method::GET, segments, None::<&()>, handler).await
    }

    // products

    pub async fn get_all<P: MenuItem>(&self) -> Result<Vec<P>, ApiClientError> {
        self.get(&["api", P::KIND.path()], JsonList::new()).await
    }

    /// `None` when the id does not exist
    pub async fn get_by_id<P: MenuItem>(&self, id: i64) -> Result<Option<P>, ApiClientError> {
        let id = id.to_string();
        self.get(&["api", P::KIND.path(), &id], OptionalJson::new()).await
    }

    pub async fn create<P: MenuItem>(&self, item: &P) -> Result<P, ApiClientError> {
        self.send(Method::POST, &["api", P::KIND.path()], Some(item), Json::new()).await
    }

    pub async fn update<P: MenuItem>(&self, id: i64, item: &P) -> Result<P, ApiClientError> {
        let id = id.to_string();
        self.send(Method::PUT, &["api", P::KIND.path(), &id], Some(item), Json::new()).await
    }

    pub async fn delete<P: MenuItem>(&self, id: i64) -> Result<(), ApiClientError> {
        let id = id.to_string();
        self.send(Method::DELETE, &["api", P::KIND.path(), &id], None::<&()>, Discard).await
    }

    pub async fn get_menu(&self) -> Result<Menu, ApiClientError> {
        self.get(&["api", "menu"], Json::new()).await
    }

    // cashiers

    pub async fn get_all_cashiers(&self) -> Result<Vec<Cashier>, ApiClientError> {
        self.get(&["api", "cashiers"], JsonList::new()).await
    }

    pub async fn get_cashier_by_id(&self, id: i64) -> Result<Option<Cashier>, ApiClientError> {
        let id = id.to_string();
        self.get(&["api", "cashiers", &id], OptionalJson::new()).await
    }

    pub async fn get_cashier_by_name(&self, name: &str) -> Result<Option<Cashier>, ApiClientError> {
        self.get(&["api", "cashiers", "name", name], OptionalJson::new()).await
    }

    pub async fn create_cashier(&self, cashier: &Cashier) -> Result<Cashier, ApiClientError> {
        self.send(Method::POST, &["api", "cashiers"], Some(cashier), Json::new()).await
    }

    pub async fn update_cashier(&self, id: i64, cashier: &Cashier) -> Result<Cashier, ApiClientError> {
        let id = id.to_string();
        self.send(Method::PUT, &["api", "cashiers", &id], Some(cashier), Json::new()).await
    }

    pub async fn delete_cashier(&self, id: i64) -> Result<(), ApiClientError> {
        let id = id.to_string();
        self.send(Method::DELETE, &["api", "cashiers", &id], None::<&()>, Discard).await
    }

    // users

    pub async fn get_all_users(&self) -> Result<Vec<User>, ApiClientError> {
        self.get(&["api", "users"], JsonList::new()).await
    }

    pub async fn create_user(&self, user: &NewUser) -> Result<User, ApiClientError> {
        self.send(Method::POST, &["api", "users"], Some(user), Json::new()).await
    }

    pub async fn delete_user(&self, id: i64) -> Result<(), ApiClientError> {
        let id = id.to_string();
        self.send(Method::DELETE, &["api", "users", &id], None::<&()>, Discard).await
    }

    /// Only a 200 counts as a successful login.
    pub async fn login(&self, username: &str, password: &str) -> Result<User, ApiClientError> {
        let request = LoginRequest { username: username.to_string(), password: password.to_string() };
        let handler = FnHandler(|response: RawResponse| -> Result<User, ApiClientError> {
            if response.status != StatusCode::OK {
                return Err(ApiClientError::from_status(
                    format!("Login failed with status: {} body: {}", response.status.as_u16(), response.body),
                    response.status,
                ));
            }
            response.decode()
        });
        self.send(Method::POST, &["api", "login"], Some(&request), handler).await
    }

    // status

    pub async fn health(&self) -> Result<HealthStatus, ApiClientError> {
        self.get(&["api", "health"], Json::new()).await
    }

    /// A database that is down still answers with a report.
    pub async fn db_check(&self) -> Result<DatabaseStatus, ApiClientError> {
        let handler = FnHandler(|response: RawResponse| -> Result<DatabaseStatus, ApiClientError> {
            if response.status != StatusCode::SERVICE_UNAVAILABLE {
                response.ensure_success()?;
            }
            response.decode()
        });
        self.get(&["api", "db-check"], handler).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_ignored() {
        let client = ApiClient::new("http://localhost:8080/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
        assert_eq!(
            client.endpoint(&["api", "drinks", "3"]).unwrap().as_str(),
            "http://localhost:8080/api/drinks/3"
        );
    }

    #[test]
    fn segments_are_encoded_and_prefix_kept() {
        let client = ApiClient::new("http://pos.local/restaurant").unwrap();
        let url = client.endpoint(&["api", "cashiers", "name", "Ana María/2"]).unwrap();
        assert_eq!(url.path(), "/restaurant/api/cashiers/name/Ana%20Mar%C3%ADa%2F2");
    }

    #[test]
    fn rejects_unusable_urls() {
        assert!(ApiClient::new("not a url").is_err());
        assert!(ApiClient::new("mailto:pos@example.com").is_err());
    }
}
