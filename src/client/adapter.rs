use reqwest::{
    Client, Method,
    header::{ACCEPT, CONTENT_TYPE},
};
use serde::Serialize;
use serde_json::Value;

use crate::{
    config::ApiConfig,
    resources::{Resource, ResourceDescriptor},
    status::StatusChannel,
};

use super::{ClientError, Filter, ResponseOutcome};

const APPLICATION_JSON: &str = "application/json";
const PREFER_REPRESENTATION: &str = "return=representation";

const LOADING_MESSAGE: &str = "Loading data...";
const LOADED_MESSAGE: &str = "Data loaded successfully!";
const SAVING_MESSAGE: &str = "Saving changes...";
const DELETING_MESSAGE: &str = "Deleting record...";
const WRITE_DONE_MESSAGE: &str = "Operation completed successfully";

/// One adapter for every resource. Reads degrade to an empty list, writes
/// hand their failure back to the caller; both report through the status
/// channel.
#[derive(Clone)]
pub struct RestClient {
    http: Client,
    base_url: String,
    prefer_representation: bool,
    status: StatusChannel,
}

impl RestClient {
    pub fn new(api: &ApiConfig, status: StatusChannel) -> Self {
        Self {
            http: Client::new(),
            base_url: api.base_url.trim().trim_end_matches('/').to_string(),
            prefer_representation: api.prefer_representation,
            status,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn status(&self) -> &StatusChannel {
        &self.status
    }

    /// Same REST layer, but notifications go nowhere. For re-rendering rows
    /// without announcing a reload.
    pub fn quiet(&self) -> Self {
        Self {
            status: StatusChannel::new(std::time::Duration::from_secs(1)),
            ..self.clone()
        }
    }

    pub fn url_for(&self, descriptor: &ResourceDescriptor, filter: Option<&Filter>) -> String {
        match filter {
            Some(filter) => format!("{}{}?{}", self.base_url, descriptor.path, filter.to_query()),
            None => format!("{}{}", self.base_url, descriptor.path),
        }
    }

    /// Records in the order the REST layer returned them; empty on any
    /// failure.
    pub async fn list<R: Resource>(&self, filter: Option<&Filter>) -> Vec<R> {
        self.try_list(filter).await.unwrap_or_default()
    }

    pub async fn try_list<R: Resource>(&self, filter: Option<&Filter>) -> Result<Vec<R>, ClientError> {
        let descriptor = R::descriptor();
        let url = self.url_for(descriptor, filter);

        self.status.loading(LOADING_MESSAGE);
        tracing::debug!(%url, "fetching records");

        let result = self.fetch_rows::<R>(&url).await;
        match &result {
            Ok(rows) => {
                tracing::info!(resource = descriptor.slug, count = rows.len(), "records loaded");
                self.status.success(LOADED_MESSAGE);
            }
            Err(err) => {
                tracing::warn!(%url, error = %err, "fetch failed");
                self.status.error(format!("Error loading data: {err}"));
            }
        }
        result
    }

    /// Case-insensitive substring search on the resource's search column.
    /// A blank term, or a resource without one, lists everything.
    pub async fn search<R: Resource>(&self, term: &str) -> Vec<R> {
        let filter = R::descriptor()
            .search_field
            .and_then(|column| Filter::contains(column, term));
        self.list(filter.as_ref()).await
    }

    pub async fn find<R: Resource>(&self, key: i64) -> Option<R> {
        let column = R::descriptor().key_field?;
        self.list::<R>(Some(&Filter::eq(column, key)))
            .await
            .into_iter()
            .next()
    }

    pub async fn create<R, P>(&self, payload: &P) -> Result<(), ClientError>
    where
        R: Resource,
        P: Serialize + ?Sized + Sync,
    {
        let url = self.url_for(R::descriptor(), None);
        self.write(Method::POST, &url, Some(payload), SAVING_MESSAGE)
            .await
    }

    /// Only the fields present in `payload` change.
    pub async fn update<R, P>(&self, key: i64, payload: &P) -> Result<(), ClientError>
    where
        R: Resource,
        P: Serialize + ?Sized + Sync,
    {
        let url = self.key_url::<R>(key, "updated")?;
        self.write(Method::PATCH, &url, Some(payload), SAVING_MESSAGE)
            .await
    }

    pub async fn delete<R: Resource>(&self, key: i64) -> Result<(), ClientError> {
        let url = self.key_url::<R>(key, "deleted")?;
        self.write::<()>(Method::DELETE, &url, None, DELETING_MESSAGE)
            .await
    }

    fn key_url<R: Resource>(&self, key: i64, action: &'static str) -> Result<String, ClientError> {
        let descriptor = R::descriptor();
        let Some(column) = descriptor.key_field else {
            let err = ClientError::Unsupported {
                resource: descriptor.singular,
                action,
            };
            self.status.error(format!("Error: {err}"));
            return Err(err);
        };
        Ok(self.url_for(descriptor, Some(&Filter::eq(column, key))))
    }

    async fn fetch_rows<R: Resource>(&self, url: &str) -> Result<Vec<R>, ClientError> {
        let response = self
            .http
            .get(url)
            .header(ACCEPT, APPLICATION_JSON)
            .send()
            .await
            .map_err(|err| ClientError::transport(url, err))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| ClientError::transport(url, err))?;

        let value = ResponseOutcome::for_read(url, status, &body)
            .into_result()?
            .unwrap_or(Value::Null);
        serde_json::from_value(value).map_err(|err| ClientError::parse(url, err))
    }

    async fn write<P>(
        &self,
        method: Method,
        url: &str,
        payload: Option<&P>,
        pending_message: &str,
    ) -> Result<(), ClientError>
    where
        P: Serialize + ?Sized + Sync,
    {
        self.status.loading(pending_message);
        tracing::info!(%method, %url, "sending write");

        let result = self.send_write(method.clone(), url, payload).await;
        match &result {
            Ok(()) => self.status.success(WRITE_DONE_MESSAGE),
            Err(err) => {
                tracing::warn!(%method, %url, error = %err, "write failed");
                self.status.error(format!("Error: {err}"));
            }
        }
        result
    }

    async fn send_write<P>(
        &self,
        method: Method,
        url: &str,
        payload: Option<&P>,
    ) -> Result<(), ClientError>
    where
        P: Serialize + ?Sized + Sync,
    {
        let mut request = self
            .http
            .request(method.clone(), url)
            .header(CONTENT_TYPE, APPLICATION_JSON)
            .header(ACCEPT, APPLICATION_JSON);

        if let Some(payload) = payload {
            request = request.json(payload);
            if self.prefer_representation {
                request = request.header("Prefer", PREFER_REPRESENTATION);
            }
        }

        let response = request
            .send()
            .await
            .map_err(|err| ClientError::transport(url, err))?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let body = response
            .text()
            .await
            .map_err(|err| ClientError::transport(url, err))?;

        match ResponseOutcome::for_write(status, content_type.as_deref(), &body) {
            ResponseOutcome::Success(body) => {
                tracing::debug!(%method, %url, %status, has_body = body.is_some(), "write accepted");
                Ok(())
            }
            ResponseOutcome::Failure(err) => Err(err),
        }
    }
}
