//! Record CRUD against an AppSheet table.
//!
//! Every operation posts one envelope to
//! `{base_url}/apps/{app_id}/tables/{table}/Action`:
//!
//! ```json
//! {"Action": "Find", "Properties": {"Locale": "en-US", "Selector": "..."}, "Rows": []}
//! ```

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::{
    config::{ClientConfig, Properties},
    expression::{QueryExpression, is_query_string_valid, serialize_query_expression},
    transport::{HttpHandler, ReqwestHandler, TransportError},
};

/// Table action named in the envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Action {
    Add,
    Find,
    Edit,
    Delete,
}

/// Request envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RequestBody {
    pub action: Action,
    pub properties: Properties,
    pub rows: Vec<Value>,
}

/// Selector for [`AppSheetClient::read_selected_rows`].
#[derive(Debug, Clone, PartialEq)]
pub enum Selector {
    /// Hand-written formula, sent as-is
    Raw(String),
    /// Compiled with [`serialize_query_expression`]
    Query(QueryExpression),
}

impl Selector {
    pub fn resolve(&self) -> String {
        match self {
            Selector::Raw(formula) => formula.clone(),
            Selector::Query(query) => serialize_query_expression(query),
        }
    }
}

impl From<&str> for Selector {
    fn from(formula: &str) -> Self {
        Selector::Raw(formula.to_string())
    }
}

impl From<String> for Selector {
    fn from(formula: String) -> Self {
        Selector::Raw(formula)
    }
}

impl From<QueryExpression> for Selector {
    fn from(query: QueryExpression) -> Self {
        Selector::Query(query)
    }
}

/// Errors that can occur during a client operation.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Selector brackets do not balance; nothing was sent
    #[error("Number of opened and closed parentheses does not match. Selector: {0}")]
    InvalidSelector(String),

    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Rows could not be converted to or from JSON
    #[error("row conversion failed: {0}")]
    Json(#[from] serde_json::Error),
}

pub struct AppSheetClient<H = ReqwestHandler> {
    config: ClientConfig,
    handler: H,
}

impl AppSheetClient<ReqwestHandler> {
    pub fn new(config: ClientConfig) -> Self {
        AppSheetClient::with_handler(config, ReqwestHandler::new())
    }
}

impl<H: HttpHandler> AppSheetClient<H> {
    pub fn with_handler(config: ClientConfig, handler: H) -> Self {
        AppSheetClient { config, handler }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Endpoint for `table`; the table name is percent-encoded.
    pub fn endpoint(&self, table: &str) -> String {
        format!(
            "{}/apps/{}/tables/{}/Action",
            self.config.base_url,
            self.config.app_id,
            urlencoding::encode(table)
        )
    }

    pub async fn add<R, T>(&self, table: &str, rows: &[R]) -> Result<Vec<T>, ClientError>
    where
        R: Serialize,
        T: DeserializeOwned,
    {
        let rows = to_rows(rows)?;
        self.make_request(table, Action::Add, Properties::default(), rows)
            .await
    }

    pub async fn delete<R, T>(&self, table: &str, rows: &[R]) -> Result<Vec<T>, ClientError>
    where
        R: Serialize,
        T: DeserializeOwned,
    {
        let rows = to_rows(rows)?;
        self.make_request(table, Action::Delete, Properties::default(), rows)
            .await
    }

    pub async fn read_all_rows<T>(&self, table: &str) -> Result<Vec<T>, ClientError>
    where
        T: DeserializeOwned,
    {
        self.make_request(table, Action::Find, Properties::default(), Vec::new())
            .await
    }

    /// Finds the rows whose key columns match `keys`.
    pub async fn read_by_keys<K, T>(&self, table: &str, keys: &[K]) -> Result<Vec<T>, ClientError>
    where
        K: Serialize,
        T: DeserializeOwned,
    {
        let keys = to_rows(keys)?;
        self.make_request(table, Action::Find, Properties::default(), keys)
            .await
    }

    /// Finds the rows picked by `selector`.
    ///
    /// The resolved selector must pass [`is_query_string_valid`]; otherwise
    /// [`ClientError::InvalidSelector`] is returned and no request is made.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use appsheet_client::{AppSheetClient, ClientConfig, QueryExpression};
    /// use serde_json::Value;
    ///
    /// # async fn run() -> Result<(), appsheet_client::ClientError> {
    /// let client = AppSheetClient::new(ClientConfig::new("app-id", "access-key"));
    /// let query = QueryExpression::filter("Products", "[Price] > 100");
    /// let rows: Vec<Value> = client.read_selected_rows("Products", query).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn read_selected_rows<T>(
        &self,
        table: &str,
        selector: impl Into<Selector>,
    ) -> Result<Vec<T>, ClientError>
    where
        T: DeserializeOwned,
    {
        let selector = selector.into().resolve();

        if !is_query_string_valid(&selector) {
            warn!(table, selector = %selector, "rejected selector with unbalanced brackets");
            return Err(ClientError::InvalidSelector(selector));
        }

        let properties = Properties {
            selector: Some(selector),
            ..Properties::default()
        };
        self.make_request(table, Action::Find, properties, Vec::new())
            .await
    }

    pub async fn update<R, T>(&self, table: &str, rows: &[R]) -> Result<Vec<T>, ClientError>
    where
        R: Serialize,
        T: DeserializeOwned,
    {
        let rows = to_rows(rows)?;
        self.make_request(table, Action::Edit, Properties::default(), rows)
            .await
    }

    #[instrument(skip(self, properties, rows), fields(app_id = %self.config.app_id))]
    async fn make_request<T>(
        &self,
        table: &str,
        action: Action,
        properties: Properties,
        rows: Vec<Value>,
    ) -> Result<Vec<T>, ClientError>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint(table);
        let body = RequestBody {
            action,
            properties: self.config.properties.merged(&properties),
            rows,
        };
        let payload = serde_json::to_value(&body)?;

        debug!("POST {}", url);
        debug!("BODY: {}", payload);

        let response = self
            .handler
            .post(&url, &self.config.access_key, &payload)
            .await?;

        Ok(serde_json::from_value(response)?)
    }
}

fn to_rows<R: Serialize>(rows: &[R]) -> Result<Vec<Value>, serde_json::Error> {
    rows.iter().map(serde_json::to_value).collect()
}
