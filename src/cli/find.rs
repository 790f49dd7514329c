//! Run a Find request against a table

use serde_json::Value;

use super::{CliError, ParsedExpression, parse_expression};
use crate::{AppSheetClient, ClientConfig, HttpHandler, QueryExpression, SelectRow, Selector};

/// Options for the find command
#[derive(Debug, Clone, Default)]
pub struct FindOptions {
    pub table: String,
    /// Hand-written selector formula
    pub selector: Option<String>,
    /// JSON query expression; a bare condition becomes `FILTER(table, ...)`
    pub query: Option<String>,
}

impl FindOptions {
    fn selector(&self) -> Result<Option<Selector>, CliError> {
        match (&self.selector, &self.query) {
            (Some(_), Some(_)) => Err(CliError::ConflictingSelectors),
            (Some(formula), None) => Ok(Some(Selector::Raw(formula.clone()))),
            (None, Some(json)) => {
                let query = match parse_expression(json)? {
                    ParsedExpression::Query(query) => query,
                    ParsedExpression::Condition(condition) => QueryExpression::Filter {
                        dataset: self.table.clone(),
                        select_row: SelectRow::Condition(condition),
                    },
                };
                Ok(Some(Selector::Query(query)))
            }
            (None, None) => Ok(None),
        }
    }
}

/// Build a client from the environment and run the request
pub async fn execute_find(options: &FindOptions) -> Result<Vec<Value>, CliError> {
    let client = AppSheetClient::new(ClientConfig::from_env()?);
    execute_find_with(&client, options).await
}

/// Run the request through an existing client
pub async fn execute_find_with<H: HttpHandler>(
    client: &AppSheetClient<H>,
    options: &FindOptions,
) -> Result<Vec<Value>, CliError> {
    let rows = match options.selector()? {
        Some(selector) => client.read_selected_rows(&options.table, selector).await?,
        None => client.read_all_rows(&options.table).await?,
    };
    Ok(rows)
}
