pub mod client;
pub mod config;
pub mod expression;
pub mod transport;

#[cfg(feature = "cli")]
pub mod cli;

pub use client::{Action, AppSheetClient, ClientError, RequestBody, Selector};
pub use config::{ClientConfig, ConfigError, Properties};
pub use expression::{
    ConditionExpression, ExpressionError, Operands, QueryExpression, SelectRow, is_condition_expression,
    is_query_expression, is_query_string_valid, serialize_condition_expression,
    serialize_query_expression,
};
pub use transport::{HttpHandler, ReqwestHandler, TransportError};
