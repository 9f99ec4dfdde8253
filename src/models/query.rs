//! Query-related data models.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// A positional parameter for parameterized queries.
///
/// Parameters are opaque to the gateway: they are deserialized from the
/// protocol's JSON representation and passed through to the driver in
/// order. The driver validates arity against the statement's placeholders.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum QueryParam {
    /// NULL value
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value (stored as i64 for maximum range)
    Int(i64),
    /// Floating point value
    Float(f64),
    /// String value
    String(String),
    /// Arrays and objects are bound as JSON
    Json(JsonValue),
}

impl QueryParam {
    /// Check if this parameter is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Get the type name of this parameter for debugging.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Json(_) => "json",
        }
    }
}

/// A SQL statement plus its ordered parameters.
///
/// Doubles as the input schema for the executeQuery tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct QueryRequest {
    /// SQL statement to execute. May be any statement the connected user is
    /// allowed to run, including mutating ones.
    pub statement: String,
    /// Positional parameters bound to ? placeholders, in order.
    #[serde(default)]
    pub params: Vec<QueryParam>,
}

/// The result of a statement execution.
///
/// `columns` holds the column names in the order the result set reported
/// them; it is empty when the statement produced no result set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<serde_json::Map<String, JsonValue>>,
}

impl QueryResult {
    /// Create an empty result (for statements without a result set).
    pub fn empty() -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Get the number of rows in the result.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check if the result carries no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_param_types() {
        assert!(QueryParam::Null.is_null());
        assert!(!QueryParam::Bool(true).is_null());
        assert_eq!(QueryParam::Int(42).type_name(), "int");
        assert_eq!(
            QueryParam::String("hello".to_string()).type_name(),
            "string"
        );
    }

    #[test]
    fn test_query_param_deserializes_from_plain_json() {
        let params: Vec<QueryParam> =
            serde_json::from_value(json!([null, true, 7, 2.5, "alice", [1, 2]])).unwrap();
        assert!(matches!(params[0], QueryParam::Null));
        assert!(matches!(params[1], QueryParam::Bool(true)));
        assert!(matches!(params[2], QueryParam::Int(7)));
        assert!(matches!(params[3], QueryParam::Float(f) if (f - 2.5).abs() < f64::EPSILON));
        assert!(matches!(params[4], QueryParam::String(ref s) if s == "alice"));
        assert!(matches!(params[5], QueryParam::Json(_)));
    }

    #[test]
    fn test_query_request_params_default_empty() {
        let req: QueryRequest =
            serde_json::from_value(json!({"statement": "SELECT 1"})).unwrap();
        assert!(req.params.is_empty());
    }

    #[test]
    fn test_query_result_empty() {
        let result = QueryResult::empty();
        assert!(result.is_empty());
        assert_eq!(result.row_count(), 0);
        assert!(result.columns.is_empty());
    }
}
