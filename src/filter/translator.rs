use super::error::FilterError;
use super::parser::WhereClause;
use serde_json::Value;
use std::fmt;
use tracing::{debug, trace};

/// A translated query: `SELECT <resource type> WHERE <predicate>`
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub resource_type: String,
    pub clause: WhereClause,
}

impl Query {
    /// Decode a filter object (`{"where": ...}`) for the given resource type
    pub fn from_filter(filter: &Value, resource_type: &str) -> Result<Self, FilterError> {
        let clause = filter.get("where").ok_or(FilterError::MissingWhereClause)?;
        Ok(Query {
            resource_type: resource_type.to_string(),
            clause: WhereClause::from_value(clause)?,
        })
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SELECT {} WHERE {}", self.resource_type, self.clause)
    }
}

/// Translate a filter object into a query string
///
/// ```
/// use serde_json::json;
/// use where_translator::filter::translate_filter;
///
/// let filter = json!({"where": {"or": [{"f1": {"gt": 1}}, {"f2": {"lte": 2}}]}});
/// let query = translate_filter(&filter, "org.example.Vehicle").unwrap();
/// assert_eq!(query, "SELECT org.example.Vehicle WHERE ((f1>1) OR (f2<=2))");
/// ```
pub fn translate_filter(filter: &Value, resource_type: &str) -> Result<String, FilterError> {
    trace!(resource_type, filter = %filter, "translating filter");
    let query = Query::from_filter(filter, resource_type)?.to_string();
    debug!(%query, "filter translated");
    Ok(query)
}

/// Translate a bare where clause into its predicate string
pub fn translate_where_clause(clause: &Value) -> Result<String, FilterError> {
    trace!(clause = %clause, "translating where clause");
    Ok(WhereClause::from_value(clause)?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_translate_filter_wraps_predicate() {
        let query = translate_filter(&json!({"where": {"f1": "v1"}}), "Asset").unwrap();
        assert_eq!(query, "SELECT Asset WHERE (f1=='v1')");
    }

    #[test]
    fn test_missing_where() {
        assert!(matches!(
            translate_filter(&json!({"limit": 10}), "Asset"),
            Err(FilterError::MissingWhereClause)
        ));
        assert!(matches!(
            translate_filter(&json!({"where": null}), "Asset"),
            Err(FilterError::MissingWhereClause)
        ));
        assert!(matches!(
            translate_filter(&json!("where"), "Asset"),
            Err(FilterError::MissingWhereClause)
        ));
    }

    #[test]
    fn test_query_keeps_resource_type() {
        let query = Query::from_filter(&json!({"where": {"f": 1}}), "Participant").unwrap();
        assert_eq!(query.resource_type, "Participant");
        assert_eq!(query.to_string(), "SELECT Participant WHERE (f==1)");
    }

    #[test]
    fn test_translate_where_clause() {
        let predicate = translate_where_clause(&json!({"f": {"neq": 4}})).unwrap();
        assert_eq!(predicate, "(f!=4)");
    }
}
