use super::error::FilterError;
use super::operator::{Combinator, Operator};
use serde_json::{Map, Number, Value};
use std::fmt;
use tracing::trace;

/// Prefix reserved for bound parameters, which the translator refuses
pub const PARAMETER_PREFIX: &str = "_$";

/// Right-hand side of an equality clause (`{"field": literal}`)
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Text(String),
    Number(Number),
    Bool(bool),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Embedded quotes are not escaped.
            Literal::Text(s) => write!(f, "'{}'", s),
            Literal::Number(n) => write_number(f, n),
            Literal::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// Right-hand side of an operator record (`{"field": {"op": operand}}`)
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Value(Value),
    /// Decoded `between` pair
    Range { low: Value, high: Value },
}

/// A decoded where clause
///
/// Built once from the raw JSON by [`WhereClause::from_value`]; rendering is
/// an exhaustive match over the three shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum WhereClause {
    /// `{"field": "value"}`
    Equality { field: String, literal: Literal },
    /// `{"field": {"gt": 1}}`
    Condition {
        field: String,
        operator: Operator,
        operand: Operand,
    },
    /// `{"and": [left, right]}`
    Combination {
        combinator: Combinator,
        left: Box<WhereClause>,
        right: Box<WhereClause>,
    },
}

impl WhereClause {
    /// Decode and validate a where clause
    ///
    /// Checks run in a fixed order: missing clause, key count, blank key,
    /// null value, then the shape-specific rules. The first violation aborts
    /// the whole decode.
    pub fn from_value(value: &Value) -> Result<Self, FilterError> {
        let (key, value) = single_entry(value)?;

        match value {
            Value::Null => Err(FilterError::InvalidValue {
                field: key.to_string(),
                reason: "value is null".to_string(),
            }),
            Value::String(s) => {
                trace!(field = %key, "equality on string literal");
                if s.starts_with(PARAMETER_PREFIX) {
                    return Err(FilterError::ParameterNotSupported(s.clone()));
                }
                Ok(WhereClause::Equality {
                    field: key.to_string(),
                    literal: Literal::Text(s.clone()),
                })
            }
            Value::Number(n) => {
                trace!(field = %key, "equality on number literal");
                Ok(WhereClause::Equality {
                    field: key.to_string(),
                    literal: Literal::Number(n.clone()),
                })
            }
            Value::Bool(b) => {
                trace!(field = %key, "equality on boolean literal");
                Ok(WhereClause::Equality {
                    field: key.to_string(),
                    literal: Literal::Bool(*b),
                })
            }
            Value::Object(record) => parse_condition(key, record),
            Value::Array(items) => parse_combination(key, items),
        }
    }

    /// Field names referenced by this clause, in left-to-right order
    pub fn fields(&self) -> Vec<&str> {
        match self {
            WhereClause::Equality { field, .. } | WhereClause::Condition { field, .. } => {
                vec![field.as_str()]
            }
            WhereClause::Combination { left, right, .. } => {
                let mut fields = left.fields();
                fields.extend(right.fields());
                fields
            }
        }
    }

    /// Number of nested combination levels (0 for a single comparison)
    pub fn depth(&self) -> usize {
        match self {
            WhereClause::Equality { .. } | WhereClause::Condition { .. } => 0,
            WhereClause::Combination { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }
}

impl fmt::Display for WhereClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WhereClause::Equality { field, literal } => write!(f, "({}=={})", field, literal),
            WhereClause::Condition {
                field,
                operand: Operand::Range { low, high },
                ..
            } => {
                write!(f, "({}>=", field)?;
                write_raw(f, low)?;
                write!(f, " AND {}<=", field)?;
                write_raw(f, high)?;
                f.write_str(")")
            }
            WhereClause::Condition {
                field,
                operator,
                operand: Operand::Value(value),
            } => {
                // `between` always decodes to a range, so a token is present here.
                write!(f, "({}{}", field, operator.token().unwrap_or_default())?;
                write_raw(f, value)?;
                f.write_str(")")
            }
            WhereClause::Combination {
                combinator,
                left,
                right,
            } => write!(f, "({} {} {})", left, combinator.token(), right),
        }
    }
}

/// Extract the only key/value pair of a clause object
fn single_entry(value: &Value) -> Result<(&str, &Value), FilterError> {
    let record = match value {
        Value::Null => return Err(FilterError::MissingWhereClause),
        Value::Object(record) => record,
        // Scalars and arrays carry no keys.
        _ => return Err(FilterError::InvalidKeyCount(0)),
    };

    let mut entries = record.iter();
    let (key, inner) = match (entries.next(), entries.next()) {
        (Some(entry), None) => entry,
        _ => return Err(FilterError::InvalidKeyCount(record.len())),
    };

    if key.trim().is_empty() {
        return Err(FilterError::InvalidKey);
    }

    Ok((key.as_str(), inner))
}

fn parse_condition(field: &str, record: &Map<String, Value>) -> Result<WhereClause, FilterError> {
    let mut entries = record.iter();
    let (name, operand) = match (entries.next(), entries.next()) {
        (Some(entry), None) => entry,
        _ => {
            return Err(FilterError::InvalidOperatorShape {
                field: field.to_string(),
                count: record.len(),
            });
        }
    };

    let operator: Operator = name.parse()?;
    trace!(field = %field, operator = %operator, "operator condition");

    let operand = match operator {
        Operator::Between => {
            let (low, high) = serde_json::from_value::<(Value, Value)>(operand.clone()).map_err(
                |e| FilterError::InvalidValue {
                    field: field.to_string(),
                    reason: format!("between expects [low, high]: {}", e),
                },
            )?;
            Operand::Range { low, high }
        }
        _ => Operand::Value(operand.clone()),
    };

    Ok(WhereClause::Condition {
        field: field.to_string(),
        operator,
        operand,
    })
}

fn parse_combination(key: &str, items: &[Value]) -> Result<WhereClause, FilterError> {
    let combinator: Combinator = key.parse()?;
    trace!(combinator = %combinator, operands = items.len(), "combination");

    let [left, right] = items else {
        return Err(FilterError::WrongCombinationArity {
            combinator: key.to_string(),
            count: items.len(),
        });
    };

    let left = WhereClause::from_value(left)?;
    let right = WhereClause::from_value(right)?;

    Ok(WhereClause::Combination {
        combinator,
        left: Box::new(left),
        right: Box::new(right),
    })
}

/// Write an operator operand in its raw text form: strings unquoted, any
/// other value in its compact JSON spelling
fn write_raw(f: &mut fmt::Formatter<'_>, value: &Value) -> fmt::Result {
    match value {
        Value::String(s) => f.write_str(s),
        Value::Number(n) => write_number(f, n),
        other => write!(f, "{}", other),
    }
}

/// Write a number the way a JavaScript string concatenation would: whole
/// floats lose their fraction (`10.0` -> `10`, `1e2` -> `100`)
fn write_number(f: &mut fmt::Formatter<'_>, n: &Number) -> fmt::Result {
    match n.as_f64() {
        Some(x) if n.is_f64() && x.fract() == 0.0 && x.abs() < 1e21 => {
            // f64 Display prints whole values without a fraction; `-0` is `0`.
            write!(f, "{}", if x == 0.0 { 0.0 } else { x })
        }
        _ => write!(f, "{}", n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_equality() {
        let clause = WhereClause::from_value(&json!({"name": "bob"})).unwrap();
        assert_eq!(
            clause,
            WhereClause::Equality {
                field: "name".to_string(),
                literal: Literal::Text("bob".to_string()),
            }
        );
        assert_eq!(clause.to_string(), "(name=='bob')");
    }

    #[test]
    fn test_parse_condition() {
        let clause = WhereClause::from_value(&json!({"age": {"gte": 18}})).unwrap();
        match &clause {
            WhereClause::Condition {
                field,
                operator,
                operand,
            } => {
                assert_eq!(field, "age");
                assert_eq!(*operator, Operator::GreaterOrEqual);
                assert_eq!(*operand, Operand::Value(json!(18)));
            }
            other => panic!("expected condition, got {:?}", other),
        }
        assert_eq!(clause.to_string(), "(age>=18)");
    }

    #[test]
    fn test_parse_between_range() {
        let clause = WhereClause::from_value(&json!({"n": {"between": [1, 10]}})).unwrap();
        assert!(matches!(
            clause,
            WhereClause::Condition {
                operand: Operand::Range { .. },
                ..
            }
        ));
        assert_eq!(clause.to_string(), "(n>=1 AND n<=10)");
    }

    #[test]
    fn test_between_rejects_wrong_length() {
        let result = WhereClause::from_value(&json!({"n": {"between": [1, 2, 3]}}));
        assert!(matches!(result, Err(FilterError::InvalidValue { .. })));

        let result = WhereClause::from_value(&json!({"n": {"between": [1]}}));
        assert!(matches!(result, Err(FilterError::InvalidValue { .. })));
    }

    #[test]
    fn test_between_rejects_scalar_operand() {
        let result = WhereClause::from_value(&json!({"n": {"between": "[1, 10]"}}));
        assert!(matches!(result, Err(FilterError::InvalidValue { field, .. }) if field == "n"));
    }

    #[test]
    fn test_raw_operand_forms() {
        let clause = WhereClause::from_value(&json!({"f": {"neq": null}})).unwrap();
        assert_eq!(clause.to_string(), "(f!=null)");

        let clause = WhereClause::from_value(&json!({"f": {"=": true}})).unwrap();
        assert_eq!(clause.to_string(), "(f==true)");

        let clause = WhereClause::from_value(&json!({"f": {"lt": [1, 2]}})).unwrap();
        assert_eq!(clause.to_string(), "(f<[1,2])");
    }

    #[test]
    fn test_whole_floats_print_as_integers() {
        let clause = WhereClause::from_value(&json!({"f": 10.0})).unwrap();
        assert_eq!(clause.to_string(), "(f==10)");

        let clause = WhereClause::from_value(&json!({"f": {"lt": -0.0}})).unwrap();
        assert_eq!(clause.to_string(), "(f<0)");

        let clause = WhereClause::from_value(&json!({"f": {"gte": 2.5}})).unwrap();
        assert_eq!(clause.to_string(), "(f>=2.5)");
    }

    #[test]
    fn test_non_object_clause_has_no_keys() {
        assert!(matches!(
            WhereClause::from_value(&json!(5)),
            Err(FilterError::InvalidKeyCount(0))
        ));
        assert!(matches!(
            WhereClause::from_value(&json!([{"a": 1}])),
            Err(FilterError::InvalidKeyCount(0))
        ));
    }

    #[test]
    fn test_blank_key() {
        assert!(matches!(
            WhereClause::from_value(&json!({"": 1})),
            Err(FilterError::InvalidKey)
        ));
        assert!(matches!(
            WhereClause::from_value(&json!({"  \t": 1})),
            Err(FilterError::InvalidKey)
        ));
    }

    #[test]
    fn test_operator_record_shape() {
        assert!(matches!(
            WhereClause::from_value(&json!({"f": {}})),
            Err(FilterError::InvalidOperatorShape { count: 0, .. })
        ));
        assert!(matches!(
            WhereClause::from_value(&json!({"f": {"gt": 1, "lt": 5}})),
            Err(FilterError::InvalidOperatorShape { count: 2, .. })
        ));
    }

    #[test]
    fn test_fields_and_depth() {
        let clause = WhereClause::from_value(&json!({
            "and": [
                {"or": [{"f1": {"gt": 1}}, {"f2": 2}]},
                {"f3": "x"}
            ]
        }))
        .unwrap();
        assert_eq!(clause.fields(), vec!["f1", "f2", "f3"]);
        assert_eq!(clause.depth(), 2);

        let leaf = WhereClause::from_value(&json!({"f": 1})).unwrap();
        assert_eq!(leaf.depth(), 0);
    }

    #[test]
    fn test_nested_error_propagates() {
        let result = WhereClause::from_value(&json!({
            "or": [{"f1": 1}, {"and": [{"f2": "_$p"}, {"f3": 3}]}]
        }));
        assert!(matches!(result, Err(FilterError::ParameterNotSupported(p)) if p == "_$p"));
    }
}
