use super::error::FilterError;
use std::fmt;
use std::str::FromStr;

/// Comparison operators accepted inside an operator record (`{"field": {"gt": 1}}`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// `=`
    Equal,
    /// `gt`
    GreaterThan,
    /// `gte`
    GreaterOrEqual,
    /// `lt`
    LessThan,
    /// `lte`
    LessOrEqual,
    /// `between`, expanded into a `>=`/`<=` pair
    Between,
    /// `neq`
    NotEqual,
}

impl Operator {
    pub const ALL: [Operator; 7] = [
        Operator::Equal,
        Operator::GreaterThan,
        Operator::GreaterOrEqual,
        Operator::LessThan,
        Operator::LessOrEqual,
        Operator::Between,
        Operator::NotEqual,
    ];

    /// The name used for this operator in filter objects
    pub fn name(&self) -> &'static str {
        match self {
            Operator::Equal => "=",
            Operator::GreaterThan => "gt",
            Operator::GreaterOrEqual => "gte",
            Operator::LessThan => "lt",
            Operator::LessOrEqual => "lte",
            Operator::Between => "between",
            Operator::NotEqual => "neq",
        }
    }

    /// The token emitted into the predicate string
    ///
    /// `None` for `between`, which renders as `field>=low AND field<=high`.
    pub fn token(&self) -> Option<&'static str> {
        match self {
            Operator::Equal => Some("=="),
            Operator::GreaterThan => Some(">"),
            Operator::GreaterOrEqual => Some(">="),
            Operator::LessThan => Some("<"),
            Operator::LessOrEqual => Some("<="),
            Operator::Between => None,
            Operator::NotEqual => Some("!="),
        }
    }
}

impl FromStr for Operator {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operator::ALL
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| FilterError::UnsupportedOperator(s.to_string()))
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Logical operators joining exactly two sub-clauses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    And,
    Or,
}

impl Combinator {
    pub const ALL: [Combinator; 2] = [Combinator::And, Combinator::Or];

    pub fn name(&self) -> &'static str {
        match self {
            Combinator::And => "and",
            Combinator::Or => "or",
        }
    }

    pub fn token(&self) -> &'static str {
        match self {
            Combinator::And => "AND",
            Combinator::Or => "OR",
        }
    }
}

impl FromStr for Combinator {
    type Err = FilterError;

    // Case-sensitive: `AND` is a field name, not a combinator.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "and" => Ok(Combinator::And),
            "or" => Ok(Combinator::Or),
            _ => Err(FilterError::UnsupportedCombinationOperator(s.to_string())),
        }
    }
}

impl fmt::Display for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
