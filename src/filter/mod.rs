//! Where-filter translation
//!
//! This module turns an ORM-style JSON filter into a predicate string for the
//! downstream query language.
//!
//! # Syntax
//!
//! ```text
//! {"where": CLAUSE}
//!
//! CLAUSE := {"field": literal}                 (field=='text') / (field==1)
//!         | {"field": {"op": operand}}         (field<token>operand)
//!         | {"and" | "or": [CLAUSE, CLAUSE]}   (left AND right)
//! ```
//!
//! # Operators
//!
//! - `=` → `==`, `neq` → `!=`
//! - `gt` → `>`, `gte` → `>=`, `lt` → `<`, `lte` → `<=`
//! - `between` with `[low, high]` → `(field>=low AND field<=high)`
//!
//! String literals are single-quoted only in the plain equality form; operator
//! operands are written as-is. Quotes inside strings are not escaped. Strings
//! starting with `_$` are bound parameters and are rejected.
//!
//! # Examples
//!
//! ```text
//! {"where": {"f1": "v1"}}                                -> (f1=='v1')
//! {"where": {"f1": {"between": [1, 10]}}}                -> (f1>=1 AND f1<=10)
//! {"where": {"or": [{"f1": {"gt": 1}}, {"f2": {"lte": 2}}]}} -> ((f1>1) OR (f2<=2))
//! ```

pub mod error;
pub mod operator;
pub mod parser;
pub mod translator;

pub use error::FilterError;
pub use operator::{Combinator, Operator};
pub use parser::{Literal, Operand, PARAMETER_PREFIX, WhereClause};
pub use translator::{Query, translate_filter, translate_where_clause};
