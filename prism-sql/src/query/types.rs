//! Statement types handed over by the SQL front end
//!
//! A [`Query`] is read-only input to the translator. The order of
//! `dimensions` decides bucket nesting depth and the order of `fields` decides
//! metric sibling order, so both are kept exactly as given.

use crate::query::expr::Expr;
use serde::{Deserialize, Serialize};

/// A parsed `SELECT ... WHERE ... GROUP BY ... ORDER BY ... LIMIT ... OFFSET ...`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Query {
    /// Starting offset (`from`)
    #[serde(default)]
    pub offset: usize,

    /// Maximum number of hits (`size`)
    #[serde(default)]
    pub limit: usize,

    /// `ORDER BY` clauses
    #[serde(default, alias = "sort")]
    pub sort_fields: Vec<SortField>,

    /// `WHERE` predicate
    #[serde(default, alias = "condition", alias = "filter")]
    pub filter_condition: Option<Expr>,

    /// `GROUP BY` expressions
    #[serde(default, alias = "group_by")]
    pub dimensions: Vec<Expr>,

    /// Projection list
    #[serde(default, alias = "select")]
    pub fields: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SortField {
    pub name: String,
    #[serde(default = "default_true")]
    pub ascending: bool,
}

fn default_true() -> bool {
    true
}

impl SortField {
    pub fn asc(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ascending: true,
        }
    }

    pub fn desc(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ascending: false,
        }
    }

    /// Engine sort order keyword
    pub fn order(&self) -> &'static str {
        if self.ascending {
            "asc"
        } else {
            "desc"
        }
    }
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Append an `ORDER BY` clause
    pub fn sort_by(mut self, field: SortField) -> Self {
        self.sort_fields.push(field);
        self
    }

    /// Set the `WHERE` predicate, replacing any previous one
    pub fn filter(mut self, condition: Expr) -> Self {
        self.filter_condition = Some(condition);
        self
    }

    /// Append a grouping dimension
    pub fn group_by(mut self, dimension: Expr) -> Self {
        self.dimensions.push(dimension);
        self
    }

    /// Append a projected field
    pub fn select(mut self, field: Expr) -> Self {
        self.fields.push(field);
        self
    }
}
