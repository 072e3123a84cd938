//! # Query Composer
//!
//! Turns structured filter/sort/page options into a [`QueryPlan`]: a SQL string
//! plus the values bound to its placeholders.
//!
//! User-supplied values (space names, limits, offsets) are **always** bound as
//! parameters. The only identifiers spliced into the SQL text come from the
//! closed [`Column`] enum, so nothing a caller types ends up as raw SQL.
//!
//! ## Ordering rules
//!
//! Pinned notes always form one contiguous group:
//!
//! - no sort given: pinned first, then by id
//! - ascending sort: pinned first, each group ordered by the column ascending
//! - descending sort: pinned last, each group ordered by the column descending
//!
//! When the sort column is not `id`, `id` is appended in the same direction so
//! that repeated calls page through rows in a stable order.
//!
//! ## Space selection
//!
//! - explicit spaces: exactly those spaces, hidden or not
//! - no spaces, hidden excluded: every space not starting with `.`
//! - no spaces, hidden included: everything

use crate::error::{NoteError, Result};
use rusqlite::types::Value;
use std::fmt;
use std::str::FromStr;

pub(crate) const NOTE_COLUMNS: &str = "id, space, created, updated, content, pinned";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Id,
    Space,
    Content,
    Created,
    Updated,
}

impl Column {
    pub fn all() -> &'static [Column] {
        &[
            Column::Id,
            Column::Space,
            Column::Content,
            Column::Created,
            Column::Updated,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Column::Id => "id",
            Column::Space => "space",
            Column::Content => "content",
            Column::Created => "created",
            Column::Updated => "updated",
        }
    }

    fn as_sql(&self) -> &'static str {
        // Storage column names happen to match the public names.
        self.name()
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Column {
    type Err = NoteError;

    fn from_str(s: &str) -> Result<Self> {
        Column::all()
            .iter()
            .copied()
            .find(|c| c.name() == s)
            .ok_or_else(|| NoteError::InvalidSortColumn(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOpts {
    pub ascending: bool,
    pub column: Column,
}

impl SortOpts {
    pub fn new(column: Column, ascending: bool) -> Self {
        Self { ascending, column }
    }

    pub fn asc(column: Column) -> Self {
        Self::new(column, true)
    }

    pub fn desc(column: Column) -> Self {
        Self::new(column, false)
    }

    /// Builds sort options from a user-facing column name.
    pub fn parse(column: &str, ascending: bool) -> Result<Self> {
        Ok(Self::new(column.parse()?, ascending))
    }

    fn direction(&self) -> &'static str {
        if self.ascending {
            "ASC"
        } else {
            "DESC"
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageOpts {
    /// Zero means unbounded.
    pub limit: usize,
    pub offset: usize,
}

impl PageOpts {
    pub fn new(limit: usize, offset: usize) -> Self {
        Self { limit, offset }
    }

    pub fn check(&self) -> Result<()> {
        if self.limit == 0 && self.offset > 0 {
            return Err(NoteError::InvalidPage {
                limit: self.limit,
                offset: self.offset,
            });
        }
        Ok(())
    }

    pub fn is_unbounded(&self) -> bool {
        self.limit == 0
    }
}

/// Filter, order and window for a note selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteQuery {
    pub spaces: Vec<String>,
    pub include_hidden: bool,
    pub sort: Option<SortOpts>,
    pub page: Option<PageOpts>,
}

impl NoteQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_spaces<I, T>(mut self, spaces: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.spaces = spaces.into_iter().map(Into::into).collect();
        self
    }

    pub fn include_hidden(mut self, include: bool) -> Self {
        self.include_hidden = include;
        self
    }

    pub fn sorted(mut self, sort: SortOpts) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn paged(mut self, page: PageOpts) -> Self {
        self.page = Some(page);
        self
    }

    /// Pure option checks, run before the store is touched.
    pub fn check(&self) -> Result<()> {
        if let Some(page) = &self.page {
            page.check()?;
        }
        Ok(())
    }
}

/// SQL text plus positional parameter values.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPlan {
    pub sql: String,
    pub params: Vec<Value>,
}

pub fn compose(query: &NoteQuery) -> Result<QueryPlan> {
    query.check()?;

    let mut sql = format!("SELECT {NOTE_COLUMNS} FROM notes");
    let mut params = Vec::new();

    let spaces = unique_spaces(&query.spaces);
    if !spaces.is_empty() {
        let slots = vec!["?"; spaces.len()].join(", ");
        sql.push_str(&format!(" WHERE space IN ({slots})"));
        params.extend(spaces.into_iter().map(Value::Text));
    } else if !query.include_hidden {
        sql.push_str(&format!(" WHERE {}", visible_space_predicate()));
    }

    sql.push_str(&order_clause(query.sort.as_ref()));

    if let Some(page) = query.page.filter(|p| !p.is_unbounded()) {
        sql.push_str(" LIMIT ? OFFSET ?");
        params.push(Value::Integer(to_sql_int(page.limit)?));
        params.push(Value::Integer(to_sql_int(page.offset)?));
    }

    Ok(QueryPlan { sql, params })
}

/// Plan for the distinct space listing. Only `space` is a valid sort column.
pub fn compose_spaces(include_hidden: bool, sort: Option<&SortOpts>) -> Result<QueryPlan> {
    let direction = match sort {
        Some(s) if s.column != Column::Space => {
            return Err(NoteError::InvalidSortColumn(s.column.to_string()));
        }
        Some(s) => s.direction(),
        None => "ASC",
    };

    let mut sql = "SELECT DISTINCT space FROM notes".to_string();
    if !include_hidden {
        sql.push_str(&format!(" WHERE {}", visible_space_predicate()));
    }
    sql.push_str(&format!(" ORDER BY space {direction}"));

    Ok(QueryPlan {
        sql,
        params: Vec::new(),
    })
}

fn visible_space_predicate() -> &'static str {
    "substr(space, 1, 1) <> '.'"
}

fn order_clause(sort: Option<&SortOpts>) -> String {
    match sort {
        None => " ORDER BY pinned DESC, id ASC".to_string(),
        Some(sort) => {
            let dir = sort.direction();
            // Ascending puts the pinned group first, descending puts it last.
            let pinned_dir = if sort.ascending { "DESC" } else { "ASC" };
            let mut clause = format!(
                " ORDER BY pinned {pinned_dir}, {} {dir}",
                sort.column.as_sql()
            );
            if sort.column != Column::Id {
                clause.push_str(&format!(", id {dir}"));
            }
            clause
        }
    }
}

fn unique_spaces(spaces: &[String]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    spaces
        .iter()
        .filter(|s| seen.insert(s.as_str()))
        .cloned()
        .collect()
}

fn to_sql_int(n: usize) -> Result<i64> {
    i64::try_from(n).map_err(|_| NoteError::Argument(format!("value out of range: {n}")))
}
