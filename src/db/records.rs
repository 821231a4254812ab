//! Generic select/insert/update/delete over the content tables.

use chrono::{SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::query::QueryAs;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::{FromRow, Pool, Sqlite};
use uuid::Uuid;

use crate::error::AppError;

/// A row of a content table.
pub trait Record:
    for<'r> FromRow<'r, SqliteRow> + Serialize + Clone + Send + Sync + Unpin + 'static
{
    const TABLE: &'static str;
    /// Default ordering of `select`.
    const ORDER_BY: &'static str;
    type Draft: Draft;

    fn id(&self) -> &str;
}

/// The editable fields of a [`Record`], as submitted by the admin forms.
pub trait Draft: DeserializeOwned + Send + Sync + 'static {
    /// Column names, in the order `bind` binds them.
    const COLUMNS: &'static [&'static str];

    fn validate(&self) -> Result<(), AppError>;

    fn bind<'q, O>(
        &self,
        query: QueryAs<'q, Sqlite, O, SqliteArguments<'q>>,
    ) -> QueryAs<'q, Sqlite, O, SqliteArguments<'q>>;
}

pub(crate) fn require(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    Ok(())
}

/// Server-assigned timestamp. Fixed width, so text order is time order.
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Integer(i64),
    Bool(bool),
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

/// Filter, order and limit of a `select`. Column names are checked against
/// the table before any SQL is built.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    filter: Option<(String, Value)>,
    order: Option<(String, bool)>,
    limit: Option<i64>,
}

impl Selection {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn eq(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.filter = Some((column.to_string(), value.into()));
        self
    }

    pub fn order_by(mut self, column: &str, descending: bool) -> Self {
        self.order = Some((column.to_string(), descending));
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }
}

fn check_column<T: Record>(column: &str) -> Result<(), AppError> {
    let known = ["id", "created_at", "updated_at"].contains(&column)
        || <T::Draft as Draft>::COLUMNS.contains(&column);
    if known {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "unknown column {} for {}",
            column,
            T::TABLE
        )))
    }
}

pub struct Repository;

impl Repository {
    pub async fn select<T: Record>(
        pool: &Pool<Sqlite>,
        selection: &Selection,
    ) -> Result<Vec<T>, AppError> {
        let mut sql = format!("SELECT * FROM {}", T::TABLE);

        if let Some((column, _)) = &selection.filter {
            check_column::<T>(column)?;
            sql.push_str(&format!(" WHERE {} = ?", column));
        }

        match &selection.order {
            Some((column, descending)) => {
                check_column::<T>(column)?;
                let direction = if *descending { "DESC" } else { "ASC" };
                sql.push_str(&format!(" ORDER BY {} {}, rowid ASC", column, direction));
            }
            None => sql.push_str(&format!(" ORDER BY {}", T::ORDER_BY)),
        }

        if selection.limit.is_some() {
            sql.push_str(" LIMIT ?");
        }

        let mut query = sqlx::query_as::<_, T>(&sql);
        if let Some((_, value)) = &selection.filter {
            query = match value {
                Value::Text(text) => query.bind(text.clone()),
                Value::Integer(number) => query.bind(*number),
                Value::Bool(flag) => query.bind(*flag),
            };
        }
        if let Some(limit) = selection.limit {
            query = query.bind(limit);
        }

        let rows = query.fetch_all(pool).await?;
        Ok(rows)
    }

    /// Insert a row; the returned record carries the new id and timestamps.
    pub async fn insert<T: Record>(pool: &Pool<Sqlite>, draft: &T::Draft) -> Result<T, AppError> {
        draft.validate()?;

        let columns = <T::Draft as Draft>::COLUMNS;
        let sql = format!(
            "INSERT INTO {} (id, {}, created_at, updated_at) VALUES (?, {}, ?, ?) RETURNING *",
            T::TABLE,
            columns.join(", "),
            vec!["?"; columns.len()].join(", "),
        );

        let id = Uuid::new_v4().to_string();
        let now = timestamp();

        let query = sqlx::query_as::<_, T>(&sql).bind(id);
        let record = draft
            .bind(query)
            .bind(now.clone())
            .bind(now)
            .fetch_one(pool)
            .await?;

        Ok(record)
    }

    /// Replace every editable field of row `id`.
    pub async fn update<T: Record>(
        pool: &Pool<Sqlite>,
        id: &str,
        draft: &T::Draft,
    ) -> Result<T, AppError> {
        draft.validate()?;

        let assignments: Vec<String> = <T::Draft as Draft>::COLUMNS
            .iter()
            .map(|column| format!("{} = ?", column))
            .collect();
        let sql = format!(
            "UPDATE {} SET {}, updated_at = ? WHERE id = ? RETURNING *",
            T::TABLE,
            assignments.join(", "),
        );

        let query = sqlx::query_as::<_, T>(&sql);
        draft
            .bind(query)
            .bind(timestamp())
            .bind(id.to_string())
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("{} {}", T::TABLE, id)))
    }

    pub async fn delete<T: Record>(pool: &Pool<Sqlite>, id: &str) -> Result<(), AppError> {
        let sql = format!("DELETE FROM {} WHERE id = ?", T::TABLE);
        let result = sqlx::query(&sql).bind(id).execute(pool).await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("{} {}", T::TABLE, id)));
        }
        Ok(())
    }
}
