//! Practitioner record types.

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::store::{Row, Value};

/// A stored practitioner record.
///
/// Columns other than `id` are read as they are stored: a NULL column
/// serializes as JSON `null` instead of failing the whole read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Practitioner {
    /// Store-assigned identifier
    pub id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Birth date as stored, conventionally `YYYY-MM-DD`
    pub birth_date: Option<String>,
    pub city_of_birth: Option<String>,
    pub age: Option<i64>,
    pub weight: Option<f64>,
    pub height: Option<f64>,
    /// Reference to the practitioner's rank
    pub rank_id: Option<i64>,
    /// Reference to the practitioner's grade
    pub grade_id: Option<i64>,
}

impl Practitioner {
    /// Materialize a practitioner from a `practitioners` row.
    pub fn from_row(row: &Row) -> Result<Self, StoreError> {
        Ok(Self {
            id: row.get_i64("id")?,
            first_name: row.get_opt_string("first_name")?,
            last_name: row.get_opt_string("last_name")?,
            birth_date: row.get_opt_string("birth_date")?,
            city_of_birth: row.get_opt_string("city_of_birth")?,
            age: row.get_opt_i64("age")?,
            weight: row.get_opt_f64("weight")?,
            height: row.get_opt_f64("height")?,
            rank_id: row.get_opt_i64("rank_id")?,
            grade_id: row.get_opt_i64("grade_id")?,
        })
    }
}

/// The nine caller-supplied fields used by create and update.
///
/// Every field is required: updates always rewrite every column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PractitionerInput {
    pub first_name: String,
    pub last_name: String,
    pub birth_date: String,
    pub city_of_birth: String,
    pub age: i64,
    pub weight: f64,
    pub height: f64,
    pub rank_id: i64,
    pub grade_id: i64,
}

impl PractitionerInput {
    /// Column values in the order used by the insert and update statements.
    pub fn into_values(self) -> Vec<Value> {
        vec![
            Value::Text(self.first_name),
            Value::Text(self.last_name),
            Value::Text(self.birth_date),
            Value::Text(self.city_of_birth),
            Value::Integer(self.age),
            Value::Real(self.weight),
            Value::Real(self.height),
            Value::Integer(self.rank_id),
            Value::Integer(self.grade_id),
        ]
    }
}
