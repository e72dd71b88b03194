use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::AppError;
use crate::models::posting::RawPosting;

/// Currency every stored salary is denominated in.
pub const SALARY_CURRENCY: &str = "RUR";

/// A normalized vacancy. `alternate_url` is the dedup key across every store file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vacancy {
    pub name: String,
    pub salary: u64,
    pub alternate_url: String,
    #[serde(deserialize_with = "nullable_text")]
    pub employer: String,
    #[serde(deserialize_with = "nullable_text")]
    pub snippet: String,
    #[serde(deserialize_with = "nullable_text")]
    pub experience: String,
    #[serde(deserialize_with = "nullable_text")]
    pub employment: String,
}

impl Vacancy {
    /// Build a vacancy from one raw posting, deriving the average salary.
    ///
    /// Fails with [`AppError::Shape`] when `name` or `alternate_url` is not
    /// text, or when one of the nested `employer.name`, `snippet.requirement`,
    /// `experience.name`, `employment.name` fields is missing.
    pub fn from_posting(raw: &RawPosting) -> Result<Vacancy, AppError> {
        Ok(Vacancy {
            name: text_at(raw, &["name"], Null::Reject)?,
            salary: average_salary(raw.get("salary")),
            alternate_url: text_at(raw, &["alternate_url"], Null::Reject)?,
            employer: text_at(raw, &["employer", "name"], Null::Empty)?,
            snippet: text_at(raw, &["snippet", "requirement"], Null::Empty)?,
            experience: text_at(raw, &["experience", "name"], Null::Empty)?,
            employment: text_at(raw, &["employment", "name"], Null::Empty)?,
        })
    }

    /// Compare by salary alone, lowest first.
    pub fn cmp_salary(&self, other: &Vacancy) -> Ordering {
        self.salary.cmp(&other.salary)
    }
}

/// Normalize every posting, failing the whole batch on the first malformed one.
pub fn normalize_all(postings: &[RawPosting]) -> Result<Vec<Vacancy>, AppError> {
    postings.iter().map(Vacancy::from_posting).collect()
}

/// A salary bound as the API reports it.
enum Bound {
    Int(i64),
    Missing,
    Other,
}

fn bound(salary: &Value, key: &str) -> Bound {
    match salary.get(key) {
        None | Some(Value::Null) => Bound::Missing,
        Some(v) => v.as_i64().map_or(Bound::Other, Bound::Int),
    }
}

/// Mean of `from`/`to` truncated toward zero, or whichever bound is present.
/// Anything else (no bounds, non-integer bounds, no salary object) yields 0.
fn average_salary(salary: Option<&Value>) -> u64 {
    let Some(salary) = salary else {
        return 0;
    };

    let value = match (bound(salary, "from"), bound(salary, "to")) {
        (Bound::Int(from), Bound::Int(to)) => (i128::from(from) + i128::from(to)) / 2,
        (Bound::Int(from), Bound::Missing) => i128::from(from),
        (Bound::Missing, Bound::Int(to)) => i128::from(to),
        _ => 0,
    };

    u64::try_from(value.max(0)).unwrap_or(u64::MAX)
}

/// How a present JSON `null` is read.
#[derive(Clone, Copy)]
enum Null {
    Empty,
    Reject,
}

/// Walk `path` and return the text at its end. A missing key or non-text
/// value is a shape error.
fn text_at(raw: &Value, path: &[&str], null: Null) -> Result<String, AppError> {
    let mut current = raw;
    for key in path {
        current = current
            .get(key)
            .ok_or_else(|| AppError::shape(path.join(".")))?;
    }

    match current {
        Value::String(s) => Ok(s.clone()),
        Value::Null if matches!(null, Null::Empty) => Ok(String::new()),
        _ => Err(AppError::shape(path.join("."))),
    }
}

fn nullable_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl fmt::Display for Vacancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines = [
            ("Vacancy", self.name.clone()),
            ("Salary", format!("{} {SALARY_CURRENCY}", self.salary)),
            ("URL", self.alternate_url.clone()),
            ("Employer", self.employer.clone()),
            ("Requirements", self.snippet.clone()),
            ("Experience", self.experience.clone()),
            ("Employment", self.employment.clone()),
        ];
        for (label, value) in lines {
            writeln!(f, "{label:<20}----- {value}")?;
        }
        writeln!(f, "{}", "-".repeat(44))
    }
}
