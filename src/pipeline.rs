//! Filter and rank stages. Each stage borrows its input and returns a new list.

use std::str::FromStr;

use crate::error::AppError;
use crate::models::posting::{RawPosting, salary_currency};
use crate::models::vacancy::{SALARY_CURRENCY, Vacancy};

/// Keep only postings paid in roubles.
pub fn currency_gate(postings: &[RawPosting]) -> Vec<RawPosting> {
    postings
        .iter()
        .filter(|p| salary_currency(p) == Some(SALARY_CURRENCY))
        .cloned()
        .collect()
}

/// Keep vacancies whose name contains at least one keyword, ignoring case.
/// No keywords means no matches.
pub fn keyword_filter<S: AsRef<str>>(vacancies: &[Vacancy], keywords: &[S]) -> Vec<Vacancy> {
    let keywords: Vec<String> = keywords
        .iter()
        .map(|k| k.as_ref().to_lowercase())
        .collect();

    vacancies
        .iter()
        .filter(|v| {
            let name = v.name.to_lowercase();
            keywords.iter().any(|k| name.contains(k.as_str()))
        })
        .cloned()
        .collect()
}

/// Inclusive salary bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SalaryRange {
    pub lo: i64,
    pub hi: i64,
}

impl SalaryRange {
    /// Parse both bounds, failing with [`AppError::Parameter`] on non-integers.
    pub fn from_bounds(lo: &str, hi: &str) -> Result<Self, AppError> {
        Ok(Self {
            lo: parse_bound(lo)?,
            hi: parse_bound(hi)?,
        })
    }

    pub fn contains(&self, salary: u64) -> bool {
        i64::try_from(salary).is_ok_and(|s| self.lo <= s && s <= self.hi)
    }
}

/// Parses `"<lo>-<hi>"`, e.g. `"100000-200000"`.
impl FromStr for SalaryRange {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('-').collect();
        match parts.as_slice() {
            [lo, hi] => Self::from_bounds(lo, hi),
            _ => Err(AppError::Parameter(format!(
                "salary range '{s}' must look like <from>-<to>"
            ))),
        }
    }
}

fn parse_bound(raw: &str) -> Result<i64, AppError> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::Parameter(format!("'{raw}' is not an integer salary")))
}

pub fn salary_range_filter(vacancies: &[Vacancy], range: SalaryRange) -> Vec<Vacancy> {
    vacancies
        .iter()
        .filter(|v| range.contains(v.salary))
        .cloned()
        .collect()
}

/// Highest salary first. Equal salaries keep their input order.
pub fn sort_descending(vacancies: &[Vacancy]) -> Vec<Vacancy> {
    let mut sorted = vacancies.to_vec();
    sorted.sort_by(|a, b| b.cmp_salary(a));
    sorted
}

pub fn top_n(vacancies: &[Vacancy], n: usize) -> Vec<Vacancy> {
    let mut sorted = sort_descending(vacancies);
    sorted.truncate(n);
    sorted
}
