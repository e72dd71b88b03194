use std::io::{BufRead, Write};

use crate::collectors::{self, VacancySource};
use crate::error::AppError;
use crate::models::vacancy::{Vacancy, normalize_all};
use crate::pipeline::{self, SalaryRange};
use crate::store::VacancyStore;

/// Destination files for each stage of a search session.
pub struct Stores<'a> {
    pub all: &'a dyn VacancyStore,
    pub filtered: &'a dyn VacancyStore,
    pub by_salary: &'a dyn VacancyStore,
}

/// Run one search session: fetch, gate, normalize, filter by keywords and
/// salary, then print the top vacancies. Returns the printed vacancies.
///
/// A failed connectivity probe continues with no vacancies; transport, shape
/// and parameter errors end the session.
pub async fn run<R: BufRead, W: Write>(
    source: &dyn VacancySource,
    stores: &Stores<'_>,
    input: &mut R,
    out: &mut W,
) -> Result<Vec<Vacancy>, AppError> {
    writeln!(out, "Vacancy search on hh.ru")?;
    let keyword = prompt(input, out, "Which vacancy are you looking for?: ")?;

    let postings = match collectors::fetch(source, &keyword).await {
        Ok(postings) => postings,
        Err(AppError::Connectivity { .. }) => {
            writeln!(out, "Failed to load vacancies.")?;
            Vec::new()
        }
        Err(e) => return Err(e),
    };

    writeln!(out, "Selecting vacancies paid in roubles...")?;
    let rur = pipeline::currency_gate(&postings);
    let vacancies = normalize_all(&rur)?;
    writeln!(out, "Found {} vacancies.", vacancies.len())?;
    stores.all.upsert_all(&vacancies)?;

    let words = prompt(input, out, "Enter filter keywords separated by spaces: ")?;
    let words: Vec<&str> = words.split_whitespace().collect();
    let filtered = pipeline::keyword_filter(&vacancies, &words);
    writeln!(out, "{} vacancies match the keywords.", filtered.len())?;
    stores.filtered.upsert_all(&filtered)?;

    let range: SalaryRange = prompt(input, out, "Enter a salary range as <from>-<to>: ")?.parse()?;
    let ranged = pipeline::salary_range_filter(&filtered, range);
    writeln!(
        out,
        "{} vacancies between {} and {} roubles.",
        ranged.len(),
        range.lo,
        range.hi
    )?;
    stores.by_salary.upsert_all(&ranged)?;

    let raw_n = prompt(input, out, "How many top vacancies to show?: ")?;
    let n: usize = raw_n
        .parse()
        .map_err(|_| AppError::Parameter(format!("'{raw_n}' is not a vacancy count")))?;

    let top = pipeline::top_n(&ranged, n);
    for vacancy in &top {
        write!(out, "{vacancy}")?;
    }
    out.flush()?;
    Ok(top)
}

/// Print every vacancy in `store`, or a notice when it holds no data.
pub fn show<W: Write>(store: &dyn VacancyStore, out: &mut W) -> Result<usize, AppError> {
    let Some(vacancies) = store.read_all() else {
        writeln!(out, "The file does not exist or is empty/corrupt.")?;
        return Ok(0);
    };
    for vacancy in &vacancies {
        write!(out, "{vacancy}")?;
    }
    Ok(vacancies.len())
}

fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, text: &str) -> Result<String, AppError> {
    write!(out, "{text}")?;
    out.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}
