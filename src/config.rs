use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

pub const DEFAULT_API_URL: &str = "https://api.hh.ru/vacancies";
pub const DEFAULT_USER_AGENT: &str = "HH-User-Agent";

#[derive(Parser, Debug, Clone)]
#[command(name = "vacancies", about = "Search, filter and rank HeadHunter job postings")]
pub struct Config {
    /// Vacancy search endpoint
    #[arg(long, env = "HH_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// User-Agent header sent with every request
    #[arg(long, env = "HH_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Overall timeout for a single HTTP request, in seconds
    #[arg(long, env = "HH_TIMEOUT_SECS", default_value = "30")]
    pub timeout_secs: u64,

    /// Every fetched RUR vacancy
    #[arg(long, env = "VACANCIES_ALL_FILE", default_value = "data/vacancy.json")]
    pub all_file: PathBuf,

    /// Vacancies matching the filter keywords
    #[arg(
        long,
        env = "VACANCIES_FILTERED_FILE",
        default_value = "data/vacancy_filtered.json"
    )]
    pub filtered_file: PathBuf,

    /// Keyword-filtered vacancies inside the salary range
    #[arg(
        long,
        env = "VACANCIES_SALARY_FILE",
        default_value = "data/vacancy_filter_salary.json"
    )]
    pub salary_file: PathBuf,

    /// Emit logs as JSON lines instead of human-readable text
    #[arg(long, env = "LOG_JSON")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(clap::Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the interactive search (default when no subcommand given)
    Search,
    /// Print the vacancies stored in a file
    Show {
        /// Store file to read (defaults to --all-file)
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Remove every stored vacancy with the given URL
    Delete {
        /// alternate_url of the vacancy to remove
        url: String,

        /// Store file to edit (defaults to --all-file)
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

impl Config {
    /// Resolve the command, defaulting to Search if none specified.
    pub fn resolved_command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Search)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
