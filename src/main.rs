use std::io;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use vacancies::collectors::headhunter::HeadHunter;
use vacancies::config::{Command, Config};
use vacancies::interactive::{self, Stores};
use vacancies::store::{JsonFileStore, VacancyStore};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    init_tracing(config.log_json);

    match config.resolved_command() {
        Command::Search => {
            let source = HeadHunter::from_config(&config)?;
            let all = JsonFileStore::new(&config.all_file);
            let filtered = JsonFileStore::new(&config.filtered_file);
            let by_salary = JsonFileStore::new(&config.salary_file);
            let stores = Stores {
                all: &all,
                filtered: &filtered,
                by_salary: &by_salary,
            };

            let mut input = io::stdin().lock();
            let mut out = io::stdout().lock();
            interactive::run(&source, &stores, &mut input, &mut out).await?;
        }
        Command::Show { file } => {
            let store = JsonFileStore::new(file.unwrap_or(config.all_file));
            let count = interactive::show(&store, &mut io::stdout().lock())?;
            tracing::info!("Listed {count} vacancies from {}", store.path().display());
        }
        Command::Delete { url, file } => {
            let store = JsonFileStore::new(file.unwrap_or(config.all_file));
            match store.delete_by_key(&url)? {
                Some(removed) => println!("Removed {removed} vacancies."),
                None => println!("The file does not exist or is empty/corrupt."),
            }
        }
    }

    Ok(())
}

fn init_tracing(json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("vacancies=info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
