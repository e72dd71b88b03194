//! End-to-end flow against a mocked hh.ru endpoint: fetch, gate, normalize, store.

use std::time::Duration;

use serde_json::{Value, json};
use tempfile::TempDir;
use vacancies::collectors::headhunter::HeadHunter;
use vacancies::collectors::{self, PAGE_LIMIT};
use vacancies::models::vacancy::normalize_all;
use vacancies::pipeline;
use vacancies::store::{JsonFileStore, VacancyStore};
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn posting(id: u32, from: Option<u64>, to: Option<u64>, currency: &str) -> Value {
    json!({
        "name": format!("Rust developer {id}"),
        "salary": {"from": from, "to": to, "currency": currency},
        "alternate_url": format!("https://hh.ru/vacancy/{id}"),
        "employer": {"name": "Acme"},
        "snippet": {"requirement": "Ownership and borrowing"},
        "experience": {"name": "3-6 years"},
        "employment": {"name": "Full time"}
    })
}

async fn mock_hh(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/vacancies"))
        .and(query_param_is_missing("page"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/vacancies"))
        .and(query_param("page", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                posting(1, Some(100000), Some(150000), "RUR"),
                posting(2, Some(3000), None, "USD"),
                posting(3, Some(100000), None, "RUR"),
            ]
        })))
        .with_priority(1)
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/vacancies"))
        .and(query_param("per_page", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .expect(u64::from(PAGE_LIMIT) - 1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_fetch_gate_normalize_and_store() {
    let server = MockServer::start().await;
    mock_hh(&server).await;

    let hh = HeadHunter::new(
        format!("{}/vacancies", server.uri()),
        "test-agent",
        Duration::from_secs(5),
    )
    .unwrap();

    let postings = collectors::fetch(&hh, "rust").await.unwrap();
    assert_eq!(postings.len(), 3);

    let vacancies = normalize_all(&pipeline::currency_gate(&postings)).unwrap();
    assert_eq!(vacancies.len(), 2);
    assert_eq!(vacancies[0].salary, 125000);
    assert_eq!(vacancies[1].salary, 100000);

    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::new(dir.path().join("data").join("vacancy.json"));

    store.upsert_all(&vacancies).unwrap();
    assert_eq!(store.read_all().unwrap().len(), 2);

    let second = store.upsert_all(&vacancies).unwrap();
    assert_eq!(second.added, 0);
    assert_eq!(store.read_all().unwrap().len(), 2);

    let raw: Value = serde_json::from_str(&std::fs::read_to_string(store.path()).unwrap()).unwrap();
    assert_eq!(raw[0]["alternate_url"], "https://hh.ru/vacancy/1");
    assert_eq!(raw[0]["salary"], 125000);
    assert_eq!(raw[0]["employer"], "Acme");
    assert_eq!(raw[0]["snippet"], "Ownership and borrowing");
}

#[tokio::test]
async fn test_ranked_subset_survives_delete() {
    let server = MockServer::start().await;
    mock_hh(&server).await;

    let hh = HeadHunter::new(
        format!("{}/vacancies", server.uri()),
        "test-agent",
        Duration::from_secs(5),
    )
    .unwrap();

    let postings = collectors::fetch(&hh, "rust").await.unwrap();
    let vacancies = normalize_all(&pipeline::currency_gate(&postings)).unwrap();
    let top = pipeline::top_n(&vacancies, 1);
    assert_eq!(top[0].alternate_url, "https://hh.ru/vacancy/1");

    let dir = TempDir::new().unwrap();
    let store = JsonFileStore::new(dir.path().join("vacancy.json"));
    store.upsert_all(&vacancies).unwrap();

    assert_eq!(store.delete_by_key("https://hh.ru/vacancy/1").unwrap(), Some(1));
    let left = store.read_all().unwrap();
    assert_eq!(left.len(), 1);
    assert_eq!(left[0].salary, 100000);
}
