use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Duration;
use quiz_core::model::{SourceUrl, TopicId, TopicList};
use quiz_core::time::fixed_now;
use quiz_core::{Clock, DecodeError};
use services::{CatalogError, CatalogOrigin, CatalogService, DataProvider, FetchError};
use storage::repository::{DocumentCacheRepository, InMemoryRepository};

const MATHS: &str = r#"[
    {"title":"Mathematics","desc":"Did you pass the third grade?","questions":[
        {"text":"What is 2+2?","answer":"1","answers":["4","22","An irrational number","Nobody knows"]}
    ]}
]"#;

const SCIENCE: &str = r#"[
    {"title":"Science!","desc":"Because SCIENCE!","questions":[
        {"text":"What is fire?","answer":"1","answers":["One of the four classical elements","A magical reaction"]}
    ]},
    {"title":"Marvel Super Heroes","desc":"Avengers, Assemble!","questions":[
        {"text":"Who is Iron Man?","answer":"1","answers":["Tony Stark","Obadiah Stane"]}
    ]}
]"#;

/// Replays canned responses in order; `Err` entries simulate an unreachable source.
struct ScriptedProvider {
    responses: Mutex<VecDeque<Result<Vec<u8>, String>>>,
    requested: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    fn with(responses: Vec<Result<&str, &str>>) -> Arc<Self> {
        let queue = responses
            .into_iter()
            .map(|r| r.map(|body| body.as_bytes().to_vec()).map_err(str::to_string))
            .collect();
        Arc::new(Self {
            responses: Mutex::new(queue),
            requested: Mutex::new(Vec::new()),
        })
    }

    fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl DataProvider for ScriptedProvider {
    async fn fetch(&self, source: &SourceUrl) -> Result<Vec<u8>, FetchError> {
        self.requested.lock().unwrap().push(source.as_str().to_string());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err("no scripted response".into()))
            .map_err(FetchError::Unavailable)
    }
}

fn catalog(provider: Arc<ScriptedProvider>, repo: &InMemoryRepository, clock: Clock) -> CatalogService {
    CatalogService::new(
        clock,
        provider,
        Arc::new(repo.clone()),
        Arc::new(repo.clone()),
    )
}

#[tokio::test]
async fn network_load_refreshes_cache() {
    let repo = InMemoryRepository::new();
    let provider = ScriptedProvider::with(vec![Ok(MATHS)]);
    let svc = catalog(provider.clone(), &repo, Clock::fixed(fixed_now()));

    let loaded = svc.load().await.unwrap();

    assert_eq!(loaded.origin, CatalogOrigin::Network);
    assert_eq!(loaded.topics.len(), 1);
    assert_eq!(loaded.topics[0].title(), "Mathematics");
    assert_eq!(provider.requested(), vec![SourceUrl::default().as_str().to_string()]);

    let cached = repo.load_document().await.unwrap().unwrap();
    assert_eq!(cached.bytes, MATHS.as_bytes());
    assert_eq!(cached.saved_at, fixed_now());
}

#[tokio::test]
async fn fetch_failure_falls_back_to_cache() {
    let repo = InMemoryRepository::new();
    let mut clock = Clock::fixed(fixed_now());
    let provider = ScriptedProvider::with(vec![Ok(SCIENCE), Err("offline")]);

    catalog(provider.clone(), &repo, clock).load().await.unwrap();
    clock.advance(Duration::hours(2));
    let loaded = catalog(provider, &repo, clock).load().await.unwrap();

    assert_eq!(
        loaded.origin,
        CatalogOrigin::Cache {
            saved_at: fixed_now()
        }
    );
    assert_eq!(loaded.topics.len(), 2);
    assert_eq!(loaded.topics[1].id(), TopicId::new(2));
}

#[tokio::test]
async fn fetch_failure_without_cache_is_an_error() {
    let repo = InMemoryRepository::new();
    let provider = ScriptedProvider::with(vec![Err("offline")]);
    let err = catalog(provider, &repo, Clock::fixed(fixed_now()))
        .load()
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::Fetch(FetchError::Unavailable(_))));
}

#[tokio::test]
async fn bad_document_keeps_cache_and_topic_list() {
    let repo = InMemoryRepository::new();
    let provider = ScriptedProvider::with(vec![
        Ok(SCIENCE),
        Ok("<html>maintenance</html>"),
        Ok(r#"[{"title":"Broken","desc":"","questions":[{"text":"Q","answer":"5","answers":["a","b"]}]}]"#),
    ]);
    let svc = catalog(provider, &repo, Clock::fixed(fixed_now()));

    let mut list = TopicList::default();
    let origin = svc.refresh(&mut list).await.unwrap();
    assert_eq!(origin, CatalogOrigin::Network);
    assert_eq!(list.len(), 2);
    let before = list.clone();

    let err = svc.refresh(&mut list).await.unwrap_err();
    assert!(matches!(err, CatalogError::Decode(DecodeError::Malformed(_))));
    assert_eq!(list, before);

    let err = svc.refresh(&mut list).await.unwrap_err();
    assert!(matches!(
        err,
        CatalogError::Decode(DecodeError::SchemaViolation(_))
    ));
    assert_eq!(list, before);

    let cached = repo.load_document().await.unwrap().unwrap();
    assert_eq!(cached.bytes, SCIENCE.as_bytes());
}

#[tokio::test]
async fn stored_source_is_used_for_fetches() {
    let repo = InMemoryRepository::new();
    let provider = ScriptedProvider::with(vec![Ok(MATHS)]);
    let svc = catalog(provider.clone(), &repo, Clock::fixed(fixed_now()));

    svc.set_source_url("https://quiz.example.com/maths.json")
        .await
        .unwrap();
    let loaded = svc.load().await.unwrap();

    assert_eq!(loaded.source.as_str(), "https://quiz.example.com/maths.json");
    assert_eq!(
        provider.requested(),
        vec!["https://quiz.example.com/maths.json".to_string()]
    );
}
