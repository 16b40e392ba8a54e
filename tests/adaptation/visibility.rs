use std::sync::Arc;

use tidemark_core::{
    CoreEngine,
    breakdown::testing::ScriptedCompletionPort,
    config::CoreConfig,
    quota::InMemoryQuotaStore,
    store::{InMemoryStore, TaskStore},
    sync::InMemoryCacheStore,
    tasks::Task,
};

use crate::state;

fn task(id: &str, complexity: u8, completed: bool) -> Task {
    Task {
        id: id.to_string(),
        title: format!("task {id}"),
        description: String::new(),
        complexity,
        estimated_minutes: 15,
        completed,
        breakdown: None,
    }
}

fn engine_with(store: Arc<InMemoryStore>) -> CoreEngine {
    CoreEngine::new(
        store.clone(),
        store,
        Arc::new(InMemoryQuotaStore::default()),
        Arc::new(ScriptedCompletionPort::always_ok("")),
        Arc::new(InMemoryCacheStore::default()),
        CoreConfig::default(),
    )
}

#[tokio::test]
async fn given_a_low_energy_checkin_when_listing_tasks_then_heavy_ones_hide_in_order() {
    let store = Arc::new(InMemoryStore::default());
    let user = "u1".to_string();
    for fixture in [
        task("a", 1, false),
        task("b", 4, false),
        task("c", 2, false),
        task("d", 3, false),
    ] {
        store.save_task(&user, fixture).await.expect("seed task");
    }
    let engine = engine_with(Arc::clone(&store));

    // Energy 4 puts the ceiling at 2.
    engine
        .submit_checkin(&user, state(4, 5, 5))
        .await
        .expect("checkin is valid");

    let visible = engine
        .visible_tasks(&user, true)
        .await
        .expect("store is reachable");
    let ids: Vec<&str> = visible.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "c"]);
}

#[tokio::test]
async fn given_no_checkin_yet_when_listing_tasks_then_medium_defaults_apply() {
    let store = Arc::new(InMemoryStore::default());
    let user = "u1".to_string();
    for complexity in 1..=5u8 {
        store
            .save_task(&user, task(&format!("t{complexity}"), complexity, false))
            .await
            .expect("seed task");
    }
    let engine = engine_with(store);

    let visible = engine
        .visible_tasks(&user, true)
        .await
        .expect("store is reachable");
    // Default ceiling is 3.
    assert_eq!(visible.len(), 3);
}

#[tokio::test]
async fn given_completed_tasks_when_listing_then_they_only_show_on_request() {
    let store = Arc::new(InMemoryStore::default());
    let user = "u1".to_string();
    store
        .save_task(&user, task("done", 1, true))
        .await
        .expect("seed task");
    store
        .save_task(&user, task("open", 1, false))
        .await
        .expect("seed task");
    let engine = engine_with(store);

    let without = engine
        .visible_tasks(&user, false)
        .await
        .expect("store is reachable");
    assert_eq!(without.len(), 1);
    assert_eq!(without[0].id, "open");

    let with = engine
        .visible_tasks(&user, true)
        .await
        .expect("store is reachable");
    assert_eq!(with.len(), 2);
}
