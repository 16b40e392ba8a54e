use std::sync::Arc;

use tidemark_core::quota::{InMemoryQuotaStore, PlanTier, QuotaStore};
use time::macros::datetime;

use crate::{manager_with, record};

#[tokio::test]
async fn given_a_future_anchor_when_reset_runs_then_nothing_changes() {
    let user = "u1".to_string();
    let mut seeded = record(PlanTier::Free, 10);
    seeded.used = 4;
    let (manager, store) = manager_with(&user, seeded).await;

    let did_reset = manager
        .reset_if_due(&user, datetime!(2026-03-20 00:00 UTC))
        .await
        .expect("record exists");
    assert!(!did_reset);

    let unchanged = store.quota(&user).await.expect("record exists");
    assert_eq!(unchanged.used, 4);
    assert_eq!(unchanged.reset_at, datetime!(2026-04-01 00:00 UTC));
}

#[tokio::test]
async fn given_a_due_anchor_when_reset_runs_then_used_zeroes_and_the_anchor_rolls_one_month() {
    let user = "u1".to_string();
    let mut seeded = record(PlanTier::Free, 10);
    seeded.used = 10;
    let (manager, store) = manager_with(&user, seeded).await;

    let did_reset = manager
        .reset_if_due(&user, datetime!(2026-04-02 08:00 UTC))
        .await
        .expect("record exists");
    assert!(did_reset);

    let rolled = store.quota(&user).await.expect("record exists");
    assert_eq!(rolled.used, 0);
    // Rolls from the prior anchor, not from now, so the day does not drift.
    assert_eq!(rolled.reset_at, datetime!(2026-05-01 00:00 UTC));
}

#[tokio::test]
async fn given_a_completed_reset_when_reset_runs_again_then_it_is_a_noop() {
    let user = "u1".to_string();
    let mut seeded = record(PlanTier::Free, 10);
    seeded.used = 7;
    let (manager, store) = manager_with(&user, seeded).await;

    let now = datetime!(2026-04-02 08:00 UTC);
    assert!(manager.reset_if_due(&user, now).await.expect("record exists"));
    assert!(!manager.reset_if_due(&user, now).await.expect("record exists"));

    let rolled = store.quota(&user).await.expect("record exists");
    assert_eq!(rolled.used, 0);
    assert_eq!(rolled.reset_at, datetime!(2026-05-01 00:00 UTC));
}

#[tokio::test]
async fn given_many_users_when_the_batch_reset_runs_then_only_due_records_roll() {
    let store = Arc::new(InMemoryQuotaStore::default());

    let mut due = record(PlanTier::Free, 10);
    due.used = 9;
    due.reset_at = datetime!(2026-03-01 00:00 UTC);
    store.seed("due", due).await;

    let mut fresh = record(PlanTier::Premium, 100);
    fresh.used = 2;
    store.seed("fresh", fresh).await;

    let reset_count = store
        .reset_expired(datetime!(2026-03-05 00:00 UTC))
        .await
        .expect("store is reachable");
    assert_eq!(reset_count, 1);

    let rolled = store.quota(&"due".to_string()).await.expect("record exists");
    assert_eq!(rolled.used, 0);
    assert_eq!(rolled.reset_at, datetime!(2026-04-01 00:00 UTC));

    let untouched = store
        .quota(&"fresh".to_string())
        .await
        .expect("record exists");
    assert_eq!(untouched.used, 2);
}
