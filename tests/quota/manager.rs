use futures_util::future::join_all;
use tidemark_core::quota::{PlanTier, QuotaPhase, QuotaStore};
use time::macros::datetime;

use crate::{manager_with, record};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn given_fifteen_concurrent_reservations_when_limit_is_ten_then_exactly_ten_succeed() {
    let user = "u1".to_string();
    let (manager, store) = manager_with(&user, record(PlanTier::Free, 10)).await;

    let attempts = (0..15).map(|_| {
        let manager = manager.clone();
        let user = user.clone();
        tokio::spawn(async move { manager.check_and_reserve(&user).await })
    });
    let outcomes: Vec<_> = join_all(attempts)
        .await
        .into_iter()
        .map(|joined| joined.expect("reservation task must not panic"))
        .collect();

    let granted = outcomes.iter().filter(|o| o.allowed).count();
    let denied = outcomes.iter().filter(|o| !o.allowed).count();
    assert_eq!(granted, 10);
    assert_eq!(denied, 5);

    let final_record = store.quota(&user).await.expect("record exists");
    assert_eq!(final_record.used, 10, "no overcount, no undercount");
}

#[tokio::test]
async fn given_an_unreachable_store_when_reserving_then_the_answer_fails_closed() {
    let user = "u1".to_string();
    let (manager, store) = manager_with(&user, record(PlanTier::Premium, 100)).await;
    store.set_unreachable(true);

    let outcome = manager.check_and_reserve(&user).await;
    assert!(!outcome.allowed);
    assert_eq!(outcome.remaining, 0);

    store.set_unreachable(false);
    let untouched = store.quota(&user).await.expect("record exists");
    assert_eq!(untouched.used, 0, "a failed reservation must not count");
}

#[tokio::test]
async fn given_a_reservation_when_released_then_used_returns_to_its_prior_value() {
    let user = "u1".to_string();
    let (manager, store) = manager_with(&user, record(PlanTier::Free, 10)).await;

    let outcome = manager.check_and_reserve(&user).await;
    assert!(outcome.allowed);
    assert_eq!(store.quota(&user).await.expect("record exists").used, 1);

    manager.release(&user).await.expect("release succeeds");
    assert_eq!(store.quota(&user).await.expect("record exists").used, 0);
}

#[tokio::test]
async fn given_an_exhausted_record_when_upgraded_then_reservations_flow_again() {
    let user = "u1".to_string();
    let mut exhausted = record(PlanTier::Free, 2);
    exhausted.used = 2;
    let (manager, store) = manager_with(&user, exhausted).await;

    let now = datetime!(2026-03-15 12:00 UTC);
    assert_eq!(
        manager.phase(&user, now).await.expect("record exists"),
        QuotaPhase::Exhausted
    );
    assert!(!manager.check_and_reserve(&user).await.allowed);

    manager.upgrade(&user, 100).await.expect("upgrade succeeds");
    assert_eq!(
        manager.phase(&user, now).await.expect("record exists"),
        QuotaPhase::Active
    );

    let outcome = manager.check_and_reserve(&user).await;
    assert!(outcome.allowed);

    let upgraded = store.quota(&user).await.expect("record exists");
    assert_eq!(upgraded.limit, 100);
    assert_eq!(upgraded.used, 3, "upgrade must not touch used");
    assert_eq!(
        upgraded.reset_at,
        datetime!(2026-04-01 00:00 UTC),
        "upgrade must not touch the anchor"
    );
}

#[tokio::test]
async fn given_denials_when_racing_at_the_boundary_then_used_never_exceeds_limit() {
    let user = "u1".to_string();
    let mut nearly_full = record(PlanTier::Free, 3);
    nearly_full.used = 2;
    let (manager, store) = manager_with(&user, nearly_full).await;

    let attempts = (0..8).map(|_| {
        let manager = manager.clone();
        let user = user.clone();
        tokio::spawn(async move { manager.check_and_reserve(&user).await })
    });
    let granted = join_all(attempts)
        .await
        .into_iter()
        .map(|joined| joined.expect("reservation task must not panic"))
        .filter(|o| o.allowed)
        .count();

    assert_eq!(granted, 1);
    let final_record = store.quota(&user).await.expect("record exists");
    assert!(final_record.used <= final_record.limit);
}
