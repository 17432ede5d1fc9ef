//! Integration tests for identity reconciliation.
//!
//! Exercises the three login outcomes (merge, promote, create) against a
//! real in-memory database, including the precedence rule: when histories
//! collide, the already-linked account's records win.

#![allow(clippy::unwrap_used)]

mod common;

use chrono::Utc;
use sqlx::SqlitePool;

use setahun_core::{DayOfYear, UserId};
use setahun_server::db::{ProgressRepository, UserRepository};
use setahun_server::services::reconcile::{ReconcileOutcome, reconcile};

use common::{assertion, test_pool};

async fn user_count(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await
        .unwrap()
}

#[tokio::test]
async fn login_with_no_session_creates_a_linked_account() {
    let pool = test_pool().await;

    let (id, outcome) = reconcile(&pool, None, &assertion("g-new")).await.unwrap();

    assert_eq!(outcome, ReconcileOutcome::Created);
    let user = UserRepository::new(&pool)
        .get_by_id(id)
        .await
        .unwrap()
        .unwrap();
    assert!(user.is_linked());
    assert_eq!(user.google_id.as_deref(), Some("g-new"));
    assert_eq!(user.email.as_deref(), Some("g-new@example.com"));
}

#[tokio::test]
async fn dangling_session_binding_is_treated_as_unbound() {
    let pool = test_pool().await;

    let (_, outcome) = reconcile(&pool, Some(UserId::new(999)), &assertion("g-new"))
        .await
        .unwrap();

    assert_eq!(outcome, ReconcileOutcome::Created);
    assert_eq!(user_count(&pool).await, 1);
}

#[tokio::test]
async fn anonymous_account_is_promoted_in_place() {
    let pool = test_pool().await;
    let users = UserRepository::new(&pool);
    let progress = ProgressRepository::new(&pool);

    let anon = users.create_anonymous().await.unwrap();
    progress
        .toggle(anon.id, DayOfYear::new(5).unwrap())
        .await
        .unwrap();

    let (id, outcome) = reconcile(&pool, Some(anon.id), &assertion("g-promote"))
        .await
        .unwrap();

    assert_eq!(outcome, ReconcileOutcome::Promoted);
    assert_eq!(id, anon.id);

    let user = users.get_by_id(id).await.unwrap().unwrap();
    assert!(user.is_linked());
    assert_eq!(user.google_id.as_deref(), Some("g-promote"));

    // History survives the promotion untouched
    let completed = progress.get_completed_days(id).await.unwrap();
    assert!(completed.contains(&5));
    assert_eq!(user_count(&pool).await, 1);
}

#[tokio::test]
async fn anonymous_history_merges_into_the_existing_account() {
    let pool = test_pool().await;
    let users = UserRepository::new(&pool);
    let progress = ProgressRepository::new(&pool);

    // The reader signed in on another device earlier and read days 1 and 2.
    let linked = users.create_linked(&assertion("g-merge")).await.unwrap();
    progress
        .toggle(linked.id, DayOfYear::new(1).unwrap())
        .await
        .unwrap();
    progress
        .toggle(linked.id, DayOfYear::new(2).unwrap())
        .await
        .unwrap();

    // Meanwhile this device's anonymous account read day 3, and has an
    // un-completed record for day 2 that must not clobber the linked one.
    let anon = users.create_anonymous().await.unwrap();
    progress
        .upsert(anon.id, DayOfYear::new(2).unwrap(), false, None)
        .await
        .unwrap();
    progress
        .toggle(anon.id, DayOfYear::new(3).unwrap())
        .await
        .unwrap();

    let (id, outcome) = reconcile(&pool, Some(anon.id), &assertion("g-merge"))
        .await
        .unwrap();

    assert_eq!(outcome, ReconcileOutcome::Merged);
    assert_eq!(id, linked.id);

    // Additive merge: the union of histories, with the linked account's
    // day-2 record winning over the anonymous one.
    let completed = progress.get_completed_days(id).await.unwrap();
    assert_eq!(completed, [1, 2, 3].into_iter().collect());

    // The anonymous account is gone entirely.
    assert!(users.get_by_id(anon.id).await.unwrap().is_none());
    assert_eq!(user_count(&pool).await, 1);
}

#[tokio::test]
async fn signing_in_again_resumes_the_same_account() {
    let pool = test_pool().await;
    let users = UserRepository::new(&pool);

    let linked = users.create_linked(&assertion("g-again")).await.unwrap();

    let (id, outcome) = reconcile(&pool, Some(linked.id), &assertion("g-again"))
        .await
        .unwrap();

    assert_eq!(outcome, ReconcileOutcome::Resumed);
    assert_eq!(id, linked.id);
    assert_eq!(user_count(&pool).await, 1);
}

#[tokio::test]
async fn switching_between_linked_accounts_never_merges() {
    let pool = test_pool().await;
    let users = UserRepository::new(&pool);
    let progress = ProgressRepository::new(&pool);

    let first = users.create_linked(&assertion("g-first")).await.unwrap();
    progress
        .toggle(first.id, DayOfYear::new(10).unwrap())
        .await
        .unwrap();

    let second = users.create_linked(&assertion("g-second")).await.unwrap();

    // Session currently bound to the first linked account; signing in as
    // the second identity just switches, both histories stay separate.
    let (id, outcome) = reconcile(&pool, Some(first.id), &assertion("g-second"))
        .await
        .unwrap();

    assert_eq!(outcome, ReconcileOutcome::Resumed);
    assert_eq!(id, second.id);

    assert!(users.get_by_id(first.id).await.unwrap().is_some());
    let first_days = progress.get_completed_days(first.id).await.unwrap();
    assert!(first_days.contains(&10));
    let second_days = progress.get_completed_days(second.id).await.unwrap();
    assert!(second_days.is_empty());
}

#[tokio::test]
async fn merge_is_safe_to_repeat() {
    let pool = test_pool().await;
    let users = UserRepository::new(&pool);
    let progress = ProgressRepository::new(&pool);

    let linked = users.create_linked(&assertion("g-rerun")).await.unwrap();
    let anon = users.create_anonymous().await.unwrap();
    progress
        .upsert(anon.id, DayOfYear::new(7).unwrap(), true, Some(Utc::now()))
        .await
        .unwrap();

    users.merge_into(linked.id, anon.id).await.unwrap();

    // A second reconcile with the (now dangling) anonymous id finds
    // nothing to merge and resumes the linked account.
    let (id, outcome) = reconcile(&pool, Some(anon.id), &assertion("g-rerun"))
        .await
        .unwrap();

    assert_eq!(outcome, ReconcileOutcome::Resumed);
    assert_eq!(id, linked.id);
    let completed = progress.get_completed_days(linked.id).await.unwrap();
    assert!(completed.contains(&7));
}
