//! Integration tests for the request-scoped loaders
//!
//! Runs every loader against the in-memory store and checks the batching
//! contract from the outside: one store call per window, keys deduplicated in
//! first-occurrence order, values re-associated to every caller.

mod common;

use std::sync::Arc;
use std::time::Duration;

use assert_matches::assert_matches;
use blogql_api::graphql::loaders::{BatchError, LoaderOptions, Loaders};
use blogql_api::models::Role;
use blogql_api::repositories::BlogStore;

use common::MemoryStore;

fn loaders_over(store: &Arc<MemoryStore>) -> Loaders {
    let store: Arc<dyn BlogStore> = store.clone();
    Loaders::new(store)
}

fn ids<T>(rows: &[T], id_of: impl Fn(&T) -> i32) -> Vec<i32> {
    rows.iter().map(id_of).collect()
}

#[tokio::test]
async fn test_comment_counts_default_to_zero() {
    let store = Arc::new(MemoryStore::seeded());
    let loaders = loaders_over(&store);

    let counts = loaders
        .comment_count_by_post
        .load_many([10, 20, 99])
        .await
        .unwrap();

    assert_eq!(counts, vec![Some(2), Some(0), Some(0)]);
    assert_eq!(store.calls_to("comment_counts"), vec![vec![10, 20, 99]]);
}

#[tokio::test]
async fn test_like_counts_follow_key_order() {
    let store = Arc::new(MemoryStore::seeded());
    let loaders = loaders_over(&store);

    let counts = loaders
        .like_count_by_post
        .load_many([30, 20, 10])
        .await
        .unwrap();

    assert_eq!(counts, vec![Some(0), Some(2), Some(1)]);
}

#[tokio::test]
async fn test_duplicate_keys_share_one_fetch() {
    let store = Arc::new(
        MemoryStore::new()
            .with_user(5, "Eve", Role::Reader)
            .with_user(7, "Grace", Role::Author),
    );
    let loaders = loaders_over(&store);

    let (first, second, third) = tokio::join!(
        loaders.user_by_id.load(5),
        loaders.user_by_id.load(5),
        loaders.user_by_id.load(7),
    );

    assert_eq!(store.calls_to("users_by_ids"), vec![vec![5, 7]]);
    let first = first.unwrap().unwrap();
    assert_eq!(first.name, "Eve");
    assert_eq!(second.unwrap(), Some(first));
    assert_eq!(third.unwrap().unwrap().name, "Grace");
}

#[tokio::test]
async fn test_missing_key_resolves_to_none() {
    let store = Arc::new(MemoryStore::seeded());
    let loaders = loaders_over(&store);

    let (present, missing) = tokio::join!(loaders.post_by_id.load(20), loaders.post_by_id.load(404));

    assert_eq!(present.unwrap().map(|post| post.id), Some(20));
    assert_eq!(missing.unwrap(), None);
    assert_eq!(store.call_count("posts_by_ids"), 1);
}

#[tokio::test]
async fn test_values_are_cached_for_the_request() {
    let store = Arc::new(MemoryStore::seeded());
    let loaders = loaders_over(&store);

    loaders.user_by_id.load(1).await.unwrap();
    loaders.user_by_id.load(1).await.unwrap();
    loaders.user_by_id.load_many([1, 2]).await.unwrap();

    assert_eq!(store.calls_to("users_by_ids"), vec![vec![1], vec![2]]);
}

#[tokio::test]
async fn test_registries_do_not_share_caches() {
    let store = Arc::new(MemoryStore::seeded());

    let first_request = loaders_over(&store);
    first_request.user_by_id.load(1).await.unwrap();

    let second_request = loaders_over(&store);
    second_request.user_by_id.load(1).await.unwrap();

    assert_eq!(store.call_count("users_by_ids"), 2);
}

#[tokio::test]
async fn test_failed_fetch_reaches_every_caller_and_is_not_cached() {
    let store = Arc::new(MemoryStore::seeded());
    let loaders = loaders_over(&store);
    store.fail_on("users_by_ids");

    let (first, second) = tokio::join!(loaders.user_by_id.load(1), loaders.user_by_id.load(2));
    assert_matches!(first, Err(BatchError::Fetch(_)));
    assert_matches!(second, Err(BatchError::Fetch(_)));
    assert!(!loaders.user_by_id.is_cached(&1));

    store.clear_failure();
    let user = loaders.user_by_id.load(1).await.unwrap();
    assert_eq!(user.map(|user| user.name), Some("Alice".to_string()));
    assert_eq!(store.call_count("users_by_ids"), 2);
}

#[tokio::test]
async fn test_collection_loaders_cover_every_key() {
    let store = Arc::new(MemoryStore::seeded());
    let loaders = loaders_over(&store);

    let (posts, comments) = tokio::join!(
        loaders.posts_by_author.load_many([1, 2, 3]),
        loaders.comments_by_post.load_many([10, 20, 30]),
    );

    let posts: Vec<Vec<i32>> = posts
        .unwrap()
        .into_iter()
        .map(|group| ids(&group.unwrap(), |post| post.id))
        .collect();
    assert_eq!(posts, vec![vec![10], vec![20, 30], vec![]]);

    let comments: Vec<Vec<i32>> = comments
        .unwrap()
        .into_iter()
        .map(|group| ids(&group.unwrap(), |comment| comment.id))
        .collect();
    assert_eq!(comments, vec![vec![100, 101], vec![], vec![102]]);
}

#[tokio::test]
async fn test_comments_by_author() {
    let store = Arc::new(MemoryStore::seeded());
    let loaders = loaders_over(&store);

    let comments = loaders.comments_by_author.load(3).await.unwrap().unwrap();

    assert_eq!(ids(&comments, |comment| comment.id), vec![101, 102]);
}

#[tokio::test]
async fn test_like_fan_out_in_both_directions() {
    let store = Arc::new(MemoryStore::seeded());
    let loaders = loaders_over(&store);

    let (likers, liked) = tokio::join!(
        loaders.likers_by_post.load_many([20, 30]),
        loaders.liked_posts_by_user.load_many([3, 2]),
    );

    let likers: Vec<Vec<i32>> = likers
        .unwrap()
        .into_iter()
        .map(|group| ids(&group.unwrap(), |user| user.id))
        .collect();
    assert_eq!(likers, vec![vec![1, 3], vec![]]);

    let liked: Vec<Vec<i32>> = liked
        .unwrap()
        .into_iter()
        .map(|group| ids(&group.unwrap(), |post| post.id))
        .collect();
    assert_eq!(liked, vec![vec![10, 20], vec![]]);
}

#[tokio::test]
async fn test_max_batch_size_splits_windows() {
    let store = Arc::new(MemoryStore::seeded());
    let options = LoaderOptions {
        max_batch_size: Some(2),
        ..Default::default()
    };
    let loaders = Loaders::with_options(store.clone(), options);

    let users = loaders.user_by_id.load_many([3, 1, 2]).await.unwrap();

    assert_eq!(
        users.iter().flatten().map(|user| user.id).collect::<Vec<_>>(),
        vec![3, 1, 2]
    );
    assert_eq!(store.calls_to("users_by_ids"), vec![vec![3, 1], vec![2]]);
}

#[tokio::test]
async fn test_delay_widens_the_window() {
    let store = Arc::new(MemoryStore::seeded());
    let options = LoaderOptions {
        delay: Some(Duration::from_millis(20)),
        ..Default::default()
    };
    let loaders = Loaders::with_options(store.clone(), options);

    let late = async {
        for _ in 0..3 {
            tokio::task::yield_now().await;
        }
        loaders.user_by_id.load(2).await
    };
    let (early, late) = tokio::join!(loaders.user_by_id.load(1), late);

    assert!(early.unwrap().is_some());
    assert!(late.unwrap().is_some());
    assert_eq!(store.calls_to("users_by_ids"), vec![vec![1, 2]]);
}

#[tokio::test]
async fn test_primed_values_skip_the_store() {
    let store = Arc::new(MemoryStore::seeded());
    let loaders = loaders_over(&store);

    let listed = store.list_posts().await.unwrap();
    for post in &listed {
        loaders.post_by_id.prime(post.id, Some(post.clone()));
    }

    let post = loaders.post_by_id.load(30).await.unwrap();
    assert_eq!(post.map(|post| post.id), Some(30));
    assert_eq!(store.call_count("posts_by_ids"), 0);
}
