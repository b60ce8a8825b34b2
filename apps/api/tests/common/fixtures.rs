//! Test fixtures for API integration tests
//!
//! [`MemoryStore`] implements the store over plain vectors and records every
//! call, so tests can assert how many statements a request issued and with
//! which keys.

#![allow(dead_code)]

use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};

use blogql_api::models::{
    Category, Comment, Like, LikedPost, Post, PostLiker, PostStatus, Role, User,
};
use blogql_api::pagination::{PostFilter, PostOrderBy, PostWindow};
use blogql_api::repositories::{BlogStore, StoreResult};

/// A store call: method name and the keys it was given
pub type Call = (&'static str, Vec<i32>);

/// In-memory blog store
#[derive(Default)]
pub struct MemoryStore {
    users: Vec<User>,
    posts: Vec<Post>,
    comments: Vec<Comment>,
    likes: Vec<Like>,
    calls: Mutex<Vec<Call>>,
    failing: Mutex<Option<&'static str>>,
}

fn timestamp(minutes: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap() + Duration::minutes(minutes)
}

impl MemoryStore {
    /// An empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Three users, posts 10/20/30, a handful of comments and likes
    ///
    /// | post | author | category   | status    | comments | likes |
    /// |------|--------|------------|-----------|----------|-------|
    /// | 10   | 1      | TECHNOLOGY | PUBLISHED | 2        | 1     |
    /// | 20   | 2      | LIFESTYLE  | PUBLISHED | 0        | 2     |
    /// | 30   | 2      | TECHNOLOGY | DRAFT     | 1        | 0     |
    pub fn seeded() -> Self {
        Self::new()
            .with_user(1, "Alice", Role::Admin)
            .with_user(2, "Bob", Role::Author)
            .with_user(3, "Carol", Role::Reader)
            .with_post(
                10,
                1,
                "Understanding ownership",
                Category::Technology,
                PostStatus::Published,
            )
            .with_post(
                20,
                2,
                "Slow mornings",
                Category::Lifestyle,
                PostStatus::Published,
            )
            .with_post(
                30,
                2,
                "Async runtimes compared",
                Category::Technology,
                PostStatus::Draft,
            )
            .with_comment(100, 10, 2, "Great explanation")
            .with_comment(101, 10, 3, "Borrowing finally clicked")
            .with_comment(102, 30, 3, "Waiting for part two")
            .with_like(3, 10)
            .with_like(1, 20)
            .with_like(3, 20)
    }

    pub fn with_user(mut self, id: i32, name: &str, role: Role) -> Self {
        self.users.push(User {
            id,
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            role,
            created_at: timestamp(id.into()),
        });
        self
    }

    pub fn with_post(
        mut self,
        id: i32,
        author_id: i32,
        title: &str,
        category: Category,
        status: PostStatus,
    ) -> Self {
        self.posts.push(Post {
            id,
            title: title.to_string(),
            content: format!("{} body", title),
            category,
            status,
            views: 0,
            author_id,
            created_at: timestamp(id.into()),
            updated_at: timestamp(id.into()),
        });
        self
    }

    pub fn with_comment(mut self, id: i32, post_id: i32, author_id: i32, content: &str) -> Self {
        self.comments.push(Comment {
            id,
            content: content.to_string(),
            post_id,
            author_id,
            created_at: timestamp(id.into()),
        });
        self
    }

    pub fn with_like(mut self, author_id: i32, post_id: i32) -> Self {
        let created_at = timestamp(self.likes.len() as i64);
        self.likes.push(Like {
            author_id,
            post_id,
            created_at,
        });
        self
    }

    /// Make every call to `method` fail until cleared
    pub fn fail_on(&self, method: &'static str) {
        *self.failing.lock().unwrap() = Some(method);
    }

    pub fn clear_failure(&self) {
        *self.failing.lock().unwrap() = None;
    }

    /// Every call so far, in order
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls made to one method
    pub fn calls_to(&self, method: &str) -> Vec<Vec<i32>> {
        self.calls()
            .into_iter()
            .filter(|(name, _)| *name == method)
            .map(|(_, keys)| keys)
            .collect()
    }

    pub fn call_count(&self, method: &str) -> usize {
        self.calls_to(method).len()
    }

    pub fn reset_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, method: &'static str, keys: &[i32]) -> StoreResult<()> {
        self.calls.lock().unwrap().push((method, keys.to_vec()));
        if *self.failing.lock().unwrap() == Some(method) {
            return Err(sqlx::Error::Protocol(format!("{} unavailable", method)));
        }
        Ok(())
    }

    fn count_by_post<T>(
        rows: &[T],
        post_id_of: impl Fn(&T) -> i32,
        post_ids: &[i32],
    ) -> Vec<(i32, i64)> {
        let mut counts: HashMap<i32, i64> = HashMap::new();
        for row in rows {
            let post_id = post_id_of(row);
            if post_ids.contains(&post_id) {
                *counts.entry(post_id).or_default() += 1;
            }
        }
        counts.into_iter().collect()
    }

    fn like_count(&self, post_id: i32) -> usize {
        self.likes.iter().filter(|like| like.post_id == post_id).count()
    }

    fn comment_count(&self, post_id: i32) -> usize {
        self.comments
            .iter()
            .filter(|comment| comment.post_id == post_id)
            .count()
    }

    fn matches(post: &Post, filter: &PostFilter) -> bool {
        filter.category.map_or(true, |category| post.category == category)
            && filter.status.map_or(true, |status| post.status == status)
            && filter
                .search
                .as_deref()
                .map_or(true, |query| Self::matches_search(post, query))
    }

    fn matches_search(post: &Post, query: &str) -> bool {
        let haystack = format!("{} {}", post.title, post.content).to_lowercase();
        query
            .split_whitespace()
            .all(|word| haystack.contains(&word.to_lowercase()))
    }

    fn user(&self, id: i32) -> Option<&User> {
        self.users.iter().find(|user| user.id == id)
    }

    fn post(&self, id: i32) -> Option<&Post> {
        self.posts.iter().find(|post| post.id == id)
    }
}

#[async_trait]
impl BlogStore for MemoryStore {
    async fn users_by_ids(&self, ids: &[i32]) -> StoreResult<Vec<User>> {
        self.record("users_by_ids", ids)?;
        // Reverse order to prove callers re-associate by key.
        Ok(self
            .users
            .iter()
            .rev()
            .filter(|user| ids.contains(&user.id))
            .cloned()
            .collect())
    }

    async fn posts_by_ids(&self, ids: &[i32]) -> StoreResult<Vec<Post>> {
        self.record("posts_by_ids", ids)?;
        Ok(self
            .posts
            .iter()
            .rev()
            .filter(|post| ids.contains(&post.id))
            .cloned()
            .collect())
    }

    async fn posts_by_author_ids(&self, author_ids: &[i32]) -> StoreResult<Vec<Post>> {
        self.record("posts_by_author_ids", author_ids)?;
        Ok(self
            .posts
            .iter()
            .filter(|post| author_ids.contains(&post.author_id))
            .cloned()
            .collect())
    }

    async fn comments_by_post_ids(&self, post_ids: &[i32]) -> StoreResult<Vec<Comment>> {
        self.record("comments_by_post_ids", post_ids)?;
        Ok(self
            .comments
            .iter()
            .filter(|comment| post_ids.contains(&comment.post_id))
            .cloned()
            .collect())
    }

    async fn comments_by_author_ids(&self, author_ids: &[i32]) -> StoreResult<Vec<Comment>> {
        self.record("comments_by_author_ids", author_ids)?;
        Ok(self
            .comments
            .iter()
            .filter(|comment| author_ids.contains(&comment.author_id))
            .cloned()
            .collect())
    }

    async fn comment_counts(&self, post_ids: &[i32]) -> StoreResult<Vec<(i32, i64)>> {
        self.record("comment_counts", post_ids)?;
        Ok(Self::count_by_post(&self.comments, |comment| comment.post_id, post_ids))
    }

    async fn like_counts(&self, post_ids: &[i32]) -> StoreResult<Vec<(i32, i64)>> {
        self.record("like_counts", post_ids)?;
        Ok(Self::count_by_post(&self.likes, |like| like.post_id, post_ids))
    }

    async fn likers_of_posts(&self, post_ids: &[i32]) -> StoreResult<Vec<PostLiker>> {
        self.record("likers_of_posts", post_ids)?;
        Ok(self
            .likes
            .iter()
            .filter(|like| post_ids.contains(&like.post_id))
            .filter_map(|like| {
                self.user(like.author_id).map(|user| PostLiker {
                    post_id: like.post_id,
                    user: user.clone(),
                })
            })
            .collect())
    }

    async fn posts_liked_by_users(&self, user_ids: &[i32]) -> StoreResult<Vec<LikedPost>> {
        self.record("posts_liked_by_users", user_ids)?;
        Ok(self
            .likes
            .iter()
            .filter(|like| user_ids.contains(&like.author_id))
            .filter_map(|like| {
                self.post(like.post_id).map(|post| LikedPost {
                    liker_id: like.author_id,
                    post: post.clone(),
                })
            })
            .collect())
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        self.record("list_users", &[])?;
        let mut users = self.users.clone();
        users.sort_by_key(|user| Reverse(user.created_at));
        Ok(users)
    }

    async fn list_posts(&self) -> StoreResult<Vec<Post>> {
        self.record("list_posts", &[])?;
        let mut posts = self.posts.clone();
        posts.sort_by_key(|post| Reverse(post.created_at));
        Ok(posts)
    }

    async fn posts_by_category(&self, category: Category) -> StoreResult<Vec<Post>> {
        self.record("posts_by_category", &[])?;
        let mut posts: Vec<Post> = self
            .posts
            .iter()
            .filter(|post| post.category == category)
            .cloned()
            .collect();
        posts.sort_by_key(|post| Reverse(post.created_at));
        Ok(posts)
    }

    async fn comments_for_post(&self, post_id: i32) -> StoreResult<Vec<Comment>> {
        self.record("comments_for_post", &[post_id])?;
        let mut comments: Vec<Comment> = self
            .comments
            .iter()
            .filter(|comment| comment.post_id == post_id)
            .cloned()
            .collect();
        comments.sort_by_key(|comment| Reverse(comment.created_at));
        Ok(comments)
    }

    async fn search_posts(&self, query: &str, limit: i64) -> StoreResult<Vec<Post>> {
        self.record("search_posts", &[])?;
        Ok(self
            .posts
            .iter()
            .filter(|post| Self::matches_search(post, query))
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn fetch_post_window(&self, window: &PostWindow) -> StoreResult<Vec<Post>> {
        self.record("fetch_post_window", window.after.as_slice())?;
        let mut posts: Vec<Post> = self
            .posts
            .iter()
            .filter(|post| Self::matches(post, &window.filter))
            .filter(|post| match window.after {
                Some(after) if window.order_by.cursor_ascends() => post.id > after,
                Some(after) => post.id < after,
                None => true,
            })
            .cloned()
            .collect();

        // Stable sorts: ties among equal counts keep descending key order.
        posts.sort_by_key(|post| Reverse(post.id));
        match window.order_by {
            PostOrderBy::Newest => {}
            PostOrderBy::Oldest => posts.sort_by_key(|post| post.id),
            PostOrderBy::MostLiked => posts.sort_by_key(|post| Reverse(self.like_count(post.id))),
            PostOrderBy::MostCommented => {
                posts.sort_by_key(|post| Reverse(self.comment_count(post.id)))
            }
        }

        posts.truncate(window.limit as usize);
        Ok(posts)
    }

    async fn count_posts(&self, filter: &PostFilter) -> StoreResult<i64> {
        self.record("count_posts", &[])?;
        Ok(self
            .posts
            .iter()
            .filter(|post| Self::matches(post, filter))
            .count() as i64)
    }
}
