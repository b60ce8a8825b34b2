//! Database models for BlogQL
//!
//! This module contains the SQLx row types for users, posts, comments and
//! likes, plus the join rows produced by the like fan-out queries.

pub mod comment;
pub mod like;
pub mod post;
pub mod user;

pub use comment::Comment;
pub use like::{Like, LikedPost, PostLiker};
pub use post::{Category, Post, PostStatus};
pub use user::{Role, User};
