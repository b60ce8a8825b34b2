//! GraphQL type definitions for BlogQL
//!
//! This module contains the GraphQL object types that are exposed
//! through the API: users, posts, comments, and post connections.

mod comment;
mod connection;
mod enums;
mod post;
mod user;

pub use comment::Comment;
pub use connection::{PageInfo, PostConnection, PostEdge};
pub use enums::{Category, PostOrderBy, PostStatus, Role};
pub use post::{Post, PostNotFoundError, PostResult};
pub use user::User;
