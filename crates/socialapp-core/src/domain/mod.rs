//! Domain entities - the core business objects.

mod comment;
mod like;
mod post;
pub mod stamp;

pub use comment::{Comment, CommentFields};
pub use like::Like;
pub use post::{Post, PostFields, PostWithCounts};
