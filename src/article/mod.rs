pub mod model;
pub mod queries;
pub mod store;

pub use model::{Article, ArticleOrigin, NewArticle, Pagination, PLACEHOLDER_IMAGE};
pub use store::{ArticleStore, POSTER_SIZE, SEARCH_ALL};
