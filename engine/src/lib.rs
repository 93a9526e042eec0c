pub mod index;
pub mod lifecycle;
pub mod normalize;
pub mod persist;
pub mod query;
pub mod rank;

pub use index::{Index, Platform, Problem, TermVector};
pub use rank::{search, Page, Pagination, SearchResult, SortOrder};
