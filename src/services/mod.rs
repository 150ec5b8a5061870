pub mod catalog;
pub mod listing;
pub mod recommendations;
pub mod search;

pub use catalog::CatalogService;
