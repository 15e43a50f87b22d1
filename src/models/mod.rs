//! Core data models for requests and normalized responses.

mod request;
mod response;

pub use request::{BrowseFeed, PostFilters, Request, Section, Skin, SortBy, Version};
pub use response::{ApiResponse, Pagination, Record, ResponseBody};
