mod client;
mod hunting;

pub use client::{ApiClient, ApiError};
pub use hunting::{ResultRow, HUNTING_QUERY};
