mod traits;
mod exa_search;
mod website_search;
mod file_read;

pub use traits::*;
pub use exa_search::{format_results, ExaResult, ExaSearchTool};
pub use website_search::WebsiteSearchTool;
pub use file_read::FileReadTool;
