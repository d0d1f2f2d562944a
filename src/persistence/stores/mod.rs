mod file;
mod http;

pub use file::FileStore;
pub use http::HttpStore;
