pub mod file_store;
pub mod html;

pub use file_store::FileKeyValueStore;
pub use html::HtmlRenderer;
