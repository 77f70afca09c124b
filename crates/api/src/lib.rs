pub mod archive;
pub mod error;

// Re-export commonly used types
pub use archive::{Archive, Entry, EntryIter};
pub use error::{ErrorKind, LoaderError, Result};
pub use url::Url;
