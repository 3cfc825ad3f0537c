pub mod config;
pub mod logging;

pub mod detect;
pub mod error;
pub mod fetch;
pub mod locator;
pub mod recording;
pub mod source;
pub mod v1;
pub mod v2;

pub use error::LoadError;
pub use recording::{Event, Header, Recording};
pub use source::{open_source, open_source_with};
