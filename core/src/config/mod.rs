//! Documentation descriptor model
//!
//! Only pure data types and path arithmetic live here. Reading and writing
//! files is in [`crate::store`].

pub mod types;

pub use types::{
    IntrospectionSource, MagidocConfig, WebsiteConfig, WebsiteOptions, DEFAULT_TEMPLATE,
};
