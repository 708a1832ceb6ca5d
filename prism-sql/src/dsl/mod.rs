//! Search request document assembly

pub mod path;
mod translator;

pub use path::{insert_at, AggsPath, AGGS_KEY};
pub use translator::DslTranslator;
