//! Scoped store configuration: sources, scope fallback, and `config:show`.
//!
//! Values are layered by source priority within each scope, then resolved
//! along the default -> website -> store chain.
pub mod error;
pub mod paths;
pub mod scope;
pub mod show;
pub mod sources;
pub mod structure;
pub mod tree;

pub use paths::StoreRootPaths;
pub use show::{ConfigShow, ShowRequest};
