//! Access to the project registry.
//!
//! The registry exposes projects, releases, and issues as "nodes" behind a
//! single listing endpoint filtered by query parameters.

mod cache;
mod cache_lock;
mod client;
mod issue;
mod lenient;
mod node_list;
mod node_query;
mod path_utils;
mod project;
mod release;
mod resilient_http;
mod taxonomy;

pub use cache::ResponseCache;
pub use cache_lock::{CacheLockGuard, acquire_cache_lock};
pub use client::{DEFAULT_REGISTRY_URL, NodeSource, RegistryClient};
pub use issue::Issue;
pub use node_list::NodeList;
pub use node_query::{Direction, NodeQuery};
pub use path_utils::sanitize_path_component;
pub use project::Project;
pub use release::Release;
pub use resilient_http::{DEFAULT_DOWNLOAD_TIMEOUT, resilient_download, resilient_get};
pub use taxonomy::{Coded, CoreCompatibility, IssueCategory, IssuePriority, IssueStatus, NodeType};
