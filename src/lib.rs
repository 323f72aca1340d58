/*!
 * PromptBucket - prompt package manager
 *
 * CLI plumbing around the manifest pipeline core:
 * - Registry HTTP client (search, pull, push)
 * - Local token storage for authenticated requests
 * - Manifest loading from disk or URL
 * - Configuration and logging
 *
 * The pipeline itself (parsing, validation, inheritance resolution,
 * persona composition, variable substitution, archive construction)
 * lives in the promptbucket-core-manifest crate.
 */

pub mod commands;
pub mod config;
pub mod loader;
pub mod logging;
pub mod registry;
pub mod session;

pub use config::Config;
pub use loader::Loader;
pub use registry::RegistryClient;
pub use session::{Token, TokenStore};

/// CLI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
