//! Storage Config

use std::path::PathBuf;

use clap::Args;

/// Where state and the catalog are read from.
#[derive(Debug, Clone, Args)]
pub struct StorageConfig {
    /// Directory holding persisted cart, orders, wishlist and user
    #[arg(long, env = "STOREFRONT_DATA_DIR", default_value = ".storefront")]
    pub data_dir: PathBuf,

    /// YAML catalog file (built-in catalog when omitted)
    #[arg(long, env = "STOREFRONT_CATALOG")]
    pub catalog: Option<PathBuf>,
}
