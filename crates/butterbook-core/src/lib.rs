pub mod app_config;
pub mod config;
mod lenient;
pub mod products;
pub mod stores;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use products::{
    title_case, BrandRef, ButterType, CanonicalProduct, ImageObject, ImageRef, LooseNumber,
    RawProductRecord, StoreRef,
};
pub use stores::Store;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
