use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unexpected shape for {context}: expected an array or an object with one of {keys}")]
    UnexpectedShape { context: String, keys: String },
}
