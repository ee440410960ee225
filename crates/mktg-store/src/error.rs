use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON serialization error for {context}: {source}")]
    Serialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{path} is locked by another writer; remove the .lock file if no other run is active")]
    Locked { path: String },

    #[error("refusing to overwrite write-once document {key}")]
    AlreadyExists { key: String },
}
