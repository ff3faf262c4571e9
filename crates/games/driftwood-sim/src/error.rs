/// Failure to load a [`SimConfig`](crate::config::SimConfig) from disk.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },
}

/// Authored level data that cannot be turned into a world.
#[derive(Debug, thiserror::Error)]
pub enum LevelError {
    #[error("failed to read level {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid level file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("level has no player spawn")]
    MissingPlayer,

    #[error("level has more than one player spawn")]
    DuplicatePlayer,

    #[error("{object}: {property} must be a positive finite number, got {value}")]
    NonPositive {
        object: String,
        property: &'static str,
        value: f32,
    },

    #[error("{object}: {property} must be finite and not negative, got {value}")]
    Negative {
        object: String,
        property: &'static str,
        value: f32,
    },

    #[error("{object}: path of {path} px is shorter than its {body} px body")]
    PathShorterThanBody {
        object: String,
        path: f32,
        body: f32,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("unknown enemy `{0}`")]
    UnknownEnemy(String),

    #[error("{object}: missing `{property}`")]
    MissingProperty {
        object: String,
        property: &'static str,
    },
}
