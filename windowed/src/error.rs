use crate::Axis;

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Setup errors. These are never defaulted away.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{axis} axis needs either a fixed item size or an item size estimate")]
    MissingSizeFunction { axis: Axis },
}

impl ConfigError {
    pub fn missing_size_function(axis: Axis) -> Self {
        Self::MissingSizeFunction { axis }
    }
}
