use popmenu_placement::PlacementError;
use thiserror::Error;

/// Errors emitted while reading or writing the menu config file.
#[derive(Debug, Error)]
pub(crate) enum StorageError {
    #[error("menu config IO failed")]
    Io(#[from] std::io::Error),
    #[error("menu config encoding failed")]
    Config(#[from] PlacementError),
}
