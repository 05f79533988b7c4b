use std::path::PathBuf;

use thiserror::Error;

/// Every way a run can fail. All of them are fatal.
#[derive(Debug, Error)]
pub enum QbError {
    /// The input could not be opened or read.
    #[error("cannot read data source '{}'", path.display())]
    DataSource {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("unsupported file extension '.{extension}' for '{}'", path.display())]
    UnsupportedFormat { path: PathBuf, extension: String },

    /// A required column is absent from the input header.
    #[error("data source '{}' is missing required column '{column}'", path.display())]
    Schema { path: PathBuf, column: String },

    #[error("{}, row {row}: column '{column}' has invalid value '{value}'", path.display())]
    InvalidValue {
        path: PathBuf,
        row: usize,
        column: String,
        value: String,
    },

    #[error("{}: player '{player}' appears more than once", path.display())]
    DuplicatePlayer { path: PathBuf, player: String },

    #[error("column '{column}' not found in table '{table}'")]
    ColumnNotFound { table: String, column: String },

    #[error("column '{column}' in table '{table}' is not numeric")]
    NonNumericColumn { table: String, column: String },

    /// Attempts = 0 leaves YPA and TD_per_Att undefined.
    #[error("cannot derive YPA and TD_per_Att for '{player}': Attempts is zero")]
    ArithmeticUndefined { player: String },

    #[error("writing report output")]
    Output(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, QbError>;
