//! Table error types.

use thiserror::Error;

/// Errors raised while reading a table's header markup or building links.
///
/// The controller never surfaces these to the page: a header that fails to
/// parse is logged and skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// A sortable or filterable header has no `column-index` attribute.
    #[error("header '{header_id}' has no column index")]
    MissingColumnIndex {
        /// ID of the offending header cell.
        header_id: String,
    },

    /// The `column-index` attribute is not a non-negative integer.
    #[error("header '{header_id}' has invalid column index '{value}'")]
    InvalidColumnIndex {
        /// ID of the offending header cell.
        header_id: String,
        /// Raw attribute value.
        value: String,
    },

    /// Linked mode needs a `column-key` on every sortable or filterable header.
    #[error("column {index} has no column key")]
    MissingColumnKey {
        /// Column index of the header.
        index: usize,
    },

    /// Base URL could not be parsed.
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
}
