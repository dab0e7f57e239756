use thiserror::Error;

use crate::song::Field;

/// Error enumerates over all possible errors that this package
/// shall return. Missing entries are not errors, lookups and deletes
/// return `None` for them.
#[derive(Error, Debug, PartialEq)]
pub enum Error {
    /// Fatal case, a red node has a red child. The String component
    /// carries the offending parent title.
    #[error("consecutive reds at {0:?}")]
    ConsecutiveReds(String),
    /// Fatal case, black height differs under left and right child.
    /// The String component can be used for debugging.
    #[error("unbalanced blacks, {0}")]
    UnbalancedBlacks(String),
    /// Fatal case, index entries are not in sort-order.
    #[error("sort error, {0:?} before {1:?}")]
    SortError(String, String),
    /// Fatal case, root is red after a completed operation.
    #[error("red root {0:?}")]
    RedRoot(String),
    /// Fatal case, a child does not point back to its parent.
    #[error("broken parent link at {0:?}")]
    BrokenLink(String),
    /// Ordered search requested on a field the tree is not keyed on.
    #[error("ordered search on non-key field {0}")]
    InvalidSelector(Field),
    /// Field name that does not name any [`Field`].
    #[error("unknown field {0:?}")]
    UnknownField(String),
}

pub type Result<T> = std::result::Result<T, Error>;
