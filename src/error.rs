//! Failure conditions for map lookups and removals.

use thiserror::Error;

/// The error returned by [`Map::get`](crate::Map::get),
/// [`Map::get_mut`](crate::Map::get_mut), and
/// [`Map::remove`](crate::Map::remove) when the requested key is absent.
///
/// The offending key is carried along for diagnostics; a failed lookup never
/// yields a default value or disturbs the map.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("no entry found for key `{key:?}`")]
pub struct NotFound<Q> {
    /// The key that was not present in the map.
    pub key: Q,
}
