//! Remote user listing collaborator.
//!
//! # Responsibility
//! - Define the narrow fetch contract consumed by [`crate::UserStore`].
//! - Provide the HTTP implementation and the wire payload mapping.
//!
//! # Invariants
//! - Any non-2xx status is a failure, regardless of body.
//! - Sources never retry on their own; retry is a store-level action.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod http;
pub mod payload;

use payload::RemoteUser;

pub type SourceResult<T> = Result<T, SourceError>;

/// Failure to obtain the remote user listing.
#[derive(Debug)]
pub enum SourceError {
    /// Server answered with a non-success status code.
    Status(u16),
    /// Request could not be sent or the body could not be read.
    Transport(reqwest::Error),
    /// Body was not the expected JSON array.
    Decode(serde_json::Error),
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Status(code) => write!(f, "request failed with status {code}"),
            Self::Transport(err) => write!(f, "transport error: {err}"),
            Self::Decode(err) => write!(f, "invalid users payload: {err}"),
        }
    }
}

impl Error for SourceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Status(_) => None,
            Self::Transport(err) => Some(err),
            Self::Decode(err) => Some(err),
        }
    }
}

/// Supplies the remote user listing.
pub trait UserSource {
    fn fetch_users(&self) -> SourceResult<Vec<RemoteUser>>;
}
