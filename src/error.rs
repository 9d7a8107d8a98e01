//! Error types for notification service operations.
//!
//! Every fallible operation in this crate returns `Result<T, AnsError>`.
//! The variants mirror the result-code taxonomy of the notification
//! service's wire protocol; `code` holds the raw `i32` values carried in
//! reply parcels.

/// Result type for notification service operations.
pub type Result<T> = std::result::Result<T, AnsError>;

/// Raw wire-level result codes.
///
/// These values are fixed by the service's wire protocol and re-exported
/// here so tests and transports can script replies without referencing
/// magic numbers.
pub mod code {
    /// Operation succeeded.
    pub const ERR_OK: i32 = 0;
    /// A required argument was missing or malformed.
    pub const ERR_INVALID_PARAM: i32 = 1;
    /// The referenced bundle does not exist.
    pub const ERR_INVALID_BUNDLE: i32 = 2;
    /// The referenced uid does not exist.
    pub const ERR_INVALID_UID: i32 = 3;
    /// Parcel serialization or deserialization failed.
    pub const ERR_PARCELABLE_FAILED: i32 = 4;
    /// The transaction was rejected by the transport.
    pub const ERR_TRANSACT_FAILED: i32 = 5;
    /// The remote object is gone.
    pub const ERR_DEAD_OBJECT: i32 = 6;
    /// No connection to the service has been established.
    pub const ERR_SERVICE_NOT_CONNECTED: i32 = 7;
}

/// Errors that can occur during notification service operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnsError {
    /// A required argument was missing or malformed.
    #[error("invalid parameter")]
    InvalidParam,

    /// The referenced bundle does not exist.
    #[error("invalid bundle")]
    InvalidBundle,

    /// The referenced uid does not exist.
    #[error("invalid uid")]
    InvalidUid,

    /// Writing or reading a parcel failed, including replies that carry a
    /// success code but are missing an expected out-parameter.
    #[error("parcel serialization failed")]
    ParcelableFailed,

    /// The transport rejected the transaction with a non-zero status.
    #[error("transaction failed with status {0}")]
    TransactFailed(i32),

    /// The remote object died before or during the transaction.
    #[error("remote object is dead")]
    DeadObject,

    /// The client is not connected to the service.
    #[error("service not connected")]
    ServiceNotConnected,

    /// The remote side reported an error code not mapped to a local
    /// precondition or transport failure. Passed through verbatim.
    #[error("remote returned error code {0}")]
    Remote(i32),
}

impl AnsError {
    /// Map a non-zero leading reply code to an error.
    ///
    /// Codes without a local meaning are passed through as [`AnsError::Remote`].
    pub fn from_code(code: i32) -> Self {
        match code {
            code::ERR_INVALID_PARAM => AnsError::InvalidParam,
            code::ERR_INVALID_BUNDLE => AnsError::InvalidBundle,
            code::ERR_INVALID_UID => AnsError::InvalidUid,
            code::ERR_PARCELABLE_FAILED => AnsError::ParcelableFailed,
            code::ERR_SERVICE_NOT_CONNECTED => AnsError::ServiceNotConnected,
            other => AnsError::Remote(other),
        }
    }

    /// The raw wire code for this error.
    pub fn to_code(&self) -> i32 {
        match self {
            AnsError::InvalidParam => code::ERR_INVALID_PARAM,
            AnsError::InvalidBundle => code::ERR_INVALID_BUNDLE,
            AnsError::InvalidUid => code::ERR_INVALID_UID,
            AnsError::ParcelableFailed => code::ERR_PARCELABLE_FAILED,
            AnsError::TransactFailed(_) => code::ERR_TRANSACT_FAILED,
            AnsError::DeadObject => code::ERR_DEAD_OBJECT,
            AnsError::ServiceNotConnected => code::ERR_SERVICE_NOT_CONNECTED,
            AnsError::Remote(code) => *code,
        }
    }

    /// Returns true if the remote object died.
    pub fn is_dead_object(&self) -> bool {
        matches!(self, AnsError::DeadObject)
    }

    /// Returns true if this is a local precondition failure that never
    /// reached the transport.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            AnsError::InvalidParam | AnsError::ServiceNotConnected
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code_maps_known_codes() {
        assert_eq!(AnsError::from_code(code::ERR_INVALID_PARAM), AnsError::InvalidParam);
        assert_eq!(
            AnsError::from_code(code::ERR_PARCELABLE_FAILED),
            AnsError::ParcelableFailed
        );
    }

    #[test]
    fn test_from_code_passes_unknown_codes_through() {
        assert_eq!(AnsError::from_code(67108870), AnsError::Remote(67108870));
        assert_eq!(AnsError::Remote(67108870).to_code(), 67108870);
    }

    #[test]
    fn test_to_code_round_trips_precondition_codes() {
        for err in [AnsError::InvalidParam, AnsError::InvalidBundle, AnsError::InvalidUid] {
            assert_eq!(AnsError::from_code(err.to_code()), err);
        }
    }
}
