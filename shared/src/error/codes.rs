//! Unified error codes for the Bistro backend
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Account errors
//! - 4xxx: Order errors
//! - 5xxx: Menu errors
//! - 6xxx: Contact / newsletter errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so the storefront can
/// branch on them without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request (malformed body or query)
    InvalidRequest = 5,
    /// Invalid format (shape check on a field failed)
    InvalidFormat = 6,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Admin role required
    AdminRequired = 2003,

    // ==================== 3xxx: Account ====================
    /// Email is already registered
    EmailAlreadyRegistered = 3001,
    /// Unknown role value
    InvalidRole = 3003,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order has no valid items
    OrderEmpty = 4007,
    /// Status is not one of the five stages
    InvalidOrderStatus = 4010,
    /// Current step outside 1..=5
    InvalidOrderStep = 4011,
    /// Order item failed validation after normalization
    InvalidOrderItem = 4012,
    /// Order number collided with an existing order
    OrderNumberConflict = 4013,

    // ==================== 5xxx: Menu ====================
    /// Menu item not found
    MenuItemNotFound = 5001,
    /// Menu item has invalid price
    MenuItemInvalidPrice = 5002,
    /// Category is not in the closed set
    InvalidCategory = 5003,
    /// Spice level is not in the closed set
    InvalidSpiceLevel = 5004,
    /// Rating outside 1..=5 or not a whole number
    InvalidRating = 5101,

    // ==================== 6xxx: Contact / Newsletter ====================
    /// Email address has an invalid shape
    InvalidEmail = 6001,
    /// Contact message exceeds the length limit
    MessageTooLong = 6002,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Database is not reachable
    DatabaseUnavailable = 9003,
    /// Request timed out
    TimeoutError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",

            // Auth
            ErrorCode::NotAuthenticated => "No token provided",
            ErrorCode::InvalidCredentials => "Invalid email or password",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Invalid token",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::AdminRequired => "Access denied: Admins only",

            // Account
            ErrorCode::EmailAlreadyRegistered => "Email already exists",
            ErrorCode::InvalidRole => "Invalid role",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::OrderEmpty => "Items array invalid after normalization",
            ErrorCode::InvalidOrderStatus => "Invalid status value",
            ErrorCode::InvalidOrderStep => "Current step must be between 1 and 5",
            ErrorCode::InvalidOrderItem => "Invalid order item",
            ErrorCode::OrderNumberConflict => "Order number already taken, please retry",

            // Menu
            ErrorCode::MenuItemNotFound => "Menu item not found",
            ErrorCode::MenuItemInvalidPrice => "Price must be a non-negative number",
            ErrorCode::InvalidCategory => "Invalid category",
            ErrorCode::InvalidSpiceLevel => "Invalid spice level",
            ErrorCode::InvalidRating => "Rating must be a number between 1 and 5",

            // Contact / Newsletter
            ErrorCode::InvalidEmail => "Email must be a valid address",
            ErrorCode::MessageTooLong => "Message exceeds 500 character limit",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::DatabaseUnavailable => "Database not ready",
            ErrorCode::TimeoutError => "Operation timed out",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2003 => Ok(ErrorCode::AdminRequired),

            // Account
            3001 => Ok(ErrorCode::EmailAlreadyRegistered),
            3003 => Ok(ErrorCode::InvalidRole),

            // Order
            4001 => Ok(ErrorCode::OrderNotFound),
            4007 => Ok(ErrorCode::OrderEmpty),
            4010 => Ok(ErrorCode::InvalidOrderStatus),
            4011 => Ok(ErrorCode::InvalidOrderStep),
            4012 => Ok(ErrorCode::InvalidOrderItem),
            4013 => Ok(ErrorCode::OrderNumberConflict),

            // Menu
            5001 => Ok(ErrorCode::MenuItemNotFound),
            5002 => Ok(ErrorCode::MenuItemInvalidPrice),
            5003 => Ok(ErrorCode::InvalidCategory),
            5004 => Ok(ErrorCode::InvalidSpiceLevel),
            5101 => Ok(ErrorCode::InvalidRating),

            // Contact / Newsletter
            6001 => Ok(ErrorCode::InvalidEmail),
            6002 => Ok(ErrorCode::MessageTooLong),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9003 => Ok(ErrorCode::DatabaseUnavailable),
            9005 => Ok(ErrorCode::TimeoutError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::NotAuthenticated.code(), 1001);
        assert_eq!(ErrorCode::AdminRequired.code(), 2003);
        assert_eq!(ErrorCode::EmailAlreadyRegistered.code(), 3001);
        assert_eq!(ErrorCode::OrderNotFound.code(), 4001);
        assert_eq!(ErrorCode::MenuItemNotFound.code(), 5001);
        assert_eq!(ErrorCode::InvalidEmail.code(), 6001);
        assert_eq!(ErrorCode::DatabaseUnavailable.code(), 9003);
        assert_eq!(ErrorCode::TimeoutError.code(), 9005);
    }

    #[test]
    fn test_try_from_round_trips_every_code() {
        let all = [
            ErrorCode::ValidationFailed,
            ErrorCode::NotFound,
            ErrorCode::AlreadyExists,
            ErrorCode::InvalidRequest,
            ErrorCode::InvalidFormat,
            ErrorCode::NotAuthenticated,
            ErrorCode::InvalidCredentials,
            ErrorCode::TokenExpired,
            ErrorCode::TokenInvalid,
            ErrorCode::PermissionDenied,
            ErrorCode::AdminRequired,
            ErrorCode::EmailAlreadyRegistered,
            ErrorCode::InvalidRole,
            ErrorCode::OrderNotFound,
            ErrorCode::OrderEmpty,
            ErrorCode::InvalidOrderStatus,
            ErrorCode::InvalidOrderStep,
            ErrorCode::InvalidOrderItem,
            ErrorCode::OrderNumberConflict,
            ErrorCode::MenuItemNotFound,
            ErrorCode::MenuItemInvalidPrice,
            ErrorCode::InvalidCategory,
            ErrorCode::InvalidSpiceLevel,
            ErrorCode::InvalidRating,
            ErrorCode::InvalidEmail,
            ErrorCode::MessageTooLong,
            ErrorCode::InternalError,
            ErrorCode::DatabaseError,
            ErrorCode::DatabaseUnavailable,
            ErrorCode::TimeoutError,
        ];
        for code in all {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(0), Err(InvalidErrorCode(0)));
        assert_eq!(ErrorCode::try_from(999), Err(InvalidErrorCode(999)));
        assert_eq!(ErrorCode::try_from(10000), Err(InvalidErrorCode(10000)));
    }

    #[test]
    fn test_serialize_as_number() {
        let json = serde_json::to_string(&ErrorCode::OrderNotFound).unwrap();
        assert_eq!(json, "4001");

        let code: ErrorCode = serde_json::from_str("5101").unwrap();
        assert_eq!(code, ErrorCode::InvalidRating);

        assert!(serde_json::from_str::<ErrorCode>("4242").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(ErrorCode::InvalidCredentials.to_string(), "1002");
    }
}
