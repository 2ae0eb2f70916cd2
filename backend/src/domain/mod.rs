//! Domain primitives, services, and ports.
//!
//! Purpose: keep the user model, the repository façade, and the date stream
//! producer free of HTTP concerns. Inbound adapters translate these types to
//! protocol responses; outbound adapters implement [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode / ApiResult: transport-agnostic failures.
//! - User, UserId, Login, Age: the stored user document.
//! - UserRepository: typed façade over the [`ports::UserStore`].
//! - DateStream: bounded timestamp producer.
//! - TraceId: request correlation identifier.

pub mod date_stream;
pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod user_repository;

pub use self::date_stream::DateStream;
pub use self::error::{ApiResult, Error, ErrorCode};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{Age, Login, User, UserId, UserValidationError};
pub use self::user_repository::{SEED_TEST_USER_ID, UserRepository};
