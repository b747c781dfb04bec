//! Application services for user accounts.

mod registry;

pub use registry::{RegisterUserRequest, UserService, UserServiceError, UserServiceResult};
