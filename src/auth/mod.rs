pub mod dto;
pub mod services;
pub mod session;
pub mod validation;

pub use dto::{LoginResponse, User};
pub use session::{SessionState, SessionStore};
