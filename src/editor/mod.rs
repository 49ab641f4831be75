pub mod error;
pub mod outline;
pub mod properties;
pub mod session;
