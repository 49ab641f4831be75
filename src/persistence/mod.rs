pub mod forms;
pub mod http;
pub mod memory;
pub mod model;
pub mod store;
