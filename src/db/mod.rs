pub mod connection;
pub mod dispatch;

pub use connection::*;
pub use dispatch::*;
