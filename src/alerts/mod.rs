pub mod email;

pub use email::{AlertDispatcher, EmailAlerter};
