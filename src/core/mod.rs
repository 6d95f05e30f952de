// src/core/mod.rs

pub mod html;
pub mod http;
pub mod sanitize;
pub mod session;

pub use http::{Credentials, HttpSession};
pub use session::{Endpoints, Session};
