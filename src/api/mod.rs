//! Lambda handlers and proxy-event plumbing

pub mod export;
pub mod helpers;
pub mod parsing;
pub mod register;
