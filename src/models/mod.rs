//! Data models for the Chronicle notification backend.
//!
//! Wire-facing types match the site's JSON contract (camelCase fields).

mod content;
mod notification;
mod subscription;

pub use content::*;
pub use notification::*;
pub use subscription::*;
