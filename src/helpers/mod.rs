//! Helper functions shared by the loader, templates and server

mod html;
mod text;
mod url;

pub use html::*;
pub use text::*;
pub use url::*;
