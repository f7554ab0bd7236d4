//! Live pages: launch or attach to Chrome and annotate the open tab

pub mod config;
pub mod page;
pub mod session;

pub use config::{ConnectionOptions, LaunchOptions};
pub use session::BrowserSession;
