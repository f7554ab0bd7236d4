//! # maps-express
//!
//! Attach map search pins to place names found in HTML, either in a document held in
//! memory or in a page open in Chrome.
//!
//! ## Features
//!
//! - **Annotation**: given newline-delimited candidate place names, put a 📍 link after the
//!   first occurrence of each name in every heading, bold run, paragraph and table cell
//! - **Document Model**: HTML parsed with `scraper`, edited in place with stable node ids
//! - **Message Dispatch**: `{"action": "attachMapLink", ...}` messages routed to named tools
//! - **Live Pages**: annotate the active tab of a launched or attached browser, inserting only
//!   the pins so the rest of the page is left as it was
//!
//! ## Library Usage
//!
//! ```rust
//! use maps_express::{AnnotationRequest, DomTree, attach_map_links};
//!
//! let mut document = DomTree::parse_fragment("<p>Picnic in Central Park today</p>");
//! let request = AnnotationRequest::new("Central Park", "https://www.google.com/maps?");
//!
//! let report = attach_map_links(&mut document, &request);
//! assert_eq!(report.pin_count(), 1);
//! assert!(document.to_html().contains("https://www.google.com/maps?q=Central%20Park"));
//! ```
//!
//! ### Dispatching Extension Messages
//!
//! ```rust
//! use maps_express::{Annotator, DomTree, ToolContext, ToolRegistry, message};
//!
//! # fn main() -> maps_express::Result<()> {
//! let registry = ToolRegistry::with_defaults();
//! let annotator = Annotator::default();
//! let mut document = DomTree::parse_fragment("<h2>Kyoto</h2>");
//! let mut context = ToolContext::new(&mut document, &annotator);
//!
//! let result = message::dispatch_raw(
//!     &registry,
//!     r#"{"action":"attachMapLink","content":"Kyoto","queryUrl":"https://maps.example/?"}"#,
//!     &mut context,
//! )?;
//! assert!(result.success);
//! # Ok(())
//! # }
//! ```
//!
//! ### Annotating a Live Page
//!
//! ```rust,no_run
//! use maps_express::{AnnotationRequest, BrowserSession, LaunchOptions};
//!
//! # fn main() -> maps_express::Result<()> {
//! let session = BrowserSession::launch(LaunchOptions::new().headless(false))?;
//! session.navigate("https://example.com")?;
//! session.wait_for_navigation()?;
//!
//! let report = session.annotate_page(&AnnotationRequest::new("Example", "https://www.google.com/maps?"))?;
//! println!("Added {} pins", report.pin_count());
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! - [`annotate`]: candidate parsing, eligibility rules, pin construction and the annotation pass
//! - [`dom`]: document tree over `scraper`: queries, CSS selection, edits and serialization
//! - [`tools`]: named tools and the registry messages are routed through
//! - [`message`]: extension message envelope and dispatch
//! - [`browser`]: Chrome session management and in-page pin replay
//! - [`error`]: Error types and result aliases

pub mod annotate;
pub mod browser;
pub mod dom;
pub mod error;
pub mod message;
pub mod tools;

pub use annotate::{AnnotationReport, AnnotationRequest, Annotator, AnnotatorOptions, attach_map_links};
pub use browser::{BrowserSession, ConnectionOptions, LaunchOptions};
pub use dom::{DomTree, ElementData, NodeId};
pub use error::{MapsError, Result};
pub use tools::{Tool, ToolContext, ToolRegistry, ToolResult};
