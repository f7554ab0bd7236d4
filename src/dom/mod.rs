//! Document model the annotator works on
//!
//! Documents are parsed, queried and serialized with `scraper`; edits go straight into its
//! `ego_tree` arena:
//! - DomTree: parsing, tree queries, CSS selection, text edits and sibling insertion
//! - ElementData: tag name and ordered attributes of an element to be inserted
//! - NodeId: stable handle to a node, valid across insertions

pub mod element;
pub mod tree;

pub use ego_tree::NodeId;
pub use element::ElementData;
pub use tree::DomTree;
