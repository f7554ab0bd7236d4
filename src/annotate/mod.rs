//! Map pin annotation
//!
//! Finds candidate place names in the text of headings, bold text, paragraphs and table
//! cells (plus the YouTube video description) and inserts a pin link right after the
//! first occurrence of each name in every qualifying element.
//!
//! The pass never fails: missing content, a missing query URL, or text that matches
//! nothing simply leaves the document untouched.

pub mod candidate;
pub mod pin;
pub mod scope;

pub use candidate::{Candidate, parse_candidates};
pub use pin::{MapLink, PIN_GLYPH, find_map_links, map_link_url};
pub use scope::{Ineligible, TAG_UNIVERSE, YOUTUBE_DESCRIPTION_SELECTOR};

use crate::dom::{DomTree, NodeId};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Candidates to pin and where the pins should point
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AnnotationRequest {
    /// Newline-delimited candidate place names; text after a run of 4+ spaces is ignored
    #[serde(default)]
    pub content: Option<String>,

    /// Map search URL prefix; `q=<encoded name>` is appended to it as-is
    #[serde(default, rename = "queryUrl", alias = "query_url")]
    pub query_url: Option<String>,
}

impl AnnotationRequest {
    pub fn new(content: impl Into<String>, query_url: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            query_url: Some(query_url.into()),
        }
    }
}

/// Knobs for the annotation pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotatorOptions {
    /// Element kinds scanned at the top level, in scan order
    pub tags: Vec<String>,

    /// Visible content of each pin
    pub pin_glyph: String,

    /// Also scan the spans of a YouTube video description
    pub scan_youtube_description: bool,
}

impl Default for AnnotatorOptions {
    fn default() -> Self {
        Self {
            tags: TAG_UNIVERSE.iter().map(|tag| tag.to_string()).collect(),
            pin_glyph: PIN_GLYPH.to_string(),
            scan_youtube_description: true,
        }
    }
}

impl AnnotatorOptions {
    /// Builder method: set the pin glyph
    pub fn pin_glyph(mut self, glyph: impl Into<String>) -> Self {
        self.pin_glyph = glyph.into();
        self
    }

    /// Builder method: toggle the YouTube description scan
    pub fn scan_youtube_description(mut self, enabled: bool) -> Self {
        self.scan_youtube_description = enabled;
        self
    }
}

/// A text node split made by a pass, replayable on a live copy of the same document.
///
/// Splices are recorded in the order they were made. Each one describes the tree as it was
/// right before that split, so replaying them in order reproduces the pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Splice {
    /// Child indices from the `<html>` element to the text node that was split
    pub path: Vec<usize>,

    /// Text node data before the split
    pub text: String,

    /// Byte offset of the split; the pin goes right after it
    pub offset: usize,
}

impl Splice {
    /// The split offset in UTF-16 code units, as browsers count text offsets
    pub fn utf16_offset(&self) -> usize {
        self.text
            .get(..self.offset)
            .map_or(0, |head| head.encode_utf16().count())
    }
}

/// A pin inserted by a pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PinRecord {
    /// Qualifying element the pin was placed in
    #[serde(skip)]
    pub element: NodeId,
    #[serde(skip)]
    pub pin: NodeId,
    pub key: String,
    pub href: String,
    pub splice: Splice,
}

/// What a pass did. Informational only; an empty report is not a failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnnotationReport {
    pub pins: Vec<PinRecord>,
    pub elements_scanned: usize,
    pub elements_skipped: usize,
}

impl AnnotationReport {
    pub fn pin_count(&self) -> usize {
        self.pins.len()
    }
}

/// Runs annotation passes over documents
#[derive(Debug, Clone, Default)]
pub struct Annotator {
    options: AnnotatorOptions,
}

struct Pass<'a> {
    candidates: &'a [Candidate],
    query_url: &'a str,
    link_prefix: String,
}

impl Annotator {
    pub fn new(options: AnnotatorOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &AnnotatorOptions {
        &self.options
    }

    /// Insert pins for every candidate in `request` into `tree`
    pub fn annotate(&self, tree: &mut DomTree, request: &AnnotationRequest) -> AnnotationReport {
        let mut report = AnnotationReport::default();

        let Some(content) = request.content.as_deref().filter(|c| !c.is_empty()) else {
            debug!("No candidate content, nothing to annotate");
            return report;
        };
        // an empty query URL is still used verbatim, giving relative `q=...` links
        let Some(query_url) = request.query_url.as_deref() else {
            debug!("No query URL, nothing to annotate");
            return report;
        };

        let candidates = parse_candidates(content);
        if candidates.is_empty() {
            debug!("Content has no candidate lines");
            return report;
        }

        let pass = Pass {
            candidates: &candidates,
            query_url,
            link_prefix: pin::map_link_prefix(query_url),
        };

        for tag in &self.options.tags {
            // snapshot: pins created below are never part of the scan
            for element in tree.elements_by_tag(tag) {
                self.annotate_element(tree, element, &pass, &mut report);
            }
        }

        if self.options.scan_youtube_description {
            for span in scope::youtube_description_spans(tree) {
                self.annotate_element(tree, span, &pass, &mut report);
            }
        }

        info!(
            "Inserted {} pins for {} candidates ({} elements scanned, {} skipped)",
            report.pin_count(),
            candidates.len(),
            report.elements_scanned,
            report.elements_skipped
        );

        report
    }

    fn annotate_element(
        &self,
        tree: &mut DomTree,
        element: NodeId,
        pass: &Pass<'_>,
        report: &mut AnnotationReport,
    ) {
        report.elements_scanned += 1;

        if let Err(reason) = scope::check_eligibility(tree, element, &pass.link_prefix) {
            debug!("Skipping <{}>: {}", tag_of(tree, element), reason);
            report.elements_skipped += 1;
            return;
        }

        let mut processed: HashSet<&str> = HashSet::new();

        for candidate in pass.candidates {
            let key = candidate.matching_key();
            if key.is_empty() || processed.contains(key) {
                continue;
            }
            if !tree.text_content(element).contains(key) {
                continue;
            }

            let href = map_link_url(pass.query_url, key);
            if let Some((pin, splice)) = splice_pin(tree, element, key, &href, &self.options.pin_glyph) {
                debug!("Pinned '{}' at {:?}", key, splice.path);
                processed.insert(key);
                report.pins.push(PinRecord {
                    element,
                    pin,
                    key: key.to_string(),
                    href,
                    splice,
                });
            }
        }
    }
}

/// Split the first text node under `element` that contains `key` right after the match
/// and put a pin between the two halves. Returns `None` when no single text node holds
/// the whole key (e.g. it straddles inline markup).
fn splice_pin(
    tree: &mut DomTree,
    element: NodeId,
    key: &str,
    href: &str,
    glyph: &str,
) -> Option<(NodeId, Splice)> {
    let text_node = tree
        .text_nodes(element)
        .find(|id| tree.text(*id).is_some_and(|text| text.contains(key)))?;

    let text = tree.text(text_node)?.to_string();
    // literal search: the key is never interpreted as a pattern
    let end = text.find(key)? + key.len();
    let splice = Splice {
        path: tree.child_path(text_node),
        text,
        offset: end,
    };
    let (head, tail) = splice.text.split_at(end);

    let pin = pin::insert_pin_after(tree, text_node, href, glyph)?;
    tree.set_text(text_node, head);
    if !tail.is_empty() {
        tree.insert_text_after(pin, tail);
    }

    Some((pin, splice))
}

fn tag_of(tree: &DomTree, id: NodeId) -> &str {
    tree.element(id).map_or("?", |el| el.name())
}

/// Run a pass with default options
pub fn attach_map_links(tree: &mut DomTree, request: &AnnotationRequest) -> AnnotationReport {
    Annotator::default().annotate(tree, request)
}
