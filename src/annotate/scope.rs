use crate::dom::{DomTree, NodeId};
use std::fmt;

/// Element kinds scanned at the top level, in scan order
pub const TAG_UNIVERSE: [&str; 6] = ["h1", "h2", "h3", "strong", "p", "td"];

/// Container of the YouTube video description; its direct `span` children are scanned
pub const YOUTUBE_DESCRIPTION_SELECTOR: &str =
    "#description ytd-text-inline-expander yt-attributed-string";

const YOUTUBE_FORMATTED_STRING: &str = "yt-formatted-string";
const YOUTUBE_COMPACT_VIDEO_CLASS: &str = "ytd-compact-video-renderer";

/// Why an element is left alone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ineligible {
    /// Already holds a map link, e.g. from an earlier pass
    ExistingMapLink,
    /// Contains YouTube widget chrome
    YoutubeFormattedString,
    /// Is part of a YouTube compact video renderer
    YoutubeCompactVideo,
}

impl fmt::Display for Ineligible {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::ExistingMapLink => "already contains a map link",
            Self::YoutubeFormattedString => "contains yt-formatted-string",
            Self::YoutubeCompactVideo => "is a compact video renderer",
        };
        f.write_str(reason)
    }
}

/// Decide whether `element` may receive pins. `link_prefix` identifies existing map links.
pub fn check_eligibility(
    tree: &DomTree,
    element: NodeId,
    link_prefix: &str,
) -> Result<(), Ineligible> {
    let has_map_link = tree
        .find_descendant_element(element, |el| {
            el.name() == "a"
                && el
                    .attr("href")
                    .is_some_and(|href| href.starts_with(link_prefix))
        })
        .is_some();
    if has_map_link {
        return Err(Ineligible::ExistingMapLink);
    }

    if tree
        .find_descendant_element(element, |el| el.name() == YOUTUBE_FORMATTED_STRING)
        .is_some()
    {
        return Err(Ineligible::YoutubeFormattedString);
    }

    if tree
        .element(element)
        .is_some_and(|el| el.classes().any(|class| class == YOUTUBE_COMPACT_VIDEO_CLASS))
    {
        return Err(Ineligible::YoutubeCompactVideo);
    }

    Ok(())
}

/// Direct `span` children of the YouTube description container, if the page has one
pub fn youtube_description_spans(tree: &DomTree) -> Vec<NodeId> {
    let container = match tree.query_selector(YOUTUBE_DESCRIPTION_SELECTOR) {
        Ok(Some(container)) => container,
        _ => return Vec::new(),
    };

    tree.element_children(container)
        .into_iter()
        .filter(|child| tree.element(*child).is_some_and(|el| el.name() == "span"))
        .collect()
}
