use maps_express::annotate::find_map_links;
use maps_express::{AnnotationRequest, Annotator, AnnotatorOptions, DomTree, NodeId, attach_map_links};

const QUERY_URL: &str = "https://www.google.com/maps?";

fn annotate(html: &str, content: &str) -> DomTree {
    let mut tree = DomTree::parse_fragment(html);
    attach_map_links(&mut tree, &AnnotationRequest::new(content, QUERY_URL));
    tree
}

fn pin_keys(tree: &DomTree) -> Vec<String> {
    find_map_links(tree, QUERY_URL).into_iter().map(|link| link.key).collect()
}

fn first(tree: &DomTree, tag: &str) -> NodeId {
    tree.elements_by_tag(tag)[0]
}

#[test]
fn test_pin_markup() {
    let tree = annotate("<p>Before Central Park After</p>", "Central Park");

    assert_eq!(
        tree.to_html(),
        concat!(
            "<p>Before Central Park",
            r#"<a href="https://www.google.com/maps?q=Central%20Park" target="_blank" "#,
            r#"rel="noopener noreferrer" style="text-decoration: none; border: none;">📍</a>"#,
            " After</p>"
        )
    );
}

#[test]
fn test_second_pass_changes_nothing() {
    let mut tree = DomTree::parse_fragment("<h1>Tokyo</h1><p>Tokyo and Kyoto</p><td>Kyoto</td>");
    let request = AnnotationRequest::new("Tokyo\nKyoto", QUERY_URL);

    let first_pass = attach_map_links(&mut tree, &request);
    let html = tree.to_html();
    let second_pass = attach_map_links(&mut tree, &request);

    assert!(first_pass.pin_count() > 0);
    assert_eq!(second_pass.pin_count(), 0);
    assert_eq!(tree.to_html(), html);
}

#[test]
fn test_duplicate_keys_pin_once_per_element() {
    let tree = annotate(
        "<p>Picnic in Central Park</p>",
        "Central Park\nCentral Park    huge park in NYC\nCentral Park",
    );

    assert_eq!(pin_keys(&tree), vec!["Central Park"]);
}

#[test]
fn test_clue_after_separator_is_ignored() {
    let tree = annotate("<h2>Shibuya Crossing</h2>", "Shibuya Crossing    busiest crossing in Tokyo");

    assert_eq!(pin_keys(&tree), vec!["Shibuya Crossing"]);
    assert!(!tree.to_html().contains("busiest"));
}

#[test]
fn test_three_spaces_are_not_a_separator() {
    let tree = annotate("<p>Shibuya Crossing</p>", "Shibuya   Crossing");
    assert!(pin_keys(&tree).is_empty());
}

#[test]
fn test_regex_metacharacters_match_literally() {
    let tree = annotate("<p>Meet at [Test] Location (north gate)</p>", "[Test] Location\nnorth gate)");

    assert_eq!(pin_keys(&tree), vec!["[Test] Location", "north gate)"]);
    assert!(tree.to_html().contains("q=%5BTest%5D%20Location"));
}

#[test]
fn test_matching_is_case_sensitive() {
    let tree = annotate("<p>central park</p>", "Central Park");
    assert!(pin_keys(&tree).is_empty());
}

#[test]
fn test_element_with_map_link_is_skipped() {
    let tree = annotate(
        r#"<p>Central Park <a href="https://www.google.com/maps?q=Elsewhere">📍</a></p><p>Central Park</p>"#,
        "Central Park",
    );

    let links = find_map_links(&tree, QUERY_URL);
    assert_eq!(links.len(), 2);
    assert_eq!(links[0].key, "Elsewhere");
    assert_eq!(links[1].key, "Central Park");
}

#[test]
fn test_link_to_other_map_service_does_not_block() {
    let tree = annotate(
        r#"<p>Central Park <a href="https://maps.other.example/?q=Central%20Park">map</a></p>"#,
        "Central Park",
    );
    assert_eq!(pin_keys(&tree), vec!["Central Park"]);
}

#[test]
fn test_youtube_widgets_are_skipped() {
    let tree = annotate(
        concat!(
            "<p><yt-formatted-string>Central Park</yt-formatted-string></p>",
            r#"<h3 class="style-scope ytd-compact-video-renderer">Central Park</h3>"#,
        ),
        "Central Park",
    );
    assert!(pin_keys(&tree).is_empty());
}

#[test]
fn test_nested_qualifying_elements_pin_once() {
    let tree = annotate("<h1><strong>Central Park</strong></h1><p><strong>Kyoto</strong> trip</p>", "Central Park\nKyoto");

    assert_eq!(pin_keys(&tree), vec!["Central Park", "Kyoto"]);
    assert!(tree.to_html().starts_with("<h1><strong>Central Park<a "));
}

#[test]
fn test_scan_order_follows_tag_kinds() {
    let mut tree = DomTree::parse_fragment(
        "<table><tbody><tr><td>Rome</td></tr></tbody></table><p>Rome</p><strong>Rome</strong><h3>Rome</h3><h1>Rome</h1>",
    );

    let report = attach_map_links(&mut tree, &AnnotationRequest::new("Rome", QUERY_URL));

    let tags: Vec<_> = report
        .pins
        .iter()
        .map(|pin| tree.element(pin.element).map(|el| el.name().to_string()).unwrap_or_default())
        .collect();
    assert_eq!(tags, vec!["h1", "h3", "strong", "p", "td"]);
}

#[test]
fn test_other_elements_are_out_of_scope() {
    let tree = annotate(
        "<div>Rome</div><span>Rome</span><ul><li>Rome</li></ul><h4>Rome</h4><em>Rome</em>",
        "Rome",
    );
    assert!(pin_keys(&tree).is_empty());
}

#[test]
fn test_empty_or_blank_content_is_noop() {
    let html = "<p>Central Park</p>";

    for content in ["", "\n\n", "   \n\t  \n"] {
        let tree = annotate(html, content);
        assert_eq!(tree.to_html(), html, "content {:?}", content);
    }

    let mut tree = DomTree::parse_fragment(html);
    let request = AnnotationRequest {
        content: None,
        query_url: Some(QUERY_URL.to_string()),
    };
    assert_eq!(attach_map_links(&mut tree, &request).pin_count(), 0);
    assert_eq!(tree.to_html(), html);
}

#[test]
fn test_empty_query_url_gives_relative_links() {
    let mut tree = DomTree::parse_fragment("<p>Central Park</p>");
    let report = attach_map_links(&mut tree, &AnnotationRequest::new("Central Park", ""));

    assert_eq!(report.pin_count(), 1);
    assert_eq!(report.pins[0].href, "q=Central%20Park");
    assert_eq!(find_map_links(&tree, "")[0].key, "Central Park");

    let mut tree = DomTree::parse_fragment("<p>Central Park</p>");
    let request = AnnotationRequest {
        content: Some("Central Park".to_string()),
        query_url: None,
    };
    assert_eq!(attach_map_links(&mut tree, &request).pin_count(), 0);
    assert_eq!(tree.to_html(), "<p>Central Park</p>");
}

#[test]
fn test_query_url_is_used_verbatim() {
    let mut tree = DomTree::parse_fragment("<p>Café &amp; Bar Lisboa</p>");
    attach_map_links(&mut tree, &AnnotationRequest::new("Café & Bar", "https://maps.example/search"));

    let links = find_map_links(&tree, "https://maps.example/search");
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].href, "https://maps.example/searchq=Caf%C3%A9%20%26%20Bar");

    let encoded = links[0].href.trim_start_matches("https://maps.example/searchq=");
    assert_eq!(urlencoding::decode(encoded).unwrap(), "Café & Bar");
}

#[test]
fn test_youtube_description_spans_are_annotated() {
    let html = concat!(
        r#"<div id="description"><ytd-text-inline-expander><yt-attributed-string>"#,
        "<span>Filmed around Kyoto and Nara</span>",
        "</yt-attributed-string></ytd-text-inline-expander></div>",
        "<span>Kyoto</span>",
    );

    let tree = annotate(html, "Kyoto\nNara");
    assert_eq!(pin_keys(&tree), vec!["Kyoto", "Nara"]);
    assert!(tree.to_html().ends_with("</div><span>Kyoto</span>"));

    let mut tree = DomTree::parse_fragment(html);
    let annotator = Annotator::new(AnnotatorOptions::default().scan_youtube_description(false));
    annotator.annotate(&mut tree, &AnnotationRequest::new("Kyoto", QUERY_URL));
    assert!(pin_keys(&tree).is_empty());
}

#[test]
fn test_full_document_keeps_head_untouched() {
    let mut tree = DomTree::parse_document(
        "<!DOCTYPE html><html><head><title>Central Park</title></head><body><p>Central Park</p></body></html>",
    );

    attach_map_links(&mut tree, &AnnotationRequest::new("Central Park", QUERY_URL));

    let html = tree.to_html();
    assert!(html.starts_with("<!DOCTYPE html><html><head><title>Central Park</title></head>"));
    assert_eq!(tree.children(first(&tree, "p")).len(), 2);
}

#[test]
fn test_deeply_nested_document() {
    let depth = 20_000;
    let html = format!("{}<p>Lunch in Central Park</p>{}", "<div>".repeat(depth), "</div>".repeat(depth));

    let mut tree = DomTree::parse_fragment(&html);
    let report = attach_map_links(&mut tree, &AnnotationRequest::new("Central Park", QUERY_URL));
    assert_eq!(report.pin_count(), 1);
    assert_eq!(report.pins[0].splice.path.len(), depth + 2);

    let annotated = tree.to_html();
    assert!(annotated.contains(r#"<p>Lunch in Central Park<a href="https://www.google.com/maps?q=Central%20Park""#));
    assert_eq!(annotated.matches("<div>").count(), depth);
    assert_eq!(pin_keys(&tree), vec!["Central Park"]);
}
