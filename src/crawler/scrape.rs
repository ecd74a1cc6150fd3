use scraper::Html;
use std::collections::HashSet;

/// Collects the raw `href` values of every anchor in `html`.
///
/// Duplicates on one page collapse into a single entry. Broken markup (missing
/// closing tags, self-closing anchors) is recovered by the html5ever parser, so
/// whatever anchors appear before the input ends are still reported.
pub fn extract_links(html: &str) -> HashSet<String> {
    let document = Html::parse_document(html);

    document
        .tree
        .nodes()
        .filter_map(|node| node.value().as_element())
        .filter(|element| element.name() == "a")
        .filter_map(|element| element.attr("href"))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::extract_links;
    use std::collections::HashSet;

    fn set(links: &[&str]) -> HashSet<String> {
        links.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_single_link() {
        let html = r#"<html><body><a href="testing"></a></body></html>"#;
        assert_eq!(extract_links(html), set(&["testing"]));
    }

    #[test]
    fn test_missing_closing_tags() {
        let html = r#"<html><body><a href="testing"></html>"#;
        assert_eq!(extract_links(html), set(&["testing"]));
    }

    #[test]
    fn test_unterminated_document() {
        let html = r#"<html><body><p>text <a href="first">one <a href="second"#;
        assert!(extract_links(html).contains("first"));
    }

    #[test]
    fn test_self_closing_tag() {
        let html = r#"<html><body><a href="testing" /></body></html>"#;
        assert_eq!(extract_links(html), set(&["testing"]));
    }

    #[test]
    fn test_duplicates_collapse() {
        let html = r#"
            <a href="/a">A</a>
            <a href="/a">A again</a>
            <a href="/b">B</a>
        "#;
        assert_eq!(extract_links(html), set(&["/a", "/b"]));
    }

    #[test]
    fn test_ignores_other_tags_and_anchors_without_href() {
        let html = r#"
            <link href="/style.css" rel="stylesheet">
            <img src="/logo.png">
            <a name="top">Top</a>
            <a href="/kept">Kept</a>
        "#;
        assert_eq!(extract_links(html), set(&["/kept"]));
    }

    #[test]
    fn test_empty_page() {
        assert!(extract_links("").is_empty());
    }
}
