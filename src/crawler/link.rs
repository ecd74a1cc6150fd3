use url::Url;

/// Wikimedia namespaces that are not worth crawling.
pub const DEFAULT_EXCLUDED_NAMESPACES: &[&str] = &[
    "User:",
    "User_talk:",
    "Help:",
    "Help_talk:",
    "Talk:",
    "File_talk:",
    "Category_talk:",
    "Create_Article",
    "Special:",
];

/// Value of the `title` query parameter, or an empty string if there is none.
///
/// Short wiki urls (`/wiki/Page`) carry no title parameter and are not parsed.
pub fn wiki_page_title(link: &Url) -> String {
    link.query_pairs()
        .find(|(key, _)| key == "title")
        .map(|(_, value)| value.into_owned())
        .unwrap_or_default()
}

/// Resolves `href` against `base` and reduces it to its canonical form:
/// only the `title` query parameter survives (when present), the fragment
/// is dropped, the scheme is forced to the base scheme and scheme and host
/// are lower case. Path and query casing are left alone.
///
/// Normalizing an already normalized url returns it unchanged.
pub fn normalize_url(href: &str, base: &Url) -> Result<Url, url::ParseError> {
    let mut clean = base.join(href)?;

    let title = wiki_page_title(&clean);
    if !title.is_empty() {
        clean.query_pairs_mut().clear().append_pair("title", &title);
    }

    clean.set_fragment(None);

    // Switching between special and non-special schemes is refused by `url`;
    // such links keep their scheme and fail validation later.
    if clean.scheme() != base.scheme() {
        let _ = clean.set_scheme(base.scheme());
    }

    if let Some(host) = clean.host_str().map(str::to_lowercase) {
        if clean.host_str() != Some(host.as_str()) {
            let _ = clean.set_host(Some(&host));
        }
    }

    Ok(clean)
}

/// Decides whether a canonical link should be queued.
///
/// 1. Only links under `base` are followed.
/// 2. Titles starting with one of `excluded` are skipped.
///
/// A link without a title is accepted.
pub fn validate_link<S: AsRef<str>>(link: &Url, base: &Url, excluded: &[S]) -> bool {
    if !link.as_str().contains(base.as_str()) {
        return false;
    }

    let title = wiki_page_title(link);
    if !title.is_empty()
        && excluded
            .iter()
            .any(|prefix| title.starts_with(prefix.as_ref()))
    {
        return false;
    }

    true
}
