//! HTML image wrapper removal.

use std::sync::LazyLock;

use regex::Regex;

/// Quoted `src` attribute of an `<img>` element, either quote style.
static IMG_SRC_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<img\b[^>]*?\bsrc\s*=\s*(?:"([^"]*)"|'([^']*)')"#)
        .expect("Invalid img src regex")
});

/// Returns the `src` URL when the tag is wrapped in an `<img>` element.
///
/// `None` when there is no `<img` marker or the element has no quoted `src`.
///
/// ```
/// use tagsheet_transform::normalization::unwrap_img;
///
/// assert_eq!(
///     unwrap_img(r#"<IMG SRC="https://ad.example.com/pixel" border=0>"#).as_deref(),
///     Some("https://ad.example.com/pixel")
/// );
/// assert_eq!(unwrap_img("<img border=0>"), None);
/// ```
pub fn unwrap_img(tag: &str) -> Option<String> {
    if !tag.to_ascii_lowercase().contains("<img") {
        return None;
    }
    let captures = IMG_SRC_REGEX.captures(tag)?;
    captures
        .get(1)
        .or_else(|| captures.get(2))
        .map(|src| src.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_quoted_src() {
        assert_eq!(
            unwrap_img("<img src='https://a.com/p.gif'/>").as_deref(),
            Some("https://a.com/p.gif")
        );
    }

    #[test]
    fn src_after_other_attributes() {
        let tag = r#"<img width="1" height="1" src="https://a.com/p?ord=[timestamp]">"#;
        assert_eq!(
            unwrap_img(tag).as_deref(),
            Some("https://a.com/p?ord=[timestamp]")
        );
    }

    #[test]
    fn unquoted_src_is_ignored() {
        assert_eq!(unwrap_img("<img src=https://a.com/p.gif>"), None);
    }

    #[test]
    fn plain_url_is_ignored() {
        assert_eq!(unwrap_img("https://a.com/p.gif"), None);
    }
}
