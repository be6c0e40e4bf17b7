//! Field extraction from query-API XML responses.
//!
//! The responses consumed here are small and flat enough that locating an
//! element by name is all that is needed; no general XML parsing is done.

/// Text of the first `<tag>...</tag>` element in `xml`, entity-decoded.
pub fn first_text(xml: &str, tag: &str) -> Option<String> {
    let open = format!("<{}>", tag);
    let close = format!("</{}>", tag);
    let start = xml.find(&open)? + open.len();
    let len = xml[start..].find(&close)?;
    Some(unescape(xml[start..start + len].trim()))
}

/// The part of `xml` inside the first `<tag>` element, or `None` if absent.
pub fn section<'a>(xml: &'a str, tag: &str) -> Option<&'a str> {
    let open = format!("<{}>", tag);
    let close = format!("</{}>", tag);
    let start = xml.find(&open)? + open.len();
    let len = xml[start..].find(&close)?;
    Some(&xml[start..start + len])
}

fn unescape(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_first_element() {
        let xml = "<a><b> one </b><b>two</b></a>";
        assert_eq!(first_text(xml, "b").as_deref(), Some("one"));
        assert_eq!(first_text(xml, "c"), None);
        assert_eq!(section(xml, "a"), Some("<b> one </b><b>two</b>"));
    }

    #[test]
    fn decodes_entities() {
        let xml = "<Message>a &lt;b&gt; &amp;lt; &quot;c&quot;</Message>";
        assert_eq!(first_text(xml, "Message").as_deref(), Some("a <b> &lt; \"c\""));
    }
}
