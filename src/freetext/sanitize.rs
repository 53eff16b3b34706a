use regex::Regex;
use std::sync::LazyLock;

static SCRIPT_ELEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>").expect("script element pattern is valid")
});
static SCRIPT_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)</?script\b[^>]*>").expect("script tag pattern is valid")
});

/// Remove script elements from free-text markup before it is displayed
pub fn sanitize_markup(markup: &str) -> String {
    let without_elements = SCRIPT_ELEMENT.replace_all(markup, "");
    SCRIPT_TAG.replace_all(&without_elements, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_script_elements() {
        let markup = "<p>hi</p><script>alert(1)</script><p>there</p>";
        assert_eq!(sanitize_markup(markup), "<p>hi</p><p>there</p>");
    }

    #[test]
    fn test_case_and_multiline() {
        let markup = "<SCRIPT type=\"text/javascript\">\nlet a = 1;\n</Script >ok";
        assert_eq!(sanitize_markup(markup), "ok");
    }

    #[test]
    fn test_unclosed_tag() {
        assert_eq!(sanitize_markup("a<script src=x>b"), "ab");
    }

    #[test]
    fn test_leaves_other_markup() {
        let markup = "<p><b>bold</b> <a href=\"/scripts\">scripts</a></p>";
        assert_eq!(sanitize_markup(markup), markup);
    }
}
