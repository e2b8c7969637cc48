/// Replace HTML-significant characters with entities before a value is stored.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '/' => out.push_str("&#x2F;"),
            '\\' => out.push_str("&#x5C;"),
            '`' => out.push_str("&#96;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html(r#"<script>alert("x")</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;)&lt;&#x2F;script&gt;"
        );
        assert_eq!(escape_html("Tom & Jerry's `pkg`\\"), "Tom &amp; Jerry&#x27;s &#96;pkg&#96;&#x5C;");
    }

    #[test]
    fn leaves_plain_text_alone() {
        assert_eq!(escape_html("junior developer"), "junior developer");
        assert_eq!(escape_html("anna@gmail.com"), "anna@gmail.com");
    }
}
