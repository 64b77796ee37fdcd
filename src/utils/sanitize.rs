//! 富文本输入的 XSS 防护
//!
//! 自由文本字段（作业内容、提交、评语、问答）在入库前统一检查并转义。

use once_cell::sync::Lazy;
use regex::Regex;

// 危险标记的检测模式
static XSS_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?is)<script[^>]*>.*?</script>",
        r"(?i)</script>",
        r"(?is)<script(.*?)>",
        r"(?is)eval\((.*?)\)",
        r"(?is)expression\((.*?)\)",
        r"(?i)javascript:",
        r"(?i)vbscript:",
        r"(?is)onload(.*?)=",
        r"(?is)onerror(.*?)=",
        r"(?is)onclick(.*?)=",
        r"(?is)onmouseover(.*?)=",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("Invalid XSS pattern"))
    .collect()
});

static SCRIPT_BLOCK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<script.*?>.*?</script.*?>").expect("Invalid script regex"));
static EVENT_HANDLER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<.*?\s+on\w+\s*=.*?>").expect("Invalid handler regex"));

/// 是否包含疑似 XSS 的内容
pub fn contains_xss(input: &str) -> bool {
    if input.is_empty() {
        return false;
    }
    XSS_PATTERNS.iter().any(|p| p.is_match(input))
}

/// HTML 特殊字符转义
pub fn html_escape(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// 转义并剥离残留的脚本片段
pub fn sanitize_input(input: &str) -> String {
    let sanitized = html_escape(input);
    let sanitized = SCRIPT_BLOCK_RE.replace_all(&sanitized, "");
    let sanitized = EVENT_HANDLER_RE.replace_all(&sanitized, "");
    sanitized.into_owned()
}

/// 输入校验 - 检出 XSS 时返回错误
pub fn validate_input(input: &str, field_name: &str) -> Result<(), String> {
    if contains_xss(input) {
        return Err(format!("{field_name} 中包含不允许的字符"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_script_tag() {
        assert!(contains_xss("<script>alert(1)</script>"));
        assert!(contains_xss("<SCRIPT src=x>"));
        assert!(contains_xss("javascript:alert(1)"));
        assert!(contains_xss("<img onerror=alert(1) src=x>"));
    }

    #[test]
    fn test_plain_text_passes() {
        assert!(!contains_xss("普通的作业内容，含 <= 和 > 比较符号不会触发"));
        assert!(!contains_xss(""));
        assert!(!contains_xss("answer text"));
    }

    #[test]
    fn test_escape() {
        assert_eq!(
            html_escape(r#"<a href="x">'t'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#39;t&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_sanitize_keeps_text() {
        let out = sanitize_input("1 < 2 && 3 > 2");
        assert_eq!(out, "1 &lt; 2 &amp;&amp; 3 &gt; 2");
    }

    #[test]
    fn test_validate_input_rejects() {
        assert!(validate_input("<script>x</script>", "内容").is_err());
        assert!(validate_input("safe text", "内容").is_ok());
    }
}
