use scraper::{Html, Selector};
use serde_json::Value;

const MAX_MESSAGE_CHARS: usize = 200;

/// Pull a human-readable message out of a non-2xx response body.
///
/// Understands JSON (`message`, `error`, `error.message`, `msg`), HTML
/// error pages (`<title>` then `<h1>`), and short plain text.
pub fn extract_message(content_type: Option<&str>, body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    if let Ok(value) = serde_json::from_str::<Value>(body) {
        return from_json(&value).and_then(clean);
    }

    let looks_like_html = content_type.is_some_and(|ct| ct.contains("html"))
        || body.starts_with('<');
    if looks_like_html {
        return from_html(body);
    }

    clean(body.to_string())
}

fn from_json(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Object(map) => ["message", "error", "msg"]
            .iter()
            .filter_map(|key| map.get(*key))
            .find_map(from_json),
        _ => None,
    }
}

fn from_html(body: &str) -> Option<String> {
    let document = Html::parse_document(body);
    for tag in ["title", "h1"] {
        let Ok(selector) = Selector::parse(tag) else {
            continue;
        };
        if let Some(element) = document.select(&selector).next() {
            let text = element.text().collect::<Vec<_>>().join(" ");
            if let Some(message) = clean(text) {
                return Some(message);
            }
        }
    }
    None
}

fn clean(text: String) -> Option<String> {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return None;
    }
    if collapsed.chars().count() > MAX_MESSAGE_CHARS {
        let truncated: String = collapsed.chars().take(MAX_MESSAGE_CHARS).collect();
        return Some(format!("{}…", truncated));
    }
    Some(collapsed)
}
