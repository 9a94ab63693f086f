use serde::de::DeserializeOwned;

/// Parse the JSON object embedded in raw LLM output.
/// Tries a direct parse first, then extracts the outermost `{...}` span.
/// Returns None on total parse failure (callers fall back to static values).
pub fn parse_reply<T: DeserializeOwned>(raw: &str) -> Option<T> {
    let stripped = strip_code_fences(raw);

    if let Ok(v) = serde_json::from_str(stripped) {
        return Some(v);
    }

    let json_str = extract_json_object(stripped)?;
    serde_json::from_str(&json_str).ok()
}

/// Drop a ```json ... ``` (or plain ```) fence if the reply is wrapped in one.
fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Skip the language tag on the opening fence line.
    let body = match rest.find('\n') {
        Some(i) => &rest[i + 1..],
        None => rest,
    };
    body.strip_suffix("```").unwrap_or(body).trim()
}

/// Extract the outermost JSON object substring from raw LLM output.
fn extract_json_object(raw: &str) -> Option<String> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end <= start {
        return None;
    }
    Some(raw[start..=end].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Reply {
        score: i64,
        summary: String,
    }

    #[test]
    fn parses_bare_json() {
        let raw = r#"{"score": 720, "summary": "Solid month."}"#;
        let reply: Reply = parse_reply(raw).unwrap();
        assert_eq!(reply.score, 720);
    }

    #[test]
    fn parses_fenced_json() {
        let raw = "```json\n{\"score\": 640, \"summary\": \"Watch dining out.\"}\n```";
        let reply: Reply = parse_reply(raw).unwrap();
        assert_eq!(reply.score, 640);
        assert_eq!(reply.summary, "Watch dining out.");
    }

    #[test]
    fn parses_json_wrapped_in_prose() {
        let raw = "Sure! Here is the rating:\n{\"score\": 550, \"summary\": \"ok\"}\nLet me know.";
        let reply: Reply = parse_reply(raw).unwrap();
        assert_eq!(reply.score, 550);
    }

    #[test]
    fn nested_braces_survive_extraction() {
        #[derive(Deserialize)]
        struct Outer {
            inner: serde_json::Value,
        }
        let raw = "note: {\"inner\": {\"a\": 1}} done";
        let outer: Outer = parse_reply(raw).unwrap();
        assert_eq!(outer.inner["a"], 1);
    }

    #[test]
    fn garbage_returns_none() {
        assert!(parse_reply::<Reply>("no json here").is_none());
        assert!(parse_reply::<Reply>("{broken").is_none());
        assert!(parse_reply::<Reply>("").is_none());
    }
}
