use regex::Regex;
use std::sync::LazyLock;

static PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\([^)]*\)").expect("valid parenthetical pattern"));

static TRAILING_PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\([^)]*\)$").expect("valid trailing pattern"));

static HONORIFIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(Dr\.?|Prof\.?|Commodore|Chef)\s+").expect("valid honorific pattern")
});

/// Comparison key: lower-case, ASCII word characters only, whitespace runs
/// collapsed into `_`.
pub fn normalize_name(name: &str) -> String {
    let mut key = String::with_capacity(name.len());
    let mut in_space = false;
    for c in name.to_lowercase().chars() {
        if c.is_whitespace() {
            if !in_space {
                key.push('_');
            }
            in_space = true;
        } else if c.is_ascii_alphanumeric() || c == '_' {
            key.push(c);
            in_space = false;
        }
    }
    key
}

/// Distinct, non-empty comparison keys for one display name.
pub fn name_variants(name: &str) -> Vec<String> {
    let mut keys = Vec::new();
    let mut push = |text: &str| {
        let key = normalize_name(text);
        if !key.is_empty() && !keys.contains(&key) {
            keys.push(key);
        }
    };

    push(name);

    let without_parens = PARENTHETICAL.replace_all(name, "");
    let without_parens = without_parens.trim();
    if without_parens != name {
        push(without_parens);
    }

    let without_title = HONORIFIC.replace(name, "");
    let without_title = TRAILING_PARENTHETICAL.replace(&without_title, "");
    let without_title = without_title.trim();
    if without_title != name {
        push(without_title);
    }

    if let Some((first, _)) = name.split_once('&') {
        push(first.trim());
    }

    keys
}
