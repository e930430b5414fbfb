//! Generic keyword scanner consumed by every rule table.

use crate::rules::AnnotationRule;

/// Whether lower-cased text contains any of the keywords.
pub fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| text.contains(kw))
}

/// Whether text satisfies an annotation rule: at least one keyword from
/// every group must appear.
pub fn matches_rule(text: &str, rule: &AnnotationRule) -> bool {
    rule.groups.iter().all(|group| contains_any(text, group))
}

/// Char-safe truncation; Portuguese text is multibyte.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        text.chars().take(max_chars).collect()
    }
}

/// Extract a short example snippet centered on the first keyword occurrence:
/// 5 words of leading context, 15 trailing, capped at 100 characters. Falls
/// back to the comment head when no single word carries a keyword.
pub fn keyword_snippet(comment: &str, keywords: &[&str]) -> String {
    let words: Vec<&str> = comment.split(' ').collect();
    let hit = words
        .iter()
        .position(|word| keywords.iter().any(|kw| word.contains(kw)));

    let excerpt = match hit {
        Some(idx) => {
            let start = idx.saturating_sub(5);
            let end = (idx + 15).min(words.len());
            words[start..end].join(" ")
        }
        None => comment.to_string(),
    };

    format!("{}...", truncate_chars(&excerpt, 100))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::HIGHLIGHT_RULES;

    #[test]
    fn test_contains_any() {
        assert!(contains_any("atendimento excelente", &["atendimento"]));
        assert!(!contains_any("loja vazia", &["atendimento"]));
    }

    #[test]
    fn test_annotation_rule_requires_all_groups() {
        let rule = &HIGHLIGHT_RULES[0]; // service + qualifier
        assert!(matches_rule("atendimento muito bom", rule));
        assert!(!matches_rule("atendimento demorado", rule));
        assert!(!matches_rule("tudo bom na loja", rule));
    }

    #[test]
    fn test_snippet_centers_on_keyword() {
        let comment = "a b c d e f g atendimento ótimo demais";
        let snippet = keyword_snippet(comment, &["atendimento"]);
        assert!(snippet.starts_with("c d e f g atendimento"));
        assert!(snippet.ends_with("..."));
    }

    #[test]
    fn test_truncate_is_char_safe() {
        let text = "preço até 100%ção".repeat(20);
        let out = truncate_chars(&text, 100);
        assert_eq!(out.chars().count(), 100);
    }
}
