//! Text-analysis helpers shared by the parser and the rule catalogue

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Vocabulary that marks unfinished content
pub const DEFAULT_PLACEHOLDER_TERMS: &[&str] =
    &["tbd", "todo", "placeholder", "coming soon", "fill in", "xxx"];

/// Phrases that indicate reporting lines or approval authority
pub const AUTHORITY_KEYWORDS: &[&str] =
    &["reports to", "manages", "supervises", "authority", "approval"];

lazy_static! {
    static ref PERCENTAGE_PATTERN: Regex = Regex::new(r"(\d+(?:\.\d+)?)\s*%").unwrap();

    /// "Role: Project Manager", "Position: System Administrator"
    static ref ROLE_LABEL_PATTERN: Regex =
        Regex::new(r"(?i)(?:role|position|title):\s*([^,\n]+)").unwrap();

    /// "Business Analyst", "Operations Director"
    static ref ROLE_TITLE_PATTERN: Regex = Regex::new(
        r"(?i)\b([A-Z][a-z]+\s+(?:Manager|Director|Analyst|Coordinator|Administrator))\b"
    )
    .unwrap();

    /// "Order Fulfillment Process"
    static ref PROCESS_PATTERN: Regex =
        Regex::new(r"\b([A-Z][a-z]+(?:\s+[A-Z][a-z]+)*\s+Process)\b").unwrap();
}

/// Whitespace-separated word count
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Check text against the default placeholder vocabulary
pub fn has_placeholder_text(text: &str) -> bool {
    contains_any_term(text, DEFAULT_PLACEHOLDER_TERMS)
}

/// Case-insensitive substring match against any of `terms`
pub fn contains_any_term<S: AsRef<str>>(text: &str, terms: &[S]) -> bool {
    let text_lower = text.to_lowercase();
    terms
        .iter()
        .any(|term| text_lower.contains(&term.as_ref().to_lowercase()))
}

/// Every `<number>%` value in the text, in order of appearance
pub fn extract_percentages(text: &str) -> Vec<f64> {
    PERCENTAGE_PATTERN
        .captures_iter(text)
        .filter_map(|cap| cap.get(1))
        .filter_map(|m| m.as_str().parse::<f64>().ok())
        .collect()
}

/// True when the values add up to 100 within `tolerance`
pub fn validate_percentage_sum(percentages: &[f64], tolerance: f64) -> bool {
    let total: f64 = percentages.iter().sum();
    (total - 100.0).abs() <= tolerance
}

/// Round to one decimal place
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Keyword scan result for hierarchy / authority descriptions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorityStructure {
    pub has_hierarchy_info: bool,
    pub found_keywords: Vec<String>,
    pub keyword_count: usize,
}

/// Pattern-based extraction of organisational vocabulary
pub struct TextAnalyzer;

impl TextAnalyzer {
    /// Role names from labelled lines and common job-title shapes
    pub fn extract_roles(text: &str) -> Vec<String> {
        let mut roles: Vec<String> = ROLE_LABEL_PATTERN
            .captures_iter(text)
            .chain(ROLE_TITLE_PATTERN.captures_iter(text))
            .filter_map(|cap| cap.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|role| !role.is_empty())
            .collect();
        roles.sort();
        roles.dedup();
        roles
    }

    /// Capitalised "... Process" phrases
    pub fn extract_processes(text: &str) -> Vec<String> {
        let mut processes: Vec<String> = PROCESS_PATTERN
            .captures_iter(text)
            .filter_map(|cap| cap.get(1))
            .map(|m| m.as_str().to_string())
            .collect();
        processes.sort();
        processes.dedup();
        processes
    }

    pub fn check_authority_structure(text: &str) -> AuthorityStructure {
        let text_lower = text.to_lowercase();
        let found_keywords: Vec<String> = AUTHORITY_KEYWORDS
            .iter()
            .filter(|keyword| text_lower.contains(*keyword))
            .map(|keyword| keyword.to_string())
            .collect();

        AuthorityStructure {
            has_hierarchy_info: !found_keywords.is_empty(),
            keyword_count: found_keywords.len(),
            found_keywords,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_count_words() {
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words("  one\ttwo\nthree  "), 3);
    }

    #[test]
    fn test_placeholder_detection_is_case_insensitive() {
        assert!(has_placeholder_text("Budget: TBD"));
        assert!(has_placeholder_text("ToDo: fill the matrix"));
        assert!(has_placeholder_text("Coming Soon"));
        assert!(!has_placeholder_text("All budgets approved by finance"));
    }

    #[test]
    fn test_extract_percentages() {
        let values = extract_percentages("Core: 60%, Support: 25 %, Analytics: 15.5%");
        assert_eq!(values, vec![60.0, 25.0, 15.5]);
        assert!(extract_percentages("no numbers here").is_empty());
    }

    #[test]
    fn test_percentage_sum_tolerance() {
        assert!(validate_percentage_sum(&[60.0, 25.0, 15.0], 0.1));
        assert!(validate_percentage_sum(&[33.3, 33.3, 33.35], 0.1));
        assert!(!validate_percentage_sum(&[70.0, 20.0, 20.0], 0.1));
        assert!(!validate_percentage_sum(&[], 0.1));
    }

    #[test]
    fn test_round1() {
        assert_eq!(round1(66.66666), 66.7);
        assert_eq!(round1(0.04), 0.0);
    }

    #[test]
    fn test_extract_roles() {
        let text = "Role: Project Manager - Responsible for project oversight\n\
                    The Business Analyst will gather requirements\n\
                    Position: System Administrator";
        let roles = TextAnalyzer::extract_roles(text);

        assert!(roles.iter().any(|r| r.contains("Project Manager")));
        assert!(roles.iter().any(|r| r.contains("Business Analyst")));
        assert!(roles.iter().any(|r| r.contains("System Administrator")));
    }

    #[test]
    fn test_extract_processes() {
        let text = "The Order Fulfillment Process feeds the Invoice Process.";
        let processes = TextAnalyzer::extract_processes(text);
        assert_eq!(
            processes,
            vec![
                "Invoice Process".to_string(),
                "The Order Fulfillment Process".to_string()
            ]
        );
    }

    #[test]
    fn test_check_authority_structure() {
        let text = "The manager supervises the team and has approval authority. \
                    Each employee reports to their direct supervisor.";
        let result = TextAnalyzer::check_authority_structure(text);

        assert!(result.has_hierarchy_info);
        assert_eq!(result.keyword_count, 4);
        assert!(result.found_keywords.contains(&"supervises".to_string()));
        assert!(result.found_keywords.contains(&"reports to".to_string()));

        let none = TextAnalyzer::check_authority_structure("Flat team of peers.");
        assert!(!none.has_hierarchy_info);
    }
}
