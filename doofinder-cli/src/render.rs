//! Text rendering of query results for the terminal.

use std::fmt::Write as _;

use colored::Colorize;

use doofinder_shared::{SearchResponse, Suggestion};

/// Characters of a description shown per hit.
pub const DESCRIPTION_PREVIEW_CHARS: usize = 100;

/// Render a result page: the total, then each hit, then facet buckets.
pub fn render_search(response: &SearchResponse) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\nFound {} results", response.total.to_string().bold());
    let _ = writeln!(out, "\n{}", "Items:".cyan().bold());

    for (position, hit) in response.results.iter().enumerate() {
        let _ = writeln!(out, "\n{}. {}", position + 1, hit.title.bold());
        if let Some(description) = &hit.description {
            let _ = writeln!(out, "   Description: {}", preview(description));
        }
        if let Some(price) = hit.price {
            let _ = writeln!(out, "   Price: {}", price);
        }
        let _ = writeln!(out, "   ID: {}", hit.id);
    }

    let facets: Vec<_> = response
        .facets
        .iter()
        .filter_map(|facet| facet.terms.as_ref().map(|terms| (&facet.key, terms)))
        .collect();
    if !facets.is_empty() {
        let _ = writeln!(out, "\n{}", "Facets:".cyan().bold());
        for (key, terms) in facets {
            let _ = writeln!(out, "\n{}:", key);
            for term in &terms.items {
                let _ = writeln!(out, "  - {} ({})", term.name, term.count);
            }
        }
    }

    out
}

pub fn render_suggestions(suggestions: &[Suggestion]) -> String {
    let mut out = format!("\n{}\n", "Suggestions:".cyan().bold());
    for suggestion in suggestions {
        let _ = writeln!(out, "- {}", suggestion.term());
    }
    out
}

// Always followed by "...", even when nothing was cut.
fn preview(description: &str) -> String {
    let head: String = description.chars().take(DESCRIPTION_PREVIEW_CHARS).collect();
    format!("{head}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(json: &str) -> SearchResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_render_search() {
        colored::control::set_override(false);
        let long = "x".repeat(150);
        let response = response(&format!(
            r#"{{
                "total": 2,
                "results": [
                    {{"id": "1", "title": "Mug", "description": "{long}", "price": 9.5}},
                    {{"id": 2, "title": "Plate"}}
                ],
                "facets": [
                    {{"key": "brand", "terms": {{"items": [{{"name": "acme", "count": 3}}]}}}}
                ]
            }}"#
        ));

        let text = render_search(&response);

        assert!(text.contains("Found 2 results"));
        assert!(text.contains("1. Mug"));
        assert!(text.contains(&format!("   Description: {}...\n", "x".repeat(100))));
        assert!(text.contains("   Price: 9.5"));
        assert!(text.contains("2. Plate\n   ID: 2"));
        assert!(text.contains("brand:\n  - acme (3)"));
    }

    #[test]
    fn test_render_without_facets() {
        colored::control::set_override(false);
        let text = render_search(&response(r#"{"total": 0, "results": []}"#));
        assert!(text.contains("Found 0 results"));
        assert!(!text.contains("Facets:"));
    }

    #[test]
    fn test_render_suggestions() {
        colored::control::set_override(false);
        let suggestions: Vec<Suggestion> =
            serde_json::from_str(r#"["mug", {"term": "mugs"}]"#).unwrap();
        assert_eq!(
            render_suggestions(&suggestions),
            "\nSuggestions:\n- mug\n- mugs\n"
        );
    }

    #[test]
    fn test_preview_counts_chars() {
        let text = "é".repeat(120);
        assert_eq!(preview(&text).chars().count(), 103);
        assert_eq!(preview("short"), "short...");
    }
}
