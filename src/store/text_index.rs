//! Text search over indexed document fields
//!
//! Query syntax:
//! - bare words match if any of them is a token of the indexed text
//! - `"a phrase"` must appear (case-insensitive); when phrases are present
//!   every phrase must match and bare words no longer filter
//! - `-word` excludes documents containing the word
//!
//! Tokenizer: lowercase → split on non-alphanumeric → drop stopwords.

use std::collections::HashSet;

use serde_json::Value;

use super::collection::Document;

/// Standard English stopwords.
const STOPWORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "if", "in", "into", "is", "it",
    "no", "not", "of", "on", "or", "such", "that", "the", "their", "then", "there", "these",
    "they", "this", "to", "was", "will", "with",
];

fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(&token)
}

/// Tokenize text into searchable terms.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|s| !s.is_empty())
        .filter(|s| !is_stopword(s))
        .map(str::to_string)
        .collect()
}

/// Field paths whose string content is searchable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextIndex {
    fields: Vec<String>,
}

impl TextIndex {
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Concatenates every indexed string of `doc`, space separated.
    ///
    /// Arrays contribute each string element; other value types are skipped.
    pub fn indexed_text(&self, doc: &Document) -> String {
        let mut parts = Vec::new();
        for field in &self.fields {
            match lookup_path(doc, field) {
                Some(Value::String(s)) => parts.push(s.as_str()),
                Some(Value::Array(items)) => {
                    parts.extend(items.iter().filter_map(Value::as_str));
                }
                _ => {}
            }
        }
        parts.join(" ")
    }
}

/// Resolves a dotted path inside a document.
pub fn lookup_path<'a>(doc: &'a Document, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let mut current = doc.get(segments.next()?)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// A parsed search string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextQuery {
    terms: Vec<String>,
    phrases: Vec<String>,
    negated: Vec<String>,
}

impl TextQuery {
    pub fn parse(search: &str) -> Self {
        let mut query = TextQuery::default();
        let mut rest = String::new();

        // Chunks alternate between outside and inside quotes.
        let mut inside = false;
        for chunk in search.split('"') {
            if inside {
                let phrase = chunk.trim().to_lowercase();
                if !phrase.is_empty() {
                    query.phrases.push(phrase);
                }
            } else {
                rest.push(' ');
                rest.push_str(chunk);
            }
            inside = !inside;
        }

        for word in rest.split_whitespace() {
            match word.strip_prefix('-') {
                Some(negated) => query.negated.extend(tokenize(negated)),
                None => query.terms.extend(tokenize(word)),
            }
        }

        query
    }

    /// Returns true if nothing positive is left to match on
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty() && self.phrases.is_empty()
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    pub fn negated(&self) -> &[String] {
        &self.negated
    }

    /// Checks indexed text against the query
    pub fn matches(&self, text: &str) -> bool {
        if self.is_empty() {
            return false;
        }

        let tokens: HashSet<String> = tokenize(text).into_iter().collect();
        if self.negated.iter().any(|t| tokens.contains(t)) {
            return false;
        }

        if !self.phrases.is_empty() {
            let lowered = text.to_lowercase();
            return self.phrases.iter().all(|p| lowered.contains(p.as_str()));
        }

        self.terms.iter().any(|t| tokens.contains(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_tokenize_basic() {
        assert_eq!(tokenize("Hello, World!"), vec!["hello", "world"]);
        assert_eq!(tokenize("The Shirt of the Year"), vec!["shirt", "year"]);
        assert!(tokenize("  ...  ").is_empty());
    }

    #[test]
    fn test_indexed_text_includes_arrays() {
        let index = TextIndex::new(vec!["name".into(), "tags".into(), "inventory.quantity".into()]);
        let d = doc(json!({
            "name": "Shirt",
            "tags": ["cotton", 3, "summer"],
            "inventory": { "quantity": 5 }
        }));
        assert_eq!(index.indexed_text(&d), "Shirt cotton summer");
    }

    #[test]
    fn test_lookup_nested_path() {
        let d = doc(json!({ "a": { "b": { "c": 1 } } }));
        assert_eq!(lookup_path(&d, "a.b.c"), Some(&json!(1)));
        assert_eq!(lookup_path(&d, "a.x"), None);
        assert_eq!(lookup_path(&d, "a.b.c.d"), None);
    }

    #[test]
    fn test_any_term_matches() {
        let q = TextQuery::parse("shirt hat");
        assert!(q.matches("Blue Shirt"));
        assert!(q.matches("red HAT"));
        assert!(!q.matches("shoes"));
        assert!(!q.matches("shirts"));
    }

    #[test]
    fn test_phrase_required() {
        let q = TextQuery::parse("cotton \"blue shirt\"");
        assert_eq!(q.phrases(), ["blue shirt"]);
        assert!(q.matches("A Blue Shirt made of linen"));
        assert!(!q.matches("cotton shirt, blue"));
    }

    #[test]
    fn test_negation_excludes() {
        let q = TextQuery::parse("shirt -linen");
        assert_eq!(q.negated(), ["linen"]);
        assert!(q.matches("cotton shirt"));
        assert!(!q.matches("linen shirt"));
    }

    #[test]
    fn test_only_stopwords_matches_nothing() {
        let q = TextQuery::parse("the and");
        assert!(q.is_empty());
        assert!(!q.matches("the and of"));

        let q = TextQuery::parse("-shirt");
        assert!(q.is_empty());
        assert!(!q.matches("hat"));
    }
}
