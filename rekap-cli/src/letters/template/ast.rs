//! AST types for letter templates

/// A parsed letter template containing literal text and placeholders
#[derive(Debug, Clone, PartialEq)]
pub struct LetterTemplate {
    /// The parts of the template (literals and placeholders)
    pub parts: Vec<TemplatePart>,
    /// The original template text (for display/debugging)
    pub source: String,
}

impl LetterTemplate {
    pub fn new(parts: Vec<TemplatePart>, source: String) -> Self {
        Self { parts, source }
    }

    /// Every context key the template refers to, in order of first use
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = Vec::new();
        for part in &self.parts {
            if let TemplatePart::Placeholder(placeholder) = part {
                for term in &placeholder.terms {
                    if let Term::Key(key) = term {
                        if !keys.contains(&key.as_str()) {
                            keys.push(key);
                        }
                    }
                }
            }
        }
        keys
    }
}

impl std::fmt::Display for LetterTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.source)
    }
}

/// A part of a letter template
#[derive(Debug, Clone, PartialEq)]
pub enum TemplatePart {
    /// Literal text (not a placeholder)
    Literal(String),
    /// A placeholder to fill: `${...}`
    Placeholder(Placeholder),
}

/// `${A ?? B ?? 'text'}`: the first term with a value wins
#[derive(Debug, Clone, PartialEq)]
pub struct Placeholder {
    pub terms: Vec<Term>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    /// A context key: `NAMA`
    Key(String),
    /// A quoted literal: `'-'`
    Text(String),
}
