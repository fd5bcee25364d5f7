//! Evaluator for letter templates

use super::ast::*;
use crate::letters::LetterContext;

/// Fill a template from a context
///
/// A placeholder none of whose terms has a value renders empty, so one
/// missing field never aborts a batch of letters.
pub fn evaluate(template: &LetterTemplate, context: &LetterContext) -> String {
    let mut result = String::with_capacity(template.source.len());

    for part in &template.parts {
        match part {
            TemplatePart::Literal(s) => result.push_str(s),
            TemplatePart::Placeholder(placeholder) => match resolve(placeholder, context) {
                Some(value) => result.push_str(value),
                None => {
                    log::warn!("No value for ${{{}}}, left empty", key_chain(placeholder));
                }
            },
        }
    }

    result
}

fn resolve<'a>(placeholder: &'a Placeholder, context: &'a LetterContext) -> Option<&'a str> {
    placeholder.terms.iter().find_map(|term| match term {
        Term::Key(key) => context.get(key),
        Term::Text(text) => Some(text.as_str()),
    })
}

fn key_chain(placeholder: &Placeholder) -> String {
    placeholder
        .terms
        .iter()
        .filter_map(|t| match t {
            Term::Key(k) => Some(k.as_str()),
            Term::Text(_) => None,
        })
        .collect::<Vec<_>>()
        .join(" ?? ")
}
