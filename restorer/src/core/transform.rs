//! Folds a document through a substitution table.

use crate::core::table::{SubstitutionTable, default_table};

/// Output of a fold: the restored text plus one match count per table entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transformed {
    pub text: String,
    pub counts: Vec<usize>,
}

/// Restore `input` using the default table.
pub fn restore_text(input: &str) -> String {
    restore_text_with(default_table(), input).text
}

/// Apply every entry of `table` in order, each to the previous entry's output.
pub fn restore_text_with(table: &SubstitutionTable, input: &str) -> Transformed {
    let mut counts = Vec::with_capacity(table.len());
    let text = table.iter().fold(input.to_owned(), |text, rule| {
        let (next, count) = rule.apply(text);
        counts.push(count);
        next
    });
    Transformed { text, counts }
}
