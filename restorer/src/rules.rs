//! Listing helpers for `restorer rules`.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::table::{Stage, SubstitutionTable};

/// One table entry in printable form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleView {
    pub stage: Stage,
    pub pattern: String,
    pub replacement: String,
}

pub fn rule_views(table: &SubstitutionTable) -> Vec<RuleView> {
    table
        .iter()
        .map(|rule| RuleView {
            stage: rule.stage,
            pattern: rule.matcher.display_pattern(),
            replacement: rule.replacement.to_string(),
        })
        .collect()
}

/// Numbered, one rule per line.
pub fn render_text(table: &SubstitutionTable) -> String {
    let mut buf = String::new();
    for (index, rule) in table.iter().enumerate() {
        buf.push_str(&format!("{:>2}. {}\n", index + 1, rule.describe()));
    }
    buf
}

/// Pretty-printed JSON array with trailing newline.
pub fn render_json(table: &SubstitutionTable) -> Result<String> {
    let mut payload =
        serde_json::to_string_pretty(&rule_views(table)).context("serialize rules json")?;
    payload.push('\n');
    Ok(payload)
}
