//! The two rewrite rules, each usable on its own.
//!
//! Neither rule parses JavaScript. They match one narrow textual shape and
//! leave everything else alone, which is enough for the import grammar the
//! migration targets.

use regex::{Captures, Regex};

use crate::config::UsageMode;
use crate::error::{Error, Result};

fn compile(pattern: &str, name: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| {
        Error::internal_unexpected(format!("Failed to compile {} pattern: {}", name, e))
    })
}

/// `import { Icon } from '@iconify/react';` → `import LocalIcon from '<path>';`
#[derive(Debug, Clone)]
pub struct ImportPattern {
    regex: Regex,
    replacement_binding: String,
}

impl ImportPattern {
    pub fn new(import_source: &str, binding: &str, replacement_binding: &str) -> Result<Self> {
        // Module specifiers are compared case-insensitively; keywords and the
        // binding are not, because JavaScript is case-sensitive. The closing
        // quote must match the opening one.
        let pattern = format!(
            r#"\bimport\s*\{{\s*{binding}\s*\}}\s*from\s*(?:'(?i:{source})'|(?P<dq>")(?i:{source})")[ \t]*;?(?P<eol>\r?\n)?"#,
            binding = regex::escape(binding),
            source = regex::escape(import_source),
        );

        Ok(Self {
            regex: compile(&pattern, "import")?,
            replacement_binding: replacement_binding.to_string(),
        })
    }

    /// Rewrite every matching import to point at `import_path`.
    ///
    /// Returns the new text and how many statements were replaced. The quote
    /// style and line ending of each match are kept.
    pub fn apply(&self, content: &str, import_path: &str) -> (String, usize) {
        let mut count = 0;
        let rewritten = self.regex.replace_all(content, |caps: &Captures| {
            count += 1;
            let quote = if caps.name("dq").is_some() { "\"" } else { "'" };
            let eol = caps.name("eol").map_or("", |m| m.as_str());
            format!(
                "import {} from {quote}{}{quote};{}",
                self.replacement_binding, import_path, eol
            )
        });

        (rewritten.into_owned(), count)
    }
}

/// `<Icon icon="..." />` → `<LocalIcon icon="..." />`
#[derive(Debug, Clone)]
pub struct UsagePattern {
    regex: Regex,
    replacement_binding: String,
}

impl UsagePattern {
    pub fn new(binding: &str, replacement_binding: &str, mode: UsageMode) -> Result<Self> {
        // Requiring whitespace after the tag name keeps `<IconButton` out.
        let tail = match mode {
            UsageMode::AnyAttributes => "",
            UsageMode::IconAttribute => "icon=",
        };
        let pattern = format!(
            r"<{binding}(?P<rest>\s+{tail})",
            binding = regex::escape(binding),
            tail = tail,
        );

        Ok(Self {
            regex: compile(&pattern, "usage")?,
            replacement_binding: replacement_binding.to_string(),
        })
    }

    /// Rename the tag at every usage site; attributes stay verbatim.
    pub fn apply(&self, content: &str) -> (String, usize) {
        let mut count = 0;
        let rewritten = self.regex.replace_all(content, |caps: &Captures| {
            count += 1;
            format!("<{}{}", self.replacement_binding, &caps["rest"])
        });

        (rewritten.into_owned(), count)
    }
}
