//! BibTeX entry data structures

/// A single BibTeX field.
///
/// `value` is the raw value text as it appeared in the source, including its
/// braces or quotes and any `#` concatenation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BibTeXField {
    pub key: String,
    pub value: String,
}

impl BibTeXField {
    /// Value with one level of enclosing braces or quotes removed.
    ///
    /// Concatenations and bare macro names are returned unchanged.
    pub fn unquoted(&self) -> &str {
        let value = self.value.as_str();
        if let Some(inner) = value.strip_prefix('{').and_then(|v| v.strip_suffix('}')) {
            if braces_balanced(inner) {
                return inner;
            }
        }
        if let Some(inner) = value.strip_prefix('"').and_then(|v| v.strip_suffix('"')) {
            if !inner.contains('"') {
                return inner;
            }
        }
        value
    }
}

fn braces_balanced(text: &str) -> bool {
    let mut depth = 0i32;
    for c in text.chars() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}

/// A parsed BibTeX entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BibTeXEntry {
    /// Citation key; `None` when the entry has no key or an empty one
    pub cite_key: Option<String>,
    /// Entry type name as written (`article`, `Book`, ...)
    pub entry_type: String,
    pub fields: Vec<BibTeXField>,
}

impl BibTeXEntry {
    /// Create a new entry. An empty key is stored as no key.
    pub fn new(cite_key: impl Into<String>, entry_type: impl Into<String>) -> Self {
        let cite_key = cite_key.into();
        Self {
            cite_key: (!cite_key.is_empty()).then_some(cite_key),
            entry_type: entry_type.into(),
            fields: Vec::new(),
        }
    }

    /// Create an entry that carries no citation key
    pub fn without_key(entry_type: impl Into<String>) -> Self {
        Self {
            cite_key: None,
            entry_type: entry_type.into(),
            fields: Vec::new(),
        }
    }

    /// Add a field with a raw value (delimiters included)
    pub fn add_field(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.push(BibTeXField {
            key: key.into(),
            value: value.into(),
        });
    }

    /// Get a field by key (case-insensitive)
    pub fn get_field(&self, key: &str) -> Option<&BibTeXField> {
        self.fields.iter().find(|f| f.key.eq_ignore_ascii_case(key))
    }

    /// Citation key, or the empty string when absent
    pub fn cite_key_or_empty(&self) -> &str {
        self.cite_key.as_deref().unwrap_or("")
    }
}
