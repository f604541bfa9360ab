//! Identifier helpers shared by every backend.
//!
//! All functions here are pure: the same input always yields the same
//! identifier, independent of locale or of previous calls. The only state
//! lives in a [`FieldNamer`], which is scoped to a single struct build.

use std::collections::HashMap;

use crate::schema::Column;
use crate::settings::Settings;

/// Returns whether `c` separates words for [`title`].
fn is_separator(c: char) -> bool {
    if c.is_ascii() {
        !(c.is_ascii_alphanumeric() || c == '_')
    } else {
        c.is_whitespace()
    }
}

/// Uppercases the first letter of every word, leaving other characters
/// untouched. Letters, digits and `_` do not break words.
///
/// `"on"` becomes `"On"`, `"on hold"` becomes `"On Hold"`, `"job_status"`
/// stays `"Job_status"`.
#[must_use]
pub fn title(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev = ' ';
    for c in s.chars() {
        if is_separator(prev) {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        prev = c;
    }
    out
}

/// Lowercases the first character.
#[must_use]
pub fn lower_title(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Converts a snake_case identifier to an exported type or field name.
///
/// A global rename from `settings` wins. Otherwise each `_` segment is
/// title-cased, except `id` which becomes `ID`: `user_id` is `UserID`.
#[must_use]
pub fn struct_name(name: &str, settings: &Settings) -> String {
    if let Some(rename) = settings.rename.get(name).filter(|r| !r.is_empty()) {
        return rename.clone();
    }
    name.split('_')
        .map(|part| {
            if part == "id" {
                String::from("ID")
            } else {
                title(part)
            }
        })
        .collect()
}

/// Returns the field name of `column` in the struct of `table`.
#[must_use]
pub fn column_name(column: &str, table: &str, settings: &Settings) -> String {
    settings
        .table(table)
        .and_then(|t| t.column_rename(column))
        .map_or_else(|| struct_name(column, settings), str::to_string)
}

/// Returns the struct name of a table: its custom name or its converted
/// name, singularized (`users` is `User`).
#[must_use]
pub fn table_struct_name(table: &str, settings: &Settings) -> String {
    let name = settings
        .table(table)
        .and_then(|t| t.struct_name.as_deref())
        .filter(|s| !s.is_empty())
        .map_or_else(|| struct_name(table, settings), str::to_string);
    singular(&name)
}

/// Converts a snake_case name to a local variable name.
///
/// The first segment is lowercased, later ones title-cased, `id` becomes
/// `ID` and empty segments vanish: `get_users_by_id` is `getUsersByID`.
#[must_use]
pub fn arg_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for (i, part) in name.split('_').enumerate() {
        if i == 0 {
            out.push_str(&part.to_lowercase());
        } else if part == "id" {
            out.push_str("ID");
        } else {
            out.push_str(&title(part));
        }
    }
    out
}

/// Builds an enum constant name from a column name and a literal.
///
/// `("disabled", "true")` gives `DisabledTypeTrue`.
#[must_use]
pub fn enum_constant_name(column: &str, value: &str) -> String {
    column
        .split('_')
        .chain(["Type", value])
        .map(title)
        .collect()
}

/// Removes the first two single quotes of an enum literal (`'on'` is `on`).
#[must_use]
pub fn strip_inner_quotes(literal: &str) -> String {
    literal.replacen('\'', "", 2)
}

/// Returns the name of a result column, or `column_<position + 1>` when
/// the column has none.
#[must_use]
pub fn result_column_name(column: &Column, position: usize) -> String {
    match column.name.as_deref() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => format!("column_{}", position + 1),
    }
}

const UNCOUNTABLE: &[&str] = &[
    "equipment",
    "information",
    "rice",
    "money",
    "species",
    "series",
    "fish",
    "sheep",
    "jeans",
    "police",
    "news",
];

const IRREGULAR: &[(&str, &str)] = &[
    ("people", "person"),
    ("children", "child"),
    ("women", "woman"),
    ("men", "man"),
    ("teeth", "tooth"),
    ("feet", "foot"),
    ("geese", "goose"),
    ("mice", "mouse"),
    ("lice", "louse"),
];

/// Plural suffixes and their singular form, most specific first.
const SUFFIXES: &[(&str, &str)] = &[
    ("quizzes", "quiz"),
    ("matrices", "matrix"),
    ("vertices", "vertex"),
    ("indices", "index"),
    ("oxen", "ox"),
    ("aliases", "alias"),
    ("alias", "alias"),
    ("statuses", "status"),
    ("status", "status"),
    ("octopi", "octopus"),
    ("viri", "virus"),
    ("crises", "crisis"),
    ("theses", "thesis"),
    ("analyses", "analysis"),
    ("axes", "axis"),
    ("shoes", "shoe"),
    ("buses", "bus"),
    ("movies", "movie"),
    ("oes", "o"),
    ("xes", "x"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("sses", "ss"),
    ("ies", "y"),
    ("lves", "lf"),
    ("rves", "rf"),
    ("tives", "tive"),
    ("hives", "hive"),
    ("ves", "fe"),
    ("sis", "sis"),
    ("ss", "ss"),
    ("us", "us"),
    ("s", ""),
];

/// Replaces the plural `suffix` at the end of `word` by `singular`,
/// keeping the case of the suffix's first letter.
fn replace_suffix(word: &str, suffix: &str, singular: &str) -> String {
    let stem = &word[..word.len() - suffix.len()];
    let upper = word[stem.len()..]
        .chars()
        .next()
        .is_some_and(char::is_uppercase);
    let mut out = String::from(stem);
    if upper {
        out.push_str(&title(singular));
    } else {
        out.push_str(singular);
    }
    out
}

/// Singularizes the last word of an English identifier.
///
/// `Users` becomes `User`, `Categories` becomes `Category`, `AuditLog`
/// is left alone.
#[must_use]
pub fn singular(word: &str) -> String {
    let lower = word.to_ascii_lowercase();
    if UNCOUNTABLE.iter().any(|u| lower.ends_with(u)) {
        return word.to_string();
    }
    for (plural, single) in IRREGULAR {
        if lower.ends_with(plural) {
            return replace_suffix(word, plural, single);
        }
    }
    for (plural, single) in SUFFIXES {
        // Bare short suffixes (`s`, `ies`, ...) never stand for a whole word.
        let fits = lower.len() > plural.len() || plural.len() > 3;
        if fits && lower.ends_with(plural) {
            return replace_suffix(word, plural, single);
        }
    }
    word.to_string()
}

/// Hands out collision-free field names and tags within one struct.
///
/// Collisions are counted on the produced field name, so distinct sources
/// that map to the same identifier (`id` and `ID`) collide too. The first
/// occurrence keeps its names; the n-th gets `_<n>` appended to both field
/// name and tag.
#[derive(Debug, Default)]
pub struct FieldNamer {
    seen: HashMap<String, usize>,
}

impl FieldNamer {
    /// Creates a namer with no names seen.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `(field, tag)` for the next occurrence of `field`.
    pub fn next(&mut self, field: String, tag: &str) -> (String, String) {
        let count = self.seen.entry(field.clone()).or_insert(0);
        *count += 1;
        if *count > 1 {
            (format!("{field}_{count}"), format!("{tag}_{count}"))
        } else {
            (field, tag.to_string())
        }
    }
}
