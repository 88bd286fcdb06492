//! Small English text-formatting helpers
//!
//! Lengths are counted in Unicode scalar values (`char`s), never in bytes,
//! so truncation never splits a character.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Suffix appended by [`truncate_with_ellipsis`]
pub const ELLIPSIS: &str = "...";

const VOWEL_ISH: [char; 6] = ['a', 'e', 'i', 'o', 'u', 'y'];

/// Shorten `s` to at most `length` characters, ending in `...`
///
/// Strings that already fit are returned borrowed. When `length` is smaller
/// than the ellipsis itself the result is just `...`, which is longer than
/// `length`.
///
/// # Examples
/// ```rust
/// use utilkit_core::text::truncate_with_ellipsis;
///
/// assert_eq!(truncate_with_ellipsis("hello world", 8), "hello...");
/// assert_eq!(truncate_with_ellipsis("hi", 8), "hi");
/// ```
pub fn truncate_with_ellipsis(s: &str, length: usize) -> Cow<'_, str> {
    if s.chars().count() <= length {
        return Cow::Borrowed(s);
    }

    let keep = length.saturating_sub(ELLIPSIS.len());
    let end = s.char_indices().nth(keep).map_or(s.len(), |(index, _)| index);
    Cow::Owned(format!("{}{}", &s[..end], ELLIPSIS))
}

/// Separators used by [`join_and_with`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JoinOptions {
    /// Separator between all but the last value
    pub separator: String,
    /// Placed before the last value, after a space (or after `separator`
    /// when `oxford_comma` is set)
    pub final_separator: String,
    /// Put `separator` between the penultimate value and `final_separator`
    pub oxford_comma: bool,
}

impl Default for JoinOptions {
    fn default() -> Self {
        Self {
            separator: ", ".to_string(),
            final_separator: "and ".to_string(),
            oxford_comma: false,
        }
    }
}

impl JoinOptions {
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn with_final_separator(mut self, final_separator: impl Into<String>) -> Self {
        self.final_separator = final_separator.into();
        self
    }

    pub fn with_oxford_comma(mut self, oxford_comma: bool) -> Self {
        self.oxford_comma = oxford_comma;
        self
    }
}

/// Join values as an English list: `"a, b and c"`
pub fn join_and<S: AsRef<str>>(values: &[S]) -> String {
    join_and_with(values, &JoinOptions::default())
}

/// Join values as an English list with custom separators
///
/// # Examples
/// ```rust
/// use utilkit_core::text::{join_and_with, JoinOptions};
///
/// let options = JoinOptions::default()
///     .with_final_separator("or ")
///     .with_oxford_comma(true);
/// assert_eq!(join_and_with(&["tea", "coffee", "juice"], &options), "tea, coffee, or juice");
/// ```
pub fn join_and_with<S: AsRef<str>>(values: &[S], options: &JoinOptions) -> String {
    match values {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        [init @ .., last] => {
            let head = init
                .iter()
                .map(|value| value.as_ref())
                .collect::<Vec<&str>>()
                .join(&options.separator);
            let before_final = if options.oxford_comma {
                options.separator.as_str()
            } else {
                " "
            };
            format!(
                "{}{}{}{}",
                head,
                before_final,
                options.final_separator,
                last.as_ref()
            )
        }
    }
}

/// Pick the indefinite article for `word`
///
/// Words starting with a vowel or `y` take "an". This is a spelling rule,
/// not a pronunciation one.
pub fn a_or_an(word: &str) -> &'static str {
    match word.chars().next() {
        Some(first) if first.to_lowercase().any(|c| VOWEL_ISH.contains(&c)) => "an",
        _ => "a",
    }
}
