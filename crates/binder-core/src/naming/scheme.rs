/*!
# Casing Schemes

Word segmentation and recompilation for the five identifier casing schemes.
Segmented words are always lower-case; [`CasingScheme::compile`] re-applies the
scheme's casing and separator.
*/

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier casing scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CasingScheme {
    /// `all_lower_words`
    AllLower,
    /// `ALL_UPPER_WORDS`
    AllUpper,
    /// `First_upper_words`
    FirstUpper,
    /// `lowerCamelWords`
    LowerCamel,
    /// `UpperCamelWords`
    UpperCamel,
}

impl CasingScheme {
    pub const ALL: [CasingScheme; 5] = [
        CasingScheme::AllLower,
        CasingScheme::AllUpper,
        CasingScheme::FirstUpper,
        CasingScheme::LowerCamel,
        CasingScheme::UpperCamel,
    ];

    /// Regex for the part of a name between prefix and suffix
    pub(crate) fn body_pattern(self) -> &'static str {
        match self {
            CasingScheme::AllLower => r"[a-z][a-z0-9]*(?:_[a-z0-9]+)*_?",
            CasingScheme::AllUpper => r"[A-Z][A-Z0-9]*(?:_[A-Z0-9]+)*_?",
            CasingScheme::FirstUpper => r"[A-Z][a-z0-9]*(?:_[a-z0-9]+)*_?",
            CasingScheme::LowerCamel => r"[a-z][a-z0-9]*(?:[A-Z][a-z0-9]+)*",
            CasingScheme::UpperCamel => r"(?:[A-Z][a-z0-9]+)*(?:[A-Z][a-z0-9]+|[A-Z])",
        }
    }

    fn separator(self) -> &'static str {
        match self {
            CasingScheme::AllLower | CasingScheme::AllUpper | CasingScheme::FirstUpper => "_",
            CasingScheme::LowerCamel | CasingScheme::UpperCamel => "",
        }
    }

    /// Split an already validated body into lower-case words.
    ///
    /// A trailing `_` becomes an empty final word.
    pub(crate) fn split_body(self, body: &str) -> Vec<String> {
        match self {
            CasingScheme::AllLower | CasingScheme::AllUpper | CasingScheme::FirstUpper => {
                body.split('_').map(str::to_lowercase).collect()
            }
            CasingScheme::LowerCamel | CasingScheme::UpperCamel => {
                let mut words = Vec::new();
                let mut current = String::new();
                for ch in body.chars() {
                    if ch.is_ascii_uppercase() && !current.is_empty() {
                        words.push(std::mem::take(&mut current));
                    }
                    current.push(ch.to_ascii_lowercase());
                }
                if !current.is_empty() {
                    words.push(current);
                }
                words
            }
        }
    }

    /// Render words in this scheme, without prefix or suffix
    pub fn compile<S: AsRef<str>>(self, words: &[S]) -> String {
        let rendered: Vec<String> = words
            .iter()
            .enumerate()
            .map(|(index, word)| {
                let word = word.as_ref();
                match self {
                    CasingScheme::AllLower => word.to_lowercase(),
                    CasingScheme::AllUpper => word.to_uppercase(),
                    CasingScheme::FirstUpper if index == 0 => capitalize(word),
                    CasingScheme::FirstUpper => word.to_lowercase(),
                    CasingScheme::LowerCamel if index == 0 => word.to_lowercase(),
                    CasingScheme::LowerCamel | CasingScheme::UpperCamel => capitalize(word),
                }
            })
            .collect();
        rendered.join(self.separator())
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

impl fmt::Display for CasingScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CasingScheme::AllLower => "AllLower",
            CasingScheme::AllUpper => "AllUpper",
            CasingScheme::FirstUpper => "FirstUpper",
            CasingScheme::LowerCamel => "LowerCamel",
            CasingScheme::UpperCamel => "UpperCamel",
        };
        f.write_str(name)
    }
}

impl FromStr for CasingScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CasingScheme::ALL
            .into_iter()
            .find(|scheme| scheme.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown casing scheme '{}'", s))
    }
}
