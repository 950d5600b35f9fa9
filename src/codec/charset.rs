use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use znbt_error::{StackError, TagError, ZnbtResult};

/// Кодировка имён и строковых тегов.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
#[serde(rename_all = "lowercase")]
pub enum Charset {
    #[default]
    Utf8,
    /// ISO-8859-1: один байт на символ, U+0000..=U+00FF
    Latin1,
}

impl Charset {
    pub fn name(self) -> &'static str {
        match self {
            Charset::Utf8 => "UTF-8",
            Charset::Latin1 => "ISO-8859-1",
        }
    }

    /// Кодирует текст. Непредставимый символ является ошибкой, замены нет.
    pub fn encode<'a>(
        self,
        text: &'a str,
    ) -> ZnbtResult<Cow<'a, [u8]>> {
        match self {
            Charset::Utf8 => Ok(Cow::Borrowed(text.as_bytes())),
            Charset::Latin1 => {
                if text.is_ascii() {
                    return Ok(Cow::Borrowed(text.as_bytes()));
                }
                text.chars()
                    .map(|c| {
                        u8::try_from(u32::from(c)).map_err(|_| {
                            StackError::from(TagError::Encoding {
                                charset: self.name(),
                                reason: format!("unmappable character {c:?}"),
                            })
                        })
                    })
                    .collect::<ZnbtResult<Vec<u8>>>()
                    .map(Cow::Owned)
            }
        }
    }

    pub fn decode(
        self,
        bytes: Vec<u8>,
    ) -> ZnbtResult<String> {
        match self {
            Charset::Utf8 => Ok(String::from_utf8(bytes)?),
            Charset::Latin1 => Ok(bytes.into_iter().map(char::from).collect()),
        }
    }
}

impl std::str::FromStr for Charset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "utf8" | "utf-8" => Ok(Charset::Utf8),
            "latin1" | "iso-8859-1" => Ok(Charset::Latin1),
            other => Err(format!("unknown charset '{other}'")),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
