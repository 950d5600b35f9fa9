use znbt_error::{TagError, ZnbtResult};

use super::Tag;

/// Логическое значение поверх тега Byte.
///
/// Хранит байт, ограниченный множеством {0, 1}. На диске неотличим от
/// обычного Byte, поэтому при чтении логическое значение извлекается через
/// [`Tag::as_boolean`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BooleanTag(i8);

impl BooleanTag {
    /// Создаёт тег из байта, проверяя диапазон.
    pub fn new(value: i8) -> ZnbtResult<Self> {
        Self::validate(value)?;
        Ok(Self(value))
    }

    /// Заменяет значение байтом с проверкой диапазона.
    pub fn set(
        &mut self,
        value: i8,
    ) -> ZnbtResult<()> {
        Self::validate(value)?;
        self.0 = value;
        Ok(())
    }

    pub fn set_bool(
        &mut self,
        value: bool,
    ) {
        self.0 = value as i8;
    }

    pub fn get(self) -> bool {
        self.0 == 1
    }

    /// Байт, который будет записан в поток.
    pub fn as_byte(self) -> i8 {
        self.0
    }

    fn validate(value: i8) -> ZnbtResult<()> {
        match value {
            0 | 1 => Ok(()),
            _ => Err(TagError::InvalidBoolean { value }.into()),
        }
    }
}

impl From<bool> for BooleanTag {
    fn from(value: bool) -> Self {
        Self(value as i8)
    }
}

impl From<BooleanTag> for bool {
    fn from(tag: BooleanTag) -> Self {
        tag.get()
    }
}

impl From<BooleanTag> for Tag {
    fn from(tag: BooleanTag) -> Self {
        Tag::Byte(tag.0)
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
