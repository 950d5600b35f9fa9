//! Идентификаторы типов тегов.
//!
//! Каждый вариант [`crate::Tag`] помечается однобайтовым идентификатором,
//! который является частью формата на диске и не меняется между версиями.

use std::fmt;

use num_enum::{IntoPrimitive, TryFromPrimitive};
use znbt_error::{TagError, ZnbtResult};

/// Однобайтовый идентификатор типа тега.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
#[repr(u8)]
pub enum TagType {
    /// Терминатор составного тега
    End = 0,
    Byte = 1,
    Short = 2,
    Int = 3,
    Long = 4,
    Float = 5,
    Double = 6,
    ByteArray = 7,
    String = 8,
    List = 9,
    Compound = 10,
    IntArray = 11,
    LongArray = 12,
}

impl TagType {
    /// Все встроенные типы в порядке идентификаторов.
    pub const ALL: [TagType; 13] = [
        TagType::End,
        TagType::Byte,
        TagType::Short,
        TagType::Int,
        TagType::Long,
        TagType::Float,
        TagType::Double,
        TagType::ByteArray,
        TagType::String,
        TagType::List,
        TagType::Compound,
        TagType::IntArray,
        TagType::LongArray,
    ];

    /// Числовой идентификатор для записи в поток.
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Разбирает идентификатор из потока.
    pub fn from_id(id: u8) -> ZnbtResult<Self> {
        Self::try_from(id).map_err(|_| TagError::UnknownTagType { id }.into())
    }

    /// Человекочитаемое имя типа.
    pub const fn name(self) -> &'static str {
        match self {
            TagType::End => "End",
            TagType::Byte => "Byte",
            TagType::Short => "Short",
            TagType::Int => "Int",
            TagType::Long => "Long",
            TagType::Float => "Float",
            TagType::Double => "Double",
            TagType::ByteArray => "ByteArray",
            TagType::String => "String",
            TagType::List => "List",
            TagType::Compound => "Compound",
            TagType::IntArray => "IntArray",
            TagType::LongArray => "LongArray",
        }
    }

    /// `true` для Byte, Short, Int, Long, Float и Double.
    pub const fn is_numeric(self) -> bool {
        matches!(
            self,
            TagType::Byte
                | TagType::Short
                | TagType::Int
                | TagType::Long
                | TagType::Float
                | TagType::Double
        )
    }
}

impl fmt::Display for TagType {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.name())
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
