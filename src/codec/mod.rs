//! Бинарный кодек именованных тегов.
//!
//! ## Формат
//!
//! Поток целиком сжат gzip. Внутри: конверт верхнего уровня
//! `[id: u8] [длина имени: u16] [имя] [полезная нагрузка]`. Все многобайтовые
//! числа записываются в big-endian.
//!
//! | Тип       | Полезная нагрузка                                |
//! |-----------|--------------------------------------------------|
//! | Byte      | i8                                               |
//! | Short     | i16                                              |
//! | Int       | i32                                              |
//! | Long      | i64                                              |
//! | Float     | f32                                              |
//! | Double    | f64                                              |
//! | ByteArray | длина i32 + байты                                |
//! | String    | длина u16 + байты в кодировке                    |
//! | List      | id типа u8 + число i32 + полезные нагрузки       |
//! | Compound  | именованные конверты + терминатор (id 0)         |
//! | IntArray  | длина i32 + i32 × длина                          |
//! | LongArray | длина i32 + i64 × длина                          |
//!
//! ```
//! use znbt::{codec, CompoundTag, Tag};
//!
//! let root = CompoundTag::builder().put("answer", 42i32).build();
//! let bytes = codec::to_bytes("root", &Tag::from(root.clone()))?;
//!
//! let (name, tag) = codec::from_bytes(&bytes)?;
//! assert_eq!(name, "root");
//! assert_eq!(tag, Tag::from(root));
//! # Ok::<(), znbt::StackError>(())
//! ```

pub mod charset;
pub mod reader;
pub mod writer;

use std::io::{Read, Write};

pub use charset::Charset;
pub use reader::{DecodeFn, NbtReader};
pub use writer::NbtWriter;
use znbt_error::{GenericError, StatusCode, ZnbtResult};

use crate::Tag;

/// Верхняя граница предварительного резервирования памяти под массивы.
///
/// Длина из потока не доверенная: память растёт по мере чтения.
pub(crate) const MAX_PREALLOC: usize = 4096;

/// Кодирует именованный тег в сжатый буфер.
pub fn to_bytes(
    name: &str,
    tag: &Tag,
) -> ZnbtResult<Vec<u8>> {
    write_named(Vec::new(), name, tag)
}

/// Декодирует именованный тег из сжатого буфера.
pub fn from_bytes(bytes: &[u8]) -> ZnbtResult<(String, Tag)> {
    read_named(bytes)
}

/// Пишет один именованный тег и завершает поток.
pub fn write_named<W: Write>(
    writer: W,
    name: &str,
    tag: &Tag,
) -> ZnbtResult<W> {
    let mut w = NbtWriter::new(writer);
    w.write_tag(name, tag)?;
    w.finish()
}

/// Читает один именованный тег. Терминатор на верхнем уровне считается
/// ошибкой данных.
pub fn read_named<R: Read>(reader: R) -> ZnbtResult<(String, Tag)> {
    NbtReader::new(reader).read_named_tag()?.ok_or_else(|| {
        GenericError::new(
            StatusCode::InvalidData,
            "stream contains only an end tag",
        )
        .into()
    })
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
