//! Модель данных тегов.
//!
//! [`Tag`] есть закрытое объединение из 13 вариантов, каждый из которых
//! помечен однобайтовым [`TagType`]. Листовые значения хранятся напрямую,
//! списки и составные теги вынесены в [`ListTag`] и [`CompoundTag`].
//!
//! ```
//! use znbt::{CompoundTag, ListTag, Tag};
//!
//! let friends = ListTag::from_elements(vec!["Steve".into(), "Alex".into()])?;
//! let player = CompoundTag::builder()
//!     .put("name", "Herobrine")
//!     .put("age", 31i32)
//!     .put("friends", friends)
//!     .build();
//!
//! let tag = Tag::from(player);
//! assert_eq!(tag.as_compound()?.require("age")?.as_i32()?, 31);
//! # Ok::<(), znbt::StackError>(())
//! ```

pub mod boolean;
pub mod compound;
pub mod kind;
pub mod list;
pub mod number;

use std::fmt;

pub use boolean::BooleanTag;
pub use compound::{CompoundIter, CompoundTag, CompoundTagBuilder};
pub use kind::TagType;
pub use list::ListTag;
pub use number::Number;
use znbt_error::{TagError, ZnbtResult};

/// Значение в формате именованных бинарных тегов.
#[derive(Debug, Clone, PartialEq)]
pub enum Tag {
    /// Терминатор; пользовательских данных не несёт
    End,
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    /// Байты хранятся беззнаковыми; на проводе это те же октеты, что и у
    /// знакового массива (0xFF здесь 255, а в `Tag::Byte` это -1).
    ByteArray(Vec<u8>),
    String(String),
    List(ListTag),
    Compound(CompoundTag),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
}

impl Tag {
    pub fn tag_type(&self) -> TagType {
        match self {
            Tag::End => TagType::End,
            Tag::Byte(_) => TagType::Byte,
            Tag::Short(_) => TagType::Short,
            Tag::Int(_) => TagType::Int,
            Tag::Long(_) => TagType::Long,
            Tag::Float(_) => TagType::Float,
            Tag::Double(_) => TagType::Double,
            Tag::ByteArray(_) => TagType::ByteArray,
            Tag::String(_) => TagType::String,
            Tag::List(_) => TagType::List,
            Tag::Compound(_) => TagType::Compound,
            Tag::IntArray(_) => TagType::IntArray,
            Tag::LongArray(_) => TagType::LongArray,
        }
    }

    /// Числовой идентификатор типа (0–12).
    pub fn type_id(&self) -> u8 {
        self.tag_type().id()
    }

    pub fn is_compound(&self) -> bool {
        matches!(self, Tag::Compound(_))
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Tag::List(_))
    }

    pub fn is_number(&self) -> bool {
        self.tag_type().is_numeric()
    }

    /// Логическое значение хранится как Byte со значением 0 или 1.
    pub fn is_boolean(&self) -> bool {
        matches!(self, Tag::Byte(0 | 1))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Tag::String(_))
    }

    pub fn as_compound(&self) -> ZnbtResult<&CompoundTag> {
        match self {
            Tag::Compound(c) => Ok(c),
            other => Err(other.unsupported("as_compound")),
        }
    }

    pub fn as_compound_mut(&mut self) -> ZnbtResult<&mut CompoundTag> {
        match self {
            Tag::Compound(c) => Ok(c),
            other => Err(other.unsupported("as_compound_mut")),
        }
    }

    pub fn as_list(&self) -> ZnbtResult<&ListTag> {
        match self {
            Tag::List(l) => Ok(l),
            other => Err(other.unsupported("as_list")),
        }
    }

    pub fn as_list_mut(&mut self) -> ZnbtResult<&mut ListTag> {
        match self {
            Tag::List(l) => Ok(l),
            other => Err(other.unsupported("as_list_mut")),
        }
    }

    pub fn as_str(&self) -> ZnbtResult<&str> {
        match self {
            Tag::String(s) => Ok(s),
            other => Err(other.unsupported("as_str")),
        }
    }

    /// Числовое представление любого из шести числовых вариантов.
    pub fn as_number(&self) -> ZnbtResult<Number> {
        match *self {
            Tag::Byte(v) => Ok(Number::Byte(v)),
            Tag::Short(v) => Ok(Number::Short(v)),
            Tag::Int(v) => Ok(Number::Int(v)),
            Tag::Long(v) => Ok(Number::Long(v)),
            Tag::Float(v) => Ok(Number::Float(v)),
            Tag::Double(v) => Ok(Number::Double(v)),
            ref other => Err(other.unsupported("as_number")),
        }
    }

    /// Byte 0/1 → false/true. Другие значения байта дают
    /// [`TagError::InvalidBoolean`].
    pub fn as_boolean(&self) -> ZnbtResult<bool> {
        match *self {
            Tag::Byte(v) => Ok(BooleanTag::new(v)?.get()),
            ref other => Err(other.unsupported("as_boolean")),
        }
    }

    pub fn as_i8(&self) -> ZnbtResult<i8> {
        self.as_number().map(Number::as_i8)
    }

    pub fn as_i16(&self) -> ZnbtResult<i16> {
        self.as_number().map(Number::as_i16)
    }

    pub fn as_i32(&self) -> ZnbtResult<i32> {
        self.as_number().map(Number::as_i32)
    }

    pub fn as_i64(&self) -> ZnbtResult<i64> {
        self.as_number().map(Number::as_i64)
    }

    pub fn as_f32(&self) -> ZnbtResult<f32> {
        self.as_number().map(Number::as_f32)
    }

    pub fn as_f64(&self) -> ZnbtResult<f64> {
        self.as_number().map(Number::as_f64)
    }

    pub fn as_byte_array(&self) -> ZnbtResult<&[u8]> {
        match self {
            Tag::ByteArray(v) => Ok(v),
            other => Err(other.unsupported("as_byte_array")),
        }
    }

    pub fn as_int_array(&self) -> ZnbtResult<&[i32]> {
        match self {
            Tag::IntArray(v) => Ok(v),
            other => Err(other.unsupported("as_int_array")),
        }
    }

    pub fn as_long_array(&self) -> ZnbtResult<&[i64]> {
        match self {
            Tag::LongArray(v) => Ok(v),
            other => Err(other.unsupported("as_long_array")),
        }
    }

    fn unsupported(
        &self,
        operation: &'static str,
    ) -> znbt_error::StackError {
        TagError::UnsupportedOperation {
            operation,
            variant: self.tag_type().name(),
        }
        .into()
    }
}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Tag {
                fn from(v: $ty) -> Self {
                    Tag::$variant(v)
                }
            }
        )*
    };
}

impl_from! {
    i8 => Byte,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    Vec<u8> => ByteArray,
    String => String,
    ListTag => List,
    CompoundTag => Compound,
    Vec<i32> => IntArray,
    Vec<i64> => LongArray,
}

impl From<bool> for Tag {
    fn from(v: bool) -> Self {
        BooleanTag::from(v).into()
    }
}

impl From<&str> for Tag {
    fn from(v: &str) -> Self {
        Tag::String(v.to_owned())
    }
}

impl fmt::Display for Tag {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Tag::End => f.write_str("END"),
            Tag::String(s) => write!(f, "{s:?}"),
            Tag::ByteArray(v) => write_array(f, "B", v),
            Tag::IntArray(v) => write_array(f, "I", v),
            Tag::LongArray(v) => write_array(f, "L", v),
            Tag::List(l) => write!(f, "{l}"),
            Tag::Compound(c) => write!(f, "{c}"),
            other => match other.as_number() {
                Ok(n) => write!(f, "{n}"),
                Err(_) => Err(fmt::Error),
            },
        }
    }
}

fn write_array<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    prefix: &str,
    values: &[T],
) -> fmt::Result {
    write!(f, "[{prefix};")?;
    for (i, v) in values.iter().enumerate() {
        f.write_str(if i == 0 { " " } else { ", " })?;
        write!(f, "{v}")?;
    }
    f.write_str("]")
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use znbt_error::StatusCode;

    use super::*;

    /// Тест проверяет, что каждый вариант сообщает свой id.
    #[test]
    fn test_type_ids() {
        let samples: Vec<Tag> = vec![
            Tag::End,
            1i8.into(),
            2i16.into(),
            3i32.into(),
            4i64.into(),
            5f32.into(),
            6f64.into(),
            vec![7u8].into(),
            "8".into(),
            ListTag::default().into(),
            CompoundTag::new().into(),
            vec![11i32].into(),
            vec![12i64].into(),
        ];
        for (id, tag) in samples.iter().enumerate() {
            assert_eq!(tag.type_id() as usize, id, "{tag:?}");
        }
    }

    /// Тест проверяет проверки возможностей.
    #[test]
    fn test_probes() {
        assert!(Tag::Int(1).is_number());
        assert!(!Tag::String("1".into()).is_number());
        assert!(Tag::Byte(1).is_boolean());
        assert!(!Tag::Byte(2).is_boolean());
        assert!(Tag::from(true).is_boolean());
        assert!(Tag::from("x").is_string());
        assert!(Tag::from(CompoundTag::new()).is_compound());
        assert!(Tag::from(ListTag::default()).is_list());
    }

    /// Тест проверяет, что несовместимое сужение даёт ошибку, а не приведение.
    #[test]
    fn test_narrowing_on_wrong_variant_fails() {
        let tag = Tag::String("42".into());
        for err in [
            tag.as_i32().unwrap_err(),
            tag.as_f64().unwrap_err(),
            tag.as_boolean().unwrap_err(),
            tag.as_compound().unwrap_err(),
            tag.as_list().unwrap_err(),
        ] {
            assert_eq!(err.status_code(), StatusCode::Unsupported);
            assert!(err.to_string().contains("String"));
        }
        assert_eq!(Tag::Int(1).as_str().unwrap_err().status_code(), StatusCode::Unsupported);
    }

    /// Тест проверяет числовое сужение между любыми числовыми вариантами.
    #[test]
    fn test_numeric_narrowing() {
        assert_eq!(Tag::Long(1 << 40).as_i32().unwrap(), 0);
        assert_eq!(Tag::Byte(-1).as_i64().unwrap(), -1);
        assert_eq!(Tag::Float(2.5).as_i16().unwrap(), 2);
        assert_eq!(Tag::Short(3).as_f32().unwrap(), 3.0);
    }

    /// Тест проверяет извлечение логического значения из Byte.
    #[test]
    fn test_as_boolean() {
        assert!(Tag::Byte(1).as_boolean().unwrap());
        assert!(!Tag::Byte(0).as_boolean().unwrap());
        let err = Tag::Byte(3).as_boolean().unwrap_err();
        assert_eq!(err.status_code(), StatusCode::InvalidValue);
    }

    /// Тест проверяет, что байтовый массив кодируется октетами как есть,
    /// без знакового преобразования.
    #[test]
    fn test_byte_array_is_unsigned_octets() {
        use std::io::Read;

        let tag = Tag::ByteArray(vec![255, 128]);
        let bytes = crate::codec::to_bytes("", &tag).unwrap();
        let mut raw = Vec::new();
        flate2::read::GzDecoder::new(bytes.as_slice())
            .read_to_end(&mut raw)
            .unwrap();
        assert_eq!(raw, [7, 0, 0, 0, 0, 0, 2, 0xFF, 0x80]);
        assert_eq!(crate::codec::from_bytes(&bytes).unwrap().1, tag);
    }

    #[test]
    fn test_array_accessors() {
        assert_eq!(Tag::ByteArray(vec![1, 2]).as_byte_array().unwrap(), &[1, 2]);
        assert_eq!(Tag::IntArray(vec![3]).as_int_array().unwrap(), &[3]);
        assert_eq!(Tag::LongArray(vec![4]).as_long_array().unwrap(), &[4]);
        assert!(Tag::IntArray(vec![]).as_long_array().is_err());
    }

    #[test]
    fn test_mut_accessors() {
        let mut tag = Tag::from(CompoundTag::new());
        tag.as_compound_mut().unwrap().put("k", 1i32);
        assert_eq!(tag.as_compound().unwrap().len(), 1);

        let mut list = Tag::from(ListTag::default());
        list.as_list_mut().unwrap().push(Tag::Int(1)).unwrap();
        assert_eq!(list.as_list().unwrap().len(), 1);
    }

    #[test]
    fn test_display() {
        assert_eq!(Tag::End.to_string(), "END");
        assert_eq!(Tag::Short(3).to_string(), "3s");
        assert_eq!(Tag::IntArray(vec![1, 2]).to_string(), "[I; 1, 2]");
        assert_eq!(Tag::ByteArray(vec![]).to_string(), "[B;]");
        assert_eq!(Tag::from("a\"b").to_string(), r#""a\"b""#);
    }
}
