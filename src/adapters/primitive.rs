//! Логические значения и числа.

use znbt_error::ZnbtResult;

use crate::{Registry, Tag, TagDeserializer, TagSerializer};

/// `bool` ↔ Byte 0/1.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoolAdapter;

impl TagSerializer<bool> for BoolAdapter {
    fn serialize(
        &self,
        value: &bool,
        _: &Registry,
    ) -> ZnbtResult<Tag> {
        Ok(Tag::from(*value))
    }
}

impl TagDeserializer<bool> for BoolAdapter {
    fn deserialize(
        &self,
        tag: &Tag,
        _: &Registry,
    ) -> ZnbtResult<bool> {
        tag.as_boolean()
    }
}

/// Знаковые числа: тег той же ширины при записи, сужение любого
/// числового тега при чтении.
macro_rules! numeric_adapter {
    ($($adapter:ident: $ty:ty => $variant:ident, $narrow:ident;)*) => {
        $(
            #[derive(Debug, Clone, Copy, Default)]
            pub struct $adapter;

            impl TagSerializer<$ty> for $adapter {
                fn serialize(
                    &self,
                    value: &$ty,
                    _: &Registry,
                ) -> ZnbtResult<Tag> {
                    Ok(Tag::$variant(*value))
                }
            }

            impl TagDeserializer<$ty> for $adapter {
                fn deserialize(
                    &self,
                    tag: &Tag,
                    _: &Registry,
                ) -> ZnbtResult<$ty> {
                    tag.$narrow()
                }
            }
        )*
    };
}

/// Беззнаковые числа: знаковый тег той же ширины с сохранением битов.
macro_rules! unsigned_adapter {
    ($($adapter:ident: $ty:ty as $signed:ty => $variant:ident, $narrow:ident;)*) => {
        $(
            #[derive(Debug, Clone, Copy, Default)]
            pub struct $adapter;

            impl TagSerializer<$ty> for $adapter {
                fn serialize(
                    &self,
                    value: &$ty,
                    _: &Registry,
                ) -> ZnbtResult<Tag> {
                    Ok(Tag::$variant(*value as $signed))
                }
            }

            impl TagDeserializer<$ty> for $adapter {
                fn deserialize(
                    &self,
                    tag: &Tag,
                    _: &Registry,
                ) -> ZnbtResult<$ty> {
                    tag.$narrow().map(|v| v as $ty)
                }
            }
        )*
    };
}

numeric_adapter! {
    ByteAdapter: i8 => Byte, as_i8;
    ShortAdapter: i16 => Short, as_i16;
    IntAdapter: i32 => Int, as_i32;
    LongAdapter: i64 => Long, as_i64;
    FloatAdapter: f32 => Float, as_f32;
    DoubleAdapter: f64 => Double, as_f64;
}

unsigned_adapter! {
    UnsignedByteAdapter: u8 as i8 => Byte, as_i8;
    UnsignedShortAdapter: u16 as i16 => Short, as_i16;
    UnsignedIntAdapter: u32 as i32 => Int, as_i32;
    UnsignedLongAdapter: u64 as i64 => Long, as_i64;
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use znbt_error::StatusCode;

    use super::*;

    #[test]
    fn test_bool() {
        let registry = Registry::default();
        assert_eq!(registry.to_tag(&true).unwrap(), Tag::Byte(1));
        assert!(!registry.from_tag::<bool>(&Tag::Byte(0)).unwrap());

        let err = registry.from_tag::<bool>(&Tag::Byte(2)).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::InvalidValue);
    }

    /// Тест проверяет тождественное отображение и сужение при чтении.
    #[test]
    fn test_signed_numbers() {
        let registry = Registry::default();
        assert_eq!(registry.to_tag(&7i16).unwrap(), Tag::Short(7));
        assert_eq!(registry.to_tag(&1.5f32).unwrap(), Tag::Float(1.5));
        assert_eq!(registry.from_tag::<i64>(&Tag::Int(-4)).unwrap(), -4);
        assert_eq!(registry.from_tag::<f64>(&Tag::Byte(3)).unwrap(), 3.0);
        assert_eq!(registry.from_tag::<i8>(&Tag::Int(300)).unwrap(), 44);

        let err = registry.from_tag::<i32>(&Tag::String("1".into())).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::Unsupported);
    }

    /// Тест проверяет сохранение битов для беззнаковых типов.
    #[test]
    fn test_unsigned_bit_reinterpretation() {
        let registry = Registry::default();
        assert_eq!(registry.to_tag(&255u8).unwrap(), Tag::Byte(-1));
        assert_eq!(registry.from_tag::<u8>(&Tag::Byte(-1)).unwrap(), 255);
        assert_eq!(registry.to_tag(&u64::MAX).unwrap(), Tag::Long(-1));
        assert_eq!(registry.from_tag::<u64>(&Tag::Long(-1)).unwrap(), u64::MAX);
        assert_eq!(registry.from_tag::<u32>(&Tag::Int(i32::MIN)).unwrap(), 1 << 31);
    }
}
