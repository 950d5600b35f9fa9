use std::fmt;

use super::{Tag, TagType};

/// Копируемое представление любого числового тега.
///
/// Сужающие преобразования работают как приведение `as`: значение
/// обрезается или округляется, ошибки не возникает.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
}

macro_rules! narrow {
    ($($name:ident -> $ty:ty),* $(,)?) => {
        $(
            pub fn $name(self) -> $ty {
                match self {
                    Number::Byte(v) => v as $ty,
                    Number::Short(v) => v as $ty,
                    Number::Int(v) => v as $ty,
                    Number::Long(v) => v as $ty,
                    Number::Float(v) => v as $ty,
                    Number::Double(v) => v as $ty,
                }
            }
        )*
    };
}

impl Number {
    narrow! {
        as_i8 -> i8,
        as_i16 -> i16,
        as_i32 -> i32,
        as_i64 -> i64,
        as_f32 -> f32,
        as_f64 -> f64,
    }

    /// Тип тега, из которого получено число.
    pub fn tag_type(self) -> TagType {
        match self {
            Number::Byte(_) => TagType::Byte,
            Number::Short(_) => TagType::Short,
            Number::Int(_) => TagType::Int,
            Number::Long(_) => TagType::Long,
            Number::Float(_) => TagType::Float,
            Number::Double(_) => TagType::Double,
        }
    }

    pub fn is_integral(self) -> bool {
        !matches!(self, Number::Float(_) | Number::Double(_))
    }
}

impl From<Number> for Tag {
    fn from(n: Number) -> Self {
        match n {
            Number::Byte(v) => Tag::Byte(v),
            Number::Short(v) => Tag::Short(v),
            Number::Int(v) => Tag::Int(v),
            Number::Long(v) => Tag::Long(v),
            Number::Float(v) => Tag::Float(v),
            Number::Double(v) => Tag::Double(v),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Number::Byte(v) => write!(f, "{v}b"),
            Number::Short(v) => write!(f, "{v}s"),
            Number::Int(v) => write!(f, "{v}"),
            Number::Long(v) => write!(f, "{v}L"),
            Number::Float(v) => write!(f, "{v}f"),
            Number::Double(v) => write!(f, "{v}d"),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    /// Тест проверяет сужение с обрезкой, как у приведения `as`.
    #[test]
    fn test_narrowing_truncates() {
        let n = Number::Int(300);
        assert_eq!(n.as_i8(), 44);
        assert_eq!(n.as_i16(), 300);
        assert_eq!(n.as_f64(), 300.0);

        let d = Number::Double(-2.75);
        assert_eq!(d.as_i32(), -2);
        assert_eq!(d.as_f32(), -2.75);
    }

    #[test]
    fn test_tag_type_and_back() {
        let n = Number::Long(7);
        assert_eq!(n.tag_type(), TagType::Long);
        assert!(n.is_integral());
        assert!(!Number::Float(1.0).is_integral());
        assert_eq!(Tag::from(n), Tag::Long(7));
    }

    #[test]
    fn test_display_suffixes() {
        assert_eq!(Number::Byte(1).to_string(), "1b");
        assert_eq!(Number::Long(5).to_string(), "5L");
        assert_eq!(Number::Double(0.5).to_string(), "0.5d");
    }
}
