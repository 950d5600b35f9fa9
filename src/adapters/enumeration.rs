//! Перечисления: вариант ↔ строковый тег с его именем.
//!
//! Тип, объявленный через [`tag_enum!`](crate::tag_enum), входит в семейство
//! `dyn TagEnum`, и для него не нужна отдельная регистрация: встроенный
//! [`EnumHierarchyAdapter`] обслуживает все такие типы через [`EnumHook`].

use std::{
    any::{type_name, Any},
    fmt,
    marker::PhantomData,
};

use znbt_error::{ParserError, StackError, ZnbtResult};

use crate::{
    Family, HierarchyDeserializer, HierarchySerializer, Member, Object, Registry, Tag,
    TagDeserializer, TagSerializer, Typed,
};

/// Перечисление без полей, представимое именем варианта.
pub trait TagEnum: Typed {
    fn variant_name(&self) -> &'static str;

    /// Точное, чувствительное к регистру сопоставление имени.
    fn from_variant_name(name: &str) -> Option<Self>
    where
        Self: Sized;
}

/// Хук семейства `dyn TagEnum`: стёртые функции конкретного перечисления.
#[derive(Clone, Copy)]
pub struct EnumHook {
    type_name: &'static str,
    name_of: fn(&dyn Any) -> Option<&'static str>,
    parse: fn(&str) -> Option<Box<dyn Object>>,
}

impl EnumHook {
    pub fn of<E: TagEnum>() -> Self {
        Self {
            type_name: type_name::<E>(),
            name_of: |value| value.downcast_ref::<E>().map(E::variant_name),
            parse: |name| E::from_variant_name(name).map(|v| Box::new(v) as Box<dyn Object>),
        }
    }

    /// Членство `E` в семействе `dyn TagEnum`.
    pub fn family<E: TagEnum>() -> Family {
        Family::with_hook::<dyn TagEnum, _>(Self::of::<E>())
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl fmt::Debug for EnumHook {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_tuple("EnumHook").field(&self.type_name).finish()
    }
}

/// Адаптер семейства `dyn TagEnum`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnumHierarchyAdapter;

impl HierarchySerializer for EnumHierarchyAdapter {
    fn serialize(
        &self,
        value: &dyn Object,
        member: Member<'_>,
        _: &Registry,
    ) -> ZnbtResult<Tag> {
        let hook = hook(member)?;
        let name = (hook.name_of)(value.as_any()).ok_or_else(|| ParserError::TypeMismatch {
            expected: hook.type_name.to_owned(),
            got: value.type_key().name().to_owned(),
        })?;
        Ok(Tag::String(name.to_owned()))
    }
}

impl HierarchyDeserializer for EnumHierarchyAdapter {
    fn deserialize(
        &self,
        tag: &Tag,
        member: Member<'_>,
        _: &Registry,
    ) -> ZnbtResult<Box<dyn Object>> {
        let hook = hook(member)?;
        let name = tag.as_str()?;
        (hook.parse)(name).ok_or_else(|| unknown(hook.type_name, name))
    }
}

fn hook(member: Member<'_>) -> Result<&EnumHook, ParserError> {
    member
        .hook::<EnumHook>()
        .ok_or_else(|| ParserError::InvalidValue {
            type_name: member.key().name().to_owned(),
            reason: "type does not describe its enum variants".into(),
        })
}

fn unknown(
    enum_name: &str,
    name: &str,
) -> StackError {
    ParserError::UnknownVariant {
        enum_name: enum_name.to_owned(),
        name: name.to_owned(),
    }
    .into()
}

/// Точный адаптер одного перечисления.
///
/// Нужен, когда реестр построен без встроенного адаптера семейства
/// ([`RegistryBuilder::empty`](crate::RegistryBuilder::empty)).
pub struct EnumAdapter<E>(PhantomData<fn() -> E>);

impl<E> EnumAdapter<E> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<E> Default for EnumAdapter<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: TagEnum> TagSerializer<E> for EnumAdapter<E> {
    fn serialize(
        &self,
        value: &E,
        _: &Registry,
    ) -> ZnbtResult<Tag> {
        Ok(Tag::String(value.variant_name().to_owned()))
    }
}

impl<E: TagEnum> TagDeserializer<E> for EnumAdapter<E> {
    fn deserialize(
        &self,
        tag: &Tag,
        _: &Registry,
    ) -> ZnbtResult<E> {
        let name = tag.as_str()?;
        E::from_variant_name(name).ok_or_else(|| unknown(type_name::<E>(), name))
    }
}

/// Реализует [`TagEnum`] и [`Typed`] для перечисления без полей.
///
/// Имена вариантов совпадают с идентификаторами Rust.
///
/// ```
/// use znbt::{tag_enum, Registry, Tag};
///
/// #[derive(Debug, PartialEq)]
/// enum GameMode {
///     Survival,
///     Creative,
/// }
///
/// tag_enum!(GameMode { Survival, Creative });
///
/// let registry = Registry::default();
/// assert_eq!(
///     registry.to_tag(&GameMode::Creative).unwrap(),
///     Tag::String("Creative".into())
/// );
/// ```
#[macro_export]
macro_rules! tag_enum {
    ($ty:ty { $($variant:ident),+ $(,)? }) => {
        impl $crate::TagEnum for $ty {
            fn variant_name(&self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant),)+
                }
            }

            fn from_variant_name(name: &str) -> Option<Self> {
                match name {
                    $(stringify!($variant) => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }

        impl $crate::Typed for $ty {
            fn hierarchy() -> Vec<$crate::Family> {
                vec![$crate::EnumHook::family::<Self>()]
            }
        }
    };
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
