//! Контракты адаптеров.
//!
//! Точные адаптеры ([`TagSerializer`], [`TagDeserializer`]) типизированы и
//! регистрируются под конкретным типом. Адаптеры семейств
//! ([`HierarchySerializer`], [`HierarchyDeserializer`]) работают со
//! стёртыми значениями и получают [`Member`] с хуком конкретного типа.
//!
//! Все адаптеры получают [`Registry`] как контекст, чтобы рекурсивно
//! преобразовывать вложенные значения.

use znbt_error::ZnbtResult;

use super::{Member, Object, Registry};
use crate::Tag;

/// Объект → тег для конкретного типа `T`.
pub trait TagSerializer<T>: Send + Sync {
    fn serialize(
        &self,
        value: &T,
        ctx: &Registry,
    ) -> ZnbtResult<Tag>;
}

/// Тег → объект для конкретного типа `T`.
pub trait TagDeserializer<T>: Send + Sync {
    fn deserialize(
        &self,
        tag: &Tag,
        ctx: &Registry,
    ) -> ZnbtResult<T>;
}

/// Адаптер в обе стороны.
pub trait TagAdapter<T>: TagSerializer<T> + TagDeserializer<T> {}

impl<T, A: TagSerializer<T> + TagDeserializer<T>> TagAdapter<T> for A {}

/// Сериализатор семейства типов.
pub trait HierarchySerializer: Send + Sync {
    fn serialize(
        &self,
        value: &dyn Object,
        member: Member<'_>,
        ctx: &Registry,
    ) -> ZnbtResult<Tag>;
}

/// Десериализатор семейства типов.
///
/// Возвращает значение конкретного типа `member.key()`; реестр проверяет
/// это при приведении.
pub trait HierarchyDeserializer: Send + Sync {
    fn deserialize(
        &self,
        tag: &Tag,
        member: Member<'_>,
        ctx: &Registry,
    ) -> ZnbtResult<Box<dyn Object>>;
}

/// Адаптер семейства в обе стороны.
pub trait HierarchyAdapter: HierarchySerializer + HierarchyDeserializer {}

impl<A: HierarchySerializer + HierarchyDeserializer> HierarchyAdapter for A {}
