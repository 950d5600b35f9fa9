//! Ключи типов и семейств для реестра.
//!
//! Рефлексии в Rust нет, поэтому тип сообщает о себе сам: [`Typed`] задаёт
//! список семейств, к которым он относится, а [`Object`] позволяет работать
//! со значением через `&dyn Object`, сохраняя его конкретный тип.

use std::{
    any::{type_name, Any, TypeId},
    fmt,
    hash::{Hash, Hasher},
    sync::Arc,
};

/// Идентификатор типа вместе с его именем для сообщений об ошибках.
///
/// Сравнение и хеширование идут только по [`TypeId`].
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    /// Ключ любого `'static` типа, включая `dyn Trait`.
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeKey {
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(
        &self,
        state: &mut H,
    ) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "TypeKey({})", self.name)
    }
}

impl fmt::Display for TypeKey {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Членство типа в семействе.
///
/// Хук: произвольное значение, которое адаптер семейства использует, чтобы
/// работать с конкретным типом без знания о нём (например, функции
/// получения имени варианта перечисления).
#[derive(Clone)]
pub struct Family {
    key: TypeKey,
    hook: Option<Arc<dyn Any + Send + Sync>>,
}

impl Family {
    /// Членство без хука.
    pub fn of<F: ?Sized + 'static>() -> Self {
        Self {
            key: TypeKey::of::<F>(),
            hook: None,
        }
    }

    /// Членство с хуком для адаптера семейства.
    pub fn with_hook<F: ?Sized + 'static, H: Any + Send + Sync>(hook: H) -> Self {
        Self {
            key: TypeKey::of::<F>(),
            hook: Some(Arc::new(hook)),
        }
    }

    pub fn key(&self) -> TypeKey {
        self.key
    }

    pub fn hook(&self) -> Option<&(dyn Any + Send + Sync)> {
        self.hook.as_deref()
    }
}

impl fmt::Debug for Family {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("Family")
            .field("key", &self.key)
            .field("hook", &self.hook.is_some())
            .finish()
    }
}

/// Тип, который реестр умеет преобразовывать.
pub trait Typed: Any {
    /// Семейства, к которым принадлежит тип, в порядке убывания
    /// специфичности. По умолчанию пусто.
    fn hierarchy() -> Vec<Family>
    where
        Self: Sized,
    {
        Vec::new()
    }
}

/// Объектно-безопасный спутник [`Typed`].
///
/// Реализован для всех `Typed` автоматически.
pub trait Object: Any {
    fn type_key(&self) -> TypeKey;

    fn families(&self) -> Vec<Family>;

    fn as_any(&self) -> &dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: Typed> Object for T {
    fn type_key(&self) -> TypeKey {
        TypeKey::of::<T>()
    }

    fn families(&self) -> Vec<Family> {
        T::hierarchy()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

impl fmt::Debug for dyn Object {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "Object<{}>", self.type_key())
    }
}

/// Конкретный тип, обрабатываемый адаптером семейства, и его хук.
#[derive(Clone, Copy)]
pub struct Member<'a> {
    key: TypeKey,
    hook: Option<&'a (dyn Any + Send + Sync)>,
}

impl<'a> Member<'a> {
    pub(crate) fn new(
        key: TypeKey,
        hook: Option<&'a (dyn Any + Send + Sync)>,
    ) -> Self {
        Self { key, hook }
    }

    /// Ключ конкретного типа значения.
    pub fn key(&self) -> TypeKey {
        self.key
    }

    /// Хук, приведённый к ожидаемому типу.
    pub fn hook<H: Any>(&self) -> Option<&'a H> {
        self.hook.and_then(|h| h.downcast_ref::<H>())
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
