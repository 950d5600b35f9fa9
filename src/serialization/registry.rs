use std::{fmt, sync::Arc};

use ahash::AHashMap;
use tracing::{debug, trace};
use znbt_error::{ParserError, StackError, ZnbtResult};

use super::{
    Family, HierarchyAdapter, HierarchyDeserializer, HierarchySerializer, Member, Object,
    TagAdapter, TagDeserializer, TagSerializer, TypeKey, Typed,
};
use crate::{
    adapters::{self, EnumAdapter, SerializableAdapter, TagEnum, TagSerializable, VecAdapter},
    Tag,
};

type SerializeFn = Arc<dyn Fn(&dyn Object, &Registry) -> ZnbtResult<Tag> + Send + Sync>;
type DeserializeFn = Arc<dyn Fn(&Tag, &Registry) -> ZnbtResult<Box<dyn Object>> + Send + Sync>;

/// Четыре таблицы адаптеров.
#[derive(Clone, Default)]
struct Tables {
    serializers: AHashMap<TypeKey, SerializeFn>,
    deserializers: AHashMap<TypeKey, DeserializeFn>,
    hierarchy_serializers: Vec<(TypeKey, Arc<dyn HierarchySerializer>)>,
    hierarchy_deserializers: Vec<(TypeKey, Arc<dyn HierarchyDeserializer>)>,
}

/// Накопитель регистраций.
///
/// [`RegistryBuilder::build`] делает неизменяемый снимок; дальнейшие
/// регистрации на уже построенные реестры не влияют.
#[derive(Clone)]
pub struct RegistryBuilder {
    tables: Tables,
}

impl RegistryBuilder {
    /// Построитель со встроенными адаптерами.
    pub fn new() -> Self {
        let mut builder = Self::empty();
        adapters::register_builtins(&mut builder);
        builder
    }

    /// Построитель без единой регистрации.
    pub fn empty() -> Self {
        Self {
            tables: Tables::default(),
        }
    }

    /// Регистрирует адаптер в обе стороны для типа `T`.
    pub fn register_type_adapter<T, A>(
        &mut self,
        adapter: A,
    ) -> &mut Self
    where
        T: Typed,
        A: TagAdapter<T> + 'static,
    {
        let adapter = Arc::new(adapter);
        self.insert_serializer::<T, A>(adapter.clone());
        self.insert_deserializer::<T, A>(adapter);
        self
    }

    pub fn register_type_serializer<T, S>(
        &mut self,
        serializer: S,
    ) -> &mut Self
    where
        T: Typed,
        S: TagSerializer<T> + 'static,
    {
        self.insert_serializer::<T, S>(Arc::new(serializer));
        self
    }

    pub fn register_type_deserializer<T, D>(
        &mut self,
        deserializer: D,
    ) -> &mut Self
    where
        T: Typed,
        D: TagDeserializer<T> + 'static,
    {
        self.insert_deserializer::<T, D>(Arc::new(deserializer));
        self
    }

    /// Регистрирует адаптер семейства `F` в обе стороны.
    ///
    /// `F` может быть любым `'static` типом, обычно `dyn Trait` или маркер. Повторная
    /// регистрация под тем же ключом заменяет адаптер, сохраняя его место
    /// в порядке перебора.
    pub fn register_type_hierarchy_adapter<F, A>(
        &mut self,
        adapter: A,
    ) -> &mut Self
    where
        F: ?Sized + 'static,
        A: HierarchyAdapter + 'static,
    {
        let adapter = Arc::new(adapter);
        let key = TypeKey::of::<F>();
        upsert(
            &mut self.tables.hierarchy_serializers,
            key,
            adapter.clone() as Arc<dyn HierarchySerializer>,
        );
        upsert(
            &mut self.tables.hierarchy_deserializers,
            key,
            adapter as Arc<dyn HierarchyDeserializer>,
        );
        self
    }

    pub fn register_type_hierarchy_serializer<F, S>(
        &mut self,
        serializer: S,
    ) -> &mut Self
    where
        F: ?Sized + 'static,
        S: HierarchySerializer + 'static,
    {
        upsert(
            &mut self.tables.hierarchy_serializers,
            TypeKey::of::<F>(),
            Arc::new(serializer) as Arc<dyn HierarchySerializer>,
        );
        self
    }

    pub fn register_type_hierarchy_deserializer<F, D>(
        &mut self,
        deserializer: D,
    ) -> &mut Self
    where
        F: ?Sized + 'static,
        D: HierarchyDeserializer + 'static,
    {
        upsert(
            &mut self.tables.hierarchy_deserializers,
            TypeKey::of::<F>(),
            Arc::new(deserializer) as Arc<dyn HierarchyDeserializer>,
        );
        self
    }

    /// Точный адаптер перечисления по имени варианта.
    pub fn register_enum<E: TagEnum>(&mut self) -> &mut Self {
        self.register_type_adapter::<E, _>(EnumAdapter::<E>::new())
    }

    /// Адаптер для типа, который сам описывает своё представление.
    pub fn register_serializable<T: TagSerializable>(&mut self) -> &mut Self {
        self.register_type_adapter::<T, _>(SerializableAdapter::<T>::new())
    }

    /// Адаптер `Vec<T>` ↔ список.
    pub fn register_vec<T: Typed>(&mut self) -> &mut Self {
        self.register_type_adapter::<Vec<T>, _>(VecAdapter::<T>::new())
    }

    /// Снимок текущих регистраций.
    pub fn build(&self) -> Registry {
        debug!(
            serializers = self.tables.serializers.len(),
            deserializers = self.tables.deserializers.len(),
            hierarchy_serializers = self.tables.hierarchy_serializers.len(),
            hierarchy_deserializers = self.tables.hierarchy_deserializers.len(),
            "tag registry built"
        );
        Registry {
            tables: Arc::new(self.tables.clone()),
        }
    }

    fn insert_serializer<T, S>(
        &mut self,
        serializer: Arc<S>,
    ) where
        T: Typed,
        S: TagSerializer<T> + 'static,
    {
        let expected = TypeKey::of::<T>();
        let erased: SerializeFn = Arc::new(move |value: &dyn Object, ctx: &Registry| {
            let typed = value
                .as_any()
                .downcast_ref::<T>()
                .ok_or_else(|| mismatch(expected, value.type_key()))?;
            serializer.serialize(typed, ctx)
        });
        self.tables.serializers.insert(expected, erased);
    }

    fn insert_deserializer<T, D>(
        &mut self,
        deserializer: Arc<D>,
    ) where
        T: Typed,
        D: TagDeserializer<T> + 'static,
    {
        let erased: DeserializeFn = Arc::new(move |tag: &Tag, ctx: &Registry| {
            let value = deserializer.deserialize(tag, ctx)?;
            Ok(Box::new(value) as Box<dyn Object>)
        });
        self.tables.deserializers.insert(TypeKey::of::<T>(), erased);
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RegistryBuilder {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        self.tables.fmt_counts("RegistryBuilder", f)
    }
}

/// Неизменяемый реестр адаптеров.
///
/// Клонирование дешёвое; реестр можно читать из нескольких потоков без
/// синхронизации.
#[derive(Clone)]
pub struct Registry {
    tables: Arc<Tables>,
}

impl Registry {
    /// Построитель со встроенными адаптерами.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Объект → тег.
    pub fn to_tag<T: Typed>(
        &self,
        value: &T,
    ) -> ZnbtResult<Tag> {
        self.serialize(value, None)
    }

    /// Объект с типом, известным только во время выполнения → тег.
    pub fn to_tag_dyn(
        &self,
        value: &dyn Object,
    ) -> ZnbtResult<Tag> {
        self.serialize(value, None)
    }

    /// Как [`Registry::to_tag_dyn`], но точный адаптер ищется по
    /// объявленному ключу вместо типа значения.
    pub fn to_tag_as(
        &self,
        value: &dyn Object,
        declared: TypeKey,
    ) -> ZnbtResult<Tag> {
        self.serialize(value, Some(declared))
    }

    /// Тег → объект типа `T`.
    pub fn from_tag<T: Typed>(
        &self,
        tag: &Tag,
    ) -> ZnbtResult<T> {
        let target = TypeKey::of::<T>();
        let object = self.deserialize(tag, target, &T::hierarchy())?;
        let got = object.type_key();
        object
            .into_any()
            .downcast::<T>()
            .map(|value| *value)
            .map_err(|_| mismatch(target, got))
    }

    pub fn has_serializer(
        &self,
        key: TypeKey,
    ) -> bool {
        self.tables.serializers.contains_key(&key)
            || self
                .tables
                .hierarchy_serializers
                .iter()
                .any(|(k, _)| *k == key)
    }

    fn serialize(
        &self,
        value: &dyn Object,
        declared: Option<TypeKey>,
    ) -> ZnbtResult<Tag> {
        let runtime = value.type_key();
        let families = value.families();
        let hierarchy = &self.tables.hierarchy_serializers;

        // 1. Адаптер семейства, зарегистрированный ровно под этим типом
        if let Some((_, serializer)) = hierarchy.iter().find(|(k, _)| *k == runtime) {
            trace!(type_name = runtime.name(), "serialize via exact hierarchy key");
            let member = Member::new(runtime, hook_for(&families, runtime));
            return serializer.serialize(value, member, self);
        }

        // 2. Первое семейство в порядке регистрации
        for (key, serializer) in hierarchy {
            if let Some(family) = families.iter().find(|f| f.key() == *key) {
                trace!(
                    type_name = runtime.name(),
                    family = key.name(),
                    "serialize via hierarchy"
                );
                return serializer.serialize(value, Member::new(runtime, family.hook()), self);
            }
        }

        // 3. Точный адаптер
        let key = declared.unwrap_or(runtime);
        match self.tables.serializers.get(&key) {
            Some(serializer) => {
                trace!(type_name = key.name(), "serialize via exact type");
                serializer(value, self)
            }
            None => Err(ParserError::NoSerializer {
                type_name: key.name().to_owned(),
            }
            .into()),
        }
    }

    fn deserialize(
        &self,
        tag: &Tag,
        target: TypeKey,
        families: &[Family],
    ) -> ZnbtResult<Box<dyn Object>> {
        let hierarchy = &self.tables.hierarchy_deserializers;

        if let Some((_, deserializer)) = hierarchy.iter().find(|(k, _)| *k == target) {
            trace!(type_name = target.name(), "deserialize via exact hierarchy key");
            let member = Member::new(target, hook_for(families, target));
            return deserializer.deserialize(tag, member, self);
        }

        for (key, deserializer) in hierarchy {
            if let Some(family) = families.iter().find(|f| f.key() == *key) {
                trace!(
                    type_name = target.name(),
                    family = key.name(),
                    "deserialize via hierarchy"
                );
                return deserializer.deserialize(tag, Member::new(target, family.hook()), self);
            }
        }

        match self.tables.deserializers.get(&target) {
            Some(deserializer) => {
                trace!(type_name = target.name(), "deserialize via exact type");
                deserializer(tag, self)
            }
            None => Err(ParserError::NoDeserializer {
                type_name: target.name().to_owned(),
            }
            .into()),
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl fmt::Debug for Registry {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        self.tables.fmt_counts("Registry", f)
    }
}

impl Tables {
    fn fmt_counts(
        &self,
        name: &str,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct(name)
            .field("serializers", &self.serializers.len())
            .field("deserializers", &self.deserializers.len())
            .field(
                "hierarchy_serializers",
                &self
                    .hierarchy_serializers
                    .iter()
                    .map(|(k, _)| k.name())
                    .collect::<Vec<_>>(),
            )
            .field(
                "hierarchy_deserializers",
                &self
                    .hierarchy_deserializers
                    .iter()
                    .map(|(k, _)| k.name())
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

fn upsert<V>(
    table: &mut Vec<(TypeKey, V)>,
    key: TypeKey,
    value: V,
) {
    match table.iter_mut().find(|(k, _)| *k == key) {
        Some(slot) => slot.1 = value,
        None => table.push((key, value)),
    }
}

fn hook_for(
    families: &[Family],
    key: TypeKey,
) -> Option<&(dyn std::any::Any + Send + Sync)> {
    families
        .iter()
        .find(|f| f.key() == key)
        .and_then(Family::hook)
}

fn mismatch(
    expected: TypeKey,
    got: TypeKey,
) -> StackError {
    ParserError::TypeMismatch {
        expected: expected.name().to_owned(),
        got: got.name().to_owned(),
    }
    .into()
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
