use std::marker::PhantomData;

use znbt_error::ZnbtResult;

use crate::{Registry, Tag, TagDeserializer, TagSerializer, Typed};

/// Тип, который сам знает своё представление в тегах.
pub trait TagSerializable: Typed + Sized {
    fn serialize(&self) -> ZnbtResult<Tag>;

    fn deserialize(tag: &Tag) -> ZnbtResult<Self>;
}

/// Точный адаптер, делегирующий методам [`TagSerializable`].
pub struct SerializableAdapter<T>(PhantomData<fn() -> T>);

impl<T> SerializableAdapter<T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for SerializableAdapter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TagSerializable> TagSerializer<T> for SerializableAdapter<T> {
    fn serialize(
        &self,
        value: &T,
        _: &Registry,
    ) -> ZnbtResult<Tag> {
        TagSerializable::serialize(value)
    }
}

impl<T: TagSerializable> TagDeserializer<T> for SerializableAdapter<T> {
    fn deserialize(
        &self,
        tag: &Tag,
        _: &Registry,
    ) -> ZnbtResult<T> {
        <T as TagSerializable>::deserialize(tag)
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
