use std::marker::PhantomData;

use znbt_error::ZnbtResult;

use crate::{ListTag, Registry, Tag, TagDeserializer, TagSerializer, Typed};

/// `Vec<T>` ↔ список; элементы преобразуются через реестр.
///
/// Тип содержимого списка берётся из первого элемента, пустой вектор даёт
/// список типа End.
pub struct VecAdapter<T>(PhantomData<fn() -> T>);

impl<T> VecAdapter<T> {
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for VecAdapter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Typed> TagSerializer<Vec<T>> for VecAdapter<T> {
    fn serialize(
        &self,
        value: &Vec<T>,
        ctx: &Registry,
    ) -> ZnbtResult<Tag> {
        let elements = value
            .iter()
            .map(|element| ctx.to_tag(element))
            .collect::<ZnbtResult<Vec<_>>>()?;
        Ok(ListTag::from_elements(elements)?.into())
    }
}

impl<T: Typed> TagDeserializer<Vec<T>> for VecAdapter<T> {
    fn deserialize(
        &self,
        tag: &Tag,
        ctx: &Registry,
    ) -> ZnbtResult<Vec<T>> {
        tag.as_list()?
            .iter()
            .map(|element| ctx.from_tag::<T>(element))
            .collect()
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
