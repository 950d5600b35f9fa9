use znbt_error::ZnbtResult;

use crate::{CompoundTag, ListTag, Registry, Tag, TagDeserializer, TagSerializer};

/// Сами теги проходят через реестр без изменений.
#[derive(Debug, Clone, Copy, Default)]
pub struct TagIdentityAdapter;

impl TagSerializer<Tag> for TagIdentityAdapter {
    fn serialize(
        &self,
        value: &Tag,
        _: &Registry,
    ) -> ZnbtResult<Tag> {
        Ok(value.clone())
    }
}

impl TagDeserializer<Tag> for TagIdentityAdapter {
    fn deserialize(
        &self,
        tag: &Tag,
        _: &Registry,
    ) -> ZnbtResult<Tag> {
        Ok(tag.clone())
    }
}

impl TagSerializer<CompoundTag> for TagIdentityAdapter {
    fn serialize(
        &self,
        value: &CompoundTag,
        _: &Registry,
    ) -> ZnbtResult<Tag> {
        Ok(Tag::Compound(value.clone()))
    }
}

impl TagDeserializer<CompoundTag> for TagIdentityAdapter {
    fn deserialize(
        &self,
        tag: &Tag,
        _: &Registry,
    ) -> ZnbtResult<CompoundTag> {
        Ok(tag.as_compound()?.clone())
    }
}

impl TagSerializer<ListTag> for TagIdentityAdapter {
    fn serialize(
        &self,
        value: &ListTag,
        _: &Registry,
    ) -> ZnbtResult<Tag> {
        Ok(Tag::List(value.clone()))
    }
}

impl TagDeserializer<ListTag> for TagIdentityAdapter {
    fn deserialize(
        &self,
        tag: &Tag,
        _: &Registry,
    ) -> ZnbtResult<ListTag> {
        Ok(tag.as_list()?.clone())
    }
}
