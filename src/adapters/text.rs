//! Строки и пути.

use std::path::PathBuf;

use znbt_error::{ParserError, ZnbtResult};

use crate::{Registry, Tag, TagDeserializer, TagSerializer};

#[derive(Debug, Clone, Copy, Default)]
pub struct StringAdapter;

impl TagSerializer<String> for StringAdapter {
    fn serialize(
        &self,
        value: &String,
        _: &Registry,
    ) -> ZnbtResult<Tag> {
        Ok(Tag::String(value.clone()))
    }
}

impl TagDeserializer<String> for StringAdapter {
    fn deserialize(
        &self,
        tag: &Tag,
        _: &Registry,
    ) -> ZnbtResult<String> {
        tag.as_str().map(str::to_owned)
    }
}

/// Путь ↔ строка в представлении платформы.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathAdapter;

impl TagSerializer<PathBuf> for PathAdapter {
    fn serialize(
        &self,
        value: &PathBuf,
        _: &Registry,
    ) -> ZnbtResult<Tag> {
        let text = value.to_str().ok_or_else(|| ParserError::InvalidValue {
            type_name: "PathBuf".into(),
            reason: format!("path {} is not valid unicode", value.display()),
        })?;
        Ok(Tag::String(text.to_owned()))
    }
}

impl TagDeserializer<PathBuf> for PathAdapter {
    fn deserialize(
        &self,
        tag: &Tag,
        _: &Registry,
    ) -> ZnbtResult<PathBuf> {
        Ok(PathBuf::from(tag.as_str()?))
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
