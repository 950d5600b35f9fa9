use std::{fmt, slice};

use ahash::AHashMap;
use znbt_error::{ParserError, ZnbtResult};

use super::{BooleanTag, ListTag, Tag};

/// Отображение имя → тег с уникальными ключами.
///
/// Порядок вставки сохраняется и определяет порядок записи в поток.
/// Повторная вставка под тем же именем заменяет значение на месте.
/// Сравнение на равенство от порядка не зависит.
#[derive(Clone, Default)]
pub struct CompoundTag {
    entries: Vec<(String, Tag)>,
    index: AHashMap<String, usize>,
}

impl CompoundTag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            index: AHashMap::with_capacity(capacity),
        }
    }

    pub fn builder() -> CompoundTagBuilder {
        CompoundTagBuilder::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Вставляет тег и возвращает предыдущее значение под этим именем.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        tag: Tag,
    ) -> Option<Tag> {
        let name = name.into();
        match self.index.get(&name) {
            Some(&pos) => Some(std::mem::replace(&mut self.entries[pos].1, tag)),
            None => {
                self.index.insert(name.clone(), self.entries.len());
                self.entries.push((name, tag));
                None
            }
        }
    }

    /// Вставляет любое значение, конвертируемое в тег.
    pub fn put<T: Into<Tag>>(
        &mut self,
        name: impl Into<String>,
        value: T,
    ) -> Option<Tag> {
        self.insert(name, value.into())
    }

    pub fn put_str(
        &mut self,
        name: impl Into<String>,
        value: &str,
    ) -> Option<Tag> {
        self.insert(name, Tag::String(value.to_owned()))
    }

    /// Логическое значение записывается как Byte 0 или 1.
    pub fn put_bool(
        &mut self,
        name: impl Into<String>,
        value: bool,
    ) -> Option<Tag> {
        self.insert(name, BooleanTag::from(value).into())
    }

    pub fn get(
        &self,
        name: &str,
    ) -> Option<&Tag> {
        self.index.get(name).map(|&pos| &self.entries[pos].1)
    }

    pub fn get_mut(
        &mut self,
        name: &str,
    ) -> Option<&mut Tag> {
        match self.index.get(name) {
            Some(&pos) => Some(&mut self.entries[pos].1),
            None => None,
        }
    }

    /// Возвращает вложенный составной тег по имени.
    pub fn get_compound(
        &self,
        name: &str,
    ) -> ZnbtResult<&CompoundTag> {
        self.require(name)?.as_compound()
    }

    /// Возвращает вложенный список по имени.
    pub fn get_list(
        &self,
        name: &str,
    ) -> ZnbtResult<&ListTag> {
        self.require(name)?.as_list()
    }

    /// Как [`CompoundTag::get`], но отсутствие ключа считается ошибкой.
    pub fn require(
        &self,
        name: &str,
    ) -> ZnbtResult<&Tag> {
        self.get(name).ok_or_else(|| {
            ParserError::MissingField {
                field: name.to_owned(),
            }
            .into()
        })
    }

    pub fn contains_key(
        &self,
        name: &str,
    ) -> bool {
        self.index.contains_key(name)
    }

    /// Удаляет запись, сохраняя порядок остальных.
    pub fn remove(
        &mut self,
        name: &str,
    ) -> Option<Tag> {
        let pos = self.index.remove(name)?;
        let (_, tag) = self.entries.remove(pos);
        for slot in self.index.values_mut() {
            if *slot > pos {
                *slot -= 1;
            }
        }
        Some(tag)
    }

    /// Копирует все записи другого тега; совпадающие ключи перезаписываются.
    pub fn extend_from(
        &mut self,
        other: &CompoundTag,
    ) {
        for (name, tag) in other.iter() {
            self.insert(name, tag.clone());
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &Tag> {
        self.entries.iter().map(|(_, tag)| tag)
    }

    /// Записи в порядке вставки.
    pub fn iter(&self) -> CompoundIter<'_> {
        CompoundIter {
            inner: self.entries.iter(),
        }
    }
}

/// Итератор по записям [`CompoundTag`].
pub struct CompoundIter<'a> {
    inner: slice::Iter<'a, (String, Tag)>,
}

impl<'a> Iterator for CompoundIter<'a> {
    type Item = (&'a str, &'a Tag);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(name, tag)| (name.as_str(), tag))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for CompoundIter<'_> {}

impl<'a> IntoIterator for &'a CompoundTag {
    type Item = (&'a str, &'a Tag);
    type IntoIter = CompoundIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for CompoundTag {
    type Item = (String, Tag);
    type IntoIter = std::vec::IntoIter<(String, Tag)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<K: Into<String>> FromIterator<(K, Tag)> for CompoundTag {
    fn from_iter<I: IntoIterator<Item = (K, Tag)>>(iter: I) -> Self {
        let mut compound = CompoundTag::new();
        for (name, tag) in iter {
            compound.insert(name, tag);
        }
        compound
    }
}

impl PartialEq for CompoundTag {
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(name, tag)| other.get(name).is_some_and(|o| o == tag))
    }
}

impl fmt::Debug for CompoundTag {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl fmt::Display for CompoundTag {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str("{")?;
        for (i, (name, tag)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}: {tag}")?;
        }
        f.write_str("}")
    }
}

/// Пошаговая сборка [`CompoundTag`].
#[derive(Debug, Default)]
pub struct CompoundTagBuilder {
    inner: CompoundTag,
}

impl CompoundTagBuilder {
    pub fn put<T: Into<Tag>>(
        mut self,
        name: impl Into<String>,
        value: T,
    ) -> Self {
        self.inner.put(name, value);
        self
    }

    pub fn put_bool(
        mut self,
        name: impl Into<String>,
        value: bool,
    ) -> Self {
        self.inner.put_bool(name, value);
        self
    }

    pub fn build(self) -> CompoundTag {
        self.inner
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
