use std::{fmt, slice};

use znbt_error::{TagError, ZnbtResult};

use super::{Tag, TagType};

/// Однородный упорядоченный список тегов.
///
/// Список объявляет тип содержимого, и каждый элемент обязан иметь этот
/// тип. Пустой список с типом `End` принимает тип первого добавленного
/// элемента.
#[derive(Debug, Clone, PartialEq)]
pub struct ListTag {
    content_type: TagType,
    elements: Vec<Tag>,
}

impl Default for ListTag {
    fn default() -> Self {
        Self::new(TagType::End)
    }
}

impl ListTag {
    /// Пустой список с заданным типом содержимого.
    pub fn new(content_type: TagType) -> Self {
        Self {
            content_type,
            elements: Vec::new(),
        }
    }

    /// Строит список, выводя тип содержимого из первого элемента.
    pub fn from_elements(elements: Vec<Tag>) -> ZnbtResult<Self> {
        let content_type = elements.first().map_or(TagType::End, Tag::tag_type);
        Self::with_type(content_type, elements)
    }

    /// Строит список с явным типом содержимого.
    pub fn with_type(
        content_type: TagType,
        elements: Vec<Tag>,
    ) -> ZnbtResult<Self> {
        let mut list = Self::new(content_type);
        list.elements.reserve(elements.len());
        for tag in elements {
            list.push(tag)?;
        }
        Ok(list)
    }

    pub fn content_type(&self) -> TagType {
        self.content_type
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(
        &self,
        index: usize,
    ) -> Option<&Tag> {
        self.elements.get(index)
    }

    pub fn iter(&self) -> slice::Iter<'_, Tag> {
        self.elements.iter()
    }

    pub fn as_slice(&self) -> &[Tag] {
        &self.elements
    }

    /// Добавляет элемент в конец списка.
    pub fn push(
        &mut self,
        tag: Tag,
    ) -> ZnbtResult<()> {
        self.check(&tag)?;
        self.adopt(&tag);
        self.elements.push(tag);
        Ok(())
    }

    /// Вставляет элемент по индексу, сдвигая остальные.
    ///
    /// Индекс за пределами `len()` приводит к панике, как у `Vec::insert`.
    pub fn insert(
        &mut self,
        index: usize,
        tag: Tag,
    ) -> ZnbtResult<()> {
        self.check(&tag)?;
        self.adopt(&tag);
        self.elements.insert(index, tag);
        Ok(())
    }

    /// Заменяет элемент и возвращает старое значение.
    pub fn set(
        &mut self,
        index: usize,
        tag: Tag,
    ) -> ZnbtResult<Option<Tag>> {
        self.check(&tag)?;
        Ok(self
            .elements
            .get_mut(index)
            .map(|slot| std::mem::replace(slot, tag)))
    }

    pub fn remove(
        &mut self,
        index: usize,
    ) -> Option<Tag> {
        (index < self.elements.len()).then(|| self.elements.remove(index))
    }

    pub fn clear(&mut self) {
        self.elements.clear();
    }

    pub fn into_vec(self) -> Vec<Tag> {
        self.elements
    }

    fn check(
        &self,
        tag: &Tag,
    ) -> ZnbtResult<()> {
        let got = tag.tag_type();
        if got == TagType::End {
            return Err(TagError::EndTagNotAllowed.into());
        }
        let open = self.content_type == TagType::End && self.elements.is_empty();
        if !open && got != self.content_type {
            return Err(TagError::ListTypeMismatch {
                expected: self.content_type.id(),
                got: got.id(),
            }
            .into());
        }
        Ok(())
    }

    fn adopt(
        &mut self,
        tag: &Tag,
    ) {
        if self.elements.is_empty() {
            self.content_type = tag.tag_type();
        }
    }
}

impl<'a> IntoIterator for &'a ListTag {
    type Item = &'a Tag;
    type IntoIter = slice::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl IntoIterator for ListTag {
    type Item = Tag;
    type IntoIter = std::vec::IntoIter<Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

impl fmt::Display for ListTag {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str("[")?;
        for (i, tag) in self.elements.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{tag}")?;
        }
        f.write_str("]")
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use znbt_error::StatusCode;

    use super::*;

    /// Тест проверяет вывод типа содержимого из первого элемента.
    #[test]
    fn test_from_elements_infers_type() {
        let list = ListTag::from_elements(vec![Tag::Int(1), Tag::Int(2)]).unwrap();
        assert_eq!(list.content_type(), TagType::Int);
        assert_eq!(list.len(), 2);

        let empty = ListTag::from_elements(Vec::new()).unwrap();
        assert_eq!(empty.content_type(), TagType::End);
        assert!(empty.is_empty());
    }

    /// Тест проверяет, что элемент чужого типа отклоняется.
    #[test]
    fn test_mismatched_element_rejected() {
        let err = ListTag::from_elements(vec![Tag::Int(1), Tag::String("x".into())]).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::ListTypeMismatch);

        let mut list = ListTag::new(TagType::Short);
        assert!(list.push(Tag::Long(1)).is_err());
        assert!(list.insert(0, Tag::Byte(1)).is_err());
        list.push(Tag::Short(3)).unwrap();
        assert!(list.set(0, Tag::Int(3)).is_err());
        assert_eq!(list.get(0), Some(&Tag::Short(3)));
    }

    /// Тест проверяет, что End не может быть элементом.
    #[test]
    fn test_end_element_rejected() {
        let mut list = ListTag::default();
        let err = list.push(Tag::End).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::EndTagNotAllowed);
    }

    /// Тест проверяет, что пустой End-список принимает тип первого элемента,
    /// а после очистки тип сохраняется.
    #[test]
    fn test_open_list_adopts_type() {
        let mut list = ListTag::default();
        list.push(Tag::Double(1.5)).unwrap();
        assert_eq!(list.content_type(), TagType::Double);
        assert!(list.push(Tag::Float(1.0)).is_err());

        list.clear();
        assert_eq!(list.content_type(), TagType::Double);
        assert!(list.push(Tag::Int(1)).is_err());
    }

    #[test]
    fn test_set_and_remove() {
        let mut list = ListTag::from_elements(vec![Tag::Int(1), Tag::Int(2)]).unwrap();
        assert_eq!(list.set(1, Tag::Int(9)).unwrap(), Some(Tag::Int(2)));
        assert_eq!(list.set(5, Tag::Int(9)).unwrap(), None);
        assert_eq!(list.remove(0), Some(Tag::Int(1)));
        assert_eq!(list.remove(3), None);
        assert_eq!(list.into_vec(), vec![Tag::Int(9)]);
    }

    #[test]
    fn test_display() {
        let list =
            ListTag::from_elements(vec![Tag::String("Steve".into()), Tag::String("Alex".into())])
                .unwrap();
        assert_eq!(list.to_string(), r#"["Steve", "Alex"]"#);
    }
}
