//! Чтение дерева тегов из gzip-потока.

use std::io::{self, Read};

use ahash::AHashMap;
use byteorder::{BigEndian, ReadBytesExt};
use flate2::read::GzDecoder;
use tracing::trace;
use znbt_error::{TagError, ZnbtResult};

use super::{Charset, MAX_PREALLOC};
use crate::{CodecConfig, CompoundTag, ListTag, Tag, TagType};

/// Функция чтения полезной нагрузки тега заданного типа.
///
/// Получает читатель, позиционированный сразу после конверта (id и имя),
/// и должна прочитать ровно одну полезную нагрузку.
pub type DecodeFn<R> = fn(&mut NbtReader<R>) -> ZnbtResult<Tag>;

/// Читатель именованных тегов поверх gzip-потока.
pub struct NbtReader<R: Read> {
    inner: GzDecoder<R>,
    charset: Charset,
    max_depth: usize,
    depth: usize,
    decoders: AHashMap<u8, DecodeFn<R>>,
}

impl<R: Read> NbtReader<R> {
    /// Создаёт читатель с настройками по умолчанию.
    pub fn new(inner: R) -> Self {
        Self::with_config(inner, &CodecConfig::default())
    }

    pub fn with_config(
        inner: R,
        config: &CodecConfig,
    ) -> Self {
        let mut decoders: AHashMap<u8, DecodeFn<R>> = AHashMap::with_capacity(TagType::ALL.len());
        for ty in TagType::ALL {
            decoders.insert(ty.id(), builtin_decoder::<R>(ty));
        }

        Self {
            inner: GzDecoder::new(inner),
            charset: config.charset,
            max_depth: config.max_depth,
            depth: 0,
            decoders,
        }
    }

    pub fn charset(&self) -> Charset {
        self.charset
    }

    /// Текущая глубина вложенности контейнеров.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Регистрирует (или заменяет) декодер для идентификатора типа.
    ///
    /// Возвращает ранее зарегистрированный декодер.
    pub fn register_decoder(
        &mut self,
        type_id: u8,
        decoder: DecodeFn<R>,
    ) -> Option<DecodeFn<R>> {
        self.decoders.insert(type_id, decoder)
    }

    /// Читает один конверт и возвращает тег без имени.
    ///
    /// `None` означает терминатор (id 0).
    pub fn read_tag(&mut self) -> ZnbtResult<Option<Tag>> {
        Ok(self.read_named_tag()?.map(|(_, tag)| tag))
    }

    /// Читает один конверт вместе с именем.
    pub fn read_named_tag(&mut self) -> ZnbtResult<Option<(String, Tag)>> {
        let type_id = self.read_u8()?;
        if type_id == TagType::End.id() {
            trace!(depth = self.depth, "end of entries");
            return Ok(None);
        }

        let name = self.read_string()?;
        let tag = self.read_payload(type_id)?;
        trace!(type_id, name = %name, depth = self.depth, "read tag");
        Ok(Some((name, tag)))
    }

    /// Читает полезную нагрузку по таблице декодеров.
    pub fn read_payload(
        &mut self,
        type_id: u8,
    ) -> ZnbtResult<Tag> {
        let decoder = *self
            .decoders
            .get(&type_id)
            .ok_or(TagError::UnknownTagType { id: type_id })?;

        let nested = type_id == TagType::List.id() || type_id == TagType::Compound.id();
        if nested {
            if self.depth >= self.max_depth {
                return Err(TagError::DepthLimit {
                    limit: self.max_depth,
                }
                .into());
            }
            self.depth += 1;
        }

        let result = decoder(self);

        if nested {
            self.depth -= 1;
        }
        result
    }

    pub fn read_u8(&mut self) -> ZnbtResult<u8> {
        Ok(self.inner.read_u8()?)
    }

    pub fn read_i8(&mut self) -> ZnbtResult<i8> {
        Ok(self.inner.read_i8()?)
    }

    pub fn read_i16(&mut self) -> ZnbtResult<i16> {
        Ok(self.inner.read_i16::<BigEndian>()?)
    }

    pub fn read_u16(&mut self) -> ZnbtResult<u16> {
        Ok(self.inner.read_u16::<BigEndian>()?)
    }

    pub fn read_i32(&mut self) -> ZnbtResult<i32> {
        Ok(self.inner.read_i32::<BigEndian>()?)
    }

    pub fn read_i64(&mut self) -> ZnbtResult<i64> {
        Ok(self.inner.read_i64::<BigEndian>()?)
    }

    pub fn read_f32(&mut self) -> ZnbtResult<f32> {
        Ok(self.inner.read_f32::<BigEndian>()?)
    }

    pub fn read_f64(&mut self) -> ZnbtResult<f64> {
        Ok(self.inner.read_f64::<BigEndian>()?)
    }

    /// Строка: длина u16 и байты в кодировке читателя.
    pub fn read_string(&mut self) -> ZnbtResult<String> {
        let len = self.read_u16()? as usize;
        let mut buf = vec![0; len];
        self.inner.read_exact(&mut buf)?;
        self.charset.decode(buf)
    }

    /// Длина массива или списка: i32, отрицательное значение недопустимо.
    pub fn read_length(
        &mut self,
        what: &'static str,
    ) -> ZnbtResult<usize> {
        let length = self.read_i32()?;
        usize::try_from(length).map_err(|_| TagError::InvalidLength { what, length }.into())
    }

    pub fn read_byte_array(&mut self) -> ZnbtResult<Vec<u8>> {
        let len = self.read_length("byte array")?;
        let mut buf = Vec::with_capacity(len.min(MAX_PREALLOC));
        (&mut self.inner).take(len as u64).read_to_end(&mut buf)?;
        if buf.len() != len {
            return Err(io::Error::from(io::ErrorKind::UnexpectedEof).into());
        }
        Ok(buf)
    }

    pub fn read_int_array(&mut self) -> ZnbtResult<Vec<i32>> {
        let len = self.read_length("int array")?;
        let mut values = Vec::with_capacity(len.min(MAX_PREALLOC));
        for _ in 0..len {
            values.push(self.read_i32()?);
        }
        Ok(values)
    }

    pub fn read_long_array(&mut self) -> ZnbtResult<Vec<i64>> {
        let len = self.read_length("long array")?;
        let mut values = Vec::with_capacity(len.min(MAX_PREALLOC));
        for _ in 0..len {
            values.push(self.read_i64()?);
        }
        Ok(values)
    }

    /// Список: id типа содержимого, число элементов и их полезные нагрузки.
    pub fn read_list(&mut self) -> ZnbtResult<ListTag> {
        let content = self.read_u8()?;
        let len = self.read_length("list")?;
        if content == TagType::End.id() && len > 0 {
            return Err(TagError::EndTagNotAllowed.into());
        }

        let mut elements = Vec::with_capacity(len.min(MAX_PREALLOC));
        for _ in 0..len {
            elements.push(self.read_payload(content)?);
        }

        // Для пользовательских id тип содержимого берётся из элементов.
        match TagType::try_from(content) {
            Ok(ty) => ListTag::with_type(ty, elements),
            Err(_) => ListTag::from_elements(elements),
        }
    }

    /// Составной тег: именованные конверты до терминатора.
    pub fn read_compound(&mut self) -> ZnbtResult<CompoundTag> {
        let mut compound = CompoundTag::new();
        while let Some((name, tag)) = self.read_named_tag()? {
            compound.insert(name, tag);
        }
        Ok(compound)
    }

    /// Возвращает внутренний поток.
    pub fn into_inner(self) -> R {
        self.inner.into_inner()
    }
}

fn builtin_decoder<R: Read>(ty: TagType) -> DecodeFn<R> {
    match ty {
        // Терминатор не несёт полезной нагрузки и значением быть не может
        TagType::End => |_| Err(TagError::EndTagNotAllowed.into()),
        TagType::Byte => |r| r.read_i8().map(Tag::Byte),
        TagType::Short => |r| r.read_i16().map(Tag::Short),
        TagType::Int => |r| r.read_i32().map(Tag::Int),
        TagType::Long => |r| r.read_i64().map(Tag::Long),
        TagType::Float => |r| r.read_f32().map(Tag::Float),
        TagType::Double => |r| r.read_f64().map(Tag::Double),
        TagType::ByteArray => |r| r.read_byte_array().map(Tag::ByteArray),
        TagType::String => |r| r.read_string().map(Tag::String),
        TagType::List => |r| r.read_list().map(Tag::List),
        TagType::Compound => |r| r.read_compound().map(Tag::Compound),
        TagType::IntArray => |r| r.read_int_array().map(Tag::IntArray),
        TagType::LongArray => |r| r.read_long_array().map(Tag::LongArray),
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use std::io::Write;

    use flate2::{write::GzEncoder, Compression};
    use znbt_error::StatusCode;

    use super::*;

    /// Сжимает сырые байты, чтобы собрать поток вручную.
    fn gzip(raw: &[u8]) -> Vec<u8> {
        let mut enc = GzEncoder::new(Vec::new(), Compression::default());
        enc.write_all(raw).unwrap();
        enc.finish().unwrap()
    }

    fn reader(raw: &[u8]) -> NbtReader<&'static [u8]> {
        let bytes: &'static [u8] = Box::leak(gzip(raw).into_boxed_slice());
        NbtReader::new(bytes)
    }

    /// Тест проверяет чтение вручную собранного составного тега.
    #[test]
    fn test_read_handmade_compound() {
        let raw = [
            10, 0, 4, b'r', b'o', b'o', b't', // Compound "root"
            3, 0, 1, b'n', 0, 0, 0, 42, // Int "n" = 42
            0,  // конец
        ];
        let (name, tag) = reader(&raw).read_named_tag().unwrap().unwrap();
        assert_eq!(name, "root");
        assert_eq!(tag.as_compound().unwrap().get("n"), Some(&Tag::Int(42)));
    }

    /// Тест проверяет, что терминатор на верхнем уровне даёт None.
    #[test]
    fn test_end_is_none() {
        assert!(reader(&[0]).read_tag().unwrap().is_none());
    }

    /// Тест проверяет, что список типа End с ненулевой длиной отклоняется
    /// сразу, до чтения элементов.
    #[test]
    fn test_end_typed_list_with_elements() {
        // List "" : тип End, число i32::MAX, элементов нет
        let raw = [9, 0, 0, 0, 0x7F, 0xFF, 0xFF, 0xFF];
        let err = reader(&raw).read_tag().unwrap_err();
        assert_eq!(err.status_code(), StatusCode::EndTagNotAllowed);

        let mut r = reader(&[]);
        let err = r.read_payload(TagType::End.id()).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::EndTagNotAllowed);
    }

    /// Тест проверяет, что пустой список типа End допустим.
    #[test]
    fn test_empty_end_typed_list() {
        let raw = [9, 0, 0, 0, 0, 0, 0, 0];
        let tag = reader(&raw).read_tag().unwrap().unwrap();
        assert_eq!(tag.as_list().unwrap().content_type(), TagType::End);
        assert!(tag.as_list().unwrap().is_empty());
    }

    /// Тест проверяет ошибку для неизвестного id типа.
    #[test]
    fn test_unknown_tag_type() {
        let err = reader(&[99, 0, 0]).read_tag().unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UnknownTagType);
        assert!(err.to_string().contains("Unknown tag type: 99"));
    }

    /// Тест проверяет, что зарегистрированный декодер расширяет таблицу.
    #[test]
    fn test_register_custom_decoder() {
        let mut r = reader(&[13, 0, 1, b'x', 0, 7]);
        assert!(r.register_decoder(13, |r| Ok(Tag::Short(r.read_i16()? * 2))).is_none());
        assert_eq!(r.read_tag().unwrap(), Some(Tag::Short(14)));
    }

    /// Тест проверяет замену встроенного декодера.
    #[test]
    fn test_override_builtin_decoder() {
        let mut r = reader(&[1, 0, 0, 5]);
        let previous = r.register_decoder(1, |r| Ok(Tag::Int(r.read_i8()? as i32)));
        assert!(previous.is_some());
        assert_eq!(r.read_tag().unwrap(), Some(Tag::Int(5)));
    }

    /// Тест проверяет, что отрицательная длина массива отклоняется.
    #[test]
    fn test_negative_length() {
        let err = reader(&[11, 0, 0, 0xFF, 0xFF, 0xFF, 0xFF]).read_tag().unwrap_err();
        assert_eq!(err.status_code(), StatusCode::InvalidLength);
    }

    /// Тест проверяет, что усечённый поток даёт ошибку ввода-вывода, а не
    /// частичное дерево.
    #[test]
    fn test_truncated_stream() {
        let err = reader(&[7, 0, 0, 0, 0, 0, 10, 1, 2]).read_tag().unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UnexpectedEof);

        let err = reader(&[10, 0, 0, 1, 0, 1]).read_tag().unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UnexpectedEof);
    }

    /// Тест проверяет, что поток без gzip-заголовка не читается.
    #[test]
    fn test_not_gzip() {
        let mut r = NbtReader::new(&[10u8, 0, 0, 0][..]);
        let err = r.read_tag().unwrap_err();
        assert!(err.status_code().is_codec_error());
    }

    /// Тест проверяет лимит вложенности.
    #[test]
    fn test_depth_limit() {
        // Три вложенных составных тега
        let raw = [10, 0, 0, 10, 0, 0, 10, 0, 0, 0, 0, 0];
        let bytes = gzip(&raw);

        let cfg = CodecConfig::default().with_max_depth(2);
        let err = NbtReader::with_config(&bytes[..], &cfg).read_tag().unwrap_err();
        assert_eq!(err.status_code(), StatusCode::DepthLimit);

        let cfg = CodecConfig::default().with_max_depth(3);
        let mut r = NbtReader::with_config(&bytes[..], &cfg);
        assert!(r.read_tag().unwrap().is_some());
        assert_eq!(r.depth(), 0);
    }

    /// Тест проверяет список с пользовательским типом содержимого.
    #[test]
    fn test_list_with_custom_content_type() {
        let raw = [9, 0, 0, 20, 0, 0, 0, 2, 1, 2];
        let mut r = reader(&raw);
        r.register_decoder(20, |r| r.read_i8().map(Tag::Byte));
        let tag = r.read_tag().unwrap().unwrap();
        let list = tag.as_list().unwrap();
        assert_eq!(list.content_type(), TagType::Byte);
        assert_eq!(list.as_slice(), &[Tag::Byte(1), Tag::Byte(2)]);
    }

    #[test]
    fn test_read_latin1_name() {
        let raw = [8, 0, 1, 0xE9, 0, 1, 0xFC];
        let bytes = gzip(&raw);
        let cfg = CodecConfig::default().with_charset(Charset::Latin1);
        let (name, tag) = NbtReader::with_config(&bytes[..], &cfg)
            .read_named_tag()
            .unwrap()
            .unwrap();
        assert_eq!(name, "é");
        assert_eq!(tag, Tag::String("ü".into()));
    }
}
