//! Запись дерева тегов в gzip-поток.

use std::io::{self, Write};

use byteorder::{BigEndian, WriteBytesExt};
use flate2::{write::GzEncoder, Compression};
use tracing::{debug, trace, warn};
use znbt_error::{TagError, ZnbtResult};

use super::Charset;
use crate::{CodecConfig, Tag, TagType};

/// Писатель именованных тегов.
///
/// Всегда сжимает вывод. gzip-трейлер дописывается в [`NbtWriter::finish`]
/// или, если он не был вызван, при уничтожении писателя.
pub struct NbtWriter<W: Write> {
    inner: Option<GzEncoder<W>>,
    charset: Charset,
    max_depth: usize,
    depth: usize,
}

impl<W: Write> NbtWriter<W> {
    pub fn new(inner: W) -> Self {
        Self::with_config(inner, &CodecConfig::default())
    }

    pub fn with_config(
        inner: W,
        config: &CodecConfig,
    ) -> Self {
        let level = config.compression_level.min(CodecConfig::MAX_COMPRESSION_LEVEL);
        Self {
            inner: Some(GzEncoder::new(inner, Compression::new(level))),
            charset: config.charset,
            max_depth: config.max_depth,
            depth: 0,
        }
    }

    pub fn charset(&self) -> Charset {
        self.charset
    }

    /// Пишет конверт (id, имя) и полезную нагрузку.
    ///
    /// `Tag::End` как пользовательское значение не допускается.
    pub fn write_tag(
        &mut self,
        name: &str,
        tag: &Tag,
    ) -> ZnbtResult<()> {
        if let Tag::End = tag {
            return Err(TagError::EndTagNotAllowed.into());
        }

        self.out()?.write_u8(tag.type_id())?;
        self.write_string(name)?;
        self.write_payload(tag)?;
        trace!(type_id = tag.type_id(), name, depth = self.depth, "wrote tag");
        Ok(())
    }

    /// Пишет только полезную нагрузку тега, без конверта.
    pub fn write_payload(
        &mut self,
        tag: &Tag,
    ) -> ZnbtResult<()> {
        match tag {
            Tag::End => Err(TagError::EndTagNotAllowed.into()),
            Tag::Byte(v) => Ok(self.out()?.write_i8(*v)?),
            Tag::Short(v) => Ok(self.out()?.write_i16::<BigEndian>(*v)?),
            Tag::Int(v) => Ok(self.out()?.write_i32::<BigEndian>(*v)?),
            Tag::Long(v) => Ok(self.out()?.write_i64::<BigEndian>(*v)?),
            Tag::Float(v) => Ok(self.out()?.write_f32::<BigEndian>(*v)?),
            Tag::Double(v) => Ok(self.out()?.write_f64::<BigEndian>(*v)?),
            Tag::ByteArray(bytes) => {
                self.write_length("byte array", bytes.len())?;
                Ok(self.out()?.write_all(bytes)?)
            }
            Tag::String(s) => self.write_string(s),
            Tag::IntArray(values) => {
                self.write_length("int array", values.len())?;
                let out = self.out()?;
                for v in values {
                    out.write_i32::<BigEndian>(*v)?;
                }
                Ok(())
            }
            Tag::LongArray(values) => {
                self.write_length("long array", values.len())?;
                let out = self.out()?;
                for v in values {
                    out.write_i64::<BigEndian>(*v)?;
                }
                Ok(())
            }
            Tag::List(list) => self.nested(|w| {
                w.out()?.write_u8(list.content_type().id())?;
                w.write_length("list", list.len())?;
                for element in list {
                    w.write_payload(element)?;
                }
                Ok(())
            }),
            Tag::Compound(compound) => self.nested(|w| {
                for (name, value) in compound {
                    w.write_tag(name, value)?;
                }
                Ok(w.out()?.write_u8(TagType::End.id())?)
            }),
        }
    }

    /// Дописывает gzip-трейлер и возвращает внутренний поток.
    pub fn finish(mut self) -> ZnbtResult<W> {
        let encoder = self
            .inner
            .take()
            .ok_or_else(|| io::Error::other("writer already finished"))?;
        let inner = encoder.finish()?;
        debug!("gzip stream finished");
        Ok(inner)
    }

    fn write_string(
        &mut self,
        s: &str,
    ) -> ZnbtResult<()> {
        let bytes = self.charset.encode(s)?;
        let len = u16::try_from(bytes.len()).map_err(|_| TagError::SizeLimit {
            what: "string",
            size: bytes.len(),
            limit: u16::MAX as usize,
        })?;
        let out = self.out()?;
        out.write_u16::<BigEndian>(len)?;
        out.write_all(&bytes)?;
        Ok(())
    }

    fn write_length(
        &mut self,
        what: &'static str,
        len: usize,
    ) -> ZnbtResult<()> {
        let len = i32::try_from(len).map_err(|_| TagError::SizeLimit {
            what,
            size: len,
            limit: i32::MAX as usize,
        })?;
        Ok(self.out()?.write_i32::<BigEndian>(len)?)
    }

    /// Выполняет запись контейнера на следующем уровне вложенности.
    fn nested(
        &mut self,
        body: impl FnOnce(&mut Self) -> ZnbtResult<()>,
    ) -> ZnbtResult<()> {
        if self.depth >= self.max_depth {
            return Err(TagError::DepthLimit {
                limit: self.max_depth,
            }
            .into());
        }
        self.depth += 1;
        let result = body(self);
        self.depth -= 1;
        result
    }

    fn out(&mut self) -> io::Result<&mut GzEncoder<W>> {
        self.inner
            .as_mut()
            .ok_or_else(|| io::Error::other("writer already finished"))
    }
}

impl<W: Write> Drop for NbtWriter<W> {
    fn drop(&mut self) {
        if let Some(encoder) = self.inner.take() {
            if let Err(e) = encoder.finish() {
                warn!(error = %e, "failed to finish gzip stream on drop");
            }
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
