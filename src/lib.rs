//! # znbt
//!
//! Кодек именованных бинарных тегов (NBT) и реестр преобразований
//! «объект ↔ дерево тегов».
//!
//! - [`tag`]: модель тегов: [`Tag`], [`CompoundTag`], [`ListTag`].
//! - [`codec`]: бинарный формат со сжатием gzip.
//! - [`serialization`]: двухуровневый реестр адаптеров [`Registry`].
//! - [`adapters`]: встроенные адаптеры распространённых типов.
//! - [`file`]: файл с корневым составным тегом.
//!
//! ```
//! use std::time::Duration;
//!
//! use znbt::{codec, CompoundTag, Registry, Tag};
//!
//! let registry = Registry::default();
//! let mut root = CompoundTag::new();
//! root.insert("timeout", registry.to_tag(&Duration::from_secs(3))?);
//!
//! let bytes = codec::to_bytes("settings", &Tag::from(root))?;
//! let (_, tag) = codec::from_bytes(&bytes)?;
//! let timeout: Duration = registry.from_tag(tag.as_compound()?.require("timeout")?)?;
//! assert_eq!(timeout, Duration::from_secs(3));
//! # Ok::<(), znbt::StackError>(())
//! ```

/// Встроенные адаптеры: числа, строки, пути, UUID, адреса, перечисления.
pub mod adapters;
/// Бинарный кодек: чтение и запись gzip-потоков.
pub mod codec;
/// Настройки кодека.
pub mod config;
/// Файл с корневым составным тегом.
pub mod file;
/// Инициализация логирования.
pub mod logging;
/// Реестр сериализации.
pub mod serialization;
/// Модель тегов.
pub mod tag;

// -----------------------------------------------------------------------------
//  Frequently used public types
// -----------------------------------------------------------------------------

pub use adapters::{EnumAdapter, EnumHook, SerializableAdapter, TagEnum, TagSerializable, VecAdapter};
pub use codec::{Charset, NbtReader, NbtWriter};
pub use config::CodecConfig;
pub use file::NbtFile;
pub use serialization::{
    Family, HierarchyAdapter, HierarchyDeserializer, HierarchySerializer, Member, Object, Registry,
    RegistryBuilder, TagAdapter, TagDeserializer, TagSerializer, TypeKey, Typed,
};
pub use tag::{BooleanTag, CompoundTag, ListTag, Number, Tag, TagType};
pub use znbt_error::{ErrorExt, ParserError, StackError, StatusCode, TagError, ZnbtResult};
