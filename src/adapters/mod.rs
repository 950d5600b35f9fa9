//! Встроенные адаптеры для распространённых типов.
//!
//! [`Registry::default`](crate::Registry::default) и
//! [`Registry::builder`](crate::Registry::builder) уже содержат все
//! адаптеры отсюда, кроме [`VecAdapter`] и [`SerializableAdapter`], которые
//! подключаются явно.

use std::{net::SocketAddr, path::PathBuf, time::Duration};

use uuid::Uuid;

use crate::{CompoundTag, ListTag, RegistryBuilder, Tag, Typed};

mod collection;
mod enumeration;
mod id;
mod identity;
mod net;
mod primitive;
mod serializable;
mod text;
mod time;

pub use collection::*;
pub use enumeration::*;
pub use id::*;
pub use identity::*;
pub use net::*;
pub use primitive::*;
pub use serializable::*;
pub use text::*;
pub use time::*;

macro_rules! impl_typed {
    ($($ty:ty),* $(,)?) => {
        $(impl Typed for $ty {})*
    };
}

impl_typed!(
    bool,
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    u64,
    f32,
    f64,
    String,
    PathBuf,
    Duration,
    Uuid,
    SocketAddr,
    Tag,
    CompoundTag,
    ListTag,
);

impl<T: Typed> Typed for Vec<T> {}

pub(crate) fn register_builtins(builder: &mut RegistryBuilder) {
    builder
        .register_type_adapter::<bool, _>(BoolAdapter)
        .register_type_adapter::<i8, _>(ByteAdapter)
        .register_type_adapter::<i16, _>(ShortAdapter)
        .register_type_adapter::<i32, _>(IntAdapter)
        .register_type_adapter::<i64, _>(LongAdapter)
        .register_type_adapter::<f32, _>(FloatAdapter)
        .register_type_adapter::<f64, _>(DoubleAdapter)
        .register_type_adapter::<u8, _>(UnsignedByteAdapter)
        .register_type_adapter::<u16, _>(UnsignedShortAdapter)
        .register_type_adapter::<u32, _>(UnsignedIntAdapter)
        .register_type_adapter::<u64, _>(UnsignedLongAdapter)
        .register_type_adapter::<String, _>(StringAdapter)
        .register_type_adapter::<PathBuf, _>(PathAdapter)
        .register_type_adapter::<Duration, _>(DurationAdapter)
        .register_type_adapter::<Uuid, _>(UuidAdapter)
        .register_type_adapter::<SocketAddr, _>(SocketAddrAdapter)
        .register_type_adapter::<Tag, _>(TagIdentityAdapter)
        .register_type_adapter::<CompoundTag, _>(TagIdentityAdapter)
        .register_type_adapter::<ListTag, _>(TagIdentityAdapter)
        .register_type_hierarchy_adapter::<dyn TagEnum, _>(EnumHierarchyAdapter);
}
