//! Преобразование объектов в деревья тегов и обратно.
//!
//! Реестр хранит четыре таблицы: точные сериализаторы и десериализаторы
//! (по [`TypeKey`] конкретного типа) и упорядоченные таблицы адаптеров
//! семейств. Поиск при сериализации:
//!
//! 1. адаптер семейства, зарегистрированный ровно под типом значения;
//! 2. первый в порядке регистрации адаптер семейства, к которому
//!    принадлежит тип;
//! 3. точный адаптер по объявленному ключу или типу значения;
//! 4. иначе [`znbt_error::ParserError::NoSerializer`].
//!
//! Десериализация симметрична и ведётся по запрошенному типу.
//!
//! ```
//! use std::time::Duration;
//!
//! use znbt::{Registry, Tag};
//!
//! let registry = Registry::builder().build();
//! let tag = registry.to_tag(&Duration::from_secs(2))?;
//! assert_eq!(tag, Tag::Long(2000));
//! assert_eq!(registry.from_tag::<Duration>(&tag)?, Duration::from_secs(2));
//! # Ok::<(), znbt::StackError>(())
//! ```

pub mod adapter;
pub mod key;
pub mod registry;

pub use adapter::*;
pub use key::*;
pub use registry::*;
