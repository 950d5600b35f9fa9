use uuid::Uuid;
use znbt_error::ZnbtResult;

use crate::{CompoundTag, Registry, Tag, TagDeserializer, TagSerializer};

/// `Uuid` ↔ `{most: Long, least: Long}`: старшие и младшие 64 бита.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidAdapter;

impl TagSerializer<Uuid> for UuidAdapter {
    fn serialize(
        &self,
        value: &Uuid,
        _: &Registry,
    ) -> ZnbtResult<Tag> {
        let (most, least) = value.as_u64_pair();
        let mut compound = CompoundTag::with_capacity(2);
        compound.put("most", most as i64);
        compound.put("least", least as i64);
        Ok(compound.into())
    }
}

impl TagDeserializer<Uuid> for UuidAdapter {
    fn deserialize(
        &self,
        tag: &Tag,
        _: &Registry,
    ) -> ZnbtResult<Uuid> {
        let compound = tag.as_compound()?;
        let most = compound.require("most")?.as_i64()?;
        let least = compound.require("least")?.as_i64()?;
        Ok(Uuid::from_u64_pair(most as u64, least as u64))
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_layout() {
        let registry = Registry::default();
        let id = Uuid::parse_str("00000000-0000-0000-0000-000000000001").unwrap();
        let tag = registry.to_tag(&id).unwrap();

        let expected: Tag = CompoundTag::builder()
            .put("most", 0i64)
            .put("least", 1i64)
            .build()
            .into();
        assert_eq!(tag, expected);
        assert_eq!(registry.from_tag::<Uuid>(&tag).unwrap(), id);
    }

    #[test]
    fn test_high_bits_survive() {
        let registry = Registry::default();
        let id = Uuid::from_u64_pair(u64::MAX, 1 << 63);
        let tag = registry.to_tag(&id).unwrap();
        assert_eq!(tag.as_compound().unwrap().get("most"), Some(&Tag::Long(-1)));
        assert_eq!(registry.from_tag::<Uuid>(&tag).unwrap(), id);

        let random = Uuid::new_v4();
        let tag = registry.to_tag(&random).unwrap();
        assert_eq!(registry.from_tag::<Uuid>(&tag).unwrap(), random);
    }
}
