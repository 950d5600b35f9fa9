use std::time::Duration;

use znbt_error::{ParserError, ZnbtResult};

use crate::{Registry, Tag, TagDeserializer, TagSerializer};

/// `Duration` ↔ Long в миллисекундах. Доли миллисекунды отбрасываются.
#[derive(Debug, Clone, Copy, Default)]
pub struct DurationAdapter;

impl TagSerializer<Duration> for DurationAdapter {
    fn serialize(
        &self,
        value: &Duration,
        _: &Registry,
    ) -> ZnbtResult<Tag> {
        let millis = i64::try_from(value.as_millis()).map_err(|_| invalid("too large"))?;
        Ok(Tag::Long(millis))
    }
}

impl TagDeserializer<Duration> for DurationAdapter {
    fn deserialize(
        &self,
        tag: &Tag,
        _: &Registry,
    ) -> ZnbtResult<Duration> {
        let millis = tag.as_i64()?;
        let millis = u64::try_from(millis).map_err(|_| invalid("negative milliseconds"))?;
        Ok(Duration::from_millis(millis))
    }
}

fn invalid(reason: &str) -> ParserError {
    ParserError::InvalidValue {
        type_name: "Duration".into(),
        reason: reason.into(),
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use znbt_error::StatusCode;

    use super::*;

    #[test]
    fn test_millis() {
        let registry = Registry::default();
        assert_eq!(
            registry.to_tag(&Duration::from_micros(2_500_900)).unwrap(),
            Tag::Long(2500)
        );
        assert_eq!(
            registry.from_tag::<Duration>(&Tag::Int(15)).unwrap(),
            Duration::from_millis(15)
        );
    }

    /// Тест проверяет, что отрицательная длительность отклоняется.
    #[test]
    fn test_negative_rejected() {
        let err = Registry::default()
            .from_tag::<Duration>(&Tag::Long(-1))
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::DeserializationFailed);
    }

    #[test]
    fn test_overflow_rejected() {
        assert!(Registry::default().to_tag(&Duration::MAX).is_err());
    }
}
