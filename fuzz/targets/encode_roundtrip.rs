#![no_main]

use arbitrary::{Arbitrary, Unstructured};
use libfuzzer_sys::fuzz_target;
use znbt::{codec, CompoundTag, ListTag, Tag, TagType};

/// Дерево из произвольных байт: глубина ограничена, списки однородны.
fn arbitrary_tag(
    u: &mut Unstructured<'_>,
    depth: usize,
) -> arbitrary::Result<Tag> {
    let ty = TagType::arbitrary(u)?;
    Ok(match ty {
        TagType::End | TagType::Byte => Tag::Byte(u.arbitrary()?),
        TagType::Short => Tag::Short(u.arbitrary()?),
        TagType::Int => Tag::Int(u.arbitrary()?),
        TagType::Long => Tag::Long(u.arbitrary()?),
        TagType::Float => Tag::Float(finite(u.arbitrary::<f32>()?)),
        TagType::Double => Tag::Double(finite(u.arbitrary::<f64>()?)),
        TagType::ByteArray => Tag::ByteArray(u.arbitrary()?),
        TagType::String => Tag::String(u.arbitrary()?),
        TagType::IntArray => Tag::IntArray(u.arbitrary()?),
        TagType::LongArray => Tag::LongArray(u.arbitrary()?),
        TagType::List if depth > 0 => {
            let sample = arbitrary_tag(u, depth - 1)?;
            let len = u.int_in_range(0..=8usize)?;
            Tag::List(ListTag::from_elements(vec![sample; len]).expect("homogeneous list"))
        }
        TagType::Compound if depth > 0 => {
            let mut compound = CompoundTag::new();
            for _ in 0..u.int_in_range(0..=8usize)? {
                let name: String = u.arbitrary()?;
                compound.insert(name, arbitrary_tag(u, depth - 1)?);
            }
            Tag::Compound(compound)
        }
        TagType::List | TagType::Compound => Tag::Int(u.arbitrary()?),
    })
}

/// NaN не равен сам себе, поэтому заменяется нулём.
fn finite<F: Into<f64> + Default + Copy>(v: F) -> F {
    if v.into().is_finite() {
        v
    } else {
        F::default()
    }
}

fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);
    let Ok(name) = String::arbitrary(&mut u) else {
        return;
    };
    let Ok(tag) = arbitrary_tag(&mut u, 6) else {
        return;
    };

    // Строки длиннее u16::MAX законно отклоняются
    let Ok(bytes) = codec::to_bytes(&name, &tag) else {
        return;
    };
    let (decoded_name, decoded) = codec::from_bytes(&bytes).expect("encoded tree must decode");
    assert_eq!(decoded_name, name);
    assert_eq!(decoded, tag);
});
