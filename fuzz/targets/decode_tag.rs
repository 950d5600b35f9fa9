#![no_main]

use std::io::Write;

use arbitrary::Arbitrary;
use flate2::{write::GzEncoder, Compression};
use libfuzzer_sys::fuzz_target;
use znbt::{codec, Charset, CodecConfig, NbtReader};

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    /// Содержимое до сжатия
    raw: Vec<u8>,
    charset: Charset,
    max_depth: u8,
}

fuzz_target!(|input: FuzzInput| {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::fast());
    encoder.write_all(&input.raw).unwrap();
    let bytes = encoder.finish().unwrap();

    let cfg = CodecConfig::default()
        .with_charset(input.charset)
        .with_max_depth(usize::from(input.max_depth).max(1));

    // Декодер не должен паниковать ни на каких данных.
    let Ok(Some((name, tag))) = NbtReader::with_config(bytes.as_slice(), &cfg).read_named_tag()
    else {
        return;
    };

    // Всё, что прочитано, должно записываться обратно и читаться так же.
    if cfg.charset == Charset::Utf8 {
        let encoded = codec::to_bytes(&name, &tag).expect("decoded tree must re-encode");
        let (again_name, again) = codec::from_bytes(&encoded).expect("re-encoded tree must decode");
        assert_eq!(again_name, name);
        if !contains_nan(&tag) {
            assert_eq!(again, tag);
        }
    }
});

fn contains_nan(tag: &znbt::Tag) -> bool {
    use znbt::Tag;
    match tag {
        Tag::Float(v) => v.is_nan(),
        Tag::Double(v) => v.is_nan(),
        Tag::List(list) => list.iter().any(contains_nan),
        Tag::Compound(compound) => compound.values().any(contains_nan),
        _ => false,
    }
}
