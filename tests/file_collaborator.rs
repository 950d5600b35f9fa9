//! Интеграционные тесты файла с корневым составным тегом.

use std::time::Duration;

use tempfile::tempdir;
use uuid::Uuid;
use znbt::{Charset, CodecConfig, CompoundTag, NbtFile, Registry, StatusCode, Tag};

/// Тест проверяет сохранение значений из реестра и их чтение после
/// повторного открытия.
#[test]
fn test_registry_values_survive_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("players").join("herobrine.dat");
    let registry = Registry::default();
    let id = Uuid::new_v4();

    let mut file = NbtFile::open(&path, CompoundTag::new()).unwrap();
    file.set_root_name("Player");
    let root = file.root_mut();
    root.insert("uuid", registry.to_tag(&id).unwrap());
    root.insert("playtime", registry.to_tag(&Duration::from_secs(3600)).unwrap());
    root.put_bool("op", false);
    file.save().unwrap();

    let file = NbtFile::open(&path, CompoundTag::new()).unwrap();
    assert_eq!(file.root_name(), "Player");
    let root = file.root();
    assert_eq!(registry.from_tag::<Uuid>(root.require("uuid").unwrap()).unwrap(), id);
    assert_eq!(
        registry
            .from_tag::<Duration>(root.require("playtime").unwrap())
            .unwrap(),
        Duration::from_secs(3600)
    );
    assert!(!root.require("op").unwrap().as_boolean().unwrap());
}

/// Тест проверяет, что кодировка из настроек применяется и к записи, и к
/// чтению.
#[test]
fn test_latin1_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("latin1.dat");
    let cfg = CodecConfig::default().with_charset(Charset::Latin1);

    let root = CompoundTag::builder().put("straße", "Köln").build();
    NbtFile::open_with_config(&path, root.clone(), cfg.clone())
        .unwrap()
        .save()
        .unwrap();

    let file = NbtFile::open_with_config(&path, CompoundTag::new(), cfg).unwrap();
    assert_eq!(file.root(), &root);
    assert_eq!(file.root().get("straße"), Some(&Tag::String("Köln".into())));
}

/// Тест проверяет, что повреждённый файл даёт ошибку, а не корень по
/// умолчанию.
#[test]
fn test_corrupt_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.dat");
    std::fs::write(&path, b"not gzip at all").unwrap();

    let err = NbtFile::open(&path, CompoundTag::new()).unwrap_err();
    assert!(matches!(
        err.status_code(),
        StatusCode::Io | StatusCode::InvalidData | StatusCode::UnexpectedEof
    ));
}
