//! Файл с корневым составным тегом.

use std::{
    fs::{self, File},
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use tracing::{debug, info};
use znbt_error::{bail, StatusCode, ZnbtResult};

use crate::{CodecConfig, CompoundTag, NbtReader, NbtWriter, Tag};

/// Корневой составной тег, привязанный к пути на диске.
///
/// Если файла нет, используется корень по умолчанию; файл создаётся только
/// при сохранении.
#[derive(Debug, Clone)]
pub struct NbtFile {
    path: PathBuf,
    config: CodecConfig,
    root_name: String,
    root: CompoundTag,
}

impl NbtFile {
    pub fn open(
        path: impl AsRef<Path>,
        default_root: CompoundTag,
    ) -> ZnbtResult<Self> {
        Self::open_with_config(path, default_root, CodecConfig::default())
    }

    pub fn open_with_config(
        path: impl AsRef<Path>,
        default_root: CompoundTag,
        config: CodecConfig,
    ) -> ZnbtResult<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            debug!(path = %path.display(), "file not found, using default root");
            return Ok(Self {
                path,
                config,
                root_name: String::new(),
                root: default_root,
            });
        }

        let file = File::open(&path)?;
        let mut reader = NbtReader::with_config(BufReader::new(file), &config);
        let (root_name, root) = match reader.read_named_tag()? {
            Some((name, Tag::Compound(root))) => (name, root),
            Some((_, other)) => bail!(
                StatusCode::InvalidData,
                "root of {} is {}, expected Compound",
                path.display(),
                other.tag_type()
            ),
            None => bail!(
                StatusCode::InvalidData,
                "{} contains only an end tag",
                path.display()
            ),
        };

        info!(path = %path.display(), root_name = %root_name, entries = root.len(), "file loaded");
        Ok(Self {
            path,
            config,
            root_name,
            root,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn root(&self) -> &CompoundTag {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut CompoundTag {
        &mut self.root
    }

    pub fn set_root(
        &mut self,
        root: CompoundTag,
    ) {
        self.root = root;
    }

    pub fn root_name(&self) -> &str {
        &self.root_name
    }

    pub fn set_root_name(
        &mut self,
        name: impl Into<String>,
    ) {
        self.root_name = name.into();
    }

    /// Записывает всё дерево, создавая недостающие каталоги.
    pub fn save(&self) -> ZnbtResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = File::create(&self.path)?;
        let mut writer = NbtWriter::with_config(BufWriter::new(file), &self.config);
        writer.write_tag(&self.root_name, &Tag::Compound(self.root.clone()))?;
        writer.finish()?.flush()?;

        info!(path = %self.path.display(), entries = self.root.len(), "file saved");
        Ok(())
    }

    /// Сохраняет, только если файла ещё нет. Возвращает `true`, если запись
    /// состоялась.
    pub fn save_if_absent(&self) -> ZnbtResult<bool> {
        if self.path.exists() {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::codec;

    fn defaults() -> CompoundTag {
        CompoundTag::builder().put("version", 1i32).build()
    }

    #[test]
    fn test_missing_file_uses_default() {
        let dir = tempdir().unwrap();
        let file = NbtFile::open(dir.path().join("level.dat"), defaults()).unwrap();
        assert_eq!(file.root(), &defaults());
        assert_eq!(file.root_name(), "");
        assert!(!file.path().exists());
    }

    /// Тест проверяет, что сохранение создаёт каталоги и сохраняет имя корня.
    #[test]
    fn test_save_and_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("world/data/level.dat");

        let mut file = NbtFile::open(&path, defaults()).unwrap();
        file.set_root_name("Data");
        file.root_mut().put("seed", -42i64);
        file.save().unwrap();

        let reopened = NbtFile::open(&path, CompoundTag::new()).unwrap();
        assert_eq!(reopened.root_name(), "Data");
        assert_eq!(reopened.root().get("seed"), Some(&Tag::Long(-42)));
        assert_eq!(reopened.root().get("version"), Some(&Tag::Int(1)));
    }

    #[test]
    fn test_save_if_absent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.dat");

        let file = NbtFile::open(&path, defaults()).unwrap();
        assert!(file.save_if_absent().unwrap());

        let mut other = NbtFile::open(&path, CompoundTag::new()).unwrap();
        other.set_root(CompoundTag::new());
        assert!(!other.save_if_absent().unwrap());

        let reopened = NbtFile::open(&path, CompoundTag::new()).unwrap();
        assert_eq!(reopened.root(), &defaults());
    }

    /// Тест проверяет отказ при корне, не являющемся составным тегом.
    #[test]
    fn test_non_compound_root() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("list.dat");
        fs::write(&path, codec::to_bytes("", &Tag::Int(5)).unwrap()).unwrap();

        let err = NbtFile::open(&path, defaults()).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::InvalidData);
    }
}
