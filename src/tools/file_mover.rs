use anyhow::{Context, Result};
use log::{debug, warn};
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// 取得不會覆蓋既有檔案的目標路徑
///
/// 目標不存在時原樣回傳，否則依序嘗試 `stem_1.ext`、`stem_2.ext`…
/// 直到找到未使用的名稱。
#[must_use]
pub fn resolve_destination(dest_path: &Path) -> PathBuf {
    if !is_name_taken(dest_path) {
        return dest_path.to_path_buf();
    }

    let stem = dest_path.file_stem().unwrap_or_default();
    let extension = dest_path.extension();
    let parent = dest_path.parent().unwrap_or_else(|| Path::new(""));

    let mut counter: u64 = 1;
    loop {
        let mut name = OsString::from(stem);
        name.push(format!("_{counter}"));
        if let Some(ext) = extension {
            name.push(".");
            name.push(ext);
        }

        let candidate = parent.join(name);
        if !is_name_taken(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}

/// 名稱已被佔用（包含指向不存在目標的符號連結）
fn is_name_taken(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// 移動檔案，只有跨檔案系統時才改用複製後刪除
pub fn move_file(source: &Path, target: &Path) -> Result<()> {
    match fs::rename(source, target) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            debug!(
                "跨檔案系統，改用複製: {} -> {} ({e})",
                source.display(),
                target.display()
            );
            copy_and_delete(source, target, |path| fs::remove_file(path))
        }
        Err(e) => Err(e).with_context(|| {
            format!("移動檔案失敗: {} -> {}", source.display(), target.display())
        }),
    }
}

/// 複製後刪除原檔案；原檔案刪不掉時移除複本，同一檔案不會同時留在兩處
fn copy_and_delete<F>(source: &Path, target: &Path, remove_source: F) -> Result<()>
where
    F: FnOnce(&Path) -> io::Result<()>,
{
    fs::copy(source, target).with_context(|| {
        format!("複製檔案失敗: {} -> {}", source.display(), target.display())
    })?;

    if let Err(e) = remove_source(source) {
        if let Err(cleanup_err) = fs::remove_file(target) {
            warn!("無法移除複本 {}: {cleanup_err}", target.display());
        }
        return Err(e).with_context(|| format!("刪除原檔案失敗: {}", source.display()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_destination_unused_name() {
        let temp_dir = TempDir::new().unwrap();
        let dest = temp_dir.path().join("a.png");
        assert_eq!(resolve_destination(&dest), dest);
    }

    #[test]
    fn test_resolve_destination_skips_taken_suffixes() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path();
        fs::write(base.join("a.png"), "0").unwrap();
        fs::write(base.join("a_1.png"), "1").unwrap();

        assert_eq!(resolve_destination(&base.join("a.png")), base.join("a_2.png"));
    }

    #[test]
    fn test_resolve_destination_without_extension() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path();
        fs::write(base.join("wall"), "0").unwrap();

        assert_eq!(resolve_destination(&base.join("wall")), base.join("wall_1"));
    }

    #[test]
    fn test_resolve_destination_keeps_inner_dots() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path();
        fs::write(base.join("city.night.jpg"), "0").unwrap();

        assert_eq!(
            resolve_destination(&base.join("city.night.jpg")),
            base.join("city.night_1.jpg")
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_destination_treats_broken_symlink_as_taken() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path();
        std::os::unix::fs::symlink(base.join("missing.png"), base.join("a.png")).unwrap();

        assert_eq!(resolve_destination(&base.join("a.png")), base.join("a_1.png"));
    }

    #[test]
    fn test_move_file() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path();
        let source = base.join("a.png");
        let target = base.join("a_moved.png");
        fs::write(&source, "content").unwrap();

        move_file(&source, &target).unwrap();

        assert!(!source.exists());
        assert_eq!(fs::read_to_string(&target).unwrap(), "content");
    }

    #[test]
    fn test_move_vanished_source_fails() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path();

        let result = move_file(&base.join("gone.png"), &base.join("x.png"));

        assert!(result.is_err());
        assert!(!base.join("x.png").exists());
    }

    #[test]
    fn test_move_into_missing_folder_leaves_source() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path();
        let source = base.join("a.png");
        fs::write(&source, "content").unwrap();

        let result = move_file(&source, &base.join("missing/a.png"));

        assert!(result.is_err());
        assert!(source.exists());
    }

    #[test]
    fn test_copy_and_delete_removes_copy_when_source_stays() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path();
        let source = base.join("a.png");
        let target = base.join("1080p_a.png");
        fs::write(&source, "content").unwrap();

        let result = copy_and_delete(&source, &target, |_| {
            Err(io::Error::from(io::ErrorKind::PermissionDenied))
        });

        assert!(result.is_err());
        assert!(source.exists());
        assert!(!target.exists());
    }

    #[test]
    fn test_copy_and_delete_success() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path();
        let source = base.join("a.png");
        let target = base.join("b.png");
        fs::write(&source, "content").unwrap();

        copy_and_delete(&source, &target, |path| fs::remove_file(path)).unwrap();

        assert!(!source.exists());
        assert_eq!(fs::read_to_string(&target).unwrap(), "content");
    }
}
