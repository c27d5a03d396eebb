use tracker_db::StoreLocation;

use crate::Result;

/// Creates the directory a file-backed store lives in.
pub fn ensure_store_dir(location: &StoreLocation) -> Result<()> {
    if let Some(dir) = location.dir()
        && !dir.as_os_str().is_empty()
    {
        std::fs::create_dir_all(dir)?;
    }
    Ok(())
}
