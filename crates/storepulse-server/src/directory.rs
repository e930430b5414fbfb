//! Static store directory, loaded once at startup.

use std::path::Path;

use storepulse_core::{Error, Result, Store};
use tracing::info;

/// Load the store directory from a JSON array file.
pub fn load_stores(path: &Path) -> Result<Vec<Store>> {
    let raw = std::fs::read_to_string(path)?;
    let stores: Vec<Store> = serde_json::from_str(&raw)?;

    if stores.is_empty() {
        return Err(Error::Config(format!(
            "store directory {} is empty",
            path.display()
        )));
    }

    info!(stores = stores.len(), path = %path.display(), "store directory loaded");
    Ok(stores)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_stores_from_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id":"loja-1","name":"Shopping Centro","code":"CE01","placeId":"p1","state":"SP","region":"Sudeste","team":"Time 1"}}]"#
        )
        .unwrap();

        let stores = load_stores(file.path()).unwrap();
        assert_eq!(stores.len(), 1);
        assert_eq!(stores[0].id, "loja-1");
        assert_eq!(stores[0].display_name(), "CE01 - Shopping Centro");
    }

    #[test]
    fn test_empty_directory_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[]").unwrap();
        let err = load_stores(file.path()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
