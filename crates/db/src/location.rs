use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{DbError, Result};

const MEMORY_URI: &str = "sqlite::memory:";
const DIR_URI_PREFIX: &str = "sqlite://";
const DB_FILE_EXTENSION: &str = "sqlite";

/// Where a store database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreLocation {
    Memory,
    File(PathBuf),
}

impl StoreLocation {
    /// Resolves a store uri plus database name.
    ///
    /// `sqlite::memory:` selects a private in-memory database. `sqlite://<dir>`
    /// selects the file `<dir>/<database>.sqlite`; the directory is not
    /// created or checked here.
    pub fn parse(uri: &str, database: &str) -> Result<Self> {
        validate_database_name(database)?;
        if uri == MEMORY_URI {
            return Ok(Self::Memory);
        }
        let Some(dir) = uri.strip_prefix(DIR_URI_PREFIX) else {
            return Err(DbError::InvalidUri(format!(
                "{uri} (expected {MEMORY_URI} or {DIR_URI_PREFIX}<dir>)"
            )));
        };
        if dir.is_empty() {
            return Err(DbError::InvalidUri(format!("{uri} (missing directory)")));
        }
        let file = Path::new(dir).join(format!("{database}.{DB_FILE_EXTENSION}"));
        Ok(Self::File(file))
    }

    /// Directory holding the database file, if any.
    pub fn dir(&self) -> Option<&Path> {
        match self {
            Self::Memory => None,
            Self::File(path) => path.parent(),
        }
    }
}

impl fmt::Display for StoreLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => f.write_str(MEMORY_URI),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

fn validate_database_name(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-');
    if valid {
        Ok(())
    } else {
        Err(DbError::InvalidName(format!("database {name:?}")))
    }
}

/// Collection names end up as table identifiers, so only plain words pass.
pub(crate) fn validate_collection_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let valid = chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
        && chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_');
    if valid {
        Ok(())
    } else {
        Err(DbError::InvalidName(format!("collection {name:?}")))
    }
}
