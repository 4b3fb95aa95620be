//! Top-level domain reference set.
//!
//! The bundled list is the IANA root zone listing
//! (<http://data.iana.org/TLD/tlds-alpha-by-domain.txt>). It is loaded once,
//! either explicitly through [`install`] or lazily by the first lookup, and
//! never changes afterwards.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use once_cell::sync::OnceCell;
use tracing::{debug, info};

use crate::error::TldLoadError;

const BUNDLED_TLD_LIST: &str = include_str!("../data/tld-list.txt");

static TOP_LEVEL_DOMAINS: OnceCell<TldSet> = OnceCell::new();

/// Lower-cased set of valid top-level domains.
#[derive(Debug, Clone, Default)]
pub struct TldSet {
    domains: HashSet<String>,
}

impl TldSet {
    /// Parses a list with one domain per line; `#` lines are comments.
    pub fn parse(list: &str) -> Result<Self, TldLoadError> {
        let domains: HashSet<String> = list
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_lowercase)
            .collect();

        if domains.is_empty() {
            return Err(TldLoadError::Empty);
        }
        Ok(Self { domains })
    }

    /// Reads and parses a list from disk.
    pub fn load(path: &Path) -> Result<Self, TldLoadError> {
        let list = fs::read_to_string(path).map_err(|source| TldLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let set = Self::parse(&list)?;
        debug!("Loaded {} top-level domains from {}", set.len(), path.display());
        Ok(set)
    }

    /// The list compiled into the binary.
    pub fn bundled() -> Self {
        Self::parse(BUNDLED_TLD_LIST).expect("bundled top-level domain list is not empty")
    }

    /// Case-insensitive membership test.
    pub fn contains(&self, tld: &str) -> bool {
        self.domains.contains(&tld.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}

/// Installs `set` as the process-wide reference set.
///
/// Must happen before the first URL is parsed; afterwards the set is frozen.
pub fn install(set: TldSet) -> Result<&'static TldSet, TldLoadError> {
    let mut installed = false;
    let current = TOP_LEVEL_DOMAINS.get_or_init(|| {
        installed = true;
        set
    });
    if !installed {
        return Err(TldLoadError::AlreadyInitialized);
    }
    info!("Installed top-level domain reference set ({} entries)", current.len());
    Ok(current)
}

/// The process-wide reference set, falling back to the bundled list.
pub fn top_level_domains() -> &'static TldSet {
    TOP_LEVEL_DOMAINS.get_or_init(|| {
        let set = TldSet::bundled();
        info!("Loaded bundled top-level domain list ({} entries)", set.len());
        set
    })
}

/// Shortcut for `top_level_domains().contains(tld)`.
pub fn is_valid_top_level_domain(tld: &str) -> bool {
    top_level_domains().contains(tld)
}
