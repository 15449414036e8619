//! Star catalog loading
//!
//! The True Chitra ayanamsa needs Spica from the Hipparcos main catalog. The
//! catalog is addressed by its canonical URL; a [`ResourceOpener`] turns that
//! URL into a readable file. When [`HIP_MAIN_DAT_ENV`] names an existing file,
//! [`LocalCatalogOverride`] substitutes it for the URL and nothing else.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;

use directories::ProjectDirs;

use crate::config::hip_main_dat;
pub use crate::config::{HIP_MAIN_DAT_ENV, HIP_MAIN_DAT_ENV_FALLBACK};
use crate::error::CatalogError;

/// Canonical location of the Hipparcos main catalog
pub const HIPPARCOS_URL: &str = "https://cdsarc.cds.unistra.fr/ftp/cats/I/239/hip_main.dat";

/// Hipparcos number of Spica (alpha Virginis)
pub const SPICA_HIP: u32 = 65474;

/// Julian Day of the Hipparcos catalog epoch, J1991.25 (TT)
pub const HIPPARCOS_EPOCH_JD: f64 = 2448349.0625;

pub type CatalogReader = Box<dyn BufRead + Send>;

/// Opens a resource given its URL or a local path
pub trait ResourceOpener: Send + Sync {
    fn open(&self, url: &str) -> Result<CatalogReader, CatalogError>;
}

/// Downloads a remote resource to a local file
pub trait Fetcher: Send + Sync {
    fn fetch(&self, url: &str, dest: &Path) -> Result<(), CatalogError>;
}

/// Blocking HTTP download
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher;

impl HttpFetcher {
    fn download(url: &str, dest: &Path) -> Result<(), CatalogError> {
        let http = |source| CatalogError::Download {
            url: url.to_string(),
            source,
        };
        let io = |source| CatalogError::Io {
            path: dest.display().to_string(),
            source,
        };

        let client = reqwest::blocking::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(http)?;
        let mut response = client.get(url).send().and_then(|r| r.error_for_status()).map_err(http)?;

        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent).map_err(io)?;
        }
        // Written aside and renamed so an interrupted download never looks cached
        let partial = dest.with_extension("part");
        let mut file = File::create(&partial).map_err(io)?;
        response.copy_to(&mut file).map_err(http)?;
        std::fs::rename(&partial, dest).map_err(io)
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str, dest: &Path) -> Result<(), CatalogError> {
        tracing::info!("Downloading {} to {}", url, dest.display());
        // The blocking client must not run on an async runtime thread
        std::thread::scope(|scope| scope.spawn(|| Self::download(url, dest)).join())
            .unwrap_or_else(|_| Err(CatalogError::DownloadPanicked(url.to_string())))
    }
}

/// Default opener: local paths are read directly, remote URLs are served
/// from a download cache directory and fetched on first use.
#[derive(Debug, Clone)]
pub struct CachedResourceOpener<F = HttpFetcher> {
    cache_dir: PathBuf,
    fetcher: F,
}

impl CachedResourceOpener {
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self::with_fetcher(cache_dir, HttpFetcher)
    }

    /// Opener rooted at the per-user data directory
    pub fn from_project_dirs() -> Self {
        let cache_dir = ProjectDirs::from("com", "jyotish", "jyotish")
            .map(|dirs| dirs.data_dir().join("catalogs"))
            .unwrap_or_else(|| PathBuf::from("catalogs"));
        Self::new(cache_dir)
    }
}

impl<F: Fetcher> CachedResourceOpener<F> {
    pub fn with_fetcher(cache_dir: impl Into<PathBuf>, fetcher: F) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            fetcher,
        }
    }

    /// Local file that a URL resolves to
    pub fn resolve(&self, url: &str) -> PathBuf {
        if !is_remote(url) {
            return PathBuf::from(url);
        }
        let file_name = url.rsplit('/').next().unwrap_or(url);
        self.cache_dir.join(file_name)
    }
}

impl<F: Fetcher> ResourceOpener for CachedResourceOpener<F> {
    fn open(&self, url: &str) -> Result<CatalogReader, CatalogError> {
        let path = self.resolve(url);
        if is_remote(url) && !path.is_file() {
            self.fetcher.fetch(url, &path)?;
        }
        open_file(&path)
    }
}

/// Wraps an opener so the Hipparcos URL is served from a local file when
/// [`HIP_MAIN_DAT_ENV`] names one. All other URLs pass through unchanged.
#[derive(Debug, Clone)]
pub struct LocalCatalogOverride<O> {
    inner: O,
}

impl<O: ResourceOpener> LocalCatalogOverride<O> {
    pub fn new(inner: O) -> Self {
        Self { inner }
    }

    /// The local catalog path, if the variable is set and names a file
    pub fn local_catalog() -> Option<PathBuf> {
        hip_main_dat().filter(|p| p.is_file())
    }

    /// The location actually opened for `url`
    pub fn redirect(&self, url: &str) -> String {
        if url == HIPPARCOS_URL {
            if let Some(path) = Self::local_catalog() {
                return path.display().to_string();
            }
        }
        url.to_string()
    }
}

impl<O: ResourceOpener> ResourceOpener for LocalCatalogOverride<O> {
    fn open(&self, url: &str) -> Result<CatalogReader, CatalogError> {
        let target = self.redirect(url);
        if target != url {
            tracing::debug!("Serving {} from local file {}", url, target);
        }
        self.inner.open(&target)
    }
}

fn is_remote(url: &str) -> bool {
    url.contains("://")
}

fn open_file(path: &Path) -> Result<CatalogReader, CatalogError> {
    let file = File::open(path).map_err(|source| CatalogError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(Box::new(BufReader::new(file)))
}

static OPENER: OnceLock<Box<dyn ResourceOpener>> = OnceLock::new();

/// Install the local catalog override as the process-wide opener
///
/// Must run before the first chart is computed; later calls are no-ops.
/// Returns whether this call installed it.
pub fn install_local_catalog_override() -> bool {
    let mut installed = false;
    OPENER.get_or_init(|| {
        installed = true;
        Box::new(LocalCatalogOverride::new(CachedResourceOpener::from_project_dirs()))
    });
    if installed {
        match LocalCatalogOverride::<CachedResourceOpener>::local_catalog() {
            Some(path) => tracing::info!("Hipparcos catalog will be read from {}", path.display()),
            None => tracing::debug!("{} not set or not a file; using catalog cache", HIP_MAIN_DAT_ENV),
        }
    } else {
        tracing::warn!("Catalog opener already in use; local catalog override not installed");
    }
    installed
}

/// The process-wide opener; plain cache lookup if no override was installed
pub fn opener() -> &'static dyn ResourceOpener {
    OPENER
        .get_or_init(|| Box::new(CachedResourceOpener::from_project_dirs()))
        .as_ref()
}

/// Astrometric data of one Hipparcos star (ICRS, epoch J1991.25)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HipparcosStar {
    pub hip: u32,
    pub ra_degrees: f64,
    pub dec_degrees: f64,
    /// Proper motion in RA times cos(dec), milliarcseconds/year
    pub ra_mas_per_year: f64,
    pub dec_mas_per_year: f64,
}

/// Scan a `hip_main.dat` stream for one star
///
/// Records are `|`-separated; field 1 is the HIP number, 8/9 are RA/Dec in
/// degrees and 12/13 the proper motions.
pub fn find_star<R: BufRead>(reader: R, hip: u32) -> Result<HipparcosStar, CatalogError> {
    for line in reader.lines() {
        let line = line.map_err(|source| CatalogError::Io {
            path: HIPPARCOS_URL.to_string(),
            source,
        })?;
        let fields: Vec<&str> = line.split('|').collect();
        if fields.len() < 14 || fields[1].trim().parse::<u32>().ok() != Some(hip) {
            continue;
        }

        let field = |index: usize, name: &'static str| {
            fields[index]
                .trim()
                .parse::<f64>()
                .map_err(|_| CatalogError::Malformed { hip, field: name })
        };

        return Ok(HipparcosStar {
            hip,
            ra_degrees: field(8, "RAdeg")?,
            dec_degrees: field(9, "DEdeg")?,
            ra_mas_per_year: field(12, "pmRA")?,
            dec_mas_per_year: field(13, "pmDE")?,
        });
    }

    Err(CatalogError::StarNotFound(hip))
}

/// Load a star through an opener
pub fn load_star(opener: &dyn ResourceOpener, hip: u32) -> Result<HipparcosStar, CatalogError> {
    let reader = opener.open(HIPPARCOS_URL)?;
    find_star(reader, hip)
}

static SPICA: OnceLock<Option<HipparcosStar>> = OnceLock::new();

/// Spica from the process-wide opener, loaded once per process
pub fn spica() -> Option<HipparcosStar> {
    *SPICA.get_or_init(|| match load_star(opener(), SPICA_HIP) {
        Ok(star) => {
            tracing::info!("Loaded Spica (HIP {}) from Hipparcos catalog", star.hip);
            Some(star)
        }
        Err(e) => {
            tracing::warn!("Hipparcos catalog unavailable: {}", e);
            None
        }
    })
}
