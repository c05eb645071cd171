//! Reading include sources from disk or over HTTP.

use std::{
    fmt, fs, io,
    path::{Component, Path, PathBuf},
    time::Duration,
};

use log::debug;
use thiserror::Error;

/// Where an include source lives.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Locator {
    /// An `http://` or `https://` URL.
    Url(String),
    /// A local file path.
    File(PathBuf),
}

impl Locator {
    /// Classify a raw locator token.
    ///
    /// # Examples
    ///
    /// ```
    /// use archup::include::Locator;
    ///
    /// assert!(matches!(Locator::parse("https://example.com/a.puml"), Locator::Url(_)));
    /// assert!(matches!(Locator::parse("shared/style.puml"), Locator::File(_)));
    /// ```
    pub fn parse(raw: &str) -> Self {
        if raw.starts_with("https://") || raw.starts_with("http://") {
            Self::Url(raw.to_string())
        } else {
            Self::File(PathBuf::from(raw))
        }
    }

    /// Resolve a locator found inside the source identified by `self`.
    ///
    /// A relative path inside a local file is taken relative to that file's
    /// directory. Anything else is used as written.
    pub fn join(&self, raw: &str) -> Self {
        match (self, Self::parse(raw)) {
            (Self::File(parent), Self::File(child)) if child.is_relative() => {
                let base = parent.parent().unwrap_or_else(|| Path::new(""));
                Self::File(normalize(&base.join(child)))
            }
            (_, child) => child.normalized(),
        }
    }

    /// The same locator with `.` and `..` segments of a file path folded
    /// away. URLs are returned unchanged.
    pub fn normalized(&self) -> Self {
        match self {
            Self::File(path) => Self::File(normalize(path)),
            Self::Url(_) => self.clone(),
        }
    }
}

/// Lexically folds `.` and `..` out of `path`. Leading `..` segments of a
/// relative path are kept; `..` directly under the root is dropped.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other),
        }
    }
    out
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => f.write_str(url),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

impl From<&str> for Locator {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

/// Failure to read an include source.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("remote includes are not supported by this build")]
    RemoteDisabled,
}

/// Reads the raw text behind a [`Locator`].
///
/// Implementations do no caching; [`IncludeResolver`](super::IncludeResolver)
/// calls `fetch` at most once per locator.
pub trait Fetch: Send + Sync {
    fn fetch(&self, locator: &Locator) -> Result<String, FetchError>;
}

/// Reads local files.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileFetcher;

impl Fetch for FileFetcher {
    fn fetch(&self, locator: &Locator) -> Result<String, FetchError> {
        match locator {
            Locator::File(path) => {
                debug!(path = path.display().to_string(); "Reading include file");
                Ok(fs::read_to_string(path)?)
            }
            Locator::Url(_) => Err(FetchError::RemoteDisabled),
        }
    }
}

/// Performs blocking HTTP GET requests with a fixed timeout.
#[cfg(feature = "remote")]
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    agent: ureq::Agent,
}

#[cfg(feature = "remote")]
impl HttpFetcher {
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            .redirects(5)
            .build();
        Self { agent }
    }
}

#[cfg(feature = "remote")]
impl Fetch for HttpFetcher {
    fn fetch(&self, locator: &Locator) -> Result<String, FetchError> {
        let Locator::Url(url) = locator else {
            return FileFetcher.fetch(locator);
        };

        debug!(url = url.as_str(); "Downloading include");
        let response = self
            .agent
            .get(url)
            .call()
            .map_err(|err| FetchError::Http(err.to_string()))?;
        Ok(response.into_string()?)
    }
}

/// Dispatches on the locator kind: files from disk, URLs over HTTP.
#[derive(Debug, Clone)]
pub struct DefaultFetcher {
    #[cfg(feature = "remote")]
    http: HttpFetcher,
}

impl DefaultFetcher {
    /// Create a fetcher whose remote requests give up after `timeout`.
    #[cfg_attr(not(feature = "remote"), allow(unused_variables))]
    pub fn new(timeout: Duration) -> Self {
        Self {
            #[cfg(feature = "remote")]
            http: HttpFetcher::new(timeout),
        }
    }
}

impl Fetch for DefaultFetcher {
    fn fetch(&self, locator: &Locator) -> Result<String, FetchError> {
        match locator {
            Locator::File(_) => FileFetcher.fetch(locator),
            #[cfg(feature = "remote")]
            Locator::Url(_) => self.http.fetch(locator),
            #[cfg(not(feature = "remote"))]
            Locator::Url(_) => Err(FetchError::RemoteDisabled),
        }
    }
}
