//! Inlining of shared diagram boilerplate.
//!
//! [`IncludeResolver`] reads an include source, replaces every
//! `!include <locator>` line with the resolved text of that locator, and
//! drops `@startuml`/`@enduml` marker lines so the caller can wrap the result
//! in its own markers.
//!
//! Resolved text is memoized per locator for the lifetime of the resolver,
//! including every nested locator reached along the way.

mod fetch;

pub use fetch::{DefaultFetcher, Fetch, FetchError, FileFetcher, Locator};

#[cfg(feature = "remote")]
pub use fetch::HttpFetcher;

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
    vec,
};

use log::{debug, trace};
use thiserror::Error;

const INCLUDE_KEYWORD: &str = "!include";
const MARKERS: [&str; 2] = ["@startuml", "@enduml"];

/// Failure to resolve an include.
#[derive(Debug, Error)]
pub enum IncludeError {
    #[error("failed to fetch include `{locator}`: {source}")]
    Fetch {
        locator: String,
        #[source]
        source: FetchError,
    },

    #[error("include cycle: {chain}")]
    Cycle { chain: String },
}

/// Returns the locator token of an include directive line.
///
/// A directive is `!include` followed by exactly one whitespace-separated
/// token. Anything else is not a directive.
fn include_target(line: &str) -> Option<&str> {
    let rest = line.strip_prefix(INCLUDE_KEYWORD)?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let mut tokens = rest.split_whitespace();
    match (tokens.next(), tokens.next()) {
        (Some(target), None) => Some(target),
        _ => None,
    }
}

fn is_marker(line: &str) -> bool {
    MARKERS.iter().any(|marker| line.starts_with(marker))
}

/// One source being expanded.
struct Frame {
    locator: Locator,
    lines: vec::IntoIter<String>,
    output: String,
}

/// Resolves include sources with a shared, single-flight cache.
///
/// # Examples
///
/// ```
/// use std::io::Write;
/// use archup::include::{FileFetcher, IncludeResolver, Locator};
///
/// let mut file = tempfile::NamedTempFile::new().unwrap();
/// writeln!(file, "@startuml\nskinparam monochrome true\n@enduml").unwrap();
///
/// let resolver = IncludeResolver::new(FileFetcher);
/// let locator = Locator::File(file.path().to_path_buf());
/// let text = resolver.resolve(&locator).unwrap();
/// assert_eq!(&*text, "skinparam monochrome true\n");
/// ```
pub struct IncludeResolver<F = DefaultFetcher> {
    fetcher: F,
    cache: Mutex<HashMap<Locator, Arc<str>>>,
    /// Held while a cache miss is being computed.
    gate: Mutex<()>,
}

impl<F: Fetch> IncludeResolver<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            cache: Mutex::new(HashMap::new()),
            gate: Mutex::new(()),
        }
    }

    /// Resolve `locator` to its fully inlined text.
    ///
    /// The first resolution of a locator fetches it and every locator it
    /// includes that is not cached yet. Later resolutions return the cached
    /// text without fetching.
    ///
    /// # Errors
    ///
    /// Returns [`IncludeError::Fetch`] naming the locator that could not be
    /// read, or [`IncludeError::Cycle`] if a source includes itself directly
    /// or transitively.
    pub fn resolve(&self, locator: &Locator) -> Result<Arc<str>, IncludeError> {
        let locator = &locator.normalized();
        if let Some(text) = self.cached(locator) {
            trace!(locator = locator.to_string(); "Include cache hit");
            return Ok(text);
        }

        let _gate = self.gate.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        // Another caller may have filled the entry while we waited.
        if let Some(text) = self.cached(locator) {
            return Ok(text);
        }

        debug!(locator = locator.to_string(); "Resolving include");
        self.expand(locator)
    }

    /// Number of locators with cached text.
    pub fn cached_count(&self) -> usize {
        self.cache().len()
    }

    /// Borrow the fetcher.
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Expand `root` with an explicit stack of frames, caching each source as
    /// it completes. Must be called with the gate held.
    fn expand(&self, root: &Locator) -> Result<Arc<str>, IncludeError> {
        let mut current = self.open(root.clone())?;
        let mut parents: Vec<Frame> = Vec::new();

        loop {
            let Some(line) = current.lines.next() else {
                let text: Arc<str> = Arc::from(std::mem::take(&mut current.output));
                self.cache().insert(current.locator.clone(), Arc::clone(&text));

                match parents.pop() {
                    Some(parent) => {
                        current = parent;
                        current.output.push_str(&text);
                    }
                    None => return Ok(text),
                }
                continue;
            };

            if let Some(target) = include_target(&line) {
                let child = current.locator.join(target);
                if let Some(text) = self.cached(&child) {
                    current.output.push_str(&text);
                    continue;
                }
                let open = parents.iter().chain(std::iter::once(&current));
                if open.clone().any(|frame| frame.locator == child) {
                    let chain = open
                        .map(|frame| frame.locator.to_string())
                        .chain(std::iter::once(child.to_string()))
                        .collect::<Vec<_>>()
                        .join(" -> ");
                    return Err(IncludeError::Cycle { chain });
                }
                trace!(locator = child.to_string(); "Descending into nested include");
                let frame = self.open(child)?;
                parents.push(std::mem::replace(&mut current, frame));
            } else if !is_marker(&line) {
                current.output.push_str(&line);
                current.output.push('\n');
            }
        }
    }

    fn open(&self, locator: Locator) -> Result<Frame, IncludeError> {
        let source = self
            .fetcher
            .fetch(&locator)
            .map_err(|source| IncludeError::Fetch {
                locator: locator.to_string(),
                source,
            })?;
        let lines: Vec<String> = source.lines().map(str::to_owned).collect();

        Ok(Frame {
            locator,
            lines: lines.into_iter(),
            output: String::with_capacity(source.len()),
        })
    }

    fn cached(&self, locator: &Locator) -> Option<Arc<str>> {
        self.cache().get(locator).cloned()
    }

    fn cache(&self) -> MutexGuard<'_, HashMap<Locator, Arc<str>>> {
        self.cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    /// Serves sources from memory and counts fetches per locator.
    #[derive(Default)]
    struct FakeFetcher {
        sources: HashMap<String, String>,
        calls: Mutex<HashMap<String, usize>>,
        total: AtomicUsize,
    }

    impl FakeFetcher {
        fn with(mut self, locator: &str, text: &str) -> Self {
            self.sources.insert(locator.to_string(), text.to_string());
            self
        }

        fn calls(&self, locator: &str) -> usize {
            self.calls
                .lock()
                .unwrap()
                .get(locator)
                .copied()
                .unwrap_or_default()
        }
    }

    impl Fetch for FakeFetcher {
        fn fetch(&self, locator: &Locator) -> Result<String, FetchError> {
            let key = locator.to_string();
            self.total.fetch_add(1, Ordering::SeqCst);
            *self.calls.lock().unwrap().entry(key.clone()).or_default() += 1;
            self.sources.get(&key).cloned().ok_or_else(|| {
                FetchError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, key))
            })
        }
    }

    #[test]
    fn test_include_target() {
        assert_eq!(include_target("!include a.puml"), Some("a.puml"));
        assert_eq!(include_target("!include   https://x/y.puml  "), Some("https://x/y.puml"));
        assert_eq!(include_target("!include"), None);
        assert_eq!(include_target("!include a b"), None);
        assert_eq!(include_target("!includeurl a"), None);
        assert_eq!(include_target("  !include a"), None);
    }

    #[test]
    fn test_strips_markers_and_keeps_other_lines() {
        let fetcher = FakeFetcher::default().with(
            "https://h/root.puml",
            "@startuml\nskinparam a\n' comment\n@enduml\n",
        );
        let resolver = IncludeResolver::new(fetcher);

        let text = resolver.resolve(&Locator::parse("https://h/root.puml")).unwrap();
        assert_eq!(&*text, "skinparam a\n' comment\n");
    }

    #[test]
    fn test_splices_nested_includes_in_place() {
        let fetcher = FakeFetcher::default()
            .with("https://h/root.puml", "before\n!include https://h/mid.puml\nafter")
            .with("https://h/mid.puml", "@startuml\nmid\n!include https://h/leaf.puml\n@enduml")
            .with("https://h/leaf.puml", "leaf");
        let resolver = IncludeResolver::new(fetcher);

        let text = resolver.resolve(&Locator::parse("https://h/root.puml")).unwrap();
        assert_eq!(&*text, "before\nmid\nleaf\nafter\n");
        assert_eq!(resolver.cached_count(), 3);
    }

    #[test]
    fn test_repeated_resolution_fetches_once() {
        let fetcher = FakeFetcher::default().with("https://h/style.puml", "skinparam x\n");
        let resolver = IncludeResolver::new(fetcher);
        let locator = Locator::parse("https://h/style.puml");

        let first = resolver.resolve(&locator).unwrap();
        let second = resolver.resolve(&locator).unwrap();

        assert_eq!(first, second);
        assert_eq!(resolver.fetcher().calls("https://h/style.puml"), 1);
    }

    #[test]
    fn test_shared_nested_include_fetched_once() {
        let fetcher = FakeFetcher::default()
            .with(
                "https://h/root.puml",
                "!include https://h/common.puml\n!include https://h/other.puml",
            )
            .with("https://h/other.puml", "!include https://h/common.puml\nother")
            .with("https://h/common.puml", "common");
        let resolver = IncludeResolver::new(fetcher);

        let text = resolver.resolve(&Locator::parse("https://h/root.puml")).unwrap();
        assert_eq!(&*text, "common\ncommon\nother\n");
        assert_eq!(resolver.fetcher().calls("https://h/common.puml"), 1);

        // Reached later through a different caller, still cached.
        resolver.resolve(&Locator::parse("https://h/other.puml")).unwrap();
        assert_eq!(resolver.fetcher().total.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_fetch_failure_names_locator() {
        let fetcher = FakeFetcher::default().with("https://h/root.puml", "!include https://h/gone.puml");
        let resolver = IncludeResolver::new(fetcher);

        let err = resolver
            .resolve(&Locator::parse("https://h/root.puml"))
            .expect_err("missing nested include");
        match err {
            IncludeError::Fetch { locator, .. } => assert_eq!(locator, "https://h/gone.puml"),
            other => panic!("Expected fetch error, got {other:?}"),
        }
        assert_eq!(resolver.cached_count(), 0);
    }

    #[test]
    fn test_cycle_is_reported() {
        let fetcher = FakeFetcher::default()
            .with("https://h/a.puml", "!include https://h/b.puml")
            .with("https://h/b.puml", "!include https://h/a.puml");
        let resolver = IncludeResolver::new(fetcher);

        let err = resolver
            .resolve(&Locator::parse("https://h/a.puml"))
            .expect_err("cycle");
        match err {
            IncludeError::Cycle { chain } => assert_eq!(
                chain,
                "https://h/a.puml -> https://h/b.puml -> https://h/a.puml"
            ),
            other => panic!("Expected cycle error, got {other:?}"),
        }
    }

    #[test]
    fn test_file_cycle_through_unnormalized_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("x")).unwrap();
        std::fs::write(dir.path().join("a.puml"), "!include x/../a.puml\n").unwrap();

        let resolver = IncludeResolver::new(FileFetcher);
        let err = resolver
            .resolve(&Locator::File(dir.path().join("a.puml")))
            .expect_err("cycle");

        let root = dir.path().join("a.puml").display().to_string();
        match err {
            IncludeError::Cycle { chain } => assert_eq!(chain, format!("{root} -> {root}")),
            other => panic!("Expected cycle error, got {other:?}"),
        }
    }

    #[test]
    fn test_unnormalized_root_shares_cache_entry() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("x")).unwrap();
        std::fs::write(dir.path().join("style.puml"), "skinparam z\n").unwrap();

        let resolver = IncludeResolver::new(FileFetcher);
        resolver
            .resolve(&Locator::File(dir.path().join("style.puml")))
            .unwrap();
        std::fs::remove_file(dir.path().join("style.puml")).unwrap();

        let text = resolver
            .resolve(&Locator::File(dir.path().join("x/./../style.puml")))
            .unwrap();
        assert_eq!(&*text, "skinparam z\n");
        assert_eq!(resolver.cached_count(), 1);
    }

    #[test]
    fn test_concurrent_callers_fetch_once() {
        let fetcher = FakeFetcher::default().with("https://h/style.puml", "skinparam y");
        let resolver = IncludeResolver::new(fetcher);
        let locator = Locator::parse("https://h/style.puml");

        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| resolver.resolve(&locator).unwrap());
            }
        });

        assert_eq!(resolver.fetcher().calls("https://h/style.puml"), 1);
    }

    #[test]
    fn test_local_relative_includes() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("parts")).unwrap();
        std::fs::write(dir.path().join("root.puml"), "!include parts/colors.puml\nroot\n").unwrap();
        std::fs::write(dir.path().join("parts/colors.puml"), "!include fonts.puml\ncolors\n").unwrap();
        std::fs::write(dir.path().join("parts/fonts.puml"), "fonts\n").unwrap();

        let resolver = IncludeResolver::new(FileFetcher);
        let text = resolver
            .resolve(&Locator::File(dir.path().join("root.puml")))
            .unwrap();
        assert_eq!(&*text, "fonts\ncolors\nroot\n");
    }
}
