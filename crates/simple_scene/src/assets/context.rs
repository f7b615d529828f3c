//! Directory-scoped asset lookups

use std::path::Path;
use std::sync::Arc;

use super::{AssetError, AssetHandle, AssetResolver};

/// Path-scoped view over an [`AssetResolver`].
///
/// A context behaves like a directory: names looked up through it are joined
/// onto its base path before the resolver searches every registered archive.
/// Models use one to reach their material libraries and textures by the
/// relative names written in the model files.
///
/// ```ignore
/// let ctx = resolver.context("./drone2/");
/// let stream = ctx.lookup("drone2.mtl")?.open()?;
/// ```
#[derive(Clone)]
pub struct AssetContext {
    resolver: Arc<AssetResolver>,
    base_path: String,
}

impl AssetContext {
    /// Create a context over `resolver` rooted at `base_path`
    pub fn new(resolver: Arc<AssetResolver>, base_path: impl Into<String>) -> Self {
        Self {
            resolver,
            base_path: base_path.into(),
        }
    }

    /// Resolve a name relative to the base path
    pub fn lookup(&self, relative_name: &str) -> Result<AssetHandle, AssetError> {
        self.resolver.resolve(&self.full_path(relative_name))
    }

    /// Composed resource name for `relative_name`, without resolving it
    pub fn full_path(&self, relative_name: &str) -> String {
        Path::new(&self.base_path)
            .join(relative_name)
            .to_string_lossy()
            .into_owned()
    }

    /// Base path every lookup is joined onto
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Resolver this context delegates to
    pub fn resolver(&self) -> &Arc<AssetResolver> {
        &self.resolver
    }
}

impl std::fmt::Debug for AssetContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetContext")
            .field("base_path", &self.base_path)
            .field("archives", &self.resolver.archive_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::MemoryArchive;

    fn resolver_with(names: &[&str]) -> Arc<AssetResolver> {
        let archive = MemoryArchive::new();
        for name in names {
            archive.insert(*name, Vec::<u8>::new());
        }
        let resolver = Arc::new(AssetResolver::new());
        resolver.register(archive);
        resolver
    }

    #[test]
    fn test_full_path_joins_base() {
        let ctx = resolver_with(&[]).context("drone2/");
        assert_eq!(ctx.full_path("drone2.mtl"), "drone2/drone2.mtl");
        assert_eq!(ctx.full_path("tex/hull.png"), "drone2/tex/hull.png");
    }

    #[test]
    fn test_full_path_with_empty_base() {
        let ctx = resolver_with(&[]).context("");
        assert_eq!(ctx.full_path("model.obj"), "model.obj");
    }

    #[test]
    fn test_lookup_uses_composed_name() {
        let ctx = resolver_with(&["drone2/hull.png"]).context("drone2");
        let handle = ctx.lookup("hull.png").unwrap();
        assert_eq!(handle.resource_name(), "drone2/hull.png");
    }

    #[test]
    fn test_lookup_missing_reports_composed_name() {
        let ctx = resolver_with(&["hull.png"]).context("drone2");
        match ctx.lookup("hull.png") {
            Err(AssetError::NoSuchResource { name, .. }) => assert_eq!(name, "drone2/hull.png"),
            other => panic!("Expected NoSuchResource, got {other:?}"),
        }
    }

    #[test]
    fn test_lookup_without_archives() {
        let ctx = Arc::new(AssetResolver::new()).context("models");
        assert!(matches!(ctx.lookup("a.obj"), Err(AssetError::NoArchivesConfigured)));
    }
}
