//! Lazy module handles
//!
//! The tree builder only ever stores these handles. Loading happens when the
//! renderer first needs a component, loader or action, and may happen more
//! than once for the same module.

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt};
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::segment::FileKind;

// ============================================================================
// Module contents
// ============================================================================

/// Arguments handed to a route loader or action
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteArgs {
    pub url: String,
    pub params: BTreeMap<String, String>,
    /// Submitted form data, for actions
    pub body: Option<Value>,
}

impl RouteArgs {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// A module's `loader` or `action` export
pub type RouteFn = Arc<dyn Fn(RouteArgs) -> BoxFuture<'static, Result<Value>> + Send + Sync>;

/// Wraps an async closure as a [`RouteFn`]
pub fn route_fn<F, Fut>(f: F) -> RouteFn
where
    F: Fn(RouteArgs) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value>> + Send + 'static,
{
    Arc::new(move |args| f(args).boxed())
}

/// Opaque default export, owned by the rendering layer
#[derive(Clone)]
pub struct Component(Arc<dyn Any + Send + Sync>);

impl Component {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Arc::new(value))
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Component")
    }
}

/// What a page or layout module exports once loaded
#[derive(Clone)]
pub struct PageModule {
    pub default: Component,
    pub loader: Option<RouteFn>,
    pub action: Option<RouteFn>,
}

impl PageModule {
    pub fn new(default: Component) -> Self {
        Self {
            default,
            loader: None,
            action: None,
        }
    }

    pub fn with_loader(mut self, loader: RouteFn) -> Self {
        self.loader = Some(loader);
        self
    }

    pub fn with_action(mut self, action: RouteFn) -> Self {
        self.action = Some(action);
        self
    }
}

impl fmt::Debug for PageModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageModule")
            .field("loader", &self.loader.is_some())
            .field("action", &self.action.is_some())
            .finish()
    }
}

// ============================================================================
// Loaders
// ============================================================================

/// Deferred, re-invocable module import
#[async_trait]
pub trait ModuleLoader: Send + Sync {
    async fn load(&self) -> Result<PageModule>;
}

/// Loader backed by an async closure
struct FnLoader<F>(F);

#[async_trait]
impl<F, Fut> ModuleLoader for FnLoader<F>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<PageModule>> + Send + 'static,
{
    async fn load(&self) -> Result<PageModule> {
        (self.0)().await
    }
}

/// Module owned by another process (the bundler); only its path is known
struct ExternalLoader {
    source: Arc<str>,
}

#[async_trait]
impl ModuleLoader for ExternalLoader {
    async fn load(&self) -> Result<PageModule> {
        Err(anyhow!(
            "{} is an external module and cannot be loaded here",
            self.source
        ))
    }
}

/// Handle to one page, layout, error, not-found or loading module
///
/// Identified by its source path: two handles with the same path are the same
/// module.
#[derive(Clone)]
pub struct ModuleRef {
    source: Arc<str>,
    loader: Arc<dyn ModuleLoader>,
}

impl ModuleRef {
    pub fn new(source: impl Into<Arc<str>>, loader: impl ModuleLoader + 'static) -> Self {
        Self {
            source: source.into(),
            loader: Arc::new(loader),
        }
    }

    /// Handle backed by an async closure
    ///
    /// ```
    /// use pagetree::module::{Component, ModuleRef, PageModule};
    ///
    /// let module = ModuleRef::from_fn("./pages/page.tsx", || async {
    ///     Ok(PageModule::new(Component::new("home")))
    /// });
    /// assert_eq!(module.source(), "./pages/page.tsx");
    /// ```
    pub fn from_fn<F, Fut>(source: impl Into<Arc<str>>, f: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<PageModule>> + Send + 'static,
    {
        Self::new(source, FnLoader(f))
    }

    /// Handle to a module that only the bundler can load
    pub fn external(source: impl Into<Arc<str>>) -> Self {
        let source: Arc<str> = source.into();
        Self {
            loader: Arc::new(ExternalLoader {
                source: Arc::clone(&source),
            }),
            source,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn file_kind(&self) -> Option<FileKind> {
        FileKind::from_path(&self.source)
    }

    /// Invokes the loader; errors carry the module path
    pub async fn load(&self) -> Result<PageModule> {
        self.loader
            .load()
            .await
            .with_context(|| format!("failed to load module {}", self.source))
    }
}

impl PartialEq for ModuleRef {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for ModuleRef {}

impl fmt::Debug for ModuleRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ModuleRef").field(&self.source).finish()
    }
}

impl fmt::Display for ModuleRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl Serialize for ModuleRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.source)
    }
}

// ============================================================================
// Deferred exports
// ============================================================================

/// A module's default export, resolved on first render
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LazyElement {
    pub module: ModuleRef,
}

impl LazyElement {
    pub fn new(module: ModuleRef) -> Self {
        Self { module }
    }

    pub async fn resolve(&self) -> Result<Component> {
        Ok(self.module.load().await?.default)
    }
}

/// Which named export a [`DeferredHandler`] forwards to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Export {
    Loader,
    Action,
}

impl Export {
    pub fn name(self) -> &'static str {
        match self {
            Export::Loader => "loader",
            Export::Action => "action",
        }
    }
}

/// Loader or action wrapper that loads the module at call time
///
/// Serializes as `<module>#<export>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeferredHandler {
    pub module: ModuleRef,
    pub export: Export,
}

impl DeferredHandler {
    pub fn loader(module: ModuleRef) -> Self {
        Self {
            module,
            export: Export::Loader,
        }
    }

    pub fn action(module: ModuleRef) -> Self {
        Self {
            module,
            export: Export::Action,
        }
    }

    /// Loads the module and forwards to the export
    ///
    /// A module without the export yields `Ok(None)`.
    pub async fn invoke(&self, args: RouteArgs) -> Result<Option<Value>> {
        let module = self.module.load().await?;
        let handler = match self.export {
            Export::Loader => module.loader,
            Export::Action => module.action,
        };

        match handler {
            Some(handler) => handler(args)
                .await
                .with_context(|| format!("{}#{} failed", self.module, self.export.name()))
                .map(Some),
            None => Ok(None),
        }
    }
}

impl fmt::Display for DeferredHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.module, self.export.name())
    }
}

impl Serialize for DeferredHandler {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn page_with_loader(source: &str) -> ModuleRef {
        ModuleRef::from_fn(source.to_string(), || async {
            Ok(PageModule::new(Component::new("users")).with_loader(route_fn(
                |args: RouteArgs| async move {
                    Ok(json!({ "id": args.params.get("id").cloned() }))
                },
            )))
        })
    }

    #[tokio::test]
    async fn test_loader_present() {
        let handler = DeferredHandler::loader(page_with_loader("./pages/users/[id]/page.tsx"));
        let value = handler
            .invoke(RouteArgs::new("/users/7").with_param("id", "7"))
            .await
            .unwrap();
        assert_eq!(value, Some(json!({ "id": "7" })));
    }

    #[tokio::test]
    async fn test_action_absent_is_none() {
        let handler = DeferredHandler::action(page_with_loader("./pages/users/[id]/page.tsx"));
        let value = handler.invoke(RouteArgs::new("/users/7")).await.unwrap();
        assert_eq!(value, None);
    }

    #[tokio::test]
    async fn test_handler_error_has_context() {
        let module = ModuleRef::from_fn("./pages/page.tsx", || async {
            Ok(PageModule::new(Component::new(())).with_action(route_fn(|_| async {
                Err(anyhow!("rejected"))
            })))
        });
        let err = DeferredHandler::action(module)
            .invoke(RouteArgs::new("/"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "./pages/page.tsx#action failed");
    }

    #[tokio::test]
    async fn test_lazy_element_resolves_default() {
        let element = LazyElement::new(page_with_loader("./pages/page.tsx"));
        let component = element.resolve().await.unwrap();
        assert_eq!(component.downcast_ref::<&str>(), Some(&"users"));
    }

    #[tokio::test]
    async fn test_external_module_fails_with_path() {
        let module = ModuleRef::external("./pages/about/page.tsx");
        let err = module.load().await.unwrap_err();
        assert_eq!(err.to_string(), "failed to load module ./pages/about/page.tsx");
    }

    #[test]
    fn test_equality_by_source() {
        let a = ModuleRef::external("./pages/page.tsx");
        let b = page_with_loader("./pages/page.tsx");
        assert_eq!(a, b);
        assert_ne!(a, ModuleRef::external("./pages/layout.tsx"));
        assert_eq!(b.file_kind(), Some(FileKind::Page));
    }

    #[test]
    fn test_serialized_forms() {
        let module = ModuleRef::external("./pages/page.tsx");
        assert_eq!(
            serde_json::to_value(LazyElement::new(module.clone())).unwrap(),
            json!("./pages/page.tsx")
        );
        assert_eq!(
            serde_json::to_value(DeferredHandler::loader(module)).unwrap(),
            json!("./pages/page.tsx#loader")
        );
    }
}
