//! Core container and resolution engine

use std::sync::Arc;

use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::component::Component;
use crate::error::{ContainerError, DiResult};
use crate::registry::{AdaptFn, BindingRegistry, ComponentDescriptor, SlotResolver};

/// Instance reuse policy for the container
///
/// The two modes produce observably different object graphs: `Singleton`
/// shares one node per component across all parents, `Fresh` builds a new
/// tree per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "config",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum CacheMode {
    /// Construct a new instance for every resolution request
    Fresh,
    /// Construct each component at most once and reuse the instance
    #[default]
    Singleton,
}

/// Components currently being resolved on this call stack
///
/// Revisiting a component already on the chain means the dependency graph is
/// cyclic; resolution fails before any recursion can run away.
pub(crate) struct ResolutionChain {
    in_progress: Vec<&'static str>,
}

impl ResolutionChain {
    fn new() -> Self {
        Self {
            in_progress: Vec::new(),
        }
    }

    fn enter(&mut self, component: &'static str) -> DiResult<()> {
        if self.in_progress.contains(&component) {
            let mut path = self.in_progress.join(" -> ");
            path.push_str(" -> ");
            path.push_str(component);
            return Err(ContainerError::CircularDependency { path });
        }
        self.in_progress.push(component);
        Ok(())
    }

    fn leave(&mut self) {
        self.in_progress.pop();
    }
}

/// Dependency-resolution container
///
/// Built once via [`ContainerBuilder`](crate::ContainerBuilder); immutable
/// and shareable afterwards (`Send + Sync`). The single entry point is
/// [`resolve`](Container::resolve); injected dependencies re-enter it
/// recursively, so a top-level request wires the whole graph or fails as a
/// whole.
pub struct Container {
    registry: BindingRegistry,
    cache_mode: CacheMode,
    /// One cell per component; the cell guarantees at most one construction
    /// even when two threads race on the first request.
    singletons: RwLock<FxHashMap<&'static str, Arc<OnceCell<Arc<dyn Component>>>>>,
}

impl Container {
    pub(crate) fn new(registry: BindingRegistry, cache_mode: CacheMode) -> Self {
        Self {
            registry,
            cache_mode,
            singletons: RwLock::new(FxHashMap::default()),
        }
    }

    /// Create a new container builder
    pub fn builder() -> crate::builder::ContainerBuilder {
        crate::builder::ContainerBuilder::new()
    }

    /// The cache mode this container was built with
    pub fn cache_mode(&self) -> CacheMode {
        self.cache_mode
    }

    /// Resolve a capability to a typed handle
    ///
    /// `H` is the handle the capability's binding produces: the coercion
    /// target for [`bind`](crate::ContainerBuilder::bind), or the concrete
    /// `Arc<T>` for name-only bindings and identity requests.
    pub fn resolve<H: Component>(&self, capability: &str) -> DiResult<H> {
        let value = self.resolve_raw(capability)?;
        value
            .into_any()
            .downcast::<H>()
            .map(|value| *value)
            .map_err(|_| ContainerError::TypeMismatch {
                request: capability.to_string(),
                expected: std::any::type_name::<H>(),
            })
    }

    /// Resolve a capability to a type-erased handle
    pub fn resolve_raw(&self, capability: &str) -> DiResult<Box<dyn Component>> {
        let mut chain = ResolutionChain::new();
        self.resolve_in_chain(capability, &mut chain)
    }

    /// One resolution step: lookup, eligibility, cycle check, instantiate,
    /// adapt. Re-entered by the injector for every dependency slot.
    fn resolve_in_chain(
        &self,
        request: &str,
        chain: &mut ResolutionChain,
    ) -> DiResult<Box<dyn Component>> {
        let (descriptor, adapter) = self.registry.lookup(request)?;

        chain.enter(descriptor.name)?;
        let instance = self.instantiate(descriptor, chain);
        chain.leave();
        let instance = instance?;

        debug!(
            capability = request,
            component = descriptor.name,
            dependencies = descriptor.dependencies.len(),
            "resolved"
        );

        let adapter: &AdaptFn = adapter.unwrap_or(&descriptor.self_adapter);
        adapter(instance)
    }

    /// Construct and inject an instance, honoring the cache mode
    fn instantiate(
        &self,
        descriptor: &ComponentDescriptor,
        chain: &mut ResolutionChain,
    ) -> DiResult<Arc<dyn Component>> {
        match self.cache_mode {
            CacheMode::Fresh => (descriptor.factory)(self, chain),
            CacheMode::Singleton => {
                let cell = {
                    let mut singletons = self.singletons.write();
                    singletons
                        .entry(descriptor.name)
                        .or_insert_with(|| Arc::new(OnceCell::new()))
                        .clone()
                };
                // Construction runs outside the map lock; the cell alone
                // serializes first-time construction per component. Recursive
                // resolution of an acyclic graph only ever waits on *other*
                // components' cells, and cycles were rejected above.
                cell.get_or_try_init(|| (descriptor.factory)(self, chain))
                    .map(Arc::clone)
            }
        }
    }
}

impl SlotResolver for Container {
    fn resolve_slot(
        &self,
        capability: &str,
        chain: &mut ResolutionChain,
    ) -> DiResult<Box<dyn Component>> {
        self.resolve_in_chain(capability, chain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_reports_full_cycle_path() {
        let mut chain = ResolutionChain::new();
        chain.enter("A").unwrap();
        chain.enter("B").unwrap();
        match chain.enter("A") {
            Err(ContainerError::CircularDependency { path }) => {
                assert_eq!(path, "A -> B -> A");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn chain_allows_revisiting_after_leave() {
        let mut chain = ResolutionChain::new();
        chain.enter("A").unwrap();
        chain.enter("B").unwrap();
        chain.leave();
        // Diamond dependencies revisit a component after it completed.
        chain.enter("B").unwrap();
    }
}
