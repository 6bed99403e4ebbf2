//! Binding registry: capability names to concrete components
//!
//! Populated through the builder before the container is built, read-only
//! afterwards. A *binding* points a capability name at a registered
//! component; requests for a name that is itself a registered component
//! resolve to that component directly.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use tracing::warn;

use crate::component::{ArcComponentExt, Component, Dependency, Injectable};
use crate::container::ResolutionChain;
use crate::error::{ContainerError, DiResult};

/// Coerces a shared concrete instance into the handle a request expects
pub(crate) type AdaptFn =
    Arc<dyn Fn(Arc<dyn Component>) -> DiResult<Box<dyn Component>> + Send + Sync>;

/// Constructs and injects one instance of a component
pub(crate) type FactoryFn =
    Arc<dyn Fn(&dyn SlotResolver, &mut ResolutionChain) -> DiResult<Arc<dyn Component>> + Send + Sync>;

/// Re-entry seam for the injector: resolves one dependency slot
///
/// Implemented by the container; factories call back through this trait so
/// slot resolution follows the exact same path as a top-level request.
pub(crate) trait SlotResolver {
    fn resolve_slot(&self, capability: &str, chain: &mut ResolutionChain)
        -> DiResult<Box<dyn Component>>;
}

/// Registered component: identity, manifest and type-erased factory
pub(crate) struct ComponentDescriptor {
    pub(crate) name: &'static str,
    pub(crate) dependencies: &'static [Dependency],
    pub(crate) factory: FactoryFn,
    /// Identity adapter used when the component is requested by its own name
    pub(crate) self_adapter: AdaptFn,
}

/// A capability bound to a component, with an optional handle coercion
pub(crate) struct Binding {
    pub(crate) component: String,
    pub(crate) adapter: Option<AdaptFn>,
}

/// Static mapping from capability identity to concrete component identity
#[derive(Default)]
pub(crate) struct BindingRegistry {
    components: FxHashMap<&'static str, ComponentDescriptor>,
    bindings: FxHashMap<String, Binding>,
}

impl BindingRegistry {
    /// Register a component as injectable
    pub(crate) fn register<T: Injectable>(&mut self) {
        let factory: FactoryFn = Arc::new(|resolver, chain| {
            let mut instance = T::construct().map_err(|source| ContainerError::Construction {
                component: T::NAME.to_string(),
                source,
            })?;
            for dep in T::manifest() {
                let value = resolver.resolve_slot(dep.capability, chain)?;
                instance
                    .assign(dep.slot, value)
                    .map_err(|err| err.into_injection(T::NAME, dep.slot))?;
            }
            Ok(Arc::new(instance) as Arc<dyn Component>)
        });

        let self_adapter: AdaptFn = Arc::new(|instance| {
            let concrete = instance
                .downcast_arc::<T>()
                .ok_or_else(|| ContainerError::TypeMismatch {
                    request: T::NAME.to_string(),
                    expected: std::any::type_name::<T>(),
                })?;
            Ok(Box::new(concrete) as Box<dyn Component>)
        });

        let descriptor = ComponentDescriptor {
            name: T::NAME,
            dependencies: T::manifest(),
            factory,
            self_adapter,
        };

        if self.components.insert(T::NAME, descriptor).is_some() {
            warn!(component = T::NAME, "overwriting component registration");
        }
    }

    /// Bind a capability to a component, with a handle coercion captured here
    /// because this is the only point where the concrete type is statically
    /// known
    pub(crate) fn bind<T, H, F>(&mut self, capability: &str, coerce: F)
    where
        T: Injectable,
        H: Component,
        F: Fn(Arc<T>) -> H + Send + Sync + 'static,
    {
        let adapter: AdaptFn = Arc::new(move |instance| {
            let concrete = instance
                .downcast_arc::<T>()
                .ok_or_else(|| ContainerError::TypeMismatch {
                    request: T::NAME.to_string(),
                    expected: std::any::type_name::<T>(),
                })?;
            Ok(Box::new(coerce(concrete)) as Box<dyn Component>)
        });
        self.insert_binding(
            capability,
            Binding {
                component: T::NAME.to_string(),
                adapter: Some(adapter),
            },
        );
    }

    /// Bind a capability to a component by name only
    ///
    /// The request then resolves to the component's own handle (`Arc<T>`).
    /// Used by configuration files, where no coercion can be captured.
    pub(crate) fn bind_name(&mut self, capability: &str, component: &str) {
        self.insert_binding(
            capability,
            Binding {
                component: component.to_string(),
                adapter: None,
            },
        );
    }

    fn insert_binding(&mut self, capability: &str, binding: Binding) {
        if self
            .bindings
            .insert(capability.to_string(), binding)
            .is_some()
        {
            // Last registration wins, matching the overwrite semantics the
            // container documents for duplicate bindings.
            warn!(capability, "overwriting existing binding");
        }
    }

    /// Resolve a request to a component descriptor and its adapter
    ///
    /// A bound capability whose target component was never registered is a
    /// programmer error and fails eligibility here; a name that is neither
    /// bound nor registered is an unbound capability.
    pub(crate) fn lookup(
        &self,
        request: &str,
    ) -> DiResult<(&ComponentDescriptor, Option<&AdaptFn>)> {
        if let Some(binding) = self.bindings.get(request) {
            let descriptor = self.components.get(binding.component.as_str()).ok_or_else(
                || ContainerError::NotInjectable {
                    component: binding.component.clone(),
                },
            )?;
            return Ok((descriptor, binding.adapter.as_ref()));
        }
        if let Some(descriptor) = self.components.get(request) {
            return Ok((descriptor, None));
        }
        Err(ContainerError::UnboundCapability {
            capability: request.to_string(),
        })
    }
}
