//! Builder for constructing containers

use std::sync::Arc;

use crate::component::{Component, Injectable};
use crate::container::{CacheMode, Container};
use crate::registry::BindingRegistry;

/// Collects registrations and bindings, then builds an immutable [`Container`]
///
/// All registration happens here, before any resolution request; the built
/// container never mutates its registry.
pub struct ContainerBuilder {
    registry: BindingRegistry,
    cache_mode: CacheMode,
}

impl ContainerBuilder {
    /// Create a new container builder
    pub fn new() -> Self {
        Self {
            registry: BindingRegistry::default(),
            cache_mode: CacheMode::default(),
        }
    }

    /// Set the instance reuse policy (defaults to [`CacheMode::Singleton`])
    pub fn cache_mode(&mut self, mode: CacheMode) -> &mut Self {
        self.cache_mode = mode;
        self
    }

    /// Register `T` as an injectable component
    ///
    /// Registration is what makes the [`Injectable`] impl eligible for
    /// container-managed construction; a binding that targets an unregistered
    /// component fails resolution with
    /// [`NotInjectable`](crate::ContainerError::NotInjectable).
    pub fn register<T: Injectable>(&mut self) -> &mut Self {
        self.registry.register::<T>();
        self
    }

    /// Bind a capability name to `T`, coercing resolved instances to the
    /// handle type `H`
    ///
    /// The coercion is captured at bind time, the only point where both the
    /// concrete type and the capability handle are statically known:
    ///
    /// ```ignore
    /// builder.bind("FileReaderService", |c: Arc<FileReaderServiceImpl>| {
    ///     c as Arc<dyn FileReaderService>
    /// });
    /// ```
    ///
    /// Re-binding a capability overwrites the previous binding; the last
    /// registration wins.
    pub fn bind<T, H, F>(&mut self, capability: &str, coerce: F) -> &mut Self
    where
        T: Injectable,
        H: Component,
        F: Fn(Arc<T>) -> H + Send + Sync + 'static,
    {
        self.registry.bind::<T, H, F>(capability, coerce);
        self
    }

    /// Bind a capability name to a component by name only
    ///
    /// Requests then resolve to the component's own `Arc<T>` handle. This is
    /// the form configuration files use.
    pub fn bind_name(&mut self, capability: &str, component: &str) -> &mut Self {
        self.registry.bind_name(capability, component);
        self
    }

    /// Apply a module's registrations
    pub fn add_module(mut self, module: impl Module) -> Self {
        module.configure(&mut self);
        self
    }

    /// Build the immutable container
    pub fn build(self) -> Container {
        Container::new(self.registry, self.cache_mode)
    }
}

impl Default for ContainerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A group of related registrations applied together
pub trait Module {
    /// Configure the builder with this module's components and bindings
    fn configure(&self, builder: &mut ContainerBuilder);
}
