//! Minimal dependency-resolution container
//!
//! Given a capability name, the container looks up the concrete component
//! bound to it, verifies the component is registered as injectable,
//! recursively resolves the component's declared dependencies and returns a
//! fully wired instance. Dependencies are declared through a static manifest
//! on each [`Injectable`] type rather than discovered by inspecting live
//! objects, so the whole graph is known at registration time.
//!
//! Resolution is all-or-nothing: an unbound capability, an unregistered
//! component, a failing constructor or a dependency cycle fails the whole
//! request with a typed [`ContainerError`].

pub mod builder;
pub mod component;
pub mod container;
pub mod error;

pub(crate) mod registry;

#[cfg(feature = "config")]
pub mod config;

pub use builder::{ContainerBuilder, Module};
pub use component::{ArcComponentExt, Component, Dependency, Injectable};
pub use container::{CacheMode, Container};
pub use error::{BoxError, ContainerError, DiResult};

#[cfg(feature = "config")]
pub use config::{BindingConfig, ContainerConfig};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::{
        ArcComponentExt, BoxError, CacheMode, Component, Container, ContainerBuilder,
        ContainerError, Dependency, DiResult, Injectable, Module,
    };
}
