//! Error types for the container

use thiserror::Error;

/// Boxed error used as the underlying cause of a construction failure
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type alias for container operations
pub type DiResult<T> = Result<T, ContainerError>;

/// Errors that can occur during registration and resolution
#[derive(Error, Debug)]
pub enum ContainerError {
    /// No implementation is bound to the requested capability
    #[error("No binding registered for capability: {capability}")]
    UnboundCapability {
        /// The capability that was requested
        capability: String,
    },

    /// A binding targets a component that was never registered as injectable
    #[error("Component {component} is not registered as injectable")]
    NotInjectable {
        /// Name of the offending component
        component: String,
    },

    /// Zero-argument construction of a component failed
    #[error("Failed to construct component {component}")]
    Construction {
        /// Name of the component that failed to construct
        component: String,
        /// The underlying cause
        #[source]
        source: BoxError,
    },

    /// A resolved dependency could not be assigned into a slot
    #[error("Failed to inject slot {slot} of component {component}")]
    Injection {
        /// Component owning the slot
        component: String,
        /// Name of the slot
        slot: String,
        /// The underlying error
        #[source]
        source: Box<ContainerError>,
    },

    /// Recursive resolution revisited a component already in progress
    #[error("Circular dependency detected: {path}")]
    CircularDependency {
        /// The resolution chain that closed the cycle
        path: String,
    },

    /// A slot name was passed to `assign` that the manifest does not declare
    #[error("Component {component} has no dependency slot named {slot}")]
    UnknownSlot {
        /// Component whose manifest was consulted
        component: String,
        /// The undeclared slot name
        slot: String,
    },

    /// A resolved handle did not have the type the caller expected
    #[error("Capability {request} did not resolve to the expected type {expected}")]
    TypeMismatch {
        /// The capability or component that was requested
        request: String,
        /// Type name the caller expected
        expected: &'static str,
    },

    /// Configuration error
    #[cfg(feature = "config")]
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ContainerError {
    /// Wrap this error as the injection failure of a named slot
    pub(crate) fn into_injection(self, component: &str, slot: &str) -> Self {
        ContainerError::Injection {
            component: component.to_string(),
            slot: slot.to_string(),
            source: Box::new(self),
        }
    }
}
