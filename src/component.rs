//! Component and injectable-type contracts
//!
//! A *component* is any value the container can hold; an *injectable* type
//! additionally carries its identity, its dependency manifest and a
//! zero-argument constructor, which together make it eligible for
//! container-managed construction.

use std::any::Any;
use std::sync::Arc;

use crate::error::{BoxError, ContainerError, DiResult};

/// Type-erased value managed by the container
///
/// Blanket-implemented for every `Any + Send + Sync` type, so both concrete
/// components and capability handles (`Arc<dyn Trait>`, `Arc<Concrete>`) are
/// components.
pub trait Component: Any + Send + Sync {
    /// Borrow as `Any` for downcasting
    fn as_any(&self) -> &dyn Any;
    /// Convert into boxed `Any` for by-value downcasting
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
    /// Convert into an `Arc<dyn Any>` for shared downcasting
    fn as_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;
}

impl<T: Any + Send + Sync> Component for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }

    fn as_any_arc(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }
}

impl dyn Component {
    /// Check whether the erased value is a `T`
    pub fn is<T: Component>(&self) -> bool {
        self.as_any().is::<T>()
    }

    /// Downcast a borrowed component
    pub fn downcast_ref<T: Component>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

/// Extension trait for downcasting shared components
pub trait ArcComponentExt {
    /// Downcast an `Arc<dyn Component>` to a concrete `Arc<T>`
    fn downcast_arc<T: Component>(self) -> Option<Arc<T>>;
}

impl ArcComponentExt for Arc<dyn Component> {
    fn downcast_arc<T: Component>(self) -> Option<Arc<T>> {
        self.as_any_arc().downcast::<T>().ok()
    }
}

/// A declared dependency slot: where to inject, and what capability fills it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dependency {
    /// Name of the slot on the owning component
    pub slot: &'static str,
    /// Capability the slot requires
    pub capability: &'static str,
}

/// Eligibility marker and construction contract for container-managed types
///
/// Implementing this trait marks a type as injectable; registering it with
/// [`ContainerBuilder::register`](crate::ContainerBuilder::register) makes it
/// resolvable. The dependency manifest is declared statically, so the
/// injector never inspects live instances.
///
/// The [`injectable!`](crate::injectable) macro generates the whole impl for
/// `Default` types whose slots are `Option<H>` fields; implement the trait by
/// hand when construction takes more than `Self::default()`.
pub trait Injectable: Component + Sized {
    /// Component identity used by bindings, the cache and error messages
    const NAME: &'static str;

    /// Declared dependency slots, in injection order
    fn manifest() -> &'static [Dependency] {
        &[]
    }

    /// Zero-argument construction; failures are wrapped into
    /// [`ContainerError::Construction`] by the container
    fn construct() -> Result<Self, BoxError>;

    /// Assign a resolved dependency into the named slot
    ///
    /// Called once per manifest entry, in order, with the handle produced by
    /// the slot capability's binding. The default rejects every slot, which
    /// is correct for leaf components with an empty manifest.
    fn assign(&mut self, slot: &str, value: Box<dyn Component>) -> DiResult<()> {
        let _ = value;
        Err(ContainerError::UnknownSlot {
            component: Self::NAME.to_string(),
            slot: slot.to_string(),
        })
    }
}

/// Downcast a slot value to the handle type the slot declares
///
/// Helper for `assign` implementations; failures carry the component and slot
/// names so a mis-matched binding is diagnosable from the error alone.
pub fn downcast_slot<H: Component>(
    component: &'static str,
    slot: &str,
    value: Box<dyn Component>,
) -> DiResult<H> {
    value
        .into_any()
        .downcast::<H>()
        .map(|value| *value)
        .map_err(|_| ContainerError::TypeMismatch {
            request: format!("{}::{}", component, slot),
            expected: std::any::type_name::<H>(),
        })
}

/// Implement [`Injectable`] for a `Default` type with `Option<H>` slot fields
///
/// ```
/// use std::sync::Arc;
/// use wirebox::injectable;
///
/// trait Greeter: Send + Sync {
///     fn greet(&self) -> String;
/// }
///
/// #[derive(Default)]
/// struct EnglishGreeter;
///
/// impl Greeter for EnglishGreeter {
///     fn greet(&self) -> String {
///         "hello".to_string()
///     }
/// }
///
/// injectable!(EnglishGreeter);
///
/// #[derive(Default)]
/// struct Greeting {
///     greeter: Option<Arc<dyn Greeter>>,
/// }
///
/// injectable! {
///     Greeting {
///         greeter: Arc<dyn Greeter> => "Greeter",
///     }
/// }
/// ```
#[macro_export]
macro_rules! injectable {
    ($component:ident) => {
        impl $crate::Injectable for $component {
            const NAME: &'static str = stringify!($component);

            fn construct() -> Result<Self, $crate::BoxError> {
                Ok(<$component as Default>::default())
            }
        }
    };
    ($component:ident { $($slot:ident : $handle:ty => $capability:literal),* $(,)? }) => {
        impl $crate::Injectable for $component {
            const NAME: &'static str = stringify!($component);

            fn manifest() -> &'static [$crate::Dependency] {
                &[$($crate::Dependency {
                    slot: stringify!($slot),
                    capability: $capability,
                }),*]
            }

            fn construct() -> Result<Self, $crate::BoxError> {
                Ok(<$component as Default>::default())
            }

            fn assign(
                &mut self,
                slot: &str,
                value: Box<dyn $crate::Component>,
            ) -> $crate::DiResult<()> {
                match slot {
                    $(stringify!($slot) => {
                        self.$slot = Some($crate::component::downcast_slot::<$handle>(
                            Self::NAME,
                            slot,
                            value,
                        )?);
                        Ok(())
                    })*
                    _ => Err($crate::ContainerError::UnknownSlot {
                        component: Self::NAME.to_string(),
                        slot: slot.to_string(),
                    }),
                }
            }
        }
    };
}
