//! Parameter auto-wiring.
//!
//! [`Container::invoke`] calls a function whose parameters are all
//! resolvable from the type registry:
//!
//! ```rust,ignore
//! container.invoke(|db: Arc<Database>, users: Arc<UserService>| {
//!     users.migrate(&db)
//! })?;
//! ```
//!
//! Parameters are resolved left to right with the same exact-then-bare-name
//! strategy as [`Typed`]. The first one that cannot be resolved aborts the
//! call with [`InjectorError::MissingParameter`]. If the function returns a
//! `Result`, its error becomes [`InjectorError::Invocation`].

use std::any::type_name;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::container::Container;
use crate::error::{InjectorError, Result};
use crate::typed::Typed;

/// A value an invoked function can take as a parameter.
pub trait FromContainer: Sized {
    /// Resolve the parameter at zero-based `position`.
    fn from_container(container: &Container, position: usize) -> Result<Self>;
}

impl<T: Send + Sync + 'static> FromContainer for Arc<T> {
    fn from_container(container: &Container, position: usize) -> Result<Self> {
        Typed::<T>::new(container).resolve().map_err(|err| match err {
            InjectorError::NotFoundForType(_) => InjectorError::MissingParameter {
                type_name: type_name::<T>(),
                position,
            },
            other => other,
        })
    }
}

/// Optional parameter: `None` when nothing is registered for `T`.
impl<T: Send + Sync + 'static> FromContainer for Option<Arc<T>> {
    fn from_container(container: &Container, _position: usize) -> Result<Self> {
        match Typed::<T>::new(container).resolve() {
            Ok(value) => Ok(Some(value)),
            Err(InjectorError::NotFoundForType(_)) => Ok(None),
            Err(err) => Err(err),
        }
    }
}

/// What an invoked function may return.
pub trait InvokeOutput {
    fn into_result(self) -> Result<()>;
}

impl InvokeOutput for () {
    #[inline]
    fn into_result(self) -> Result<()> {
        Ok(())
    }
}

/// A trailing error is propagated; a successful value is discarded.
impl<T, E> InvokeOutput for std::result::Result<T, E>
where
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    #[inline]
    fn into_result(self) -> Result<()> {
        self.map(|_| ()).map_err(|err| InjectorError::Invocation(err.into()))
    }
}

/// A function that can be called with parameters taken from a container.
///
/// Implemented for every `FnOnce` of up to eight [`FromContainer`]
/// parameters whose output implements [`InvokeOutput`].
pub trait Injectable<Args> {
    fn call_with(self, container: &Container) -> Result<()>;
}

macro_rules! define_injectable ({ $($param:ident)* } => {
    impl<Func, Out, $($param,)*> Injectable<($($param,)*)> for Func
    where
        Func: FnOnce($($param),*) -> Out,
        Out: InvokeOutput,
        $($param: FromContainer,)*
    {
        #[inline]
        #[allow(non_snake_case, unused_mut, unused_variables, unused_assignments)]
        fn call_with(self, container: &Container) -> Result<()> {
            let mut position = 0;
            $(
                let $param = <$param as FromContainer>::from_container(container, position)?;
                position += 1;
            )*
            (self)($($param),*).into_result()
        }
    }
});

define_injectable! {}
define_injectable! { T1 }
define_injectable! { T1 T2 }
define_injectable! { T1 T2 T3 }
define_injectable! { T1 T2 T3 T4 }
define_injectable! { T1 T2 T3 T4 T5 }
define_injectable! { T1 T2 T3 T4 T5 T6 }
define_injectable! { T1 T2 T3 T4 T5 T6 T7 }
define_injectable! { T1 T2 T3 T4 T5 T6 T7 T8 }

impl Container {
    /// Call `func` with its parameters resolved from the type registry.
    ///
    /// # Errors
    /// - [`InjectorError::MissingParameter`] for the first parameter
    ///   that is not registered; `func` is not called.
    /// - [`InjectorError::TypeMismatch`] if a bare-name match has the
    ///   wrong type.
    /// - [`InjectorError::Invocation`] if `func` returns an error.
    #[instrument(skip_all, fields(func = type_name::<F>()))]
    pub fn invoke<F, Args>(&self, func: F) -> Result<()>
    where
        F: Injectable<Args>,
    {
        debug!("Invoking with auto-wired parameters");
        func.call_with(self)
    }
}
