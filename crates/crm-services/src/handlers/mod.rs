//! Generic command and query handlers
//!
//! Every entity shares the same handler shapes; only the repository and
//! the entity type differ.

/// Declares a handler struct holding one repository
macro_rules! repository_handler {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        pub struct $name<T, R: ?Sized> {
            repository: ::std::sync::Arc<R>,
            _entity: ::std::marker::PhantomData<fn() -> T>,
        }

        impl<T, R: ?Sized> $name<T, R> {
            pub fn new(repository: ::std::sync::Arc<R>) -> Self {
                Self {
                    repository,
                    _entity: ::std::marker::PhantomData,
                }
            }
        }
    };
}

mod commands;
mod queries;

pub use commands::{CreateHandler, DeleteHandler, UpdateHandler};
pub use queries::{
    GetAllHandler, GetByIdHandler, GetByNameHandler, GetDefaultHandler, GetPagedHandler,
    GetTotalHandler,
};
