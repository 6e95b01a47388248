//! Mediator
//!
//! Dispatches a request to the contracts and handler registered for its type.

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use crm_contracts::Contract;
use crm_core::{CrmError, CrmResult, ValidationErrors};
use crm_models::Request;
use tokio_util::sync::CancellationToken;

use crate::handler::RequestHandler;

struct Registration<Q: Request> {
    validators: Vec<Arc<dyn Contract<Q>>>,
    handler: Option<Arc<dyn RequestHandler<Q>>>,
}

impl<Q: Request> Default for Registration<Q> {
    fn default() -> Self {
        Self {
            validators: Vec::new(),
            handler: None,
        }
    }
}

#[derive(Default)]
pub struct Mediator {
    registrations: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl Mediator {
    pub fn new() -> Self {
        Self::default()
    }

    fn entry<Q: Request>(&mut self) -> &mut Registration<Q> {
        let slot = self
            .registrations
            .entry(TypeId::of::<Q>())
            .or_insert_with(|| Box::new(Registration::<Q>::default()));

        match slot.downcast_mut::<Registration<Q>>() {
            Some(registration) => registration,
            // Keyed by TypeId, so the slot always holds Registration<Q>
            None => unreachable!("registration stored under the wrong type"),
        }
    }

    /// Set the handler for `Q`, replacing any previous one
    pub fn register<Q, H>(&mut self, handler: H) -> &mut Self
    where
        Q: Request,
        H: RequestHandler<Q> + 'static,
    {
        self.entry::<Q>().handler = Some(Arc::new(handler));
        self
    }

    /// Add a contract for `Q`. Contracts run in registration order.
    pub fn validate_with<Q, C>(&mut self, contract: C) -> &mut Self
    where
        Q: Request,
        C: Contract<Q> + 'static,
    {
        self.entry::<Q>().validators.push(Arc::new(contract));
        self
    }

    /// Whether a handler is registered for `Q`
    pub fn handles<Q: Request>(&self) -> bool {
        self.registrations
            .get(&TypeId::of::<Q>())
            .and_then(|slot| slot.downcast_ref::<Registration<Q>>())
            .map(|registration| registration.handler.is_some())
            .unwrap_or(false)
    }

    /// Validate `request` with every registered contract, then hand it to its handler
    pub async fn send<Q: Request>(&self, request: Q, token: &CancellationToken) -> CrmResult<Q::Response> {
        let registration = self
            .registrations
            .get(&TypeId::of::<Q>())
            .and_then(|slot| slot.downcast_ref::<Registration<Q>>());

        let Some(handler) = registration.and_then(|r| r.handler.clone()) else {
            tracing::error!(request = type_name::<Q>(), "No handler registered");
            return Err(CrmError::internal(format!(
                "No handler registered for {}",
                type_name::<Q>()
            )));
        };

        if let Some(registration) = registration {
            let mut errors = ValidationErrors::new();
            for validator in &registration.validators {
                if let Err(found) = validator.validate(&request) {
                    errors.merge(found);
                }
            }
            if !errors.is_empty() {
                tracing::warn!(request = type_name::<Q>(), errors = %errors, "Validation failed");
                return Err(CrmError::Validation(errors));
            }
        }

        handler.handle(request, token).await
    }
}
