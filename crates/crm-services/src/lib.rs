//! # crm-services
//!
//! Request pipeline for CRM RS.
//!
//! A request goes through the [`Mediator`]: every contract registered for its
//! type runs first, then its single handler performs one repository call and
//! maps the result to DTOs.

pub mod features;
pub mod handler;
pub mod handlers;
pub mod mediator;

pub use features::register_features;
pub use handler::RequestHandler;
pub use mediator::Mediator;
