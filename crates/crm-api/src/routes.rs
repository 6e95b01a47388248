//! API routes

use axum::{routing::get, Router};
use crm_core::Defaultable;
use crm_models::{
    AccountType, Activity, ActivityStatus, Company, Invoice, InvoiceStatus, Named, Payment,
    PaymentMethod, Product, Profile, Quote, Role, SalesOrder, ServiceType, Team, User,
};

use crate::error::handle_errors;
use crate::handlers;
use crate::state::AppState;

/// Create the complete API router
pub fn router() -> Router<AppState> {
    Router::new().nest("/api", api_router())
}

/// API router with error handling, bound to `state`
pub fn app(state: AppState) -> Router {
    let environment = state.config.environment;
    handle_errors(router(), environment).with_state(state)
}

fn api_router() -> Router<AppState> {
    Router::new()
        .nest("/companies", crud::<Company>().merge(named::<Company>()))
        .nest("/activities", crud::<Activity>())
        .nest(
            "/invoices",
            crud::<Invoice>().route("/total/company/:id", get(handlers::get_total::<Invoice>)),
        )
        .nest(
            "/payments",
            crud::<Payment>().route("/total/invoice/:id", get(handlers::get_total::<Payment>)),
        )
        .nest("/quotes", crud::<Quote>())
        .nest(
            "/sales-orders",
            crud::<SalesOrder>()
                .route("/total/company/:id", get(handlers::get_total::<SalesOrder>)),
        )
        .nest("/products", crud::<Product>().merge(named::<Product>()))
        .nest("/roles", crud::<Role>().merge(named::<Role>()))
        .nest("/teams", crud::<Team>().merge(named::<Team>()))
        .nest("/users", crud::<User>().merge(named::<User>()))
        .nest("/account-types", lookup::<AccountType>())
        .nest("/activity-statuses", lookup::<ActivityStatus>())
        .nest("/invoice-statuses", lookup::<InvoiceStatus>())
        .nest("/payment-methods", lookup::<PaymentMethod>())
        .nest("/service-types", lookup::<ServiceType>())
}

fn crud<T: Profile>() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::get_all::<T>).post(handlers::create::<T>))
        .route("/paged", get(handlers::get_paged::<T>))
        .route(
            "/:id",
            get(handlers::get_by_id::<T>)
                .put(handlers::update::<T>)
                .delete(handlers::delete::<T>),
        )
}

fn named<T: Profile + Named>() -> Router<AppState> {
    Router::new().route("/by-name/:name", get(handlers::get_by_name::<T>))
}

fn lookup<T: Profile + Defaultable>() -> Router<AppState> {
    crud::<T>().route("/default", get(handlers::get_default::<T>))
}
