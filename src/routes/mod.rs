use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::handlers::{auth, bookings, cars, profile};
use crate::middleware::auth::auth_middleware;
use crate::middleware::rate_limit::create_public_governor;
use crate::middleware::user_rate_limit::create_user_governor;
use crate::AppState;

pub fn create_router(state: AppState) -> Router {
    let public_governor = create_public_governor();

    // Public routes (rate limited per IP)
    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .layer(public_governor.clone());

    let session_routes = Router::new()
        .route("/session", get(auth::session))
        .route("/logout", post(auth::logout))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    let catalog_routes = Router::new()
        .route("/", get(cars::list_cars))
        .route("/featured", get(cars::featured_cars))
        .route("/{id}", get(cars::get_car))
        .route("/{id}/quote", get(cars::quote))
        .layer(public_governor);

    // Authenticated routes (rate limited per user)
    let booking_routes = Router::new()
        .route("/", post(bookings::create_booking).get(bookings::my_bookings))
        .route("/{id}/cancel", post(bookings::cancel_booking))
        .layer(create_user_governor())
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    let profile_routes = Router::new()
        .route("/", get(profile::get_profile).patch(profile::update_profile))
        .layer(create_user_governor())
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .nest("/api/auth", auth_routes.merge(session_routes))
        .nest("/api/cars", catalog_routes)
        .nest("/api/bookings", booking_routes)
        .nest("/api/profile", profile_routes)
        .with_state(state)
}
