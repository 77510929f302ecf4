//! Route configuration
//!
//! Centralized route setup; each domain (users, care, friends, reports,
//! admin) manages its own routes.

use crate::handlers;
use crate::middleware::JwtAuthMiddleware;
use actix_web::web;

/// Configure all routes for the application
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .route("/health", web::get().to(handlers::health_check))
            .route("/health/ready", web::get().to(handlers::readiness_check))
            .route("/health/live", web::get().to(handlers::liveness_check))
            .configure(routes::users::configure)
            .configure(routes::care::configure)
            .configure(routes::friends::configure)
            .configure(routes::events::configure)
            .configure(routes::messages::configure)
            .configure(routes::reports::configure)
            .configure(routes::admin::configure),
    );
}

// Sub-modules for each domain
mod routes {
    use super::*;

    pub mod users {
        use super::*;
        pub fn configure(cfg: &mut web::ServiceConfig) {
            cfg.service(
                web::scope("/users/me")
                    .wrap(JwtAuthMiddleware)
                    .route("", web::get().to(handlers::get_current_user))
                    .route("", web::patch().to(handlers::update_profile)),
            )
            .service(
                web::scope("/users").route("/{id}", web::get().to(handlers::get_user)),
            );
        }
    }

    pub mod care {
        use super::*;
        pub fn configure(cfg: &mut web::ServiceConfig) {
            cfg.service(
                web::scope("/care")
                    .wrap(JwtAuthMiddleware)
                    .route("/requests", web::post().to(handlers::send_care_request))
                    .route(
                        "/requests/incoming",
                        web::get().to(handlers::list_incoming_care_requests),
                    )
                    .route(
                        "/requests/outgoing",
                        web::get().to(handlers::list_outgoing_care_requests),
                    )
                    .route(
                        "/requests/{id}/accept",
                        web::post().to(handlers::accept_care_request),
                    )
                    .route(
                        "/requests/{id}/reject",
                        web::post().to(handlers::reject_care_request),
                    )
                    .route(
                        "/requests/{id}",
                        web::delete().to(handlers::cancel_care_request),
                    )
                    .route(
                        "/relationships/as-caregiver",
                        web::get().to(handlers::list_relationships_as_caregiver),
                    )
                    .route(
                        "/relationships/as-recipient",
                        web::get().to(handlers::list_relationships_as_recipient),
                    )
                    .route(
                        "/relationships/{id}/permissions",
                        web::patch().to(handlers::update_relationship_permissions),
                    )
                    .route(
                        "/relationships/{id}/revoke",
                        web::post().to(handlers::revoke_relationship),
                    )
                    .route(
                        "/relationships/{id}",
                        web::delete().to(handlers::delete_relationship),
                    ),
            );
        }
    }

    pub mod friends {
        use super::*;
        pub fn configure(cfg: &mut web::ServiceConfig) {
            cfg.service(
                web::scope("/friends")
                    .wrap(JwtAuthMiddleware)
                    .route("", web::get().to(handlers::list_friends))
                    .route("/requests", web::post().to(handlers::send_friend_request))
                    .route(
                        "/requests/incoming",
                        web::get().to(handlers::list_incoming_friend_requests),
                    )
                    .route(
                        "/requests/{id}/accept",
                        web::post().to(handlers::accept_friend_request),
                    )
                    .route(
                        "/requests/{id}/decline",
                        web::post().to(handlers::decline_friend_request),
                    ),
            );
        }
    }

    pub mod events {
        use super::*;
        pub fn configure(cfg: &mut web::ServiceConfig) {
            cfg.service(
                web::scope("/events")
                    .wrap(JwtAuthMiddleware)
                    .route("", web::post().to(handlers::create_event))
                    .route("/{id}", web::get().to(handlers::get_event)),
            );
        }
    }

    pub mod messages {
        use super::*;
        pub fn configure(cfg: &mut web::ServiceConfig) {
            cfg.service(
                web::scope("/messages")
                    .wrap(JwtAuthMiddleware)
                    .route("", web::post().to(handlers::send_direct_message)),
            )
            .service(
                web::scope("/communities")
                    .wrap(JwtAuthMiddleware)
                    .route(
                        "/{community_id}/messages",
                        web::post().to(handlers::post_community_message),
                    ),
            );
        }
    }

    pub mod reports {
        use super::*;
        pub fn configure(cfg: &mut web::ServiceConfig) {
            cfg.service(
                web::scope("/reports")
                    .wrap(JwtAuthMiddleware)
                    .route("", web::post().to(handlers::create_report))
                    .route("", web::get().to(handlers::list_own_reports))
                    .route("/{id}", web::delete().to(handlers::delete_report)),
            );
        }
    }

    pub mod admin {
        use super::*;
        pub fn configure(cfg: &mut web::ServiceConfig) {
            cfg.service(
                web::scope("/admin")
                    .wrap(JwtAuthMiddleware)
                    .route(
                        "/reports",
                        web::get().to(handlers::list_reports_for_review),
                    )
                    .route(
                        "/reports/{id}",
                        web::get().to(handlers::get_report_for_review),
                    )
                    .route(
                        "/reports/{id}/review",
                        web::post().to(handlers::review_report),
                    )
                    .route("/users/{id}/ban", web::post().to(handlers::ban_user))
                    .route("/users/{id}/ban", web::delete().to(handlers::unban_user))
                    .route(
                        "/actions",
                        web::get().to(handlers::list_moderation_actions),
                    ),
            );
        }
    }
}
