use std::path::PathBuf;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, request},
    middleware,
    routing::{delete, get, post, put},
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use inkpress_adapters::{AllowedOrigins, TokenIssuer};
use inkpress_axum::{UploadLimit, extract, routes};
use inkpress_core::{MediaStore, PostStore, UserStore};

use crate::telemetry::{make_span_with_request_id, on_request, on_response};

/// The assembled blogging backend: `/admin` auth surface, `/blog` post
/// surface, plus read-only static serving of the media directory.
pub struct BlogService {
    router: Router,
}

impl BlogService {
    /// Wire stores and the token issuer into the route table.
    ///
    /// Every protected route sits behind the access-token guard; the refresh
    /// endpoint sits behind the refresh-token variant of the same guard.
    /// Stores implement `Clone` via an internal pool/`Arc`, so each route is
    /// handed exactly the state it needs.
    pub fn new<U, P, M>(
        user_store: U,
        post_store: P,
        media_store: M,
        tokens: TokenIssuer,
        upload_limit: UploadLimit,
        media_dir: Option<PathBuf>,
    ) -> Self
    where
        U: UserStore + Clone + 'static,
        P: PostStore + Clone + 'static,
        M: MediaStore + Clone + 'static,
    {
        let access_guard = middleware::from_fn_with_state(
            (user_store.clone(), tokens.clone()),
            extract::require_access::<U>,
        );
        let refresh_guard = middleware::from_fn_with_state(
            (user_store.clone(), tokens.clone()),
            extract::require_refresh::<U>,
        );

        let admin_public = Router::new()
            .route("/register/", post(routes::register::<U>))
            .with_state(user_store.clone())
            .route("/login/", post(routes::login::<U>))
            .with_state((user_store.clone(), tokens.clone()));

        let admin_protected = Router::new()
            .route("/update/", put(routes::update_profile::<U>))
            .route("/change_password/", put(routes::change_password::<U>))
            .with_state(user_store.clone())
            .route("/delete/", delete(routes::delete_account::<U, P>))
            .with_state((user_store.clone(), post_store.clone()))
            .route_layer(access_guard.clone());

        let admin_refresh = Router::new()
            .route("/refresh/", post(routes::refresh))
            .with_state(tokens.clone())
            .route_layer(refresh_guard);

        let blog = Router::new()
            // The per-file cap is enforced while the multipart stream is
            // read, so the framework-level body limit steps aside here.
            .route(
                "/create_post/",
                post(routes::create_post::<P, M>).layer(DefaultBodyLimit::disable()),
            )
            .with_state((post_store.clone(), media_store.clone(), upload_limit))
            .route("/update_post/{post_id}/", put(routes::update_post::<P>))
            .route("/delete_post/{post_id}/", delete(routes::delete_post::<P>))
            .route("/show_my_posts/", get(routes::show_my_posts::<P>))
            .route("/find_post/", get(routes::find_posts::<P>))
            .with_state(post_store)
            .route("/download_file/{file_name}/", get(routes::download_file::<M>))
            .with_state(media_store)
            .route_layer(access_guard);

        let mut router = Router::new()
            .nest("/admin", admin_public.merge(admin_protected).merge(admin_refresh))
            .nest("/blog", blog);

        if let Some(media_dir) = media_dir {
            router = router.nest_service("/media", ServeDir::new(media_dir));
        }

        Self { router }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Finish the router, optionally restricting cross-origin callers.
    pub fn into_router(mut self, allowed_origins: Option<AllowedOrigins>) -> Router {
        if let Some(allowed_origins) = allowed_origins {
            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_credentials(true)
                .allow_origin(AllowOrigin::predicate(
                    move |origin: &HeaderValue, _request_parts: &request::Parts| {
                        origin
                            .to_str()
                            .map(|origin| allowed_origins.contains(origin))
                            .unwrap_or(false)
                    },
                ));

            self.router = self.router.layer(cors);
        }
        self.with_trace_layer().router
    }

    /// Run the blog service as a standalone server.
    pub async fn run_standalone(
        self,
        listener: TcpListener,
        allowed_origins: Option<AllowedOrigins>,
    ) -> Result<(), std::io::Error> {
        let router = self.into_router(allowed_origins);

        tracing::info!("Blog service listening on {}", listener.local_addr()?);

        axum::serve(listener, router).await
    }
}
