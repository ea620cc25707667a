use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;

use inkpress::{
    BlogService, FsMediaStore, PostgresPostStore, PostgresUserStore, Settings, TokenIssuer,
    UploadLimit, init_tracing,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    color_eyre::install().expect("Failed to install color_eyre");
    init_tracing().expect("Failed to initialize tracing");

    // Load configuration
    let settings = Settings::load()?;

    // Setup database connection pool
    let pg_pool = PgPoolOptions::new()
        .max_connections(settings.database.max_connections)
        .connect(settings.database.url.expose_secret())
        .await?;

    // Run migrations
    sqlx::migrate!().run(&pg_pool).await?;

    // Create stores
    let user_store = PostgresUserStore::new(pg_pool.clone());
    let post_store = PostgresPostStore::new(pg_pool);
    let media_store = FsMediaStore::create(
        settings.media.root.clone(),
        settings.media.public_url.clone(),
    )
    .await?;

    // Create the token issuer
    let tokens = TokenIssuer::new(settings.auth.token_config()?);

    // Create the blog service using the library
    let blog_service = BlogService::new(
        user_store,
        post_store,
        media_store,
        tokens,
        UploadLimit(settings.media.max_file_size),
        Some(settings.media.root.clone()),
    );

    let listener = tokio::net::TcpListener::bind((
        settings.application.host.as_str(),
        settings.application.port,
    ))
    .await?;
    tracing::info!("Starting blog service...");

    blog_service
        .run_standalone(listener, settings.application.allowed_origins())
        .await?;

    Ok(())
}
