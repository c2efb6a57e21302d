/// Vidshare Server - video-sharing REST backend
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vidshare_core::{CreateUser, CreateVideo, StorageContext};
use vidshare_server::{
    config::ServerConfig, routes::build_router, services::AuthService, state::AppState,
};
use vidshare_storage::LocalStorageContext;

#[derive(Parser)]
#[command(name = "vidshare-server")]
#[command(about = "Vidshare video-sharing REST backend", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Configuration file path
        #[arg(short, long, env = "VIDSHARE_CONFIG")]
        config: Option<PathBuf>,
    },
    /// Create a new user
    AddUser {
        /// Username
        #[arg(short, long)]
        username: String,
        /// Password
        #[arg(short, long)]
        password: String,
        /// Display name (defaults to the username)
        #[arg(long)]
        full_name: Option<String>,
        /// Avatar URL
        #[arg(long)]
        avatar: Option<String>,
    },
    /// List all users
    ListUsers,
    /// Register a video for an existing user
    AddVideo {
        /// Username of the channel owner
        #[arg(short, long)]
        owner: String,
        /// Video title
        #[arg(short, long)]
        title: String,
        /// Video description
        #[arg(short, long, default_value = "")]
        description: String,
        /// Keep the video unpublished
        #[arg(long)]
        unpublished: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vidshare_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => {
            serve(config).await?;
        }
        Commands::AddUser {
            username,
            password,
            full_name,
            avatar,
        } => {
            add_user(username, &password, full_name, avatar).await?;
        }
        Commands::ListUsers => {
            list_users().await?;
        }
        Commands::AddVideo {
            owner,
            title,
            description,
            unpublished,
        } => {
            add_video(&owner, title, description, !unpublished).await?;
        }
    }

    Ok(())
}

async fn serve(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    // Load configuration
    let config = ServerConfig::load_from(config_path.as_deref())?;
    config.validate()?;

    tracing::info!("Starting Vidshare Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    // Initialize database
    let db = open_storage(&config).await?;
    tracing::info!("Database connected");

    // Initialize auth service
    let auth_service = Arc::new(auth_service(&config));
    tracing::info!("Auth service initialized");

    // Build application state
    let app_state = AppState::new(Arc::new(db), auth_service, config.pagination);

    // Route table problems are fatal before the listener binds
    let app = build_router(app_state, config.server.request_timeout())
        .context("Invalid route table")?;

    // Create server address
    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received");
}

async fn open_storage(config: &ServerConfig) -> anyhow::Result<LocalStorageContext> {
    let pool = vidshare_storage::create_pool(&config.storage.database_url).await?;
    vidshare_storage::run_migrations(&pool).await?;
    Ok(LocalStorageContext::new(pool))
}

fn auth_service(config: &ServerConfig) -> AuthService {
    AuthService::new(
        config.auth.jwt_secret.clone(),
        config.auth.jwt_expiration_hours,
        config.auth.jwt_refresh_expiration_days,
    )
}

async fn add_user(
    username: String,
    password: &str,
    full_name: Option<String>,
    avatar: Option<String>,
) -> anyhow::Result<()> {
    let username = username.trim().to_string();
    anyhow::ensure!(!username.is_empty(), "Username must not be empty");
    anyhow::ensure!(!password.is_empty(), "Password must not be empty");

    let config = ServerConfig::load()?;
    let db = open_storage(&config).await?;

    let password_hash = auth_service(&config).hash_password(password)?;
    let user = db
        .create_user(
            CreateUser {
                full_name: full_name.unwrap_or_else(|| username.clone()),
                username,
                avatar,
            },
            &password_hash,
        )
        .await?;

    tracing::info!("Created user {}", user.username);
    println!("Created user {} ({})", user.username, user.id);

    Ok(())
}

async fn list_users() -> anyhow::Result<()> {
    let config = ServerConfig::load()?;
    let db = open_storage(&config).await?;

    let users = db.get_all_users().await?;

    println!("Users:");
    for user in users {
        println!("  {} - {} ({})", user.id, user.username, user.full_name);
    }

    Ok(())
}

async fn add_video(
    owner: &str,
    title: String,
    description: String,
    is_published: bool,
) -> anyhow::Result<()> {
    let config = ServerConfig::load()?;
    let db = open_storage(&config).await?;

    let owner = db
        .get_user_by_username(owner)
        .await?
        .with_context(|| format!("No user named {owner}"))?;

    let video = db
        .create_video(CreateVideo {
            owner_id: owner.id,
            title,
            description,
            is_published,
        })
        .await?;

    println!("Created video {} ({})", video.title, video.id);

    Ok(())
}
