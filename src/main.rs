use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use student_info::client::StudentInfoClient;
use student_info::config::ServerConfig;
use student_info::view::{self, Browser, Resource};
use student_info::{api, db};

#[derive(Parser)]
#[command(name = "student-info")]
#[command(about = "Student, course and department information service")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Address to bind
        #[arg(long)]
        host: Option<String>,

        /// Port for HTTP API
        #[arg(short, long)]
        port: Option<u16>,

        /// SQLite database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },
    /// Insert demo departments, courses and students
    Seed {
        /// Number of students to create
        #[arg(short, long, default_value = "25")]
        students: usize,

        /// SQLite database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },
    /// Fetch a resource from a running server and print it as a table
    Browse {
        /// students, courses or departments
        #[arg(default_value = "students")]
        resource: Resource,

        /// Page of students to show
        #[arg(long, default_value = "1")]
        page: u32,

        /// API base URL (overrides STUDENT_INFO_URL)
        #[arg(long)]
        url: Option<String>,
    },
    /// Check server status
    Status {
        /// API base URL (overrides STUDENT_INFO_URL)
        #[arg(long)]
        url: Option<String>,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "student_info=debug,tower_http=debug".into()),
    );

    // stdout is reserved for command output
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn open_database(path: Option<PathBuf>) -> anyhow::Result<db::Database> {
    let db = match path {
        Some(path) => db::Database::open(path)?,
        None => db::Database::open_default()?,
    };
    db.migrate()?;
    Ok(db)
}

fn client_for(url: Option<String>) -> StudentInfoClient {
    url.map(StudentInfoClient::new)
        .unwrap_or_else(StudentInfoClient::from_env)
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let db = open_database(config.database_path.clone())?;
    let app = api::create_router_with_config(db, &config);

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    tracing::info!(
        "Student info server listening on http://{}/api",
        listener.local_addr()?
    );

    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let mut config = ServerConfig::from_env();

    match cli.command {
        Some(Commands::Serve {
            host,
            port,
            database,
        }) => {
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            if database.is_some() {
                config.database_path = database;
            }
            serve(config).await?;
        }
        Some(Commands::Seed { students, database }) => {
            let db = open_database(database.or(config.database_path))?;
            let summary = db.seed_demo(students)?;
            println!(
                "Seeded {} departments, {} courses, {} students and {} enrollments",
                summary.departments, summary.courses, summary.students, summary.enrollments
            );
        }
        Some(Commands::Browse {
            resource,
            page,
            url,
        }) => {
            let mut browser = Browser::new(client_for(url));
            let state = match resource {
                Resource::Students => browser.open_students_page(page).await,
                other => browser.select_tab(other).await,
            };
            print!("{}", view::render(state));
        }
        Some(Commands::Status { url }) => {
            let client = client_for(url);
            match client.health().await {
                Ok(_) => println!("Server at {} is up", client.base_url()),
                Err(e) => {
                    println!("Server at {} is unreachable: {}", client.base_url(), e);
                    std::process::exit(1);
                }
            }
        }
        None => serve(config).await?,
    }

    Ok(())
}
