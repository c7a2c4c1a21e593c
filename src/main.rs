use anyhow::Context;
use clap::{Parser, Subcommand};
use twitter_rest::{
    ApiClient, Entity, PageOptions, SearchOptions, Settings, TimelineOptions, UserRef,
};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Read-only access to the Twitter REST API v1.1
#[derive(Parser, Debug)]
#[command(name = "twitter-rest", version = VERSION)]
struct Cli {
    /// Settings file; `twitter-rest.toml` in the working directory otherwise
    #[arg(long, short)]
    config: Option<std::path::PathBuf>,

    /// Number of statuses to request
    #[arg(long)]
    count: Option<u32>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Home timeline of the authenticating user
    Home,
    /// Profile of a user
    User { screen_name: String },
    /// Recent statuses of a user
    Timeline { screen_name: String },
    /// Search recent statuses
    Search { term: String },
    /// Trending topics, worldwide unless a WOEID is given
    Trends { woeid: Option<i64> },
    /// Screen names of everyone a user follows
    Friends { screen_name: String },
    /// Rate limit status of the application
    Limits,
    /// The authenticating user
    Whoami,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let result = run(cli).await;
    if let Err(err) = &result {
        eprintln!("{:#}", err);
    }

    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = match &cli.config {
        Some(path) => Settings::from_file(path.clone()),
        None => Settings::load(),
    }
    .context("could not load settings")?;
    let client = ApiClient::new(settings.into_client_config()?)
        .context("could not create the API client")?;

    let timeline = TimelineOptions {
        count: cli.count.map(Into::into),
        ..TimelineOptions::default()
    };

    match cli.command {
        Command::Home => print_all(&client.home_timeline(&timeline).await?),
        Command::User { screen_name } => {
            let user = client
                .user(&UserRef::screen_name(screen_name), None)
                .await?;
            println!("{}", user.to_json());
        }
        Command::Timeline { screen_name } => {
            let user = UserRef::screen_name(screen_name);
            print_all(&client.user_timeline(Some(&user), &timeline).await?);
        }
        Command::Search { term } => {
            let opts = SearchOptions {
                term: Some(term),
                count: cli.count.map(Into::into),
                ..SearchOptions::default()
            };
            print_all(&client.search(&opts).await?);
        }
        Command::Trends { woeid } => {
            let trends = match woeid {
                Some(woeid) => client.trends_woeid(woeid, None).await?,
                None => client.trends_current(None).await?,
            };
            print_all(&trends);
        }
        Command::Friends { screen_name } => {
            let user = UserRef::screen_name(screen_name);
            let mut pages = client.friends(Some(&user), &PageOptions::default())?;
            while let Some(page) = pages.next_page().await? {
                for friend in page {
                    println!("{}", friend.screen_name.unwrap_or_default());
                }
            }
        }
        Command::Limits => {
            let status = client.rate_limit_status(None).await?;
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
        Command::Whoami => match client.verify_credentials().await? {
            Some(user) => println!("{}", user.to_json()),
            None => anyhow::bail!("the configured credentials were rejected"),
        },
    }

    Ok(())
}

fn print_all<T: Entity>(items: &[T]) {
    for item in items {
        println!("{}", item.to_json());
    }
}
