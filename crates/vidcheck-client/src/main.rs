use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vidcheck_client::captcha::CaptchaChallenge;
use vidcheck_client::config::{ClientConfig, StorageLocation};
use vidcheck_client::error::ClientError;
use vidcheck_client::network::{ApiService, FailureContext, NetworkClient, handle_error};
use vidcheck_client::state::AuthService;
use vidcheck_client::ui::{AuthForms, LoginForm, PageState, SignupForm};
use vidcheck_protocol::{LoginRequest, SignupRequest};

/// vidcheck - client for the video-check backend
#[derive(Parser, Debug)]
#[command(name = "vidcheck")]
#[command(version, about, long_about = None)]
struct Cli {
    /// API origin, e.g. http://localhost:8000/
    #[arg(long, env = "VIDCHECK_API_URL")]
    api_url: Option<String>,

    /// Local storage file
    #[arg(long)]
    storage: Option<PathBuf>,

    /// Keep the session in memory only
    #[arg(long)]
    in_memory: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Log in and store the session token
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
    },

    /// Create an account
    Signup {
        #[arg(long)]
        email: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        password: String,
        /// Defaults to the password
        #[arg(long)]
        password_confirm: Option<String>,
        /// Token from `vidcheck captcha`
        #[arg(long, requires = "captcha_code")]
        captcha_token: Option<String>,
        /// Code shown on the captcha image
        #[arg(long, requires = "captcha_token")]
        captcha_code: Option<String>,
    },

    /// Log out and wipe local storage
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Exchange the stored refresh cookie for a new access token
    Refresh,

    /// Check that the backend is up
    Health,

    /// Generate a captcha challenge
    Captcha {
        /// Save the captcha image here
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Submit a form the way the web page does
    #[command(subcommand)]
    Form(FormCommand),

    /// Raw request against the API
    #[command(subcommand)]
    Raw(RawCommand),

    /// Video checks
    #[command(subcommand)]
    Checks(ChecksCommand),

    /// Inspect local storage
    #[command(subcommand)]
    Session(SessionCommand),
}

#[derive(Subcommand, Debug)]
enum FormCommand {
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    Signup {
        #[arg(long)]
        email: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        repeat_password: String,
    },
    Logout,
}

#[derive(Subcommand, Debug)]
enum RawCommand {
    Get { path: String },
    Post { path: String, body: String },
    Put { path: String, body: String },
}

#[derive(Subcommand, Debug)]
enum ChecksCommand {
    /// Start a background check
    Start,
    /// Background worker state
    Status,
    /// Videos waiting for a decision
    List,
    Ignore { video_id: String },
    Download { video_id: String, platform: String },
}

#[derive(Subcommand, Debug)]
enum SessionCommand {
    Show,
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vidcheck=info,vidcheck_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let mut config = ClientConfig::load();
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }
    if cli.in_memory {
        config.storage = StorageLocation::InMemory;
    } else if let Some(path) = cli.storage {
        config.storage = StorageLocation::File(path);
    }

    tracing::debug!("Using API at {}", config.api_url);

    let api = ApiService::new(&config.api_url)?;
    let auth = AuthService::new(config.open_storage());
    let client = NetworkClient::new(api, auth);

    let result = run(cli.command, &client).await;

    // Failures go through the same classifier the form handlers use
    if let Err(ClientError::Api(e)) = &result {
        handle_error(&FailureContext::from(e));
        if let Some(body) = e.error_body() {
            eprintln!("{} [{}]", body.detail, body.code);
        }
    }

    result.context("Request failed")
}

async fn run(command: Commands, client: &NetworkClient) -> vidcheck_client::error::Result<()> {
    match command {
        Commands::Login { username, password } => {
            let user = client.login(&LoginRequest { username, password }).await?;
            println!("Logged in as {} <{}>", user.name, user.email);
        }
        Commands::Signup {
            email,
            name,
            password,
            password_confirm,
            captcha_token,
            captcha_code,
        } => {
            let confirm = password_confirm.unwrap_or_else(|| password.clone());
            let mut request = SignupRequest::new(&email, &name, &password, &confirm);
            if let (Some(token), Some(code)) = (captcha_token, captcha_code) {
                request = request.with_captcha(&token, &code);
            }
            let user = client.signup(&request).await?;
            println!("Created account {} ({})", user.email, user.id);
        }
        Commands::Logout => {
            let response = client.logout().await?;
            println!("Logged out: {}", response.status);
        }
        Commands::Whoami => {
            let user = client.me().await?;
            print_json(&serde_json::to_value(user)?)?;
        }
        Commands::Refresh => {
            client.refresh().await?;
            println!("Access token refreshed");
        }
        Commands::Health => {
            let health = client.health().await?;
            println!("{}", health.message);
        }
        Commands::Captcha { out } => {
            let challenge = CaptchaChallenge::new();
            let (field, token) = challenge.form_field();
            println!("{}: {}", field, token);
            println!("image: {}", challenge.image_url(client.api()));

            if let Some(out) = out {
                let image = challenge.fetch_image(client.api()).await?;
                std::fs::write(&out, image)?;
                println!("saved: {}", out.display());
            }
        }
        Commands::Form(form) => run_form(form, client).await,
        Commands::Raw(raw) => {
            let response = match raw {
                RawCommand::Get { path } => client.api().get(&path).await?,
                RawCommand::Post { path, body } => {
                    let body: Value = serde_json::from_str(&body)?;
                    client.api().post(&path, &body).await?
                }
                RawCommand::Put { path, body } => {
                    let body: Value = serde_json::from_str(&body)?;
                    client.api().put(&path, &body).await?
                }
            };
            print_json(&response)?;
        }
        Commands::Checks(checks) => match checks {
            ChecksCommand::Start => {
                println!("{}", client.start_check().await?.message);
            }
            ChecksCommand::Status => {
                print_json(&client.check_status().await?)?;
            }
            ChecksCommand::List => {
                let list = client.pending_checks().await?;
                if list.videos.is_empty() {
                    println!("No pending videos");
                }
                for video in list.videos {
                    println!(
                        "{}\t{}\t{:>8.1}s\t{}",
                        video.platform, video.video_id, video.duration, video.title
                    );
                }
            }
            ChecksCommand::Ignore { video_id } => {
                println!("{}", client.ignore_video(&video_id).await?.result);
            }
            ChecksCommand::Download { video_id, platform } => {
                println!("{}", client.download_video(&video_id, &platform).await?.result);
            }
        },
        Commands::Session(session) => match session {
            SessionCommand::Show => {
                let auth = client.auth();
                match auth.storage().path() {
                    Some(path) => println!("storage: {}", path.display()),
                    None => println!("storage: in memory"),
                }
                println!("keys: {}", auth.storage().keys().join(", "));
                println!("logged in: {}", auth.is_logged_in());
                match auth.get_user() {
                    Some(user) => println!("user: {} <{}>", user.name, user.email),
                    None => print_json(&auth.get_user_details())?,
                }
            }
            SessionCommand::Clear => {
                client.auth().clear_storage();
                if client.auth().storage().is_empty() {
                    println!("Local storage cleared");
                }
            }
        },
    }

    Ok(())
}

/// Form handlers report their own failures; the command itself always succeeds
async fn run_form(command: FormCommand, client: &NetworkClient) {
    let forms = AuthForms::new(client.api().clone(), PageState::new());

    let outcome = match command {
        FormCommand::Login { email, password } => {
            forms
                .handle_login_clicked(&LoginForm { email, password })
                .await
        }
        FormCommand::Signup {
            email,
            name,
            password,
            repeat_password,
        } => {
            forms
                .handle_signup_clicked(&SignupForm {
                    email,
                    name,
                    password,
                    repeat_password,
                    ..Default::default()
                })
                .await
        }
        FormCommand::Logout => forms.handle_logout_clicked().await,
    };

    if outcome.is_success() {
        client.save_cookies();
        println!("outcome: success");
    } else {
        println!("outcome: {:?}", outcome);
    }
    println!("login form visible: {}", forms.page().is_login_form_visible().await);
    println!("signup form visible: {}", forms.page().is_signup_form_visible().await);
    println!("reload: {:?}", forms.page().take_reload().await);
}

fn print_json(value: &Value) -> vidcheck_client::error::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
