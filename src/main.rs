//! Fleet Admin Console
//!
//! Command-line admin console for the fleet reservation REST API. Every
//! command opens a console page through the route guard, so dashboard pages
//! require a signed-in session.

mod api;
mod config;
mod errors;
mod models;
mod pages;
mod routes;
mod session;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use api::ApiClient;
use config::{Config, LogFormat};
use models::{ImageUpload, TeamRole};
use pages::{
    ChangePasswordForm, ChangePasswordPage, ContactForm, EditorMode, ExtraForm, LoginForm,
    Notifier, SubmitOutcome, TeamEditor, TerminalNotifier,
};
use routes::{Resolution, RouteGuard, ROUTES};
use session::{FileSessionStore, SessionContext};

/// Fleet admin console
#[derive(Parser)]
#[command(name = "fleet-admin")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign in and store the access token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the stored access token
    Logout,
    /// List the console's routes
    Routes,
    /// Resolve a path through the route guard
    Open { path: String },
    /// Change the signed-in user's password
    ChangePassword {
        #[arg(long)]
        current: String,
        #[arg(long)]
        new: String,
        #[arg(long)]
        confirm: String,
    },
    /// Manage team members
    #[command(subcommand)]
    Team(TeamCommand),
    /// Manage extra services
    #[command(subcommand)]
    Extra(ExtraCommand),
    /// Company contact details and inbound messages
    #[command(subcommand)]
    Contact(ContactCommand),
}

#[derive(Subcommand)]
enum TeamCommand {
    List,
    Add(TeamArgs),
    Edit {
        id: String,
        #[command(flatten)]
        args: TeamArgs,
    },
    Delete {
        id: String,
    },
}

#[derive(Args)]
struct TeamArgs {
    /// authority or member
    #[arg(long)]
    role: Option<String>,
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    designation: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    description: Option<String>,
    /// Image file to upload
    #[arg(long)]
    image: Option<PathBuf>,
    /// Show the filled-in editor and discard it without saving
    #[arg(long)]
    dry_run: bool,
}

#[derive(Subcommand)]
enum ExtraCommand {
    List,
    Add(ExtraArgs),
    Update {
        id: String,
        #[command(flatten)]
        args: ExtraArgs,
    },
    Delete {
        id: String,
    },
}

#[derive(Args)]
struct ExtraArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    price: String,
    #[arg(long, default_value = "")]
    description: String,
}

#[derive(Subcommand)]
enum ContactCommand {
    Show,
    Update {
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        address: Option<String>,
    },
    Messages {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        limit: u32,
    },
}

/// Console state shared by all commands.
struct Console {
    config: Arc<Config>,
    api: ApiClient,
    notifier: Arc<dyn Notifier>,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let registry = tracing_subscriber::registry().with(env_filter);
    match config.log_format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }

    tracing::debug!("API base URL: {}", config.api_base_url);
    let store = Arc::new(FileSessionStore::new(config.session_path.clone()));
    tracing::debug!("Session path: {:?}", store.path());
    let session = Arc::new(SessionContext::load(store)?);
    let api = ApiClient::new(&config.api_base_url, config.request_timeout, session)?;

    let console = Console {
        config: Arc::new(config),
        api,
        notifier: Arc::new(TerminalNotifier),
    };

    let ok = run(&console, cli.command).await?;
    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

async fn run(console: &Console, command: Command) -> Result<bool, Box<dyn std::error::Error>> {
    let api = &console.api;
    let notifier: &dyn Notifier = &*console.notifier;

    match command {
        Command::Login { email, password } => {
            if !enter(console, "/auth/login") {
                return Ok(false);
            }
            let form = LoginForm::new(email, password);
            let outcome = pages::submit_login(api, notifier, &form).await;
            if outcome.is_completed() {
                println!("Signed in.");
            }
            Ok(finish(outcome))
        }
        Command::Logout => {
            let next = pages::logout(api).await?;
            println!("Signed out. → {}", next);
            Ok(true)
        }
        Command::Routes => {
            for route in ROUTES {
                println!("{:<24} {:<22} {:?}", route.path, route.page.title(), route.layout);
            }
            println!("{:<24} {:<22} -", "*", "Not Found");
            Ok(true)
        }
        Command::Open { path } => Ok(enter(console, &path)),
        Command::ChangePassword {
            current,
            new,
            confirm,
        } => {
            if !enter(console, "/settings") {
                return Ok(false);
            }
            let mut page = ChangePasswordPage::new(ChangePasswordForm::new(current, new, confirm));
            Ok(finish(page.submit(api, notifier).await))
        }
        Command::Team(cmd) => {
            if !enter(console, "/team") {
                return Ok(false);
            }
            run_team(console, cmd).await
        }
        Command::Extra(cmd) => {
            if !enter(console, "/extra") {
                return Ok(false);
            }
            run_extra(console, cmd).await
        }
        Command::Contact(cmd) => {
            if !enter(console, "/contact") {
                return Ok(false);
            }
            run_contact(console, cmd).await
        }
    }
}

async fn run_team(console: &Console, cmd: TeamCommand) -> Result<bool, Box<dyn std::error::Error>> {
    let api = &console.api;
    let notifier: &dyn Notifier = &*console.notifier;

    match cmd {
        TeamCommand::List => {
            let Some(team) = pages::loaded(notifier, api.get_team().await) else {
                return Ok(false);
            };
            for member in team {
                println!(
                    "{:<26} {:<24} {:<10} {}",
                    member.id,
                    member.name,
                    member.team_role.as_deref().unwrap_or("-"),
                    member.designation.as_deref().unwrap_or("")
                );
            }
            Ok(true)
        }
        TeamCommand::Add(args) => {
            let editor = TeamEditor::open(EditorMode::Add, &console.config.image_base_url);
            edit_team(console, editor, args).await
        }
        TeamCommand::Edit { id, args } => {
            let Some(team) = pages::loaded(notifier, api.get_team().await) else {
                return Ok(false);
            };
            let Some(member) = team.into_iter().find(|m| m.id == id) else {
                eprintln!("No team member with id {}", id);
                return Ok(false);
            };
            let editor = TeamEditor::open(EditorMode::Edit(member), &console.config.image_base_url);
            edit_team(console, editor, args).await
        }
        TeamCommand::Delete { id } => {
            let result = api.delete_team(&id).await;
            Ok(finish(pages::report(
                notifier,
                result,
                "Team member deleted successfully",
            )))
        }
    }
}

async fn edit_team(
    console: &Console,
    mut editor: TeamEditor,
    args: TeamArgs,
) -> Result<bool, Box<dyn std::error::Error>> {
    let dry_run = args.dry_run;
    apply_team_args(&mut editor, args)?;
    render_editor(&editor);
    if dry_run {
        editor.cancel();
        println!("Discarded.");
        return Ok(true);
    }
    Ok(finish(editor.submit(&console.api, &*console.notifier).await))
}

/// Print the editor dialog as it would be submitted.
fn render_editor(editor: &TeamEditor) {
    if !editor.is_open() {
        return;
    }
    let form = editor.form();
    println!("{}", editor.title());
    println!("  Role:        {}", form.team_role);
    println!("  Name:        {}", form.name);
    println!("  Designation: {}", form.designation);
    println!("  Phone:       {}", form.phone);
    if form.description.trim().is_empty() {
        println!("  Description: <{}>", editor.description_placeholder());
    } else {
        println!("  Description: {}", form.description);
    }
    match (&form.image, editor.preview_url()) {
        (Some(image), _) => println!("  Image:       {} (new)", image.file_name),
        (None, Some(url)) => println!("  Image:       {}", url),
        (None, None) => println!("  Image:       -"),
    }
}

fn apply_team_args(editor: &mut TeamEditor, args: TeamArgs) -> std::io::Result<()> {
    if let Some(role) = args.role {
        match TeamRole::parse(&role) {
            Some(role) => editor.set_role(role),
            None => editor.form_mut().team_role = role.to_lowercase(),
        }
    }
    let form = editor.form_mut();
    if let Some(name) = args.name {
        form.name = name;
    }
    if let Some(designation) = args.designation {
        form.designation = designation;
    }
    if let Some(phone) = args.phone {
        form.phone = phone;
    }
    if let Some(description) = args.description {
        form.description = description;
    }
    if let Some(path) = args.image {
        form.image = Some(ImageUpload::from_path(&path)?);
    }
    Ok(())
}

async fn run_extra(
    console: &Console,
    cmd: ExtraCommand,
) -> Result<bool, Box<dyn std::error::Error>> {
    let api = &console.api;
    let notifier: &dyn Notifier = &*console.notifier;

    match cmd {
        ExtraCommand::List => {
            let Some(extras) = pages::loaded(notifier, api.get_extras().await) else {
                return Ok(false);
            };
            for extra in extras {
                println!(
                    "{:<26} {:<24} {}",
                    extra.id,
                    extra.name,
                    extra.price.map(|p| format!("{:.2}", p)).unwrap_or_default()
                );
            }
            Ok(true)
        }
        ExtraCommand::Add(args) => {
            let form = extra_form(args);
            Ok(finish(pages::submit_extra(api, notifier, None, &form).await))
        }
        ExtraCommand::Update { id, args } => {
            let form = extra_form(args);
            Ok(finish(
                pages::submit_extra(api, notifier, Some(&id), &form).await,
            ))
        }
        ExtraCommand::Delete { id } => Ok(finish(pages::delete_extra(api, notifier, &id).await)),
    }
}

fn extra_form(args: ExtraArgs) -> ExtraForm {
    ExtraForm {
        name: args.name,
        description: args.description,
        price: args.price,
    }
}

async fn run_contact(
    console: &Console,
    cmd: ContactCommand,
) -> Result<bool, Box<dyn std::error::Error>> {
    let api = &console.api;
    let notifier: &dyn Notifier = &*console.notifier;

    match cmd {
        ContactCommand::Show => {
            let Some(contact) = pages::loaded(notifier, api.get_contact().await) else {
                return Ok(false);
            };
            println!("Email:   {}", contact.email.as_deref().unwrap_or("-"));
            println!("Phone:   {}", contact.phone.as_deref().unwrap_or("-"));
            println!("Address: {}", contact.address.as_deref().unwrap_or("-"));
            Ok(true)
        }
        ContactCommand::Update {
            email,
            phone,
            address,
        } => {
            let form = ContactForm {
                email,
                phone,
                address,
            };
            Ok(finish(pages::submit_contact(api, notifier, &form).await))
        }
        ContactCommand::Messages { page, limit } => {
            let result = api.get_contact_list(page, limit).await;
            let Some(list) = pages::loaded(notifier, result) else {
                return Ok(false);
            };
            for message in &list.items {
                println!(
                    "{:<26} {:<24} {}",
                    message.id,
                    message.email.as_deref().unwrap_or("-"),
                    message.message.as_deref().unwrap_or("")
                );
            }
            if let Some(meta) = list.meta {
                println!("page {} · {} per page · {} total", meta.page, meta.limit, meta.total);
            }
            Ok(true)
        }
    }
}

/// Pass `path` through the route guard. Returns false when redirected.
fn enter(console: &Console, path: &str) -> bool {
    let guard = RouteGuard::new(console.api.session());
    match guard.resolve(path) {
        Resolution::Render { page, layout } => {
            tracing::debug!("Rendering {:?} in {:?}", page, layout);
            println!("{}", page.title());
            true
        }
        Resolution::Redirect { to } => {
            eprintln!("Not signed in. → {}", to);
            false
        }
    }
}

fn finish(outcome: SubmitOutcome) -> bool {
    match outcome {
        SubmitOutcome::Invalid(errors) => {
            eprintln!("{}", errors);
            false
        }
        SubmitOutcome::Failed => false,
        SubmitOutcome::Completed { navigate } => {
            if let Some(to) = navigate {
                println!("→ {}", to);
            }
            true
        }
    }
}
