use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use jobboard::config::{ClientConfig, ConfigError};
use jobboard::error::{ApiError, StorageError};
use jobboard::net::Gateway;
use jobboard::net::types::{CompanyInput, JobInput, PermissionInput, RegisterRequest, ResumeInput, RoleInput, SubscriberInput};
use jobboard::routes::Navigation;
use jobboard::services::companies::CompanyFilters;
use jobboard::services::jobs::JobFilters;
use jobboard::services::{PageRequest, companies, jobs, permissions, resumes, roles, subscribers, users};
use jobboard::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("{}", .0.message())]
    Api(#[from] ApiError),
    #[error("session storage failed: {0}")]
    Storage(#[from] StorageError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("not signed in; run `jobboard login` first")]
    NotSignedIn,
}

#[derive(Parser, Debug)]
#[command(name = "jobboard", about = "Job board session and API CLI")]
struct Cli {
    /// Overrides JOBBOARD_API_BASE_URL.
    #[arg(long)]
    base_url: Option<String>,

    /// Overrides JOBBOARD_STORAGE_PATH.
    #[arg(long)]
    storage_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Login {
        email: String,
        #[arg(long, env = "JOBBOARD_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Register(RegisterArgs),
    Logout,
    /// Re-fetch the signed-in account.
    Whoami,
    /// Print the stored session without contacting the backend.
    Status,
    /// Run the navigation guard for a path.
    Check {
        path: String,
    },
    ClearCache,
    Jobs(JobsCommand),
    Companies(CompaniesCommand),
    Resumes(ResumesCommand),
    Users(UsersCommand),
    Roles(CrudCommand),
    Permissions(CrudCommand),
    Subscribers(CrudCommand),
}

#[derive(Args, Debug)]
struct RegisterArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long, env = "JOBBOARD_PASSWORD", hide_env_values = true)]
    password: String,
    #[arg(long)]
    age: Option<String>,
    #[arg(long)]
    gender: Option<String>,
    #[arg(long)]
    address: Option<String>,
}

#[derive(Args, Debug, Clone, Copy)]
struct PageArgs {
    #[arg(long, default_value_t = 1)]
    page: u32,
    #[arg(long, default_value_t = 10)]
    page_size: u32,
}

impl From<PageArgs> for PageRequest {
    fn from(args: PageArgs) -> Self {
        PageRequest::new(args.page, args.page_size)
    }
}

#[derive(Args, Debug)]
struct JobsCommand {
    #[command(subcommand)]
    command: JobsSubcommand,
}

#[derive(Subcommand, Debug)]
enum JobsSubcommand {
    List {
        #[command(flatten)]
        page: PageArgs,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        level: Option<String>,
        #[arg(long = "skill")]
        skills: Vec<String>,
    },
    Read {
        id: String,
    },
    Create {
        #[arg(long)]
        data: String,
    },
    Update {
        id: String,
        #[arg(long)]
        data: String,
    },
    Delete {
        id: String,
    },
}

#[derive(Args, Debug)]
struct CompaniesCommand {
    #[command(subcommand)]
    command: CompaniesSubcommand,
}

#[derive(Subcommand, Debug)]
enum CompaniesSubcommand {
    List {
        #[command(flatten)]
        page: PageArgs,
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        address: Option<String>,
    },
    Read {
        id: String,
    },
    Create {
        #[arg(long)]
        data: String,
    },
    Update {
        id: String,
        #[arg(long)]
        data: String,
    },
    Delete {
        id: String,
    },
}

#[derive(Args, Debug)]
struct ResumesCommand {
    #[command(subcommand)]
    command: ResumesSubcommand,
}

#[derive(Subcommand, Debug)]
enum ResumesSubcommand {
    Mine,
    Apply {
        #[arg(long)]
        job_id: String,
        #[arg(long)]
        company_id: String,
        #[arg(long)]
        url: String,
    },
}

#[derive(Args, Debug)]
struct UsersCommand {
    #[command(subcommand)]
    command: UsersSubcommand,
}

#[derive(Subcommand, Debug)]
enum UsersSubcommand {
    List {
        #[command(flatten)]
        page: PageArgs,
    },
    SetRole {
        user_id: String,
        role_id: String,
    },
    Delete {
        id: String,
    },
}

#[derive(Args, Debug)]
struct CrudCommand {
    #[command(subcommand)]
    command: CrudSubcommand,
}

#[derive(Subcommand, Debug)]
enum CrudSubcommand {
    List {
        #[command(flatten)]
        page: PageArgs,
    },
    Read {
        id: String,
    },
    Create {
        #[arg(long)]
        data: String,
    },
    Update {
        id: String,
        #[arg(long)]
        data: String,
    },
    Delete {
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    // stdout carries command output only; diagnostics go to stderr.
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let mut config = ClientConfig::from_env()?;
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url)?;
    }
    if let Some(storage_path) = cli.storage_path {
        config.storage_path = storage_path;
    }

    let client = Client::from_config(&config)?;
    let result = run(&client, cli.command).await;
    if let Some(target) = client.navigator.take_redirect() {
        eprintln!("session ended; sign in again (redirected to {target})");
    }
    result
}

async fn run(client: &Client, command: Command) -> Result<(), CliError> {
    match command {
        Command::Login { email, password } => {
            let user = client.session.login(&email, &password).await?;
            print_json(&user)
        }
        Command::Register(args) => {
            let request = RegisterRequest {
                name: args.name,
                email: args.email,
                password: args.password,
                age: args.age,
                gender: args.gender,
                address: args.address,
            };
            let created = client.session.register(&request).await?;
            print_json(&json!({ "_id": created.id, "createdAt": created.created_at }))
        }
        Command::Logout => {
            client.session.logout().await?;
            println!("signed out");
            Ok(())
        }
        Command::Whoami => {
            if !client.session.handle().is_authenticated() {
                return Err(CliError::NotSignedIn);
            }
            let user = client.session.fetch_user().await?;
            print_json(&user)
        }
        Command::Status => {
            let snapshot = client.session.snapshot();
            print_json(&json!({
                "isAuthenticated": snapshot.is_authenticated,
                "role": snapshot.role_name(),
                "user": snapshot.user,
            }))
        }
        Command::Check { path } => {
            let outcome = match client.navigate(&path) {
                Navigation::Render(resolved) => json!({
                    "render": resolved.route.name,
                    "params": resolved.params,
                }),
                Navigation::Redirect(target) => json!({ "redirect": target }),
                Navigation::NotFound => json!({ "render": "not-found" }),
            };
            print_json(&outcome)
        }
        Command::ClearCache => {
            client.session.clear_cache()?;
            println!("local storage cleared");
            Ok(())
        }
        Command::Jobs(cmd) => run_jobs(&client.gateway, cmd.command).await,
        Command::Companies(cmd) => run_companies(&client.gateway, cmd.command).await,
        Command::Resumes(cmd) => run_resumes(&client.gateway, cmd.command).await,
        Command::Users(cmd) => run_users(&client.gateway, cmd.command).await,
        Command::Roles(cmd) => run_roles(&client.gateway, cmd.command).await,
        Command::Permissions(cmd) => run_permissions(&client.gateway, cmd.command).await,
        Command::Subscribers(cmd) => run_subscribers(&client.gateway, cmd.command).await,
    }
}

async fn run_jobs(gateway: &Gateway, command: JobsSubcommand) -> Result<(), CliError> {
    match command {
        JobsSubcommand::List { page, location, level, skills } => {
            let filters = JobFilters { location, level, skills };
            print_json(&jobs::list(gateway, page.into(), &filters).await?)
        }
        JobsSubcommand::Read { id } => print_json(&jobs::get(gateway, &id).await?),
        JobsSubcommand::Create { data } => {
            let input: JobInput = parse_data(&data)?;
            print_json(&jobs::create(gateway, &input).await?)
        }
        JobsSubcommand::Update { id, data } => {
            let input: JobInput = parse_data(&data)?;
            print_json(&jobs::update(gateway, &id, &input).await?)
        }
        JobsSubcommand::Delete { id } => {
            jobs::delete(gateway, &id).await?;
            println!("deleted {id}");
            Ok(())
        }
    }
}

async fn run_companies(gateway: &Gateway, command: CompaniesSubcommand) -> Result<(), CliError> {
    match command {
        CompaniesSubcommand::List { page, search, name, address } => {
            let filters = CompanyFilters { search, name, address };
            print_json(&companies::list(gateway, page.into(), &filters).await?)
        }
        CompaniesSubcommand::Read { id } => print_json(&companies::get(gateway, &id).await?),
        CompaniesSubcommand::Create { data } => {
            let input: CompanyInput = parse_data(&data)?;
            print_json(&companies::create(gateway, &input).await?)
        }
        CompaniesSubcommand::Update { id, data } => {
            let input: CompanyInput = parse_data(&data)?;
            print_json(&companies::update(gateway, &id, &input).await?)
        }
        CompaniesSubcommand::Delete { id } => {
            companies::delete(gateway, &id).await?;
            println!("deleted {id}");
            Ok(())
        }
    }
}

async fn run_resumes(gateway: &Gateway, command: ResumesSubcommand) -> Result<(), CliError> {
    match command {
        ResumesSubcommand::Mine => print_json(&resumes::mine(gateway).await?),
        ResumesSubcommand::Apply { job_id, company_id, url } => {
            let input = ResumeInput { url, company_id, job_id };
            print_json(&resumes::create(gateway, &input).await?)
        }
    }
}

async fn run_users(gateway: &Gateway, command: UsersSubcommand) -> Result<(), CliError> {
    match command {
        UsersSubcommand::List { page } => print_json(&users::list(gateway, page.into()).await?),
        UsersSubcommand::SetRole { user_id, role_id } => {
            print_json(&users::update_role(gateway, &user_id, &role_id).await?)
        }
        UsersSubcommand::Delete { id } => {
            users::delete(gateway, &id).await?;
            println!("deleted {id}");
            Ok(())
        }
    }
}

async fn run_roles(gateway: &Gateway, command: CrudSubcommand) -> Result<(), CliError> {
    match command {
        CrudSubcommand::List { page } => print_json(&roles::list(gateway, page.into()).await?),
        CrudSubcommand::Read { id } => print_json(&roles::get(gateway, &id).await?),
        CrudSubcommand::Create { data } => {
            let input: RoleInput = parse_data(&data)?;
            print_json(&roles::create(gateway, &input).await?)
        }
        CrudSubcommand::Update { id, data } => {
            let input: RoleInput = parse_data(&data)?;
            print_json(&roles::update(gateway, &id, &input).await?)
        }
        CrudSubcommand::Delete { id } => {
            roles::delete(gateway, &id).await?;
            println!("deleted {id}");
            Ok(())
        }
    }
}

async fn run_permissions(gateway: &Gateway, command: CrudSubcommand) -> Result<(), CliError> {
    match command {
        CrudSubcommand::List { page } => print_json(&permissions::list(gateway, page.into()).await?),
        CrudSubcommand::Read { id } => print_json(&permissions::get(gateway, &id).await?),
        CrudSubcommand::Create { data } => {
            let input: PermissionInput = parse_data(&data)?;
            print_json(&permissions::create(gateway, &input).await?)
        }
        CrudSubcommand::Update { id, data } => {
            let input: PermissionInput = parse_data(&data)?;
            print_json(&permissions::update(gateway, &id, &input).await?)
        }
        CrudSubcommand::Delete { id } => {
            permissions::delete(gateway, &id).await?;
            println!("deleted {id}");
            Ok(())
        }
    }
}

async fn run_subscribers(gateway: &Gateway, command: CrudSubcommand) -> Result<(), CliError> {
    match command {
        CrudSubcommand::List { page } => print_json(&subscribers::list(gateway, page.into()).await?),
        CrudSubcommand::Read { id } => print_json(&subscribers::get(gateway, &id).await?),
        CrudSubcommand::Create { data } => {
            let input: SubscriberInput = parse_data(&data)?;
            print_json(&subscribers::create(gateway, &input).await?)
        }
        CrudSubcommand::Update { id, data } => {
            let input: SubscriberInput = parse_data(&data)?;
            print_json(&subscribers::update(gateway, &id, &input).await?)
        }
        CrudSubcommand::Delete { id } => {
            subscribers::delete(gateway, &id).await?;
            println!("deleted {id}");
            Ok(())
        }
    }
}

fn parse_data<T: DeserializeOwned>(raw: &str) -> Result<T, CliError> {
    Ok(serde_json::from_str::<T>(raw)?)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
