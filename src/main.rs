use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use siteboard::api::ApiClient;
use siteboard::cli::Console;
use siteboard::identity::SessionStore;
use siteboard::profile_paths;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--api <url>] [--profile <dir>] [--email <e> --password <p>] [--open <path>]\n\nFlags:\n  --api <url>         Remote API base URL (default: $SITEBOARD_API_URL or http://localhost:8080)\n  --profile <dir>     Profile directory for the persisted session (default: $SITEBOARD_PROFILE_DIR or .siteboard)\n  --email <e>         Log in on startup (requires --password)\n  --password <p>      Password for --email\n  --open <path>       Navigate to a view on startup (e.g. /projects)\n  -h, --help          Show this help\n\nInteractive commands: type 'help' at the prompt."
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Init logging
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap();
    fmt().with_env_filter(filter).init();

    let mut args: Vec<String> = std::env::args().collect();
    let program = args.remove(0);

    let mut api_url: Option<String> = None;
    let mut profile: Option<String> = None;
    let mut email: Option<String> = None;
    let mut password: Option<String> = None;
    let mut open_path: Option<String> = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--api" => {
                if i + 1 >= args.len() { eprintln!("--api requires a value"); print_usage(&program); std::process::exit(2); }
                api_url = Some(args[i + 1].clone());
                i += 2; continue;
            }
            "--profile" => {
                if i + 1 >= args.len() { eprintln!("--profile requires a value"); print_usage(&program); std::process::exit(2); }
                profile = Some(args[i + 1].clone());
                i += 2; continue;
            }
            "--email" => {
                if i + 1 >= args.len() { eprintln!("--email requires a value"); print_usage(&program); std::process::exit(2); }
                email = Some(args[i + 1].clone());
                i += 2; continue;
            }
            "--password" => {
                if i + 1 >= args.len() { eprintln!("--password requires a value"); print_usage(&program); std::process::exit(2); }
                password = Some(args[i + 1].clone());
                i += 2; continue;
            }
            "--open" => {
                if i + 1 >= args.len() { eprintln!("--open requires a path"); print_usage(&program); std::process::exit(2); }
                open_path = Some(args[i + 1].clone());
                i += 2; continue;
            }
            "-h" | "--help" => {
                print_usage(&program);
                return Ok(());
            }
            other => {
                eprintln!("unknown flag: {}", other);
                print_usage(&program);
                std::process::exit(2);
            }
        }
    }

    let api_url = api_url
        .or_else(|| std::env::var("SITEBOARD_API_URL").ok())
        .unwrap_or_else(|| "http://localhost:8080".to_string());
    let profile_root = profile
        .map(std::path::PathBuf::from)
        .unwrap_or_else(profile_paths::default_profile_root);

    info!(
        target: "siteboard",
        "siteboard starting: api='{}', profile='{}'",
        api_url,
        profile_root.display()
    );

    let api = ApiClient::new(&api_url)?;
    let store = SessionStore::open(&profile_root);
    if store.restore() {
        api.set_bearer(store.token());
        if let Some(s) = store.current() {
            println!("restored session for {} ({})", s.email, s.role);
        }
    }

    let console = Console::new(api, store, &profile_root);
    if let (Some(e), Some(p)) = (email.as_deref(), password.as_deref()) {
        console.login(e, p).await?;
    }
    if let Some(path) = open_path.as_deref() {
        console.navigate(path).await?;
    }

    // Always drop into the interactive loop after any startup actions
    console.run().await
}
