//! Interactive console: login lifecycle, gated navigation, and CRUD commands
//! against the remote API. Every `open` and every mutation passes through the
//! access gate first; denied navigation quietly lands on /dashboard.

use std::path::{Path, PathBuf};

use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use serde_json::Value;
use tracing::debug;

use crate::api::models::{Credentials, Employee, InventoryItem, Project, RegisterRequest};
use crate::api::ApiClient;
use crate::cli::table;
use crate::error::AppError;
use crate::identity::{can_access, decide_route, RouteDecision, SessionStore, NAV_ROUTES};
use crate::profile_paths;

pub struct Console {
    api: ApiClient,
    store: SessionStore,
    history: PathBuf,
}

impl Console {
    pub fn new(api: ApiClient, store: SessionStore, profile_root: &Path) -> Self {
        Self {
            api,
            store,
            history: profile_paths::history_file(profile_root),
        }
    }

    /// Run the interactive loop until quit/EOF.
    pub async fn run(&self) -> Result<()> {
        let mut rl = DefaultEditor::new()?;
        let _ = rl.load_history(&self.history);
        println!("siteboard console. Type 'help' for commands.");
        loop {
            let prompt = match self.store.current_role() {
                Some(role) => format!("{}@siteboard> ", role),
                None => "siteboard> ".to_string(),
            };
            match rl.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim().to_string();
                    if line.is_empty() {
                        continue;
                    }
                    let _ = rl.add_history_entry(line.as_str());
                    let lower = line.to_ascii_lowercase();
                    if lower == "quit" || lower == "exit" {
                        break;
                    }
                    if lower == "help" {
                        print_help();
                        continue;
                    }
                    if let Err(e) = self.dispatch(&line).await {
                        match e.downcast_ref::<AppError>() {
                            Some(app) if app.is_auth_failure() => println!("{}", app.message()),
                            Some(app) => println!("error: {}", app.message()),
                            None => println!("error: {:#}", e),
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => break,
                Err(e) => return Err(e.into()),
            }
        }
        let _ = rl.save_history(&self.history);
        Ok(())
    }

    async fn dispatch(&self, line: &str) -> Result<()> {
        let (cmd, rest) = split_word(line);
        match cmd.to_ascii_lowercase().as_str() {
            "login" => {
                let (email, rest) = split_word(rest);
                let (password, _) = split_word(rest);
                if email.is_empty() || password.is_empty() {
                    println!("usage: login <email> <password>");
                    return Ok(());
                }
                self.login(email, password).await
            }
            "logout" => {
                self.store.logout();
                self.api.set_bearer(None);
                println!("signed out");
                Ok(())
            }
            "status" | "whoami" => {
                self.print_status();
                Ok(())
            }
            "routes" => {
                self.print_routes();
                Ok(())
            }
            "open" => {
                if rest.is_empty() {
                    println!("usage: open <path>");
                    return Ok(());
                }
                self.navigate(rest).await
            }
            "create" => {
                let (path, body) = split_word(rest);
                self.cmd_create(&normalize_path(path), body).await
            }
            "update" => {
                let (path, body) = split_word(rest);
                self.cmd_update(&normalize_path(path), body).await
            }
            "delete" => self.cmd_delete(&normalize_path(rest)).await,
            "register" => self.cmd_register(rest).await,
            "otp" => self.cmd_otp(rest).await,
            other => {
                println!("unknown command '{}'; type 'help'", other);
                Ok(())
            }
        }
    }

    /// Authenticate against the remote API and establish the local session.
    /// Credential rejections are flattened to one generic notice.
    pub async fn login(&self, email: &str, password: &str) -> Result<()> {
        println!("authenticating…");
        let creds = Credentials {
            email: email.to_string(),
            password: password.to_string(),
        };
        let raw = match self.api.login(&creds).await {
            Ok(raw) => raw,
            Err(e) => {
                debug!("login failed: {:#}", e);
                println!("invalid email or password");
                return Ok(());
            }
        };
        let session = match self.store.login(&raw) {
            Ok(s) => s,
            Err(e) => {
                println!("login rejected: {}", e.message());
                return Ok(());
            }
        };
        self.api.set_bearer(self.store.token());
        let who = if session.name.is_empty() { &session.email } else { &session.name };
        println!("welcome back, {} ({})", who, session.role);
        self.navigate("/dashboard").await
    }

    /// One navigation attempt: gate, then render or redirect.
    pub async fn navigate(&self, path: &str) -> Result<()> {
        let path = normalize_path(path);
        match decide_route(&self.store, &path) {
            RouteDecision::Login => {
                println!("not signed in; use: login <email> <password>");
                Ok(())
            }
            RouteDecision::Dashboard => {
                debug!("nav.denied path={}", path);
                println!("redirecting to /dashboard");
                self.render_view("/dashboard").await
            }
            RouteDecision::Render(p) => self.render_view(&p).await,
        }
    }

    async fn render_view(&self, path: &str) -> Result<()> {
        match section_of(path) {
            "dashboard" => self.view_dashboard().await,
            "projects" => {
                println!("fetching {} …", path);
                let list = self.api.projects().await?;
                table::print_object_list("projects", &to_rows(&list));
                Ok(())
            }
            "employees" => {
                println!("fetching {} …", path);
                let list = self.api.employees().await?;
                table::print_object_list("employees", &to_rows(&list));
                match self.api.managers().await {
                    Ok(Value::Array(rows)) => table::print_object_list("managers", &rows),
                    Ok(other) => table::print_kv("managers", &other),
                    Err(e) => println!("managers unavailable: {}", brief(&e)),
                }
                Ok(())
            }
            "inventory" => {
                println!("fetching {} …", path);
                let list = self.api.inventory().await?;
                table::print_object_list("inventory", &to_rows(&list));
                Ok(())
            }
            "tasks" => {
                println!("fetching {} …", path);
                let list = self.api.tasks().await?;
                table::print_object_list("tasks", &to_rows(&list));
                Ok(())
            }
            "about" => {
                println!("fetching {} …", path);
                let stats = self.api.company_stats().await?;
                table::print_kv("company", &stats);
                Ok(())
            }
            other => {
                println!("no view for /{}", other);
                Ok(())
            }
        }
    }

    async fn view_dashboard(&self) -> Result<()> {
        println!("fetching /dashboard …");
        let (stats, projects, tasks) = tokio::join!(
            self.api.dashboard_stats(),
            self.api.projects(),
            self.api.tasks()
        );
        match stats {
            Ok(v) => table::print_kv("stats", &v),
            Err(e) => println!("stats unavailable: {}", brief(&e)),
        }
        match projects {
            Ok(list) => {
                let recent = &list[..list.len().min(5)];
                table::print_object_list("recent projects", &to_rows(recent));
            }
            Err(e) => println!("projects unavailable: {}", brief(&e)),
        }
        match tasks {
            Ok(list) => {
                let recent = &list[..list.len().min(5)];
                table::print_object_list("recent tasks", &to_rows(recent));
            }
            Err(e) => println!("tasks unavailable: {}", brief(&e)),
        }
        Ok(())
    }

    async fn cmd_create(&self, path: &str, body: &str) -> Result<()> {
        if body.is_empty() {
            println!("usage: create <path> <json>");
            return Ok(());
        }
        let section = section_of(path).to_string();
        // managers are administered from the employees section
        let gate_path = if section == "managers" { "/employees" } else { path };
        if !self.gate(gate_path) {
            return Ok(());
        }
        match section.as_str() {
            "projects" => {
                let m: Project = parse_payload(body)?;
                let created = self.api.create_project(&m).await?;
                table::print_object_list("created", &to_rows(&[created]));
            }
            "employees" => {
                let m: Employee = parse_payload(body)?;
                let created = self.api.create_employee(&m).await?;
                table::print_object_list("created", &to_rows(&[created]));
            }
            "inventory" => {
                let m: InventoryItem = parse_payload(body)?;
                let created = self.api.create_inventory(&m).await?;
                table::print_object_list("created", &to_rows(&[created]));
            }
            "managers" => {
                let payload: Value = parse_payload(body)?;
                let created = self.api.register_manager(&payload).await?;
                table::print_kv("created", &created);
            }
            "tasks" => println!("tasks are read-only from this console"),
            other => println!("cannot create under /{}", other),
        }
        Ok(())
    }

    async fn cmd_update(&self, path: &str, body: &str) -> Result<()> {
        let Some((base, id)) = split_id(path) else {
            println!("usage: update <path>/<id> <json>");
            return Ok(());
        };
        if body.is_empty() {
            println!("usage: update <path>/<id> <json>");
            return Ok(());
        }
        if !self.gate(path) {
            return Ok(());
        }
        match section_of(base) {
            "projects" => {
                let m: Project = parse_payload(body)?;
                let updated = self.api.update_project(id, &m).await?;
                table::print_object_list("updated", &to_rows(&[updated]));
            }
            "employees" => {
                let m: Employee = parse_payload(body)?;
                let updated = self.api.update_employee(id, &m).await?;
                table::print_object_list("updated", &to_rows(&[updated]));
            }
            "inventory" => {
                let m: InventoryItem = parse_payload(body)?;
                let updated = self.api.update_inventory(id, &m).await?;
                table::print_object_list("updated", &to_rows(&[updated]));
            }
            other => println!("cannot update under /{}", other),
        }
        Ok(())
    }

    async fn cmd_delete(&self, path: &str) -> Result<()> {
        let Some((base, id)) = split_id(path) else {
            println!("usage: delete <path>/<id>");
            return Ok(());
        };
        if !self.gate(path) {
            return Ok(());
        }
        match section_of(base) {
            "projects" => self.api.delete_project(id).await?,
            "employees" => self.api.delete_employee(id).await?,
            "inventory" => self.api.delete_inventory(id).await?,
            other => {
                println!("cannot delete under /{}", other);
                return Ok(());
            }
        }
        println!("deleted {}", path);
        Ok(())
    }

    async fn cmd_register(&self, rest: &str) -> Result<()> {
        let parts: Vec<&str> = rest.split_whitespace().collect();
        if parts.len() < 3 {
            println!("usage: register <name> <email> <password> [role]");
            return Ok(());
        }
        let req = RegisterRequest {
            name: parts[0].to_string(),
            email: parts[1].to_string(),
            password: parts[2].to_string(),
            role: parts.get(3).map(|s| s.to_string()),
        };
        match self.api.register(&req).await {
            Ok(_) => println!("registered {}; you can now log in", req.email),
            Err(e) => println!("registration failed: {}", brief(&e)),
        }
        Ok(())
    }

    async fn cmd_otp(&self, rest: &str) -> Result<()> {
        let (sub, rest) = split_word(rest);
        match sub.to_ascii_lowercase().as_str() {
            "send" => {
                let (email, _) = split_word(rest);
                if email.is_empty() {
                    println!("usage: otp send <email>");
                    return Ok(());
                }
                self.api.send_otp(email).await?;
                println!("otp sent to {}", email);
            }
            "verify" => {
                let (email, rest) = split_word(rest);
                let (code, _) = split_word(rest);
                if email.is_empty() || code.is_empty() {
                    println!("usage: otp verify <email> <code>");
                    return Ok(());
                }
                self.api.verify_otp(email, code).await?;
                println!("otp verified");
            }
            _ => println!("usage: otp send <email> | otp verify <email> <code>"),
        }
        Ok(())
    }

    /// Gate a mutation path. Prints the refusal and returns false when the
    /// current session may not touch it.
    fn gate(&self, path: &str) -> bool {
        match decide_route(&self.store, path) {
            RouteDecision::Render(_) => true,
            RouteDecision::Login => {
                println!("not signed in; use: login <email> <password>");
                false
            }
            RouteDecision::Dashboard => {
                println!("access denied for {}", path);
                false
            }
        }
    }

    fn print_status(&self) {
        println!("api: {}", self.api.base());
        match self.store.current() {
            Some(s) => println!("signed in as {} <{}> role={}", s.name, s.email, s.role),
            None => println!("not signed in"),
        }
    }

    fn print_routes(&self) {
        let role = self.store.current_role();
        println!("routes:");
        for route in NAV_ROUTES {
            match role {
                Some(role) => {
                    let mark = if can_access(route, role) { '+' } else { '-' };
                    println!("  {} {}", mark, route);
                }
                None => println!("    {}", route),
            }
        }
    }
}

fn print_help() {
    println!(
        "commands:\n  login <email> <password>        authenticate against the remote API\n  logout                          clear the local session\n  open <path>                     navigate to a view (e.g. open /projects)\n  routes                          list navigation routes; +/- marks access\n  status                          show connection and session info\n  create <path> <json>            create a record (projects|employees|inventory|managers)\n  update <path>/<id> <json>       update a record\n  delete <path>/<id>              delete a record\n  register <name> <email> <password> [role]\n  otp send <email> | otp verify <email> <code>\n  help | quit"
    );
}

fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim();
    match s.split_once(char::is_whitespace) {
        Some((a, b)) => (a, b.trim()),
        None => (s, ""),
    }
}

fn normalize_path(p: &str) -> String {
    let p = p.trim().trim_end_matches('/');
    if p.is_empty() {
        return "/dashboard".to_string();
    }
    if p.starts_with('/') {
        p.to_string()
    } else {
        format!("/{}", p)
    }
}

fn section_of(path: &str) -> &str {
    path.trim_start_matches('/').split('/').next().unwrap_or("")
}

/// Split a trailing numeric id off a path: "/projects/5" → ("/projects", 5).
fn split_id(path: &str) -> Option<(&str, i64)> {
    let (base, tail) = path.rsplit_once('/')?;
    let id = tail.parse::<i64>().ok()?;
    if base.is_empty() {
        return None;
    }
    Some((base, id))
}

fn to_rows<T: serde::Serialize>(items: &[T]) -> Vec<Value> {
    items
        .iter()
        .filter_map(|i| serde_json::to_value(i).ok())
        .collect()
}

fn parse_payload<T: serde::de::DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| AppError::user("bad_payload", e.to_string()).into())
}

fn brief(e: &anyhow::Error) -> String {
    match e.downcast_ref::<AppError>() {
        Some(app) => app.message().to_string(),
        None => format!("{:#}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_path_adds_leading_slash() {
        assert_eq!(normalize_path("projects"), "/projects");
        assert_eq!(normalize_path("/tasks/99/"), "/tasks/99");
        assert_eq!(normalize_path(""), "/dashboard");
    }

    #[test]
    fn split_id_takes_trailing_number_only() {
        assert_eq!(split_id("/projects/5"), Some(("/projects", 5)));
        assert_eq!(split_id("/projects"), None);
        assert_eq!(split_id("/projects/abc"), None);
    }

    #[test]
    fn section_of_top_level_segment() {
        assert_eq!(section_of("/tasks/99"), "tasks");
        assert_eq!(section_of("/about"), "about");
    }
}
