//! Terminal front end for the Inkpost blog client.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use inkpost_api::ApiClient;
use inkpost_application::forms::{
    ContactForm, ForgotPasswordForm, LoginForm, PostForm, RegisterForm, ResetPasswordForm,
};
use inkpost_application::{DashboardUseCase, Gated, HomeUseCase, PostUseCase, SessionUseCase};
use inkpost_core::InkpostError;
use inkpost_core::account::repository::AccountApi;
use inkpost_core::config::ClientConfig;
use inkpost_core::post::model::Attachment;
use inkpost_core::view::View;
use inkpost_infrastructure::{ConfigService, FileSessionStore};

mod render;

#[derive(Parser)]
#[command(name = "inkpost")]
#[command(about = "Inkpost - a client for the Inkpost blog platform", long_about = None)]
struct Cli {
    /// Log filter, e.g. "info" or "inkpost_application=debug"
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the public post list
    Browse {
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        search: Option<String>,
    },
    /// Read a single post
    Read { slug: String },
    /// Log in and store the session token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Destroy the stored session
    Logout,
    /// Open the author dashboard (requires a session)
    Dashboard {
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        search: Option<String>,
    },
    /// Delete one of your posts and refresh the dashboard list
    Delete {
        id: u64,
        /// Page to display before the delete, as on the dashboard
        #[arg(long)]
        page: Option<u32>,
    },
    /// Create a new post
    New {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// Edit one of your posts
    Edit {
        id: u64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// Register a new author account
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        dob: String,
        #[arg(long)]
        place: String,
        #[arg(long)]
        address: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        image: PathBuf,
    },
    /// Send a message through the contact form
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        message: String,
    },
    /// Request a password-reset email
    ForgotPassword {
        #[arg(long)]
        email: String,
    },
    /// Complete a password reset with the emailed token
    ResetPassword {
        token: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm: String,
    },
}

struct App {
    config: ClientConfig,
    api: Arc<ApiClient>,
    session: Arc<SessionUseCase>,
}

impl App {
    async fn init() -> Result<Self> {
        let config = ConfigService::new_default()?.load_or_init().await?;
        let store = Arc::new(FileSessionStore::new_default().await?);
        let api = Arc::new(ApiClient::new(&config, store.clone()));
        let session = Arc::new(SessionUseCase::new(
            store,
            api.clone(),
            config.redirect_delay(),
        ));
        Ok(Self {
            config,
            api,
            session,
        })
    }

    fn home(&self) -> HomeUseCase {
        HomeUseCase::new(self.session.clone(), self.api.clone(), &self.config)
    }

    fn posts(&self) -> Arc<PostUseCase> {
        Arc::new(PostUseCase::new(self.api.clone(), self.config.redirect_delay()))
    }

    fn dashboard(&self) -> DashboardUseCase {
        DashboardUseCase::new(
            self.session.clone(),
            self.api.clone(),
            self.posts(),
            self.api.clone(),
            &self.config,
        )
    }

    /// Maps an authentication failure into the global clear-and-redirect
    /// policy; every other error propagates.
    async fn absorb_auth_failure(&self, err: InkpostError) -> Result<()> {
        if err.is_auth_failure() {
            let nav = self.session.handle_auth_failure().await?;
            println!("{}", "Session expired. Please log in again.".red());
            render::follow_nav(&nav).await;
            Ok(())
        } else {
            Err(err.into())
        }
    }
}

fn load_attachment(path: &PathBuf) -> Result<Attachment> {
    let bytes = std::fs::read(path)?;
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("upload.bin")
        .to_string();
    Ok(Attachment::new(file_name, bytes))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let app = App::init().await?;

    match cli.command {
        Commands::Browse { page, search } => browse(&app, page, search).await,
        Commands::Read { slug } => read(&app, &slug).await,
        Commands::Login { email, password } => login(&app, &email, &password).await,
        Commands::Logout => logout(&app).await,
        Commands::Dashboard { page, search } => dashboard(&app, page, search).await,
        Commands::Delete { id, page } => delete(&app, id, page).await,
        Commands::New {
            title,
            content,
            image,
        } => new_post(&app, &title, &content, image).await,
        Commands::Edit {
            id,
            title,
            content,
            image,
        } => edit_post(&app, id, title, content, image).await,
        Commands::Register {
            name,
            dob,
            place,
            address,
            email,
            password,
            image,
        } => register(&app, [name, dob, place, address, email, password], image).await,
        Commands::Contact {
            name,
            email,
            phone,
            message,
        } => contact(&app, [name, email, phone, message]).await,
        Commands::ForgotPassword { email } => forgot_password(&app, &email).await,
        Commands::ResetPassword {
            token,
            password,
            confirm,
        } => reset_password(&app, &token, &password, &confirm).await,
    }
}

async fn browse(app: &App, page: Option<u32>, search: Option<String>) -> Result<()> {
    let home = app.home();
    let mut view = home.open().await?;
    if let Some(term) = search {
        view = home.set_search(&term).await?;
    }
    if let Some(page) = page {
        view = home.set_page(page).await?;
    }
    render::print_nav_bar(&view.nav_bar);
    render::print_list(&view.list);
    Ok(())
}

async fn read(app: &App, slug: &str) -> Result<()> {
    match app.home().open_post(slug).await {
        Ok(post) => {
            render::print_post(&post);
            Ok(())
        }
        Err(err) => {
            println!("{}", err.user_message().red());
            Ok(())
        }
    }
}

async fn login(app: &App, email: &str, password: &str) -> Result<()> {
    let mut form = LoginForm::new(app.config.feedback_timings());
    form.set_email(email);
    form.set_password(password);

    let nav = form.submit(&app.session, Utc::now()).await?;
    render::print_feedback(form.feedback());
    if let Some(nav) = nav {
        render::follow_nav(&nav).await;
    }
    Ok(())
}

async fn logout(app: &App) -> Result<()> {
    let nav = app.session.logout().await?;
    println!("{}", "Logged out.".green());
    render::follow_nav(&nav).await;
    Ok(())
}

async fn dashboard(app: &App, page: Option<u32>, search: Option<String>) -> Result<()> {
    let dashboard = app.dashboard();
    let mut outcome = dashboard.open(Utc::now()).await?;
    if let Gated::Open(_) = outcome {
        if let Some(term) = search {
            outcome = dashboard.set_search(&term, Utc::now()).await?;
        }
        if let Some(page) = page {
            outcome = dashboard.set_page(page, Utc::now()).await?;
        }
    }
    print_dashboard(outcome).await;
    Ok(())
}

async fn delete(app: &App, id: u64, page: Option<u32>) -> Result<()> {
    let dashboard = app.dashboard();
    let mut outcome = dashboard.open(Utc::now()).await?;
    if let (Gated::Open(_), Some(page)) = (&outcome, page) {
        outcome = dashboard.set_page(page, Utc::now()).await?;
    }
    if let Gated::Open(_) = outcome {
        outcome = dashboard.delete_post(id, Utc::now()).await?;
    }
    print_dashboard(outcome).await;
    Ok(())
}

async fn print_dashboard(outcome: Gated<inkpost_application::DashboardView>) {
    match outcome {
        Gated::Redirect(nav) => {
            println!("{}", "Please log in to continue.".red());
            render::follow_nav(&nav).await;
        }
        Gated::Open(view) => {
            println!("{}", view.welcome.bold());
            println!("{}", format!("Total posts: {}", view.total_posts).dimmed());
            if let Some(notice) = &view.notice {
                match notice.severity {
                    inkpost_core::feedback::Severity::Error => {
                        println!("{}", notice.text.red())
                    }
                    _ => println!("{}", notice.text.green()),
                }
            }
            render::print_list(&view.list);
        }
    }
}

async fn new_post(app: &App, title: &str, content: &str, image: Option<PathBuf>) -> Result<()> {
    if let Some(nav) = app.session.require_session(&View::Editor(None)).await {
        println!("{}", "Please log in to continue.".red());
        render::follow_nav(&nav).await;
        return Ok(());
    }

    let mut form = PostForm::create(app.config.feedback_timings());
    form.set_title(title);
    form.set_content(content);
    if let Some(path) = image {
        form.attach(load_attachment(&path)?);
    }

    match form.submit(&app.posts(), Utc::now()).await {
        Ok(nav) => {
            render::print_feedback(form.feedback());
            if let Some(nav) = nav {
                render::follow_nav(&nav).await;
            }
            Ok(())
        }
        Err(err) => app.absorb_auth_failure(err).await,
    }
}

async fn edit_post(
    app: &App,
    id: u64,
    title: Option<String>,
    content: Option<String>,
    image: Option<PathBuf>,
) -> Result<()> {
    if let Some(nav) = app.session.require_session(&View::Editor(Some(id))).await {
        println!("{}", "Please log in to continue.".red());
        render::follow_nav(&nav).await;
        return Ok(());
    }

    let posts = app.posts();
    let mut form = match PostForm::edit(&posts, id, app.config.feedback_timings()).await {
        Ok(form) => form,
        Err(err) => {
            if err.is_auth_failure() {
                return app.absorb_auth_failure(err).await;
            }
            println!("{}", err.user_message().red());
            return Ok(());
        }
    };

    if let Some(image) = form.current_image() {
        println!("{}", format!("[current image: {image}]").dimmed());
    }
    if let Some(title) = title {
        form.set_title(&title);
    }
    if let Some(content) = content {
        form.set_content(&content);
    }
    if let Some(path) = image {
        form.attach(load_attachment(&path)?);
    }

    match form.submit(&posts, Utc::now()).await {
        Ok(nav) => {
            render::print_feedback(form.feedback());
            if let Some(nav) = nav {
                render::follow_nav(&nav).await;
            }
            Ok(())
        }
        Err(err) => app.absorb_auth_failure(err).await,
    }
}

async fn register(app: &App, fields: [String; 6], image: PathBuf) -> Result<()> {
    let [name, dob, place, address, email, password] = fields;

    let mut form = RegisterForm::new(app.config.feedback_timings(), app.config.redirect_delay());
    form.set_field("name", &name);
    form.set_field("dob", &dob);
    form.set_field("place", &place);
    form.set_field("address", &address);
    form.set_field("email", &email);
    form.set_field("password", &password);
    form.set_photo(load_attachment(&image)?);

    let account: Arc<dyn AccountApi> = app.api.clone();
    let nav = form.submit(&account, Utc::now()).await?;
    render::print_feedback(form.feedback());
    if let Some(nav) = nav {
        render::follow_nav(&nav).await;
    }
    Ok(())
}

async fn contact(app: &App, fields: [String; 4]) -> Result<()> {
    let [name, email, phone, message] = fields;

    let mut form = ContactForm::new(app.config.feedback_timings());
    form.set_field("name", &name);
    form.set_field("email", &email);
    form.set_field("phone", &phone);
    form.set_field("message", &message);

    let account: Arc<dyn AccountApi> = app.api.clone();
    form.submit(&account, Utc::now()).await?;
    render::print_feedback(form.feedback());
    Ok(())
}

async fn forgot_password(app: &App, email: &str) -> Result<()> {
    let mut form = ForgotPasswordForm::new(app.config.feedback_timings());
    form.set_email(email);

    let account: Arc<dyn AccountApi> = app.api.clone();
    form.submit(&account, Utc::now()).await?;
    render::print_feedback(form.feedback());
    Ok(())
}

async fn reset_password(app: &App, token: &str, password: &str, confirm: &str) -> Result<()> {
    let mut form = ResetPasswordForm::new(
        token,
        app.config.feedback_timings(),
        app.config.redirect_delay(),
    );
    form.set_new_password(password);
    form.set_confirm_password(confirm);

    let account: Arc<dyn AccountApi> = app.api.clone();
    let nav = form.submit(&account, Utc::now()).await?;
    render::print_feedback(form.feedback());
    if let Some(nav) = nav {
        render::follow_nav(&nav).await;
    }
    Ok(())
}
