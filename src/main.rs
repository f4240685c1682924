use std::{
    fs,
    path::{Path, PathBuf},
    process::exit,
    rc::Rc,
};

use anyhow::Context;
use canopeum_feed::{
    api::{models::User, ApiClient, PostApi},
    config::Config,
    dialogs::{AdminInvitationDialog, SiteModal},
    feed::{FeedController, FeedState, FetchOutcome, PostStore},
    locale,
    pages::{AnalyticsPage, HomePage, LoadState, SiteSocialPage},
};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(version, about)]
struct Args {
    /// Toml configuration.
    #[clap(short, long, value_parser, default_value = "canopeum.toml")]
    config: String,

    /// JSON file describing the signed-in user. Omit to browse as a visitor.
    #[clap(short, long, value_parser)]
    user_file: Option<PathBuf>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Page through the posts of one or more sites.
    Feed {
        #[clap(short, long = "site", value_parser, required = true)]
        sites: Vec<u64>,

        /// Stop after this many pages.
        #[clap(short, long, value_parser, default_value_t = 3)]
        pages: u32,
    },
    /// Show the social page of a site.
    Social {
        #[clap(value_parser)]
        site_id: u64,

        /// Publish a post first (site admins only).
        #[clap(long, value_parser)]
        post: Option<String>,

        /// Toggle the like of a post.
        #[clap(long, value_parser)]
        like: Option<u64>,
    },
    /// Generate an admin invitation link.
    Invite {
        #[clap(short, long, value_parser)]
        email: String,

        #[clap(short, long = "site", value_parser)]
        sites: Vec<u64>,
    },
    /// Site and batch analytics.
    Analytics,
    /// Batch list of the landing page.
    Home,
    /// Show a site as loaded in the edit form.
    Site {
        #[clap(value_parser)]
        site_id: u64,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let cfg = Config::from_file(&args.config)?;
    let user = match &args.user_file {
        Some(path) => Some(read_user(path)?),
        None => None,
    };
    let api = ApiClient::new(&cfg.api)?;

    let ok = match args.command {
        Command::Feed { sites, pages } => feed(&api, &cfg, sites, pages).await,
        Command::Social { site_id, post, like } => social(&api, &cfg, user.as_ref(), site_id, post, like).await,
        Command::Invite { email, sites } => invite(&api, &cfg, email, sites).await?,
        Command::Analytics => analytics(&api, user.as_ref()).await,
        Command::Home => home(&api).await,
        Command::Site { site_id } => site(&api, site_id).await?,
    };

    if !ok {
        exit(2);
    }

    Ok(())
}

fn read_user(path: &Path) -> anyhow::Result<User> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parsing user from {}", path.display()))
}

async fn feed(api: &ApiClient, cfg: &Config, sites: Vec<u64>, pages: u32) -> bool {
    let posts: Rc<dyn PostApi> = Rc::new(api.post_client.clone());
    let feed = FeedController::new(posts, PostStore::new(), &cfg.feed);

    let mut outcome = feed.set_site_ids(sites).await;
    for _ in 1..pages {
        if !matches!(outcome, FetchOutcome::Loaded { .. }) {
            break;
        }
        outcome = feed.load_more().await;
    }

    for post in feed.posts() {
        println!("[{}] #{} site {} by {} ({} likes)\n{}\n", post.created_at, post.id, post.site_id, post.author.username, post.like_count, post.body);
    }

    match feed.state() {
        FeedState::Error(message) => {
            eprintln!("[FAILURE] {}", message);
            false
        }
        FeedState::Exhausted => {
            println!("-- end of feed --");
            true
        }
        _ => true,
    }
}

async fn social(api: &ApiClient, cfg: &Config, user: Option<&User>, site_id: u64, post: Option<String>, like: Option<u64>) -> bool {
    let page = SiteSocialPage::new(api, PostStore::new(), &cfg.feed, site_id, user);
    page.load().await;

    let mut ok = true;
    if let Some(body) = post {
        if let Err(e) = page.create_post(body).await {
            eprintln!("[FAILURE] {}", e);
            ok = false;
        }
    }
    if let Some(post_id) = like {
        if let Err(e) = page.like_post(post_id).await {
            eprintln!("[FAILURE] {}", e);
            ok = false;
        }
    }

    match page.site() {
        LoadState::Loaded(site) => println!("# {} ({:?})", site.name, page.view_mode()),
        LoadState::Error(message) => {
            eprintln!("[FAILURE] {}", message);
            ok = false;
        }
        LoadState::Loading => println!("{}", locale::translate("generic.loading")),
    }
    if let Some(announcement) = page.announcement() {
        println!("Announcement: {}", announcement.body);
    }
    if let Some(contact) = page.contact() {
        println!("Contact: {}", contact.email.unwrap_or_default());
    }

    if let FeedState::Error(message) = page.feed_state() {
        eprintln!("[FAILURE] {}", message);
        return false;
    }

    let posts = page.site_posts();
    if posts.is_empty() {
        println!("{}", locale::translate("social.posts.no-posts"));
    }
    for post in posts {
        let mark = if post.has_liked { "*" } else { " " };
        println!("{} #{} {} ({} likes): {}", mark, post.id, post.author.username, post.like_count, post.body);
    }

    ok
}

async fn invite(api: &ApiClient, cfg: &Config, email: String, sites: Vec<u64>) -> anyhow::Result<bool> {
    let mut dialog = AdminInvitationDialog::new(api, &cfg.app_base_url);
    dialog.open().await.context("loading sites")?;

    let known: Vec<u64> = dialog.site_options().iter().map(|o| o.value).collect();
    if let Some(unknown) = sites.iter().find(|id| !known.contains(*id)) {
        eprintln!("[FAILURE] unknown site {}", unknown);
        return Ok(false);
    }

    dialog.set_email(email.clone());
    dialog.set_site_ids(sites);

    Ok(match dialog.generate_link().await {
        Ok(link) => {
            println!("{}", link);
            println!("{} {}", locale::translate("settings.manage-admins.copy-link-message"), email);
            true
        }
        Err(e) => {
            eprintln!("[FAILURE] {}", e.message());
            false
        }
    })
}

async fn analytics(api: &ApiClient, user: Option<&User>) -> bool {
    let page = AnalyticsPage::load(api, user).await;

    for row in page.batch_tracking() {
        let last_update = row.last_update.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_else(|| "N/A".into());
        let admins: Vec<&str> = page.admins_of(row.site_id).into_iter().map(|u| u.username.as_str()).collect();

        println!(
            "{} | {}: {} | {} {} | admins: {}",
            row.name,
            locale::translate("analytics.last-update"),
            last_update,
            row.batch_count,
            row.batch_label,
            admins.join(", ")
        );
    }

    match page.error() {
        Some(message) => {
            eprintln!("[FAILURE] {}", message);
            false
        }
        None => true,
    }
}

async fn home(api: &ApiClient) -> bool {
    match HomePage::load(api).await.batches() {
        LoadState::Loaded(batches) => {
            for batch in batches {
                println!("- {}", batch.name);
            }
            true
        }
        LoadState::Error(message) => {
            eprintln!("Error: {}", message);
            false
        }
        LoadState::Loading => true,
    }
}

async fn site(api: &ApiClient, site_id: u64) -> anyhow::Result<bool> {
    let mut modal = SiteModal::new(api);
    modal.open(Some(site_id)).await.with_context(|| format!("loading site {}", site_id))?;

    let site = modal.site();
    println!("name: {}", site.site_name.as_deref().unwrap_or_default());
    println!("latitude: {}", site.dms_latitude);
    println!("longitude: {}", site.dms_longitude);
    println!("size: {}", site.size.map(|s| s.to_string()).unwrap_or_default());
    println!("species: {}", site.species.iter().map(|s| format!("{} x{}", s.en, s.quantity)).collect::<Vec<_>>().join(", "));
    println!("research partner: {}, visible on map: {}", site.research_partner, site.visible_on_map);

    Ok(true)
}
