//! Alcove CLI - Terminal interface for the Alcove workspace
//!
//! Drives the same services the graphical shells use: links, notes,
//! events, profile, media, and theme, backed by the local SQLite cache
//! and the optional remote subscription.

use std::env;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use alcove_core::config::RemoteConfig;
use alcove_core::models::{date_key, MediaItem, MediaKind, Theme, THEME_FIELDS};
use alcove_core::reminder::{NotificationPermission, NotificationSink, ReminderScheduler};
use alcove_core::remote::{
    EventCollection, HttpRemoteStore, LinkCollection, MemoryRemoteStore, NoteCollection,
    RemoteStore,
};
use alcove_core::services::{
    EventService, LinkService, MediaService, NoteService, ProfileService, ThemeService,
};
use alcove_core::store::{EntityCache, SqliteStateStore, StateStore};
use alcove_core::sync::SyncCore;
use alcove_core::{Event, IdentityProvider, Link, Note, Profile};
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::aot::Generator;
use clap_complete::{generate, shells};
use serde::Serialize;
use thiserror::Error;

#[derive(Parser)]
#[command(name = "alcove")]
#[command(about = "A local-first workspace for links, notes, events, and reminders")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Optional path to the local state database
    #[arg(long, value_name = "PATH", global = true)]
    db_path: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage workspace links
    Links {
        #[command(subcommand)]
        command: LinkCommands,
    },
    /// Manage notes
    Notes {
        #[command(subcommand)]
        command: NoteCommands,
    },
    /// Manage calendar events
    Events {
        #[command(subcommand)]
        command: EventCommands,
    },
    /// Manage the profile and session
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },
    /// Manage the local media library
    Media {
        #[command(subcommand)]
        command: MediaCommands,
    },
    /// Manage theme colors
    Theme {
        #[command(subcommand)]
        command: ThemeCommands,
    },
    /// Pull the latest data from the remote once
    Sync,
    /// Keep syncing and fire event reminders until interrupted
    Watch,
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum LinkCommands {
    /// List links in stored order
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a link (or update the one already using this URL)
    Add {
        /// Display name
        name: String,
        /// Target URL; scheme defaults to https
        url: String,
        /// Pin the link ahead of the rest
        #[arg(long)]
        pinned: bool,
    },
    /// Remove a link
    Remove {
        /// Link ID
        id: String,
    },
    /// Pin a link (or unpin with --off)
    Pin {
        /// Link ID
        id: String,
        /// Unpin instead
        #[arg(long)]
        off: bool,
    },
    /// Move a link from one list position to another
    Reorder {
        /// Current position
        from: usize,
        /// Target position
        to: usize,
    },
    /// Replace the list with the built-in catalog
    Reset,
}

#[derive(Subcommand)]
enum NoteCommands {
    /// List notes, newest first
    List {
        /// Only notes in this folder
        #[arg(long)]
        folder: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create a note
    Add {
        /// Note title (optional when a body is given)
        title: Option<String>,
        /// Note body
        #[arg(long)]
        body: Option<String>,
        /// Folder name
        #[arg(long)]
        folder: Option<String>,
    },
    /// Edit a note's fields
    Edit {
        /// Note ID
        id: String,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New body
        #[arg(long)]
        body: Option<String>,
        /// New folder
        #[arg(long)]
        folder: Option<String>,
    },
    /// Remove a note
    Remove {
        /// Note ID
        id: String,
    },
}

#[derive(Subcommand)]
enum EventCommands {
    /// List events in date order
    List {
        /// Show the 7-day agenda for the week containing DATE (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        week: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create an event
    Add {
        /// Event title
        title: String,
        /// Event date (YYYY-MM-DD)
        date: String,
        /// Event time (HH:MM)
        time: String,
        /// Arm a reminder at the event start
        #[arg(long)]
        reminder: bool,
        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,
    },
    /// Arm an event's reminder (or clear it with --off)
    Remind {
        /// Event ID
        id: String,
        /// Clear the reminder instead
        #[arg(long)]
        off: bool,
    },
    /// Remove an event
    Remove {
        /// Event ID
        id: String,
    },
}

#[derive(Subcommand)]
enum ProfileCommands {
    /// Show the saved profile
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Update profile fields
    Save {
        /// Display name
        #[arg(long)]
        name: Option<String>,
        /// Email address
        #[arg(long)]
        email: Option<String>,
        /// Avatar image URL (empty clears it)
        #[arg(long)]
        avatar_url: Option<String>,
    },
    /// Sign in with an email address
    SignIn {
        /// Email address
        email: String,
        /// Display name
        #[arg(long)]
        name: Option<String>,
    },
    /// Sign out, keeping local data
    SignOut,
}

#[derive(Subcommand)]
enum MediaCommands {
    /// List media library items
    List {
        /// Only items in this folder
        #[arg(long)]
        folder: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Import an image or video file
    Import {
        /// Path to the media file
        path: PathBuf,
        /// Folder name
        #[arg(long, default_value = "Library")]
        folder: String,
    },
    /// Remove a media item
    Remove {
        /// Media item ID
        id: String,
    },
}

#[derive(Subcommand)]
enum ThemeCommands {
    /// Show the current theme colors
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set a theme color (hex, e.g. #00f5ff)
    Set {
        /// Field name (background, foreground, sidebar, sidebar_text, surface, accent)
        field: String,
        /// Hex color value
        value: String,
    },
    /// Restore the default palette
    Reset,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Core(#[from] alcove_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("Nothing to save; pass --name, --email, or --avatar-url")]
    EmptyProfilePatch,
    #[error(
        "Sync is not configured. Set ALCOVE_REMOTE_URL (and optionally ALCOVE_REMOTE_TOKEN) to enable `alcove sync`."
    )]
    SyncNotConfigured,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("alcove=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let db_path = resolve_db_path(cli.db_path);

    match cli.command {
        Commands::Links { command } => run_links(command, &db_path).await?,
        Commands::Notes { command } => run_notes(command, &db_path).await?,
        Commands::Events { command } => run_events(command, &db_path).await?,
        Commands::Profile { command } => run_profile(command, &db_path).await?,
        Commands::Media { command } => run_media(command, &db_path).await?,
        Commands::Theme { command } => run_theme(command, &db_path).await?,
        Commands::Sync => run_sync(&db_path).await?,
        Commands::Watch => run_watch(&db_path).await?,
        Commands::Completions { shell, output } => run_completions(shell, output.as_deref())?,
    }

    Ok(())
}

async fn run_links(command: LinkCommands, db_path: &Path) -> Result<(), CliError> {
    let app = open_app(db_path).await?;

    match command {
        LinkCommands::List { json } => {
            let links = app.links.list();
            if json {
                println!("{}", serde_json::to_string_pretty(&links)?);
            } else {
                for line in format_link_lines(&links) {
                    println!("{line}");
                }
            }
        }
        LinkCommands::Add { name, url, pinned } => {
            let link = app.links.add(&name, &url, pinned).await?;
            println!("{}", link.id);
        }
        LinkCommands::Remove { id } => {
            let link = app.links.remove(&id).await?;
            println!("{}", link.id);
        }
        LinkCommands::Pin { id, off } => {
            let link = app.links.set_pinned(&id, !off).await?;
            println!("{}", link.id);
        }
        LinkCommands::Reorder { from, to } => {
            app.links.reorder(from, to).await?;
            println!("Moved {from} to {to}");
        }
        LinkCommands::Reset => {
            app.links.reset_defaults().await;
            println!("Links reset to defaults");
        }
    }

    app.flush().await;
    Ok(())
}

async fn run_notes(command: NoteCommands, db_path: &Path) -> Result<(), CliError> {
    let app = open_app(db_path).await?;

    match command {
        NoteCommands::List { folder, json } => {
            let notes = match folder {
                Some(folder) => app.notes.in_folder(&folder),
                None => app.notes.list(),
            };
            if json {
                let items = notes.iter().map(note_to_list_item).collect::<Vec<_>>();
                println!("{}", serde_json::to_string_pretty(&items)?);
            } else {
                for line in format_note_lines(&notes) {
                    println!("{line}");
                }
            }
        }
        NoteCommands::Add {
            title,
            body,
            folder,
        } => {
            let note = app
                .notes
                .add(
                    title.as_deref().unwrap_or(""),
                    body.as_deref().unwrap_or(""),
                    folder.as_deref().unwrap_or(""),
                )
                .await?;
            println!("{}", note.id);
        }
        NoteCommands::Edit {
            id,
            title,
            body,
            folder,
        } => {
            let note = app
                .notes
                .edit(&id, title.as_deref(), body.as_deref(), folder.as_deref())
                .await?;
            println!("{}", note.id);
        }
        NoteCommands::Remove { id } => {
            let note = app.notes.remove(&id).await?;
            println!("{}", note.id);
        }
    }

    app.flush().await;
    Ok(())
}

async fn run_events(command: EventCommands, db_path: &Path) -> Result<(), CliError> {
    let app = open_app(db_path).await?;

    match command {
        EventCommands::List { week, json } => match week {
            Some(raw) => {
                let start = parse_week_start(&raw)?;
                let agenda = app.events.week_agenda(start);
                if json {
                    let days = agenda
                        .into_iter()
                        .map(|(day, events)| DayAgenda {
                            date: date_key(day),
                            events,
                        })
                        .collect::<Vec<_>>();
                    println!("{}", serde_json::to_string_pretty(&days)?);
                } else {
                    for (day, events) in &agenda {
                        println!("{}", day.format("%a %Y-%m-%d"));
                        for event in events {
                            println!("  {}  {}", event.time, event.title);
                        }
                    }
                }
            }
            None => {
                let mut events = app.events.list();
                events.sort_by_key(|event| (event.date.clone(), event.time.clone()));
                if json {
                    println!("{}", serde_json::to_string_pretty(&events)?);
                } else {
                    for line in format_event_lines(&events) {
                        println!("{line}");
                    }
                }
            }
        },
        EventCommands::Add {
            title,
            date,
            time,
            reminder,
            notes,
        } => {
            let event = app
                .events
                .add(&title, &date, &time, reminder, notes.as_deref())
                .await?;
            println!("{}", event.id);
        }
        EventCommands::Remind { id, off } => {
            let event = app.events.set_reminder(&id, !off).await?;
            println!("{}", event.id);
        }
        EventCommands::Remove { id } => {
            let event = app.events.remove(&id).await?;
            println!("{}", event.id);
        }
    }

    app.flush().await;
    Ok(())
}

async fn run_profile(command: ProfileCommands, db_path: &Path) -> Result<(), CliError> {
    let app = open_app(db_path).await?;

    match command {
        ProfileCommands::Show { json } => {
            let profile = app.profile.current();
            let signed_in = app.profile.signed_in();
            if json {
                let view = ProfileView { profile, signed_in };
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else if let Some(profile) = profile {
                println!("Name:      {}", profile.name);
                println!("Email:     {}", profile.email);
                if let Some(avatar_url) = &profile.avatar_url {
                    println!("Avatar:    {avatar_url}");
                }
                println!("Signed in: {signed_in}");
            } else {
                println!("No profile saved");
            }
        }
        ProfileCommands::Save {
            name,
            email,
            avatar_url,
        } => {
            let patched = apply_profile_patch(app.profile.current(), name, email, avatar_url)?;
            let saved = app.profile.save(patched).await;
            println!("Saved profile for {}", saved.email);
        }
        ProfileCommands::SignIn { email, name } => {
            let profile = app.profile.sign_in(&email, name.as_deref()).await?;
            println!("Signed in as {}", profile.email);
        }
        ProfileCommands::SignOut => {
            app.profile.sign_out()?;
            println!("Signed out");
        }
    }

    app.flush().await;
    Ok(())
}

async fn run_media(command: MediaCommands, db_path: &Path) -> Result<(), CliError> {
    let app = open_app(db_path).await?;

    match command {
        MediaCommands::List { folder, json } => {
            let items = match folder {
                Some(folder) => app.media.in_folder(&folder),
                None => app.media.list(),
            };
            if json {
                let views = items.iter().map(media_to_list_item).collect::<Vec<_>>();
                println!("{}", serde_json::to_string_pretty(&views)?);
            } else {
                for line in format_media_lines(&items) {
                    println!("{line}");
                }
            }
        }
        MediaCommands::Import { path, folder } => {
            let item = app.media.import(&path, &folder)?;
            println!("{}", item.id);
        }
        MediaCommands::Remove { id } => {
            let item = app.media.remove(&id)?;
            println!("{}", item.id);
        }
    }

    Ok(())
}

async fn run_theme(command: ThemeCommands, db_path: &Path) -> Result<(), CliError> {
    let app = open_app(db_path).await?;

    match command {
        ThemeCommands::Show { json } => {
            let theme = app.theme.load();
            if json {
                println!("{}", serde_json::to_string_pretty(&theme)?);
            } else {
                for line in format_theme_lines(&theme) {
                    println!("{line}");
                }
            }
        }
        ThemeCommands::Set { field, value } => {
            app.theme.set_field(&field, &value)?;
            println!("{field} set to {value}");
        }
        ThemeCommands::Reset => {
            app.theme.reset()?;
            println!("Theme reset to defaults");
        }
    }

    Ok(())
}

async fn run_sync(db_path: &Path) -> Result<(), CliError> {
    let app = open_app(db_path).await?;
    if !app.remote_configured {
        return Err(CliError::SyncNotConfigured);
    }

    app.links.refresh().await?;
    app.notes.refresh().await?;
    app.events.refresh().await?;
    app.profile.refresh().await?;
    app.flush().await;

    println!("Sync completed");
    Ok(())
}

async fn run_watch(db_path: &Path) -> Result<(), CliError> {
    let app = open_app(db_path).await?;
    let scheduler = ReminderScheduler::new(Arc::new(TerminalNotificationSink));
    let timers = scheduler.run(app.events.subscribe());

    println!("Watching for reminders (Ctrl-C to stop)");
    tokio::signal::ctrl_c().await?;

    timers.abort();
    app.flush().await;
    Ok(())
}

fn run_completions(shell: CompletionShell, output_path: Option<&Path>) -> Result<(), CliError> {
    let mut command = Cli::command();
    let mut buffer = Vec::new();

    match shell {
        CompletionShell::Bash => generate_for_shell(shells::Bash, &mut command, &mut buffer),
        CompletionShell::Zsh => generate_for_shell(shells::Zsh, &mut command, &mut buffer),
        CompletionShell::Fish => generate_for_shell(shells::Fish, &mut command, &mut buffer),
    }

    if let Some(path) = output_path {
        std::fs::write(path, &buffer)?;
        println!("{}", path.display());
    } else {
        io::stdout().write_all(&buffer)?;
    }

    Ok(())
}

fn generate_for_shell<G: Generator>(
    generator: G,
    command: &mut clap::Command,
    buffer: &mut Vec<u8>,
) {
    generate(generator, command, "alcove", buffer);
}

/// Services wired over one state database, hydrated and, when the remote
/// is configured, attached for the lifetime of the process.
struct App {
    links: LinkService,
    notes: NoteService,
    events: EventService,
    profile: ProfileService,
    media: MediaService,
    theme: ThemeService,
    remote_configured: bool,
}

impl App {
    async fn flush(&self) {
        self.links.flush().await;
        self.notes.flush().await;
        self.events.flush().await;
        self.profile.flush().await;
    }
}

async fn open_app(db_path: &Path) -> Result<App, CliError> {
    let store: Arc<dyn StateStore> = Arc::new(SqliteStateStore::open(db_path)?);
    let cache = EntityCache::new(Arc::clone(&store));
    let user = IdentityProvider::new(store).get_or_create()?;

    let config = RemoteConfig::from_env();
    let remote: Arc<dyn RemoteStore> = match &config.base_url {
        Some(base_url) => Arc::new(HttpRemoteStore::new(
            base_url.clone(),
            config.auth_token.clone(),
        )?),
        None => Arc::new(MemoryRemoteStore::new()),
    };

    let links = LinkService::new(Arc::new(SyncCore::new(
        cache.clone(),
        Arc::new(LinkCollection::new(Arc::clone(&remote))),
        config.clone(),
    )));
    let notes = NoteService::new(Arc::new(SyncCore::new(
        cache.clone(),
        Arc::new(NoteCollection::new(Arc::clone(&remote))),
        config.clone(),
    )));
    let events = EventService::new(Arc::new(SyncCore::new(
        cache.clone(),
        Arc::new(EventCollection::new(Arc::clone(&remote))),
        config.clone(),
    )));
    let profile = ProfileService::new(cache.clone(), remote, config.clone());
    let media = MediaService::new(cache.clone());
    let theme = ThemeService::new(cache);

    links.hydrate();
    notes.hydrate();
    events.hydrate();
    profile.hydrate();

    let remote_configured = config.is_configured();
    if remote_configured {
        links.attach(user.clone()).await;
        notes.attach(user.clone()).await;
        events.attach(user.clone()).await;
        profile.attach(user).await;
    }

    Ok(App {
        links,
        notes,
        events,
        profile,
        media,
        theme,
        remote_configured,
    })
}

/// Prints reminder notifications to stdout; permission is always granted.
struct TerminalNotificationSink;

#[async_trait]
impl NotificationSink for TerminalNotificationSink {
    fn permission(&self) -> NotificationPermission {
        NotificationPermission::Granted
    }

    async fn request_permission(&self) {}

    fn notify(&self, title: &str, body: &str) {
        println!("Reminder: {title} ({body})");
    }
}

#[derive(Debug, Serialize)]
struct NoteListItem {
    id: String,
    title: String,
    preview: String,
    folder: String,
    updated_at: i64,
    relative_time: String,
}

fn note_to_list_item(note: &Note) -> NoteListItem {
    let now_ms = Utc::now().timestamp_millis();
    NoteListItem {
        id: note.id.clone(),
        title: note.title.clone(),
        preview: preview(&note.body, 80),
        folder: note.folder.clone(),
        updated_at: note.updated_at,
        relative_time: format_relative_time(note.updated_at, now_ms),
    }
}

#[derive(Debug, Serialize)]
struct DayAgenda {
    date: String,
    events: Vec<Event>,
}

#[derive(Debug, Serialize)]
struct ProfileView {
    profile: Option<Profile>,
    signed_in: bool,
}

#[derive(Debug, Serialize)]
struct MediaListItem {
    id: String,
    name: String,
    kind: MediaKind,
    folder: String,
    created_at: i64,
}

fn media_to_list_item(item: &MediaItem) -> MediaListItem {
    MediaListItem {
        id: item.id.clone(),
        name: item.name.clone(),
        kind: item.kind,
        folder: item.folder.clone(),
        created_at: item.created_at,
    }
}

fn format_link_lines(links: &[Link]) -> Vec<String> {
    links
        .iter()
        .enumerate()
        .map(|(position, link)| {
            let marker = if link.pinned { "*" } else { " " };
            let id = &link.id;
            let name = preview(&link.name, 20);
            format!("{position:>2} {marker} {id:<18}  {name:<20}  {}", link.url)
        })
        .collect()
}

fn format_note_lines(notes: &[Note]) -> Vec<String> {
    let now_ms = Utc::now().timestamp_millis();
    notes
        .iter()
        .map(|note| {
            let id = &note.id;
            let title = preview(&note.title, 24);
            let folder = &note.folder;
            let relative_time = format_relative_time(note.updated_at, now_ms);
            format!("{id:<18}  {title:<24}  {folder:<10}  {relative_time}")
        })
        .collect()
}

fn format_event_lines(events: &[Event]) -> Vec<String> {
    events
        .iter()
        .map(|event| {
            let id = &event.id;
            let marker = if event.reminder_at.is_some() {
                "  [reminder]"
            } else {
                ""
            };
            format!(
                "{id:<18}  {} {}  {}{marker}",
                event.date, event.time, event.title
            )
        })
        .collect()
}

fn format_media_lines(items: &[MediaItem]) -> Vec<String> {
    items
        .iter()
        .map(|item| {
            let id = &item.id;
            let kind = kind_label(item.kind);
            let name = preview(&item.name, 24);
            format!("{id:<19}  {kind:<5}  {name:<24}  {}", item.folder)
        })
        .collect()
}

fn format_theme_lines(theme: &Theme) -> Vec<String> {
    THEME_FIELDS
        .iter()
        .map(|field| {
            let value = theme.field(field).unwrap_or_default();
            format!("{field:<13}  {value}")
        })
        .collect()
}

const fn kind_label(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Image => "image",
        MediaKind::Video => "video",
    }
}

fn preview(text: &str, max_chars: usize) -> String {
    let first_line = text.lines().next().unwrap_or("").trim();
    let collapsed = first_line.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.chars().count() <= max_chars {
        collapsed
    } else {
        let take_len = max_chars.saturating_sub(3);
        let mut truncated = collapsed.chars().take(take_len).collect::<String>();
        truncated.push_str("...");
        truncated
    }
}

fn format_relative_time(timestamp_ms: i64, now_ms: i64) -> String {
    let diff = now_ms.saturating_sub(timestamp_ms);
    let minute = 60_000;
    let hour = 60 * minute;
    let day = 24 * hour;

    if diff < minute {
        "just now".to_string()
    } else if diff < hour {
        format!("{}m ago", diff / minute)
    } else if diff < day {
        format!("{}h ago", diff / hour)
    } else {
        format!("{}d ago", diff / day)
    }
}

fn parse_week_start(raw: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| CliError::InvalidDate(raw.to_string()))
}

fn apply_profile_patch(
    current: Option<Profile>,
    name: Option<String>,
    email: Option<String>,
    avatar_url: Option<String>,
) -> Result<Profile, CliError> {
    if name.is_none() && email.is_none() && avatar_url.is_none() {
        return Err(CliError::EmptyProfilePatch);
    }

    let mut profile = current.unwrap_or_default();
    if let Some(name) = name {
        profile.name = name;
    }
    if let Some(email) = email {
        profile.email = email;
    }
    if let Some(avatar_url) = avatar_url {
        profile.avatar_url = Some(avatar_url);
    }
    Ok(profile)
}

fn resolve_db_path(cli_db_path: Option<PathBuf>) -> PathBuf {
    cli_db_path
        .or_else(|| env::var_os("ALCOVE_DB_PATH").map(PathBuf::from))
        .unwrap_or_else(default_db_path)
}

fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("alcove")
        .join("alcove.db")
}
