//! CLI entry point for `mailtriage`.

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};

use mailtriage::command::Mailbox;
use mailtriage::config::{self, Config};
use mailtriage::model::{FolderKey, Message, MessageId};
use mailtriage::seed;

#[derive(Parser)]
#[command(name = "mailtriage", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// JSON seed file with the initial message set (built-in demo set if omitted)
    #[arg(long, global = true, value_name = "FILE", env = "MAILTRIAGE_SEED")]
    seed: Option<PathBuf>,

    /// Verbose logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the TUI
    Open {
        /// Folder to show first (e.g. Inbox2)
        #[arg(long)]
        folder: Option<String>,
    },
    /// List every folder with its message count
    Folders {
        #[arg(long)]
        json: bool,
    },
    /// List the messages in a folder
    List {
        folder: String,
        #[arg(long)]
        json: bool,
    },
    /// Search a folder by subject, sender or recipient
    Search {
        folder: String,
        query: String,
        /// Field to match: Subject, Sender or Recipient
        #[arg(short, long, default_value = "Subject")]
        category: String,
        #[arg(long)]
        json: bool,
    },
    /// Show all, unread (not important) or important messages across every mailbox
    Filter {
        /// All, Unread or Important
        option: String,
        #[arg(long)]
        json: bool,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
    /// Generate a man page
    Manpage,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = config::load_config();

    let log_level = match cli.verbose {
        0 => config.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // The TUI owns the terminal, so it only logs to file.
    let interactive = matches!(cli.command, None | Some(Commands::Open { .. }));
    setup_logging(log_level, &config, !interactive);

    let seed_path = cli.seed.clone().or_else(|| config.seed.path.clone());

    match cli.command {
        None => cmd_open(seed_path, None, &config),
        Some(Commands::Open { folder }) => cmd_open(seed_path, folder, &config),
        Some(Commands::Folders { json }) => cmd_folders(seed_path, json, &config),
        Some(Commands::List { folder, json }) => cmd_list(seed_path, &folder, json, &config),
        Some(Commands::Search {
            folder,
            query,
            category,
            json,
        }) => cmd_search(seed_path, &folder, &query, &category, json, &config),
        Some(Commands::Filter { option, json }) => cmd_filter(seed_path, &option, json, &config),
        Some(Commands::Completions { shell }) => cmd_completions(shell),
        Some(Commands::Manpage) => cmd_manpage(),
    }
}

/// Set up tracing with optional stderr output and file logging.
fn setup_logging(level: &str, config: &Config, to_stderr: bool) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let stderr_layer =
        to_stderr.then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    let log_path = config::log_file_path(config);
    let log_dir = log_path.parent().unwrap_or(std::path::Path::new("."));
    let log_name = log_path.file_name().unwrap_or_default();
    let file_layer = std::fs::create_dir_all(log_dir).is_ok().then(|| {
        let file_appender = tracing_appender::rolling::never(log_dir, log_name);
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(file_appender)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();
}

/// Build the engine from the configured seed, looking at `folder`.
fn load_mailbox(seed_path: Option<PathBuf>, folder: FolderKey) -> anyhow::Result<Mailbox> {
    let provider = seed::provider_for(seed_path.as_deref());
    let messages = provider.load()?;
    tracing::info!(source = %provider.describe(), messages = messages.len(), "Seed loaded");
    Ok(Mailbox::with_messages(messages, folder))
}

/// Generate shell completions and print to stdout.
fn cmd_completions(shell: clap_complete::Shell) -> anyhow::Result<()> {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "mailtriage", &mut std::io::stdout());
    Ok(())
}

/// Generate a man page and print to stdout.
fn cmd_manpage() -> anyhow::Result<()> {
    let cmd = Cli::command();
    let man = clap_mangen::Man::new(cmd);
    let mut buf = Vec::new();
    man.render(&mut buf)?;
    std::io::Write::write_all(&mut std::io::stdout(), &buf)?;
    Ok(())
}

/// Open the TUI.
fn cmd_open(seed_path: Option<PathBuf>, folder: Option<String>, config: &Config) -> anyhow::Result<()> {
    let folder = folder
        .map(FolderKey::new)
        .unwrap_or_else(|| config.general.default_folder_key());
    let mailbox = load_mailbox(seed_path, folder)?;
    mailtriage::tui::run_tui(mailbox, config)
}

/// Print every known folder with its message count.
fn cmd_folders(seed_path: Option<PathBuf>, json: bool, config: &Config) -> anyhow::Result<()> {
    let mailbox = load_mailbox(seed_path, config.general.default_folder_key())?;
    let store = mailbox.store();
    let counts = store.folder_counts();

    if json {
        let mailboxes: Vec<serde_json::Value> = store
            .mailbox_indices()
            .iter()
            .map(|index| {
                let folders: Vec<serde_json::Value> = FolderKey::mailbox_folders(index)
                    .iter()
                    .map(|key| {
                        serde_json::json!({
                            "folder": key,
                            "count": counts.get(key).copied().unwrap_or(0),
                        })
                    })
                    .collect();
                serde_json::json!({ "mailbox": index, "folders": folders })
            })
            .collect();
        let output = serde_json::json!({
            "message_count": store.len(),
            "mailboxes": mailboxes,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!();
    for index in store.mailbox_indices() {
        println!("  Mailbox {index}");
        for key in FolderKey::mailbox_folders(&index) {
            let count = counts.get(&key).copied().unwrap_or(0);
            println!("    {:<12} {:>5}", key.as_str(), count);
        }
    }
    println!();
    println!("  {} message(s)", store.len());
    println!();
    Ok(())
}

/// Print the messages of one folder.
fn cmd_list(seed_path: Option<PathBuf>, folder: &str, json: bool, config: &Config) -> anyhow::Result<()> {
    let key = FolderKey::new(folder);
    let mailbox = load_mailbox(seed_path, key.clone())?;
    if !mailbox.store().is_known_folder(&key) {
        tracing::warn!(folder, "Folder has never held a message");
    }
    print_visible(&mailbox, json, &config.general.checked_date_format())
}

/// Category search within one folder.
fn cmd_search(
    seed_path: Option<PathBuf>,
    folder: &str,
    query: &str,
    category: &str,
    json: bool,
    config: &Config,
) -> anyhow::Result<()> {
    let mut mailbox = load_mailbox(seed_path, FolderKey::new(folder))?;
    mailbox.search_named(query, category);
    print_visible(&mailbox, json, &config.general.checked_date_format())
}

/// Store-wide option filter.
fn cmd_filter(seed_path: Option<PathBuf>, option: &str, json: bool, config: &Config) -> anyhow::Result<()> {
    let mut mailbox = load_mailbox(seed_path, config.general.default_folder_key())?;
    if !mailbox.filter_by_option_named(option) {
        anyhow::bail!("Unknown filter '{option}' (expected All, Unread or Important)");
    }
    print_visible(&mailbox, json, &config.general.checked_date_format())
}

fn print_visible(mailbox: &Mailbox, json: bool, date_format: &str) -> anyhow::Result<()> {
    let rows: Vec<(MessageId, &Message)> = mailbox.visible_messages().collect();
    if json {
        print_messages_json(&rows)
    } else {
        print_messages_table(&rows, date_format);
        Ok(())
    }
}

/// Print messages in a human-readable table.
fn print_messages_table(rows: &[(MessageId, &Message)], date_format: &str) {
    println!();
    println!("  {} message(s)", rows.len());
    println!();

    if rows.is_empty() {
        return;
    }

    println!(
        "  {:<5} {:<1} {:<10} {:<8} {:<25} {:<40} {:>1}",
        "#", "!", "Date", "Folder", "From", "Subject", "@"
    );
    println!("  {}", "-".repeat(98));

    for (id, m) in rows {
        let from_trunc: String = m.sender.chars().take(24).collect();
        let subj_trunc: String = m.subject.chars().take(39).collect();
        println!(
            "  {:<5} {:<1} {:<10} {:<8} {:<25} {:<40} {:>1}",
            id.to_string(),
            if m.is_important { "!" } else { " " },
            m.date_sent.format(date_format).to_string(),
            m.folder.as_str(),
            from_trunc,
            subj_trunc,
            if m.attachments.is_empty() { " " } else { "@" },
        );
    }
    println!();
}

/// Print messages as JSON.
fn print_messages_json(rows: &[(MessageId, &Message)]) -> anyhow::Result<()> {
    let items: Vec<serde_json::Value> = rows
        .iter()
        .map(|(id, m)| {
            serde_json::json!({
                "id": id.to_string(),
                "folder": m.folder,
                "date": m.date_sent.to_rfc3339(),
                "sender": m.sender,
                "recipients": m.recipients,
                "subject": m.subject,
                "is_important": m.is_important,
                "attachments": m.attachments,
            })
        })
        .collect();

    let output = serde_json::json!({
        "result_count": rows.len(),
        "results": items,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
