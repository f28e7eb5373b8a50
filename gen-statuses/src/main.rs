//! gen-statuses - Rewrite text into dialect and post it one status at a time

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gen_statuses::store::{StatusStore, default_persist_dir};
use gen_statuses::text::{Chunk, DialectTransformer};
use gen_statuses::{StatusesConfig, generate};
use status_poster::{PostOutcome, StatusPoster, get_poster, post_everywhere};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "gen-statuses")]
#[command(about = "Rewrite text into dialect and post it one status at a time", long_about = None)]
#[command(version)]
struct Args {
    /// Directory holding statuses.json and the cursor file
    #[arg(long, global = true)]
    persist_dir: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true, default_value_t = false)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Transform a text file and write statuses.json
    Generate {
        /// Source text, one paragraph per line
        input: PathBuf,
    },
    /// Post the chunk after the last posted one and advance the cursor
    Next {
        /// Print the chunk without posting or moving the cursor
        #[arg(long)]
        dry_run: bool,
    },
    /// Print chunks locally in posting order
    Preview {
        /// Regenerate statuses.json from this file first
        #[arg(long)]
        regen: Option<PathBuf>,

        /// Index of the first chunk to show
        #[arg(long, default_value_t = 0)]
        from: usize,

        /// Number of chunks to show (default: all)
        #[arg(long)]
        count: Option<usize>,

        /// Delay between chunks in milliseconds
        #[arg(long, default_value_t = 2000)]
        interval_ms: u64,
    },
    /// Transform a single sentence and print it
    Transform {
        /// The sentence (words may be passed unquoted)
        #[arg(required = true)]
        sentence: Vec<String>,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Show current configuration
    Show,
    /// Set the maximum status length
    SetMaxLength {
        /// Characters per status (at least 3)
        value: usize,
    },
    /// Set the default persist directory
    SetPersistDir {
        /// Directory for statuses.json and the cursor file
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.debug);

    match args.command {
        Commands::Config { action } => handle_config_command(&action)?,
        Commands::Generate { input } => {
            let (config, store) = load_context(args.persist_dir.as_deref())?;
            let count = generate_and_write(&input, &config, &store)?;
            println!(
                "Wrote {} chunks to {}",
                count,
                store.dir().join(gen_statuses::store::STATUSES_FILE).display()
            );
        }
        Commands::Next { dry_run } => {
            let (config, store) = load_context(args.persist_dir.as_deref())?;
            post_next(&config, &store, dry_run).await?;
        }
        Commands::Preview {
            regen,
            from,
            count,
            interval_ms,
        } => {
            let (config, store) = load_context(args.persist_dir.as_deref())?;
            if let Some(input) = regen {
                eprintln!("generating and writing...");
                generate_and_write(&input, &config, &store)?;
                eprintln!("done writing.");
            }
            preview(&store, from, count, Duration::from_millis(interval_ms)).await?;
        }
        Commands::Transform { sentence } => {
            let config = StatusesConfig::load().context("Failed to load configuration")?;
            let transformer = DialectTransformer::new(config.generate_options().table);
            println!("{}", transformer.transform(&sentence.join(" ")));
        }
    }

    Ok(())
}

fn init_logging(debug: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if debug {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.init();
}

/// Load configuration and open the store.
///
/// Persist dir precedence: --persist-dir, then config, then the data dir.
fn load_context(persist_dir: Option<&Path>) -> Result<(StatusesConfig, StatusStore)> {
    let config = StatusesConfig::load().context("Failed to load configuration")?;
    let dir = match persist_dir.or(config.persist_dir.as_deref()) {
        Some(dir) => dir.to_path_buf(),
        None => default_persist_dir()?,
    };
    let store = StatusStore::open(&dir)?;
    log::debug!("persist dir: {}", store.dir().display());
    Ok((config, store))
}

fn generate_and_write(input: &Path, config: &StatusesConfig, store: &StatusStore) -> Result<usize> {
    let text = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;

    let chunks = generate(&text, &config.generate_options())
        .with_context(|| format!("Failed to generate statuses from {}", input.display()))?;
    store.save_statuses(&chunks)?;

    Ok(chunks.len())
}

async fn post_next(config: &StatusesConfig, store: &StatusStore, dry_run: bool) -> Result<()> {
    let posters = config
        .posters
        .iter()
        .map(|name| get_poster(name))
        .collect::<Result<Vec<Box<dyn StatusPoster>>, _>>()
        .context("Invalid poster in configuration")?;

    deliver_next(&posters, store, dry_run).await?;
    Ok(())
}

/// Post the next chunk through every poster and advance the cursor.
///
/// The cursor moves even when some posters fail.
async fn deliver_next(
    posters: &[Box<dyn StatusPoster>],
    store: &StatusStore,
    dry_run: bool,
) -> Result<Vec<PostOutcome>> {
    let (next, chunk) = store.next()?;

    if dry_run {
        println!("{}: {}", next, describe(&chunk));
        return Ok(Vec::new());
    }

    let outcomes = post_everywhere(posters, &chunk.statuses()).await;
    for outcome in &outcomes {
        match &outcome.result {
            Ok(posted) => {
                let ids: Vec<&str> = posted.iter().map(|p| p.id.as_str()).collect();
                log::info!("{} posted:\n{}", outcome.poster, ids.join("\n"));
            }
            Err(e) => log::error!("error while posting to {}:\n{}", outcome.poster, e),
        }
    }

    store.write_cursor(next)?;
    log::info!("wrote latest index: {}", next);
    Ok(outcomes)
}

async fn preview(
    store: &StatusStore,
    from: usize,
    count: Option<usize>,
    interval: Duration,
) -> Result<()> {
    let chunks = store.load_statuses()?;
    if chunks.is_empty() {
        anyhow::bail!("No statuses to preview");
    }

    let count = count.unwrap_or(chunks.len());
    for step in 0..count {
        let idx = (from + step) % chunks.len();
        let chunk = &chunks[idx];
        println!("{} : {}", idx, describe(chunk));
        println!("({})\n", lengths(chunk));

        if step + 1 < count && !interval.is_zero() {
            tokio::time::sleep(interval).await;
        }
    }

    Ok(())
}

fn describe(chunk: &Chunk) -> String {
    match chunk {
        Chunk::Single(text) => text.clone(),
        Chunk::Group(members) => format!("[\n  {}\n]", members.join("\n  ")),
    }
}

fn lengths(chunk: &Chunk) -> String {
    chunk
        .statuses()
        .iter()
        .map(|s| s.chars().count().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn handle_config_command(action: &ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = StatusesConfig::load()?;
            println!("Configuration file: {:?}", StatusesConfig::config_path()?);
            println!();
            if let Some(dir) = &config.persist_dir {
                println!("persist_dir = \"{}\"", dir.display());
            } else {
                println!("persist_dir = (default: {})", default_persist_dir()?.display());
            }
            println!("max_length = {}", config.max_length);
            println!("exclamations = {:?}", config.exclamations);
            println!("posters = {:?}", config.posters);
            for (from, to) in &config.substitutions {
                println!("substitution: {} -> {}", from, to);
            }
            for (from, to) in &config.plain_substitutions {
                println!("plain substitution: {} -> {}", from, to);
            }
        }
        ConfigAction::SetMaxLength { value } => {
            let mut config = StatusesConfig::load()?;
            config.max_length = *value;
            config.save()?;
            println!("Maximum status length set to: {}", config.max_length);
        }
        ConfigAction::SetPersistDir { path } => {
            let mut config = StatusesConfig::load()?;
            config.persist_dir = Some(path.clone());
            config.save()?;
            println!("Persist directory set to: {}", path.display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use status_poster::{MockPoster, PostError};
    use tempfile::TempDir;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_preview_args() {
        let args = Args::parse_from([
            "gen-statuses",
            "preview",
            "--from",
            "3",
            "--count",
            "2",
            "--interval-ms",
            "0",
        ]);
        match args.command {
            Commands::Preview {
                from,
                count,
                interval_ms,
                regen,
            } => {
                assert_eq!(from, 3);
                assert_eq!(count, Some(2));
                assert_eq!(interval_ms, 0);
                assert!(regen.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_describe_and_lengths() {
        let group = Chunk::Group(vec!["ab…".to_string(), "…cd".to_string()]);
        assert_eq!(describe(&group), "[\n  ab…\n  …cd\n]");
        assert_eq!(lengths(&group), "3, 3");
    }

    #[test]
    fn test_generate_and_write() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("source.txt");
        std::fs::write(&input, "THE END\nThis is a test.\n").unwrap();
        let store = StatusStore::open(&temp_dir.path().join("persist")).unwrap();

        let count = generate_and_write(&input, &StatusesConfig::default(), &store).unwrap();
        assert_eq!(count, 2);
        assert_eq!(
            store.load_statuses().unwrap(),
            vec![
                Chunk::Single("DE END".to_string()),
                Chunk::Single("Dis is da test.".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_post_next_advances_cursor() {
        let temp_dir = TempDir::new().unwrap();
        let store = StatusStore::open(temp_dir.path()).unwrap();
        store
            .save_statuses(&[
                Chunk::Single("one".to_string()),
                Chunk::Single("two".to_string()),
            ])
            .unwrap();

        let config = StatusesConfig::default();
        post_next(&config, &store, false).await.unwrap();
        assert_eq!(store.read_cursor().unwrap(), Some(0));
        post_next(&config, &store, false).await.unwrap();
        assert_eq!(store.read_cursor().unwrap(), Some(1));
        post_next(&config, &store, true).await.unwrap();
        assert_eq!(store.read_cursor().unwrap(), Some(1));
    }

    #[tokio::test]
    async fn test_failing_poster_does_not_block_cursor() {
        let temp_dir = TempDir::new().unwrap();
        let store = StatusStore::open(temp_dir.path()).unwrap();
        store
            .save_statuses(&[
                Chunk::Group(vec!["one…".to_string(), "…more".to_string()]),
                Chunk::Single("two".to_string()),
            ])
            .unwrap();

        let posters: Vec<Box<dyn StatusPoster>> = vec![
            Box::new(
                MockPoster::always_fails(PostError::Unavailable("offline".to_string()))
                    .with_name("broken"),
            ),
            Box::new(MockPoster::always_succeeds().with_name("working")),
        ];

        let outcomes = deliver_next(&posters, &store, false).await.unwrap();
        assert_eq!(outcomes.len(), 2);
        assert_eq!(outcomes[0].poster, "broken");
        assert!(!outcomes[0].is_success());
        assert_eq!(outcomes[1].poster, "working");
        assert_eq!(outcomes[1].result.as_ref().unwrap().len(), 2);
        assert_eq!(store.read_cursor().unwrap(), Some(0));

        let outcomes = deliver_next(&posters, &store, false).await.unwrap();
        assert!(outcomes[1].is_success());
        assert_eq!(store.read_cursor().unwrap(), Some(1));
    }
}
