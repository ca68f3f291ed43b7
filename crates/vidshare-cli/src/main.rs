//! Vidshare CLI: browse, upload, watch and comment from the terminal.
//!
//! The store is chosen by STORE_BACKEND (memory, local or rest). Use the local
//! backend (LOCAL_STORE_PATH) to keep videos between invocations.

use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use serde::Serialize;
use uuid::Uuid;
use vidshare_cli::{comment_line, feed_line, guess_media_type, init_tracing};
use vidshare_client::format::{format_file_size, format_views};
use vidshare_client::{
    CommentThread, FeedService, FeedState, RngSource, UploadWorkflow, WatchPage, WatchService,
};
use vidshare_core::{Config, VideoFile};
use vidshare_storage::create_store;

#[derive(Parser)]
#[command(name = "vidshare", about = "Video sharing CLI")]
struct Cli {
    /// Print JSON instead of text lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the home feed
    Feed {
        /// Seed for a reproducible feed order
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Upload a video file
    Upload {
        /// Path to the video file
        file: PathBuf,
        /// Video title
        #[arg(long)]
        title: String,
        /// Optional description
        #[arg(long)]
        description: Option<String>,
        /// Declared media type (guessed from the extension when omitted)
        #[arg(long)]
        content_type: Option<String>,
    },
    /// Watch a video: counts a view and lists its comments
    Watch {
        /// Video UUID
        id: Uuid,
    },
    /// Comment on a video
    Comment {
        /// Video UUID
        id: Uuid,
        /// Display name
        #[arg(long)]
        author: String,
        /// Comment text
        #[arg(long)]
        text: String,
    },
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize output")?;
    println!("{}", out);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();

    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate()?;
    let store = create_store(&config)
        .await
        .context("Failed to create media store")?;

    match cli.command {
        Commands::Feed { seed } => {
            let service = FeedService::new(store);
            let state = match seed {
                Some(seed) => service.load(&mut RngSource::seeded(seed)).await,
                None => service.load(&mut RngSource::thread()).await,
            };

            match state {
                FeedState::Empty if cli.json => print_json(&Vec::<()>::new())?,
                FeedState::Empty => println!("No videos yet"),
                FeedState::Failed { message } => anyhow::bail!(message),
                FeedState::Ready(feed) if cli.json => print_json(&feed.videos())?,
                FeedState::Ready(feed) => {
                    let now = Utc::now();
                    for video in feed.videos() {
                        println!("{}", feed_line(video, now));
                    }
                }
            }
        }
        Commands::Upload {
            file,
            title,
            description,
            content_type,
        } => {
            let data = tokio::fs::read(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let name = file
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "upload".to_string());
            let media_type = content_type.unwrap_or_else(|| guess_media_type(&file).to_string());
            let video = VideoFile::new(name, media_type, data);
            eprintln!("Selected {} ({})", video.name, format_file_size(video.size()));

            let mut workflow = UploadWorkflow::new(store, config.upload_settings().clone());
            workflow.open();
            workflow.select_file(Some(video))?;
            workflow.set_title(&title);
            workflow.set_description(description.as_deref().unwrap_or(""));

            let mut progress = workflow.subscribe_progress();
            let reporter = tokio::spawn(async move {
                while progress.changed().await.is_ok() {
                    let percent = *progress.borrow_and_update();
                    if percent > 0 {
                        eprintln!("Uploading... {}%", percent);
                    }
                }
            });

            let result = workflow.submit().await;
            drop(workflow);
            let _ = reporter.await;

            let record = result?;
            if cli.json {
                print_json(&record)?;
            } else {
                println!("Uploaded {} ({})", record.title, record.id);
                println!("{}", record.video_url);
            }
        }
        Commands::Watch { id } => {
            let service = WatchService::new(store);
            let (video, thread) = match service.open(id).await? {
                WatchPage::Ready { video, comments } => (video, comments),
                WatchPage::NotFound => anyhow::bail!("Video not found"),
            };

            if cli.json {
                print_json(&serde_json::json!({
                    "video": video,
                    "comments": thread.comments(),
                }))?;
            } else {
                let now = Utc::now();
                println!("{}", video.title);
                println!("{} views", format_views(video.views));
                println!("{}", video.video_url);
                if let Some(description) = &video.description {
                    println!();
                    println!("{}", description);
                }
                println!();
                println!("{} Comments", thread.comments().len());
                for comment in thread.comments() {
                    println!("{}", comment_line(comment, now));
                }
            }
        }
        Commands::Comment { id, author, text } => {
            let mut thread = CommentThread::new(store, id, Vec::new());
            thread.set_author(&author);
            thread.set_text(&text);
            let record = thread.submit().await?;

            if cli.json {
                print_json(&record)?;
            } else {
                println!("{}", comment_line(&record, Utc::now()));
            }
        }
    }

    Ok(())
}
