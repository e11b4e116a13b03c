//! shortfeed - short-video feed from the command line
//!
//! Fetches the video feed, toggles persisted likes and mirrors videos to the
//! local cache.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use shortfeed::cache::{PlaybackSource, VideoCache};
use shortfeed::controller::{FeedController, ProfileController, UserProfile};
use shortfeed::database::{initialize_database, SqliteBackend};
use shortfeed::feed::{FeedService, VideoId, VideoSource};
use shortfeed::likes::LikeStore;
use shortfeed::utils::AppSettings;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "shortfeed", version, about = "Short-video feed client")]
struct Args {
    /// JSON settings file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch a page of the feed
    Feed {
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        per_page: Option<u32>,
        /// Position in the feed; only the window around it is printed
        #[arg(long, default_value_t = 0)]
        index: usize,
        /// Print every record as JSON
        #[arg(long)]
        json: bool,
    },
    /// Toggle the like on a video
    Like { id: VideoId },
    /// Show the like state of a video
    Status { id: VideoId },
    /// Show the profile grid and stats
    Profile,
    /// Mirror a video into the local cache
    Cache {
        url: Option<String>,
        /// Remove every cached video
        #[arg(long)]
        clear: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::fmt::init();

    let settings = AppSettings::load(args.config.as_deref())?;

    match args.command {
        Command::Feed {
            page,
            per_page,
            index,
            json,
        } => run_feed(&settings, page, per_page, index, json).await,
        Command::Like { id } => {
            let likes = open_like_store(&settings).await?;
            let state = likes.try_toggle_like(id).await?;
            println!(
                "video {}: {} ({} likes)",
                id,
                if state.liked { "liked" } else { "not liked" },
                state.count
            );
            Ok(())
        }
        Command::Status { id } => {
            let likes = open_like_store(&settings).await?;
            let state = likes.like_state(id).await;
            println!("video {}: liked={} count={}", id, state.liked, state.count);
            println!("total likes: {}", likes.total_likes().await);
            Ok(())
        }
        Command::Profile => run_profile(&settings).await,
        Command::Cache { url, clear } => run_cache(&settings, url, clear).await,
    }
}

async fn open_like_store(settings: &AppSettings) -> Result<LikeStore> {
    let pool = initialize_database(&settings.database_path)
        .await
        .context("Failed to open like database")?;
    Ok(LikeStore::new(Arc::new(SqliteBackend::new(pool))))
}

async fn run_feed(
    settings: &AppSettings,
    page: Option<u32>,
    per_page: Option<u32>,
    index: usize,
    json: bool,
) -> Result<()> {
    let mut settings = settings.clone();
    if let Some(page) = page {
        settings.page = page;
    }
    if let Some(per_page) = per_page {
        settings.per_page = per_page;
    }
    let settings = settings.validated();

    let service: Arc<dyn VideoSource> = Arc::new(FeedService::new(&settings)?);
    let likes = open_like_store(&settings).await?;
    let mut controller =
        FeedController::new(service, likes).with_window_radius(settings.window_radius);

    controller.load_videos().await;
    if let Some(e) = controller.error() {
        eprintln!("failed to load: {}", e);
        anyhow::bail!("feed unavailable");
    }

    if json {
        println!("{}", serde_json::to_string_pretty(controller.videos())?);
        return Ok(());
    }

    controller.set_current_index(index);
    let range = controller.visible_range();
    println!(
        "{} videos, showing {}..{}",
        controller.videos().len(),
        range.start,
        range.end
    );
    for (offset, video) in controller.visible_videos().iter().enumerate() {
        let marker = if range.start + offset == controller.current_index() {
            ">"
        } else {
            " "
        };
        let liked = if controller.is_liked(video).await { "♥" } else { " " };
        println!(
            "{} {} [{}] {:>4} {:>3}s @{} {}",
            marker,
            liked,
            video.id,
            controller.like_count(video).await,
            video.duration,
            video.username,
            video.video_url
        );
    }
    Ok(())
}

async fn run_profile(settings: &AppSettings) -> Result<()> {
    let service = FeedService::new(settings)?;
    let videos = match service.fetch_videos().await {
        Ok(videos) => videos,
        Err(e) => {
            eprintln!("failed to load: {}", e);
            anyhow::bail!("feed unavailable");
        }
    };

    let likes = open_like_store(settings).await?;
    let mut profile = ProfileController::new(likes, UserProfile::new(&settings.profile_username))
        .with_grid_size(settings.profile_grid_size);
    profile.load_profile(&videos).await;

    let user = profile.user();
    println!("@{}", user.username);
    println!("{} videos, {} likes", user.video_count, user.total_likes);
    for video in profile.user_videos() {
        println!("  [{}] {}", video.id, video.thumbnail_url);
    }
    Ok(())
}

async fn run_cache(settings: &AppSettings, url: Option<String>, clear: bool) -> Result<()> {
    let cache = VideoCache::new(&settings.cache_dir);

    if clear {
        cache.clear().await?;
        println!("cleared {}", cache.cache_dir().display());
        return Ok(());
    }

    let url = url.context("a video URL is required unless --clear is given")?;
    match cache.playback_source(&url).await {
        Some((PlaybackSource::Cached(path), _)) => println!("cached: {}", path.display()),
        Some((PlaybackSource::Remote(_), Some(download))) => {
            download.await?;
            if cache.is_cached(&url).await {
                println!("cached: {}", cache.cache_path(&url).display());
            } else {
                anyhow::bail!("failed to cache {}", url);
            }
        }
        Some((PlaybackSource::Remote(remote), None)) => println!("remote: {}", remote),
        None => anyhow::bail!("invalid video URL: {}", url),
    }
    Ok(())
}
