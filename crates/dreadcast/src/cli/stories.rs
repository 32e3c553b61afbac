//! Story store command handlers: fetch, next, status.

use super::commands::OutputFormat;
use super::print_json;
use dreadcast::{
    DreadcastConfig, DreadcastResult, FileSystemStoryStore, RedditClient, Story, StoryStore,
    TimeWindow, fetch_and_save, next_unprocessed, processing_status,
};
use tracing::instrument;

/// Characters of body text shown by `next`.
const PREVIEW_CHARS: usize = 280;

/// Fetch top posts into the store.
#[instrument(skip(config))]
pub async fn run_fetch(
    config: &DreadcastConfig,
    subreddit: Option<String>,
    limit: Option<usize>,
    window: Option<TimeWindow>,
) -> DreadcastResult<()> {
    let mut reddit = config.reddit.clone();
    if let Some(window) = window {
        reddit.window = window;
    }
    let subreddit = subreddit.unwrap_or_else(|| reddit.subreddit.clone());
    let limit = limit.unwrap_or(reddit.limit);
    let window = reddit.window;

    let client = RedditClient::new(reddit)?;
    let store = FileSystemStoryStore::new(&config.paths.stories_dir)?;

    let report = fetch_and_save(&client, &store, &subreddit, limit).await?;

    println!(
        "Fetched {} stories from r/{} (top of the {})",
        report.fetched(),
        subreddit,
        window
    );
    println!("  new:             {}", report.saved.len());
    println!("  already stored:  {}", report.skipped.len());
    println!("Stories saved in {}", store.base_path().display());
    Ok(())
}

/// Show the next story `process` would narrate.
#[instrument(skip(config))]
pub async fn run_next(config: &DreadcastConfig, format: OutputFormat) -> DreadcastResult<()> {
    let store = FileSystemStoryStore::new(&config.paths.stories_dir)?;
    let next = next_unprocessed(&store).await?;

    match format {
        OutputFormat::Json => print_json(&next)?,
        OutputFormat::Human => match next {
            Some(story) => print_story(&story),
            None => println!("All stories have been processed."),
        },
    }
    Ok(())
}

/// Show processed/unprocessed counts.
#[instrument(skip(config))]
pub async fn run_status(config: &DreadcastConfig, format: OutputFormat) -> DreadcastResult<()> {
    let store = FileSystemStoryStore::new(&config.paths.stories_dir)?;
    let stories = store.load_all().await?;
    let status = processing_status(&stories);

    match format {
        OutputFormat::Json => print_json(&status.summary())?,
        OutputFormat::Human => {
            println!("Stories in {}", store.base_path().display());
            println!("  processed:    {}", status.processed);
            println!("  unprocessed:  {}", status.unprocessed);
            println!("  total:        {}", status.total);
            println!("  complete:     {:.1}%", status.completion_rate());
        }
    }
    Ok(())
}

fn print_story(story: &Story) {
    println!("{} [{}]", story.title(), story.id());
    println!("{:-<80}", "");
    println!("score:   {}", story.score());
    if let Some(author) = story.author() {
        println!("author:  u/{}", author);
    }
    if let Some(permalink) = story.permalink() {
        println!("link:    {}", permalink);
    }
    println!("words:   {}", story.body().split_whitespace().count());
    println!("{:-<80}", "");

    let preview: String = story.body().chars().take(PREVIEW_CHARS).collect();
    if preview.len() < story.body().len() {
        println!("{}...", preview.trim_end());
    } else {
        println!("{}", preview);
    }
}
