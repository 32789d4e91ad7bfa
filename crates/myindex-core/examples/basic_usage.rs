//! Basic usage example - refresh every slice and print the page content

use myindex_core::{MyIndexApi, Result};

#[tokio::main]
async fn main() -> Result<()> {
    // Get path from args or use a local data directory
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "./example-data".to_string());

    println!("Initializing MyIndexApi with path: {}", path);

    let api = MyIndexApi::builder(&path)
        .auto_create_dirs(true)
        .build()
        .await?;

    let profile = api.profile();
    println!("{} ({})", profile.name, profile.title.join(" / "));

    println!("Saying: {:?}", api.load_sayings().await?);
    let saying = api.sayings().await;
    if !saying.is_empty() {
        println!("  \"{}\" -- {}", saying.text, saying.from);
    }

    match api.load_gh_repos().await {
        Ok(outcome) => {
            println!("Repositories: {:?}", outcome);
            for repo in api.gh_repos().await {
                println!("  - {} ({} stars)", repo.name, repo.stargazers_count);
            }
        }
        Err(e) => println!("Repositories unavailable: {}", e),
    }

    println!("Music: {:?}", api.load_music().await?);
    if let Some(track) = api.current_track().await {
        println!("  Now selected: {} - {}", track.name, track.artist);
    }

    Ok(())
}
