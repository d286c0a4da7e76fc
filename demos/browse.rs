//! Browse the agent directory from the terminal.
//!
//! ```text
//! cargo run --example browse -- [category] [Popularity]
//! ```

use std::sync::Arc;

use agent_directory::grouping::DEFAULT_PREVIEW_LIMIT;
use agent_directory::{
    Browser, CollectionStore, DirectoryClient, FilterDimension, SortOption,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "agent_directory=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let client = DirectoryClient::from_env()?;
    info!("Browsing {}", client.transport().base_url());

    let store = Arc::new(CollectionStore::new(Arc::new(client)));
    store.fetch().await?;

    let mut args = std::env::args().skip(1);
    let mut browser = Browser::default();
    if let Some(category) = args.next() {
        browser.select(FilterDimension::Category, &category);
    }
    if let Some(sort) = args.next() {
        browser.set_sort(SortOption::from_label(&sort));
    }

    store.with_agents(|agents| {
        let page = browser.view(agents);
        println!(
            "Page {} of {} ({} agents)",
            page.page, page.total_pages, page.total_count
        );
        for agent in &page.agents {
            println!(
                "  {:<32} {:<20} {:>5} likes {:>5} saves",
                agent.name,
                agent.category_label(),
                agent.likes,
                agent.saved_by_count
            );
        }

        println!();
        for group in browser.grouped(agents).preview(DEFAULT_PREVIEW_LIMIT) {
            let names: Vec<&str> = group.agents.iter().map(|a| a.name.as_str()).collect();
            println!("{}: {}", group.category, names.join(", "));
        }
    });

    println!();
    println!("Most liked:");
    for agent in store.top_liked(10) {
        println!("  {:<32} {:>5}", agent.name, agent.likes);
    }

    Ok(())
}
