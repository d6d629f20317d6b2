//! `Flamore` smoke tool: log in, load the home screen and print what it would show.
//!
//! Usage: cargo run [-- --all] (credentials from `FLAMORE_EMAIL` / `FLAMORE_PASSWORD`)

use anyhow::{bail, Context};
use tracing_subscriber::EnvFilter;

use flamore::app::ClubContext;
use flamore::auth::AuthState;
use flamore::config::Config;
use flamore::{dates, views};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("flamore=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let show_all = std::env::args().any(|a| a == "--all");
    let config = Config::load().context("Failed to load config")?;
    tracing::info!(
        app = config.app_name(),
        version = config.app_version(),
        url = %config.base_url,
        "starting"
    );

    let (email, password) = match (config.email.clone(), config.password.clone()) {
        (Some(email), Some(password)) => (email, password),
        _ => bail!("Set FLAMORE_EMAIL and FLAMORE_PASSWORD to log in"),
    };

    let mut ctx = ClubContext::new(config);
    if let AuthState::AuthFailed(msg) = ctx.login(email, password).await {
        bail!("Login failed: {msg}");
    }
    if let Some(session) = ctx.session().session() {
        println!("Bejelentkezve: {} ({})", session.display_name, session.email);
    }

    ctx.load_home().await;
    if show_all {
        ctx.show_more.toggle();
        ctx.news_more.toggle();
    }

    let trainings = ctx.trainings.state();
    if let Some(err) = &trainings.error {
        eprintln!("Edzések: {err}");
    }
    if views::is_empty_state(trainings) {
        println!("\nNincs elérhető edzés.");
    } else {
        let all = trainings.data().map_or(&[][..], Vec::as_slice);
        let rooms: Vec<String> = views::room_filter_options(all)
            .iter()
            .map(ToString::to_string)
            .collect();
        println!("\n=== Edzések ({}) | termek: {} ===", all.len(), rooms.join(", "));
        for option in views::type_filter_options(all) {
            println!("  [{}] {} ({})", option.label, option.name, option.icon);
        }
        println!();
        for t in ctx.visible_trainings() {
            println!(
                "  {} {} | {} | {}. terem{}",
                dates::format_day(&t.start_timestamp),
                dates::format_time(&t.start_timestamp),
                t.name,
                t.room_id,
                if t.closed { " | lezárva" } else { "" },
            );
        }
        if ctx.show_more.needs_toggle(all.len()) {
            println!("  ({})", ctx.show_more.toggle_label());
        }
    }

    let news = ctx.news.state();
    if let Some(err) = &news.error {
        eprintln!("Hírek: {err}");
    }
    if let Some(items) = news.data() {
        println!("\n=== Hírek ({}) ===", items.len());
        for item in ctx.visible_news() {
            let link = item.first_link().map(|l| format!(" -> {l}")).unwrap_or_default();
            println!("  {} | {}{}", dates::format_news_date(&item.created_at), item.title, link);
        }
        if ctx.news_more.needs_toggle(items.len()) {
            println!("  ({})", ctx.news_more.toggle_label());
        }
    }

    Ok(())
}
