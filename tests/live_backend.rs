//! Tests against a running club backend.

// Ensure this test only runs when integration tests are explicitly enabled
#![cfg(feature = "integration_test")]
#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use flamore::app::ClubContext;
use flamore::auth::AuthState;
use flamore::config::Config;
use flamore::fetch::FetchStatus;
use std::time::Instant;

// Logged-in context, or None when the environment has no credentials
async fn setup_context() -> Option<ClubContext> {
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            println!("Skipping integration test: Failed to load config: {e}");
            return None;
        }
    };
    let (Some(email), Some(password)) = (config.email.clone(), config.password.clone()) else {
        println!("Skipping integration test: no FLAMORE_EMAIL/FLAMORE_PASSWORD in env or .env");
        return None;
    };

    let mut ctx = ClubContext::new(config);
    let state = ctx.login(email, password).await.clone();
    assert_eq!(state, AuthState::Authenticated, "login failed");
    Some(ctx)
}

#[tokio::test]
async fn test_load_home_screen() {
    if let Some(mut ctx) = setup_context().await {
        let start = Instant::now();
        ctx.load_home().await;
        println!("Home screen loaded in {:?}", start.elapsed());

        let trainings = ctx.trainings.state();
        assert_eq!(trainings.status, FetchStatus::Success, "{:?}", trainings.error);
        assert_eq!(ctx.news.state().status, FetchStatus::Success, "{:?}", ctx.news.state().error);
    }
}

#[tokio::test]
async fn test_profile_and_club() {
    if let Some(mut ctx) = setup_context().await {
        assert!(ctx.refresh_profile().await, "profile fetch did not update the session");

        let mut club = ctx.club_fetcher();
        club.refresh(ctx.session());
        club.settle().await;
        let profile = club.state().data().expect("club profile");
        println!("Club: {} ({})", profile.name, profile.head_coach_name);
    }
}

#[tokio::test]
async fn test_roster_of_first_training() {
    if let Some(mut ctx) = setup_context().await {
        ctx.load_home().await;
        let Some(first) = ctx.trainings.state().data().and_then(|t| t.first()).map(|t| t.id) else {
            println!("No trainings available, skipping roster check.");
            return;
        };

        let mut roster = ctx.participants_fetcher(first);
        roster.refresh(ctx.session());
        roster.settle().await;
        let data = roster.state().data().expect("roster");
        assert!(data.participants.len() <= data.count as usize);
    }
}
