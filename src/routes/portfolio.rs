//! Portfolio routes: public listing, create, and one-shot seeding.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::db::models::{PortfolioCreate, PortfolioItem};
use crate::error::ApiError;
use crate::state::AppState;
use crate::validate;

#[derive(Debug, Serialize, Deserialize)]
pub struct SeedResponse {
    pub message: String,
    pub count: i64,
}

/// GET /api/portfolio
pub async fn list_portfolio(
    State(state): State<AppState>,
) -> Result<Json<Vec<PortfolioItem>>, ApiError> {
    let items = state.store.list_all::<PortfolioItem>().await?;
    Ok(Json(items))
}

/// POST /api/portfolio
pub async fn create_portfolio_item(
    State(state): State<AppState>,
    Json(payload): Json<PortfolioCreate>,
) -> Result<Json<PortfolioItem>, ApiError> {
    validate::portfolio(&payload)?;

    let item = PortfolioItem::new(payload);
    state.store.insert(&item).await?;

    tracing::info!(id = %item.id, title = %item.title, "portfolio item stored");
    Ok(Json(item))
}

/// POST /api/portfolio/seed
///
/// Inserts the sample fixture once. Reports the existing count and
/// inserts nothing when the collection already has data.
pub async fn seed_portfolio(State(state): State<AppState>) -> Result<Json<SeedResponse>, ApiError> {
    let existing = state.store.count::<PortfolioItem>().await?;
    if existing > 0 {
        return Ok(Json(SeedResponse {
            message: "Portfolio already has data".to_string(),
            count: existing,
        }));
    }

    let items: Vec<PortfolioItem> = sample_portfolio()
        .into_iter()
        .map(PortfolioItem::new)
        .collect();
    let count = items.len() as i64;
    state.store.insert_many(&items).await?;

    tracing::info!(count, "portfolio seeded");
    Ok(Json(SeedResponse {
        message: "Portfolio seeded successfully".to_string(),
        count,
    }))
}

fn sample_item(
    title: &str,
    description: &str,
    category: &str,
    image: &str,
    technologies: &[&str],
    client: &str,
    duration: &str,
) -> PortfolioCreate {
    PortfolioCreate {
        title: title.to_string(),
        description: description.to_string(),
        category: category.to_string(),
        image: image.to_string(),
        technologies: technologies.iter().map(|t| t.to_string()).collect(),
        link: None,
        client: Some(client.to_string()),
        duration: Some(duration.to_string()),
    }
}

/// The fixed sample set used for initial setup.
pub fn sample_portfolio() -> Vec<PortfolioCreate> {
    vec![
        sample_item(
            "TechCorp Enterprise Platform",
            "Built a comprehensive enterprise platform with real-time analytics, user management, \
             and advanced reporting features. Improved operational efficiency by 60%.",
            "Web Development",
            "https://images.unsplash.com/photo-1460925895917-afdab827c52f?w=800&h=600&fit=crop",
            &["React", "Node.js", "PostgreSQL", "AWS"],
            "TechCorp International",
            "4 months",
        ),
        sample_item(
            "HealthTrack Mobile App",
            "Designed and developed a health tracking mobile application with AI-powered insights, \
             workout plans, and nutrition tracking.",
            "UI/UX Design",
            "https://images.unsplash.com/photo-1551434678-e076c223a692?w=800&h=600&fit=crop",
            &["React Native", "Firebase", "TensorFlow", "Figma"],
            "HealthTrack Inc.",
            "3 months",
        ),
        sample_item(
            "E-Commerce Revolution",
            "Complete e-commerce platform redesign with modern UI, seamless checkout process, and \
             personalized recommendations. Increased conversion rate by 45%.",
            "Web Development",
            "https://images.unsplash.com/photo-1557821552-17105176677c?w=800&h=600&fit=crop",
            &["Next.js", "Shopify", "Stripe", "Tailwind CSS"],
            "StyleHub Retail",
            "5 months",
        ),
        sample_item(
            "FinTech Dashboard",
            "Sophisticated financial dashboard with real-time data visualization, transaction \
             tracking, and predictive analytics for investment decisions.",
            "Web Development",
            "https://images.unsplash.com/photo-1551288049-bebda4e38f71?w=800&h=600&fit=crop",
            &["Vue.js", "D3.js", "Python", "MongoDB"],
            "InvestPro",
            "6 months",
        ),
        sample_item(
            "EduLearn Platform",
            "Interactive learning management system with video courses, live sessions, quizzes, \
             and progress tracking for online education.",
            "Landing Page",
            "https://images.unsplash.com/photo-1516321318423-f06f85e504b3?w=800&h=600&fit=crop",
            &["React", "FastAPI", "WebRTC", "PostgreSQL"],
            "EduLearn Academy",
            "4 months",
        ),
        sample_item(
            "Restaurant Booking System",
            "Elegant restaurant booking and management system with real-time table availability, \
             menu showcase, and customer reviews.",
            "Web Development",
            "https://images.unsplash.com/photo-1517248135467-4c7edcad34c4?w=800&h=600&fit=crop",
            &["React", "Node.js", "MySQL", "Socket.io"],
            "Gourmet Bistro",
            "2 months",
        ),
    ]
}
