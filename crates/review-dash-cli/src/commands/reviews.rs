use super::context::AppContext;
use crate::output::{stars, styled_table, truncate, Output};
use chrono::{DateTime, Utc};
use clap::Args;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::Cell;
use owo_colors::OwoColorize;
use review_dash_core::{
    aggregate, build_dashboard, build_public_view, normalize_all, unique_channels, unique_listings, FilterCriteria, ReviewQuery,
    SortDirection, SortField, SortOptions,
};
use review_dash_models::timestamp::parse_timestamp;
use review_dash_models::{NormalizedReview, PropertyAnalytics, ReviewStatus, ReviewType, Sentiment, Trend};
use review_dash_sources::into_raw_reviews;
use serde_json::json;

fn parse_date(value: &str) -> Result<DateTime<Utc>, String> {
    parse_timestamp(value).ok_or_else(|| format!("Invalid date: {}. Use YYYY-MM-DD or RFC 3339", value))
}

#[derive(Args, Debug, Default)]
pub struct ReviewArgs {
    /// Only reviews for this listing id (see `reviewdash listings`)
    #[arg(long)]
    pub listing: Option<String>,

    /// Only reviews from this channel (airbnb, booking.com, vrbo, direct, google, ...)
    #[arg(long)]
    pub channel: Option<String>,

    /// Review direction; defaults to guest-to-host
    #[arg(long = "type", value_name = "TYPE")]
    pub review_type: Option<ReviewType>,

    #[arg(long)]
    pub status: Option<ReviewStatus>,

    /// Minimum overall rating (unrated reviews are excluded)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub min_rating: Option<u8>,

    /// Maximum overall rating (unrated reviews are excluded)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub max_rating: Option<u8>,

    /// Earliest submission date
    #[arg(long, value_parser = parse_date)]
    pub from: Option<DateTime<Utc>>,

    /// Latest submission date
    #[arg(long, value_parser = parse_date)]
    pub to: Option<DateTime<Utc>>,

    #[arg(long)]
    pub sentiment: Option<Sentiment>,

    /// Case-insensitive text search over review, guest and listing
    #[arg(long)]
    pub search: Option<String>,

    /// Only reviews approved for the public site
    #[arg(long)]
    pub approved_only: bool,

    /// Sort field: date, rating, guestName, listingName
    #[arg(long)]
    pub sort: Option<SortField>,

    /// Sort direction: asc or desc
    #[arg(long)]
    pub direction: Option<SortDirection>,

    #[arg(long, default_value_t = 1)]
    pub page: usize,

    #[arg(long)]
    pub page_size: Option<usize>,

    /// Merge in Google reviews
    #[arg(long)]
    pub include_google: bool,
}

impl ReviewArgs {
    fn query(&self, ctx: &AppContext) -> Result<ReviewQuery> {
        let dashboard = &ctx.config.dashboard;
        let field = match self.sort {
            Some(field) => field,
            None => dashboard.sort_field.parse().map_err(|e: String| eyre!(e))?,
        };
        let direction = match self.direction {
            Some(direction) => direction,
            None => dashboard.sort_direction.parse().map_err(|e: String| eyre!(e))?,
        };

        Ok(ReviewQuery {
            filters: FilterCriteria {
                listing_id: self.listing.clone(),
                channel: self.channel.clone(),
                review_type: self.review_type,
                status: self.status,
                min_rating: self.min_rating,
                max_rating: self.max_rating,
                date_from: self.from,
                date_to: self.to,
                sentiment: self.sentiment,
                search_query: self.search.clone(),
                approved_only: self.approved_only,
            },
            sort: SortOptions::new(field, direction),
            page: self.page,
            page_size: self.page_size.unwrap_or(dashboard.page_size),
        })
    }
}

fn sentiment_label(sentiment: Sentiment) -> String {
    match sentiment {
        Sentiment::Positive => sentiment.to_string().green().to_string(),
        Sentiment::Neutral => sentiment.to_string().yellow().to_string(),
        Sentiment::Negative => sentiment.to_string().red().to_string(),
    }
}

fn review_table(reviews: &[NormalizedReview]) -> comfy_table::Table {
    let mut table = styled_table(["ID", "Date", "Listing", "Guest", "Channel", "Rating", "Avg", "Sentiment", "Public", "Review"]);
    for review in reviews {
        let channel = if review.channel_label.is_empty() {
            review.channel.clone()
        } else {
            format!("{} {}", review.channel_icon, review.channel_label)
        };
        table.add_row(vec![
            Cell::new(review.id),
            Cell::new(&review.formatted_date),
            Cell::new(truncate(&review.listing_name, 28)),
            Cell::new(&review.guest_name),
            Cell::new(channel),
            Cell::new(stars(review.overall_rating)),
            Cell::new(review.average_rating.map(|a| format!("{:.1}", a)).unwrap_or_else(|| "-".to_string())),
            Cell::new(sentiment_label(review.sentiment)),
            Cell::new(if review.is_approved_for_website { "✓".green().to_string() } else { "".to_string() }),
            Cell::new(truncate(&review.text, 48)),
        ]);
    }
    table
}

fn analytics_table(analytics: &[PropertyAnalytics]) -> comfy_table::Table {
    let mut table = styled_table(["Listing", "Reviews", "Avg", "Trend", "Approved", "Channels", "Issues"]);
    for listing in analytics {
        let trend = match listing.recent_trend {
            Trend::Improving => "▲ improving".green().to_string(),
            Trend::Stable => "● stable".to_string(),
            Trend::Declining => "▼ declining".red().to_string(),
        };
        let channels = listing
            .channel_breakdown
            .iter()
            .map(|(channel, count)| format!("{}: {}", channel, count))
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![
            Cell::new(truncate(&listing.listing_name, 36)),
            Cell::new(listing.total_reviews),
            Cell::new(format!("{:.1}", listing.average_rating)),
            Cell::new(trend),
            Cell::new(listing.approved_count),
            Cell::new(channels),
            Cell::new(listing.top_issues.join(", ")),
        ]);
    }
    table
}

pub async fn run_reviews(args: ReviewArgs, ctx: &AppContext, output: &Output) -> Result<()> {
    let query = args.query(ctx)?;
    let raws = ctx.fetch_all(args.include_google).await?;
    let snapshot = ctx.approval_snapshot();
    let view = build_dashboard(&raws, &snapshot.ids, &query);

    if !output.is_human() {
        output.data(&json!({
            "success": true,
            "data": view.reviews,
            "analytics": view.analytics,
            "meta": view.meta,
        }));
        return Ok(());
    }

    if view.reviews.is_empty() {
        output.warn(format!("No reviews match ({} in total)", view.meta.total));
        return Ok(());
    }

    output.table(&review_table(&view.reviews));
    output.info(format!(
        "Page {} · showing {} of {} matching · {} guest reviews in total",
        view.meta.page,
        view.reviews.len(),
        view.meta.filtered,
        view.meta.total
    ));
    Ok(())
}

pub async fn run_analytics(include_google: bool, ctx: &AppContext, output: &Output) -> Result<()> {
    let raws = ctx.fetch_all(include_google).await?;
    let snapshot = ctx.approval_snapshot();
    let analytics = aggregate(&normalize_all(&raws, &snapshot.ids));

    if !output.is_human() {
        output.data(&json!({ "success": true, "data": analytics }));
        return Ok(());
    }

    output.table(&analytics_table(&analytics));
    Ok(())
}

pub async fn run_public(listing: Option<String>, ctx: &AppContext, output: &Output) -> Result<()> {
    let raws = ctx.fetch_reviews().await?;
    let snapshot = ctx.approval_snapshot();
    let view = build_public_view(&raws, &snapshot.ids, listing.as_deref());

    if !output.is_human() {
        output.data(&json!({ "success": true, "data": view }));
        return Ok(());
    }

    if view.reviews.is_empty() {
        output.warn("No approved reviews to show");
        return Ok(());
    }

    let mut table = styled_table(["Date", "Guest", "Listing", "Rating", "Review"]);
    for review in &view.reviews {
        table.add_row(vec![
            Cell::new(&review.date),
            Cell::new(&review.guest_name),
            Cell::new(truncate(&review.listing_name, 28)),
            Cell::new(stars(review.rating)),
            Cell::new(truncate(&review.review, 60)),
        ]);
    }
    output.table(&table);

    let categories = view
        .stats
        .category_averages
        .iter()
        .map(|c| format!("{} {:.1}", c.display_name, c.average))
        .collect::<Vec<_>>()
        .join(" · ");
    output.info(format!(
        "{} reviews · average {:.1} / 5",
        view.stats.total_reviews, view.stats.average_rating
    ));
    if !categories.is_empty() {
        output.info(categories);
    }
    Ok(())
}

pub async fn run_listings(ctx: &AppContext, output: &Output) -> Result<()> {
    let listings = unique_listings(&ctx.fetch_reviews().await?);

    if !output.is_human() {
        output.data(&json!({ "success": true, "data": listings }));
        return Ok(());
    }

    let mut table = styled_table(["ID", "Name"]);
    for listing in &listings {
        table.add_row(vec![Cell::new(&listing.id), Cell::new(&listing.name)]);
    }
    output.table(&table);
    Ok(())
}

pub async fn run_channels(ctx: &AppContext, output: &Output) -> Result<()> {
    let channels = unique_channels(&ctx.fetch_reviews().await?);

    if !output.is_human() {
        output.data(&json!({ "success": true, "data": channels }));
        return Ok(());
    }

    let mut table = styled_table(["ID", "Name"]);
    for channel in &channels {
        table.add_row(vec![Cell::new(&channel.id), Cell::new(&channel.name)]);
    }
    output.table(&table);
    Ok(())
}

pub async fn run_google(
    place_id: Option<String>,
    listing_name: Option<String>,
    ctx: &AppContext,
    output: &Output,
) -> Result<()> {
    let records = ctx.fetch_google_records(place_id, listing_name).await?;
    let snapshot = ctx.approval_snapshot();
    let reviews = normalize_all(&into_raw_reviews(records), &snapshot.ids);

    if !output.is_human() {
        output.data(&json!({ "success": true, "data": reviews }));
        return Ok(());
    }

    output.table(&review_table(&reviews));
    Ok(())
}
