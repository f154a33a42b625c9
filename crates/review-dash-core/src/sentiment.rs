use review_dash_models::Sentiment;

/// Three-way sentiment from an overall 1-5 rating. Unrated reviews are neutral.
pub fn classify(rating: Option<u8>) -> Sentiment {
    match rating {
        None => Sentiment::Neutral,
        Some(r) if r >= 4 => Sentiment::Positive,
        Some(r) if r >= 3 => Sentiment::Neutral,
        Some(_) => Sentiment::Negative,
    }
}
