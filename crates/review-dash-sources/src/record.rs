use review_dash_models::{GoogleReview, RawReview};
use crate::google::to_raw_review;

/// A review record as it arrives from any provider.
///
/// Everything downstream of the provider boundary sees only `RawReview`.
#[derive(Debug, Clone)]
pub enum SourceRecord {
    Native(RawReview),
    Google {
        review: GoogleReview,
        listing_name: String,
    },
}

impl SourceRecord {
    pub fn into_raw(self) -> RawReview {
        match self {
            SourceRecord::Native(review) => review,
            SourceRecord::Google { review, listing_name } => to_raw_review(&review, &listing_name),
        }
    }
}

pub fn into_raw_reviews(records: Vec<SourceRecord>) -> Vec<RawReview> {
    records.into_iter().map(SourceRecord::into_raw).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockSource;
    use review_dash_models::ReviewType;

    #[test]
    fn test_mixed_records_translate_to_one_shape() {
        let native = MockSource::hostaway_reviews().unwrap().remove(0);
        let google = MockSource::google_reviews().unwrap().remove(0);

        let records = vec![
            SourceRecord::Native(native.clone()),
            SourceRecord::Google { review: google, listing_name: "Shoreditch".to_string() },
        ];
        let raws = into_raw_reviews(records);

        assert_eq!(raws.len(), 2);
        assert_eq!(raws[0], native);
        assert_eq!(raws[1].channel.as_deref(), Some("google"));
        assert_eq!(raws[1].listing_name, "Shoreditch");
        assert_eq!(raws[1].review_type, ReviewType::GuestToHost);
    }
}
