use services::Review;

use crate::vm::time_fmt::format_date;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewCardVm {
    pub id: String,
    pub author: String,
    pub stars: String,
    pub text: String,
    pub suggestions: Option<String>,
    pub date_str: String,
    pub likes: u32,
}

impl From<&Review> for ReviewCardVm {
    fn from(review: &Review) -> Self {
        let filled = usize::from(review.rating.min(services::review_board::MAX_RATING));
        let empty = usize::from(services::review_board::MAX_RATING) - filled;
        Self {
            id: review.id.clone(),
            author: review.user_name.clone(),
            stars: format!("{}{}", "★".repeat(filled), "☆".repeat(empty)),
            text: review.text.clone(),
            suggestions: review.suggestions.clone(),
            date_str: format_date(review.date),
            likes: review.likes,
        }
    }
}

#[must_use]
pub fn map_review_cards(reviews: &[Review]) -> Vec<ReviewCardVm> {
    reviews.iter().map(ReviewCardVm::from).collect()
}
