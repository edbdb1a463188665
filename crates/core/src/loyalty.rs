use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Offer {
    pub points: i32,
    pub title: &'static str,
}

/// Rewards a customer unlocks as their points balance grows, cheapest first.
pub const OFFERS: [Offer; 3] = [
    Offer {
        points: 100,
        title: "£2 off your next order",
    },
    Offer {
        points: 250,
        title: "Free cookie / small treat",
    },
    Offer {
        points: 500,
        title: "£10 off a celebration cake",
    },
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferStatus {
    pub points: i32,
    pub title: String,
    pub unlocked: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoyaltyProgress {
    pub points: i32,
    /// Title of the cheapest offer still locked.
    pub next_offer: Option<String>,
    pub points_to_next: Option<i32>,
    /// Share of the way to the next offer, 1.0 once everything is unlocked.
    pub progress: f64,
    pub offers: Vec<OfferStatus>,
}

impl LoyaltyProgress {
    pub fn for_points(points: i32) -> Self {
        let points = points.max(0);
        let next = OFFERS.iter().find(|offer| points < offer.points);

        let progress = match next {
            Some(offer) => (f64::from(points) / f64::from(offer.points)).min(1.0),
            None => 1.0,
        };

        Self {
            points,
            next_offer: next.map(|offer| offer.title.to_string()),
            points_to_next: next.map(|offer| offer.points - points),
            progress,
            offers: OFFERS
                .iter()
                .map(|offer| OfferStatus {
                    points: offer.points,
                    title: offer.title.to_string(),
                    unlocked: points >= offer.points,
                })
                .collect(),
        }
    }

    pub fn all_unlocked(&self) -> bool {
        self.next_offer.is_none()
    }
}
