//! Card state for the dashboard: which cards exist, in what order, and how
//! each one is currently shown.

use serde::Serialize;

use crate::{
    model::{ConditionsSnapshot, same_city},
    presentation::{classify_aqi, round_temperature},
};

/// Plain display values for one city card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardView {
    pub name: String,
    /// e.g. `☀️ 15°C`
    pub headline: String,
    pub condition: String,
    /// e.g. `42 (Good)`
    pub aqi: String,
    /// `good`, `moderate`, `unhealthy`, `hazardous` or empty.
    pub aqi_class: &'static str,
    pub humidity: String,
    pub wind: String,
    pub last_updated: String,
}

impl From<&ConditionsSnapshot> for CardView {
    fn from(snap: &ConditionsSnapshot) -> Self {
        let (aqi_class, aqi_label) = classify_aqi(snap.air_quality);
        Self {
            name: snap.name.clone(),
            headline: format!("{} {}°C", snap.icon.symbol(), round_temperature(snap.temperature_c)),
            condition: snap.description.clone(),
            aqi: format!("{} ({aqi_label})", snap.air_quality),
            aqi_class,
            humidity: format!("{}%", snap.humidity_pct),
            wind: format!("{} km/h", snap.wind_speed_kmh),
            last_updated: snap.observed_at.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CardPhase {
    Present,
    /// Fading out; gone once the transition finishes.
    Removing,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Card {
    pub view: CardView,
    pub phase: CardPhase,
    pub expanded: bool,
}

/// Cards in the order they were appended.
#[derive(Debug, Clone, Default)]
pub struct Board {
    cards: Vec<Card>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Card> {
        self.cards.iter().find(|c| same_city(&c.view.name, name))
    }

    /// Append a card at the end, collapsed.
    pub fn push(&mut self, view: CardView) {
        self.cards.push(Card { view, phase: CardPhase::Present, expanded: false });
    }

    /// Mark the card as fading out. Returns false if there is no present card by that name.
    pub fn begin_removal(&mut self, name: &str) -> bool {
        match self
            .cards
            .iter_mut()
            .find(|c| c.phase == CardPhase::Present && same_city(&c.view.name, name))
        {
            Some(card) => {
                card.phase = CardPhase::Removing;
                true
            }
            None => false,
        }
    }

    /// Drop cards whose fade-out has finished.
    pub fn finish_removal(&mut self, name: &str) {
        self.cards
            .retain(|c| !(c.phase == CardPhase::Removing && same_city(&c.view.name, name)));
    }

    /// Flip the expanded flag, returning the new value.
    pub fn toggle_expanded(&mut self, name: &str) -> Option<bool> {
        let card = self.cards.iter_mut().find(|c| same_city(&c.view.name, name))?;
        card.expanded = !card.expanded;
        Some(card.expanded)
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::{AirQuality, Conditions},
        presentation::build_snapshot,
    };

    fn view(name: &str, aqi: AirQuality) -> CardView {
        let conditions = Conditions {
            temperature_c: 15.2,
            humidity_pct: 70.0,
            wind_speed_kmh: 10.0,
            weather_code: 2,
            air_quality: aqi,
        };
        CardView::from(&build_snapshot(name, &conditions, "09:30:00"))
    }

    #[test]
    fn card_view_text() {
        let v = view("Paris", AirQuality::Index(42.0));
        assert_eq!(v.headline, "☀️ 15°C");
        assert_eq!(v.condition, "Partly cloudy");
        assert_eq!(v.aqi, "42 (Good)");
        assert_eq!(v.aqi_class, "good");
        assert_eq!(v.humidity, "70%");
        assert_eq!(v.wind, "10 km/h");
        assert_eq!(v.last_updated, "09:30:00");
    }

    #[test]
    fn card_view_without_aqi() {
        let v = view("Paris", AirQuality::Unavailable);
        assert_eq!(v.aqi, "N/A (N/A)");
        assert_eq!(v.aqi_class, "");
    }

    #[test]
    fn push_appends_in_order() {
        let mut board = Board::new();
        board.push(view("Paris", AirQuality::Unavailable));
        board.push(view("Oslo", AirQuality::Unavailable));

        let names: Vec<_> = board.cards().iter().map(|c| c.view.name.as_str()).collect();
        assert_eq!(names, ["Paris", "Oslo"]);
        assert!(board.cards().iter().all(|c| !c.expanded && c.phase == CardPhase::Present));
    }

    #[test]
    fn removal_is_two_step() {
        let mut board = Board::new();
        board.push(view("Paris", AirQuality::Unavailable));
        board.push(view("Oslo", AirQuality::Unavailable));

        assert!(board.begin_removal("paris"));
        assert_eq!(board.len(), 2);
        assert_eq!(board.get("Paris").map(|c| c.phase), Some(CardPhase::Removing));
        assert!(!board.begin_removal("Paris"));

        board.finish_removal("Paris");
        assert_eq!(board.len(), 1);
        assert!(board.get("Paris").is_none());
        assert!(board.get("Oslo").is_some());
    }

    #[test]
    fn finish_without_begin_keeps_card() {
        let mut board = Board::new();
        board.push(view("Paris", AirQuality::Unavailable));
        board.finish_removal("Paris");
        assert_eq!(board.len(), 1);
    }

    #[test]
    fn toggle_is_independent_of_phase() {
        let mut board = Board::new();
        board.push(view("Paris", AirQuality::Unavailable));

        assert_eq!(board.toggle_expanded("PARIS"), Some(true));
        assert!(board.begin_removal("Paris"));
        assert_eq!(board.toggle_expanded("Paris"), Some(false));
        assert_eq!(board.get("Paris").map(|c| c.phase), Some(CardPhase::Removing));
        assert_eq!(board.toggle_expanded("Berlin"), None);
    }
}
