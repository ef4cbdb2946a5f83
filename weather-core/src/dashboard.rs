//! The dashboard controller: ties the city store, the two clients and a
//! renderer together.
//!
//! Each call runs to completion before the caller issues the next one, so the
//! stored list is only ever touched from one place at a time. Startup replay
//! is the exception: its fetches are handed out as a [`Replay`] that the caller
//! drains at its own pace, and each result only ever adds its own card.

use std::sync::Arc;

use futures::{
    FutureExt, StreamExt,
    future::BoxFuture,
    stream::FuturesUnordered,
};

use crate::{
    board::CardView,
    error::DashboardError,
    model::{Conditions, ConditionsSnapshot, TrackedCity},
    presentation::{build_snapshot, local_time_now},
    provider::{ConditionsSource, Geocoder},
    render::Renderer,
    store::CityStore,
};

type ReplayFetch = BoxFuture<'static, (TrackedCity, anyhow::Result<Conditions>)>;

/// In-flight startup fetches, yielded in completion order.
pub struct Replay {
    pending: FuturesUnordered<ReplayFetch>,
}

impl Replay {
    /// Next finished fetch, or `None` once every city has answered.
    pub async fn next_finished(&mut self) -> Option<(TrackedCity, anyhow::Result<Conditions>)> {
        self.pending.next().await
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}

pub struct Dashboard<R> {
    geocoder: Box<dyn Geocoder>,
    conditions: Arc<dyn ConditionsSource>,
    store: CityStore,
    renderer: R,
}

impl<R: Renderer> Dashboard<R> {
    pub fn new(
        geocoder: Box<dyn Geocoder>,
        conditions: Box<dyn ConditionsSource>,
        store: CityStore,
        renderer: R,
    ) -> Self {
        Self { geocoder, conditions: Arc::from(conditions), store, renderer }
    }

    pub fn cities(&self) -> &[TrackedCity] {
        self.store.cities()
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Start one conditions fetch per stored city, reusing the saved
    /// coordinates. Nothing is rendered until the results are passed to
    /// [`Dashboard::show_replayed`].
    pub fn replay(&mut self) -> Replay {
        let cities = self.store.load();
        tracing::debug!(count = cities.len(), "replaying stored cities");

        let pending = cities
            .into_iter()
            .map(|city| {
                let conditions = Arc::clone(&self.conditions);
                async move {
                    let result = conditions.fetch(city.latitude, city.longitude).await;
                    (city, result)
                }
                .boxed()
            })
            .collect();

        Replay { pending }
    }

    /// Render one replayed city. Failures are logged, never shown, and a city
    /// untracked while its fetch was in flight is skipped. Returns whether a
    /// card was added.
    pub fn show_replayed(&mut self, city: &TrackedCity, result: anyhow::Result<Conditions>) -> bool {
        match result {
            Ok(_) if !self.store.contains(&city.name) => false,
            Ok(c) => {
                let snapshot = build_snapshot(&city.name, &c, local_time_now());
                self.renderer.render_card(CardView::from(&snapshot));
                true
            }
            Err(e) => {
                tracing::error!(city = %city.name, "error fetching data: {e:#}");
                false
            }
        }
    }

    /// Startup replay to completion. Each card appears as soon as its own
    /// fetch finishes, so a slow city only holds back itself. Returns the
    /// number of cards rendered.
    pub async fn start(&mut self) -> usize {
        let mut replay = self.replay();
        let mut rendered = 0;
        while let Some((city, result)) = replay.next_finished().await {
            if self.show_replayed(&city, result) {
                rendered += 1;
            }
        }
        rendered
    }

    /// Drop every card and replay the stored list again.
    pub async fn refresh(&mut self) -> usize {
        self.renderer.clear();
        self.start().await
    }

    /// Manual add: resolve, fetch, persist, render. Every failure is also
    /// reported through the renderer. Blank input is ignored and yields
    /// `Ok(None)`, like submitting an empty search box.
    pub async fn add_city(
        &mut self,
        query: &str,
    ) -> Result<Option<ConditionsSnapshot>, DashboardError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(None);
        }

        if self.store.contains(query) {
            let err = DashboardError::AlreadyTracked(query.to_string());
            self.renderer.notify(err.user_notice());
            return Err(err);
        }

        self.renderer.set_loading(true);
        let result = self.resolve_and_track(query).await;
        self.renderer.set_loading(false);

        match result {
            Ok(snapshot) => {
                self.renderer.render_card(CardView::from(&snapshot));
                Ok(Some(snapshot))
            }
            Err(err) => {
                if let DashboardError::Fetch { source, .. } = &err {
                    tracing::error!(query, "error fetching data: {source:#}");
                }
                self.renderer.notify(err.user_notice());
                Err(err)
            }
        }
    }

    async fn resolve_and_track(&mut self, query: &str) -> Result<ConditionsSnapshot, DashboardError> {
        let fetch_err =
            |source: anyhow::Error| DashboardError::Fetch { city: query.to_string(), source };

        let city = self
            .geocoder
            .resolve(query)
            .await
            .map_err(fetch_err)?
            .ok_or_else(|| DashboardError::NotFound(query.to_string()))?;

        let conditions =
            self.conditions.fetch(city.latitude, city.longitude).await.map_err(fetch_err)?;
        let snapshot = build_snapshot(&city.name, &conditions, local_time_now());

        self.store.add(city)?;
        Ok(snapshot)
    }

    /// Stop tracking a city and fade its card out. Absent names are a no-op.
    /// A failed write is reported and leaves both the list and the card in place.
    pub async fn remove_city(&mut self, name: &str) -> Result<bool, DashboardError> {
        let name = name.trim();
        let removed = match self.store.remove(name) {
            Ok(removed) => removed,
            Err(e) => {
                let err = DashboardError::from(e);
                tracing::error!(city = name, "could not untrack city: {err}");
                self.renderer.notify(err.user_notice());
                return Err(err);
            }
        };
        if removed {
            self.renderer.remove_card(name).await;
        }
        Ok(removed)
    }

    pub fn toggle_expanded(&mut self, name: &str) -> Option<bool> {
        self.renderer.toggle_expanded(name.trim())
    }
}
