use crate::{
    cache::MemoCache,
    config::Config,
    error::ForecastError,
    model::{Forecast, ForecastQuery},
    normalize::{NormalizeLimits, normalize},
    source::WeatherSource,
};

/// Validates a query, resolves it against the cache or the source, and
/// normalizes the result.
#[derive(Debug)]
pub struct ForecastService<S> {
    source: S,
    api_key: Option<String>,
    /// `None` when the configured TTL is zero.
    cache: Option<MemoCache<Forecast>>,
    limits: NormalizeLimits,
}

impl<S: WeatherSource> ForecastService<S> {
    pub fn new(source: S, api_key: Option<String>, config: &Config) -> Self {
        let limits = NormalizeLimits {
            max_days: config.days.filter(|d| *d > 0).map(|d| d as usize),
            ..NormalizeLimits::default()
        };

        let ttl = config.cache_ttl();
        let cache = (!ttl.is_zero()).then(|| MemoCache::new(ttl));

        Self { source, api_key, cache, limits }
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    /// Run one lookup.
    ///
    /// An empty location or a missing credential fails before the source is
    /// consulted.
    pub async fn lookup(&mut self, query: &ForecastQuery) -> Result<Forecast, ForecastError> {
        let location = query.location.trim();
        if location.is_empty() {
            return Err(ForecastError::EmptyLocation);
        }

        let Some(api_key) = self.api_key.as_deref() else {
            tracing::error!("no API key configured, not issuing request");
            return Err(ForecastError::MissingCredential);
        };

        let key = query.cache_key();
        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.get(&key).await {
                return Ok(hit);
            }
        }

        let body = self.source.fetch_timeline(api_key, query).await?;
        let forecast = normalize(&body, query.units, location, self.limits)?;

        tracing::info!(
            location = %forecast.resolved_address,
            days = forecast.days.len(),
            hours = forecast.hours.len(),
            "forecast fetched"
        );

        if let Some(cache) = &self.cache {
            cache.put(key, forecast.clone()).await;
        }
        Ok(forecast)
    }
}
