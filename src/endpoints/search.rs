use serde_json::Value;

use crate::api::ApiClient;
use crate::error::{TwitterError, TwitterResult};
use crate::models::{from_json_array, Status, Trend, User};
use crate::params::{Numeric, Params};

const DEFAULT_SEARCH_COUNT: i64 = 15;
const WORLDWIDE_WOEID: i64 = 1;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResultType {
    #[default]
    Mixed,
    Recent,
    Popular,
}

impl ResultType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultType::Mixed => "mixed",
            ResultType::Recent => "recent",
            ResultType::Popular => "popular",
        }
    }
}

/// Restricts a search to a circle, e.g. radius `"1mi"` or `"2km"`.
#[derive(Debug, Clone, PartialEq)]
pub struct Geocode {
    pub latitude: f64,
    pub longitude: f64,
    pub radius: String,
}

#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    /// Optional when `geocode` is set.
    pub term: Option<String>,
    pub geocode: Option<Geocode>,
    pub since_id: Option<Numeric>,
    pub max_id: Option<Numeric>,
    /// `YYYY-MM-DD`
    pub until: Option<String>,
    /// 15 when unset.
    pub count: Option<Numeric>,
    pub lang: Option<String>,
    pub locale: Option<String>,
    pub result_type: ResultType,
    pub include_entities: Option<bool>,
}

impl ApiClient {
    /// Searches recent tweets. Without a term or a geocode nothing is requested.
    pub async fn search(&self, opts: &SearchOptions) -> TwitterResult<Vec<Status>> {
        if opts.term.is_none() && opts.geocode.is_none() {
            return Ok(Vec::new());
        }

        let mut params = Params::new();
        params.integer("since_id", opts.since_id.as_ref())?;
        params.integer("max_id", opts.max_id.as_ref())?;
        params.integer(
            "count",
            Some(&opts.count.clone().unwrap_or_else(|| DEFAULT_SEARCH_COUNT.into())),
        )?;
        params
            .set_opt("q", opts.term.clone())
            .set_opt("until", opts.until.clone())
            .set_opt("lang", opts.lang.clone())
            .set_opt("locale", opts.locale.clone())
            .set("result_type", opts.result_type.as_str())
            .opt_boolean("include_entities", opts.include_entities);
        if let Some(geo) = &opts.geocode {
            params.set(
                "geocode",
                format!("{},{},{}", geo.latitude, geo.longitude, geo.radius),
            );
        }

        let data = self.get("search/tweets", &params).await?;
        from_json_array(data.get("statuses").unwrap_or(&Value::Null))
    }

    pub async fn users_search(
        &self,
        term: &str,
        page: Option<Numeric>,
        count: Option<Numeric>,
        include_entities: Option<bool>,
    ) -> TwitterResult<Vec<User>> {
        let mut params = Params::new();
        params.set("q", term);
        params.integer("page", page.as_ref())?;
        params.integer("count", count.as_ref())?;
        params.opt_boolean("include_entities", include_entities);

        let data = self.get("users/search", &params).await?;
        from_json_array(&data)
    }

    /// Worldwide trends.
    pub async fn trends_current(&self, exclude: Option<&str>) -> TwitterResult<Vec<Trend>> {
        self.trends_woeid(WORLDWIDE_WOEID, exclude).await
    }

    pub async fn trends_woeid(
        &self,
        woeid: impl Into<Numeric>,
        exclude: Option<&str>,
    ) -> TwitterResult<Vec<Trend>> {
        let woeid = woeid.into().integer("woeid")?;
        let mut params = Params::new();
        params.set("id", woeid.to_string()).set_opt("exclude", exclude);

        let data = self.get("trends/place", &params).await?;
        let place = data
            .get(0)
            .ok_or_else(|| TwitterError::Decode(serde::de::Error::custom("empty trends response")))?;
        let as_of = place.get("as_of").and_then(Value::as_str);

        match place.get("trends").and_then(Value::as_array) {
            Some(trends) => trends
                .iter()
                .map(|trend| Trend::from_json_at(trend, as_of))
                .collect(),
            None => Ok(Vec::new()),
        }
    }
}
