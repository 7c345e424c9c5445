use crate::db::models::{
    DbFearGreed, DbQuote, DbRepo, DbSponsor, DbStreamInfo, DbStreamStatus, FearGreedData,
    NewsDigest, NewsStory, Placement, QuoteKind, WeatherDay, WeatherReport,
};
use crate::db::patch::{DbPatchable, RepoCreate, SponsorCreate, SponsorPatch, SponsorUpdate};
use crate::db::schema::SQLITE_INIT;
use crate::error::OnairError;
use chrono::{DateTime, Utc};
use ractor::{Actor, ActorProcessingErr, ActorRef, RpcReplyPort};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{FromRow, SqlitePool};
use std::{str::FromStr, time::Duration};
use tracing::{debug, info};

type Reply<T> = RpcReplyPort<Result<T, OnairError>>;

#[derive(Debug)]
pub enum DbActorMessage {
    /// Newest stream status, or the implicit offline status.
    CurrentStatus(Reply<DbStreamStatus>),

    /// Newest-first status log, capped at the given length.
    StatusHistory(u32, Reply<Vec<DbStreamStatus>>),

    /// Record a status change; no-op when the status is unchanged.
    UpdateStatus(bool, Reply<DbStreamStatus>),

    CurrentInfo(Reply<DbStreamInfo>),

    /// Append a new title/description pair. Blank strings are stored as NULL.
    UpdateInfo(Option<String>, Option<String>, Reply<DbStreamInfo>),

    ClearInfo(Reply<DbStreamInfo>),

    /// Active sponsors, optionally for one placement, in display order.
    ListActiveSponsors(Option<Placement>, Reply<Vec<DbSponsor>>),

    /// Every sponsor in display order (admin view).
    ListAllSponsors(Reply<Vec<DbSponsor>>),

    CreateSponsor(SponsorCreate, Reply<i64>),

    UpdateSponsor(SponsorUpdate, Reply<()>),

    DeleteSponsor(i64, Reply<()>),

    /// Insert the sample sponsors if the table is empty; returns the new ids.
    SeedSampleSponsors(Reply<Vec<i64>>),

    ReplaceQuotes(Vec<DbQuote>, Reply<()>),

    /// Cached quotes of one kind, highlights or ticker tape.
    Quotes(QuoteKind, bool, Reply<Vec<DbQuote>>),

    ReplaceRepos(Vec<RepoCreate>, Reply<()>),

    /// Top cached repositories by star count.
    Repos(u32, Reply<Vec<DbRepo>>),

    ReplaceWeather(Vec<WeatherDay>, Reply<()>),

    Weather(Reply<Option<WeatherReport>>),

    ReplaceNews(Vec<NewsStory>, Reply<()>),

    News(Reply<Option<NewsDigest>>),

    ReplaceFearGreed(FearGreedData, Reply<()>),

    FearGreed(Reply<Option<DbFearGreed>>),
}

#[derive(Clone)]
pub struct DbActorHandle {
    actor: ActorRef<DbActorMessage>,
}

macro_rules! rpc {
    ($actor:expr, $name:literal, $variant:expr $(, $arg:expr)*) => {
        ractor::call!($actor, $variant $(, $arg)*)
            .map_err(|e| OnairError::RactorError(format!(concat!("DbActor ", $name, " RPC failed: {}"), e)))?
    };
}

impl DbActorHandle {
    pub async fn current_status(&self) -> Result<DbStreamStatus, OnairError> {
        rpc!(self.actor, "CurrentStatus", DbActorMessage::CurrentStatus)
    }

    pub async fn status_history(&self, limit: u32) -> Result<Vec<DbStreamStatus>, OnairError> {
        rpc!(self.actor, "StatusHistory", DbActorMessage::StatusHistory, limit)
    }

    pub async fn update_status(&self, is_live: bool) -> Result<DbStreamStatus, OnairError> {
        rpc!(self.actor, "UpdateStatus", DbActorMessage::UpdateStatus, is_live)
    }

    pub async fn current_info(&self) -> Result<DbStreamInfo, OnairError> {
        rpc!(self.actor, "CurrentInfo", DbActorMessage::CurrentInfo)
    }

    pub async fn update_info(
        &self,
        title: Option<String>,
        description: Option<String>,
    ) -> Result<DbStreamInfo, OnairError> {
        rpc!(
            self.actor,
            "UpdateInfo",
            DbActorMessage::UpdateInfo,
            title,
            description
        )
    }

    pub async fn clear_info(&self) -> Result<DbStreamInfo, OnairError> {
        rpc!(self.actor, "ClearInfo", DbActorMessage::ClearInfo)
    }

    pub async fn list_active_sponsors(
        &self,
        placement: Option<Placement>,
    ) -> Result<Vec<DbSponsor>, OnairError> {
        rpc!(
            self.actor,
            "ListActiveSponsors",
            DbActorMessage::ListActiveSponsors,
            placement
        )
    }

    pub async fn list_all_sponsors(&self) -> Result<Vec<DbSponsor>, OnairError> {
        rpc!(self.actor, "ListAllSponsors", DbActorMessage::ListAllSponsors)
    }

    pub async fn create_sponsor(&self, create: SponsorCreate) -> Result<i64, OnairError> {
        rpc!(self.actor, "CreateSponsor", DbActorMessage::CreateSponsor, create)
    }

    pub async fn update_sponsor(&self, id: i64, patch: SponsorPatch) -> Result<(), OnairError> {
        rpc!(
            self.actor,
            "UpdateSponsor",
            DbActorMessage::UpdateSponsor,
            SponsorUpdate { id, patch }
        )
    }

    pub async fn toggle_sponsor(&self, id: i64, is_active: bool) -> Result<(), OnairError> {
        let patch = SponsorPatch {
            is_active: Some(is_active),
            ..Default::default()
        };
        self.update_sponsor(id, patch).await
    }

    pub async fn delete_sponsor(&self, id: i64) -> Result<(), OnairError> {
        rpc!(self.actor, "DeleteSponsor", DbActorMessage::DeleteSponsor, id)
    }

    pub async fn seed_sample_sponsors(&self) -> Result<Vec<i64>, OnairError> {
        rpc!(
            self.actor,
            "SeedSampleSponsors",
            DbActorMessage::SeedSampleSponsors
        )
    }

    pub async fn replace_quotes(&self, quotes: Vec<DbQuote>) -> Result<(), OnairError> {
        rpc!(self.actor, "ReplaceQuotes", DbActorMessage::ReplaceQuotes, quotes)
    }

    pub async fn quotes(
        &self,
        kind: QuoteKind,
        highlight: bool,
    ) -> Result<Vec<DbQuote>, OnairError> {
        rpc!(self.actor, "Quotes", DbActorMessage::Quotes, kind, highlight)
    }

    pub async fn replace_repos(&self, repos: Vec<RepoCreate>) -> Result<(), OnairError> {
        rpc!(self.actor, "ReplaceRepos", DbActorMessage::ReplaceRepos, repos)
    }

    pub async fn repos(&self, limit: u32) -> Result<Vec<DbRepo>, OnairError> {
        rpc!(self.actor, "Repos", DbActorMessage::Repos, limit)
    }

    pub async fn replace_weather(&self, days: Vec<WeatherDay>) -> Result<(), OnairError> {
        rpc!(self.actor, "ReplaceWeather", DbActorMessage::ReplaceWeather, days)
    }

    pub async fn weather(&self) -> Result<Option<WeatherReport>, OnairError> {
        rpc!(self.actor, "Weather", DbActorMessage::Weather)
    }

    pub async fn replace_news(&self, stories: Vec<NewsStory>) -> Result<(), OnairError> {
        rpc!(self.actor, "ReplaceNews", DbActorMessage::ReplaceNews, stories)
    }

    pub async fn news(&self) -> Result<Option<NewsDigest>, OnairError> {
        rpc!(self.actor, "News", DbActorMessage::News)
    }

    pub async fn replace_fear_greed(&self, data: FearGreedData) -> Result<(), OnairError> {
        rpc!(
            self.actor,
            "ReplaceFearGreed",
            DbActorMessage::ReplaceFearGreed,
            data
        )
    }

    pub async fn fear_greed(&self) -> Result<Option<DbFearGreed>, OnairError> {
        rpc!(self.actor, "FearGreed", DbActorMessage::FearGreed)
    }
}

struct DbActorState {
    pool: SqlitePool,
}

struct DbActor;

#[ractor::async_trait]
impl Actor for DbActor {
    type Msg = DbActorMessage;
    type State = DbActorState;
    type Arguments = String;

    async fn pre_start(
        &self,
        _myself: ActorRef<Self::Msg>,
        database_url: Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        let connect_opts = SqliteConnectOptions::from_str(database_url.as_str())
            .map_err(|e| ActorProcessingErr::from(format!("invalid database url: {e}")))?
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(5))
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .connect_with(connect_opts)
            .await
            .map_err(|e| ActorProcessingErr::from(format!("db connect failed: {e}")))?;

        apply_schema(&pool)
            .await
            .map_err(|e| ActorProcessingErr::from(format!("db schema init failed: {e}")))?;

        info!("DbActor initialized");
        Ok(DbActorState { pool })
    }

    async fn handle(
        &self,
        _myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        let pool = &state.pool;
        match message {
            DbActorMessage::CurrentStatus(reply) => {
                let _ = reply.send(self.current_status(pool).await);
            }
            DbActorMessage::StatusHistory(limit, reply) => {
                let _ = reply.send(self.status_history(pool, limit).await);
            }
            DbActorMessage::UpdateStatus(is_live, reply) => {
                let _ = reply.send(self.update_status(pool, is_live).await);
            }
            DbActorMessage::CurrentInfo(reply) => {
                let _ = reply.send(self.current_info(pool).await);
            }
            DbActorMessage::UpdateInfo(title, description, reply) => {
                let _ = reply.send(self.append_info(pool, title, description).await);
            }
            DbActorMessage::ClearInfo(reply) => {
                let _ = reply.send(self.append_info(pool, None, None).await);
            }
            DbActorMessage::ListActiveSponsors(placement, reply) => {
                let _ = reply.send(self.list_active_sponsors(pool, placement).await);
            }
            DbActorMessage::ListAllSponsors(reply) => {
                let _ = reply.send(self.list_all_sponsors(pool).await);
            }
            DbActorMessage::CreateSponsor(create, reply) => {
                let _ = reply.send(self.create_sponsor(pool, create, Utc::now()).await);
            }
            DbActorMessage::UpdateSponsor(update, reply) => {
                let _ = reply.send(update.apply_patch(pool).await);
            }
            DbActorMessage::DeleteSponsor(id, reply) => {
                let _ = reply.send(self.delete_sponsor(pool, id).await);
            }
            DbActorMessage::SeedSampleSponsors(reply) => {
                let _ = reply.send(self.seed_sample_sponsors(pool).await);
            }
            DbActorMessage::ReplaceQuotes(quotes, reply) => {
                let _ = reply.send(self.replace_quotes(pool, quotes).await);
            }
            DbActorMessage::Quotes(kind, highlight, reply) => {
                let _ = reply.send(self.quotes(pool, kind, highlight).await);
            }
            DbActorMessage::ReplaceRepos(repos, reply) => {
                let _ = reply.send(self.replace_repos(pool, repos).await);
            }
            DbActorMessage::Repos(limit, reply) => {
                let _ = reply.send(self.repos(pool, limit).await);
            }
            DbActorMessage::ReplaceWeather(days, reply) => {
                let _ = reply.send(self.replace_weather(pool, days).await);
            }
            DbActorMessage::Weather(reply) => {
                let _ = reply.send(self.weather(pool).await);
            }
            DbActorMessage::ReplaceNews(stories, reply) => {
                let _ = reply.send(self.replace_news(pool, stories).await);
            }
            DbActorMessage::News(reply) => {
                let _ = reply.send(self.news(pool).await);
            }
            DbActorMessage::ReplaceFearGreed(data, reply) => {
                let _ = reply.send(self.replace_fear_greed(pool, data).await);
            }
            DbActorMessage::FearGreed(reply) => {
                let _ = reply.send(self.fear_greed(pool).await);
            }
        }
        Ok(())
    }
}

const SPONSOR_COLUMNS: &str = "id, placement, name, logo_url, link_url, display_text, \
     display_order, is_active, padding_class, created_at, updated_at";

#[derive(FromRow)]
struct WeatherDayRow {
    #[sqlx(flatten)]
    day: WeatherDay,
    updated: DateTime<Utc>,
}

#[derive(FromRow)]
struct NewsStoryRow {
    #[sqlx(flatten)]
    story: NewsStory,
    updated: DateTime<Utc>,
}

impl DbActor {
    async fn latest_status(
        &self,
        pool: &SqlitePool,
    ) -> Result<Option<DbStreamStatus>, OnairError> {
        let row = sqlx::query_as::<_, DbStreamStatus>(
            r#"
        SELECT id, is_live, timestamp, started_at
        FROM stream_status
        ORDER BY id DESC
        LIMIT 1
        "#,
        )
        .fetch_optional(pool)
        .await?;

        Ok(row)
    }

    async fn current_status(&self, pool: &SqlitePool) -> Result<DbStreamStatus, OnairError> {
        Ok(self
            .latest_status(pool)
            .await?
            .unwrap_or_else(|| DbStreamStatus::offline(Utc::now())))
    }

    async fn status_history(
        &self,
        pool: &SqlitePool,
        limit: u32,
    ) -> Result<Vec<DbStreamStatus>, OnairError> {
        let rows = sqlx::query_as::<_, DbStreamStatus>(
            r#"
        SELECT id, is_live, timestamp, started_at
        FROM stream_status
        ORDER BY id DESC
        LIMIT ?
        "#,
        )
        .bind(i64::from(limit))
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    async fn update_status(
        &self,
        pool: &SqlitePool,
        is_live: bool,
    ) -> Result<DbStreamStatus, OnairError> {
        if let Some(current) = self.latest_status(pool).await?
            && current.is_live == is_live
        {
            debug!(is_live, "stream status unchanged, nothing recorded");
            return Ok(current);
        }

        let now = Utc::now();
        let started_at = is_live.then_some(now);
        let id: i64 = sqlx::query_scalar(
            r#"
        INSERT INTO stream_status (is_live, timestamp, started_at)
        VALUES (?, ?, ?)
        RETURNING id
        "#,
        )
        .bind(is_live)
        .bind(now)
        .bind(started_at)
        .fetch_one(pool)
        .await?;

        info!(id, is_live, "stream status changed");
        Ok(DbStreamStatus {
            id: Some(id),
            is_live,
            timestamp: now,
            started_at,
        })
    }

    async fn current_info(&self, pool: &SqlitePool) -> Result<DbStreamInfo, OnairError> {
        let row = sqlx::query_as::<_, DbStreamInfo>(
            r#"
        SELECT id, title, description, timestamp
        FROM stream_info
        ORDER BY id DESC
        LIMIT 1
        "#,
        )
        .fetch_optional(pool)
        .await?;

        Ok(row.unwrap_or_else(|| DbStreamInfo::empty(Utc::now())))
    }

    async fn append_info(
        &self,
        pool: &SqlitePool,
        title: Option<String>,
        description: Option<String>,
    ) -> Result<DbStreamInfo, OnairError> {
        let title = non_blank(title);
        let description = non_blank(description);
        let now = Utc::now();

        let id: i64 = sqlx::query_scalar(
            r#"
        INSERT INTO stream_info (title, description, timestamp)
        VALUES (?, ?, ?)
        RETURNING id
        "#,
        )
        .bind(title.as_deref())
        .bind(description.as_deref())
        .bind(now)
        .fetch_one(pool)
        .await?;

        Ok(DbStreamInfo {
            id: Some(id),
            title,
            description,
            timestamp: now,
        })
    }

    async fn list_active_sponsors(
        &self,
        pool: &SqlitePool,
        placement: Option<Placement>,
    ) -> Result<Vec<DbSponsor>, OnairError> {
        let sql = format!(
            "SELECT {SPONSOR_COLUMNS} FROM sponsors \
             WHERE is_active = 1 AND (? IS NULL OR placement = ?) \
             ORDER BY display_order, id"
        );
        let rows = sqlx::query_as::<_, DbSponsor>(&sql)
            .bind(placement)
            .bind(placement)
            .fetch_all(pool)
            .await?;

        Ok(rows)
    }

    async fn list_all_sponsors(&self, pool: &SqlitePool) -> Result<Vec<DbSponsor>, OnairError> {
        let sql = format!("SELECT {SPONSOR_COLUMNS} FROM sponsors ORDER BY display_order, id");
        let rows = sqlx::query_as::<_, DbSponsor>(&sql).fetch_all(pool).await?;

        Ok(rows)
    }

    async fn create_sponsor<'e, E>(
        &self,
        executor: E,
        c: SponsorCreate,
        now: DateTime<Utc>,
    ) -> Result<i64, OnairError>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let id: i64 = sqlx::query_scalar(
            r#"
        INSERT INTO sponsors (
            placement, name, logo_url, link_url, display_text, display_order, is_active,
            padding_class, created_at, updated_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING id
        "#,
        )
        .bind(c.placement)
        .bind(c.name)
        .bind(c.logo_url)
        .bind(c.link_url)
        .bind(c.display_text)
        .bind(c.display_order)
        .bind(c.is_active)
        .bind(c.padding_class)
        .bind(now)
        .bind(now)
        .fetch_one(executor)
        .await?;

        Ok(id)
    }

    async fn delete_sponsor(&self, pool: &SqlitePool, id: i64) -> Result<(), OnairError> {
        let res = sqlx::query("DELETE FROM sponsors WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;

        if res.rows_affected() == 0 {
            return Err(OnairError::NotFound(format!("Sponsor {id}")));
        }
        Ok(())
    }

    async fn seed_sample_sponsors(&self, pool: &SqlitePool) -> Result<Vec<i64>, OnairError> {
        let mut tx = pool.begin().await?;

        let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sponsors")
            .fetch_one(&mut *tx)
            .await?;
        if existing > 0 {
            info!(existing, "sponsors already exist, skipping sample population");
            return Ok(Vec::new());
        }

        let now = Utc::now();
        let mut ids = Vec::new();
        for sponsor in sample_sponsors() {
            ids.push(self.create_sponsor(&mut *tx, sponsor, now).await?);
        }
        tx.commit().await?;

        info!(count = ids.len(), "sample sponsors created");
        Ok(ids)
    }

    async fn replace_quotes(
        &self,
        pool: &SqlitePool,
        quotes: Vec<DbQuote>,
    ) -> Result<(), OnairError> {
        let mut tx = pool.begin().await?;
        sqlx::query("DELETE FROM quotes").execute(&mut *tx).await?;
        for (position, q) in (0_i64..).zip(quotes.iter()) {
            sqlx::query(
                r#"
            INSERT INTO quotes (symbol, price, change_pct, kind, is_highlight, position, updated)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(symbol) DO UPDATE SET
                price = excluded.price,
                change_pct = excluded.change_pct,
                kind = excluded.kind,
                is_highlight = excluded.is_highlight,
                position = excluded.position,
                updated = excluded.updated
            "#,
            )
            .bind(&q.symbol)
            .bind(q.price)
            .bind(q.change_pct)
            .bind(q.kind)
            .bind(q.is_highlight)
            .bind(position)
            .bind(q.updated)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    async fn quotes(
        &self,
        pool: &SqlitePool,
        kind: QuoteKind,
        highlight: bool,
    ) -> Result<Vec<DbQuote>, OnairError> {
        let rows = sqlx::query_as::<_, DbQuote>(
            r#"
        SELECT symbol, price, change_pct, kind, is_highlight, updated
        FROM quotes
        WHERE kind = ? AND is_highlight = ?
        ORDER BY position
        "#,
        )
        .bind(kind)
        .bind(highlight)
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    async fn replace_repos(
        &self,
        pool: &SqlitePool,
        repos: Vec<RepoCreate>,
    ) -> Result<(), OnairError> {
        let now = Utc::now();
        let mut tx = pool.begin().await?;
        sqlx::query("DELETE FROM repos").execute(&mut *tx).await?;
        for r in repos {
            sqlx::query(
                r#"
            INSERT INTO repos (title, stars, star_count, url, updated)
            VALUES (?, ?, ?, ?, ?)
            "#,
            )
            .bind(r.title)
            .bind(r.stars)
            .bind(r.star_count)
            .bind(r.url)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    async fn repos(&self, pool: &SqlitePool, limit: u32) -> Result<Vec<DbRepo>, OnairError> {
        let rows = sqlx::query_as::<_, DbRepo>(
            r#"
        SELECT id, title, stars, star_count, url, updated
        FROM repos
        ORDER BY star_count DESC, id
        LIMIT ?
        "#,
        )
        .bind(i64::from(limit))
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    async fn replace_weather(
        &self,
        pool: &SqlitePool,
        days: Vec<WeatherDay>,
    ) -> Result<(), OnairError> {
        let now = Utc::now();
        let mut tx = pool.begin().await?;
        sqlx::query("DELETE FROM weather_days")
            .execute(&mut *tx)
            .await?;
        for (position, d) in (0_i64..).zip(days) {
            sqlx::query(
                r#"
            INSERT INTO weather_days (position, day, temp, condition, updated)
            VALUES (?, ?, ?, ?, ?)
            "#,
            )
            .bind(position)
            .bind(d.day)
            .bind(d.temp)
            .bind(d.condition)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    async fn weather(&self, pool: &SqlitePool) -> Result<Option<WeatherReport>, OnairError> {
        let rows = sqlx::query_as::<_, WeatherDayRow>(
            "SELECT day, temp, condition, updated FROM weather_days ORDER BY position",
        )
        .fetch_all(pool)
        .await?;

        let Some(updated) = rows.first().map(|r| r.updated) else {
            return Ok(None);
        };
        Ok(Some(WeatherReport {
            days: rows.into_iter().map(|r| r.day).collect(),
            updated,
        }))
    }

    async fn replace_news(
        &self,
        pool: &SqlitePool,
        stories: Vec<NewsStory>,
    ) -> Result<(), OnairError> {
        let now = Utc::now();
        let mut tx = pool.begin().await?;
        sqlx::query("DELETE FROM news_stories")
            .execute(&mut *tx)
            .await?;
        for (position, s) in (0_i64..).zip(stories) {
            sqlx::query(
                r#"
            INSERT INTO news_stories (position, title, url, date, updated)
            VALUES (?, ?, ?, ?, ?)
            "#,
            )
            .bind(position)
            .bind(s.title)
            .bind(s.url)
            .bind(s.date)
            .bind(now)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    async fn news(&self, pool: &SqlitePool) -> Result<Option<NewsDigest>, OnairError> {
        let rows = sqlx::query_as::<_, NewsStoryRow>(
            "SELECT title, url, date, updated FROM news_stories ORDER BY position",
        )
        .fetch_all(pool)
        .await?;

        let Some(updated) = rows.first().map(|r| r.updated) else {
            return Ok(None);
        };
        Ok(Some(NewsDigest {
            stories: rows.into_iter().map(|r| r.story).collect(),
            updated,
        }))
    }

    async fn replace_fear_greed(
        &self,
        pool: &SqlitePool,
        data: FearGreedData,
    ) -> Result<(), OnairError> {
        let mut tx = pool.begin().await?;
        sqlx::query("DELETE FROM fear_greed_index")
            .execute(&mut *tx)
            .await?;
        sqlx::query(
            r#"
        INSERT INTO fear_greed_index (value, value_classification, timestamp, time_until_update, updated)
        VALUES (?, ?, ?, ?, ?)
        "#,
        )
        .bind(data.value)
        .bind(data.value_classification)
        .bind(data.timestamp)
        .bind(data.time_until_update)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(())
    }

    async fn fear_greed(&self, pool: &SqlitePool) -> Result<Option<DbFearGreed>, OnairError> {
        let row = sqlx::query_as::<_, DbFearGreed>(
            r#"
        SELECT value, value_classification, timestamp, time_until_update, updated
        FROM fear_greed_index
        ORDER BY id DESC
        LIMIT 1
        "#,
        )
        .fetch_optional(pool)
        .await?;

        Ok(row)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// The placeholder line-up a fresh deployment starts with: one real sponsor and three open
/// card slots pointing at the checkout page.
fn sample_sponsors() -> Vec<SponsorCreate> {
    const CHECKOUT_URL: &str = "https://app.market.dev/checkout/cmdg4lrpa0001l10acbshoc4k";

    let available = |display_order: i64| SponsorCreate {
        placement: Placement::Card,
        name: "Available Spot".to_string(),
        logo_url: None,
        link_url: CHECKOUT_URL.to_string(),
        display_text: Some("BUY SPOT".to_string()),
        display_order,
        is_active: true,
        padding_class: None,
    };

    vec![
        SponsorCreate {
            name: "market.dev".to_string(),
            logo_url: Some("/market-dot-dev-logo-white.svg".to_string()),
            link_url: "https://market.dev".to_string(),
            ..available(1)
        },
        available(2),
        available(3),
        available(4),
    ]
}

/// Spawn the database actor and return a cloneable handle.
pub async fn spawn(database_url: &str) -> DbActorHandle {
    let (actor, _jh) = ractor::Actor::spawn(None, DbActor, database_url.to_string())
        .await
        .expect("failed to spawn DbActor");

    DbActorHandle { actor }
}

async fn apply_schema(pool: &SqlitePool) -> Result<(), OnairError> {
    for stmt in SQLITE_INIT.split(';') {
        let s = stmt.trim();
        if s.is_empty() {
            continue;
        }
        sqlx::query(s).execute(pool).await?;
    }
    Ok(())
}
