use crate::cycle::{apply, LogUpdate};
use crate::errors::StoreError;
use crate::models::{DailyLog, SeriesResponse};
use crate::stats::build_series;
use chrono::NaiveDate;
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

pub const COUNTER_FILE: &str = "counter.txt";
pub const LOG_FILE: &str = "walk_log.csv";

#[derive(Debug, Clone)]
pub struct StorePaths {
    pub counter: PathBuf,
    pub log: PathBuf,
}

impl StorePaths {
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            counter: dir.join(COUNTER_FILE),
            log: dir.join(LOG_FILE),
        }
    }
}

pub fn resolve_store_paths() -> StorePaths {
    let dir = env::var("APP_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data"));
    let mut paths = StorePaths::in_dir(dir);

    if let Ok(path) = env::var("APP_COUNTER_PATH") {
        paths.counter = PathBuf::from(path);
    }
    if let Ok(path) = env::var("APP_LOG_PATH") {
        paths.log = PathBuf::from(path);
    }

    paths
}

pub async fn ensure_parent_dirs(paths: &StorePaths) -> Result<(), StoreError> {
    for path in [&paths.counter, &paths.log] {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|err| StoreError::io(parent, err))?;
        }
    }
    Ok(())
}

/// Lifetime walk count kept as a single trimmed integer.
#[derive(Debug, Clone)]
pub struct CounterStore {
    path: PathBuf,
}

impl CounterStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> Result<u64, StoreError> {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                info!("creating counter store at {}", self.path.display());
                self.save(0).await?;
                return Ok(0);
            }
            Err(err) => return Err(StoreError::io(&self.path, err)),
        };

        let content = raw.trim();
        content
            .parse::<u64>()
            .map_err(|_| StoreError::MalformedCounter {
                path: self.path.clone(),
                content: content.to_string(),
            })
    }

    pub async fn save(&self, count: u64) -> Result<(), StoreError> {
        debug!("writing count {count} to {}", self.path.display());
        write_replace(&self.path, count.to_string().as_bytes()).await
    }

    pub async fn reset(&self) -> Result<(), StoreError> {
        self.save(0).await
    }
}

/// Meters per day, stored as headerless `date,meters` rows.
///
/// Every mutation reads and rewrites the whole file, which is fine for
/// one row per day of use but grows linearly with retention.
#[derive(Debug, Clone)]
pub struct DailyLogStore {
    path: PathBuf,
}

impl DailyLogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> Result<DailyLog, StoreError> {
        match fs::read_to_string(&self.path).await {
            Ok(raw) => parse_log(&self.path, &raw),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(DailyLog::default()),
            Err(err) => Err(StoreError::io(&self.path, err)),
        }
    }

    /// Applies one cycle's log update and returns the resulting log.
    ///
    /// `LogUpdate::None` only reads; nothing is rewritten.
    pub async fn apply_update(&self, today: NaiveDate, update: LogUpdate) -> Result<DailyLog, StoreError> {
        let mut log = self.load().await?;
        if update != LogUpdate::None {
            apply(update, today, &mut log);
            self.persist(&log).await?;
        }
        Ok(log)
    }

    pub async fn add(&self, today: NaiveDate, delta_meters: u64) -> Result<u64, StoreError> {
        let log = self.apply_update(today, LogUpdate::Add(delta_meters)).await?;
        Ok(log.get(today).unwrap_or_default())
    }

    pub async fn reset_today(&self, today: NaiveDate) -> Result<(), StoreError> {
        self.apply_update(today, LogUpdate::ResetToday).await?;
        Ok(())
    }

    pub async fn render_series(&self) -> Result<SeriesResponse, StoreError> {
        let log = self.load().await?;
        Ok(build_series(&log))
    }

    pub async fn persist(&self, log: &DailyLog) -> Result<(), StoreError> {
        debug!("writing {} log rows to {}", log.len(), self.path.display());
        write_replace(&self.path, format_log(log).as_bytes()).await
    }
}

pub fn parse_log(path: &Path, raw: &str) -> Result<DailyLog, StoreError> {
    let mut log = DailyLog::default();
    for (index, line) in raw.lines().enumerate() {
        let row = line.trim();
        if row.is_empty() {
            continue;
        }

        let malformed = || StoreError::MalformedLogRow {
            path: path.to_path_buf(),
            line: index + 1,
            content: row.to_string(),
        };

        let (date, meters) = row.split_once(',').ok_or_else(malformed)?;
        let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|_| malformed())?;
        let meters = meters.trim().parse::<u64>().map_err(|_| malformed())?;
        // a hand-edited file may repeat a date; fold it into the first row
        log.add(date, meters);
    }
    Ok(log)
}

pub fn format_log(log: &DailyLog) -> String {
    let mut out = String::new();
    for entry in log.entries() {
        out.push_str(&format!("{},{}\n", entry.date.format("%Y-%m-%d"), entry.meters));
    }
    out
}

async fn write_replace(path: &Path, payload: &[u8]) -> Result<(), StoreError> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    if let Err(err) = fs::write(&tmp, payload).await {
        discard_tmp(&tmp).await;
        return Err(StoreError::io(&tmp, err));
    }
    if let Err(err) = fs::rename(&tmp, path).await {
        discard_tmp(&tmp).await;
        return Err(StoreError::io(path, err));
    }
    Ok(())
}

async fn discard_tmp(tmp: &Path) {
    match fs::remove_file(tmp).await {
        Ok(()) => {}
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
        Err(err) => warn!("failed to remove {}: {err}", tmp.display()),
    }
}
