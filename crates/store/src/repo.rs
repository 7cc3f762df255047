//! Repository for discovered releases, partitioned by hardware line.

use crate::error::{ErrorKind, Result};
use crate::models::ReleaseRow;
use crate::{Database, HardwareLine, Release, sql};
use exn::ResultExt;
use sqlx::SqlitePool;
use tracing::instrument;

/// Repository for reading and recording releases in the store database.
///
/// Reads never create anything: a hardware line that was never written to
/// reads back as an empty history. Rows that fail validation are skipped
/// with a warning instead of failing the whole history.
#[derive(Debug, Clone)]
pub struct Repository {
    pool: SqlitePool,
    dry_run: bool,
}
impl From<&Database> for Repository {
    fn from(db: &Database) -> Self {
        Self { pool: db.pool().clone(), dry_run: false }
    }
}
impl Repository {
    /// Create a new repository with the given connection pool.
    ///
    /// In dry-run mode [`insert_if_absent`](Self::insert_if_absent) reports
    /// what it would do without touching the database, so a read-only pool is
    /// enough.
    pub fn new(pool: SqlitePool, dry_run: bool) -> Self {
        Self { pool, dry_run }
    }

    async fn has_table(&self, hardware: HardwareLine) -> Result<bool> {
        let found: Option<i64> = sqlx::query_scalar(sql::SELECT_TABLE)
            .bind(hardware.as_str())
            .fetch_optional(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        Ok(found.is_some())
    }

    // =========================================================================
    // Read
    // =========================================================================

    /// Every valid recorded release for the hardware line, newest first.
    #[instrument(skip(self), fields(%hardware))]
    pub async fn read_all(&self, hardware: HardwareLine) -> Result<Vec<Release>> {
        if !self.has_table(hardware).await? {
            tracing::debug!("no releases recorded yet");
            return Ok(Vec::new());
        }
        let rows: Vec<ReleaseRow> = sqlx::query_as(&sql::select_all(hardware))
            .fetch_all(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        tracing::debug!(count = rows.len(), "read release history");
        let releases = rows
            .into_iter()
            .filter_map(|row| {
                let version = row.version.clone();
                Release::try_from(row)
                    .inspect_err(|err| tracing::warn!(version = %version, "skipping invalid stored release: {err:?}"))
                    .ok()
            })
            .collect();
        Ok(releases)
    }

    /// The newest valid recorded release for the hardware line, if any.
    pub async fn latest(&self, hardware: HardwareLine) -> Result<Option<Release>> {
        Ok(self.read_all(hardware).await?.into_iter().next())
    }

    /// Whether a release with this version label has been recorded.
    pub async fn contains(&self, hardware: HardwareLine, version: impl AsRef<str>) -> Result<bool> {
        if !self.has_table(hardware).await? {
            return Ok(false);
        }
        let found: Option<i64> = sqlx::query_scalar(&sql::select_version(hardware))
            .bind(version.as_ref())
            .fetch_optional(&self.pool)
            .await
            .or_raise(|| ErrorKind::Database)?;
        Ok(found.is_some())
    }

    // =========================================================================
    // Insert
    // =========================================================================

    /// Record a release unless one with the same version label already exists.
    ///
    /// The table creation, existence check and insert run in one transaction.
    /// Returns `true` if the release is new (and, outside dry-run mode, was
    /// inserted) and `false` if it was already known, which is not an error.
    #[instrument(skip(self, release), fields(%hardware, version = release.version()))]
    pub async fn insert_if_absent(&self, hardware: HardwareLine, release: &Release) -> Result<bool> {
        if self.dry_run {
            let known = self.contains(hardware, release.version()).await?;
            if !known {
                tracing::info!("dry run, not recording new release");
            }
            return Ok(!known);
        }
        let row = ReleaseRow::from(release);
        let mut tx = self.pool.begin().await.or_raise(|| ErrorKind::Database)?;
        sqlx::query(&sql::create_table(hardware)).execute(&mut *tx).await.or_raise(|| ErrorKind::Database)?;
        let existing: Option<i64> = sqlx::query_scalar(&sql::select_version(hardware))
            .bind(&row.version)
            .fetch_optional(&mut *tx)
            .await
            .or_raise(|| ErrorKind::Database)?;
        if existing.is_some() {
            tx.rollback().await.or_raise(|| ErrorKind::Database)?;
            tracing::debug!("release already recorded");
            return Ok(false);
        }
        sqlx::query(&sql::insert(hardware))
            .bind(row.pubtimestamp)
            .bind(&row.pubdate)
            .bind(&row.version)
            .execute(&mut *tx)
            .await
            .or_raise(|| ErrorKind::Database)?;
        tx.commit().await.or_raise(|| ErrorKind::Database)?;
        tracing::info!("recorded new release");
        Ok(true)
    }
}
