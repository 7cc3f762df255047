use crate::Release;
use crate::error::{Error, ErrorKind};
use exn::ResultExt;

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct ReleaseRow {
    pub(crate) pubtimestamp: i64,
    pub(crate) pubdate: String,
    pub(crate) version: String,
}
impl From<&Release> for ReleaseRow {
    fn from(release: &Release) -> Self {
        Self {
            pubtimestamp: release.timestamp(),
            pubdate: release.date().to_string(),
            version: release.version().to_string(),
        }
    }
}
impl TryFrom<ReleaseRow> for Release {
    type Error = Error;
    fn try_from(row: ReleaseRow) -> Result<Self, Self::Error> {
        Release::from_parts(row.pubtimestamp, row.pubdate, row.version).or_raise(|| ErrorKind::InvalidData("release"))
    }
}
