use std::fs;
use std::io::{self, Write};
use std::path::Path;

use exn::ResultExt;
use psfeed_extract::models::Release;
use psfeed_fetch::Fetcher;
use psfeed_render::Channel;
use psfeed_store::{Database, Repository};
use tracing::instrument;

use crate::error::{ErrorKind, Result};
use crate::settings::Settings;

/// Checks the live release and writes the report.
///
/// Without a database the report holds just the live release. With one, the
/// live release is recorded (once per version) and the whole stored history
/// is reported, newest first. If the live release can't be determined the
/// stored history is still written before the fetch error is returned.
#[instrument(skip_all, fields(hardware = %settings.hardware, format = %settings.format))]
pub async fn run(settings: &Settings) -> Result<()> {
    let fetcher = match &settings.base_url {
        Some(base_url) => Fetcher::with_base_url(base_url.as_str()),
        None => Fetcher::new(),
    }
    .or_raise(|| ErrorKind::Fetch)?;
    let channel = Channel::new(settings.hardware, fetcher.url(settings.hardware, &settings.locale));
    let live = fetcher
        .latest_release(settings.hardware, &settings.locale)
        .await
        .or_raise(|| ErrorKind::Fetch);

    let releases = match &settings.database {
        None => vec![live?],
        Some(path) => {
            if live.is_err() {
                tracing::warn!("latest release unavailable, reporting stored history only");
            }
            let history = record(path, settings, live.as_ref().ok()).await?;
            write_report(settings, &history, &channel)?;
            return live.map(|_| ());
        },
    };
    write_report(settings, &releases, &channel)
}

async fn record(path: &Path, settings: &Settings, live: Option<&Release>) -> Result<Vec<Release>> {
    if settings.dry_run && !path.exists() {
        tracing::info!(path = %path.display(), "dry run, no database yet");
        return Ok(live.into_iter().cloned().collect());
    }
    let db = if settings.dry_run {
        Database::connect_read_only(path).await
    } else {
        Database::connect(path).await
    }
    .or_raise(|| ErrorKind::Store)?;
    let history = record_into(&Repository::new(db.pool().clone(), settings.dry_run), settings, live).await;
    db.close().await;
    history
}

async fn record_into(repo: &Repository, settings: &Settings, live: Option<&Release>) -> Result<Vec<Release>> {
    let hardware = settings.hardware;
    let Some(release) = live else {
        return repo.read_all(hardware).await.or_raise(|| ErrorKind::Store);
    };
    match repo.latest(hardware).await.or_raise(|| ErrorKind::Store)? {
        Some(newest) if newest.is_same_release(release) => {
            tracing::debug!(version = release.version(), "live release is the newest recorded")
        },
        Some(newest) => tracing::info!(
            version = release.version(),
            newest = newest.version(),
            "live release differs from the newest recorded"
        ),
        None => tracing::info!(version = release.version(), "no release recorded yet"),
    }
    let added = repo.insert_if_absent(hardware, release).await.or_raise(|| ErrorKind::Store)?;
    let mut history = repo.read_all(hardware).await.or_raise(|| ErrorKind::Store)?;
    if added && settings.dry_run {
        let at = history.iter().position(|stored| stored.timestamp() <= release.timestamp()).unwrap_or(history.len());
        history.insert(at, release.clone());
    }
    Ok(history)
}

/// Renders the whole document before the output is opened, so a failed
/// render leaves a previous report untouched.
fn write_report(settings: &Settings, releases: &[Release], channel: &Channel) -> Result<()> {
    let mut document = Vec::new();
    settings.format.render(releases, channel, &mut document).or_raise(|| ErrorKind::Render)?;
    match &settings.output {
        Some(path) => {
            fs::write(path, &document).or_raise(|| ErrorKind::Output(path.clone()))?;
            tracing::info!(path = %path.display(), "report written");
        },
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&document).and_then(|()| stdout.flush()).or_raise(|| ErrorKind::Stdout)?;
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use psfeed_fetch::{HardwareLine, Locale};
    use psfeed_render::Format;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const PS5_PATH: &str = "/en-us/support/hardware/ps5/system-software/";

    fn support_page(timestamp: i64, version: &str) -> String {
        format!(
            r#"<html><head><meta name="publish_date_timestamp" content="{timestamp}"></head><body>
              <div><div class="accordion"><div>
                <div class="parbase textblock"><div><p><b>{version}</b></p></div></div>
              </div></div></div>
            </body></html>"#
        )
    }

    async fn serve(template: ResponseTemplate) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET")).and(path(PS5_PATH)).respond_with(template).mount(&server).await;
        server
    }

    fn settings(server: &MockServer, dir: &TempDir, format: Format, database: bool) -> Settings {
        Settings {
            hardware: HardwareLine::Ps5,
            locale: Locale::default(),
            format,
            database: database.then(|| dir.path().join("releases.db")),
            output: Some(dir.path().join("report")),
            base_url: Some(server.uri()),
            dry_run: false,
        }
    }

    fn report(dir: &TempDir) -> String {
        std::fs::read_to_string(dir.path().join("report")).unwrap()
    }

    #[tokio::test]
    async fn test_text_report_without_database() {
        let server = serve(ResponseTemplate::new(200).set_body_string(support_page(1_700_000_000, "Version 24.02"))).await;
        let dir = TempDir::new().unwrap();
        run(&settings(&server, &dir, Format::Text, false)).await.unwrap();
        assert_eq!(report(&dir), "PS5 Updates:\n- Tue Nov 14 22:13:20 UTC 2023: Version 24.02\n");
    }

    #[tokio::test]
    async fn test_history_is_recorded_once() {
        let server = serve(ResponseTemplate::new(200).set_body_string(support_page(1_700_000_000, "Version 24.02"))).await;
        let dir = TempDir::new().unwrap();
        let settings = settings(&server, &dir, Format::Text, true);
        run(&settings).await.unwrap();
        run(&settings).await.unwrap();
        assert_eq!(report(&dir).lines().count(), 2);

        server.reset().await;
        Mock::given(method("GET"))
            .and(path(PS5_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string(support_page(1_710_000_000, "Version 24.03")))
            .mount(&server)
            .await;
        run(&settings).await.unwrap();
        let report = report(&dir);
        let lines: Vec<_> = report.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].ends_with("Version 24.03"));
        assert!(lines[2].ends_with("Version 24.02"));
    }

    #[tokio::test]
    async fn test_rss_report() {
        let server = serve(ResponseTemplate::new(200).set_body_string(support_page(1_700_000_000, "Version 24.02"))).await;
        let dir = TempDir::new().unwrap();
        run(&settings(&server, &dir, Format::Rss, true)).await.unwrap();
        let feed = report(&dir);
        assert!(feed.starts_with("<?xml"));
        assert_eq!(feed.matches("<item>").count(), 1);
        assert!(feed.contains("<title>PS5 Update: Version 24.02</title>"));
        assert!(feed.contains(PS5_PATH));
    }

    #[tokio::test]
    async fn test_output_is_truncated() {
        let server = serve(ResponseTemplate::new(200).set_body_string(support_page(1_700_000_000, "Version 24.02"))).await;
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("report"), "x".repeat(4096)).unwrap();
        run(&settings(&server, &dir, Format::Text, false)).await.unwrap();
        assert!(!report(&dir).contains('x'));
    }

    #[tokio::test]
    async fn test_fetch_failure_without_database() {
        let server = serve(ResponseTemplate::new(503)).await;
        let dir = TempDir::new().unwrap();
        let err = run(&settings(&server, &dir, Format::Text, false)).await.unwrap_err();
        assert_eq!(*err, ErrorKind::Fetch);
        assert!(!dir.path().join("report").exists());
    }

    #[tokio::test]
    async fn test_fetch_failure_still_reports_history() {
        let server = serve(ResponseTemplate::new(200).set_body_string(support_page(1_700_000_000, "Version 24.02"))).await;
        let dir = TempDir::new().unwrap();
        let settings = settings(&server, &dir, Format::Text, true);
        run(&settings).await.unwrap();

        server.reset().await;
        Mock::given(method("GET")).and(path(PS5_PATH)).respond_with(ResponseTemplate::new(404)).mount(&server).await;
        let err = run(&settings).await.unwrap_err();
        assert_eq!(*err, ErrorKind::Fetch);
        assert!(report(&dir).ends_with("Version 24.02\n"));
    }

    #[tokio::test]
    async fn test_dry_run_without_database_creates_nothing() {
        let server = serve(ResponseTemplate::new(200).set_body_string(support_page(1_700_000_000, "Version 24.02"))).await;
        let dir = TempDir::new().unwrap();
        let mut settings = settings(&server, &dir, Format::Text, true);
        settings.dry_run = true;
        run(&settings).await.unwrap();
        assert!(!dir.path().join("releases.db").exists());
        assert_eq!(report(&dir), "PS5 Updates:\n- Tue Nov 14 22:13:20 UTC 2023: Version 24.02\n");
    }

    #[tokio::test]
    async fn test_dry_run_reports_without_recording() {
        let server = serve(ResponseTemplate::new(200).set_body_string(support_page(1_700_000_000, "Version 24.02"))).await;
        let dir = TempDir::new().unwrap();
        let mut settings = settings(&server, &dir, Format::Text, true);
        run(&settings).await.unwrap();

        server.reset().await;
        Mock::given(method("GET"))
            .and(path(PS5_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string(support_page(1_710_000_000, "Version 24.03")))
            .mount(&server)
            .await;
        settings.dry_run = true;
        run(&settings).await.unwrap();
        let lines: Vec<_> = report(&dir).lines().map(str::to_string).collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].ends_with("Version 24.03"));

        let db = Database::connect_read_only(dir.path().join("releases.db")).await.unwrap();
        let releases = Repository::from(&db).read_all(HardwareLine::Ps5).await.unwrap();
        db.close().await;
        assert_eq!(releases.len(), 1);
        assert_eq!(releases[0].version(), "Version 24.02");
    }

    #[tokio::test]
    async fn test_failed_run_keeps_previous_report() {
        let server = serve(ResponseTemplate::new(503)).await;
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("report"), "PS5 Updates:\n- previous\n").unwrap();
        assert!(run(&settings(&server, &dir, Format::Text, false)).await.is_err());
        assert_eq!(report(&dir), "PS5 Updates:\n- previous\n");
    }

    #[tokio::test]
    async fn test_unwritable_output() {
        let server = serve(ResponseTemplate::new(200).set_body_string(support_page(1_700_000_000, "Version 24.02"))).await;
        let dir = TempDir::new().unwrap();
        let mut settings = settings(&server, &dir, Format::Text, false);
        settings.output = Some(dir.path().join("missing").join("report"));
        let err = run(&settings).await.unwrap_err();
        assert!(matches!(&*err, ErrorKind::Output(_)));
    }
}
