use release_matcher::catalog::CatalogSession;
use release_matcher::config::Config;
use release_matcher::matching::MatchVerdict;
use release_matcher::pipeline::evaluate_release;
use release_matcher::scan::discover_releases;
use tracing::{error, info};

#[derive(Debug, Default)]
struct ScanSummary {
    releases: usize,
    candidates: usize,
    full: usize,
    partial: usize,
}

#[tokio::main]
async fn main() {
    // Use RUST_LOG env var if set, otherwise default to info level
    let log_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt().with_env_filter(log_filter).init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let session = CatalogSession::new(config.api_url.clone(), config.api_key.clone())
        .with_max_pages(config.max_pages);
    let mut summary = ScanSummary::default();

    for release in discover_releases(&config.music_dir) {
        summary.releases += 1;

        for candidate in evaluate_release(&session, &release, config.music_threshold).await {
            summary.candidates += 1;
            match candidate.verdict {
                MatchVerdict::Full => summary.full += 1,
                MatchVerdict::Partial => summary.partial += 1,
                MatchVerdict::None => continue,
            }
            println!(
                "{}\t{}\t{}",
                candidate.verdict,
                candidate.torrent_id,
                release.directory_path.display()
            );
        }
    }

    info!(
        "✅ Scanned {} release(s), evaluated {} candidate(s): {} full, {} partial",
        summary.releases, summary.candidates, summary.full, summary.partial
    );
}
