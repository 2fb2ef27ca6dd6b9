//! Integration tests for the query pipeline
//!
//! These tests use wiremock to stand in for the listing site and run full
//! queries end-to-end over HTTP.

use boxdly::config::{Config, ListingKind, ScraperConfig};
use boxdly::{BoxdlyError, FilmRecord, ScrapePipeline, YearMonth};
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TEST_AGENT: &str = "BoxdlyTest/1.0";

/// Creates a test configuration pointing at the mock server
fn create_test_config(base_url: &str) -> Config {
    Config {
        scraper: ScraperConfig {
            base_url: base_url.to_string(),
            max_pages: 10,
            fetch_timeout_ms: 2_000,
            user_agent: TEST_AGENT.to_string(),
            listing_format: ListingKind::Grid,
        },
    }
}

fn december() -> YearMonth {
    YearMonth::new(2024, 12).unwrap()
}

/// One poster grid entry; `None` viewing data leaves the paragraph out
fn grid_item(slug: Option<&str>, title: &str, viewing: Option<&str>) -> String {
    let slug_attr = slug
        .map(|s| format!(r#" data-film-slug="{}""#, s))
        .unwrap_or_default();
    let viewing = viewing
        .map(|v| format!(r#"<p class="poster-viewingdata">{}</p>"#, v))
        .unwrap_or_default();
    format!(
        r#"<li class="poster-container">
            <div class="film-poster"{slug_attr}>
                <img src="//a.ltrbxd.com/resized/{title}.jpg" alt="{title}" />
            </div>
            {viewing}
        </li>"#
    )
}

fn grid_page(items: &[String]) -> String {
    format!(
        r#"<!DOCTYPE html><html><head><title>Films</title></head><body>
        <ul class="poster-list -p125 -grid">{}</ul>
        </body></html>"#,
        items.concat()
    )
}

fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body, "text/html")
}

async fn mount_page(server: &MockServer, page_path: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(html(body))
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_unvisited(server: &MockServer, page_path: &str) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(html(grid_page(&[grid_item(
            Some("never"),
            "Never",
            Some("★★★★★"),
        )])))
        .expect(0)
        .mount(server)
        .await;
}

fn titles(films: &[FilmRecord]) -> Vec<&str> {
    films.iter().map(|f| f.title()).collect()
}

#[tokio::test]
async fn test_two_page_listing_end_to_end() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/dave/films/page/1/",
        grid_page(&[
            grid_item(Some("heat"), "Heat", Some("★★★ Watched Dec 12")),
            grid_item(Some("unrated"), "Unrated", Some("Watched")),
            grid_item(Some("alien"), "Alien", Some("★★★★½")),
            grid_item(Some("tenet"), "Tenet", Some("★★")),
        ]),
    )
    .await;
    mount_page(
        &mock_server,
        "/dave/films/page/2/",
        grid_page(&[
            grid_item(None, "Placeholder", Some("★★★★★")),
            grid_item(Some("ran"), "Ran", Some("★★★★★ Liked")),
            grid_item(Some("cats"), "Cats", Some("½")),
        ]),
    )
    .await;
    mount_page(&mock_server, "/dave/films/page/3/", grid_page(&[])).await;
    mount_unvisited(&mock_server, "/dave/films/page/4/").await;

    let config = create_test_config(&mock_server.uri());
    let pipeline = ScrapePipeline::from_config(&config).expect("Failed to build pipeline");

    let films = pipeline
        .top_films_for_month("dave", december())
        .await
        .expect("Query failed");

    assert_eq!(titles(&films), vec!["Ran", "Alien", "Heat", "Tenet"]);
    let ratings: Vec<u8> = films.iter().map(|f| f.rating()).collect();
    assert_eq!(ratings, vec![10, 9, 6, 4]);
    assert!(films.iter().all(|f| december().contains(f.watched_date())));

    let ran = &films[0];
    assert_eq!(
        ran.detail_url(),
        format!("{}/film/ran/", mock_server.uri())
    );
    assert_eq!(ran.poster_url(), "https://a.ltrbxd.com/resized/Ran.jpg");
}

#[tokio::test]
async fn test_fetch_failure_returns_partial_results() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/dave/films/page/1/",
        grid_page(&[grid_item(Some("heat"), "Heat", Some("★★★"))]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/dave/films/page/2/"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_unvisited(&mock_server, "/dave/films/page/3/").await;

    let pipeline = ScrapePipeline::from_config(&create_test_config(&mock_server.uri())).unwrap();

    let films = pipeline
        .top_films_for_month("dave", december())
        .await
        .expect("Fetch failures should not fail the query");

    assert_eq!(titles(&films), vec!["Heat"]);
}

#[tokio::test]
async fn test_unknown_user_is_an_empty_result() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let pipeline = ScrapePipeline::from_config(&create_test_config(&mock_server.uri())).unwrap();

    let films = pipeline
        .top_films_for_month("nobody_here", december())
        .await
        .unwrap();

    assert!(films.is_empty());
}

#[tokio::test]
async fn test_timeout_ends_pagination() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/dave/films/page/1/",
        grid_page(&[grid_item(Some("alien"), "Alien", Some("★★★★"))]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/dave/films/page/2/"))
        .respond_with(
            html(grid_page(&[grid_item(Some("slow"), "Slow", Some("★★★★★"))]))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(&mock_server.uri());
    config.scraper.fetch_timeout_ms = 300;
    let pipeline = ScrapePipeline::from_config(&config).unwrap();

    let films = pipeline
        .top_films_for_month("dave", december())
        .await
        .unwrap();

    assert_eq!(titles(&films), vec!["Alien"]);
}

#[tokio::test]
async fn test_non_html_response_ends_pagination() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dave/films/page/1/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(r#"{"films": []}"#, "application/json"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_unvisited(&mock_server, "/dave/films/page/2/").await;

    let pipeline = ScrapePipeline::from_config(&create_test_config(&mock_server.uri())).unwrap();

    let films = pipeline
        .top_films_for_month("dave", december())
        .await
        .unwrap();

    assert!(films.is_empty());
}

#[tokio::test]
async fn test_page_ceiling_from_config() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/dave/films/page/1/",
        grid_page(&[grid_item(Some("one"), "One", Some("★★"))]),
    )
    .await;
    mount_page(
        &mock_server,
        "/dave/films/page/2/",
        grid_page(&[grid_item(Some("two"), "Two", Some("★★★"))]),
    )
    .await;
    mount_unvisited(&mock_server, "/dave/films/page/3/").await;

    let mut config = create_test_config(&mock_server.uri());
    config.scraper.max_pages = 2;
    let pipeline = ScrapePipeline::from_config(&config).unwrap();

    let films = pipeline
        .top_films_for_month("dave", december())
        .await
        .unwrap();

    assert_eq!(titles(&films), vec!["Two", "One"]);
}

#[tokio::test]
async fn test_sends_configured_user_agent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dave/films/page/1/"))
        .and(header("user-agent", TEST_AGENT))
        .respond_with(html(grid_page(&[])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let pipeline = ScrapePipeline::from_config(&create_test_config(&mock_server.uri())).unwrap();

    let films = pipeline
        .top_films_for_month("dave", december())
        .await
        .unwrap();

    assert!(films.is_empty());
}

#[tokio::test]
async fn test_invalid_username_is_rejected_before_fetching() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(html(grid_page(&[])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let pipeline = ScrapePipeline::from_config(&create_test_config(&mock_server.uri())).unwrap();

    let result = pipeline.top_films("dave/../admin").await;

    assert!(matches!(result, Err(BoxdlyError::InvalidUsername { .. })));
}

#[tokio::test]
async fn test_diary_listing_uses_real_dates() {
    let mock_server = MockServer::start().await;

    let row = |title: &str, slug: &str, stars: &str, date: &str| {
        format!(
            r#"<tr class="diary-entry-row">
                <td class="td-day"><a href="/dave/films/diary/for/{date}/">x</a></td>
                <td class="td-film-details">
                    <h3 class="headline-3"><a href="/dave/film/{slug}/">{title}</a></h3>
                </td>
                <td class="td-rating"><span class="rating">{stars}</span></td>
            </tr>"#
        )
    };
    let diary = format!(
        r#"<html><body><table><tbody>{}{}{}</tbody></table></body></html>"#,
        row("Late November", "late-november", "★★★★★", "2024/11/30"),
        row("Early December", "early-december", "★★★", "2024/12/01"),
        row("Christmas", "christmas", "★★★★", "2024/12/25"),
    );

    mount_page(&mock_server, "/dave/films/diary/page/1/", diary).await;
    mount_page(
        &mock_server,
        "/dave/films/diary/page/2/",
        "<html><body><table></table></body></html>".to_string(),
    )
    .await;

    let mut config = create_test_config(&mock_server.uri());
    config.scraper.listing_format = ListingKind::Diary;
    let pipeline = ScrapePipeline::from_config(&config).unwrap();

    let films = pipeline
        .top_films_for_month("dave", december())
        .await
        .unwrap();

    assert_eq!(titles(&films), vec!["Christmas", "Early December"]);
    assert_eq!(
        films[0].watched_date(),
        chrono::NaiveDate::from_ymd_opt(2024, 12, 25).unwrap()
    );
}
