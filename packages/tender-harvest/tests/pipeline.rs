//! End-to-end pipeline scenarios against a mock detail fetcher.

use chrono::NaiveDate;
use serde_json::json;

use tender_harvest::{
    build_record, harvest, harvest_rows, parse_summary_response, HarvestConfig, MockFetcher,
    RawSummaryItem, SkipReason,
};

const DETAIL_URL: &str = "https://www.nra.co.za/tender/1001";

const DETAIL_PAGE: &str = r#"
    <html><head><script>trackPageView();</script></head><body>
    <div class="page-header"><h2>Bridge Survey</h2></div>
    <h3>Geotechnical survey for bridge rehabilitation</h3>
    <table>
        <tr><td>Tender Number:</td><td>N.001-A</td></tr>
        <tr><th>Create Date</th><td>2025-09-26</td></tr>
        <tr><td>Closing Date:</td><td>2025-10-17T11:00:00</td></tr>
        <tr><td>Tender Notice:</td>
            <td>Submit technical queries to engineer@example.org before the closing date.</td></tr>
    </table>
    <a href="/docs/scope.pdf">Scope of Works</a>
    </body></html>
"#;

fn summary_item() -> RawSummaryItem {
    RawSummaryItem {
        title: "Bridge Survey".to_string(),
        detail_url: Some(DETAIL_URL.to_string()),
        description: "Bridge survey services".to_string(),
        category: "Consulting".to_string(),
        region: "Western Cape".to_string(),
        notice_text: String::new(),
        published_raw: Some("2025-09-26".to_string()),
        closing_raw: None,
    }
}

fn day(y: i32, m: u32, d: u32) -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

// Scenario A: reachable detail page supplies the richer fields.
#[tokio::test]
async fn reachable_detail_page_yields_fully_enriched_record() {
    let mock = MockFetcher::new().with_page(DETAIL_URL, DETAIL_PAGE);
    let config = HarvestConfig::default();

    let outcome = harvest(&mock, &[summary_item()], &config).await;

    assert_eq!(outcome.report.valid, 1);
    assert_eq!(outcome.report.fetched, 1);
    assert!(outcome.report.is_clean());

    let tender = &outcome.batches[0][0];
    assert_eq!(tender.base.title, "Bridge Survey");
    assert_eq!(
        tender.base.description,
        "Geotechnical survey for bridge rehabilitation"
    );
    assert_eq!(tender.base.source, "SANRAL");
    assert_eq!(tender.tender_number, "N.001-A");
    assert_eq!(tender.email, "engineer@example.org");
    assert_eq!(tender.base.published_date, Some(day(2025, 9, 26)));
    assert_eq!(
        tender.base.closing_date,
        NaiveDate::from_ymd_opt(2025, 10, 17).map(|d| d.and_hms_opt(11, 0, 0).unwrap())
    );
    assert_eq!(
        tender.full_notice_text,
        "Submit technical queries to engineer@example.org before the closing date."
    );
    assert_eq!(tender.base.supporting_docs.len(), 2);
    assert_eq!(tender.base.supporting_docs[0].url, DETAIL_URL);
    assert!(tender.base.tags.is_empty());
}

// Scenario B: fetch failure degrades to summary-only fields.
#[tokio::test]
async fn timeout_falls_back_to_summary_fields() {
    let mock = MockFetcher::new().with_timeout(DETAIL_URL);
    let config = HarvestConfig::default();

    let outcome = harvest(&mock, &[summary_item()], &config).await;

    assert_eq!(outcome.report.valid, 1);
    assert_eq!(outcome.report.fetched, 0);

    let tender = &outcome.batches[0][0];
    assert_eq!(tender.base.title, "Bridge Survey");
    assert_eq!(tender.base.description, "Bridge survey services");
    assert_eq!(tender.base.published_date, Some(day(2025, 9, 26)));
    assert_eq!(tender.base.closing_date, None);
    assert_eq!(tender.tender_number, "");
    assert_eq!(tender.email, "");
    assert_eq!(tender.full_notice_text, "");
    assert_eq!(tender.category, "Consulting");
    assert_eq!(tender.region, "Western Cape");
}

// Scenario C: date-ordering violation excludes the record.
#[tokio::test]
async fn inverted_dates_exclude_the_record_from_batches() {
    let page = r#"
        <div class="page-header"><h2>Bridge Survey</h2></div>
        <h3>Geotechnical survey</h3>
        <table>
            <tr><th>Create Date</th><td>2025-10-17</td></tr>
            <tr><td>Closing Date:</td><td>2025-09-26</td></tr>
        </table>
    "#;
    let mock = MockFetcher::new().with_page(DETAIL_URL, page);
    let config = HarvestConfig::default();

    let outcome = harvest(&mock, &[summary_item()], &config).await;

    assert_eq!(outcome.report.valid, 0);
    assert!(outcome.batches.is_empty());
    assert_eq!(outcome.report.skipped_count(), 1);
    assert!(matches!(
        outcome.report.skipped[0].reason,
        SkipReason::DateOrdering { .. }
    ));
}

// Scenario D: 23 valid records, batch size 10 -> 10/10/3 in order.
#[tokio::test]
async fn twenty_three_records_batch_as_ten_ten_three() {
    let mock = MockFetcher::new();
    let config = HarvestConfig::default();

    let items: Vec<_> = (0..23)
        .map(|n| {
            let url = format!("https://www.nra.co.za/tender/{n}");
            mock.add_page(
                &url,
                format!(
                    r#"<div class="page-header"><h2>Tender {n}</h2></div>
                       <h3>Description {n}</h3>"#
                ),
            );
            RawSummaryItem {
                title: format!("Tender {n}"),
                detail_url: Some(url),
                description: format!("Description {n}"),
                ..Default::default()
            }
        })
        .collect();

    let outcome = harvest(&mock, &items, &config).await;

    assert_eq!(outcome.report.valid, 23);
    let sizes: Vec<_> = outcome.batches.iter().map(Vec::len).collect();
    assert_eq!(sizes, vec![10, 10, 3]);

    let titles: Vec<_> = outcome
        .batches
        .iter()
        .flatten()
        .map(|t| t.base.title.clone())
        .collect();
    let expected: Vec<_> = (0..23).map(|n| format!("Tender {n}")).collect();
    assert_eq!(titles, expected);

    // Tag invariant holds across every emitted record.
    assert!(outcome.batches.iter().flatten().all(|t| t.base.tags.is_empty()));
}

// Same inputs always produce a bit-identical record.
#[tokio::test]
async fn rebuilding_the_same_item_is_idempotent() {
    let mock = MockFetcher::new().with_page(DETAIL_URL, DETAIL_PAGE);
    let config = HarvestConfig::default();

    let first = build_record(&mock, &summary_item(), &config)
        .await
        .record
        .unwrap();
    let second = build_record(&mock, &summary_item(), &config)
        .await
        .record
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
}

// Full path from the list-API envelope to batched records.
#[tokio::test]
async fn harvests_raw_list_api_rows_end_to_end() {
    let body = json!({
        "tenders": [
            [
                "<a href=\"/tender/1001\">N.001-A</a>",
                "Consulting",
                "Western Cape",
                "Tender Notice: Bridge survey services",
                "Thin list-row notice",
                "2025/10/17 11:00"
            ],
            "unusable row"
        ],
        "total_filtered": 2
    })
    .to_string();

    let response = parse_summary_response(&body).unwrap();
    let mock = MockFetcher::new().with_page(DETAIL_URL, DETAIL_PAGE);
    let config = HarvestConfig::default();

    let outcome = harvest_rows(&mock, &response.tenders, &config).await;

    assert_eq!(outcome.report.items, 2);
    assert_eq!(outcome.report.valid, 1);
    assert_eq!(outcome.report.skipped_count(), 1);
    assert_eq!(outcome.report.skipped[0].reason, SkipReason::UnusableRow);

    let tender = &outcome.batches[0][0];
    // Detail page supersedes the anchor-text title and list-row notice.
    assert_eq!(tender.base.title, "Bridge Survey");
    assert_eq!(tender.tender_number, "N.001-A");
    assert_eq!(
        tender.full_notice_text,
        "Submit technical queries to engineer@example.org before the closing date."
    );

    // The emitted wire shape is flat camelCase with empty tags.
    let wire: serde_json::Value = serde_json::from_str(&tender.to_json().unwrap()).unwrap();
    assert_eq!(wire["tenderNumber"], "N.001-A");
    assert_eq!(wire["publishedDate"], "2025-09-26T00:00:00");
    assert_eq!(wire["closingDate"], "2025-10-17T11:00:00");
    assert_eq!(wire["tags"], json!([]));
}
