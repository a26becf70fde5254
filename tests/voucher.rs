//! Voucher tests against a mocked Fortnox API.

use chrono::NaiveDate;
use fortnox::{
    get_voucher, get_vouchers, Config, Create, FortnoxClient, Get, Voucher, VoucherKey, VoucherRow,
};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> FortnoxClient {
    let config = Config::new("test-token", "test-secret").with_base_url(server.uri());
    FortnoxClient::new(config).unwrap()
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn voucher_a12(base: &str) -> serde_json::Value {
    json!({
        "@url": format!("{base}/vouchers/A/12?financialyear=3"),
        "Description": "Office supplies",
        "TransactionDate": "2013-03-14",
        "VoucherNumber": 12,
        "VoucherSeries": "A",
        "Year": 3,
        "VoucherRows": [
            {"Account": 6110, "Debit": 500.0, "Credit": 0.0, "Description": "Paper"},
            {"Account": 1930, "Debit": 0.0, "Credit": 500.0, "Removed": false}
        ]
    })
}

#[tokio::test]
async fn test_create_voucher_sends_rows_and_takes_number() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/vouchers"))
        .and(body_json(json!({
            "Voucher": {
                "Description": "Office supplies",
                "VoucherSeries": "A",
                "TransactionDate": "2013-03-14",
                "VoucherRows": [
                    {"Account": 6110, "Debit": 500.0, "Credit": 0.0, "Description": "Paper"},
                    {"Account": 1930, "Debit": 0.0, "Credit": 500.0}
                ]
            }
        })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({"Voucher": voucher_a12("https://api.fortnox.se/3")})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut voucher = Voucher::new("A", date("2013-03-14"))
        .with_description("Office supplies")
        .with_row(VoucherRow::debit(6110, 500.0).with_description("Paper"))
        .with_row(VoucherRow::credit(1930, 500.0));

    voucher.create(&client).await.unwrap();

    assert_eq!(voucher.voucher_number, Some(12));
    assert_eq!(voucher.year, Some(3));
    assert_eq!(voucher.key(), Some(VoucherKey::new("A", 12).in_financial_year(3)));
    assert!(voucher.is_balanced());
}

#[tokio::test]
async fn test_get_voucher_by_key_with_financial_year() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/vouchers/A/12"))
        .and(query_param("financialyear", "3"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"Voucher": voucher_a12(&mock_server.uri())})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let key = VoucherKey::new("A", 12).in_financial_year(3);
    let voucher = Voucher::get(&client, key).await.unwrap();

    assert_eq!(voucher.description.as_deref(), Some("Office supplies"));
    assert_eq!(voucher.voucher_rows.len(), 2);
    assert_eq!(voucher.voucher_rows[1].credit, 500.0);
}

#[tokio::test]
async fn test_get_voucher_without_year_sends_no_filter() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/vouchers/A/12"))
        .and(query_param_is_missing("financialyear"))
        .and(query_param_is_missing("financialyeardate"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"Voucher": voucher_a12(&mock_server.uri())})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let voucher = get_voucher(&client, "A", 12).await.unwrap();

    assert_eq!(voucher.voucher_number, Some(12));
}

#[tokio::test]
async fn test_get_missing_voucher_names_series_and_number() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/vouchers/B/7"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = get_voucher(&client, "B", 7).await.unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(
        err.to_string(),
        "Unable to find Voucher with voucher series code: B, voucher number: 7"
    );
}

#[tokio::test]
async fn test_get_voucher_by_url() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/vouchers/A/12"))
        .and(query_param("financialyear", "3"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"Voucher": voucher_a12(&mock_server.uri())})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let url = format!("{}/vouchers/A/12?financialyear=3", mock_server.uri());
    let voucher = Voucher::get_by_url(&client, &url).await.unwrap();

    assert_eq!(voucher.url.as_deref(), Some(url.as_str()));
}

#[tokio::test]
async fn test_get_voucher_by_missing_url() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/vouchers/A/99"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let url = format!("{}/vouchers/A/99", mock_server.uri());
    let err = Voucher::get_by_url(&client, &url).await.unwrap_err();

    assert_eq!(err.to_string(), format!("Unable to find Voucher with url: {url}"));
}

#[tokio::test]
async fn test_get_vouchers_by_financial_year_date() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/vouchers"))
        .and(query_param("financialyeardate", "2013-06-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "MetaInformation": {"@TotalResources": 1, "@TotalPages": 1, "@CurrentPage": 1},
            "Vouchers": [voucher_a12(&mock_server.uri())]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let vouchers = get_vouchers(&client, None, Some(date("2013-06-01")))
        .await
        .unwrap();

    assert_eq!(vouchers.len(), 1);
    assert_eq!(vouchers[0].voucher_series.as_deref(), Some("A"));
}
