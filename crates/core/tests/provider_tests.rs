// ═══════════════════════════════════════════════════════════════════
// Provider Tests — Relay client, token catalog helpers, Fear & Greed
// ═══════════════════════════════════════════════════════════════════

use dca_tracker_core::errors::CoreError;
use dca_tracker_core::models::catalog::CatalogToken;
use dca_tracker_core::models::settings::Settings;
use dca_tracker_core::providers::catalog::{dedupe_tokens, search_tokens};
use dca_tracker_core::providers::fear_greed::FearGreedProvider;
use dca_tracker_core::providers::relay::RelayProvider;
use dca_tracker_core::providers::traits::PriceSource;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn token(symbol: &str, name: &str, chain_id: &str) -> CatalogToken {
    CatalogToken {
        id: symbol.to_lowercase(),
        name: name.into(),
        symbol: symbol.into(),
        address: Some(format!("0x{}", symbol.to_lowercase())),
        decimals: Some(18),
        chain_id: chain_id.into(),
        chain_name: "ethereum".into(),
        chain_display_name: "Ethereum".into(),
    }
}

fn chains_body() -> serde_json::Value {
    json!({
        "chains": [
            {
                "id": 1,
                "name": "ethereum",
                "displayName": "Ethereum",
                "currency": {
                    "id": "eth",
                    "name": "Ether",
                    "symbol": "ETH",
                    "address": "0x0000000000000000000000000000000000000000",
                    "decimals": 18
                },
                "solverCurrencies": [
                    {
                        "id": "usdc",
                        "name": "USD Coin",
                        "symbol": "USDC",
                        "address": "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48",
                        "decimals": 6
                    }
                ]
            },
            {
                "id": 8453,
                "name": "base",
                "currency": { "name": "Ether", "symbol": "ETH" },
                "solverCurrencies": []
            }
        ]
    })
}

// ═══════════════════════════════════════════════════════════════════
// RelayProvider
// ═══════════════════════════════════════════════════════════════════

mod relay {
    use super::*;

    #[tokio::test]
    async fn list_assets_flattens_chains() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/chains"))
            .respond_with(ResponseTemplate::new(200).set_body_json(chains_body()))
            .mount(&server)
            .await;

        let relay = RelayProvider::new().with_base_url(server.uri());
        let tokens = relay.list_assets().await.unwrap();

        assert_eq!(tokens.len(), 3);
        // Gas token first, then solver tokens
        assert_eq!(tokens[0].symbol, "ETH");
        assert_eq!(tokens[0].chain_id, "1");
        assert_eq!(tokens[0].chain_display_name, "Ethereum");
        assert_eq!(tokens[1].symbol, "USDC");
        assert_eq!(tokens[1].decimals, Some(6));
        assert_eq!(tokens[2].chain_id, "8453");
    }

    #[tokio::test]
    async fn display_name_falls_back_to_name() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/chains"))
            .respond_with(ResponseTemplate::new(200).set_body_json(chains_body()))
            .mount(&server)
            .await;

        let relay = RelayProvider::new().with_base_url(server.uri());
        let tokens = relay.list_assets().await.unwrap();

        let base = tokens.iter().find(|t| t.chain_id == "8453").unwrap();
        assert_eq!(base.chain_display_name, "base");
        assert_eq!(base.address, None);
        assert_eq!(base.id, "");
    }

    #[tokio::test]
    async fn empty_chain_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/chains"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let relay = RelayProvider::new().with_base_url(server.uri());
        assert!(relay.list_assets().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn get_price_sends_address_and_chain() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/currencies/token/price"))
            .and(query_param("address", "0xabc"))
            .and(query_param("chainId", "8453"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "price": 3120.55 })))
            .expect(1)
            .mount(&server)
            .await;

        let relay = RelayProvider::new().with_base_url(server.uri());
        let price = relay.get_price("0xabc", "8453").await.unwrap();
        assert_eq!(price, 3120.55);
    }

    #[tokio::test]
    async fn missing_price_is_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/currencies/token/price"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let relay = RelayProvider::new().with_base_url(server.uri());
        let err = relay.get_price("0xabc", "1").await.unwrap_err();
        match err {
            CoreError::Api { provider, message } => {
                assert_eq!(provider, "Relay");
                assert!(message.contains("No price data for 0xabc on chain 1"));
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn http_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/currencies/token/price"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let relay = RelayProvider::new().with_base_url(server.uri());
        let err = relay.get_price("0xabc", "1").await.unwrap_err();
        match err {
            CoreError::Api { message, .. } => assert!(message.contains("503")),
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unparseable_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/chains"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let relay = RelayProvider::new().with_base_url(server.uri());
        let err = relay.list_assets().await.unwrap_err();
        match err {
            CoreError::Api { message, .. } => assert!(message.contains("Failed to parse chains")),
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreachable_host_is_network_error() {
        let settings = Settings {
            relay_base_url: "http://127.0.0.1:1".into(),
            request_timeout_secs: 2,
            ..Settings::default()
        };
        let relay = RelayProvider::from_settings(&settings);
        let err = relay.get_price("0xsecret", "1").await.unwrap_err();
        match err {
            CoreError::Network(msg) => assert!(!msg.contains("0xsecret")),
            other => panic!("expected Network error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn trailing_slash_in_base_url() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/chains"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "chains": [] })))
            .expect(1)
            .mount(&server)
            .await;

        let relay = RelayProvider::new().with_base_url(format!("{}/", server.uri()));
        assert!(relay.list_assets().await.is_ok());
    }

    #[test]
    fn name() {
        assert_eq!(RelayProvider::new().name(), "Relay");
    }
}

// ═══════════════════════════════════════════════════════════════════
// Catalog helpers
// ═══════════════════════════════════════════════════════════════════

mod catalog {
    use super::*;

    fn catalog() -> Vec<CatalogToken> {
        vec![
            token("ETH", "Ether", "1"),
            token("USDC", "USD Coin", "1"),
            token("WBTC", "Wrapped Bitcoin", "1"),
        ]
    }

    #[test]
    fn search_matches_symbol_case_insensitive() {
        let hits = search_tokens(&catalog(), "usdc");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].symbol, "USDC");
    }

    #[test]
    fn search_matches_name_substring() {
        let hits = search_tokens(&catalog(), "bitco");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].symbol, "WBTC");
    }

    #[test]
    fn search_trims_query() {
        assert_eq!(search_tokens(&catalog(), "  eth  ").len(), 1);
    }

    #[test]
    fn blank_query_returns_everything() {
        assert_eq!(search_tokens(&catalog(), "   ").len(), 3);
        assert_eq!(search_tokens(&catalog(), "").len(), 3);
    }

    #[test]
    fn search_without_hits() {
        assert!(search_tokens(&catalog(), "doge").is_empty());
    }

    #[test]
    fn dedupe_keeps_first_and_order() {
        let eth = token("ETH", "Ether", "1");
        let usdc = token("USDC", "USD Coin", "1");
        let deduped = dedupe_tokens(vec![eth.clone(), usdc.clone(), eth.clone(), usdc]);
        let symbols: Vec<&str> = deduped.iter().map(|t| t.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["ETH", "USDC"]);
    }

    #[test]
    fn dedupe_keeps_same_token_on_other_chain() {
        let deduped = dedupe_tokens(vec![token("ETH", "Ether", "1"), token("ETH", "Ether", "10")]);
        assert_eq!(deduped.len(), 2);
    }
}

// ═══════════════════════════════════════════════════════════════════
// FearGreedProvider
// ═══════════════════════════════════════════════════════════════════

mod fear_greed {
    use super::*;

    fn index_body() -> serde_json::Value {
        json!({
            "name": "Fear and Greed Index",
            "data": [
                { "value": "72", "value_classification": "Greed", "timestamp": "1700000000" },
                { "value": "25", "value_classification": "Extreme Fear", "timestamp": "1699913600" }
            ]
        })
    }

    #[tokio::test]
    async fn current_reading() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/fng/"))
            .and(query_param("limit", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(index_body()))
            .mount(&server)
            .await;

        let fng = FearGreedProvider::new().with_base_url(server.uri());
        let reading = fng.current().await.unwrap();
        assert_eq!(reading.value, 72);
        assert_eq!(reading.classification, "Greed");
        assert_eq!(reading.timestamp.timestamp(), 1_700_000_000);
    }

    #[tokio::test]
    async fn history_keeps_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/fng/"))
            .and(query_param("limit", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(index_body()))
            .mount(&server)
            .await;

        let fng = FearGreedProvider::new().with_base_url(server.uri());
        let readings = fng.history(2).await.unwrap();
        assert_eq!(readings.len(), 2);
        assert_eq!(readings[1].classification, "Extreme Fear");
        assert!(readings[0].timestamp > readings[1].timestamp);
    }

    #[tokio::test]
    async fn zero_limit_asks_for_one() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/fng/"))
            .and(query_param("limit", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(index_body()))
            .expect(1)
            .mount(&server)
            .await;

        let fng = FearGreedProvider::new().with_base_url(server.uri());
        assert!(fng.history(0).await.is_ok());
    }

    #[tokio::test]
    async fn empty_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/fng/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
            .mount(&server)
            .await;

        let fng = FearGreedProvider::new().with_base_url(server.uri());
        let err = fng.current().await.unwrap_err();
        assert!(err.to_string().contains("Empty index response"));
    }

    #[tokio::test]
    async fn bad_value_is_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/fng/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{ "value": "lots", "value_classification": "Greed", "timestamp": "1700000000" }]
            })))
            .mount(&server)
            .await;

        let fng = FearGreedProvider::new().with_base_url(server.uri());
        assert!(matches!(fng.current().await, Err(CoreError::Api { .. })));
    }

    #[tokio::test]
    async fn http_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/fng/"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let fng = FearGreedProvider::new().with_base_url(server.uri());
        let err = fng.current().await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "API error (Fear & Greed): Index request failed with HTTP 500 Internal Server Error"
        );
    }
}
