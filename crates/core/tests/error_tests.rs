// ═══════════════════════════════════════════════════════════════════
// Error Tests — CoreError display & conversions
// ═══════════════════════════════════════════════════════════════════

use dca_tracker_core::errors::CoreError;

mod display {
    use super::*;

    #[test]
    fn command_errors() {
        assert_eq!(
            CoreError::AssetNotFound("abc".into()).to_string(),
            "Asset not found: abc"
        );
        assert_eq!(
            CoreError::InvalidPrice("-1 is negative".into()).to_string(),
            "Invalid price: -1 is negative"
        );
        assert_eq!(
            CoreError::InvalidTransaction("amount must be positive".into()).to_string(),
            "Invalid transaction: amount must be positive"
        );
        assert_eq!(
            CoreError::Validation("name is empty".into()).to_string(),
            "Asset validation failed: name is empty"
        );
    }

    #[test]
    fn price_source_errors() {
        let e = CoreError::PriceFetch {
            symbol: "ETH".into(),
            message: "timeout".into(),
        };
        assert_eq!(e.to_string(), "Failed to fetch price for ETH: timeout");

        let e = CoreError::Api {
            provider: "Relay".into(),
            message: "rate limited".into(),
        };
        assert_eq!(e.to_string(), "API error (Relay): rate limited");

        assert_eq!(
            CoreError::Network("connection reset".into()).to_string(),
            "Network error: connection reset"
        );
    }

    #[test]
    fn storage_errors() {
        assert_eq!(
            CoreError::InvalidImportFormat("missing cryptoList array".into()).to_string(),
            "Invalid import format: missing cryptoList array"
        );
        assert_eq!(CoreError::Serialization("x".into()).to_string(), "Serialization error: x");
        assert_eq!(CoreError::Deserialization("x".into()).to_string(), "Deserialization error: x");
        assert_eq!(CoreError::Storage("x".into()).to_string(), "Storage error: x");
        assert_eq!(CoreError::FileIO("x".into()).to_string(), "File I/O error: x");
    }

    #[test]
    fn kinds_are_distinguishable() {
        let messages = [
            CoreError::AssetNotFound("x".into()).to_string(),
            CoreError::InvalidPrice("x".into()).to_string(),
            CoreError::Network("x".into()).to_string(),
            CoreError::InvalidImportFormat("x".into()).to_string(),
        ];
        for (i, a) in messages.iter().enumerate() {
            for b in &messages[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}

mod conversions {
    use super::*;

    #[test]
    fn from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let e: CoreError = io.into();
        assert!(matches!(e, CoreError::FileIO(ref m) if m.contains("denied")));
    }

    #[test]
    fn from_serde_json_error() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let e: CoreError = err.into();
        assert!(matches!(e, CoreError::Deserialization(_)));
    }

    #[test]
    fn question_mark_converts() {
        fn read_missing() -> Result<String, CoreError> {
            Ok(std::fs::read_to_string("/definitely/not/here.json")?)
        }
        assert!(matches!(read_missing(), Err(CoreError::FileIO(_))));
    }

    #[tokio::test]
    async fn from_reqwest_error_redacts_query() {
        let err = reqwest::Client::new()
            .get("http://127.0.0.1:1/currencies/token/price?address=0xdeadbeef&chainId=1")
            .send()
            .await
            .unwrap_err();
        let e: CoreError = err.into();
        match e {
            CoreError::Network(msg) => {
                assert!(!msg.contains("0xdeadbeef"));
                assert!(msg.contains("<query redacted>"));
            }
            other => panic!("expected Network error, got {other:?}"),
        }
    }
}
