//! Unit tests for error handling

use super::*;
use std::io;

#[cfg(test)]
mod futebol_error_tests {
    use super::*;

    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let error = FutebolError::from(json_error);

        match error {
            FutebolError::Json(_) => (),
            _ => panic!("Expected Json error variant"),
        }
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = FutebolError::from(io_error);

        match error {
            FutebolError::Io(_) => (),
            _ => panic!("Expected Io error variant"),
        }
    }

    #[test]
    fn test_sqlite_error_conversion() {
        let error = FutebolError::from(rusqlite::Error::QueryReturnedNoRows);

        match error {
            FutebolError::Sqlite(_) => (),
            _ => panic!("Expected Sqlite error variant"),
        }
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_error = toml::from_str::<toml::Value>("backend = ").unwrap_err();
        let error = FutebolError::from(toml_error);

        match error {
            FutebolError::Toml(_) => (),
            _ => panic!("Expected Toml error variant"),
        }
    }

    #[test]
    fn test_validation_display() {
        let error = FutebolError::validation("email", "is required");
        assert_eq!(error.to_string(), "Invalid email: is required");
    }

    #[test]
    fn test_duplicate_key_display() {
        let error = FutebolError::DuplicateKey {
            kind: EntityKind::OfficialTeam,
            key: "short code FUR".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Duplicate official team: short code FUR already registered"
        );
    }

    #[test]
    fn test_reference_display() {
        let error = FutebolError::Reference {
            kind: EntityKind::UserTeam,
            id: 7,
        };
        assert_eq!(error.to_string(), "Referenced user team 7 does not exist");
    }

    #[test]
    fn test_config_display() {
        let error = FutebolError::Config {
            message: "unknown backend 'mongo'".to_string(),
        };
        assert!(error.to_string().starts_with("Configuration error:"));
    }

    #[test]
    fn test_input_errors_are_recoverable() {
        assert!(FutebolError::validation("sex", "bad").is_recoverable());
        assert!(FutebolError::DuplicateKey {
            kind: EntityKind::User,
            key: "email a@b".to_string(),
        }
        .is_recoverable());
        assert!(FutebolError::Reference {
            kind: EntityKind::Player,
            id: 1,
        }
        .is_recoverable());
    }

    #[test]
    fn test_storage_errors_are_not_recoverable() {
        let io_error = FutebolError::from(io::Error::new(io::ErrorKind::Other, "disk full"));
        assert!(!io_error.is_recoverable());

        let storage = FutebolError::Storage {
            message: "corrupt".to_string(),
        };
        assert!(!storage.is_recoverable());
    }

    #[test]
    fn test_error_debug_format() {
        let error = FutebolError::validation("birth_date", "not a date");
        let debug_str = format!("{:?}", error);
        assert!(debug_str.contains("Validation"));
        assert!(debug_str.contains("birth_date"));
    }
}
