//! Tests for command handlers

use super::*;

#[cfg(test)]
mod command_tests {
    use super::*;
    use crate::cli::types::{EntityKind, OfficialTeamId, UserId, UserTeamId};
    use crate::cli::RegisterCmd;
    use crate::context::DataContext;
    use crate::query::{FreeAgentRow, QueryRows, RosterRow};
    use crate::repository::Registration;
    use crate::storage::{BackendKind, Password, Player, Record, User};
    use crate::{PlayerId, Sex};
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn user_cmd(email: &str) -> RegisterCmd {
        RegisterCmd::User {
            name: "Eduardo Fontes".to_string(),
            email: email.to_string(),
            password: "segredo".to_string(),
            sex: "M".to_string(),
            phone: None,
            birth_date: "1998-03-14".to_string(),
            preferred_team: Some("FURIA".to_string()),
        }
    }

    #[test]
    fn test_registration_from_user_keeps_fields() {
        match register::registration_from(user_cmd("edu@example.com")) {
            Registration::User(form) => {
                assert_eq!(form.email, "edu@example.com");
                assert_eq!(form.sex, "M");
                assert_eq!(form.birth_date, "1998-03-14");
                assert_eq!(form.preferred_team.as_deref(), Some("FURIA"));
            }
            other => panic!("Expected user registration, got {:?}", other.kind()),
        }
    }

    #[test]
    fn test_registration_from_player_maps_team_id() {
        let cmd = RegisterCmd::Player {
            name: "Jogador A".to_string(),
            position: "Atacante".to_string(),
            team_id: Some(OfficialTeamId::new(3)),
        };
        match register::registration_from(cmd) {
            Registration::Player(form) => {
                assert_eq!(form.official_team_id, Some(OfficialTeamId::new(3)));
            }
            other => panic!("Expected player registration, got {:?}", other.kind()),
        }
    }

    #[test]
    fn test_handle_register_assigns_sequential_ids() {
        let mut ctx = DataContext::in_memory(BackendKind::Document).unwrap();
        assert_eq!(handle_register(&mut ctx, user_cmd("a@example.com")).unwrap(), 1);
        assert_eq!(handle_register(&mut ctx, user_cmd("b@example.com")).unwrap(), 2);
    }

    #[test]
    fn test_handle_register_surfaces_duplicate_email() {
        let mut ctx = DataContext::in_memory(BackendKind::Relational).unwrap();
        handle_register(&mut ctx, user_cmd("edu@example.com")).unwrap();

        let err = handle_register(&mut ctx, user_cmd("edu@example.com")).unwrap_err();
        assert!(err.to_string().contains("edu@example.com"));
    }

    #[test]
    fn test_handle_register_missing_owner_is_error() {
        let mut ctx = DataContext::in_memory(BackendKind::Document).unwrap();
        let cmd = RegisterCmd::UserTeam {
            name: "Time do Edu".to_string(),
            user_id: UserId::new(42),
        };
        assert!(handle_register(&mut ctx, cmd).is_err());
        assert!(ctx.list(EntityKind::UserTeam).unwrap().is_empty());
    }

    #[test]
    fn test_format_record_free_agent_prints_null() {
        let record = Record::Player(Player {
            id: PlayerId::new(4),
            name: "Jogador D".to_string(),
            position: "Goleiro".to_string(),
            official_team_id: None,
        });
        assert_eq!(list::format_record(&record), "4 Jogador D (Goleiro) team NULL");
    }

    fn sample_user() -> Record {
        Record::User(User {
            id: UserId::new(1),
            name: "Larissa".to_string(),
            email: "lari@example.com".to_string(),
            password: Password::new("hunter2"),
            sex: Sex::Female,
            phone: None,
            birth_date: NaiveDate::from_ymd_opt(2000, 1, 31).unwrap(),
            preferred_team: Some("LOUD".to_string()),
        })
    }

    #[test]
    fn test_format_record_user_hides_password() {
        let line = list::format_record(&sample_user());
        assert_eq!(line, "1 Larissa <lari@example.com> F NULL 2000-01-31 LOUD");
        assert!(!line.contains("hunter2"));
    }

    #[test]
    fn test_record_json_drops_password() {
        let value = list::record_json(&sample_user()).unwrap();
        assert!(value.get("password").is_none());
        assert_eq!(value["kind"], "user");
        assert_eq!(value["email"], "lari@example.com");
        assert!(!value.to_string().contains("hunter2"));
    }

    #[test]
    fn test_format_rows_empty_roster_placeholder() {
        let rows = QueryRows::Rosters(vec![RosterRow {
            user_team_id: UserTeamId::new(1),
            user_team: "Time Vazio".to_string(),
            owner: "Larissa".to_string(),
            player_id: None,
            player: None,
            position: None,
        }]);
        assert_eq!(query::format_rows(&rows), vec!["Time Vazio [Larissa] NULL (NULL)"]);
    }

    #[test]
    fn test_format_rows_free_agents() {
        let rows = QueryRows::FreeAgents(vec![FreeAgentRow {
            id: PlayerId::new(4),
            name: "Jogador D".to_string(),
            position: "Goleiro".to_string(),
        }]);
        assert_eq!(query::format_rows(&rows), vec!["4 Jogador D (Goleiro)"]);
    }

    #[test]
    fn test_resolve_config_flags_override_file() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("futebol.toml");
        std::fs::write(
            &config_path,
            "backend = \"document\"\ndatabase = \"from-file.json\"\n",
        )
        .unwrap();

        let overrides = ConfigOverrides {
            config: Some(config_path),
            backend: Some(BackendKind::Relational),
            database: Some(dir.path().join("from-flag.db")),
        };
        let config = resolve_config(&overrides).unwrap();

        assert_eq!(config.backend, BackendKind::Relational);
        assert_eq!(config.database, Some(dir.path().join("from-flag.db")));
    }

    #[test]
    fn test_resolve_config_missing_explicit_file() {
        let dir = tempdir().unwrap();
        let overrides = ConfigOverrides {
            config: Some(dir.path().join("absent.toml")),
            ..Default::default()
        };
        assert!(resolve_config(&overrides).is_err());
    }

    #[test]
    fn test_open_context_creates_document_store() {
        let dir = tempdir().unwrap();
        let config = crate::config::AppConfig {
            backend: BackendKind::Document,
            database: Some(dir.path().join("nested").join("futebol.json")),
            ..Default::default()
        };

        let mut ctx = open_context(&config).unwrap();
        handle_register(&mut ctx, user_cmd("edu@example.com")).unwrap();

        assert!(dir.path().join("nested").join("futebol.json").exists());
    }
}
