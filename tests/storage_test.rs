//! Integration tests for registration, listing and the read views

use futebol_app::{
    query::{QueryParams, QueryRows},
    repository::{
        OfficialTeamForm, PlayerForm, Registration, RosterEntryForm, UserForm, UserTeamForm,
    },
    storage::{BackendKind, Record},
    AppConfig, DataContext, EntityKind, FutebolError, OfficialTeamId, PlayerId, QueryName,
    UserId, UserTeamId,
};
use tempfile::tempdir;

const BACKENDS: [BackendKind; 2] = [BackendKind::Relational, BackendKind::Document];

fn create_test_context(backend: BackendKind) -> DataContext {
    DataContext::in_memory(backend).unwrap()
}

fn user(name: &str, email: &str, preferred_team: Option<&str>) -> Registration {
    Registration::User(UserForm {
        name: name.to_string(),
        email: email.to_string(),
        password: "segredo".to_string(),
        sex: "F".to_string(),
        phone: Some("11988887777".to_string()),
        birth_date: "1999-12-01".to_string(),
        preferred_team: preferred_team.map(str::to_string),
    })
}

fn official_team(name: &str, code: &str) -> Registration {
    Registration::OfficialTeam(OfficialTeamForm {
        name: name.to_string(),
        short_code: code.to_string(),
        short_label: None,
    })
}

fn player(name: &str, position: &str, team: Option<u64>) -> Registration {
    Registration::Player(PlayerForm {
        name: name.to_string(),
        position: position.to_string(),
        official_team_id: team.map(OfficialTeamId::new),
    })
}

fn user_team(name: &str, owner: u64) -> Registration {
    Registration::UserTeam(UserTeamForm {
        name: name.to_string(),
        user_id: UserId::new(owner),
    })
}

fn roster_entry(user_team: u64, player: u64) -> Registration {
    Registration::RosterEntry(RosterEntryForm {
        user_team_id: UserTeamId::new(user_team),
        player_id: PlayerId::new(player),
    })
}

fn query(ctx: &DataContext, name: QueryName) -> QueryRows {
    ctx.query(name, QueryParams::default()).unwrap()
}

/// Smallest league: Eduardo prefers FURIA and rosters one FUR player.
fn create_edu_league(backend: BackendKind) -> DataContext {
    let mut ctx = create_test_context(backend);
    ctx.register(user("Eduardo", "edu@x.com", Some("FURIA"))).unwrap();
    ctx.register(official_team("Furia Esports", "FUR")).unwrap();
    ctx.register(player("A", "Atacante", Some(1))).unwrap();
    ctx.register(user_team("Time do Edu", 1)).unwrap();
    ctx.register(roster_entry(1, 1)).unwrap();
    ctx
}

#[test]
fn test_duplicate_email_leaves_listing_unchanged() {
    for backend in BACKENDS {
        let mut ctx = create_test_context(backend);
        ctx.register(user("Larissa", "lari@x.com", None)).unwrap();
        let before = ctx.list(EntityKind::User).unwrap();

        let err = ctx.register(user("Outra", "lari@x.com", None)).unwrap_err();
        assert!(matches!(err, FutebolError::DuplicateKey { .. }), "{}", backend);

        let after = ctx.list(EntityKind::User).unwrap();
        assert_eq!(before, after);
        let with_email = after
            .iter()
            .filter(|r| matches!(r, Record::User(u) if u.email == "lari@x.com"))
            .count();
        assert_eq!(with_email, 1);
    }
}

#[test]
fn test_players_with_team_covers_every_player() {
    for backend in BACKENDS {
        let mut ctx = create_test_context(backend);
        ctx.register(official_team("LOUD", "LOD")).unwrap();
        ctx.register(player("C", "Defensor", Some(1))).unwrap();
        ctx.register(player("D", "Goleiro", None)).unwrap();
        ctx.register(player("E", "Goleiro", None)).unwrap();

        let QueryRows::PlayersWithTeam(rows) = query(&ctx, QueryName::PlayersWithTeam) else {
            panic!("Expected players_with_team rows");
        };
        assert_eq!(rows.len(), ctx.list(EntityKind::Player).unwrap().len());

        let without_team = rows.iter().filter(|r| r.team.is_none()).count();
        assert_eq!(without_team, query(&ctx, QueryName::FreeAgents).len(), "{}", backend);
    }
}

#[test]
fn test_rosters_row_count_per_user_team() {
    for backend in BACKENDS {
        let mut ctx = create_edu_league(backend);
        ctx.register(player("B", "Meio-campo", Some(1))).unwrap();
        ctx.register(roster_entry(1, 2)).unwrap();
        ctx.register(user_team("Time Vazio", 1)).unwrap();

        let QueryRows::Rosters(rows) = query(&ctx, QueryName::Rosters) else {
            panic!("Expected rosters rows");
        };
        let count = |id: u64| rows.iter().filter(|r| r.user_team_id == UserTeamId::new(id)).count();
        assert_eq!(count(1), 2, "{}", backend);
        assert_eq!(count(2), 1, "{}", backend);
    }
}

#[test]
fn test_duplicate_roster_pair_shows_once() {
    for backend in BACKENDS {
        let mut ctx = create_edu_league(backend);
        let err = ctx.register(roster_entry(1, 1)).unwrap_err();
        assert!(matches!(err, FutebolError::DuplicateKey { .. }), "{}", backend);

        assert_eq!(ctx.list(EntityKind::RosterEntry).unwrap().len(), 1);
        assert_eq!(query(&ctx, QueryName::Rosters).len(), 1);
    }
}

#[test]
fn test_position_counts_sum_to_teamed_players() {
    for backend in BACKENDS {
        let mut ctx = create_test_context(backend);
        ctx.register(official_team("Furia Esports", "FUR")).unwrap();
        ctx.register(official_team("LOUD", "LOD")).unwrap();
        ctx.register(player("A", "Atacante", Some(1))).unwrap();
        ctx.register(player("B", "Atacante", Some(1))).unwrap();
        ctx.register(player("C", "Defensor", Some(2))).unwrap();
        ctx.register(player("D", "Goleiro", None)).unwrap();

        let QueryRows::PositionCounts(rows) = query(&ctx, QueryName::PositionCounts) else {
            panic!("Expected position_counts rows");
        };
        let total: u64 = rows.iter().map(|r| r.count).sum();
        assert_eq!(total, 3, "{}", backend);
        assert!(rows.iter().all(|r| r.position != "Goleiro"));
    }
}

#[test]
fn test_preferred_team_alias_scenario() {
    for backend in BACKENDS {
        let ctx = create_edu_league(backend);

        let QueryRows::PreferredTeamMatches(rows) =
            query(&ctx, QueryName::PreferredTeamMatches)
        else {
            panic!("Expected preferred_team_matches rows");
        };
        assert_eq!(rows.len(), 1, "{}", backend);
        assert_eq!(rows[0].user, "Eduardo");
        assert_eq!(rows[0].preferred_team, "FURIA");
        assert_eq!(rows[0].matches, 1);
    }
}

#[test]
fn test_deleting_official_team_frees_player() {
    for backend in BACKENDS {
        let mut ctx = create_edu_league(backend);
        assert!(ctx.delete(EntityKind::OfficialTeam, 1).unwrap());

        let QueryRows::FreeAgents(rows) = query(&ctx, QueryName::FreeAgents) else {
            panic!("Expected free_agents rows");
        };
        assert!(rows.iter().any(|r| r.id == PlayerId::new(1)), "{}", backend);
        // The roster entry survives; only the team reference is cleared
        assert_eq!(ctx.list(EntityKind::RosterEntry).unwrap().len(), 1);
    }
}

#[test]
fn test_deleting_user_removes_their_rosters() {
    for backend in BACKENDS {
        let mut ctx = create_edu_league(backend);
        assert!(ctx.delete(EntityKind::User, 1).unwrap());

        assert!(ctx.list(EntityKind::UserTeam).unwrap().is_empty(), "{}", backend);
        assert!(ctx.list(EntityKind::RosterEntry).unwrap().is_empty(), "{}", backend);
        assert_eq!(ctx.list(EntityKind::Player).unwrap().len(), 1);
    }
}

#[test]
fn test_backends_answer_identically() {
    let relational = create_edu_league(BackendKind::Relational);
    let document = create_edu_league(BackendKind::Document);

    for kind in EntityKind::ALL {
        assert_eq!(
            relational.list(kind).unwrap(),
            document.list(kind).unwrap(),
            "{}",
            kind
        );
    }
    for name in QueryName::ALL {
        assert_eq!(query(&relational, name), query(&document, name), "{}", name);
    }
}

#[test]
fn test_context_reopens_persisted_data() {
    let dir = tempdir().unwrap();
    for backend in BACKENDS {
        let config = AppConfig {
            backend,
            database: Some(dir.path().join(backend.default_file_name())),
            ..Default::default()
        };

        {
            let mut ctx = DataContext::open(&config).unwrap();
            ctx.register(official_team("Furia Esports", "FUR")).unwrap();
            ctx.register(player("A", "Atacante", Some(1))).unwrap();
        }

        let mut ctx = DataContext::open(&config).unwrap();
        assert_eq!(ctx.list(EntityKind::Player).unwrap().len(), 1, "{}", backend);
        assert_eq!(ctx.register(player("B", "Defensor", None)).unwrap(), 2);
    }
}
