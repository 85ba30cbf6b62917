//! Command-tree checks: flags land in the right fields and bad input is
//! rejected at parse time, before any network activity.

use clap::{CommandFactory, Parser};

use sw_cli::cli::{AdvertCommand, Cli, ClientCommand, Command, ScheduleCommand};
use sw_objects::ClientAction;

#[test]
fn command_tree_is_well_formed() {
    Cli::command().debug_assert();
}

#[test]
fn weekly_flags_fill_the_token_fields() {
    let cli = Cli::try_parse_from([
        "sitewrench",
        "schedule",
        "weekly",
        "--day",
        "4",
        "--for-weeks",
        "2",
        "--hour-duration",
        "8",
        "--gmt",
        "--start",
        "2024-03-06T08:00:00+00:00",
    ])
    .unwrap();

    match cli.command {
        Command::Schedule(ScheduleCommand::Weekly {
            day,
            day_duration,
            for_weeks,
            hour_duration,
            minute_duration,
            gmt,
            start,
            instantiate,
        }) => {
            assert_eq!(day, 4);
            assert_eq!(day_duration, 1, "unset duration defaults to one day");
            assert_eq!(for_weeks, 2);
            assert_eq!(hour_duration, 8);
            assert_eq!(minute_duration, 0);
            assert!(gmt);
            assert_eq!(start.to_rfc3339(), "2024-03-06T08:00:00+00:00");
            assert!(!instantiate);
        }
        other => panic!("parsed into the wrong command: {other:?}"),
    }
}

#[test]
fn global_flags_apply_before_the_subcommand() {
    let cli = Cli::try_parse_from(["sitewrench", "--json", "--site", "LAB", "site", "list"])
        .unwrap();

    assert!(cli.json);
    assert_eq!(cli.site.as_deref(), Some("LAB"));
    assert!(matches!(cli.command, Command::Site(_)));
}

#[test]
fn client_actions_parse_by_their_cli_names() {
    let cli = Cli::try_parse_from([
        "sitewrench",
        "client",
        "trigger",
        "--resource",
        "7",
        "--action",
        "machine-policy-refresh",
    ])
    .unwrap();

    match cli.command {
        Command::Client(ClientCommand::Trigger { resource, action }) => {
            assert_eq!(resource, 7);
            assert_eq!(action, ClientAction::MachinePolicyRefresh);
        }
        other => panic!("parsed into the wrong command: {other:?}"),
    }
}

#[test]
fn unknown_client_action_is_rejected() {
    let result = Cli::try_parse_from([
        "sitewrench",
        "client",
        "trigger",
        "--resource",
        "7",
        "--action",
        "reboot",
    ]);
    assert!(result.is_err());
}

#[test]
fn start_time_must_be_rfc_3339() {
    let result = Cli::try_parse_from([
        "sitewrench",
        "schedule",
        "non-recurring",
        "--start",
        "2024-03-06",
    ]);
    assert!(result.is_err());
}

#[test]
fn advert_create_accepts_a_schedule_source() {
    let cli = Cli::try_parse_from([
        "sitewrench",
        "advert",
        "create",
        "Deploy Firefox",
        "--package",
        "SW00001",
        "--program",
        "Install",
        "--collection",
        "SW00042",
        "--schedule",
        "-",
    ])
    .unwrap();

    match cli.command {
        Command::Advert(AdvertCommand::Create {
            name,
            package,
            schedule,
            present,
            ..
        }) => {
            assert_eq!(name, "Deploy Firefox");
            assert_eq!(package, "SW00001");
            assert_eq!(schedule.as_deref(), Some("-"));
            assert!(present.is_none());
        }
        other => panic!("parsed into the wrong command: {other:?}"),
    }
}
