//! CLI argument parsing tests.

use chrono::NaiveDate;
use clap::Parser;
use fortnox::cli::{Cli, Command, Entity};
use fortnox::AccountingMethod;

#[test]
fn test_cli_parses_get_subcommand() {
    let cli = Cli::parse_from(["fortnox", "get", "financial-year", "3"]);

    assert!(!cli.json);
    match cli.command {
        Command::Get { entity, id, financial_year } => {
            assert_eq!(entity, Entity::FinancialYear);
            assert_eq!(id, "3");
            assert!(financial_year.is_none());
        }
        _ => panic!("Expected Get command"),
    }
}

#[test]
fn test_cli_parses_get_voucher_with_financial_year() {
    let cli = Cli::parse_from(["fortnox", "get", "voucher", "A/12", "--financial-year", "3"]);

    match cli.command {
        Command::Get { entity, id, financial_year } => {
            assert_eq!(entity, Entity::Voucher);
            assert_eq!(id, "A/12");
            assert_eq!(financial_year, Some(3));
        }
        _ => panic!("Expected Get command"),
    }
}

#[test]
fn test_cli_parses_list_subcommand() {
    let cli = Cli::parse_from(["fortnox", "list", "vouchers"]);

    assert!(!cli.json);
    match cli.command {
        Command::List { entity, page, limit, .. } => {
            assert_eq!(entity, Entity::Voucher);
            assert!(page.is_none());
            assert!(limit.is_none());
        }
        _ => panic!("Expected List command"),
    }
}

#[test]
fn test_cli_parses_list_with_pagination() {
    let cli = Cli::parse_from([
        "fortnox",
        "list",
        "voucher-series",
        "--page",
        "2",
        "--limit",
        "50",
        "--offset",
        "10",
    ]);

    match cli.command {
        Command::List { entity, page, limit, offset, .. } => {
            assert_eq!(entity, Entity::VoucherSeries);
            assert_eq!(page, Some(2));
            assert_eq!(limit, Some(50));
            assert_eq!(offset, Some(10));
        }
        _ => panic!("Expected List command"),
    }
}

#[test]
fn test_cli_parses_create_financial_year() {
    let cli = Cli::parse_from([
        "fortnox",
        "create",
        "financial-year",
        "--from-date",
        "2014-01-01",
        "--to-date",
        "2014-12-31",
        "--accounting-method",
        "CASH",
    ]);

    match cli.command {
        Command::Create {
            entity,
            from_date,
            to_date,
            accounting_method,
            ..
        } => {
            assert_eq!(entity, Entity::FinancialYear);
            assert_eq!(from_date, NaiveDate::from_ymd_opt(2014, 1, 1));
            assert_eq!(to_date, NaiveDate::from_ymd_opt(2014, 12, 31));
            assert_eq!(accounting_method, Some(AccountingMethod::Cash));
        }
        _ => panic!("Expected Create command"),
    }
}

#[test]
fn test_cli_parses_create_voucher_series() {
    let cli = Cli::parse_from([
        "fortnox",
        "create",
        "voucher-series",
        "--code",
        "K",
        "--description",
        "Kassa",
        "--manual",
    ]);

    match cli.command {
        Command::Create {
            entity,
            code,
            description,
            manual,
            ..
        } => {
            assert_eq!(entity, Entity::VoucherSeries);
            assert_eq!(code.as_deref(), Some("K"));
            assert_eq!(description.as_deref(), Some("Kassa"));
            assert!(manual);
        }
        _ => panic!("Expected Create command"),
    }
}

#[test]
fn test_cli_parses_update_subcommand() {
    let cli = Cli::parse_from([
        "fortnox",
        "update",
        "voucher-series",
        "A",
        "--description",
        "Redovisning",
        "--manual",
        "false",
    ]);

    match cli.command {
        Command::Update {
            entity,
            id,
            description,
            manual,
        } => {
            assert_eq!(entity, Entity::VoucherSeries);
            assert_eq!(id, "A");
            assert_eq!(description.as_deref(), Some("Redovisning"));
            assert_eq!(manual, Some(false));
        }
        _ => panic!("Expected Update command"),
    }
}

#[test]
fn test_cli_json_flag_is_global() {
    let cli = Cli::parse_from(["fortnox", "list", "financial-years", "--json"]);
    assert!(cli.json);
}

#[test]
fn test_cli_entity_aliases() {
    let cli = Cli::parse_from(["fortnox", "list", "voucherseries"]);
    assert!(matches!(
        cli.command,
        Command::List { entity: Entity::VoucherSeries, .. }
    ));
}

#[test]
fn test_cli_rejects_unknown_entity() {
    let result = Cli::try_parse_from(["fortnox", "get", "invoice", "1"]);
    assert!(result.is_err());
}

#[test]
fn test_cli_rejects_malformed_date() {
    let result = Cli::try_parse_from([
        "fortnox",
        "create",
        "financial-year",
        "--from-date",
        "first of january",
    ]);
    assert!(result.is_err());
}
