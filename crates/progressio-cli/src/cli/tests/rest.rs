use super::parse;
use crate::cli::CliCommand;
use progressio_core::config::UnitSystem;

#[test]
fn cli_parse_checksum() {
    match parse(&["pio", "checksum", "/tmp/file.iso"]) {
        CliCommand::Checksum { path, units } => {
            assert_eq!(path, "/tmp/file.iso");
            assert!(units.is_none());
        }
        _ => panic!("expected Checksum"),
    }
}

#[test]
fn cli_parse_size() {
    match parse(&["pio", "size", "1024", "--units", "jedec", "--long"]) {
        CliCommand::Size { bytes, units, long } => {
            assert_eq!(bytes, 1024);
            assert_eq!(units, Some(UnitSystem::Jedec));
            assert!(long);
        }
        _ => panic!("expected Size"),
    }
}

#[test]
fn cli_parse_negative_values() {
    match parse(&["pio", "size", "-2048"]) {
        CliCommand::Size { bytes, .. } => assert_eq!(bytes, -2048),
        _ => panic!("expected Size"),
    }
    match parse(&["pio", "duration", "-90"]) {
        CliCommand::Duration { seconds } => assert_eq!(seconds, -90),
        _ => panic!("expected Duration"),
    }
}
