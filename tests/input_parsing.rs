//! CLI argument and station file parsing.

use clap::Parser;
use std::io::Write;

use stream_status::app::load_stations;
use stream_status::Cli;

#[tokio::test]
async fn loads_url_list_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "# my stations").unwrap();
    writeln!(file, "http://ice.example/groove").unwrap();
    writeln!(file).unwrap();
    writeln!(file, "ice.example/bare-host").unwrap();
    file.flush().unwrap();

    let stations = load_stations(file.path()).await.unwrap();
    assert_eq!(stations.len(), 2);
    assert_eq!(stations[0].url, "http://ice.example/groove");
    assert_eq!(stations[1].url, "https://ice.example/bare-host");
}

#[tokio::test]
async fn loads_json_export_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[{{"stationuuid": "abc", "name": "One", "url": "http://a.example/s", "bitrate": 192}}]"#
    )
    .unwrap();
    file.flush().unwrap();

    let stations = load_stations(file.path()).await.unwrap();
    assert_eq!(stations.len(), 1);
    assert_eq!(stations[0].station_uuid, "abc");
    assert_eq!(stations[0].bitrate, Some(192));
}

#[tokio::test]
async fn missing_file_is_an_error() {
    let err = load_stations(std::path::Path::new("/definitely/not/here.txt"))
        .await
        .expect_err("missing file must fail");
    assert!(err.to_string().contains("Failed to read station file"));
}

#[test]
fn cli_defaults_are_sensible() {
    let cli = Cli::try_parse_from(["stream_status", "stations.json"]).unwrap();
    assert_eq!(cli.file, std::path::PathBuf::from("stations.json"));
    assert!(!cli.no_cache);
    assert!(cli.output.is_none());

    let config = cli.validator_config();
    assert!(config.enable_cache);
    assert!(config.batch_size > 0);
}

#[test]
fn cli_flags_override_defaults() {
    let cli = Cli::try_parse_from([
        "stream_status",
        "-",
        "--timeout-ms",
        "2500",
        "--batch-size",
        "8",
        "--no-cache",
    ])
    .unwrap();

    let config = cli.validator_config();
    assert_eq!(config.timeout, std::time::Duration::from_millis(2500));
    assert_eq!(config.batch_size, 8);
    assert!(!config.enable_cache);
}

#[test]
fn cli_requires_an_input_file() {
    assert!(Cli::try_parse_from(["stream_status"]).is_err());
}
