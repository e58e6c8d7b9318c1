use super::*;

#[test]
fn cli_parses_job_filters() {
    let cli = Cli::try_parse_from([
        "jobboard", "jobs", "list", "--page", "2", "--location", "Hanoi", "--skill", "rust", "--skill", "sql",
    ])
    .unwrap();
    match cli.command {
        Command::Jobs(JobsCommand { command: JobsSubcommand::List { page, location, skills, .. } }) => {
            assert_eq!(page.page, 2);
            assert_eq!(page.page_size, 10);
            assert_eq!(location.as_deref(), Some("Hanoi"));
            assert_eq!(skills, vec!["rust".to_owned(), "sql".to_owned()]);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn parse_data_reads_camel_case_input() {
    let input: JobInput = parse_data(r#"{"name":"Rust dev","isActive":true}"#).unwrap();
    assert_eq!(input.name.as_deref(), Some("Rust dev"));
    assert_eq!(input.is_active, Some(true));
}

#[test]
fn api_errors_display_backend_message() {
    let err = CliError::from(ApiError::Status {
        status: 400,
        message: "Invalid username or password".into(),
        body: String::new(),
    });
    assert_eq!(err.to_string(), "Invalid username or password");
}
