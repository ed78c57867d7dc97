use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["kwscout"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn run_defaults() {
    let cli = Cli::try_parse_from(["kwscout", "run"]).expect("expected valid cli args");
    let Some(Commands::Run(args)) = cli.command else {
        panic!("expected run command");
    };
    assert!(args.seeds.is_none());
    assert!(args.max.is_none());
    assert!(!args.trends);
    assert!(!args.serp);
    assert!(!args.dry_run);
}

#[test]
fn run_with_every_flag() {
    let cli = Cli::try_parse_from([
        "kwscout",
        "run",
        "--seeds",
        "words.txt",
        "--max",
        "25",
        "--trends",
        "--serp",
        "--sample-seed",
        "7",
        "--output",
        "out/results.json",
        "--dry-run",
    ])
    .expect("expected valid cli args");
    let Some(Commands::Run(args)) = cli.command else {
        panic!("expected run command");
    };
    assert_eq!(args.seeds, Some(PathBuf::from("words.txt")));
    assert_eq!(args.max, Some(25));
    assert!(args.trends && args.serp && args.dry_run);
    assert_eq!(args.sample_seed, Some(7));
    assert_eq!(args.output, Some(PathBuf::from("out/results.json")));
}

#[test]
fn run_rejects_non_numeric_max() {
    assert!(Cli::try_parse_from(["kwscout", "run", "--max", "lots"]).is_err());
}

#[test]
fn score_takes_several_keywords() {
    let cli = Cli::try_parse_from(["kwscout", "score", "free invoice generator", "pdf merge"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Score { ref keywords }) if keywords.len() == 2
    ));
}

#[test]
fn score_requires_a_keyword() {
    assert!(Cli::try_parse_from(["kwscout", "score"]).is_err());
}

#[test]
fn seeds_with_path() {
    let cli = Cli::try_parse_from(["kwscout", "seeds", "--seeds", "list.csv"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Seeds { seeds: Some(ref p) }) if p == &PathBuf::from("list.csv")
    ));
}

#[test]
fn schedule_with_cron_override() {
    let cli = Cli::try_parse_from(["kwscout", "schedule", "--cron", "0 30 * * * *", "--trends"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Schedule {
            cron: Some(ref c),
            trends: true,
            serp: false,
        }) if c == "0 30 * * * *"
    ));
}

#[test]
fn command_line_overrides_config() {
    let config = kwscout_core::config::build_app_config(|_| Err(std::env::VarError::NotPresent))
        .expect("default config");
    let args = RunArgs {
        max: Some(12),
        sample_seed: Some(9),
        ..RunArgs::default()
    };
    let options = args.pipeline_options(&config);
    assert_eq!(options.max_candidates, 12);
    assert_eq!(options.sample_seed, 9);
    assert_eq!(options.benchmark_term, config.benchmark_term);
}

#[test]
fn trends_without_url_is_a_configuration_error() {
    let config = kwscout_core::config::build_app_config(|_| Err(std::env::VarError::NotPresent))
        .expect("default config");
    let options = kwscout_engine::PipelineOptions::from_config(&config);
    let err = run::build_pipeline(&config, options, true, false)
        .err()
        .expect("expected configuration error");
    assert!(err.to_string().contains("KWSCOUT_TRENDS_BASE_URL"));
}
