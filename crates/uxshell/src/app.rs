use clap::{Arg, ArgAction, Command, value_parser};

fn frames_arg() -> Arg {
    Arg::new("frames")
        .long("frames")
        .short('f')
        .help("Frames to draw per window before it is closed")
        .value_parser(value_parser!(u64).range(1..))
        .default_value("3")
}

fn refresh_arg() -> Arg {
    Arg::new("refresh-ms")
        .long("refresh-ms")
        .help("Idle time between data refresh cycles in milliseconds (overrides config)")
        .value_parser(value_parser!(u64).range(1..))
}

fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .help("Output in JSON format")
        .action(ArgAction::SetTrue)
}

pub fn build_cli() -> Command {
    Command::new("uxshell")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Run floating shell windows with background data refresh")
        .long_about("uxshell drives chrome-less shell windows (status bars, popovers) whose content is redrawn every frame and whose data is refreshed in the background. This binary runs the bundled windows without a display and prints what they drew.")
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("basic")
                .about("A centred window showing the current date")
                .arg(frames_arg())
                .arg(refresh_arg())
                .arg(json_arg()),
        )
        .subcommand(
            Command::new("statusbar")
                .about("A bottom status bar with clock and media status")
                .arg(frames_arg())
                .arg(refresh_arg())
                .arg(json_arg())
                .arg(
                    Arg::new("click")
                        .long("click")
                        .help("Click the bar's button on the first frame, opening a popup")
                        .action(ArgAction::SetTrue),
                ),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_build() {
        let app = build_cli();
        assert_eq!(app.get_name(), "uxshell");
    }

    #[test]
    fn test_cli_basic_defaults() {
        let matches = build_cli()
            .try_get_matches_from(vec!["uxshell", "basic"])
            .unwrap();
        let basic = matches.subcommand_matches("basic").unwrap();
        assert_eq!(basic.get_one::<u64>("frames"), Some(&3));
        assert!(basic.get_one::<u64>("refresh-ms").is_none());
        assert!(!basic.get_flag("json"));
    }

    #[test]
    fn test_cli_statusbar_options() {
        let matches = build_cli()
            .try_get_matches_from(vec![
                "uxshell",
                "-v",
                "statusbar",
                "--frames",
                "5",
                "--refresh-ms",
                "50",
                "--click",
            ])
            .unwrap();
        assert!(matches.get_flag("verbose"));
        let statusbar = matches.subcommand_matches("statusbar").unwrap();
        assert_eq!(statusbar.get_one::<u64>("frames"), Some(&5));
        assert_eq!(statusbar.get_one::<u64>("refresh-ms"), Some(&50));
        assert!(statusbar.get_flag("click"));
    }

    #[test]
    fn test_cli_rejects_zero_frames() {
        let result = build_cli().try_get_matches_from(vec!["uxshell", "basic", "--frames", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_requires_subcommand() {
        let result = build_cli().try_get_matches_from(vec!["uxshell"]);
        assert!(result.is_err());
    }
}
