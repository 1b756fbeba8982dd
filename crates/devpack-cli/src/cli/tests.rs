#[cfg(test)]
mod tests {
    use crate::cli::{Cli, Command};
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn test_dev_defaults() {
        let cli = Cli::try_parse_from(["devpack", "dev"]).unwrap();
        match cli.command {
            Command::Dev(args) => {
                assert_eq!(args.source.title, "BGOV Dev App");
                assert!(args.source.config.is_none());
                assert!(args.source.cwd.is_none());
                assert!(args.out.is_none());
                assert!(args.command.is_empty());
            }
            _ => panic!("Expected Dev command"),
        }
    }

    #[test]
    fn test_dev_trailing_command() {
        let cli = Cli::try_parse_from([
            "devpack",
            "dev",
            "--out",
            "dev.json",
            "--",
            "webpack",
            "serve",
            "--config",
            "dev.json",
        ])
        .unwrap();

        match cli.command {
            Command::Dev(args) => {
                assert_eq!(args.out, Some(PathBuf::from("dev.json")));
                assert_eq!(args.command, ["webpack", "serve", "--config", "dev.json"]);
            }
            _ => panic!("Expected Dev command"),
        }
    }

    #[test]
    fn test_print_with_source_options() {
        let cli = Cli::try_parse_from([
            "devpack",
            "print",
            "--config",
            "base.json",
            "--cwd",
            "app",
            "--title",
            "Admin",
        ])
        .unwrap();

        match cli.command {
            Command::Print(args) => {
                assert_eq!(args.source.config, Some(PathBuf::from("base.json")));
                assert_eq!(args.source.cwd, Some(PathBuf::from("app")));
                assert_eq!(args.source.title, "Admin");
            }
            _ => panic!("Expected Print command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["devpack", "print", "--verbose", "--no-color"]).unwrap();
        assert!(cli.verbose);
        assert!(cli.no_color);
        assert!(!cli.quiet);
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        let result = Cli::try_parse_from(["devpack", "-v", "-q", "dev"]);
        assert!(result.is_err());
    }
}
