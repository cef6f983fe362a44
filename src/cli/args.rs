use clap::Parser;
use std::path::PathBuf;

use crate::core::WrapPolicy;
use crate::shell::DEFAULT_ALIAS;

const KEYS_HELP: &str = "\
Interactive keys:
  Type                 Filter the bookmarks
  Up / Down            Move through the list (also Ctrl-P / Ctrl-N)
  Enter                cd into the highlighted bookmark
  Esc / Ctrl-C         Quit without changing directory";

#[derive(Parser, Debug)]
#[command(name = "bookmark-cd", version)]
#[command(about = "Interactively pick the bookmarked directory you want to cd into")]
#[command(after_help = KEYS_HELP)]
pub struct Args {
    /// Search term; if exactly one bookmark matches, its path is printed right away
    #[arg(value_name = "SEARCH_TERM", conflicts_with_all = ["shell", "install"])]
    pub query: Vec<String>,

    /// Print the shell function, named ALIAS, for manual installation
    #[arg(
        long,
        value_name = "ALIAS",
        num_args = 0..=1,
        default_missing_value = DEFAULT_ALIAS,
        conflicts_with = "install"
    )]
    pub shell: Option<String>,

    /// Add or update the shell function in a startup file like ~/.bashrc
    #[arg(long, value_names = ["FILE", "ALIAS"], num_args = 1..=2)]
    pub install: Option<Vec<String>>,

    /// Bookmark list to read [default: ~/.config/gtk-3.0/bookmarks]
    #[arg(long, value_name = "FILE", env = "BCD_BOOKMARKS")]
    pub bookmarks: Option<PathBuf>,

    /// What moving down past the last entry wraps against
    #[arg(long, value_enum, env = "BCD_WRAP", default_value_t = WrapPolicy::Unfiltered)]
    pub wrap: WrapPolicy,
}

/// What a single invocation does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    PrintShell { alias: String },
    Install { file: PathBuf, alias: String },
    Pick { query: String },
}

impl Args {
    pub fn mode(&self) -> Mode {
        if let Some(alias) = &self.shell {
            return Mode::PrintShell {
                alias: alias.clone(),
            };
        }

        if let Some(values) = &self.install {
            let mut values = values.iter();
            let file = values.next().map(PathBuf::from).unwrap_or_default();
            let alias = values.next().map_or(DEFAULT_ALIAS, String::as_str);
            return Mode::Install {
                file,
                alias: alias.to_string(),
            };
        }

        Mode::Pick {
            query: self.query.join(" "),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("bookmark-cd").chain(args.iter().copied()))
    }

    #[test]
    fn test_query_words_are_joined() {
        let args = parse(&["my", "projects"]).unwrap();
        assert_eq!(
            args.mode(),
            Mode::Pick {
                query: "my projects".to_string()
            }
        );
    }

    #[test]
    fn test_no_args_is_empty_query() {
        let args = parse(&[]).unwrap();
        assert_eq!(args.mode(), Mode::Pick { query: String::new() });
    }

    #[test]
    fn test_shell_default_and_alias() {
        assert_eq!(
            parse(&["--shell"]).unwrap().mode(),
            Mode::PrintShell {
                alias: "bcd".to_string()
            }
        );
        assert_eq!(
            parse(&["--shell", "go"]).unwrap().mode(),
            Mode::PrintShell {
                alias: "go".to_string()
            }
        );
    }

    #[test]
    fn test_install_file_and_alias() {
        assert_eq!(
            parse(&["--install", "rc"]).unwrap().mode(),
            Mode::Install {
                file: PathBuf::from("rc"),
                alias: "bcd".to_string()
            }
        );
        assert_eq!(
            parse(&["--install", "rc", "go"]).unwrap().mode(),
            Mode::Install {
                file: PathBuf::from("rc"),
                alias: "go".to_string()
            }
        );
    }

    #[test]
    fn test_install_requires_file() {
        let err = parse(&["--install"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn test_modes_conflict() {
        let err = parse(&["--shell", "a", "--install", "rc"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);

        let err = parse(&["term", "--install", "rc"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_wrap_policy() {
        assert_eq!(parse(&[]).unwrap().wrap, WrapPolicy::Unfiltered);
        assert_eq!(
            parse(&["--wrap", "filtered"]).unwrap().wrap,
            WrapPolicy::Filtered
        );
        assert!(parse(&["--wrap", "sideways"]).is_err());
    }

    #[test]
    fn test_bookmarks_flag() {
        let args = parse(&["--bookmarks", "/tmp/b"]).unwrap();
        assert_eq!(args.bookmarks, Some(PathBuf::from("/tmp/b")));
    }

    #[test]
    fn test_args_definition() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
