//! Clap command tree definition.

use clap::{value_parser, Arg, ArgAction, Command};

fn file_arg() -> Arg {
    Arg::new("file")
        .help("Path to the table file")
        .required(true)
        .value_parser(value_parser!(std::path::PathBuf))
}

fn key_arg() -> Arg {
    Arg::new("key")
        .help("Key bytes (hex unless --utf8)")
        .required(true)
}

fn out_arg() -> Arg {
    Arg::new("out")
        .long("out")
        .short('o')
        .help("Write the result here instead of in place")
        .value_parser(value_parser!(std::path::PathBuf))
}

/// Build the complete CLI command tree.
pub fn build_cli() -> Command {
    Command::new("fwbt")
        .about("Inspect and edit Fixed Width Binary Table files")
        .version(fwbt::API_VERSION)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("utf8")
                .long("utf8")
                .help("Treat keys and values as raw UTF-8 text instead of hex")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("info")
                .about("Print the header fields")
                .arg(file_arg()),
        )
        .subcommand(
            Command::new("dump")
                .about("Print the header and every entry")
                .arg(file_arg()),
        )
        .subcommand(
            Command::new("get")
                .about("Print the value stored under a key")
                .arg(file_arg())
                .arg(key_arg()),
        )
        .subcommand(
            Command::new("set")
                .about("Insert a key/value pair")
                .arg(file_arg())
                .arg(key_arg())
                .arg(
                    Arg::new("value")
                        .help("Value bytes (hex unless --utf8)")
                        .required(true),
                )
                .arg(
                    Arg::new("replace")
                        .long("replace")
                        .help("Overwrite the value if the key already exists")
                        .action(ArgAction::SetTrue),
                )
                .arg(out_arg()),
        )
        .subcommand(
            Command::new("rm")
                .about("Remove the entry with a key")
                .arg(file_arg())
                .arg(key_arg())
                .arg(out_arg()),
        )
        .subcommand(
            Command::new("rm-index")
                .about("Remove the entry at an index")
                .arg(file_arg())
                .arg(
                    Arg::new("index")
                        .help("Zero-based entry index")
                        .required(true)
                        .value_parser(value_parser!(usize)),
                )
                .arg(out_arg()),
        )
        .subcommand(
            Command::new("new")
                .about("Write an empty table")
                .arg(file_arg())
                .arg(
                    Arg::new("key-width")
                        .long("key-width")
                        .help("Width of every key in bytes")
                        .required(true)
                        .value_parser(value_parser!(u32)),
                )
                .arg(
                    Arg::new("value-width")
                        .long("value-width")
                        .help("Width of every value in bytes")
                        .required(true)
                        .value_parser(value_parser!(u32)),
                ),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_tree_is_consistent() {
        build_cli().debug_assert();
    }

    #[test]
    fn set_parses_flags() {
        let m = build_cli()
            .try_get_matches_from(["fwbt", "--utf8", "set", "t.fwbt", "test", "abcdefgh", "--replace"])
            .unwrap();
        assert!(m.get_flag("utf8"));
        let (name, sub) = m.subcommand().unwrap();
        assert_eq!(name, "set");
        assert!(sub.get_flag("replace"));
        assert_eq!(sub.get_one::<String>("value").unwrap(), "abcdefgh");
    }

    #[test]
    fn new_requires_widths() {
        let r = build_cli().try_get_matches_from(["fwbt", "new", "t.fwbt", "--key-width", "4"]);
        assert!(r.is_err());
    }
}
