//! CLI tool to manage a contact directory file.
//!
//! Usage:
//!   contacts add "Ann" --phone 111
//!   contacts search --name Ann
//!   contacts remove --phone 111
//!   contacts list
//!
//! The directory file defaults to `contacts.txt` and can be set with
//! `--file` or `CONTACTS_FILE`.

use clap::{ArgGroup, Args, Parser, Subcommand};
use contact_directory::{Directory, DirectoryError, Field, Record, Result};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

/// Manage a flat-file contact directory.
#[derive(Parser)]
#[command(name = "contacts")]
struct Cli {
    /// Directory file
    #[arg(short, long, env = "CONTACTS_FILE", default_value = "contacts.txt")]
    file: PathBuf,

    /// Log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Append one contact to the file
    Add {
        /// Contact name
        name: String,
        #[arg(long, default_value = "")]
        address: String,
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        note: String,
    },
    /// Print every contact
    List,
    /// Print contacts matching a field or keyword
    #[command(group(
        ArgGroup::new("selector")
            .args(["name", "address", "phone", "email", "keyword"])
            .multiple(false)
    ))]
    Search {
        #[command(flatten)]
        selector: Selector,

        /// Substring of all fields concatenated
        #[arg(long)]
        keyword: Option<String>,
    },
    /// Remove every contact whose field matches, rewriting the file
    #[command(group(
        ArgGroup::new("selector")
            .args(["name", "address", "phone", "email"])
            .required(true)
            .multiple(false)
    ))]
    Remove {
        #[command(flatten)]
        selector: Selector,
    },
}

/// Exact-match field selector. Each subcommand decides how many are allowed.
#[derive(Args)]
#[group(skip)]
struct Selector {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    address: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    email: Option<String>,
}

impl Selector {
    fn pick(&self) -> Option<(Field, &str)> {
        [
            (Field::Name, &self.name),
            (Field::PostalAddress, &self.address),
            (Field::PhoneNumber, &self.phone),
            (Field::EmailAddress, &self.email),
        ]
        .into_iter()
        .find_map(|(field, value)| value.as_deref().map(|v| (field, v)))
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Load the directory file; a missing file is an empty directory.
fn load(path: &Path) -> Result<Directory> {
    let mut dir = Directory::new();
    match dir.load_from_file_lenient(path) {
        Ok(report) => {
            if !report.skipped.is_empty() {
                eprintln!(
                    "Warning: skipped {} malformed line(s) in '{}'",
                    report.skipped.len(),
                    path.display()
                );
            }
            Ok(dir)
        }
        Err(DirectoryError::FileNotFound(_)) => Ok(dir),
        Err(e) => Err(e),
    }
}

/// Load the directory file for rewriting; a missing file is an empty directory.
///
/// Any malformed line fails the load, so a rewrite never drops lines it
/// could not parse.
fn load_strict(path: &Path) -> Result<Directory> {
    let mut dir = Directory::new();
    match dir.load_from_file(path) {
        Ok(_) => Ok(dir),
        Err(DirectoryError::FileNotFound(_)) => Ok(dir),
        Err(e) => Err(e),
    }
}

fn print_all<'a>(records: impl IntoIterator<Item = &'a Record>) {
    for record in records {
        println!("{record}");
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Add {
            name,
            address,
            phone,
            email,
            note,
        } => {
            let record = Record::builder(name)
                .postal_address(address)
                .phone_number(phone)
                .email_address(email)
                .note(note)
                .build();
            let dir: Directory = std::iter::once(record).collect();
            dir.save_to_file(&cli.file)?;
        }
        Command::List => {
            let dir = load(&cli.file)?;
            print!("{dir}");
        }
        Command::Search { selector, keyword } => {
            let dir = load(&cli.file)?;
            let hits = match (selector.pick(), keyword) {
                (Some((field, value)), _) => dir.search_by_field(field, value),
                (None, Some(keyword)) => dir.search_by_global_keyword(&keyword),
                (None, None) => dir.entries().to_vec(),
            };
            print_all(&hits);
            eprintln!("{} match(es)", hits.len());
        }
        Command::Remove { selector } => {
            let Some((field, value)) = selector.pick() else {
                unreachable!("clap requires one selector for remove");
            };
            let mut dir = load_strict(&cli.file)?;
            let removed = dir.remove_by_field(field, value);
            if removed > 0 {
                dir.replace_file(&cli.file)?;
            }
            eprintln!("Removed {removed} contact(s) by {field}");
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("contacts").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_remove_refuses_file_with_malformed_line() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("c.txt");
        let content = "Ann  &&    &&  111  &&    &&    &&  \n\
                       legacy line from older tool\n\
                       Bob  &&    &&  222  &&    &&    &&  \n";
        fs::write(&path, content).unwrap();

        let file = path.to_str().unwrap();
        let result = run(cli(&["--file", file, "remove", "--name", "Ann"]));
        assert!(matches!(
            result,
            Err(DirectoryError::MalformedRecord { line: 2, .. })
        ));
        assert_eq!(fs::read_to_string(&path).unwrap(), content);
    }

    #[test]
    fn test_remove_rewrites_clean_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("c.txt");
        let file = path.to_str().unwrap();

        run(cli(&["--file", file, "add", "Ann", "--phone", "111"])).unwrap();
        run(cli(&["--file", file, "add", "Bob", "--phone", "222"])).unwrap();
        run(cli(&["--file", file, "remove", "--name", "Ann"])).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "Bob  &&    &&  222  &&    &&    &&  \n"
        );
    }

    #[test]
    fn test_remove_missing_file_is_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("c.txt");
        let file = path.to_str().unwrap();
        run(cli(&["--file", file, "remove", "--phone", "111"])).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_remove_requires_one_selector() {
        let none = Cli::try_parse_from(["contacts", "remove"]);
        assert_eq!(
            none.err().map(|e| e.kind()),
            Some(clap::error::ErrorKind::MissingRequiredArgument)
        );

        let two = Cli::try_parse_from(["contacts", "remove", "--name", "A", "--phone", "1"]);
        assert_eq!(
            two.err().map(|e| e.kind()),
            Some(clap::error::ErrorKind::ArgumentConflict)
        );
    }

    #[test]
    fn test_search_allows_no_selector_but_not_two() {
        assert!(Cli::try_parse_from(["contacts", "search"]).is_ok());
        let two = Cli::try_parse_from(["contacts", "search", "--name", "A", "--keyword", "x"]);
        assert_eq!(
            two.err().map(|e| e.kind()),
            Some(clap::error::ErrorKind::ArgumentConflict)
        );
    }
}
