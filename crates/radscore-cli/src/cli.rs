use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use radscore_core::normalize::NumberLocale;

use crate::commands;
use crate::preferences;

#[derive(Parser, Debug)]
#[command(
    name = "radscore",
    about = "Radiology and clinical reference calculators",
    version
)]
struct Cli {
    /// Decimal separator for numeric input (defaults to the saved preference)
    #[arg(long, global = true, value_enum)]
    locale: Option<LocaleArg>,
    #[command(subcommand)]
    command: Command,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum LocaleArg {
    Auto,
    Dot,
    Comma,
}

impl From<LocaleArg> for NumberLocale {
    fn from(arg: LocaleArg) -> Self {
        match arg {
            LocaleArg::Auto => NumberLocale::Auto,
            LocaleArg::Dot => NumberLocale::Dot,
            LocaleArg::Comma => NumberLocale::Comma,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List available calculators
    List {
        /// Only calculators in this specialty (e.g. "urology", "radiation_safety")
        #[arg(long)]
        specialty: Option<String>,
        /// Only favorites
        #[arg(long)]
        favorites: bool,
    },
    /// Show a calculator's input fields and options
    Describe { id: String },
    /// Run a calculator on a JSON input map
    Calc(CalcArgs),
    /// Run a calculator and write its CSV export
    Export {
        #[command(flatten)]
        calc: CalcArgs,
        /// Directory to write the CSV into
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
    /// Manage favorite calculators
    Favorites {
        #[command(subcommand)]
        command: Option<FavoritesCommand>,
    },
    /// Show recently used calculators
    Recents,
}

#[derive(Args, Debug)]
struct CalcArgs {
    id: String,
    /// JSON file with field values, or `-` for stdin
    #[arg(long, short, default_value = "-")]
    input: String,
    /// Print the machine-readable result instead of the text report
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum FavoritesCommand {
    Add { id: String },
    Remove { id: String },
    List,
}

pub fn run() -> eyre::Result<()> {
    let cli = Cli::parse();
    let mut prefs = preferences::load()?;
    let locale = cli.locale.map(NumberLocale::from).unwrap_or(prefs.number_locale);
    let now = jiff::Timestamp::now();
    let today = jiff::Zoned::now().date();

    match cli.command {
        Command::List { specialty, favorites } => {
            print!("{}", commands::list(&prefs, specialty.as_deref(), favorites));
        }
        Command::Describe { id } => print!("{}", commands::describe(&id)?),
        Command::Calc(args) => {
            let input = commands::read_input(&args.input)?;
            let result = commands::calculate(&mut prefs, &args.id, &input, locale, now)?;
            preferences::save(&prefs)?;
            println!("{}", commands::format_result(&result, today, args.json)?);
        }
        Command::Export { calc, out } => {
            let input = commands::read_input(&calc.input)?;
            let result = commands::calculate(&mut prefs, &calc.id, &input, locale, now)?;
            preferences::save(&prefs)?;
            let export = commands::export(&result, today, &out)?;
            println!("Wrote {}", out.join(&export.filename).display());
        }
        Command::Favorites { command } => match command.unwrap_or(FavoritesCommand::List) {
            FavoritesCommand::Add { id } => {
                print!("{}", commands::add_favorite(&mut prefs, &id)?);
                preferences::save(&prefs)?;
            }
            FavoritesCommand::Remove { id } => {
                print!("{}", commands::remove_favorite(&mut prefs, &id));
                preferences::save(&prefs)?;
            }
            FavoritesCommand::List => print!("{}", commands::favorites(&prefs)),
        },
        Command::Recents => print!("{}", commands::recents(&prefs)),
    }
    Ok(())
}
