use clap::{Parser, Subcommand};

mod cmd;

#[derive(Parser, Debug)]
#[command(name = "fisc", version, about = "Tax computation and ledger balances")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate tax bases (VAT, CSS, IS/IMF, IRPP)
    Tax(cmd::tax::TaxCommand),
    /// Manage stored tax bases per workspace
    #[command(subcommand)]
    Bases(cmd::bases::BasesCommand),
    /// Account balances and balance sheet from accounting entries
    Ledger(cmd::ledger::LedgerCommand),
    /// Build a checksummed export packet
    Export(cmd::export::ExportCommand),
    /// Print expected input formats
    Schema(cmd::schema::SchemaCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Tax(command) => command.exec(),
        Command::Bases(command) => command.exec(),
        Command::Ledger(command) => command.exec(),
        Command::Export(command) => command.exec(),
        Command::Schema(command) => command.exec(),
    }
}
