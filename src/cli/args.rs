use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "mihrab", version, author, about = "Prayer times and qibla compass companion for the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show today's prayer times and the countdown to the next prayer
    Times,
    /// Show the qibla bearing for the saved location
    Qibla,
    /// Detect the current location over the network and save it
    Locate,
    /// Search for a city without saving anything
    Search {
        /// City name, at least 2 letters
        query: String,
    },
    /// Saved city management
    City {
        #[command(subcommand)]
        action: CityCommands,
    },
    /// Refetch this month's prayer times for the saved location
    Refresh,
}

#[derive(Subcommand, Debug)]
pub enum CityCommands {
    /// List saved cities
    List,
    /// Search for a city, save it, and make it active
    Add {
        /// City name to search for
        query: String,
        /// Take result number N instead of prompting
        #[arg(long)]
        pick: Option<usize>,
    },
    /// Make an already saved city the active location
    Set {
        /// Saved city name
        name: String,
    },
}
