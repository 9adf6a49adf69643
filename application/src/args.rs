//! [`Args`] definitions.

use clap::{Parser, Subcommand};
use service::{
    domain::{
        rating,
        store,
        user::{self, Credential, Password, Role},
    },
    read,
};

/// Client of the store rating platform.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,

    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    /// Parses command line arguments.
    ///
    /// # Errors
    ///
    /// Errors if failed to parse command line arguments.
    pub fn parse() -> Result<Self, clap::Error> {
        <Self as Parser>::try_parse()
    }
}

/// Command to execute.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Logs in with email and password.
    Login {
        /// Email address of the account.
        #[arg(long)]
        email: String,

        /// Password of the account.
        #[arg(long)]
        password: Credential,
    },

    /// Logs out, forgetting the stored session.
    Logout,

    /// Shows the logged in user.
    Whoami,

    /// Registers a new account of a normal user.
    Register {
        /// Full name, 20 to 60 characters.
        #[arg(long)]
        name: user::Name,

        /// Email address.
        #[arg(long)]
        email: user::Email,

        /// Password, 8 to 16 characters with an uppercase letter and one of
        /// `!@#$%^&*`.
        #[arg(long)]
        password: Password,

        /// Postal address, up to 400 characters.
        #[arg(long, default_value = "")]
        address: user::Address,
    },

    /// Changes the password of the logged in user.
    Password {
        /// Current password.
        #[arg(long)]
        current: Credential,

        /// New password, 8 to 16 characters with an uppercase letter and one
        /// of `!@#$%^&*`.
        #[arg(long)]
        new: Password,
    },

    /// Shows the dashboard of the logged in user.
    Dashboard,

    /// Manages users (administrators only).
    #[command(subcommand)]
    Users(Users),

    /// Lists, creates and rates stores.
    #[command(subcommand)]
    Stores(Stores),

    /// Lists ratings of the owned store (store owners only).
    Reviews {
        /// Column to sort by, repeat to toggle the order.
        #[arg(long = "sort", value_name = "FIELD")]
        sort: Vec<read::rating::Field>,
    },
}

/// Users management command.
#[derive(Debug, Subcommand)]
pub enum Users {
    /// Lists users.
    List {
        /// Text to search in names, emails and addresses.
        #[arg(long, default_value = "")]
        search: String,

        /// Role to filter by, all roles if omitted.
        #[arg(long)]
        role: Option<Role>,

        /// Column to sort by, repeat to toggle the order.
        #[arg(long = "sort", value_name = "FIELD")]
        sort: Vec<read::user::list::Field>,
    },

    /// Creates a new user.
    Create {
        /// Full name, 20 to 60 characters.
        #[arg(long)]
        name: user::Name,

        /// Email address.
        #[arg(long)]
        email: user::Email,

        /// Password, 8 to 16 characters with an uppercase letter and one of
        /// `!@#$%^&*`.
        #[arg(long)]
        password: Password,

        /// Postal address, up to 400 characters.
        #[arg(long, default_value = "")]
        address: user::Address,

        /// Role of the user.
        #[arg(long, default_value = "normal")]
        role: Role,
    },
}

/// Stores command.
#[derive(Debug, Subcommand)]
pub enum Stores {
    /// Lists stores.
    List {
        /// Text to search in names and addresses.
        #[arg(long, default_value = "")]
        search: String,

        /// Column to sort by, repeat to toggle the order.
        #[arg(long = "sort", value_name = "FIELD")]
        sort: Vec<String>,
    },

    /// Creates a new store (administrators only).
    Create {
        /// Name, 20 to 60 characters.
        #[arg(long)]
        name: store::Name,

        /// Contact email address.
        #[arg(long)]
        email: store::Email,

        /// Postal address, up to 400 characters.
        #[arg(long, default_value = "")]
        address: store::Address,

        /// ID of the store owner.
        #[arg(long = "owner", value_name = "ID")]
        owner_id: Option<user::Id>,
    },

    /// Rates a store from 1 to 5 (normal users only).
    Rate {
        /// ID of the store.
        store_id: store::Id,

        /// Rating from 1 to 5.
        rating: rating::Value,
    },
}

#[cfg(test)]
mod spec {
    use clap::Parser as _;
    use service::{domain::user::Role, read};

    use super::{Args, Command, Stores, Users};

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(
            ["store-rating"].into_iter().chain(args.iter().copied()),
        )
    }

    #[test]
    fn parses_repeated_sorting() {
        let args = parse(&[
            "users", "list", "--role", "store_owner", "--sort", "name",
            "--sort", "name", "--sort", "email",
        ])
        .unwrap();

        let Command::Users(Users::List { search, role, sort }) = args.command
        else {
            panic!("unexpected command: {:?}", args.command);
        };
        assert_eq!(search, "");
        assert_eq!(role, Some(Role::StoreOwner));
        assert_eq!(
            sort,
            [
                read::user::list::Field::Name,
                read::user::list::Field::Name,
                read::user::list::Field::Email,
            ],
        );
        assert_eq!(args.config, "config.toml");
    }

    #[test]
    fn validates_forms_before_anything() {
        assert!(parse(&[
            "register", "--name", "Too short", "--email", "a@b.co",
            "--password", "Abc123!@",
        ])
        .is_err());
        assert!(parse(&[
            "register", "--name", "Normal User With Long Name", "--email",
            "a@b", "--password", "Abc123!@",
        ])
        .is_err());
        assert!(parse(&[
            "register", "--name", "Normal User With Long Name", "--email",
            "a@b.co", "--password", "abc12345",
        ])
        .is_err());
        assert!(parse(&[
            "register", "--name", "Normal User With Long Name", "--email",
            "a@b.co", "--password", "Abc123!@",
        ])
        .is_ok());

        assert!(parse(&["stores", "rate", "7", "6"]).is_err());
        assert!(parse(&["stores", "rate", "7", "0"]).is_err());
        let args = parse(&["stores", "rate", "7", "5"]).unwrap();
        assert!(matches!(
            args.command,
            Command::Stores(Stores::Rate { rating, .. })
                if rating.stars() == 5,
        ));
    }

    #[test]
    fn keeps_store_sorting_raw() {
        let args =
            parse(&["stores", "list", "--sort", "averageRating"]).unwrap();

        assert!(matches!(
            args.command,
            Command::Stores(Stores::List { sort, .. })
                if sort == ["averageRating"],
        ));
    }
}
