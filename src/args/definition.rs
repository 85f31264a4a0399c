//! Command-line argument definition and processing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use menuboard::i18n::Locale;

/// menuboard - translations, site data and printable menus for a restaurant site
#[derive(Parser, Debug)]
#[command(name = "menuboard")]
#[command(version)]
#[command(about = "Translations, site data and printable menus for a restaurant site", long_about = None)]
pub struct Args {
    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,

    /// Enable verbose output (equivalent to --log-level debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Load locale tables from a directory or an http(s) base URL instead of the bundled ones
    #[arg(long, global = true)]
    pub locales: Option<String>,

    /// Use a site content YAML file instead of the bundled one
    #[arg(long, global = true)]
    pub content: Option<PathBuf>,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Translate a key in the active (or given) locale
    Translate {
        /// Dot-notation key (e.g., contact.form.email)
        key: String,
        /// Interpolation parameters as name=value
        #[arg(short, long = "param")]
        params: Vec<String>,
        /// Locale to translate in instead of the active one
        #[arg(long)]
        locale: Option<Locale>,
    },
    /// Show or change the persisted locale
    Locale {
        /// Locale action
        #[command(subcommand)]
        action: LocaleAction,
    },
    /// Export the printable PDF menu
    Export {
        /// Directory the PDF is written to
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
    },
    /// Print the data endpoint payload as JSON
    Data {
        /// Fetch the payload from a running endpoint instead of the local bundle
        #[arg(long)]
        url: Option<String>,
    },
    /// Validate and submit a contact form message
    Contact {
        /// Sender name
        #[arg(long)]
        name: String,
        /// Reply e-mail address
        #[arg(long)]
        email: String,
        /// Optional phone number
        #[arg(long)]
        phone: Option<String>,
        /// Message body
        #[arg(long)]
        message: String,
    },
}

/// `locale` subcommands.
#[derive(Subcommand, Debug, Clone, Copy)]
pub enum LocaleAction {
    /// Print the active locale
    Get,
    /// Switch to and persist a locale
    Set {
        /// Locale tag (en, es)
        locale: Locale,
    },
}

/// What: Run the selected subcommand.
///
/// Inputs:
/// - `args`: Parsed command-line arguments
///
/// # Errors
/// - Returns `Err` with a printable message when the command fails
///
/// Details:
/// - Every command starts from a freshly initialized locale store
pub async fn process_args(args: &Args) -> Result<(), String> {
    use crate::args::{contact, data, export, locale, translate};

    let store = crate::args::utils::init_store(args.locales.as_deref()).await;
    match &args.command {
        Command::Translate {
            key,
            params,
            locale,
        } => translate::handle_translate(&store, key, params, *locale),
        Command::Locale { action } => locale::handle_locale(&store, *action).await,
        Command::Export { out_dir } => export::handle_export(args.content.as_deref(), out_dir).await,
        Command::Data { url } => data::handle_data(args.content.as_deref(), url.as_deref()).await,
        Command::Contact {
            name,
            email,
            phone,
            message,
        } => {
            let form = menuboard::contact::ContactForm {
                full_name: name.clone(),
                email: email.clone(),
                phone: phone.clone(),
                message: message.clone(),
            };
            contact::handle_contact(&store, &form).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_translate_with_params() {
        let args = Args::try_parse_from([
            "menuboard",
            "translate",
            "contact.messages.success",
            "-p",
            "name=Ana",
            "--locale",
            "es",
            "-v",
        ])
        .expect("valid arguments");
        assert!(args.verbose);
        match args.command {
            Command::Translate {
                key,
                params,
                locale,
            } => {
                assert_eq!(key, "contact.messages.success");
                assert_eq!(params, ["name=Ana"]);
                assert_eq!(locale, Some(Locale::Es));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_locale_set() {
        let args = Args::try_parse_from(["menuboard", "locale", "set", "fr"]);
        assert!(args.is_err(), "unsupported locales are rejected");
        let args = Args::try_parse_from(["menuboard", "locale", "set", "es-MX"]).expect("valid");
        assert!(matches!(
            args.command,
            Command::Locale {
                action: LocaleAction::Set { locale: Locale::Es }
            }
        ));
    }

    #[test]
    fn test_parse_export_defaults() {
        let args = Args::try_parse_from(["menuboard", "export"]).expect("valid");
        assert_eq!(args.log_level, "info");
        match args.command {
            Command::Export { out_dir } => assert_eq!(out_dir, PathBuf::from(".")),
            other => panic!("unexpected command {other:?}"),
        }
    }
}
