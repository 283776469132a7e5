//! Command-line interface of the `centime` binary.

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

#[derive(Debug, Parser)]
#[command(name = "centime")]
#[command(author, version, about = "Currency precision and amount conversion tools")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Print the number of decimal places a currency uses
    Decimals {
        /// Currency code, any case
        code: String,
    },
    /// Convert minor units to major units
    Major {
        /// Amount in minor units
        #[arg(allow_negative_numbers = true)]
        minor: i64,
        /// Currency code
        code: String,
    },
    /// Convert major units to minor units, rounding half away from zero
    Minor {
        /// Amount in major units
        #[arg(allow_negative_numbers = true)]
        major: Decimal,
        /// Currency code
        code: String,
    },
    /// Render minor units for display
    Format {
        /// Amount in minor units
        #[arg(allow_negative_numbers = true)]
        minor: i64,
        /// Currency code
        code: String,
        /// BCP-47 locale tag; defaults to `currency.default_locale`
        locale: Option<String>,
    },
    /// Parse a display string such as `$1,234.56` into minor units
    Parse {
        /// Display value
        #[arg(allow_hyphen_values = true)]
        value: String,
        /// Currency code
        code: String,
    },
    /// Check that an amount is valid for a currency
    Valid {
        /// Plain decimal amount
        #[arg(allow_hyphen_values = true)]
        value: String,
        /// Currency code
        code: String,
    },
    /// Update a currency's stored precision and reload the cache
    SetDecimals {
        /// Currency code
        code: String,
        /// New number of decimal places (0 to 4)
        places: i64,
    },
}

impl Command {
    /// Whether the command renders symbols, so the symbol table is worth loading.
    #[must_use]
    pub const fn needs_symbols(&self) -> bool {
        matches!(self, Self::Format { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use clap::error::ErrorKind;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn parse(args: &[&str]) -> Command {
        Cli::try_parse_from(std::iter::once("centime").chain(args.iter().copied()))
            .unwrap()
            .command
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_decimals() {
        assert_eq!(
            parse(&["decimals", "jpy"]),
            Command::Decimals {
                code: "jpy".to_string()
            }
        );
    }

    #[test]
    fn test_parse_minor_reads_decimal() {
        assert_eq!(
            parse(&["minor", "10.125", "USD"]),
            Command::Minor {
                major: dec!(10.125),
                code: "USD".to_string()
            }
        );
    }

    #[test]
    fn test_parse_negative_amounts() {
        assert_eq!(
            parse(&["major", "-550", "USD"]),
            Command::Major {
                minor: -550,
                code: "USD".to_string()
            }
        );
        assert_eq!(
            parse(&["parse", "-$5.50", "USD"]),
            Command::Parse {
                value: "-$5.50".to_string(),
                code: "USD".to_string()
            }
        );
    }

    #[test]
    fn test_parse_format_with_and_without_locale() {
        assert_eq!(
            parse(&["format", "1234", "USD"]),
            Command::Format {
                minor: 1234,
                code: "USD".to_string(),
                locale: None
            }
        );
        assert_eq!(
            parse(&["format", "1234", "EUR", "de-DE"]),
            Command::Format {
                minor: 1234,
                code: "EUR".to_string(),
                locale: Some("de-DE".to_string())
            }
        );
    }

    #[test]
    fn test_parse_set_decimals() {
        assert_eq!(
            parse(&["set-decimals", "TND", "3"]),
            Command::SetDecimals {
                code: "TND".to_string(),
                places: 3
            }
        );
    }

    #[test]
    fn test_only_format_needs_symbols() {
        assert!(parse(&["format", "1", "USD"]).needs_symbols());
        assert!(!parse(&["set-decimals", "TND", "3"]).needs_symbols());
        assert!(!parse(&["decimals", "TND"]).needs_symbols());
    }

    #[rstest]
    #[case(&["bogus"], ErrorKind::InvalidSubcommand)]
    #[case(&["decimals"], ErrorKind::MissingRequiredArgument)]
    #[case(&["major", "12.5", "USD"], ErrorKind::ValueValidation)]
    #[case(&["minor", "abc", "USD"], ErrorKind::ValueValidation)]
    #[case(&["set-decimals", "USD", "two"], ErrorKind::ValueValidation)]
    #[case(&["format", "1", "USD", "en-US", "extra"], ErrorKind::UnknownArgument)]
    fn test_parse_rejects(#[case] args: &[&str], #[case] kind: ErrorKind) {
        let err = Cli::try_parse_from(std::iter::once("centime").chain(args.iter().copied()))
            .unwrap_err();
        assert_eq!(err.kind(), kind);
    }
}
