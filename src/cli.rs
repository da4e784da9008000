//! Defines the command-line interface for the application.

use crate::error::ConvertError;
use clap::error::ErrorKind;
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Parser, Debug, PartialEq, Eq)]
#[command(
    name = "clone-manifest",
    version,
    about = "Convert a Deckard clusters file into a start,count,file line-range manifest."
)]
pub struct Cli {
    /// The clone report to read.
    #[arg(value_name = "INPUT_FILE", allow_hyphen_values = true)]
    pub input_file: PathBuf,

    /// Where to write the manifest. Written only once the whole report converts.
    #[arg(value_name = "OUTPUT_FILE", allow_hyphen_values = true)]
    pub output_file: PathBuf,
}

impl Cli {
    /// Parses `args`, turning any argument mistake into [`ConvertError::Usage`].
    ///
    /// `--help` and `--version` are printed by clap and exit the process.
    pub fn parse_args<I, T>(args: I) -> Result<Self, ConvertError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        match Cli::try_parse_from(args) {
            Ok(cli) => Ok(cli),
            Err(err) => match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
                _ => Err(ConvertError::Usage),
            },
        }
    }
}
