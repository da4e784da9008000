//! The clone-manifest command-line executable.

use clone_manifest::ConvertError;

fn main() -> anyhow::Result<()> {
    match clone_manifest::run() {
        // Usage text is printed bare, without the `Error:` prefix.
        Err(err) if matches!(err.downcast_ref::<ConvertError>(), Some(ConvertError::Usage)) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
        result => result,
    }
}
