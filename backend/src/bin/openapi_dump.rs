//! Print the OpenAPI document as JSON.

use std::io::{self, Write};

use campus_security::doc::ApiDoc;
use color_eyre::eyre::{Result, WrapErr};
use utoipa::OpenApi;

fn main() -> Result<()> {
    color_eyre::install()?;
    let document = ApiDoc::openapi()
        .to_pretty_json()
        .wrap_err("serialise OpenAPI document")?;
    writeln!(io::stdout().lock(), "{document}").wrap_err("write OpenAPI document")?;
    Ok(())
}
