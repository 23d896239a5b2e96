//! Print the OpenAPI document of the football manager backend to stdout.

use anyhow::Context;
use football_manager_back::services::documentation::ApiDoc;
use utoipa::OpenApi;

fn main() -> anyhow::Result<()> {
    let doc = ApiDoc::openapi();
    let json = doc.to_pretty_json().context("encoding OpenAPI document")?;
    println!("{json}");
    Ok(())
}
